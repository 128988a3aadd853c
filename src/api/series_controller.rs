use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};
use crate::render::{Renderer, Theme};

use super::ChartWidget;

impl<R: Renderer> ChartWidget<R> {
    /// Shows or hides one series with a fade and rescales both areas to the
    /// remaining visible data.
    ///
    /// Returns the new visibility.
    pub fn toggle_series_visibility(&mut self, index: usize) -> ChartResult<bool> {
        let series_count = self.series.len();
        let Some(series) = self.series.get_mut(index) else {
            warn!(index, series_count, "toggle for unknown series ignored");
            return Err(ChartError::InvalidData(format!(
                "series index {index} out of range (count {series_count})"
            )));
        };
        let visible = series.toggle_visibility();
        debug!(index, name = series.name(), visible, "series visibility toggled");

        let duration_ms = self.config.series_fade_duration_ms;
        let fade = &self.series_fade;
        fade.index.set(Some(index));
        let fading = Rc::clone(&fade.index);
        if visible {
            fade.alpha.set(0.0);
            self.scheduler
                .start_with_hook(fade.tween, duration_ms, 1.0, move |_| fading.set(None))?;
        } else {
            fade.alpha.set(1.0);
            self.scheduler
                .start_with_hook(fade.tween, duration_ms, 0.0, move |_| fading.set(None))?;
        }

        self.chart_window
            .update_max_y(&self.viewport, &self.series, &mut self.scheduler, false)?;
        self.minimap
            .update_max_y(&self.viewport, &self.series, &mut self.scheduler, false)?;
        Ok(visible)
    }

    #[must_use]
    pub fn has_visible_series(&self) -> bool {
        self.series.iter().any(|series| series.is_visible())
    }

    /// Swaps the palette and repaints everything on the next frame.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.invalidate_all();
    }
}
