use crate::animation::{AffectedRegion, AffectedRegions};
use crate::core::{ChartSeries, TimeLabel, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Theme;
use crate::state::{ChartWindowAxisState, MinimapViewportState};

/// Series fading in or out after a visibility toggle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadingSeries {
    pub index: usize,
    pub alpha: f64,
}

/// Read-only view of the widget for one draw pass.
///
/// Only the regions listed in `regions` need repainting; everything else on
/// screen is still current.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub timestamp: f64,
    pub regions: AffectedRegions,
    pub theme: &'a Theme,
    pub viewport: &'a Viewport,
    pub x_values: &'a [f64],
    pub series: &'a [ChartSeries],
    pub chart_window: &'a ChartWindowAxisState,
    pub minimap: &'a MinimapViewportState,
    pub fading_series: Option<FadingSeries>,
    pub grip_width_px: f64,
}

impl FrameView<'_> {
    #[must_use]
    pub fn needs(&self, region: AffectedRegion) -> bool {
        self.regions.contains(region)
    }

    /// Opacity a series should be drawn with in this frame.
    #[must_use]
    pub fn series_alpha(&self, index: usize) -> f64 {
        match self.fading_series {
            Some(fading) if fading.index == index => fading.alpha,
            _ => match self.series.get(index) {
                Some(series) if series.is_visible() => 1.0,
                _ => 0.0,
            },
        }
    }

    /// Index range of samples to draw in the chart window, including one
    /// sample past each edge so lines run off-screen.
    #[must_use]
    pub fn chart_index_range(&self) -> (usize, usize) {
        ChartWindowAxisState::scan_range(self.viewport)
    }

    #[must_use]
    pub fn time_labels(&self) -> Vec<TimeLabel> {
        self.chart_window
            .visible_time_labels(self.viewport, self.x_values)
    }

    /// Minimap pixels of the viewport frame edges.
    #[must_use]
    pub fn minimap_frame_px(&self) -> (f64, f64) {
        MinimapViewportState::frame_edges_px(self.viewport)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.width_px().is_finite() || self.viewport.width_px() <= 0.0 {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width_px(),
                height: self.chart_window.height_px(),
            });
        }
        for (name, value) in [
            ("chart max", self.chart_window.animated_max_y()),
            ("minimap max", self.minimap.animated_max_y()),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!("{name} must be finite")));
            }
        }
        for (name, alpha) in [
            ("grid alpha", self.chart_window.grid_alpha()),
            ("label alpha", self.chart_window.label_alpha()),
        ] {
            if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and in [0, 1]"
                )));
            }
        }
        if let Some(fading) = self.fading_series {
            if fading.index >= self.series.len() {
                return Err(ChartError::InvalidData(format!(
                    "fading series {} does not exist",
                    fading.index
                )));
            }
        }
        Ok(())
    }
}
