use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::animation::{
    AffectedRegion, AffectedRegions, AnimatedValue, AnimationScheduler, TweenId,
};
use crate::core::{ChartSeries, Viewport, max_value_in_range};
use crate::error::{ChartError, ChartResult};

/// Physical-pixel layout and timing for the minimap strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimapSettings {
    pub height_px: f64,
    pub top_margin_px: f64,
    pub y_scale_duration_ms: f64,
}

/// Vertical scale of the minimap plus the drag operations that move the
/// viewport frame.
///
/// The minimap always spans every unit, so its scale only depends on which
/// series are visible.
#[derive(Debug)]
pub struct MinimapViewportState {
    settings: MinimapSettings,
    animated_max_y: AnimatedValue,
    last_max_y: f64,
    y_scale_tween: TweenId,
}

impl MinimapViewportState {
    pub fn new(scheduler: &mut AnimationScheduler, settings: MinimapSettings) -> Self {
        let animated_max_y = AnimatedValue::new(0.0);
        let y_scale_tween = scheduler.create_tween(
            AffectedRegions::from_region(AffectedRegion::Minimap),
            animated_max_y.binding(),
        );
        Self {
            settings,
            animated_max_y,
            last_max_y: 0.0,
            y_scale_tween,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &MinimapSettings {
        &self.settings
    }

    #[must_use]
    pub fn height_px(&self) -> f64 {
        self.settings.height_px
    }

    #[must_use]
    pub fn animated_max_y(&self) -> f64 {
        self.animated_max_y.get()
    }

    #[must_use]
    pub fn last_max_y(&self) -> f64 {
        self.last_max_y
    }

    pub fn set_height_px(&mut self, height_px: f64) -> bool {
        if height_px == self.settings.height_px {
            return false;
        }
        self.settings.height_px = height_px;
        true
    }

    /// Recomputes the max over all units and retargets the minimap scale.
    pub fn update_max_y(
        &mut self,
        viewport: &Viewport,
        series: &[ChartSeries],
        scheduler: &mut AnimationScheduler,
        disable_animation: bool,
    ) -> ChartResult<bool> {
        let max_y = max_value_in_range(series, 0, viewport.unit_count() - 1);
        if max_y == self.last_max_y {
            return Ok(false);
        }
        debug!(from = self.last_max_y, to = max_y, "minimap max changed");
        self.last_max_y = max_y;

        if disable_animation {
            scheduler.cancel(self.y_scale_tween)?;
            self.animated_max_y.set(max_y);
        } else {
            scheduler.start(self.y_scale_tween, self.settings.y_scale_duration_ms, max_y)?;
        }
        Ok(true)
    }

    /// Shifts the whole frame by a minimap pixel delta, keeping its width and
    /// stopping at the data bounds.
    pub fn move_frame(&self, viewport: &mut Viewport, delta_px: f64) -> ChartResult<()> {
        let delta = units_for_delta(viewport, delta_px)?;
        let width = viewport.width_in_units();
        let count = viewport.unit_count() as f64;
        let left = viewport.left_edge_unit() + delta;
        let right = viewport.right_edge_unit() + delta;

        if left < 0.0 {
            viewport.set_edges(0.0, width);
        } else if right > count {
            viewport.set_edges(count - width, count);
        } else {
            viewport.set_edges(left, right);
        }
        Ok(())
    }

    /// Moves only the left edge. The frame never gets narrower than the
    /// minimum width.
    pub fn move_left_grip(&self, viewport: &mut Viewport, delta_px: f64) -> ChartResult<()> {
        let delta = units_for_delta(viewport, delta_px)?;
        let right = viewport.right_edge_unit();
        let left = viewport.left_edge_unit() + delta;
        if right - left < viewport.min_width_units() {
            viewport.set_left_edge_unit(right - viewport.min_width_units());
        } else {
            viewport.set_left_edge_unit(left);
        }
        Ok(())
    }

    /// Moves only the right edge, mirroring [`Self::move_left_grip`].
    pub fn move_right_grip(&self, viewport: &mut Viewport, delta_px: f64) -> ChartResult<()> {
        let delta = units_for_delta(viewport, delta_px)?;
        let left = viewport.left_edge_unit();
        let right = viewport.right_edge_unit() + delta;
        if right - left < viewport.min_width_units() {
            viewport.set_right_edge_unit(left + viewport.min_width_units());
        } else {
            viewport.set_right_edge_unit(right);
        }
        Ok(())
    }

    /// Horizontal minimap pixel of a unit.
    #[must_use]
    pub fn unit_to_pixel(viewport: &Viewport, unit: f64) -> f64 {
        unit / viewport.unit_count() as f64 * viewport.width_px()
    }

    /// Minimap pixels of the frame's left and right edges.
    #[must_use]
    pub fn frame_edges_px(viewport: &Viewport) -> (f64, f64) {
        (
            Self::unit_to_pixel(viewport, viewport.left_edge_unit()),
            Self::unit_to_pixel(viewport, viewport.right_edge_unit()),
        )
    }

    /// Vertical minimap pixel of a value under the animated scale.
    #[must_use]
    pub fn value_to_pixel(&self, value: f64) -> f64 {
        let top = self.settings.top_margin_px;
        let plot_height = self.settings.height_px - top;
        let max_y = self.animated_max_y.get();
        if max_y <= 0.0 {
            return top + plot_height;
        }
        (1.0 - value / max_y) * plot_height + top
    }
}

fn units_for_delta(viewport: &Viewport, delta_px: f64) -> ChartResult<f64> {
    if !delta_px.is_finite() {
        return Err(ChartError::InvalidData(
            "pointer delta must be finite".to_owned(),
        ));
    }
    Ok(viewport.pixel_delta_to_units(delta_px))
}
