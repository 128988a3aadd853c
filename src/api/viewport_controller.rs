use tracing::{debug, trace};

use crate::error::ChartResult;
use crate::interaction::{MinimapPointerTarget, hit_test};
use crate::render::Renderer;
use crate::state::MinimapViewportState;

use super::ChartWidget;
use super::validation::{validate_pointer_x, validate_widget_size};

impl<R: Renderer> ChartWidget<R> {
    /// Applies new physical sizes. Any change repaints the whole widget on
    /// the next frame.
    pub fn resize(
        &mut self,
        width_px: f64,
        chart_height_px: f64,
        minimap_height_px: f64,
    ) -> ChartResult<()> {
        validate_widget_size(width_px, chart_height_px, minimap_height_px)?;
        self.viewport.set_width_px(width_px)?;
        if self.chart_window.set_height_px(chart_height_px) {
            self.viewport.mark_resized();
        }
        if self.minimap.set_height_px(minimap_height_px) {
            self.viewport.mark_resized();
        }
        self.config.width_px = width_px;
        self.config.chart_height_px = chart_height_px;
        self.config.minimap_height_px = minimap_height_px;
        debug!(width_px, chart_height_px, minimap_height_px, "chart widget resized");

        self.chart_window
            .viewport_updated(&self.viewport, &mut self.scheduler)
    }

    /// Shifts the viewport frame by a minimap pixel delta.
    pub fn pan(&mut self, delta_px: f64) -> ChartResult<()> {
        self.minimap.move_frame(&mut self.viewport, delta_px)?;
        self.after_viewport_moved()
    }

    /// Moves the viewport's left edge by a minimap pixel delta.
    pub fn resize_left_edge(&mut self, delta_px: f64) -> ChartResult<()> {
        self.minimap.move_left_grip(&mut self.viewport, delta_px)?;
        self.after_viewport_moved()
    }

    /// Moves the viewport's right edge by a minimap pixel delta.
    pub fn resize_right_edge(&mut self, delta_px: f64) -> ChartResult<()> {
        self.minimap.move_right_grip(&mut self.viewport, delta_px)?;
        self.after_viewport_moved()
    }

    /// What a pointer at minimap x `local_x` would grab.
    #[must_use]
    pub fn minimap_target_at(&self, local_x: f64) -> MinimapPointerTarget {
        let (left_px, right_px) = MinimapViewportState::frame_edges_px(&self.viewport);
        let grip_px = self.config.to_physical_px(self.config.grip_width_px);
        hit_test(local_x, left_px, right_px, grip_px)
    }

    /// Pointer pressed on the minimap. Returns what the drag will move.
    pub fn pointer_down(&mut self, local_x: f64) -> ChartResult<MinimapPointerTarget> {
        validate_pointer_x(local_x)?;
        let target = self.minimap_target_at(local_x);
        self.drag.begin(target, local_x);
        trace!(local_x, ?target, "minimap pointer down");
        Ok(target)
    }

    /// Pointer moved while pressed. Returns whether a drag step was applied.
    pub fn pointer_move(&mut self, local_x: f64) -> ChartResult<bool> {
        validate_pointer_x(local_x)?;
        let Some(step) = self.drag.drag_to(local_x) else {
            return Ok(false);
        };
        match step.target {
            MinimapPointerTarget::LeftGrip => self.resize_left_edge(step.delta_px)?,
            MinimapPointerTarget::RightGrip => self.resize_right_edge(step.delta_px)?,
            MinimapPointerTarget::Frame => self.pan(step.delta_px)?,
            MinimapPointerTarget::Outside => return Ok(false),
        }
        Ok(true)
    }

    pub fn pointer_up(&mut self) {
        self.drag.end();
    }

    /// Data index under a chart-window pixel, for hover tooltips.
    #[must_use]
    pub fn index_at_pixel(&self, x_px: f64) -> Option<usize> {
        self.viewport.index_at_pixel(x_px)
    }

    fn after_viewport_moved(&mut self) -> ChartResult<()> {
        if !self.viewport.frame_flags().viewport_changed {
            return Ok(());
        }
        self.chart_window
            .update_max_y(&self.viewport, &self.series, &mut self.scheduler, false)?;
        self.chart_window
            .viewport_updated(&self.viewport, &mut self.scheduler)
    }
}
