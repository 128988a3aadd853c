use indexmap::IndexMap;

use crate::animation::AnimationScheduler;
use crate::core::{ChartSeries, TimeLabel, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{Renderer, Theme};
use crate::state::{ChartWindowAxisState, MinimapViewportState};

use super::{
    ChartWidget, ChartWidgetConfig, ChartWindowSnapshot, MinimapSnapshot, ViewportSnapshot,
    WidgetSnapshot,
};

impl<R: Renderer> ChartWidget<R> {
    #[must_use]
    pub fn config(&self) -> &ChartWidgetConfig {
        &self.config
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    #[must_use]
    pub fn series(&self) -> &[ChartSeries] {
        &self.series
    }

    #[must_use]
    pub fn chart_window(&self) -> &ChartWindowAxisState {
        &self.chart_window
    }

    #[must_use]
    pub fn minimap(&self) -> &MinimapViewportState {
        &self.minimap
    }

    #[must_use]
    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn time_labels(&self) -> Vec<TimeLabel> {
        self.chart_window
            .visible_time_labels(&self.viewport, &self.x_values)
    }

    #[must_use]
    pub fn snapshot(&self) -> WidgetSnapshot {
        let (frame_left_px, frame_right_px) = MinimapViewportState::frame_edges_px(&self.viewport);
        let series_visibility: IndexMap<String, bool> = self
            .series
            .iter()
            .map(|series| (series.name().to_owned(), series.is_visible()))
            .collect();

        WidgetSnapshot {
            last_frame_timestamp: self.scheduler.last_frame_timestamp(),
            viewport: ViewportSnapshot {
                left_edge_unit: self.viewport.left_edge_unit(),
                right_edge_unit: self.viewport.right_edge_unit(),
                unit_count: self.viewport.unit_count(),
                width_px: self.viewport.width_px(),
                leftmost_displayed_index: self.viewport.leftmost_displayed_index(),
                rightmost_displayed_index: self.viewport.rightmost_displayed_index(),
            },
            chart_window: ChartWindowSnapshot {
                height_px: self.chart_window.height_px(),
                animated_max_y: self.chart_window.animated_max_y(),
                last_max_y: self.chart_window.last_max_y(),
                current_grid_divides: self.chart_window.current_grid_divides().to_vec(),
                previous_grid_divides: self.chart_window.previous_grid_divides().to_vec(),
                grid_alpha: self.chart_window.grid_alpha(),
                label_step_units: self.chart_window.label_step_units(),
                label_alpha: self.chart_window.label_alpha(),
                label_density_phase: self.chart_window.label_density_phase(),
            },
            minimap: MinimapSnapshot {
                height_px: self.minimap.height_px(),
                animated_max_y: self.minimap.animated_max_y(),
                last_max_y: self.minimap.last_max_y(),
                frame_left_px,
                frame_right_px,
            },
            series_visibility,
            fading_series: self.series_fade.index.get(),
            running_tweens: self.scheduler.has_running_tweens(),
        }
    }

    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
