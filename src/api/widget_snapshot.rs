use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::state::LabelDensityPhase;

/// Serializable state snapshot used by regression tests and debugging tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSnapshot {
    pub left_edge_unit: f64,
    pub right_edge_unit: f64,
    pub unit_count: usize,
    pub width_px: f64,
    pub leftmost_displayed_index: usize,
    pub rightmost_displayed_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartWindowSnapshot {
    pub height_px: f64,
    pub animated_max_y: f64,
    pub last_max_y: f64,
    pub current_grid_divides: Vec<f64>,
    pub previous_grid_divides: Vec<f64>,
    pub grid_alpha: f64,
    pub label_step_units: u32,
    pub label_alpha: f64,
    pub label_density_phase: LabelDensityPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimapSnapshot {
    pub height_px: f64,
    pub animated_max_y: f64,
    pub last_max_y: f64,
    pub frame_left_px: f64,
    pub frame_right_px: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSnapshot {
    pub last_frame_timestamp: f64,
    pub viewport: ViewportSnapshot,
    pub chart_window: ChartWindowSnapshot,
    pub minimap: MinimapSnapshot,
    /// Series name to visibility, in dataset order.
    pub series_visibility: IndexMap<String, bool>,
    pub fading_series: Option<usize>,
    pub running_tweens: bool,
}
