//! Per-area animated state of the widget.

mod chart_window;
mod label_density;
mod minimap;

pub use chart_window::{ChartWindowAxisState, ChartWindowSettings};
pub use label_density::{
    LabelDensityAction, LabelDensityPhase, decide_label_density, fade_in_duration,
    fade_out_duration,
};
pub use minimap::{MinimapSettings, MinimapViewportState};
