//! minimap-chart: headless animation and viewport state for time-series
//! line charts with a draggable minimap.
//!
//! The crate owns everything a chart widget needs between input events and
//! pixels: the visible window over the data, animated vertical scales, grid
//! and time-label fades, and a frame driver that tells a [`render::Renderer`]
//! which screen regions changed. Drawing itself is left to the renderer.

pub mod animation;
pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod state;
pub mod telemetry;

pub use api::{ChartWidget, ChartWidgetConfig};
pub use error::{ChartError, ChartResult};
