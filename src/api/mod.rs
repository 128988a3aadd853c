mod series_controller;
mod validation;
mod viewport_controller;
mod widget;
mod widget_accessors;
mod widget_config;
mod widget_init;
mod widget_snapshot;

pub use widget::ChartWidget;
pub use widget_config::ChartWidgetConfig;
pub use widget_snapshot::{ChartWindowSnapshot, MinimapSnapshot, ViewportSnapshot, WidgetSnapshot};
