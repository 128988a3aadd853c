pub mod series;
pub mod time_labels;
pub mod viewport;
pub mod y_scale;

pub use series::{ChartDataset, ChartSeries, ColumnKind, RawChartData, max_value_in_range};
pub use time_labels::{TimeLabel, format_time_label, initial_label_step};
pub use viewport::{FrameFlags, Viewport};
pub use y_scale::{YScaleGrid, format_y_scale_value, select_y_scale_step};
