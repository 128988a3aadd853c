use crate::animation::AffectedRegions;
use crate::error::ChartResult;
use crate::render::{FrameView, Renderer};

/// No-op renderer used by tests and headless widgets.
///
/// It still validates each frame and records what was asked of it.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_regions: AffectedRegions,
    pub last_timestamp: f64,
    pub last_time_label_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &FrameView<'_>) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_regions = frame.regions;
        self.last_timestamp = frame.timestamp;
        self.last_time_label_count = frame.time_labels().len();
        Ok(())
    }
}
