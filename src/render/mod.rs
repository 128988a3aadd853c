mod color;
mod frame;
mod null_renderer;
mod theme;

pub use color::Color;
pub use frame::{FadingSeries, FrameView};
pub use null_renderer::NullRenderer;
pub use theme::Theme;

use crate::error::ChartResult;

/// Contract implemented by any drawing backend.
///
/// Backends get a read-only view of the widget plus the regions to repaint,
/// so drawing code stays out of animation and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &FrameView<'_>) -> ChartResult<()>;
}
