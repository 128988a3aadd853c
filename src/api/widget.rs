use std::cell::Cell;
use std::rc::Rc;

use tracing::{trace, warn};

use crate::animation::{
    AffectedRegion, AffectedRegions, AnimatedValue, AnimationScheduler, TweenId,
};
use crate::core::{ChartSeries, Viewport};
use crate::error::ChartResult;
use crate::interaction::MinimapDrag;
use crate::render::{FadingSeries, FrameView, Renderer, Theme};
use crate::state::{ChartWindowAxisState, MinimapViewportState};

use super::ChartWidgetConfig;

/// Fade of the series whose visibility was toggled last.
#[derive(Debug)]
pub(super) struct SeriesFade {
    pub(super) alpha: AnimatedValue,
    pub(super) index: Rc<Cell<Option<usize>>>,
    pub(super) tween: TweenId,
}

/// Main facade consumed by host applications.
///
/// `ChartWidget` owns the dataset, viewport, animated axis state and the
/// tween scheduler, and turns host callbacks (frame ticks, pointer input,
/// resizes, legend toggles) into renderer calls for the dirty regions only.
pub struct ChartWidget<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartWidgetConfig,
    pub(super) theme: Theme,
    pub(super) scheduler: AnimationScheduler,
    pub(super) viewport: Viewport,
    pub(super) x_values: Vec<f64>,
    pub(super) series: Vec<ChartSeries>,
    pub(super) chart_window: ChartWindowAxisState,
    pub(super) minimap: MinimapViewportState,
    pub(super) series_fade: SeriesFade,
    pub(super) drag: MinimapDrag,
    pub(super) pending_regions: AffectedRegions,
}

impl<R: Renderer> ChartWidget<R> {
    /// Advances every running tween to `timestamp` and repaints the regions
    /// that changed since the previous frame.
    ///
    /// Regions of tweens that finish during this tick are still repainted so
    /// their final value reaches the screen. Viewport frame flags stay raised
    /// while the renderer runs and are cleared afterwards. On a render error
    /// the frame's regions are queued again.
    pub fn on_frame(&mut self, timestamp: f64) -> ChartResult<AffectedRegions> {
        let mut regions = self.pending_regions;
        self.scheduler.collect_affected_regions(&mut regions);
        self.scheduler.on_tick(timestamp);
        self.scheduler.collect_affected_regions(&mut regions);

        let flags = self.viewport.frame_flags();
        if flags.widget_resized {
            regions = AffectedRegions::all();
        }
        if flags.viewport_changed {
            regions.insert(AffectedRegion::ChartWindow);
            regions.insert(AffectedRegion::MinimapOverlay);
            regions.insert(AffectedRegion::XScale);
        }
        self.pending_regions.clear();

        if regions.is_none() {
            self.viewport.take_frame_flags();
            return Ok(regions);
        }
        trace!(timestamp, ?regions, "render frame");

        let fading_series = self.fading_series();
        let frame = FrameView {
            timestamp: self.scheduler.last_frame_timestamp(),
            regions,
            theme: &self.theme,
            viewport: &self.viewport,
            x_values: &self.x_values,
            series: &self.series,
            chart_window: &self.chart_window,
            minimap: &self.minimap,
            fading_series,
            grip_width_px: self.config.to_physical_px(self.config.grip_width_px),
        };
        let rendered = self.renderer.render(&frame);
        self.viewport.take_frame_flags();
        if let Err(error) = rendered {
            warn!(timestamp, ?regions, %error, "render failed, regions kept for next frame");
            self.pending_regions.merge(regions);
            return Err(error);
        }
        Ok(regions)
    }

    /// Requests a full repaint on the next frame.
    pub fn invalidate_all(&mut self) {
        self.pending_regions = AffectedRegions::all();
    }

    #[must_use]
    pub fn fading_series(&self) -> Option<FadingSeries> {
        self.series_fade.index.get().map(|index| FadingSeries {
            index,
            alpha: self.series_fade.alpha.get(),
        })
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
