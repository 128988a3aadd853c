use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use crate::animation::{AffectedRegion, AffectedRegions, AnimatedValue, AnimationScheduler};
use crate::core::{ChartDataset, Viewport};
use crate::error::ChartResult;
use crate::interaction::MinimapDrag;
use crate::render::{Renderer, Theme};
use crate::state::{ChartWindowAxisState, MinimapViewportState};

use super::widget::SeriesFade;
use super::{ChartWidget, ChartWidgetConfig};

impl<R: Renderer> ChartWidget<R> {
    /// Creates a widget showing the rightmost part of `dataset` with every
    /// series visible and both scales already at their targets.
    pub fn new(
        renderer: R,
        dataset: ChartDataset,
        config: ChartWidgetConfig,
    ) -> ChartResult<Self> {
        Self::with_theme(renderer, dataset, config, Theme::default())
    }

    pub fn with_theme(
        renderer: R,
        dataset: ChartDataset,
        config: ChartWidgetConfig,
        theme: Theme,
    ) -> ChartResult<Self> {
        config.validate()?;

        let (x_values, series) = dataset.into_parts();
        let mut viewport = Viewport::new(
            x_values.len(),
            config.width_px,
            config.initial_visible_fraction,
            config.min_viewport_fraction,
        )?;
        let mut scheduler = AnimationScheduler::with_redirect_policy(config.redirect_policy);

        let mut chart_window =
            ChartWindowAxisState::new(&mut scheduler, config.chart_window_settings(), &viewport);
        let mut minimap = MinimapViewportState::new(&mut scheduler, config.minimap_settings());
        chart_window.update_max_y(&viewport, &series, &mut scheduler, true)?;
        minimap.update_max_y(&viewport, &series, &mut scheduler, true)?;

        let fade_alpha = AnimatedValue::new(1.0);
        let fade_tween = scheduler.create_tween(
            AffectedRegions::from_region(AffectedRegion::ChartWindow).with(AffectedRegion::Minimap),
            fade_alpha.binding(),
        );

        // First frame paints everything.
        viewport.mark_resized();

        debug!(
            samples = x_values.len(),
            series = series.len(),
            label_step = chart_window.label_step_units(),
            "chart widget created"
        );

        Ok(Self {
            renderer,
            config,
            theme,
            scheduler,
            viewport,
            x_values,
            series,
            chart_window,
            minimap,
            series_fade: SeriesFade {
                alpha: fade_alpha,
                index: Rc::new(Cell::new(None)),
                tween: fade_tween,
            },
            drag: MinimapDrag::default(),
            pending_regions: AffectedRegions::none(),
        })
    }

    /// Parses the column JSON format and creates a widget from it.
    pub fn from_json_str(
        renderer: R,
        input: &str,
        config: ChartWidgetConfig,
    ) -> ChartResult<Self> {
        Self::new(renderer, ChartDataset::from_json_str(input)?, config)
    }
}
