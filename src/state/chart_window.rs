use std::cell::Cell;
use std::mem;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::animation::{
    AffectedRegion, AffectedRegions, AnimatedValue, AnimationScheduler, TweenId,
};
use crate::core::time_labels::{is_fading_anchor, label_anchor_indices};
use crate::core::{
    ChartSeries, TimeLabel, Viewport, YScaleGrid, format_time_label, initial_label_step,
    max_value_in_range,
};
use crate::error::ChartResult;

use super::label_density::{
    LabelDensityAction, LabelDensityPhase, decide_label_density, fade_in_duration,
    fade_out_duration,
};

/// Physical-pixel layout and timings for the main chart area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartWindowSettings {
    pub height_px: f64,
    pub top_margin_px: f64,
    pub bottom_margin_px: f64,
    pub min_grid_step_px: f64,
    pub desired_label_spacing_px: f64,
    pub y_scale_duration_ms: f64,
    pub grid_crossfade_duration_ms: f64,
    pub label_fade_duration_ms: f64,
}

/// Animated axis state of the main chart area: the vertical scale, the
/// horizontal grid crossfade and the time-label density.
#[derive(Debug)]
pub struct ChartWindowAxisState {
    settings: ChartWindowSettings,
    animated_max_y: AnimatedValue,
    last_max_y: f64,
    previous_divides: Vec<f64>,
    current_divides: Vec<f64>,
    grid_alpha: AnimatedValue,
    label_alpha: AnimatedValue,
    label_step: Rc<Cell<u32>>,
    phase: Rc<Cell<LabelDensityPhase>>,
    last_px_per_unit: f64,
    y_scale_tween: TweenId,
    grid_alpha_tween: TweenId,
    label_alpha_tween: TweenId,
}

impl ChartWindowAxisState {
    /// Registers the axis tweens and derives the initial label step from the
    /// viewport zoom.
    pub fn new(
        scheduler: &mut AnimationScheduler,
        settings: ChartWindowSettings,
        viewport: &Viewport,
    ) -> Self {
        let animated_max_y = AnimatedValue::new(0.0);
        let grid_alpha = AnimatedValue::new(1.0);
        let label_alpha = AnimatedValue::new(1.0);

        // The grid moves with the scale, so the Y tween repaints both.
        let y_scale_tween = scheduler.create_tween(
            AffectedRegions::from_region(AffectedRegion::ChartWindow).with(AffectedRegion::YScale),
            animated_max_y.binding(),
        );
        let grid_alpha_tween = scheduler.create_tween(
            AffectedRegions::from_region(AffectedRegion::YScale),
            grid_alpha.binding(),
        );
        let label_alpha_tween = scheduler.create_tween(
            AffectedRegions::from_region(AffectedRegion::XScale),
            label_alpha.binding(),
        );

        let px_per_unit = viewport.px_per_unit();
        let step = initial_label_step(px_per_unit, settings.desired_label_spacing_px);
        debug!(label_step = step, px_per_unit, "chart window axis initialised");

        Self {
            settings,
            animated_max_y,
            last_max_y: 0.0,
            previous_divides: Vec::new(),
            current_divides: YScaleGrid::baseline().into_divides(),
            grid_alpha,
            label_alpha,
            label_step: Rc::new(Cell::new(step)),
            phase: Rc::new(Cell::new(LabelDensityPhase::Stable)),
            last_px_per_unit: px_per_unit,
            y_scale_tween,
            grid_alpha_tween,
            label_alpha_tween,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &ChartWindowSettings {
        &self.settings
    }

    #[must_use]
    pub fn height_px(&self) -> f64 {
        self.settings.height_px
    }

    #[must_use]
    pub fn animated_max_y(&self) -> f64 {
        self.animated_max_y.get()
    }

    #[must_use]
    pub fn last_max_y(&self) -> f64 {
        self.last_max_y
    }

    #[must_use]
    pub fn current_grid_divides(&self) -> &[f64] {
        &self.current_divides
    }

    #[must_use]
    pub fn previous_grid_divides(&self) -> &[f64] {
        &self.previous_divides
    }

    /// Opacity of the current grid. The previous grid is drawn at `1 - alpha`.
    #[must_use]
    pub fn grid_alpha(&self) -> f64 {
        self.grid_alpha.get()
    }

    #[must_use]
    pub fn previous_grid_alpha(&self) -> f64 {
        1.0 - self.grid_alpha.get()
    }

    #[must_use]
    pub fn label_alpha(&self) -> f64 {
        self.label_alpha.get()
    }

    #[must_use]
    pub fn label_step_units(&self) -> u32 {
        self.label_step.get()
    }

    #[must_use]
    pub fn label_density_phase(&self) -> LabelDensityPhase {
        self.phase.get()
    }

    #[must_use]
    pub fn is_adding_labels(&self) -> bool {
        self.phase.get() == LabelDensityPhase::Adding
    }

    #[must_use]
    pub fn is_removing_labels(&self) -> bool {
        self.phase.get() == LabelDensityPhase::Removing
    }

    #[must_use]
    pub fn y_scale_tween(&self) -> TweenId {
        self.y_scale_tween
    }

    #[must_use]
    pub fn label_alpha_tween(&self) -> TweenId {
        self.label_alpha_tween
    }

    /// Index range scanned for the max: one sample beyond each displayed edge
    /// so lines leaving the window are scaled too.
    #[must_use]
    pub fn scan_range(viewport: &Viewport) -> (usize, usize) {
        let leftmost = viewport.leftmost_displayed_index();
        let rightmost = viewport.rightmost_displayed_index();
        let start = leftmost.saturating_sub(1);
        let end = (rightmost + 1).min(viewport.unit_count() - 1);
        (start, end)
    }

    /// Recomputes the max over the visible window and, when it changed,
    /// retargets the Y tween and starts a grid crossfade.
    ///
    /// Returns whether the max changed.
    pub fn update_max_y(
        &mut self,
        viewport: &Viewport,
        series: &[ChartSeries],
        scheduler: &mut AnimationScheduler,
        disable_animation: bool,
    ) -> ChartResult<bool> {
        let (start, end) = Self::scan_range(viewport);
        let max_y = max_value_in_range(series, start, end);
        if max_y == self.last_max_y {
            return Ok(false);
        }

        debug!(
            from = self.last_max_y,
            to = max_y,
            animated = !disable_animation,
            "chart window max changed"
        );
        self.last_max_y = max_y;

        let grid = YScaleGrid::generate(max_y, self.settings.height_px, self.settings.min_grid_step_px);
        self.previous_divides = mem::replace(&mut self.current_divides, grid.into_divides());

        if disable_animation {
            scheduler.cancel(self.y_scale_tween)?;
            scheduler.cancel(self.grid_alpha_tween)?;
            self.animated_max_y.set(max_y);
            self.grid_alpha.set(1.0);
        } else {
            scheduler.start(self.y_scale_tween, self.settings.y_scale_duration_ms, max_y)?;
            self.grid_alpha.set(0.0);
            scheduler.start(
                self.grid_alpha_tween,
                self.settings.grid_crossfade_duration_ms,
                1.0,
            )?;
        }
        Ok(true)
    }

    /// Applies a new chart height. The current grid is regenerated for the
    /// new height without a crossfade.
    pub fn set_height_px(&mut self, height_px: f64) -> bool {
        if height_px == self.settings.height_px {
            return false;
        }
        self.settings.height_px = height_px;
        self.current_divides =
            YScaleGrid::generate(self.last_max_y, height_px, self.settings.min_grid_step_px)
                .into_divides();
        true
    }

    /// Runs the label-density state machine after the zoom may have changed.
    pub fn viewport_updated(
        &mut self,
        viewport: &Viewport,
        scheduler: &mut AnimationScheduler,
    ) -> ChartResult<()> {
        let px_per_unit = viewport.px_per_unit();
        if px_per_unit == self.last_px_per_unit {
            return Ok(());
        }
        self.last_px_per_unit = px_per_unit;

        let step = self.label_step.get();
        let spacing_px = px_per_unit * f64::from(step);
        let desired_px = self.settings.desired_label_spacing_px;
        let full_ms = self.settings.label_fade_duration_ms;

        match decide_label_density(self.phase.get(), step, spacing_px, desired_px) {
            LabelDensityAction::Hold => {}
            LabelDensityAction::RetuneFadeOut => {
                let duration = fade_out_duration(spacing_px, desired_px, full_ms);
                scheduler.set_duration(self.label_alpha_tween, duration)?;
            }
            LabelDensityAction::RetuneFadeIn => {
                let duration = fade_in_duration(spacing_px, desired_px, full_ms);
                scheduler.set_duration(self.label_alpha_tween, duration)?;
            }
            LabelDensityAction::StartRemoving => {
                debug!(step, spacing_px, "fading out every other time label");
                self.phase.set(LabelDensityPhase::Removing);
                self.label_alpha.set(1.0);
                let phase = Rc::clone(&self.phase);
                let label_step = Rc::clone(&self.label_step);
                scheduler.start_with_hook(self.label_alpha_tween, full_ms, 0.0, move |_| {
                    if phase.get() == LabelDensityPhase::Removing {
                        label_step.set(label_step.get().saturating_mul(2));
                    }
                    phase.set(LabelDensityPhase::Stable);
                })?;
            }
            LabelDensityAction::StartAdding => {
                debug!(step, spacing_px, "fading in intermediate time labels");
                self.phase.set(LabelDensityPhase::Adding);
                self.label_step.set(step / 2);
                self.label_alpha.set(0.0);
                let phase = Rc::clone(&self.phase);
                scheduler.start_with_hook(self.label_alpha_tween, full_ms, 1.0, move |_| {
                    phase.set(LabelDensityPhase::Stable);
                })?;
            }
        }
        Ok(())
    }

    /// Time labels inside the viewport with their current opacity.
    #[must_use]
    pub fn visible_time_labels(&self, viewport: &Viewport, x_values: &[f64]) -> Vec<TimeLabel> {
        let step = self.label_step.get();
        let in_flight = self.phase.get() != LabelDensityPhase::Stable;
        let alpha = self.label_alpha.get();

        label_anchor_indices(
            viewport.leftmost_displayed_index(),
            viewport.rightmost_displayed_index(),
            step,
        )
        .map(|index| {
            let fading = in_flight && is_fading_anchor(index, step);
            TimeLabel {
                index,
                x_px: viewport.unit_to_pixel(index as f64 + 0.5),
                alpha: if fading { alpha } else { 1.0 },
                fading,
                text: x_values.get(index).copied().and_then(format_time_label),
            }
        })
        .collect()
    }

    /// Vertical pixel of a value under the animated scale.
    #[must_use]
    pub fn value_to_pixel(&self, value: f64) -> f64 {
        let top = self.settings.top_margin_px;
        let plot_height = self.settings.height_px - top - self.settings.bottom_margin_px;
        let max_y = self.animated_max_y.get();
        if max_y <= 0.0 {
            return top + plot_height;
        }
        (1.0 - value / max_y) * plot_height + top
    }
}
