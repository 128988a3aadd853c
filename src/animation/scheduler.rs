//! Tween scheduler driven by an external per-frame timestamp.

use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::error::{ChartError, ChartResult};

use super::tween::TickOutcome;
use super::{AffectedRegions, RedirectPolicy, Tween, TweenBinding, TweenId};

/// Owns every tween of one widget and advances the running ones on each tick.
///
/// Tweens are never removed, only deactivated, so a [`TweenId`] stays valid
/// for the scheduler's whole lifetime.
#[derive(Debug, Default)]
pub struct AnimationScheduler {
    tweens: Vec<Tween>,
    last_frame_timestamp: f64,
    tick_generation: u64,
    redirect_policy: RedirectPolicy,
}

impl AnimationScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_redirect_policy(redirect_policy: RedirectPolicy) -> Self {
        Self {
            redirect_policy,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn redirect_policy(&self) -> RedirectPolicy {
        self.redirect_policy
    }

    pub fn set_redirect_policy(&mut self, policy: RedirectPolicy) {
        self.redirect_policy = policy;
    }

    #[must_use]
    pub fn last_frame_timestamp(&self) -> f64 {
        self.last_frame_timestamp
    }

    #[must_use]
    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }

    /// Registers an idle tween permanently bound to one scalar.
    pub fn create_tween(&mut self, regions: AffectedRegions, binding: TweenBinding) -> TweenId {
        let id = TweenId(self.tweens.len());
        self.tweens.push(Tween::new(regions, binding));
        id
    }

    #[must_use]
    pub fn tween(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(id.0)
    }

    /// Starts the tween, or redirects it when it is already running
    /// (see [`RedirectPolicy`]).
    pub fn start(&mut self, id: TweenId, duration_ms: f64, target_value: f64) -> ChartResult<()> {
        self.start_inner(id, duration_ms, target_value, None)
    }

    /// Like [`Self::start`], replacing the pending completion hook.
    pub fn start_with_hook(
        &mut self,
        id: TweenId,
        duration_ms: f64,
        target_value: f64,
        hook: impl FnOnce(&mut AnimationScheduler) + 'static,
    ) -> ChartResult<()> {
        self.start_inner(id, duration_ms, target_value, Some(Box::new(hook)))
    }

    pub fn change_target(&mut self, id: TweenId, target_value: f64) -> ChartResult<()> {
        if !target_value.is_finite() {
            return Err(ChartError::InvalidData(
                "tween target must be finite".to_owned(),
            ));
        }
        self.tween_mut(id)?.change_target(target_value);
        Ok(())
    }

    /// Retunes the duration of a tween without touching its clock.
    pub fn set_duration(&mut self, id: TweenId, duration_ms: f64) -> ChartResult<()> {
        if duration_ms.is_nan() {
            return Err(ChartError::InvalidData(
                "tween duration must not be NaN".to_owned(),
            ));
        }
        self.tween_mut(id)?.set_duration(duration_ms);
        Ok(())
    }

    pub fn cancel(&mut self, id: TweenId) -> ChartResult<()> {
        self.tween_mut(id)?.cancel();
        Ok(())
    }

    #[must_use]
    pub fn is_running(&self, id: TweenId) -> bool {
        self.tweens.get(id.0).is_some_and(Tween::is_running)
    }

    #[must_use]
    pub fn has_running_tweens(&self) -> bool {
        self.tweens.iter().any(Tween::is_running)
    }

    /// Unions the regions of every running tween into `regions`.
    pub fn collect_affected_regions(&self, regions: &mut AffectedRegions) {
        for tween in self.tweens.iter().filter(|tween| tween.is_running()) {
            regions.merge(tween.regions());
        }
    }

    /// Records the frame timestamp and advances every tween that was running
    /// when the pass began, in registration order.
    pub fn on_tick(&mut self, timestamp: f64) {
        if !timestamp.is_finite() {
            warn!(timestamp, "ignoring non-finite frame timestamp");
            return;
        }
        if timestamp < self.last_frame_timestamp {
            warn!(
                timestamp,
                last = self.last_frame_timestamp,
                "frame timestamp went backwards; holding previous timestamp"
            );
        } else {
            self.last_frame_timestamp = timestamp;
        }
        self.tick_generation += 1;

        let generation = self.tick_generation;
        let running: SmallVec<[usize; 8]> = self
            .tweens
            .iter()
            .enumerate()
            .filter(|(_, tween)| tween.is_running())
            .map(|(index, _)| index)
            .collect();

        for index in running {
            let now = self.last_frame_timestamp;
            let tween = &mut self.tweens[index];
            // Cancelled or re-armed by a hook earlier in this pass.
            if !tween.is_running() || tween.armed_generation() == generation {
                continue;
            }

            if let TickOutcome::Completed = tween.advance(now) {
                trace!(tween = index, target = tween.target_value(), "tween completed");
                if let Some(hook) = tween.take_hook() {
                    hook(self);
                }
            }
        }
    }

    fn start_inner(
        &mut self,
        id: TweenId,
        duration_ms: f64,
        target_value: f64,
        hook: Option<super::CompletionHook>,
    ) -> ChartResult<()> {
        if !target_value.is_finite() {
            return Err(ChartError::InvalidData(
                "tween target must be finite".to_owned(),
            ));
        }
        if duration_ms.is_nan() {
            return Err(ChartError::InvalidData(
                "tween duration must not be NaN".to_owned(),
            ));
        }

        let now = self.last_frame_timestamp;
        let generation = self.tick_generation;
        let policy = self.redirect_policy;
        let tween = self.tween_mut(id)?;
        let redirect = tween.is_running();
        tween.start(now, generation, duration_ms, target_value, hook, policy);
        trace!(
            tween = id.0,
            duration_ms,
            target_value,
            redirect,
            "tween started"
        );
        Ok(())
    }

    fn tween_mut(&mut self, id: TweenId) -> ChartResult<&mut Tween> {
        self.tweens
            .get_mut(id.0)
            .ok_or(ChartError::UnknownTween(id.0))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::AnimationScheduler;
    use crate::animation::{AffectedRegion, AffectedRegions, AnimatedValue, RedirectPolicy};

    fn chart_regions() -> AffectedRegions {
        AffectedRegions::from_region(AffectedRegion::ChartWindow)
    }

    #[test]
    fn tween_interpolates_linearly_and_snaps_to_target() {
        let value = AnimatedValue::new(0.0);
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.create_tween(chart_regions(), value.binding());

        scheduler.start(id, 100.0, 10.0).expect("start");
        scheduler.on_tick(25.0);
        assert!((value.get() - 2.5).abs() <= 1e-12);

        scheduler.on_tick(250.0);
        assert_eq!(value.get(), 10.0);
        assert!(!scheduler.is_running(id));
    }

    #[test]
    fn decreasing_tween_never_overshoots() {
        let value = AnimatedValue::new(10.0);
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.create_tween(chart_regions(), value.binding());

        scheduler.start(id, 100.0, 4.0).expect("start");
        scheduler.on_tick(90.0);
        assert!(value.get() > 4.0);
        scheduler.on_tick(180.0);
        assert_eq!(value.get(), 4.0);
    }

    #[test]
    fn redirect_keeps_clock_under_default_policy() {
        let value = AnimatedValue::new(0.0);
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.create_tween(chart_regions(), value.binding());

        scheduler.start(id, 100.0, 10.0).expect("start");
        scheduler.on_tick(50.0);
        scheduler.start(id, 100.0, 20.0).expect("redirect");

        let tween = scheduler.tween(id).expect("tween");
        assert_eq!(tween.start_value(), 0.0);
        assert_eq!(tween.start_timestamp(), 0.0);
        assert_eq!(tween.target_value(), 20.0);
    }

    #[test]
    fn restart_policy_recaptures_start_on_redirect() {
        let value = AnimatedValue::new(0.0);
        let mut scheduler = AnimationScheduler::with_redirect_policy(RedirectPolicy::Restart);
        let id = scheduler.create_tween(chart_regions(), value.binding());

        scheduler.start(id, 100.0, 10.0).expect("start");
        scheduler.on_tick(50.0);
        scheduler.start(id, 100.0, 20.0).expect("redirect");

        let tween = scheduler.tween(id).expect("tween");
        assert_eq!(tween.start_value(), 5.0);
        assert_eq!(tween.start_timestamp(), 50.0);
    }

    #[test]
    fn zero_duration_snaps_on_next_tick() {
        let value = AnimatedValue::new(3.0);
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.create_tween(chart_regions(), value.binding());

        scheduler.start(id, 0.0, 3.0).expect("start");
        scheduler.on_tick(16.0);
        assert_eq!(value.get(), 3.0);
        assert!(!scheduler.is_running(id));
    }

    #[test]
    fn hook_runs_once_on_completion() {
        let value = AnimatedValue::new(0.0);
        let calls = Rc::new(Cell::new(0));
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.create_tween(chart_regions(), value.binding());

        let counter = Rc::clone(&calls);
        scheduler
            .start_with_hook(id, 10.0, 1.0, move |_| counter.set(counter.get() + 1))
            .expect("start");
        scheduler.on_tick(20.0);
        scheduler.on_tick(40.0);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn regions_are_collected_only_for_running_tweens() {
        let a = AnimatedValue::new(0.0);
        let b = AnimatedValue::new(0.0);
        let mut scheduler = AnimationScheduler::new();
        let first = scheduler.create_tween(chart_regions(), a.binding());
        let _second = scheduler.create_tween(
            AffectedRegions::from_region(AffectedRegion::Minimap),
            b.binding(),
        );

        scheduler.start(first, 100.0, 1.0).expect("start");
        let mut regions = AffectedRegions::none();
        scheduler.collect_affected_regions(&mut regions);
        assert!(regions.contains(AffectedRegion::ChartWindow));
        assert!(!regions.contains(AffectedRegion::Minimap));
    }

    #[test]
    fn backwards_timestamp_is_held() {
        let mut scheduler = AnimationScheduler::new();
        scheduler.on_tick(100.0);
        scheduler.on_tick(50.0);
        assert_eq!(scheduler.last_frame_timestamp(), 100.0);
    }
}
