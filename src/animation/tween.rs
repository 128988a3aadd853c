use std::fmt;

use serde::{Deserialize, Serialize};

use super::{AffectedRegions, AnimationScheduler, TweenBinding};

/// One-shot callback run when a tween reaches its target.
///
/// Hooks receive the scheduler so they can start or redirect other tweens.
/// Anything they start is advanced on the next tick, never in the current pass.
pub type CompletionHook = Box<dyn FnOnce(&mut AnimationScheduler)>;

/// Opaque handle to a tween registered with one [`AnimationScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TweenId(pub(super) usize);

impl TweenId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TweenState {
    #[default]
    Idle,
    Running,
}

/// What `start` does when the tween is already running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RedirectPolicy {
    /// Only target, duration and hook change. Start value and start timestamp
    /// stay as captured, so the effective speed jumps on redirect.
    #[default]
    PreserveClock,
    /// Recapture start value and start timestamp, as if started from idle.
    Restart,
}

pub(super) enum TickOutcome {
    InFlight,
    Completed,
}

/// Linear time-based transition of one bound scalar.
pub struct Tween {
    binding: TweenBinding,
    regions: AffectedRegions,
    state: TweenState,
    start_value: f64,
    target_value: f64,
    duration_ms: f64,
    start_timestamp: f64,
    armed_generation: u64,
    on_complete: Option<CompletionHook>,
}

impl Tween {
    pub(super) fn new(regions: AffectedRegions, binding: TweenBinding) -> Self {
        Self {
            binding,
            regions,
            state: TweenState::Idle,
            start_value: 0.0,
            target_value: 0.0,
            duration_ms: 0.0,
            start_timestamp: 0.0,
            armed_generation: 0,
            on_complete: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> TweenState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == TweenState::Running
    }

    #[must_use]
    pub fn regions(&self) -> AffectedRegions {
        self.regions
    }

    #[must_use]
    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    #[must_use]
    pub fn target_value(&self) -> f64 {
        self.target_value
    }

    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    #[must_use]
    pub fn start_timestamp(&self) -> f64 {
        self.start_timestamp
    }

    /// Current value of the bound field.
    #[must_use]
    pub fn current_value(&self) -> f64 {
        self.binding.read()
    }

    pub(super) fn armed_generation(&self) -> u64 {
        self.armed_generation
    }

    pub(super) fn start(
        &mut self,
        now: f64,
        generation: u64,
        duration_ms: f64,
        target_value: f64,
        on_complete: Option<CompletionHook>,
        policy: RedirectPolicy,
    ) {
        self.duration_ms = duration_ms;
        self.target_value = target_value;
        if on_complete.is_some() {
            self.on_complete = on_complete;
        }

        if self.is_running() && policy == RedirectPolicy::PreserveClock {
            return;
        }

        self.start_value = self.binding.read();
        self.start_timestamp = now;
        if !self.is_running() {
            self.armed_generation = generation;
        }
        self.state = TweenState::Running;
    }

    pub(super) fn change_target(&mut self, target_value: f64) {
        self.target_value = target_value;
    }

    pub(super) fn set_duration(&mut self, duration_ms: f64) {
        self.duration_ms = duration_ms;
    }

    /// Forces idle. The field keeps its last written value and the pending
    /// hook is dropped without running.
    pub(super) fn cancel(&mut self) {
        self.state = TweenState::Idle;
        self.on_complete = None;
    }

    pub(super) fn take_hook(&mut self) -> Option<CompletionHook> {
        self.on_complete.take()
    }

    pub(super) fn advance(&mut self, now: f64) -> TickOutcome {
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return self.finish();
        }

        let elapsed = now - self.start_timestamp;
        let next = self.start_value
            + (self.target_value - self.start_value) * elapsed / self.duration_ms;

        if !next.is_finite() || self.has_reached_target(next) {
            return self.finish();
        }

        self.binding.write(next);
        TickOutcome::InFlight
    }

    fn has_reached_target(&self, next: f64) -> bool {
        if next == self.target_value {
            return true;
        }
        if self.start_value > self.target_value {
            return next <= self.target_value;
        }
        if self.start_value < self.target_value {
            return next >= self.target_value;
        }
        false
    }

    fn finish(&mut self) -> TickOutcome {
        self.binding.write(self.target_value);
        self.state = TweenState::Idle;
        TickOutcome::Completed
    }
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("state", &self.state)
            .field("regions", &self.regions)
            .field("start_value", &self.start_value)
            .field("target_value", &self.target_value)
            .field("duration_ms", &self.duration_ms)
            .field("start_timestamp", &self.start_timestamp)
            .field("has_hook", &self.on_complete.is_some())
            .finish()
    }
}
