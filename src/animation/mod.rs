//! Frame-driven scalar tweening.
//!
//! A tween linearly moves one bound scalar from the value it had when it
//! started to a target value over a duration measured against the timestamps
//! handed to [`AnimationScheduler::on_tick`]. Completion is detected by the
//! interpolated value crossing the target, so tweens converge exactly no
//! matter how irregular the frame intervals are.

mod region;
mod scheduler;
mod tween;
mod value;

pub use region::{AffectedRegion, AffectedRegions};
pub use scheduler::AnimationScheduler;
pub use tween::{CompletionHook, RedirectPolicy, Tween, TweenId, TweenState};
pub use value::{AnimatedValue, TweenBinding};
