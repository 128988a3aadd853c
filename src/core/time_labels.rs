use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimum pixel spacing between two time labels.
pub const DEFAULT_LABEL_SPACING_PX: f64 = 60.0;

/// Time label placed on the X axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeLabel {
    pub index: usize,
    pub x_px: f64,
    pub alpha: f64,
    pub fading: bool,
    pub text: Option<String>,
}

/// Label step in sample units: the smallest power of two that keeps labels at
/// least `desired_spacing_px` apart at the given zoom.
#[must_use]
pub fn initial_label_step(px_per_unit: f64, desired_spacing_px: f64) -> u32 {
    if !px_per_unit.is_finite()
        || px_per_unit <= 0.0
        || !desired_spacing_px.is_finite()
        || desired_spacing_px <= 0.0
    {
        return 1;
    }
    let raw = (desired_spacing_px / px_per_unit).ceil();
    let raw = if raw >= f64::from(1_u32 << 31) {
        1_u32 << 31
    } else {
        (raw as u32).max(1)
    };
    raw.next_power_of_two()
}

/// Sample indices that carry a label: multiples of `step` from the first one
/// at or after `leftmost`, strictly before `rightmost`.
pub fn label_anchor_indices(
    leftmost: usize,
    rightmost: usize,
    step: u32,
) -> impl Iterator<Item = usize> {
    let step = step.max(1) as usize;
    let first = leftmost.div_ceil(step) * step;
    (first..rightmost).step_by(step)
}

/// Labels at odd multiples of the step are the ones that fade when the step
/// doubles or halves.
#[must_use]
pub fn is_fading_anchor(index: usize, step: u32) -> bool {
    (index / step.max(1) as usize) % 2 == 1
}

/// Formats a millisecond UTC timestamp as `Mar 5`.
#[must_use]
pub fn format_time_label(timestamp_ms: f64) -> Option<String> {
    if !timestamp_ms.is_finite() {
        return None;
    }
    let millis = timestamp_ms.round();
    if millis > i64::MAX as f64 || millis < i64::MIN as f64 {
        return None;
    }
    let dt = DateTime::<Utc>::from_timestamp_millis(millis as i64)?;
    Some(dt.format("%b %-d").to_string())
}
