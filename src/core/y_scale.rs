use serde::{Deserialize, Serialize};

/// Minimum pixel distance between two horizontal grid lines.
pub const DEFAULT_MIN_GRID_STEP_PX: f64 = 70.0;

const STEP_DIVISORS: [f64; 2] = [2.0, 5.0];

/// Picks the value distance between horizontal grid lines.
///
/// Starts from the value covered by `min_step_px` and rounds up to the
/// nearest integer divisible by 2 or 5. Returns `0` when there is nothing to
/// scale (non-positive max, empty axis or non-finite input).
#[must_use]
pub fn select_y_scale_step(height_px: f64, max_value: f64, min_step_px: f64) -> f64 {
    if !height_px.is_finite()
        || !max_value.is_finite()
        || !min_step_px.is_finite()
        || height_px <= 0.0
        || max_value <= 0.0
        || min_step_px <= 0.0
    {
        return 0.0;
    }

    let mut step = (max_value / height_px * min_step_px).ceil();
    while !STEP_DIVISORS.iter().any(|divisor| step % divisor == 0.0) {
        step += 1.0;
    }
    step
}

/// Horizontal grid values for one max-Y value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YScaleGrid {
    step: f64,
    divides: Vec<f64>,
}

impl YScaleGrid {
    /// Builds `[0, step, 2*step, ...]` up to and including `max_value`.
    #[must_use]
    pub fn generate(max_value: f64, height_px: f64, min_step_px: f64) -> Self {
        let step = select_y_scale_step(height_px, max_value, min_step_px);
        if step <= 0.0 {
            return Self::baseline();
        }

        let mut count = (max_value / step).floor() as usize;
        if count as f64 * step > max_value {
            count -= 1;
        }
        let divides = (0..=count).map(|index| index as f64 * step).collect();
        Self { step, divides }
    }

    /// Grid with the zero line only.
    #[must_use]
    pub fn baseline() -> Self {
        Self {
            step: 0.0,
            divides: vec![0.0],
        }
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn divides(&self) -> &[f64] {
        &self.divides
    }

    #[must_use]
    pub fn into_divides(self) -> Vec<f64> {
        self.divides
    }
}

/// Formats a grid value: `1.5 M`, `12.0 K`, or the plain number.
#[must_use]
pub fn format_y_scale_value(value: f64) -> String {
    if value / 1_000_000.0 >= 1.0 {
        format!("{:.1} M", value / 1_000_000.0)
    } else if value / 1_000.0 >= 1.0 {
        format!("{:.1} K", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
