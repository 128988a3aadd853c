//! Hysteresis for the time-label step.
//!
//! The step doubles (odd labels fade out) once labels get closer than the
//! desired spacing, and halves (new odd labels fade in) once the halved step
//! would still keep them at least that far apart. The gap between the two
//! thresholds keeps a steady zoom from flipping back and forth.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelDensityPhase {
    #[default]
    Stable,
    /// Step already halved, new labels fading in.
    Adding,
    /// Odd labels fading out, step doubles on completion.
    Removing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelDensityAction {
    Hold,
    RetuneFadeOut,
    RetuneFadeIn,
    StartRemoving,
    StartAdding,
}

#[must_use]
pub fn decide_label_density(
    phase: LabelDensityPhase,
    step_units: u32,
    spacing_px: f64,
    desired_px: f64,
) -> LabelDensityAction {
    match phase {
        LabelDensityPhase::Removing if spacing_px < desired_px => LabelDensityAction::RetuneFadeOut,
        LabelDensityPhase::Adding if spacing_px > desired_px => LabelDensityAction::RetuneFadeIn,
        LabelDensityPhase::Stable if spacing_px < desired_px => LabelDensityAction::StartRemoving,
        LabelDensityPhase::Stable if step_units > 1 && spacing_px / 2.0 >= desired_px => {
            LabelDensityAction::StartAdding
        }
        _ => LabelDensityAction::Hold,
    }
}

/// Remaining fade-out time: the further labels squeeze below the desired
/// spacing, the faster they go.
#[must_use]
pub fn fade_out_duration(spacing_px: f64, desired_px: f64, full_duration_ms: f64) -> f64 {
    let coefficient = (desired_px - spacing_px) / desired_px * 2.0;
    ((1.0 - coefficient) * full_duration_ms).clamp(0.0, full_duration_ms)
}

/// Remaining fade-in time: labels that spread out quickly appear quickly.
#[must_use]
pub fn fade_in_duration(spacing_px: f64, desired_px: f64, full_duration_ms: f64) -> f64 {
    let coefficient = (2.0 * desired_px - spacing_px) / (2.0 * desired_px) * 2.0;
    (coefficient * full_duration_ms).clamp(0.0, full_duration_ms)
}
