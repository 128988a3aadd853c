use serde::{Deserialize, Serialize};

/// Width of each viewport-frame grip on the minimap, in logical pixels.
pub const DEFAULT_GRIP_WIDTH_PX: f64 = 15.0;

/// Part of the minimap under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinimapPointerTarget {
    LeftGrip,
    RightGrip,
    Frame,
    Outside,
}

/// Classifies a minimap x coordinate against the frame edges.
///
/// Grips sit inside the frame: `[left, left + grip]` and
/// `[right - grip, right]`. The left grip wins where they overlap.
#[must_use]
pub fn hit_test(
    local_x: f64,
    frame_left_px: f64,
    frame_right_px: f64,
    grip_px: f64,
) -> MinimapPointerTarget {
    let right_grip_start = frame_right_px - grip_px;
    if (frame_left_px..=frame_left_px + grip_px).contains(&local_x) {
        MinimapPointerTarget::LeftGrip
    } else if (right_grip_start..=frame_right_px).contains(&local_x) {
        MinimapPointerTarget::RightGrip
    } else if local_x > frame_left_px && local_x < right_grip_start {
        MinimapPointerTarget::Frame
    } else {
        MinimapPointerTarget::Outside
    }
}

/// One pointer-move step of an active drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimapDragStep {
    pub target: MinimapPointerTarget,
    pub delta_px: f64,
}

/// Pointer drag in progress on the minimap.
///
/// Deltas are reported relative to the previous pointer position, positive
/// to the right.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MinimapDrag {
    active: Option<MinimapPointerTarget>,
    last_x: f64,
}

impl MinimapDrag {
    #[must_use]
    pub fn target(&self) -> Option<MinimapPointerTarget> {
        self.active
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Starts dragging unless the pointer landed outside the frame.
    pub fn begin(&mut self, target: MinimapPointerTarget, local_x: f64) -> bool {
        if target == MinimapPointerTarget::Outside || !local_x.is_finite() {
            self.active = None;
            return false;
        }
        self.active = Some(target);
        self.last_x = local_x;
        true
    }

    pub fn drag_to(&mut self, local_x: f64) -> Option<MinimapDragStep> {
        let target = self.active?;
        if !local_x.is_finite() {
            return None;
        }
        let delta_px = local_x - self.last_x;
        self.last_x = local_x;
        Some(MinimapDragStep { target, delta_px })
    }

    pub fn end(&mut self) {
        self.active = None;
    }
}
