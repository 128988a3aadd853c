use serde::{Deserialize, Serialize};

use super::Color;

/// Widget-wide palette handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub grid_line: Color,
    pub minimap_overlay: Color,
    pub minimap_frame: Color,
}

impl Theme {
    #[must_use]
    pub const fn day() -> Self {
        Self {
            background: Color::rgba8(255, 255, 255, 1.0),
            text: Color::rgba8(150, 162, 170, 1.0),
            grid_line: Color::rgba8(242, 244, 245, 1.0),
            minimap_overlay: Color::rgba8(232, 244, 249, 0.6),
            minimap_frame: Color::rgba8(208, 228, 242, 0.8),
        }
    }

    #[must_use]
    pub const fn night() -> Self {
        Self {
            background: Color::rgba8(36, 47, 62, 1.0),
            text: Color::rgba8(84, 103, 120, 1.0),
            grid_line: Color::rgba8(41, 53, 68, 1.0),
            minimap_overlay: Color::rgba8(0, 0, 0, 0.6),
            minimap_frame: Color::rgba8(108, 128, 142, 0.8),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::day()
    }
}
