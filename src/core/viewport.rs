use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Share of the data shown when a widget is first created.
pub const DEFAULT_VISIBLE_FRACTION: f64 = 0.25;
/// Smallest viewport width, as a share of all units.
pub const DEFAULT_MIN_WIDTH_FRACTION: f64 = 0.1;

/// Single-frame dirty bits consumed by the frame driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameFlags {
    pub viewport_changed: bool,
    pub widget_resized: bool,
}

/// Visible window over the data index axis plus the pixel width it maps onto.
///
/// Units are continuous sample positions: sample `i` occupies the slot
/// `[i, i + 1)` and is drawn at its center `i + 0.5`.
///
/// Edge setters only clamp into `[0, unit_count]`. The minimum-width rule is
/// enforced by the minimap drag operations that move the edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    left_edge_unit: f64,
    right_edge_unit: f64,
    unit_count: usize,
    width_px: f64,
    min_width_fraction: f64,
    flags: FrameFlags,
}

impl Viewport {
    /// Creates a viewport showing the rightmost `visible_fraction` of the data.
    pub fn new(
        unit_count: usize,
        width_px: f64,
        visible_fraction: f64,
        min_width_fraction: f64,
    ) -> ChartResult<Self> {
        if unit_count == 0 {
            return Err(ChartError::InvalidDataset(
                "viewport needs at least one sample".to_owned(),
            ));
        }
        validate_width(width_px)?;
        if !min_width_fraction.is_finite() || min_width_fraction <= 0.0 || min_width_fraction > 1.0
        {
            return Err(ChartError::InvalidData(
                "min viewport width fraction must be in (0, 1]".to_owned(),
            ));
        }
        if !visible_fraction.is_finite() || visible_fraction <= 0.0 || visible_fraction > 1.0 {
            return Err(ChartError::InvalidData(
                "initial visible fraction must be in (0, 1]".to_owned(),
            ));
        }

        let count = unit_count as f64;
        let visible_fraction = visible_fraction.max(min_width_fraction);
        Ok(Self {
            left_edge_unit: count - visible_fraction * count,
            right_edge_unit: count,
            unit_count,
            width_px,
            min_width_fraction,
            flags: FrameFlags::default(),
        })
    }

    #[must_use]
    pub fn left_edge_unit(&self) -> f64 {
        self.left_edge_unit
    }

    #[must_use]
    pub fn right_edge_unit(&self) -> f64 {
        self.right_edge_unit
    }

    #[must_use]
    pub fn width_in_units(&self) -> f64 {
        self.right_edge_unit - self.left_edge_unit
    }

    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.unit_count
    }

    #[must_use]
    pub fn width_px(&self) -> f64 {
        self.width_px
    }

    #[must_use]
    pub fn min_width_fraction(&self) -> f64 {
        self.min_width_fraction
    }

    #[must_use]
    pub fn min_width_units(&self) -> f64 {
        self.min_width_fraction * self.unit_count as f64
    }

    pub fn set_left_edge_unit(&mut self, unit: f64) {
        let unit = unit.clamp(0.0, self.unit_count as f64);
        if unit == self.left_edge_unit {
            return;
        }
        self.left_edge_unit = unit;
        self.flags.viewport_changed = true;
    }

    pub fn set_right_edge_unit(&mut self, unit: f64) {
        let unit = unit.clamp(0.0, self.unit_count as f64);
        if unit == self.right_edge_unit {
            return;
        }
        self.right_edge_unit = unit;
        self.flags.viewport_changed = true;
    }

    /// Moves both edges at once.
    pub fn set_edges(&mut self, left_unit: f64, right_unit: f64) {
        self.set_left_edge_unit(left_unit);
        self.set_right_edge_unit(right_unit);
    }

    pub fn set_width_px(&mut self, width_px: f64) -> ChartResult<()> {
        validate_width(width_px)?;
        if width_px != self.width_px {
            self.width_px = width_px;
            self.flags.widget_resized = true;
        }
        Ok(())
    }

    /// Flags a layout change that did not go through [`Self::set_width_px`],
    /// e.g. an axis height change.
    pub fn mark_resized(&mut self) {
        self.flags.widget_resized = true;
    }

    #[must_use]
    pub fn frame_flags(&self) -> FrameFlags {
        self.flags
    }

    /// Returns the flags raised since the last call and clears them.
    pub fn take_frame_flags(&mut self) -> FrameFlags {
        std::mem::take(&mut self.flags)
    }

    #[must_use]
    pub fn px_per_unit(&self) -> f64 {
        self.width_px / self.width_in_units()
    }

    #[must_use]
    pub fn unit_to_pixel(&self, unit: f64) -> f64 {
        (unit - self.left_edge_unit) / self.width_in_units() * self.width_px
    }

    #[must_use]
    pub fn pixel_to_unit(&self, pixel: f64) -> f64 {
        pixel * self.width_in_units() / self.width_px + self.left_edge_unit
    }

    /// Converts a minimap pixel delta into units (the minimap spans all units).
    #[must_use]
    pub fn pixel_delta_to_units(&self, delta_px: f64) -> f64 {
        delta_px * self.unit_count as f64 / self.width_px
    }

    /// First sample whose center is at or right of the left edge.
    #[must_use]
    pub fn leftmost_displayed_index(&self) -> usize {
        let index = (self.left_edge_unit - 0.5).ceil().max(0.0) as usize;
        index.min(self.last_index())
    }

    /// Last sample whose center is strictly left of the right edge.
    #[must_use]
    pub fn rightmost_displayed_index(&self) -> usize {
        let index = ((self.right_edge_unit - 0.5).ceil() - 1.0).max(0.0) as usize;
        index.min(self.last_index())
    }

    /// Sample slot under a chart-window pixel, if any.
    #[must_use]
    pub fn index_at_pixel(&self, pixel: f64) -> Option<usize> {
        if !pixel.is_finite() || pixel < 0.0 || pixel >= self.width_px {
            return None;
        }
        let unit = self.pixel_to_unit(pixel);
        if unit < 0.0 {
            return None;
        }
        let index = unit.floor() as usize;
        (index < self.unit_count).then_some(index)
    }

    fn last_index(&self) -> usize {
        self.unit_count - 1
    }
}

fn validate_width(width_px: f64) -> ChartResult<()> {
    if !width_px.is_finite() || width_px <= 0.0 {
        return Err(ChartError::InvalidData(
            "viewport width must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}
