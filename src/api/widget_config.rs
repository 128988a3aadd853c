use serde::{Deserialize, Serialize};

use crate::animation::RedirectPolicy;
use crate::core::time_labels::DEFAULT_LABEL_SPACING_PX;
use crate::core::viewport::{DEFAULT_MIN_WIDTH_FRACTION, DEFAULT_VISIBLE_FRACTION};
use crate::core::y_scale::DEFAULT_MIN_GRID_STEP_PX;
use crate::error::{ChartError, ChartResult};
use crate::interaction::DEFAULT_GRIP_WIDTH_PX;
use crate::state::{ChartWindowSettings, MinimapSettings};

use super::validation::{validate_fraction, validate_non_negative, validate_widget_size};

/// Public widget bootstrap configuration.
///
/// Sizes are physical pixels. Spacings and margins are logical pixels and get
/// scaled by `device_pixel_ratio`. Serializable so hosts can persist setup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartWidgetConfig {
    pub width_px: f64,
    pub chart_height_px: f64,
    pub minimap_height_px: f64,
    #[serde(default = "default_device_pixel_ratio")]
    pub device_pixel_ratio: f64,
    #[serde(default = "default_initial_visible_fraction")]
    pub initial_visible_fraction: f64,
    #[serde(default = "default_min_viewport_fraction")]
    pub min_viewport_fraction: f64,
    #[serde(default = "default_y_scale_duration_ms")]
    pub y_scale_duration_ms: f64,
    #[serde(default = "default_grid_crossfade_duration_ms")]
    pub grid_crossfade_duration_ms: f64,
    #[serde(default = "default_label_fade_duration_ms")]
    pub label_fade_duration_ms: f64,
    #[serde(default = "default_series_fade_duration_ms")]
    pub series_fade_duration_ms: f64,
    #[serde(default = "default_label_spacing_px")]
    pub label_spacing_px: f64,
    #[serde(default = "default_min_grid_step_px")]
    pub min_grid_step_px: f64,
    #[serde(default = "default_chart_top_margin_px")]
    pub chart_top_margin_px: f64,
    #[serde(default = "default_chart_bottom_margin_px")]
    pub chart_bottom_margin_px: f64,
    #[serde(default = "default_minimap_top_margin_px")]
    pub minimap_top_margin_px: f64,
    #[serde(default = "default_grip_width_px")]
    pub grip_width_px: f64,
    #[serde(default)]
    pub redirect_policy: RedirectPolicy,
}

impl ChartWidgetConfig {
    #[must_use]
    pub fn new(width_px: f64, chart_height_px: f64, minimap_height_px: f64) -> Self {
        Self {
            width_px,
            chart_height_px,
            minimap_height_px,
            device_pixel_ratio: default_device_pixel_ratio(),
            initial_visible_fraction: default_initial_visible_fraction(),
            min_viewport_fraction: default_min_viewport_fraction(),
            y_scale_duration_ms: default_y_scale_duration_ms(),
            grid_crossfade_duration_ms: default_grid_crossfade_duration_ms(),
            label_fade_duration_ms: default_label_fade_duration_ms(),
            series_fade_duration_ms: default_series_fade_duration_ms(),
            label_spacing_px: default_label_spacing_px(),
            min_grid_step_px: default_min_grid_step_px(),
            chart_top_margin_px: default_chart_top_margin_px(),
            chart_bottom_margin_px: default_chart_bottom_margin_px(),
            minimap_top_margin_px: default_minimap_top_margin_px(),
            grip_width_px: default_grip_width_px(),
            redirect_policy: RedirectPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    /// Sets the visible share on startup and the smallest allowed share.
    #[must_use]
    pub fn with_viewport_fractions(mut self, initial: f64, minimum: f64) -> Self {
        self.initial_visible_fraction = initial;
        self.min_viewport_fraction = minimum;
        self
    }

    /// Sets every animation duration in milliseconds.
    #[must_use]
    pub fn with_durations(
        mut self,
        y_scale_ms: f64,
        grid_crossfade_ms: f64,
        label_fade_ms: f64,
        series_fade_ms: f64,
    ) -> Self {
        self.y_scale_duration_ms = y_scale_ms;
        self.grid_crossfade_duration_ms = grid_crossfade_ms;
        self.label_fade_duration_ms = label_fade_ms;
        self.series_fade_duration_ms = series_fade_ms;
        self
    }

    #[must_use]
    pub fn with_label_spacing_px(mut self, spacing_px: f64) -> Self {
        self.label_spacing_px = spacing_px;
        self
    }

    #[must_use]
    pub fn with_redirect_policy(mut self, policy: RedirectPolicy) -> Self {
        self.redirect_policy = policy;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_widget_size(self.width_px, self.chart_height_px, self.minimap_height_px)?;
        if !self.device_pixel_ratio.is_finite() || self.device_pixel_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "device pixel ratio must be finite and > 0".to_owned(),
            ));
        }
        validate_fraction("initial visible fraction", self.initial_visible_fraction)?;
        validate_fraction("min viewport fraction", self.min_viewport_fraction)?;
        for (name, value) in [
            ("y scale duration", self.y_scale_duration_ms),
            ("grid crossfade duration", self.grid_crossfade_duration_ms),
            ("label fade duration", self.label_fade_duration_ms),
            ("series fade duration", self.series_fade_duration_ms),
            ("chart top margin", self.chart_top_margin_px),
            ("chart bottom margin", self.chart_bottom_margin_px),
            ("minimap top margin", self.minimap_top_margin_px),
            ("grip width", self.grip_width_px),
        ] {
            validate_non_negative(name, value)?;
        }
        for (name, value) in [
            ("label spacing", self.label_spacing_px),
            ("min grid step", self.min_grid_step_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }

    /// Logical pixels to physical pixels for the configured display.
    #[must_use]
    pub fn to_physical_px(&self, logical_px: f64) -> f64 {
        (logical_px * self.device_pixel_ratio).floor()
    }

    #[must_use]
    pub fn chart_window_settings(&self) -> ChartWindowSettings {
        ChartWindowSettings {
            height_px: self.chart_height_px,
            top_margin_px: self.to_physical_px(self.chart_top_margin_px),
            bottom_margin_px: self.to_physical_px(self.chart_bottom_margin_px),
            min_grid_step_px: self.to_physical_px(self.min_grid_step_px),
            desired_label_spacing_px: self.to_physical_px(self.label_spacing_px),
            y_scale_duration_ms: self.y_scale_duration_ms,
            grid_crossfade_duration_ms: self.grid_crossfade_duration_ms,
            label_fade_duration_ms: self.label_fade_duration_ms,
        }
    }

    #[must_use]
    pub fn minimap_settings(&self) -> MinimapSettings {
        MinimapSettings {
            height_px: self.minimap_height_px,
            top_margin_px: self.to_physical_px(self.minimap_top_margin_px),
            y_scale_duration_ms: self.y_scale_duration_ms,
        }
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_device_pixel_ratio() -> f64 {
    1.0
}

fn default_initial_visible_fraction() -> f64 {
    DEFAULT_VISIBLE_FRACTION
}

fn default_min_viewport_fraction() -> f64 {
    DEFAULT_MIN_WIDTH_FRACTION
}

fn default_y_scale_duration_ms() -> f64 {
    300.0
}

fn default_grid_crossfade_duration_ms() -> f64 {
    500.0
}

fn default_label_fade_duration_ms() -> f64 {
    1000.0
}

fn default_series_fade_duration_ms() -> f64 {
    300.0
}

fn default_label_spacing_px() -> f64 {
    DEFAULT_LABEL_SPACING_PX
}

fn default_min_grid_step_px() -> f64 {
    DEFAULT_MIN_GRID_STEP_PX
}

fn default_chart_top_margin_px() -> f64 {
    20.0
}

fn default_chart_bottom_margin_px() -> f64 {
    45.0
}

fn default_minimap_top_margin_px() -> f64 {
    10.0
}

fn default_grip_width_px() -> f64 {
    DEFAULT_GRIP_WIDTH_PX
}
