//! Construction-time configuration for the step dots widget.

use serde::{Deserialize, Serialize};

use crate::error::{StepDotsError, StepDotsResult};
use crate::geometry;
use crate::palette::Palette;

/// Default dot radius in pixels.
pub const DEFAULT_DOT_RADIUS: i32 = 40;
/// Default number of dots.
pub const DEFAULT_DOTS_NUM: i32 = 4;
/// Default horizontal padding before the first and after the last dot.
pub const DEFAULT_PADDING: i32 = 60;
/// Default distance from the dot centre line to the label baseline.
pub const DEFAULT_LABEL_MARGIN: i32 = 150;
/// Default label text size.
pub const DEFAULT_LABEL_TEXT_SIZE: f32 = 50.0;
/// Segment length assumed when the host does not dictate the width.
pub const DEFAULT_PREFERRED_LINE_WIDTH: i32 = 100;
/// Width of the neutral rim drawn around a selected dot.
pub const RING_RIM_WIDTH: i32 = 5;
/// Largest accepted number of dots.
pub const MAX_DOTS_NUM: i32 = 1024;

/// Host-provided padding around the widget content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    /// Same inset on every side.
    pub fn uniform(value: i32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// Configuration bundle consumed once when the widget is built.
///
/// Keys use the camelCase attribute names (`dotRadius`, `dotsNum`, ...) so a
/// host can feed its attribute set straight through JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StepDotsConfig {
    /// Outer radius of each dot.
    pub dot_radius: i32,
    /// Number of dots, at least 2.
    pub dots_num: i32,
    /// Space before the first dot and after the last one.
    pub padding: i32,
    /// Offset from the dot centre line to the label baseline.
    pub label_margin: i32,
    /// Label font size.
    pub label_text_size: f32,
    /// Initial selection; `None` selects every dot.
    pub initial_selected: Option<i32>,
    /// Segment length used to derive a natural width.
    pub preferred_line_width: i32,
    /// Host padding around the content.
    pub insets: Insets,
    /// Word used for placeholder labels ("Step 0", "Step 1", ...).
    pub placeholder_word: String,
    /// Concrete colors for the default resolver.
    pub palette: Palette,
}

impl Default for StepDotsConfig {
    fn default() -> Self {
        Self {
            dot_radius: DEFAULT_DOT_RADIUS,
            dots_num: DEFAULT_DOTS_NUM,
            padding: DEFAULT_PADDING,
            label_margin: DEFAULT_LABEL_MARGIN,
            label_text_size: DEFAULT_LABEL_TEXT_SIZE,
            initial_selected: None,
            preferred_line_width: DEFAULT_PREFERRED_LINE_WIDTH,
            insets: Insets::default(),
            placeholder_word: "Step".to_string(),
            palette: Palette::default(),
        }
    }
}

impl StepDotsConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> StepDotsResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to pretty JSON.
    pub fn to_json(&self) -> StepDotsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set the number of dots.
    pub fn with_dots_num(mut self, dots_num: i32) -> Self {
        self.dots_num = dots_num;
        self
    }

    /// Set the dot radius.
    pub fn with_dot_radius(mut self, radius: i32) -> Self {
        self.dot_radius = radius;
        self
    }

    /// Set the outer padding.
    pub fn with_padding(mut self, padding: i32) -> Self {
        self.padding = padding;
        self
    }

    /// Set the label margin.
    pub fn with_label_margin(mut self, margin: i32) -> Self {
        self.label_margin = margin;
        self
    }

    /// Set the label text size.
    pub fn with_label_text_size(mut self, size: f32) -> Self {
        self.label_text_size = size;
        self
    }

    /// Set the initial selection.
    pub fn with_initial_selected(mut self, position: i32) -> Self {
        self.initial_selected = Some(position);
        self
    }

    /// Set the preferred segment length.
    pub fn with_preferred_line_width(mut self, width: i32) -> Self {
        self.preferred_line_width = width;
        self
    }

    /// Set the host insets.
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    /// Set the palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Number of dots as a count. Only meaningful after validation.
    pub fn dot_count(&self) -> usize {
        self.dots_num.max(0) as usize
    }

    /// Selection the widget starts with.
    pub fn initial_position(&self) -> usize {
        self.initial_selected.unwrap_or(self.dots_num).max(0) as usize
    }

    /// Check that every parameter yields a drawable layout.
    pub fn validate(&self) -> StepDotsResult<()> {
        let invalid = |msg: String| Err(StepDotsError::InvalidConfiguration(msg));

        if self.dots_num < 2 {
            return invalid(format!("dotsNum must be at least 2, got {}", self.dots_num));
        }
        if self.dots_num > MAX_DOTS_NUM {
            return invalid(format!(
                "dotsNum must be at most {}, got {}",
                MAX_DOTS_NUM, self.dots_num
            ));
        }
        if self.dot_radius < RING_RIM_WIDTH {
            return invalid(format!(
                "dotRadius must be at least {}, got {}",
                RING_RIM_WIDTH, self.dot_radius
            ));
        }
        for (name, value) in [
            ("padding", self.padding),
            ("labelMargin", self.label_margin),
            ("preferredLineWidth", self.preferred_line_width),
            ("insets.left", self.insets.left),
            ("insets.top", self.insets.top),
            ("insets.right", self.insets.right),
            ("insets.bottom", self.insets.bottom),
        ] {
            if value < 0 {
                return invalid(format!("{} must not be negative, got {}", name, value));
            }
        }
        if !self.label_text_size.is_finite() || self.label_text_size < 0.0 {
            return invalid(format!(
                "labelTextSize must be a non-negative number, got {}",
                self.label_text_size
            ));
        }
        // Every pixel coordinate must fit the host's i32 layout space
        let width = geometry::natural_width(self, self.preferred_line_width);
        if width > i64::from(i32::MAX) {
            return invalid(format!("natural width {} does not fit in i32", width));
        }
        let height = geometry::label_baseline_height(self);
        if height > i64::from(i32::MAX) {
            return invalid(format!("natural height {} does not fit in i32", height));
        }
        if let Some(selected) = self.initial_selected {
            if selected < 0 || selected > self.dots_num {
                return invalid(format!(
                    "initialSelected must be within 0..={}, got {}",
                    self.dots_num, selected
                ));
            }
        }
        Ok(())
    }
}
