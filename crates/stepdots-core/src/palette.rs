//! Color tokens and their resolution to concrete colors.

use peniko::Color;
use serde::{Deserialize, Serialize};

use crate::error::{StepDotsError, StepDotsResult};

/// Abstract color roles used while painting the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorToken {
    /// Opaque fill behind the whole widget.
    Background,
    /// Neutral outer rim of a ring.
    RingRim,
    /// Inner fill of selected dots and selected segments.
    DotSelected,
    /// Fill of unselected dots and segments.
    DotUnselected,
    /// Label text under a selected dot.
    TextSelected,
    /// Label text under an unselected dot.
    TextUnselected,
}

/// Maps abstract color tokens to concrete colors.
///
/// Injected into rendering so layout and selection can run headless.
pub trait ColorResolver {
    fn resolve(&self, token: ColorToken) -> Color;
}

impl<F> ColorResolver for F
where
    F: Fn(ColorToken) -> Color,
{
    fn resolve(&self, token: ColorToken) -> Color {
        self(token)
    }
}

/// Concrete colors for every token, configurable through JSON as `#rrggbb`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Palette {
    #[serde(with = "hex_color")]
    pub background: Color,
    #[serde(with = "hex_color")]
    pub ring_rim: Color,
    #[serde(with = "hex_color")]
    pub dot_selected: Color,
    #[serde(with = "hex_color")]
    pub dot_unselected: Color,
    #[serde(with = "hex_color")]
    pub text_selected: Color,
    #[serde(with = "hex_color")]
    pub text_unselected: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            ring_rim: Color::from_rgba8(0xee, 0xf2, 0xf4, 255),
            dot_selected: Color::from_rgba8(59, 130, 246, 255), // Blue
            dot_unselected: Color::from_rgba8(209, 213, 219, 255),
            text_selected: Color::from_rgba8(31, 41, 55, 255),
            text_unselected: Color::from_rgba8(156, 163, 175, 255),
        }
    }
}

impl ColorResolver for Palette {
    fn resolve(&self, token: ColorToken) -> Color {
        match token {
            ColorToken::Background => self.background,
            ColorToken::RingRim => self.ring_rim,
            ColorToken::DotSelected => self.dot_selected,
            ColorToken::DotUnselected => self.dot_unselected,
            ColorToken::TextSelected => self.text_selected,
            ColorToken::TextUnselected => self.text_unselected,
        }
    }
}

/// Parse a `#rrggbb` or `#rrggbbaa` color string.
pub fn parse_hex_color(s: &str) -> StepDotsResult<Color> {
    let invalid = || StepDotsError::InvalidConfiguration(format!("invalid color '{}'", s));
    let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) || (hex.len() != 6 && hex.len() != 8) {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok(Color::from_rgba8(channel(0)?, channel(2)?, channel(4)?, alpha))
}

/// Format a color as `#rrggbb`, appending alpha only when not opaque.
pub fn format_hex_color(color: Color) -> String {
    let c = color.to_rgba8();
    if c.a == 255 {
        format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
    }
}

mod hex_color {
    use peniko::Color;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hex_color(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_hex_color(&s).map_err(serde::de::Error::custom)
    }
}
