//! Conversions between widget colors and egui colors.

use egui::{Color32, Visuals};
use peniko::Color;
use stepdots_core::palette::Palette;

/// Convert a widget color to an egui color.
pub fn to_color32(color: Color) -> Color32 {
    let c = color.to_rgba8();
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// Convert an egui color to a widget color.
pub fn from_color32(color: Color32) -> Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Color::from_rgba8(r, g, b, a)
}

/// Palette following the current egui visuals (light or dark).
pub fn palette_from_visuals(visuals: &Visuals) -> Palette {
    Palette {
        background: from_color32(visuals.panel_fill),
        ring_rim: from_color32(visuals.widgets.noninteractive.bg_fill),
        dot_selected: from_color32(visuals.selection.bg_fill),
        dot_unselected: from_color32(visuals.widgets.inactive.bg_fill),
        text_selected: from_color32(visuals.strong_text_color()),
        text_unselected: from_color32(visuals.weak_text_color()),
    }
}
