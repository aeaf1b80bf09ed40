//! Drawing surface over an egui painter.

use egui::{Align2, Color32, CornerRadius, FontId, Painter, Pos2, Vec2};
use kurbo::{Circle, Point, Rect};
use peniko::Color;
use stepdots_core::measure::{FontMetrics, TextMetrics};
use stepdots_core::surface::DrawSurface;

use crate::colors::to_color32;

/// Share of the egui row height above the baseline.
const ASCENT_SHARE: f64 = 0.8;

/// Paints widget-local coordinates into an egui painter at `origin`.
pub struct EguiSurface {
    painter: Painter,
    origin: Pos2,
}

impl EguiSurface {
    pub fn new(painter: Painter, origin: Pos2) -> Self {
        Self { painter, origin }
    }

    fn to_pos(&self, point: Point) -> Pos2 {
        self.origin + Vec2::new(point.x as f32, point.y as f32)
    }

    fn to_rect(&self, rect: Rect) -> egui::Rect {
        egui::Rect::from_min_max(
            self.to_pos(Point::new(rect.x0, rect.y0)),
            self.to_pos(Point::new(rect.x1, rect.y1)),
        )
    }

    fn row_height(&self, size: f32) -> f64 {
        let galley = self.painter.layout_no_wrap(
            "Mg".to_string(),
            FontId::proportional(size),
            Color32::PLACEHOLDER, // Color doesn't matter for sizing
        );
        galley.size().y as f64
    }
}

impl TextMetrics for EguiSurface {
    /// egui only reports row heights, so the baseline is placed at a fixed
    /// share of the row.
    fn font_metrics(&mut self, size: f32) -> FontMetrics {
        let height = self.row_height(size);
        let above = height * ASCENT_SHARE;
        let below = height - above;
        FontMetrics {
            top: -above,
            ascent: -above,
            descent: below,
            bottom: below,
        }
    }
}

impl DrawSurface for EguiSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.painter
            .rect_filled(self.to_rect(rect), CornerRadius::ZERO, to_color32(color));
    }

    fn fill_circle(&mut self, circle: Circle, color: Color) {
        self.painter.circle_filled(
            self.to_pos(circle.center),
            circle.radius as f32,
            to_color32(color),
        );
    }

    fn draw_text(&mut self, text: &str, anchor: Point, size: f32, color: Color) {
        let below = self.row_height(size) * (1.0 - ASCENT_SHARE);
        self.painter.text(
            self.to_pos(Point::new(anchor.x, anchor.y + below)),
            Align2::CENTER_BOTTOM,
            text,
            FontId::proportional(size),
            to_color32(color),
        );
    }
}
