//! Drawing surface abstraction.

use kurbo::{Circle, Point, Rect};
use peniko::Color;

use crate::measure::{EstimatedMetrics, FontMetrics, TextMetrics};

/// Immediate-mode drawing target for the widget.
///
/// Implementations exist for Vello scenes, egui painters and a recording
/// surface used by headless hosts.
pub trait DrawSurface: TextMetrics {
    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fill a circle.
    fn fill_circle(&mut self, circle: Circle, color: Color);

    /// Draw a single line of text horizontally centred on `anchor.x` with its
    /// baseline at `anchor.y`.
    fn draw_text(&mut self, text: &str, anchor: Point, size: f32, color: Color);
}

/// A primitive recorded by [`RecordingSurface`].
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Rect { rect: Rect, color: Color },
    Circle { circle: Circle, color: Color },
    Text {
        text: String,
        anchor: Point,
        size: f32,
        color: Color,
    },
}

/// Surface that records every primitive instead of rasterizing it.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    metrics: EstimatedMetrics,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded primitives in paint order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl TextMetrics for RecordingSurface {
    fn font_metrics(&mut self, size: f32) -> FontMetrics {
        self.metrics.font_metrics(size)
    }
}

impl DrawSurface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn fill_circle(&mut self, circle: Circle, color: Color) {
        self.commands.push(DrawCommand::Circle { circle, color });
    }

    fn draw_text(&mut self, text: &str, anchor: Point, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            anchor,
            size,
            color,
        });
    }
}
