//! egui front end for [`StepDotsWidget`].

use egui::{CursorIcon, Pos2, Response, Sense, Ui, vec2};
use kurbo::Point;
use stepdots_core::measure::MeasureSpec;
use stepdots_core::palette::Palette;
use stepdots_core::widget::StepDotsWidget;

use crate::painter::EguiSurface;

/// Response from showing the step dots.
pub struct StepDotsResponse {
    /// Dot selected by a press this frame, if any
    pub selected: Option<usize>,
    /// The underlying egui Response
    pub response: Response,
}

/// Shows a [`StepDotsWidget`] inside an egui `Ui`.
///
/// The widget is measured every frame: against an exact width when one is
/// set, otherwise against the available width as an upper bound.
pub struct StepDotsView<'a> {
    widget: &'a mut StepDotsWidget,
    width: Option<f32>,
    height: Option<f32>,
    palette: Option<Palette>,
}

impl<'a> StepDotsView<'a> {
    /// Create a view over a widget.
    pub fn new(widget: &'a mut StepDotsWidget) -> Self {
        Self {
            widget,
            width: None,
            height: None,
            palette: None,
        }
    }

    /// Force an exact width.
    pub fn exact_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Fill the available width.
    pub fn fill_width(mut self, ui: &Ui) -> Self {
        self.width = Some(ui.available_width());
        self
    }

    /// Force an exact height.
    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    /// Paint with this palette instead of the widget's configured one.
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Measure, handle presses and paint.
    pub fn show(self, ui: &mut Ui) -> StepDotsResponse {
        let width_spec = match self.width {
            Some(width) => MeasureSpec::exactly(width as f64),
            None => MeasureSpec::at_most(ui.available_width() as f64),
        };
        let height_spec = self
            .height
            .map(|height| MeasureSpec::exactly(height as f64))
            .unwrap_or_default();

        let mut metrics = EguiSurface::new(ui.painter().clone(), Pos2::ZERO);
        let size = self.widget.measure(width_spec, height_spec, &mut metrics);

        let (rect, mut response) =
            ui.allocate_exact_size(vec2(size.width as f32, size.height as f32), Sense::click());

        // Selection follows the press, not the release
        let mut selected = None;
        let pressed = response.contains_pointer() && ui.input(|i| i.pointer.primary_pressed());
        if pressed {
            if let Some(pos) = ui.input(|i| i.pointer.interact_pos()) {
                let local = pos - rect.min;
                selected = self
                    .widget
                    .on_pointer_down(Point::new(local.x as f64, local.y as f64));
                if selected.is_some() {
                    response.mark_changed();
                }
            }
        }

        if ui.is_rect_visible(rect) {
            let palette = self.palette.unwrap_or(*self.widget.palette());
            let mut surface = EguiSurface::new(ui.painter_at(rect), rect.min);
            self.widget.render(&mut surface, &palette);
        }

        if self.widget.needs_remeasure() || self.widget.take_redraw_request() {
            ui.ctx().request_repaint();
        }

        let hovering_dot = response
            .hover_pos()
            .map(|pos| pos - rect.min)
            .and_then(|local| {
                self.widget
                    .geometry()
                    .dot_at(Point::new(local.x as f64, local.y as f64))
            })
            .is_some();
        let response = if hovering_dot {
            response.on_hover_cursor(CursorIcon::PointingHand)
        } else {
            response
        };

        StepDotsResponse { selected, response }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepdots_core::config::StepDotsConfig;

    fn run_frame(widget: &mut StepDotsWidget, width: Option<f32>) -> egui::Rect {
        let ctx = egui::Context::default();
        let mut raw = egui::RawInput::default();
        raw.screen_rect = Some(egui::Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0)));
        let mut shown = egui::Rect::NOTHING;
        let _ = ctx.run(raw, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let mut view = StepDotsView::new(&mut *widget);
                if let Some(width) = width {
                    view = view.exact_width(width);
                }
                shown = view.show(ui).response.rect;
            });
        });
        shown
    }

    fn small_widget() -> StepDotsWidget {
        let config = StepDotsConfig::new()
            .with_dot_radius(10)
            .with_padding(12)
            .with_label_margin(30)
            .with_label_text_size(12.0);
        StepDotsWidget::new(config).unwrap()
    }

    #[test]
    fn test_exact_width() {
        let mut widget = small_widget();
        let rect = run_frame(&mut widget, Some(500.0));
        assert!((rect.width() - 500.0).abs() < 0.5);
        assert!((widget.measured_size().width - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_natural_width_fits_available() {
        let mut widget = small_widget();
        run_frame(&mut widget, None);
        // 100 * 3 + 10 * 2 * 4 + 12 * 2
        assert!((widget.measured_size().width - 404.0).abs() < f64::EPSILON);
        assert_eq!(widget.line_width(), 100);
        assert!(widget.measured_size().height > 40.0);
    }

    #[test]
    fn test_render_clears_redraw_request() {
        let mut widget = small_widget();
        widget.set_position(1).unwrap();
        run_frame(&mut widget, Some(400.0));
        assert!(!widget.needs_redraw());
        assert_eq!(widget.position(), 1);
    }
}
