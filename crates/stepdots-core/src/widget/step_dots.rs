//! Step dots widget state, measurement, rendering and hit testing.

use std::borrow::Cow;
use std::fmt;

use kurbo::{Point, Size};

use super::listener::SelectionListener;
use crate::config::StepDotsConfig;
use crate::display::{self, DisplayList};
use crate::error::{StepDotsError, StepDotsResult};
use crate::geometry::{self, DotsGeometry};
use crate::input::PointerEvent;
use crate::measure::{EstimatedMetrics, MeasureSpec, TextMetrics};
use crate::palette::{ColorResolver, Palette};
use crate::surface::DrawSurface;

/// Extra space below the label line.
const LABEL_BOTTOM_SLACK: f64 = 10.0;

/// Text heights closer than this are treated as unchanged.
const TEXT_HEIGHT_TOLERANCE: f64 = 0.5;

fn natural_height(config: &StepDotsConfig, text_height: f64) -> f64 {
    (geometry::label_baseline_height(config) as f64 + text_height + LABEL_BOTTOM_SLACK).floor()
}

/// A horizontal row of step dots joined by segments, with a label per dot.
pub struct StepDotsWidget {
    config: StepDotsConfig,
    /// Selection boundary; `dots_num` selects everything.
    position: usize,
    /// Labels, one per dot. `None` renders placeholders.
    content: Option<Vec<String>>,
    listener: Option<Box<dyn SelectionListener>>,
    /// Label line height from the last metrics query.
    text_height: f64,
    measured: Size,
    geometry: DotsGeometry,
    redraw_requested: bool,
    remeasure_requested: bool,
}

impl fmt::Debug for StepDotsWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDotsWidget")
            .field("position", &self.position)
            .field("dots_num", &self.dots_num())
            .field("content", &self.content)
            .field("has_listener", &self.listener.is_some())
            .field("measured", &self.measured)
            .field("line_width", &self.geometry.line_width)
            .finish_non_exhaustive()
    }
}

impl StepDotsWidget {
    /// Build a widget from a configuration.
    ///
    /// The widget starts laid out at its natural size with estimated text
    /// metrics, so hit testing is valid before the host measures it.
    pub fn new(config: StepDotsConfig) -> StepDotsResult<Self> {
        config.validate()?;
        let text_height = EstimatedMetrics
            .font_metrics(config.label_text_size)
            .height();
        let position = config.initial_position();
        let measured = Size::new(
            geometry::natural_width(&config, config.preferred_line_width) as f64,
            natural_height(&config, text_height),
        );

        Ok(Self {
            geometry: DotsGeometry::compute(&config, measured),
            config,
            position,
            content: None,
            listener: None,
            text_height,
            measured,
            redraw_requested: true,
            remeasure_requested: false,
        })
    }

    /// Build a widget with the default configuration.
    pub fn with_defaults() -> Self {
        Self::new(StepDotsConfig::default()).expect("default configuration is valid")
    }

    pub fn config(&self) -> &StepDotsConfig {
        &self.config
    }

    /// Palette from the configuration, usable as a [`ColorResolver`].
    pub fn palette(&self) -> &Palette {
        &self.config.palette
    }

    /// Number of dots.
    pub fn dots_num(&self) -> usize {
        self.config.dot_count()
    }

    // --- Measurement ---

    /// Width when the host lets the widget choose, using the preferred
    /// segment length.
    pub fn natural_width(&self) -> f64 {
        geometry::natural_width(&self.config, self.config.preferred_line_width) as f64
    }

    /// Height when the host lets the widget choose: dot, label margin, label
    /// line and a little slack.
    pub fn natural_height(&self) -> f64 {
        natural_height(&self.config, self.text_height)
    }

    /// Resolve the widget size against host constraints.
    ///
    /// An exact width drives the segment length directly. Otherwise the
    /// natural width (from the preferred segment length) is used, capped by
    /// an at-most constraint, and the segment length is solved from the
    /// result.
    pub fn measure(
        &mut self,
        width: MeasureSpec,
        height: MeasureSpec,
        metrics: &mut dyn TextMetrics,
    ) -> Size {
        self.text_height = metrics.font_metrics(self.config.label_text_size).height();
        let measured = Size::new(
            width.resolve(self.natural_width()),
            height.resolve(self.natural_height()),
        );
        log::debug!(
            "Measured step dots: {:?} x {:?} -> {}x{}",
            width.mode,
            height.mode,
            measured.width,
            measured.height
        );
        self.measured = measured;
        self.remeasure_requested = false;
        if self.recompute_geometry().clamped {
            log::warn!(
                "Width {} too small for {} dots of radius {}, segments collapsed",
                measured.width,
                self.dots_num(),
                self.config.dot_radius
            );
        }
        measured
    }

    /// Size from the last measure pass.
    pub fn measured_size(&self) -> Size {
        self.measured
    }

    /// Rebuild the geometry snapshot from the measured size.
    pub fn recompute_geometry(&mut self) -> &DotsGeometry {
        self.geometry = DotsGeometry::compute(&self.config, self.measured);
        &self.geometry
    }

    /// Current geometry snapshot.
    pub fn geometry(&self) -> &DotsGeometry {
        &self.geometry
    }

    /// Length of every connecting segment.
    pub fn line_width(&self) -> i32 {
        self.geometry.line_width
    }

    /// Horizontal centre of every dot.
    pub fn dot_positions(&self) -> Vec<f64> {
        self.geometry.dot_centers.iter().map(|p| p.x).collect()
    }

    /// Whether the label metrics seen while rendering differ from the ones
    /// used for the last measure pass.
    pub fn needs_remeasure(&self) -> bool {
        self.remeasure_requested
    }

    // --- Rendering ---

    /// Labels used for painting: the content, or placeholders when unset.
    pub fn labels(&self) -> Cow<'_, [String]> {
        match &self.content {
            Some(content) => Cow::Borrowed(content.as_slice()),
            None => Cow::Owned(
                (0..self.dots_num())
                    .map(|i| format!("{} {}", self.config.placeholder_word, i))
                    .collect(),
            ),
        }
    }

    /// Display list for the current geometry and selection.
    pub fn display_list(&self) -> DisplayList {
        DisplayList::build(
            &self.geometry,
            self.position,
            &self.labels(),
            self.config.label_text_size,
        )
    }

    /// Paint the widget and clear any pending redraw request.
    pub fn render(&mut self, surface: &mut dyn DrawSurface, resolver: &dyn ColorResolver) {
        let text_height = surface.font_metrics(self.config.label_text_size).height();
        if (text_height - self.text_height).abs() > TEXT_HEIGHT_TOLERANCE {
            log::debug!(
                "Label height changed from {} to {}, requesting re-measure",
                self.text_height,
                text_height
            );
            self.text_height = text_height;
            self.remeasure_requested = true;
        }

        self.recompute_geometry();
        self.display_list().paint(surface, resolver);
        self.redraw_requested = false;
    }

    /// Whether the widget asked to be redrawn.
    pub fn needs_redraw(&self) -> bool {
        self.redraw_requested
    }

    /// Return and clear the redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    // --- Input ---

    /// Handle a press at `point`.
    ///
    /// Selects the dot under the point and notifies the listener. A redraw
    /// is requested either way.
    pub fn on_pointer_down(&mut self, point: Point) -> Option<usize> {
        let hit = self.geometry.dot_at(point);
        if let Some(index) = hit {
            log::info!("Step dot {} selected", index);
            self.position = index;
            if let Some(listener) = self.listener.as_mut() {
                listener.on_selected(index);
            }
        }
        self.request_redraw();
        hit
    }

    /// Route a pointer event. Returns true when a dot was hit.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        match event {
            PointerEvent::Down { .. } => self.on_pointer_down(event.position()).is_some(),
            PointerEvent::Up { .. } | PointerEvent::Move { .. } => false,
        }
    }

    // --- Selection ---

    /// Selection boundary; equals `dots_num()` when everything is selected.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Set the selection boundary. Does not notify the listener.
    pub fn set_position(&mut self, position: usize) -> StepDotsResult<()> {
        let dots_num = self.dots_num();
        if position > dots_num {
            return Err(StepDotsError::SelectionOutOfRange { position, dots_num });
        }
        self.position = position;
        self.request_redraw();
        Ok(())
    }

    /// Select every dot.
    pub fn select_all(&mut self) {
        self.position = self.dots_num();
        self.request_redraw();
    }

    pub fn is_all_selected(&self) -> bool {
        self.position == self.dots_num()
    }

    pub fn is_dot_selected(&self, index: usize) -> bool {
        index < self.dots_num() && display::is_dot_selected(self.position, self.dots_num(), index)
    }

    pub fn is_segment_selected(&self, index: usize) -> bool {
        index + 1 < self.dots_num()
            && display::is_segment_selected(self.position, self.dots_num(), index)
    }

    // --- Content ---

    /// Labels set by the owner, if any.
    pub fn content(&self) -> Option<&[String]> {
        self.content.as_deref()
    }

    /// Replace the labels. The list must hold one label per dot.
    pub fn set_content(&mut self, content: Vec<String>) -> StepDotsResult<()> {
        if content.len() != self.dots_num() {
            return Err(StepDotsError::ContentLengthMismatch {
                expected: self.dots_num(),
                actual: content.len(),
            });
        }
        self.content = Some(content);
        self.request_redraw();
        Ok(())
    }

    /// Go back to placeholder labels.
    pub fn clear_content(&mut self) {
        self.content = None;
        self.request_redraw();
    }

    // --- Listener ---

    /// Register the listener notified on taps, replacing any previous one.
    pub fn set_listener(&mut self, listener: impl SelectionListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn listener(&self) -> Option<&dyn SelectionListener> {
        self.listener.as_deref()
    }

    /// Remove and return the listener.
    pub fn take_listener(&mut self) -> Option<Box<dyn SelectionListener>> {
        self.listener.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::FontMetrics;
    use crate::surface::RecordingSurface;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn three_dots() -> StepDotsWidget {
        let config = StepDotsConfig::new()
            .with_dots_num(3)
            .with_dot_radius(40)
            .with_padding(60);
        StepDotsWidget::new(config).unwrap()
    }

    fn recorded(widget: &mut StepDotsWidget) -> Rc<RefCell<Vec<usize>>> {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        widget.set_listener(move |index| sink.borrow_mut().push(index));
        calls
    }

    struct FixedMetrics(f64);

    impl TextMetrics for FixedMetrics {
        fn font_metrics(&mut self, _size: f32) -> FontMetrics {
            FontMetrics {
                top: -self.0 * 0.8,
                ascent: -self.0 * 0.7,
                descent: self.0 * 0.15,
                bottom: self.0 * 0.2,
            }
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = StepDotsWidget::new(StepDotsConfig::new().with_dots_num(1)).unwrap_err();
        assert!(matches!(err, StepDotsError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_defaults() {
        let widget = StepDotsWidget::with_defaults();
        assert_eq!(widget.dots_num(), 4);
        assert_eq!(widget.position(), 4);
        assert!(widget.is_all_selected());
        assert!(widget.content().is_none());
        assert!(widget.listener().is_none());
        assert_eq!(widget.dot_positions().len(), 4);
    }

    #[test]
    fn test_measure_exact_width() {
        for (dots, radius, padding) in [(2, 10, 0), (4, 40, 60), (6, 20, 30)] {
            let config = StepDotsConfig::new()
                .with_dots_num(dots)
                .with_dot_radius(radius)
                .with_padding(padding);
            let mut widget = StepDotsWidget::new(config).unwrap();
            let size = widget.measure(
                MeasureSpec::exactly(500.0),
                MeasureSpec::unspecified(),
                &mut EstimatedMetrics,
            );
            assert!((size.width - 500.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_measure_solves_line_width() {
        let mut widget = three_dots();
        widget.measure(
            MeasureSpec::exactly(560.0),
            MeasureSpec::exactly(300.0),
            &mut EstimatedMetrics,
        );
        assert_eq!(widget.line_width(), 100);
        assert_eq!(widget.dot_positions(), vec![100.0, 280.0, 460.0]);
        assert!((widget.measured_size().height - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_measure_natural_size() {
        let mut widget = three_dots();
        let size = widget.measure(
            MeasureSpec::unspecified(),
            MeasureSpec::unspecified(),
            &mut FixedMetrics(60.0),
        );
        // 100 * 2 + 40 * 2 * 3 + 60 * 2
        assert!((size.width - 560.0).abs() < f64::EPSILON);
        assert_eq!(widget.line_width(), 100);
        // 40 + 150 + 60 + 10
        assert!((size.height - 260.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_measure_at_most_caps() {
        let mut widget = three_dots();
        let size = widget.measure(
            MeasureSpec::at_most(300.0),
            MeasureSpec::at_most(100.0),
            &mut FixedMetrics(60.0),
        );
        assert!((size.width - 300.0).abs() < f64::EPSILON);
        assert!((size.height - 100.0).abs() < f64::EPSILON);
        // 300 is narrower than three dots plus padding
        assert_eq!(widget.line_width(), 0);
        assert!(widget.geometry().clamped);

        let size = widget.measure(
            MeasureSpec::at_most(2000.0),
            MeasureSpec::at_most(2000.0),
            &mut FixedMetrics(60.0),
        );
        assert!((size.width - 560.0).abs() < f64::EPSILON);
        assert!((size.height - 260.0).abs() < f64::EPSILON);
        assert_eq!(widget.line_width(), 100);
    }

    #[test]
    fn test_natural_measure_uses_preferred_line_width() {
        for dots in [2, 4] {
            for padding in [0, 60, 300] {
                let config = StepDotsConfig::new()
                    .with_dots_num(dots)
                    .with_padding(padding)
                    .with_preferred_line_width(100);
                let mut widget = StepDotsWidget::new(config).unwrap();
                let size = widget.measure(
                    MeasureSpec::unspecified(),
                    MeasureSpec::unspecified(),
                    &mut EstimatedMetrics,
                );
                assert_eq!(widget.line_width(), 100);
                assert!(!widget.geometry().clamped);
                // Every dot lies inside the reported bounds
                let last = widget.geometry().dot_centers[dots as usize - 1];
                assert!(last.x + 40.0 + padding as f64 <= size.width);
            }
        }
    }

    #[test]
    fn test_new_rejects_oversized_radius() {
        let config = StepDotsConfig::new().with_dot_radius(1_500_000_000);
        let err = StepDotsWidget::new(config).unwrap_err();
        assert!(matches!(err, StepDotsError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_measure_includes_insets() {
        let config = StepDotsConfig::new()
            .with_dots_num(3)
            .with_insets(crate::config::Insets::uniform(5));
        let mut widget = StepDotsWidget::new(config).unwrap();
        let size = widget.measure(
            MeasureSpec::unspecified(),
            MeasureSpec::unspecified(),
            &mut FixedMetrics(60.0),
        );
        assert!((size.width - 570.0).abs() < f64::EPSILON);
        assert!((size.height - 270.0).abs() < f64::EPSILON);
        assert!((widget.geometry().dot_centers[0].y - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_selects_and_notifies() {
        let mut widget = three_dots();
        let calls = recorded(&mut widget);
        widget.measure(
            MeasureSpec::exactly(560.0),
            MeasureSpec::unspecified(),
            &mut EstimatedMetrics,
        );

        let center = widget.geometry().dot_centers[1];
        assert_eq!(widget.on_pointer_down(center), Some(1));
        assert_eq!(widget.position(), 1);
        assert_eq!(*calls.borrow(), vec![1]);
        assert!(widget.needs_redraw());
    }

    #[test]
    fn test_hit_test_miss() {
        let mut widget = three_dots();
        let calls = recorded(&mut widget);
        widget.measure(
            MeasureSpec::exactly(560.0),
            MeasureSpec::unspecified(),
            &mut EstimatedMetrics,
        );
        widget.set_position(2).unwrap();

        assert_eq!(widget.on_pointer_down(Point::new(190.0, 40.0)), None);
        assert_eq!(widget.on_pointer_down(Point::new(280.0, 200.0)), None);
        assert_eq!(widget.position(), 2);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_hit_test_before_measure() {
        let mut widget = three_dots();
        let center = widget.geometry().dot_centers[2];
        assert_eq!(widget.on_pointer_down(center), Some(2));
        assert_eq!(widget.position(), 2);
    }

    #[test]
    fn test_tap_without_listener() {
        let mut widget = three_dots();
        let center = widget.geometry().dot_centers[0];
        assert!(widget.handle_pointer(&PointerEvent::Down { position: center }));
        assert_eq!(widget.position(), 0);
    }

    #[test]
    fn test_pointer_up_and_move_ignored() {
        let mut widget = three_dots();
        let calls = recorded(&mut widget);
        let center = widget.geometry().dot_centers[0];
        assert!(!widget.handle_pointer(&PointerEvent::Up { position: center }));
        assert!(!widget.handle_pointer(&PointerEvent::Move { position: center }));
        assert_eq!(widget.position(), 3);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_take_listener() {
        let mut widget = three_dots();
        let calls = recorded(&mut widget);
        assert!(widget.take_listener().is_some());
        assert!(widget.listener().is_none());
        let center = widget.geometry().dot_centers[1];
        widget.on_pointer_down(center);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_set_position() {
        let mut widget = StepDotsWidget::with_defaults();
        widget.take_redraw_request();
        widget.set_position(2).unwrap();
        assert!(widget.take_redraw_request());
        assert!(widget.is_dot_selected(2));
        assert!(!widget.is_dot_selected(3));
        assert!(widget.is_segment_selected(1));
        assert!(!widget.is_segment_selected(2));
        assert!(!widget.is_segment_selected(3));

        widget.set_position(4).unwrap();
        assert!(widget.is_all_selected());
    }

    #[test]
    fn test_set_position_out_of_range() {
        let mut widget = StepDotsWidget::with_defaults();
        widget.set_position(1).unwrap();
        let err = widget.set_position(5).unwrap_err();
        assert_eq!(
            err,
            StepDotsError::SelectionOutOfRange {
                position: 5,
                dots_num: 4
            }
        );
        assert_eq!(widget.position(), 1);

        widget.select_all();
        assert_eq!(widget.position(), 4);
    }

    #[test]
    fn test_set_content() {
        let mut widget = three_dots();
        let labels = vec!["Cart".to_string(), "Ship".to_string(), "Pay".to_string()];
        widget.set_content(labels.clone()).unwrap();
        assert_eq!(widget.content(), Some(labels.as_slice()));
        assert_eq!(&*widget.labels(), labels.as_slice());
    }

    #[test]
    fn test_set_content_length_mismatch() {
        let mut widget = three_dots();
        widget.set_content(vec!["a".into(), "b".into(), "c".into()]).unwrap();
        let err = widget.set_content(vec!["x".into(), "y".into()]).unwrap_err();
        assert_eq!(
            err,
            StepDotsError::ContentLengthMismatch {
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(widget.content().unwrap()[0], "a");
    }

    #[test]
    fn test_placeholder_labels() {
        let mut widget = three_dots();
        assert_eq!(&*widget.labels(), ["Step 0", "Step 1", "Step 2"]);
        widget.set_content(vec!["a".into(), "b".into(), "c".into()]).unwrap();
        widget.clear_content();
        assert!(widget.content().is_none());
        assert_eq!(widget.labels().len(), 3);
    }

    #[test]
    fn test_render_counts() {
        let mut widget = StepDotsWidget::with_defaults();
        widget.set_position(2).unwrap();
        let list = widget.display_list();
        assert_eq!(list.dots().count(), 4);
        assert_eq!(list.segments().count(), 3);

        let mut surface = RecordingSurface::new();
        widget.render(&mut surface, &Palette::default());
        assert!(!widget.needs_redraw());
        assert!(!surface.commands().is_empty());
    }

    #[test]
    fn test_render_idempotent() {
        let mut widget = three_dots();
        widget.measure(
            MeasureSpec::exactly(560.0),
            MeasureSpec::unspecified(),
            &mut EstimatedMetrics,
        );
        let palette = *widget.palette();

        let mut first = RecordingSurface::new();
        widget.render(&mut first, &palette);
        let geometry = widget.geometry().clone();
        let list = widget.display_list();

        let mut second = RecordingSurface::new();
        widget.render(&mut second, &palette);
        assert_eq!(widget.geometry(), &geometry);
        assert_eq!(widget.display_list(), list);
        assert_eq!(first.commands().len(), second.commands().len());
    }

    #[test]
    fn test_render_requests_remeasure_on_metric_change() {
        struct TallText(RecordingSurface);

        impl TextMetrics for TallText {
            fn font_metrics(&mut self, size: f32) -> FontMetrics {
                FontMetrics {
                    top: -2.0 * size as f64,
                    ascent: -1.8 * size as f64,
                    descent: 0.5,
                    bottom: 1.0,
                }
            }
        }

        impl DrawSurface for TallText {
            fn fill_rect(&mut self, rect: kurbo::Rect, color: peniko::Color) {
                self.0.fill_rect(rect, color);
            }
            fn fill_circle(&mut self, circle: kurbo::Circle, color: peniko::Color) {
                self.0.fill_circle(circle, color);
            }
            fn draw_text(&mut self, text: &str, anchor: Point, size: f32, color: peniko::Color) {
                self.0.draw_text(text, anchor, size, color);
            }
        }

        let mut widget = three_dots();
        let palette = *widget.palette();
        widget.render(&mut RecordingSurface::new(), &palette);
        assert!(!widget.needs_remeasure());

        let mut surface = TallText(RecordingSurface::new());
        widget.render(&mut surface, &palette);
        assert!(widget.needs_remeasure());

        let size = widget.measure(

            MeasureSpec::unspecified(),

            MeasureSpec::unspecified(),

            &mut surface,

        );
        assert!(!widget.needs_remeasure());
        // 40 + 150 + (100 + 1) + 10
        assert!((size.height - 301.0).abs() < f64::EPSILON);
    }
}
