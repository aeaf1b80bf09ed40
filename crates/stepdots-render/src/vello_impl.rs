//! Vello-based drawing surface.

use std::sync::Arc;

use kurbo::{Affine, Circle, Point, Rect};
use parley::layout::PositionedLayoutItem;
use parley::{FontContext, Layout, LayoutContext, StyleProperty};
use peniko::{Brush, Color, Fill};
use stepdots_core::measure::{EstimatedMetrics, FontMetrics, TextMetrics};
use stepdots_core::palette::ColorResolver;
use stepdots_core::surface::DrawSurface;
use stepdots_core::widget::StepDotsWidget;
use vello::Scene;

/// Sample used to query line metrics: one ascender, one descender.
const METRICS_SAMPLE: &str = "Mg";

/// Drawing surface that records into a Vello scene, shaping text with Parley.
pub struct VelloSurface {
    /// The Vello scene being built.
    scene: Scene,
    /// Font context for text rendering (cached to avoid re-registering fonts).
    font_cx: FontContext,
    /// Layout context for text rendering.
    layout_cx: LayoutContext<Brush>,
    /// Family registered through [`VelloSurface::register_font`], if any.
    font_family: Option<String>,
    /// Transform applied to everything drawn.
    transform: Affine,
}

impl Default for VelloSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloSurface {
    /// Create a surface using system fonts.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
            font_family: None,
            transform: Affine::IDENTITY,
        }
    }

    /// Register font data and use its first family for labels.
    ///
    /// Returns the family name, or `None` when the data holds no usable font.
    pub fn register_font(&mut self, data: Vec<u8>) -> Option<String> {
        let families = self
            .font_cx
            .collection
            .register_fonts(vello::peniko::Blob::new(Arc::new(data)), None);
        let family_id = families.first().map(|(id, _)| *id)?;
        let name = self.font_cx.collection.family_name(family_id)?.to_string();
        log::info!("Registered label font '{}'", name);
        self.font_family = Some(name.clone());
        Some(name)
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Clear the scene and paint `widget` at the given scale.
    pub fn render_widget(
        &mut self,
        widget: &mut StepDotsWidget,
        resolver: &dyn ColorResolver,
        scale: f64,
    ) -> &Scene {
        self.scene.reset();
        self.transform = Affine::scale(scale);
        widget.render(self, resolver);
        &self.scene
    }

    fn font_stack(&self) -> parley::FontStack<'static> {
        match &self.font_family {
            Some(name) => parley::FontStack::Single(parley::FontFamily::Named(name.clone().into())),
            None => parley::FontStack::Single(parley::FontFamily::Generic(
                parley::GenericFamily::SansSerif,
            )),
        }
    }

    /// Shape a single line of text.
    fn layout_text(&mut self, text: &str, size: f32, brush: Brush) -> Layout<Brush> {
        let font_stack = self.font_stack();
        let mut builder = self.layout_cx.ranged_builder(&mut self.font_cx, text, 1.0, false);
        builder.push_default(StyleProperty::FontSize(size));
        builder.push_default(StyleProperty::Brush(brush));
        builder.push_default(StyleProperty::FontStack(font_stack));
        let mut layout = builder.build(text);

        layout.break_all_lines(None);
        layout.align(None, parley::Alignment::Start, parley::AlignmentOptions::default());
        layout
    }
}

impl TextMetrics for VelloSurface {
    fn font_metrics(&mut self, size: f32) -> FontMetrics {
        let layout = self.layout_text(METRICS_SAMPLE, size, Brush::default());
        match layout.lines().next() {
            Some(line) => {
                let metrics = line.metrics();
                let ascent = metrics.ascent as f64;
                let descent = metrics.descent as f64;
                let half_leading = (metrics.leading as f64 / 2.0).max(0.0);
                FontMetrics {
                    top: -(ascent + half_leading),
                    ascent: -ascent,
                    descent,
                    bottom: descent + half_leading,
                }
            }
            None => EstimatedMetrics.font_metrics(size),
        }
    }
}

impl DrawSurface for VelloSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.scene.fill(Fill::NonZero, self.transform, color, None, &rect);
    }

    fn fill_circle(&mut self, circle: Circle, color: Color) {
        self.scene.fill(Fill::NonZero, self.transform, color, None, &circle);
    }

    fn draw_text(&mut self, text: &str, anchor: Point, size: f32, color: Color) {
        if text.is_empty() {
            return;
        }

        let brush = Brush::Solid(color);
        let layout = self.layout_text(text, size, brush.clone());
        let width = layout.width() as f64;
        let first_baseline = layout
            .lines()
            .next()
            .map(|line| line.metrics().baseline as f64)
            .unwrap_or(0.0);

        // Parley layouts have y=0 at the top; move the first baseline onto the anchor
        let text_transform =
            self.transform * Affine::translate((anchor.x - width / 2.0, anchor.y - first_baseline));

        let mut glyph_count = 0;

        // Render each line (adapted from Parley's vello example)
        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let mut x = glyph_run.offset();
                let y = glyph_run.baseline();
                let run = glyph_run.run();
                let font = run.font();
                let font_size = run.font_size();
                let synthesis = run.synthesis();
                let glyph_xform = synthesis
                    .skew()
                    .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));

                let glyphs: Vec<vello::Glyph> = glyph_run
                    .glyphs()
                    .map(|glyph| {
                        let gx = x + glyph.x;
                        let gy = y - glyph.y;
                        x += glyph.advance;
                        glyph_count += 1;
                        vello::Glyph {
                            id: glyph.id,
                            x: gx,
                            y: gy,
                        }
                    })
                    .collect();

                if !glyphs.is_empty() {
                    self.scene
                        .draw_glyphs(font)
                        .brush(&brush)
                        .hint(true)
                        .transform(text_transform)
                        .glyph_transform(glyph_xform)
                        .font_size(font_size)
                        .normalized_coords(run.normalized_coords())
                        .draw(Fill::NonZero, glyphs.into_iter());
                }
            }
        }

        // No font available: mark where the label would be
        if glyph_count == 0 {
            log::debug!("No glyphs shaped for label '{}'", text);
            let size = size as f64;
            let approx_width = (text.chars().count() as f64 * size * 0.6).max(20.0);
            let rect = Rect::new(
                anchor.x - approx_width / 2.0,
                anchor.y - size * 0.8,
                anchor.x + approx_width / 2.0,
                anchor.y,
            );
            let placeholder = color.with_alpha(0.25);
            self.scene.fill(Fill::NonZero, self.transform, placeholder, None, &rect);
        }
    }
}
