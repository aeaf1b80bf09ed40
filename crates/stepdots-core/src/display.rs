//! Display list: what the widget paints for a given geometry and selection.
//!
//! Each dot, label and segment appears exactly once, already tagged with its
//! final selection state. Painting the list gives the same picture as drawing
//! everything selected and then overpainting the unselected tail.

use kurbo::{Circle, Point, Rect};

use crate::config::RING_RIM_WIDTH;
use crate::geometry::DotsGeometry;
use crate::palette::{ColorResolver, ColorToken};
use crate::surface::DrawSurface;

/// Whether dot `index` is drawn selected.
///
/// `position == dots_num` selects every dot; otherwise dots up to and
/// including `position` are selected.
pub fn is_dot_selected(position: usize, dots_num: usize, index: usize) -> bool {
    position == dots_num || index <= position
}

/// Whether the segment leaving dot `index` is drawn selected.
///
/// The segment leaving the selected dot is already ahead of the selection.
pub fn is_segment_selected(position: usize, dots_num: usize, index: usize) -> bool {
    position == dots_num || index < position
}

/// One paintable element.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayItem {
    Background {
        rect: Rect,
    },
    Dot {
        index: usize,
        center: Point,
        radius: f64,
        selected: bool,
    },
    Label {
        index: usize,
        text: String,
        anchor: Point,
        size: f32,
        selected: bool,
    },
    Segment {
        index: usize,
        rect: Rect,
        selected: bool,
    },
}

/// Ordered list of display items for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    items: Vec<DisplayItem>,
}

impl DisplayList {
    /// Build the list for a geometry snapshot and selection.
    ///
    /// `labels` must hold one entry per dot.
    pub fn build(
        geometry: &DotsGeometry,
        position: usize,
        labels: &[String],
        text_size: f32,
    ) -> Self {
        let n = geometry.dot_count();
        let mut items = Vec::with_capacity(1 + n * 2 + geometry.segments.len());
        items.push(DisplayItem::Background {
            rect: geometry.bounds(),
        });

        for (index, (center, anchor)) in geometry
            .dot_centers
            .iter()
            .zip(&geometry.label_anchors)
            .enumerate()
        {
            let selected = is_dot_selected(position, n, index);
            items.push(DisplayItem::Dot {
                index,
                center: *center,
                radius: geometry.radius as f64,
                selected,
            });
            if let Some(text) = labels.get(index) {
                items.push(DisplayItem::Label {
                    index,
                    text: text.clone(),
                    anchor: *anchor,
                    size: text_size,
                    selected,
                });
            }
        }

        for (index, rect) in geometry.segments.iter().enumerate() {
            items.push(DisplayItem::Segment {
                index,
                rect: *rect,
                selected: is_segment_selected(position, n, index),
            });
        }

        Self { items }
    }

    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Dot items as `(index, selected)`.
    pub fn dots(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        self.items.iter().filter_map(|item| match item {
            DisplayItem::Dot { index, selected, .. } => Some((*index, *selected)),
            _ => None,
        })
    }

    /// Segment items as `(index, selected)`.
    pub fn segments(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        self.items.iter().filter_map(|item| match item {
            DisplayItem::Segment { index, selected, .. } => Some((*index, *selected)),
            _ => None,
        })
    }

    /// Label items as `(index, text, selected)`.
    pub fn labels(&self) -> impl Iterator<Item = (usize, &str, bool)> + '_ {
        self.items.iter().filter_map(|item| match item {
            DisplayItem::Label { index, text, selected, .. } => {
                Some((*index, text.as_str(), *selected))
            }
            _ => None,
        })
    }

    /// Paint every item onto `surface`.
    pub fn paint(&self, surface: &mut dyn DrawSurface, resolver: &dyn ColorResolver) {
        for item in &self.items {
            match item {
                DisplayItem::Background { rect } => {
                    surface.fill_rect(*rect, resolver.resolve(ColorToken::Background));
                }
                DisplayItem::Dot { center, radius, selected: true, .. } => {
                    // Two-tone ring: neutral rim, colored fill
                    surface.fill_circle(
                        Circle::new(*center, *radius),
                        resolver.resolve(ColorToken::RingRim),
                    );
                    surface.fill_circle(
                        Circle::new(*center, radius - RING_RIM_WIDTH as f64),
                        resolver.resolve(ColorToken::DotSelected),
                    );
                }
                DisplayItem::Dot { center, radius, selected: false, .. } => {
                    surface.fill_circle(
                        Circle::new(*center, *radius),
                        resolver.resolve(ColorToken::DotUnselected),
                    );
                }
                DisplayItem::Label { text, anchor, size, selected, .. } => {
                    let token = if *selected {
                        ColorToken::TextSelected
                    } else {
                        ColorToken::TextUnselected
                    };
                    surface.draw_text(text, *anchor, *size, resolver.resolve(token));
                }
                DisplayItem::Segment { rect, selected, .. } => {
                    let token = if *selected {
                        ColorToken::DotSelected
                    } else {
                        ColorToken::DotUnselected
                    };
                    surface.fill_rect(*rect, resolver.resolve(token));
                }
            }
        }
    }
}
