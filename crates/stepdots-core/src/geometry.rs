//! Pixel geometry of dots, segments and labels.
//!
//! All positions are in widget-local coordinates with the origin at the
//! top-left corner of the measured bounds. Lengths are whole pixels and the
//! segment length uses integer division, so layouts match pixel for pixel
//! across hosts.

use kurbo::{Circle, Point, Rect, Size};

use crate::config::{RING_RIM_WIDTH, StepDotsConfig};

/// Half the thickness of a connecting segment.
pub const SEGMENT_HALF_THICKNESS: i32 = 10;

/// Solve the segment length that makes `dots_num` dots fill `width`.
///
/// Negative results (content wider than the available space) are clamped to
/// zero so the dots touch instead of overlapping backwards.
pub fn solve_line_width(width: i32, dots_num: i32, radius: i32, padding: i32) -> i32 {
    let content = i64::from(dots_num) * i64::from(radius) * 2 + i64::from(padding) * 2;
    let gaps = (i64::from(dots_num) - 1).max(1);
    let line_width = (i64::from(width) - content) / gaps;
    if line_width < 0 {
        log::debug!(
            "Width {} too small for {} dots of radius {}, clamping segment length to 0",
            width,
            dots_num,
            radius
        );
        0
    } else {
        // Never larger than `width`
        line_width as i32
    }
}

/// Natural width for a given segment length: dots, segments, padding on
/// both ends and the host insets.
pub fn natural_width(config: &StepDotsConfig, line_width: i32) -> i64 {
    let dots_num = i64::from(config.dots_num);
    i64::from(line_width) * (dots_num - 1)
        + i64::from(config.dot_radius) * 2 * dots_num
        + i64::from(config.padding) * 2
        + i64::from(config.insets.left)
        + i64::from(config.insets.right)
}

/// Height from the top edge down to the label baseline, plus the bottom
/// inset.
pub fn label_baseline_height(config: &StepDotsConfig) -> i64 {
    i64::from(config.dot_radius)
        + i64::from(config.label_margin)
        + i64::from(config.insets.top)
        + i64::from(config.insets.bottom)
}

/// Immutable snapshot of the widget layout.
///
/// Built by the widget whenever its size or configuration may have changed
/// and shared by painting and hit testing.
#[derive(Debug, Clone, PartialEq)]
pub struct DotsGeometry {
    /// Measured bounds.
    pub size: Size,
    /// Length of each connecting segment.
    pub line_width: i32,
    /// Dot radius.
    pub radius: i32,
    /// Host inset above the dots.
    pub top_inset: i32,
    /// Whether the width was too small and segments collapsed to zero.
    pub clamped: bool,
    /// Centre of every dot.
    pub dot_centers: Vec<Point>,
    /// Bounding box of every connecting segment.
    pub segments: Vec<Rect>,
    /// Horizontally centred baseline anchor of every label.
    pub label_anchors: Vec<Point>,
}

impl DotsGeometry {
    /// Compute the layout for the given measured size.
    pub fn compute(config: &StepDotsConfig, size: Size) -> Self {
        let radius = config.dot_radius;
        let padding = config.padding;
        let top = config.insets.top;
        let width = size.width.floor().min(f64::from(i32::MAX)) as i32;
        let line_width = solve_line_width(width, config.dots_num, radius, padding);

        let radius_px = i64::from(radius);
        let padding_px = i64::from(padding);
        let top_px = i64::from(top);
        let line_px = i64::from(line_width);
        let content = i64::from(config.dots_num) * radius_px * 2 + padding_px * 2;
        let clamped = i64::from(width) < content;
        let centre_x =
            |pos: i64| padding_px + pos * line_px + (pos + 1) * 2 * radius_px - radius_px;

        let n = config.dot_count();
        let mut dot_centers = Vec::with_capacity(n);
        let mut label_anchors = Vec::with_capacity(n);
        for pos in 0..i64::from(config.dots_num) {
            let x = centre_x(pos) as f64;
            dot_centers.push(Point::new(x, (radius_px + top_px) as f64));
            let label_y = radius_px + i64::from(config.label_margin) + top_px;
            label_anchors.push(Point::new(x, label_y as f64));
        }

        let thickness = i64::from(SEGMENT_HALF_THICKNESS);
        let segments = (0..i64::from(config.dots_num) - 1)
            .map(|pos| {
                let x = padding_px + (pos + 1) * radius_px * 2 + pos * line_px;
                Rect::new(
                    x as f64,
                    (radius_px - thickness + top_px) as f64,
                    (x + line_px) as f64,
                    (radius_px + thickness + top_px) as f64,
                )
            })
            .collect();

        log::debug!(
            "Computed geometry: {}x{}, segment length {}",
            size.width,
            size.height,
            line_width
        );

        Self {
            size,
            line_width,
            radius,
            top_inset: top,
            clamped,
            dot_centers,
            segments,
            label_anchors,
        }
    }

    /// Number of dots in this layout.
    pub fn dot_count(&self) -> usize {
        self.dot_centers.len()
    }

    /// Full measured bounds.
    pub fn bounds(&self) -> Rect {
        self.size.to_rect()
    }

    /// Outer circle of dot `index`.
    pub fn dot_circle(&self, index: usize) -> Option<Circle> {
        self.dot_centers
            .get(index)
            .map(|center| Circle::new(*center, self.radius as f64))
    }

    /// Colored inner circle of the ring drawn for dot `index`.
    pub fn ring_inner_circle(&self, index: usize) -> Option<Circle> {
        self.dot_centers
            .get(index)
            .map(|center| Circle::new(*center, (self.radius - RING_RIM_WIDTH) as f64))
    }

    /// Find the dot under `point`.
    ///
    /// A dot is hit inside the open square around its centre. Every dot is
    /// checked and the last hit wins.
    pub fn dot_at(&self, point: Point) -> Option<usize> {
        let r = self.radius as f64;
        let top = self.top_inset as f64;
        let mut hit = None;
        for (i, center) in self.dot_centers.iter().enumerate() {
            if point.x < center.x + r
                && point.x > center.x - r
                && point.y < 2.0 * r + top
                && point.y > top
            {
                hit = Some(i);
            }
        }
        hit
    }
}
