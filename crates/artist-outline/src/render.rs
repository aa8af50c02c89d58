//! Fitting the logical canvas into a display area and stroking outlines.

use crate::geometry::{Point, Rect, Transform};
use crate::shapes::GeometryElement;
use crate::{OutlineError, LOGICAL_CANVAS_SIZE};
use serde::{Deserialize, Serialize};

/// Line cap style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// Line join style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineJoin {
    Miter,
    #[default]
    Round,
    Bevel,
}

/// A display area that the square logical canvas is fitted into.
///
/// The canvas is scaled uniformly and centered, so aspect ratio is kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Edge length of the logical canvas.
    pub canvas_size: f32,
}

impl Viewport {
    /// Viewport over the standard 400×400 canvas.
    pub fn new(width: f32, height: f32) -> Result<Self, OutlineError> {
        Self::with_canvas_size(width, height, LOGICAL_CANVAS_SIZE)
    }

    pub fn with_canvas_size(width: f32, height: f32, canvas_size: f32) -> Result<Self, OutlineError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) || !valid(canvas_size) {
            return Err(OutlineError::InvalidViewport { width, height });
        }
        Ok(Self { width, height, canvas_size })
    }

    /// Display units per logical unit.
    pub fn scale(&self) -> f32 {
        self.width.min(self.height) / self.canvas_size
    }

    /// Template-to-display transform.
    pub fn transform(&self) -> Transform {
        let scale = self.scale();
        let fitted = self.canvas_size * scale;
        Transform::identity()
            .translate((self.width - fitted) / 2.0, (self.height - fitted) / 2.0)
            .scale(scale, scale)
    }

    /// Area the canvas occupies in display space.
    pub fn canvas_rect(&self) -> Rect {
        let fitted = self.canvas_size * self.scale();
        Rect::new((self.width - fitted) / 2.0, (self.height - fitted) / 2.0, fitted, fitted)
    }

    pub fn to_display(&self, p: Point) -> Point {
        self.transform().apply(p)
    }

    /// Map a display point back into template space.
    pub fn to_template(&self, p: Point) -> Point {
        // construction guarantees a positive scale, so the inverse exists
        match self.transform().inverse() {
            Some(inv) => inv.apply(p),
            None => p,
        }
    }
}

/// One element ready to be stroked in display space.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokedOutline {
    /// Flattened subpaths.
    pub polylines: Vec<Vec<Point>>,
    pub line_width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
}

/// Stroke each element independently, in document order.
///
/// Line widths scale with the viewport but never drop below one display
/// unit.
pub fn render_outlines(elements: &[GeometryElement], viewport: &Viewport) -> Vec<StrokedOutline> {
    let transform = viewport.transform();
    let scale = viewport.scale();

    elements
        .iter()
        .map(|el| StrokedOutline {
            polylines: el
                .path
                .transformed(&transform)
                .flatten()
                .into_iter()
                .map(|polyline| polyline.points)
                .collect(),
            line_width: (el.stroke_width * scale).max(1.0),
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan;

    #[test]
    fn test_viewport_centers_wide_area() {
        let vp = Viewport::new(800.0, 400.0).unwrap();
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.canvas_rect(), Rect::new(200.0, 0.0, 400.0, 400.0));
        assert_eq!(vp.to_display(Point::new(0.0, 0.0)), Point::new(200.0, 0.0));
    }

    #[test]
    fn test_viewport_round_trip() {
        let vp = Viewport::new(300.0, 500.0).unwrap();
        let p = Point::new(120.0, 310.0);
        let back = vp.to_template(vp.to_display(p));
        assert!((back.x - p.x).abs() < 0.01);
        assert!((back.y - p.y).abs() < 0.01);
    }

    #[test]
    fn test_invalid_viewport() {
        assert!(matches!(Viewport::new(0.0, 10.0), Err(OutlineError::InvalidViewport { .. })));
        assert!(Viewport::new(f32::NAN, 10.0).is_err());
    }

    #[test]
    fn test_render_scales_line_width() {
        let elements = scan(r#"<line x1="0" y1="0" x2="400" y2="400" stroke-width="4"/><rect x="0" y="0" width="10" height="10" stroke-width="1"/>"#);
        let vp = Viewport::new(200.0, 200.0).unwrap();
        let outlines = render_outlines(&elements, &vp);

        assert_eq!(outlines.len(), 2);
        assert_eq!(outlines[0].line_width, 2.0);
        assert_eq!(outlines[0].polylines, vec![vec![Point::new(0.0, 0.0), Point::new(200.0, 200.0)]]);
        // 1 * 0.5 is raised to the minimum
        assert_eq!(outlines[1].line_width, 1.0);
        assert_eq!(outlines[1].line_cap, LineCap::Round);
        assert_eq!(outlines[1].line_join, LineJoin::Round);
    }
}
