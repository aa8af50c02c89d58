//! Vector paths: the operation list every shape compiles to.

use crate::geometry::{Point, Rect, Transform};
use serde::{Deserialize, Serialize};

/// Magic constant for approximating a quarter ellipse with one cubic.
const KAPPA: f32 = 0.552_284_75;

/// Segments used when flattening a curve.
const CURVE_SEGMENTS: usize = 20;

/// One path construction step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathOp {
    /// Start a new subpath.
    MoveTo(Point),
    /// Straight segment from the current point.
    LineTo(Point),
    /// Cubic bezier segment ending at `to`.
    CubicCurveTo { to: Point, control1: Point, control2: Point },
    /// Quadratic bezier segment ending at `to`.
    QuadCurveTo { to: Point, control: Point },
    /// Reconnect to the start of the current subpath.
    ClosePath,
}

impl PathOp {
    /// Every point referenced by the operation, control points included.
    fn points(&self) -> impl Iterator<Item = Point> {
        let (pts, n): ([Point; 3], usize) = match *self {
            PathOp::MoveTo(p) | PathOp::LineTo(p) => ([p, p, p], 1),
            PathOp::CubicCurveTo { to, control1, control2 } => ([control1, control2, to], 3),
            PathOp::QuadCurveTo { to, control } => ([control, to, to], 2),
            PathOp::ClosePath => ([Point::ZERO; 3], 0),
        };
        pts.into_iter().take(n)
    }

    fn map(&self, f: impl Fn(Point) -> Point) -> PathOp {
        match *self {
            PathOp::MoveTo(p) => PathOp::MoveTo(f(p)),
            PathOp::LineTo(p) => PathOp::LineTo(f(p)),
            PathOp::CubicCurveTo { to, control1, control2 } => PathOp::CubicCurveTo {
                to: f(to),
                control1: f(control1),
                control2: f(control2),
            },
            PathOp::QuadCurveTo { to, control } => PathOp::QuadCurveTo { to: f(to), control: f(control) },
            PathOp::ClosePath => PathOp::ClosePath,
        }
    }
}

/// Fill rule used for containment tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// A flattened subpath.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    /// Whether the subpath ended with a `ClosePath`.
    pub closed: bool,
}

/// An ordered, immutable list of path operations.
///
/// A non-empty path always starts with [`PathOp::MoveTo`]; use
/// [`PathBuilder`] to construct one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VectorPath {
    ops: Vec<PathOp>,
}

impl VectorPath {
    /// The empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ellipse inscribed in `rect`, as four cubic quarter arcs.
    pub fn ellipse_in(rect: Rect) -> Self {
        let rx = rect.width / 2.0;
        let ry = rect.height / 2.0;
        let (cx, cy) = (rect.mid_x(), rect.mid_y());
        let (kx, ky) = (rx * KAPPA, ry * KAPPA);
        let (min_x, min_y, max_x, max_y) = (rect.min_x(), rect.min_y(), rect.max_x(), rect.max_y());

        let mut builder = PathBuilder::new();
        builder.move_to(Point::new(max_x, cy));
        builder.cubic_to(Point::new(max_x, cy + ky), Point::new(cx + kx, max_y), Point::new(cx, max_y));
        builder.cubic_to(Point::new(cx - kx, max_y), Point::new(min_x, cy + ky), Point::new(min_x, cy));
        builder.cubic_to(Point::new(min_x, cy - ky), Point::new(cx - kx, min_y), Point::new(cx, min_y));
        builder.cubic_to(Point::new(cx + kx, min_y), Point::new(max_x, cy - ky), Point::new(max_x, cy));
        builder.close();
        builder.build()
    }

    /// Closed rectangle, clockwise from the top-left corner.
    pub fn rect(rect: Rect) -> Self {
        let mut builder = PathBuilder::new();
        builder.move_to(Point::new(rect.min_x(), rect.min_y()));
        builder.line_to(Point::new(rect.max_x(), rect.min_y()));
        builder.line_to(Point::new(rect.max_x(), rect.max_y()));
        builder.line_to(Point::new(rect.min_x(), rect.max_y()));
        builder.close();
        builder.build()
    }

    /// Closed polygon through `points`. Empty input gives the empty path.
    pub fn polygon(points: &[Point]) -> Self {
        let mut builder = PathBuilder::new();
        if let Some((first, rest)) = points.split_first() {
            builder.move_to(*first);
            for p in rest {
                builder.line_to(*p);
            }
            builder.close();
        }
        builder.build()
    }

    /// Concatenate paths, keeping each one's subpaths intact.
    pub fn concat<'a, I>(paths: I) -> Self
    where
        I: IntoIterator<Item = &'a VectorPath>,
    {
        let ops = paths.into_iter().flat_map(|p| p.ops.iter().copied()).collect();
        Self { ops }
    }

    /// The operations in order.
    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Box around every point of the path, control points included.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::enclosing(self.ops.iter().flat_map(|op| op.points()))
    }

    /// Copy of the path with every point mapped through `transform`.
    pub fn transformed(&self, transform: &Transform) -> Self {
        Self {
            ops: self.ops.iter().map(|op| op.map(|p| transform.apply(p))).collect(),
        }
    }

    /// Convert to polylines, one per subpath.
    pub fn flatten(&self) -> Vec<Polyline> {
        let mut polylines = Vec::new();
        let mut current_points: Vec<Point> = Vec::new();
        let mut current = Point::ZERO;
        let mut start = Point::ZERO;

        for op in &self.ops {
            match *op {
                PathOp::MoveTo(p) => {
                    if !current_points.is_empty() {
                        polylines.push(Polyline { points: std::mem::take(&mut current_points), closed: false });
                    }
                    current = p;
                    start = p;
                    current_points.push(p);
                }
                PathOp::LineTo(p) => {
                    current = p;
                    current_points.push(p);
                }
                PathOp::QuadCurveTo { to, control } => {
                    current_points.extend(quad_bezier_points(current, control, to, CURVE_SEGMENTS));
                    current = to;
                }
                PathOp::CubicCurveTo { to, control1, control2 } => {
                    current_points.extend(cubic_bezier_points(current, control1, control2, to, CURVE_SEGMENTS));
                    current = to;
                }
                PathOp::ClosePath => {
                    if !current_points.is_empty() {
                        current_points.push(start);
                        polylines.push(Polyline { points: std::mem::take(&mut current_points), closed: true });
                    }
                    current = start;
                }
            }
        }

        if !current_points.is_empty() {
            polylines.push(Polyline { points: current_points, closed: false });
        }

        polylines
    }

    /// Whether `point` lies inside the filled path.
    ///
    /// Open subpaths are closed implicitly, as a fill would close them.
    pub fn contains(&self, point: Point, rule: FillRule) -> bool {
        let mut winding = 0i32;

        for polyline in self.flatten() {
            let pts = &polyline.points;
            if pts.len() < 2 {
                continue;
            }
            let closing = (pts[pts.len() - 1], pts[0]);
            let edges = pts.windows(2).map(|w| (w[0], w[1])).chain(std::iter::once(closing));

            for (p1, p2) in edges {
                if p1.y <= point.y {
                    if p2.y > point.y && is_left(p1, p2, point) > 0.0 {
                        winding += 1;
                    }
                } else if p2.y <= point.y && is_left(p1, p2, point) < 0.0 {
                    winding -= 1;
                }
            }
        }

        match rule {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => winding % 2 != 0,
        }
    }
}

/// Incremental path construction that keeps the current point.
///
/// Drawing without an open subpath starts one at the current point, and
/// `close` without an open subpath does nothing.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    ops: Vec<PathOp>,
    current: Point,
    start: Point,
    open: bool,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current point (origin before the first operation).
    pub fn current_point(&self) -> Point {
        self.current
    }

    pub fn move_to(&mut self, p: Point) {
        self.ops.push(PathOp::MoveTo(p));
        self.current = p;
        self.start = p;
        self.open = true;
    }

    pub fn line_to(&mut self, p: Point) {
        self.ensure_subpath();
        self.ops.push(PathOp::LineTo(p));
        self.current = p;
    }

    pub fn cubic_to(&mut self, control1: Point, control2: Point, to: Point) {
        self.ensure_subpath();
        self.ops.push(PathOp::CubicCurveTo { to, control1, control2 });
        self.current = to;
    }

    pub fn quad_to(&mut self, control: Point, to: Point) {
        self.ensure_subpath();
        self.ops.push(PathOp::QuadCurveTo { to, control });
        self.current = to;
    }

    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.ops.push(PathOp::ClosePath);
        self.current = self.start;
        self.open = false;
    }

    pub fn build(self) -> VectorPath {
        VectorPath { ops: self.ops }
    }

    fn ensure_subpath(&mut self) {
        if !self.open {
            let p = self.current;
            self.move_to(p);
        }
    }
}

/// Signed area test: > 0 when `p` is left of the edge `a -> b`.
fn is_left(a: Point, b: Point, p: Point) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y)
}

/// Generate points along a cubic bezier curve.
fn cubic_bezier_points(p0: Point, p1: Point, p2: Point, p3: Point, segments: usize) -> Vec<Point> {
    let mut points = Vec::with_capacity(segments);

    for i in 1..=segments {
        let t = i as f32 / segments as f32;
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        let x = mt3 * p0.x + 3.0 * mt2 * t * p1.x + 3.0 * mt * t2 * p2.x + t3 * p3.x;
        let y = mt3 * p0.y + 3.0 * mt2 * t * p1.y + 3.0 * mt * t2 * p2.y + t3 * p3.y;

        points.push(Point::new(x, y));
    }

    points
}

/// Generate points along a quadratic bezier curve.
fn quad_bezier_points(p0: Point, p1: Point, p2: Point, segments: usize) -> Vec<Point> {
    let mut points = Vec::with_capacity(segments);

    for i in 1..=segments {
        let t = i as f32 / segments as f32;
        let mt = 1.0 - t;

        let x = mt * mt * p0.x + 2.0 * mt * t * p1.x + t * t * p2.x;
        let y = mt * mt * p0.y + 2.0 * mt * t * p1.y + t * t * p2.y;

        points.push(Point::new(x, y));
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> VectorPath {
        VectorPath::rect(Rect::new(0.0, 0.0, 100.0, 100.0))
    }

    #[test]
    fn test_builder_synthesizes_move() {
        let mut b = PathBuilder::new();
        b.line_to(Point::new(5.0, 5.0));
        let path = b.build();
        assert_eq!(path.ops(), &[PathOp::MoveTo(Point::ZERO), PathOp::LineTo(Point::new(5.0, 5.0))]);
    }

    #[test]
    fn test_close_without_subpath_is_noop() {
        let mut b = PathBuilder::new();
        b.close();
        assert!(b.build().is_empty());
    }

    #[test]
    fn test_close_resets_current_point() {
        let mut b = PathBuilder::new();
        b.move_to(Point::new(10.0, 10.0));
        b.line_to(Point::new(20.0, 20.0));
        b.close();
        assert_eq!(b.current_point(), Point::new(10.0, 10.0));

        // drawing after a close opens a new subpath at the old start
        b.line_to(Point::new(30.0, 30.0));
        let path = b.build();
        assert_eq!(path.ops()[3], PathOp::MoveTo(Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_ellipse_bounds_are_exact() {
        let path = VectorPath::ellipse_in(Rect::new(150.0, 150.0, 100.0, 100.0));
        assert_eq!(path.bounds(), Some(Rect::new(150.0, 150.0, 100.0, 100.0)));
        assert!(matches!(path.ops()[0], PathOp::MoveTo(_)));
        assert_eq!(path.ops().last(), Some(&PathOp::ClosePath));
    }

    #[test]
    fn test_flatten_square() {
        let polylines = square().flatten();
        assert_eq!(polylines.len(), 1);
        assert!(polylines[0].closed);
        assert_eq!(polylines[0].points.len(), 5);
    }

    #[test]
    fn test_flatten_curve_segments() {
        let mut b = PathBuilder::new();
        b.move_to(Point::ZERO);
        b.quad_to(Point::new(50.0, 100.0), Point::new(100.0, 0.0));
        let polylines = b.build().flatten();
        assert_eq!(polylines[0].points.len(), 1 + CURVE_SEGMENTS);
        assert_eq!(*polylines[0].points.last().unwrap(), Point::new(100.0, 0.0));
    }

    #[test]
    fn test_contains_square() {
        let path = square();
        assert!(path.contains(Point::new(50.0, 50.0), FillRule::NonZero));
        assert!(!path.contains(Point::new(150.0, 50.0), FillRule::NonZero));
    }

    #[test]
    fn test_contains_circle() {
        let path = VectorPath::ellipse_in(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(path.contains(Point::new(50.0, 50.0), FillRule::NonZero));
        assert!(!path.contains(Point::new(5.0, 5.0), FillRule::NonZero));
    }

    #[test]
    fn test_fill_rules_differ_on_nested_squares() {
        let inner = VectorPath::rect(Rect::new(25.0, 25.0, 50.0, 50.0));
        let combined = VectorPath::concat([&square(), &inner]);
        let hole = Point::new(50.0, 50.0);
        assert!(combined.contains(hole, FillRule::NonZero));
        assert!(!combined.contains(hole, FillRule::EvenOdd));
        assert!(combined.contains(Point::new(10.0, 10.0), FillRule::EvenOdd));
    }

    #[test]
    fn test_open_subpath_filled_as_closed() {
        let mut b = PathBuilder::new();
        b.move_to(Point::new(0.0, 0.0));
        b.line_to(Point::new(100.0, 0.0));
        b.line_to(Point::new(100.0, 100.0));
        b.line_to(Point::new(0.0, 100.0));
        assert!(b.build().contains(Point::new(50.0, 50.0), FillRule::NonZero));
    }

    #[test]
    fn test_transformed() {
        let t = Transform::identity().translate(10.0, 0.0).scale(2.0, 2.0);
        let moved = square().transformed(&t);
        assert_eq!(moved.bounds(), Some(Rect::new(10.0, 0.0, 200.0, 200.0)));
    }

    #[test]
    fn test_polygon_empty() {
        assert!(VectorPath::polygon(&[]).is_empty());
    }

    #[test]
    fn test_serialize_ops() {
        let json = serde_json::to_string(&square().ops()[0]).unwrap();
        assert_eq!(json, r#"{"op":"move_to","x":0.0,"y":0.0}"#);
    }
}
