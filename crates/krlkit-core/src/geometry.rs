//! Geometry primitives shared across the pipeline.
//!
//! All contour coordinates are in image pixel space (x = column, y = row,
//! origin at the top-left) until the layout engine maps them into the
//! physical paper frame. Every stage takes borrowed input and returns new
//! owned values; nothing here is mutated in place across stages.

use serde::{Deserialize, Serialize};

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Winding orientation of a closed contour in image coordinates
/// (y grows downward).
///
/// Classified from the sign of the shoelace sum
/// `Σ (x[i+1] - x[i]) * (y[i+1] + y[i])`: a sum >= 0 is [`Orientation::Cw`],
/// a negative sum is [`Orientation::Ccw`]. Downstream filtering relies on
/// this sign convention, not on area magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Clockwise (shoelace sum >= 0). Outer boundaries in the tracer's
    /// output convention.
    Cw,
    /// Counter-clockwise (shoelace sum < 0).
    Ccw,
}

/// An ordered sequence of points approximating an edge boundary.
///
/// Invariant: holds at least one point. May be open or closed; closed
/// contours repeat (approximately) their first point at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour(Vec<Point>);

impl Contour {
    /// Create a contour from a vector of points.
    ///
    /// # Panics
    ///
    /// Panics if `points` is empty; a contour always holds at least one
    /// point. Callers build contours from tracer output, which never
    /// produces empty sequences.
    pub fn new(points: Vec<Point>) -> Self {
        assert!(!points.is_empty(), "a contour must hold at least one point");
        Self(points)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn into_points(self) -> Vec<Point> {
        self.0
    }

    pub fn first(&self) -> Point {
        self.0[0]
    }

    pub fn last(&self) -> Point {
        self.0[self.0.len() - 1]
    }

    /// Whether first and last point coincide within `tolerance`.
    pub fn is_closed(&self, tolerance: f64) -> bool {
        self.len() > 1 && self.first().distance_to(&self.last()) <= tolerance
    }

    /// Shoelace sum `Σ (x[i+1] - x[i]) * (y[i+1] + y[i])` over consecutive
    /// point pairs. Twice the signed area, sign per [`Orientation`].
    pub fn shoelace_sum(&self) -> f64 {
        self.0
            .windows(2)
            .map(|w| (w[1].x - w[0].x) * (w[1].y + w[0].y))
            .sum()
    }

    /// Winding orientation from the shoelace sum sign.
    pub fn orientation(&self) -> Orientation {
        if self.shoelace_sum() >= 0.0 {
            Orientation::Cw
        } else {
            Orientation::Ccw
        }
    }

    /// Total polyline length (sum of segment lengths).
    pub fn arc_length(&self) -> f64 {
        self.0.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
    }

    /// Axis-aligned bounding box over all points.
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::at(self.0[0]);
        for p in &self.0[1..] {
            bbox.include(*p);
        }
        bbox
    }
}

/// An ordered collection of contours.
///
/// Order is discovery order from the tracer; filtering preserves relative
/// order. The index is the stable identity used in diagnostics
/// ("Contour 3") until a reordering operation is explicitly applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContourSet(Vec<Contour>);

impl ContourSet {
    pub fn new(contours: Vec<Contour>) -> Self {
        Self(contours)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, contour: Contour) {
        self.0.push(contour);
    }

    pub fn contours(&self) -> &[Contour] {
        &self.0
    }

    pub fn into_contours(self) -> Vec<Contour> {
        self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contour> {
        self.0.iter()
    }

    /// Bounding box over the union of all contour points, or `None` for an
    /// empty set (the box is undefined).
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut iter = self.0.iter();
        let mut bbox = iter.next()?.bounding_box();
        for contour in iter {
            bbox.merge(&contour.bounding_box());
        }
        Some(bbox)
    }
}

impl IntoIterator for ContourSet {
    type Item = Contour;
    type IntoIter = std::vec::IntoIter<Contour>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<Contour> for ContourSet {
    fn from_iter<I: IntoIterator<Item = Contour>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// A degenerate box containing a single point.
    pub const fn at(p: Point) -> Self {
        Self {
            min_x: p.x,
            min_y: p.y,
            max_x: p.x,
            max_y: p.y,
        }
    }

    /// Grow the box to contain `p`.
    pub fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Grow the box to contain another box.
    pub fn merge(&mut self, other: &BoundingBox) {
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Whether `p` lies inside the box expanded by `tolerance` on all sides.
    pub fn contains(&self, p: Point, tolerance: f64) -> bool {
        p.x >= self.min_x - tolerance
            && p.x <= self.max_x + tolerance
            && p.y >= self.min_y - tolerance
            && p.y <= self.max_y + tolerance
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_cw() -> Contour {
        // In image coordinates (y down) this traversal yields a
        // non-negative shoelace sum.
        Contour::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(0.0, 0.0),
        ])
    }

    #[test]
    fn test_square_orientation_is_cw() {
        assert_eq!(square_cw().orientation(), Orientation::Cw);
    }

    #[test]
    fn test_reversed_square_is_ccw() {
        let mut pts = square_cw().into_points();
        pts.reverse();
        assert_eq!(Contour::new(pts).orientation(), Orientation::Ccw);
    }

    #[test]
    fn test_orientation_stable_under_translation_and_scale() {
        let base = square_cw();
        let orientation = base.orientation();
        for (dx, dy, s) in [(5.0, -3.0, 1.0), (-100.0, 42.0, 0.25), (0.0, 0.0, 7.5)] {
            let moved = Contour::new(
                base.points()
                    .iter()
                    .map(|p| Point::new(p.x * s + dx, p.y * s + dy))
                    .collect(),
            );
            assert_eq!(moved.orientation(), orientation);
        }
    }

    #[test]
    fn test_arc_length() {
        let c = Contour::new(vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(3.0, 4.0),
        ]);
        assert!((c.arc_length() - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_is_closed() {
        assert!(square_cw().is_closed(1e-9));
        let open = Contour::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
        assert!(!open.is_closed(1e-9));
    }

    #[test]
    fn test_set_bounding_box_union() {
        let set = ContourSet::new(vec![
            Contour::new(vec![Point::new(0.0, 0.0), Point::new(2.0, 1.0)]),
            Contour::new(vec![Point::new(-1.0, 5.0)]),
        ]);
        let bbox = set.bounding_box().unwrap();
        assert_eq!(bbox.min_x, -1.0);
        assert_eq!(bbox.min_y, 0.0);
        assert_eq!(bbox.max_x, 2.0);
        assert_eq!(bbox.max_y, 5.0);
    }

    #[test]
    fn test_empty_set_has_no_bounding_box() {
        assert!(ContourSet::default().bounding_box().is_none());
    }

    #[test]
    #[should_panic(expected = "at least one point")]
    fn test_empty_contour_panics() {
        let _ = Contour::new(vec![]);
    }
}
