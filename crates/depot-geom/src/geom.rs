//! Geometry primitives: [`Point`] and [`Range`].

use std::fmt;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer grid coordinate.
///
/// `x` is the first index of a cell and `y` the second, so a cell listed as
/// `[row, col]` maps to `Point::new(row, col)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The four cardinal neighbours: x - 1, x + 1, y - 1, y + 1.
    #[inline]
    pub fn neighbors_4(self) -> [Point; 4] {
        [
            Self::new(self.x - 1, self.y),
            Self::new(self.x + 1, self.y),
            Self::new(self.x, self.y - 1),
            Self::new(self.x, self.y + 1),
        ]
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    /// Row-major on `x` first, matching the order cells are scanned in.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.x.cmp(&other.x).then(self.y.cmp(&other.y))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<[i32; 2]> for Point {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max). `min` is inclusive, `max` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Create a new range from two corners, canonicalized so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// The `n`×`n` range anchored at the origin. Empty for `n <= 0`.
    #[inline]
    pub fn square(n: i32) -> Self {
        let n = n.max(0);
        Self::new(0, 0, n, n)
    }

    /// Extent along the x axis.
    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    /// Extent along the y axis.
    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Total number of cells in the range.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.height() as usize)
    }

    /// Whether the range has zero or negative area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Whether `p` is inside the half-open range.
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Scan-order iterator over every point in the range: `y` varies
    /// fastest, then `x`.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;
    #[inline]
    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// RangeIter
// ---------------------------------------------------------------------------

/// Scan-order iterator over the points in a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    cur: Point,
}

impl Iterator for RangeIter {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.cur.x >= self.range.max.x || self.range.is_empty() {
            return None;
        }
        let p = self.cur;
        self.cur.y += 1;
        if self.cur.y >= self.range.max.y {
            self.cur.y = self.range.min.y;
            self.cur.x += 1;
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.range.is_empty() || self.cur.x >= self.range.max.x {
            return (0, Some(0));
        }
        let h = self.range.height() as usize;
        let remaining_in_row = (self.range.max.y - self.cur.y) as usize;
        let remaining_rows = (self.range.max.x - self.cur.x - 1) as usize;
        let total = remaining_in_row + remaining_rows * h;
        (total, Some(total))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_conversions() {
        assert_eq!(Point::from((3, 4)), Point::new(3, 4));
        assert_eq!(Point::from([7, -1]), Point::new(7, -1));
    }

    #[test]
    fn point_order_is_x_major() {
        let mut pts = vec![Point::new(1, 0), Point::new(0, 5), Point::new(0, 1)];
        pts.sort();
        assert_eq!(
            pts,
            vec![Point::new(0, 1), Point::new(0, 5), Point::new(1, 0)]
        );
    }

    #[test]
    fn neighbors_are_cardinal() {
        let n = Point::new(2, 2).neighbors_4();
        assert!(n.contains(&Point::new(1, 2)));
        assert!(n.contains(&Point::new(3, 2)));
        assert!(n.contains(&Point::new(2, 1)));
        assert!(n.contains(&Point::new(2, 3)));
    }

    #[test]
    fn range_basics() {
        let r = Range::new(0, 0, 3, 2);
        assert_eq!((r.width(), r.height()), (3, 2));
        assert!(!r.is_empty());
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(2, 1)));
        assert!(!r.contains(Point::new(3, 0)));
        assert!(!r.contains(Point::new(0, 2)));
        assert!(!r.contains(Point::new(-1, 0)));
    }

    #[test]
    fn range_auto_canonicalize() {
        let r = Range::new(3, 2, 0, 0);
        assert_eq!(r.min, Point::new(0, 0));
        assert_eq!(r.max, Point::new(3, 2));
    }

    #[test]
    fn square_range() {
        let r = Range::square(5);
        assert_eq!(r.len(), 25);
        assert!(r.contains(Point::new(4, 4)));
        assert!(!r.contains(Point::new(5, 0)));
        assert!(Range::square(0).is_empty());
        assert!(Range::square(-3).is_empty());
    }

    #[test]
    fn range_iter_scan_order() {
        let r = Range::new(0, 0, 2, 3);
        let pts: Vec<_> = r.iter().collect();
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[0], Point::new(0, 0));
        assert_eq!(pts[1], Point::new(0, 1));
        assert_eq!(pts[3], Point::new(1, 0));
        assert_eq!(pts[5], Point::new(1, 2));
        assert_eq!(r.iter().len(), 6);
    }

    #[test]
    fn empty_range_iter() {
        let r = Range::new(0, 0, 0, 0);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.iter().count(), 0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn point_json_shape() {
        let json = serde_json::to_string(&Point::new(3, 7)).unwrap();
        assert_eq!(json, r#"{"x":3,"y":7}"#);
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Point::new(3, 7));
    }

    #[test]
    fn range_round_trip() {
        let r = Range::square(9);
        let json = serde_json::to_string(&r).unwrap();
        let back: Range = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
