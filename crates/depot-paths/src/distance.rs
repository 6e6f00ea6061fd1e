use depot_geom::Point;

/// Manhattan (L1) distance between two points.
///
/// On an unblocked grid of unit costs this is the exact 4-directional
/// shortest-path length, and a lower bound otherwise.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
