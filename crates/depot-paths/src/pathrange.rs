use depot_geom::{Point, Range};

/// A position with an associated cost, returned from Dijkstra map queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub cost: i32,
}

// ---------------------------------------------------------------------------
// Internal node for the Dijkstra priority-queue search
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

/// Reference into the node array, ordered by `g` for use in `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) g: i32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest g first; equal costs
        // settle in scan order (lowest flat index first).
        other.g.cmp(&self.g).then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Sentinel value meaning "unreachable" in Dijkstra maps.
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// PathRange
// ---------------------------------------------------------------------------

/// Owner of the Dijkstra scratch buffers for one grid rectangle.
///
/// `PathRange` keeps its node array, distance map and result list alive
/// between queries, so running one search per source point allocates only
/// on the first call.
pub struct PathRange {
    pub(crate) rng: Range,
    pub(crate) height: usize,
    pub(crate) dijkstra_nodes: Vec<Node>,
    pub(crate) dijkstra_generation: u32,
    pub(crate) dijkstra_results: Vec<PathNode>,
    pub(crate) dijkstra_map: Vec<i32>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl PathRange {
    /// Create a new `PathRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        let h = rng.height().max(0) as usize;
        let len = rng.len();
        Self {
            rng,
            height: h,
            dijkstra_nodes: vec![Node::default(); len],
            dijkstra_generation: 0,
            dijkstra_results: Vec::new(),
            dijkstra_map: vec![UNREACHABLE; len],
            nbuf: Vec::with_capacity(4),
        }
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat scan-order index. Returns `None` if out of
    /// range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(x * self.height + y)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx / self.height) as i32 + self.rng.min.x;
        let y = (idx % self.height) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn idx_follows_scan_order() {
        let pr = PathRange::new(Range::square(4));
        let flat: Vec<usize> = Range::square(4)
            .iter()
            .map(|p| pr.idx(p).unwrap())
            .collect();
        assert_eq!(flat, (0..16).collect::<Vec<_>>());
        for i in 0..16 {
            assert_eq!(pr.idx(pr.point(i)), Some(i));
        }
    }

    #[test]
    fn idx_rejects_outside_points() {
        let pr = PathRange::new(Range::new(2, 2, 5, 6));
        assert_eq!(pr.idx(Point::new(2, 2)), Some(0));
        assert_eq!(pr.idx(Point::new(1, 2)), None);
        assert_eq!(pr.idx(Point::new(5, 2)), None);
        assert_eq!(pr.point(5), Point::new(3, 3));
    }

    #[test]
    fn heap_pops_lowest_cost_then_scan_order() {
        let mut heap = BinaryHeap::new();
        heap.push(NodeRef { idx: 7, g: 2 });
        heap.push(NodeRef { idx: 3, g: 1 });
        heap.push(NodeRef { idx: 1, g: 2 });
        heap.push(NodeRef { idx: 9, g: 0 });
        let mut order = Vec::new();
        while let Some(n) = heap.pop() {
            order.push(n.idx);
        }
        assert_eq!(order, vec![9, 3, 1, 7]);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn pathnode_round_trip() {
        let node = PathNode {
            pos: Point::new(3, 7),
            cost: 42,
        };
        let json = serde_json::to_string(&node).unwrap();
        let back: PathNode = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }
}
