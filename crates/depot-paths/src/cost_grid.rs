//! A square grid of traversal costs.
//!
//! Every cell holds either a positive cost, paid when a path steps *onto*
//! the cell, or the [`BLOCKED`] sentinel.

use depot_geom::{Point, Range};

use crate::site::SiteError;
use crate::traits::{Pather, WeightedPather};

/// Cost sentinel for a cell that can never be entered or left.
pub const BLOCKED: i32 = -1;

/// Cost of an ordinary open cell.
pub const DEFAULT_COST: i32 = 1;

/// An `n`×`n` grid of cell costs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostGrid {
    range: Range,
    cells: Vec<i32>,
}

impl CostGrid {
    /// Create an `n`×`n` grid with every cell at [`DEFAULT_COST`].
    pub fn new(n: i32) -> Result<Self, SiteError> {
        if n <= 0 {
            return Err(SiteError::EmptyGrid { size: n });
        }
        let range = Range::square(n);
        Ok(Self {
            range,
            cells: vec![DEFAULT_COST; range.len()],
        })
    }

    /// Create an `n`×`n` grid and block every cell in `blocked`.
    pub fn with_blocked(n: i32, blocked: &[Point]) -> Result<Self, SiteError> {
        let mut grid = Self::new(n)?;
        for &p in blocked {
            grid.block(p)?;
        }
        Ok(grid)
    }

    /// The bounding range, `[0, n)` on both axes.
    pub fn range(&self) -> Range {
        self.range
    }

    /// Side length of the grid.
    pub fn size(&self) -> i32 {
        self.range.width()
    }

    /// Whether `p` lies inside the grid.
    pub fn contains(&self, p: Point) -> bool {
        self.range.contains(p)
    }

    /// Cost stored at `p`, or `None` if out of bounds. Blocked cells report
    /// [`BLOCKED`].
    pub fn cost_at(&self, p: Point) -> Option<i32> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Whether `p` is blocked. Out-of-bounds points count as blocked.
    pub fn is_blocked(&self, p: Point) -> bool {
        self.cost_at(p).is_none_or(|c| c == BLOCKED)
    }

    /// Mark `p` as blocked.
    pub fn block(&mut self, p: Point) -> Result<(), SiteError> {
        let i = self.checked_index(p)?;
        self.cells[i] = BLOCKED;
        Ok(())
    }

    /// Set the cost of entering `p`. The cost must be positive; use
    /// [`block`](Self::block) to make a cell impassable.
    pub fn set_cost(&mut self, p: Point, cost: i32) -> Result<(), SiteError> {
        if cost <= 0 {
            return Err(SiteError::InvalidCost { pos: p, cost });
        }
        let i = self.checked_index(p)?;
        self.cells[i] = cost;
        Ok(())
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == BLOCKED).count()
    }

    pub(crate) fn checked_index(&self, p: Point) -> Result<usize, SiteError> {
        self.index(p).ok_or(SiteError::OutOfBounds {
            pos: p,
            range: self.range,
        })
    }

    fn index(&self, p: Point) -> Option<usize> {
        cell_index(self.range, p)
    }
}

/// Flat x-major index of `p` in `range`, computed in `usize` so that grids
/// with more than `i32::MAX` cells do not overflow.
fn cell_index(range: Range, p: Point) -> Option<usize> {
    if !range.contains(p) {
        return None;
    }
    let x = (p.x - range.min.x) as usize;
    let y = (p.y - range.min.y) as usize;
    Some(x * range.height() as usize + y)
}

impl Pather for CostGrid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        if self.is_blocked(p) {
            return;
        }
        buf.extend(p.neighbors_4().into_iter().filter(|&n| !self.is_blocked(n)));
    }
}

impl WeightedPather for CostGrid {
    fn cost(&self, _from: Point, to: Point) -> i32 {
        self.cost_at(to).unwrap_or(BLOCKED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_open() {
        let g = CostGrid::new(5).unwrap();
        assert_eq!(g.size(), 5);
        assert_eq!(g.blocked_count(), 0);
        assert!(g.range().iter().all(|p| g.cost_at(p) == Some(DEFAULT_COST)));
    }

    #[test]
    fn empty_grid_is_rejected() {
        assert_eq!(CostGrid::new(0), Err(SiteError::EmptyGrid { size: 0 }));
        assert!(CostGrid::new(-2).is_err());
    }

    #[test]
    fn blocking_cells() {
        let blocked = [Point::new(1, 2), Point::new(2, 2), Point::new(3, 3)];
        let g = CostGrid::with_blocked(5, &blocked).unwrap();
        assert_eq!(g.blocked_count(), 3);
        assert!(g.is_blocked(Point::new(2, 2)));
        assert!(!g.is_blocked(Point::new(2, 1)));
        assert_eq!(g.cost_at(Point::new(3, 3)), Some(BLOCKED));
    }

    #[test]
    fn out_of_bounds_block_is_an_error() {
        let err = CostGrid::with_blocked(3, &[Point::new(3, 0)]).unwrap_err();
        assert_eq!(
            err,
            SiteError::OutOfBounds {
                pos: Point::new(3, 0),
                range: Range::square(3),
            }
        );
        assert!(CostGrid::new(3).unwrap().is_blocked(Point::new(-1, 0)));
    }

    #[test]
    fn set_cost_validation() {
        let mut g = CostGrid::new(3).unwrap();
        g.set_cost(Point::new(1, 1), 4).unwrap();
        assert_eq!(g.cost_at(Point::new(1, 1)), Some(4));
        assert!(matches!(
            g.set_cost(Point::new(1, 1), 0),
            Err(SiteError::InvalidCost { cost: 0, .. })
        ));
        assert!(g.set_cost(Point::new(0, 5), 2).is_err());
    }

    #[test]
    fn cell_index_is_x_major() {
        let r = Range::square(3);
        assert_eq!(cell_index(r, Point::new(0, 0)), Some(0));
        assert_eq!(cell_index(r, Point::new(0, 2)), Some(2));
        assert_eq!(cell_index(r, Point::new(1, 0)), Some(3));
        assert_eq!(cell_index(r, Point::new(2, 2)), Some(8));
        assert_eq!(cell_index(r, Point::new(3, 0)), None);
    }

    #[test]
    fn cell_index_past_i32_range() {
        // 59_999 * 60_000 does not fit in an i32.
        let r = Range::square(60_000);
        let last = Point::new(59_999, 59_999);
        assert_eq!(cell_index(r, last), Some(60_000 * 60_000 - 1));
        assert_eq!(cell_index(r, Point::new(59_999, 0)), Some(3_599_940_000));
    }

    #[test]
    fn neighbors_skip_blocked_and_edges() {
        let g = CostGrid::with_blocked(3, &[Point::new(0, 1)]).unwrap();
        let mut buf = Vec::new();
        g.neighbors(Point::new(0, 0), &mut buf);
        assert_eq!(buf, vec![Point::new(1, 0)]);

        buf.clear();
        g.neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(buf.len(), 3);
        assert!(!buf.contains(&Point::new(0, 1)));

        buf.clear();
        g.neighbors(Point::new(0, 1), &mut buf);
        assert!(buf.is_empty());
    }
}
