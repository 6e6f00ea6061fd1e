//! Warehouse siting: the median "strategic point" and summed grid distances
//! from a list of source points.

use std::fmt;

use depot_geom::{Point, Range};

use crate::cost_grid::CostGrid;
use crate::pathrange::{PathNode, PathRange, UNREACHABLE};

/// Returned by the distance totals when some source cannot reach its target.
pub const INFEASIBLE: i32 = -1;

/// Pick the point whose coordinates are the per-axis upper medians of
/// `points`.
///
/// Both axes are sorted independently and the element at index `len / 2`
/// is taken, so for an even count the larger middle value wins and nothing
/// is averaged. The result need not be one of the input points. Returns
/// `None` for an empty slice.
pub fn strategic_point(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let mid = points.len() / 2;
    let mut xs: Vec<i32> = points.iter().map(|p| p.x).collect();
    let mut ys: Vec<i32> = points.iter().map(|p| p.y).collect();
    let (_, &mut x, _) = xs.select_nth_unstable(mid);
    let (_, &mut y, _) = ys.select_nth_unstable(mid);
    Some(Point::new(x, y))
}

/// Sum the grid distances of `sources` on an `n`×`n` grid with `blocked`
/// cells, using the default [`SiteConfig`].
///
/// With the default [`Target::SourceItself`] every source contributes its
/// distance to itself, so any in-bounds input sums to 0.
pub fn total_distance(n: i32, blocked: &[Point], sources: &[Point]) -> Result<i32, SiteError> {
    total_distance_with(n, blocked, sources, SiteConfig::default())
}

/// Like [`total_distance`], with an explicit configuration.
pub fn total_distance_with(
    n: i32,
    blocked: &[Point],
    sources: &[Point],
    config: SiteConfig,
) -> Result<i32, SiteError> {
    let grid = CostGrid::with_blocked(n, blocked)?;
    Siting::with_config(grid, config).total_distance(sources)
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Which cell each source's distance is measured to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Target {
    /// The source itself, so every contribution is 0.
    #[default]
    SourceItself,
    /// A fixed depot cell.
    Depot(Point),
    /// The [`strategic_point`] of the source list.
    StrategicPoint,
}

/// Options for [`Siting`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SiteConfig {
    pub target: Target,
    /// Searches stop expanding past this cumulative cost.
    pub max_cost: i32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            target: Target::SourceItself,
            max_cost: UNREACHABLE,
        }
    }
}

// ---------------------------------------------------------------------------
// Siting
// ---------------------------------------------------------------------------

/// A cost grid paired with reusable Dijkstra buffers.
pub struct Siting {
    grid: CostGrid,
    pr: PathRange,
    config: SiteConfig,
}

impl Siting {
    /// Create a `Siting` with the default configuration.
    pub fn new(grid: CostGrid) -> Self {
        Self::with_config(grid, SiteConfig::default())
    }

    /// Create a `Siting` that measures distances as `config` says.
    pub fn with_config(grid: CostGrid, config: SiteConfig) -> Self {
        let pr = PathRange::new(grid.range());
        Self { grid, pr, config }
    }

    /// The grid searches run on.
    pub fn grid(&self) -> &CostGrid {
        &self.grid
    }

    /// Run a single-source search from `source` and return every reached
    /// cell with its distance, cheapest first.
    pub fn distance_map(&mut self, source: Point) -> Result<&[PathNode], SiteError> {
        self.grid.checked_index(source)?;
        Ok(self
            .pr
            .dijkstra_map(&self.grid, &[source], self.config.max_cost))
    }

    /// Distance to `p` from the source of the last
    /// [`distance_map`](Self::distance_map) call, or [`UNREACHABLE`].
    pub fn distance_at(&self, p: Point) -> i32 {
        self.pr.dijkstra_at(p)
    }

    /// Run one search per source and sum each source's distance to the
    /// configured [`Target`].
    ///
    /// Returns [`INFEASIBLE`] as soon as one source's target is unreached.
    /// An empty source list sums to 0.
    pub fn total_distance(&mut self, sources: &[Point]) -> Result<i32, SiteError> {
        for &src in sources {
            self.grid.checked_index(src)?;
        }
        let depot = match self.config.target {
            Target::SourceItself => None,
            Target::Depot(p) => Some(p),
            Target::StrategicPoint => strategic_point(sources),
        };
        if let Some(d) = depot {
            self.grid.checked_index(d)?;
        }

        let mut total: i32 = 0;
        for &src in sources {
            self.distance_map(src)?;
            let target = depot.unwrap_or(src);
            let dist = self.distance_at(target);
            if dist == UNREACHABLE {
                log::warn!("no path from {src} to {target}");
                return Ok(INFEASIBLE);
            }
            log::debug!("distance {src} -> {target}: {dist}");
            total = total.checked_add(dist).ok_or(SiteError::Overflow)?;
        }
        Ok(total)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from building a cost grid or querying distances on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteError {
    /// The grid side length was zero or negative.
    EmptyGrid { size: i32 },
    /// A blocked cell, source or depot lies outside the grid.
    OutOfBounds { pos: Point, range: Range },
    /// A cell cost that is not positive.
    InvalidCost { pos: Point, cost: i32 },
    /// The summed distance does not fit in an `i32`.
    Overflow,
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { size } => write!(f, "grid size must be positive, got {size}"),
            Self::OutOfBounds { pos, range } => write!(f, "point {pos} is outside grid {range}"),
            Self::InvalidCost { pos, cost } => {
                write!(f, "invalid cost {cost} at {pos}: costs must be positive")
            }
            Self::Overflow => f.write_str("total distance overflows i32"),
        }
    }
}

impl std::error::Error for SiteError {}
