//! Grid shortest-path distances for warehouse siting.
//!
//! - **Dijkstra** single- and multi-source distance maps
//!   ([`PathRange::dijkstra_map`]) over any [`WeightedPather`]
//! - [`CostGrid`], a square grid of per-cell entry costs with blocked cells
//! - [`strategic_point`], the per-axis upper median of a point set
//! - [`total_distance`] and [`Siting`], which run one search per source
//!   and sum the distances to a configurable [`Target`]
//!
//! Edge weights are the cost of the cell being entered. Blocked cells are
//! never entered or expanded.

mod cost_grid;
mod dijkstra;
mod distance;
mod pathrange;
mod site;
mod traits;

pub use cost_grid::{BLOCKED, CostGrid, DEFAULT_COST};
pub use distance::manhattan;
pub use pathrange::{PathNode, PathRange, UNREACHABLE};
pub use site::{
    INFEASIBLE, SiteConfig, SiteError, Siting, Target, strategic_point, total_distance,
    total_distance_with,
};
pub use traits::{Pather, WeightedPather};
