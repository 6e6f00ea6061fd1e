//! **depot-geom** — integer grid geometry shared by the *depot* crates.
//!
//! Provides [`Point`] and the half-open rectangle [`Range`] used to address
//! cells of a square cost grid.

pub mod geom;

pub use geom::{Point, Range, RangeIter};
