//! Cartesian grid construction and the radius-sorted cell index.
//!
//! The verification problem is radially symmetric, but PISM consumes a
//! Cartesian grid. This module provides:
//! - **Cartesian grid**: square `Mx × Mx` coordinate grid over `[-Lx, Lx]`
//! - **Radial index**: every cell sorted by distance from the origin while
//!   retaining its `(row, col)` identity, so per-radius quantities can be
//!   scattered back onto the grid without mislabeling any cell

mod cartesian;
mod radial;

pub use cartesian::{CartesianGrid, Field2D, GridError};
pub use radial::{RadialIndex, RadiusRecord};
