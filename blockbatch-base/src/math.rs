//! Mathematical utilities and decisions.

use euclid::{Point3D, Vector3D};

mod cube;
pub use cube::Cube;
mod face;
pub use face::*;
mod grid_aab;
pub use grid_aab::*;

// We make an assumption in several places that `usize` is at least 32 bits.
#[cfg(target_pointer_width = "16")]
compile_error!("blockbatch does not support platforms with less than 32-bit `usize`");

/// Coordinates that are locked to the cube grid.
pub type GridCoordinate = i32;

/// Positions that are locked to the cube grid.
///
/// Unlike [`Cube`], this identifies a corner point rather than a whole unit volume.
pub type GridPoint = Point3D<GridCoordinate, Cube>;

/// Vectors that are locked to the cube grid.
pub type GridVector = Vector3D<GridCoordinate, Cube>;
