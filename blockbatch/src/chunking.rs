//! Grouping cubes into the vertical columns (chunks) that viewers are notified about.

use core::fmt;
use core::iter::FusedIterator;

use crate::math::{Cube, GridCoordinate};

/// Horizontal edge length of a chunk, in cubes.
pub const CHUNK_SIZE: GridCoordinate = 16;

/// log2 of [`CHUNK_SIZE`].
const CHUNK_SHIFT: u32 = CHUNK_SIZE.trailing_zeros();

/// Type to distinguish chunk coordinates from cube coordinates.
///
/// A `ChunkPos { x, z }` identifies the full-height column containing the cubes with `x`
/// coordinates in the half-open range `x * CHUNK_SIZE..(x + 1) * CHUNK_SIZE`, and similarly
/// for `z`.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[allow(clippy::exhaustive_structs)]
pub struct ChunkPos {
    #[allow(missing_docs)]
    pub x: GridCoordinate,
    #[allow(missing_docs)]
    pub z: GridCoordinate,
}

impl ChunkPos {
    /// Construct a [`ChunkPos`] from chunk coordinates
    /// (i.e. successive numbers indicate adjacent chunks).
    pub const fn new(x: GridCoordinate, z: GridCoordinate) -> Self {
        Self { x, z }
    }
}

impl fmt::Debug for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { x, z } = *self;
        write!(f, "ChunkPos({x}, {z})")
    }
}

/// Returns the chunk containing the given cube.
///
/// Uses an arithmetic shift, so negative coordinates round toward negative infinity
/// (cube `x = -1` is in chunk `-1`, not chunk `0`).
#[inline]
pub fn cube_to_chunk(cube: Cube) -> ChunkPos {
    ChunkPos {
        x: cube.x >> CHUNK_SHIFT,
        z: cube.z >> CHUNK_SHIFT,
    }
}

/// A nonempty rectangle of chunks, with inclusive bounds on both ends.
///
/// Iterating over a [`ChunkRect`] produces every chunk in it, x-major. Since it is [`Copy`],
/// the same rectangle can be iterated any number of times.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct ChunkRect {
    min: ChunkPos,
    max: ChunkPos,
}

impl ChunkRect {
    /// A rectangle containing exactly one chunk.
    pub const fn single(chunk: ChunkPos) -> Self {
        Self {
            min: chunk,
            max: chunk,
        }
    }

    /// The corner with the lowest coordinates (inclusive).
    pub const fn min(self) -> ChunkPos {
        self.min
    }

    /// The corner with the highest coordinates (inclusive).
    pub const fn max(self) -> ChunkPos {
        self.max
    }

    /// Returns the smallest rectangle containing both `self` and `chunk`.
    #[must_use]
    pub fn including(self, chunk: ChunkPos) -> Self {
        Self {
            min: ChunkPos::new(self.min.x.min(chunk.x), self.min.z.min(chunk.z)),
            max: ChunkPos::new(self.max.x.max(chunk.x), self.max.z.max(chunk.z)),
        }
    }

    /// Returns whether `chunk` is within this rectangle.
    pub fn contains(self, chunk: ChunkPos) -> bool {
        (self.min.x..=self.max.x).contains(&chunk.x) && (self.min.z..=self.max.z).contains(&chunk.z)
    }

    /// Number of chunks in the rectangle.
    pub fn chunk_count(self) -> usize {
        let width = i64::from(self.max.x) - i64::from(self.min.x) + 1;
        let depth = i64::from(self.max.z) - i64::from(self.min.z) + 1;
        usize::try_from(width * depth).unwrap_or(usize::MAX)
    }

    /// Iterate over all chunks in the rectangle.
    pub fn iter(self) -> ChunkRectIter {
        ChunkRectIter {
            rect: self,
            next: Some(self.min),
        }
    }
}

impl fmt::Debug for ChunkRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ChunkRect")
            .field(&(self.min.x..=self.max.x))
            .field(&(self.min.z..=self.max.z))
            .finish()
    }
}

impl IntoIterator for ChunkRect {
    type Item = ChunkPos;
    type IntoIter = ChunkRectIter;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the chunks of a [`ChunkRect`], produced by [`ChunkRect::iter()`].
#[derive(Clone, Debug)]
pub struct ChunkRectIter {
    rect: ChunkRect,
    next: Option<ChunkPos>,
}

impl Iterator for ChunkRectIter {
    type Item = ChunkPos;

    fn next(&mut self) -> Option<ChunkPos> {
        let current = self.next?;
        self.next = if current.z < self.rect.max.z {
            Some(ChunkPos::new(current.x, current.z + 1))
        } else if current.x < self.rect.max.x {
            Some(ChunkPos::new(current.x + 1, self.rect.min.z))
        } else {
            None
        };
        Some(current)
    }
}

impl FusedIterator for ChunkRectIter {}
