//! [`RegionTracker`], the bookkeeping of which chunks a batch has touched.

use crate::chunking::{ChunkPos, ChunkRect, cube_to_chunk};
use crate::math::Cube;

/// Accumulates the smallest rectangle of chunks containing every cube touched by a batch
/// of mutations, and counts the mutations.
///
/// The rectangle only ever grows until [`reset()`](Self::reset).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct RegionTracker {
    /// [`None`] until the first [`touch()`](Self::touch).
    bounds: Option<ChunkRect>,
    mutation_count: usize,
}

impl RegionTracker {
    /// Constructs an empty tracker.
    pub const fn new() -> Self {
        Self {
            bounds: None,
            mutation_count: 0,
        }
    }

    /// Widens the tracked rectangle to include the chunk containing `cube`.
    #[inline]
    pub fn touch(&mut self, cube: Cube) {
        let chunk = cube_to_chunk(cube);
        self.bounds = Some(match self.bounds {
            None => ChunkRect::single(chunk),
            Some(rect) => rect.including(chunk),
        });
        self.mutation_count += 1;
    }

    /// Returns true iff nothing has been touched since construction or the last reset.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// Number of [`touch()`](Self::touch) calls since construction or the last reset.
    pub fn mutation_count(&self) -> usize {
        self.mutation_count
    }

    /// The rectangle of touched chunks, or [`None`] if nothing was touched.
    pub fn bounds(&self) -> Option<ChunkRect> {
        self.bounds
    }

    /// Returns every chunk in the tracked rectangle.
    ///
    /// The iterator is finite, and since it does not borrow the tracker, calling this again
    /// restarts from the beginning.
    pub fn chunks_in_region(&self) -> impl Iterator<Item = ChunkPos> + Clone + use<> {
        self.bounds.into_iter().flatten()
    }

    /// Forgets all touched chunks and the mutation count.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tracker_after(cubes: &[[i32; 3]]) -> RegionTracker {
        let mut tracker = RegionTracker::new();
        for &cube in cubes {
            tracker.touch(Cube::from(cube));
        }
        tracker
    }

    #[test]
    fn empty() {
        let tracker = RegionTracker::new();
        assert!(tracker.is_empty());
        assert_eq!(tracker.bounds(), None);
        assert_eq!(tracker.chunks_in_region().count(), 0);
    }

    #[test]
    fn minimal_rectangle() {
        let tracker = tracker_after(&[[0, 64, 0], [40, 0, 3], [-5, 200, 20]]);
        assert!(!tracker.is_empty());
        assert_eq!(tracker.mutation_count(), 3);
        let bounds = tracker.bounds().unwrap();
        assert_eq!(bounds.min(), ChunkPos::new(-1, 0));
        assert_eq!(bounds.max(), ChunkPos::new(2, 1));
        assert_eq!(tracker.chunks_in_region().count(), 8);
    }

    #[test]
    fn order_does_not_matter() {
        let cubes = [[3, 0, 3], [-70, 0, 9], [100, 0, -33], [17, 5, 17]];
        let forward = tracker_after(&cubes);
        let mut reversed_cubes = cubes;
        reversed_cubes.reverse();
        let reversed = tracker_after(&reversed_cubes);
        assert_eq!(forward.bounds(), reversed.bounds());
        let bounds = forward.bounds().unwrap();
        for cube in cubes {
            assert!(bounds.contains(cube_to_chunk(Cube::from(cube))));
        }
    }

    #[test]
    fn chunks_in_region_restarts() {
        let tracker = tracker_after(&[[0, 0, 0], [16, 0, 0]]);
        let chunks = tracker.chunks_in_region();
        assert_eq!(
            chunks.clone().collect::<Vec<_>>(),
            vec![ChunkPos::new(0, 0), ChunkPos::new(1, 0)]
        );
        assert_eq!(
            tracker.chunks_in_region().collect::<Vec<_>>(),
            chunks.collect::<Vec<_>>()
        );
    }

    #[test]
    fn reset_forgets() {
        let mut tracker = tracker_after(&[[0, 0, 0]]);
        tracker.reset();
        assert!(tracker.is_empty());
        assert_eq!(tracker.mutation_count(), 0);
    }
}
