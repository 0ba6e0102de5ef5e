//! [`RelightQueue`], the cells waiting for their light to be recomputed.

use alloc::collections::VecDeque;

use crate::math::Cube;
use crate::session::StateError;

/// First-in first-out queue of cells whose light must be recomputed.
///
/// The same cell may be present more than once, if it was changed more than once; each entry
/// is processed separately.
///
/// Capacity may be reserved up front with [`reserve()`](Self::reserve), but only until the
/// first [`enqueue()`](Self::enqueue); after that the queue grows on its own and refuses
/// further reservations until it is [`reset()`](Self::reset).
#[derive(Clone, Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct RelightQueue {
    cells: VecDeque<Cube>,
    /// Set by the first enqueue; the backing storage may not be resized while set.
    in_use: bool,
}

impl RelightQueue {
    /// Constructs an empty queue with no reserved capacity.
    pub const fn new() -> Self {
        Self {
            cells: VecDeque::new(),
            in_use: false,
        }
    }

    /// Adds `cube` to the end of the queue.
    #[inline]
    pub fn enqueue(&mut self, cube: Cube) {
        self.in_use = true;
        self.cells.push_back(cube);
    }

    /// Removes and returns the cube at the front of the queue.
    #[inline]
    pub fn dequeue(&mut self) -> Option<Cube> {
        self.cells.pop_front()
    }

    /// Returns the number of entries currently in the queue.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns whether the queue has no entries.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns whether anything has been enqueued since construction or the last reset.
    pub fn is_in_use(&self) -> bool {
        self.in_use
    }

    /// Reserves capacity for at least `additional` entries.
    ///
    /// Fails with [`StateError::BufferInUse`] once anything has been enqueued.
    pub fn reserve(&mut self, additional: usize) -> Result<(), StateError> {
        if self.in_use {
            return Err(StateError::BufferInUse);
        }
        self.cells.reserve(additional);
        Ok(())
    }

    /// Discards all entries and allows [`reserve()`](Self::reserve) again.
    /// Allocated capacity is kept.
    pub fn reset(&mut self) {
        self.cells.clear();
        self.in_use = false;
    }
}
