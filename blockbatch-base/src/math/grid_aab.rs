//! Axis-aligned integer-coordinate box volumes ([`GridAab`]).

use alloc::format;
use alloc::string::String;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::Range;

use crate::math::{Cube, GridCoordinate, GridPoint};

/// An axis-aligned box with integer coordinates, whose volume is no larger than [`usize::MAX`].
///
/// [`GridAab`]s are used to specify the cubes affected by a bulk edit. A [`GridAab`] may have
/// a zero-size range in any direction, thus making its total volume zero.
///
/// The lower bounds are inclusive and the upper bounds are exclusive.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct GridAab {
    lower_bounds: GridPoint,
    upper_bounds: GridPoint,
}

impl GridAab {
    /// Box containing the unit cube from `[0, 0, 0]` to `[1, 1, 1]`.
    pub const ORIGIN_CUBE: GridAab = GridAab {
        lower_bounds: GridPoint::new(0, 0, 0),
        upper_bounds: GridPoint::new(1, 1, 1),
    };

    /// Constructs a [`GridAab`] from inclusive lower bounds and exclusive upper bounds.
    ///
    /// Returns an error if any upper bound is less than its lower bound, or if the
    /// volume would not fit in a [`usize`].
    #[inline]
    pub fn checked_from_lower_upper(
        lower_bounds: impl Into<GridPoint>,
        upper_bounds: impl Into<GridPoint>,
    ) -> Result<Self, GridOverflowError> {
        let lower_bounds = lower_bounds.into();
        let upper_bounds = upper_bounds.into();
        if lower_bounds.x > upper_bounds.x
            || lower_bounds.y > upper_bounds.y
            || lower_bounds.z > upper_bounds.z
        {
            return Err(GridOverflowError(format!(
                "upper bounds {upper:?} must be greater than or equal to lower bounds {lower:?}",
                upper = upper_bounds.to_array(),
                lower = lower_bounds.to_array(),
            )));
        }
        let aab = Self {
            lower_bounds,
            upper_bounds,
        };
        if aab.checked_volume().is_none() {
            return Err(GridOverflowError(format!(
                "volume of {aab:?} is too large"
            )));
        }
        Ok(aab)
    }

    /// Constructs a [`GridAab`] from inclusive lower bounds and exclusive upper bounds.
    ///
    /// Panics if the bounds are inverted; use [`Self::checked_from_lower_upper`] when the
    /// input is not trusted.
    #[track_caller]
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn from_lower_upper(
        lower_bounds: impl Into<GridPoint>,
        upper_bounds: impl Into<GridPoint>,
    ) -> Self {
        match Self::checked_from_lower_upper(lower_bounds, upper_bounds) {
            Ok(aab) => aab,
            Err(e) => panic!("{e}"),
        }
    }

    /// Constructs a [`GridAab`] from inclusive lower bounds and a non-negative size.
    #[track_caller]
    #[inline]
    pub fn from_lower_size(lower_bounds: impl Into<GridPoint>, size: [GridCoordinate; 3]) -> Self {
        let lower_bounds = lower_bounds.into();
        Self::from_lower_upper(
            lower_bounds,
            GridPoint::new(
                lower_bounds.x + size[0],
                lower_bounds.y + size[1],
                lower_bounds.z + size[2],
            ),
        )
    }

    /// Constructs a [`GridAab`] containing exactly one cube.
    #[inline]
    pub fn single_cube(cube: Cube) -> Self {
        Self::from_lower_size(cube.lower_bounds(), [1, 1, 1])
    }

    /// Inclusive lower bounds on cube coordinates.
    #[inline]
    pub fn lower_bounds(&self) -> GridPoint {
        self.lower_bounds
    }

    /// Exclusive upper bounds on cube coordinates.
    #[inline]
    pub fn upper_bounds(&self) -> GridPoint {
        self.upper_bounds
    }

    /// Range of x coordinates of cubes within this box.
    #[inline]
    pub fn x_range(&self) -> Range<GridCoordinate> {
        self.lower_bounds.x..self.upper_bounds.x
    }

    /// Range of y coordinates of cubes within this box.
    #[inline]
    pub fn y_range(&self) -> Range<GridCoordinate> {
        self.lower_bounds.y..self.upper_bounds.y
    }

    /// Range of z coordinates of cubes within this box.
    #[inline]
    pub fn z_range(&self) -> Range<GridCoordinate> {
        self.lower_bounds.z..self.upper_bounds.z
    }

    fn checked_volume(&self) -> Option<usize> {
        let size = self.upper_bounds - self.lower_bounds;
        let x = usize::try_from(size.x).ok()?;
        let y = usize::try_from(size.y).ok()?;
        let z = usize::try_from(size.z).ok()?;
        x.checked_mul(y)?.checked_mul(z)
    }

    /// Computes the volume of this box in cubes, i.e. the number of cubes
    /// [`Self::interior_iter`] will produce.
    #[inline]
    pub fn volume(&self) -> usize {
        // Checked at construction.
        self.checked_volume().unwrap_or(usize::MAX)
    }

    /// Returns whether the box contains no cubes (its volume is zero).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.volume() == 0
    }

    /// Returns whether this box includes the given cube.
    #[inline]
    pub fn contains_cube(&self, cube: Cube) -> bool {
        self.x_range().contains(&cube.x)
            && self.y_range().contains(&cube.y)
            && self.z_range().contains(&cube.z)
    }

    /// Iterate over all cubes that this contains.
    ///
    /// The order of iteration is x-major: the z coordinate varies fastest, then y, then x.
    /// This order is part of the contract, because bulk edits are applied in this order.
    #[inline]
    pub fn interior_iter(self) -> GridIter {
        GridIter {
            aab: self,
            next: if self.is_empty() {
                None
            } else {
                Some(Cube::from(self.lower_bounds))
            },
            remaining: self.volume(),
        }
    }
}

impl fmt::Debug for GridAab {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GridAab")
            .field(&self.x_range())
            .field(&self.y_range())
            .field(&self.z_range())
            .finish()
    }
}

/// Iterator produced by [`GridAab::interior_iter`].
#[derive(Clone, Debug)]
pub struct GridIter {
    aab: GridAab,
    next: Option<Cube>,
    remaining: usize,
}

impl Iterator for GridIter {
    type Item = Cube;

    #[inline]
    fn next(&mut self) -> Option<Cube> {
        let current = self.next?;
        self.remaining -= 1;
        let mut following = current;
        following.z += 1;
        if following.z >= self.aab.upper_bounds.z {
            following.z = self.aab.lower_bounds.z;
            following.y += 1;
            if following.y >= self.aab.upper_bounds.y {
                following.y = self.aab.lower_bounds.y;
                following.x += 1;
            }
        }
        self.next = if following.x >= self.aab.upper_bounds.x {
            None
        } else {
            Some(following)
        };
        Some(current)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
impl ExactSizeIterator for GridIter {}
impl FusedIterator for GridIter {}

/// Error when a [`GridAab`] cannot be constructed from the given input.
#[derive(Clone, Debug, displaydoc::Display, Eq, PartialEq)]
#[displaydoc("{0}")]
pub struct GridOverflowError(String);

impl core::error::Error for GridOverflowError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_is_valid() {
        let aab = GridAab::from_lower_size([1, 2, 3], [0, 1, 1]);
        assert_eq!(aab.volume(), 0);
        assert!(aab.is_empty());
        assert_eq!(aab.interior_iter().count(), 0);
    }

    #[test]
    fn inverted_bounds_is_error() {
        let error = GridAab::checked_from_lower_upper([1, 0, 0], [0, 1, 1]).unwrap_err();
        assert_eq!(
            error.to_string(),
            "upper bounds [0, 1, 1] must be greater than or equal to lower bounds [1, 0, 0]"
        );
    }

    #[test]
    fn interior_iter_order() {
        let cubes: Vec<[i32; 3]> = GridAab::from_lower_size([0, 0, 0], [2, 1, 2])
            .interior_iter()
            .map(<[i32; 3]>::from)
            .collect();
        assert_eq!(cubes, vec![[0, 0, 0], [0, 0, 1], [1, 0, 0], [1, 0, 1]]);
    }

    #[test]
    fn interior_iter_len_matches_volume() {
        let aab = GridAab::from_lower_upper([-3, 60, -5], [4, 65, 9]);
        let iter = aab.interior_iter();
        assert_eq!(iter.len(), aab.volume());
        assert_eq!(iter.filter(|&c| aab.contains_cube(c)).count(), 7 * 5 * 14);
    }
}
