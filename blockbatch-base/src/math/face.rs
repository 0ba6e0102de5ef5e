//! Axis-aligned unit vectors: the [`Face6`] type.
//! This module is private but reexported by its parent.

use crate::math::GridVector;

/// Identifies a face of a cube or an orthogonal unit vector.
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, exhaust::Exhaust)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Face6 {
    /// Negative X; the face whose normal vector is `(-1, 0, 0)`.
    NX = 1,
    /// Negative Y; the face whose normal vector is `(0, -1, 0)`; downward.
    NY = 2,
    /// Negative Z; the face whose normal vector is `(0, 0, -1)`.
    NZ = 3,
    /// Positive X; the face whose normal vector is `(1, 0, 0)`.
    PX = 4,
    /// Positive Y; the face whose normal vector is `(0, 1, 0)`; upward.
    PY = 5,
    /// Positive Z; the face whose normal vector is `(0, 0, 1)`.
    PZ = 6,
}

impl Face6 {
    /// All the values of [`Face6`].
    pub const ALL: [Face6; 6] = [
        Face6::NX,
        Face6::NY,
        Face6::NZ,
        Face6::PX,
        Face6::PY,
        Face6::PZ,
    ];

    /// Returns the vector normal to this face, of unit length.
    #[inline]
    pub fn normal_vector(self) -> GridVector {
        match self {
            Face6::NX => GridVector::new(-1, 0, 0),
            Face6::NY => GridVector::new(0, -1, 0),
            Face6::NZ => GridVector::new(0, 0, -1),
            Face6::PX => GridVector::new(1, 0, 0),
            Face6::PY => GridVector::new(0, 1, 0),
            Face6::PZ => GridVector::new(0, 0, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use exhaust::Exhaust as _;
    use pretty_assertions::assert_eq;

    #[test]
    fn all_matches_exhaust() {
        assert_eq!(Face6::exhaust().collect::<Vec<_>>(), Face6::ALL.to_vec());
    }
}
