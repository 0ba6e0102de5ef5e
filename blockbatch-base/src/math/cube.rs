use core::fmt;
use core::ops;

use crate::math::{Face6, GridCoordinate, GridPoint, GridVector};
use crate::util::ConciseDebug;

/// “A cube”, in this documentation, is a single cell of the world grid: a unit cube whose
/// corners' coordinates are integers. This type identifies such a cube by the coordinates
/// of its most negative corner.
///
/// The valid coordinate range is that of [`GridCoordinate`]. The vertical extent of an
/// actual world is smaller, but that bound belongs to the host, not to this type.
///
/// # Why have a dedicated type for this?
///
/// * To avoid confusion between points (zero size) and cubes (nonzero size).
/// * To avoid confusion between cube coordinates and chunk coordinates, which are both
///   integer pairs or triples.
#[derive(Clone, Copy, Eq, PartialEq)]
#[allow(missing_docs, clippy::exhaustive_structs)]
pub struct Cube {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl core::hash::Hash for Cube {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        // Hashers work on 64-bit quantities.
        // Therefore, it may be more efficient to provide fewer inputs by packing the data into
        // chunks of at most 64 bits.
        (u64::from(self.x.cast_unsigned()) ^ (u64::from(self.y.cast_unsigned()) << 32)).hash(state);
        self.z.hash(state);
    }
}

impl Cube {
    /// Equal to `Cube::new(0, 0, 0)`.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Construct `Cube { x, y, z }` from the given coordinates.
    #[inline]
    pub const fn new(x: GridCoordinate, y: GridCoordinate, z: GridCoordinate) -> Self {
        Self { x, y, z }
    }

    /// Returns the corner of this cube with the most negative coordinates.
    #[inline]
    pub fn lower_bounds(self) -> GridPoint {
        GridPoint::new(self.x, self.y, self.z)
    }

    /// Returns the cube adjacent to this one across the given face.
    ///
    /// Panics on overflow when overflow checks are enabled, like any other arithmetic.
    #[inline]
    pub fn adjacent(self, face: Face6) -> Self {
        self + face.normal_vector()
    }

    /// Returns the six cubes which share a face with this one, in the order of
    /// [`Face6::ALL`].
    #[inline]
    pub fn neighbors(self) -> impl ExactSizeIterator<Item = Cube> + Clone {
        Face6::ALL.into_iter().map(move |face| self.adjacent(face))
    }
}

impl fmt::Debug for Cube {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { x, y, z } = self;
        write!(f, "({x:+?}, {y:+?}, {z:+?})")
    }
}
impl manyfmt::Fmt<ConciseDebug> for Cube {
    #[mutants::skip] // trivial
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<Cube> for [GridCoordinate; 3] {
    #[inline]
    fn from(Cube { x, y, z }: Cube) -> [GridCoordinate; 3] {
        [x, y, z]
    }
}
impl From<[GridCoordinate; 3]> for Cube {
    #[inline]
    fn from([x, y, z]: [GridCoordinate; 3]) -> Self {
        Self { x, y, z }
    }
}
impl From<GridPoint> for Cube {
    #[inline]
    fn from(GridPoint { x, y, z, .. }: GridPoint) -> Self {
        Self { x, y, z }
    }
}

impl ops::Add<GridVector> for Cube {
    type Output = Self;
    #[inline]
    fn add(self, rhs: GridVector) -> Self::Output {
        Self::from(self.lower_bounds() + rhs)
    }
}
impl ops::AddAssign<GridVector> for Cube {
    #[inline]
    fn add_assign(&mut self, rhs: GridVector) {
        *self = *self + rhs;
    }
}
impl ops::Sub<GridVector> for Cube {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: GridVector) -> Self::Output {
        Self::from(self.lower_bounds() - rhs)
    }
}
impl ops::Sub<Cube> for Cube {
    type Output = GridVector;
    #[inline]
    fn sub(self, rhs: Cube) -> Self::Output {
        self.lower_bounds() - rhs.lower_bounds()
    }
}
