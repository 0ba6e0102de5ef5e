//! What occupies a cell: [`CellValue`], and how it affects light: [`LightProfile`].

use core::fmt;

/// The largest light level a material can emit or block.
pub const MAX_LIGHT: u8 = 15;

/// Identifies a material (block type) as the host numbers them.
///
/// This crate never interprets the number; it is only passed back to the host's
/// [`GridMutationPort`](crate::GridMutationPort).
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::exhaustive_structs)]
pub struct MaterialId(pub u16);

impl MaterialId {
    /// The empty material, conventionally numbered zero.
    pub const AIR: Self = Self(0);
}

impl fmt::Debug for MaterialId {
    #[mutants::skip] // trivial
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The contents of one cell: a material plus an auxiliary data byte (orientation, color,
/// growth stage, or whatever else the host packs into it).
///
/// Equality is structural.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::exhaustive_structs, clippy::module_name_repetitions)]
pub struct CellValue {
    /// Type of material occupying the cell.
    pub material: MaterialId,
    /// Host-specific auxiliary data.
    pub data: u8,
}

impl CellValue {
    /// An empty cell.
    pub const AIR: Self = Self::new(MaterialId::AIR, 0);

    /// Constructs a [`CellValue`].
    pub const fn new(material: MaterialId, data: u8) -> Self {
        Self { material, data }
    }
}

impl From<MaterialId> for CellValue {
    fn from(material: MaterialId) -> Self {
        Self::new(material, 0)
    }
}

/// How a material affects illumination: the light it gives off and the light it stops.
///
/// Looked up through [`GridMutationPort::light_profile()`](crate::GridMutationPort::light_profile);
/// never modified here.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[allow(clippy::exhaustive_structs)]
pub struct LightProfile {
    /// Light level emitted, `0..=MAX_LIGHT`.
    pub emission: u8,
    /// Light level absorbed when passing through, `0..=MAX_LIGHT`.
    pub blocking: u8,
}

impl LightProfile {
    /// Neither emits nor blocks light.
    pub const TRANSPARENT: Self = Self {
        emission: 0,
        blocking: 0,
    };

    /// Blocks all light and emits none.
    pub const OPAQUE: Self = Self {
        emission: 0,
        blocking: MAX_LIGHT,
    };

    /// Whether replacing a cell with this profile by one with `other` requires the
    /// cell's light to be recomputed.
    pub fn differs_from(self, other: LightProfile) -> bool {
        self.emission != other.emission || self.blocking != other.blocking
    }
}
