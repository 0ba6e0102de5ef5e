//! [`GridMutationPort`], the capabilities the host world engine provides to this crate.

use core::error::Error;

use crate::cell::{CellValue, LightProfile, MaterialId};
use crate::chunking::ChunkPos;
use crate::math::Cube;

/// Access to one world of the host engine, at the level of fast, unchecked cell writes and
/// individual lighting primitives.
///
/// There is one implementation of this trait per supported host version; which one is in use
/// is decided once, at startup (see [`crate::adapter`]). Everything in this crate treats the
/// host as authoritative: errors are passed through unchanged and never retried.
///
/// Implementations which cannot perform some operation on the running host version should
/// fail with their own error type, typically wrapping [`Unsupported`].
#[allow(clippy::module_name_repetitions)]
pub trait GridMutationPort {
    /// Error produced by the host. This crate never wraps or reinterprets it.
    type Error: Error + 'static;

    /// Stores `value` in the cell at `cube`, bypassing the host's own lighting and
    /// viewer-update side effects.
    ///
    /// Returns whether the stored value actually changed, by whatever definition the host
    /// uses; callers receive that answer verbatim.
    fn write_fast(&mut self, cube: Cube, value: CellValue) -> Result<bool, Self::Error>;

    /// Returns the material currently occupying `cube`.
    fn material_at(&self, cube: Cube) -> Result<MaterialId, Self::Error>;

    /// Returns the light level emitted by `material`.
    fn light_emission(&self, material: MaterialId) -> Result<u8, Self::Error>;

    /// Returns the light level blocked by `material`.
    fn light_blocking(&self, material: MaterialId) -> Result<u8, Self::Error>;

    /// Returns both lighting properties of `material`.
    fn light_profile(&self, material: MaterialId) -> Result<LightProfile, Self::Error> {
        Ok(LightProfile {
            emission: self.light_emission(material)?,
            blocking: self.light_blocking(material)?,
        })
    }

    /// Recomputes and propagates the light level at `cube`. May be arbitrarily expensive.
    fn recompute_light(&mut self, cube: Cube) -> Result<(), Self::Error>;

    /// Returns true if none of the six face-adjacent neighbors of `cube` lets light through,
    /// in which case recomputing its light cannot change anything visible.
    fn is_fully_enclosed(&self, cube: Cube) -> Result<bool, Self::Error>;

    /// Asks the host to resend the visual state of one chunk to all viewers near it.
    fn notify_viewers_of_chunk(&mut self, chunk: ChunkPos) -> Result<(), Self::Error>;
}

impl<P: ?Sized + GridMutationPort> GridMutationPort for &mut P {
    type Error = P::Error;

    fn write_fast(&mut self, cube: Cube, value: CellValue) -> Result<bool, Self::Error> {
        (**self).write_fast(cube, value)
    }
    fn material_at(&self, cube: Cube) -> Result<MaterialId, Self::Error> {
        (**self).material_at(cube)
    }
    fn light_emission(&self, material: MaterialId) -> Result<u8, Self::Error> {
        (**self).light_emission(material)
    }
    fn light_blocking(&self, material: MaterialId) -> Result<u8, Self::Error> {
        (**self).light_blocking(material)
    }
    fn light_profile(&self, material: MaterialId) -> Result<LightProfile, Self::Error> {
        (**self).light_profile(material)
    }
    fn recompute_light(&mut self, cube: Cube) -> Result<(), Self::Error> {
        (**self).recompute_light(cube)
    }
    fn is_fully_enclosed(&self, cube: Cube) -> Result<bool, Self::Error> {
        (**self).is_fully_enclosed(cube)
    }
    fn notify_viewers_of_chunk(&mut self, chunk: ChunkPos) -> Result<(), Self::Error> {
        (**self).notify_viewers_of_chunk(chunk)
    }
}

impl<P: ?Sized + GridMutationPort> GridMutationPort for Box<P> {
    type Error = P::Error;

    fn write_fast(&mut self, cube: Cube, value: CellValue) -> Result<bool, Self::Error> {
        (**self).write_fast(cube, value)
    }
    fn material_at(&self, cube: Cube) -> Result<MaterialId, Self::Error> {
        (**self).material_at(cube)
    }
    fn light_emission(&self, material: MaterialId) -> Result<u8, Self::Error> {
        (**self).light_emission(material)
    }
    fn light_blocking(&self, material: MaterialId) -> Result<u8, Self::Error> {
        (**self).light_blocking(material)
    }
    fn light_profile(&self, material: MaterialId) -> Result<LightProfile, Self::Error> {
        (**self).light_profile(material)
    }
    fn recompute_light(&mut self, cube: Cube) -> Result<(), Self::Error> {
        (**self).recompute_light(cube)
    }
    fn is_fully_enclosed(&self, cube: Cube) -> Result<bool, Self::Error> {
        (**self).is_fully_enclosed(cube)
    }
    fn notify_viewers_of_chunk(&mut self, chunk: ChunkPos) -> Result<(), Self::Error> {
        (**self).notify_viewers_of_chunk(chunk)
    }
}

/// Error for a [`GridMutationPort`] capability that the running host version does not have.
///
/// Adapters return this (or an error wrapping it) instead of panicking; it propagates to the
/// caller like any other host error.
#[derive(Clone, Debug, Eq, PartialEq, displaydoc::Display)]
#[displaydoc("{operation} is not supported on host version {host}")]
#[non_exhaustive]
pub struct Unsupported {
    /// Name of the [`GridMutationPort`] method that was called.
    pub operation: &'static str,
    /// Description of the host version, as reported by the adapter.
    pub host: String,
}

impl Unsupported {
    /// Constructs an [`Unsupported`] error.
    pub fn new(operation: &'static str, host: impl Into<String>) -> Self {
        Self {
            operation,
            host: host.into(),
        }
    }
}

impl Error for Unsupported {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{HostError, MemoryGrid};

    #[test]
    fn light_profile_combines_lookups() {
        let grid = MemoryGrid::new();
        assert_eq!(
            grid.light_profile(MemoryGrid::GLOWSTONE),
            Ok(LightProfile {
                emission: 15,
                blocking: 15
            })
        );
    }

    #[test]
    fn forwarding_impls() {
        fn write_through<P: GridMutationPort>(mut port: P) -> Result<bool, P::Error> {
            port.write_fast(Cube::new(1, 2, 3), CellValue::from(MemoryGrid::STONE))
        }

        let mut grid = MemoryGrid::new();
        assert_eq!(write_through(&mut grid), Ok(true));
        assert_eq!(grid.material_at(Cube::new(1, 2, 3)), Ok(MemoryGrid::STONE));

        let boxed: Box<dyn GridMutationPort<Error = HostError>> = Box::new(MemoryGrid::new());
        assert_eq!(write_through(boxed), Ok(true));
    }

    #[test]
    fn unsupported_message() {
        assert_eq!(
            Unsupported::new("is_fully_enclosed", "1.7.10").to_string(),
            "is_fully_enclosed is not supported on host version 1.7.10"
        );
    }
}
