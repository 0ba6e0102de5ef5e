//! Choosing the [`GridMutationPort`] implementation that matches the running host version.
//!
//! Each host version exposes slightly different internals, so there is one port
//! implementation per range of versions. An [`AdapterRegistry`] lists them, and
//! [`AdapterRegistry::select()`] is called once at startup with the detected
//! [`HostVersion`]. The resulting port is then passed explicitly to each
//! [`BatchMutationSession`](crate::BatchMutationSession); there is no global lookup.

use core::fmt;
use core::str::FromStr;

use crate::port::GridMutationPort;
use crate::session::StateError;

#[cfg(doc)]
use crate::port::Unsupported;

// -------------------------------------------------------------------------------------------------

/// Version of the host engine, used to pick an adapter.
///
/// Versions are ordered by `major`, then `minor`, then `patch`.
///
/// Parses from release strings such as `"1.12.2"` or `"1.8"`, and from internal package
/// revision strings such as `"v1_12_R1"`, in which case the revision number is used as the
/// `patch` component.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[allow(clippy::exhaustive_structs)]
pub struct HostVersion {
    #[allow(missing_docs)]
    pub major: u16,
    #[allow(missing_docs)]
    pub minor: u16,
    #[allow(missing_docs)]
    pub patch: u16,
}

impl HostVersion {
    /// Constructs a [`HostVersion`] from its components.
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    fn parse_release(s: &str) -> Option<Self> {
        let mut parts = s.split('.').map(|part| part.parse::<u16>().ok());
        let major = parts.next()??;
        let minor = parts.next()??;
        let patch = match parts.next() {
            Some(patch) => patch?,
            None => 0,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(major, minor, patch))
    }

    fn parse_revision(s: &str) -> Option<Self> {
        let mut parts = s.strip_prefix('v')?.split('_');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        let revision = parts.next()?.strip_prefix('R')?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(major, minor, revision))
    }
}

impl fmt::Display for HostVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            major,
            minor,
            patch,
        } = self;
        write!(f, "{major}.{minor}.{patch}")
    }
}

impl FromStr for HostVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::parse_release(trimmed)
            .or_else(|| Self::parse_revision(trimmed))
            .ok_or_else(|| VersionParseError {
                input: s.into(),
            })
    }
}

/// Error from parsing a [`HostVersion`].
#[derive(Clone, Debug, Eq, PartialEq, displaydoc::Display)]
#[displaydoc("{input:?} is not a recognized host version")]
pub struct VersionParseError {
    input: String,
}

impl core::error::Error for VersionParseError {}

// -------------------------------------------------------------------------------------------------

/// Ordered list of port implementations, each applicable to a range of host versions.
///
/// `P` is the port type all the adapters produce; when they are different types, use
/// `Box<dyn GridMutationPort<Error = E>>`.
#[allow(clippy::module_name_repetitions)]
pub struct AdapterRegistry<P> {
    entries: Vec<AdapterEntry<P>>,
}

struct AdapterEntry<P> {
    name: &'static str,
    min: HostVersion,
    /// Inclusive. [`None`] means no upper limit.
    max: Option<HostVersion>,
    factory: fn() -> P,
}

impl<P: GridMutationPort> AdapterRegistry<P> {
    /// Constructs an empty registry.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds an adapter, named `name` for logging, which applies to all host versions from
    /// `min` through `max` inclusive, or with no upper limit if `max` is [`None`].
    ///
    /// Adapters are tried in the order they were added.
    #[must_use]
    pub fn with(
        mut self,
        name: &'static str,
        min: HostVersion,
        max: Option<HostVersion>,
        factory: fn() -> P,
    ) -> Self {
        self.entries.push(AdapterEntry {
            name,
            min,
            max,
            factory,
        });
        self
    }

    /// Returns the name of the first adapter applicable to `version`, if any.
    pub fn find(&self, version: HostVersion) -> Option<&'static str> {
        self.entry_for(version).map(|entry| entry.name)
    }

    /// Constructs the port of the first adapter applicable to `version`.
    ///
    /// Fails with [`StateError::AdapterUnavailable`] if there is none. An adapter that
    /// applies to the version but lacks some capability still succeeds here; the
    /// operation it cannot do fails later, typically with [`Unsupported`].
    pub fn select(&self, version: HostVersion) -> Result<P, StateError> {
        match self.entry_for(version) {
            Some(entry) => {
                log::info!("using {} adapter for host version {version}", entry.name);
                Ok((entry.factory)())
            }
            None => Err(StateError::AdapterUnavailable { version }),
        }
    }

    /// Returns the number of registered adapters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no adapters are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_for(&self, version: HostVersion) -> Option<&AdapterEntry<P>> {
        self.entries.iter().find(|entry| {
            entry.min <= version && entry.max.is_none_or(|max| version <= max)
        })
    }
}

impl<P: GridMutationPort> Default for AdapterRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for AdapterRegistry<P> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_list()
            .entries(self.entries.iter().map(|entry| entry.name))
            .finish()
    }
}
