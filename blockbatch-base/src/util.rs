//! Tools that we could imagine being in the Rust standard library, but aren't.

use core::fmt;
use core::time::Duration;

use manyfmt::Fmt;

#[doc(no_inline)]
pub use manyfmt::Refmt;

// -------------------------------------------------------------------------------------------------

/// Format type for [`manyfmt::Fmt`] which is similar to [`fmt::Debug`], but uses an
/// alternate concise format.
///
/// This format may be on one line despite the pretty-printing option, and may lose
/// precision or Rust syntax in favor of a short at-a-glance representation.
#[expect(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ConciseDebug;

/// Format type for [`manyfmt::Fmt`] which provides a highly condensed, ideally
/// constant-size, user-facing format for live-updating textual status messages.
/// This format does not follow Rust [`Debug`](fmt::Debug) syntax, and when implemented
/// for standard Rust types may have quirks. Values may have multiple lines.
#[expect(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct StatusText;

/// Makes the assumption that [`Duration`]s are per-tick timings and hence the
/// interesting precision is in the millisecond-to-microsecond range.
impl Fmt<ConciseDebug> for Duration {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        write!(fmt, "{:5.2?} ms", (self.as_micros() as f32) / 1000.0)
    }
}

/// Makes the assumption that [`Duration`]s are per-tick timings and hence the
/// interesting precision is in the millisecond-to-microsecond range.
impl Fmt<StatusText> for Duration {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &StatusText) -> fmt::Result {
        write!(fmt, "{:5.2?} ms", (self.as_micros() as f32) / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;

    #[test]
    fn duration_concise() {
        assert_eq!(
            Duration::from_micros(1500).refmt(&ConciseDebug).to_string(),
            " 1.50 ms"
        );
        assert_eq!(
            Duration::from_millis(12).refmt(&StatusText).to_string(),
            "12.00 ms"
        );
    }
}
