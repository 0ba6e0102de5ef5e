//! This library is an internal component of [`blockbatch`],
//! which defines some core mathematical types, time-budget types, and formatting helpers.
//! Do not depend on this library; use only [`blockbatch`] instead.
//!
//! [`blockbatch`]: https://crates.io/crates/blockbatch/

#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![cfg_attr(not(test), warn(clippy::std_instead_of_core, clippy::std_instead_of_alloc))]

#[cfg(test)]
#[macro_use]
extern crate std;
extern crate alloc;

/// Do not use this module directly; its contents are re-exported from `blockbatch`.
pub mod math;

/// Do not use this module directly; its contents are re-exported from `blockbatch`.
pub mod time;

/// Do not use this module directly; its contents are re-exported from `blockbatch`.
pub mod util;

// reexport for convenience of our tests
#[doc(hidden)]
pub use euclid;
