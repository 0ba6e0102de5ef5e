//! Blockbatch applies large batches of cell (block) changes to a voxel world through a
//! fast, unchecked host primitive, and takes care of the side effects that the fast path
//! skips: recomputing lighting for cells whose light properties changed, and telling
//! remote viewers which chunks they must re-fetch.
//!
//! The expensive part, relighting, can be done immediately, skipped, or deferred and
//! spread over many host ticks so that no single tick runs longer than a configured
//! budget.
//!
//! ## Overview
//!
//! * A [`BatchMutationSession`] is bound to one world, represented by a
//!   [`GridMutationPort`] implementation supplied by the host.
//!   Callers issue [`mutate()`](BatchMutationSession::mutate) calls, then
//!   [`notify_viewers()`](BatchMutationSession::notify_viewers) once the batch is done.
//! * The session tracks the affected chunks in a [`RegionTracker`](region::RegionTracker)
//!   and the cells needing relighting in a [`RelightQueue`](relight::RelightQueue).
//! * The [`RelightingStrategy`] decides what happens to light-affecting changes.
//!   Under [`Deferred`](RelightingStrategy::Deferred) and
//!   [`Hybrid`](RelightingStrategy::Hybrid), the host must call
//!   [`tick()`](BatchMutationSession::tick) once per host tick until the work is done;
//!   [`host::TickScheduler`] is a minimal driver for that.
//! * Which [`GridMutationPort`] to use for the running host version is chosen once, at
//!   startup, through an [`AdapterRegistry`](adapter::AdapterRegistry).
//!
//! ## Threading
//!
//! Everything here is single-threaded and cooperative. Time-budgeting works by voluntarily
//! returning early from [`tick()`](BatchMutationSession::tick), not by preemption.
//!
//! ## Crate features
//!
//! * `serde`: Enable [`serde`] serialization of [`RelightOptions`] and related
//!   configuration types.
//!
//! ## Dependencies and global state
//!
//! `blockbatch` has no global state. However, it does write log messages using the
//! [`log`] crate and is therefore subject to that global configuration.
#![cfg_attr(not(feature = "serde"), doc = "[`serde`]: https://docs.rs/serde/")]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

extern crate alloc;

pub mod adapter;
pub mod cell;
pub mod chunking;
pub mod host;
pub mod math;
pub mod port;
pub mod region;
pub mod relight;
pub mod session;
pub mod time;
pub mod util;

#[cfg(test)]
mod testing;

pub use cell::{CellValue, LightProfile, MaterialId};
pub use port::GridMutationPort;
pub use relight::{RelightOptions, RelightingStrategy};
pub use session::{BatchMutationSession, NotifyOutcome, StateError};

/// Re-export the version of the `euclid` vector math library we're using.
pub use euclid;
