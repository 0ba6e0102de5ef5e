//! Recomputing the lighting of cells whose light-affecting properties were changed by a
//! batch, either immediately or spread over many host ticks.

use core::num::NonZeroUsize;

use crate::time::Duration;

mod queue;
pub use queue::RelightQueue;

mod scheduler;
pub use scheduler::{RelightProgress, RelightScheduler, TickOutcome};

// -------------------------------------------------------------------------------------------------

/// Policy for when, or whether, a mutated cell's light is recomputed after its emission or
/// blocking changed.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
#[allow(clippy::module_name_repetitions)]
pub enum RelightingStrategy {
    /// Never recompute light. Viewers are still notified of the changed chunks.
    Never,

    /// Recompute the light of each affected cell during the
    /// [`mutate()`](crate::BatchMutationSession::mutate) call that changed it.
    Immediate,

    /// Queue affected cells, and recompute them over as many ticks as it takes after
    /// [`notify_viewers()`](crate::BatchMutationSession::notify_viewers) is called.
    /// Viewers are notified once, after the queue is drained.
    #[default]
    Deferred,

    /// Like [`Deferred`](Self::Deferred), but viewers are also notified right away, so they
    /// see the new cells before their lighting is correct. They are notified again once the
    /// queue is drained.
    Hybrid,
}

impl RelightingStrategy {
    /// Whether cells are queued for later instead of relit during the mutation.
    pub fn is_deferred(self) -> bool {
        matches!(self, Self::Deferred | Self::Hybrid)
    }
}

/// Options for relighting, fixed per batch.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
#[allow(clippy::module_name_repetitions)]
pub struct RelightOptions {
    /// When light is recomputed.
    pub strategy: RelightingStrategy,

    /// Wall-clock time a single [`tick()`](crate::BatchMutationSession::tick) may spend
    /// recomputing light before returning.
    ///
    /// The budget is only compared against the clock every
    /// [`check_interval`](Self::check_interval) cells, so a tick may overshoot it by the
    /// time those cells take.
    pub max_time_per_tick: Duration,

    /// Number of cells recomputed between consecutive clock checks.
    ///
    /// Every tick processes at least this many cells (or the whole queue, if shorter),
    /// even with a zero time budget.
    pub check_interval: NonZeroUsize,

    /// Whether to skip recomputing cells that the host reports are
    /// [fully enclosed](crate::GridMutationPort::is_fully_enclosed).
    pub skip_enclosed: bool,
}

impl RelightOptions {
    /// Default value of [`max_time_per_tick`](Self::max_time_per_tick).
    pub const DEFAULT_MAX_TIME_PER_TICK: Duration = Duration::from_millis(10);

    /// Default value of [`check_interval`](Self::check_interval).
    pub const DEFAULT_CHECK_INTERVAL: NonZeroUsize = NonZeroUsize::new(1000).unwrap();

    /// Constructs the default options, but with the given strategy.
    pub fn with_strategy(strategy: RelightingStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }
}

impl Default for RelightOptions {
    fn default() -> Self {
        Self {
            strategy: RelightingStrategy::default(),
            max_time_per_tick: Self::DEFAULT_MAX_TIME_PER_TICK,
            check_interval: Self::DEFAULT_CHECK_INTERVAL,
            skip_enclosed: true,
        }
    }
}
