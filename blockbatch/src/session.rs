//! [`BatchMutationSession`], the entry point for applying a batch of cell changes.

use core::num::NonZeroUsize;

use crate::adapter::{AdapterRegistry, HostVersion};
use crate::cell::{CellValue, MaterialId};
use crate::math::{Cube, GridAab};
use crate::port::GridMutationPort;
use crate::region::RegionTracker;
use crate::relight::{
    RelightOptions, RelightQueue, RelightScheduler, RelightingStrategy, TickOutcome,
};
use crate::time::{Duration, Instant, SystemInstant};


/// Applies batches of cell changes to one world through a [`GridMutationPort`], and
/// takes care of relighting and viewer notification afterward.
///
/// Use it like this:
///
/// 1. Optionally, configure it with the `set_*()` methods and
///    [`reserve_deferred_capacity()`](Self::reserve_deferred_capacity).
/// 2. Call [`mutate()`](Self::mutate) (or [`fill()`](Self::fill)) for each change.
/// 3. Call [`notify_viewers()`](Self::notify_viewers).
/// 4. If that returned [`NotifyOutcome::Scheduled`], call [`tick()`](Self::tick) once per
///    host tick until it reports [`TickOutcome::Finished`]. [`crate::host::TickScheduler`]
///    can do this for you.
///
/// Once viewers have been notified of a batch, the session is ready for the next one.
///
/// Dropping a session while relighting is still pending abandons that work: the affected
/// region keeps stale lighting and viewers are never notified of it.
///
/// `I` is the clock used to time-box [`tick()`](Self::tick); it only needs to be changed in
/// tests.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BatchMutationSession<P, I = SystemInstant> {
    port: P,
    region: RegionTracker,
    queue: RelightQueue,
    scheduler: RelightScheduler<I>,
}

impl<P: GridMutationPort, I: Instant> BatchMutationSession<P, I> {
    /// Constructs a session which will write to `port`.
    pub fn new(port: P, options: RelightOptions) -> Self {
        Self {
            port,
            region: RegionTracker::new(),
            queue: RelightQueue::new(),
            scheduler: RelightScheduler::new(options),
        }
    }

    /// Constructs a session using the port that `registry` provides for `version`.
    pub fn from_registry(
        registry: &AdapterRegistry<P>,
        version: HostVersion,
        options: RelightOptions,
    ) -> Result<Self, StateError> {
        Ok(Self::new(registry.select(version)?, options))
    }

    /// Stores `value` at `cube`.
    ///
    /// Returns whether the host reported that the stored value changed.
    ///
    /// If the strategy is not [`Never`](RelightingStrategy::Never) and the new material's
    /// light emission or blocking differs from the old one's, the cell is relit now
    /// ([`Immediate`](RelightingStrategy::Immediate)) or queued for relighting.
    ///
    /// Errors from the host are returned as-is. Mutations which already succeeded are not
    /// undone, and the failed one may or may not have taken effect.
    pub fn mutate(&mut self, cube: Cube, value: CellValue) -> Result<bool, P::Error> {
        let strategy = self.options().strategy;
        let old_profile = match strategy {
            RelightingStrategy::Never => None,
            _ => Some(self.port.light_profile(self.port.material_at(cube)?)?),
        };

        self.region.touch(cube);
        let changed = self.port.write_fast(cube, value)?;

        if let Some(old_profile) = old_profile {
            let new_profile = self.port.light_profile(value.material)?;
            if old_profile.differs_from(new_profile) {
                if strategy.is_deferred() {
                    self.queue.enqueue(cube);
                } else {
                    self.port.recompute_light(cube)?;
                }
            }
        }

        Ok(changed)
    }

    /// Stores a cell made of `material` with auxiliary `data` at `cube`.
    ///
    /// Equivalent to [`mutate()`](Self::mutate) with [`CellValue::new()`].
    pub fn mutate_with_data(
        &mut self,
        cube: Cube,
        material: MaterialId,
        data: u8,
    ) -> Result<bool, P::Error> {
        self.mutate(cube, CellValue::new(material, data))
    }

    /// Calls `function` for each cube in `bounds`, in [`GridAab::interior_iter()`] order,
    /// and [`mutate()`](Self::mutate)s it to the returned value unless that is [`None`].
    ///
    /// Returns the number of mutations the host reported as changing the stored value.
    pub fn fill<F>(&mut self, bounds: GridAab, mut function: F) -> Result<usize, P::Error>
    where
        F: FnMut(Cube) -> Option<CellValue>,
    {
        let mut changed = 0;
        for cube in bounds.interior_iter() {
            if let Some(value) = function(cube) {
                if self.mutate(cube, value)? {
                    changed += 1;
                }
            }
        }
        Ok(changed)
    }

    /// Sets when light is recomputed.
    ///
    /// This should be done before the first mutation of a batch. Cells already queued for
    /// relighting under a deferred strategy stay queued, and the next
    /// [`notify_viewers()`](Self::notify_viewers) schedules them whatever the new strategy is.
    pub fn set_relighting_strategy(&mut self, strategy: RelightingStrategy) {
        self.scheduler.options_mut().strategy = strategy;
    }

    /// Sets [`RelightOptions::max_time_per_tick`]. Takes effect at the next tick.
    pub fn set_max_relight_time_per_tick(&mut self, budget: Duration) {
        self.scheduler.options_mut().max_time_per_tick = budget;
    }

    /// Sets [`RelightOptions::check_interval`]. Takes effect at the next tick.
    pub fn set_relight_check_interval(&mut self, interval: NonZeroUsize) {
        self.scheduler.options_mut().check_interval = interval;
    }

    /// Reserves room for `additional` cells in the relighting queue, to avoid reallocating
    /// it during a large batch.
    ///
    /// Fails with [`StateError::BufferInUse`] once the current batch has any mutations.
    pub fn reserve_deferred_capacity(&mut self, additional: usize) -> Result<(), StateError> {
        if self.region.mutation_count() > 0 {
            return Err(StateError::BufferInUse);
        }
        self.queue.reserve(additional)
    }

    /// Returns the number of cells waiting to be relit.
    pub fn pending_relight_count(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether [`notify_viewers()`](Self::notify_viewers) scheduled relighting that
    /// has not finished yet.
    pub fn is_relighting(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Returns the region touched by the current batch.
    pub fn region(&self) -> &RegionTracker {
        &self.region
    }

    /// Returns the options in effect.
    pub fn options(&self) -> &RelightOptions {
        self.scheduler.options()
    }

    /// Returns the port this session writes to.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Returns the port this session writes to.
    ///
    /// Writing through it directly bypasses region tracking and relighting.
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Discards the session, returning its port.
    pub fn into_port(self) -> P {
        self.port
    }

    /// Ends the current batch, by notifying viewers of the touched chunks now, scheduling
    /// that notification for after relighting, or both, depending on the strategy.
    ///
    /// If no cells are queued for relighting, viewers are notified now. Otherwise relighting
    /// is scheduled, and [`tick()`](Self::tick) notifies once it is done; under
    /// [`Hybrid`](RelightingStrategy::Hybrid) viewers are also notified now.
    ///
    /// Only [`Deferred`](RelightingStrategy::Deferred) and `Hybrid` queue cells, but cells
    /// queued before a switch to [`Never`](RelightingStrategy::Never) or
    /// [`Immediate`](RelightingStrategy::Immediate) are still scheduled here.
    ///
    /// If relighting is already scheduled, nothing new is scheduled and
    /// [`NotifyOutcome::AlreadyScheduled`] is returned; cells mutated since then are covered
    /// by the run in progress.
    pub fn notify_viewers(&mut self) -> Result<NotifyOutcome, P::Error> {
        let strategy = self.options().strategy;

        if self.scheduler.is_running() {
            if strategy == RelightingStrategy::Hybrid {
                self.notify_region()?;
            }
            return Ok(NotifyOutcome::AlreadyScheduled);
        }

        if self.queue.is_empty() {
            self.notify_region()?;
            self.finish_batch();
            return Ok(NotifyOutcome::Notified);
        }

        if strategy == RelightingStrategy::Hybrid {
            self.notify_region()?;
        }
        self.scheduler.arm(&self.queue);
        Ok(NotifyOutcome::Scheduled)
    }

    /// Performs one host tick's worth of scheduled relighting.
    ///
    /// Returns [`TickOutcome::Idle`] if nothing is scheduled. When the outcome is
    /// [`TickOutcome::Finished`], viewers have been notified and the session is ready for
    /// the next batch.
    ///
    /// If the host fails, the error is returned and relighting stays scheduled; the cell
    /// that failed is not retried.
    pub fn tick(&mut self) -> Result<TickOutcome, P::Error> {
        let outcome = self
            .scheduler
            .tick(&mut self.queue, &self.region, &mut self.port)?;
        if outcome.is_finished() {
            self.finish_batch();
        }
        Ok(outcome)
    }

    fn notify_region(&mut self) -> Result<(), P::Error> {
        for chunk in self.region.chunks_in_region() {
            self.port.notify_viewers_of_chunk(chunk)?;
        }
        Ok(())
    }

    fn finish_batch(&mut self) {
        self.region.reset();
        self.queue.reset();
    }
}

/// What [`BatchMutationSession::notify_viewers()`] did.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum NotifyOutcome {
    /// Viewers were notified; the batch is complete.
    Notified,
    /// Relighting was scheduled; viewers will be notified when it finishes.
    /// (Under [`RelightingStrategy::Hybrid`], they were also notified already.)
    Scheduled,
    /// Relighting was already scheduled by an earlier call, and still is.
    AlreadyScheduled,
}

/// Error from an operation that is not valid in the current state of a
/// [`BatchMutationSession`] or of its setup.
#[derive(Clone, Debug, Eq, PartialEq, displaydoc::Display)]
#[non_exhaustive]
pub enum StateError {
    /// cannot resize an in-use buffer
    BufferInUse,

    /// no adapter is available for host version {version}
    AdapterUnavailable {
        /// The host version that was looked up.
        version: HostVersion,
    },
}

impl core::error::Error for StateError {}
