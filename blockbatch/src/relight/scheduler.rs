//! [`RelightScheduler`], which drains a [`RelightQueue`] one time-boxed slice per tick.

use core::fmt;

use manyfmt::{Fmt, Refmt as _};

use crate::port::GridMutationPort;
use crate::region::RegionTracker;
use crate::relight::{RelightOptions, RelightQueue};
use crate::time::{Deadline, Duration, Instant, TimeStats};
use crate::util::{ConciseDebug, StatusText};

/// Drives the relighting of a [`RelightQueue`] across many ticks, then notifies viewers of
/// the whole region once the queue is empty.
///
/// A scheduler is either idle or has exactly one run in progress. A run starts with
/// [`arm()`](Self::arm) and ends when a [`tick()`](Self::tick) finds the queue empty.
///
/// `I` is the clock used to enforce [`RelightOptions::max_time_per_tick`].
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct RelightScheduler<I> {
    options: RelightOptions,
    /// Present iff a run is in progress.
    run: Option<RelightRun<I>>,
}

#[derive(Clone, Copy, Debug)]
struct RelightRun<I> {
    armed_at: I,
    progress: RelightProgress,
}

impl<I: Instant> RelightScheduler<I> {
    /// Constructs an idle scheduler.
    pub fn new(options: RelightOptions) -> Self {
        Self { options, run: None }
    }

    /// Returns the options in effect.
    pub fn options(&self) -> &RelightOptions {
        &self.options
    }

    /// Changes to the options take effect at the next [`tick()`](Self::tick).
    pub(crate) fn options_mut(&mut self) -> &mut RelightOptions {
        &mut self.options
    }

    /// Returns whether a run is in progress.
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Returns the progress of the run in progress, if any.
    pub fn progress(&self) -> Option<RelightProgress> {
        self.run.map(|run| run.progress)
    }

    /// Starts a run that will drain `queue`.
    ///
    /// Returns false, and changes nothing, if a run is already in progress.
    pub fn arm(&mut self, queue: &RelightQueue) -> bool {
        if self.run.is_some() {
            return false;
        }
        log::debug!(
            "relighting {} cells, at most {} per tick",
            queue.len(),
            self.options.max_time_per_tick.refmt(&ConciseDebug)
        );
        self.run = Some(RelightRun {
            armed_at: I::now(),
            progress: RelightProgress {
                remaining: queue.len(),
                ..RelightProgress::default()
            },
        });
        true
    }

    /// Recomputes the light of cells from the front of `queue` until either it is empty or
    /// the time budget for this tick is used up.
    ///
    /// If the queue is empty when this returns, every chunk in `region` has been notified
    /// and the run is over.
    ///
    /// If `port` fails, the error is returned immediately. The cell being processed has
    /// already been removed from the queue and will not be retried; the run stays in
    /// progress, so the next tick continues with the following cell.
    pub fn tick<P>(
        &mut self,
        queue: &mut RelightQueue,
        region: &RegionTracker,
        port: &mut P,
    ) -> Result<TickOutcome, P::Error>
    where
        P: GridMutationPort + ?Sized,
    {
        let Some(run) = &mut self.run else {
            return Ok(TickOutcome::Idle);
        };
        let RelightOptions {
            max_time_per_tick,
            check_interval,
            skip_enclosed,
            ..
        } = self.options;

        let t0 = I::now();
        let deadline = Deadline::after(t0, max_time_per_tick);
        let mut last_check = t0;
        let mut longest_granule = Duration::ZERO;
        let mut since_check: usize = 0;
        run.progress.ticks += 1;

        while let Some(cube) = queue.dequeue() {
            if skip_enclosed && port.is_fully_enclosed(cube)? {
                run.progress.skipped += 1;
            } else {
                port.recompute_light(cube)?;
            }
            run.progress.processed += 1;

            // Reading the clock is not free, so only do it once per granule.
            since_check += 1;
            if since_check >= check_interval.get() {
                since_check = 0;
                let now = I::now();
                longest_granule = longest_granule.max(now.saturating_duration_since(last_check));
                last_check = now;
                if deadline.is_past(now) {
                    break;
                }
            }
        }

        run.progress.time += TimeStats::one(I::now().saturating_duration_since(t0));
        run.progress.remaining = queue.len();
        if !max_time_per_tick.is_zero() && longest_granule > max_time_per_tick {
            log::warn!(
                "relighting {check_interval} cells took {}, longer than the whole tick budget of {}",
                longest_granule.refmt(&ConciseDebug),
                max_time_per_tick.refmt(&ConciseDebug),
            );
        }
        log::trace!("relight tick: {}", run.progress.refmt(&StatusText));

        if !queue.is_empty() {
            return Ok(TickOutcome::Pending(run.progress));
        }

        for chunk in region.chunks_in_region() {
            port.notify_viewers_of_chunk(chunk)?;
        }
        let progress = run.progress;
        log::debug!(
            "relighting finished after {} in {} ticks: {}",
            I::now()
                .saturating_duration_since(run.armed_at)
                .refmt(&ConciseDebug),
            progress.ticks,
            progress.time,
        );
        self.run = None;
        Ok(TickOutcome::Finished(progress))
    }
}

// -------------------------------------------------------------------------------------------------

/// Result of [`RelightScheduler::tick()`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum TickOutcome {
    /// No run was in progress; nothing was done.
    Idle,
    /// The time budget ran out with cells still queued.
    Pending(RelightProgress),
    /// The queue was drained, viewers were notified, and the run is over.
    Finished(RelightProgress),
}

impl TickOutcome {
    /// Returns whether this tick ended a run.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }

    /// Returns the progress of the run this tick was part of, if any.
    pub fn progress(&self) -> Option<RelightProgress> {
        match *self {
            Self::Idle => None,
            Self::Pending(progress) | Self::Finished(progress) => Some(progress),
        }
    }
}

/// Accumulated performance data for one relighting run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub struct RelightProgress {
    /// Number of queue entries removed and handled, including skipped ones.
    pub processed: usize,
    /// Number of processed entries whose recomputation was skipped because the cell was
    /// fully enclosed.
    pub skipped: usize,
    /// Number of entries still in the queue.
    pub remaining: usize,
    /// Number of ticks spent so far.
    pub ticks: usize,
    /// Time spent in each tick.
    pub time: TimeStats,
}

impl Fmt<StatusText> for RelightProgress {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &StatusText) -> fmt::Result {
        let Self {
            processed,
            skipped,
            remaining,
            ticks,
            time,
        } = self;
        write!(
            fmt,
            "{processed:6} done ({skipped:6} enclosed), {remaining:6} queued, {ticks:4} ticks {time}"
        )
    }
}
