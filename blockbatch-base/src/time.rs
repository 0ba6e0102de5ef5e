use core::fmt;
use core::ops;

use crate::util::ConciseDebug;
use manyfmt::Refmt as _;

// -------------------------------------------------------------------------------------------------

#[doc(no_inline)]
pub use core::time::Duration;

/// The [`Instant`] implementation used when no other is specified: the platform clock,
/// which on the web is `performance.now()`.
pub type SystemInstant = web_time::Instant;

/// Generic trait for the “current time” type, so that time-budgeted code can be tested
/// against a clock that does not advance on its own.
pub trait Instant:
    Copy + Ord + Send + Sync + fmt::Debug + ops::Add<Duration, Output = Self> + 'static
{
    /// Returns the current time.
    fn now() -> Self;

    /// Returns the amount of time elapsed from another instant to this one,
    /// or zero duration if that instant is later than this one.
    fn saturating_duration_since(self, other: Self) -> Duration;
}

impl Instant for web_time::Instant {
    #[inline]
    fn now() -> Self {
        web_time::Instant::now()
    }

    #[inline]
    fn saturating_duration_since(self, other: Self) -> Duration {
        web_time::Instant::saturating_duration_since(&self, other)
    }
}

// -------------------------------------------------------------------------------------------------

/// A request regarding how much real time should be spent on a computation.
#[derive(Debug, Clone, Copy, Eq, Ord, PartialEq, PartialOrd)]
#[non_exhaustive]
pub enum Deadline<I> {
    /// Stop immediately after the minimum necessary activities.
    ///
    /// Arithmetically, this is “negative infinity”; it is less than all finite deadlines.
    Asap,
    /// Stop as close to the given time (before or after) as is feasible.
    At(I),
    /// Don't stop until all the work is done.
    ///
    /// Arithmetically, this is “positive infinity”; it is greater than all finite deadlines.
    Whenever,
}

impl<I: Instant> Deadline<I> {
    /// Returns the deadline which is `budget` after `start`.
    ///
    /// A zero budget is [`Deadline::Asap`].
    #[inline]
    pub fn after(start: I, budget: Duration) -> Self {
        if budget.is_zero() {
            Deadline::Asap
        } else {
            Deadline::At(start + budget)
        }
    }

    /// Returns the time between `start` and the deadline, or [`None`] if there is no
    /// deadline and the remaining time is unbounded.
    ///
    /// If the deadline is already past, returns `Some(Duration::ZERO)`
    #[inline]
    pub fn remaining_since(&self, start: I) -> Option<Duration> {
        match *self {
            Deadline::Asap => Some(Duration::ZERO),
            Deadline::At(deadline) => Some(deadline.saturating_duration_since(start)),
            Deadline::Whenever => None,
        }
    }

    /// Returns whether the deadline has been reached as of `now`.
    #[inline]
    pub fn is_past(&self, now: I) -> bool {
        match *self {
            Deadline::Asap => true,
            Deadline::At(deadline) => now >= deadline,
            Deadline::Whenever => false,
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Summary of the time taken by a set of events.
///
/// It may be created by [`TimeStats::default()`] (empty), or [`TimeStats::one()`] (single event),
/// and multiple events may be aggregated using the `+=` operator.
/// It may be formatted for reading using the [`fmt::Display`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
#[allow(clippy::module_name_repetitions)]
pub struct TimeStats {
    /// The number of events aggregated into this [`TimeStats`].
    pub count: usize,
    /// The sum of the durations of all events.
    pub sum: Duration,
    /// The minimum duration of all events, or [`None`] if there were no events.
    pub min: Option<Duration>,
    /// The maximum duration of all events, or [`Duration::ZERO`] if there were no events.
    pub max: Duration,
}

impl TimeStats {
    /// Constructs a [`TimeStats`] for a single event.
    ///
    /// Multiple of these may then be aggregated using the `+=` operator.
    #[inline]
    pub const fn one(duration: Duration) -> Self {
        Self {
            count: 1,
            sum: duration,
            min: Some(duration),
            max: duration,
        }
    }
}

impl ops::AddAssign for TimeStats {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = TimeStats {
            count: self.count + rhs.count,
            sum: self.sum + rhs.sum,
            min: match (self.min, rhs.min) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            },
            max: self.max.max(rhs.max),
        };
    }
}

impl fmt::Display for TimeStats {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max = self.max.refmt(&ConciseDebug);
        let count = self.count;
        let sum = self.sum.refmt(&ConciseDebug);
        match self.min {
            None => write!(f, "(-------- .. {max}) for {count:3}, total {sum}"),
            Some(min) => {
                let min = min.refmt(&ConciseDebug);
                write!(f, "({min} .. {max}) for {count:3}, total {sum}")
            }
        }
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;

    #[test]
    fn deadline_ordering() {
        let i = SystemInstant::now();
        let mut deadlines = [
            Deadline::At(i + Duration::from_secs(1)),
            Deadline::Asap,
            Deadline::Whenever,
            Deadline::At(i),
        ];
        deadlines.sort();
        assert_eq!(
            deadlines,
            [
                Deadline::Asap,
                Deadline::At(i),
                Deadline::At(i + Duration::from_secs(1)),
                Deadline::Whenever,
            ]
        );
    }

    #[test]
    fn deadline_after_zero_is_asap() {
        let i = SystemInstant::now();
        assert_eq!(Deadline::after(i, Duration::ZERO), Deadline::Asap);
        assert!(Deadline::after(i, Duration::ZERO).is_past(i));
        let d = Deadline::after(i, Duration::from_millis(1));
        assert!(!d.is_past(i));
        assert!(d.is_past(i + Duration::from_millis(1)));
        assert_eq!(d.remaining_since(i), Some(Duration::from_millis(1)));
    }

    #[test]
    fn time_stats_aggregate() {
        let mut stats = TimeStats::default();
        assert_eq!(stats.min, None);
        stats += TimeStats::one(Duration::from_millis(3));
        stats += TimeStats::one(Duration::from_millis(1));
        assert_eq!(
            stats,
            TimeStats {
                count: 2,
                sum: Duration::from_millis(4),
                min: Some(Duration::from_millis(1)),
                max: Duration::from_millis(3),
            }
        );
        assert_eq!(
            stats.to_string(),
            "( 1.00 ms ..  3.00 ms) for   2, total  4.00 ms"
        );
    }

    #[test]
    fn time_stats_empty_side_keeps_min() {
        let mut stats = TimeStats::one(Duration::from_millis(2));
        stats += TimeStats::default();
        assert_eq!(stats.min, Some(Duration::from_millis(2)));
        assert_eq!(stats.count, 1);

        let mut stats = TimeStats::default();
        stats += TimeStats::one(Duration::from_millis(5));
        assert_eq!(stats.min, Some(Duration::from_millis(5)));
    }
}
