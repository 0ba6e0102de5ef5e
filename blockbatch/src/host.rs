//! A minimal stand-in for the host's periodic callback mechanism, which runs registered
//! tasks once per host tick until they finish.
//!
//! Hosts with their own scheduler do not need this; they can call
//! [`BatchMutationSession::tick()`] from their own repeating task instead.

use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use crate::port::GridMutationPort;
use crate::relight::TickOutcome;
use crate::session::{BatchMutationSession, NotifyOutcome};
use crate::time::Instant;

/// Something to be done once per host tick until it reports that it is finished.
pub trait RepeatingTask {
    /// Error which stops the current tick.
    type Error;

    /// Does one tick's worth of work.
    fn run(&mut self) -> Result<TaskStatus, Self::Error>;
}

/// Whether a [`RepeatingTask`] wants to run again.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(clippy::exhaustive_enums)]
pub enum TaskStatus {
    /// Run the task again next tick.
    Continue,
    /// Unregister the task.
    Finished,
}

/// Identifies a task registered with a [`TickScheduler`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TaskId(u64);

/// Runs [`RepeatingTask`]s once per [`run_tick()`](Self::run_tick), in the order they were
/// registered, and unregisters each one when it finishes.
pub struct TickScheduler<E> {
    tasks: Vec<(TaskId, Box<dyn RepeatingTask<Error = E>>)>,
    next_id: u64,
}

impl<E> TickScheduler<E> {
    /// Constructs a scheduler with no tasks.
    pub const fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    /// Adds a task, which will first run at the next [`run_tick()`](Self::run_tick).
    pub fn register(&mut self, task: Box<dyn RepeatingTask<Error = E>>) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push((id, task));
        log::trace!("registered {id:?}");
        id
    }

    /// Removes a task without running it again.
    ///
    /// Returns false if there was no such task, which is the case if it already finished.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let count = self.tasks.len();
        self.tasks.retain(|&(task_id, _)| task_id != id);
        self.tasks.len() != count
    }

    /// Runs every registered task once.
    ///
    /// If a task fails, its error is returned immediately; the failed task stays registered,
    /// and the tasks after it do not run until the next call.
    pub fn run_tick(&mut self) -> Result<(), E> {
        let mut i = 0;
        while i < self.tasks.len() {
            match self.tasks[i].1.run()? {
                TaskStatus::Continue => i += 1,
                TaskStatus::Finished => {
                    let (id, _) = self.tasks.remove(i);
                    log::trace!("{id:?} finished");
                }
            }
        }
        Ok(())
    }

    /// Returns the number of registered tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns whether no tasks are registered.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<E> Default for TickScheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for TickScheduler<E> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TickScheduler({})", self.tasks.len())
    }
}

/// Ticks the session until its scheduled relighting is finished.
///
/// Panics if the session is already borrowed, which can only happen if the task is run
/// from inside another use of the session.
impl<P: GridMutationPort, I: Instant> RepeatingTask for Rc<RefCell<BatchMutationSession<P, I>>> {
    type Error = P::Error;

    fn run(&mut self) -> Result<TaskStatus, Self::Error> {
        Ok(match self.borrow_mut().tick()? {
            TickOutcome::Pending(_) => TaskStatus::Continue,
            TickOutcome::Idle | TickOutcome::Finished(_) => TaskStatus::Finished,
        })
    }
}

impl<P: GridMutationPort + 'static, I: Instant> BatchMutationSession<P, I> {
    /// Calls [`notify_viewers()`](Self::notify_viewers), and if that scheduled relighting,
    /// registers a task with `scheduler` which ticks this session until it is done.
    ///
    /// At most one task is registered per call, and it unregisters itself when relighting
    /// finishes.
    pub fn notify_viewers_scheduled(
        this: &Rc<RefCell<Self>>,
        scheduler: &mut TickScheduler<P::Error>,
    ) -> Result<NotifyOutcome, P::Error> {
        let outcome = this.borrow_mut().notify_viewers()?;
        if outcome == NotifyOutcome::Scheduled {
            scheduler.register(Box::new(Rc::clone(this)));
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;
    use crate::chunking::ChunkPos;
    use crate::math::Cube;
    use crate::testing::{HostError, MemoryGrid, TestInstant};
    use crate::time::Duration;
    use crate::{RelightOptions, RelightingStrategy};
    use core::num::NonZeroUsize;
    use pretty_assertions::assert_eq;

    type SharedSession = Rc<RefCell<BatchMutationSession<MemoryGrid, TestInstant>>>;

    fn shared_session(strategy: RelightingStrategy, cells: i32) -> SharedSession {
        let mut session = BatchMutationSession::new(
            MemoryGrid::new(),
            RelightOptions::with_strategy(strategy),
        );
        session.set_relight_check_interval(NonZeroUsize::new(2).unwrap());
        session.set_max_relight_time_per_tick(Duration::ZERO);
        for x in 0..cells {
            session
                .mutate(Cube::new(x, 0, 0), CellValue::from(MemoryGrid::TORCH))
                .unwrap();
        }
        Rc::new(RefCell::new(session))
    }

    struct Countdown(u32);
    impl RepeatingTask for Countdown {
        type Error = HostError;
        fn run(&mut self) -> Result<TaskStatus, HostError> {
            self.0 -= 1;
            Ok(if self.0 == 0 {
                TaskStatus::Finished
            } else {
                TaskStatus::Continue
            })
        }
    }

    #[test]
    fn tasks_unregister_when_finished() {
        let mut scheduler = TickScheduler::<HostError>::new();
        scheduler.register(Box::new(Countdown(1)));
        let long = scheduler.register(Box::new(Countdown(3)));
        assert_eq!(scheduler.len(), 2);
        scheduler.run_tick().unwrap();
        assert_eq!(scheduler.len(), 1);
        scheduler.run_tick().unwrap();
        assert_eq!(scheduler.len(), 1);
        scheduler.run_tick().unwrap();
        assert!(scheduler.is_empty());
        assert!(!scheduler.cancel(long));
    }

    #[test]
    fn cancel() {
        let mut scheduler = TickScheduler::<HostError>::new();
        let id = scheduler.register(Box::new(Countdown(5)));
        assert!(scheduler.cancel(id));
        assert!(scheduler.is_empty());
        assert_eq!(format!("{scheduler:?}"), "TickScheduler(0)");
    }

    #[test]
    fn session_drained_by_scheduler() {
        let session = shared_session(RelightingStrategy::Deferred, 5);
        let mut scheduler = TickScheduler::new();

        let outcome = BatchMutationSession::notify_viewers_scheduled(&session, &mut scheduler);
        assert_eq!(outcome, Ok(NotifyOutcome::Scheduled));
        assert_eq!(scheduler.len(), 1);

        // A second request does not add a second task.
        let outcome = BatchMutationSession::notify_viewers_scheduled(&session, &mut scheduler);
        assert_eq!(outcome, Ok(NotifyOutcome::AlreadyScheduled));
        assert_eq!(scheduler.len(), 1);

        // Two cells per tick.
        for remaining in [3, 1] {
            scheduler.run_tick().unwrap();
            assert_eq!(session.borrow().pending_relight_count(), remaining);
            assert_eq!(scheduler.len(), 1);
            assert!(session.borrow().port().notified().is_empty());
        }
        scheduler.run_tick().unwrap();
        assert!(scheduler.is_empty());
        assert!(!session.borrow().is_relighting());
        assert_eq!(session.borrow().port().notified(), &[ChunkPos::new(0, 0)]);
    }

    #[test]
    fn immediate_session_registers_nothing() {
        let session = shared_session(RelightingStrategy::Immediate, 5);
        let mut scheduler = TickScheduler::new();
        let outcome = BatchMutationSession::notify_viewers_scheduled(&session, &mut scheduler);
        assert_eq!(outcome, Ok(NotifyOutcome::Notified));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn task_error_keeps_task_registered() {
        let session = shared_session(RelightingStrategy::Deferred, 2);
        let failing = Cube::new(0, 0, 0);
        {
            let mut session = session.borrow_mut();
            let port = core::mem::replace(session.port_mut(), MemoryGrid::new());
            *session.port_mut() = port.with_failure_at(failing);
        }
        let mut scheduler = TickScheduler::new();
        BatchMutationSession::notify_viewers_scheduled(&session, &mut scheduler).unwrap();
        scheduler.register(Box::new(Countdown(1)));

        assert_eq!(scheduler.run_tick(), Err(HostError::Injected(failing)));
        assert_eq!(scheduler.len(), 2);

        scheduler.run_tick().unwrap();
        assert!(scheduler.is_empty());
        assert_eq!(session.borrow().port().recomputed(), &[Cube::new(1, 0, 0)]);
    }
}
