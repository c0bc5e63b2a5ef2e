//! One-shot timers.
//!
//! The copy controller only needs "run this later, unless I cancel it first".
//! In the browser that is a `setTimeout`; everywhere else (server render, tests)
//! it is [`ManualScheduler`], whose clock only moves when told to.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Schedules a task to run once after a delay.
pub trait Scheduler {
    /// Identifies a scheduled task so it can be cancelled.
    type Handle;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;

    /// Cancel a task. Cancelling one that already ran is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

struct ManualTask {
    id: u64,
    due: Duration,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    tasks: Vec<ManualTask>,
}

/// Deterministic scheduler driven by [`ManualScheduler::advance`].
///
/// Clones share the same clock and queue, so a test can hand one clone to the
/// code under test and keep another to move time forward.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since creation, as seen by this scheduler.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of tasks still waiting to run.
    pub fn pending(&self) -> usize {
        self.state.borrow().tasks.len()
    }

    /// Move the clock forward, running every task that falls due, in order.
    ///
    /// Tasks run with the clock set to their due time and may schedule or
    /// cancel other tasks.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;

        while let Some(task) = self.pop_due(target) {
            task();
        }

        self.state.borrow_mut().now = target;
    }

    fn pop_due(&self, target: Duration) -> Option<Box<dyn FnOnce()>> {
        let mut state = self.state.borrow_mut();
        let idx = state
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= target)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(i, _)| i)?;

        let next = state.tasks.remove(idx);
        state.now = next.due;
        Some(next.task)
    }
}

impl Scheduler for ManualScheduler {
    type Handle = TaskId;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskId {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let due = state.now + delay;
        state.tasks.push(ManualTask { id, due, task });
        TaskId(id)
    }

    fn cancel(&self, handle: TaskId) {
        self.state.borrow_mut().tasks.retain(|t| t.id != handle.0);
    }
}
