use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use web_time::{Duration, Instant};

/// Smallest period a repeating task may use. A zero period would make the
/// manual scheduler spin forever on a single advance.
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// Source of wall-clock time and deferred callbacks.
///
/// Implementations are single-threaded: callbacks run on the same thread that
/// scheduled them, and never while the scheduler itself is borrowed, so a
/// callback may freely schedule or cancel other tasks.
pub trait Scheduler {
    /// Current time as seen by this scheduler.
    fn now(&self) -> Instant;

    /// Runs `callback` once after `delay`. Returns `None` when the platform
    /// refused the timer.
    fn schedule_once(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Option<TaskId>;

    /// Runs `callback` every `period` until cancelled.
    fn schedule_repeating(&self, period: Duration, callback: Box<dyn FnMut()>) -> Option<TaskId>;

    /// Cancels a pending task. Unknown or already-finished ids are ignored.
    fn cancel(&self, id: TaskId);

    /// Returns true while the task is still waiting to run (or, for repeating
    /// tasks, until it is cancelled).
    fn is_pending(&self, id: TaskId) -> bool;
}

/// Owned registration of a scheduled task.
///
/// The task is cancelled when the handle is dropped. This is the only way
/// widgets hold timers, which keeps teardown deterministic.
pub struct TaskHandle {
    scheduler: Rc<dyn Scheduler>,
    id: Option<TaskId>,
}

impl TaskHandle {
    pub fn once(
        scheduler: &Rc<dyn Scheduler>,
        delay: Duration,
        callback: impl FnOnce() + 'static,
    ) -> Self {
        match scheduler.schedule_once(delay, Box::new(callback)) {
            Some(id) => Self::new(Rc::clone(scheduler), id),
            None => {
                log::warn!("scheduler refused one-shot task ({delay:?})");
                Self::inactive(Rc::clone(scheduler))
            }
        }
    }

    pub fn repeating(
        scheduler: &Rc<dyn Scheduler>,
        period: Duration,
        callback: impl FnMut() + 'static,
    ) -> Self {
        match scheduler.schedule_repeating(period, Box::new(callback)) {
            Some(id) => Self::new(Rc::clone(scheduler), id),
            None => {
                log::warn!("scheduler refused repeating task ({period:?})");
                Self::inactive(Rc::clone(scheduler))
            }
        }
    }

    fn new(scheduler: Rc<dyn Scheduler>, id: TaskId) -> Self {
        Self {
            scheduler,
            id: Some(id),
        }
    }

    fn inactive(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            id: None,
        }
    }

    pub fn id(&self) -> Option<TaskId> {
        self.id
    }

    pub fn is_pending(&self) -> bool {
        self.id.is_some_and(|id| self.scheduler.is_pending(id))
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.scheduler.cancel(id);
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.scheduler.cancel(id);
        }
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle").field("id", &self.id).finish()
    }
}

enum TaskKind {
    Once(Box<dyn FnOnce()>),
    Repeating {
        period: Duration,
        callback: Rc<RefCell<Box<dyn FnMut()>>>,
    },
}

struct ScheduledTask {
    due: Duration,
    kind: TaskKind,
}

struct ManualState {
    origin: Instant,
    elapsed: Duration,
    next_id: u64,
    tasks: BTreeMap<TaskId, ScheduledTask>,
}

enum Fire {
    Once(Box<dyn FnOnce()>),
    Repeating(Rc<RefCell<Box<dyn FnMut()>>>),
}

/// Deterministic scheduler driven by explicit [`advance_by`](Self::advance_by)
/// calls.
///
/// Used by tests and by the headless demo. Time only moves when asked to, and
/// due tasks fire in `(due time, scheduling order)` order.
pub struct ManualScheduler {
    state: RefCell<ManualState>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(origin: Instant) -> Self {
        Self {
            state: RefCell::new(ManualState {
                origin,
                elapsed: Duration::ZERO,
                next_id: 1,
                tasks: BTreeMap::new(),
            }),
        }
    }

    /// Time elapsed since the scheduler was created.
    pub fn elapsed(&self) -> Duration {
        self.state.borrow().elapsed
    }

    pub fn pending_count(&self) -> usize {
        self.state.borrow().tasks.len()
    }

    /// Moves virtual time forward, firing every task that comes due on the
    /// way. Returns the number of callbacks invoked.
    pub fn advance_by(&self, delta: Duration) -> usize {
        let target = self.state.borrow().elapsed + delta;
        let mut fired = 0;

        loop {
            let next = {
                let state = self.state.borrow();
                state
                    .tasks
                    .iter()
                    .filter(|(_, task)| task.due <= target)
                    .min_by_key(|(id, task)| (task.due, **id))
                    .map(|(id, _)| *id)
            };
            let Some(id) = next else {
                break;
            };

            let fire = {
                let mut state = self.state.borrow_mut();
                let Some(task) = state.tasks.remove(&id) else {
                    continue;
                };
                if task.due > state.elapsed {
                    state.elapsed = task.due;
                }
                match task.kind {
                    TaskKind::Once(callback) => Fire::Once(callback),
                    TaskKind::Repeating { period, callback } => {
                        state.tasks.insert(
                            id,
                            ScheduledTask {
                                due: task.due + period,
                                kind: TaskKind::Repeating {
                                    period,
                                    callback: Rc::clone(&callback),
                                },
                            },
                        );
                        Fire::Repeating(callback)
                    }
                }
            };

            // No borrow is held here, callbacks may schedule and cancel.
            match fire {
                Fire::Once(callback) => callback(),
                Fire::Repeating(callback) => {
                    let mut run = callback.borrow_mut();
                    (*run)();
                }
            }
            fired += 1;
        }

        self.state.borrow_mut().elapsed = target;
        fired
    }

    pub fn advance_millis(&self, millis: u64) -> usize {
        self.advance_by(Duration::from_millis(millis))
    }

    fn insert(&self, delay: Duration, kind: TaskKind) -> TaskId {
        let mut state = self.state.borrow_mut();
        let id = TaskId(state.next_id);
        state.next_id += 1;
        let due = state.elapsed + delay;
        state.tasks.insert(id, ScheduledTask { due, kind });
        id
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Instant {
        let state = self.state.borrow();
        state.origin + state.elapsed
    }

    fn schedule_once(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Option<TaskId> {
        Some(self.insert(delay, TaskKind::Once(callback)))
    }

    fn schedule_repeating(&self, period: Duration, callback: Box<dyn FnMut()>) -> Option<TaskId> {
        let period = period.max(MIN_PERIOD);
        Some(self.insert(
            period,
            TaskKind::Repeating {
                period,
                callback: Rc::new(RefCell::new(callback)),
            },
        ))
    }

    fn cancel(&self, id: TaskId) {
        self.state.borrow_mut().tasks.remove(&id);
    }

    fn is_pending(&self, id: TaskId) -> bool {
        self.state.borrow().tasks.contains_key(&id)
    }
}

#[cfg(test)]
#[path = "tests/scheduler_tests.rs"]
mod tests;
