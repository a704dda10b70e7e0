use crate::queue::PriorityQueue;
use crate::settings::TaskSetConfig;
use crate::task::{Clock, Elapsed, SharedTask, Task};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, trace};

/// Payload of a queue entry. A cancelled entry keeps its place in the heap as
/// `Vacant` until it reaches the top and is thrown away.
enum Slot {
    Live(SharedTask),
    Vacant,
}

impl Slot {
    fn holds(&self, target: *const ()) -> bool {
        match self {
            Slot::Live(task) => Arc::as_ptr(task).cast::<()>() == target,
            Slot::Vacant => false,
        }
    }
}

/// Counts gathered during one [`TaskSet::update`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Tasks whose `execute` ran
    pub executed: usize,
    /// Cancelled entries dropped from the queue
    pub discarded: usize,
}

/// Tick-driven scheduler for repeating tasks
///
/// Tasks are kept in a min-heap keyed by the absolute tick at which they are
/// next due. Each call to [`update`](TaskSet::update) runs every due task and
/// re-arms it with the delay the task itself returns.
///
/// A task set is a single scheduling point: it is not meant to be shared
/// between threads, and tasks must not call back into it from `execute`.
/// Inserting a task that is already inserted is a contract violation that is
/// not detected.
///
/// # Example
///
/// ```rust
/// use tickset_runtime::{shared, Clock, Elapsed, Task, TaskSet};
///
/// struct Counter(u32);
///
/// impl Task for Counter {
///     fn execute(&mut self, _elapsed: Elapsed, _clock: Clock) -> i64 {
///         self.0 += 1;
///         10
///     }
/// }
///
/// let mut set = TaskSet::new(1000, 0.25);
/// let counter = shared(Counter(0));
/// set.insert(counter.clone());
///
/// set.update(0);
/// set.update(5);
/// set.update(10);
/// assert_eq!(counter.lock().unwrap().0, 2);
/// ```
pub struct TaskSet {
    queue: PriorityQueue<u64, Slot>,
    clock: Clock,
    max_elapsed: f64,
    last_update_time: u64,
}

impl Default for TaskSet {
    /// An unconfigured task set; call [`set_timing`](TaskSet::set_timing)
    /// before the first update.
    fn default() -> Self {
        Self {
            queue: PriorityQueue::new(),
            clock: Clock::default(),
            max_elapsed: 0.0,
            last_update_time: 0,
        }
    }
}

impl std::fmt::Debug for TaskSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskSet")
            .field("entries", &self.queue.len())
            .field("counter_frequency", &self.clock.frequency())
            .field("max_elapsed", &self.max_elapsed)
            .field("last_update_time", &self.last_update_time)
            .finish()
    }
}

impl TaskSet {
    /// `counter_frequency` is in ticks per second, `max_elapsed` in seconds
    pub fn new(counter_frequency: u64, max_elapsed: f64) -> Self {
        let mut task_set = Self::default();
        task_set.set_timing(counter_frequency, max_elapsed);
        task_set
    }

    pub fn from_config(config: &TaskSetConfig) -> Self {
        Self::new(config.counter_frequency, config.max_elapsed)
    }

    /// Configure the clock. Negative or NaN ceilings behave as zero.
    pub fn set_timing(&mut self, counter_frequency: u64, max_elapsed: f64) {
        self.clock = Clock::new(counter_frequency);
        self.max_elapsed = max_elapsed;
    }

    /// Schedule `task` to run on the next update
    pub fn insert(&mut self, task: SharedTask) {
        self.queue.insert(self.last_update_time, Slot::Live(task));
    }

    /// Cancel `task`. Its entry stays in the queue as a tombstone until it
    /// would have run, but the task set drops its reference right away.
    /// Returns false if the task was not scheduled here.
    pub fn remove<T: Task + ?Sized>(&mut self, task: &Arc<Mutex<T>>) -> bool {
        let target = Arc::as_ptr(task).cast::<()>();
        self.queue
            .replace_where(|slot| slot.holds(target), Slot::Vacant)
            .is_some()
    }

    /// Run every task due at or before `counter` and reschedule it.
    ///
    /// `counter` is the current absolute tick and should never go backwards.
    /// When the queue is or becomes empty the recorded update time is left
    /// unchanged.
    pub fn update(&mut self, counter: u64) -> UpdateReport {
        let mut report = UpdateReport::default();

        while let Some(next_due) = self.queue.peek_min_key() {
            if next_due > counter {
                self.last_update_time = counter;
                return report;
            }

            let Some((due, slot)) = self.queue.remove_min() else {
                break;
            };

            match slot {
                Slot::Vacant => {
                    debug!(due, counter, "Dropping cancelled task entry");
                    report.discarded += 1;
                }
                Slot::Live(task) => {
                    let next_due = self.execute_due(&task, due, counter);
                    self.queue.insert(next_due, Slot::Live(task));
                    report.executed += 1;
                }
            }
        }

        report
    }

    fn execute_due(&self, task: &SharedTask, due: u64, counter: u64) -> u64 {
        let elapsed = Elapsed::new(
            counter.saturating_sub(self.last_update_time),
            self.max_elapsed,
            self.clock,
        );

        let mut task = task.lock().unwrap_or_else(PoisonError::into_inner);
        let mut delay = task.execute(elapsed, self.clock);

        let tardiness = counter - due;
        if task.tardiness_compensation() {
            delay = delay.saturating_sub(i64::try_from(tardiness).unwrap_or(i64::MAX));
        }

        // never reschedule at or before `counter`, or this update would not end
        let next_due = counter.saturating_add(delay.max(1) as u64);

        trace!(
            due,
            counter,
            elapsed = elapsed.ticks(),
            clamped = elapsed.is_clamped(),
            tardiness,
            next_due,
            "Executed task"
        );
        next_due
    }

    /// Entries in the queue, including cancelled ones not yet dropped
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Tick at which the earliest entry becomes due
    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek_min_key()
    }

    pub fn last_update_time(&self) -> u64 {
        self.last_update_time
    }

    pub fn counter_frequency(&self) -> u64 {
        self.clock.frequency()
    }

    pub fn max_elapsed(&self) -> f64 {
        self.max_elapsed
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }
}
