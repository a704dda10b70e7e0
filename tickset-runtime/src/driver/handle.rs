use crate::error::DriverError;
use crate::task::{Clock, SharedTask, Task};
use crate::task_set::TaskSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Handle for a running tick driver
/// Used to add and cancel tasks while it runs, and to shut it down
pub struct DriverHandle {
    task_set: Arc<Mutex<TaskSet>>,
    clock: Clock,
    base: u64,
    origin: Instant,
    shutdown: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

impl DriverHandle {
    pub(crate) fn new(
        task_set: Arc<Mutex<TaskSet>>,
        clock: Clock,
        base: u64,
        origin: Instant,
        shutdown: oneshot::Sender<()>,
        join: JoinHandle<()>,
    ) -> Self {
        Self {
            task_set,
            clock,
            base,
            origin,
            shutdown,
            join,
        }
    }

    /// Insert a task; it runs on the driver's next poll
    pub fn insert(&self, task: SharedTask) {
        self.lock().insert(task);
    }

    /// Cancel a task; see [`TaskSet::remove`]
    pub fn remove<T: Task + ?Sized>(&self, task: &Arc<Mutex<T>>) -> bool {
        self.lock().remove(task)
    }

    /// Counter value the driver would pass to the task set right now
    pub fn counter(&self) -> u64 {
        self.base
            .saturating_add(self.clock.duration_to_ticks(self.origin.elapsed()))
    }

    /// Inspect the task set between polls
    pub fn with_task_set<R>(&self, f: impl FnOnce(&TaskSet) -> R) -> R {
        f(&self.lock())
    }

    /// Stop the polling loop and hand back the task set with its queue intact
    pub async fn shutdown(self) -> Result<TaskSet, DriverError> {
        // the loop may already be gone if its runtime is shutting down
        let _ = self.shutdown.send(());
        self.join.await?;

        let mut guard = self.task_set.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(std::mem::take(&mut *guard))
    }

    fn lock(&self) -> MutexGuard<'_, TaskSet> {
        self.task_set.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
