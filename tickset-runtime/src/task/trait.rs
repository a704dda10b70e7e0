use super::clock::Clock;
use super::elapsed::Elapsed;
use std::sync::{Arc, Mutex};

/// A repeating unit of work driven by a [`TaskSet`](crate::TaskSet)
///
/// The task set calls `execute` every time the task becomes due and uses the
/// returned value to schedule the next call. All timing state lives in the
/// task set; a task only decides how long to wait.
///
/// # Example
///
/// ```rust
/// use tickset_runtime::{Clock, Elapsed, Task};
///
/// struct Blink {
///     on: bool,
/// }
///
/// impl Task for Blink {
///     fn execute(&mut self, _elapsed: Elapsed, clock: Clock) -> i64 {
///         self.on = !self.on;
///         // twice per second
///         clock.seconds_to_ticks(0.5)
///     }
/// }
/// ```
pub trait Task: Send {
    /// Run one step of the task.
    ///
    /// `elapsed` is the time since the previous update of the task set, capped
    /// at its elapsed ceiling. The return value is the delay in ticks until the
    /// next execution; zero or negative means "on the very next update".
    fn execute(&mut self, elapsed: Elapsed, clock: Clock) -> i64;

    /// Whether lateness of this execution is subtracted from the next delay
    fn tardiness_compensation(&self) -> bool {
        false
    }
}

/// A task that thinks in seconds instead of ticks
///
/// Wrap it in [`Seconds`] to insert it into a task set.
pub trait SecondsTask: Send {
    /// Same contract as [`Task::execute`] with both values expressed in seconds.
    /// The returned delay must be finite; NaN is treated as zero.
    fn execute(&mut self, elapsed: f64) -> f64;

    fn tardiness_compensation(&self) -> bool {
        false
    }
}

/// Adapter running a [`SecondsTask`] on the tick-based contract
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Seconds<T>(pub T);

impl<T: SecondsTask> Task for Seconds<T> {
    fn execute(&mut self, elapsed: Elapsed, clock: Clock) -> i64 {
        let delay = self.0.execute(elapsed.seconds());
        clock.seconds_to_ticks(delay)
    }

    fn tardiness_compensation(&self) -> bool {
        self.0.tardiness_compensation()
    }
}

/// Shared handle to a task; the owner keeps one clone, the task set another
pub type SharedTask = Arc<Mutex<dyn Task>>;

/// Wrap a task so it can be inserted into a task set while the caller keeps
/// typed access to it
pub fn shared<T: Task + 'static>(task: T) -> Arc<Mutex<T>> {
    Arc::new(Mutex::new(task))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Halver {
        last_elapsed: f64,
        compensate: bool,
    }

    impl SecondsTask for Halver {
        fn execute(&mut self, elapsed: f64) -> f64 {
            self.last_elapsed = elapsed;
            elapsed / 2.0
        }

        fn tardiness_compensation(&self) -> bool {
            self.compensate
        }
    }

    #[test]
    fn seconds_adapter_converts_both_ways() {
        let mut task = Seconds(Halver {
            last_elapsed: 0.0,
            compensate: false,
        });
        let clock = Clock::new(60);
        let delay = Task::execute(&mut task, Elapsed::new(120, 5.0, clock), clock);
        assert_eq!(task.0.last_elapsed, 2.0);
        assert_eq!(delay, 60);
    }

    #[test]
    fn seconds_adapter_sees_ceiling_between_ticks() {
        let mut task = Seconds(Halver {
            last_elapsed: 0.0,
            compensate: false,
        });
        let clock = Clock::new(3);
        let delay = Task::execute(&mut task, Elapsed::new(9, 0.2, clock), clock);
        assert_eq!(task.0.last_elapsed, 0.2);
        // 0.1 s at 3 Hz rounds to 0 ticks
        assert_eq!(delay, 0);
    }

    #[test]
    fn seconds_adapter_forwards_compensation_flag() {
        let task = Seconds(Halver {
            last_elapsed: 0.0,
            compensate: true,
        });
        assert!(Task::tardiness_compensation(&task));
    }

    #[test]
    fn shared_task_coerces_to_trait_object() {
        let typed = shared(Seconds(Halver {
            last_elapsed: 0.0,
            compensate: false,
        }));
        let erased: SharedTask = typed.clone();
        assert_eq!(Arc::strong_count(&typed), 2);
        drop(erased);
        assert_eq!(Arc::strong_count(&typed), 1);
    }
}
