use super::handle::DriverHandle;
use crate::error::DriverError;
use crate::task_set::TaskSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, trace};

/// Clock source that feeds a task set from Tokio's monotonic timer
///
/// Every `poll_interval` the driver converts the time since start into ticks
/// at the task set's counter frequency and calls
/// [`TaskSet::update`]. The counter continues from the task set's last
/// update time, so a set that was ticked by hand can be handed over.
#[derive(Debug)]
pub struct TickDriver {
    task_set: TaskSet,
    poll_interval: Duration,
}

impl TickDriver {
    pub fn new(task_set: TaskSet, poll_interval: Duration) -> Result<Self, DriverError> {
        if !task_set.clock().is_configured() {
            return Err(DriverError::Unconfigured);
        }
        if poll_interval.is_zero() {
            return Err(DriverError::ZeroPollInterval);
        }
        Ok(Self {
            task_set,
            poll_interval,
        })
    }

    pub fn task_set(&self) -> &TaskSet {
        &self.task_set
    }

    pub fn task_set_mut(&mut self) -> &mut TaskSet {
        &mut self.task_set
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Spawn the polling loop and return a handle to control it
    ///
    /// Dropping the handle stops the loop at its next poll.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn start(self) -> DriverHandle {
        let clock = self.task_set.clock();
        let base = self.task_set.last_update_time();
        let poll_interval = self.poll_interval;
        let origin = Instant::now();

        info!(
            counter_frequency = clock.frequency(),
            poll_interval_us = poll_interval.as_micros() as u64,
            start_counter = base,
            tasks = self.task_set.len(),
            "Starting tick driver"
        );

        let task_set = Arc::new(Mutex::new(self.task_set));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let driven = task_set.clone();
        let join = tokio::spawn(async move {
            let mut interval = time::interval(poll_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = interval.tick() => {
                        let counter = base.saturating_add(clock.duration_to_ticks(origin.elapsed()));
                        let report = driven
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .update(counter);
                        if report.executed > 0 || report.discarded > 0 {
                            trace!(
                                counter,
                                executed = report.executed,
                                discarded = report.discarded,
                                "Tick"
                            );
                        }
                    }
                }
            }

            debug!("Tick driver stopped");
        });

        DriverHandle::new(task_set, clock, base, origin, shutdown_tx, join)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unconfigured_task_set() {
        let err = TickDriver::new(TaskSet::default(), Duration::from_millis(1)).unwrap_err();
        assert!(matches!(err, DriverError::Unconfigured));
    }

    #[test]
    fn rejects_zero_poll_interval() {
        let err = TickDriver::new(TaskSet::new(1000, 0.1), Duration::ZERO).unwrap_err();
        assert!(matches!(err, DriverError::ZeroPollInterval));
    }

    #[tokio::test(start_paused = true)]
    async fn counter_continues_from_last_update_time() {
        let mut task_set = TaskSet::new(1000, 0.1);
        task_set.insert(crate::task::shared(crate::task::Seconds(Idle)));
        task_set.update(5_000);
        assert_eq!(task_set.last_update_time(), 5_000);

        let handle = TickDriver::new(task_set, Duration::from_millis(1))
            .expect("configured driver")
            .start();
        time::sleep(Duration::from_millis(20)).await;
        assert!(handle.counter() >= 5_020);

        let task_set = handle.shutdown().await.expect("clean shutdown");
        assert!(task_set.last_update_time() >= 5_019);
    }

    struct Idle;

    impl crate::task::SecondsTask for Idle {
        fn execute(&mut self, _elapsed: f64) -> f64 {
            0.001
        }
    }
}
