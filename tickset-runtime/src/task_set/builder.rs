use super::task_set::TaskSet;
use crate::driver::TickDriver;
use crate::error::{ConfigError, DriverError};
use crate::settings::{load_toml_config, load_yaml_config, TaskSetConfig};
use crate::task::SharedTask;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Builder for a task set and, optionally, the driver that ticks it
pub struct TaskSetBuilder {
    config: TaskSetConfig,
    tasks: Vec<SharedTask>,
}

impl Default for TaskSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskSetBuilder {
    /// Create a builder with an unconfigured clock (frequency 0, ceiling 0)
    pub fn new() -> Self {
        Self::with_config(TaskSetConfig::new(0, 0.0))
    }

    /// Create with the `[task_set]` section of a TOML file
    pub fn with_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = TaskSetConfig::from_config(&load_toml_config(path)?)?;
        Ok(Self::with_config(config))
    }

    /// Create with the `task_set` section of a YAML file
    pub fn with_yaml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = TaskSetConfig::from_config(&load_yaml_config(path)?)?;
        Ok(Self::with_config(config))
    }

    /// Create with custom config
    pub fn with_config(config: TaskSetConfig) -> Self {
        Self {
            config,
            tasks: Vec::new(),
        }
    }

    pub fn counter_frequency(mut self, counter_frequency: u64) -> Self {
        self.config.counter_frequency = counter_frequency;
        self
    }

    /// Ceiling in seconds on the elapsed time a task sees in one execution
    pub fn max_elapsed(mut self, max_elapsed: f64) -> Self {
        self.config.max_elapsed = max_elapsed;
        self
    }

    /// Clock sampling period of the driver; ignored by [`build`](Self::build)
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.config.poll_interval = poll_interval;
        self
    }

    /// Register a task to be inserted when the task set is built
    ///
    /// # Example
    ///
    /// ```rust
    /// use tickset_runtime::{shared, Clock, Elapsed, Task, TaskSetBuilder};
    ///
    /// struct Heartbeat;
    ///
    /// impl Task for Heartbeat {
    ///     fn execute(&mut self, _elapsed: Elapsed, clock: Clock) -> i64 {
    ///         clock.seconds_to_ticks(1.0)
    ///     }
    /// }
    ///
    /// let task_set = TaskSetBuilder::new()
    ///     .counter_frequency(1000)
    ///     .max_elapsed(0.25)
    ///     .task(shared(Heartbeat))
    ///     .build();
    /// assert_eq!(task_set.len(), 1);
    /// ```
    pub fn task(mut self, task: SharedTask) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn config(&self) -> &TaskSetConfig {
        &self.config
    }

    /// Build the task set with every registered task due on its first update
    pub fn build(self) -> TaskSet {
        info!(
            counter_frequency = self.config.counter_frequency,
            max_elapsed = self.config.max_elapsed,
            tasks = self.tasks.len(),
            "Building task set"
        );

        let mut task_set = TaskSet::from_config(&self.config);
        for task in self.tasks {
            task_set.insert(task);
        }
        task_set
    }

    /// Build the task set and wrap it in a driver that is ready to start
    pub fn driver(self) -> Result<TickDriver, DriverError> {
        let poll_interval = self.config.poll_interval;
        TickDriver::new(self.build(), poll_interval)
    }
}
