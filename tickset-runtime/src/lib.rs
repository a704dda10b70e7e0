//! Tickset Runtime - Core runtime for tick-driven periodic tasks
//!
//! This crate provides the priority queue, the task contract, the task set
//! that runs due tasks on every update, configuration loading, and a Tokio
//! driver that ticks a task set from a monotonic clock.

mod driver;
mod error;
mod queue;
mod settings;
mod task;
mod task_set;
mod time_unit;

// Re-export public API
pub use driver::{DriverHandle, TickDriver};
pub use error::{ConfigError, DriverError};
pub use queue::PriorityQueue;
pub use settings::{load_toml_config, load_yaml_config, TaskSetConfig, ENV_PREFIX, SECTION};
pub use task::{shared, Clock, Elapsed, Seconds, SecondsTask, SharedTask, Task};
pub use task_set::{TaskSet, TaskSetBuilder, UpdateReport};
pub use time_unit::TimeUnit;
