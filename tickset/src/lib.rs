//! # Tickset - Tick-driven Periodic Task Scheduling for Rust
//!
//! This library runs a set of repeating tasks from an external tick counter,
//! the way a game loop or a control loop schedules its periodic work.
//!
//! ## Features
//!
//! - **One queue**: every task lives in a single min-heap keyed by its next due tick
//! - **Self-timed tasks**: each execution returns the delay until the next one
//! - **Tardiness compensation**: late executions shorten the next delay so the
//!   long-run rate matches the requested rate
//! - **Elapsed ceiling**: a long stall never hands a task more than `max_elapsed` seconds
//! - **Cheap cancellation**: removed tasks are tombstoned and dropped lazily
//! - **Config support**: load the clock settings from TOML or YAML
//! - **Tokio driver**: tick a task set from a monotonic clock in the background
//!
//! ## Quick Start
//!
//! ```rust
//! use tickset::{periodic, shared, Seconds, SecondsTask, TaskSet};
//!
//! struct Physics {
//!     steps: u64,
//! }
//!
//! #[periodic(compensate_tardiness)]
//! impl SecondsTask for Physics {
//!     fn execute(&mut self, _elapsed: f64) -> f64 {
//!         self.steps += 1;
//!         1.0 / 60.0
//!     }
//! }
//!
//! let mut task_set = TaskSet::new(60, 1.0);
//! let physics = shared(Seconds(Physics { steps: 0 }));
//! task_set.insert(physics.clone());
//!
//! for tick in 0..60 {
//!     task_set.update(tick);
//! }
//! assert_eq!(physics.lock().unwrap().0.steps, 60);
//! ```
//!
//! ## Driving from a clock
//!
//! ```rust,no_run
//! use tickset::TaskSetBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let handle = TaskSetBuilder::with_toml("config/tickset.toml")?
//!         .driver()?
//!         .start();
//!
//!     tokio::signal::ctrl_c().await?;
//!     let _task_set = handle.shutdown().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! Create `config/tickset.toml`:
//!
//! ```toml
//! [task_set]
//! counter_frequency = 1000
//! max_elapsed = "250ms"
//! poll_interval = "1ms"
//! ```
//!
//! Or `config/tickset.yaml`:
//!
//! ```yaml
//! task_set:
//!   counter_frequency: 1000
//!   max_elapsed: 0.25
//! ```
//!
//! You can also use environment variables with the `TICKSET_` prefix:
//!
//! ```bash
//! export TICKSET_TASK_SET__COUNTER_FREQUENCY=60
//! export TICKSET_TASK_SET__MAX_ELAPSED=100ms
//! ```

// Re-export macros
pub use tickset_macro::periodic;

// Re-export core types
pub use tickset_runtime::{
    shared, Clock, ConfigError, DriverError, DriverHandle, Elapsed, Seconds, SecondsTask, SharedTask,
    Task, TaskSet, TaskSetBuilder, TaskSetConfig, TickDriver, TimeUnit, UpdateReport,
};

// Lower-level building blocks
pub use tickset_runtime;
