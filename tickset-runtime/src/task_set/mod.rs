mod builder;
mod task_set;

pub use builder::TaskSetBuilder;
pub use task_set::{TaskSet, UpdateReport};
