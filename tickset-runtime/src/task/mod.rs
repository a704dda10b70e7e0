mod clock;
mod elapsed;
mod r#trait;

pub use clock::Clock;
pub use elapsed::Elapsed;
pub use r#trait::{shared, Seconds, SecondsTask, SharedTask, Task};
