mod driver;
mod handle;

pub use driver::TickDriver;
pub use handle::DriverHandle;
