//! Async tasks
//!
//! Both tasks run on the main executor; the console lives on its own thread.

pub mod progress;
pub mod routine;

pub use progress::progress_task;
pub use routine::{routine_task, HostEngine};
