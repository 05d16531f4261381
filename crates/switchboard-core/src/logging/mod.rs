//! Logging abstractions for runtime-agnostic logging

mod traits;
mod console;
mod memory;

pub use traits::{Logger, LogLevel, NoOpLogger, SharedLogger};
pub use console::{ConsoleLogger, LOG_LEVEL_ENV};
pub use memory::MemoryLogger;
