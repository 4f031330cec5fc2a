//! Quadtree viewer harness library.

pub mod command;
pub mod config;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use command::{Command, CommandError};
pub use config::{Config, ConfigError};
pub use session::{Outcome, Session};
