pub mod config;
pub mod error;
pub mod math;
pub mod operations;
pub mod path;
pub mod topology;

pub use config::ToolpathConfig;
pub use error::{Result, ToolpathError};
