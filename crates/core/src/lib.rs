// crates/core/src/lib.rs
pub mod aggregate;
pub mod analysis;
pub mod config;
pub mod error;
pub mod interval;
pub mod palette;
pub mod paths;
pub mod window;

pub use aggregate::*;
pub use analysis::*;
pub use config::{Config, DatabaseConfig, LogConfig, LogFormat, ServerConfig};
pub use error::*;
pub use interval::*;
pub use window::*;
