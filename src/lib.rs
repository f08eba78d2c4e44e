pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliArgs;

pub use crate::adapters::{BroadcastEmitter, JobDirectoryScanner, PackageManagerInstaller};
pub use crate::config::{BoardConfig, LoggingConfig};
pub use crate::core::board::StatusBoard;
pub use crate::core::installer::{install_dependencies, install_dependencies_with};
pub use crate::utils::console::{create_logger, ConsoleLogger};
pub use crate::utils::error::{BoardError, Result};
pub use crate::utils::time_format::format_console_date;
