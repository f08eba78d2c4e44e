pub mod board;
pub mod installer;

pub use crate::domain::model::{BoardOptions, InstallOptions, JobWorker, LogLevel, StatusEvent};
pub use crate::domain::ports::{DependencyInstaller, EventEmitter, JobInitialiser, LogSink};
pub use crate::utils::error::Result;
