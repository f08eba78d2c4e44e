use crate::domain::model::{BoardOptions, JobWorker, StatusEvent};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

#[async_trait]
pub trait DependencyInstaller: Send + Sync {
    async fn install(&self, directories: &[PathBuf]) -> Result<()>;
}

pub trait LogSink: Send + Sync {
    fn log(&self, message: &str);
    fn error(&self, message: &str);
}

pub trait EventEmitter: Send + Sync {
    fn emit(&self, event: &StatusEvent);
}

#[async_trait]
pub trait JobInitialiser: Send + Sync {
    async fn init(&self, options: &BoardOptions) -> Result<Vec<JobWorker>>;
}
