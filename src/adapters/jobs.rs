use crate::config::toml_config::LoggingConfig;
use crate::core::installer::packages_dir;
use crate::domain::model::{BoardOptions, JobWorker};
use crate::domain::ports::{EventEmitter, JobInitialiser, LogSink};
use crate::utils::console::create_logger;
use crate::utils::error::{BoardError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const JOBS_DIR: &str = "jobs";

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

/// Discovers jobs laid out as `packages/<package>/jobs/<job>/`.
pub struct JobDirectoryScanner {
    root: PathBuf,
    logging: LoggingConfig,
    emitter: Option<Arc<dyn EventEmitter>>,
}

impl JobDirectoryScanner {
    pub fn new(
        root: PathBuf,
        logging: LoggingConfig,
        emitter: Option<Arc<dyn EventEmitter>>,
    ) -> Self {
        Self {
            root,
            logging,
            emitter,
        }
    }

    async fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        let mut entries = tokio::fs::read_dir(dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                dirs.push(entry.path());
            }
        }

        dirs.sort();
        Ok(dirs)
    }

    fn dir_name(path: &Path) -> Result<String> {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| BoardError::JobInitError {
                message: format!("unreadable directory name: {}", path.display()),
            })
    }

    pub async fn scan(&self) -> Result<Vec<JobWorker>> {
        let packages = packages_dir(&self.root);
        if !is_dir(&packages).await {
            return Ok(Vec::new());
        }

        let mut workers = Vec::new();
        for package in Self::sorted_subdirs(&packages).await? {
            let jobs = package.join(JOBS_DIR);
            if !is_dir(&jobs).await {
                continue;
            }
            let dashboard_name = Self::dir_name(&package)?;
            for job in Self::sorted_subdirs(&jobs).await? {
                workers.push(JobWorker::new(dashboard_name.clone(), Self::dir_name(&job)?));
            }
        }

        Ok(workers)
    }
}

#[async_trait]
impl JobInitialiser for JobDirectoryScanner {
    async fn init(&self, options: &BoardOptions) -> Result<Vec<JobWorker>> {
        let workers = self.scan().await?;

        for worker in &workers {
            let logger = create_logger(&self.logging, Some(worker), self.emitter.clone());
            logger.log(&format!("job ready (board port {})", options.port));
        }

        Ok(workers)
    }
}
