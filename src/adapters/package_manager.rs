use crate::config::toml_config::InstallerConfig;
use crate::domain::ports::DependencyInstaller;
use crate::utils::error::{BoardError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

const MANIFEST: &str = "package.json";

async fn metadata_matches(path: &Path, check: fn(&std::fs::Metadata) -> bool) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| check(&meta))
        .unwrap_or(false)
}

/// Runs an external package manager (npm by default) in every package that
/// ships a `package.json`.
#[derive(Debug, Clone)]
pub struct PackageManagerInstaller {
    program: String,
    args: Vec<String>,
}

impl PackageManagerInstaller {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &InstallerConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }

    /// Immediate sub-directories of `root` holding a manifest, sorted by name.
    async fn package_dirs(root: &Path) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        let mut entries = tokio::fs::read_dir(root).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_dir()
                && metadata_matches(&path.join(MANIFEST), std::fs::Metadata::is_file).await
            {
                dirs.push(path);
            }
        }

        dirs.sort();
        Ok(dirs)
    }

    async fn run_in(&self, dir: &Path) -> Result<()> {
        tracing::info!("📦 {} {} in {}", self.program, self.args.join(" "), dir.display());

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(dir)
            .status()
            .await
            .map_err(|source| BoardError::InstallerSpawnError {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(BoardError::InstallFailedError {
                directory: dir.display().to_string(),
                status: status.to_string(),
            });
        }

        Ok(())
    }
}

impl Default for PackageManagerInstaller {
    fn default() -> Self {
        Self::from_config(&InstallerConfig::default())
    }
}

#[async_trait]
impl DependencyInstaller for PackageManagerInstaller {
    async fn install(&self, directories: &[PathBuf]) -> Result<()> {
        for root in directories {
            if !metadata_matches(root, std::fs::Metadata::is_dir).await {
                tracing::debug!("{} does not exist, nothing to install", root.display());
                continue;
            }

            let packages = Self::package_dirs(root).await?;
            tracing::debug!("Found {} package(s) in {}", packages.len(), root.display());

            for package in &packages {
                self.run_in(package).await?;
            }
        }

        Ok(())
    }
}
