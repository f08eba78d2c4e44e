use crate::core::{DependencyInstaller, InstallOptions, LogSink};
use crate::utils::error::{BoardError, Result};
use std::path::{Path, PathBuf};

pub const PACKAGES_DIR: &str = "packages";

pub fn packages_dir(root: &Path) -> PathBuf {
    root.join(PACKAGES_DIR)
}

/// Installs dependencies under `<cwd>/packages` when `options.install` is set.
///
/// The sink receives at most one line: `done!` after a successful install.
pub async fn install_dependencies<I, L>(
    options: InstallOptions,
    installer: &I,
    sink: &L,
) -> Result<()>
where
    I: DependencyInstaller + ?Sized,
    L: LogSink + ?Sized,
{
    if !options.install {
        return Ok(());
    }
    let cwd = std::env::current_dir()?;
    install_dependencies_in(&cwd, options, installer, sink).await
}

pub async fn install_dependencies_in<I, L>(
    root: &Path,
    options: InstallOptions,
    installer: &I,
    sink: &L,
) -> Result<()>
where
    I: DependencyInstaller + ?Sized,
    L: LogSink + ?Sized,
{
    if !options.install {
        tracing::debug!("Dependency installation disabled, skipping");
        return Ok(());
    }

    let target = packages_dir(root);
    tracing::info!("Installing dependencies in {}", target.display());

    installer.install(&[target]).await?;
    sink.log("done!");

    Ok(())
}

/// Callback flavour of [`install_dependencies`]. `callback` runs exactly once,
/// with `None` on success or skip and the installer's error otherwise.
pub async fn install_dependencies_with<I, L, F>(
    options: InstallOptions,
    installer: &I,
    sink: &L,
    callback: F,
) where
    I: DependencyInstaller + ?Sized,
    L: LogSink + ?Sized,
    F: FnOnce(Option<BoardError>),
{
    callback(install_dependencies(options, installer, sink).await.err());
}
