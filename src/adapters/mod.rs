// Adapters layer: concrete implementations of the domain ports.

pub mod emitter;
pub mod jobs;
pub mod package_manager;

pub use emitter::BroadcastEmitter;
pub use jobs::JobDirectoryScanner;
pub use package_manager::PackageManagerInstaller;
