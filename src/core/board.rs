use crate::core::installer::install_dependencies_in;
use crate::core::{
    BoardOptions, DependencyInstaller, EventEmitter, InstallOptions, JobInitialiser, LogSink,
    StatusEvent,
};
use crate::utils::error::Result;
use chrono::Local;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast::{self, error::RecvError};

/// A real-time subscriber. Yields the board's `serverinfo` first, then every
/// event broadcast after the connection was made.
pub struct Connection {
    greeting: Option<StatusEvent>,
    events: broadcast::Receiver<StatusEvent>,
}

impl Connection {
    /// `None` once the channel is closed.
    pub async fn next_event(&mut self) -> Option<StatusEvent> {
        if let Some(greeting) = self.greeting.take() {
            return Some(greeting);
        }

        loop {
            match self.events.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Subscriber lagged, {} event(s) dropped", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

/// Bootstraps the dashboard: installs package dependencies, starts jobs and
/// announces the server to real-time subscribers.
pub struct StatusBoard {
    root: PathBuf,
    installer: Arc<dyn DependencyInstaller>,
    jobs: Arc<dyn JobInitialiser>,
    logger: Arc<dyn LogSink>,
    emitter: Arc<dyn EventEmitter>,
    server_info: Mutex<Option<StatusEvent>>,
}

impl StatusBoard {
    pub fn new(
        root: PathBuf,
        installer: Arc<dyn DependencyInstaller>,
        jobs: Arc<dyn JobInitialiser>,
        logger: Arc<dyn LogSink>,
        emitter: Arc<dyn EventEmitter>,
    ) -> Self {
        Self {
            root,
            installer,
            jobs,
            logger,
            emitter,
            server_info: Mutex::new(None),
        }
    }

    /// Attaches a subscriber. Once the board has started, the subscriber is
    /// greeted with `serverinfo` before any live event.
    pub fn connect(&self, events: broadcast::Receiver<StatusEvent>) -> Connection {
        let greeting = match self.server_info.lock() {
            Ok(info) => info.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        tracing::debug!("Subscriber connected (greeting: {})", greeting.is_some());

        Connection { greeting, events }
    }

    /// Jobs are initialised and `serverinfo` is emitted even when the install
    /// fails; the install error still takes precedence in the returned result.
    /// Failures are reported once, on the logger's error stream.
    pub async fn start(&self, options: Option<BoardOptions>) -> Result<()> {
        let options = options.unwrap_or_default();
        tracing::info!(
            "Starting status board on port {} (install: {})",
            options.port,
            options.install
        );

        let installed = install_dependencies_in(
            &self.root,
            InstallOptions::from(&options),
            self.installer.as_ref(),
            self.logger.as_ref(),
        )
        .await;

        if let Err(e) = &installed {
            tracing::error!("❌ Dependency installation failed: {}", e);
            self.logger.error(&e.user_friendly_message());
        }

        let started = match self.jobs.init(&options).await {
            Ok(workers) => {
                tracing::info!("Initialised {} job(s)", workers.len());
                Ok(())
            }
            Err(e) => {
                tracing::error!("❌ Job initialisation failed: {}", e);
                self.logger.error(&e.user_friendly_message());
                Err(e)
            }
        };

        let server_info = StatusEvent::ServerInfo {
            port: options.port,
            start_time: Local::now(),
        };
        self.emitter.emit(&server_info);
        match self.server_info.lock() {
            Ok(mut info) => *info = Some(server_info),
            Err(poisoned) => *poisoned.into_inner() = Some(server_info),
        }

        installed.and(started)
    }
}
