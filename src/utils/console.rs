//! Console logger bound to stdout / stderr.
//!
//! Job context and the event emitter are optional. When given, every line is
//! prefixed with the job worker and mirrored to subscribers as a `server` event.

use crate::config::toml_config::LoggingConfig;
use crate::domain::model::{JobWorker, LogLevel, StatusEvent};
use crate::domain::ports::{EventEmitter, LogSink};
use crate::utils::time_format::format_console_date;
use chrono::Local;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

type SharedWriter = Mutex<Box<dyn Write + Send>>;

pub struct ConsoleLogger {
    prefix: String,
    timestamps: bool,
    emitter: Option<Arc<dyn EventEmitter>>,
    out: SharedWriter,
    err: SharedWriter,
}

/// Builds a console logger writing to the process's stdout and stderr.
pub fn create_logger(
    config: &LoggingConfig,
    job_worker: Option<&JobWorker>,
    emitter: Option<Arc<dyn EventEmitter>>,
) -> ConsoleLogger {
    ConsoleLogger::with_writers(
        config,
        job_worker,
        emitter,
        Box::new(io::stdout()),
        Box::new(io::stderr()),
    )
}

impl ConsoleLogger {
    pub fn with_writers(
        config: &LoggingConfig,
        job_worker: Option<&JobWorker>,
        emitter: Option<Arc<dyn EventEmitter>>,
        out: Box<dyn Write + Send>,
        err: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            prefix: job_worker.map(JobWorker::log_prefix).unwrap_or_default(),
            timestamps: config.timestamps,
            emitter,
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }

    fn write_line(&self, level: LogLevel, message: &str) {
        let text = format!("{}{}", self.prefix, message);
        let line = if self.timestamps {
            format!("{}{}", format_console_date(&Local::now()), text)
        } else {
            text.clone()
        };

        let writer = match level {
            LogLevel::Log => &self.out,
            LogLevel::Error => &self.err,
        };

        match writer.lock() {
            Ok(mut w) => {
                if let Err(e) = writeln!(w, "{}", line).and_then(|_| w.flush()) {
                    tracing::warn!("Failed to write console line: {}", e);
                }
            }
            Err(_) => tracing::warn!("Console writer lock poisoned, dropping line"),
        }

        if let Some(emitter) = &self.emitter {
            emitter.emit(&StatusEvent::Server { level, msg: text });
        }
    }
}

impl LogSink for ConsoleLogger {
    fn log(&self, message: &str) {
        self.write_line(LogLevel::Log, message);
    }

    fn error(&self, message: &str) {
        self.write_line(LogLevel::Error, message);
    }
}
