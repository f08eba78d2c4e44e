use crate::config::toml_config::{LogFormat, LoggingConfig};
use crate::utils::time_format::format_console_date;
use chrono::Local;
use std::fmt;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Stamps tracing events with the same `[HH:MM:SS.mmm]` clock as the console logger.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleTimer;

impl FormatTime for ConsoleTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", format_console_date(&Local::now()).trim_end())
    }
}

fn default_directive(config: &LoggingConfig, verbose: bool) -> String {
    if verbose {
        "status_board=debug,info".to_string()
    } else {
        format!("status_board={}", config.level.to_ascii_lowercase())
    }
}

pub fn init_cli_logger(config: &LoggingConfig, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config, verbose)));

    match config.format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_timer(ConsoleTimer)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_timer(ConsoleTimer)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .json(),
            )
            .init(),
    }
}
