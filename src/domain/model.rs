use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallOptions {
    pub install: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardOptions {
    pub port: u16,
    pub install: bool,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            install: false,
        }
    }
}

impl From<&BoardOptions> for InstallOptions {
    fn from(options: &BoardOptions) -> Self {
        Self {
            install: options.install,
        }
    }
}

/// A job running on behalf of a dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobWorker {
    pub dashboard_name: String,
    pub job_name: String,
}

impl JobWorker {
    pub fn new(dashboard_name: impl Into<String>, job_name: impl Into<String>) -> Self {
        Self {
            dashboard_name: dashboard_name.into(),
            job_name: job_name.into(),
        }
    }

    pub fn log_prefix(&self) -> String {
        format!("[dashboard: {}] [job: {}] ", self.dashboard_name, self.job_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Log,
    Error,
}

/// Events pushed to real-time subscribers of the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum StatusEvent {
    Server {
        #[serde(rename = "type")]
        level: LogLevel,
        msg: String,
    },
    ServerInfo {
        port: u16,
        start_time: DateTime<Local>,
    },
}

impl StatusEvent {
    pub fn channel(&self) -> &'static str {
        match self {
            StatusEvent::Server { .. } => "server",
            StatusEvent::ServerInfo { .. } => "serverinfo",
        }
    }

    pub fn to_json(&self) -> crate::utils::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
