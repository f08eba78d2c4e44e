use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to launch installer '{program}': {source}")]
    InstallerSpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Dependency installation failed in {directory}: {status}")]
    InstallFailedError { directory: String, status: String },

    #[error("Job initialisation error: {message}")]
    JobInitError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Installation,
    Jobs,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl BoardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BoardError::ConfigError { .. }
            | BoardError::ConfigValidationError { .. }
            | BoardError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            BoardError::InstallerSpawnError { .. } | BoardError::InstallFailedError { .. } => {
                ErrorCategory::Installation
            }
            BoardError::JobInitError { .. } => ErrorCategory::Jobs,
            BoardError::IoError(_) | BoardError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BoardError::JobInitError { .. } => ErrorSeverity::Medium,
            BoardError::InstallFailedError { .. } => ErrorSeverity::Medium,
            BoardError::ConfigError { .. }
            | BoardError::ConfigValidationError { .. }
            | BoardError::InvalidConfigValueError { .. }
            | BoardError::InstallerSpawnError { .. } => ErrorSeverity::High,
            BoardError::IoError(_) | BoardError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            BoardError::ConfigError { .. } | BoardError::ConfigValidationError { .. } => {
                "Check the configuration file syntax and section names".to_string()
            }
            BoardError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration", field)
            }
            BoardError::InstallerSpawnError { program, .. } => {
                format!("Make sure '{}' is installed and on PATH", program)
            }
            BoardError::InstallFailedError { directory, .. } => {
                format!("Run the installer manually in {} to see its output", directory)
            }
            BoardError::JobInitError { .. } => {
                "Check the layout of packages/<package>/jobs".to_string()
            }
            BoardError::IoError(_) => "Check file permissions and available disk space".to_string(),
            BoardError::SerializationError(_) => "Report this as a bug".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Installation => format!("Could not install dependencies: {}", self),
            ErrorCategory::Jobs => format!("Could not start jobs: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;
