pub mod toml_config;

pub use toml_config::{BoardConfig, InstallerConfig, LogFormat, LoggingConfig, ServerConfig};

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "status-board")]
#[command(about = "Install dashboard package dependencies and start the status board")]
pub struct CliArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Port announced to status subscribers
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Install package dependencies before starting (overrides the config file)
    #[arg(long)]
    pub install: Option<bool>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliArgs {
    pub fn load_config(&self) -> crate::utils::error::Result<BoardConfig> {
        let mut config = match &self.config {
            Some(path) => BoardConfig::from_file(path)?,
            None => BoardConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut BoardConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(install) = self.install {
            config.server.install = install;
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides() {
        let args = CliArgs::parse_from(["status-board", "--port", "1234", "--install", "true"]);
        let config = args.load_config().unwrap();

        assert_eq!(config.server.port, 1234);
        assert!(config.server.install);
        assert!(!args.verbose);
    }

    #[test]
    fn test_no_overrides_keeps_file_values() {
        let args = CliArgs::parse_from(["status-board"]);
        let mut config =
            BoardConfig::from_toml_str("[server]\nport = 9000\ninstall = true\n").unwrap();
        args.apply_overrides(&mut config);

        assert_eq!(config.server.port, 9000);
        assert!(config.server.install);
    }
}
