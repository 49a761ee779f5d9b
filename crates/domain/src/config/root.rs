use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::{ResolverConfig, MAX_RECEIVE_BUFFER, MIN_RECEIVE_BUFFER};

pub const LOCAL_CONFIG_PATH: &str = "sysresolver.toml";
pub const SYSTEM_CONFIG_PATH: &str = "/etc/sysresolver/config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. sysresolver.toml in current directory
    /// 3. /etc/sysresolver/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(timeout) = overrides.timeout_ms {
            self.resolver.timeout_ms = timeout;
        }
        if let Some(size) = overrides.receive_buffer_size {
            self.resolver.receive_buffer_size = size;
        }
        if let Some(server) = overrides.nameserver {
            self.resolver.nameserver = Some(server);
        }
        if let Some(path) = overrides.resolv_conf {
            self.resolver.resolv_conf = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Resolver timeout cannot be 0".to_string(),
            ));
        }

        let size = self.resolver.receive_buffer_size;
        if !(MIN_RECEIVE_BUFFER..=MAX_RECEIVE_BUFFER).contains(&size) {
            return Err(ConfigError::Validation(format!(
                "Receive buffer size {} outside {}..={}",
                size, MIN_RECEIVE_BUFFER, MAX_RECEIVE_BUFFER
            )));
        }

        self.resolver
            .nameserver_addr()
            .map_err(ConfigError::Validation)?;

        if !is_known_level(&self.logging.level) {
            return Err(ConfigError::Validation(format!(
                "Unknown log level '{}'",
                self.logging.level
            )));
        }

        Ok(())
    }
}

fn is_known_level(level: &str) -> bool {
    matches!(
        level.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub timeout_ms: Option<u64>,
    pub receive_buffer_size: Option<usize>,
    pub nameserver: Option<String>,
    pub resolv_conf: Option<String>,
    pub log_level: Option<String>,
}
