// src/config/mod.rs
mod schema;

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config as ConfigLoader, FileFormat};
use tracing::{debug, info, warn};

pub use schema::Config;

use crate::engine::MAX_CONCURRENCY;
use crate::error::{LeakerError, LeakerResult};

const ENV_PREFIX: &str = "LEAKER";

impl Config {
    /// Load configuration: built-in defaults, then the user file, then `LEAKER_*` variables.
    pub fn load(config_path: Option<&Path>) -> LeakerResult<Self> {
        let mut builder = ConfigLoader::builder().add_source(config::File::from_str(
            include_str!("../../config/default.toml"),
            FileFormat::Toml,
        ));

        match config_path {
            Some(path) if path.exists() => {
                debug!("Loading configuration from {}", path.display());
                builder = builder.add_source(config::File::from(path));
            }
            Some(path) => {
                return Err(LeakerError::FileError {
                    path: path.to_path_buf(),
                    message: "configuration file not found".to_string(),
                });
            }
            None => {
                if let Some(default_path) = Self::default_path().filter(|p| p.exists()) {
                    debug!("Loading configuration from {}", default_path.display());
                    builder = builder.add_source(config::File::from(default_path.as_path()));
                }
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("sources"),
        );

        let mut config: Config = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| LeakerError::ConfigError(format!("Failed to load configuration: {}", e)))?;

        if config.user_agent.trim().is_empty() {
            config.user_agent = Config::default().user_agent;
        }

        Ok(config)
    }

    /// `<config dir>/leaker/config.toml`, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("leaker").join("config.toml"))
    }

    /// Write a default configuration file, refusing to overwrite unless `force` is set
    pub fn init(path: Option<&Path>, force: bool) -> LeakerResult<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()
                .ok_or_else(|| LeakerError::ConfigError("No configuration directory on this platform".to_string()))?,
        };

        if path.exists() && !force {
            return Err(LeakerError::ConfigError(format!(
                "Configuration already exists at {}. Use --force to overwrite.",
                path.display()
            )));
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| LeakerError::FileError {
                path: parent.to_path_buf(),
                message: format!("Failed to create directory: {}", e),
            })?;
        }

        Config::default().save(&path)?;
        Ok(path)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> LeakerResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LeakerError::SerializationError(format!("Failed to serialize configuration: {}", e)))?;

        std::fs::write(path, content).map_err(|e| LeakerError::FileError {
            path: path.to_path_buf(),
            message: format!("Failed to write configuration: {}", e),
        })?;

        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        if self.timeout_seconds == 0 {
            warn!("timeout_seconds = 0 is not allowed, using 1 second");
            return Duration::from_secs(1);
        }
        Duration::from_secs(self.timeout_seconds)
    }

    /// Configured concurrency, or the CPU count when unset
    pub fn concurrency(&self) -> usize {
        match self.concurrency {
            0 => num_cpus::get().min(MAX_CONCURRENCY),
            n if n > MAX_CONCURRENCY => {
                warn!("concurrency = {} is above the limit, using {}", n, MAX_CONCURRENCY);
                MAX_CONCURRENCY
            }
            n => n,
        }
    }
}
