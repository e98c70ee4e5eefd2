//! ==============================================================================
//! config.rs - Station Configuration Loader
//! ==============================================================================
//!
//! purpose:
//!     defines the schema for `station.toml`.
//!     loads configuration from file or falls back to defaults when no
//!     file exists. a file that exists but does not parse is an error.
//!
//! structure:
//!     - DataConfig: Where the readings file lives (shared by generate/serve/plot).
//!     - ServerConfig: Bind address of the HTTP endpoint.
//!     - SimulationConfig: Duration, interval and optional seed for generation.
//!     - PlotConfig: Chart output path and size.
//!     - LoggingConfig: Default log level when RUST_LOG is unset.
//!
//! every section may be omitted; missing sections take their defaults.
//!
//! ==============================================================================

use crate::error::{Result, StationError};
use crate::simulator::SimulationParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct StationConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub plot: PlotConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub duration_minutes: u64,
    pub interval_seconds: u64,
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlotConfig {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("data").join("readings.csv") }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: "0.0.0.0:8000".to_string() }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { duration_minutes: 120, interval_seconds: 60, seed: None }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("plots").join("weather.svg"),
            width: 800,
            height: 900,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

impl SimulationConfig {
    pub fn params(&self) -> SimulationParams {
        SimulationParams {
            duration_minutes: self.duration_minutes,
            interval_seconds: self.interval_seconds,
            seed: self.seed,
        }
    }
}

impl StationConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| StationError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| StationError::Config(format!("Failed to parse config: {}", e)))
    }

    /// First existing file among the default locations
    pub fn find() -> Option<PathBuf> {
        [
            PathBuf::from("config").join("station.toml"),
            PathBuf::from("..").join("config").join("station.toml"),
        ]
        .into_iter()
        .find(|path| path.exists())
    }

    /// Log configuration summary
    pub fn log_summary(&self) {
        tracing::info!(
            data = %self.data.path.display(),
            bind = %self.server.bind,
            duration_minutes = self.simulation.duration_minutes,
            interval_seconds = self.simulation.interval_seconds,
            seed = ?self.simulation.seed,
            log_level = %self.logging.level,
            "[CONFIG] effective configuration"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = StationConfig::from_toml("").unwrap();
        assert_eq!(config, StationConfig::default());
        assert_eq!(config.data.path, PathBuf::from("data/readings.csv"));
        assert_eq!(config.simulation.interval_seconds, 60);
        assert_eq!(config.simulation.seed, None);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = StationConfig::from_toml(
            r#"
            [data]
            path = "/var/lib/station/readings.csv"

            [simulation]
            interval_seconds = 30
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.data.path, PathBuf::from("/var/lib/station/readings.csv"));
        assert_eq!(config.simulation.duration_minutes, 120);
        assert_eq!(config.simulation.params().interval_seconds, 30);
        assert_eq!(config.simulation.params().seed, Some(7));
        assert_eq!(config.server.bind, "0.0.0.0:8000");
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = StationConfig::from_toml("[simulation]\ninterval_seconds = \"often\"").unwrap_err();
        assert!(matches!(err, StationError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StationConfig::load(dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
