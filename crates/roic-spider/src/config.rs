use crate::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Config file read when `ROIC_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Start-up settings, read from a JSON file.
///
/// ```json
/// {
///     "data_export_path": "./data/roic",
///     "chrome_driver_path": "/usr/local/bin/chromedriver"
/// }
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    /// Base directory of the cached tables; one sub-directory per ticker.
    pub data_export_path: PathBuf,

    /// The chromedriver binary.
    pub chrome_driver_path: PathBuf,

    #[serde(default = "default_headless")]
    pub headless: bool,

    /// How long the first element of a table is waited for.
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,

    /// How long chromedriver gets to start accepting sessions.
    #[serde(default = "default_driver_startup_secs")]
    pub driver_startup_secs: u64,
}

fn default_headless() -> bool {
    true
}

fn default_wait_timeout_secs() -> u64 {
    10
}

fn default_driver_startup_secs() -> u64 {
    10
}

impl Config {
    /// Read the config from `path`. A missing file or required key is an error.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: Config = crate::fs::read_json(path).await?;
        debug!("config loaded from {path:?}");
        Ok(config)
    }

    /// Read the config named by `ROIC_CONFIG`, defaulting to `./config.json`.
    pub async fn from_env() -> Result<Self> {
        let path = dotenv::var("ROIC_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path).await
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    pub fn driver_startup(&self) -> Duration {
        Duration::from_secs(self.driver_startup_secs)
    }
}
