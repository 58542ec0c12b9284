//! Global calgrid configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::Deserialize;

use crate::error::{CalGridError, CalGridResult};

static DEFAULT_SERVER_URL: &str = "http://localhost:3000/api";

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

/// Global configuration at ~/.config/calgrid/config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct GlobalConfig {
    /// Base URL of the event service API.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// View the bare `calgrid view` command opens: "month", "week" or "day".
    pub default_view: Option<String>,

    /// Overrides the timezone detected from the system.
    pub timezone: Option<String>,
}

impl GlobalConfig {
    pub fn config_path() -> CalGridResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalGridError::Config("Could not determine config directory".into()))?
            .join("calgrid");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> CalGridResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: GlobalConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| CalGridError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalGridError::Config(e.to_string()))?;

        Ok(config)
    }

    fn create_default_config(path: &Path) -> CalGridResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = format!(
            "# calgrid configuration\n\
             \n\
             # Base URL of the event service API\n\
             server_url = \"{}\"\n\
             \n\
             # Uncomment to change the default view (month, week or day)\n\
             # default_view = \"month\"\n\
             \n\
             # Uncomment to override the timezone detected from the system\n\
             # timezone = \"Europe/Stockholm\"\n",
            DEFAULT_SERVER_URL
        );
        std::fs::write(path, template)?;
        Ok(())
    }
}
