use crate::core::path::{config_file, ensure_dir};
use crate::core::{PackError, PackResult};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Packager backend used to query, install and prune modules
    #[serde(default = "default_packager")]
    pub packager: String,

    /// Modules the target runtime provides natively, in addition to the
    /// built-in list. A dev-only declaration of one of these is skipped
    /// instead of rejected.
    #[serde(default)]
    pub runtime_provided_modules: Vec<String>,

    /// Extra arguments appended to every install invocation
    /// Example: ["--ignore-engines"]
    #[serde(default)]
    pub install_extra_args: Vec<String>,
}

fn default_packager() -> String {
    "yarn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            packager: default_packager(),
            runtime_provided_modules: Vec::new(),
            install_extra_args: Vec::new(),
        }
    }
}

impl Config {
    /// Load config from platform-specific config directory, creating default if it doesn't exist
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\fnpack\config.yaml
    /// - Linux: ~/.config/fnpack/config.yaml
    /// - macOS: ~/Library/Application Support/fnpack/config.yaml
    pub fn load() -> PackResult<Self> {
        let config_path = config_file()?;

        if !config_path.exists() {
            // Create default config
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| PackError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save config to platform-specific config directory
    pub fn save(&self) -> PackResult<()> {
        let config_path = config_file()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| PackError::Config("Config path has no parent directory".to_string()))?;

        // Ensure config directory exists
        ensure_dir(config_dir)?;

        let content = serde_yaml::to_string(self)
            .map_err(|e| PackError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)?;
        Ok(())
    }
}
