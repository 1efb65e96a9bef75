use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::validator::ValidationSchema;

/// Tool configuration directory the skill installs under.
pub const TOOL_DIR: &str = ".claude";
/// Subdirectory of the tool directory that holds installed skills.
pub const SKILLS_DIR: &str = "skills";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub skill: SkillConfig,
    #[serde(default)]
    pub schema: ValidationSchema,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillConfig {
    /// Directory name of the bundle; also the install directory name.
    #[serde(default = "default_skill_name")]
    pub name: String,

    /// Name of the npm package that ships the bundle.
    #[serde(default = "default_package_name")]
    pub package: String,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            name: default_skill_name(),
            package: default_package_name(),
        }
    }
}

fn default_skill_name() -> String {
    "prompt-architect".to_string()
}

fn default_package_name() -> String {
    "claude-skill-prompt-architect".to_string()
}

impl Config {
    /// Load config from the working directory or the user config directory.
    #[allow(dead_code)]
    pub fn load() -> Result<Self> {
        Self::load_with_path(None)
    }

    /// Load configuration from a specific path, or use default search paths
    pub fn load_with_path(path: Option<String>) -> Result<Self> {
        // If explicit path provided, use it
        if let Some(config_path) = path {
            debug!("Loading config from explicit path: {}", config_path);
            return Self::load_from_path(&config_path);
        }

        // Try the working directory first (per-package config)
        if let Ok(config) = Self::load_from_path("skillpack.toml") {
            debug!("Loaded config from ./skillpack.toml");
            return Ok(config);
        }

        // Try user config directory
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("skillpack").join("config.toml");
            if let Ok(config) = Self::load_from_path(&config_path) {
                debug!("Loaded config from {:?}", config_path);
                return Ok(config);
            }
        }

        // Return defaults
        debug!("Using default config");
        Ok(Self::default())
    }

    fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
