//! Configuration management for crxgen
//!
//! Handles the ~/.crxgen/ directory and config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Stylesheet flavor for generated projects
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StylesheetFlavor {
    #[default]
    Css,
    Scss,
}

impl StylesheetFlavor {
    pub fn extension(&self) -> &'static str {
        match self {
            StylesheetFlavor::Css => "css",
            StylesheetFlavor::Scss => "scss",
        }
    }
}

impl std::fmt::Display for StylesheetFlavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub stylesheet: StylesheetFlavor,
    #[serde(default)]
    pub defaults: AnswerDefaults,
}

/// Fallback answers used when neither flags nor an answers file provide them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AnswerDefaults {
    pub name: Option<String>,
    pub description: String,
}

impl Default for AnswerDefaults {
    fn default() -> Self {
        Self {
            name: None,
            description: "My Chrome Extension".to_string(),
        }
    }
}

/// Returns the path to the crxgen home directory (~/.crxgen)
pub fn crxgen_home() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".crxgen"))
}

/// Returns paths to crxgen files
pub struct CrxgenPaths {
    pub root: PathBuf,
    pub config: PathBuf,
}

impl CrxgenPaths {
    pub fn new() -> Result<Self> {
        let root = crxgen_home()?;
        Ok(Self::at(root))
    }

    pub fn at(root: PathBuf) -> Self {
        Self {
            config: root.join("config.toml"),
            root,
        }
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.root).context("Failed to create crxgen root")?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.config.exists()
    }
}

/// Load configuration, falling back to defaults when no config file exists
pub fn load_config(paths: &CrxgenPaths) -> Result<Config> {
    load_config_from(&paths.config)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path).context("Failed to read config.toml")?;
    toml::from_str(&content).context("Failed to parse config.toml")
}

/// Save configuration to disk
pub fn save_config(paths: &CrxgenPaths, config: &Config) -> Result<()> {
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(&paths.config, content).context("Failed to write config.toml")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config_from(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.defaults.description, "My Chrome Extension");
        assert_eq!(config.stylesheet, StylesheetFlavor::Css);
    }

    #[test]
    fn test_config_round_trip() {
        let temp = TempDir::new().unwrap();
        let paths = CrxgenPaths::at(temp.path().join(".crxgen"));
        paths.ensure_dirs().unwrap();

        let config = Config {
            stylesheet: StylesheetFlavor::Scss,
            defaults: AnswerDefaults {
                name: Some("Scratch".to_string()),
                description: "Quick experiments".to_string(),
            },
        };
        save_config(&paths, &config).unwrap();

        assert!(paths.is_initialized());
        assert_eq!(load_config(&paths).unwrap(), config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "stylesheet = \"scss\"\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.stylesheet, StylesheetFlavor::Scss);
        assert_eq!(config.defaults, AnswerDefaults::default());
    }
}
