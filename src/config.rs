//! User configuration for pedigree.
//!
//! Config file location: ~/.config/pedigree/config.toml
//! Command-line flags override the values read here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_FAMILY_NAME: &str = "江夏黄氏";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON data file; defaults to the platform data directory.
    pub data_path: Option<PathBuf>,
    /// Family shown when no family id is given on the command line.
    pub default_family_name: String,
    pub initial_zoom: f32,
    /// Extra font registered with egui, needed for CJK names.
    pub font_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            default_family_name: DEFAULT_FAMILY_NAME.to_owned(),
            initial_zoom: 0.8,
            font_path: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("pedigree");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default if not exists
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            config.save(path)?;
            info!(path = %path.display(), "wrote default config");
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    pub fn resolved_data_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.data_path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir()
            .context("Could not determine data directory")?
            .join("pedigree");
        Ok(data_dir.join("genealogy.json"))
    }

    /// Zoom clamped to what the canvas accepts.
    pub fn clamped_zoom(&self) -> f32 {
        if self.initial_zoom.is_finite() {
            self.initial_zoom.clamp(0.1, 2.0)
        } else {
            Self::default().initial_zoom
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load(&path).expect("load");
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "initial_zoom = 1.5\n").expect("write");

        let config = Config::load(&path).expect("load");
        assert_eq!(config.initial_zoom, 1.5);
        assert_eq!(config.default_family_name, DEFAULT_FAMILY_NAME);
        assert!(config.font_path.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let config = Config {
            data_path: Some(dir.path().join("data.json")),
            default_family_name: "Smith family".into(),
            initial_zoom: 1.0,
            font_path: Some(PathBuf::from("/usr/share/fonts/noto.otf")),
        };

        config.save(&path).expect("save");
        assert_eq!(Config::load(&path).expect("load"), config);
        assert_eq!(
            config.resolved_data_path().expect("path"),
            dir.path().join("data.json")
        );
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "initial_zoom = [").expect("write");

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_zoom_is_clamped() {
        let config = Config {
            initial_zoom: 9.0,
            ..Config::default()
        };
        assert_eq!(config.clamped_zoom(), 2.0);

        let config = Config {
            initial_zoom: f32::NAN,
            ..Config::default()
        };
        assert_eq!(config.clamped_zoom(), 0.8);
    }
}
