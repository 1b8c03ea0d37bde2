//! Layered configuration for bars and logging.
//!
//! Sources, later ones winning:
//! - Default values
//! - TOML configuration file (`.barline/settings.toml`)
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `BARLINE_` and use double
//! underscores to separate nested levels:
//! - `BARLINE_BAR__WIDTH=40` sets `bar.width`
//! - `BARLINE_BAR__ANIMATED=false` sets `bar.animated`
//! - `BARLINE_LOGGING__DEFAULT=debug` sets `logging.default`

use crate::style::Style;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".barline";
const CONFIG_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "BARLINE_";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    /// Bar display defaults
    #[serde(default)]
    pub bar: BarConfig,

    /// Log filtering
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BarConfig {
    /// Cells available to the bar's graphical portion
    #[serde(default = "default_width")]
    pub width: usize,

    /// Run the collapse animation on completion
    #[serde(default = "default_true")]
    pub animated: bool,

    /// Pause between collapse frames
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    #[serde(default = "default_bar_style")]
    pub bar_style: Style,

    #[serde(default)]
    pub title_style: Style,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default level for every target (`error`, `warn`, `info`, `debug`, `trace`)
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-target overrides, e.g. `bar = "trace"`
    #[serde(default)]
    pub modules: BTreeMap<String, String>,
}

fn default_width() -> usize {
    crate::bar::DEFAULT_WIDTH
}
fn default_true() -> bool {
    true
}
fn default_frame_interval_ms() -> u64 {
    crate::bar::DEFAULT_FRAME_INTERVAL.as_millis() as u64
}
fn default_bar_style() -> Style {
    Style::Info
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            animated: default_true(),
            frame_interval_ms: default_frame_interval_ms(),
            bar_style: default_bar_style(),
            title_style: Style::Plain,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources.
    ///
    /// The settings file is looked up in the current directory and its
    /// ancestors; a missing file just means defaults plus environment.
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_config_file()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));
        Self::load_from(config_path)
    }

    /// Load configuration from a specific file, still honoring the environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            // Double underscore separates nesting, single underscores stay in field names
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .map(|key| key.as_str().to_lowercase().replace("__", ".").into()),
            )
            .extract()
            .map_err(Box::new)
    }

    /// Find `.barline/settings.toml` from the current directory upwards.
    fn find_config_file() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(CONFIG_DIR);
            if config_dir.is_dir() {
                return Some(config_dir.join(CONFIG_FILE));
            }
        }

        None
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.bar.width, 30);
        assert!(settings.bar.animated);
        assert_eq!(settings.bar.frame_interval_ms, 10);
        assert_eq!(settings.bar.bar_style, Style::Info);
        assert_eq!(settings.bar.title_style, Style::Plain);
        assert_eq!(settings.logging.default, "warn");
        assert!(settings.logging.modules.is_empty());
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");

        let toml_content = r#"
[bar]
width = 48
animated = false
frame_interval_ms = 5
bar_style = { custom = "magenta" }
title_style = "warning"

[logging]
default = "info"

[logging.modules]
bar = "trace"
"#;

        fs::write(&config_path, toml_content).unwrap();

        let settings = Settings::load_from(&config_path).unwrap();
        assert_eq!(settings.bar.width, 48);
        assert!(!settings.bar.animated);
        assert_eq!(settings.bar.frame_interval_ms, 5);
        assert_eq!(
            settings.bar.bar_style,
            Style::Custom(crate::style::Color::Magenta)
        );
        assert_eq!(settings.bar.title_style, Style::Warning);
        assert_eq!(settings.logging.default, "info");
        assert_eq!(settings.logging.modules["bar"], "trace");
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");

        fs::write(&config_path, "[bar]\nwidth = 12\n").unwrap();

        let settings = Settings::load_from(&config_path).unwrap();

        // Modified value
        assert_eq!(settings.bar.width, 12);
        // Everything else keeps its default
        assert!(settings.bar.animated);
        assert_eq!(settings.bar.bar_style, Style::Info);
        assert_eq!(settings.logging, LoggingConfig::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from(temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.bar, BarConfig::default());
    }

    #[test]
    fn test_save_settings() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        let mut settings = Settings::default();
        settings.bar.width = 64;
        settings.bar.title_style = Style::Success;
        settings
            .logging
            .modules
            .insert("bar".to_string(), "debug".to_string());

        settings.save(&config_path).unwrap();

        let loaded = Settings::load_from(&config_path).unwrap();
        assert_eq!(loaded.bar.width, 64);
        assert_eq!(loaded.bar.title_style, Style::Success);
        assert_eq!(loaded.logging.modules["bar"], "debug");
    }
}
