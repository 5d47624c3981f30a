//! Configuration for ascii-typewriter.
//!
//! Settings come from an optional TOML file (`~/.config/ascii-typewriter/config.toml`
//! or a custom path) and are then overridden by command-line flags. The
//! merged result is a [`RenderConfig`], built once and read-only afterwards.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ascii::{ColourMode, MirrorMode};

/// Default output width in characters.
pub const DEFAULT_WIDTH: u32 = 80;

/// Default typing speed in characters per second.
pub const DEFAULT_SPEED: u32 = 1000;

/// Everything the renderer and scheduler need for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub width: u32,
    pub colour_mode: ColourMode,
    pub mirror_mode: MirrorMode,
    /// Characters per second; 0 types as fast as possible
    pub print_speed: u32,
    pub loop_mode: bool,
}

impl RenderConfig {
    /// Build a config, clamping a zero width to one column.
    pub fn new(
        width: u32,
        colour_mode: ColourMode,
        mirror_mode: MirrorMode,
        print_speed: u32,
        loop_mode: bool,
    ) -> Self {
        if width == 0 {
            log::warn!("width 0 is not drawable, using 1");
        }
        Self {
            width: width.max(1),
            colour_mode,
            mirror_mode,
            print_speed,
            loop_mode,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_WIDTH,
            ColourMode::default(),
            MirrorMode::default(),
            DEFAULT_SPEED,
            false,
        )
    }
}

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub render: RenderSection,
}

/// The `[render]` table. Unset keys fall back to the built-in defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RenderSection {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub speed: Option<u32>,
    #[serde(default)]
    pub colour: Option<String>,
    #[serde(default)]
    pub mirror: Option<String>,
    #[serde(default, rename = "loop")]
    pub loop_mode: Option<bool>,
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;
            Self::parse(&content).map_err(|e| match e {
                ConfigError::Parse { source, .. } => ConfigError::Parse {
                    path: path.clone(),
                    source,
                },
                other => other,
            })
        } else {
            log::debug!("no config file at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = &self.render.colour {
            if ColourMode::from_name(name).is_none() {
                return Err(ConfigError::UnknownValue {
                    key: "colour",
                    value: name.clone(),
                });
            }
        }
        if let Some(name) = &self.render.mirror {
            if MirrorMode::from_name(name).is_none() {
                return Err(ConfigError::UnknownValue {
                    key: "mirror",
                    value: name.clone(),
                });
            }
        }
        Ok(())
    }

    /// The render settings described by this file alone.
    pub fn render_config(&self) -> RenderConfig {
        let r = &self.render;
        RenderConfig::new(
            r.width.unwrap_or(DEFAULT_WIDTH),
            r.colour
                .as_deref()
                .and_then(ColourMode::from_name)
                .unwrap_or_default(),
            r.mirror
                .as_deref()
                .and_then(MirrorMode::from_name)
                .unwrap_or_default(),
            r.speed.unwrap_or(DEFAULT_SPEED),
            r.loop_mode.unwrap_or(false),
        )
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unknown {key} '{value}' in config file")]
    UnknownValue { key: &'static str, value: String },
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("ascii-typewriter").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/ascii-typewriter/config.toml")
        })
}

/// Contents written by `config init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# ascii-typewriter configuration

[render]
# Output width in characters
width = 80
# Typing speed in characters per second (0 = instant)
speed = 1000
# Colour mode: monochrome, posterized, colourful, random
colour = "posterized"
# Mirror: none, x, y, xy
mirror = "none"
# Repeat forever
loop = false
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.width, 80);
        assert_eq!(config.print_speed, 1000);
        assert_eq!(config.colour_mode, ColourMode::Posterized);
        assert_eq!(config.mirror_mode, MirrorMode::None);
        assert!(!config.loop_mode);
    }

    #[test]
    fn test_zero_width_is_clamped() {
        let config = RenderConfig::new(0, ColourMode::Monochrome, MirrorMode::None, 10, false);
        assert_eq!(config.width, 1);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.render_config(), RenderConfig::default());
    }

    #[test]
    fn test_default_config_text_parses() {
        let config = Config::parse(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(config.render_config(), RenderConfig::default());
    }

    #[test]
    fn test_parse_render_section() {
        let config = Config::parse(
            r#"
            [render]
            width = 120
            speed = 0
            colour = "random"
            mirror = "xy"
            loop = true
            "#,
        )
        .unwrap();
        let render = config.render_config();
        assert_eq!(render.width, 120);
        assert_eq!(render.print_speed, 0);
        assert_eq!(render.colour_mode, ColourMode::Random);
        assert_eq!(render.mirror_mode, MirrorMode::XY);
        assert!(render.loop_mode);
    }

    #[test]
    fn test_unknown_colour_is_rejected() {
        let err = Config::parse("[render]\ncolour = \"sepia\"\n").unwrap_err();
        assert!(err.to_string().contains("sepia"));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = Config::parse("[render\nwidth = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config.render_config(), RenderConfig::default());
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "width = [").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
