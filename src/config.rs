//! User configuration, loaded from `~/.config/limitline/config.toml`.
//!
//! Configuration is advisory: any problem reading or parsing the file logs
//! a warning and falls back to the defaults, because a broken config must
//! never take the prompt down with it.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayStyle {
    /// Segments joined with powerline separators.
    #[default]
    Powerline,
    /// Plain space-joined segments, foreground colors only.
    Minimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompactMode {
    /// Compact when the terminal is narrower than `compact_width`.
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentName {
    Time,
    Directory,
    Git,
    Model,
    Context,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DisplayConfig {
    pub style: DisplayStyle,
    pub compact_mode: CompactMode,
    /// Terminal width threshold for auto compact mode.
    pub compact_width: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            style: DisplayStyle::default(),
            compact_mode: CompactMode::default(),
            compact_width: 80,
        }
    }
}

/// Per-segment enable flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SegmentToggles {
    pub time: bool,
    pub directory: bool,
    pub git: bool,
    pub model: bool,
    pub context: bool,
}

impl Default for SegmentToggles {
    fn default() -> Self {
        Self {
            time: true,
            directory: true,
            git: true,
            model: false,
            context: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LimitlineConfig {
    pub display: DisplayConfig,
    pub segments: SegmentToggles,
    /// Render order; segments absent from the list are not rendered.
    pub segment_order: Vec<SegmentName>,
    /// Theme name; unknown names fall back to the dark theme.
    pub theme: String,
}

impl Default for LimitlineConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            segments: SegmentToggles::default(),
            segment_order: vec![
                SegmentName::Time,
                SegmentName::Directory,
                SegmentName::Git,
                SegmentName::Model,
                SegmentName::Context,
            ],
            theme: "dark".to_string(),
        }
    }
}

impl LimitlineConfig {
    /// Default config file location in the user config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("limitline").join("config.toml"))
    }

    /// Load from the given path, or the default location when `None`.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => return Self::default(),
            },
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("ignoring invalid config {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => Self::default(),
            Err(err) => {
                log::warn!("ignoring unreadable config {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// The default configuration rendered as TOML, for `init-config`.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}
