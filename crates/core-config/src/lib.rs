//! Configuration loading and parsing.
//!
//! Parses `minivi.toml`: `[theme]` hex colors for the four text styles,
//! `[alert] timeout_ms` for the status-message expiry, and
//! `[input] poll_ms` for the key-read timeout. Unknown fields are ignored
//! and a missing or unparsable file falls back to defaults so configuration
//! problems never prevent the editor from starting. Discovery prefers a
//! local `minivi.toml` over the platform config directory; the binary's
//! `--config` flag overrides discovery entirely.

use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeConfig {
    #[serde(default = "ThemeConfig::default_dim")]
    pub dim: String,
    #[serde(default = "ThemeConfig::default_bold")]
    pub bold: String,
    #[serde(default = "ThemeConfig::default_alert")]
    pub alert: String,
    #[serde(default = "ThemeConfig::default_success")]
    pub success: String,
}

impl ThemeConfig {
    fn default_dim() -> String {
        "#888888".into()
    }
    fn default_bold() -> String {
        "#55ffff".into()
    }
    fn default_alert() -> String {
        "#880000".into()
    }
    fn default_success() -> String {
        "#008800".into()
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            dim: Self::default_dim(),
            bold: Self::default_bold(),
            alert: Self::default_alert(),
            success: Self::default_success(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertConfig {
    #[serde(default = "AlertConfig::default_timeout_ms")]
    pub timeout_ms: u64,
}

impl AlertConfig {
    const fn default_timeout_ms() -> u64 {
        2000
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            timeout_ms: Self::default_timeout_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    #[serde(default = "InputConfig::default_poll_ms")]
    pub poll_ms: u64,
}

impl InputConfig {
    const fn default_poll_ms() -> u64 {
        350
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            poll_ms: Self::default_poll_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub alert: AlertConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Default, Clone)]
pub struct Config {
    /// Original file text, kept for diagnostics.
    pub raw: Option<String>,
    pub file: ConfigFile,
}

impl Config {
    pub fn alert_timeout(&self) -> Duration {
        Duration::from_millis(self.file.alert.timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.file.input.poll_ms)
    }
}

/// Best-effort config path: local working directory first, then the
/// platform config dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("minivi.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("minivi").join("minivi.toml");
    }
    PathBuf::from("minivi.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    if let Ok(content) = fs::read_to_string(&path) {
        match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => {
                info!(target: "config", path = %path.display(), "loaded");
                Ok(Config {
                    raw: Some(content),
                    file,
                })
            }
            Err(err) => {
                warn!(target: "config", path = %path.display(), %err, "parse_failed_using_defaults");
                Ok(Config::default())
            }
        }
    } else {
        Ok(Config::default())
    }
}
