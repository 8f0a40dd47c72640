//! Configuration primitives for MyBento.
//!
//! Stored in a machine-readable TOML file located at:
//!   %APPDATA%/MyBento/config/config.toml on Windows
//!   $XDG_DATA_HOME/MyBento/config/config.toml on Linux
//!   ~/Library/Application Support/MyBento/config/config.toml on macOS
//!
//! `MYBENTO_HOME` overrides the root for tests and self-hosted installs.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::layout::BentoSpanPolicy;
use crate::model::LayoutType;

/// Root configuration persisted per installation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Render plan defaults (layout fallback, bento spans, empty state).
    #[serde(default)]
    pub rendering: RenderSettings,
    /// Click tracking sinks.
    #[serde(default)]
    pub clicks: ClickSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderSettings {
    /// Layout used when a profile never picked one.
    #[serde(default)]
    pub default_layout: LayoutType,
    /// Footprint policy for the bento layout.
    #[serde(default)]
    pub bento_spans: BentoSpanPolicy,
    /// Placeholder text carried by the empty-state instruction.
    #[serde(default = "default_empty_message")]
    pub empty_message: String,
    /// Drop inactive blocks before layout (public page behaviour).
    #[serde(default = "default_public_only")]
    pub public_only: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            default_layout: LayoutType::default(),
            bento_spans: BentoSpanPolicy::default(),
            empty_message: default_empty_message(),
            public_only: default_public_only(),
        }
    }
}

fn default_empty_message() -> String {
    "This user has no links yet.".to_string()
}

const fn default_public_only() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClickSettings {
    /// Whether visitor clicks are appended to the JSONL click log.
    #[serde(default = "default_log_enabled")]
    pub log_enabled: bool,
    /// File name of the click log inside the workspace root.
    #[serde(default = "default_log_file_name")]
    pub log_file_name: String,
}

impl Default for ClickSettings {
    fn default() -> Self {
        Self {
            log_enabled: default_log_enabled(),
            log_file_name: default_log_file_name(),
        }
    }
}

const fn default_log_enabled() -> bool {
    true
}

fn default_log_file_name() -> String {
    "clicks.jsonl".to_string()
}

pub const CONFIG_FILE_NAME: &str = "config.toml";
const HOME_ENV: &str = "MYBENTO_HOME";
const APP_DIR_NAME: &str = "MyBento";

/// Every on-disk location MyBento uses, derived from one workspace root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePaths {
    root: PathBuf,
}

impl WorkspacePaths {
    /// `MYBENTO_HOME` when set and non-empty, else the OS data directory
    /// joined with `MyBento`.
    pub fn resolve() -> Result<Self> {
        let root = match env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
            Some(home) => PathBuf::from(home),
            None => BaseDirs::new()
                .context("Unable to determine OS data directory")?
                .data_dir()
                .join(APP_DIR_NAME),
        };
        Ok(Self { root })
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.join("config")
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir().join(CONFIG_FILE_NAME)
    }

    /// Click log named by `config`, directly under the root.
    pub fn click_log(&self, config: &AppConfig) -> PathBuf {
        self.root.join(&config.clicks.log_file_name)
    }

    /// Defaults when no file exists yet; a file that fails to parse is an
    /// error, never silently replaced.
    pub fn load_config(&self) -> Result<AppConfig> {
        let path = self.config_file();
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        let dir = self.config_dir();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
        let path = self.config_file();
        fs::write(&path, toml::to_string_pretty(config)?)
            .with_context(|| format!("Failed to write config file {}", path.display()))
    }
}

pub fn config_file_path() -> Result<PathBuf> {
    Ok(WorkspacePaths::resolve()?.config_file())
}

pub fn click_log_path(config: &AppConfig) -> Result<PathBuf> {
    Ok(WorkspacePaths::resolve()?.click_log(config))
}

/// Loads the configuration for the resolved workspace.
pub fn load_or_default() -> Result<AppConfig> {
    WorkspacePaths::resolve()?.load_config()
}

pub fn save(config: &AppConfig) -> Result<()> {
    WorkspacePaths::resolve()?.save_config(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [rendering]
            default_layout = "bento"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.rendering.default_layout, LayoutType::Bento);
        assert_eq!(cfg.rendering.bento_spans, BentoSpanPolicy::Pattern);
        assert!(cfg.rendering.public_only);
        assert_eq!(cfg.clicks.log_file_name, "clicks.jsonl");
    }

    #[test]
    fn unknown_layout_in_file_is_rejected() {
        let parsed = toml::from_str::<AppConfig>(
            r#"
            [rendering]
            default_layout = "carousel"
            "#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn round_trips_through_toml() {
        let mut cfg = AppConfig::default();
        cfg.rendering.bento_spans = BentoSpanPolicy::Variant;
        cfg.clicks.log_enabled = false;
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn paths_hang_off_one_root() {
        let paths = WorkspacePaths::at("/srv/bento");
        let mut cfg = AppConfig::default();
        cfg.clicks.log_file_name = "visits.jsonl".into();
        assert_eq!(paths.config_file(), Path::new("/srv/bento/config/config.toml"));
        assert_eq!(paths.click_log(&cfg), Path::new("/srv/bento/visits.jsonl"));
    }

    #[test]
    fn load_and_save_against_explicit_root() {
        let tmp = tempfile::TempDir::new().unwrap();
        let paths = WorkspacePaths::at(tmp.path());
        assert_eq!(paths.load_config().unwrap(), AppConfig::default());

        let mut cfg = AppConfig::default();
        cfg.rendering.default_layout = LayoutType::Grid;
        paths.save_config(&cfg).unwrap();
        assert_eq!(paths.load_config().unwrap(), cfg);

        fs::write(paths.config_file(), "rendering = 3").unwrap();
        let err = paths.load_config().unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
