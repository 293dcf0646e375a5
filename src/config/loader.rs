//! Config file loading

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::options::{DEFAULT_HEADER, OPTION_KEY};
use crate::settings::{SettingsFiles, DEFAULT_SETTINGS_PATH, LIVE_SETTINGS_PATH};

/// Where the game server lives and how its settings file is laid out.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Dedicated server install directory.
    pub root: PathBuf,
    /// Live settings file; relative paths resolve against `root`.
    pub settings_file: PathBuf,
    /// Bundled default settings file; relative paths resolve against `root`.
    pub default_settings_file: PathBuf,
    pub header: String,
    pub option_key: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            settings_file: PathBuf::from(LIVE_SETTINGS_PATH),
            default_settings_file: PathBuf::from(DEFAULT_SETTINGS_PATH),
            header: DEFAULT_HEADER.to_string(),
            option_key: OPTION_KEY.to_string(),
        }
    }
}

impl ToolConfig {
    /// Resolve the configured paths into the files the loader works on.
    pub fn settings_files(&self) -> SettingsFiles {
        SettingsFiles {
            live_file: self.root.join(&self.settings_file),
            default_file: self.root.join(&self.default_settings_file),
            header: self.header.clone(),
            option_key: self.option_key.clone(),
        }
    }
}

pub fn load_config(work_dir: &Path, config_path: Option<&Path>) -> Result<ToolConfig> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(work_dir),
    };

    let Some(config_file) = discovered else {
        return Ok(ToolConfig::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_config(&content, &config_file),
        "yaml" | "yml" => parse_yaml_config(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    // An explicit --config must be valid; a discovered one only warns.
    match parsed {
        Ok(cfg) => {
            tracing::debug!("Using config file {}", config_file.display());
            Ok(cfg)
        }
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            tracing::warn!("Failed to parse auto-discovered config {}: {:#}", config_file.display(), e);
            Ok(ToolConfig::default())
        }
    }
}

/// Parse TOML config, supporting a nested [world-settings] table.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<ToolConfig> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get("world-settings") {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting a nested world-settings mapping.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<ToolConfig> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let config_val = match raw.get("world-settings") {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(work_dir: &Path) -> Option<PathBuf> {
    let candidates =
        ["world-settings.toml", ".world-settings.toml", "world-settings.yml", "world-settings.yaml"];

    candidates.iter().map(|candidate| work_dir.join(candidate)).find(|path| path.exists())
}
