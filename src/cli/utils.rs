//! Shared CLI utilities.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use world_settings::config::load_config;
use world_settings::{GameSettings, Value};

/// Where to find the server and its settings files.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Path to config file (world-settings.toml or world-settings.yml)
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Dedicated server install directory
    #[arg(short = 'r', long, value_name = "DIR", global = true, env = "WORLD_SETTINGS_ROOT")]
    pub root: Option<PathBuf>,

    /// Live settings file (overrides the path derived from --root)
    #[arg(long, value_name = "FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Bundled default settings file (overrides the path derived from --root)
    #[arg(long, value_name = "FILE", global = true)]
    pub default_file: Option<PathBuf>,
}

/// Load the tool config, apply CLI overrides, and load the game settings.
pub fn open_settings(args: &SettingsArgs) -> Result<GameSettings> {
    let work_dir = std::env::current_dir().context("Failed to read current directory")?;
    let mut config = load_config(&work_dir, args.config.as_deref())?;

    if let Some(root) = &args.root {
        config.root = root.clone();
    }
    let mut files = config.settings_files();
    if let Some(file) = &args.file {
        files.live_file = file.clone();
    }
    if let Some(default_file) = &args.default_file {
        files.default_file = default_file.clone();
    }

    GameSettings::load(files).context("Failed to load game settings")
}

/// Parse a comma-separated string into a `Vec<String>`, trimming whitespace and
/// discarding empty segments.
pub fn parse_csv(value: &str) -> Vec<String> {
    value.split(',').map(str::trim).filter(|part| !part.is_empty()).map(|part| part.to_string()).collect()
}

/// The inner value without the file syntax: no quotes, no parentheses.
pub fn plain_value(value: &Value) -> String {
    match value {
        Value::Str(s) | Value::Literal(s) => s.clone(),
        Value::Group(items) => items.join(","),
        other => other.to_string(),
    }
}
