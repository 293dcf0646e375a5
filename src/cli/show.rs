//! Read-only commands: show, get and status

use anyhow::Result;
use clap::Args;
use serde_json::json;

use super::utils::{open_settings, plain_value, SettingsArgs};
use world_settings::{GameSettings, Value};

#[derive(Args)]
pub struct ShowArgs {
    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct GetArgs {
    /// Option key, e.g. ServerName
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Print the value as written in the settings file (quotes, parentheses)
    #[arg(long)]
    pub raw: bool,
}

pub fn run_show(settings_args: &SettingsArgs, args: ShowArgs) -> Result<()> {
    let settings = open_settings(settings_args)?;

    if args.json {
        let options: Vec<_> = settings
            .options()
            .iter()
            .map(|(key, value)| json!({ "key": key, "kind": value.kind().name(), "value": json_value(value) }))
            .collect();
        let doc = json!({
            "configured": settings.is_configured(),
            "file": source_file(&settings).display().to_string(),
            "options": options,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("{}", status_line(&settings));
    let width = settings.options().keys().map(str::len).max().unwrap_or(0);
    for (key, value) in settings.options() {
        println!("  {:<width$} = {} ({})", key, value, value.kind());
    }

    Ok(())
}

pub fn run_get(settings_args: &SettingsArgs, args: GetArgs) -> Result<()> {
    let settings = open_settings(settings_args)?;
    let Some(value) = settings.get(&args.key) else {
        anyhow::bail!("Unknown option: {}", args.key);
    };

    if args.raw {
        println!("{}", value);
    } else {
        println!("{}", plain_value(value));
    }
    Ok(())
}

pub fn run_status(settings_args: &SettingsArgs) -> Result<()> {
    let settings = open_settings(settings_args)?;
    println!("{}", status_line(&settings));
    println!("Options: {}", settings.options().len());
    Ok(())
}

fn status_line(settings: &GameSettings) -> String {
    if settings.is_configured() {
        format!("Settings: configured ({})", source_file(settings).display())
    } else {
        format!("Settings: not configured, using defaults ({})", source_file(settings).display())
    }
}

fn source_file(settings: &GameSettings) -> &std::path::Path {
    if settings.is_configured() {
        &settings.files().live_file
    } else {
        &settings.files().default_file
    }
}

fn json_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Bool(b) => json!(b),
        Value::Int(i) => json!(i),
        Value::Float(f) => json!(f),
        Value::Str(s) | Value::Literal(s) => json!(s),
        Value::Group(items) => json!(items),
    }
}
