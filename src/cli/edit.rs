//! Set command implementation

use anyhow::{Context, Result};
use clap::Args;

use super::utils::{open_settings, parse_csv, SettingsArgs};

#[derive(Args)]
pub struct SetArgs {
    /// Option key, e.g. ServerName
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Value type: bool, int, float, string, group or literal
    #[arg(value_name = "TYPE")]
    pub kind: String,

    /// New value (groups are comma-separated, e.g. 'Steam,Xbox')
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,
}

pub fn run(settings_args: &SettingsArgs, args: SetArgs) -> Result<()> {
    let mut settings = open_settings(settings_args)?;

    let text = if args.kind == "group" { parse_csv(&args.value).join(",") } else { args.value.clone() };

    settings
        .set_typed(&args.key, &args.kind, &text)
        .with_context(|| format!("Failed to set {}", args.key))?;

    if let Some(value) = settings.get(&args.key) {
        println!("{} = {}", args.key, value);
    }
    println!("Saved {}", settings.files().live_file.display());
    Ok(())
}
