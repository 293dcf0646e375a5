//! Crossplay platform toggles on the `CrossplayPlatforms` group

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};

use super::utils::{open_settings, SettingsArgs};
use world_settings::Value;

const PLATFORMS_KEY: &str = "CrossplayPlatforms";

#[derive(Args)]
pub struct PlatformArgs {
    #[command(subcommand)]
    pub command: PlatformCommand,
}

#[derive(Subcommand)]
pub enum PlatformCommand {
    /// Show which platforms may join
    List,
    /// Allow players from a platform
    Enable {
        #[arg(value_enum)]
        platform: Platform,
    },
    /// Block players from a platform
    Disable {
        #[arg(value_enum)]
        platform: Platform,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    Steam,
    Xbox,
    Ps5,
    Mac,
}

impl Platform {
    /// Name as written inside the group value.
    pub fn option_name(self) -> &'static str {
        match self {
            Platform::Steam => "Steam",
            Platform::Xbox => "Xbox",
            Platform::Ps5 => "PS5",
            Platform::Mac => "Mac",
        }
    }
}

pub fn run(settings_args: &SettingsArgs, args: PlatformArgs) -> Result<()> {
    let mut settings = open_settings(settings_args)?;
    let mut enabled = settings.get_group(PLATFORMS_KEY);

    let (platform, enable) = match args.command {
        PlatformCommand::List => {
            for platform in Platform::value_variants() {
                let name = platform.option_name();
                let state = if enabled.iter().any(|p| p == name) { "enabled" } else { "disabled" };
                println!("{:<6} {}", name, state);
            }
            return Ok(());
        }
        PlatformCommand::Enable { platform } => (platform, true),
        PlatformCommand::Disable { platform } => (platform, false),
    };

    let name = platform.option_name();
    let present = enabled.iter().any(|p| p == name);
    if present == enable {
        println!("{} is already {}", name, if enable { "enabled" } else { "disabled" });
        return Ok(());
    }

    if enable {
        enabled.push(name.to_string());
    } else {
        enabled.retain(|p| p != name);
    }

    settings
        .set(PLATFORMS_KEY, Value::Group(enabled.clone()))
        .with_context(|| format!("Failed to update {}", PLATFORMS_KEY))?;
    println!("{}=({})", PLATFORMS_KEY, enabled.join(","));
    Ok(())
}
