//! First-run setup
//!
//! Writes the handful of options a fresh server needs before it is started
//! for the first time. Refuses to touch a server that was already set up
//! unless `--force` is given.

use anyhow::{Context, Result};
use clap::Args;
use rand::Rng;

use super::utils::{open_settings, SettingsArgs};
use world_settings::{Value, ValueKind};

/// Characters for generated passwords; look-alikes such as 0/O and 1/l are left out.
const PASSWORD_CHARS: &[u8] = b"abcdefghjkpqrstwxyzACDEFGHJKPRTWXYZ234679";
const PASSWORD_LEN: usize = 16;

#[derive(Args)]
pub struct InitArgs {
    /// Server name shown in the server browser
    #[arg(long, value_name = "NAME")]
    pub server_name: String,

    /// Server description
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Password players must enter to join
    #[arg(long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Enable the REST API, generating an admin password unless one is given
    #[arg(long)]
    pub enable_api: bool,

    /// Admin password; also enables the REST API
    #[arg(long, value_name = "PASSWORD")]
    pub admin_password: Option<String>,

    /// Run even if the server is already configured
    #[arg(long)]
    pub force: bool,
}

pub fn run(settings_args: &SettingsArgs, args: InitArgs) -> Result<()> {
    let mut settings = open_settings(settings_args)?;

    if settings.is_configured() && !args.force {
        anyhow::bail!(
            "Server settings are already configured in {} (use --force to run setup again)",
            settings.files().live_file.display()
        );
    }

    let mut updates = vec![("ServerName", string_value(&args.server_name)?)];
    if let Some(description) = &args.description {
        updates.push(("ServerDescription", string_value(description)?));
    }
    if let Some(password) = &args.password {
        updates.push(("ServerPassword", string_value(password)?));
    }

    let mut generated = None;
    if args.enable_api || args.admin_password.is_some() {
        let admin_password = match &args.admin_password {
            Some(password) => password.clone(),
            None => generated.insert(generate_password()).clone(),
        };
        updates.push(("RESTAPIEnabled", Value::Bool(true)));
        updates.push(("AdminPassword", string_value(&admin_password)?));
    }

    for (key, value) in updates {
        tracing::debug!("First-run setup: {} = {}", key, value);
        settings.set(key, value).with_context(|| format!("Failed to set {}", key))?;
    }

    println!("Configured {}", settings.files().live_file.display());
    if let Some(password) = generated {
        println!("Generated admin password: {}", password);
    }
    Ok(())
}

/// Same rules as `set KEY string VALUE`: quotes removed, line breaks rejected.
fn string_value(text: &str) -> Result<Value> {
    Ok(ValueKind::Str.parse_value(text.trim())?)
}

fn generate_password() -> String {
    let mut rng = rand::rng();
    (0..PASSWORD_LEN).map(|_| PASSWORD_CHARS[rng.random_range(0..PASSWORD_CHARS.len())] as char).collect()
}
