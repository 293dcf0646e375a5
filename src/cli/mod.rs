//! Command-line interface for world-settings
//!
//! Thin, non-interactive commands over [`GameSettings`](world_settings::GameSettings):
//! every `set`-style command writes the live settings file immediately.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod edit;
mod init;
mod platform;
mod show;
mod utils;

use utils::SettingsArgs;

/// Inspect and edit a dedicated game server's OptionSettings line
#[derive(Parser)]
#[command(name = "world-settings")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List every option in file order
    Show(show::ShowArgs),

    /// Print the value of one option
    Get(show::GetArgs),

    /// Set one option and rewrite the settings file
    Set(edit::SetArgs),

    /// Report whether the server settings have been configured
    Status,

    /// First-run setup of the server name, description and passwords
    Init(init::InitArgs),

    /// List or toggle crossplay platforms
    Platform(platform::PlatformArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Show(args) => show::run_show(&cli.settings, args),
        Commands::Get(args) => show::run_get(&cli.settings, args),
        Commands::Set(args) => edit::run(&cli.settings, args),
        Commands::Status => show::run_status(&cli.settings),
        Commands::Init(args) => init::run(&cli.settings, args),
        Commands::Platform(args) => platform::run(&cli.settings, args),
    }
}
