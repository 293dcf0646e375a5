//! world-settings: inspect and edit a dedicated game server's OptionSettings line

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
