//! Game server settings files
//!
//! Chooses between the live settings file and the bundled default, and
//! writes the live file back after every change.

pub mod game;
pub mod loader;

pub use game::{GameSettings, SettingsFiles, SettingsSource, DEFAULT_SETTINGS_PATH, LIVE_SETTINGS_PATH};
pub use loader::{read_options, unwrap_options_line};
