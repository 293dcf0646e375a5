//! world-settings: read and rewrite a dedicated game server's world settings
//!
//! The server keeps every option on a single `OptionSettings=(...)` line whose
//! values may themselves contain commas. This crate parses that line into typed
//! values, keeps their order, and writes the line back without disturbing the
//! entries it did not change.

pub mod config;
pub mod options;
pub mod settings;

pub use options::{OptionSet, OptionsError, Value, ValueKind};
pub use settings::{GameSettings, SettingsFiles, SettingsSource};
