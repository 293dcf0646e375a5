//! Tool configuration loading
//!
//! Handles loading from a config file and CLI flags with proper precedence
//! (CLI > File > Defaults).

pub mod loader;

pub use loader::{load_config, ToolConfig};
