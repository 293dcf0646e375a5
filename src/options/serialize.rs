//! Rendering an [`OptionSet`] back into the settings file syntax.

use std::fmt::Write as _;

use super::store::OptionSet;

/// Key token that starts the options line.
pub const OPTION_KEY: &str = "OptionSettings";

/// Section header the game server expects above the options line.
pub const DEFAULT_HEADER: &str = "/Script/Pal.PalGameWorldSettings";

/// Render the interior of the wrapper: `key=value` tokens joined by `,`.
pub fn to_options_string(options: &OptionSet) -> String {
    let mut out = String::new();
    for (idx, (key, value)) in options.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "{key}={value}");
    }
    out
}

/// Render the full options line, e.g. `OptionSettings=(A=True,B=1)`, without a newline.
pub fn render_line(key_token: &str, options: &OptionSet) -> String {
    format!("{}=({})", key_token, to_options_string(options))
}

/// Render the two-line file body: bracketed header, then the options line.
pub fn render_file(header: &str, key_token: &str, options: &OptionSet) -> String {
    format!("[{}]\n{}\n", header, render_line(key_token, options))
}
