//! Parsing and rendering of the `OptionSettings=(...)` line
//!
//! The line is tokenized by [`lexer`], each raw value is typed by
//! [`value::classify`], stored in an ordered [`OptionSet`], and written back
//! by [`serialize`].

pub mod error;
pub mod lexer;
pub mod serialize;
pub mod store;
pub mod value;

pub use error::OptionsError;
pub use serialize::{render_file, render_line, to_options_string, DEFAULT_HEADER, OPTION_KEY};
pub use store::OptionSet;
pub use value::{classify, ensure_valid_key, Value, ValueKind};
