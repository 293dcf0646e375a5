//! Locating and unwrapping the options line inside a settings file

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::options::{OptionSet, OptionsError};

/// Read `path` and parse its options line.
///
/// Returns `Ok(None)` when the file is missing or has no line starting with
/// `option_key`. If several lines match, the last one wins, mirroring how the
/// server itself reads the file.
pub fn read_options(path: &Path, option_key: &str) -> Result<Option<OptionSet>, OptionsError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(OptionsError::io(path, e)),
    };

    let Some(interior) = content.lines().filter_map(|line| unwrap_options_line(line, option_key)).last()
    else {
        return Ok(None);
    };

    OptionSet::from_options_str(interior?).map(Some)
}

/// Like [`read_options`], but a missing file is an error.
pub fn read_required_options(path: &Path, option_key: &str) -> Result<Option<OptionSet>, OptionsError> {
    if !path.is_file() {
        return Err(OptionsError::io(
            path,
            std::io::Error::new(ErrorKind::NotFound, "settings file not found"),
        ));
    }
    read_options(path, option_key)
}

/// Strip the `KEY=(` prefix and the trailing `)` from an options line.
///
/// Returns `None` when the line is not the options line at all. A line that
/// opens the wrapper without closing it is an unterminated group.
pub fn unwrap_options_line<'a>(
    line: &'a str,
    option_key: &str,
) -> Option<Result<&'a str, OptionsError>> {
    let line = line.trim();
    let rest = line.strip_prefix(option_key)?.trim_start().strip_prefix('=')?.trim_start();

    let Some(body) = rest.strip_prefix('(') else {
        return Some(Ok(rest));
    };
    match body.strip_suffix(')') {
        Some(interior) => Some(Ok(interior)),
        None => Some(Err(OptionsError::UnterminatedGroup {
            delimiter: '(',
            offset: line.len() - rest.len(),
        })),
    }
}
