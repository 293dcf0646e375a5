//! Tokenizer for the interior of an `OptionSettings=(...)` line.
//!
//! Values may contain commas inside double quotes or parentheses, so the text
//! cannot simply be split on `,`. The scanner walks the input once, tracking
//! which delimiter (if any) is currently open.

use super::error::{OptionsError, Result};

/// Scanner position relative to the `key=value` grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    /// Buffering a key, before the `=`.
    Key,
    /// Buffering a bare value, outside any delimiter.
    Value,
    /// Inside a double-quoted string.
    Quoted { opened_at: usize },
    /// Inside a parenthesized group. Inner `(` raise the depth.
    Grouped { depth: usize, opened_at: usize },
}

/// Split the options text into ordered `(key, raw_value)` pairs.
///
/// Quotes and parentheses are kept in the raw value; the classifier strips
/// them. Keys and values are trimmed. Duplicate keys are all returned in
/// input order.
pub fn tokenize(input: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    let mut state = LexState::Key;
    let mut key = String::new();
    let mut buffer = String::new();

    for (offset, ch) in input.char_indices() {
        state = match (state, ch) {
            (LexState::Key, '=') => {
                key = buffer.trim().to_string();
                buffer.clear();
                LexState::Value
            }
            (LexState::Key, ',') => {
                ensure_blank(&buffer)?;
                buffer.clear();
                LexState::Key
            }
            (LexState::Value, ',') => {
                pairs.push((std::mem::take(&mut key), buffer.trim().to_string()));
                buffer.clear();
                LexState::Key
            }
            (LexState::Value, '"') => {
                buffer.push(ch);
                LexState::Quoted { opened_at: offset }
            }
            (LexState::Value, '(') => {
                buffer.push(ch);
                LexState::Grouped { depth: 1, opened_at: offset }
            }
            (LexState::Quoted { .. }, '"') => {
                buffer.push(ch);
                LexState::Value
            }
            (LexState::Grouped { depth, opened_at }, '(') => {
                buffer.push(ch);
                LexState::Grouped { depth: depth + 1, opened_at }
            }
            (LexState::Grouped { depth, opened_at }, ')') => {
                buffer.push(ch);
                if depth == 1 {
                    LexState::Value
                } else {
                    LexState::Grouped { depth: depth - 1, opened_at }
                }
            }
            (current, _) => {
                buffer.push(ch);
                current
            }
        };
    }

    match state {
        LexState::Key => ensure_blank(&buffer)?,
        LexState::Value => pairs.push((key, buffer.trim().to_string())),
        LexState::Quoted { opened_at } => {
            return Err(OptionsError::UnterminatedGroup { delimiter: '"', offset: opened_at });
        }
        LexState::Grouped { opened_at, .. } => {
            return Err(OptionsError::UnterminatedGroup { delimiter: '(', offset: opened_at });
        }
    }

    Ok(pairs)
}

/// A segment without `=` is only tolerated when it is empty (e.g. a trailing comma).
fn ensure_blank(segment: &str) -> Result<()> {
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        Ok(())
    } else {
        Err(OptionsError::MissingKey { segment: trimmed.to_string() })
    }
}
