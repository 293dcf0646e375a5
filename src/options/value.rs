//! Typed option values and the lexical classifier.

use std::fmt;
use std::str::FromStr;

use super::error::{OptionsError, Result};
use super::lexer::tokenize;

/// A single option value, tagged with the type inferred from its lexical form.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Quoted string content, without the quotes.
    Str(String),
    /// Raw elements of a parenthesized list. Elements are not typed.
    Group(Vec<String>),
    /// Anything else, kept verbatim (enum-like tokens such as `None` or `All`).
    Literal(String),
}

/// The type tag of a [`Value`], as named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Str,
    Group,
    Literal,
}

impl ValueKind {
    pub const ALL: [ValueKind; 6] = [
        ValueKind::Bool,
        ValueKind::Int,
        ValueKind::Float,
        ValueKind::Str,
        ValueKind::Group,
        ValueKind::Literal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Str => "string",
            ValueKind::Group => "group",
            ValueKind::Literal => "literal",
        }
    }

    /// Build a value of this kind from user-supplied text.
    ///
    /// Text that would not survive a save and reload as this same kind, or
    /// that would break the syntax of neighbouring entries, is rejected.
    /// Double quotes are removed from strings rather than rejected.
    pub fn parse_value(self, text: &str) -> Result<Value> {
        let invalid = || OptionsError::InvalidValue { kind: self.name(), value: text.to_string() };

        let value = match self {
            ValueKind::Bool => parse_bool(text).map(Value::Bool).ok_or_else(invalid)?,
            ValueKind::Int => parse_int(text).map(Value::Int).ok_or_else(invalid)?,
            ValueKind::Float => match text.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => Value::Float(f),
                _ => return Err(invalid()),
            },
            ValueKind::Str => Value::Str(text.replace('"', "")),
            ValueKind::Group => Value::Group(split_group(text)),
            ValueKind::Literal => Value::Literal(text.to_string()),
        };

        value.ensure_persistable().map_err(|_| invalid())?;
        Ok(value)
    }
}

impl FromStr for ValueKind {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self> {
        ValueKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| OptionsError::InvalidType(s.to_string()))
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::Group(_) => ValueKind::Group,
            Value::Literal(_) => ValueKind::Literal,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to floats; the format writes whole-number rates either way.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// String content of a quoted string or a literal token.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) | Value::Literal(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&[String]> {
        match self {
            Value::Group(items) => Some(items),
            _ => None,
        }
    }
}

impl Value {
    /// Check that the rendered value reads back as exactly this value.
    ///
    /// Rejects line breaks, quotes inside strings, signed ints, non-finite
    /// floats, group elements containing `,` or unbalanced parentheses, and
    /// literals that would be typed as something else.
    pub fn ensure_persistable(&self) -> Result<()> {
        let rendered = self.to_string();
        let invalid = || OptionsError::InvalidValue { kind: self.kind().name(), value: rendered.clone() };

        if rendered.contains(is_line_break) {
            return Err(invalid());
        }
        match tokenize(&format!("K={rendered}")) {
            Ok(pairs) if pairs.len() == 1 && classify(&pairs[0].1) == *self => Ok(()),
            _ => Err(invalid()),
        }
    }
}

/// Check that `key` reads back as itself when written as `key=...`.
pub fn ensure_valid_key(key: &str) -> Result<()> {
    let invalid = || OptionsError::InvalidKey(key.to_string());
    if key.is_empty() || key.contains(is_line_break) {
        return Err(invalid());
    }
    match tokenize(&format!("{key}=0")) {
        Ok(pairs) if pairs.len() == 1 && pairs[0].0 == key => Ok(()),
        _ => Err(invalid()),
    }
}

/// Renders the value exactly as it is written inside the options line.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::Str(s) => write!(f, "\"{s}\""),
            Value::Group(items) => write!(f, "({})", items.join(",")),
            Value::Literal(s) => f.write_str(s),
        }
    }
}

/// Infer the type of a raw value as produced by the lexer.
///
/// Precedence: boolean, plain digits, quoted string, parenthesized group,
/// dotted number, literal.
pub fn classify(raw: &str) -> Value {
    if let Some(b) = parse_bool(raw) {
        return Value::Bool(b);
    }
    if let Some(i) = parse_int(raw) {
        return Value::Int(i);
    }
    if let Some(rest) = raw.strip_prefix('"') {
        return Value::Str(rest.strip_suffix('"').unwrap_or(rest).to_string());
    }
    if let Some(rest) = raw.strip_prefix('(') {
        return Value::Group(split_group(rest.strip_suffix(')').unwrap_or(rest)));
    }
    if raw.contains('.') {
        if let Ok(f) = raw.parse::<f64>() {
            if f.is_finite() {
                return Value::Float(f);
            }
        }
    }
    Value::Literal(raw.to_string())
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Unsigned decimal digits only; a sign or an overflow is not an int.
fn parse_int(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn split_group(interior: &str) -> Vec<String> {
    if interior.is_empty() {
        return Vec::new();
    }
    interior.split(',').map(str::to_string).collect()
}

fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r')
}

/// Shortest round-trip form, always with a decimal point so it reads back as a float.
fn format_float(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}
