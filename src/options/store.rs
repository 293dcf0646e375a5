//! Ordered key/value storage for one options line.

use std::collections::HashMap;

use super::error::Result;
use super::lexer::tokenize;
use super::value::{classify, Value};

/// The typed contents of one `OptionSettings=(...)` line.
///
/// Keys keep the order in which they were first seen. Overwriting a key
/// updates it in place; new keys are appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSet {
    entries: Vec<(String, Value)>,
    index: HashMap<String, usize>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the interior of the options wrapper (the text between `=(` and the final `)`).
    ///
    /// A key that appears more than once keeps its first position and its last value.
    pub fn from_options_str(options: &str) -> Result<Self> {
        let mut set = Self::new();
        for (key, raw) in tokenize(options)? {
            let value = classify(&raw);
            set.set(key, value);
        }
        Ok(set)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&idx| &self.entries[idx].1)
    }

    /// Insert or overwrite `key`, returning the previous value if there was one.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.index.get(&key) {
            Some(&idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let idx = self.index.remove(key)?;
        let (_, value) = self.entries.remove(idx);
        for slot in self.index.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        Some(value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<'a> IntoIterator for &'a OptionSet {
    type Item = (&'a str, &'a Value);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a Value)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_mixed_entries() {
        let set = OptionSet::from_options_str(r#"A=True,B=42,C="hi, there",D=(1,2,3)"#).expect("parse");
        assert_eq!(set.len(), 4);
        assert_eq!(set.get("A"), Some(&Value::Bool(true)));
        assert_eq!(set.get("B"), Some(&Value::Int(42)));
        assert_eq!(set.get("C"), Some(&Value::Str("hi, there".to_string())));
        assert_eq!(
            set.get("D"),
            Some(&Value::Group(vec!["1".to_string(), "2".to_string(), "3".to_string()]))
        );
    }

    #[test]
    fn test_duplicate_key_last_write_wins_at_first_position() {
        let set = OptionSet::from_options_str("A=1,B=2,A=3").expect("parse");
        assert_eq!(set.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(set.get("A"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_overwrite_keeps_position_and_insert_appends() {
        let mut set = OptionSet::from_options_str("A=1,B=2,C=3").expect("parse");
        assert_eq!(set.set("B", Value::Literal("x".into())), Some(Value::Int(2)));
        assert_eq!(set.set("D", Value::Bool(false)), None);
        assert_eq!(set.keys().collect::<Vec<_>>(), vec!["A", "B", "C", "D"]);
        assert_eq!(set.get("B"), Some(&Value::Literal("x".into())));
    }

    #[test]
    fn test_set_keeps_caller_type() {
        let mut set = OptionSet::from_options_str("Port=8211").expect("parse");
        set.set("Port", Value::Str("8211".into()));
        assert_eq!(set.get("Port"), Some(&Value::Str("8211".into())));
    }

    #[test]
    fn test_remove_reindexes_later_entries() {
        let mut set = OptionSet::from_options_str("A=1,B=2,C=3").expect("parse");
        assert_eq!(set.remove("A"), Some(Value::Int(1)));
        assert_eq!(set.remove("A"), None);
        assert_eq!(set.get("C"), Some(&Value::Int(3)));
        set.set("C", Value::Int(30));
        assert_eq!(set.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec!["B", "C"]);
        assert_eq!(set.get("C"), Some(&Value::Int(30)));
    }

    #[test]
    fn test_empty_options_string() {
        let set = OptionSet::from_options_str("").expect("parse");
        assert!(set.is_empty());
        assert!(!set.contains_key("A"));
    }

    #[test]
    fn test_unterminated_value_produces_no_store() {
        assert!(OptionSet::from_options_str(r#"A=1,K="unterminated"#).is_err());
    }
}
