//! Setting values and the duplicate-rejecting settings map

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A typed setting value as written in a directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Bracketed list text, brackets included, never interpreted.
    List(String),
}

impl SettingValue {
    /// Render the value as a directive literal.
    ///
    /// Strings use single quotes, or double quotes when the text contains a
    /// single quote. Floats always carry a decimal point so they read back
    /// as floats.
    pub fn to_literal(&self) -> Result<String> {
        match self {
            Self::String(text) => quote(text),
            Self::Integer(value) => Ok(value.to_string()),
            Self::Float(value) => float_literal(*value),
            Self::Boolean(true) => Ok("True".to_string()),
            Self::Boolean(false) => Ok("False".to_string()),
            Self::List(text) => inside_comment("list containing the comment closer", text.clone()),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for SettingValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Directive text always lives inside a block comment, so no literal may
/// contain the comment's closing delimiter.
const COMMENT_CLOSER: &str = "*/";

fn inside_comment(what: &'static str, literal: String) -> Result<String> {
    if literal.contains(COMMENT_CLOSER) {
        Err(Error::Unrepresentable { what, text: literal })
    } else {
        Ok(literal)
    }
}

/// Quote `text` with whichever quote character it does not contain.
pub(crate) fn quote(text: &str) -> Result<String> {
    const CLOSER_IN_STRING: &str = "string containing the comment closer";
    if !text.contains('\'') {
        inside_comment(CLOSER_IN_STRING, format!("'{text}'"))
    } else if !text.contains('"') {
        inside_comment(CLOSER_IN_STRING, format!("\"{text}\""))
    } else {
        Err(Error::Unrepresentable {
            what: "string containing both quote characters",
            text: text.to_string(),
        })
    }
}

fn float_literal(value: f64) -> Result<String> {
    if !value.is_finite() {
        return Err(Error::Unrepresentable {
            what: "non-finite float",
            text: value.to_string(),
        });
    }
    let text = value.to_string();
    if text.contains('.') {
        Ok(text)
    } else {
        Ok(format!("{text}.0"))
    }
}

/// Ordered setting key to value map that refuses to overwrite.
///
/// Entries keep insertion order, and equality compares entries in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsMap {
    entries: IndexMap<String, SettingValue>,
}

impl SettingsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new key. An existing key is a [`Error::DuplicateKey`] and
    /// leaves the map unchanged.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Result<()> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(Error::DuplicateKey { key });
        }
        self.entries.insert(key, value.into());
        Ok(())
    }

    /// Insert every entry of `other`. A key present in both maps is a
    /// [`Error::DuplicateKey`] and leaves this map unchanged.
    pub fn merge(&mut self, other: SettingsMap) -> Result<()> {
        if let Some(key) = other.keys().find(|key| self.contains_key(key)) {
            return Err(Error::DuplicateKey {
                key: key.to_string(),
            });
        }
        self.entries.extend(other.entries);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for SettingsMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl IntoIterator for SettingsMap {
    type Item = (String, SettingValue);
    type IntoIter = indexmap::map::IntoIter<String, SettingValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
