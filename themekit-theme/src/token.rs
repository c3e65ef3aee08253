//! # Design Tokens
//!
//! A theme's flat token table: design-variable name to value.
//!
//! The table is kept as an insertion-ordered map rather than a struct with
//! hundreds of fields. Which keys are required and what kind each key holds is
//! declared in [`crate::token_schema`], and enforced by the validator, so a
//! malformed token coming from JSON surfaces as a validation error instead of a
//! parse failure.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single token value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    /// A flag such as `wireframe`.
    Bool(bool),
    /// A size, ratio, weight or z-index.
    Number(f64),
    /// A colour, shadow, font stack, duration or easing curve.
    Text(String),
}

impl TokenValue {
    /// The value as a string slice, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a number, if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TokenValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as a boolean, if it is a flag.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TokenValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Name of the value's kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TokenValue::Bool(_) => "boolean",
            TokenValue::Number(_) => "number",
            TokenValue::Text(_) => "string",
        }
    }
}

impl fmt::Display for TokenValue {
    /// Formats the value the way it appears in generated CSS.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Bool(b) => write!(f, "{}", b),
            TokenValue::Number(n) => write!(f, "{}", n),
            TokenValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::Text(value.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        TokenValue::Text(value)
    }
}

impl From<f64> for TokenValue {
    fn from(value: f64) -> Self {
        TokenValue::Number(value)
    }
}

impl From<i32> for TokenValue {
    fn from(value: i32) -> Self {
        TokenValue::Number(f64::from(value))
    }
}

impl From<bool> for TokenValue {
    fn from(value: bool) -> Self {
        TokenValue::Bool(value)
    }
}

/// The token table of a theme package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeToken {
    values: IndexMap<String, TokenValue>,
}

impl ThemeToken {
    /// Create an empty token table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a token, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<TokenValue>) -> Option<TokenValue> {
        self.values.insert(key.into(), value.into())
    }

    /// Builder-style [`ThemeToken::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<TokenValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Remove a token, keeping the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<TokenValue> {
        self.values.shift_remove(key)
    }

    /// Look up a token.
    pub fn get(&self, key: &str) -> Option<&TokenValue> {
        self.values.get(key)
    }

    /// Look up a text token.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(TokenValue::as_str)
    }

    /// Look up a numeric token.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(TokenValue::as_f64)
    }

    /// Look up a boolean token.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(TokenValue::as_bool)
    }

    /// Whether the key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table has no tokens.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate tokens in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overlay every token of `other` onto this table.
    ///
    /// Existing keys keep their position; new keys are appended.
    pub fn extend_from(&mut self, other: &ThemeToken) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ThemeToken
where
    K: Into<String>,
    V: Into<TokenValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_values_deserialize_by_shape() {
        let token: ThemeToken =
            serde_json::from_str(r##"{"colorPrimary":"#1890ff","borderRadius":6,"wireframe":false}"##).unwrap();
        assert_eq!(token.get_str("colorPrimary"), Some("#1890ff"));
        assert_eq!(token.get_f64("borderRadius"), Some(6.0));
        assert_eq!(token.get_bool("wireframe"), Some(false));
    }

    #[test]
    fn extend_overrides_and_appends() {
        let mut base = ThemeToken::new().with("colorPrimary", "#1890ff").with("fontSize", 14);
        let over = ThemeToken::new().with("colorPrimary", "#177ddc").with("colorCustom1", "#ff00ff");
        base.extend_from(&over);
        let keys: Vec<&str> = base.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["colorPrimary", "fontSize", "colorCustom1"]);
        assert_eq!(base.get_str("colorPrimary"), Some("#177ddc"));
    }

    #[test]
    fn display_matches_css_rendering() {
        assert_eq!(TokenValue::from(6).to_string(), "6");
        assert_eq!(TokenValue::from(1.5715).to_string(), "1.5715");
        assert_eq!(TokenValue::from("0.2s").to_string(), "0.2s");
    }
}
