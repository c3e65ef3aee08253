//! # Theme Package Validation
//!
//! Structural and semantic checks over a [`ThemePackageConfig`].
//!
//! ## Overview
//!
//! - [`ThemeValidator::validate_meta`] checks identity fields, the id charset and timestamps
//! - [`ThemeValidator::validate_token`] checks every required token and any known optional one
//! - [`ThemeValidator::validate_components`] checks the shape of the component map
//! - [`ThemeValidator::validate`] unions all of the above and requires an algorithm
//!
//! Validation is pure. Errors make a package invalid; warnings never do.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ThemeError, ThemeResult};
use crate::meta::{parse_timestamp, ThemePackageMeta};
use crate::package::{ThemeComponents, ThemePackageConfig};
use crate::token::{ThemeToken, TokenValue};
use crate::token_schema::{
    optional_kind, TokenKind, REQUIRED_COLOR_KEYS, REQUIRED_NUMBER_KEYS, REQUIRED_SHADOW_KEYS,
    REQUIRED_STRING_KEYS, WIREFRAME_KEY,
};

static ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap());

static SEMVER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+$").unwrap());

static COLOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(#([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})",
        r"|rgb\(\s*\d+\s*,\s*\d+\s*,\s*\d+\s*\)",
        r"|rgba\(\s*\d+\s*,\s*\d+\s*,\s*\d+\s*,\s*[\d.]+\s*\)",
        r"|hsl\(\s*\d+\s*,\s*\d+%\s*,\s*\d+%\s*\)",
        r"|hsla\(\s*\d+\s*,\s*\d+%\s*,\s*\d+%\s*,\s*[\d.]+\s*\)",
        r"|transparent|currentColor|[a-zA-Z]+)$"
    ))
    .unwrap()
});

/// Whether a string is accepted as a CSS colour.
///
/// The grammar is permissive: any run of ASCII letters passes as a named colour.
pub fn is_valid_color(value: &str) -> bool {
    COLOR_PATTERN.is_match(value)
}

/// Outcome of a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// `true` iff `errors` is empty.
    pub valid: bool,
    /// Problems that make the package unusable.
    pub errors: Vec<String>,
    /// Problems worth reporting that do not block use.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Build a result, deriving `valid` from the errors.
    pub fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// A passing result with no messages.
    pub fn ok() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// A failing result with a single error.
    pub fn failure(error: impl Into<String>) -> Self {
        Self::new(vec![error.into()], Vec::new())
    }

    /// Append another result's messages to this one.
    pub fn absorb(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.valid = self.errors.is_empty();
    }

    /// Turn a failing result into a [`ThemeError::Validation`].
    pub fn into_result(self) -> ThemeResult<Vec<String>> {
        if self.valid {
            Ok(self.warnings)
        } else {
            Err(ThemeError::validation(self.errors, self.warnings))
        }
    }
}

/// Stateless validator for theme packages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeValidator;

impl ThemeValidator {
    /// Create a validator.
    pub fn new() -> Self {
        Self
    }

    /// Validate a whole package.
    pub fn validate(&self, config: &ThemePackageConfig) -> ValidationResult {
        let mut result = self.validate_meta(&config.meta);
        result.absorb(self.validate_token(&config.token));
        result.absorb(self.validate_components(&config.components));

        if config.algorithm.is_none() {
            result.absorb(ValidationResult::failure("Theme algorithm is required"));
        }

        result
    }

    /// Validate package metadata.
    pub fn validate_meta(&self, meta: &ThemePackageMeta) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if meta.id.is_empty() {
            errors.push("Theme package ID is required and must be a string".to_string());
        } else if !ID_PATTERN.is_match(&meta.id) {
            errors.push(
                "Theme package ID must contain only alphanumeric characters, hyphens, and underscores".to_string(),
            );
        }

        let required = [
            ("name", &meta.name),
            ("display name", &meta.display_name),
            ("description", &meta.description),
        ];
        for (label, value) in required {
            if value.is_empty() {
                errors.push(format!("Theme package {} is required and must be a string", label));
            }
        }

        if meta.version.is_empty() {
            errors.push("Theme package version is required and must be a string".to_string());
        } else if !SEMVER_PATTERN.is_match(&meta.version) {
            warnings.push("Theme package version should follow semantic versioning (e.g., 1.0.0)".to_string());
        }

        if meta.author.is_empty() {
            errors.push("Theme package author is required and must be a string".to_string());
        }

        for (index, tag) in meta.tags.iter().enumerate() {
            if tag.trim().is_empty() {
                errors.push(format!("Theme package tag at index {} must be a non-empty string", index));
            }
        }

        for (label, value) in [("createdAt", &meta.created_at), ("updatedAt", &meta.updated_at)] {
            if value.is_empty() {
                errors.push(format!("Theme package {} is required and must be a string", label));
            } else if parse_timestamp(value).is_none() {
                errors.push(format!("Theme package {} must be a valid ISO date string", label));
            }
        }

        ValidationResult::new(errors, warnings)
    }

    /// Validate the token table.
    pub fn validate_token(&self, token: &ThemeToken) -> ValidationResult {
        let mut errors = Vec::new();

        for field in REQUIRED_COLOR_KEYS {
            match non_empty_text(token.get(field)) {
                None => errors.push(format!("Token {} is required and must be a string", field)),
                Some(value) if !is_valid_color(value) => {
                    errors.push(format!("Token {} must be a valid color value", field))
                }
                Some(_) => {}
            }
        }

        for field in REQUIRED_NUMBER_KEYS {
            if !is_non_negative(token.get(field)) {
                errors.push(format!("Token {} must be a non-negative number", field));
            }
        }

        for field in REQUIRED_STRING_KEYS.iter().chain(REQUIRED_SHADOW_KEYS) {
            if non_empty_text(token.get(field)).is_none() {
                errors.push(format!("Token {} is required and must be a string", field));
            }
        }

        if token.get_bool(WIREFRAME_KEY).is_none() {
            errors.push("Token wireframe must be a boolean".to_string());
        }

        for (key, value) in token.iter() {
            let Some(kind) = optional_kind(key) else {
                continue;
            };
            let value = Some(value);
            let message = match kind {
                TokenKind::Color if !non_empty_text(value).is_some_and(is_valid_color) => {
                    format!("Token {} must be a valid color value", key)
                }
                TokenKind::Number if !is_non_negative(value) => {
                    format!("Token {} must be a non-negative number", key)
                }
                TokenKind::Text if non_empty_text(value).is_none() => {
                    format!("Token {} must be a non-empty string", key)
                }
                _ => continue,
            };
            errors.push(message);
        }

        ValidationResult::new(errors, Vec::new())
    }

    /// Validate the component map.
    pub fn validate_components(&self, components: &ThemeComponents) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for (name, config) in components {
            match config {
                Value::Object(entries) => {
                    for (key, value) in entries {
                        if value.is_null() {
                            warnings.push(format!("Component {}.{} has null/undefined value", name, key));
                        }
                    }
                }
                Value::Null => warnings.push(format!("Component {} has null/undefined value", name)),
                _ => errors.push(format!(
                    "Component {} configuration must be an object or undefined",
                    name
                )),
            }
        }

        ValidationResult::new(errors, warnings)
    }

    /// Check that `id` is not among `existing`.
    pub fn validate_unique_id<S: AsRef<str>>(&self, id: &str, existing: &[S]) -> ValidationResult {
        if existing.iter().any(|known| known.as_ref() == id) {
            ValidationResult::failure(format!("Theme package ID '{}' already exists", id))
        } else {
            ValidationResult::ok()
        }
    }
}

fn non_empty_text(value: Option<&TokenValue>) -> Option<&str> {
    value.and_then(TokenValue::as_str).filter(|s| !s.is_empty())
}

fn is_non_negative(value: Option<&TokenValue>) -> bool {
    value
        .and_then(TokenValue::as_f64)
        .is_some_and(|n| n.is_finite() && n >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use serde_json::json;

    #[test]
    fn builtin_presets_are_valid() {
        let validator = ThemeValidator::new();
        for config in [presets::light(), presets::dark()] {
            let result = validator.validate(&config);
            assert!(result.valid, "{}: {:?}", config.meta.id, result.errors);
            assert!(result.errors.is_empty());
        }
    }

    #[test]
    fn invalid_color_in_any_required_field_is_reported() {
        let validator = ThemeValidator::new();
        for field in REQUIRED_COLOR_KEYS {
            for bad in ["#12", "rgb(1,2)", "hsl(10, 20, 30)", "#ggg", "not a color"] {
                let mut config = presets::light();
                config.token.insert(*field, bad);
                let result = validator.validate(&config);
                assert!(!result.valid, "{field} accepted {bad:?}");
                assert!(
                    result.errors.iter().any(|e| e.contains(field)),
                    "{field} missing from {:?}",
                    result.errors
                );
            }
        }
    }

    #[test]
    fn color_grammar_accepts_common_forms() {
        for ok in [
            "#fff",
            "#1890ff",
            "#1890ffcc",
            "rgb(0, 0, 0)",
            "rgba(255, 255, 255, 0.85)",
            "hsl(210, 50%, 40%)",
            "hsla(210, 50%, 40%, 0.5)",
            "transparent",
            "currentColor",
            "rebeccapurple",
        ] {
            assert!(is_valid_color(ok), "{ok}");
        }
    }

    #[test]
    fn missing_required_token_and_negative_numbers_are_errors() {
        let mut config = presets::light();
        config.token.remove("colorLink");
        config.token.insert("fontSize", -1);
        config.token.insert("wireframe", "no");
        let result = ThemeValidator::new().validate_token(&config.token);
        assert!(result.errors.contains(&"Token colorLink is required and must be a string".to_string()));
        assert!(result.errors.contains(&"Token fontSize must be a non-negative number".to_string()));
        assert!(result.errors.contains(&"Token wireframe must be a boolean".to_string()));
    }

    #[test]
    fn optional_keys_are_checked_only_when_present() {
        let validator = ThemeValidator::new();
        let mut config = presets::light();
        config.token.remove("headerHeight");
        assert!(validator.validate(&config).valid);

        config.token.insert("headerHeight", "tall");
        config.token.insert("menuItemColor", "??");
        config.token.insert("someUnknownKey", -5);
        let result = validator.validate(&config);
        assert_eq!(result.errors.len(), 2, "{:?}", result.errors);
    }

    #[test]
    fn meta_problems() {
        let validator = ThemeValidator::new();
        let mut config = presets::light();
        config.meta.id = "has space".into();
        config.meta.version = "v1".into();
        config.meta.updated_at = "soon".into();
        let result = validator.validate_meta(&config.meta);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.warnings.len(), 1);
        assert!(!result.valid);
    }

    #[test]
    fn null_components_are_warnings_and_scalars_are_errors() {
        let mut components = ThemeComponents::new();
        components.insert("Menu".into(), json!({ "itemColor": null, "itemBg": "#fff" }));
        components.insert("Card".into(), Value::Null);
        let result = ThemeValidator::new().validate_components(&components);
        assert!(result.valid);
        assert_eq!(result.warnings.len(), 2);

        components.insert("Button".into(), json!(42));
        let result = ThemeValidator::new().validate_components(&components);
        assert!(!result.valid);
        assert_eq!(result.errors, ["Component Button configuration must be an object or undefined"]);
    }

    #[test]
    fn algorithm_is_required() {
        let mut config = presets::light();
        config.algorithm = None;
        let result = ThemeValidator::new().validate(&config);
        assert_eq!(result.errors, ["Theme algorithm is required"]);
    }

    #[test]
    fn unique_id() {
        let validator = ThemeValidator::new();
        assert!(!validator.validate_unique_id("light", &["light", "dark"]).valid);
        assert!(validator.validate_unique_id("ocean", &["light", "dark"]).valid);
    }
}
