//! # Theme Package
//!
//! The aggregate root of the engine: metadata, base algorithm, tokens,
//! per-component overrides and free-form extras.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::meta::{MetaPatch, ThemePackageMeta};
use crate::token::ThemeToken;

/// Base colour-mapping strategy a theme derives from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeAlgorithm {
    /// Light derivation.
    #[default]
    Default,
    /// Dark derivation.
    Dark,
    /// Dense sizing on top of the light derivation.
    Compact,
}

impl fmt::Display for ThemeAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeAlgorithm::Default => write!(f, "default"),
            ThemeAlgorithm::Dark => write!(f, "dark"),
            ThemeAlgorithm::Compact => write!(f, "compact"),
        }
    }
}

/// Which menu styling family a theme pairs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuVariant {
    /// Light menu.
    Light,
    /// Dark menu.
    Dark,
}

impl fmt::Display for MenuVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuVariant::Light => write!(f, "light"),
            MenuVariant::Dark => write!(f, "dark"),
        }
    }
}

/// Component name to its dynamically typed configuration.
///
/// Values are expected to be JSON objects; `null` is tolerated with a warning.
pub type ThemeComponents = IndexMap<String, Value>;

/// A complete theme package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePackageConfig {
    /// Identity and discovery metadata.
    pub meta: ThemePackageMeta,
    /// Base algorithm. Required by validation.
    #[serde(default)]
    pub algorithm: Option<ThemeAlgorithm>,
    /// Token table.
    #[serde(default)]
    pub token: ThemeToken,
    /// Per-component overrides.
    #[serde(default)]
    pub components: ThemeComponents,
    /// Free-form extra data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Map<String, Value>>,
    /// Menu styling family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_variant: Option<MenuVariant>,
}

impl ThemePackageConfig {
    /// Create a package from its required sections.
    pub fn new(meta: ThemePackageMeta, algorithm: ThemeAlgorithm, token: ThemeToken) -> Self {
        Self {
            meta,
            algorithm: Some(algorithm),
            token,
            components: ThemeComponents::new(),
            custom: None,
            menu_variant: None,
        }
    }

    /// The package id.
    pub fn id(&self) -> &str {
        &self.meta.id
    }

    /// A single value inside a component's configuration.
    pub fn component_value(&self, component: &str, key: &str) -> Option<&Value> {
        self.components.get(component)?.as_object()?.get(key)
    }

    /// A string value inside a component's configuration.
    pub fn component_str(&self, component: &str, key: &str) -> Option<&str> {
        self.component_value(component, key)?.as_str()
    }
}

/// A partial package: every section optional, metadata per field.
///
/// Used to create packages from defaults, to merge packages and to update
/// registered entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePackagePatch {
    /// Metadata fields to overlay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaPatch>,
    /// Replacement algorithm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<ThemeAlgorithm>,
    /// Tokens to overlay or replace, depending on the operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<ThemeToken>,
    /// Components to overlay or replace, depending on the operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<ThemeComponents>,
    /// Custom data to overlay or replace, depending on the operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Map<String, Value>>,
    /// Replacement menu variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_variant: Option<MenuVariant>,
}

impl ThemePackagePatch {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the metadata patch.
    pub fn with_meta(mut self, meta: MetaPatch) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Set the algorithm.
    pub fn with_algorithm(mut self, algorithm: ThemeAlgorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Set the token section.
    pub fn with_token(mut self, token: ThemeToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Set the components section.
    pub fn with_components(mut self, components: ThemeComponents) -> Self {
        self.components = Some(components);
        self
    }

    /// Set the menu variant.
    pub fn with_menu_variant(mut self, variant: MenuVariant) -> Self {
        self.menu_variant = Some(variant);
        self
    }
}

impl From<&ThemePackageConfig> for ThemePackagePatch {
    /// A patch carrying every section of the package.
    fn from(config: &ThemePackageConfig) -> Self {
        Self {
            meta: Some(MetaPatch::from(&config.meta)),
            algorithm: config.algorithm,
            token: Some(config.token.clone()),
            components: Some(config.components.clone()),
            custom: config.custom.clone(),
            menu_variant: config.menu_variant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::ThemeCategory;
    use serde_json::json;

    #[test]
    fn serialises_with_camel_case_and_skips_absent_extras() {
        let config = ThemePackageConfig::new(
            ThemePackageMeta::new("mini", ThemeCategory::Minimal),
            ThemeAlgorithm::Compact,
            ThemeToken::new().with("colorPrimary", "#000"),
        );
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["algorithm"], json!("compact"));
        assert!(value["meta"].get("displayName").is_some());
        assert!(value.get("menuVariant").is_none());
        assert!(value.get("custom").is_none());
    }

    #[test]
    fn missing_algorithm_deserialises_as_none() {
        let config: ThemePackageConfig = serde_json::from_value(json!({
            "meta": { "id": "x", "category": "dark" },
            "token": {},
            "components": { "Menu": { "itemColor": "#fff" } }
        }))
        .unwrap();
        assert_eq!(config.algorithm, None);
        assert_eq!(config.component_str("Menu", "itemColor"), Some("#fff"));
        assert_eq!(config.component_str("Button", "defaultColor"), None);
    }
}
