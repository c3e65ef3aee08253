//! # Theme Package Factory
//!
//! Creation, (de)serialisation, copying and shallow merging of packages.

use serde_json::Map;

use crate::error::{ThemeError, ThemeResult};
use crate::meta::{ThemeCategory, ThemePackageMeta};
use crate::package::{ThemeAlgorithm, ThemeComponents, ThemePackageConfig, ThemePackagePatch};
use crate::token::ThemeToken;

/// Font stack shared by the built-in packages.
pub const DEFAULT_FONT_FAMILY: &str = "-apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, \"Helvetica Neue\", Arial, \"Noto Sans\", sans-serif, \"Apple Color Emoji\", \"Segoe UI Emoji\", \"Segoe UI Symbol\", \"Noto Color Emoji\"";

/// The base token set: every required key with light-mode values.
pub fn default_token() -> ThemeToken {
    let shadow = "0 6px 16px 0 rgba(0, 0, 0, 0.08), 0 3px 6px -4px rgba(0, 0, 0, 0.12), 0 9px 28px 8px rgba(0, 0, 0, 0.05)";
    ThemeToken::new()
        .with("colorPrimary", "#1890ff")
        .with("colorSuccess", "#52c41a")
        .with("colorWarning", "#faad14")
        .with("colorError", "#ff4d4f")
        .with("colorInfo", "#13c2c2")
        .with("colorBgBase", "#ffffff")
        .with("colorBgContainer", "#ffffff")
        .with("colorBgElevated", "#ffffff")
        .with("colorBgLayout", "#f5f5f5")
        .with("colorBgSpotlight", "rgba(0, 0, 0, 0.85)")
        .with("colorBgMask", "rgba(0, 0, 0, 0.45)")
        .with("colorText", "#262626")
        .with("colorTextSecondary", "#8c8c8c")
        .with("colorTextTertiary", "#bfbfbf")
        .with("colorTextQuaternary", "#f0f0f0")
        .with("colorTextDisabled", "#bfbfbf")
        .with("colorTextHeading", "#262626")
        .with("colorTextDescription", "#8c8c8c")
        .with("colorTextPlaceholder", "#bfbfbf")
        .with("colorBorder", "#d9d9d9")
        .with("colorBorderSecondary", "#f0f0f0")
        .with("colorSplit", "#f0f0f0")
        .with("colorFill", "#f5f5f5")
        .with("colorFillSecondary", "#fafafa")
        .with("colorFillTertiary", "#f0f0f0")
        .with("colorFillQuaternary", "#fafafa")
        .with("colorLink", "#1890ff")
        .with("colorLinkHover", "#40a9ff")
        .with("colorLinkActive", "#096dd9")
        .with("borderRadius", 6)
        .with("borderRadiusLG", 8)
        .with("borderRadiusSM", 4)
        .with("borderRadiusXS", 2)
        .with("boxShadow", shadow)
        .with("boxShadowSecondary", shadow)
        .with(
            "boxShadowTertiary",
            "0 1px 2px 0 rgba(0, 0, 0, 0.03), 0 1px 6px -1px rgba(0, 0, 0, 0.02), 0 2px 4px 0 rgba(0, 0, 0, 0.02)",
        )
        .with("fontFamily", DEFAULT_FONT_FAMILY)
        .with("fontSize", 14)
        .with("fontSizeLG", 16)
        .with("fontSizeSM", 12)
        .with("fontSizeXL", 20)
        .with("fontSizeHeading1", 38)
        .with("fontSizeHeading2", 30)
        .with("fontSizeHeading3", 24)
        .with("fontSizeHeading4", 20)
        .with("fontSizeHeading5", 16)
        .with("lineHeight", 1.5714285714285714)
        .with("lineHeightLG", 1.5)
        .with("lineHeightSM", 1.66)
        .with("padding", 16)
        .with("paddingLG", 24)
        .with("paddingSM", 12)
        .with("paddingXS", 8)
        .with("margin", 16)
        .with("marginLG", 24)
        .with("marginSM", 12)
        .with("marginXS", 8)
        .with("motionDurationFast", "0.1s")
        .with("motionDurationMid", "0.2s")
        .with("motionDurationSlow", "0.3s")
        .with("motionEaseInOut", "cubic-bezier(0.645, 0.045, 0.355, 1)")
        .with("motionEaseOut", "cubic-bezier(0.215, 0.61, 0.355, 1)")
        .with("motionEaseIn", "cubic-bezier(0.55, 0.055, 0.675, 0.19)")
        .with("wireframe", false)
        .with("controlHeight", 32)
        .with("controlHeightLG", 40)
        .with("controlHeightSM", 24)
}

/// Stateless builder for theme packages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeFactory;

impl ThemeFactory {
    /// Create a factory.
    pub fn new() -> Self {
        Self
    }

    /// Create a package from defaults overlaid with `patch`.
    ///
    /// The defaults are a light `custom-theme` package with [`default_token`],
    /// no components and the default algorithm.
    pub fn create(&self, patch: &ThemePackagePatch) -> ThemePackageConfig {
        let meta = ThemePackageMeta::new("custom-theme", ThemeCategory::Light)
            .with_names("custom-theme", "Custom Theme")
            .with_description("User customised theme")
            .with_author("User")
            .with_tags(["custom"]);
        let base = ThemePackageConfig::new(meta, ThemeAlgorithm::Default, default_token());
        self.merge(&base, patch)
    }

    /// Parse a package from JSON. No validation is performed.
    pub fn from_json(&self, json: &str) -> ThemeResult<ThemePackageConfig> {
        serde_json::from_str(json).map_err(|e| ThemeError::parse(format!("Invalid JSON format: {}", e)))
    }

    /// Pretty-printed JSON of a package.
    pub fn to_json(&self, config: &ThemePackageConfig) -> ThemeResult<String> {
        Ok(serde_json::to_string_pretty(config)?)
    }

    /// An independent deep copy of a package.
    pub fn deep_clone(&self, config: &ThemePackageConfig) -> ThemePackageConfig {
        config.clone()
    }

    /// Shallow per-section merge of `patch` onto a copy of `base`.
    ///
    /// Meta is overlaid per field. Token, components and custom are overlaid
    /// one level deep: a key present in the patch replaces the whole base value
    /// under that key. Algorithm and menu variant are replaced when present.
    pub fn merge(&self, base: &ThemePackageConfig, patch: &ThemePackagePatch) -> ThemePackageConfig {
        let mut merged = base.clone();

        if let Some(meta) = &patch.meta {
            meta.apply_to(&mut merged.meta);
        }
        if let Some(algorithm) = patch.algorithm {
            merged.algorithm = Some(algorithm);
        }
        if let Some(token) = &patch.token {
            merged.token.extend_from(token);
        }
        if let Some(components) = &patch.components {
            merge_components(&mut merged.components, components);
        }
        if let Some(custom) = &patch.custom {
            let target = merged.custom.get_or_insert_with(Map::new);
            for (key, value) in custom {
                target.insert(key.clone(), value.clone());
            }
        }
        if let Some(variant) = patch.menu_variant {
            merged.menu_variant = Some(variant);
        }

        merged
    }
}

fn merge_components(target: &mut ThemeComponents, overlay: &ThemeComponents) {
    for (name, value) in overlay {
        target.insert(name.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::MetaPatch;
    use crate::package::MenuVariant;
    use crate::validator::ThemeValidator;
    use serde_json::json;

    #[test]
    fn created_package_is_valid() {
        let factory = ThemeFactory::new();
        let config = factory.create(&ThemePackagePatch::default());
        assert_eq!(config.meta.id, "custom-theme");
        assert_eq!(config.algorithm, Some(ThemeAlgorithm::Default));
        let result = ThemeValidator::new().validate(&config);
        assert!(result.valid, "{:?}", result.errors);
    }

    #[test]
    fn create_applies_patch() {
        let patch = ThemePackagePatch::new()
            .with_meta(MetaPatch {
                id: Some("ocean".into()),
                ..MetaPatch::default()
            })
            .with_token(ThemeToken::new().with("colorPrimary", "#0077be"))
            .with_menu_variant(MenuVariant::Dark);
        let config = ThemeFactory::new().create(&patch);
        assert_eq!(config.meta.id, "ocean");
        assert_eq!(config.meta.name, "custom-theme");
        assert_eq!(config.token.get_str("colorPrimary"), Some("#0077be"));
        assert_eq!(config.token.get_str("colorSuccess"), Some("#52c41a"));
        assert_eq!(config.menu_variant, Some(MenuVariant::Dark));
    }

    #[test]
    fn merge_is_shallow_per_section() {
        let factory = ThemeFactory::new();
        let mut base = factory.create(&ThemePackagePatch::default());
        base.components.insert("Menu".into(), json!({ "itemColor": "#000", "itemBg": "#fff" }));

        let mut components = ThemeComponents::new();
        components.insert("Menu".into(), json!({ "itemColor": "#fff" }));
        components.insert("Button".into(), json!({ "defaultBg": "#111" }));
        let merged = factory.merge(&base, &ThemePackagePatch::new().with_components(components));

        // The whole Menu object is replaced, not merged key by key.
        assert_eq!(merged.components["Menu"], json!({ "itemColor": "#fff" }));
        assert_eq!(merged.components["Button"], json!({ "defaultBg": "#111" }));
        assert_eq!(base.components["Menu"]["itemBg"], json!("#fff"));
    }

    #[test]
    fn json_round_trip_and_parse_errors() {
        let factory = ThemeFactory::new();
        let config = factory.create(&ThemePackagePatch::default());
        let text = factory.to_json(&config).unwrap();
        assert!(text.contains("\n  \"meta\""));
        assert_eq!(factory.from_json(&text).unwrap(), config);

        let err = factory.from_json("{ not json").unwrap_err();
        assert!(matches!(err, ThemeError::Parse { .. }));
    }
}
