use serde_json::json;

use crate::factory::default_token;
use crate::menu_variant::menu_variant_components;
use crate::meta::{ThemeCategory, ThemePackageMeta};
use crate::package::{MenuVariant, ThemeAlgorithm, ThemePackageConfig};
use crate::token::ThemeToken;

/// Clean light theme built on the base token set.
pub fn light() -> ThemePackageConfig {
    let mut meta = ThemePackageMeta::new("light", ThemeCategory::Light)
        .with_names("light-theme", "Light")
        .with_description("Clean and bright default theme for daytime use")
        .with_author("themekit")
        .with_tags(["light", "default", "clean", "bright"]);
    meta.created_at = "2024-01-01T00:00:00.000Z".to_string();
    meta.updated_at = "2024-01-01T00:00:00.000Z".to_string();

    let mut token = default_token();
    token.extend_from(&extensions());

    let mut config = ThemePackageConfig::new(meta, ThemeAlgorithm::Default, token);
    config.components = menu_variant_components(MenuVariant::Light);
    config.components.insert(
        "Button".to_string(),
        json!({
            "primaryColor": "#1890ff",
            "defaultBg": "#ffffff",
            "defaultColor": "#262626",
            "defaultBorderColor": "#d9d9d9",
            "borderRadius": 6,
            "controlHeight": 32,
        }),
    );
    config.components.insert(
        "Card".to_string(),
        json!({
            "headerBg": "#ffffff",
            "bodyBg": "#ffffff",
            "borderColor": "#f0f0f0",
            "borderRadius": 8,
        }),
    );
    config.menu_variant = Some(MenuVariant::Light);
    config
}

fn extensions() -> ThemeToken {
    ThemeToken::new()
        .with("topMenuHeight", 64)
        .with("topMenuItemMargin", 12)
        .with("topMenuItemPadding", 20)
        .with("layoutSidebarWidth", 240)
        .with("layoutSidebarCollapsedWidth", 80)
        .with("layoutSidebarBackgroundColor", "#ffffff")
        .with("layoutSidebarBorderColor", "#f0f0f0")
        .with("layoutSidebarShadowColor", "2px 0 8px rgba(0, 0, 0, 0.06)")
        .with("layoutTopMenuBackgroundColor", "#ffffff")
        .with("layoutTopMenuBorderColor", "#f0f0f0")
        .with("layoutContentBackgroundColor", "#f5f5f5")
        .with("layoutContentPadding", 16)
        .with("logoBackgroundColor", "#1890ff")
        .with("logoTextColor", "#ffffff")
        .with("logoFontSize", 18)
        .with("logoFontWeight", 700)
        .with("menuItemColor", "#1f1f1f")
        .with("menuItemHoverColor", "#1890ff")
        .with("menuItemSelectedColor", "#1890ff")
        .with("menuItemHoverBackgroundColor", "#f5f5f5")
        .with("menuItemSelectedBackgroundColor", "#e6f7ff")
        .with("buttonPrimaryColor", "#1890ff")
        .with("buttonTextColor", "#ffffff")
        .with("buttonBorderRadius", 6)
        .with("headerBackgroundColor", "#ffffff")
        .with("headerHeight", 64)
        .with("headerBorderColor", "#f0f0f0")
        .with("headerTextColor", "#262626")
}
