use serde_json::json;

use crate::factory::default_token;
use crate::meta::{ThemeCategory, ThemePackageMeta};
use crate::package::{MenuVariant, ThemeAlgorithm, ThemeComponents, ThemePackageConfig};
use crate::token::ThemeToken;

/// Eye-friendly dark theme with indigo accents.
pub fn dark() -> ThemePackageConfig {
    let mut meta = ThemePackageMeta::new("dark", ThemeCategory::Dark)
        .with_names("dark-theme", "Dark")
        .with_description("Eye-friendly dark theme for night use with reduced glare")
        .with_author("themekit")
        .with_tags(["dark", "night", "eye-friendly", "modern", "professional"]);
    meta.created_at = "2024-01-01T00:00:00.000Z".to_string();
    meta.updated_at = "2024-01-01T00:00:00.000Z".to_string();

    let mut token = default_token();
    token.extend_from(&palette());
    token.extend_from(&extensions());

    let mut config = ThemePackageConfig::new(meta, ThemeAlgorithm::Dark, token);
    config.components = components();
    config.menu_variant = Some(MenuVariant::Dark);
    config
}

fn palette() -> ThemeToken {
    ThemeToken::new()
        .with("colorPrimary", "#6366f1")
        .with("colorSuccess", "#10b981")
        .with("colorWarning", "#f59e0b")
        .with("colorError", "#ef4444")
        .with("colorInfo", "#06b6d4")
        .with("colorBgBase", "#0f0f23")
        .with("colorBgContainer", "#1a1a2e")
        .with("colorBgElevated", "#16213e")
        .with("colorBgLayout", "#0f0f23")
        .with("colorBgSpotlight", "rgba(15, 15, 35, 0.95)")
        .with("colorBgMask", "rgba(0, 0, 0, 0.65)")
        .with("colorText", "#f8fafc")
        .with("colorTextSecondary", "#cbd5e1")
        .with("colorTextTertiary", "#94a3b8")
        .with("colorTextQuaternary", "#64748b")
        .with("colorTextDisabled", "#595959")
        .with("colorTextHeading", "#f1f5f9")
        .with("colorTextDescription", "#cbd5e1")
        .with("colorTextPlaceholder", "#64748b")
        .with("colorBorder", "#334155")
        .with("colorBorderSecondary", "#475569")
        .with("colorSplit", "#334155")
        .with("colorFill", "#1e293b")
        .with("colorFillSecondary", "#334155")
        .with("colorFillTertiary", "#475569")
        .with("colorFillQuaternary", "#64748b")
        .with("colorLink", "#6366f1")
        .with("colorLinkHover", "#818cf8")
        .with("colorLinkActive", "#4f46e5")
        .with("borderRadius", 8)
        .with("borderRadiusLG", 12)
        .with("borderRadiusSM", 6)
        .with("borderRadiusXS", 4)
        .with("boxShadow", "0 10px 25px -5px rgba(0, 0, 0, 0.3), 0 4px 6px -2px rgba(0, 0, 0, 0.15)")
        .with("boxShadowSecondary", "0 4px 12px -2px rgba(0, 0, 0, 0.25), 0 2px 4px -1px rgba(0, 0, 0, 0.1)")
        .with("boxShadowTertiary", "0 2px 8px -1px rgba(0, 0, 0, 0.2), 0 1px 2px 0 rgba(0, 0, 0, 0.1)")
        .with("colorBgContainerDisabled", "#1a1a1a")
}

fn extensions() -> ThemeToken {
    ThemeToken::new()
        .with("topMenuHeight", 64)
        .with("topMenuItemMargin", 12)
        .with("topMenuItemPadding", 20)
        .with("topMenuContainerPadding", 0)
        .with("topMenuContainerMargin", 0)
        .with("colorCustom1", "#667eea")
        .with("colorCustom2", "#764ba2")
        .with("colorCustom3", "#f093fb")
        .with("colorCustom4", "#f5576c")
        .with("colorCustom5", "#4facfe")
        .with("layoutSidebarWidth", 240)
        .with("layoutSidebarCollapsedWidth", 80)
        .with("layoutSidebarHeaderHeight", 64)
        .with("layoutSidebarBackgroundColor", "#001529")
        .with("layoutSidebarBorderColor", "#1f1f1f")
        .with("layoutSidebarShadowColor", "2px 0 8px rgba(0, 0, 0, 0.3)")
        .with("layoutTopMenuHeight", 64)
        .with("layoutTopMenuBackgroundColor", "#001529")
        .with("layoutTopMenuBorderColor", "#1f1f1f")
        .with("layoutTopMenuShadowColor", "0 2px 8px rgba(0, 0, 0, 0.3)")
        .with("layoutContentBackgroundColor", "#141414")
        .with("layoutContentPadding", 16)
        .with("layoutContentMargin", 0)
        .with("logoBackgroundColor", "#1890ff")
        .with("logoTextColor", "#ffffff")
        .with("logoIconColor", "#ffffff")
        .with("logoFontSize", 18)
        .with("logoFontWeight", 700)
        .with("logoBorderRadius", 6)
        .with("menuBackgroundColor", "transparent")
        .with("menuItemColor", "rgba(255, 255, 255, 0.95)")
        .with("menuItemHoverColor", "#ffffff")
        .with("menuItemSelectedColor", "#ffffff")
        .with("menuItemBackgroundColor", "transparent")
        .with("menuItemHoverBackgroundColor", "rgba(255, 255, 255, 0.1)")
        .with("menuItemSelectedBackgroundColor", "#1890ff")
        .with("menuIconColor", "rgba(255, 255, 255, 0.85)")
        .with("menuIconHoverColor", "#ffffff")
        .with("menuIconSelectedColor", "#ffffff")
        .with("menuBorderColor", "#1f1f1f")
        .with("menuBorderRadius", 6)
        .with("menuFontSize", 14)
        .with("menuFontWeight", 400)
        .with("menuPadding", 8)
        .with("menuMargin", 4)
        .with("buttonPrimaryColor", "#1890ff")
        .with("buttonDefaultColor", "#ffffff")
        .with("buttonTextColor", "#ffffff")
        .with("buttonBackgroundColor", "#1f1f1f")
        .with("buttonBorderColor", "#434343")
        .with("buttonHoverColor", "#40a9ff")
        .with("buttonActiveColor", "#096dd9")
        .with("buttonDisabledColor", "rgba(255, 255, 255, 0.25)")
        .with("buttonBorderRadius", 6)
        .with("buttonFontSize", 14)
        .with("buttonFontWeight", 400)
        .with("buttonPadding", 8)
        .with("buttonMargin", 4)
        .with("buttonShadow", "0 1px 2px rgba(0, 0, 0, 0.3)")
        .with("headerBackgroundColor", "#001529")
        .with("headerHeight", 64)
        .with("headerBorderColor", "#1f1f1f")
        .with("headerShadowColor", "0 2px 8px rgba(0, 0, 0, 0.3)")
        .with("headerTextColor", "#ffffff")
        .with("headerIconColor", "rgba(255, 255, 255, 0.85)")
        .with("headerPadding", 16)
        .with("gradientPrimary", "linear-gradient(135deg, #667eea 0%, #764ba2 100%)")
        .with("gradientSecondary", "linear-gradient(135deg, #f093fb 0%, #f5576c 100%)")
        .with("gradientSuccess", "linear-gradient(135deg, #4facfe 0%, #00f2fe 100%)")
        .with("boxShadowGlow", "0 0 20px rgba(102, 126, 234, 0.3)")
        .with("fontWeightNormal", 400)
        .with("fontWeightBold", 700)
}

fn components() -> ThemeComponents {
    let mut components = ThemeComponents::new();
    components.insert(
        "Layout".to_string(),
        json!({
            "bodyBg": "#0f0f23",
            "headerBg": "#1a1a2e",
            "headerColor": "#f8fafc",
            "headerHeight": 64,
            "siderBg": "#0f0f23",
            "siderColor": "#cbd5e1",
            "triggerBg": "#16213e",
            "triggerColor": "#f8fafc",
        }),
    );
    components.insert(
        "Menu".to_string(),
        json!({
            "itemBg": "transparent",
            "itemSelectedBg": "#6366f1",
            "itemHoverBg": "rgba(99, 102, 241, 0.1)",
            "itemColor": "#cbd5e1",
            "itemSelectedColor": "#ffffff",
            "itemHoverColor": "#f8fafc",
            "itemActiveBg": "rgba(99, 102, 241, 0.2)",
            "itemActiveColor": "#ffffff",
            "itemDisabledColor": "#64748b",
            "groupTitleColor": "#94a3b8",
            "iconSize": 14,
            "collapsedIconSize": 16,
            "collapsedWidth": 80,
        }),
    );
    components.insert(
        "Button".to_string(),
        json!({
            "primaryColor": "#6366f1",
            "defaultBg": "#1e293b",
            "defaultColor": "#f8fafc",
            "defaultBorderColor": "#334155",
            "defaultHoverBg": "#334155",
            "defaultHoverColor": "#6366f1",
            "dangerColor": "#ef4444",
            "borderRadius": 6,
            "controlHeight": 32,
            "fontWeight": 400,
        }),
    );
    components.insert(
        "Card".to_string(),
        json!({
            "headerBg": "#16213e",
            "headerColor": "#f8fafc",
            "bodyBg": "#1a1a2e",
            "borderColor": "#334155",
            "borderRadius": 12,
        }),
    );
    components.insert(
        "Input".to_string(),
        json!({
            "colorBgContainer": "#1f1f1f",
            "colorBorder": "#434343",
            "colorText": "#ffffff",
            "colorTextPlaceholder": "#737373",
            "borderRadius": 6,
        }),
    );
    components
}
