//! Light and dark menu styling presets.

use serde_json::json;

use crate::package::{MenuVariant, ThemeComponents};

/// Colours and sizes of a side menu and its surrounding sider.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct MenuConfig {
    pub sider_bg: &'static str,
    pub sider_color: &'static str,
    pub trigger_bg: &'static str,
    pub trigger_color: &'static str,
    pub item_bg: &'static str,
    pub item_selected_bg: &'static str,
    pub item_hover_bg: &'static str,
    pub item_color: &'static str,
    pub item_selected_color: &'static str,
    pub item_hover_color: &'static str,
    pub item_active_bg: &'static str,
    pub item_active_color: &'static str,
    pub item_disabled_color: &'static str,
    pub sub_menu_item_bg: &'static str,
    pub group_title_color: &'static str,
    pub icon_size: u32,
    pub collapsed_icon_size: u32,
    pub collapsed_width: u32,
}

impl MenuConfig {
    /// Light sider with dark text and blue selection.
    pub const fn light() -> Self {
        Self {
            sider_bg: "#ffffff",
            sider_color: "#1f1f1f",
            trigger_bg: "#f5f5f5",
            trigger_color: "#1f1f1f",
            item_bg: "transparent",
            item_selected_bg: "#e6f7ff",
            item_hover_bg: "#f5f5f5",
            item_color: "#1f1f1f",
            item_selected_color: "#1890ff",
            item_hover_color: "#1890ff",
            item_active_bg: "#e6f7ff",
            item_active_color: "#1890ff",
            item_disabled_color: "#bfbfbf",
            sub_menu_item_bg: "transparent",
            group_title_color: "#595959",
            icon_size: 14,
            collapsed_icon_size: 16,
            collapsed_width: 80,
        }
    }

    /// Navy sider with near-white text.
    pub const fn dark() -> Self {
        Self {
            sider_bg: "#001529",
            sider_color: "rgba(255, 255, 255, 0.95)",
            trigger_bg: "#002140",
            trigger_color: "#ffffff",
            item_bg: "transparent",
            item_selected_bg: "#1890ff",
            item_hover_bg: "rgba(24, 144, 255, 0.15)",
            item_color: "rgba(255, 255, 255, 0.95)",
            item_selected_color: "#ffffff",
            item_hover_color: "#ffffff",
            item_active_bg: "rgba(24, 144, 255, 0.25)",
            item_active_color: "#ffffff",
            item_disabled_color: "rgba(255, 255, 255, 0.4)",
            sub_menu_item_bg: "transparent",
            group_title_color: "rgba(255, 255, 255, 0.6)",
            icon_size: 14,
            collapsed_icon_size: 16,
            collapsed_width: 80,
        }
    }

    /// The preset for a variant.
    pub const fn for_variant(variant: MenuVariant) -> Self {
        match variant {
            MenuVariant::Light => Self::light(),
            MenuVariant::Dark => Self::dark(),
        }
    }
}

impl MenuVariant {
    /// The other variant.
    pub fn toggled(self) -> Self {
        match self {
            MenuVariant::Light => MenuVariant::Dark,
            MenuVariant::Dark => MenuVariant::Light,
        }
    }
}

/// `Layout` and `Menu` component entries for a menu variant.
///
/// The result is meant to be merged into a package's components.
pub fn menu_variant_components(variant: MenuVariant) -> ThemeComponents {
    let config = MenuConfig::for_variant(variant);
    let mut components = ThemeComponents::new();
    components.insert(
        "Layout".to_string(),
        json!({
            "siderBg": config.sider_bg,
            "siderColor": config.sider_color,
            "triggerBg": config.trigger_bg,
            "triggerColor": config.trigger_color,
        }),
    );
    components.insert(
        "Menu".to_string(),
        json!({
            "itemBg": config.item_bg,
            "itemSelectedBg": config.item_selected_bg,
            "itemHoverBg": config.item_hover_bg,
            "itemColor": config.item_color,
            "itemSelectedColor": config.item_selected_color,
            "itemHoverColor": config.item_hover_color,
            "itemActiveBg": config.item_active_bg,
            "itemActiveColor": config.item_active_color,
            "itemDisabledColor": config.item_disabled_color,
            "subMenuItemBg": config.sub_menu_item_bg,
            "groupTitleColor": config.group_title_color,
            "iconSize": config.icon_size,
            "collapsedIconSize": config.collapsed_icon_size,
            "collapsedWidth": config.collapsed_width,
        }),
    );
    components
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_follow_variant() {
        let dark = menu_variant_components(MenuVariant::Dark);
        assert_eq!(dark["Layout"]["siderBg"], "#001529");
        assert_eq!(dark["Menu"]["itemSelectedBg"], "#1890ff");

        let light = menu_variant_components(MenuVariant::Light);
        assert_eq!(light["Menu"]["itemColor"], "#1f1f1f");
        assert_eq!(light["Menu"]["collapsedWidth"], 80);
    }

    #[test]
    fn toggle_flips() {
        assert_eq!(MenuVariant::Light.toggled(), MenuVariant::Dark);
        assert_eq!(MenuVariant::Dark.toggled().toggled(), MenuVariant::Dark);
    }
}
