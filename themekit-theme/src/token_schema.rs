//! # Token Schema
//!
//! Static declaration of the token keys the engine knows about.
//!
//! ## Overview
//!
//! - Required keys, grouped by kind, must be present on every package.
//! - Optional extension keys are checked against their kind only when present.
//! - Any other key is accepted unchecked.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// What a token key is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A CSS colour.
    Color,
    /// A finite, non-negative number.
    Number,
    /// A non-empty string (font stacks, shadows, gradients, motion).
    Text,
    /// A boolean flag.
    Bool,
}

/// Colours every package must define.
pub const REQUIRED_COLOR_KEYS: &[&str] = &[
    "colorPrimary", "colorSuccess", "colorWarning", "colorError", "colorInfo",
    "colorBgBase", "colorBgContainer", "colorBgElevated", "colorBgLayout",
    "colorBgSpotlight", "colorBgMask", "colorText", "colorTextSecondary",
    "colorTextTertiary", "colorTextQuaternary", "colorTextDisabled",
    "colorTextHeading", "colorTextDescription", "colorTextPlaceholder",
    "colorBorder", "colorBorderSecondary", "colorSplit", "colorFill",
    "colorFillSecondary", "colorFillTertiary", "colorFillQuaternary",
    "colorLink", "colorLinkHover", "colorLinkActive",
];

/// Sizes every package must define.
pub const REQUIRED_NUMBER_KEYS: &[&str] = &[
    "borderRadius", "borderRadiusLG", "borderRadiusSM", "borderRadiusXS",
    "fontSize", "fontSizeLG", "fontSizeSM", "fontSizeXL",
    "fontSizeHeading1", "fontSizeHeading2", "fontSizeHeading3",
    "fontSizeHeading4", "fontSizeHeading5", "lineHeight", "lineHeightLG",
    "lineHeightSM", "padding", "paddingLG", "paddingSM", "paddingXS",
    "margin", "marginLG", "marginSM", "marginXS", "controlHeight",
    "controlHeightLG", "controlHeightSM",
];

/// Font and motion strings every package must define.
pub const REQUIRED_STRING_KEYS: &[&str] = &[
    "fontFamily", "motionDurationFast", "motionDurationMid", "motionDurationSlow",
    "motionEaseInOut", "motionEaseOut", "motionEaseIn",
];

/// Shadows every package must define.
pub const REQUIRED_SHADOW_KEYS: &[&str] = &["boxShadow", "boxShadowSecondary", "boxShadowTertiary"];

/// The single required boolean.
pub const WIREFRAME_KEY: &str = "wireframe";

/// Optional keys that must hold a colour when present.
pub const OPTIONAL_COLOR_KEYS: &[&str] = &[
    "colorCustom1", "colorCustom2", "colorCustom3", "colorCustom4", "colorCustom5",
    "layoutSidebarBackgroundColor", "layoutSidebarBorderColor", "layoutTopMenuBackgroundColor",
    "layoutTopMenuBorderColor", "layoutContentBackgroundColor", "logoBackgroundColor",
    "logoTextColor", "logoIconColor", "menuBackgroundColor", "menuItemColor",
    "menuItemHoverColor", "menuItemSelectedColor", "menuItemBackgroundColor",
    "menuItemHoverBackgroundColor", "menuItemSelectedBackgroundColor", "menuIconColor",
    "menuIconHoverColor", "menuIconSelectedColor", "menuBorderColor", "buttonPrimaryColor",
    "buttonDefaultColor", "buttonTextColor", "buttonBackgroundColor", "buttonBorderColor",
    "buttonHoverColor", "buttonActiveColor", "buttonDisabledColor", "headerBackgroundColor",
    "headerBorderColor", "headerTextColor", "headerIconColor", "cardBackgroundColor",
    "cardBorderColor", "inputBackgroundColor", "inputBorderColor", "inputTextColor",
    "inputPlaceholderColor", "inputFocusColor", "selectBackgroundColor", "selectBorderColor",
    "selectTextColor", "selectHoverColor", "selectSelectedColor", "switchCheckedColor",
    "switchUnCheckedColor", "switchHandleColor", "switchBackgroundColor",
    "drawerBackgroundColor", "drawerBorderColor", "drawerHeaderColor", "drawerBodyColor",
    "modalBackgroundColor", "modalBorderColor", "modalHeaderColor", "modalBodyColor",
    "modalMaskColor", "tableBackgroundColor", "tableBorderColor", "tableHeaderColor",
    "tableRowColor", "tableHoverColor", "tableSelectedColor", "tableTextColor",
    "formLabelColor", "formTextColor", "formBorderColor", "formErrorColor", "formSuccessColor",
    "notificationBackgroundColor", "notificationBorderColor", "notificationTextColor",
    "notificationIconColor", "notificationSuccessColor", "notificationWarningColor",
    "notificationErrorColor", "notificationInfoColor", "tooltipBackgroundColor",
    "tooltipTextColor", "tooltipBorderColor", "popoverBackgroundColor", "popoverBorderColor",
    "dropdownBackgroundColor", "dropdownBorderColor", "dropdownItemColor",
    "dropdownItemHoverColor", "tabsBackgroundColor", "tabsBorderColor", "tabsActiveColor",
    "tabsInactiveColor", "tabsContentColor", "breadcrumbBackgroundColor", "breadcrumbTextColor",
    "breadcrumbLinkColor", "breadcrumbSeparatorColor", "paginationBackgroundColor",
    "paginationBorderColor", "paginationTextColor", "paginationActiveColor",
    "paginationDisabledColor", "progressBackgroundColor", "progressProgressColor",
    "progressTextColor", "badgeBackgroundColor", "badgeTextColor", "badgeBorderColor",
    "avatarBackgroundColor", "avatarTextColor", "avatarBorderColor", "dividerBackgroundColor",
    "dividerTextColor", "emptyBackgroundColor", "emptyTextColor", "emptyIconColor", "spinColor",
    "spinBackgroundColor", "skeletonBackgroundColor", "skeletonActiveColor",
    "timelineBackgroundColor", "timelineBorderColor", "timelineTextColor", "timelineDotColor",
    "treeBackgroundColor", "treeBorderColor", "treeTextColor", "treeSelectedColor",
    "treeHoverColor", "transferBackgroundColor", "transferBorderColor", "transferTextColor",
    "transferSelectedColor", "transferHoverColor", "cascaderBackgroundColor",
    "cascaderBorderColor", "cascaderTextColor", "cascaderSelectedColor", "cascaderHoverColor",
    "datePickerBackgroundColor", "datePickerBorderColor", "datePickerTextColor",
    "datePickerSelectedColor", "datePickerHoverColor", "timePickerBackgroundColor",
    "timePickerBorderColor", "timePickerTextColor", "timePickerSelectedColor",
    "timePickerHoverColor", "calendarBackgroundColor", "calendarBorderColor",
    "calendarTextColor", "calendarSelectedColor", "calendarHoverColor", "calendarHeaderColor",
    "uploadBackgroundColor", "uploadBorderColor", "uploadTextColor", "uploadHoverColor",
    "uploadSuccessColor", "uploadErrorColor", "rateColor", "rateTextColor", "sliderTrackColor",
    "sliderHandleColor", "sliderTextColor", "colorPickerBackgroundColor",
    "colorPickerBorderColor", "colorPickerTextColor", "mentionBackgroundColor",
    "mentionBorderColor", "mentionTextColor", "mentionSelectedColor", "mentionHoverColor",
    "autoCompleteBackgroundColor", "autoCompleteBorderColor", "autoCompleteTextColor",
    "autoCompleteSelectedColor", "autoCompleteHoverColor",
];

/// Optional keys that must hold a non-negative number when present.
pub const OPTIONAL_NUMBER_KEYS: &[&str] = &[
    "borderRadiusCustom1", "borderRadiusCustom2", "borderRadiusCustom3", "borderRadiusCustom4",
    "spacingCustom1", "spacingCustom2", "spacingCustom3", "spacingCustom4", "spacingCustom5",
    "spacingCustom6", "spacingCustom7", "spacingCustom8", "fontSizeCustom1", "fontSizeCustom2",
    "fontSizeCustom3", "fontSizeCustom4", "fontSizeCustom5", "fontSizeCustom6",
    "fontSizeCustom7", "fontSizeCustom8", "fontWeightLight", "fontWeightNormal",
    "fontWeightMedium", "fontWeightSemiBold", "fontWeightBold", "fontWeightExtraBold",
    "lineHeightCustom1", "lineHeightCustom2", "lineHeightCustom3", "lineHeightCustom4",
    "lineHeightCustom5", "lineHeightCustom6", "opacityCustom1", "opacityCustom2",
    "opacityCustom3", "opacityCustom4", "opacityCustom5", "opacityCustom6", "opacityCustom7",
    "opacityCustom8", "opacityCustom9", "lineWidthCustom1", "lineWidthCustom2",
    "lineWidthCustom3", "lineWidthCustom4", "lineWidthCustom5", "zIndexCustom1",
    "zIndexCustom2", "zIndexCustom3", "zIndexCustom4", "zIndexCustom5", "layoutSidebarWidth",
    "layoutSidebarCollapsedWidth", "layoutSidebarHeaderHeight", "layoutTopMenuHeight",
    "layoutContentPadding", "layoutContentMargin", "logoFontSize", "logoFontWeight",
    "logoBorderRadius", "menuBorderRadius", "menuFontSize", "menuFontWeight", "menuPadding",
    "menuMargin", "buttonBorderRadius", "buttonFontSize", "buttonFontWeight", "buttonPadding",
    "buttonMargin", "headerHeight", "headerPadding", "cardBorderRadius", "cardPadding",
    "cardMargin", "inputBorderRadius", "inputFontSize", "inputPadding", "selectBorderRadius",
    "selectFontSize", "selectPadding", "tableFontSize", "formFontSize", "breadcrumbFontSize",
    "paginationFontSize", "progressFontSize", "badgeFontSize", "avatarFontSize",
    "dividerFontSize", "emptyFontSize", "timelineFontSize", "treeFontSize", "rateFontSize",
    "sliderFontSize", "topMenuHeight", "topMenuItemMargin", "topMenuItemPadding",
    "topMenuContainerPadding", "topMenuContainerMargin",
];

/// Optional keys that must hold a non-empty string (gradients, shadows, motion) when present.
pub const OPTIONAL_TEXT_KEYS: &[&str] = &[
    "gradientPrimary", "gradientSecondary", "gradientSuccess", "gradientWarning",
    "gradientError", "boxShadowCustom1", "boxShadowCustom2", "boxShadowCustom3",
    "boxShadowInset", "boxShadowGlow", "motionDurationCustom1", "motionDurationCustom2",
    "motionDurationCustom3", "motionDurationCustom4", "motionDurationCustom5",
    "motionDurationCustom6", "motionEaseCustom1", "motionEaseCustom2", "motionEaseCustom3",
    "motionEaseCustom4", "motionEaseCustom5", "layoutSidebarShadowColor",
    "layoutTopMenuShadowColor", "buttonShadow", "headerShadowColor", "cardShadow",
    "drawerShadowColor", "modalShadowColor", "notificationShadow", "tooltipShadow",
    "popoverShadow", "dropdownShadow",
];

static OPTIONAL_KINDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut kinds = HashMap::new();
    for (keys, kind) in [
        (OPTIONAL_COLOR_KEYS, TokenKind::Color),
        (OPTIONAL_NUMBER_KEYS, TokenKind::Number),
        (OPTIONAL_TEXT_KEYS, TokenKind::Text),
    ] {
        for key in keys {
            kinds.insert(*key, kind);
        }
    }
    kinds
});

/// Declared kind of an optional extension key.
pub fn optional_kind(key: &str) -> Option<TokenKind> {
    OPTIONAL_KINDS.get(key).copied()
}

/// Declared kind of any known key, required or optional.
pub fn kind_of(key: &str) -> Option<TokenKind> {
    if REQUIRED_COLOR_KEYS.contains(&key) {
        Some(TokenKind::Color)
    } else if REQUIRED_NUMBER_KEYS.contains(&key) {
        Some(TokenKind::Number)
    } else if REQUIRED_STRING_KEYS.contains(&key) || REQUIRED_SHADOW_KEYS.contains(&key) {
        Some(TokenKind::Text)
    } else if key == WIREFRAME_KEY {
        Some(TokenKind::Bool)
    } else {
        optional_kind(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_lists_have_expected_sizes() {
        assert_eq!(REQUIRED_COLOR_KEYS.len(), 29);
        assert_eq!(REQUIRED_NUMBER_KEYS.len(), 27);
        assert_eq!(REQUIRED_STRING_KEYS.len(), 7);
    }

    #[test]
    fn optional_keys_do_not_shadow_required_ones() {
        for key in REQUIRED_COLOR_KEYS.iter().chain(REQUIRED_NUMBER_KEYS).chain(REQUIRED_STRING_KEYS) {
            assert!(optional_kind(key).is_none(), "{key} declared twice");
        }
    }

    #[test]
    fn kinds_resolve() {
        assert_eq!(kind_of("colorPrimary"), Some(TokenKind::Color));
        assert_eq!(kind_of("headerHeight"), Some(TokenKind::Number));
        assert_eq!(kind_of("headerShadowColor"), Some(TokenKind::Text));
        assert_eq!(kind_of("menuItemSelectedColor"), Some(TokenKind::Color));
        assert_eq!(kind_of("wireframe"), Some(TokenKind::Bool));
        assert_eq!(kind_of("somethingElse"), None);
    }
}
