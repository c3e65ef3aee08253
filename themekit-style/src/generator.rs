//! # CSS Generation
//!
//! Turns a [`ThemePackageConfig`] into a stylesheet.
//!
//! ## Sections
//!
//! In output order:
//!
//! 1. `:root` custom properties, one per token that is present
//! 2. layout rules (sidebar, top menu, content area), see [`StyleOptions::include_layout`]
//! 3. component rules (logo, menu, buttons, header), see [`StyleOptions::include_components`]
//! 4. transitions and keyframes, see [`StyleOptions::include_animations`]
//! 5. breakpoints at 768px and 480px, see [`StyleOptions::include_responsive`]
//!
//! Optional tokens fall back to base tokens and finally to literals, so
//! generation never fails. Output is a pure function of the package and the
//! options.

use std::fmt::Write;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use themekit_theme::{ThemePackageConfig, ThemeToken, TokenValue};

/// Which sections to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOptions {
    /// Sidebar, top menu and content area rules.
    pub include_layout: bool,
    /// Logo, menu, button and header rules.
    pub include_components: bool,
    /// Transition helpers and keyframes.
    pub include_animations: bool,
    /// Media query breakpoints.
    pub include_responsive: bool,
    /// Strip comments and collapse whitespace.
    pub minify: bool,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            include_layout: true,
            include_components: true,
            include_animations: true,
            include_responsive: true,
            minify: false,
        }
    }
}

/// Generate the stylesheet of a package.
pub fn generate_theme_css(config: &ThemePackageConfig, options: &StyleOptions) -> String {
    StyleGenerator::new(config, *options).generate()
}

/// Stylesheet generator for one package.
#[derive(Debug, Clone, Copy)]
pub struct StyleGenerator<'a> {
    config: &'a ThemePackageConfig,
    options: StyleOptions,
}

impl<'a> StyleGenerator<'a> {
    /// A generator for `config`.
    pub fn new(config: &'a ThemePackageConfig, options: StyleOptions) -> Self {
        Self { config, options }
    }

    /// The full stylesheet.
    pub fn generate(&self) -> String {
        let mut sections = vec![self.css_variables()];
        if self.options.include_layout {
            sections.push(self.layout_rules());
        }
        if self.options.include_components {
            sections.push(self.component_rules());
        }
        if self.options.include_animations {
            sections.push(self.animation_rules());
        }
        if self.options.include_responsive {
            sections.push(responsive_rules().to_string());
        }

        let css = sections.join("\n");
        if self.options.minify {
            minify_css(&css)
        } else {
            css
        }
    }

    fn tokens(&self) -> Tokens<'a> {
        Tokens(&self.config.token)
    }

    /// The `:root` custom property block.
    pub fn css_variables(&self) -> String {
        let token = self.tokens();
        let mut block = String::from(":root {\n");
        let _ = writeln!(block, "  /* Theme: {} */", comment_safe(&self.config.meta.display_name));

        let properties: &[(&str, &str, &str)] = &[
            ("--theme-primary", "colorPrimary", ""),
            ("--theme-success", "colorSuccess", ""),
            ("--theme-warning", "colorWarning", ""),
            ("--theme-error", "colorError", ""),
            ("--theme-info", "colorInfo", ""),
            ("--layout-sidebar-width", "layoutSidebarWidth", "px"),
            ("--layout-sidebar-collapsed-width", "layoutSidebarCollapsedWidth", "px"),
            ("--layout-sidebar-header-height", "layoutSidebarHeaderHeight", "px"),
            ("--layout-top-menu-height", "layoutTopMenuHeight", "px"),
            ("--logo-background-color", "logoBackgroundColor", ""),
            ("--logo-text-color", "logoTextColor", ""),
            ("--logo-icon-color", "logoIconColor", ""),
            ("--menu-background-color", "menuBackgroundColor", ""),
            ("--menu-item-color", "menuItemColor", ""),
            ("--menu-item-hover-color", "menuItemHoverColor", ""),
            ("--menu-item-selected-color", "menuItemSelectedColor", ""),
            ("--top-menu-height", "topMenuHeight", "px"),
            ("--top-menu-item-margin", "topMenuItemMargin", "px"),
            ("--top-menu-item-padding", "topMenuItemPadding", "px"),
            ("--top-menu-container-padding", "topMenuContainerPadding", "px"),
            ("--top-menu-container-margin", "topMenuContainerMargin", "px"),
            ("--button-primary-color", "buttonPrimaryColor", ""),
            ("--button-default-color", "buttonDefaultColor", ""),
            ("--button-text-color", "buttonTextColor", ""),
            ("--header-background-color", "headerBackgroundColor", ""),
            ("--header-text-color", "headerTextColor", ""),
            ("--header-icon-color", "headerIconColor", ""),
        ];
        for (property, key, unit) in properties {
            if let Some(value) = token.get(key) {
                let _ = writeln!(block, "  {}: {}{};", property, value, unit);
            }
        }

        block.push('}');
        block
    }

    /// Sidebar, top menu, content area and page background rules.
    pub fn layout_rules(&self) -> String {
        let t = self.tokens();
        let sidebar_border = t.pick(&["layoutSidebarBorderColor", "colorBorder"], "transparent");
        let bg_layout = t.pick(&["colorBgLayout"], "transparent");
        let bg_base = t.pick(&["colorBgBase"], "transparent");

        format!(
            r#"
/* Sidebar layout */
.sidebar {{
  width: var(--layout-sidebar-width, 240px);
  background-color: {sidebar_bg};
  border-right: 1px solid {sidebar_border};
  box-shadow: {sidebar_shadow};
}}

.sidebar.collapsed {{
  width: var(--layout-sidebar-collapsed-width, 80px);
}}

.sidebar-header {{
  height: var(--layout-sidebar-header-height, 64px);
  display: flex;
  align-items: center;
  justify-content: center;
  border-bottom: 1px solid {sidebar_border};
  background-color: {header_bg};
}}

/* Top menu layout */
.top-menu-layout .top-header {{
  height: var(--layout-top-menu-height, 64px);
  background-color: {top_bg};
  border-bottom: 1px solid {top_border};
  box-shadow: {top_shadow};
}}

/* Content area */
.content-area {{
  background-color: {content_bg};
  padding: {content_padding}px;
  margin: {content_margin}px;
}}

/* Page background */
html, body {{
  background-color: {bg_layout} !important;
  transition: background-color 0.3s ease !important;
}}

body {{
  color: {text} !important;
  transition: background-color 0.3s ease, color 0.3s ease !important;
}}

.ant-layout {{
  background-color: {bg_layout} !important;
}}

.ant-layout-content {{
  background-color: {bg_base} !important;
}}

#root, .app, .main-container {{
  background-color: {bg_layout} !important;
  min-height: 100vh !important;
}}

.page-content, .content-wrapper, .main-content {{
  background-color: {bg_base} !important;
}}"#,
            sidebar_bg = t.pick(&["layoutSidebarBackgroundColor", "colorBgContainer"], "transparent"),
            sidebar_border = sidebar_border,
            sidebar_shadow = t.pick(&["layoutSidebarShadowColor", "boxShadow"], "none"),
            header_bg = t.pick(&["headerBackgroundColor", "colorBgContainer"], "transparent"),
            top_bg = t.pick(&["layoutTopMenuBackgroundColor", "colorBgContainer"], "transparent"),
            top_border = t.pick(&["layoutTopMenuBorderColor", "colorBorder"], "transparent"),
            top_shadow = t.pick(&["layoutTopMenuShadowColor", "boxShadow"], "none"),
            content_bg = t.pick(&["layoutContentBackgroundColor", "colorBgLayout"], "transparent"),
            content_padding = t.pick(&["layoutContentPadding"], "16"),
            content_margin = t.pick(&["layoutContentMargin"], "0"),
            bg_layout = bg_layout,
            bg_base = bg_base,
            text = t.pick(&["colorText"], "inherit"),
        )
    }

    /// Logo, menu, button and header rules.
    pub fn component_rules(&self) -> String {
        let t = self.tokens();
        let button_border = t.get("buttonBorderColor");

        format!(
            r#"
/* Logo */
.logo-text {{
  color: {logo_text};
  font-size: {logo_font_size}px;
  font-weight: {logo_font_weight};
}}

.logo-icon {{
  background-color: {logo_bg};
  color: {logo_icon};
  border-radius: {logo_radius}px;
  width: 32px;
  height: 32px;
  display: flex;
  align-items: center;
  justify-content: center;
}}

/* Menu */
.menu-theme-unified .ant-menu {{
  background-color: {menu_bg};
  border-radius: {menu_radius}px;
}}

.menu-theme-unified .ant-menu-item {{
  color: {menu_item};
  font-size: {menu_font_size}px;
  font-weight: {menu_font_weight};
  padding: {menu_padding}px;
  margin: {menu_margin}px 8px;
}}

.menu-theme-unified .ant-menu-item:hover {{
  background-color: {menu_hover_bg};
  color: {menu_hover};
}}

.menu-theme-unified .ant-menu-item-selected {{
  background-color: {menu_selected_bg};
  color: {menu_selected};
}}

.menu-theme-unified .ant-menu-item .ant-menu-item-icon {{
  color: {menu_icon};
}}

.menu-theme-unified .ant-menu-item:hover .ant-menu-item-icon {{
  color: {menu_icon_hover};
}}

.menu-theme-unified .ant-menu-item-selected .ant-menu-item-icon {{
  color: {menu_icon_selected};
}}

/* Buttons */
.theme-button {{
  border-radius: {button_radius}px;
  font-size: {button_font_size}px;
  font-weight: {button_font_weight};
  padding: {button_padding}px 16px;
  margin: {button_margin}px;
  box-shadow: {button_shadow};
}}

.theme-button.primary {{
  background-color: {button_primary};
  color: {button_text};
  border-color: {button_primary_border};
}}

.theme-button.default {{
  background-color: {button_bg};
  color: {button_default};
  border-color: {button_default_border};
}}

/* Header */
.theme-header {{
  background-color: {header_bg};
  height: {header_height}px;
  border-bottom: 1px solid {header_border};
  box-shadow: {header_shadow};
  padding: 0 {header_padding}px;
}}

.theme-header .header-text {{
  color: {header_text};
}}

.theme-header .header-icon {{
  color: {header_icon};
}}"#,
            logo_text = t.pick(&["logoTextColor", "colorText"], "inherit"),
            logo_font_size = t.pick(&["logoFontSize"], "18"),
            logo_font_weight = t.pick(&["logoFontWeight"], "bold"),
            logo_bg = t.pick(&["logoBackgroundColor", "colorPrimary"], "transparent"),
            logo_icon = t.pick(&["logoIconColor"], "#ffffff"),
            logo_radius = t.pick(&["logoBorderRadius"], "6"),
            menu_bg = t.pick(&["menuBackgroundColor"], "transparent"),
            menu_radius = t.pick(&["menuBorderRadius"], "6"),
            menu_item = t.pick(&["menuItemColor", "colorText"], "inherit"),
            menu_font_size = t.pick(&["menuFontSize"], "14"),
            menu_font_weight = t.pick(&["menuFontWeight"], "normal"),
            menu_padding = t.pick(&["menuPadding"], "8"),
            menu_margin = t.pick(&["menuMargin"], "4"),
            menu_hover_bg = t.pick(&["menuItemHoverBackgroundColor", "colorFillSecondary"], "transparent"),
            menu_hover = t.pick(&["menuItemHoverColor", "colorPrimary"], "inherit"),
            menu_selected_bg = t.pick(&["menuItemSelectedBackgroundColor", "colorPrimary"], "transparent"),
            menu_selected = t.pick(&["menuItemSelectedColor"], "#ffffff"),
            menu_icon = t.pick(&["menuIconColor", "colorTextSecondary"], "inherit"),
            menu_icon_hover = t.pick(&["menuIconHoverColor", "colorPrimary"], "inherit"),
            menu_icon_selected = t.pick(&["menuIconSelectedColor"], "#ffffff"),
            button_radius = t.pick(&["buttonBorderRadius"], "6"),
            button_font_size = t.pick(&["buttonFontSize"], "14"),
            button_font_weight = t.pick(&["buttonFontWeight"], "normal"),
            button_padding = t.pick(&["buttonPadding"], "8"),
            button_margin = t.pick(&["buttonMargin"], "4"),
            button_shadow = t.pick(&["buttonShadow", "boxShadow"], "none"),
            button_primary = t.pick(&["buttonPrimaryColor", "colorPrimary"], "transparent"),
            button_text = t.pick(&["buttonTextColor"], "#ffffff"),
            button_primary_border = button_border.clone().unwrap_or_else(|| t.pick(&["colorPrimary"], "transparent")),
            button_bg = t.pick(&["buttonBackgroundColor", "colorBgContainer"], "transparent"),
            button_default = t.pick(&["buttonDefaultColor", "colorText"], "inherit"),
            button_default_border = button_border.unwrap_or_else(|| t.pick(&["colorBorder"], "transparent")),
            header_bg = t.pick(&["headerBackgroundColor", "colorBgContainer"], "transparent"),
            header_height = t.pick(&["headerHeight"], "64"),
            header_border = t.pick(&["headerBorderColor", "colorBorder"], "transparent"),
            header_shadow = t.pick(&["headerShadowColor", "boxShadow"], "none"),
            header_padding = t.pick(&["headerPadding"], "16"),
            header_text = t.pick(&["headerTextColor", "colorText"], "inherit"),
            header_icon = t.pick(&["headerIconColor", "colorTextSecondary"], "inherit"),
        )
    }

    /// Transition helpers and the `fadeIn` keyframes.
    pub fn animation_rules(&self) -> String {
        let t = self.tokens();
        format!(
            r#"
/* Animations */
.theme-transition {{
  transition: all {transition_duration} {transition_ease};
}}

.theme-fade-in {{
  animation: fadeIn {fade_duration} {fade_ease};
}}

@keyframes fadeIn {{
  from {{
    opacity: 0;
    transform: translateY(10px);
  }}
  to {{
    opacity: 1;
    transform: translateY(0);
  }}
}}"#,
            transition_duration = t.pick(&["motionDurationCustom1"], "0.3s"),
            transition_ease = t.pick(&["motionEaseCustom1"], "cubic-bezier(0.2, 0, 0, 1)"),
            fade_duration = t.pick(&["motionDurationCustom2"], "0.5s"),
            fade_ease = t.pick(&["motionEaseCustom2"], "ease-in-out"),
        )
    }
}

/// Breakpoint rules, independent of the package.
pub fn responsive_rules() -> &'static str {
    r#"
/* Responsive */
@media (max-width: 768px) {
  .sidebar {
    width: 100%;
    position: fixed;
    z-index: 1000;
    transform: translateX(-100%);
  }

  .sidebar.open {
    transform: translateX(0);
  }

  .content-area {
    padding: 8px;
  }
}

@media (max-width: 480px) {
  .theme-header {
    height: 56px;
    padding: 0 8px;
  }

  .logo-text {
    font-size: 16px;
  }
}"#
}

/// Text that can sit inside a `/* */` comment without closing it.
fn comment_safe(text: &str) -> String {
    text.replace("*/", "* /")
}

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SEMICOLON_BRACE: Lazy<Regex> = Lazy::new(|| Regex::new(r";\s*\}").unwrap());
static OPEN_BRACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\s*").unwrap());
static SEMICOLON: Lazy<Regex> = Lazy::new(|| Regex::new(r";\s*").unwrap());

/// Strip comments, collapse whitespace and drop redundant separators.
pub fn minify_css(css: &str) -> String {
    let css = COMMENT.replace_all(css, "");
    let css = WHITESPACE.replace_all(&css, " ");
    let css = SEMICOLON_BRACE.replace_all(&css, "}");
    let css = OPEN_BRACE.replace_all(&css, "{");
    let css = SEMICOLON.replace_all(&css, ";");
    css.trim().to_string()
}

/// Token lookups with the falsy-value semantics of optional tokens:
/// zero, `false` and empty strings count as absent.
#[derive(Clone, Copy)]
struct Tokens<'a>(&'a ThemeToken);

impl Tokens<'_> {
    fn get(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            TokenValue::Bool(false) => None,
            TokenValue::Number(n) if *n == 0.0 => None,
            TokenValue::Text(s) if s.is_empty() => None,
            value => Some(value.to_string()),
        }
    }

    fn pick(&self, keys: &[&str], fallback: &str) -> String {
        keys.iter()
            .find_map(|key| self.get(key))
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use themekit_theme::factory::ThemeFactory;
    use themekit_theme::package::ThemePackagePatch;
    use themekit_theme::presets;

    #[test]
    fn generation_is_deterministic() {
        let config = presets::dark();
        let options = StyleOptions::default();
        assert_eq!(generate_theme_css(&config, &options), generate_theme_css(&config, &options));
    }

    #[test]
    fn sections_follow_options() {
        let config = presets::light();
        let all = generate_theme_css(&config, &StyleOptions::default());
        assert!(all.starts_with(":root {\n  /* Theme: Light */"));
        let positions: Vec<usize> = [".sidebar {", ".logo-text {", "@keyframes fadeIn", "@media (max-width: 768px)", "@media (max-width: 480px)"]
            .iter()
            .map(|needle| all.find(needle).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

        let bare = generate_theme_css(
            &config,
            &StyleOptions {
                include_layout: false,
                include_components: false,
                include_animations: false,
                include_responsive: false,
                minify: false,
            },
        );
        assert!(bare.starts_with(":root {"));
        assert!(bare.ends_with('}'));
        assert!(!bare.contains(".sidebar"));
        assert!(!bare.contains("@media"));
    }

    #[test]
    fn variables_cover_present_tokens_only() {
        let config = ThemeFactory::new().create(&ThemePackagePatch::new());
        let css = StyleGenerator::new(&config, StyleOptions::default()).css_variables();
        assert!(css.contains("  --theme-primary: #1890ff;"));
        assert!(!css.contains("--layout-sidebar-width"));

        let mut config = config;
        config.token.insert("layoutSidebarWidth", 256);
        let css = StyleGenerator::new(&config, StyleOptions::default()).css_variables();
        assert!(css.contains("  --layout-sidebar-width: 256px;"));
    }

    #[test]
    fn optional_tokens_fall_back() {
        let mut config = ThemeFactory::new().create(&ThemePackagePatch::new());
        config.token.insert("colorBgContainer", "#fafafa");
        let css = StyleGenerator::new(&config, StyleOptions::default()).component_rules();
        assert!(css.contains(".theme-header {\n  background-color: #fafafa;"));
        assert!(css.contains("height: 64px;"));

        config.token.insert("headerBackgroundColor", "#001529");
        config.token.insert("headerHeight", 0);
        let css = StyleGenerator::new(&config, StyleOptions::default()).component_rules();
        assert!(css.contains(".theme-header {\n  background-color: #001529;"));
        assert!(css.contains("height: 64px;"));
    }

    #[test]
    fn sparse_tokens_still_generate() {
        let mut config = presets::light();
        config.token = ThemeToken::new();
        let css = generate_theme_css(&config, &StyleOptions::default());
        assert!(css.contains("background-color: transparent;"));
        assert!(css.contains("color: #ffffff;"));
    }

    #[test]
    fn display_name_cannot_close_the_comment() {
        let mut config = presets::dark();
        config.meta.display_name = "Night */ body { display: none; } /*".to_string();
        let css = StyleGenerator::new(&config, StyleOptions::default()).css_variables();
        assert!(css.starts_with(":root {\n  /* Theme: Night * / body { display: none; } /* */\n"));
        assert_eq!(css.matches("*/").count(), 1);

        let minified = generate_theme_css(
            &config,
            &StyleOptions {
                minify: true,
                ..StyleOptions::default()
            },
        );
        assert!(!minified.contains("display: none"));
    }

    #[test]
    fn minify_strips_comments_and_whitespace() {
        assert_eq!(
            minify_css("/* note */\n.a {\n  color: red;\n  margin: 0;\n}\n"),
            ".a {color: red;margin: 0}"
        );

        let css = generate_theme_css(
            &presets::dark(),
            &StyleOptions {
                minify: true,
                ..StyleOptions::default()
            },
        );
        assert!(!css.contains("/*"));
        assert!(!css.contains('\n'));
        assert!(css.starts_with(":root {--theme-primary:"));
    }
}
