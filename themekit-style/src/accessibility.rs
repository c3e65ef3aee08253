//! # Accessibility Checks
//!
//! WCAG contrast utilities and a scoring pass over theme packages.
//!
//! Colours are hex strings, `#rrggbb` or `#rgb` (the leading `#` is optional).
//! Anything else is unparseable: [`contrast_ratio`] reports it as `0.0`, and
//! [`check_theme_accessibility`] skips the affected check instead of failing it.

use std::fmt::Write;

use serde::Serialize;
use themekit_theme::ThemePackageConfig;

/// Minimum ratio for WCAG AA body text.
pub const WCAG_AA: f64 = 4.5;
/// Minimum ratio for WCAG AAA body text.
pub const WCAG_AAA: f64 = 7.0;
/// Minimum ratio for WCAG AA large text.
pub const WCAG_AA_LARGE: f64 = 3.0;

/// Parse a hex colour into RGB channels.
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some((r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

fn to_hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Relative luminance of an sRGB colour.
/// See: https://www.w3.org/TR/WCAG20/#relativeluminancedef
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel(c: u8) -> f64 {
        let c = f64::from(c) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
}

fn luminance_of((r, g, b): (u8, u8, u8)) -> f64 {
    relative_luminance(r, g, b)
}

/// WCAG contrast ratio between two colours, from 1 to 21.
///
/// Returns `0.0` if either colour cannot be parsed.
pub fn contrast_ratio(first: &str, second: &str) -> f64 {
    match (parse_hex_color(first), parse_hex_color(second)) {
        (Some(a), Some(b)) => {
            let (l1, l2) = (luminance_of(a), luminance_of(b));
            (l1.max(l2) + 0.05) / (l1.min(l2) + 0.05)
        }
        _ => 0.0,
    }
}

/// WCAG conformance level of a contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContrastLevel {
    /// Below AA.
    Fail,
    /// At least 4.5:1.
    Aa,
    /// At least 7:1.
    Aaa,
}

/// Outcome of one contrast check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContrastCheck {
    /// The contrast ratio.
    pub ratio: f64,
    /// Meets AA.
    pub aa: bool,
    /// Meets AAA.
    pub aaa: bool,
    /// The highest level met.
    pub level: ContrastLevel,
}

/// Classify the contrast of a foreground on a background.
pub fn check_contrast_ratio(foreground: &str, background: &str) -> ContrastCheck {
    let ratio = contrast_ratio(foreground, background);
    let aa = ratio >= WCAG_AA;
    let aaa = ratio >= WCAG_AAA;
    let level = if aaa {
        ContrastLevel::Aaa
    } else if aa {
        ContrastLevel::Aa
    } else {
        ContrastLevel::Fail
    };
    ContrastCheck { ratio, aa, aaa, level }
}

/// Black or white, whichever reads better on `background`.
///
/// Unparseable backgrounds get black.
pub fn optimal_text_color(background: &str) -> &'static str {
    match parse_hex_color(background) {
        Some(rgb) if luminance_of(rgb) <= 0.5 => "#ffffff",
        _ => "#000000",
    }
}

/// The first of white, black and mid grey that reaches `min_contrast` on
/// `background`, or the one with the highest contrast if none does.
pub fn optimal_icon_color(background: &str, min_contrast: f64) -> &'static str {
    let candidates = ["#ffffff", "#000000", "#666666"];
    let ratios = candidates.map(|icon| contrast_ratio(icon, background));

    if let Some(index) = ratios.iter().position(|ratio| *ratio >= min_contrast) {
        return candidates[index];
    }
    if ratios[0] > ratios[1] && ratios[0] > ratios[2] {
        candidates[0]
    } else if ratios[1] > ratios[2] {
        candidates[1]
    } else {
        candidates[2]
    }
}

/// Shift every channel by `amount`, clamped to 0..=255.
///
/// Unparseable input is returned unchanged.
pub fn adjust_brightness(color: &str, amount: i32) -> String {
    let Some((r, g, b)) = parse_hex_color(color) else {
        return color.to_string();
    };
    let shift = |c: u8| (i32::from(c) + amount).clamp(0, 255) as u8;
    to_hex((shift(r), shift(g), shift(b)))
}

/// Change the HSV saturation by `percent` points, clamped to 0..=100.
///
/// Greys and unparseable input are returned unchanged.
pub fn adjust_saturation(color: &str, percent: f64) -> String {
    let Some((r, g, b)) = parse_hex_color(color) else {
        return color.to_string();
    };
    let [r, g, b] = [r, g, b].map(|c| f64::from(c) / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    if delta == 0.0 {
        return color.to_string();
    }

    let saturation = delta / max;
    let target = (saturation + percent / 100.0).clamp(0.0, 1.0);
    let factor = target / saturation;
    let scale = |c: f64| ((c + (c - min) * (factor - 1.0)).clamp(0.0, 1.0) * 255.0).round() as u8;
    to_hex((scale(r), scale(g), scale(b)))
}

/// A palette derived from one base colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessiblePalette {
    /// The base colour.
    pub primary: String,
    /// The base colour shifted in brightness.
    pub secondary: String,
    /// The base colour shifted in saturation.
    pub accent: String,
    /// Body text.
    pub text: String,
    /// Secondary text.
    pub text_secondary: String,
    /// Page background.
    pub background: String,
    /// Raised surface background.
    pub surface: String,
    /// Borders.
    pub border: String,
}

/// Derive a light or dark palette around `base`, chosen by its luminance.
///
/// Unparseable input yields the default light palette.
pub fn accessible_palette(base: &str) -> AccessiblePalette {
    let palette = |primary: &str, secondary: String, accent: String, rest: [&str; 5]| AccessiblePalette {
        primary: primary.to_string(),
        secondary,
        accent,
        text: rest[0].to_string(),
        text_secondary: rest[1].to_string(),
        background: rest[2].to_string(),
        surface: rest[3].to_string(),
        border: rest[4].to_string(),
    };

    match parse_hex_color(base) {
        None => palette(
            "#1890ff",
            "#722ed1".to_string(),
            "#52c41a".to_string(),
            ["#262626", "#8c8c8c", "#ffffff", "#fafafa", "#d9d9d9"],
        ),
        Some(rgb) if luminance_of(rgb) > 0.5 => palette(
            base,
            adjust_brightness(base, -20),
            adjust_saturation(base, 20.0),
            ["#262626", "#8c8c8c", "#ffffff", "#fafafa", "#d9d9d9"],
        ),
        Some(_) => palette(
            base,
            adjust_brightness(base, 20),
            adjust_saturation(base, -20.0),
            ["#ffffff", "#a6a6a6", "#141414", "#1f1f1f", "#434343"],
        ),
    }
}

/// One failed contrast check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessibilityIssue {
    /// Component the check concerns, e.g. `Text` or `Button`.
    pub component: String,
    /// Offending property.
    pub property: String,
    /// What is wrong, with the measured ratio.
    pub issue: String,
    /// How to fix it.
    pub suggestion: String,
}

/// Result of [`check_theme_accessibility`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityResult {
    /// Passed checks over run checks, as a rounded percentage.
    pub score: u32,
    /// Number of checks that had both colours available.
    pub checks_run: usize,
    /// Failed checks.
    pub issues: Vec<AccessibilityIssue>,
    /// General advice derived from the issues.
    pub recommendations: Vec<String>,
}

struct ContrastPair<'a> {
    component: &'static str,
    property: &'static str,
    foreground: Option<&'a str>,
    background: Option<&'a str>,
    issue: &'static str,
    suggestion: &'static str,
}

/// Run the contrast battery over a package.
///
/// Checks text and link colours against `colorBgContainer`, the default
/// button colours and the menu item colours. Checks with a missing or
/// unparseable colour are skipped and do not count towards the score.
pub fn check_theme_accessibility(config: &ThemePackageConfig) -> AccessibilityResult {
    let token = &config.token;
    let container = token.get_str("colorBgContainer");
    let pairs = [
        ContrastPair {
            component: "Text",
            property: "colorText",
            foreground: token.get_str("colorText"),
            background: container,
            issue: "Insufficient text contrast",
            suggestion: "Use a text colour with a contrast ratio of at least 4.5:1",
        },
        ContrastPair {
            component: "Link",
            property: "colorLink",
            foreground: token.get_str("colorLink"),
            background: container,
            issue: "Insufficient link contrast",
            suggestion: "Use a link colour with a contrast ratio of at least 4.5:1",
        },
        ContrastPair {
            component: "Button",
            property: "defaultColor",
            foreground: config.component_str("Button", "defaultColor"),
            background: config.component_str("Button", "defaultBg"),
            issue: "Insufficient button text contrast",
            suggestion: "Adjust the button text or background colour",
        },
        ContrastPair {
            component: "Menu",
            property: "itemColor",
            foreground: config.component_str("Menu", "itemColor"),
            background: config.component_str("Menu", "itemBg"),
            issue: "Insufficient menu item contrast",
            suggestion: "Adjust the menu item text or background colour",
        },
    ];

    let mut checks_run = 0;
    let mut issues = Vec::new();
    for pair in &pairs {
        let (Some(foreground), Some(background)) = (pair.foreground, pair.background) else {
            continue;
        };
        if parse_hex_color(foreground).is_none() || parse_hex_color(background).is_none() {
            continue;
        }

        checks_run += 1;
        let check = check_contrast_ratio(foreground, background);
        if !check.aa {
            issues.push(AccessibilityIssue {
                component: pair.component.to_string(),
                property: pair.property.to_string(),
                issue: format!("{} ({:.2}:1)", pair.issue, check.ratio),
                suggestion: pair.suggestion.to_string(),
            });
        }
    }

    let score = if checks_run == 0 {
        100
    } else {
        (((checks_run - issues.len()) as f64 / checks_run as f64) * 100.0).round() as u32
    };

    let mut recommendations = Vec::new();
    let concerns = |component: &str| issues.iter().any(|issue| issue.component == component);
    if score < 80 {
        recommendations.push("Review colour contrast across the theme against WCAG AA".to_string());
    }
    if concerns("Text") {
        recommendations.push("Verify text readability with a contrast checker".to_string());
    }
    if concerns("Link") {
        recommendations.push("Make links visually distinct from surrounding text".to_string());
    }
    if concerns("Button") {
        recommendations.push("Keep button contrast sufficient in every state".to_string());
    }

    AccessibilityResult {
        score,
        checks_run,
        issues,
        recommendations,
    }
}

/// A markdown report of [`check_theme_accessibility`].
pub fn accessibility_report(config: &ThemePackageConfig) -> String {
    let result = check_theme_accessibility(config);
    let mut report = String::new();

    let _ = writeln!(report, "# Accessibility Report: {}\n", config.meta.display_name);
    let _ = writeln!(report, "## Score: {}/100\n", result.score);
    let verdict = match result.score {
        90.. => "**Excellent**: the theme is highly accessible",
        80..=89 => "**Good**: the theme meets the basics, with room for improvement",
        60..=79 => "**Needs work**: the theme has accessibility problems worth fixing",
        _ => "**Failing**: the theme has serious accessibility problems that must be fixed",
    };
    let _ = writeln!(report, "{}\n", verdict);

    if !result.issues.is_empty() {
        let _ = writeln!(report, "## Issues\n");
        for (index, issue) in result.issues.iter().enumerate() {
            let _ = writeln!(report, "{}. **{}** - {}", index + 1, issue.component, issue.property);
            let _ = writeln!(report, "   - Issue: {}", issue.issue);
            let _ = writeln!(report, "   - Suggestion: {}\n", issue.suggestion);
        }
    }

    if !result.recommendations.is_empty() {
        let _ = writeln!(report, "## Recommendations\n");
        for (index, recommendation) in result.recommendations.iter().enumerate() {
            let _ = writeln!(report, "{}. {}", index + 1, recommendation);
        }
        report.push('\n');
    }

    let _ = writeln!(report, "## Criteria\n");
    let _ = writeln!(report, "- **WCAG AA**: contrast >= {}:1 (body text)", WCAG_AA);
    let _ = writeln!(report, "- **WCAG AAA**: contrast >= {}:1 (enhanced)", WCAG_AAA);
    let _ = writeln!(
        report,
        "- **Large text**: contrast >= {}:1 (18pt+, or 14pt+ bold)",
        WCAG_AA_LARGE
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use themekit_theme::presets;

    #[test]
    fn contrast_extremes() {
        assert!((contrast_ratio("#000000", "#ffffff") - 21.0).abs() < 1e-9);
        assert!((contrast_ratio("#fff", "fff") - 1.0).abs() < 1e-9);
        assert_eq!(contrast_ratio("transparent", "#ffffff"), 0.0);

        let check = check_contrast_ratio("#777777", "#808080");
        assert_eq!(check.level, ContrastLevel::Fail);
        assert!(!check.aa);
        assert_eq!(check_contrast_ratio("#000000", "#ffffff").level, ContrastLevel::Aaa);
        assert_eq!(check_contrast_ratio("#767676", "#ffffff").level, ContrastLevel::Aa);
    }

    #[test]
    fn text_and_icon_colors() {
        assert_eq!(optimal_text_color("#ffffff"), "#000000");
        assert_eq!(optimal_text_color("#141414"), "#ffffff");
        assert_eq!(optimal_text_color("nope"), "#000000");
        assert_eq!(optimal_icon_color("#000000", WCAG_AA), "#ffffff");
        assert_eq!(optimal_icon_color("#ffffff", WCAG_AA), "#000000");
    }

    #[test]
    fn color_adjustments() {
        assert_eq!(adjust_brightness("#102030", 20), "#243444");
        assert_eq!(adjust_brightness("#f0f0f0", 40), "#ffffff");
        assert_eq!(adjust_brightness("red", 10), "red");
        assert_eq!(adjust_saturation("#808080", 20.0), "#808080");
        assert_eq!(adjust_saturation("#ff0000", 20.0), "#ff0000");
        assert_eq!(adjust_saturation("#ff8080", -50.0), "#808080");
    }

    #[test]
    fn palettes_follow_base_luminance() {
        let dark = accessible_palette("#1890ff");
        assert_eq!(dark.background, "#141414");
        assert_eq!(dark.secondary, "#2ca4ff");

        let light = accessible_palette("#ffe58f");
        assert_eq!(light.background, "#ffffff");
        assert_eq!(light.secondary, "#ebd17b");

        assert_eq!(accessible_palette("oops").primary, "#1890ff");
    }

    #[test]
    fn builtin_themes_pass() {
        for config in [presets::light(), presets::dark()] {
            let result = check_theme_accessibility(&config);
            assert!(result.checks_run >= 2, "{}", config.meta.id);
            assert!(result.issues.iter().all(|issue| issue.component != "Text"));
        }
    }

    #[test]
    fn skipped_checks_are_not_penalised() {
        let mut config = presets::light();
        config.components.clear();
        config.token.insert("colorText", "#777777");
        config.token.insert("colorBgContainer", "#808080");
        config.token.insert("colorLink", "var(--link)");

        let result = check_theme_accessibility(&config);
        assert_eq!(result.checks_run, 1);
        assert_eq!(result.score, 0);
        assert_eq!(result.issues[0].component, "Text");
        assert!(result.issues[0].issue.contains(":1)"));
        assert_eq!(result.recommendations.len(), 2);

        config.components.insert("Menu".into(), json!({ "itemColor": "#000000", "itemBg": "#ffffff" }));
        assert_eq!(check_theme_accessibility(&config).score, 50);
    }

    #[test]
    fn report_lists_issues() {
        let mut config = presets::light();
        config.token.insert("colorText", "#eeeeee");
        let report = accessibility_report(&config);
        assert!(report.starts_with("# Accessibility Report: Light"));
        assert!(report.contains("**Text** - colorText"));
        assert!(report.contains("## Criteria"));
    }
}
