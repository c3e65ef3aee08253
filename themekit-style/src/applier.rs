//! # Style Application
//!
//! Injects a package's stylesheet into a [`StyleDocument`] and marks the
//! document with the package's theme class.
//!
//! Applying a package:
//!
//! 1. generates its stylesheet
//! 2. replaces the style node this applier inserted before with
//!    `theme-<id>-styles`
//! 3. strips the classes of every known theme from the root and the target
//!    element and adds `<id>-theme` to both
//!
//! Known themes are listed in [`ApplierOptions::known_themes`]; other classes,
//! including unrelated ones that happen to end in `-theme`, are left alone.
//!
//! There is no incremental diffing; [`StyleApplier::update`] re-applies.

use std::sync::Arc;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use themekit_theme::{presets, ThemePackageConfig};

use crate::document::{ElementTarget, InsertPosition, StyleDocument};
use crate::generator::{generate_theme_css, StyleOptions};

/// Suffix shared by every theme class.
pub const THEME_CLASS_SUFFIX: &str = "-theme";

/// How and where a stylesheet is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplierOptions {
    /// Element that receives the theme class besides the root.
    pub target_selector: String,
    /// Where the style node goes.
    pub insert_position: InsertPosition,
    /// Also remove style nodes with the same id inserted by someone else.
    pub replace_existing: bool,
    /// Package ids whose theme classes are removed before a new one is added.
    pub known_themes: Vec<String>,
    /// Generator switches.
    #[serde(flatten)]
    pub style: StyleOptions,
}

impl Default for ApplierOptions {
    fn default() -> Self {
        Self {
            target_selector: "body".to_string(),
            insert_position: InsertPosition::Head,
            replace_existing: true,
            known_themes: presets::BUILTIN_CANDIDATES.iter().map(|id| id.to_string()).collect(),
            style: StyleOptions::default(),
        }
    }
}

/// The id of a package's style node.
pub fn style_node_id(config: &ThemePackageConfig) -> String {
    format!("theme-{}-styles", config.meta.id)
}

/// The theme class of a package.
pub fn theme_class(config: &ThemePackageConfig) -> String {
    theme_class_for(&config.meta.id)
}

fn theme_class_for(id: &str) -> String {
    format!("{}{}", id, THEME_CLASS_SUFFIX)
}

impl ApplierOptions {
    /// Add ids to [`known_themes`](Self::known_themes), skipping duplicates.
    pub fn with_known_themes<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            let id = id.into();
            if !self.known_themes.contains(&id) {
                self.known_themes.push(id);
            }
        }
        self
    }
}

/// Applies one package to a document.
#[derive(Debug, Clone)]
pub struct StyleApplier {
    config: Arc<ThemePackageConfig>,
    options: ApplierOptions,
    style_id: Option<String>,
}

impl StyleApplier {
    /// An applier for `config`. Nothing is applied yet.
    pub fn new(config: Arc<ThemePackageConfig>, options: ApplierOptions) -> Self {
        Self {
            config,
            options,
            style_id: None,
        }
    }

    /// The package this applier applies.
    pub fn config(&self) -> &Arc<ThemePackageConfig> {
        &self.config
    }

    /// The options in use.
    pub fn options(&self) -> &ApplierOptions {
        &self.options
    }

    /// Inject the stylesheet and set the theme class.
    pub fn apply<D: StyleDocument + ?Sized>(&mut self, document: &mut D) {
        let css = generate_theme_css(&self.config, &self.options.style);
        let id = style_node_id(&self.config);

        if let Some(previous) = self.style_id.take() {
            document.remove_style(&previous);
        }
        if self.options.replace_existing && document.remove_style(&id) {
            debug!("Replaced existing style node '{}'", id);
        }
        document.insert_style(self.options.insert_position, &id, &css);
        self.style_id = Some(id);

        self.apply_theme_class(document);
    }

    fn apply_theme_class<D: StyleDocument + ?Sized>(&self, document: &mut D) {
        let target = ElementTarget::Selector(&self.options.target_selector);
        if !document.has_element(target) {
            warn!("Target element not found: {}", self.options.target_selector);
            return;
        }

        let class = theme_class(&self.config);
        let known: Vec<String> = self.options.known_themes.iter().map(|id| theme_class_for(id)).collect();
        for element in [target, ElementTarget::Root] {
            for stale in &known {
                document.remove_class(element, stale);
            }
            document.add_class(element, &class);
        }
        info!("Applied theme class: {} to {}", class, self.options.target_selector);
    }

    /// Remove the style node and the theme class.
    pub fn remove<D: StyleDocument + ?Sized>(&mut self, document: &mut D) {
        if let Some(id) = self.style_id.take() {
            document.remove_style(&id);
        }
        let class = theme_class(&self.config);
        document.remove_class(ElementTarget::Selector(&self.options.target_selector), &class);
        document.remove_class(ElementTarget::Root, &class);
    }

    /// Switch to another package and apply it.
    pub fn update<D: StyleDocument + ?Sized>(&mut self, document: &mut D, config: Arc<ThemePackageConfig>) {
        self.remove(document);
        self.config = config;
        self.apply(document);
    }

    /// The stylesheet currently injected by this applier.
    pub fn applied_css<D: StyleDocument + ?Sized>(&self, document: &D) -> Option<String> {
        document.style_content(self.style_id.as_deref()?)
    }

    /// Whether this applier's style node is in the document.
    pub fn is_applied<D: StyleDocument + ?Sized>(&self, document: &D) -> bool {
        self.applied_css(document).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;

    #[test]
    fn apply_injects_one_node_and_one_class() {
        let mut doc = MemoryDocument::new();
        doc.add_class(ElementTarget::Root, "purple-theme");
        doc.add_class(ElementTarget::Root, "antialiased");
        doc.add_class(ElementTarget::Selector("body"), "light-theme");

        let mut applier = StyleApplier::new(Arc::new(presets::dark()), ApplierOptions::default());
        applier.apply(&mut doc);
        applier.apply(&mut doc);

        assert_eq!(doc.head_styles().len(), 1);
        assert_eq!(doc.head_styles()[0].id, "theme-dark-styles");
        assert_eq!(doc.classes(ElementTarget::Root).unwrap(), ["antialiased", "dark-theme"]);
        assert_eq!(doc.classes(ElementTarget::Selector("body")).unwrap(), ["dark-theme"]);
        assert!(applier.is_applied(&doc));
        assert!(applier.applied_css(&doc).unwrap().contains("/* Theme: Dark */"));
    }

    #[test]
    fn update_and_remove() {
        let mut doc = MemoryDocument::new();
        let mut applier = StyleApplier::new(Arc::new(presets::dark()), ApplierOptions::default());
        applier.apply(&mut doc);
        applier.update(&mut doc, Arc::new(presets::light()));

        assert_eq!(doc.head_styles().len(), 1);
        assert_eq!(doc.head_styles()[0].id, "theme-light-styles");
        assert_eq!(doc.classes(ElementTarget::Root).unwrap(), ["light-theme"]);

        applier.remove(&mut doc);
        assert!(doc.head_styles().is_empty());
        assert!(doc.classes(ElementTarget::Root).unwrap().is_empty());
        assert!(!applier.is_applied(&doc));
        assert_eq!(applier.applied_css(&doc), None);
    }

    #[test]
    fn unrelated_theme_suffixed_classes_survive() {
        let mut doc = MemoryDocument::new();
        doc.add_class(ElementTarget::Root, "color-theme");
        doc.add_class(ElementTarget::Root, "light-theme");
        doc.add_class(ElementTarget::Selector("body"), "my-theme");

        let mut applier = StyleApplier::new(Arc::new(presets::dark()), ApplierOptions::default());
        applier.apply(&mut doc);

        assert_eq!(doc.classes(ElementTarget::Root).unwrap(), ["color-theme", "dark-theme"]);
        assert_eq!(doc.classes(ElementTarget::Selector("body")).unwrap(), ["my-theme", "dark-theme"]);

        applier.remove(&mut doc);
        assert_eq!(doc.classes(ElementTarget::Root).unwrap(), ["color-theme"]);
        assert_eq!(doc.classes(ElementTarget::Selector("body")).unwrap(), ["my-theme"]);
    }

    #[test]
    fn known_themes_extend_the_cleanup() {
        let mut doc = MemoryDocument::new();
        doc.add_class(ElementTarget::Root, "sunrise-theme");

        let mut applier = StyleApplier::new(Arc::new(presets::dark()), ApplierOptions::default());
        applier.apply(&mut doc);
        assert_eq!(doc.classes(ElementTarget::Root).unwrap(), ["sunrise-theme", "dark-theme"]);

        let options = ApplierOptions::default().with_known_themes(["sunrise", "dark"]);
        assert_eq!(options.known_themes.iter().filter(|id| *id == "dark").count(), 1);
        let mut applier = StyleApplier::new(Arc::new(presets::light()), options);
        applier.apply(&mut doc);
        assert_eq!(doc.classes(ElementTarget::Root).unwrap(), ["light-theme"]);
    }

    #[test]
    fn missing_target_still_injects_css() {
        let mut doc = MemoryDocument::new();
        doc.add_class(ElementTarget::Root, "purple-theme");
        doc.add_class(ElementTarget::Selector("body"), "purple-theme");
        let options = ApplierOptions {
            target_selector: "#app".to_string(),
            insert_position: InsertPosition::Body,
            ..ApplierOptions::default()
        };
        let mut applier = StyleApplier::new(Arc::new(presets::light()), options);
        applier.apply(&mut doc);

        assert_eq!(doc.body_styles().len(), 1);
        assert!(doc.head_styles().is_empty());
        assert!(applier.is_applied(&doc));
        assert!(!doc.has_element(ElementTarget::Selector("#app")));
        assert_eq!(doc.classes(ElementTarget::Root).unwrap(), ["purple-theme"]);
        assert_eq!(doc.classes(ElementTarget::Selector("body")).unwrap(), ["purple-theme"]);
    }

    #[test]
    fn options_deserialize_flat() {
        let options: ApplierOptions =
            toml::from_str("target_selector = \"#app\"\ninsert_position = \"body\"\nminify = true\n").unwrap();
        assert_eq!(options.target_selector, "#app");
        assert_eq!(options.insert_position, InsertPosition::Body);
        assert!(options.style.minify);
        assert!(options.style.include_layout);
        assert!(options.replace_existing);
        assert!(options.known_themes.iter().any(|id| id == "high-contrast"));

        let options: ApplierOptions = toml::from_str("known_themes = [\"sunrise\"]\n").unwrap();
        assert_eq!(options.known_themes, ["sunrise"]);
    }
}
