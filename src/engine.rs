//! The theme switcher an application talks to.
//!
//! [`ThemeEngine`] ties a [`ThemeManager`] to a [`StyleContext`] and,
//! optionally, to [`ThemePreferences`] so that selecting a theme loads it,
//! applies it to the document and remembers the choice.

use std::sync::Arc;

use log::{info, warn};
use themekit_style::{ApplierOptions, StyleContext, StyleDocument};
use themekit_theme::manager::ThemeManager;
use themekit_theme::preferences::ThemePreferences;
use themekit_theme::{ThemePackageConfig, ThemeResult};

use crate::config::EngineConfig;

/// Loads, applies and remembers the active theme of one document.
#[derive(Debug)]
pub struct ThemeEngine<D: StyleDocument> {
    manager: ThemeManager,
    context: StyleContext<D>,
    style: ApplierOptions,
    preferences: Option<ThemePreferences>,
}

impl<D: StyleDocument> ThemeEngine<D> {
    /// An engine over `manager` applying to `document`.
    pub fn new(manager: ThemeManager, document: D, style: ApplierOptions) -> Self {
        Self {
            manager,
            context: StyleContext::new(document),
            style,
            preferences: None,
        }
    }

    /// An engine built from configuration.
    pub fn from_config(config: &EngineConfig, document: D) -> Self {
        Self::new(config.build_manager(), document, config.style.clone())
    }

    /// Remember selections in `preferences`.
    pub fn with_preferences(mut self, preferences: ThemePreferences) -> Self {
        self.preferences = Some(preferences);
        self
    }

    /// The package manager.
    pub fn manager(&self) -> &ThemeManager {
        &self.manager
    }

    /// The styled document.
    pub fn document(&self) -> &D {
        self.context.document()
    }

    /// Discover and register every available package.
    pub async fn all_themes(&self) -> Vec<Arc<ThemePackageConfig>> {
        self.manager.load_all_packages().await
    }

    /// The applied package.
    pub fn current_theme(&self) -> Option<&Arc<ThemePackageConfig>> {
        self.context.current_theme()
    }

    /// Load `id`, apply it and remember it.
    ///
    /// The loader's fallback applies, so the returned package may differ
    /// from `id`; the preference records the package actually applied.
    pub async fn set_theme(&mut self, id: &str) -> ThemeResult<Arc<ThemePackageConfig>> {
        let config = self.manager.load_package(id).await?;
        self.context.apply_theme(Arc::clone(&config), self.applier_options());
        if let Some(preferences) = &self.preferences {
            if let Err(err) = preferences.set_selected_theme(&config.meta.id) {
                warn!("Failed to remember theme '{}': {}", config.meta.id, err);
            }
        }
        info!("Switched to theme '{}'", config.meta.id);
        Ok(config)
    }

    /// Apply the remembered theme, or the first sensible default.
    ///
    /// Registers all available packages first. Returns the applied package.
    pub async fn restore(&mut self, prefers_dark: bool) -> Option<Arc<ThemePackageConfig>> {
        self.manager.load_all_packages().await;
        let initial = match &self.preferences {
            Some(preferences) => preferences.initial_theme(self.manager.registry(), prefers_dark),
            None => {
                let preferred = if prefers_dark { "dark" } else { "light" };
                self.manager
                    .get_package(preferred)
                    .or_else(|| self.manager.get_all_packages().into_iter().next())
            }
        }?;
        self.context.apply_theme(Arc::clone(&initial), self.applier_options());
        Some(initial)
    }

    /// Configured options, with every registered package counted as a known theme.
    fn applier_options(&self) -> ApplierOptions {
        self.style.clone().with_known_themes(self.manager.registry().package_ids())
    }

    /// Remove the applied theme from the document.
    pub fn clear_theme(&mut self) {
        self.context.remove_current_theme();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use themekit_style::{ElementTarget, MemoryDocument};
    use themekit_theme::preferences::{MemoryPreferenceStore, PreferenceStore};

    fn engine_with_store() -> (ThemeEngine<MemoryDocument>, Arc<MemoryPreferenceStore>) {
        let store = Arc::new(MemoryPreferenceStore::new());
        let shared: Arc<dyn PreferenceStore> = store.clone();
        let engine = ThemeEngine::from_config(&EngineConfig::new(), MemoryDocument::new())
            .with_preferences(ThemePreferences::new(shared));
        (engine, store)
    }

    #[tokio::test]
    async fn set_theme_applies_and_remembers() {
        let (mut engine, store) = engine_with_store();

        engine.set_theme("dark").await.unwrap();
        let applied = engine.set_theme("nonexistent").await.unwrap();

        assert_eq!(applied.meta.id, "light");
        assert_eq!(engine.current_theme().unwrap().meta.id, "light");
        assert_eq!(engine.document().head_styles().len(), 1);
        assert_eq!(
            engine.document().classes(ElementTarget::Root).unwrap(),
            ["light-theme"]
        );

        let preferences = ThemePreferences::new(store);
        assert_eq!(preferences.selected_theme().as_deref(), Some("light"));
        assert_eq!(preferences.history(), ["light", "dark"]);
    }

    #[tokio::test]
    async fn registered_packages_count_as_known_themes() {
        let mut document = MemoryDocument::new();
        document.add_class(ElementTarget::Root, "color-theme");
        document.add_class(ElementTarget::Root, "sunrise-theme");
        let mut engine = ThemeEngine::new(ThemeManager::builtin(), document, ApplierOptions::default());

        let mut sunrise = themekit_theme::presets::light();
        sunrise.meta.id = "sunrise".to_string();
        sunrise.meta.name = "sunrise".to_string();
        assert!(engine.manager().register_package(sunrise));

        engine.set_theme("dark").await.unwrap();
        assert_eq!(
            engine.document().classes(ElementTarget::Root).unwrap(),
            ["color-theme", "dark-theme"]
        );

        engine.set_theme("sunrise").await.unwrap();
        assert_eq!(
            engine.document().classes(ElementTarget::Root).unwrap(),
            ["color-theme", "sunrise-theme"]
        );
    }

    #[tokio::test]
    async fn restore_prefers_saved_theme() {
        let (mut engine, store) = engine_with_store();
        ThemePreferences::new(store).set_selected_theme("dark").unwrap();

        let restored = engine.restore(false).await.unwrap();
        assert_eq!(restored.meta.id, "dark");
        assert_eq!(engine.all_themes().await.len(), 2);

        engine.clear_theme();
        assert!(engine.current_theme().is_none());
        assert!(engine.document().head_styles().is_empty());
    }

    #[tokio::test]
    async fn restore_without_preferences_follows_scheme() {
        let mut engine = ThemeEngine::new(ThemeManager::builtin(), MemoryDocument::new(), ApplierOptions::default());
        assert_eq!(engine.restore(true).await.unwrap().meta.id, "dark");
    }
}
