//! # Theme Package Registry
//!
//! The authoritative in-memory store of known theme packages.
//!
//! ## Overview
//!
//! - Every package is validated before it is stored
//! - Ids are unique; replacing an entry requires an explicit overwrite
//! - Mutations emit [`RegistryEvent`]s to subscribed listeners
//! - Query helpers cover category, tag and free-text search
//!
//! Entries are stored behind `Arc` so readers can hold a package without
//! copying it and without keeping the registry locked.

use std::cmp::Reverse;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use log::{debug, info};

use crate::error::{ListenerError, ThemeError, ThemeResult};
use crate::events::{EventListeners, ListenerId, RegistryEvent, RegistryEventKind};
use crate::meta::ThemeCategory;
use crate::package::{ThemePackageConfig, ThemePackagePatch};
use crate::validator::{ThemeValidator, ValidationResult};

/// Aggregate figures over the registry contents.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryStats {
    /// Number of registered packages.
    pub total: usize,
    /// Package count per category name.
    pub by_category: IndexMap<String, usize>,
    /// Package count per author.
    pub by_author: IndexMap<String, usize>,
    /// Up to five packages, most recently updated first.
    pub recently_updated: Vec<Arc<ThemePackageConfig>>,
}

/// Keyed store of validated theme packages.
#[derive(Debug, Default)]
pub struct ThemeRegistry {
    packages: RwLock<IndexMap<String, Arc<ThemePackageConfig>>>,
    listeners: EventListeners,
    validator: ThemeValidator,
}

impl ThemeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, IndexMap<String, Arc<ThemePackageConfig>>> {
        self.packages.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<String, Arc<ThemePackageConfig>>> {
        self.packages.write().unwrap_or_else(|e| e.into_inner())
    }

    fn check(&self, config: &ThemePackageConfig) -> ThemeResult<()> {
        let warnings = self.validator.validate(config).into_result()?;
        for warning in warnings {
            debug!("Theme package '{}': {}", config.meta.id, warning);
        }
        Ok(())
    }

    /// Validate and store a package.
    ///
    /// Fails with [`ThemeError::AlreadyExists`] if the id is taken and
    /// `overwrite` is false. Emits `PackageRegistered` for a new id and
    /// `PackageUpdated` for a replaced one.
    pub fn register(&self, config: ThemePackageConfig, overwrite: bool) -> ThemeResult<Arc<ThemePackageConfig>> {
        self.check(&config)?;

        let id = config.meta.id.clone();
        let config = Arc::new(config);
        let is_update = {
            let mut packages = self.write();
            let exists = packages.contains_key(&id);
            if exists && !overwrite {
                return Err(ThemeError::already_exists(id));
            }
            packages.insert(id.clone(), Arc::clone(&config));
            exists
        };

        if is_update {
            self.listeners.emit(&RegistryEvent::PackageUpdated(Arc::clone(&config)));
            info!("Theme package '{}' updated successfully", id);
        } else {
            self.listeners.emit(&RegistryEvent::PackageRegistered(Arc::clone(&config)));
            info!("Theme package '{}' registered successfully", id);
        }
        Ok(config)
    }

    /// Remove a package.
    pub fn unregister(&self, id: &str) -> ThemeResult<()> {
        let removed = self.write().shift_remove(id);
        if removed.is_none() {
            return Err(ThemeError::not_found(id));
        }

        self.listeners.emit(&RegistryEvent::PackageUnregistered(id.to_string()));
        info!("Theme package '{}' unregistered successfully", id);
        Ok(())
    }

    /// Look up a package.
    pub fn get(&self, id: &str) -> Option<Arc<ThemePackageConfig>> {
        self.read().get(id).cloned()
    }

    /// Every package, in registration order.
    pub fn get_all(&self) -> Vec<Arc<ThemePackageConfig>> {
        self.read().values().cloned().collect()
    }

    /// Whether a package is registered.
    pub fn has(&self, id: &str) -> bool {
        self.read().contains_key(id)
    }

    /// Number of registered packages.
    pub fn size(&self) -> usize {
        self.read().len()
    }

    /// Registered ids, in registration order.
    pub fn package_ids(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Remove every package, emitting `PackageUnregistered` for each.
    pub fn clear(&self) {
        let ids: Vec<String> = self.write().drain(..).map(|(id, _)| id).collect();
        for id in ids {
            self.listeners.emit(&RegistryEvent::PackageUnregistered(id));
        }
        info!("All theme packages cleared");
    }

    /// Packages in a category.
    pub fn get_by_category(&self, category: ThemeCategory) -> Vec<Arc<ThemePackageConfig>> {
        self.filter(|config| config.meta.category == category)
    }

    /// Packages carrying a tag (exact match).
    pub fn get_by_tag(&self, tag: &str) -> Vec<Arc<ThemePackageConfig>> {
        self.filter(|config| config.meta.has_tag(tag))
    }

    /// Case-insensitive substring search over names, description and tags.
    pub fn search(&self, query: &str) -> Vec<Arc<ThemePackageConfig>> {
        self.filter(|config| config.meta.matches_query(query))
    }

    fn filter(&self, predicate: impl Fn(&ThemePackageConfig) -> bool) -> Vec<Arc<ThemePackageConfig>> {
        self.read().values().filter(|config| predicate(config)).cloned().collect()
    }

    /// Replace top-level sections of a registered package.
    ///
    /// Sections present in `patch` replace the stored ones wholesale; meta
    /// fields are overlaid one by one. The result is re-validated before it
    /// is committed, and the stored entry is left untouched on failure.
    /// Changing the id is rejected.
    pub fn update(&self, id: &str, patch: &ThemePackagePatch) -> ThemeResult<Arc<ThemePackageConfig>> {
        let existing = self.get(id).ok_or_else(|| ThemeError::not_found(id))?;

        if let Some(new_id) = patch.meta.as_ref().and_then(|meta| meta.id.as_deref()) {
            if new_id != id {
                return Err(ThemeError::validation(
                    vec![format!("Theme package ID cannot be changed from '{}' to '{}'", id, new_id)],
                    Vec::new(),
                ));
            }
        }

        let mut updated = ThemePackageConfig::clone(&existing);
        if let Some(meta) = &patch.meta {
            meta.apply_to(&mut updated.meta);
        }
        if let Some(algorithm) = patch.algorithm {
            updated.algorithm = Some(algorithm);
        }
        if let Some(token) = &patch.token {
            updated.token = token.clone();
        }
        if let Some(components) = &patch.components {
            updated.components = components.clone();
        }
        if let Some(custom) = &patch.custom {
            updated.custom = Some(custom.clone());
        }
        if let Some(variant) = patch.menu_variant {
            updated.menu_variant = Some(variant);
        }

        self.check(&updated)?;

        let updated = Arc::new(updated);
        {
            let mut packages = self.write();
            match packages.get_mut(id) {
                Some(slot) => *slot = Arc::clone(&updated),
                None => return Err(ThemeError::not_found(id)),
            }
        }

        self.listeners.emit(&RegistryEvent::PackageUpdated(Arc::clone(&updated)));
        info!("Theme package '{}' updated successfully", id);
        Ok(updated)
    }

    /// Register a copy of a package under a new identity.
    ///
    /// Without `new_name`, names get a ` (Copy)` suffix. Timestamps are fresh.
    pub fn clone_package(
        &self,
        id: &str,
        new_id: &str,
        new_name: Option<&str>,
    ) -> ThemeResult<Arc<ThemePackageConfig>> {
        let original = self.get(id).ok_or_else(|| ThemeError::not_found(id))?;

        let mut cloned = ThemePackageConfig::clone(&original);
        cloned.meta.id = new_id.to_string();
        cloned.meta.name = new_name.map_or_else(|| format!("{} (Copy)", original.meta.name), str::to_string);
        cloned.meta.display_name =
            new_name.map_or_else(|| format!("{} (Copy)", original.meta.display_name), str::to_string);
        cloned.meta.touch_all();

        let registered = self.register(cloned, false)?;
        info!("Theme package '{}' cloned as '{}'", id, new_id);
        Ok(registered)
    }

    /// Pretty-printed JSON of a registered package.
    pub fn export(&self, id: &str) -> ThemeResult<String> {
        let config = self.get(id).ok_or_else(|| ThemeError::not_found(id))?;
        Ok(serde_json::to_string_pretty(config.as_ref())?)
    }

    /// Parse JSON and register the package through the normal path.
    pub fn import(&self, json: &str) -> ThemeResult<Arc<ThemePackageConfig>> {
        let config: ThemePackageConfig = serde_json::from_str(json)
            .map_err(|e| ThemeError::parse(format!("Failed to import theme package: {}", e)))?;
        self.register(config, false)
    }

    /// Validate a registered package, or report that it is missing.
    pub fn validate_package(&self, id: &str) -> ValidationResult {
        match self.get(id) {
            Some(config) => self.validator.validate(&config),
            None => ValidationResult::failure(ThemeError::not_found(id).to_string()),
        }
    }

    /// Counts by category and author, plus the five most recently updated packages.
    pub fn stats(&self) -> RegistryStats {
        let mut packages = self.get_all();
        let mut by_category = IndexMap::new();
        let mut by_author = IndexMap::new();

        for config in &packages {
            *by_category.entry(config.meta.category.to_string()).or_insert(0) += 1;
            *by_author.entry(config.meta.author.clone()).or_insert(0) += 1;
        }

        packages.sort_by_key(|config| Reverse(config.meta.updated_at_time()));
        packages.truncate(5);

        RegistryStats {
            total: by_category.values().sum(),
            by_category,
            by_author,
            recently_updated: packages,
        }
    }

    /// Subscribe to an event kind.
    pub fn on<F>(&self, kind: RegistryEventKind, listener: F) -> ListenerId
    where
        F: Fn(&RegistryEvent) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.listeners.on(kind, listener)
    }

    /// Unsubscribe a listener.
    pub fn off(&self, kind: RegistryEventKind, id: ListenerId) -> bool {
        self.listeners.off(kind, id)
    }

    /// Drop every listener.
    pub fn remove_all_listeners(&self) {
        self.listeners.remove_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::MetaPatch;
    use crate::presets;
    use crate::token::ThemeToken;
    use std::sync::Mutex;

    fn recorder(registry: &ThemeRegistry) -> Arc<Mutex<Vec<(RegistryEventKind, String)>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        for kind in [
            RegistryEventKind::PackageRegistered,
            RegistryEventKind::PackageUpdated,
            RegistryEventKind::PackageUnregistered,
        ] {
            let log = Arc::clone(&log);
            registry.on(kind, move |event| {
                log.lock().unwrap().push((event.kind(), event.package_id().to_string()));
                Ok(())
            });
        }
        log
    }

    #[test]
    fn register_get_unregister() {
        let registry = ThemeRegistry::new();
        let light = presets::light();
        registry.register(light.clone(), false).unwrap();
        assert_eq!(registry.get("light").as_deref(), Some(&light));
        assert_eq!(registry.size(), 1);

        registry.unregister("light").unwrap();
        assert!(!registry.has("light"));
        assert!(registry.unregister("light").unwrap_err().is_not_found());
    }

    #[test]
    fn duplicate_requires_overwrite_and_emits_update() {
        let registry = ThemeRegistry::new();
        let events = recorder(&registry);

        registry.register(presets::light(), false).unwrap();
        let err = registry.register(presets::light(), false).unwrap_err();
        assert_eq!(err, ThemeError::already_exists("light"));

        registry.register(presets::light(), true).unwrap();
        let events = events.lock().unwrap();
        assert_eq!(
            *events,
            [
                (RegistryEventKind::PackageRegistered, "light".to_string()),
                (RegistryEventKind::PackageUpdated, "light".to_string()),
            ]
        );
    }

    #[test]
    fn invalid_package_is_rejected() {
        let registry = ThemeRegistry::new();
        let mut config = presets::light();
        config.token.insert("colorPrimary", "not a color");
        let err = registry.register(config, false).unwrap_err();
        match err {
            ThemeError::Validation { errors, .. } => {
                assert!(errors.iter().any(|e| e.contains("colorPrimary")));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(registry.size(), 0);
    }

    #[test]
    fn export_import_round_trip() {
        let source = ThemeRegistry::new();
        source.register(presets::dark(), false).unwrap();
        let text = source.export("dark").unwrap();

        let target = ThemeRegistry::new();
        let imported = target.import(&text).unwrap();
        assert_eq!(imported.as_ref(), source.get("dark").unwrap().as_ref());
        assert!(target.validate_package("dark").valid);
    }

    #[test]
    fn malformed_import_is_rejected() {
        let registry = ThemeRegistry::new();
        assert!(matches!(registry.import("{").unwrap_err(), ThemeError::Parse { .. }));

        let mut value = serde_json::to_value(presets::light()).unwrap();
        value["token"]["fontSize"] = serde_json::json!("big");
        let err = registry.import(&value.to_string()).unwrap_err();
        assert!(matches!(err, ThemeError::Validation { .. }));
        assert!(!registry.has("light"));
    }

    #[test]
    fn category_and_search() {
        let registry = ThemeRegistry::new();
        registry.register(presets::light(), false).unwrap();
        registry.register(presets::dark(), false).unwrap();

        let dark: Vec<String> = registry
            .get_by_category(ThemeCategory::Dark)
            .iter()
            .map(|c| c.meta.id.clone())
            .collect();
        assert_eq!(dark, ["dark"]);

        let found: Vec<String> = registry.search("light").iter().map(|c| c.meta.id.clone()).collect();
        assert_eq!(found, ["light"]);
        assert_eq!(registry.get_by_tag("night").len(), 1);
    }

    #[test]
    fn failed_update_keeps_prior_entry() {
        let registry = ThemeRegistry::new();
        registry.register(presets::light(), false).unwrap();
        let before = registry.get("light").unwrap();

        let broken = ThemePackagePatch::new().with_token(ThemeToken::new().with("colorPrimary", "#000"));
        assert!(registry.update("light", &broken).is_err());
        assert_eq!(registry.get("light").unwrap(), before);

        let rename = ThemePackagePatch::new().with_meta(MetaPatch {
            id: Some("other".into()),
            ..MetaPatch::default()
        });
        assert!(registry.update("light", &rename).is_err());

        let describe = ThemePackagePatch::new().with_meta(MetaPatch {
            description: Some("Brighter".into()),
            ..MetaPatch::default()
        });
        let updated = registry.update("light", &describe).unwrap();
        assert_eq!(updated.meta.description, "Brighter");
        assert_eq!(updated.token, before.token);
    }

    #[test]
    fn clone_assigns_new_identity() {
        let registry = ThemeRegistry::new();
        registry.register(presets::dark(), false).unwrap();
        let copy = registry.clone_package("dark", "dark-2", None).unwrap();
        assert_eq!(copy.meta.name, "dark-theme (Copy)");
        assert_eq!(copy.meta.display_name, "Dark (Copy)");
        assert_ne!(copy.meta.created_at, "2024-01-01T00:00:00.000Z");
        assert_eq!(copy.token, registry.get("dark").unwrap().token);

        let named = registry.clone_package("dark", "dark-3", Some("Midnight")).unwrap();
        assert_eq!(named.meta.display_name, "Midnight");
        assert!(registry.clone_package("missing", "x", None).unwrap_err().is_not_found());
    }

    #[test]
    fn stats_and_clear() {
        let registry = ThemeRegistry::new();
        let events = recorder(&registry);
        registry.register(presets::light(), false).unwrap();
        registry.register(presets::dark(), false).unwrap();
        registry.clone_package("dark", "dark-copy", None).unwrap();

        let stats = registry.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_category["dark"], 2);
        assert_eq!(stats.by_author["themekit"], 3);
        assert_eq!(stats.recently_updated[0].meta.id, "dark-copy");

        registry.clear();
        assert_eq!(registry.size(), 0);
        let unregistered = events
            .lock()
            .unwrap()
            .iter()
            .filter(|(kind, _)| *kind == RegistryEventKind::PackageUnregistered)
            .count();
        assert_eq!(unregistered, 3);
    }

    #[test]
    fn listener_failure_does_not_fail_register() {
        let registry = ThemeRegistry::new();
        registry.on(RegistryEventKind::PackageRegistered, |_| Err(ListenerError::new("nope")));
        assert!(registry.register(presets::light(), false).is_ok());
        registry.remove_all_listeners();
    }
}
