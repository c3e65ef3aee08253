//! # Theme Package Manager
//!
//! The facade most applications talk to. It composes the registry, loader,
//! auto-discovery, validator and factory behind one object.
//!
//! Mutating operations (`register_package`, `unregister_package`,
//! `import_package`, `clone_package`, `merge_packages`) report success as a
//! `bool` and log the underlying error. Use [`ThemeManager::validate_package`]
//! or the component accessors when the failure detail matters.

use std::sync::Arc;

use log::{error, info, warn};

use crate::discovery::AutoDiscovery;
use crate::error::{ThemeError, ThemeResult};
use crate::factory::ThemeFactory;
use crate::loader::{CacheStatus, LoaderOptions, PackageInfo, ThemeLoader};
use crate::meta::{now_timestamp, ThemeCategory};
use crate::package::{ThemePackageConfig, ThemePackagePatch};
use crate::registry::{RegistryStats, ThemeRegistry};
use crate::source::{ConstructorSource, PackageSource};
use crate::validator::{ThemeValidator, ValidationResult};

/// Facade over every theme package component.
#[derive(Debug)]
pub struct ThemeManager {
    registry: Arc<ThemeRegistry>,
    loader: ThemeLoader,
    discovery: AutoDiscovery,
    validator: ThemeValidator,
    factory: ThemeFactory,
}

impl ThemeManager {
    /// A manager with a fresh registry over `source`.
    pub fn new(source: Arc<dyn PackageSource>, options: LoaderOptions) -> Self {
        Self::with_registry(Arc::new(ThemeRegistry::new()), source, options)
    }

    /// A manager over the built-in packages with default options.
    pub fn builtin() -> Self {
        Self::new(Arc::new(ConstructorSource::builtin()), LoaderOptions::default())
    }

    /// A manager sharing an existing registry.
    pub fn with_registry(registry: Arc<ThemeRegistry>, source: Arc<dyn PackageSource>, options: LoaderOptions) -> Self {
        Self {
            loader: ThemeLoader::new(Arc::clone(&registry), Arc::clone(&source), options),
            discovery: AutoDiscovery::new(source),
            registry,
            validator: ThemeValidator::new(),
            factory: ThemeFactory::new(),
        }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &Arc<ThemeRegistry> {
        &self.registry
    }

    /// The underlying loader.
    pub fn loader(&self) -> &ThemeLoader {
        &self.loader
    }

    /// The underlying discovery.
    pub fn discovery(&self) -> &AutoDiscovery {
        &self.discovery
    }

    /// The package factory.
    pub fn factory(&self) -> &ThemeFactory {
        &self.factory
    }

    /// Load one package through the loader.
    pub async fn load_package(&self, id: &str) -> ThemeResult<Arc<ThemePackageConfig>> {
        self.loader.load(id).await.map_err(|err| {
            error!("Failed to load theme package '{}': {}", id, err);
            err
        })
    }

    /// Discover and register every package, replacing existing entries.
    ///
    /// Falls back to [`ThemeLoader::load_all`] when discovery finds nothing or
    /// a discovered package cannot be registered.
    pub async fn load_all_packages(&self) -> Vec<Arc<ThemePackageConfig>> {
        let discovered = self.discovery.discover_all_packages().await;

        match self.register_discovered(&discovered) {
            Ok(registered) if !registered.is_empty() => {
                info!("Auto-discovered {} theme packages", registered.len());
                registered
            }
            Ok(_) => {
                warn!("Auto-discovery found no theme packages, loading manually");
                self.loader.load_all().await
            }
            Err(err) => {
                error!("Failed to auto-discover theme packages: {}", err);
                self.loader.load_all().await
            }
        }
    }

    fn register_discovered(&self, discovered: &[Arc<ThemePackageConfig>]) -> ThemeResult<Vec<Arc<ThemePackageConfig>>> {
        discovered
            .iter()
            .map(|config| self.registry.register(ThemePackageConfig::clone(config), true))
            .collect()
    }

    /// Register a package. Returns `false` if it is invalid or the id is taken.
    pub fn register_package(&self, config: ThemePackageConfig) -> bool {
        report("register theme package", self.registry.register(config, false))
    }

    /// Remove a package. Returns `false` if it is unknown.
    pub fn unregister_package(&self, id: &str) -> bool {
        report(
            &format!("unregister theme package '{}'", id),
            self.registry.unregister(id),
        )
    }

    /// A registered package.
    pub fn get_package(&self, id: &str) -> Option<Arc<ThemePackageConfig>> {
        self.registry.get(id)
    }

    /// Every registered package, in registration order.
    pub fn get_all_packages(&self) -> Vec<Arc<ThemePackageConfig>> {
        self.registry.get_all()
    }

    /// Validate a package without registering it.
    pub fn validate_package(&self, config: &ThemePackageConfig) -> ValidationResult {
        self.validator.validate(config)
    }

    /// Build a package from factory defaults overlaid with `patch`.
    pub fn create_package(&self, patch: &ThemePackagePatch) -> ThemePackageConfig {
        self.factory.create(patch)
    }

    /// Pretty JSON of a registered package.
    pub fn export_package(&self, id: &str) -> ThemeResult<String> {
        self.registry.export(id)
    }

    /// Register a package from JSON. Returns `false` on parse or validation failure.
    pub fn import_package(&self, json: &str) -> bool {
        report("import theme package", self.registry.import(json))
    }

    /// Register a copy of `id` under `new_id`.
    pub fn clone_package(&self, id: &str, new_id: &str) -> bool {
        report(
            &format!("clone theme package '{}'", id),
            self.registry.clone_package(id, new_id, None),
        )
    }

    /// Merge two registered packages into a new one registered as `new_id`.
    ///
    /// Sections of `override_id` win over `base_id` one level deep. The result
    /// is named `<base>-<override>`, displayed as `<base> + <override>` and
    /// carries fresh timestamps.
    pub fn merge_packages(&self, base_id: &str, override_id: &str, new_id: &str) -> bool {
        report("merge theme packages", self.merge(base_id, override_id, new_id))
    }

    fn merge(&self, base_id: &str, override_id: &str, new_id: &str) -> ThemeResult<Arc<ThemePackageConfig>> {
        let base = self.registry.get(base_id).ok_or_else(|| ThemeError::not_found(base_id))?;
        let over = self
            .registry
            .get(override_id)
            .ok_or_else(|| ThemeError::not_found(override_id))?;

        let mut merged = self.factory.merge(&base, &ThemePackagePatch::from(over.as_ref()));
        merged.meta.id = new_id.to_string();
        merged.meta.name = format!("{}-{}", base.meta.name, over.meta.name);
        merged.meta.display_name = format!("{} + {}", base.meta.display_name, over.meta.display_name);
        let now = now_timestamp();
        merged.meta.created_at = now.clone();
        merged.meta.updated_at = now;

        self.registry.register(merged, false)
    }

    /// Registry statistics.
    pub fn stats(&self) -> RegistryStats {
        self.registry.stats()
    }

    /// Case-insensitive search over names, description and tags.
    pub fn search_packages(&self, query: &str) -> Vec<Arc<ThemePackageConfig>> {
        self.registry.search(query)
    }

    /// Registered packages of one category.
    pub fn packages_by_category(&self, category: ThemeCategory) -> Vec<Arc<ThemePackageConfig>> {
        self.registry.get_by_category(category)
    }

    /// Registered packages carrying a tag.
    pub fn packages_by_tag(&self, tag: &str) -> Vec<Arc<ThemePackageConfig>> {
        self.registry.get_by_tag(tag)
    }

    /// Load several packages ahead of use.
    pub async fn preload_packages<S: AsRef<str>>(&self, ids: &[S]) -> ThemeResult<()> {
        self.loader.preload(ids).await
    }

    /// Empty the loader cache.
    pub fn clear_cache(&self) {
        self.loader.clear_cache();
    }

    /// Loader cache figures.
    pub fn cache_status(&self) -> CacheStatus {
        self.loader.cache_status()
    }

    /// Drop a cached package and load it again.
    pub async fn reload_package(&self, id: &str) -> ThemeResult<Arc<ThemePackageConfig>> {
        self.loader.reload(id).await
    }

    /// Clear the cache and load every known package again.
    pub async fn reload_all_packages(&self) -> Vec<Arc<ThemePackageConfig>> {
        self.loader.reload_all().await
    }

    /// Whether a package resolves.
    pub async fn package_exists(&self, id: &str) -> bool {
        self.loader.exists(id).await
    }

    /// Loader view of a package.
    pub async fn package_info(&self, id: &str) -> PackageInfo {
        self.loader.package_info(id).await
    }

    /// Change loader options.
    pub fn update_options(&self, update: impl FnOnce(&mut LoaderOptions)) {
        self.loader.update_options(update);
    }

    /// Current loader options.
    pub fn options(&self) -> LoaderOptions {
        self.loader.options()
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::builtin()
    }
}

fn report<T>(action: &str, result: ThemeResult<T>) -> bool {
    match result {
        Ok(_) => true,
        Err(err) => {
            error!("Failed to {}: {}", action, err);
            false
        }
    }
}
