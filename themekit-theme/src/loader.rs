//! # Theme Package Loader
//!
//! Cache-aware asynchronous resolution of packages by id.
//!
//! ## Overview
//!
//! [`ThemeLoader::load`] resolves an id in this order:
//!
//! 1. a fresh cache entry
//! 2. a resolution of the same id already in flight, shared rather than repeated
//! 3. the registry
//! 4. the package source, followed by validation and optional auto-registration
//!
//! When resolution fails and a fallback package other than the requested id is
//! configured, the fallback is loaded instead. The result is cached under the
//! requested id. Cache entries expire once `now - meta.updated_at` exceeds the
//! configured timeout; expiry is checked lazily on access.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use chrono::Utc;
use futures::future::{join_all, try_join_all, BoxFuture, FutureExt, Shared};
use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ThemeError, ThemeResult};
use crate::package::ThemePackageConfig;
use crate::registry::ThemeRegistry;
use crate::source::PackageSource;
use crate::validator::ThemeValidator;

/// Loader behaviour switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    /// Register packages materialised from the source.
    pub auto_load: bool,
    /// Validate packages materialised from the source.
    pub validate_on_load: bool,
    /// Keep resolved packages in the cache.
    pub cache_enabled: bool,
    /// Maximum age of a cached package, measured from its `updated_at`. Zero disables expiry.
    pub cache_timeout_ms: u64,
    /// Package loaded instead when resolution fails.
    pub fallback_package: Option<String>,
    /// Turn validation failures of materialised packages into errors.
    pub strict_mode: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            auto_load: true,
            validate_on_load: true,
            cache_enabled: true,
            cache_timeout_ms: 5 * 60 * 1000,
            fallback_package: Some("light".to_string()),
            strict_mode: false,
        }
    }
}

impl LoaderOptions {
    /// The cache timeout, or `None` when entries never expire.
    pub fn cache_timeout(&self) -> Option<Duration> {
        (self.cache_timeout_ms > 0).then(|| Duration::from_millis(self.cache_timeout_ms))
    }
}

/// Snapshot of the loader cache.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStatus {
    /// Number of cached entries.
    pub size: usize,
    /// Cached ids.
    pub keys: Vec<String>,
    /// Loads answered from the cache.
    pub hits: u64,
    /// Loads that had to resolve.
    pub misses: u64,
    /// `hits / (hits + misses)`, or zero before any load.
    pub hit_rate: f64,
}

/// What the loader knows about one id.
#[derive(Debug, Clone)]
pub struct PackageInfo {
    /// The id resolves from the registry or the source.
    pub exists: bool,
    /// The id is registered.
    pub loaded: bool,
    /// The id is cached.
    pub cached: bool,
    /// The registered package, if any.
    pub config: Option<Arc<ThemePackageConfig>>,
}

type SharedLoad = Shared<BoxFuture<'static, ThemeResult<Arc<ThemePackageConfig>>>>;

struct LoaderInner {
    registry: Arc<ThemeRegistry>,
    source: Arc<dyn PackageSource>,
    validator: ThemeValidator,
    options: RwLock<LoaderOptions>,
    cache: RwLock<IndexMap<String, Arc<ThemePackageConfig>>>,
    in_flight: Mutex<HashMap<String, SharedLoad>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Asynchronous, deduplicating package loader.
///
/// Cloning is cheap; clones share the cache and in-flight table.
#[derive(Clone)]
pub struct ThemeLoader {
    inner: Arc<LoaderInner>,
}

impl ThemeLoader {
    /// Create a loader over a registry and a package source.
    pub fn new(registry: Arc<ThemeRegistry>, source: Arc<dyn PackageSource>, options: LoaderOptions) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                registry,
                source,
                validator: ThemeValidator::new(),
                options: RwLock::new(options),
                cache: RwLock::new(IndexMap::new()),
                in_flight: Mutex::new(HashMap::new()),
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
            }),
        }
    }

    /// The registry this loader resolves against.
    pub fn registry(&self) -> &Arc<ThemeRegistry> {
        &self.inner.registry
    }

    /// The source packages are materialised from.
    pub fn source(&self) -> &Arc<dyn PackageSource> {
        &self.inner.source
    }

    /// A copy of the current options.
    pub fn options(&self) -> LoaderOptions {
        self.inner.options.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Change options in place.
    pub fn update_options(&self, update: impl FnOnce(&mut LoaderOptions)) {
        let mut options = self.inner.options.write().unwrap_or_else(|e| e.into_inner());
        update(&mut options);
    }

    /// Resolve a package by id.
    ///
    /// Concurrent calls for the same id share a single resolution.
    pub fn load<'a>(&'a self, id: &'a str) -> BoxFuture<'a, ThemeResult<Arc<ThemePackageConfig>>> {
        async move {
            if let Some(config) = self.cached(id) {
                self.inner.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Theme package '{}' served from cache", id);
                return Ok(config);
            }
            self.inner.misses.fetch_add(1, Ordering::Relaxed);

            let pending = {
                let mut in_flight = self.inner.in_flight.lock().unwrap_or_else(|e| e.into_inner());
                match in_flight.get(id) {
                    Some(pending) => pending.clone(),
                    None => {
                        let pending = resolve(self.clone(), id.to_string()).boxed().shared();
                        in_flight.insert(id.to_string(), pending.clone());
                        pending
                    }
                }
            };

            let result = pending.clone().await;

            let mut in_flight = self.inner.in_flight.lock().unwrap_or_else(|e| e.into_inner());
            if in_flight.get(id).is_some_and(|current| current.ptr_eq(&pending)) {
                in_flight.remove(id);
            }
            result
        }
        .boxed()
    }

    fn cached(&self, id: &str) -> Option<Arc<ThemePackageConfig>> {
        let options = self.options();
        if !options.cache_enabled {
            return None;
        }

        let config = self.inner.cache.read().unwrap_or_else(|e| e.into_inner()).get(id).cloned()?;
        if is_fresh(&config, options.cache_timeout()) {
            Some(config)
        } else {
            debug!("Cached theme package '{}' expired", id);
            self.inner.cache.write().unwrap_or_else(|e| e.into_inner()).shift_remove(id);
            None
        }
    }

    fn store(&self, id: &str, config: &Arc<ThemePackageConfig>) {
        if self.options().cache_enabled {
            self.inner
                .cache
                .write()
                .unwrap_or_else(|e| e.into_inner())
                .insert(id.to_string(), Arc::clone(config));
        }
    }

    /// Registry, then source, with no cache and no fallback.
    async fn resolve_direct(&self, id: &str) -> ThemeResult<Arc<ThemePackageConfig>> {
        if let Some(config) = self.inner.registry.get(id) {
            return Ok(config);
        }

        let config = self.inner.source.materialize(id).await?;
        let options = self.options();

        if options.validate_on_load {
            let result = self.inner.validator.validate(&config);
            if !result.valid {
                if options.strict_mode {
                    return Err(ThemeError::validation(result.errors, result.warnings));
                }
                warn!(
                    "Theme package '{}' failed validation: {}",
                    id,
                    result.errors.join(", ")
                );
            }
        }

        if !options.auto_load {
            return Ok(Arc::new(config));
        }

        match self.inner.registry.register(config.clone(), false) {
            Ok(registered) => Ok(registered),
            Err(ThemeError::AlreadyExists { .. }) => Ok(self
                .inner
                .registry
                .get(id)
                .unwrap_or_else(|| Arc::new(config))),
            Err(err) => {
                warn!("Theme package '{}' loaded but not registered: {}", id, err);
                Ok(Arc::new(config))
            }
        }
    }

    /// Load every package the registry or the source knows about.
    ///
    /// Ids that fail to resolve are skipped; ids answered by the fallback
    /// package do not produce duplicates.
    pub async fn load_all(&self) -> Vec<Arc<ThemePackageConfig>> {
        let mut ids = self.inner.registry.package_ids();
        for id in self.inner.source.candidates().await {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        self.load_many(&ids).await
    }

    async fn load_many(&self, ids: &[String]) -> Vec<Arc<ThemePackageConfig>> {
        let results = join_all(ids.iter().map(|id| self.load(id))).await;
        let mut configs: Vec<Arc<ThemePackageConfig>> = Vec::new();
        for (id, result) in ids.iter().zip(results) {
            match result {
                Ok(config) => {
                    if !configs.iter().any(|known| known.meta.id == config.meta.id) {
                        configs.push(config);
                    }
                }
                Err(err) => debug!("Skipping theme package '{}': {}", id, err),
            }
        }
        configs
    }

    /// Load several packages, failing if any of them fails.
    pub async fn preload<S: AsRef<str>>(&self, ids: &[S]) -> ThemeResult<()> {
        try_join_all(ids.iter().map(|id| self.load(id.as_ref()))).await?;
        Ok(())
    }

    /// Drop a cached entry and resolve again.
    pub async fn reload(&self, id: &str) -> ThemeResult<Arc<ThemePackageConfig>> {
        self.inner.cache.write().unwrap_or_else(|e| e.into_inner()).shift_remove(id);
        self.load(id).await
    }

    /// Clear the cache and resolve every previously known id again.
    pub async fn reload_all(&self) -> Vec<Arc<ThemePackageConfig>> {
        let mut ids: Vec<String> = self.inner.cache.read().unwrap_or_else(|e| e.into_inner()).keys().cloned().collect();
        for id in self.inner.registry.package_ids() {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        self.clear_cache();
        self.load_many(&ids).await
    }

    /// Whether the id is registered or the source can materialise it.
    ///
    /// The fallback package is not consulted and nothing is registered.
    pub async fn exists(&self, id: &str) -> bool {
        self.inner.registry.has(id) || self.inner.source.materialize(id).await.is_ok()
    }

    /// Existence, registration and cache state of an id.
    pub async fn package_info(&self, id: &str) -> PackageInfo {
        let exists = self.exists(id).await;
        PackageInfo {
            exists,
            loaded: self.inner.registry.has(id),
            cached: self.inner.cache.read().unwrap_or_else(|e| e.into_inner()).contains_key(id),
            config: self.inner.registry.get(id),
        }
    }

    /// Register a package and cache it.
    pub fn register(&self, config: ThemePackageConfig) -> ThemeResult<Arc<ThemePackageConfig>> {
        let registered = self.inner.registry.register(config, false)?;
        self.store(&registered.meta.id, &registered);
        Ok(registered)
    }

    /// Unregister a package and drop it from the cache.
    pub fn unregister(&self, id: &str) -> ThemeResult<()> {
        self.inner.registry.unregister(id)?;
        self.inner.cache.write().unwrap_or_else(|e| e.into_inner()).shift_remove(id);
        Ok(())
    }

    /// Empty the cache.
    pub fn clear_cache(&self) {
        self.inner.cache.write().unwrap_or_else(|e| e.into_inner()).clear();
        debug!("Theme package cache cleared");
    }

    /// Cache size, keys and hit statistics.
    pub fn cache_status(&self) -> CacheStatus {
        let keys: Vec<String> = self.inner.cache.read().unwrap_or_else(|e| e.into_inner()).keys().cloned().collect();
        let hits = self.inner.hits.load(Ordering::Relaxed);
        let misses = self.inner.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        CacheStatus {
            size: keys.len(),
            keys,
            hits,
            misses,
            hit_rate: if total == 0 { 0.0 } else { hits as f64 / total as f64 },
        }
    }
}

impl std::fmt::Debug for ThemeLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeLoader")
            .field("options", &self.options())
            .field("cache", &self.cache_status())
            .finish()
    }
}

async fn resolve(loader: ThemeLoader, id: String) -> ThemeResult<Arc<ThemePackageConfig>> {
    let result = match loader.resolve_direct(&id).await {
        Ok(config) => {
            info!("Theme package '{}' loaded", id);
            Ok(config)
        }
        Err(err) => {
            warn!("Failed to load theme package '{}': {}", id, err);
            match loader.options().fallback_package.filter(|fallback| *fallback != id) {
                Some(fallback) => {
                    info!("Loading fallback theme package '{}'", fallback);
                    loader.load(&fallback).await
                }
                None => Err(err),
            }
        }
    };

    if let Ok(config) = &result {
        loader.store(&id, config);
    }
    result
}

fn is_fresh(config: &ThemePackageConfig, timeout: Option<Duration>) -> bool {
    let Some(timeout) = timeout else {
        return true;
    };
    let Some(updated_at) = config.meta.updated_at_time() else {
        return false;
    };
    match (Utc::now() - updated_at).to_std() {
        Ok(age) => age <= timeout,
        // updated_at in the future
        Err(_) => true,
    }
}
