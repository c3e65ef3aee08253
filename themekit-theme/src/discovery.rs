//! # Package Auto-Discovery
//!
//! Probes every candidate id of a [`PackageSource`] and keeps the packages
//! that materialise with a sane shape.
//!
//! Discovery never fails as a whole: candidates that cannot be materialised
//! or look malformed are logged at debug level and skipped. Results are
//! memoised until [`AutoDiscovery::clear_cache`] or [`AutoDiscovery::rediscover`].

use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use log::{debug, info};

use crate::package::ThemePackageConfig;
use crate::source::PackageSource;

/// Figures describing the discovery cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryStats {
    /// Number of packages discovered.
    pub total_discovered: usize,
    /// Discovered ids, in probing order.
    pub packages: Vec<String>,
    /// Number of candidates attempted, successful or not.
    pub cache_size: usize,
}

#[derive(Debug, Default)]
struct DiscoveryState {
    discovered: IndexMap<String, Arc<ThemePackageConfig>>,
    attempted: IndexMap<String, bool>,
}

/// Memoising scanner over a package source.
pub struct AutoDiscovery {
    source: Arc<dyn PackageSource>,
    state: RwLock<DiscoveryState>,
}

impl AutoDiscovery {
    /// Discover packages from `source`.
    pub fn new(source: Arc<dyn PackageSource>) -> Self {
        Self {
            source,
            state: RwLock::new(DiscoveryState::default()),
        }
    }

    /// Every discoverable package.
    ///
    /// Returns the memoised result when a previous run found anything.
    pub async fn discover_all_packages(&self) -> Vec<Arc<ThemePackageConfig>> {
        {
            let state = self.state.read().unwrap_or_else(|e| e.into_inner());
            if !state.discovered.is_empty() {
                return state.discovered.values().cloned().collect();
            }
        }

        let mut found = Vec::new();
        for id in self.source.candidates().await {
            let attempted = {
                let state = self.state.read().unwrap_or_else(|e| e.into_inner());
                state.attempted.contains_key(&id)
            };
            if attempted {
                if let Some(config) = self.package_info(&id) {
                    found.push(config);
                }
                continue;
            }

            let outcome = self.discover_package(&id).await;
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            state.attempted.insert(id.clone(), outcome.is_some());
            if let Some(config) = outcome {
                state.discovered.insert(id, Arc::clone(&config));
                found.push(config);
            }
        }

        found
    }

    async fn discover_package(&self, id: &str) -> Option<Arc<ThemePackageConfig>> {
        let config = match self.source.materialize(id).await {
            Ok(config) => config,
            Err(err) => {
                debug!("Failed to discover theme package '{}': {}", id, err);
                return None;
            }
        };

        if !has_package_shape(&config) {
            debug!("Invalid theme package structure for '{}'", id);
            return None;
        }

        info!("Discovered theme package: {} ({})", config.meta.display_name, config.meta.id);
        Some(Arc::new(config))
    }

    /// Packages discovered so far, without probing.
    pub fn discovered_packages(&self) -> Vec<Arc<ThemePackageConfig>> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.discovered.values().cloned().collect()
    }

    /// A discovered package.
    pub fn package_info(&self, id: &str) -> Option<Arc<ThemePackageConfig>> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.discovered.get(id).cloned()
    }

    /// Whether a package has been discovered.
    pub fn has_package(&self, id: &str) -> bool {
        self.package_info(id).is_some()
    }

    /// Cache figures.
    pub fn discovery_stats(&self) -> DiscoveryStats {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        DiscoveryStats {
            total_discovered: state.discovered.len(),
            packages: state.discovered.keys().cloned().collect(),
            cache_size: state.attempted.len(),
        }
    }

    /// Forget every result, successful or not.
    pub fn clear_cache(&self) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.discovered.clear();
        state.attempted.clear();
    }

    /// Clear the cache and probe again.
    pub async fn rediscover(&self) -> Vec<Arc<ThemePackageConfig>> {
        self.clear_cache();
        self.discover_all_packages().await
    }
}

impl std::fmt::Debug for AutoDiscovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoDiscovery")
            .field("stats", &self.discovery_stats())
            .finish()
    }
}

fn has_package_shape(config: &ThemePackageConfig) -> bool {
    let meta = &config.meta;
    !meta.id.is_empty()
        && !meta.name.is_empty()
        && !meta.display_name.is_empty()
        && !meta.description.is_empty()
        && !config.token.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use crate::source::ConstructorSource;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn discovers_builtins_and_skips_the_rest() {
        let discovery = AutoDiscovery::new(Arc::new(ConstructorSource::builtin()));
        let ids: Vec<String> = discovery
            .discover_all_packages()
            .await
            .iter()
            .map(|c| c.meta.id.clone())
            .collect();
        assert_eq!(ids, ["light", "dark"]);

        let stats = discovery.discovery_stats();
        assert_eq!(stats.total_discovered, 2);
        assert_eq!(stats.cache_size, 5);
        assert!(discovery.has_package("dark"));
        assert!(!discovery.has_package("purple"));
    }

    #[tokio::test]
    async fn results_are_memoised_until_rediscover() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let source = ConstructorSource::new().with("light", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Some(presets::light())
        });
        let discovery = AutoDiscovery::new(Arc::new(source));

        discovery.discover_all_packages().await;
        discovery.discover_all_packages().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        discovery.rediscover().await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn malformed_packages_are_skipped() {
        let source = ConstructorSource::new().with("blank", || {
            let mut config = presets::light();
            config.meta.description.clear();
            Some(config)
        });
        let discovery = AutoDiscovery::new(Arc::new(source));
        assert!(discovery.discover_all_packages().await.is_empty());
        assert_eq!(discovery.discovery_stats().cache_size, 1);
    }
}
