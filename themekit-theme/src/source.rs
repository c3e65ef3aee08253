//! # Package Sources
//!
//! Where the loader and discovery materialise packages that are not yet registered.
//!
//! ## Overview
//!
//! - **[ConstructorSource]**: id to constructor function, populated at start-up
//! - **[DirectorySource]**: `<dir>/<id>.json` or `<dir>/<id>.toml` files read asynchronously
//! - **[ChainSource]**: several sources tried in order

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use log::debug;
use smol::stream::StreamExt;

use crate::error::{ThemeError, ThemeResult};
use crate::package::ThemePackageConfig;
use crate::presets;

/// A provider of theme packages addressed by id.
#[async_trait]
pub trait PackageSource: Send + Sync {
    /// Ids this source may be able to materialise, in probing order.
    async fn candidates(&self) -> Vec<String>;

    /// Build the package with the given id.
    ///
    /// Fails with [`ThemeError::Resolution`] when the source has nothing for the id.
    async fn materialize(&self, id: &str) -> ThemeResult<ThemePackageConfig>;
}

type Constructor = Arc<dyn Fn() -> Option<ThemePackageConfig> + Send + Sync>;

/// A registry of package constructors.
///
/// A constructor returning `None` models a package module without a default
/// export: the id is known but yields nothing.
#[derive(Clone, Default)]
pub struct ConstructorSource {
    candidates: Vec<String>,
    constructors: IndexMap<String, Constructor>,
}

impl ConstructorSource {
    /// An empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in packages, probing `light, dark, purple, cyan, high-contrast`.
    pub fn builtin() -> Self {
        let mut source = Self::new();
        for id in presets::BUILTIN_CANDIDATES {
            source.add_candidate(*id);
        }
        source.insert("light", || Some(presets::light()));
        source.insert("dark", || Some(presets::dark()));
        source
    }

    /// Register a constructor, adding its id to the candidates if needed.
    pub fn insert<F>(&mut self, id: impl Into<String>, constructor: F)
    where
        F: Fn() -> Option<ThemePackageConfig> + Send + Sync + 'static,
    {
        let id = id.into();
        self.add_candidate(id.clone());
        self.constructors.insert(id, Arc::new(constructor));
    }

    /// Builder-style [`ConstructorSource::insert`].
    pub fn with<F>(mut self, id: impl Into<String>, constructor: F) -> Self
    where
        F: Fn() -> Option<ThemePackageConfig> + Send + Sync + 'static,
    {
        self.insert(id, constructor);
        self
    }

    /// Probe an id even though no constructor is known for it yet.
    pub fn add_candidate(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.candidates.contains(&id) {
            self.candidates.push(id);
        }
    }
}

impl std::fmt::Debug for ConstructorSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructorSource")
            .field("candidates", &self.candidates)
            .field("constructors", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[async_trait]
impl PackageSource for ConstructorSource {
    async fn candidates(&self) -> Vec<String> {
        self.candidates.clone()
    }

    async fn materialize(&self, id: &str) -> ThemeResult<ThemePackageConfig> {
        let constructor = self
            .constructors
            .get(id)
            .ok_or_else(|| ThemeError::resolution(id, "no package constructor registered"))?;
        constructor().ok_or_else(|| ThemeError::resolution(id, "package constructor produced no package"))
    }
}

/// Packages stored as JSON or TOML files in one directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// A source reading from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory packages are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_safe_id(id: &str) -> bool {
        !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

#[async_trait]
impl PackageSource for DirectorySource {
    async fn candidates(&self) -> Vec<String> {
        let mut ids = Vec::new();
        let mut entries = match smol::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(err) => {
                debug!("Cannot list theme package directory {:?}: {}", self.root, err);
                return ids;
            }
        };

        while let Some(entry) = entries.next().await {
            let Ok(entry) = entry else { continue };
            let path = entry.path();
            let is_package = matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("json") | Some("toml")
            );
            if !is_package {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                if Self::is_safe_id(stem) {
                    ids.push(stem.to_string());
                }
            }
        }

        ids.sort();
        ids.dedup();
        ids
    }

    async fn materialize(&self, id: &str) -> ThemeResult<ThemePackageConfig> {
        if !Self::is_safe_id(id) {
            return Err(ThemeError::resolution(id, "package id is not a valid file name"));
        }

        let json_path = self.root.join(format!("{}.json", id));
        match smol::fs::read_to_string(&json_path).await {
            Ok(content) => {
                return serde_json::from_str(&content)
                    .map_err(|e| ThemeError::resolution(id, format!("{}: {}", json_path.display(), e)));
            }
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => {
                return Err(ThemeError::io(json_path, &err));
            }
            Err(_) => {}
        }

        let toml_path = self.root.join(format!("{}.toml", id));
        match smol::fs::read_to_string(&toml_path).await {
            Ok(content) => toml::from_str(&content)
                .map_err(|e| ThemeError::resolution(id, format!("{}: {}", toml_path.display(), e))),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(ThemeError::resolution(
                id,
                format!("no package file in {}", self.root.display()),
            )),
            Err(err) => Err(ThemeError::io(toml_path, &err)),
        }
    }
}

/// Several sources consulted in order; the first success wins.
#[derive(Clone, Default)]
pub struct ChainSource {
    sources: Vec<Arc<dyn PackageSource>>,
}

impl ChainSource {
    /// An empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source to the chain.
    pub fn with(mut self, source: impl PackageSource + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    /// Append an already shared source.
    pub fn with_shared(mut self, source: Arc<dyn PackageSource>) -> Self {
        self.sources.push(source);
        self
    }
}

#[async_trait]
impl PackageSource for ChainSource {
    async fn candidates(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for source in &self.sources {
            for id in source.candidates().await {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        ids
    }

    async fn materialize(&self, id: &str) -> ThemeResult<ThemePackageConfig> {
        let mut failures = Vec::new();
        for source in &self.sources {
            match source.materialize(id).await {
                Ok(config) => return Ok(config),
                Err(err) => failures.push(err.to_string()),
            }
        }
        if failures.is_empty() {
            failures.push("no package sources configured".to_string());
        }
        Err(ThemeError::resolution(id, failures.join("; ")))
    }
}
