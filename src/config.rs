//! # Engine Configuration
//!
//! Settings for the loader, the style applier and the package directory,
//! read from TOML and overridable from the environment.
//!
//! ## File Format
//!
//! ```toml
//! [loader]
//! fallback_package = "dark"
//! cache_timeout_ms = 60000
//! strict_mode = true
//!
//! [style]
//! target_selector = "#app"
//! minify = true
//!
//! [packages]
//! directory = "/usr/share/themekit/packages"
//! builtin = true
//! ```
//!
//! Every table and key is optional.
//!
//! ## Environment
//!
//! - `THEMEKIT_CONFIG`: path of the configuration file to load
//! - `THEMEKIT_FALLBACK`: fallback package id, empty to disable the fallback
//! - `THEMEKIT_STRICT`: `true`/`1` or `false`/`0`
//! - `THEMEKIT_CACHE_TIMEOUT_MS`: cache timeout in milliseconds
//!
//! Without `THEMEKIT_CONFIG`, `config.toml` is looked up in the XDG config
//! directories under `themekit/`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use themekit_style::ApplierOptions;
use themekit_theme::loader::LoaderOptions;
use themekit_theme::manager::ThemeManager;
use themekit_theme::source::{ChainSource, ConstructorSource, DirectorySource, PackageSource};
use themekit_theme::{ThemeError, ThemeResult};
use xdg::BaseDirectories;

/// XDG prefix for configuration and package data.
pub const XDG_PREFIX: &str = "themekit";

/// Name of the configuration file inside the XDG config directories.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Where packages come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagesConfig {
    /// Directory holding `<id>.json` / `<id>.toml` packages.
    /// Defaults to `$XDG_DATA_HOME/themekit/packages`.
    pub directory: Option<PathBuf>,
    /// Also offer the built-in packages, ahead of the directory.
    pub builtin: bool,
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            directory: None,
            builtin: true,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Loader options.
    pub loader: LoaderOptions,
    /// Style application options.
    pub style: ApplierOptions,
    /// Package locations.
    pub packages: PackagesConfig,
}

impl EngineConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the environment, falling back to defaults.
    ///
    /// An unreadable configuration file is logged and ignored.
    pub fn from_env_or_default() -> Self {
        let path = env::var("THEMEKIT_CONFIG")
            .ok()
            .map(PathBuf::from)
            .or_else(Self::find_config_file);

        let mut config = match path {
            Some(path) => Self::from_file(&path).unwrap_or_else(|err| {
                warn!("Ignoring configuration file {:?}: {}", path, err);
                Self::default()
            }),
            None => Self::default(),
        };
        config.apply_env_overrides(|key| env::var(key).ok());
        config
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ThemeResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| ThemeError::io(path, &err))?;
        let config = Self::from_toml(&content)?;
        info!("Loaded engine configuration from {:?}", path);
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> ThemeResult<Self> {
        toml::from_str(content).map_err(ThemeError::config)
    }

    /// Serialise to TOML.
    pub fn to_toml(&self) -> ThemeResult<String> {
        toml::to_string_pretty(self).map_err(ThemeError::config)
    }

    /// Apply `THEMEKIT_*` overrides read through `var`.
    ///
    /// Malformed values are logged and skipped.
    pub fn apply_env_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(fallback) = var("THEMEKIT_FALLBACK") {
            let fallback = fallback.trim();
            self.loader.fallback_package = (!fallback.is_empty()).then(|| fallback.to_string());
        }

        if let Some(strict) = var("THEMEKIT_STRICT") {
            match strict.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.loader.strict_mode = true,
                "0" | "false" | "no" | "off" => self.loader.strict_mode = false,
                other => warn!("Invalid THEMEKIT_STRICT value '{}'", other),
            }
        }

        if let Some(timeout) = var("THEMEKIT_CACHE_TIMEOUT_MS") {
            match timeout.trim().parse::<u64>() {
                Ok(ms) => self.loader.cache_timeout_ms = ms,
                Err(err) => warn!("Invalid THEMEKIT_CACHE_TIMEOUT_MS value '{}': {}", timeout, err),
            }
        }
    }

    /// The package directory, configured or the XDG default.
    pub fn package_directory(&self) -> Option<PathBuf> {
        self.packages.directory.clone().or_else(|| {
            BaseDirectories::with_prefix(XDG_PREFIX)
                .ok()
                .map(|dirs| dirs.get_data_home().join("packages"))
        })
    }

    /// The package source described by `[packages]`.
    pub fn package_source(&self) -> Arc<dyn PackageSource> {
        let directory = self.package_directory();
        match (self.packages.builtin, directory) {
            (true, Some(dir)) => Arc::new(
                ChainSource::new()
                    .with(ConstructorSource::builtin())
                    .with(DirectorySource::new(dir)),
            ),
            (true, None) => Arc::new(ConstructorSource::builtin()),
            (false, Some(dir)) => Arc::new(DirectorySource::new(dir)),
            (false, None) => {
                warn!("No package directory and built-in packages disabled");
                Arc::new(ConstructorSource::new())
            }
        }
    }

    /// A manager over [`package_source`](Self::package_source) with the
    /// configured loader options.
    pub fn build_manager(&self) -> ThemeManager {
        ThemeManager::new(self.package_source(), self.loader.clone())
    }

    fn find_config_file() -> Option<PathBuf> {
        BaseDirectories::with_prefix(XDG_PREFIX)
            .ok()?
            .find_config_file(CONFIG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use themekit_style::InsertPosition;

    #[test]
    fn parses_partial_toml() {
        let config = EngineConfig::from_toml(
            r##"
            [loader]
            fallback_package = "dark"
            strict_mode = true

            [style]
            target_selector = "#app"
            insert_position = "body"
            include_animations = false
            "##,
        )
        .unwrap();

        assert_eq!(config.loader.fallback_package.as_deref(), Some("dark"));
        assert!(config.loader.strict_mode);
        assert!(config.loader.cache_enabled);
        assert_eq!(config.loader.cache_timeout_ms, 300_000);
        assert_eq!(config.style.target_selector, "#app");
        assert_eq!(config.style.insert_position, InsertPosition::Body);
        assert!(!config.style.style.include_animations);
        assert!(config.packages.builtin);
        assert_eq!(config.packages.directory, None);
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = EngineConfig::from_toml("[loader]\nstrict_mode = \"maybe\"").unwrap_err();
        assert!(matches!(err, ThemeError::Config { .. }));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = EngineConfig::new();
        config.loader.cache_timeout_ms = 0;
        config.packages.directory = Some(dir.path().join("packages"));
        fs::write(&path, config.to_toml().unwrap()).unwrap();

        assert_eq!(EngineConfig::from_file(&path).unwrap(), config);
        assert!(matches!(
            EngineConfig::from_file(dir.path().join("missing.toml")),
            Err(ThemeError::Io { .. })
        ));
    }

    #[test]
    fn env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("THEMEKIT_FALLBACK", ""),
            ("THEMEKIT_STRICT", "yes"),
            ("THEMEKIT_CACHE_TIMEOUT_MS", "1500"),
        ]);
        let mut config = EngineConfig::new();
        config.apply_env_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.loader.fallback_package, None);
        assert!(config.loader.strict_mode);
        assert_eq!(config.loader.cache_timeout_ms, 1500);

        let mut config = EngineConfig::new();
        config.apply_env_overrides(|key| (key == "THEMEKIT_CACHE_TIMEOUT_MS").then(|| "soon".to_string()));
        assert_eq!(config.loader.cache_timeout_ms, 300_000);
    }

    #[tokio::test]
    async fn manager_reads_builtin_and_directory_packages() {
        let dir = tempfile::tempdir().unwrap();
        let mut custom = themekit_theme::presets::dark();
        custom.meta.id = "midnight".to_string();
        custom.meta.name = "midnight".to_string();
        fs::write(
            dir.path().join("midnight.json"),
            serde_json::to_string_pretty(&custom).unwrap(),
        )
        .unwrap();

        let mut config = EngineConfig::new();
        config.packages.directory = Some(dir.path().to_path_buf());
        let manager = config.build_manager();

        assert_eq!(manager.load_package("midnight").await.unwrap().meta.id, "midnight");
        assert_eq!(manager.load_package("dark").await.unwrap().meta.id, "dark");

        config.packages.builtin = false;
        let manager = config.build_manager();
        assert!(manager.load_package("midnight").await.is_ok());
        assert!(!manager.package_exists("purple").await);
    }
}
