#![warn(missing_docs)]

//! # Themekit Theme Packages
//!
//! Versioned bundles of design tokens and component overrides, and the
//! machinery to validate, store, resolve and compose them at runtime.
//!
//! ## Overview
//!
//! - **[ThemePackageConfig](package::ThemePackageConfig)**: one package: metadata, tokens, components
//! - **[ThemeValidator](validator::ThemeValidator)**: structural and type checks with errors and warnings
//! - **[ThemeRegistry](registry::ThemeRegistry)**: the store of validated packages, with lifecycle events
//! - **[ThemeLoader](loader::ThemeLoader)**: cached, deduplicated asynchronous resolution with a fallback
//! - **[AutoDiscovery](discovery::AutoDiscovery)**: probes a [PackageSource](source::PackageSource) for packages
//! - **[ThemeManager](manager::ThemeManager)**: the facade over all of the above
//! - **[ThemeFactory](factory::ThemeFactory)**: defaults, JSON conversion and shallow merging
//! - **[ThemePreferences](preferences::ThemePreferences)**: persisted selection and history
//!
//! ## Quick Start
//!
//! ```rust
//! use themekit_theme::manager::ThemeManager;
//!
//! # futures::executor::block_on(async {
//! let manager = ThemeManager::builtin();
//! manager.load_all_packages().await;
//!
//! let dark = manager.load_package("dark").await.unwrap();
//! assert_eq!(dark.meta.display_name, "Dark");
//! # });
//! ```
//!
//! ## Package Sources
//!
//! Packages that are not registered yet are materialised by a
//! [PackageSource](source::PackageSource): constructor functions registered
//! at start-up, JSON or TOML files in a directory, or a chain of both.

pub mod discovery;
pub mod error;
pub mod events;
pub mod factory;
pub mod loader;
pub mod manager;
pub mod menu_variant;
pub mod meta;
pub mod package;
pub mod preferences;
pub mod presets;
pub mod registry;
pub mod source;
pub mod token;
pub mod token_schema;
pub mod validator;

pub use error::{ListenerError, ThemeError, ThemeResult};
pub use meta::{ThemeCategory, ThemePackageMeta};
pub use package::{MenuVariant, ThemeAlgorithm, ThemeComponents, ThemePackageConfig, ThemePackagePatch};
pub use token::{ThemeToken, TokenValue};
