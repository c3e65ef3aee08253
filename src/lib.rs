#![warn(missing_docs)]

//! Runtime theme packages: validate, register, load, compose and apply
//! design-token bundles as CSS.
//!
//! ```rust
//! use themekit::prelude::*;
//!
//! # futures::executor::block_on(async {
//! let mut engine = ThemeEngine::new(ThemeManager::builtin(), MemoryDocument::new(), ApplierOptions::default());
//! engine.set_theme("dark").await.unwrap();
//! assert_eq!(engine.document().head_styles()[0].id, "theme-dark-styles");
//! # });
//! ```

pub use themekit_style as style;
pub use themekit_theme as theme;

pub mod config;
pub mod engine;

/// A "prelude" for users of themekit.
///
/// Importing this module brings into scope the types needed to manage and
/// apply theme packages.
///
/// ```rust
/// use themekit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::engine::ThemeEngine;

    // Packages
    pub use crate::theme::loader::LoaderOptions;
    pub use crate::theme::manager::ThemeManager;
    pub use crate::theme::preferences::{MemoryPreferenceStore, PreferenceStore, ThemePreferences};
    pub use crate::theme::{
        ThemeCategory, ThemeError, ThemePackageConfig, ThemePackagePatch, ThemeResult, TokenValue,
    };

    // Styling
    pub use crate::style::accessibility::check_theme_accessibility;
    pub use crate::style::{
        generate_theme_css, ApplierOptions, ElementTarget, MemoryDocument, StyleContext, StyleDocument,
        StyleOptions,
    };
}
