#![warn(missing_docs)]

//! # Themekit Style
//!
//! Turns theme packages into stylesheets and applies them to a document.
//!
//! ## Overview
//!
//! - **[StyleGenerator](generator::StyleGenerator)**: deterministic CSS from a package's tokens
//! - **[StyleApplier](applier::StyleApplier)**: injects the stylesheet and the `<id>-theme` class
//! - **[StyleContext](context::StyleContext)**: keeps exactly one package applied to a document
//! - **[StyleDocument](document::StyleDocument)**: the document surface, with an in-memory implementation
//! - **[accessibility]**: WCAG contrast checks, scoring and colour helpers
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use themekit_style::{ApplierOptions, MemoryDocument, StyleContext};
//!
//! let mut context = StyleContext::new(MemoryDocument::new());
//! context.apply_theme(Arc::new(themekit_theme::presets::dark()), ApplierOptions::default());
//! assert_eq!(context.document().head_styles()[0].id, "theme-dark-styles");
//! ```

pub mod accessibility;
pub mod applier;
pub mod context;
pub mod document;
pub mod generator;

pub use accessibility::{check_theme_accessibility, AccessibilityResult};
pub use applier::{ApplierOptions, StyleApplier};
pub use context::StyleContext;
pub use document::{ElementTarget, InsertPosition, MemoryDocument, StyleDocument};
pub use generator::{generate_theme_css, StyleGenerator, StyleOptions};
