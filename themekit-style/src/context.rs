//! Tracks the package currently applied to a document.

use std::sync::Arc;

use log::info;
use themekit_theme::ThemePackageConfig;

use crate::applier::{ApplierOptions, StyleApplier};
use crate::document::StyleDocument;

/// A document plus the applier for its current package.
///
/// At most one package is applied at a time: [`StyleContext::apply_theme`]
/// removes the previous one first.
#[derive(Debug)]
pub struct StyleContext<D: StyleDocument> {
    document: D,
    current: Option<StyleApplier>,
}

impl<D: StyleDocument> StyleContext<D> {
    /// Wrap a document. No package is applied.
    pub fn new(document: D) -> Self {
        Self {
            document,
            current: None,
        }
    }

    /// The wrapped document.
    pub fn document(&self) -> &D {
        &self.document
    }

    /// The wrapped document, mutably.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    /// Apply `config`, replacing whatever was applied before.
    pub fn apply_theme(&mut self, config: Arc<ThemePackageConfig>, options: ApplierOptions) {
        self.remove_current_theme();
        let mut applier = StyleApplier::new(config, options);
        applier.apply(&mut self.document);
        self.current = Some(applier);
    }

    /// The package currently applied.
    pub fn current_theme(&self) -> Option<&Arc<ThemePackageConfig>> {
        self.current.as_ref().map(StyleApplier::config)
    }

    /// The stylesheet currently injected.
    pub fn current_css(&self) -> Option<String> {
        self.current.as_ref()?.applied_css(&self.document)
    }

    /// Remove the applied package, if any.
    pub fn remove_current_theme(&mut self) {
        if let Some(mut applier) = self.current.take() {
            applier.remove(&mut self.document);
            info!("Removed theme '{}'", applier.config().meta.id);
        }
    }

    /// Unwrap the document, leaving the applied styles in place.
    pub fn into_document(self) -> D {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ElementTarget, MemoryDocument};
    use themekit_theme::presets;

    #[test]
    fn switching_themes_leaves_one_applied() {
        let mut context = StyleContext::new(MemoryDocument::new());
        assert!(context.current_theme().is_none());

        context.apply_theme(Arc::new(presets::light()), ApplierOptions::default());
        context.apply_theme(Arc::new(presets::dark()), ApplierOptions::default());

        assert_eq!(context.current_theme().unwrap().meta.id, "dark");
        assert_eq!(context.document().head_styles().len(), 1);
        assert_eq!(
            context.document().classes(ElementTarget::Root).unwrap(),
            ["dark-theme"]
        );
        assert!(context.current_css().unwrap().contains("--theme-primary"));

        context.remove_current_theme();
        assert!(context.current_theme().is_none());
        assert!(context.current_css().is_none());
        let document = context.into_document();
        assert!(document.head_styles().is_empty());
        assert!(document.classes(ElementTarget::Selector("body")).unwrap().is_empty());
    }
}
