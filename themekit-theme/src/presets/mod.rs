//! # Built-in Packages
//!
//! Theme packages shipped with the engine.
//!
//! - **[light()]**: the default light package
//! - **[dark()]**: an eye-friendly dark package

mod dark;
mod light;

pub use dark::dark;
pub use light::light;

use crate::package::ThemePackageConfig;

/// Ids probed by the built-in package source, in order.
///
/// Only `light` and `dark` ship with constructors; the others are placeholders
/// that applications may fill in through their own sources.
pub const BUILTIN_CANDIDATES: &[&str] = &["light", "dark", "purple", "cyan", "high-contrast"];

/// The built-in package with the given id, if one exists.
pub fn builtin(id: &str) -> Option<ThemePackageConfig> {
    match id {
        "light" => Some(light()),
        "dark" => Some(dark()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::ThemeCategory;

    #[test]
    fn builtin_lookup() {
        assert_eq!(builtin("dark").map(|c| c.meta.category), Some(ThemeCategory::Dark));
        assert_eq!(builtin("light").map(|c| c.meta.id), Some("light".to_string()));
        assert!(builtin("purple").is_none());
    }
}
