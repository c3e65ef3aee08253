//! # Theme Preferences
//!
//! Persistence of the user's theme choice through a key-value store.
//!
//! The engine never persists anything on its own. Applications hand a
//! [`PreferenceStore`] to [`ThemePreferences`], which keeps two keys:
//!
//! - `selectedTheme`: the id of the chosen package
//! - `themeHistory`: a JSON array of recently chosen ids, most recent first
//!
//! With a user id, both keys are prefixed with `user_<id>_`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::{debug, warn};

use crate::error::{ThemeError, ThemeResult};
use crate::package::ThemePackageConfig;
use crate::registry::ThemeRegistry;

/// Key of the selected theme id.
pub const SELECTED_THEME_KEY: &str = "selectedTheme";
/// Key of the theme history.
pub const THEME_HISTORY_KEY: &str = "themeHistory";
/// Maximum number of history entries kept.
pub const THEME_HISTORY_LIMIT: usize = 10;

/// A string key-value store.
pub trait PreferenceStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    fn set(&self, key: &str, value: &str) -> ThemeResult<()>;

    /// Delete a value.
    fn remove(&self, key: &str) -> ThemeResult<()>;
}

/// A store kept in memory only.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap_or_else(|e| e.into_inner()).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> ThemeResult<()> {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ThemeResult<()> {
        self.values.lock().unwrap_or_else(|e| e.into_inner()).remove(key);
        Ok(())
    }
}

/// A store persisted as a flat JSON object in one file.
///
/// The file is read once on open and rewritten on every change.
#[derive(Debug)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
    values: Mutex<HashMap<String, String>>,
}

impl JsonFilePreferenceStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> ThemeResult<Self> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| ThemeError::parse(format!("{}: {}", path.display(), e)))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(ThemeError::io(path, &err)),
        };
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &HashMap<String, String>) -> ThemeResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ThemeError::io(parent, &e))?;
        }
        let content = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, content).map_err(|e| ThemeError::io(&self.path, &e))
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap_or_else(|e| e.into_inner()).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> ThemeResult<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        self.persist(&values)
    }

    fn remove(&self, key: &str) -> ThemeResult<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        if values.remove(key).is_some() {
            self.persist(&values)?;
        }
        Ok(())
    }
}

/// Selected theme and history on top of a [`PreferenceStore`].
#[derive(Clone)]
pub struct ThemePreferences {
    store: Arc<dyn PreferenceStore>,
    prefix: String,
}

impl ThemePreferences {
    /// Preferences shared by every user of the store.
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            store,
            prefix: String::new(),
        }
    }

    /// Preferences scoped to one user.
    pub fn for_user(store: Arc<dyn PreferenceStore>, user_id: &str) -> Self {
        Self {
            store,
            prefix: format!("user_{}_", user_id),
        }
    }

    fn key(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    /// The persisted theme id.
    pub fn selected_theme(&self) -> Option<String> {
        self.store.get(&self.key(SELECTED_THEME_KEY)).filter(|id| !id.is_empty())
    }

    /// Persist a theme id and move it to the front of the history.
    pub fn set_selected_theme(&self, id: &str) -> ThemeResult<()> {
        self.store.set(&self.key(SELECTED_THEME_KEY), id)?;

        let mut history = self.history();
        history.retain(|entry| entry != id);
        history.insert(0, id.to_string());
        history.truncate(THEME_HISTORY_LIMIT);
        self.store
            .set(&self.key(THEME_HISTORY_KEY), &serde_json::to_string(&history)?)?;

        debug!("Theme preference set to '{}'", id);
        Ok(())
    }

    /// Recently selected ids, most recent first.
    ///
    /// Unreadable history is treated as empty.
    pub fn history(&self) -> Vec<String> {
        let Some(raw) = self.store.get(&self.key(THEME_HISTORY_KEY)) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!("Ignoring unreadable theme history: {}", err);
            Vec::new()
        })
    }

    /// Forget the selection and the history.
    pub fn clear(&self) -> ThemeResult<()> {
        self.store.remove(&self.key(SELECTED_THEME_KEY))?;
        self.store.remove(&self.key(THEME_HISTORY_KEY))
    }

    /// The package to start with.
    ///
    /// The persisted selection if it is registered; otherwise `dark` or
    /// `light` by `prefers_dark`; otherwise `light`; otherwise the first
    /// registered package.
    pub fn initial_theme(&self, registry: &ThemeRegistry, prefers_dark: bool) -> Option<Arc<ThemePackageConfig>> {
        if let Some(saved) = self.selected_theme() {
            match registry.get(&saved) {
                Some(config) => return Some(config),
                None => warn!("Saved theme '{}' is not registered", saved),
            }
        }

        let preferred = if prefers_dark { "dark" } else { "light" };
        registry
            .get(preferred)
            .or_else(|| registry.get("light"))
            .or_else(|| registry.get_all().into_iter().next())
    }
}

impl std::fmt::Debug for ThemePreferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemePreferences")
            .field("prefix", &self.prefix)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    #[test]
    fn history_is_most_recent_first_and_bounded() {
        let prefs = ThemePreferences::new(Arc::new(MemoryPreferenceStore::new()));
        for i in 0..12 {
            prefs.set_selected_theme(&format!("theme-{}", i)).unwrap();
        }
        prefs.set_selected_theme("theme-5").unwrap();

        let history = prefs.history();
        assert_eq!(history.len(), THEME_HISTORY_LIMIT);
        assert_eq!(history[0], "theme-5");
        assert_eq!(history[1], "theme-11");
        assert_eq!(history.iter().filter(|id| *id == "theme-5").count(), 1);
        assert_eq!(prefs.selected_theme().as_deref(), Some("theme-5"));
    }

    #[test]
    fn users_are_isolated() {
        let store: Arc<dyn PreferenceStore> = Arc::new(MemoryPreferenceStore::new());
        let alice = ThemePreferences::for_user(Arc::clone(&store), "alice");
        let shared = ThemePreferences::new(Arc::clone(&store));

        alice.set_selected_theme("dark").unwrap();
        assert_eq!(store.get("user_alice_selectedTheme").as_deref(), Some("dark"));
        assert_eq!(shared.selected_theme(), None);

        alice.clear().unwrap();
        assert_eq!(alice.selected_theme(), None);
        assert!(alice.history().is_empty());
    }

    #[test]
    fn initial_theme_resolution() {
        let registry = ThemeRegistry::new();
        registry.register(presets::light(), false).unwrap();
        registry.register(presets::dark(), false).unwrap();
        let prefs = ThemePreferences::new(Arc::new(MemoryPreferenceStore::new()));

        assert_eq!(prefs.initial_theme(&registry, true).unwrap().meta.id, "dark");
        assert_eq!(prefs.initial_theme(&registry, false).unwrap().meta.id, "light");

        prefs.set_selected_theme("dark").unwrap();
        assert_eq!(prefs.initial_theme(&registry, false).unwrap().meta.id, "dark");

        prefs.set_selected_theme("purple").unwrap();
        assert_eq!(prefs.initial_theme(&registry, false).unwrap().meta.id, "light");
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs").join("theme.json");

        let store = JsonFilePreferenceStore::open(&path).unwrap();
        ThemePreferences::new(Arc::new(store)).set_selected_theme("dark").unwrap();

        let reopened = ThemePreferences::new(Arc::new(JsonFilePreferenceStore::open(&path).unwrap()));
        assert_eq!(reopened.selected_theme().as_deref(), Some("dark"));
        assert_eq!(reopened.history(), ["dark"]);
    }
}
