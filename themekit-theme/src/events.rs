//! # Registry Events
//!
//! Lifecycle notifications emitted by the [`crate::registry::ThemeRegistry`].
//!
//! Listeners run synchronously on the thread performing the mutation, after
//! the registry lock is released. A listener that returns an error or panics
//! is logged and skipped; delivery to the remaining listeners continues and
//! the mutating call is unaffected.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use log::error;

use crate::error::ListenerError;
use crate::package::ThemePackageConfig;

/// Which kind of event a listener subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryEventKind {
    /// A new id was registered.
    PackageRegistered,
    /// An existing id was replaced or updated.
    PackageUpdated,
    /// An id was removed.
    PackageUnregistered,
}

/// A registry lifecycle event.
#[derive(Debug, Clone)]
pub enum RegistryEvent {
    /// A new package was inserted.
    PackageRegistered(Arc<ThemePackageConfig>),
    /// An existing package was replaced.
    PackageUpdated(Arc<ThemePackageConfig>),
    /// The package with this id was removed.
    PackageUnregistered(String),
}

impl RegistryEvent {
    /// The kind of this event.
    pub fn kind(&self) -> RegistryEventKind {
        match self {
            RegistryEvent::PackageRegistered(_) => RegistryEventKind::PackageRegistered,
            RegistryEvent::PackageUpdated(_) => RegistryEventKind::PackageUpdated,
            RegistryEvent::PackageUnregistered(_) => RegistryEventKind::PackageUnregistered,
        }
    }

    /// The id of the package the event concerns.
    pub fn package_id(&self) -> &str {
        match self {
            RegistryEvent::PackageRegistered(config) | RegistryEvent::PackageUpdated(config) => &config.meta.id,
            RegistryEvent::PackageUnregistered(id) => id,
        }
    }
}

/// Handle returned by `on`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(&RegistryEvent) -> Result<(), ListenerError> + Send + Sync>;

/// An observer list keyed by event kind.
#[derive(Default)]
pub struct EventListeners {
    listeners: Mutex<Vec<(RegistryEventKind, ListenerId, Listener)>>,
    next_id: AtomicU64,
}

impl EventListeners {
    /// Create an empty listener list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to one kind of event.
    pub fn on<F>(&self, kind: RegistryEventKind, listener: F) -> ListenerId
    where
        F: Fn(&RegistryEvent) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((kind, id, Arc::new(listener)));
        id
    }

    /// Unsubscribe. Returns whether the listener was found.
    pub fn off(&self, kind: RegistryEventKind, id: ListenerId) -> bool {
        let mut listeners = self.lock();
        let before = listeners.len();
        listeners.retain(|(k, i, _)| !(*k == kind && *i == id));
        listeners.len() != before
    }

    /// Drop every listener.
    pub fn remove_all(&self) {
        self.lock().clear();
    }

    /// Number of listeners subscribed to `kind`.
    pub fn count(&self, kind: RegistryEventKind) -> usize {
        self.lock().iter().filter(|(k, _, _)| *k == kind).count()
    }

    /// Deliver an event to every listener of its kind, in subscription order.
    pub fn emit(&self, event: &RegistryEvent) {
        let kind = event.kind();
        let targets: Vec<Listener> = self
            .lock()
            .iter()
            .filter(|(k, _, _)| *k == kind)
            .map(|(_, _, listener)| Arc::clone(listener))
            .collect();

        for listener in targets {
            match catch_unwind(AssertUnwindSafe(|| listener(event))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    error!("Error in theme package event listener for {:?}: {}", kind, err);
                }
                Err(_) => {
                    error!("Theme package event listener for {:?} panicked", kind);
                }
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(RegistryEventKind, ListenerId, Listener)>> {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventListeners")
            .field("count", &self.lock().len())
            .finish()
    }
}
