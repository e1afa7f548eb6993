//! Stub-side registry of listener capabilities.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use camipc_wire::CapabilityRef;

/// Identity-keyed set of registered listener capabilities.
///
/// The registry owns exactly one clone per registered identity. Add is
/// idempotent, removal transfers the clone out under the lock so a
/// reference is released exactly once, and [`purge_dead`] drops entries
/// whose capability has been revoked.
///
/// All operations take `&self` and are safe under concurrent invocation
/// from transport worker threads.
///
/// [`purge_dead`]: ListenerRegistry::purge_dead
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    entries: Mutex<HashMap<u64, CapabilityRef>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<u64, CapabilityRef>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a listener keyed by its identity. Returns `false` when the
    /// identity was already registered; duplicate adds are idempotent and
    /// retain no second entry or extra clone.
    pub fn add(&self, listener: CapabilityRef) -> bool {
        let mut entries = self.lock();
        match entries.entry(listener.id()) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(listener);
                true
            }
        }
    }

    /// Remove a listener by identity, transferring its reference out.
    /// `None` means the identity was not registered: a no-op, not a
    /// failure.
    pub fn remove(&self, id: u64) -> Option<CapabilityRef> {
        self.lock().remove(&id)
    }

    /// True if the identity is currently registered.
    pub fn contains(&self, id: u64) -> bool {
        self.lock().contains_key(&id)
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Release every revoked entry; returns how many were dropped.
    ///
    /// This is the release hook for external death notifications: revoke
    /// the capability, then purge, and the registry cannot accumulate dead
    /// references without bound.
    pub fn purge_dead(&self) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, listener| listener.is_valid());
        before - entries.len()
    }
}
