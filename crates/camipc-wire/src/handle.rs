//! Capability references: opaque handles to remote-callable objects.

use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_CAPABILITY_ID: AtomicU64 = AtomicU64::new(1);

/// An opaque, reference-counted handle to a remote-callable object.
///
/// Capabilities cross the call boundary by reference, never by value: the
/// parcel carries an index into its capability list, and every clone of a
/// `CapabilityRef` shares one underlying slot. Clone acquires and drop
/// releases; there is no garbage collection of cross-process handles.
///
/// Validity is per-call. When the owning remote process is reported gone,
/// [`revoke`](CapabilityRef::revoke) marks every outstanding clone invalid
/// and later uses fail distinctly instead of touching a dead object. Callers
/// must re-check [`is_valid`](CapabilityRef::is_valid) on each use, never
/// cache liveness across calls.
#[derive(Debug, Clone)]
pub struct CapabilityRef {
    slot: Arc<Slot>,
}

#[derive(Debug)]
struct Slot {
    id: u64,
    revoked: AtomicBool,
}

impl CapabilityRef {
    /// Allocate a fresh capability with a process-unique identity.
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Slot {
                id: NEXT_CAPABILITY_ID.fetch_add(1, Ordering::Relaxed),
                revoked: AtomicBool::new(false),
            }),
        }
    }

    /// Stable identity shared by every clone of this reference.
    pub fn id(&self) -> u64 {
        self.slot.id
    }

    /// True until the capability is revoked.
    pub fn is_valid(&self) -> bool {
        !self.slot.revoked.load(Ordering::Acquire)
    }

    /// Mark the referenced object dead.
    ///
    /// This is the death-notification hook: an external observer calls it
    /// when the owning process is detected as gone, and every outstanding
    /// clone becomes invalid at once.
    pub fn revoke(&self) {
        self.slot.revoked.store(true, Ordering::Release);
    }

    /// Number of live clones of this reference.
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.slot)
    }
}

impl Default for CapabilityRef {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for CapabilityRef {
    fn eq(&self, other: &Self) -> bool {
        self.slot.id == other.slot.id
    }
}

impl Eq for CapabilityRef {}

impl Hash for CapabilityRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slot.id.hash(state);
    }
}
