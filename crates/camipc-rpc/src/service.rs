//! The local implementation seam behind the dispatch stub.

use camipc_wire::{CameraInfo, CapabilityRef};

/// Synchronous camera service implementation.
///
/// The stub invokes these methods on whatever worker thread the transport
/// delivers a call on, so implementations must be safe for concurrent
/// invocation or synchronize internally.
///
/// Domain outcomes ("camera not found", "already connected") are
/// expressed through the return values here (status integers, `None`
/// references), never through the reply's exception code; that channel is
/// reserved for failures of the call itself.
pub trait CameraService: Send + Sync {
    /// Number of cameras available.
    fn camera_count(&self) -> i32;

    /// Status plus, when the id is valid, the camera's descriptor.
    fn camera_info(&self, id: i32) -> (i32, Option<CameraInfo>);

    /// Connect a legacy client. Returns the camera capability, or `None`
    /// when the connection is refused.
    fn connect_legacy(
        &self,
        client: CapabilityRef,
        id: i32,
        package: &str,
        uid: i32,
    ) -> Option<CapabilityRef>;

    /// Connect a pro client.
    fn connect_pro(
        &self,
        callbacks: CapabilityRef,
        id: i32,
        package: &str,
        uid: i32,
    ) -> Option<CapabilityRef>;

    /// Connect a device client.
    fn connect_device(
        &self,
        callbacks: CapabilityRef,
        id: i32,
        package: &str,
        uid: i32,
    ) -> Option<CapabilityRef>;

    /// Observe a listener registration. The stub maintains the listener
    /// registry itself; this is the implementation's chance to veto or
    /// record the registration via its returned status.
    fn add_listener(&self, listener: &CapabilityRef) -> i32;

    /// Observe a listener removal.
    fn remove_listener(&self, listener: &CapabilityRef) -> i32;
}
