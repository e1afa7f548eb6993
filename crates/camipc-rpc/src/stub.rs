//! Service-side dispatch stub.
//!
//! Receives `(opcode, envelope)` pairs from the transport, checks interface
//! identity before anything else, decodes the operation's fixed argument
//! list, invokes the local [`CameraService`] synchronously, and encodes the
//! reply: exception code first, then result fields only on success.
//!
//! One malformed call must never destabilize later calls: every rejection
//! funnels into a well-formed exception reply.

use camipc_wire::{CameraInfo, CapabilityRef, ExceptionCode, Parcel, ParcelReader, WireError};
use tracing::warn;

use crate::interface::{Opcode, INTERFACE_DESCRIPTOR};
use crate::registry::ListenerRegistry;
use crate::service::CameraService;

/// A rejected call, carrying the exception code to reply with.
struct Reject(ExceptionCode);

impl From<WireError> for Reject {
    fn from(_: WireError) -> Self {
        Reject(ExceptionCode::BadPayload)
    }
}

/// Dispatches incoming calls to a local service implementation.
///
/// Safe under concurrent invocation: the transport may deliver calls from
/// different remote callers on independent worker threads simultaneously.
/// The listener registry is the only interior mutable state.
pub struct CameraServiceStub<S> {
    service: S,
    listeners: ListenerRegistry,
}

impl<S: CameraService> CameraServiceStub<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            listeners: ListenerRegistry::new(),
        }
    }

    /// The wrapped implementation.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Registered listener capabilities.
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Produce the reply envelope for one delivered call.
    pub fn dispatch(&self, opcode: u32, data: &Parcel) -> Parcel {
        match self.try_dispatch(opcode, data) {
            Ok(reply) => reply,
            Err(Reject(code)) => {
                warn!(opcode, code = %code, "call rejected");
                let mut reply = Parcel::new();
                reply.write_exception(code);
                reply
            }
        }
    }

    fn try_dispatch(&self, opcode: u32, data: &Parcel) -> Result<Parcel, Reject> {
        let mut data = data.reader();
        self.check_interface(&mut data)?;

        let Some(op) = Opcode::from_u32(opcode) else {
            // Unhandled operation: a defined failure, never silent success.
            return Err(Reject(ExceptionCode::BadPayload));
        };

        let mut reply = Parcel::new();
        match op {
            Opcode::GetCameraCount => {
                reply.write_exception(ExceptionCode::None);
                reply.write_i32(self.service.camera_count());
            }
            Opcode::GetCameraInfo => {
                let id = data.read_i32()?;
                let (status, info) = self.service.camera_info(id);
                reply.write_exception(ExceptionCode::None);
                reply.write_i32(status);
                CameraInfo::encode_opt(info.as_ref(), &mut reply);
            }
            Opcode::ConnectLegacy | Opcode::ConnectPro | Opcode::ConnectDevice => {
                let client = read_live_handle(&mut data)?;
                let id = data.read_i32()?;
                let package = data.read_str()?;
                let uid = data.read_i32()?;
                let camera = match op {
                    Opcode::ConnectLegacy => self.service.connect_legacy(client, id, package, uid),
                    Opcode::ConnectPro => self.service.connect_pro(client, id, package, uid),
                    _ => self.service.connect_device(client, id, package, uid),
                };
                reply.write_exception(ExceptionCode::None);
                match camera {
                    Some(camera) => reply.write_handle(&camera),
                    None => reply.write_null_handle(),
                }
            }
            Opcode::AddListener => {
                let listener = read_live_handle(&mut data)?;
                let status = self.service.add_listener(&listener);
                self.listeners.add(listener);
                reply.write_exception(ExceptionCode::None);
                reply.write_i32(status);
            }
            Opcode::RemoveListener => {
                let listener = read_live_handle(&mut data)?;
                let status = self.service.remove_listener(&listener);
                let _ = self.listeners.remove(listener.id());
                reply.write_exception(ExceptionCode::None);
                reply.write_i32(status);
            }
        }
        Ok(reply)
    }

    /// Interface identity check. Runs before any argument decoding; a
    /// mismatched token is a protocol-level rejection, not a business error.
    fn check_interface(&self, data: &mut ParcelReader<'_>) -> Result<(), Reject> {
        let token = data.read_str()?;
        if token != INTERFACE_DESCRIPTOR {
            warn!(
                got = token,
                expected = INTERFACE_DESCRIPTOR,
                "interface descriptor mismatch"
            );
            return Err(Reject(ExceptionCode::BadPayload));
        }
        Ok(())
    }
}

/// Decode a capability argument and re-validate it. Null and revoked
/// references fail the call with `NullReference`; validity is per-call,
/// never cached.
fn read_live_handle(data: &mut ParcelReader<'_>) -> Result<CapabilityRef, Reject> {
    let handle = data
        .read_handle()?
        .ok_or(Reject(ExceptionCode::NullReference))?;
    if !handle.is_valid() {
        return Err(Reject(ExceptionCode::NullReference));
    }
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Arc;
    use std::thread;

    use camipc_wire::CameraFacing;

    use super::*;
    use crate::interface::STATUS_OK;

    const STATUS_NO_SUCH_CAMERA: i32 = -2;

    /// Fixed-inventory implementation used by the dispatch tests.
    struct FakeCameraService {
        cameras: Vec<CameraInfo>,
        connects: AtomicI32,
    }

    impl FakeCameraService {
        fn with_cameras(cameras: Vec<CameraInfo>) -> Self {
            Self {
                cameras,
                connects: AtomicI32::new(0),
            }
        }
    }

    impl CameraService for FakeCameraService {
        fn camera_count(&self) -> i32 {
            self.cameras.len() as i32
        }

        fn camera_info(&self, id: i32) -> (i32, Option<CameraInfo>) {
            match usize::try_from(id).ok().and_then(|i| self.cameras.get(i)) {
                Some(info) => (STATUS_OK, Some(*info)),
                None => (STATUS_NO_SUCH_CAMERA, None),
            }
        }

        fn connect_legacy(
            &self,
            _client: CapabilityRef,
            id: i32,
            _package: &str,
            _uid: i32,
        ) -> Option<CapabilityRef> {
            self.connects.fetch_add(1, Ordering::Relaxed);
            self.camera_info(id).1.map(|_| CapabilityRef::new())
        }

        fn connect_pro(
            &self,
            client: CapabilityRef,
            id: i32,
            package: &str,
            uid: i32,
        ) -> Option<CapabilityRef> {
            self.connect_legacy(client, id, package, uid)
        }

        fn connect_device(
            &self,
            client: CapabilityRef,
            id: i32,
            package: &str,
            uid: i32,
        ) -> Option<CapabilityRef> {
            self.connect_legacy(client, id, package, uid)
        }

        fn add_listener(&self, _listener: &CapabilityRef) -> i32 {
            STATUS_OK
        }

        fn remove_listener(&self, _listener: &CapabilityRef) -> i32 {
            STATUS_OK
        }
    }

    fn back_camera() -> CameraInfo {
        CameraInfo {
            facing: CameraFacing::Back,
            orientation: 90,
        }
    }

    fn stub_with_one_camera() -> CameraServiceStub<FakeCameraService> {
        CameraServiceStub::new(FakeCameraService::with_cameras(vec![back_camera()]))
    }

    fn call_envelope() -> Parcel {
        let mut data = Parcel::new();
        data.write_str(INTERFACE_DESCRIPTOR).unwrap();
        data
    }

    fn reply_exception(reply: &Parcel) -> ExceptionCode {
        reply.reader().read_exception().unwrap()
    }

    #[test]
    fn count_reply_is_exception_then_count() {
        let stub = stub_with_one_camera();
        let reply = stub.dispatch(Opcode::GetCameraCount as u32, &call_envelope());

        let mut reader = reply.reader();
        assert_eq!(reader.read_exception().unwrap(), ExceptionCode::None);
        assert_eq!(reader.read_i32().unwrap(), 1);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn interface_mismatch_short_circuits_with_bad_payload() {
        let stub = stub_with_one_camera();
        let mut data = Parcel::new();
        data.write_str("someother.Interface").unwrap();

        let reply = stub.dispatch(Opcode::GetCameraCount as u32, &data);
        assert_eq!(reply_exception(&reply), ExceptionCode::BadPayload);
        // Exception only; no result fields follow.
        let mut reader = reply.reader();
        reader.read_exception().unwrap();
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn unrecognized_opcode_yields_defined_failure_and_later_calls_survive() {
        let stub = stub_with_one_camera();

        let reply = stub.dispatch(999, &call_envelope());
        assert_eq!(reply_exception(&reply), ExceptionCode::BadPayload);

        // The stub still serves subsequent calls.
        let reply = stub.dispatch(Opcode::GetCameraCount as u32, &call_envelope());
        assert_eq!(reply_exception(&reply), ExceptionCode::None);
    }

    #[test]
    fn truncated_arguments_reject_as_bad_payload() {
        let stub = stub_with_one_camera();
        // GetCameraInfo without its id argument.
        let reply = stub.dispatch(Opcode::GetCameraInfo as u32, &call_envelope());
        assert_eq!(reply_exception(&reply), ExceptionCode::BadPayload);
    }

    #[test]
    fn info_reply_for_valid_id_carries_the_descriptor() {
        let stub = stub_with_one_camera();
        let mut data = call_envelope();
        data.write_i32(0);

        let reply = stub.dispatch(Opcode::GetCameraInfo as u32, &data);
        let mut reader = reply.reader();
        assert_eq!(reader.read_exception().unwrap(), ExceptionCode::None);
        assert_eq!(reader.read_i32().unwrap(), STATUS_OK);
        assert_eq!(
            CameraInfo::decode_opt(&mut reader).unwrap(),
            Some(back_camera())
        );
    }

    #[test]
    fn info_reply_for_invalid_id_is_error_status_with_absent_block() {
        let stub = stub_with_one_camera();
        let mut data = call_envelope();
        data.write_i32(9);

        let reply = stub.dispatch(Opcode::GetCameraInfo as u32, &data);
        let mut reader = reply.reader();
        assert_eq!(reader.read_exception().unwrap(), ExceptionCode::None);
        assert_eq!(reader.read_i32().unwrap(), STATUS_NO_SUCH_CAMERA);
        assert_eq!(CameraInfo::decode_opt(&mut reader).unwrap(), None);
    }

    #[test]
    fn connect_replies_with_a_camera_capability() {
        let stub = stub_with_one_camera();
        let client = CapabilityRef::new();
        let mut data = call_envelope();
        data.write_handle(&client);
        data.write_i32(0);
        data.write_str("com.example.cam").unwrap();
        data.write_i32(10010);

        let reply = stub.dispatch(Opcode::ConnectDevice as u32, &data);
        let mut reader = reply.reader();
        assert_eq!(reader.read_exception().unwrap(), ExceptionCode::None);
        assert!(reader.read_handle().unwrap().is_some());
        assert_eq!(stub.service().connects.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn connect_refusal_is_a_null_result_not_an_exception() {
        let stub = stub_with_one_camera();
        let client = CapabilityRef::new();
        let mut data = call_envelope();
        data.write_handle(&client);
        data.write_i32(42); // no such camera
        data.write_str("com.example.cam").unwrap();
        data.write_i32(10010);

        let reply = stub.dispatch(Opcode::ConnectLegacy as u32, &data);
        let mut reader = reply.reader();
        assert_eq!(reader.read_exception().unwrap(), ExceptionCode::None);
        assert!(reader.read_handle().unwrap().is_none());
    }

    #[test]
    fn null_callback_rejects_with_null_reference() {
        let stub = stub_with_one_camera();
        let mut data = call_envelope();
        data.write_null_handle();
        data.write_i32(0);
        data.write_str("com.example.cam").unwrap();
        data.write_i32(10010);

        let reply = stub.dispatch(Opcode::ConnectPro as u32, &data);
        assert_eq!(reply_exception(&reply), ExceptionCode::NullReference);
    }

    #[test]
    fn revoked_callback_rejects_with_null_reference() {
        let stub = stub_with_one_camera();
        let client = CapabilityRef::new();
        client.revoke();
        let mut data = call_envelope();
        data.write_handle(&client);
        data.write_i32(0);
        data.write_str("com.example.cam").unwrap();
        data.write_i32(10010);

        let reply = stub.dispatch(Opcode::ConnectLegacy as u32, &data);
        assert_eq!(reply_exception(&reply), ExceptionCode::NullReference);
    }

    #[test]
    fn add_listener_registers_and_duplicate_add_is_idempotent() {
        let stub = stub_with_one_camera();
        let listener = CapabilityRef::new();

        for _ in 0..2 {
            let mut data = call_envelope();
            data.write_handle(&listener);
            let reply = stub.dispatch(Opcode::AddListener as u32, &data);
            let mut reader = reply.reader();
            assert_eq!(reader.read_exception().unwrap(), ExceptionCode::None);
            assert_eq!(reader.read_i32().unwrap(), STATUS_OK);
        }

        assert_eq!(stub.listeners().len(), 1);
        assert!(stub.listeners().contains(listener.id()));
    }

    #[test]
    fn remove_listener_releases_and_unregistered_remove_is_a_noop() {
        let stub = stub_with_one_camera();
        let listener = CapabilityRef::new();

        let mut add = call_envelope();
        add.write_handle(&listener);
        stub.dispatch(Opcode::AddListener as u32, &add);

        let mut remove = call_envelope();
        remove.write_handle(&listener);
        let reply = stub.dispatch(Opcode::RemoveListener as u32, &remove);
        let mut reader = reply.reader();
        assert_eq!(reader.read_exception().unwrap(), ExceptionCode::None);
        assert_eq!(reader.read_i32().unwrap(), STATUS_OK);
        assert!(stub.listeners().is_empty());

        // Removing again: still a success, still empty.
        let mut again = call_envelope();
        again.write_handle(&listener);
        let reply = stub.dispatch(Opcode::RemoveListener as u32, &again);
        assert_eq!(reply_exception(&reply), ExceptionCode::None);
        assert!(stub.listeners().is_empty());
    }

    #[test]
    fn concurrent_dispatch_keeps_the_registry_consistent() {
        let stub = Arc::new(stub_with_one_camera());
        let listeners: Vec<CapabilityRef> = (0..16).map(|_| CapabilityRef::new()).collect();

        let handles: Vec<_> = listeners
            .iter()
            .map(|listener| {
                let stub = Arc::clone(&stub);
                let listener = listener.clone();
                thread::spawn(move || {
                    let mut data = call_envelope();
                    data.write_handle(&listener);
                    stub.dispatch(Opcode::AddListener as u32, &data)
                })
            })
            .collect();
        for handle in handles {
            let reply = handle.join().unwrap();
            assert_eq!(reply_exception(&reply), ExceptionCode::None);
        }

        assert_eq!(stub.listeners().len(), listeners.len());
    }
}
