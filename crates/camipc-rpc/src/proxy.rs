//! Client-side call proxy.
//!
//! Each method builds one call envelope (interface descriptor first, then
//! the operation's arguments in fixed order), blocks on the transport for
//! the round trip, and reads the reply's exception code before anything
//! else. Any failure (delivery, exception, malformed reply) collapses to
//! the operation's defined failure representation: a zero count, a `None`
//! reference, or [`PROTOCOL_ERROR`].

use camipc_wire::{CameraInfo, CapabilityRef, ExceptionCode, Parcel, ParcelReader};
use tracing::error;

use crate::error::{Result, RpcError};
use crate::interface::{Opcode, INTERFACE_DESCRIPTOR, PROTOCOL_ERROR};
use crate::transport::Transport;

/// Operation-shaped client for the camera service.
///
/// Holds only the immutable transport reference; there is no mutable state
/// between calls. The calling thread blocks for the duration of each round
/// trip.
pub struct CameraServiceProxy<T> {
    transport: T,
}

impl<T: Transport> CameraServiceProxy<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The transport this proxy calls through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Number of cameras available. Returns 0 when the call fails; a
    /// caller cannot distinguish "no cameras" from "call refused" through
    /// this operation.
    pub fn camera_count(&self) -> i32 {
        self.try_camera_count().unwrap_or_else(|err| {
            error!(%err, "camera count call failed");
            0
        })
    }

    fn try_camera_count(&self) -> Result<i32> {
        let data = self.new_call()?;
        let reply = self.transport.call(Opcode::GetCameraCount as u32, &data)?;
        let mut reply = reply.reader();
        check_exception(&mut reply)?;
        Ok(reply.read_i32()?)
    }

    /// Domain status plus the camera's descriptor when present. Returns
    /// `(PROTOCOL_ERROR, None)` when the call fails.
    pub fn camera_info(&self, id: i32) -> (i32, Option<CameraInfo>) {
        self.try_camera_info(id).unwrap_or_else(|err| {
            error!(camera_id = id, %err, "camera info call failed");
            (PROTOCOL_ERROR, None)
        })
    }

    fn try_camera_info(&self, id: i32) -> Result<(i32, Option<CameraInfo>)> {
        let mut data = self.new_call()?;
        data.write_i32(id);
        let reply = self.transport.call(Opcode::GetCameraInfo as u32, &data)?;
        let mut reply = reply.reader();
        check_exception(&mut reply)?;
        let status = reply.read_i32()?;
        let info = CameraInfo::decode_opt(&mut reply)?;
        Ok((status, info))
    }

    /// Connect a legacy client. Returns `None` when the call fails or the
    /// service refuses the connection.
    pub fn connect_legacy(
        &self,
        client: &CapabilityRef,
        id: i32,
        package: &str,
        uid: i32,
    ) -> Option<CapabilityRef> {
        self.connect(Opcode::ConnectLegacy, client, id, package, uid)
    }

    /// Connect a pro client.
    pub fn connect_pro(
        &self,
        callbacks: &CapabilityRef,
        id: i32,
        package: &str,
        uid: i32,
    ) -> Option<CapabilityRef> {
        self.connect(Opcode::ConnectPro, callbacks, id, package, uid)
    }

    /// Connect a device client.
    pub fn connect_device(
        &self,
        callbacks: &CapabilityRef,
        id: i32,
        package: &str,
        uid: i32,
    ) -> Option<CapabilityRef> {
        self.connect(Opcode::ConnectDevice, callbacks, id, package, uid)
    }

    fn connect(
        &self,
        op: Opcode,
        client: &CapabilityRef,
        id: i32,
        package: &str,
        uid: i32,
    ) -> Option<CapabilityRef> {
        self.try_connect(op, client, id, package, uid)
            .unwrap_or_else(|err| {
                error!(operation = op.name(), camera_id = id, %err, "connect call failed");
                None
            })
    }

    fn try_connect(
        &self,
        op: Opcode,
        client: &CapabilityRef,
        id: i32,
        package: &str,
        uid: i32,
    ) -> Result<Option<CapabilityRef>> {
        let mut data = self.new_call()?;
        data.write_handle(client);
        data.write_i32(id);
        data.write_str(package)?;
        data.write_i32(uid);
        let reply = self.transport.call(op as u32, &data)?;
        let mut reply = reply.reader();
        check_exception(&mut reply)?;
        Ok(reply.read_handle()?)
    }

    /// Register a listener. Returns the domain status, or [`PROTOCOL_ERROR`]
    /// when the call fails.
    pub fn add_listener(&self, listener: &CapabilityRef) -> i32 {
        self.listener_call(Opcode::AddListener, listener)
    }

    /// Unregister a listener.
    pub fn remove_listener(&self, listener: &CapabilityRef) -> i32 {
        self.listener_call(Opcode::RemoveListener, listener)
    }

    fn listener_call(&self, op: Opcode, listener: &CapabilityRef) -> i32 {
        self.try_listener_call(op, listener).unwrap_or_else(|err| {
            error!(operation = op.name(), %err, "listener call failed");
            PROTOCOL_ERROR
        })
    }

    fn try_listener_call(&self, op: Opcode, listener: &CapabilityRef) -> Result<i32> {
        let mut data = self.new_call()?;
        data.write_handle(listener);
        let reply = self.transport.call(op as u32, &data)?;
        let mut reply = reply.reader();
        check_exception(&mut reply)?;
        Ok(reply.read_i32()?)
    }

    fn new_call(&self) -> Result<Parcel> {
        let mut data = Parcel::new();
        data.write_str(INTERFACE_DESCRIPTOR)?;
        Ok(data)
    }
}

/// Read the leading exception code; a non-`None` code fails the call and
/// forbids reading any further reply field.
fn check_exception(reply: &mut ParcelReader<'_>) -> Result<()> {
    match reply.read_exception()? {
        ExceptionCode::None => Ok(()),
        code => Err(RpcError::Exception(code)),
    }
}
