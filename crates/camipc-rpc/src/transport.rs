//! The transport seam: one blocking "deliver parcel, get parcel back"
//! primitive.
//!
//! Delivery itself (sockets, shared memory, thread pools) lives outside
//! this crate. The contract only assumes a reliable synchronous round trip
//! for a single in-flight call.

use std::sync::Arc;

use camipc_wire::Parcel;

use crate::service::CameraService;
use crate::stub::CameraServiceStub;

/// Errors a transport can report for one round trip.
///
/// These are purely local delivery failures, distinct from both the reply's
/// exception code and any domain status inside it.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The remote service could not be reached.
    #[error("remote service unreachable: {0}")]
    Unreachable(String),

    /// The remote process died before a reply was produced.
    #[error("remote process died mid-call")]
    RemoteDied,

    /// An I/O error occurred while delivering the call.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A synchronous call transport.
///
/// `call` blocks the calling thread until a reply envelope is available or
/// delivery fails. The protocol carries no correlation identifier beyond
/// the blocking round trip itself, so concurrent calls over one shared
/// proxy must be serialized by the caller or the transport.
pub trait Transport {
    fn call(&self, opcode: u32, data: &Parcel) -> Result<Parcel, TransportError>;
}

/// In-process loopback transport: hands each envelope straight to a stub.
///
/// Useful for single-process wiring and for exercising the full
/// proxy/stub path in tests without a real delivery mechanism.
pub struct LocalTransport<S> {
    stub: Arc<CameraServiceStub<S>>,
}

impl<S: CameraService> LocalTransport<S> {
    pub fn new(stub: Arc<CameraServiceStub<S>>) -> Self {
        Self { stub }
    }

    /// The stub this transport delivers to.
    pub fn stub(&self) -> &CameraServiceStub<S> {
        &self.stub
    }
}

impl<S> Clone for LocalTransport<S> {
    fn clone(&self) -> Self {
        Self {
            stub: Arc::clone(&self.stub),
        }
    }
}

impl<S: CameraService> Transport for LocalTransport<S> {
    fn call(&self, opcode: u32, data: &Parcel) -> Result<Parcel, TransportError> {
        Ok(self.stub.dispatch(opcode, data))
    }
}
