//! Synchronous capability-passing RPC for a camera service.
//!
//! A [`CameraServiceProxy`] turns operation-shaped method calls into one
//! blocking transport round trip each; a [`CameraServiceStub`] receives the
//! envelope on the service side, checks interface identity, dispatches to a
//! local [`CameraService`] implementation, and encodes the reply.
//!
//! Three error channels stay separate end to end:
//! - protocol-layer failures travel as the reply's leading
//!   [`ExceptionCode`](camipc_wire::ExceptionCode);
//! - domain outcomes travel as status/result fields inside successful
//!   replies;
//! - transport delivery failures surface locally as
//!   [`TransportError`](transport::TransportError).

pub mod error;
pub mod interface;
pub mod proxy;
pub mod registry;
pub mod service;
pub mod stub;
pub mod transport;

pub use error::{Result, RpcError};
pub use interface::{Opcode, INTERFACE_DESCRIPTOR, PROTOCOL_ERROR, STATUS_OK};
pub use proxy::CameraServiceProxy;
pub use registry::ListenerRegistry;
pub use service::CameraService;
pub use stub::CameraServiceStub;
pub use transport::{LocalTransport, Transport, TransportError};
