use camipc_wire::ExceptionCode;

use crate::transport::TransportError;

/// Errors that can fail a proxy-side call.
///
/// These never escape the proxy's public surface (each operation collapses
/// them to its defined failure representation), but they keep the three
/// failure channels distinct on the way there.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The transport could not complete the round trip.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The reply could not be decoded.
    #[error("wire error: {0}")]
    Wire(#[from] camipc_wire::WireError),

    /// The remote end reported a protocol-layer failure.
    #[error("remote exception: {0}")]
    Exception(ExceptionCode),
}

pub type Result<T> = std::result::Result<T, RpcError>;
