//! Interface identity, opcodes, and the status convention.
//!
//! The descriptor and opcode assignments are part of the wire contract:
//! opcodes are never reused or renumbered once assigned, and every call
//! envelope starts with the descriptor token.

/// Immutable identity of the camera service interface.
///
/// Shared by proxy and stub builds; a mismatched token is a protocol
/// violation, not a business error.
pub const INTERFACE_DESCRIPTOR: &str = "camipc.CameraService";

/// Domain status: success.
pub const STATUS_OK: i32 = 0;

/// Fixed status returned by the proxy for status-shaped operations when no
/// domain status is available (protocol or transport failure). POSIX
/// `EPROTO`, negated.
pub const PROTOCOL_ERROR: i32 = -71;

/// The closed set of remote operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Opcode {
    GetCameraCount = 1,
    GetCameraInfo = 2,
    ConnectLegacy = 3,
    ConnectPro = 4,
    ConnectDevice = 5,
    AddListener = 6,
    RemoveListener = 7,
}

impl Opcode {
    /// Map a raw wire opcode to the operation set. Unassigned codes return
    /// `None` and take the stub's unhandled-operation path.
    pub fn from_u32(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(Self::GetCameraCount),
            2 => Some(Self::GetCameraInfo),
            3 => Some(Self::ConnectLegacy),
            4 => Some(Self::ConnectPro),
            5 => Some(Self::ConnectDevice),
            6 => Some(Self::AddListener),
            7 => Some(Self::RemoveListener),
            _ => None,
        }
    }

    /// Operation name for logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::GetCameraCount => "GetCameraCount",
            Self::GetCameraInfo => "GetCameraInfo",
            Self::ConnectLegacy => "ConnectLegacy",
            Self::ConnectPro => "ConnectPro",
            Self::ConnectDevice => "ConnectDevice",
            Self::AddListener => "AddListener",
            Self::RemoveListener => "RemoveListener",
        }
    }
}
