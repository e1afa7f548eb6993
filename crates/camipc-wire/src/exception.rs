//! The first-field-of-every-reply outcome code.
//!
//! Both ends of the contract understand these codes identically, regardless
//! of the operation. Zero means success and result fields follow; anything
//! else short-circuits the reply: no further fields exist or may be read.

use std::fmt;

const EX_NONE: i32 = 0;
const EX_SECURITY: i32 = -1;
const EX_BAD_PAYLOAD: i32 = -2;
const EX_ILLEGAL_ARGUMENT: i32 = -3;
const EX_NULL_REFERENCE: i32 = -4;
const EX_ILLEGAL_STATE: i32 = -5;
const EX_UNKNOWN: i32 = -6;

/// Protocol-layer outcome of a call.
///
/// Reserved for failures of the call itself (bad payload, security, illegal
/// call state). Domain outcomes such as "camera not found" travel as status
/// values inside a successful reply instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionCode {
    /// Success; result fields follow.
    None,
    /// The caller is not permitted to perform the operation.
    Security,
    /// The envelope could not be interpreted.
    BadPayload,
    /// An argument was rejected by the remote end.
    IllegalArgument,
    /// A required reference was null or no longer valid.
    NullReference,
    /// The call arrived in a state that cannot service it.
    IllegalState,
    /// An unrecognized failure code.
    Unknown,
}

impl ExceptionCode {
    /// Decode a wire value.
    ///
    /// Unrecognized nonzero values map to [`ExceptionCode::Unknown`] so a
    /// newer remote end cannot crash an older receiver; the failure stays
    /// opaque but survivable.
    pub fn from_wire(raw: i32) -> Self {
        match raw {
            EX_NONE => Self::None,
            EX_SECURITY => Self::Security,
            EX_BAD_PAYLOAD => Self::BadPayload,
            EX_ILLEGAL_ARGUMENT => Self::IllegalArgument,
            EX_NULL_REFERENCE => Self::NullReference,
            EX_ILLEGAL_STATE => Self::IllegalState,
            _ => Self::Unknown,
        }
    }

    /// Encode to the wire value.
    pub fn to_wire(self) -> i32 {
        match self {
            Self::None => EX_NONE,
            Self::Security => EX_SECURITY,
            Self::BadPayload => EX_BAD_PAYLOAD,
            Self::IllegalArgument => EX_ILLEGAL_ARGUMENT,
            Self::NullReference => EX_NULL_REFERENCE,
            Self::IllegalState => EX_ILLEGAL_STATE,
            Self::Unknown => EX_UNKNOWN,
        }
    }

    /// Short human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Security => "Security",
            Self::BadPayload => "BadPayload",
            Self::IllegalArgument => "IllegalArgument",
            Self::NullReference => "NullReference",
            Self::IllegalState => "IllegalState",
            Self::Unknown => "Unknown",
        }
    }

    /// All codes that indicate a failed call.
    pub const FAILURES: [ExceptionCode; 6] = [
        Self::Security,
        Self::BadPayload,
        Self::IllegalArgument,
        Self::NullReference,
        Self::IllegalState,
        Self::Unknown,
    ];
}

impl fmt::Display for ExceptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
