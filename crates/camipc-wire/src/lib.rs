//! Deterministic positional wire codec for capability-passing RPC.
//!
//! Every call and reply travels as a [`Parcel`]: an ordered byte envelope
//! plus an attached capability list. Fields are encoded sequentially in the
//! order each operation specifies, with no padding, alignment, or implicit
//! reordering. Decoding via [`ParcelReader`] is bounds-checked and never
//! reads past what a matching encode wrote.
//!
//! The first field of every reply is an [`ExceptionCode`]; receivers must
//! consult it before trusting anything else in the envelope.

pub mod error;
pub mod exception;
pub mod handle;
pub mod info;
pub mod reader;
pub mod writer;

pub use error::{Result, WireError};
pub use exception::ExceptionCode;
pub use handle::CapabilityRef;
pub use info::{CameraFacing, CameraInfo};
pub use reader::ParcelReader;
pub use writer::{Parcel, MAX_TEXT_LEN, NULL_HANDLE};
