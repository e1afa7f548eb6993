use bytes::{BufMut, BytesMut};

use crate::error::{Result, WireError};
use crate::exception::ExceptionCode;
use crate::handle::CapabilityRef;
use crate::reader::ParcelReader;

/// Maximum length of a text field in bytes.
pub const MAX_TEXT_LEN: usize = 4096;

/// Wire value for an absent capability reference.
pub const NULL_HANDLE: i32 = -1;

const INITIAL_BUFFER_CAPACITY: usize = 256;

/// An ordered, positionally-typed envelope for one call or one reply.
///
/// A parcel is a byte buffer plus an attached capability list, the two
/// halves the transport delivers together. Capability references are never
/// flattened into the byte stream; writing one attaches it to the list and
/// records its index in the bytes.
///
/// Parcels are created per call and discarded after decode.
#[derive(Debug, Default, Clone)]
pub struct Parcel {
    buf: BytesMut,
    handles: Vec<CapabilityRef>,
}

impl Parcel {
    /// Create an empty parcel.
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            handles: Vec::new(),
        }
    }

    /// Append a 32-bit integer (little endian).
    pub fn write_i32(&mut self, value: i32) {
        self.buf.put_i32_le(value);
    }

    /// Append a length-prefixed UTF-8 text field.
    pub fn write_str(&mut self, text: &str) -> Result<()> {
        if text.len() > MAX_TEXT_LEN {
            return Err(WireError::TextTooLong {
                len: text.len(),
                max: MAX_TEXT_LEN,
            });
        }
        self.buf.put_u32_le(text.len() as u32);
        self.buf.put_slice(text.as_bytes());
        Ok(())
    }

    /// Attach a capability reference and record its index.
    pub fn write_handle(&mut self, handle: &CapabilityRef) {
        let index = self.handles.len() as i32;
        self.handles.push(handle.clone());
        self.buf.put_i32_le(index);
    }

    /// Record an absent capability reference.
    pub fn write_null_handle(&mut self) {
        self.buf.put_i32_le(NULL_HANDLE);
    }

    /// Append an exception code. Replies write this before any result field.
    pub fn write_exception(&mut self, code: ExceptionCode) {
        self.buf.put_i32_le(code.to_wire());
    }

    /// Begin decoding this parcel from the first field.
    pub fn reader(&self) -> ParcelReader<'_> {
        ParcelReader::new(&self.buf, &self.handles)
    }

    /// Number of encoded bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty() && self.handles.is_empty()
    }

    /// Attached capability references, in write order.
    pub fn handles(&self) -> &[CapabilityRef] {
        &self.handles
    }
}
