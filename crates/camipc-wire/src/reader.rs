use crate::error::{Result, WireError};
use crate::exception::ExceptionCode;
use crate::handle::CapabilityRef;
use crate::writer::{MAX_TEXT_LEN, NULL_HANDLE};

/// Positional decoder over a [`Parcel`](crate::Parcel).
///
/// Reads fields in the exact order a matching encode wrote them. Every read
/// is bounds-checked; going past the end yields [`WireError::Truncated`],
/// never a panic or an over-read.
pub struct ParcelReader<'a> {
    buf: &'a [u8],
    handles: &'a [CapabilityRef],
}

impl<'a> ParcelReader<'a> {
    pub(crate) fn new(buf: &'a [u8], handles: &'a [CapabilityRef]) -> Self {
        Self { buf, handles }
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8]> {
        if self.buf.len() < needed {
            return Err(WireError::Truncated {
                needed,
                remaining: self.buf.len(),
            });
        }
        let (head, tail) = self.buf.split_at(needed);
        self.buf = tail;
        Ok(head)
    }

    /// Read a 32-bit integer (little endian).
    pub fn read_i32(&mut self) -> Result<i32> {
        let bytes = self.take(4)?;
        Ok(i32::from_le_bytes(bytes.try_into().unwrap()))
    }

    /// Read a length-prefixed UTF-8 text field, borrowed from the parcel.
    pub fn read_str(&mut self) -> Result<&'a str> {
        let len = u32::from_le_bytes(self.take(4)?.try_into().unwrap()) as usize;
        if len > MAX_TEXT_LEN {
            return Err(WireError::TextTooLong {
                len,
                max: MAX_TEXT_LEN,
            });
        }
        let bytes = self.take(len)?;
        Ok(std::str::from_utf8(bytes)?)
    }

    /// Read a capability reference. `None` means the sender wrote a null.
    pub fn read_handle(&mut self) -> Result<Option<CapabilityRef>> {
        let index = self.read_i32()?;
        if index == NULL_HANDLE {
            return Ok(None);
        }
        let handle = usize::try_from(index)
            .ok()
            .and_then(|i| self.handles.get(i))
            .ok_or(WireError::BadHandleIndex {
                index,
                count: self.handles.len(),
            })?;
        Ok(Some(handle.clone()))
    }

    /// Read the exception code that leads every reply.
    pub fn read_exception(&mut self) -> Result<ExceptionCode> {
        Ok(ExceptionCode::from_wire(self.read_i32()?))
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }
}
