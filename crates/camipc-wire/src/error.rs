/// Errors that can occur during parcel encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// A read would go past the end of the parcel.
    #[error("truncated parcel (needed {needed} bytes, {remaining} remaining)")]
    Truncated { needed: usize, remaining: usize },

    /// A text field exceeds the maximum allowed length.
    #[error("text too long ({len} bytes, max {max})")]
    TextTooLong { len: usize, max: usize },

    /// A text field is not valid UTF-8.
    #[error("text is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// A capability index does not refer to an attached handle.
    #[error("capability index {index} out of range ({count} attached)")]
    BadHandleIndex { index: i32, count: usize },

    /// A camera facing value outside the known set.
    #[error("invalid camera facing {0}")]
    BadFacing(i32),

    /// An optional-block presence marker other than 0 or 1.
    #[error("invalid presence marker {0}")]
    BadPresence(i32),
}

pub type Result<T> = std::result::Result<T, WireError>;
