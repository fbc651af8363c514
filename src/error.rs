//! Error types for bit-cluster-tree encoding and decoding.

use thiserror::Error;

/// Error variants for encode and decode operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The output buffer cannot even hold the bit writer's fixed overhead.
    #[error("output buffer too small: {capacity} bytes, need at least {required}")]
    BufferTooSmall {
        /// Capacity of the buffer handed to the writer.
        capacity: usize,
        /// Minimum capacity the writer accepts.
        required: usize,
    },

    /// The writer ran out of room, or the reader ran out of bytes to load.
    #[error("end of stream")]
    EndOfStream,

    /// A read asked for more bits than the stream has left.
    #[error("not enough bits: requested {requested}, {available} available")]
    NotEnoughBits {
        /// Bits requested by the caller.
        requested: u32,
        /// Bits still buffered when the request failed.
        available: u32,
    },

    /// The input has fewer values than the sequence kind allows.
    #[error("input too small: {0} values")]
    InputTooSmall(usize),

    /// The input has more values than the sequence kind and width allow.
    #[error("input too big: {len} values exceeds the maximum of {max}")]
    InputTooBig {
        /// Number of values supplied.
        len: usize,
        /// Maximum number of values for this kind and width.
        max: u64,
    },

    /// The requested output length exceeds what the kind and width can represent.
    #[error("output too big: {len} values exceeds the maximum of {max}")]
    OutputTooBig {
        /// Number of output slots requested.
        len: usize,
        /// Maximum number of values for this kind and width.
        max: u64,
    },

    /// The configured bit width does not fit the element type.
    #[error("invalid bit width {width} for {bits}-bit values")]
    InvalidBitWidth {
        /// Configured width.
        width: u32,
        /// Width of the element type.
        bits: u32,
    },

    /// The byte sequence cannot be a valid encoding.
    #[error("wrong format: {0}")]
    WrongFormat(String),
}

impl Error {
    /// Reclassify a bitstream failure seen while decoding as a format error.
    pub(crate) fn into_wrong_format(self) -> Self {
        match self {
            Error::NotEnoughBits { .. } | Error::EndOfStream => {
                Error::WrongFormat(format!("truncated stream ({self})"))
            }
            other => other,
        }
    }
}

/// A specialized Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_errors_become_wrong_format() {
        let err = Error::NotEnoughBits {
            requested: 4,
            available: 1,
        }
        .into_wrong_format();
        assert!(matches!(err, Error::WrongFormat(_)));
        assert!(matches!(
            Error::EndOfStream.into_wrong_format(),
            Error::WrongFormat(_)
        ));
        assert_eq!(
            Error::InputTooSmall(0).into_wrong_format(),
            Error::InputTooSmall(0)
        );
    }
}
