//! SPTP error types

use thiserror::Error;

/// SPTP framing errors
#[derive(Error, Debug)]
pub enum Error {
    /// Payload needs more chunks than a single byte can count
    #[error("payload too large: {size} bytes needs {chunks} chunks of {threshold} (max 255)")]
    PayloadTooLarge {
        /// Payload size handed to the frame emitter
        size: usize,
        /// Configured chunk threshold
        threshold: usize,
        /// Chunks the payload would have needed
        chunks: usize,
    },

    /// Message ID source could not be read
    #[error("failed to generate message id")]
    Randomness(#[source] std::io::Error),

    /// Gzip compression failed
    #[error("compression failed")]
    Compression(#[source] std::io::Error),

    /// Writing to the output sink failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Rejected writer option (strict construction only)
    #[error("invalid {field}: {value}")]
    InvalidConfig {
        /// Option name
        field: &'static str,
        /// Rejected value
        value: u64,
    },

    /// Buffer too small
    #[error("buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall {
        /// Needed size
        needed: usize,
        /// Actual size
        got: usize,
    },

    /// Invalid magic byte
    #[error("invalid magic byte: expected {expected:#04x}, got {found:#04x}")]
    InvalidMagic {
        /// Expected magic byte
        expected: u8,
        /// Found magic byte
        found: u8,
    },

    /// Reserved mode bits set
    #[error("invalid mode flags: {mode:#04x}")]
    InvalidMode {
        /// Raw mode byte
        mode: u8,
    },

    /// Chunk index outside `[0, count)`
    #[error("invalid chunk index {index} of {count}")]
    InvalidChunkIndex {
        /// Chunk index
        index: u8,
        /// Chunk count
        count: u8,
    },
}

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        use std::io::ErrorKind;

        match err {
            Error::Io(inner) | Error::Randomness(inner) | Error::Compression(inner) => inner,
            Error::PayloadTooLarge { .. } | Error::InvalidConfig { .. } => {
                Self::new(ErrorKind::InvalidInput, err)
            }
            Error::BufferTooSmall { .. }
            | Error::InvalidMagic { .. }
            | Error::InvalidMode { .. }
            | Error::InvalidChunkIndex { .. } => Self::new(ErrorKind::InvalidData, err),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
