//! SPTP message header
//!
//! Unchunked messages carry a 2 byte header, chunked ones a 12 byte header.

use super::{
    CHUNKED_HEADER_SIZE, Error, HEADER_SIZE, MAGIC, MESSAGE_ID_SIZE, MessageId, Mode, Result,
};

/// Chunk position of a message inside its chunk set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkInfo {
    /// ID shared by every chunk of the payload
    pub message_id: MessageId,
    /// Total number of chunks
    pub count: u8,
    /// 0-based position of this chunk
    pub index: u8,
}

/// SPTP message header
///
/// # Wire Format
///
/// ```text
/// Unchunked:
/// +-------+------+------------------
/// | Magic | Mode | Payload ...
/// +-------+------+------------------
///
/// Chunked (Mode has CHUNKED set):
/// +-------+------+----------------+-------+-------+-------------------
/// | Magic | Mode | Message ID (8) | Count | Index | Fragment ...
/// +-------+------+----------------+-------+-------+-------------------
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    mode: Mode,
    chunk: Option<ChunkInfo>,
}

impl MessageHeader {
    /// Header for a payload sent as a single message
    #[must_use]
    pub const fn single(mode: Mode) -> Self {
        Self { mode, chunk: None }
    }

    /// Header for one chunk of a chunk set; sets the CHUNKED bit
    #[must_use]
    pub const fn chunked(mode: Mode, message_id: MessageId, count: u8, index: u8) -> Self {
        Self {
            mode: mode.with(Mode::CHUNKED),
            chunk: Some(ChunkInfo {
                message_id,
                count,
                index,
            }),
        }
    }

    /// Get mode
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Get chunk info, if chunked
    #[must_use]
    pub const fn chunk(&self) -> Option<ChunkInfo> {
        self.chunk
    }

    /// Encoded header length
    #[must_use]
    pub const fn encoded_len(&self) -> usize {
        if self.chunk.is_some() {
            CHUNKED_HEADER_SIZE
        } else {
            HEADER_SIZE
        }
    }

    /// Move to another chunk index of the same set
    pub fn set_index(&mut self, index: u8) {
        if let Some(chunk) = self.chunk.as_mut() {
            chunk.index = index;
        }
    }

    /// Convert to bytes; only the first `encoded_len()` bytes are meaningful
    #[must_use]
    pub fn to_bytes(&self) -> [u8; CHUNKED_HEADER_SIZE] {
        let mut bytes = [0u8; CHUNKED_HEADER_SIZE];

        bytes[0] = MAGIC;
        bytes[1] = self.mode.as_u8();
        if let Some(chunk) = self.chunk {
            bytes[2..2 + MESSAGE_ID_SIZE].copy_from_slice(chunk.message_id.as_bytes());
            bytes[CHUNKED_HEADER_SIZE - 2] = chunk.count;
            bytes[CHUNKED_HEADER_SIZE - 1] = chunk.index;
        }

        bytes
    }

    /// Parse the header at the start of one message
    ///
    /// Returns the header and the offset where the payload fragment starts.
    pub fn from_bytes(bytes: &[u8]) -> Result<(Self, usize)> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::BufferTooSmall {
                needed: HEADER_SIZE,
                got: bytes.len(),
            });
        }

        if bytes[0] != MAGIC {
            return Err(Error::InvalidMagic {
                expected: MAGIC,
                found: bytes[0],
            });
        }

        let mode = Mode::from_u8(bytes[1]).ok_or(Error::InvalidMode { mode: bytes[1] })?;
        if !mode.is_chunked() {
            return Ok((Self::single(mode), HEADER_SIZE));
        }

        if bytes.len() < CHUNKED_HEADER_SIZE {
            return Err(Error::BufferTooSmall {
                needed: CHUNKED_HEADER_SIZE,
                got: bytes.len(),
            });
        }

        let mut id = [0u8; MESSAGE_ID_SIZE];
        id.copy_from_slice(&bytes[2..2 + MESSAGE_ID_SIZE]);
        let count = bytes[CHUNKED_HEADER_SIZE - 2];
        let index = bytes[CHUNKED_HEADER_SIZE - 1];
        if index >= count {
            return Err(Error::InvalidChunkIndex { index, count });
        }

        let header = Self::chunked(mode, MessageId::from_bytes(id), count, index);
        Ok((header, CHUNKED_HEADER_SIZE))
    }
}
