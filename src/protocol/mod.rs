//! SPTP protocol core implementation
//!
//! This module provides the wire format, mode flags, and the framing
//! encoder for SPTP.

use std::num::NonZeroUsize;

mod config;
mod emitter;
mod error;
mod header;
mod id;
mod types;
mod writer;

pub use config::{MAX_GZIP_LEVEL, WriterConfig, WriterOptions};
pub use emitter::{FrameEmitter, chunk_count};
pub use error::{Error, Result};
pub use header::{ChunkInfo, MessageHeader};
pub use id::{IdSource, OsIdSource};
pub use types::{MessageId, Mode};
pub use writer::{Writer, compress};

/// SPTP magic byte, first byte of every message
pub const MAGIC: u8 = 0xAC;

/// Message ID size in bytes
pub const MESSAGE_ID_SIZE: usize = 8;

/// Unchunked header size (magic + mode)
pub const HEADER_SIZE: usize = 2;

/// Chunked header size (magic + mode + message ID + count + index)
pub const CHUNKED_HEADER_SIZE: usize = HEADER_SIZE + MESSAGE_ID_SIZE + 2;

/// Maximum chunks per payload (count is a single byte)
pub const MAX_CHUNK_COUNT: usize = u8::MAX as usize;

/// Default chunk threshold (4 KB)
pub const DEFAULT_CHUNK_THRESHOLD: NonZeroUsize = NonZeroUsize::new(4 * 1024).unwrap();
