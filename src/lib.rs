//! SPTP (Simple point-to-point Transfer Protocol) - framing encoder
//!
//! This library turns opaque payloads into self-describing SPTP wire
//! messages. Payloads are optionally gzip-compressed and, when larger than
//! the configured threshold, split into numbered chunks that share a random
//! message ID.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::io::Write;
//! use std::net::TcpStream;
//!
//! use sptp::{Writer, WriterOptions};
//!
//! let stream = TcpStream::connect("127.0.0.1:9100")?;
//! let mut writer = Writer::with_options(
//!     stream,
//!     WriterOptions {
//!         gzip_level: 6,
//!         chunk_threshold: 1400,
//!     },
//! );
//!
//! writer.write_payload(b"Hello, peer!")?;
//! writer.flush()?;
//! # Ok::<(), sptp::Error>(())
//! ```
//!
//! # Wire Format
//!
//! ```text
//! unchunked: magic(1) | mode(1) | payload
//! chunked:   magic(1) | mode(1) | message_id(8) | count(1) | index(1) | fragment
//! ```
//!
//! Decoding and reassembly are left to the receiving side.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod protocol;

pub use protocol::{
    CHUNKED_HEADER_SIZE, DEFAULT_CHUNK_THRESHOLD, Error, HEADER_SIZE, IdSource, MAGIC,
    MAX_CHUNK_COUNT, MessageHeader, MessageId, Mode, OsIdSource, Result, Writer, WriterConfig,
    WriterOptions,
};

/// SPTP wire format version implemented by this crate
pub const VERSION: &str = "1";
