//! Frame emitter: splits a (possibly compressed) payload into wire messages

use std::io::Write;
use std::num::NonZeroUsize;

use bytes::{BufMut, BytesMut};
use tracing::{debug, trace};

use super::{Error, IdSource, MAX_CHUNK_COUNT, MessageHeader, Mode, Result};

/// Number of chunks needed for `len` bytes at `threshold` bytes per chunk
#[must_use]
pub const fn chunk_count(len: usize, threshold: NonZeroUsize) -> usize {
    len.div_ceil(threshold.get())
}

/// Writes framed messages to a sink
///
/// Payloads up to the threshold go out as one message. Larger payloads are
/// split into at most [`MAX_CHUNK_COUNT`] chunks sharing one message ID,
/// each written with a single `write_all` in ascending index order.
#[derive(Debug)]
pub struct FrameEmitter<W, R> {
    sink: W,
    ids: R,
    threshold: NonZeroUsize,
}

impl<W: Write, R: IdSource> FrameEmitter<W, R> {
    /// Create an emitter over `sink`
    pub fn new(sink: W, ids: R, threshold: NonZeroUsize) -> Self {
        Self {
            sink,
            ids,
            threshold,
        }
    }

    /// Chunk threshold in bytes
    #[must_use]
    pub const fn threshold(&self) -> NonZeroUsize {
        self.threshold
    }

    /// Frame `payload` with `mode` and write it out
    ///
    /// The chunk count and the message ID are settled before the first
    /// write, so `PayloadTooLarge` and ID failures leave the sink untouched.
    /// A sink failure part way through a chunk set leaves the earlier chunks
    /// written.
    pub fn emit(&mut self, mode: Mode, payload: &[u8]) -> Result<()> {
        let threshold = self.threshold.get();
        if payload.len() <= threshold {
            let header = MessageHeader::single(mode);
            return self.write_message(&header, payload);
        }

        let count = chunk_count(payload.len(), self.threshold);
        if count > MAX_CHUNK_COUNT {
            return Err(Error::PayloadTooLarge {
                size: payload.len(),
                threshold,
                chunks: count,
            });
        }
        let count_byte = u8::try_from(count).unwrap_or(u8::MAX);

        let message_id = self.ids.next_id().map_err(Error::Randomness)?;
        debug!(%message_id, chunks = count, size = payload.len(), "emitting chunked payload");

        let mut header = MessageHeader::chunked(mode, message_id, count_byte, 0);
        for (index, fragment) in (0..count_byte).zip(payload.chunks(threshold)) {
            header.set_index(index);
            self.write_message(&header, fragment)?;
        }

        Ok(())
    }

    fn write_message(&mut self, header: &MessageHeader, fragment: &[u8]) -> Result<()> {
        let header_len = header.encoded_len();
        let mut message = BytesMut::with_capacity(header_len + fragment.len());
        message.put_slice(&header.to_bytes()[..header_len]);
        message.put_slice(fragment);

        self.sink.write_all(&message)?;
        trace!(mode = %header.mode(), len = message.len(), "message written");
        Ok(())
    }

    /// Get a reference to the sink
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Get a mutable reference to the sink
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Consume the emitter, returning the sink
    pub fn into_inner(self) -> W {
        self.sink
    }
}
