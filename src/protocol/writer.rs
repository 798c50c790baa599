//! Payload encoder: optional gzip, then framing
//!
//! [`Writer`] is the entry point for callers. Each call to
//! [`Writer::write_payload`] (or [`std::io::Write::write`]) is one logical
//! payload, sent as a single message or as one chunk set.

use std::io::{self, Write};

use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::instrument;

use super::{Error, FrameEmitter, IdSource, Mode, OsIdSource, Result, WriterConfig, WriterOptions};

/// Compress a whole payload into one gzip member
pub fn compress(payload: &[u8], level: Compression) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(payload.len() / 2 + 32), level);
    encoder.write_all(payload).map_err(Error::Compression)?;
    encoder.finish().map_err(Error::Compression)
}

/// SPTP payload writer
#[derive(Debug)]
pub struct Writer<W, R = OsIdSource> {
    config: WriterConfig,
    emitter: FrameEmitter<W, R>,
}

impl<W: Write> Writer<W> {
    /// Create a writer with default options
    pub fn new(sink: W) -> Self {
        Self::with_options(sink, WriterOptions::default())
    }

    /// Create a writer, clamping invalid options to defaults
    pub fn with_options(sink: W, options: WriterOptions) -> Self {
        Self::with_id_source(sink, options.normalize(), OsIdSource)
    }

    /// Create a writer, rejecting invalid options
    pub fn try_with_options(sink: W, options: WriterOptions) -> Result<Self> {
        Ok(Self::with_id_source(sink, options.validate()?, OsIdSource))
    }
}

impl<W: Write, R: IdSource> Writer<W, R> {
    /// Create a writer drawing message IDs from `ids`
    pub fn with_id_source(sink: W, config: WriterConfig, ids: R) -> Self {
        Self {
            config,
            emitter: FrameEmitter::new(sink, ids, config.chunk_threshold()),
        }
    }

    /// Encode and send one payload
    ///
    /// Returns `payload.len()` on success, whatever the size on the wire.
    /// Compression errors leave the sink untouched.
    #[instrument(level = "trace", skip(self, payload), fields(len = payload.len()))]
    pub fn write_payload(&mut self, payload: &[u8]) -> Result<usize> {
        match self.config.gzip() {
            None => self.emitter.emit(Mode::new(), payload)?,
            Some(level) => {
                let compressed = compress(payload, level)?;
                self.emitter.emit(Mode::new().with(Mode::GZIPPED), &compressed)?;
            }
        }
        Ok(payload.len())
    }

    /// Get configuration
    #[must_use]
    pub const fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Get a reference to the sink
    pub fn get_ref(&self) -> &W {
        self.emitter.get_ref()
    }

    /// Get a mutable reference to the sink
    pub fn get_mut(&mut self) -> &mut W {
        self.emitter.get_mut()
    }

    /// Consume the writer, returning the sink
    pub fn into_inner(self) -> W {
        self.emitter.into_inner()
    }
}

impl<W: Write, R: IdSource> Write for Writer<W, R> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_payload(buf)?)
    }

    // The default `write_all` skips empty buffers; an empty payload is still a message.
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.write_payload(buf)?;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.emitter.get_mut().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{CHUNKED_HEADER_SIZE, DEFAULT_CHUNK_THRESHOLD, HEADER_SIZE, MAGIC};
    use flate2::read::GzDecoder;
    use std::io::Read;

    const SAMPLE: [u8; 9] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09];

    #[derive(Default)]
    struct Recorder {
        writes: Vec<Vec<u8>>,
        flushes: usize,
    }

    impl Write for Recorder {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes.push(buf.to_vec());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    fn gunzip(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        GzDecoder::new(data).read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_write_plain_chunked() {
        let options = WriterOptions {
            chunk_threshold: 4,
            ..WriterOptions::default()
        };
        let mut writer = Writer::with_options(Recorder::default(), options);

        assert_eq!(writer.write_payload(&SAMPLE).unwrap(), 9);

        let writes = writer.into_inner().writes;
        assert_eq!(writes.len(), 3);
        let id = &writes[0][2..10];
        for (i, write) in writes.iter().enumerate() {
            assert_eq!(write[0], MAGIC);
            assert_eq!(write[1], Mode::CHUNKED);
            assert_eq!(&write[2..10], id);
            assert_eq!(&write[10..12], &[3, u8::try_from(i).unwrap()]);
        }
        assert_eq!(&writes[0][CHUNKED_HEADER_SIZE..], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(&writes[1][CHUNKED_HEADER_SIZE..], &[0x05, 0x06, 0x07, 0x08]);
        assert_eq!(&writes[2][CHUNKED_HEADER_SIZE..], &[0x09]);
    }

    #[test]
    fn test_write_compressed_chunked() {
        let options = WriterOptions {
            gzip_level: 9,
            chunk_threshold: 4,
        };
        let mut writer = Writer::with_options(Recorder::default(), options);

        assert_eq!(writer.write_payload(&SAMPLE).unwrap(), 9);

        let mut joined = Vec::new();
        for write in writer.into_inner().writes {
            assert_eq!(write[0], MAGIC);
            assert_eq!(write[1], Mode::CHUNKED | Mode::GZIPPED);
            joined.extend_from_slice(&write[CHUNKED_HEADER_SIZE..]);
        }
        assert_eq!(gunzip(&joined), SAMPLE);
    }

    #[test]
    fn test_write_compressed_single() {
        let options = WriterOptions {
            gzip_level: 1,
            chunk_threshold: 1024,
        };
        let mut writer = Writer::with_options(Recorder::default(), options);
        writer.write_payload(b"hello hello hello hello").unwrap();

        let writes = writer.into_inner().writes;
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0][1], Mode::GZIPPED);
        assert_eq!(gunzip(&writes[0][HEADER_SIZE..]), b"hello hello hello hello");
    }

    #[test]
    fn test_invalid_options_fall_back() {
        let options = WriterOptions {
            gzip_level: 99,
            chunk_threshold: 0,
        };
        let mut writer = Writer::with_options(Recorder::default(), options);
        assert_eq!(writer.config().gzip(), None);
        assert_eq!(writer.config().chunk_threshold(), DEFAULT_CHUNK_THRESHOLD);

        let payload = vec![0x5a; DEFAULT_CHUNK_THRESHOLD.get()];
        writer.write_payload(&payload).unwrap();

        let writes = writer.into_inner().writes;
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0][1], 0);
        assert_eq!(&writes[0][HEADER_SIZE..], payload.as_slice());
    }

    #[test]
    fn test_try_with_options_rejects_level() {
        let options = WriterOptions {
            gzip_level: 99,
            chunk_threshold: 0,
        };
        let result = Writer::try_with_options(Recorder::default(), options);
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_io_write_adapter() {
        let options = WriterOptions {
            chunk_threshold: 4,
            ..WriterOptions::default()
        };
        let mut writer = Writer::with_options(Recorder::default(), options);

        writer.write_all(&SAMPLE).unwrap();
        writer.flush().unwrap();

        let sink = writer.into_inner();
        assert_eq!(sink.writes.len(), 3);
        assert_eq!(sink.flushes, 1);
    }

    #[test]
    fn test_io_write_all_empty_payload() {
        let mut writer = Writer::new(Recorder::default());

        writer.write_all(&[]).unwrap();

        assert_eq!(writer.into_inner().writes, vec![vec![MAGIC, 0]]);
    }

    #[test]
    fn test_io_write_all_empty_payload_gzipped() {
        let options = WriterOptions {
            gzip_level: 6,
            ..WriterOptions::default()
        };
        let mut writer = Writer::with_options(Recorder::default(), options);

        writer.write_all(&[]).unwrap();

        let writes = writer.into_inner().writes;
        assert_eq!(writes.len(), 1);
        assert_eq!(&writes[0][..HEADER_SIZE], &[MAGIC, Mode::GZIPPED]);
        assert!(gunzip(&writes[0][HEADER_SIZE..]).is_empty());
    }

    #[test]
    fn test_io_write_adapter_too_large() {
        let options = WriterOptions {
            chunk_threshold: 1,
            ..WriterOptions::default()
        };
        let mut writer = Writer::with_options(Recorder::default(), options);

        let err = writer.write(&[0u8; 256]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(writer.get_ref().writes.is_empty());
    }
}
