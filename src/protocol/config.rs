//! Writer options and their normalized form

use std::num::NonZeroUsize;

use flate2::Compression;
use tracing::debug;

use super::{DEFAULT_CHUNK_THRESHOLD, Error, Result};

/// Highest accepted gzip level
pub const MAX_GZIP_LEVEL: u32 = 9;

/// Raw writer options as supplied by callers
///
/// Zero values mean "use the default": no compression and
/// [`DEFAULT_CHUNK_THRESHOLD`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WriterOptions {
    /// Gzip level, 0 for none, 1 (fastest) to 9 (best)
    pub gzip_level: u32,
    /// Largest payload sent unchunked, also the fragment size of chunked payloads
    pub chunk_threshold: usize,
}

impl WriterOptions {
    /// Clamp invalid values to safe defaults
    ///
    /// A zero threshold becomes [`DEFAULT_CHUNK_THRESHOLD`] and any gzip level
    /// outside `1..=9` disables compression. Never fails.
    #[must_use]
    pub fn normalize(self) -> WriterConfig {
        let chunk_threshold = NonZeroUsize::new(self.chunk_threshold).unwrap_or_else(|| {
            debug!(
                requested = self.chunk_threshold,
                default = DEFAULT_CHUNK_THRESHOLD.get(),
                "chunk threshold clamped to default"
            );
            DEFAULT_CHUNK_THRESHOLD
        });

        let gzip = gzip_level(self.gzip_level);
        if gzip.is_none() && self.gzip_level != 0 {
            debug!(requested = self.gzip_level, "gzip level out of range, compression disabled");
        }

        WriterConfig {
            gzip,
            chunk_threshold,
        }
    }

    /// Reject invalid values instead of clamping them
    ///
    /// A zero `gzip_level` still means "no compression" and a zero
    /// `chunk_threshold` still means "default"; only out-of-range levels fail.
    pub fn validate(self) -> Result<WriterConfig> {
        if self.gzip_level > MAX_GZIP_LEVEL {
            return Err(Error::InvalidConfig {
                field: "gzip_level",
                value: u64::from(self.gzip_level),
            });
        }
        Ok(self.normalize())
    }
}

/// Normalized, immutable writer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterConfig {
    gzip: Option<Compression>,
    chunk_threshold: NonZeroUsize,
}

impl WriterConfig {
    /// Build a configuration from already valid parts
    #[must_use]
    pub const fn new(gzip: Option<Compression>, chunk_threshold: NonZeroUsize) -> Self {
        Self {
            gzip,
            chunk_threshold,
        }
    }

    /// Gzip level, `None` when compression is off
    #[must_use]
    pub const fn gzip(&self) -> Option<Compression> {
        self.gzip
    }

    /// Chunk threshold in bytes
    #[must_use]
    pub const fn chunk_threshold(&self) -> NonZeroUsize {
        self.chunk_threshold
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        WriterOptions::default().normalize()
    }
}

impl From<WriterOptions> for WriterConfig {
    fn from(options: WriterOptions) -> Self {
        options.normalize()
    }
}

fn gzip_level(level: u32) -> Option<Compression> {
    (1..=MAX_GZIP_LEVEL)
        .contains(&level)
        .then(|| Compression::new(level))
}
