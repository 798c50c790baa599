//! SPTP mode flags and message identifiers

use std::fmt;

use super::MESSAGE_ID_SIZE;

/// Mode flags carried in the second byte of every message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Mode(u8);

impl Mode {
    /// Valid mode bits mask
    pub const VALID_MASK: u8 = Self::CHUNKED | Self::GZIPPED;
    /// Payload was split into a chunk set
    pub const CHUNKED: u8 = 1 << 0;
    /// Payload is gzip-compressed (whole payload, before chunking)
    pub const GZIPPED: u8 = 1 << 1;

    /// Create empty mode
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Create from byte
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        if value & !Self::VALID_MASK == 0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Convert to byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Set a flag
    #[must_use]
    pub const fn with(mut self, flag: u8) -> Self {
        debug_assert!(flag & !Self::VALID_MASK == 0, "invalid mode bit");
        self.0 |= flag;
        self
    }

    /// Check if flag is set
    #[must_use]
    pub const fn has(self, flag: u8) -> bool {
        (self.0 & flag) != 0
    }

    /// Check if chunked
    #[must_use]
    pub const fn is_chunked(self) -> bool {
        self.has(Self::CHUNKED)
    }

    /// Check if gzipped
    #[must_use]
    pub const fn is_gzipped(self) -> bool {
        self.has(Self::GZIPPED)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_chunked(), self.is_gzipped()) {
            (false, false) => write!(f, "NONE"),
            (true, false) => write!(f, "CHUNKED"),
            (false, true) => write!(f, "GZIPPED"),
            (true, true) => write!(f, "CHUNKED | GZIPPED"),
        }
    }
}

/// Random correlation token shared by every chunk of one payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MessageId([u8; MESSAGE_ID_SIZE]);

impl MessageId {
    /// Wrap raw id bytes
    #[must_use]
    pub const fn from_bytes(bytes: [u8; MESSAGE_ID_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw id bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; MESSAGE_ID_SIZE] {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
