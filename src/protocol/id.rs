//! Message ID generation

use std::io;

use rand::RngCore;
use rand::rngs::OsRng;

use super::{MESSAGE_ID_SIZE, MessageId};

/// Source of chunk-set correlation IDs
///
/// Receivers group chunks by this ID alone, so production sources must be
/// unpredictable. Tests can plug in a deterministic source.
pub trait IdSource {
    /// Produce the next message ID
    fn next_id(&mut self) -> io::Result<MessageId>;
}

/// IDs drawn from the operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsIdSource;

impl IdSource for OsIdSource {
    fn next_id(&mut self) -> io::Result<MessageId> {
        let mut bytes = [0u8; MESSAGE_ID_SIZE];
        OsRng.try_fill_bytes(&mut bytes).map_err(io::Error::other)?;
        Ok(MessageId::from_bytes(bytes))
    }
}

impl<S: IdSource + ?Sized> IdSource for &mut S {
    fn next_id(&mut self) -> io::Result<MessageId> {
        (**self).next_id()
    }
}
