//! Native binary snapshot codec
//!
//! A bincode envelope carrying a magic tag, a format version and a payload
//! kind ahead of the payload. Used for whole-ledger exports and for the
//! persisted owner registry. The layout is private to this crate.

use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use super::file_io::{read_bytes, write_atomic};
use crate::error::{WalletError, WalletResult};

const MAGIC: [u8; 4] = *b"WLT1";
const FORMAT_VERSION: u32 = 1;

/// What a snapshot file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotKind {
    Ledger,
    Registry,
}

impl SnapshotKind {
    fn tag(self) -> u8 {
        match self {
            Self::Ledger => 1,
            Self::Registry => 2,
        }
    }

    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::Ledger),
            2 => Some(Self::Registry),
            _ => None,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::Ledger => "a ledger",
            Self::Registry => "a user registry",
        }
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    magic: [u8; 4],
    version: u32,
    kind: u8,
    payload: &'a T,
}

#[derive(Deserialize)]
struct Header {
    magic: [u8; 4],
    version: u32,
    kind: u8,
}

#[derive(Deserialize)]
struct Envelope<T> {
    #[allow(dead_code)]
    header: Header,
    payload: T,
}

/// Encode a value into snapshot bytes
pub fn encode<T: Serialize>(kind: SnapshotKind, value: &T) -> WalletResult<Vec<u8>> {
    bincode::serialize(&EnvelopeRef {
        magic: MAGIC,
        version: FORMAT_VERSION,
        kind: kind.tag(),
        payload: value,
    })
    .map_err(|e| WalletError::Storage(format!("Failed to encode snapshot: {}", e)))
}

/// Decode snapshot bytes, checking the envelope first
///
/// Anything that is not a snapshot of the expected version and kind fails
/// with `ImportParseError`.
pub fn decode<T: DeserializeOwned>(kind: SnapshotKind, bytes: &[u8]) -> WalletResult<T> {
    let header: Header = bincode::deserialize(bytes)
        .map_err(|_| WalletError::ImportParseError("not a wallet snapshot".into()))?;

    if header.magic != MAGIC {
        return Err(WalletError::ImportParseError(
            "not a wallet snapshot".into(),
        ));
    }
    if header.version != FORMAT_VERSION {
        return Err(WalletError::ImportParseError(format!(
            "unsupported snapshot version {}",
            header.version
        )));
    }
    match SnapshotKind::from_tag(header.kind) {
        Some(found) if found == kind => {}
        Some(found) => {
            return Err(WalletError::ImportParseError(format!(
                "file holds {}, not {}",
                found.describe(),
                kind.describe()
            )));
        }
        None => {
            return Err(WalletError::ImportParseError(format!(
                "unknown snapshot kind {}",
                header.kind
            )));
        }
    }

    let envelope: Envelope<T> = bincode::deserialize(bytes)
        .map_err(|e| WalletError::ImportParseError(format!("corrupt snapshot: {}", e)))?;
    Ok(envelope.payload)
}

/// Write a snapshot file atomically
pub fn save<T: Serialize, P: AsRef<Path>>(
    path: P,
    kind: SnapshotKind,
    value: &T,
) -> WalletResult<()> {
    let path = path.as_ref();
    let bytes = encode(kind, value)?;
    write_atomic(path, |writer| {
        std::io::Write::write_all(writer, &bytes)?;
        Ok(())
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "snapshot written");
    Ok(())
}

pub fn load<T: DeserializeOwned, P: AsRef<Path>>(path: P, kind: SnapshotKind) -> WalletResult<T> {
    decode(kind, &read_bytes(path)?)
}
