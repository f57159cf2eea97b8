//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{WalletError, WalletResult};

/// Write a file atomically (write to temp, then rename)
///
/// `write` receives a buffered writer over a temp file next to `path`. The
/// target is either completely replaced or left untouched.
pub fn write_atomic<P, F>(path: P, write: F) -> WalletResult<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> WalletResult<()>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            WalletError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory, so the rename stays on one filesystem
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = std::path::PathBuf::from(temp_name);

    let result = (|| {
        let file = File::create(&temp_path)
            .map_err(|e| WalletError::Storage(format!("Failed to create temp file: {}", e)))?;

        let mut writer = BufWriter::new(file);
        write(&mut writer)?;

        writer
            .flush()
            .map_err(|e| WalletError::Storage(format!("Failed to flush data: {}", e)))?;

        writer
            .get_ref()
            .sync_all()
            .map_err(|e| WalletError::Storage(format!("Failed to sync data: {}", e)))?;

        fs::rename(&temp_path, path)
            .map_err(|e| WalletError::Storage(format!("Failed to rename temp file: {}", e)))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Write pretty-printed JSON atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> WalletResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic(path, |writer| {
        serde_json::to_writer_pretty(writer, data)
            .map_err(|e| WalletError::Storage(format!("Failed to serialize data: {}", e)))
    })
}

/// Read JSON from a file, failing with `FileNotFound` if it doesn't exist
pub fn read_json_required<T, P>(path: P) -> WalletResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(WalletError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path)
        .map_err(|e| WalletError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        WalletError::ImportParseError(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Read a whole file into memory
pub fn read_bytes<P: AsRef<Path>>(path: P) -> WalletResult<Vec<u8>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(WalletError::FileNotFound(path.display().to_string()));
    }
    fs::read(path)
        .map_err(|e| WalletError::Storage(format!("Failed to read {}: {}", path.display(), e)))
}
