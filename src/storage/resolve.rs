//! Export and import file-name resolution
//!
//! Export: append the format extension if missing; a bare file name lands in
//! the export directory, created on demand.
//!
//! Import: the literal name, then name plus extension, then the export
//! directory with name plus extension. First existing file wins.

use std::path::{Path, PathBuf};

use crate::error::{WalletError, WalletResult};

fn with_extension(name: &str, extension: &str) -> String {
    let suffix = format!(".{}", extension);
    if name.to_lowercase().ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{}{}", name, suffix)
    }
}

fn is_bare(name: &str) -> bool {
    Path::new(name)
        .parent()
        .map_or(true, |parent| parent.as_os_str().is_empty())
}

/// Where an export named `name` is written
///
/// Fails with `InvalidArgument` for an empty name.
pub fn resolve_export_path(name: &str, extension: &str, exports_dir: &Path) -> WalletResult<PathBuf> {
    let name = name.trim();
    if name.is_empty() {
        return Err(WalletError::InvalidArgument(
            "File name cannot be empty".into(),
        ));
    }

    let file_name = with_extension(name, extension);
    let path = if is_bare(name) {
        exports_dir.join(file_name)
    } else {
        PathBuf::from(file_name)
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            WalletError::Export(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    Ok(path)
}

/// The existing file an import named `name` reads from
pub fn resolve_import_path(name: &str, extension: &str, exports_dir: &Path) -> WalletResult<PathBuf> {
    let name = name.trim();
    let file_name = with_extension(name, extension);

    let candidates = [
        PathBuf::from(name),
        PathBuf::from(&file_name),
        exports_dir.join(&file_name),
    ];

    candidates
        .into_iter()
        .find(|candidate| !name.is_empty() && candidate.is_file())
        .ok_or_else(|| WalletError::FileNotFound(name.to_string()))
}
