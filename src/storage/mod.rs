//! Storage layer for the wallet ledger
//!
//! Atomic file writes, export/import path resolution, the binary snapshot
//! codec and the persisted owner registry.

pub mod file_io;
pub mod registry;
pub mod resolve;
pub mod snapshot;

pub use file_io::{read_json_required, write_atomic, write_json_atomic};
pub use registry::{Registry, RegistryStore};
pub use resolve::{resolve_export_path, resolve_import_path};
pub use snapshot::SnapshotKind;
