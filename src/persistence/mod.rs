//! Save/load persistence with integrity verification
//!
//! Features:
//! - Versioned JSON envelope
//! - BLAKE3 integrity digest
//! - Backup rotation (tmp → save, old save → backup)
//! - Corruption detection and recovery

pub mod envelope;
pub mod store;

pub use envelope::{SAVE_VERSION, SaveEnvelope, deserialize, serialize};
pub use store::SaveStore;

/// Why a save or load failed
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed save data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unsupported save version {found}")]
    UnsupportedVersion { found: u32 },
    #[error("save digest mismatch (expected {expected}, found {found})")]
    Integrity { expected: String, found: String },
    #[error("inconsistent save state: {0}")]
    Inconsistent(String),
}
