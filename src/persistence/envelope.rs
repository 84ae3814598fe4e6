//! Versioned snapshot envelope
//!
//! ```text
//! { "version": 1, "digest": "<blake3 hex of payload>", "payload": "<state JSON>" }
//! ```
//!
//! The payload is checked against its digest before it is decoded, so a
//! truncated or altered save is rejected whole. The digest is unkeyed, so a
//! decoded state is also audited before it is handed out.

use serde::{Deserialize, Serialize};

use super::PersistError;
use crate::sim::Simulation;

/// Current envelope format
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveEnvelope {
    pub version: u32,
    pub digest: String,
    pub payload: String,
}

impl SaveEnvelope {
    pub fn seal(payload: String) -> Self {
        Self {
            version: SAVE_VERSION,
            digest: digest(&payload),
            payload,
        }
    }

    /// Check version and digest, returning the verified payload
    pub fn open(&self) -> Result<&str, PersistError> {
        if self.version != SAVE_VERSION {
            return Err(PersistError::UnsupportedVersion { found: self.version });
        }
        let found = digest(&self.payload);
        if found != self.digest {
            return Err(PersistError::Integrity {
                expected: self.digest.clone(),
                found,
            });
        }
        Ok(&self.payload)
    }
}

fn digest(payload: &str) -> String {
    blake3::hash(payload.as_bytes()).to_hex().to_string()
}

/// Encode a whole simulation state
pub fn serialize(sim: &Simulation) -> Result<Vec<u8>, PersistError> {
    let payload = serde_json::to_string(sim)?;
    Ok(serde_json::to_vec(&SaveEnvelope::seal(payload))?)
}

/// Decode a simulation state, verifying integrity first
pub fn deserialize(bytes: &[u8]) -> Result<Simulation, PersistError> {
    let envelope: SaveEnvelope = serde_json::from_slice(bytes)?;
    let payload = envelope.open()?;
    let mut sim: Simulation = serde_json::from_str(payload)?;
    sim.revalidate().map_err(PersistError::Inconsistent)?;
    Ok(sim)
}
