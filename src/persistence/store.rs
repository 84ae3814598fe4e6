//! On-disk save slot
//!
//! A save is written to `<name>.tmp`, the previous save is rotated to
//! `<name>.bak`, then the tmp file is renamed over `<name>.json`. Loads take
//! the read side of a lock and saves the write side, so a load never sees a
//! half-written slot and two saves never interleave.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::PersistError;
use super::envelope::{deserialize, serialize};
use crate::sim::Simulation;

pub struct SaveStore {
    save: PathBuf,
    backup: PathBuf,
    tmp: PathBuf,
    lock: RwLock<()>,
}

impl SaveStore {
    pub fn new(dir: impl AsRef<Path>, name: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            save: dir.join(format!("{name}.json")),
            backup: dir.join(format!("{name}.bak")),
            tmp: dir.join(format!("{name}.tmp")),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.save
    }

    pub fn exists(&self) -> bool {
        self.save.exists() || self.backup.exists()
    }

    /// Write a snapshot, keeping the previous one as backup
    pub fn save(&self, sim: &Simulation) -> Result<(), PersistError> {
        let bytes = serialize(sim)?;
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());

        fs::write(&self.tmp, &bytes)?;
        if self.save.exists() {
            fs::rename(&self.save, &self.backup)?;
        }
        fs::rename(&self.tmp, &self.save)?;
        log::info!("Game saved (tick {}, {} bytes)", sim.time_ticks, bytes.len());
        Ok(())
    }

    /// Load the newest intact snapshot, falling back to the backup
    pub fn load(&self) -> Result<Simulation, PersistError> {
        let _guard = self.lock.read().unwrap_or_else(|e| e.into_inner());

        let primary = read_slot(&self.save);
        let err = match primary {
            Ok(sim) => {
                log::info!("Loaded save at tick {}", sim.time_ticks);
                return Ok(sim);
            }
            Err(e) => e,
        };
        log::warn!("Save {} unusable ({}), trying backup", self.save.display(), err);

        match read_slot(&self.backup) {
            Ok(sim) => {
                log::info!("Loaded backup at tick {}", sim.time_ticks);
                Ok(sim)
            }
            Err(PersistError::Io(e)) if e.kind() == ErrorKind::NotFound => Err(err),
            Err(backup_err) => {
                log::warn!("Backup unusable too ({})", backup_err);
                Err(err)
            }
        }
    }

    /// Remove every file of this slot
    pub fn clear(&self) -> Result<(), PersistError> {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        for path in [&self.save, &self.backup, &self.tmp] {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        log::info!("Saved game cleared");
        Ok(())
    }
}

fn read_slot(path: &Path) -> Result<Simulation, PersistError> {
    let bytes = fs::read(path)?;
    deserialize(&bytes)
}
