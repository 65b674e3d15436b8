use crate::error::{LoggerError, Result};
use crate::logs::file::{rotated_path, ActiveFile};
use crate::logs::writer::FileSlot;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Size-triggered rotation of the shared active file
///
/// The unlocked size check lets plain writes run side by side; only a
/// rotation takes the slot exclusively, and it re-checks the size once it
/// holds the lock so a single excursion past the threshold rotates once.
#[derive(Debug)]
pub struct Rotator {
    slot: FileSlot,
    directory: PathBuf,
    prefix: String,
    max_size: AtomicU64,
    sequence: AtomicU64,
}

impl Rotator {
    pub fn new(slot: FileSlot, directory: PathBuf, prefix: String, max_size: u64) -> Self {
        Self {
            slot,
            directory,
            prefix,
            max_size: AtomicU64::new(max_size),
            sequence: AtomicU64::new(0),
        }
    }

    /// Rotation threshold in bytes
    pub fn max_size(&self) -> u64 {
        self.max_size.load(Ordering::Acquire)
    }

    pub fn set_max_size(&self, bytes: u64) {
        self.max_size.store(bytes, Ordering::Release);
    }

    /// Number of rotations performed so far; also the suffix of the newest rotated file
    pub fn sequence(&self) -> u64 {
        self.sequence.load(Ordering::Acquire)
    }

    /// Slot shared with every line writer
    pub fn slot(&self) -> &FileSlot {
        &self.slot
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Rotate if the active file is strictly larger than the threshold
    ///
    /// Returns whether this call performed the rotation.
    pub fn check_and_rotate(&self) -> Result<bool> {
        if !self.over_threshold()? {
            return Ok(false);
        }

        let mut slot = self
            .slot
            .write()
            .map_err(|_| LoggerError::LogRotationError("Log file slot poisoned".to_string()))?;

        // Another caller may have rotated while we waited for the lock
        let active = match slot.take() {
            Some(active) if active.size() > self.max_size() => active,
            Some(active) => {
                *slot = Some(active);
                return Ok(false);
            }
            None => return Err(LoggerError::Closed),
        };

        // On failure the slot stays empty, later writes see Closed
        match self.rotate(active) {
            Ok(fresh) => {
                *slot = Some(fresh);
                Ok(true)
            }
            Err(e) => {
                tracing::error!("Log rotation failed, logger disabled: {}", e);
                Err(e)
            }
        }
    }

    fn over_threshold(&self) -> Result<bool> {
        let slot = self
            .slot
            .read()
            .map_err(|_| LoggerError::LogRotationError("Log file slot poisoned".to_string()))?;

        match slot.as_ref() {
            Some(active) => Ok(active.size() > self.max_size()),
            None => Err(LoggerError::Closed),
        }
    }

    /// Close `old`, rename it with the next sequence number, open a fresh file for today
    fn rotate(&self, old: ActiveFile) -> Result<ActiveFile> {
        let old_path = old.path().to_path_buf();
        let old_size = old.size();
        old.close()?;

        let sequence = self.sequence.fetch_add(1, Ordering::AcqRel) + 1;
        let rotated = rotated_path(&old_path, sequence)?;

        if rotated.exists() {
            tracing::warn!(
                path = %rotated.display(),
                sequence,
                "Rotated log file already exists and will be replaced"
            );
        }

        std::fs::rename(&old_path, &rotated).map_err(|e| {
            LoggerError::LogRotationError(format!(
                "Failed to rename {} to {}: {}",
                old_path.display(),
                rotated.display(),
                e
            ))
        })?;

        let fresh = ActiveFile::open_for_today(&self.directory, &self.prefix).map_err(|e| {
            LoggerError::LogRotationError(format!("Failed to open replacement log file: {}", e))
        })?;

        tracing::info!(
            rotated = %rotated.display(),
            active = %fresh.path().display(),
            size = old_size,
            sequence,
            "Rotated log file"
        );

        Ok(fresh)
    }
}
