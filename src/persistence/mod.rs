//! Save/load of the economy record
//!
//! Features:
//! - Plain text record: `high_score,total_coins,kind,kind,...`
//! - Atomic replace (write tmp, fsync, rename over the save)
//! - Backup rotation (old save → `.bak` before it is replaced)
//! - Missing or malformed records load as a fresh economy

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::economy::EconomyState;
use crate::sim::CharacterKind;

/// Why a record could not be parsed. Never leaves this module as an error:
/// callers always get a usable state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("save record not found")]
    Missing,
    #[error("high score field is not a non-negative integer")]
    BadHighScore,
    #[error("coin field is not a non-negative integer")]
    BadCoins,
}

/// Failure writing the record to disk
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Parse a save record. Unknown character tokens are skipped; the default
/// kind is always present in the result.
pub fn parse_record(text: &str) -> Result<EconomyState, RecordError> {
    let mut fields = text.trim().split(',');

    let high_score = fields
        .next()
        .and_then(|f| f.trim().parse::<u64>().ok())
        .ok_or(RecordError::BadHighScore)?;
    let coins = fields
        .next()
        .and_then(|f| f.trim().parse::<u64>().ok())
        .ok_or(RecordError::BadCoins)?;

    let mut state = EconomyState {
        high_score,
        coins,
        ..EconomyState::default()
    };
    for token in fields.map(str::trim).filter(|t| !t.is_empty()) {
        match CharacterKind::from_str(token) {
            Some(kind) => {
                state.owned.insert(kind);
            }
            None => log::warn!("Ignoring unknown character '{}' in save record", token),
        }
    }

    Ok(state)
}

/// Serialize the complete state as one record line
pub fn format_record(state: &EconomyState) -> String {
    let mut record = format!("{},{}", state.high_score, state.coins);
    for kind in &state.owned {
        record.push(',');
        record.push_str(kind.as_str());
    }
    record
}

/// Path of the backup kept next to the save
pub fn backup_path(path: &Path) -> PathBuf {
    sibling(path, ".bak")
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

fn read_record(path: &Path) -> Result<EconomyState, RecordError> {
    let text = fs::read_to_string(path).map_err(|_| RecordError::Missing)?;
    parse_record(&text)
}

/// Load the record. A missing or malformed record gives a fresh economy;
/// the `.bak` copy is never read back.
pub fn load(path: &Path) -> EconomyState {
    match read_record(path) {
        Ok(state) => state,
        Err(RecordError::Missing) => {
            log::info!("No save at {}, starting with a fresh economy", path.display());
            EconomyState::default()
        }
        Err(e) => {
            log::warn!("Save at {} is unreadable, starting fresh: {}", path.display(), e);
            EconomyState::default()
        }
    }
}

/// Replace the save with the complete given state.
///
/// The new record is fully written and synced to a temporary file before it
/// is renamed over the old one, so an interrupted save leaves either the old
/// record or the new one, never a torn write.
pub fn save(path: &Path, state: &EconomyState) -> Result<(), PersistError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = sibling(path, ".tmp");
    {
        let mut file = File::create(&tmp)?;
        file.write_all(format_record(state).as_bytes())?;
        file.sync_all()?;
    }

    if path.exists() {
        if let Err(e) = fs::copy(path, backup_path(path)) {
            log::warn!("Could not back up {}: {}", path.display(), e);
        }
    }

    fs::rename(&tmp, path)?;
    log::debug!("Saved economy to {}", path.display());
    Ok(())
}
