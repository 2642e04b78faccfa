//! The persisted dictionary-scan cursor.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Directory under the per-user config dir holding tool state.
const STATE_DIR_NAME: &str = "hashcard";
/// File name of the persisted cursor.
const CURSOR_FILE_NAME: &str = "cursor";

/// Persisted count of dictionary entries already materialized into a
/// deck, stored as a decimal string in a single state file.
///
/// The cursor is global to the state directory, not scoped to one deck
/// file: driving two decks from the same state directory corrupts each
/// other's resume position. Callers needing isolation pass a distinct
/// state directory per deck.
#[derive(Debug, Clone)]
pub struct CursorFile {
    path: PathBuf,
}

impl CursorFile {
    /// Cursor in the default per-user state directory.
    ///
    /// Resolves to `<config_dir>/hashcard/cursor`, e.g.
    /// `~/.config/hashcard/cursor` on Linux.
    pub fn default_location() -> Result<Self> {
        let dir = dirs::config_dir().ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "no user configuration directory",
            ))
        })?;
        Ok(Self::in_dir(&dir.join(STATE_DIR_NAME)))
    }

    /// Cursor stored under an explicit state directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(CURSOR_FILE_NAME),
        }
    }

    /// Path of the cursor file itself.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted cursor. A missing file reads as 0.
    pub fn load(&self) -> Result<u64> {
        match fs::read_to_string(&self.path) {
            Ok(text) => text.trim().parse::<u64>().map_err(|_| Error::InvalidCursor {
                value: text.trim().to_string(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the persisted cursor with `value`, creating the state
    /// directory if needed.
    pub fn store(&self, value: u64) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, value.to_string())?;
        debug!(cursor = value, path = %self.path.display(), "stored cursor");
        Ok(())
    }

    /// Increase the cursor by `delta`.
    pub fn advance(&self, delta: u64) -> Result<()> {
        let current = self.load()?;
        self.store(current.saturating_add(delta))
    }

    /// Decrease the cursor by `delta`, saturating at zero.
    pub fn retreat(&self, delta: u64) -> Result<()> {
        let current = self.load()?;
        self.store(current.saturating_sub(delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch() -> (tempfile::TempDir, CursorFile) {
        let dir = tempfile::tempdir().unwrap();
        let cursor = CursorFile::in_dir(dir.path());
        (dir, cursor)
    }

    #[test]
    fn missing_file_reads_as_zero() {
        let (_dir, cursor) = scratch();
        assert_eq!(cursor.load().unwrap(), 0);
    }

    #[test]
    fn store_then_load_round_trips() {
        let (_dir, cursor) = scratch();
        cursor.store(42).unwrap();
        assert_eq!(cursor.load().unwrap(), 42);
    }

    #[test]
    fn store_replaces_the_whole_file() {
        let (_dir, cursor) = scratch();
        cursor.store(1000).unwrap();
        cursor.store(7).unwrap();
        assert_eq!(fs::read_to_string(cursor.path()).unwrap(), "7");
    }

    #[test]
    fn advance_and_retreat() {
        let (_dir, cursor) = scratch();
        cursor.advance(5).unwrap();
        assert_eq!(cursor.load().unwrap(), 5);
        cursor.retreat(2).unwrap();
        assert_eq!(cursor.load().unwrap(), 3);
    }

    #[test]
    fn retreat_saturates_at_zero() {
        let (_dir, cursor) = scratch();
        cursor.store(1).unwrap();
        cursor.retreat(10).unwrap();
        assert_eq!(cursor.load().unwrap(), 0);
    }

    #[test]
    fn garbage_contents_are_rejected() {
        let (_dir, cursor) = scratch();
        fs::write(cursor.path(), "not a number").unwrap();
        assert!(matches!(
            cursor.load(),
            Err(Error::InvalidCursor { value }) if value == "not a number"
        ));
    }

    #[test]
    fn store_creates_missing_state_directory() {
        let dir = tempfile::tempdir().unwrap();
        let cursor = CursorFile::in_dir(&dir.path().join("nested/state"));
        cursor.store(3).unwrap();
        assert_eq!(cursor.load().unwrap(), 3);
    }
}
