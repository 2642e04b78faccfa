//! The mutable deck file: append, delete-by-key, delete-last-N.
//!
//! This is the only module that writes to a deck. Reads go through a
//! short-lived read-only memory map, released before the operation
//! returns. Compaction works on an owned copy of the deck bytes with
//! `copy_within` + `truncate`, then replaces the file in a single
//! rename, so a failed mutation leaves the deck byte-identical to its
//! pre-call state.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use tempfile::NamedTempFile;
use tracing::{debug, trace};

use crate::cursor::CursorFile;
use crate::dictionary::DictEntry;
use crate::error::{Error, Result};
use crate::record::{self, RecordMatcher};

/// A deck file plus the cursor tracking how many dictionary entries
/// it has consumed.
///
/// The deck and cursor are single-writer resources: exactly one
/// invocation of the tool may run against a given deck at a time. No
/// file locking is performed.
pub struct DeckStore {
    path: PathBuf,
    cursor: CursorFile,
}

impl DeckStore {
    pub fn new(path: impl Into<PathBuf>, cursor: CursorFile) -> Self {
        Self {
            path: path.into(),
            cursor,
        }
    }

    /// Path of the deck file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The cursor persisted alongside this store.
    pub fn cursor(&self) -> &CursorFile {
        &self.cursor
    }

    /// Append one record per entry, in iteration order, then advance
    /// the cursor by the number of entries written.
    ///
    /// Appends never read existing deck content; the file is created
    /// if missing.
    pub fn append(&self, entries: &[DictEntry]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        for entry in entries {
            let body = record::reshape_body(&entry.body)?;
            file.write_all(record::render_record(&entry.key, &body).as_bytes())?;
            trace!(key = %entry.key, "appended record");
        }
        file.flush()?;
        self.cursor.advance(entries.len() as u64)?;
        debug!(count = entries.len(), deck = %self.path.display(), "appended entries");
        Ok(())
    }

    /// Remove every record for `key` and decrement the cursor by the
    /// number removed. Returns that number.
    ///
    /// The deck is re-searched after each removal, so the spans of
    /// later duplicates are computed against the already-shifted
    /// bytes and never go stale. Fails with [`Error::KeyNotFound`]
    /// when no complete record for `key` exists; a record start whose
    /// terminator is missing counts as not found, not as corruption.
    pub fn delete_by_key(&self, key: &str) -> Result<usize> {
        let matcher = RecordMatcher::for_key(key)?;
        let mut buf = match self.map_deck()? {
            Some(map) => map.to_vec(),
            None => {
                return Err(Error::KeyNotFound {
                    key: key.to_string(),
                });
            }
        };

        let mut removed = 0usize;
        while let Some(span) = matcher.find_first(&buf) {
            trace!(key, start = span.start, end = span.end, "removing record span");
            remove_span(&mut buf, span);
            removed += 1;
        }
        if removed == 0 {
            return Err(Error::KeyNotFound {
                key: key.to_string(),
            });
        }

        self.replace_contents(&buf)?;
        self.cursor.retreat(removed as u64)?;
        debug!(key, removed, deck = %self.path.display(), "deleted records by key");
        Ok(removed)
    }

    /// Drop the `n` most recently appended records by truncating the
    /// deck, then decrement the cursor by `n` (saturating at zero,
    /// even when fewer than `n` records existed).
    ///
    /// `n == 0` is a no-op on both the file and the cursor. When `n`
    /// covers every record the file is truncated to zero length. The
    /// surviving earliest-appended records are byte-identical.
    pub fn delete_last_n(&self, n: usize) -> Result<()> {
        if n == 0 {
            return Ok(());
        }

        let new_len = match self.map_deck()? {
            Some(map) => {
                let starts = record::record_starts(&map)?;
                if starts.len() <= n {
                    0
                } else {
                    starts[starts.len() - n] as u64
                }
            }
            None => 0,
        };

        let file = OpenOptions::new().write(true).open(&self.path)?;
        file.set_len(new_len)?;
        file.sync_all()?;
        self.cursor.retreat(n as u64)?;
        debug!(n, new_len, deck = %self.path.display(), "truncated deck");
        Ok(())
    }

    /// True if the deck currently holds a complete record for `key`.
    ///
    /// Remaps the deck on every call. The dictionary scan probes this
    /// once per candidate line, which is O(dictionary size × deck
    /// size) in the worst case; both files are small relative to
    /// memory, so the remap cost is accepted. A missing or empty deck
    /// contains nothing.
    pub fn contains_key(&self, key: &str) -> Result<bool> {
        let matcher = RecordMatcher::for_key(key)?;
        match self.map_deck() {
            Ok(Some(map)) => Ok(matcher.find_first(&map).is_some()),
            Ok(None) => Ok(false),
            Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Map the deck read-only for the duration of one operation.
    ///
    /// Returns `Ok(None)` for an empty deck, which cannot be mapped.
    /// The map must be dropped before the deck is mutated.
    fn map_deck(&self) -> Result<Option<Mmap>> {
        let file = File::open(&self.path)?;
        if file.metadata()?.len() == 0 {
            return Ok(None);
        }
        // Safety contract of Mmap::map: the deck is single-writer and
        // no other process mutates it during an invocation.
        #[allow(unsafe_code)]
        let map = unsafe { Mmap::map(&file) }?;
        Ok(Some(map))
    }

    /// All-or-nothing rewrite: new contents land in a temporary file
    /// next to the deck and replace it in a single rename.
    fn replace_contents(&self, contents: &[u8]) -> Result<()> {
        let dir = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut tmp = NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))?;
        tmp.write_all(contents)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

/// Remove `span` from `buf` by shifting the tail left over it and
/// truncating. The shift tolerates overlapping source and destination
/// ranges.
fn remove_span(buf: &mut Vec<u8>, span: Range<usize>) {
    let width = span.end - span.start;
    buf.copy_within(span.end.., span.start);
    buf.truncate(buf.len() - width);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_span_shifts_the_tail_left() {
        let mut buf = b"aaaBBBccc".to_vec();
        remove_span(&mut buf, 3..6);
        assert_eq!(buf, b"aaaccc");
    }

    #[test]
    fn remove_span_at_the_end_just_truncates() {
        let mut buf = b"aaaBBB".to_vec();
        remove_span(&mut buf, 3..6);
        assert_eq!(buf, b"aaa");
    }

    #[test]
    fn remove_span_covering_everything_empties_the_buffer() {
        let mut buf = b"BBB".to_vec();
        remove_span(&mut buf, 0..3);
        assert!(buf.is_empty());
    }
}
