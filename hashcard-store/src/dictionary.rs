//! Read-only scans of the frequency-ordered dictionary file.
//!
//! The dictionary is one `key<TAB>body` entry per line; line order is
//! the frequency ranking. Lines without a tab are skipped, never
//! errors.

use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::lines::LineStream;
use crate::store::DeckStore;

/// One dictionary line split into its key and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictEntry {
    /// The word being defined.
    pub key: String,
    /// Its definitions, possibly with embedded numbering and
    /// tab-separated sub-fields.
    pub body: String,
}

impl DictEntry {
    /// Split a raw dictionary line on its first tab; the line's
    /// trailing newline artifact is dropped from the body. Returns
    /// `None` for lines without a tab.
    fn parse(line: &str) -> Option<Self> {
        let (key, body) = line.split_once('\t')?;
        let body = body.strip_suffix('\n').unwrap_or(body);
        Some(Self {
            key: key.to_string(),
            body: body.to_string(),
        })
    }
}

/// The frequency-ordered reference file entries are drawn from.
pub struct Dictionary {
    path: PathBuf,
}

impl Dictionary {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the dictionary file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The first entry whose key equals `word`.
    pub fn lookup_exact(&self, word: &str) -> Result<DictEntry> {
        let Some(map) = self.map()? else {
            return Err(Error::WordNotFound {
                word: word.to_string(),
            });
        };
        for line in LineStream::new(&map, |_| true) {
            let Some(entry) = DictEntry::parse(line?) else {
                continue;
            };
            if entry.key == word {
                return Ok(entry);
            }
        }
        Err(Error::WordNotFound {
            word: word.to_string(),
        })
    }

    /// The next `count` entries, in frequency order, whose keys have
    /// no record in `deck`, starting after the first `cursor` such
    /// entries.
    ///
    /// Every candidate line probes the deck through
    /// [`DeckStore::contains_key`], remapping it per probe, so the
    /// worst case is O(dictionary size × deck size). Fails with
    /// [`Error::InsufficientEntries`] when the filtered stream runs
    /// out before `cursor + count` entries.
    pub fn lookup_next_unseen(&self, count: usize, deck: &DeckStore) -> Result<Vec<DictEntry>> {
        let cursor = deck.cursor().load()?;
        let required = cursor + count as u64;
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut unseen = 0u64;
        let mut entries = Vec::with_capacity(count);
        let Some(map) = self.map()? else {
            return Err(Error::InsufficientEntries {
                required,
                available: 0,
            });
        };
        for line in LineStream::new(&map, |_| true) {
            let Some(entry) = DictEntry::parse(line?) else {
                continue;
            };
            if deck.contains_key(&entry.key)? {
                continue;
            }
            unseen += 1;
            if unseen <= cursor {
                continue;
            }
            entries.push(entry);
            if entries.len() == count {
                debug!(count, cursor, "resolved next unseen entries");
                return Ok(entries);
            }
        }
        Err(Error::InsufficientEntries {
            required,
            available: unseen,
        })
    }

    /// Map the dictionary read-only for one scan. `Ok(None)` for an
    /// empty file, which cannot be mapped.
    fn map(&self) -> Result<Option<Mmap>> {
        let file = File::open(&self.path)?;
        if file.metadata()?.len() == 0 {
            return Ok(None);
        }
        // Safety contract of Mmap::map: the dictionary is a read-only
        // reference file not mutated during an invocation.
        #[allow(unsafe_code)]
        let map = unsafe { Mmap::map(&file) }?;
        Ok(Some(map))
    }
}
