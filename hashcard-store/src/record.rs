//! Deck record format: rendering, body reshaping, and structural
//! matching.
//!
//! A record is a self-delimited block:
//!
//! ```text
//! C:||key||
//! ||body||
//!
//! ---
//!
//! ```
//!
//! The `C:` prefix starts a record at a line boundary, the key and
//! body are wrapped in cloze markers, and `\n\n---\n\n` terminates the
//! block. A deck file is exactly a concatenation of such blocks.

use std::ops::Range;

use regex::bytes;

use crate::error::Result;

/// Marks the start of a record line.
pub const RECORD_PREFIX: &str = "C:";
/// Cloze marker wrapped around the key and the body.
pub const CLOZE_MARK: &str = "||";
/// Separator closing every record.
pub const RECORD_TERMINATOR: &str = "\n\n---\n\n";

/// Locates the byte span of a key's record inside a deck buffer.
pub struct RecordMatcher {
    re: bytes::Regex,
}

impl RecordMatcher {
    /// Compile the structural pattern for `key`.
    ///
    /// The key is escaped before insertion, so keys containing cloze
    /// markers or regex metacharacters cannot widen or break the
    /// match. The pattern is anchored at a line boundary and scans
    /// non-greedily to the first terminator.
    pub fn for_key(key: &str) -> Result<Self> {
        let pattern = format!(r"(?ms)^C:\|\|{}\|\|.*?\n\n---\n\n", regex::escape(key));
        Ok(Self {
            re: bytes::Regex::new(&pattern)?,
        })
    }

    /// Byte span of the first complete record for this key.
    ///
    /// A record start whose terminator is missing (truncated file)
    /// does not match at all; there is no partial span.
    pub fn find_first(&self, buf: &[u8]) -> Option<Range<usize>> {
        self.re.find(buf).map(|m| m.range())
    }
}

/// Start offsets of every complete record in `buf`, in file order.
///
/// Records are contiguous and non-overlapping, so the starts of the
/// non-overlapping matches of the full record pattern enumerate every
/// record without needing a per-record terminator search by key.
pub fn record_starts(buf: &[u8]) -> Result<Vec<usize>> {
    let re = bytes::Regex::new(r"(?ms)^C:.*?\n\n---\n\n")?;
    Ok(re.find_iter(buf).map(|m| m.start()).collect())
}

/// Reshape a dictionary body for display as a record.
///
/// Each embedded `N. ` sense number gets its own line, remaining tab
/// separators become newlines.
pub fn reshape_body(body: &str) -> Result<String> {
    let senses = regex::Regex::new(r" (\d+\. )")?;
    let spaced = senses.replace_all(body, "\n$1");
    Ok(spaced.replace('\t', "\n"))
}

/// Render one complete record for `key` with an already-reshaped
/// `body`.
pub fn render_record(key: &str, body: &str) -> String {
    format!("{RECORD_PREFIX}{CLOZE_MARK}{key}{CLOZE_MARK}\n{CLOZE_MARK}{body}{CLOZE_MARK}{RECORD_TERMINATOR}")
}
