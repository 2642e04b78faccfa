//! # hashcard-store
//!
//! Record-store engine for flat-file flashcard decks. A deck is a
//! sequence of self-delimited text records built from a
//! frequency-ordered `key<TAB>body` dictionary file, plus a persisted
//! cursor marking how far down the frequency ranking the deck has
//! consumed.
//!
//! Deck files are edited in place: appends extend the file, deletions
//! shift the trailing bytes left and truncate. Untouched records keep
//! their exact byte layout across every mutation.

pub mod cursor;
pub mod dictionary;
pub mod error;
pub mod lines;
pub mod record;
pub mod store;

pub use cursor::CursorFile;
pub use dictionary::{DictEntry, Dictionary};
pub use error::{Error, Result};
pub use record::RecordMatcher;
pub use store::DeckStore;
