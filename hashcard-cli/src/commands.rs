//! Deck commands and the count-vs-word dispatch.
//!
//! The `--remove` and `--entries` flag values are tried as integer
//! counts first; anything that does not parse is treated as a literal
//! word.

use std::path::Path;

use anyhow::Context;
use tracing::info;

use hashcard_store::{CursorFile, DeckStore, DictEntry, Dictionary};

/// Open the deck with its cursor under `state_dir`, or the per-user
/// default state directory when none is given.
pub fn open_store(deck: &Path, state_dir: Option<&Path>) -> anyhow::Result<DeckStore> {
    let cursor = match state_dir {
        Some(dir) => CursorFile::in_dir(dir),
        None => CursorFile::default_location()?,
    };
    Ok(DeckStore::new(deck, cursor))
}

/// Remove deck content named by `value`: an integer drops that many of
/// the most recently appended records, anything else is a key.
pub fn remove(store: &DeckStore, value: &str) -> anyhow::Result<()> {
    match value.parse::<usize>() {
        Ok(count) => remove_least_frequent(store, count),
        Err(_) => remove_word(store, value),
    }
}

/// Add dictionary content named by `value`: an integer pulls that many
/// unseen entries in frequency order, anything else is looked up as a
/// word.
pub fn add_entries(store: &DeckStore, dict: &Path, value: &str) -> anyhow::Result<()> {
    let dictionary = Dictionary::new(dict);
    let entries = match value.parse::<usize>() {
        Ok(count) => lookup_next_most_frequent(&dictionary, count, store)?,
        Err(_) => lookup_word(&dictionary, value)?,
    };
    add(store, &entries)
}

/// Delete every record for `word` from the deck.
pub fn remove_word(store: &DeckStore, word: &str) -> anyhow::Result<()> {
    let removed = store
        .delete_by_key(word)
        .with_context(|| format!("removing '{word}' from {}", store.path().display()))?;
    info!(word, removed, "removed records by key");
    Ok(())
}

/// Delete the `count` most recently appended records from the deck.
pub fn remove_least_frequent(store: &DeckStore, count: usize) -> anyhow::Result<()> {
    store
        .delete_last_n(count)
        .with_context(|| format!("removing the last {count} records"))?;
    info!(count, "removed least frequent records");
    Ok(())
}

/// Look up a single word in the dictionary.
pub fn lookup_word(dictionary: &Dictionary, word: &str) -> anyhow::Result<Vec<DictEntry>> {
    let entry = dictionary
        .lookup_exact(word)
        .with_context(|| format!("looking up '{word}' in {}", dictionary.path().display()))?;
    Ok(vec![entry])
}

/// Look up the next `count` most frequent entries not yet in the deck.
pub fn lookup_next_most_frequent(
    dictionary: &Dictionary,
    count: usize,
    store: &DeckStore,
) -> anyhow::Result<Vec<DictEntry>> {
    dictionary
        .lookup_next_unseen(count, store)
        .with_context(|| format!("looking up the next {count} entries"))
}

/// Append entries to the deck.
pub fn add(store: &DeckStore, entries: &[DictEntry]) -> anyhow::Result<()> {
    store
        .append(entries)
        .with_context(|| format!("appending to {}", store.path().display()))?;
    info!(count = entries.len(), "added entries to the deck");
    Ok(())
}
