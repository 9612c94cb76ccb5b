//! Shared string table

use ahash::AHashMap;

/// An ordered table of shared strings.
///
/// Ids are positions in the table. [`StringTable::insert`] is idempotent: the same
/// text always maps to the id it was first given. [`StringTable::push`] always
/// appends, which lets a reader keep the id a file assigned to every entry even
/// when the file repeats a text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringTable {
    entries: Vec<String>,
    index: AHashMap<String, u32>,
}

impl StringTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a text, or find the id it already has
    pub fn insert<S: AsRef<str>>(&mut self, text: S) -> u32 {
        let text = text.as_ref();
        if let Some(&id) = self.index.get(text) {
            return id;
        }
        self.push(text)
    }

    /// Append a text at the next id, even if it is already present.
    ///
    /// Lookup by text keeps resolving to the first id.
    pub fn push<S: Into<String>>(&mut self, text: S) -> u32 {
        let text = text.into();
        let id = self.entries.len() as u32;
        self.index.entry(text.clone()).or_insert(id);
        self.entries.push(text);
        id
    }

    /// Look up the text for an id
    pub fn get(&self, id: u32) -> Option<&str> {
        self.entries.get(id as usize).map(String::as_str)
    }

    /// Find the id of a text
    pub fn find(&self, text: &str) -> Option<u32> {
        self.index.get(text).copied()
    }

    /// Iterate `(id, text)` in id order, which is also insertion order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(id, text)| (id as u32, text.as_str()))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}
