//! Display-ready mapping of filename to error message.

use std::collections::BTreeMap;

/// Per-filename error messages shown under the drop zone.
///
/// Validation failures and upload failures land in the same board so they
/// render uniformly. Keys are the uploaded filenames; a later message for the same
/// name overwrites the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBoard {
    entries: BTreeMap<String, String>,
}

impl ErrorBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole board with `entries`.
    pub fn replace(&mut self, entries: BTreeMap<String, String>) {
        self.entries = entries;
    }

    /// Add or overwrite a single entry.
    pub fn insert(&mut self, filename: impl Into<String>, message: impl Into<String>) {
        self.entries.insert(filename.into(), message.into());
    }

    /// Merge `other` into this board, other's messages win on conflicts.
    pub fn merge(&mut self, other: ErrorBoard) {
        self.entries.extend(other.entries);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, filename: &str) -> Option<&str> {
        self.entries.get(filename).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Messages only, in filename order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }
}

impl FromIterator<(String, String)> for ErrorBoard {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_drops_previous_entries() {
        let mut board = ErrorBoard::new();
        board.insert("old.pdf", "old.pdf: Invalid file type");

        board.replace(BTreeMap::from([(
            "new.pdf".to_string(),
            "new.pdf: Invalid file type".to_string(),
        )]));

        assert_eq!(board.len(), 1);
        assert!(board.get("old.pdf").is_none());
    }

    #[test]
    fn merge_overwrites_same_filename() {
        let mut board: ErrorBoard =
            [("a.pdf".to_string(), "first".to_string())].into_iter().collect();
        let mut other = ErrorBoard::new();
        other.insert("a.pdf", "second");
        other.insert("b.pdf", "third");

        board.merge(other);

        assert_eq!(board.get("a.pdf"), Some("second"));
        assert_eq!(board.messages().collect::<Vec<_>>(), vec!["second", "third"]);
    }
}
