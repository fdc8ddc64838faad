//! Input -> output filename bookkeeping for a batch.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Map from each input track to the padded file produced for it.
///
/// Entries keep insertion order (the batch's input order). The transcode
/// step is the only writer; the combine step only reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilenameMap {
    entries: Vec<(PathBuf, PathBuf)>,
}

impl FilenameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the output for an input, replacing any earlier entry.
    pub fn insert(&mut self, input: impl Into<PathBuf>, output: impl Into<PathBuf>) {
        let input = input.into();
        let output = output.into();
        match self.entries.iter_mut().find(|(i, _)| *i == input) {
            Some(entry) => entry.1 = output,
            None => self.entries.push((input, output)),
        }
    }

    pub fn get(&self, input: &Path) -> Option<&Path> {
        self.entries
            .iter()
            .find(|(i, _)| i == input)
            .map(|(_, o)| o.as_path())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.entries.iter().map(|(i, o)| (i.as_path(), o.as_path()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut map = FilenameMap::new();
        map.insert("b.webm", "out/b.webm.padded.mp4");
        map.insert("a.webm", "out/a.webm.padded.aac");

        let inputs: Vec<_> = map.iter().map(|(i, _)| i.to_path_buf()).collect();
        assert_eq!(inputs, vec![PathBuf::from("b.webm"), PathBuf::from("a.webm")]);
    }

    #[test]
    fn insert_replaces_existing_entry() {
        let mut map = FilenameMap::new();
        map.insert("a.webm", "first");
        map.insert("a.webm", "second");

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(Path::new("a.webm")), Some(Path::new("second")));
    }

    #[test]
    fn missing_input_returns_none() {
        let map = FilenameMap::new();
        assert!(map.get(Path::new("nope.webm")).is_none());
        assert!(map.is_empty());
    }
}
