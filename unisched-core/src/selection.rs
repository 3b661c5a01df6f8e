//! Persistent storage for the user's course selection.
//!
//! courses.json and events.json hold the complete scraped dataset;
//! selected_courses.json holds only the user's personal choices, so user
//! state survives repeated scraping and parsing. Loading is deliberately
//! defensive: a missing or corrupt file is an empty selection, never an
//! error. Saving is last-write-wins on the local file.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SchedError, SchedResult};

/// The student's chosen subset of courses, as a sorted set of course ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

/// On-disk shape of selected_courses.json.
#[derive(Serialize, Deserialize, Default)]
struct SelectionFile {
    selected_course_ids: Vec<String>,
}

/// Normalize a course id the same way everywhere: trimmed, uppercased.
pub fn normalize_id(id: &str) -> String {
    id.trim().to_uppercase()
}

impl Selection {
    /// Load the selection, returning an empty one if the file is missing
    /// or unreadable.
    pub fn load(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Selection::default();
        };
        let Ok(file) = serde_json::from_str::<SelectionFile>(&content) else {
            return Selection::default();
        };

        let ids = file
            .selected_course_ids
            .iter()
            .map(|id| normalize_id(id))
            .filter(|id| !id.is_empty())
            .collect();

        Selection { ids }
    }

    pub fn save(&self, path: &Path) -> SchedResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = SelectionFile {
            selected_course_ids: self.ids.iter().cloned().collect(),
        };
        let content = serde_json::to_string_pretty(&file)
            .map_err(|e| SchedError::Serialization(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Add a course id. Returns false if it was already selected.
    pub fn add(&mut self, id: &str) -> bool {
        let id = normalize_id(id);
        if id.is_empty() {
            return false;
        }
        self.ids.insert(id)
    }

    /// Remove a course id. Returns false if it was not selected.
    pub fn remove(&mut self, id: &str) -> bool {
        self.ids.remove(&normalize_id(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(&normalize_id(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selected_courses.json");

        let mut selection = Selection::default();
        assert!(selection.add("fs261059 "));
        assert!(selection.add("FS261110"));
        selection.save(&path).unwrap();

        let loaded = Selection::load(&path);
        assert_eq!(loaded, selection);
        assert!(loaded.contains("FS261059"));
        assert!(loaded.contains("fs261110"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let selection = Selection::load(&dir.path().join("nope.json"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selected_courses.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Selection::load(&path).is_empty());
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut selection = Selection::default();
        assert!(selection.add("FS261059"));
        assert!(!selection.add("FS261059"));
        assert!(!selection.add("  fs261059"));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_remove_unknown() {
        let mut selection = Selection::default();
        assert!(!selection.remove("FS261059"));
    }

    #[test]
    fn test_blank_ids_are_ignored() {
        let mut selection = Selection::default();
        assert!(!selection.add("   "));
        assert!(selection.is_empty());
    }
}
