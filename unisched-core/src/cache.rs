//! Cache for raw course detail pages.
//!
//! One HTML file per course under `<data_dir>/raw/`, keyed by course id.
//! The cache is an explicit object handed to the scraper and the parser,
//! not ambient state; `unisched update --refresh` overwrites entries.

use std::path::PathBuf;

use crate::error::SchedResult;

#[derive(Debug, Clone)]
pub struct HtmlCache {
    dir: PathBuf,
}

impl HtmlCache {
    pub fn new(dir: PathBuf) -> Self {
        HtmlCache { dir }
    }

    fn path_for(&self, course_id: &str) -> PathBuf {
        self.dir.join(format!("{}.html", course_id))
    }

    pub fn contains(&self, course_id: &str) -> bool {
        self.path_for(course_id).exists()
    }

    pub fn store(&self, course_id: &str, html: &str) -> SchedResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(course_id), html)?;
        Ok(())
    }

    pub fn load(&self, course_id: &str) -> SchedResult<String> {
        Ok(std::fs::read_to_string(self.path_for(course_id))?)
    }

    /// Course ids of all cached pages, sorted for stable parse output.
    pub fn course_ids(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return Vec::new();
        };

        let mut ids: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "html"))
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_string)
            })
            .collect();

        ids.sort();
        ids
    }

    /// Drop every cached page.
    pub fn clear(&self) -> SchedResult<()> {
        for id in self.course_ids() {
            std::fs::remove_file(self.path_for(&id))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HtmlCache::new(dir.path().join("raw"));

        assert!(!cache.contains("FS261110"));
        cache.store("FS261110", "<html></html>").unwrap();
        assert!(cache.contains("FS261110"));
        assert_eq!(cache.load("FS261110").unwrap(), "<html></html>");
    }

    #[test]
    fn test_course_ids_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HtmlCache::new(dir.path().to_path_buf());

        cache.store("FS261671", "b").unwrap();
        cache.store("FS261110", "a").unwrap();
        assert_eq!(cache.course_ids(), vec!["FS261110", "FS261671"]);
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HtmlCache::new(dir.path().to_path_buf());

        cache.store("FS261110", "a").unwrap();
        cache.clear().unwrap();
        assert!(cache.course_ids().is_empty());
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HtmlCache::new(dir.path().join("does-not-exist"));
        assert!(cache.course_ids().is_empty());
    }
}
