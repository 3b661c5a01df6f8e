//! Course record type.

use serde::{Deserialize, Serialize};

/// One university course as stored in courses.json.
///
/// Immutable once parsed from the catalog; the events belonging to a course
/// live in events.json and are joined through `course_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub course_id: String,
    pub title: String,
    pub semester: Option<String>,
    #[serde(rename = "type")]
    pub course_type: Option<String>,
    pub instructors: Vec<String>,
    pub department: Option<String>,
    pub study_level: Option<String>,
    pub source_url: String,
}

impl Course {
    /// Compact instructor list for one-line display ("A. Author, B. Writer").
    pub fn instructors_short(&self) -> String {
        self.instructors.join(", ")
    }
}
