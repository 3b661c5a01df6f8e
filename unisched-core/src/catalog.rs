//! Catalog store: the processed course/event dataset and its indexes.
//!
//! courses.json and events.json are written by `unisched update` and read
//! by every other command. Loading builds the in-memory indexes once so
//! commands never scan the full lists repeatedly.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::GlobalConfig;
use crate::course::Course;
use crate::error::{SchedError, SchedResult};
use crate::event::Event;
use crate::selection::{normalize_id, Selection};

/// The parsed catalog with lookup indexes.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    course_index: HashMap<String, usize>,
    events_by_course: HashMap<String, Vec<Event>>,
}

impl Catalog {
    /// Load the catalog from the processed JSON files. Missing or corrupt
    /// files yield an empty catalog; commands guard on `is_empty` and point
    /// the user at `unisched update`.
    pub fn load(config: &GlobalConfig) -> Self {
        let courses: Vec<Course> = load_json_or_default(&config.courses_path());
        let events: Vec<Event> = load_json_or_default(&config.events_path());
        Self::from_parts(courses, events)
    }

    pub fn from_parts(courses: Vec<Course>, events: Vec<Event>) -> Self {
        let mut course_index = HashMap::new();
        for (i, course) in courses.iter().enumerate() {
            course_index.insert(normalize_id(&course.course_id), i);
        }

        let mut events_by_course: HashMap<String, Vec<Event>> = HashMap::new();
        for event in events {
            events_by_course
                .entry(normalize_id(&event.course_id))
                .or_default()
                .push(event);
        }

        Catalog {
            courses,
            course_index,
            events_by_course,
        }
    }

    /// Write the processed files. Creates the data directory if needed.
    pub fn save(courses: &[Course], events: &[Event], config: &GlobalConfig) -> SchedResult<()> {
        std::fs::create_dir_all(config.data_path())?;
        write_json(&config.courses_path(), courses)?;
        write_json(&config.events_path(), events)?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn list_courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn get_course(&self, id: &str) -> SchedResult<&Course> {
        self.course_index
            .get(&normalize_id(id))
            .map(|&i| &self.courses[i])
            .ok_or_else(|| SchedError::CourseNotFound(normalize_id(id)))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.course_index.contains_key(&normalize_id(id))
    }

    /// All events of one course (empty slice if unknown).
    pub fn events_for(&self, id: &str) -> &[Event] {
        self.events_by_course
            .get(&normalize_id(id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All events of the selected courses, in selection (id) order.
    pub fn selected_events(&self, selection: &Selection) -> Vec<Event> {
        selection
            .ids()
            .flat_map(|id| self.events_for(id).iter().cloned())
            .collect()
    }

    /// Case-insensitive substring search over id, title and instructors.
    pub fn search(&self, query: &str) -> Vec<&Course> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.courses
            .iter()
            .filter(|c| {
                let haystack = format!(
                    "{} {} {}",
                    c.course_id,
                    c.title,
                    c.instructors.join(" ")
                )
                .to_lowercase();
                haystack.contains(&query)
            })
            .collect()
    }
}

/// Bookkeeping written next to the processed files after each update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogMeta {
    pub semester: String,
    pub courses: usize,
    pub events: usize,
    pub updated_at: DateTime<Utc>,
}

impl CatalogMeta {
    pub fn load(config: &GlobalConfig) -> Option<Self> {
        let content = std::fs::read_to_string(config.metadata_path()).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn save(&self, config: &GlobalConfig) -> SchedResult<()> {
        write_json(&config.metadata_path(), self)
    }
}

fn load_json_or_default<T: serde::de::DeserializeOwned + Default>(path: &Path) -> T {
    let Ok(content) = std::fs::read_to_string(path) else {
        return T::default();
    };
    serde_json::from_str(&content).unwrap_or_default()
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> SchedResult<()> {
    let content = serde_json::to_string_pretty(value)
        .map_err(|e| SchedError::Serialization(e.to_string()))?;
    std::fs::write(path, content)?;
    Ok(())
}
