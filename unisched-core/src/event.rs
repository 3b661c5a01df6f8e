//! Event types.
//!
//! An `Event` is one concrete teaching occurrence: a single date with a
//! start and end time, belonging to exactly one course. Events are created
//! by the parser and are read-only afterwards; the `start < end` invariant
//! is enforced at construction so that downstream logic (conflict
//! detection, timetable assembly, export) never sees malformed data.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{SchedError, SchedResult};

/// A single dated teaching occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: String,
    pub course_id: String,
    pub title: String,
    pub kind: EventKind,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    pub location: String,
    pub note: Option<String>,
}

/// What kind of occurrence a Termin line describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Lecture,
    Exam,
    Other,
}

impl Event {
    /// Build an event, rejecting `start >= end` at the parse boundary.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        course_id: &str,
        title: &str,
        kind: EventKind,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        location: &str,
        note: Option<String>,
    ) -> SchedResult<Self> {
        if start >= end {
            return Err(SchedError::InvalidEventData(format!(
                "event on {} has start {} >= end {}",
                date,
                start.format("%H:%M"),
                end.format("%H:%M")
            )));
        }

        // Stable id: course + date + start uniquely identify a Termin line
        let event_id = format!("{}__{}T{}", course_id, date, start.format("%H%M"));

        Ok(Event {
            event_id,
            course_id: course_id.to_string(),
            title: title.to_string(),
            kind,
            date,
            start,
            end,
            location: location.to_string(),
            note,
        })
    }
}

/// Serde helpers for the `"HH:MM"` time format used in events.json.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
