//! Conflict detection.
//!
//! Given the events of all selected courses, find every pair of events that
//! overlap in time on the same date. Half-open interval semantics: an event
//! ending exactly when another starts is not a conflict.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::event::Event;

/// An unordered pair of overlapping events.
///
/// Derived data only: conflicts are recomputed whenever the selection
/// changes and are never stored. `first` is the event that starts earlier
/// (ties broken by end time, then event id), so a given pair always comes
/// out the same way round.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictPair {
    pub first: Event,
    pub second: Event,
}

impl ConflictPair {
    fn new(a: &Event, b: &Event) -> Self {
        ConflictPair {
            first: a.clone(),
            second: b.clone(),
        }
    }

    /// Whether the given event is one side of this conflict.
    pub fn involves(&self, event_id: &str) -> bool {
        self.first.event_id == event_id || self.second.event_id == event_id
    }
}

/// Find all overlapping event pairs.
///
/// Events are grouped by date, sorted by start time within each day, then
/// swept pairwise: an event is only compared against later events whose
/// start lies before its end. Since the day is sorted by start time, a
/// later event can never end before an earlier one begins, so the start
/// check alone decides the overlap.
///
/// Events of the same course are checked against each other too; a course
/// double-booking its own slots is exactly what the user wants to see.
pub fn detect_conflicts(events: &[Event]) -> Vec<ConflictPair> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&Event>> = BTreeMap::new();
    for ev in events {
        by_date.entry(ev.date).or_default().push(ev);
    }

    let mut conflicts = Vec::new();

    for day in by_date.values_mut() {
        day.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(a.end.cmp(&b.end))
                .then(a.event_id.cmp(&b.event_id))
        });

        for i in 0..day.len() {
            for j in (i + 1)..day.len() {
                if day[j].start >= day[i].end {
                    break;
                }
                conflicts.push(ConflictPair::new(day[i], day[j]));
            }
        }
    }

    conflicts
}
