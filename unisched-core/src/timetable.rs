//! Timetable assembly.
//!
//! Display-oriented groupings of the selected events: a weekly view (ISO
//! week, then date, chronological within the day) and a flat agenda view.
//! Pure transformations with no conflict awareness; conflicts are reported
//! separately and never resolved or hidden here.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::event::Event;

/// Both display views over one event sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Timetable {
    /// Events grouped by ISO week, chronological.
    pub weeks: Vec<Week>,
    /// All events in flat chronological order.
    pub agenda: Vec<Event>,
}

/// One ISO calendar week of the timetable.
#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub year: i32,
    pub week: u32,
    /// Days carrying at least one event, in date order.
    pub days: Vec<Day>,
}

/// One day within a week, events sorted by start time.
#[derive(Debug, Clone, PartialEq)]
pub struct Day {
    pub date: NaiveDate,
    pub events: Vec<Event>,
}

impl Week {
    pub fn monday(&self) -> Option<NaiveDate> {
        NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Mon)
    }

    pub fn sunday(&self) -> Option<NaiveDate> {
        NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Sun)
    }

    /// Label like "2026-W08".
    pub fn label(&self) -> String {
        format!("{}-W{:02}", self.year, self.week)
    }
}

/// Group events into the weekly and agenda views.
pub fn assemble_timetable(events: &[Event]) -> Timetable {
    let mut agenda: Vec<Event> = events.to_vec();
    agenda.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then(a.start.cmp(&b.start))
            .then(a.end.cmp(&b.end))
            .then(a.event_id.cmp(&b.event_id))
    });

    let mut by_week: BTreeMap<(i32, u32), BTreeMap<NaiveDate, Vec<Event>>> = BTreeMap::new();
    for ev in &agenda {
        let iso = ev.date.iso_week();
        by_week
            .entry((iso.year(), iso.week()))
            .or_default()
            .entry(ev.date)
            .or_default()
            .push(ev.clone());
    }

    let weeks = by_week
        .into_iter()
        .map(|((year, week), days)| Week {
            year,
            week,
            days: days
                .into_iter()
                .map(|(date, events)| Day { date, events })
                .collect(),
        })
        .collect();

    Timetable { weeks, agenda }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use chrono::NaiveTime;

    fn event(course_id: &str, date: &str, start: &str, end: &str) -> Event {
        Event::new(
            course_id,
            course_id,
            EventKind::Lecture,
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
            "",
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_agenda_is_chronological() {
        let events = vec![
            event("B", "2026-02-20", "10:00", "11:00"),
            event("A", "2026-02-19", "14:00", "16:00"),
            event("C", "2026-02-19", "08:00", "09:00"),
        ];
        let timetable = assemble_timetable(&events);
        let order: Vec<&str> = timetable
            .agenda
            .iter()
            .map(|e| e.course_id.as_str())
            .collect();
        assert_eq!(order, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_weeks_group_by_iso_week() {
        // 2026-02-19 (Thu) is in W08, 2026-02-23 (Mon) is in W09
        let events = vec![
            event("A", "2026-02-19", "09:00", "10:00"),
            event("B", "2026-02-23", "09:00", "10:00"),
        ];
        let timetable = assemble_timetable(&events);
        assert_eq!(timetable.weeks.len(), 2);
        assert_eq!(timetable.weeks[0].label(), "2026-W08");
        assert_eq!(timetable.weeks[1].label(), "2026-W09");
    }

    #[test]
    fn test_days_within_week_are_ordered() {
        let events = vec![
            event("A", "2026-02-20", "09:00", "10:00"),
            event("B", "2026-02-19", "09:00", "10:00"),
            event("C", "2026-02-19", "08:00", "09:00"),
        ];
        let timetable = assemble_timetable(&events);
        assert_eq!(timetable.weeks.len(), 1);

        let week = &timetable.weeks[0];
        assert_eq!(week.days.len(), 2);
        assert_eq!(
            week.days[0].date,
            NaiveDate::from_ymd_opt(2026, 2, 19).unwrap()
        );
        // Within the day, sorted by start
        assert_eq!(week.days[0].events[0].course_id, "C");
        assert_eq!(week.days[0].events[1].course_id, "B");
    }

    #[test]
    fn test_week_date_range() {
        let events = vec![event("A", "2026-02-19", "09:00", "10:00")];
        let timetable = assemble_timetable(&events);
        let week = &timetable.weeks[0];
        assert_eq!(
            week.monday(),
            NaiveDate::from_ymd_opt(2026, 2, 16)
        );
        assert_eq!(
            week.sunday(),
            NaiveDate::from_ymd_opt(2026, 2, 22)
        );
    }

    #[test]
    fn test_empty_input() {
        let timetable = assemble_timetable(&[]);
        assert!(timetable.weeks.is_empty());
        assert!(timetable.agenda.is_empty());
    }
}
