//! ICS file generation.
//!
//! Selected events become one VCALENDAR with one VEVENT each, importable
//! into Google Calendar, Outlook and Apple Calendar. Times are exported as
//! floating local datetimes: the portal publishes local lecture times and
//! the student imports them in the same timezone.

use icalendar::{Calendar, Component, EventLike};

use crate::error::SchedResult;
use crate::event::Event;

const PRODID: &str = "-//UNISCHED//EN";

/// Generate .ics content for the given events.
pub fn generate_ics(events: &[Event]) -> SchedResult<String> {
    let mut cal = Calendar::new();

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&event.event_id);
        ics_event.summary(summary_for(event).trim());

        // DTSTAMP - required by RFC 5545
        let dtstamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
        ics_event.add_property("DTSTAMP", &dtstamp);

        // Floating local datetimes (no Z, no TZID)
        let start = event.date.and_time(event.start);
        let end = event.date.and_time(event.end);
        ics_event.add_property("DTSTART", start.format("%Y%m%dT%H%M%S").to_string());
        ics_event.add_property("DTEND", end.format("%Y%m%dT%H%M%S").to_string());

        if !event.location.is_empty() {
            ics_event.location(&event.location);
        }

        if let Some(note) = event.note.as_deref() {
            if !note.trim().is_empty() {
                ics_event.description(note.trim());
            }
        }

        cal.push(ics_event.done());
    }

    let cal = cal.done();

    Ok(replace_prodid(&cal.to_string()))
}

fn summary_for(event: &Event) -> String {
    format!("{} {}", event.course_id, event.title)
}

/// Swap the icalendar crate's PRODID for our own.
fn replace_prodid(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
        } else {
            result.push_str(line);
        }
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use chrono::{NaiveDate, NaiveTime};

    fn make_test_event() -> Event {
        Event::new(
            "FS261110",
            "Public Economics",
            EventKind::Lecture,
            NaiveDate::from_ymd_opt(2026, 2, 19).unwrap(),
            NaiveTime::from_hms_opt(10, 15, 0).unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            "HS 8",
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_generate_ics_basic_structure() {
        let ics = generate_ics(&[make_test_event()]).unwrap();

        assert!(ics.starts_with("BEGIN:VCALENDAR"), "ICS:\n{}", ics);
        assert!(ics.contains("PRODID:-//UNISCHED//EN"), "ICS:\n{}", ics);
        assert!(ics.contains("BEGIN:VEVENT"), "ICS:\n{}", ics);
        assert!(
            ics.contains("UID:FS261110__2026-02-19T1015"),
            "ICS:\n{}",
            ics
        );
        assert!(ics.contains("SUMMARY:FS261110 Public Economics"), "ICS:\n{}", ics);
        assert!(ics.contains("LOCATION:HS 8"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_generate_ics_floating_times() {
        let ics = generate_ics(&[make_test_event()]).unwrap();

        assert!(ics.contains("DTSTART:20260219T101500"), "ICS:\n{}", ics);
        assert!(ics.contains("DTEND:20260219T120000"), "ICS:\n{}", ics);
        // Floating: no UTC marker on the event times
        assert!(!ics.contains("DTSTART:20260219T101500Z"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_generate_ics_note_becomes_description() {
        let mut event = make_test_event();
        event.note = Some("Prüfung".to_string());
        let ics = generate_ics(&[event]).unwrap();
        assert!(ics.contains("DESCRIPTION:Prüfung"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_generate_ics_empty_location_omitted() {
        let mut event = make_test_event();
        event.location = String::new();
        let ics = generate_ics(&[event]).unwrap();
        assert!(!ics.contains("LOCATION"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_generate_ics_one_vevent_per_event() {
        let mut second = make_test_event();
        second.event_id = "FS261671__2026-02-19T1415".to_string();
        let ics = generate_ics(&[make_test_event(), second]).unwrap();

        let count = ics.lines().filter(|l| *l == "BEGIN:VEVENT").count();
        assert_eq!(count, 2, "ICS:\n{}", ics);
    }

    #[test]
    fn test_generate_ics_empty_input() {
        let ics = generate_ics(&[]).unwrap();
        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }

    #[test]
    fn test_generate_ics_uses_crlf() {
        let ics = generate_ics(&[make_test_event()]).unwrap();
        assert!(ics.contains("\r\n"));
    }
}
