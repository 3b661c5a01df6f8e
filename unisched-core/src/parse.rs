//! Parsing cached portal HTML into Course and Event records.
//!
//! One course detail page yields one `Course` plus one `Event` per line of
//! its "Termin/e" field. No recurrence expansion: the portal already lists
//! every single occurrence, so a Termin line maps 1:1 to an Event.

use chrono::{NaiveDate, NaiveTime};
use scraper::{Html, Selector};

use crate::cache::HtmlCache;
use crate::config::GlobalConfig;
use crate::course::Course;
use crate::error::SchedResult;
use crate::event::{Event, EventKind};

/// Portal field labels (the source system is German).
const FIELD_INSTRUCTORS: &str = "Dozent/in";
const FIELD_DATES: &str = "Termin/e";
const FIELD_TYPE: &str = "Veranstaltungsart";
const FIELD_DEPARTMENT: &str = "Durchführender Fachbereich";
const FIELD_STUDY_LEVEL: &str = "Studienstufe";
const FIELD_SEMESTER: &str = "Semester";

const EXAM_MARKER: &str = "(Prüfung)";
const BLOCK_MARKER: &str = "Block";

/// Parse every cached page into the combined course and event lists.
pub fn parse_cached(
    cache: &HtmlCache,
    config: &GlobalConfig,
) -> SchedResult<(Vec<Course>, Vec<Event>)> {
    let mut courses = Vec::new();
    let mut events = Vec::new();

    for course_id in cache.course_ids() {
        let html = cache.load(&course_id)?;
        let source_url = config.course_url(&course_id);
        let (course, course_events) = parse_course_page(&html, &course_id, &source_url);
        courses.push(course);
        events.extend(course_events);
    }

    Ok((courses, events))
}

/// Parse a single course detail page.
///
/// Always produces a Course (with empty fields if the page is sparse);
/// unparseable Termin lines are skipped rather than failing the page.
pub fn parse_course_page(html: &str, course_id: &str, source_url: &str) -> (Course, Vec<Event>) {
    let doc = Html::parse_document(html);
    let kv = extract_detail_table(&doc);
    let title = extract_title(&doc);

    let instructors = kv
        .get(FIELD_INSTRUCTORS)
        .map(|value| {
            value
                .split(';')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let course = Course {
        course_id: course_id.to_string(),
        title: title.clone(),
        semester: kv.get(FIELD_SEMESTER).cloned(),
        course_type: kv.get(FIELD_TYPE).cloned(),
        instructors,
        department: kv.get(FIELD_DEPARTMENT).cloned(),
        study_level: kv.get(FIELD_STUDY_LEVEL).cloned(),
        source_url: source_url.to_string(),
    };

    let events = kv
        .get(FIELD_DATES)
        .map(|block| {
            block
                .lines()
                .filter_map(|line| parse_event_line(line, course_id, &title))
                .collect()
        })
        .unwrap_or_default();

    (course, events)
}

/// Parse exactly one Termin line into exactly one event.
///
/// Expected shape: `<weekday>, <DD.MM.YYYY>, <HH:MM>-<HH:MM> Uhr, <location...>`.
/// Returns None for lines that don't fit (headers, notes, malformed dates)
/// and for events violating `start < end`.
pub fn parse_event_line(line: &str, course_id: &str, title: &str) -> Option<Event> {
    let mut raw = line.trim().to_string();
    if raw.is_empty() {
        return None;
    }

    let mut kind = EventKind::Lecture;
    let mut note = None;

    if raw.contains(EXAM_MARKER) {
        kind = EventKind::Exam;
        note = Some("Prüfung".to_string());
        raw = raw.replace(EXAM_MARKER, "").trim().to_string();
    } else if raw.contains(BLOCK_MARKER) {
        kind = EventKind::Other;
        note = Some("Block course".to_string());
    }

    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() < 4 {
        return None;
    }

    let date = NaiveDate::parse_from_str(parts[1], "%d.%m.%Y").ok()?;

    let time_part = parts[2].replace("Uhr", "");
    let (start_raw, end_raw) = time_part.trim().split_once('-')?;
    let start = NaiveTime::parse_from_str(start_raw.trim(), "%H:%M").ok()?;
    let end = NaiveTime::parse_from_str(end_raw.trim(), "%H:%M").ok()?;

    let location = parts[3..].join(",");

    Event::new(course_id, title, kind, date, start, end, location.trim(), note).ok()
}

/// Key/value pairs from the course detail table.
fn extract_detail_table(doc: &Html) -> std::collections::BTreeMap<String, String> {
    let mut data = std::collections::BTreeMap::new();

    let table_sel = Selector::parse(r#"table[id$="_tblDetail"]"#).unwrap();
    let row_sel = Selector::parse("tr").unwrap();
    let cell_sel = Selector::parse("td").unwrap();

    let Some(table) = doc.select(&table_sel).next() else {
        return data;
    };

    for row in table.select(&row_sel) {
        let cells: Vec<_> = row.select(&cell_sel).collect();
        // Only rows with exactly two cells carry a key/value pair
        if cells.len() != 2 {
            continue;
        }

        let key = cells[0].text().collect::<String>().trim().to_string();
        // Keep line structure of the value cell; Termin lines are split on it
        let value = cells[1]
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        data.insert(key, value);
    }

    data
}

/// Course title: the page's `h2` heading above the detail table.
fn extract_title(doc: &Html) -> String {
    let h2_sel = Selector::parse("h2").unwrap();
    doc.select(&h2_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_lecture_line() {
        let ev = parse_event_line(
            "Do, 19.02.2026, 10:15-12:00, HS 8",
            "FS261110",
            "Public Economics",
        )
        .unwrap();

        assert_eq!(ev.course_id, "FS261110");
        assert_eq!(ev.title, "Public Economics");
        assert_eq!(ev.kind, EventKind::Lecture);
        assert_eq!(ev.date, NaiveDate::from_ymd_opt(2026, 2, 19).unwrap());
        assert_eq!(ev.start, NaiveTime::from_hms_opt(10, 15, 0).unwrap());
        assert_eq!(ev.end, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert_eq!(ev.location, "HS 8");
        assert_eq!(ev.note, None);
        assert_eq!(ev.event_id, "FS261110__2026-02-19T1015");
    }

    #[test]
    fn test_exam_line() {
        let ev = parse_event_line(
            "Fr, 20.03.2026, 09:15-11:15, HS 15 (Prüfung)",
            "FS261671",
            "Classification Algorithms",
        )
        .unwrap();

        assert_eq!(ev.kind, EventKind::Exam);
        assert_eq!(ev.note.as_deref(), Some("Prüfung"));
        assert_eq!(ev.location, "HS 15");
    }

    #[test]
    fn test_block_course_line() {
        let ev = parse_event_line(
            "Mo, 01.06.2026, 08:15-17:00, 3.B01 Block",
            "FS261999",
            "Block Seminar",
        )
        .unwrap();

        assert_eq!(ev.kind, EventKind::Other);
        assert_eq!(ev.note.as_deref(), Some("Block course"));
    }

    #[test]
    fn test_time_with_uhr_suffix() {
        let ev = parse_event_line(
            "Do, 19.02.2026, 10:15-12:00 Uhr, HS 8",
            "FS261110",
            "Public Economics",
        )
        .unwrap();
        assert_eq!(ev.start, NaiveTime::from_hms_opt(10, 15, 0).unwrap());
    }

    #[test]
    fn test_location_with_commas_is_preserved() {
        let ev = parse_event_line(
            "Do, 19.02.2026, 10:15-12:00, HS 8, Hauptgebäude",
            "FS261110",
            "Public Economics",
        )
        .unwrap();
        assert_eq!(ev.location, "HS 8, Hauptgebäude");
    }

    #[test]
    fn test_invalid_date_is_skipped() {
        assert!(parse_event_line("Mo, 32.13.2026, 10:15-12:00, HS 8", "X", "X").is_none());
    }

    #[test]
    fn test_invalid_time_is_skipped() {
        assert!(parse_event_line("Mo, 19.02.2026, 1015-1200, HS 8", "X", "X").is_none());
    }

    #[test]
    fn test_end_before_start_is_skipped() {
        assert!(parse_event_line("Mo, 19.02.2026, 12:00-10:15, HS 8", "X", "X").is_none());
    }

    #[test]
    fn test_too_short_line_is_skipped() {
        assert!(parse_event_line("Mo, 19.02.2026", "X", "X").is_none());
    }

    #[test]
    fn test_empty_line_is_skipped() {
        assert!(parse_event_line("", "X", "X").is_none());
        assert!(parse_event_line("   ", "X", "X").is_none());
    }

    const PAGE: &str = r#"
        <html><body>
        <h2>Public Economics</h2>
        <table id="ctl00_tblDetail">
            <tr><td>Semester</td><td>FS26</td></tr>
            <tr><td>Veranstaltungsart</td><td>Vorlesung</td></tr>
            <tr><td>Dozent/in</td><td>Prof. Dr. A. Keynes; Dr. B. Pigou</td></tr>
            <tr><td>Durchführender Fachbereich</td><td>Ökonomie</td></tr>
            <tr><td>Studienstufe</td><td>Bachelor</td></tr>
            <tr><td>Termin/e</td><td>
                Do, 19.02.2026, 10:15-12:00, HS 8<br/>
                Do, 26.02.2026, 10:15-12:00, HS 8<br/>
                Fr, 20.03.2026, 09:15-11:15, HS 15 (Prüfung)
            </td></tr>
            <tr><td colspan="3">not a key/value row</td></tr>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_parse_course_page() {
        let (course, events) = parse_course_page(
            PAGE,
            "FS261110",
            "https://portal.unilu.ch/details?code=FS261110",
        );

        assert_eq!(course.course_id, "FS261110");
        assert_eq!(course.title, "Public Economics");
        assert_eq!(course.semester.as_deref(), Some("FS26"));
        assert_eq!(course.course_type.as_deref(), Some("Vorlesung"));
        assert_eq!(
            course.instructors,
            vec!["Prof. Dr. A. Keynes", "Dr. B. Pigou"]
        );
        assert_eq!(course.department.as_deref(), Some("Ökonomie"));
        assert_eq!(course.study_level.as_deref(), Some("Bachelor"));

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].title, "Public Economics");
        assert_eq!(events[2].kind, EventKind::Exam);
    }

    #[test]
    fn test_page_without_detail_table() {
        let (course, events) = parse_course_page("<html><body></body></html>", "FS000000", "url");
        assert_eq!(course.course_id, "FS000000");
        assert_eq!(course.title, "");
        assert!(course.instructors.is_empty());
        assert!(events.is_empty());
    }
}
