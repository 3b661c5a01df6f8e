//! Terminal rendering for unisched-core types.
//!
//! Extension traits adding colored one-line output, following the pattern
//! of keeping display concerns out of the core crate.

use owo_colors::OwoColorize;
use unisched_core::conflicts::ConflictPair;
use unisched_core::course::Course;
use unisched_core::event::{Event, EventKind};
use unisched_core::timetable::Week;

/// Extension trait for colored terminal rendering.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Course {
    fn render(&self) -> String {
        let instructors = self.instructors_short();
        if instructors.is_empty() {
            format!("{} | {}", self.course_id.bold(), self.title)
        } else {
            format!(
                "{} | {} {}",
                self.course_id.bold(),
                self.title,
                format!("({})", instructors).dimmed()
            )
        }
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let mut line = format!(
            "{} {}-{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.start.format("%H:%M"),
            self.end.format("%H:%M"),
            self.course_id.bold(),
            self.title
        );

        if !self.location.is_empty() {
            line.push_str(&format!(" {}", format!("[{}]", self.location).dimmed()));
        }
        if self.kind == EventKind::Exam {
            line.push_str(&format!(" {}", "(exam)".yellow()));
        }

        line
    }
}

impl Render for ConflictPair {
    fn render(&self) -> String {
        format!(
            "{} {}  {}  {}",
            "!".red().bold(),
            render_conflict_side(&self.first),
            "<->".red(),
            render_conflict_side(&self.second)
        )
    }
}

fn render_conflict_side(event: &Event) -> String {
    format!(
        "{} {}-{} {} {}",
        event.date.format("%Y-%m-%d"),
        event.start.format("%H:%M").red(),
        event.end.format("%H:%M").red(),
        event.course_id.bold(),
        event.title
    )
}

/// Week heading like "2026-W08 (2026-02-16 -> 2026-02-22)".
pub fn week_heading(week: &Week) -> String {
    match (week.monday(), week.sunday()) {
        (Some(monday), Some(sunday)) => format!(
            "{} ({} -> {})",
            week.label().bold(),
            monday.format("%Y-%m-%d"),
            sunday.format("%Y-%m-%d")
        ),
        _ => week.label().bold().to_string(),
    }
}

/// Short weekday column label for a timetable day.
pub fn weekday_short(date: chrono::NaiveDate) -> &'static str {
    use chrono::Datelike;
    match date.weekday() {
        chrono::Weekday::Mon => "Mon",
        chrono::Weekday::Tue => "Tue",
        chrono::Weekday::Wed => "Wed",
        chrono::Weekday::Thu => "Thu",
        chrono::Weekday::Fri => "Fri",
        chrono::Weekday::Sat => "Sat",
        chrono::Weekday::Sun => "Sun",
    }
}

/// Simple pluralization helper for count labels.
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
