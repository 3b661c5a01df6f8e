use std::collections::HashSet;

use anyhow::Result;
use owo_colors::OwoColorize;
use unisched_core::catalog::Catalog;
use unisched_core::config::GlobalConfig;
use unisched_core::conflicts::detect_conflicts;
use unisched_core::event::Event;
use unisched_core::selection::Selection;
use unisched_core::timetable::{assemble_timetable, Week};

use crate::render::{week_heading, weekday_short, Render};

pub fn run(config: &GlobalConfig, week_filter: Option<&str>) -> Result<()> {
    let catalog = Catalog::load(config);
    let selection = Selection::load(&config.selected_path());
    let events = catalog.selected_events(&selection);

    if events.is_empty() {
        println!("No selected events.");
        return Ok(());
    }

    let timetable = assemble_timetable(&events);

    let weeks: Vec<&Week> = match week_filter {
        Some(label) => {
            let label = parse_week_label(label)?;
            let selected: Vec<&Week> = timetable
                .weeks
                .iter()
                .filter(|w| (w.year, w.week) == label)
                .collect();
            if selected.is_empty() {
                let available: Vec<String> =
                    timetable.weeks.iter().map(|w| w.label()).collect();
                anyhow::bail!(
                    "No events in week {}-W{:02}. Available: {}",
                    label.0,
                    label.1,
                    available.join(", ")
                );
            }
            selected
        }
        None => timetable.weeks.iter().collect(),
    };

    // Conflicts are detected over the full selection so a week view never
    // hides an overlap with another week's exam rescheduling.
    let conflicted = conflicted_event_ids(&events);

    for (i, week) in weeks.iter().enumerate() {
        print_week(week, &conflicted);
        if i < weeks.len() - 1 {
            println!();
        }
    }

    if !conflicted.is_empty() {
        println!();
        println!("{}", "Legend: red = overlaps another selected event".dimmed());
    }

    Ok(())
}

/// Event ids that participate in at least one conflict.
pub fn conflicted_event_ids(events: &[Event]) -> HashSet<String> {
    detect_conflicts(events)
        .into_iter()
        .flat_map(|pair| [pair.first.event_id, pair.second.event_id])
        .collect()
}

pub fn print_week(week: &Week, conflicted: &HashSet<String>) {
    println!("{}", week_heading(week));

    for day in &week.days {
        println!(
            "  {} {}",
            weekday_short(day.date).bold(),
            day.date.format("%Y-%m-%d").to_string().dimmed()
        );
        for event in &day.events {
            if conflicted.contains(&event.event_id) {
                println!("    {}", event.render().red());
            } else {
                println!("    {}", event.render());
            }
        }
    }
}

/// Parse "YYYY-Www" (e.g. 2026-W08) into (year, week).
fn parse_week_label(label: &str) -> Result<(i32, u32)> {
    let invalid = || anyhow::anyhow!("Invalid week '{}'. Expected YYYY-Www, e.g. 2026-W08", label);

    let (year, week) = label.split_once("-W").ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let week: u32 = week.parse().map_err(|_| invalid())?;

    if !(1..=53).contains(&week) {
        return Err(invalid());
    }

    Ok((year, week))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_week_label() {
        assert_eq!(parse_week_label("2026-W08").unwrap(), (2026, 8));
        assert_eq!(parse_week_label("2026-W53").unwrap(), (2026, 53));
        assert!(parse_week_label("2026-08").is_err());
        assert!(parse_week_label("2026-W54").is_err());
        assert!(parse_week_label("garbage").is_err());
    }
}
