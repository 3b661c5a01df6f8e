//! Interactive menu mode.
//!
//! A loop of dialoguer prompts over the same operations the subcommands
//! expose, plus a few conveniences that only make sense interactively:
//! first-run onboarding, a preview of the conflicts a course would add
//! before selecting it, and week-by-week timetable browsing.

use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use owo_colors::OwoColorize;
use unisched_core::catalog::{Catalog, CatalogMeta};
use unisched_core::config::GlobalConfig;
use unisched_core::conflicts::detect_conflicts;
use unisched_core::event::Event;
use unisched_core::selection::Selection;
use unisched_core::timetable::assemble_timetable;

use super::timetable::{conflicted_event_ids, print_week};
use crate::render::{pluralize, Render};

pub async fn run(config: &GlobalConfig) -> Result<()> {
    let mut catalog = Catalog::load(config);

    // Onboarding: nothing works without an initial scrape+parse
    if catalog.is_empty() {
        println!("No catalog data found yet (courses.json / events.json).");
        let go = Confirm::new()
            .with_prompt("Run the initial scrape now?")
            .default(true)
            .interact()?;

        if !go {
            println!("You can run `unisched update` anytime.");
            return Ok(());
        }

        super::update::run(config, None, false).await?;
        catalog = Catalog::load(config);
        if catalog.is_empty() {
            println!("{}", "Update did not produce any data.".yellow());
            return Ok(());
        }
        println!("Data loaded. Welcome to unisched!");
    }

    loop {
        let selection = Selection::load(&config.selected_path());
        let events = catalog.selected_events(&selection);
        print_header(config, &selection, &events);

        let items = [
            "Search + add course",
            "View selected courses",
            "Remove a course",
            "Show conflicts",
            "Timetable (by week)",
            "Agenda (all dates)",
            "Export .ics",
            "Update data (re-scrape)",
            "Exit",
        ];
        let choice = Select::new()
            .with_prompt("Select")
            .items(&items)
            .default(0)
            .interact()?;
        println!();

        match choice {
            0 => flow_search_add(config, &catalog)?,
            1 => super::selected::run(config)?,
            2 => flow_remove(config, &catalog)?,
            3 => super::conflicts::run(config)?,
            4 => flow_timetable(&events)?,
            5 => super::agenda::run(config)?,
            6 => flow_export(config)?,
            7 => {
                super::update::run(config, None, false).await?;
                catalog = Catalog::load(config);
                println!("Data reloaded into the session.");
            }
            _ => {
                println!("Bye.");
                return Ok(());
            }
        }
        println!();
    }
}

fn print_header(config: &GlobalConfig, selection: &Selection, events: &[Event]) {
    let conflicts = detect_conflicts(events).len();

    let mut parts = vec![
        format!("{} selected", selection.len()),
        format!("{} {}", events.len(), pluralize("event", events.len())),
    ];
    if conflicts > 0 {
        parts.push(
            format!("{} {}", conflicts, pluralize("conflict", conflicts))
                .red()
                .to_string(),
        );
    } else {
        parts.push("0 conflicts".green().to_string());
    }

    println!("{}", "=== unisched ===".bold());
    if let Some(meta) = CatalogMeta::load(config) {
        println!(
            "{}",
            format!(
                "{} | {} courses | updated {}",
                meta.semester,
                meta.courses,
                meta.updated_at.format("%Y-%m-%d %H:%M UTC")
            )
            .dimmed()
        );
    }
    println!("{}", parts.join(" | "));
}

/// Search and add courses in a loop, previewing the conflicts each
/// candidate would introduce before committing it to the selection.
fn flow_search_add(config: &GlobalConfig, catalog: &Catalog) -> Result<()> {
    loop {
        let query: String = Input::new()
            .with_prompt("Search text (empty to go back)")
            .allow_empty(true)
            .interact_text()?;
        if query.trim().is_empty() {
            return Ok(());
        }

        let matches = catalog.search(&query);
        if matches.is_empty() {
            println!("No results.");
            continue;
        }

        let mut items: Vec<String> = matches
            .iter()
            .take(super::MAX_SEARCH_RESULTS)
            .map(|course| {
                format!(
                    "{} ({} events)",
                    course.render(),
                    catalog.events_for(&course.course_id).len()
                )
            })
            .collect();
        items.push("Back".to_string());

        let pick = Select::new()
            .with_prompt("Add which course?")
            .items(&items)
            .default(0)
            .interact()?;
        if pick == items.len() - 1 {
            continue;
        }

        let course_id = matches[pick].course_id.clone();
        let mut selection = Selection::load(&config.selected_path());
        if selection.contains(&course_id) {
            println!("Already selected: {}", course_id);
            continue;
        }

        let added = conflicts_if_added(catalog, &selection, &course_id);
        if added > 0 {
            println!(
                "{}",
                format!(
                    "Adding {} introduces {} new {}.",
                    course_id,
                    added,
                    pluralize("conflict", added)
                )
                .yellow()
            );
            let anyway = Confirm::new()
                .with_prompt("Add anyway?")
                .default(false)
                .interact()?;
            if !anyway {
                continue;
            }
        }

        selection.add(&course_id);
        selection.save(&config.selected_path())?;
        println!(
            "{} {} (selected: {})",
            "Added:".green(),
            course_id.bold(),
            selection.len()
        );
    }
}

/// How many conflicts appear if `course_id` joins the current selection.
fn conflicts_if_added(catalog: &Catalog, selection: &Selection, course_id: &str) -> usize {
    let current = catalog.selected_events(selection);
    let existing = detect_conflicts(&current).len();

    let mut with_candidate = current;
    with_candidate.extend(catalog.events_for(course_id).iter().cloned());

    detect_conflicts(&with_candidate).len() - existing
}

fn flow_remove(config: &GlobalConfig, catalog: &Catalog) -> Result<()> {
    let mut selection = Selection::load(&config.selected_path());
    if selection.is_empty() {
        println!("No courses selected.");
        return Ok(());
    }

    let ids: Vec<String> = selection.ids().map(str::to_string).collect();
    let mut items: Vec<String> = ids
        .iter()
        .map(|id| match catalog.get_course(id) {
            Ok(course) => course.render(),
            Err(_) => format!("{} (not in catalog)", id),
        })
        .collect();
    items.push("Back".to_string());

    let pick = Select::new()
        .with_prompt("Remove which course?")
        .items(&items)
        .default(0)
        .interact()?;
    if pick == items.len() - 1 {
        return Ok(());
    }

    selection.remove(&ids[pick]);
    selection.save(&config.selected_path())?;
    println!("{} {}", "Removed:".red(), ids[pick].bold());
    Ok(())
}

/// Week picker with per-week conflict counts, then the week's table.
fn flow_timetable(events: &[Event]) -> Result<()> {
    if events.is_empty() {
        println!("No selected events.");
        return Ok(());
    }

    let timetable = assemble_timetable(events);
    let conflicted = conflicted_event_ids(events);

    loop {
        let mut items: Vec<String> = timetable
            .weeks
            .iter()
            .map(|week| {
                let in_week = week
                    .days
                    .iter()
                    .flat_map(|d| &d.events)
                    .filter(|e| conflicted.contains(&e.event_id))
                    .count();
                let conflict_label = if in_week > 0 {
                    format!("{} conflicting", in_week).red().to_string()
                } else {
                    "no conflicts".green().to_string()
                };
                format!("{} | {}", week.label(), conflict_label)
            })
            .collect();
        items.push("Back".to_string());

        let pick = Select::new()
            .with_prompt("Choose week")
            .items(&items)
            .default(0)
            .interact()?;
        if pick == items.len() - 1 {
            return Ok(());
        }

        println!();
        print_week(&timetable.weeks[pick], &conflicted);
        println!();
    }
}

fn flow_export(config: &GlobalConfig) -> Result<()> {
    let out: String = Input::new()
        .with_prompt("Output .ics path")
        .default("schedule.ics".to_string())
        .interact_text()?;

    super::export::run(config, std::path::Path::new(out.trim()))
}
