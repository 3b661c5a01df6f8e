use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use unisched_core::catalog::Catalog;
use unisched_core::config::GlobalConfig;
use unisched_core::ics::generate_ics;
use unisched_core::selection::Selection;
use unisched_core::timetable::assemble_timetable;

use crate::render::pluralize;

pub fn run(config: &GlobalConfig, out: &Path) -> Result<()> {
    let catalog = Catalog::load(config);
    let selection = Selection::load(&config.selected_path());
    let events = catalog.selected_events(&selection);

    if events.is_empty() {
        println!("No selected events to export.");
        return Ok(());
    }

    // Export in chronological order so the file diffs nicely between runs
    let timetable = assemble_timetable(&events);
    let ics = generate_ics(&timetable.agenda)?;

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out, ics)?;

    println!(
        "{} {} {} to {}",
        "Exported".green(),
        events.len(),
        pluralize("event", events.len()),
        out.display().bold()
    );
    Ok(())
}
