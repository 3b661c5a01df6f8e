use anyhow::Result;
use unisched_core::catalog::Catalog;
use unisched_core::config::GlobalConfig;
use unisched_core::selection::Selection;
use unisched_core::timetable::assemble_timetable;

use crate::render::Render;

pub fn run(config: &GlobalConfig) -> Result<()> {
    let catalog = Catalog::load(config);
    let selection = Selection::load(&config.selected_path());
    let events = catalog.selected_events(&selection);

    if events.is_empty() {
        println!("No selected events.");
        return Ok(());
    }

    let timetable = assemble_timetable(&events);
    for event in &timetable.agenda {
        println!("{}", event.render());
    }

    Ok(())
}
