use anyhow::Result;
use owo_colors::OwoColorize;
use unisched_core::catalog::Catalog;
use unisched_core::config::GlobalConfig;
use unisched_core::selection::Selection;

use crate::render::Render;

pub fn run(config: &GlobalConfig) -> Result<()> {
    let selection = Selection::load(&config.selected_path());
    if selection.is_empty() {
        println!("No courses selected.");
        return Ok(());
    }

    let catalog = Catalog::load(config);

    for id in selection.ids() {
        match catalog.get_course(id) {
            Ok(course) => {
                let events = catalog.events_for(id).len();
                println!("{} {}", course.render(), format!("({} events)", events).dimmed());
            }
            // Selected but missing from the current catalog (e.g. other semester)
            Err(_) => println!("{} {}", id.bold(), "(not in catalog)".yellow()),
        }
    }

    Ok(())
}
