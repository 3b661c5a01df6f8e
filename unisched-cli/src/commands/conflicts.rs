use anyhow::Result;
use owo_colors::OwoColorize;
use unisched_core::catalog::Catalog;
use unisched_core::config::GlobalConfig;
use unisched_core::conflicts::detect_conflicts;
use unisched_core::selection::Selection;

use crate::render::{pluralize, Render};

pub fn run(config: &GlobalConfig) -> Result<()> {
    let catalog = Catalog::load(config);
    let selection = Selection::load(&config.selected_path());
    let events = catalog.selected_events(&selection);

    let conflicts = detect_conflicts(&events);
    if conflicts.is_empty() {
        println!("{}", "No conflicts found.".green());
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{} {} found:",
            conflicts.len(),
            pluralize("conflict", conflicts.len())
        )
        .red()
        .bold()
    );

    for pair in &conflicts {
        println!("{}", pair.render());
    }

    Ok(())
}
