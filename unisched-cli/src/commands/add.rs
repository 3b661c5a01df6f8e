use anyhow::Result;
use owo_colors::OwoColorize;
use unisched_core::catalog::Catalog;
use unisched_core::config::GlobalConfig;
use unisched_core::selection::{normalize_id, Selection};

pub fn run(config: &GlobalConfig, course_id: &str) -> Result<()> {
    let id = normalize_id(course_id);
    if id.is_empty() {
        anyhow::bail!("Please provide a course id.");
    }

    // Unknown ids are allowed (the catalog may be for another semester),
    // but worth a warning.
    let catalog = Catalog::load(config);
    if !catalog.contains(&id) {
        println!(
            "{}",
            format!("Warning: '{}' not found in the catalog (adding anyway).", id).yellow()
        );
    }

    let mut selection = Selection::load(&config.selected_path());
    if !selection.add(&id) {
        println!("Already selected: {}", id);
        return Ok(());
    }

    selection.save(&config.selected_path())?;
    println!(
        "{} {} (selected: {})",
        "Added:".green(),
        id.bold(),
        selection.len()
    );
    Ok(())
}
