use anyhow::Result;
use owo_colors::OwoColorize;
use unisched_core::config::GlobalConfig;
use unisched_core::selection::{normalize_id, Selection};

pub fn run(config: &GlobalConfig, course_id: &str) -> Result<()> {
    let id = normalize_id(course_id);
    if id.is_empty() {
        anyhow::bail!("Please provide a course id.");
    }

    let mut selection = Selection::load(&config.selected_path());
    if !selection.remove(&id) {
        println!("Not selected: {}", id);
        return Ok(());
    }

    selection.save(&config.selected_path())?;
    println!(
        "{} {} (selected: {})",
        "Removed:".red(),
        id.bold(),
        selection.len()
    );
    Ok(())
}
