use anyhow::Result;
use owo_colors::OwoColorize;
use unisched_core::catalog::Catalog;
use unisched_core::config::GlobalConfig;

use super::MAX_SEARCH_RESULTS;
use crate::render::Render;

pub fn run(config: &GlobalConfig, text: &str) -> Result<()> {
    let query = text.trim();
    if query.is_empty() {
        anyhow::bail!("Please provide a search text.");
    }

    let catalog = Catalog::load(config);
    let matches = catalog.search(query);

    if matches.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for course in matches.iter().take(MAX_SEARCH_RESULTS) {
        println!("{}", course.render());
    }

    if matches.len() > MAX_SEARCH_RESULTS {
        println!(
            "{}",
            format!("... and {} more results", matches.len() - MAX_SEARCH_RESULTS).dimmed()
        );
    }

    Ok(())
}
