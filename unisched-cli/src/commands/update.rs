use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use unisched_core::cache::HtmlCache;
use unisched_core::catalog::{Catalog, CatalogMeta};
use unisched_core::config::GlobalConfig;
use unisched_core::parse::parse_cached;

use super::create_spinner;

pub async fn run(config: &GlobalConfig, semester: Option<&str>, refresh: bool) -> Result<()> {
    let semester = semester.unwrap_or(&config.semester).trim().to_string();
    if semester.is_empty() {
        anyhow::bail!("Please provide a semester code (e.g. FS26).");
    }

    println!("Scraping semester: {}", semester.bold());

    let client = crate::scrape::build_client()?;
    let cache = HtmlCache::new(config.raw_dir());
    let summary =
        crate::scrape::scrape_semester(&client, config, &cache, &semester, refresh).await?;

    println!(
        "Scraping finished: {} fetched, {} cached.",
        summary.fetched, summary.skipped
    );

    let spinner = create_spinner("Parsing cached pages".to_string());
    let (courses, events) = parse_cached(&cache, config)?;
    Catalog::save(&courses, &events, config)?;

    let meta = CatalogMeta {
        semester,
        courses: courses.len(),
        events: events.len(),
        updated_at: Utc::now(),
    };
    meta.save(config)?;
    spinner.finish_and_clear();

    println!(
        "{} {} courses, {} events.",
        "Catalog updated:".green(),
        courses.len(),
        events.len()
    );
    Ok(())
}
