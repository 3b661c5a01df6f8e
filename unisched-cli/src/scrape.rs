//! Portal scraping: fetch the semester search page and every course
//! detail page, storing raw HTML in the cache for the parser.
//!
//! Plain sequential fetching with a politeness delay; the catalog is a few
//! hundred pages and an overnight-fast scrape is not worth hammering the
//! portal for.

use std::collections::BTreeSet;
use std::time::Duration;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use reqwest::Client;
use scraper::{Html, Selector};
use unisched_core::cache::HtmlCache;
use unisched_core::config::GlobalConfig;
use url::Url;

const USER_AGENT: &str = concat!("unisched/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// What a scrape run did, for the final report line.
pub struct ScrapeSummary {
    pub found: usize,
    pub fetched: usize,
    pub skipped: usize,
}

pub fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("failed to build HTTP client")
}

/// Fetch all course detail pages of one semester into the cache.
///
/// Cached pages are skipped unless `refresh` is set, in which case they
/// are re-fetched and overwritten.
pub async fn scrape_semester(
    client: &Client,
    config: &GlobalConfig,
    cache: &HtmlCache,
    semester: &str,
    refresh: bool,
) -> Result<ScrapeSummary> {
    let links = fetch_course_links(client, config, semester).await?;
    println!("Found {} courses", links.len());

    let delay = Duration::from_millis(config.request_delay_ms);
    let mut fetched = 0;
    let mut skipped = 0;

    for (course_id, url) in &links {
        if cache.contains(course_id) && !refresh {
            println!("{}  {}", "SKIP".dimmed(), course_id);
            skipped += 1;
            continue;
        }

        println!("{} {}", "FETCH".green(), course_id);
        let html = client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()
            .with_context(|| format!("failed to fetch {}", url))?
            .text()
            .await?;

        cache.store(course_id, &html)?;
        fetched += 1;
        tokio::time::sleep(delay).await;
    }

    Ok(ScrapeSummary {
        found: links.len(),
        fetched,
        skipped,
    })
}

/// Load the semester search page and extract (course_id, detail_url) pairs.
async fn fetch_course_links(
    client: &Client,
    config: &GlobalConfig,
    semester: &str,
) -> Result<Vec<(String, Url)>> {
    let html = client
        .get(config.search_url())
        .query(&[("Semester", semester)])
        .send()
        .await?
        .error_for_status()
        .with_context(|| format!("failed to fetch search page for {}", semester))?
        .text()
        .await?;

    extract_course_links(&html, &config.base_url)
}

/// Pull `details?code=<ID>` links out of the search page.
///
/// The links are relative; resolve them against the portal base URL.
/// Deduplicated and sorted for stable scrape order.
fn extract_course_links(html: &str, base_url: &str) -> Result<Vec<(String, Url)>> {
    let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
        .context("invalid base_url in config")?;

    let doc = Html::parse_document(html);
    let link_sel = Selector::parse(r#"a[href^="details?code="]"#).unwrap();

    let mut links: BTreeSet<(String, String)> = BTreeSet::new();
    for a in doc.select(&link_sel) {
        let Some(href) = a.value().attr("href") else {
            continue;
        };

        let course_id = href.split("code=").last().unwrap_or("").trim();
        if course_id.is_empty() {
            continue;
        }

        links.insert((course_id.to_string(), href.to_string()));
    }

    links
        .into_iter()
        .map(|(course_id, href)| {
            let url = base
                .join(&href)
                .with_context(|| format!("bad course link '{}'", href))?;
            Ok((course_id, url))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_course_links() {
        let html = r#"
            <html><body>
            <a href="details?code=FS261403">Course B</a>
            <a href="details?code=FS261059">Course A</a>
            <a href="details?code=FS261059">Course A again</a>
            <a href="/somewhere/else">Not a course</a>
            </body></html>
        "#;

        let links = extract_course_links(html, "https://portal.unilu.ch").unwrap();
        assert_eq!(links.len(), 2);
        // Deduplicated and sorted
        assert_eq!(links[0].0, "FS261059");
        assert_eq!(
            links[0].1.as_str(),
            "https://portal.unilu.ch/details?code=FS261059"
        );
        assert_eq!(links[1].0, "FS261403");
    }

    #[test]
    fn test_extract_course_links_empty_page() {
        let links = extract_course_links("<html></html>", "https://portal.unilu.ch").unwrap();
        assert!(links.is_empty());
    }
}
