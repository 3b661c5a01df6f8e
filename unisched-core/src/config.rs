//! Global unisched configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{SchedError, SchedResult};

static DEFAULT_DATA_DIR: &str = "~/.local/share/unisched";
static DEFAULT_BASE_URL: &str = "https://portal.unilu.ch";
static DEFAULT_SEMESTER: &str = "FS26";

/// Delay between scrape requests, politeness towards the portal.
const DEFAULT_REQUEST_DELAY_MS: u64 = 200;

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_semester() -> String {
    DEFAULT_SEMESTER.to_string()
}

fn default_request_delay_ms() -> u64 {
    DEFAULT_REQUEST_DELAY_MS
}

/// Global configuration at ~/.config/unisched/config.toml
#[derive(Debug, Deserialize, Clone)]
pub struct GlobalConfig {
    /// Where scraped and processed data lives.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Base URL of the course portal.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Semester scraped when none is given on the command line.
    #[serde(default = "default_semester")]
    pub semester: String,

    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
}

impl GlobalConfig {
    pub fn config_path() -> SchedResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SchedError::Config("Could not determine config directory".into()))?
            .join("unisched");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented default file first if
    /// none exists yet.
    pub fn load() -> SchedResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: GlobalConfig = config::Config::builder()
            .add_source(config::File::from(config_path).required(false))
            .build()
            .map_err(|e| SchedError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SchedError::Config(e.to_string()))?;

        Ok(config)
    }

    fn create_default_config(path: &Path) -> SchedResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = format!(
            "# unisched configuration\n\
             \n\
             # Where scraped HTML and processed JSON data are stored.\n\
             data_dir = \"{DEFAULT_DATA_DIR}\"\n\
             \n\
             # Course portal to scrape.\n\
             base_url = \"{DEFAULT_BASE_URL}\"\n\
             \n\
             # Default semester code (e.g. FS26, HS25).\n\
             semester = \"{DEFAULT_SEMESTER}\"\n\
             \n\
             # Pause between page fetches during `unisched update`.\n\
             request_delay_ms = {DEFAULT_REQUEST_DELAY_MS}\n"
        );
        std::fs::write(path, template)?;
        Ok(())
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(expanded)
    }

    /// Directory holding the cached raw HTML pages.
    pub fn raw_dir(&self) -> PathBuf {
        self.data_path().join("raw")
    }

    pub fn courses_path(&self) -> PathBuf {
        self.data_path().join("courses.json")
    }

    pub fn events_path(&self) -> PathBuf {
        self.data_path().join("events.json")
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.data_path().join("metadata.json")
    }

    pub fn selected_path(&self) -> PathBuf {
        self.data_path().join("selected_courses.json")
    }

    /// Search page listing all courses of a semester.
    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url.trim_end_matches('/'))
    }

    /// Detail page of one course.
    pub fn course_url(&self, course_id: &str) -> String {
        format!(
            "{}/details?code={}",
            self.base_url.trim_end_matches('/'),
            course_id
        )
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            data_dir: default_data_dir(),
            base_url: default_base_url(),
            semester: default_semester(),
            request_delay_ms: default_request_delay_ms(),
        }
    }
}
