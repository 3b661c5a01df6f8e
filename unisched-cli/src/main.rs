mod commands;
mod render;
mod scrape;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use unisched_core::catalog::Catalog;
use unisched_core::config::GlobalConfig;

#[derive(Parser)]
#[command(name = "unisched")]
#[command(about = "Scrape the UniLU course catalog, pick courses and spot schedule conflicts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search courses by id, title or instructor
    Search {
        text: String,
    },
    /// Add a course to the selection
    Add {
        /// Course id (e.g. FS261059)
        course_id: String,
    },
    /// Remove a course from the selection
    Remove {
        /// Course id (e.g. FS261059)
        course_id: String,
    },
    /// List the selected courses
    Selected,
    /// Show schedule conflicts among the selected courses
    Conflicts,
    /// Weekly timetable of the selected courses
    Timetable {
        /// Only show this ISO week (e.g. 2026-W08)
        #[arg(short, long)]
        week: Option<String>,
    },
    /// All selected events in date order
    Agenda,
    /// Export the selected events to an .ics file
    Export {
        /// Output file path (e.g. schedule.ics)
        out: PathBuf,
    },
    /// Scrape the portal and rebuild the local catalog
    Update {
        /// Semester code (e.g. FS26, HS25); defaults to the configured one
        #[arg(short, long)]
        semester: Option<String>,

        /// Re-fetch pages that are already cached
        #[arg(long)]
        refresh: bool,
    },
    /// Interactive menu mode
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = GlobalConfig::load()?;

    match cli.command {
        Commands::Search { text } => {
            require_catalog(&config)?;
            commands::search::run(&config, &text)
        }
        Commands::Add { course_id } => commands::add::run(&config, &course_id),
        Commands::Remove { course_id } => commands::remove::run(&config, &course_id),
        Commands::Selected => commands::selected::run(&config),
        Commands::Conflicts => {
            require_catalog(&config)?;
            commands::conflicts::run(&config)
        }
        Commands::Timetable { week } => {
            require_catalog(&config)?;
            commands::timetable::run(&config, week.as_deref())
        }
        Commands::Agenda => {
            require_catalog(&config)?;
            commands::agenda::run(&config)
        }
        Commands::Export { out } => {
            require_catalog(&config)?;
            commands::export::run(&config, &out)
        }
        Commands::Update { semester, refresh } => {
            commands::update::run(&config, semester.as_deref(), refresh).await
        }
        Commands::Interactive => commands::interactive::run(&config).await,
    }
}

fn require_catalog(config: &GlobalConfig) -> Result<()> {
    if Catalog::load(config).is_empty() {
        anyhow::bail!(
            "No catalog data found.\n\n\
            Scrape the portal first with:\n  \
            unisched update\n\n\
            Or pick a semester explicitly:\n  \
            unisched update --semester FS26"
        );
    }

    Ok(())
}
