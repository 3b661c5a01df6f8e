pub mod add;
pub mod agenda;
pub mod conflicts;
pub mod export;
pub mod interactive;
pub mod remove;
pub mod search;
pub mod selected;
pub mod timetable;
pub mod update;

use indicatif::{ProgressBar, ProgressStyle};

/// Number of search hits printed before truncating.
pub const MAX_SEARCH_RESULTS: usize = 20;

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["-", "\\", "|", "/"])
            .template("{msg} {spinner}")
            .unwrap(),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}
