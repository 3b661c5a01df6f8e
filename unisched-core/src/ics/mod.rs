//! iCalendar (.ics) export.

mod generate;

pub use generate::generate_ics;
