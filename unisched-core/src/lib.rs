//! Core types and logic for the unisched ecosystem.
//!
//! This crate provides everything the CLI builds on:
//! - `Course` and `Event` records for the scraped catalog
//! - `conflicts` for time-overlap detection among selected events
//! - `timetable` for the weekly and agenda views
//! - `catalog` / `selection` for the local JSON stores
//! - `parse` / `cache` for turning cached portal HTML into records
//! - `ics` for iCalendar export

pub mod cache;
pub mod catalog;
pub mod config;
pub mod conflicts;
pub mod course;
pub mod error;
pub mod event;
pub mod ics;
pub mod parse;
pub mod selection;
pub mod timetable;

pub use course::Course;
pub use error::{SchedError, SchedResult};
pub use event::{Event, EventKind};
