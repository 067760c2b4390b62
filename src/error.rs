//! # Error Types
//!
//! Every fallible operation in the library returns [`CalendarError`]. The
//! geometry layer rejects numeric input it cannot draw, the ephemeris rejects
//! dates outside its supported range, and the page layer wraps file I/O.
//! Nothing here is retried; an error aborts the computation that raised it.

use chrono::NaiveDateTime;
use std::io;
use thiserror::Error;

/// Errors that can occur while computing glyphs, events or the calendar page.
#[derive(Error, Debug)]
pub enum CalendarError {
    /// A numeric argument fell outside its contract (lunation, disc radius).
    #[error("invalid {name}: {value}")]
    InvalidArgument { name: &'static str, value: f64 },

    /// The ephemeris cannot resolve events around this instant
    #[error("date out of ephemeris range: {0}")]
    DateOutOfRange(NaiveDateTime),

    /// Template file could not be read
    #[error("template IO: {0}")]
    Template(#[source] io::Error),

    /// Output page or event export could not be written
    #[error("output IO: {0}")]
    Output(#[source] io::Error),

    /// Event export serialization failed
    #[error("event export: {0}")]
    Export(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CalendarError>;
