//! # Lunar Calendar Core Library
//!
//! This library renders a yearly HTML calendar in which every day carries a
//! small SVG picture of the moon's phase, followed by the year's new-moon and
//! full-moon timestamps.
//!
//! ## Data Flow
//! 1. **Per day**: date → [`lunar::lunation_of`] → [`terminator::compute_terminator`]
//!    → [`renderer::MoonGlyphRenderer`] → SVG markup
//! 2. **Per year**: year → [`events::enumerate`] → [`MoonEvent`] list → markup spans
//! 3. **Page**: [`page::CalendarPageBuilder`] collects everything into a
//!    placeholder map and [`template::Template`] substitutes it in one pass
//!
//! All instants are UTC `chrono::NaiveDateTime` values supplied by an
//! [`ephemeris::Ephemeris`]; the bundled [`ephemeris::MeeusEphemeris`] covers
//! 1800 to 2199.
//!
//! ## Core Types
//! - [`MoonEvent`]: one new or full moon instant, flagged when it is the
//!   second of its kind in a calendar month
//! - [`EventKind`]: which of the two events a sequence holds

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// Module declarations
pub mod config;
pub mod delta_t;
pub mod ephemeris;
pub mod error;
pub mod events;
pub mod lunar;
pub mod page;
pub mod renderer;
pub mod template;
pub mod terminator;

#[cfg(test)]
mod tests;

pub use error::{CalendarError, Result};

/// A new or full moon instant within a calendar year.
///
/// `second_in_month` marks the rare second occurrence of the same event in
/// one calendar month: a black moon for new moons, a blue moon for full moons.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use lunar_calendar_lib::MoonEvent;
///
/// let instant = NaiveDate::from_ymd_opt(2018, 1, 31)
///     .unwrap()
///     .and_hms_opt(13, 27, 0)
///     .unwrap();
/// let event = MoonEvent { instant, second_in_month: true };
///
/// assert_eq!(event.timestamp(), "31 Jan 13:27");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoonEvent {
    /// Instant of the event in UTC
    pub instant: NaiveDateTime,
    /// Same calendar month as the previous event of this kind
    pub second_in_month: bool,
}

impl MoonEvent {
    /// `DD Mon HH:MM`, truncated to the minute.
    pub fn timestamp(&self) -> String {
        self.instant.format("%d %b %H:%M").to_string()
    }
}

/// The two lunar phases the calendar lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    NewMoon,
    FullMoon,
}

impl EventKind {
    pub const ALL: [EventKind; 2] = [EventKind::NewMoon, EventKind::FullMoon];

    /// CSS class added to the second event of a month.
    pub fn second_in_month_class(self) -> &'static str {
        match self {
            EventKind::NewMoon => "black-moon",
            EventKind::FullMoon => "blue-moon",
        }
    }
}
