//! # Calendar Page Assembly
//!
//! Builds the placeholder map for a whole year and fills the template with it:
//! - `YEAR`: the year number
//! - `MOON_MM_DD`: one glyph per existing day
//! - `MOON_TABLE`: all glyphs as a 12 × 31 table, blank cells for missing days
//! - `NEW_MOONS` / `FULL_MOONS`: event timestamp spans
//!
//! Every value is computed before any substitution happens, so generation
//! order never matters.

use crate::ephemeris::Ephemeris;
use crate::error::{CalendarError, Result};
use crate::events::{enumerate, event_markup};
use crate::lunar::lunation_of;
use crate::renderer::MoonGlyphRenderer;
use crate::template::{PlaceholderKey, Placeholders, Template};
use crate::{EventKind, MoonEvent};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// New and full moons of one year, as exported to JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearEvents {
    pub year: i32,
    pub new_moons: Vec<MoonEvent>,
    pub full_moons: Vec<MoonEvent>,
}

impl YearEvents {
    /// Enumerate both event kinds for `year`.
    pub fn compute<E: Ephemeris + ?Sized>(ephemeris: &E, year: i32) -> Result<Self> {
        Ok(Self {
            year,
            new_moons: enumerate(year, |at| ephemeris.next_new_moon(at))?,
            full_moons: enumerate(year, |at| ephemeris.next_full_moon(at))?,
        })
    }

    pub fn of_kind(&self, kind: EventKind) -> &[MoonEvent] {
        match kind {
            EventKind::NewMoon => &self.new_moons,
            EventKind::FullMoon => &self.full_moons,
        }
    }

    /// Write the events as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(CalendarError::Output)
    }
}

/// Computes glyphs and events for a year and renders the calendar page.
pub struct CalendarPageBuilder<'a, E: Ephemeris + ?Sized> {
    ephemeris: &'a E,
    renderer: MoonGlyphRenderer,
}

impl<'a, E: Ephemeris + ?Sized> CalendarPageBuilder<'a, E> {
    pub fn new(ephemeris: &'a E, renderer: MoonGlyphRenderer) -> Self {
        Self {
            ephemeris,
            renderer,
        }
    }

    /// Glyph markup for every day of `year`, in date order.
    pub fn glyphs(&self, year: i32) -> Result<Vec<(NaiveDate, String)>> {
        let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(CalendarError::InvalidArgument {
            name: "year",
            value: year as f64,
        })?;
        first
            .iter_days()
            .take_while(|date| date.year() == year)
            .map(|date| {
                let lunation = lunation_of(self.ephemeris, date)?;
                Ok::<_, CalendarError>((date, self.renderer.svg(lunation)?))
            })
            .collect()
    }

    /// The complete placeholder map for `year`.
    pub fn placeholders(&self, year: i32) -> Result<(Placeholders, YearEvents)> {
        let glyphs = self.glyphs(year)?;
        let events = YearEvents::compute(self.ephemeris, year)?;

        let mut values = Placeholders::with_capacity(glyphs.len() + 4);
        values.insert(PlaceholderKey::Year, year.to_string());
        values.insert(PlaceholderKey::MoonTable, moon_table(&glyphs));
        values.insert(
            PlaceholderKey::NewMoons,
            event_markup(&events.new_moons, EventKind::NewMoon),
        );
        values.insert(
            PlaceholderKey::FullMoons,
            event_markup(&events.full_moons, EventKind::FullMoon),
        );
        for (date, svg) in glyphs {
            let key = PlaceholderKey::Moon {
                month: date.month(),
                day: date.day(),
            };
            values.insert(key, svg);
        }
        Ok((values, events))
    }

    /// Render the page for `year` from `template`.
    pub fn build(&self, template: &Template, year: i32) -> Result<CalendarPage> {
        let (values, events) = self.placeholders(year)?;
        Ok(CalendarPage {
            year,
            html: template.fill(&values),
            events,
        })
    }
}

/// A rendered calendar, ready to be written out.
#[derive(Debug, Clone)]
pub struct CalendarPage {
    pub year: i32,
    pub html: String,
    pub events: YearEvents,
}

impl CalendarPage {
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, &self.html).map_err(CalendarError::Output)
    }
}

/// One row per month, one cell per day number 1..=31.
fn moon_table(glyphs: &[(NaiveDate, String)]) -> String {
    let mut rows: [Vec<&str>; 12] = Default::default();
    for (date, svg) in glyphs {
        rows[date.month0() as usize].push(svg);
    }

    let mut html = String::from("<table class=\"moons\">\n<thead><tr><th></th>");
    for day in 1..=31 {
        let _ = write!(html, "<th>{day}</th>");
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for (month, days) in rows.iter().enumerate() {
        let _ = write!(html, "<tr><th>{}</th>", MONTH_ABBREV[month]);
        for day in 0..31 {
            match days.get(day) {
                Some(svg) => {
                    let _ = write!(html, "<td>{svg}</td>");
                }
                None => html.push_str("<td></td>"),
            }
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>");
    html
}
