//! # HTML Template Substitution
//!
//! Templates are plain HTML with placeholders written as comments, so an
//! unfilled template still renders in a browser:
//!
//! ```html
//! <h1><!-- YEAR --></h1>
//! <td><!-- MOON_01_31 --></td>
//! ```
//!
//! Filling takes an immutable map from [`PlaceholderKey`] to markup and scans
//! the template once. Comments whose text is not a known key, or whose key has
//! no value in the map, are copied through unchanged.

use crate::error::{CalendarError, Result};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const OPEN: &str = "<!--";
const CLOSE: &str = "-->";

static BUILTIN: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/calendar.html"));

/// A placeholder slot in the calendar template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderKey {
    /// `YEAR`
    Year,
    /// `MOON_MM_DD`: the glyph for one day
    Moon { month: u32, day: u32 },
    /// `MOON_TABLE`: every day's glyph as a month-by-day table
    MoonTable,
    /// `NEW_MOONS`: new moon timestamps
    NewMoons,
    /// `FULL_MOONS`: full moon timestamps
    FullMoons,
}

impl fmt::Display for PlaceholderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceholderKey::Year => write!(f, "YEAR"),
            PlaceholderKey::Moon { month, day } => write!(f, "MOON_{month:02}_{day:02}"),
            PlaceholderKey::MoonTable => write!(f, "MOON_TABLE"),
            PlaceholderKey::NewMoons => write!(f, "NEW_MOONS"),
            PlaceholderKey::FullMoons => write!(f, "FULL_MOONS"),
        }
    }
}

/// Error for comment text that is not a placeholder
#[derive(Debug, PartialEq, Eq)]
pub struct UnknownPlaceholder;

impl FromStr for PlaceholderKey {
    type Err = UnknownPlaceholder;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "YEAR" => Ok(PlaceholderKey::Year),
            "MOON_TABLE" => Ok(PlaceholderKey::MoonTable),
            "NEW_MOONS" => Ok(PlaceholderKey::NewMoons),
            "FULL_MOONS" => Ok(PlaceholderKey::FullMoons),
            _ => {
                let rest = s.strip_prefix("MOON_").ok_or(UnknownPlaceholder)?;
                let (month, day) = rest.split_once('_').ok_or(UnknownPlaceholder)?;
                if month.len() != 2 || day.len() != 2 {
                    return Err(UnknownPlaceholder);
                }
                let month: u32 = month.parse().map_err(|_| UnknownPlaceholder)?;
                let day: u32 = day.parse().map_err(|_| UnknownPlaceholder)?;
                if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
                    return Err(UnknownPlaceholder);
                }
                Ok(PlaceholderKey::Moon { month, day })
            }
        }
    }
}

/// Markup for each placeholder, assembled once before filling.
pub type Placeholders = HashMap<PlaceholderKey, String>;

/// An HTML template with `<!-- KEY -->` placeholders.
#[derive(Debug, Clone)]
pub struct Template {
    text: String,
}

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The calendar template shipped with the crate.
    pub fn builtin() -> Self {
        Self::new(BUILTIN)
    }

    /// Read a template from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        fs::read_to_string(path)
            .map(Self::new)
            .map_err(CalendarError::Template)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Substitute every placeholder found in `values`, in a single pass.
    pub fn fill(&self, values: &Placeholders) -> String {
        let extra: usize = values.values().map(String::len).sum();
        let mut out = String::with_capacity(self.text.len() + extra);
        let mut rest = self.text.as_str();

        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let body = &rest[start + OPEN.len()..];
            let Some(end) = body.find(CLOSE) else {
                // Unterminated comment: copy the remainder verbatim
                out.push_str(&rest[start..]);
                return out;
            };

            let comment_len = OPEN.len() + end + CLOSE.len();
            let value = body[..end]
                .trim()
                .parse::<PlaceholderKey>()
                .ok()
                .and_then(|key| values.get(&key));
            match value {
                Some(markup) => out.push_str(markup),
                None => out.push_str(&rest[start..start + comment_len]),
            }
            rest = &rest[start + comment_len..];
        }

        out.push_str(rest);
        out
    }
}
