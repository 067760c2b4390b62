//! # New and Full Moon Enumeration
//!
//! Lists every new moon (or full moon) of a calendar year by walking the
//! ephemeris forward from Jan 1 00:00.
//!
//! ## Lookahead Truncation
//! The walk has no way to know an event belongs to the next year until it has
//! computed it. So it keeps stepping until one instant lands on or after
//! Jan 1 00:00 of the following year, then drops that lookahead instant. The
//! last kept event is therefore always inside `year`, and a year boundary
//! event exactly at midnight belongs to the new year.
//!
//! ## Second In Month
//! An event whose month equals the previous event's month is flagged. With a
//! synodic month of ~29.5 days this happens for at most one event per month,
//! and only in months of 30 or 31 days.

use crate::error::{CalendarError, Result};
use crate::{EventKind, MoonEvent};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Enumerate the events of `year` produced by repeatedly calling `next`.
///
/// `next` must return the first event strictly after its argument, e.g.
/// [`Ephemeris::next_new_moon`](crate::ephemeris::Ephemeris::next_new_moon).
/// Errors from `next` are returned unchanged.
pub fn enumerate<F>(year: i32, mut next: F) -> Result<Vec<MoonEvent>>
where
    F: FnMut(NaiveDateTime) -> Result<NaiveDateTime>,
{
    let start = new_year(year)?;
    let end = new_year(year + 1)?;

    let mut instants = Vec::with_capacity(14);
    let mut date = start;
    loop {
        date = next(date)?;
        instants.push(date);
        if date >= end {
            break;
        }
    }
    // Drop the lookahead instant that crossed into the next year.
    instants.pop();

    let mut events = Vec::with_capacity(instants.len());
    let mut previous_month = None;
    for instant in instants {
        let month = instant.month();
        events.push(MoonEvent {
            instant,
            second_in_month: previous_month == Some(month),
        });
        previous_month = Some(month);
    }
    Ok(events)
}

/// HTML spans for an event list, one per event, in order.
///
/// ```text
/// <span class="moon-event">02 Jan 02:24</span>
/// <span class="moon-event blue-moon">31 Jan 13:27</span>
/// ```
pub fn event_markup(events: &[MoonEvent], kind: EventKind) -> String {
    events
        .iter()
        .map(|event| {
            let class = if event.second_in_month {
                format!("moon-event {}", kind.second_in_month_class())
            } else {
                "moon-event".to_string()
            };
            format!(r#"<span class="{class}">{}</span>"#, event.timestamp())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn new_year(year: i32) -> Result<NaiveDateTime> {
    NaiveDate::from_yo_opt(year, 1)
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
        .ok_or(CalendarError::InvalidArgument {
            name: "year",
            value: year as f64,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_lookahead_is_dropped() {
        let mut calls = 0;
        let events = enumerate(2021, |d| {
            calls += 1;
            Ok(d + Duration::days(30))
        })
        .unwrap();

        // Jan 31, Mar 2, ..., Dec 27: twelve steps inside 2021, one past it
        assert_eq!(events.len(), 12);
        assert_eq!(calls, 13);
        assert!(events.iter().all(|e| e.instant.year() == 2021));
        assert_eq!(events.last().unwrap().instant, at(2021, 12, 27, 0));
    }

    #[test]
    fn test_event_exactly_at_new_year_belongs_to_next_year() {
        let script = [at(2021, 6, 1, 0), at(2022, 1, 1, 0)];
        let mut it = script.iter().copied();
        let events = enumerate(2021, |_| Ok(it.next().unwrap())).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].instant, at(2021, 6, 1, 0));
    }

    #[test]
    fn test_second_in_month_flag() {
        let script = [
            at(2021, 1, 1, 3),
            at(2021, 1, 30, 12),
            at(2021, 3, 1, 0),
            at(2021, 3, 30, 0),
            at(2021, 4, 29, 0),
            at(2022, 1, 2, 0),
        ];
        let mut it = script.iter().copied();
        let events = enumerate(2021, |_| Ok(it.next().unwrap())).unwrap();
        let flags: Vec<bool> = events.iter().map(|e| e.second_in_month).collect();
        assert_eq!(flags, vec![false, true, false, true, false]);
    }

    #[test]
    fn test_error_propagates() {
        let result = enumerate(2021, |d| {
            if d.month() >= 6 {
                Err(CalendarError::DateOutOfRange(d))
            } else {
                Ok(d + Duration::days(29))
            }
        });
        assert!(matches!(result, Err(CalendarError::DateOutOfRange(_))));
    }

    #[test]
    fn test_markup_marks_second_event() {
        let events = [
            MoonEvent {
                instant: at(2018, 1, 2, 2),
                second_in_month: false,
            },
            MoonEvent {
                instant: at(2018, 1, 31, 13),
                second_in_month: true,
            },
        ];
        let markup = event_markup(&events, EventKind::FullMoon);
        assert_eq!(
            markup,
            "<span class=\"moon-event\">02 Jan 02:00</span>\n\
             <span class=\"moon-event blue-moon\">31 Jan 13:00</span>"
        );
        assert!(event_markup(&events, EventKind::NewMoon).contains("black-moon"));
    }

    #[test]
    fn test_empty_markup() {
        assert_eq!(event_markup(&[], EventKind::NewMoon), "");
    }
}
