//! # Lunar Phase Ephemeris
//!
//! Finds the instants of new and full moon around a given date. The calendar
//! only ever asks three questions ("previous new moon", "next new moon",
//! "next full moon"), captured by the [`Ephemeris`] trait so the geometry and
//! enumeration code can be tested against scripted providers.
//!
//! ## Algorithm
//!
//! [`MeeusEphemeris`] implements the phase algorithm from Meeus,
//! *Astronomical Algorithms* (2nd ed.), chapter 49:
//! 1. **Mean phase**: polynomial in the lunation number `k` (integer for new
//!    moon, `+0.5` for full moon, `k = 0` at the new moon of 2000-01-06)
//! 2. **Periodic terms**: 25 sine terms in the Sun's and Moon's anomalies,
//!    the Moon's argument of latitude and the node longitude
//! 3. **Planetary terms**: 14 small corrections for planetary perturbations
//! 4. **TT → UT**: subtract ΔT (see [`crate::delta_t`])
//!
//! The result is within a few tens of seconds of the true instant between
//! 1800 and 2200, well inside the minute resolution of the printed calendar.
//!
//! ## Time Representation
//! All instants are `chrono::NaiveDateTime` in UTC, rounded to the millisecond.
//! Subtracting two instants yields a `chrono::Duration`.

use crate::delta_t::delta_t_seconds;
use crate::error::{CalendarError, Result};
use crate::EventKind;
use chrono::{DateTime, Datelike, NaiveDateTime};
use std::ops::RangeInclusive;

/// Source of new and full moon instants.
///
/// "Next" is strictly after the query instant, "previous" is at or before it,
/// so a date bracketed by `previous_new_moon` and `next_new_moon` always has
/// a lunation in `[0, 1)`.
pub trait Ephemeris {
    /// Latest new moon at or before `at`.
    fn previous_new_moon(&self, at: NaiveDateTime) -> Result<NaiveDateTime>;

    /// Earliest new moon strictly after `at`.
    fn next_new_moon(&self, at: NaiveDateTime) -> Result<NaiveDateTime>;

    /// Earliest full moon strictly after `at`.
    fn next_full_moon(&self, at: NaiveDateTime) -> Result<NaiveDateTime>;

    /// Dispatch to the `next_*` query for an event kind.
    fn next_event(&self, kind: EventKind, at: NaiveDateTime) -> Result<NaiveDateTime> {
        match kind {
            EventKind::NewMoon => self.next_new_moon(at),
            EventKind::FullMoon => self.next_full_moon(at),
        }
    }
}

/// Calendar years for which query dates are accepted.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1800..=2199;

/// Mean synodic month in days
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_861;

/// JDE of the mean new moon with lunation number 0 (2000-01-06)
const EPOCH_JDE: f64 = 2_451_550.097_66;

/// Julian day of 1970-01-01T00:00Z
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

// Periodic terms: [amplitude (days), power of E, nM, nM', nF, nΩ]
#[rustfmt::skip]
static NEW_MOON_TERMS: [[f64; 6]; 25] = [
    [-0.407_20, 0.0,  0.0, 1.0,  0.0, 0.0],
    [ 0.172_41, 1.0,  1.0, 0.0,  0.0, 0.0],
    [ 0.016_08, 0.0,  0.0, 2.0,  0.0, 0.0],
    [ 0.010_39, 0.0,  0.0, 0.0,  2.0, 0.0],
    [ 0.007_39, 1.0, -1.0, 1.0,  0.0, 0.0],
    [-0.005_14, 1.0,  1.0, 1.0,  0.0, 0.0],
    [ 0.002_08, 2.0,  2.0, 0.0,  0.0, 0.0],
    [-0.001_11, 0.0,  0.0, 1.0, -2.0, 0.0],
    [-0.000_57, 0.0,  0.0, 1.0,  2.0, 0.0],
    [ 0.000_56, 1.0,  1.0, 2.0,  0.0, 0.0],
    [-0.000_42, 0.0,  0.0, 3.0,  0.0, 0.0],
    [ 0.000_42, 1.0,  1.0, 0.0,  2.0, 0.0],
    [ 0.000_38, 1.0,  1.0, 0.0, -2.0, 0.0],
    [-0.000_24, 1.0, -1.0, 2.0,  0.0, 0.0],
    [-0.000_17, 0.0,  0.0, 0.0,  0.0, 1.0],
    [-0.000_07, 0.0,  2.0, 1.0,  0.0, 0.0],
    [ 0.000_04, 0.0,  0.0, 2.0, -2.0, 0.0],
    [ 0.000_04, 0.0,  3.0, 0.0,  0.0, 0.0],
    [ 0.000_03, 0.0,  1.0, 1.0, -2.0, 0.0],
    [ 0.000_03, 0.0,  0.0, 2.0,  2.0, 0.0],
    [-0.000_03, 0.0,  1.0, 1.0,  2.0, 0.0],
    [ 0.000_03, 0.0, -1.0, 1.0,  2.0, 0.0],
    [-0.000_02, 0.0, -1.0, 1.0, -2.0, 0.0],
    [-0.000_02, 0.0,  1.0, 3.0,  0.0, 0.0],
    [ 0.000_02, 0.0,  0.0, 4.0,  0.0, 0.0],
];

#[rustfmt::skip]
static FULL_MOON_TERMS: [[f64; 6]; 25] = [
    [-0.406_14, 0.0,  0.0, 1.0,  0.0, 0.0],
    [ 0.173_02, 1.0,  1.0, 0.0,  0.0, 0.0],
    [ 0.016_14, 0.0,  0.0, 2.0,  0.0, 0.0],
    [ 0.010_43, 0.0,  0.0, 0.0,  2.0, 0.0],
    [ 0.007_34, 1.0, -1.0, 1.0,  0.0, 0.0],
    [-0.005_15, 1.0,  1.0, 1.0,  0.0, 0.0],
    [ 0.002_09, 2.0,  2.0, 0.0,  0.0, 0.0],
    [-0.001_11, 0.0,  0.0, 1.0, -2.0, 0.0],
    [-0.000_57, 0.0,  0.0, 1.0,  2.0, 0.0],
    [ 0.000_56, 1.0,  1.0, 2.0,  0.0, 0.0],
    [-0.000_42, 0.0,  0.0, 3.0,  0.0, 0.0],
    [ 0.000_42, 1.0,  1.0, 0.0,  2.0, 0.0],
    [ 0.000_38, 1.0,  1.0, 0.0, -2.0, 0.0],
    [-0.000_24, 1.0, -1.0, 2.0,  0.0, 0.0],
    [-0.000_17, 0.0,  0.0, 0.0,  0.0, 1.0],
    [-0.000_07, 0.0,  2.0, 1.0,  0.0, 0.0],
    [ 0.000_04, 0.0,  0.0, 2.0, -2.0, 0.0],
    [ 0.000_04, 0.0,  3.0, 0.0,  0.0, 0.0],
    [ 0.000_03, 0.0,  1.0, 1.0, -2.0, 0.0],
    [ 0.000_03, 0.0,  0.0, 2.0,  2.0, 0.0],
    [-0.000_03, 0.0,  1.0, 1.0,  2.0, 0.0],
    [ 0.000_03, 0.0, -1.0, 1.0,  2.0, 0.0],
    [-0.000_02, 0.0, -1.0, 1.0, -2.0, 0.0],
    [-0.000_02, 0.0,  1.0, 3.0,  0.0, 0.0],
    [ 0.000_02, 0.0,  0.0, 4.0,  0.0, 0.0],
];

// Planetary arguments A1..A14: [amplitude (days), base (deg), rate per lunation (deg)]
#[rustfmt::skip]
static PLANETARY_TERMS: [[f64; 3]; 14] = [
    [0.000_325, 299.77,  0.107_408],
    [0.000_165, 251.88,  0.016_321],
    [0.000_164, 251.83, 26.651_886],
    [0.000_126, 349.42, 36.412_478],
    [0.000_110,  84.66, 18.206_239],
    [0.000_062, 141.74, 53.303_771],
    [0.000_060, 207.14,  2.453_732],
    [0.000_056, 154.84,  7.306_860],
    [0.000_047,  34.52, 27.261_239],
    [0.000_042, 207.19,  0.121_824],
    [0.000_040, 291.34,  1.844_379],
    [0.000_037, 161.72, 24.198_154],
    [0.000_035, 239.56, 25.513_099],
    [0.000_023, 331.55,  3.592_518],
];

/// Meeus chapter 49 phase ephemeris.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeeusEphemeris;

impl MeeusEphemeris {
    pub fn new() -> Self {
        Self
    }

    /// Latest full moon at or before `at`.
    pub fn previous_full_moon(&self, at: NaiveDateTime) -> Result<NaiveDateTime> {
        phase_at_or_before(at, EventKind::FullMoon)
    }
}

impl Ephemeris for MeeusEphemeris {
    fn previous_new_moon(&self, at: NaiveDateTime) -> Result<NaiveDateTime> {
        phase_at_or_before(at, EventKind::NewMoon)
    }

    fn next_new_moon(&self, at: NaiveDateTime) -> Result<NaiveDateTime> {
        phase_after(at, EventKind::NewMoon)
    }

    fn next_full_moon(&self, at: NaiveDateTime) -> Result<NaiveDateTime> {
        phase_after(at, EventKind::FullMoon)
    }
}

/// Fractional lunation number of the phase, ignoring `k`'s integer part.
fn cycle_offset(kind: EventKind) -> f64 {
    match kind {
        EventKind::NewMoon => 0.0,
        EventKind::FullMoon => 0.5,
    }
}

fn phase_after(at: NaiveDateTime, kind: EventKind) -> Result<NaiveDateTime> {
    let at_ms = query_millis(at)?;
    let mut k = mean_lunation_number(at_ms) - 1.0 + cycle_offset(kind);
    // Millisecond comparison keeps "strictly after" exact for instants this
    // module returned itself.
    while phase_millis(k, kind) <= at_ms {
        k += 1.0;
    }
    from_millis(phase_millis(k, kind), at)
}

fn phase_at_or_before(at: NaiveDateTime, kind: EventKind) -> Result<NaiveDateTime> {
    let at_ms = query_millis(at)?;
    let mut k = mean_lunation_number(at_ms) + 2.0 + cycle_offset(kind);
    while phase_millis(k, kind) > at_ms {
        k -= 1.0;
    }
    from_millis(phase_millis(k, kind), at)
}

fn query_millis(at: NaiveDateTime) -> Result<i64> {
    if !SUPPORTED_YEARS.contains(&at.year()) {
        return Err(CalendarError::DateOutOfRange(at));
    }
    Ok(at.and_utc().timestamp_millis())
}

/// Integer lunation number of the last mean new moon before `at_ms`.
fn mean_lunation_number(at_ms: i64) -> f64 {
    let jd = at_ms as f64 / MILLIS_PER_DAY + UNIX_EPOCH_JD;
    ((jd - EPOCH_JDE) / SYNODIC_MONTH_DAYS).floor()
}

/// UT instant of lunation `k` as Unix milliseconds.
fn phase_millis(k: f64, kind: EventKind) -> i64 {
    let jde = true_phase_jde(k, kind);
    let year = 2000.0 + (jde - 2_451_545.0) / 365.25;
    let jd_ut = jde - delta_t_seconds(year) / 86_400.0;
    ((jd_ut - UNIX_EPOCH_JD) * MILLIS_PER_DAY).round() as i64
}

fn from_millis(ms: i64, query: NaiveDateTime) -> Result<NaiveDateTime> {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.naive_utc())
        .ok_or(CalendarError::DateOutOfRange(query))
}

/// Julian Ephemeris Day (TT) of the true phase with lunation number `k`.
pub(crate) fn true_phase_jde(k: f64, kind: EventKind) -> f64 {
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let mean = EPOCH_JDE + SYNODIC_MONTH_DAYS * k + 0.000_154_37 * t2 - 0.000_000_150 * t3
        + 0.000_000_000_73 * t4;

    // Eccentricity of Earth's orbit
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;
    // Sun's mean anomaly
    let m = (2.5534 + 29.105_356_70 * k - 0.000_001_4 * t2 - 0.000_000_11 * t3).to_radians();
    // Moon's mean anomaly
    let m_prime = (201.5643 + 385.816_935_28 * k + 0.010_758_2 * t2 + 0.000_012_38 * t3
        - 0.000_000_058 * t4)
        .to_radians();
    // Moon's argument of latitude
    let f = (160.7108 + 390.670_502_84 * k - 0.001_611_8 * t2 - 0.000_002_27 * t3
        + 0.000_000_011 * t4)
        .to_radians();
    // Longitude of the ascending node
    let omega = (124.7746 - 1.563_755_88 * k + 0.002_067_2 * t2 + 0.000_002_15 * t3).to_radians();

    let terms = match kind {
        EventKind::NewMoon => &NEW_MOON_TERMS,
        EventKind::FullMoon => &FULL_MOON_TERMS,
    };
    let periodic: f64 = terms
        .iter()
        .map(|term| {
            let angle = term[2] * m + term[3] * m_prime + term[4] * f + term[5] * omega;
            term[0] * e.powi(term[1] as i32) * angle.sin()
        })
        .sum();

    let planetary: f64 = PLANETARY_TERMS
        .iter()
        .enumerate()
        .map(|(i, term)| {
            let mut arg = term[1] + term[2] * k;
            if i == 0 {
                arg -= 0.009_173 * t2;
            }
            term[0] * arg.to_radians().sin()
        })
        .sum();

    mean + periodic + planetary
}
