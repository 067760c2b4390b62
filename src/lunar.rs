//! Lunation (fractional position within the synodic month) for a calendar day.
//!
//! The lunation of an instant is its elapsed fraction of the new-moon-to-new-moon
//! cycle that contains it: 0.0 at new moon, ≈0.5 at full moon, approaching 1.0
//! just before the next new moon. Days are anchored to 00:00 UTC.

use crate::ephemeris::Ephemeris;
use crate::error::Result;
use chrono::{NaiveDate, NaiveDateTime};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Lunation of `date` at midnight UTC, in `[0, 1)`.
pub fn lunation_of<E: Ephemeris + ?Sized>(ephemeris: &E, date: NaiveDate) -> Result<f64> {
    lunation_at(ephemeris, date.and_time(chrono::NaiveTime::MIN))
}

/// Lunation of an arbitrary instant, in `[0, 1)`.
pub fn lunation_at<E: Ephemeris + ?Sized>(ephemeris: &E, at: NaiveDateTime) -> Result<f64> {
    let preceding = ephemeris.previous_new_moon(at)?;
    let following = ephemeris.next_new_moon(at)?;

    let elapsed = (at - preceding).num_milliseconds() as f64 / MILLIS_PER_DAY;
    let period = (following - preceding).num_milliseconds() as f64 / MILLIS_PER_DAY;

    Ok(elapsed / period)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::MeeusEphemeris;
    use crate::error::CalendarError;
    use chrono::Duration;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Provider with a fixed 29.5 day cycle starting at 2020-01-01 00:00.
    struct FixedCycle;

    impl FixedCycle {
        fn epoch() -> NaiveDateTime {
            day(2020, 1, 1).and_hms_opt(0, 0, 0).unwrap()
        }

        fn period() -> Duration {
            Duration::hours(708)
        }
    }

    impl Ephemeris for FixedCycle {
        fn previous_new_moon(&self, at: NaiveDateTime) -> Result<NaiveDateTime> {
            let mut t = Self::epoch();
            while t + Self::period() <= at {
                t += Self::period();
            }
            Ok(t)
        }

        fn next_new_moon(&self, at: NaiveDateTime) -> Result<NaiveDateTime> {
            Ok(self.previous_new_moon(at)? + Self::period())
        }

        fn next_full_moon(&self, at: NaiveDateTime) -> Result<NaiveDateTime> {
            Err(CalendarError::DateOutOfRange(at))
        }
    }

    #[test]
    fn test_lunation_with_fixed_cycle() {
        assert_eq!(lunation_of(&FixedCycle, day(2020, 1, 1)).unwrap(), 0.0);
        let quarter = lunation_at(&FixedCycle, FixedCycle::epoch() + Duration::hours(177)).unwrap();
        assert!((quarter - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_lunation_near_full_moon() {
        // Full moon on 2018-01-31 13:27 UTC
        let l = lunation_of(&MeeusEphemeris::new(), day(2018, 1, 31)).unwrap();
        assert!((0.45..0.5).contains(&l), "lunation = {l}");
    }

    #[test]
    fn test_lunation_just_before_new_moon() {
        // New moon on 2018-01-17 02:17 UTC, so midnight still belongs to the old cycle
        let l = lunation_of(&MeeusEphemeris::new(), day(2018, 1, 17)).unwrap();
        assert!((0.99..1.0).contains(&l), "lunation = {l}");
    }

    #[test]
    fn test_lunation_range_over_a_year() {
        let eph = MeeusEphemeris::new();
        for d in day(2018, 1, 1).iter_days().take(365) {
            let l = lunation_of(&eph, d).unwrap();
            assert!((0.0..1.0).contains(&l), "{d}: lunation {l}");
        }
    }

    #[test]
    fn test_lunation_propagates_range_error() {
        let err = lunation_of(&MeeusEphemeris::new(), day(1650, 3, 1)).unwrap_err();
        assert!(matches!(err, CalendarError::DateOutOfRange(_)));
    }
}
