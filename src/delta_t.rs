//! # ΔT (TT − UT) Correction
//!
//! Lunar phase times come out of the ephemeris on the Terrestrial Time axis.
//! Civil timestamps need Universal Time, so every phase instant is shifted by
//! ΔT = TT − UT. The model is the piecewise polynomial fit published by
//! Espenak & Meeus for the NASA eclipse canon; it is good to a second or two
//! over the range the ephemeris supports, far below the minute resolution the
//! calendar prints.

/// Returns ΔT in seconds for a decimal year (e.g. `2018.5`).
pub fn delta_t_seconds(year: f64) -> f64 {
    match year {
        y if y < 1800.0 => long_term(y),
        y if y < 1860.0 => {
            let t = y - 1800.0;
            13.72 - 0.332447 * t + 0.0068612 * t.powi(2) + 0.0041116 * t.powi(3)
                - 0.00037436 * t.powi(4)
                + 0.0000121272 * t.powi(5)
                - 0.0000001699 * t.powi(6)
                + 0.000000000875 * t.powi(7)
        }
        y if y < 1900.0 => {
            let t = y - 1860.0;
            7.62 + 0.5737 * t - 0.251754 * t.powi(2) + 0.01680668 * t.powi(3)
                - 0.0004473624 * t.powi(4)
                + t.powi(5) / 233_174.0
        }
        y if y < 1920.0 => {
            let t = y - 1900.0;
            -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3)
                - 0.000197 * t.powi(4)
        }
        y if y < 1941.0 => {
            let t = y - 1920.0;
            21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
        }
        y if y < 1961.0 => {
            let t = y - 1950.0;
            29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
        }
        y if y < 1986.0 => {
            let t = y - 1975.0;
            45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
        }
        y if y < 2005.0 => {
            let t = y - 2000.0;
            63.86 + 0.3345 * t - 0.060374 * t.powi(2)
                + 0.0017275 * t.powi(3)
                + 0.000651814 * t.powi(4)
                + 0.00002373599 * t.powi(5)
        }
        y if y < 2050.0 => {
            let t = y - 2000.0;
            62.92 + 0.32217 * t + 0.005589 * t.powi(2)
        }
        y if y < 2150.0 => long_term(y) - 0.5628 * (2150.0 - y),
        y => long_term(y),
    }
}

/// Long-term parabola, valid far outside the fitted intervals.
fn long_term(year: f64) -> f64 {
    let u = (year - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_t_2000() {
        // Observed value: 63.83 s
        assert!((delta_t_seconds(2000.0) - 63.83).abs() < 0.5);
    }

    #[test]
    fn delta_t_2018() {
        // Observed value: ~69 s, the fit runs slightly ahead
        let dt = delta_t_seconds(2018.0);
        assert!((68.0..=72.0).contains(&dt), "ΔT(2018) = {dt}");
    }

    #[test]
    fn delta_t_1900() {
        assert!((delta_t_seconds(1900.0) - -2.79).abs() < 1e-9);
    }

    #[test]
    fn delta_t_is_nearly_continuous_at_2050() {
        let before = delta_t_seconds(2049.999);
        let after = delta_t_seconds(2050.0);
        assert!((before - after).abs() < 2.0, "{before} vs {after}");
    }
}
