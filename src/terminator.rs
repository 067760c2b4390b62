//! # Terminator Geometry
//!
//! The terminator (the light/shadow boundary on the lunar disc) is an ellipse
//! in orthographic projection. For drawing it is approximated by the circular
//! arc that passes through the top and bottom of the disc and crosses the
//! equator at the terminator's true horizontal offset.
//!
//! ## Cycle Quarters
//!
//! | lunation       | depth `L`       | arc bulges right | lit from left |
//! |----------------|-----------------|------------------|---------------|
//! | `[0, 0.25]`    | `l`             | yes              | no            |
//! | `(0.25, 0.5]`  | `0.5 - l`       | no               | no            |
//! | `(0.5, 0.75]`  | `l - 0.5`       | yes              | yes           |
//! | `(0.75, 1)`    | `1 - l`         | no               | yes           |
//!
//! ## Arc Radius
//!
//! With disc radius `r`, the terminator sits `x = r(1 - cos 2πL)` in from the
//! limb, leaving a sagitta `n = r - x`. The circle through both poles with that
//! sagitta has radius `(r² + n²) / 2n`.
//!
//! At the quarters (`L = 0.25`) the sagitta vanishes and the terminator is a
//! straight line. The sagitta is clamped to [`MIN_SAGITTA_FRACTION`] of the
//! radius there, so the arc radius stays finite and the SVG stays valid.

use crate::error::{CalendarError, Result};

/// Smallest sagitta, as a fraction of the disc radius, used for the arc.
pub const MIN_SAGITTA_FRACTION: f64 = 1e-6;

/// Shape of the terminator arc for one lunation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminatorDescriptor {
    /// Radius of the circular arc approximating the terminator
    pub arc_radius: f64,
    /// The arc bulges to the right of the disc's vertical diameter
    pub right_of_center: bool,
    /// The left-hand region of the disc is the illuminated one
    pub lit_from_left: bool,
}

impl TerminatorDescriptor {
    /// True when the sagitta had to be clamped (terminator drawn as a line).
    pub fn is_straight(&self, disc_radius: f64) -> bool {
        let max = arc_radius(disc_radius, disc_radius * MIN_SAGITTA_FRACTION);
        self.arc_radius >= max * (1.0 - 1e-9)
    }
}

/// Compute the terminator arc for `lunation` on a disc of `disc_radius`.
///
/// Lunation must lie in `[0, 1)` and the radius must be positive and finite;
/// anything else is rejected with [`CalendarError::InvalidArgument`].
pub fn compute_terminator(lunation: f64, disc_radius: f64) -> Result<TerminatorDescriptor> {
    if !(0.0..1.0).contains(&lunation) {
        return Err(CalendarError::InvalidArgument {
            name: "lunation",
            value: lunation,
        });
    }
    if !disc_radius.is_finite() || disc_radius <= 0.0 {
        return Err(CalendarError::InvalidArgument {
            name: "disc radius",
            value: disc_radius,
        });
    }

    let (depth, right_of_center, lit_from_left) = if lunation <= 0.25 {
        (lunation, true, false)
    } else if lunation <= 0.5 {
        (0.5 - lunation, false, false)
    } else if lunation <= 0.75 {
        (lunation - 0.5, true, true)
    } else {
        (1.0 - lunation, false, true)
    };

    let r = disc_radius;
    let x = r * (1.0 - (std::f64::consts::TAU * depth).cos());
    let sagitta = (r - x).max(r * MIN_SAGITTA_FRACTION);

    Ok(TerminatorDescriptor {
        arc_radius: arc_radius(r, sagitta),
        right_of_center,
        lit_from_left,
    })
}

fn arc_radius(r: f64, sagitta: f64) -> f64 {
    (r * r + sagitta * sagitta) / (2.0 * sagitta)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Lunations sampled across the open cycle, including every quarter boundary.
    fn samples() -> Vec<f64> {
        let mut values: Vec<f64> = (1..1000).map(|i| i as f64 / 1000.0).collect();
        values.extend([1e-9, 0.25, 0.5, 0.75, 1.0 - 1e-9]);
        values
    }

    #[test]
    fn test_arc_radius_positive_and_finite() {
        for r in [0.5, 20.0, 500.0] {
            for l in samples() {
                let t = compute_terminator(l, r).unwrap();
                assert!(
                    t.arc_radius.is_finite() && t.arc_radius > 0.0,
                    "l={l} r={r}: {}",
                    t.arc_radius
                );
            }
        }
    }

    #[test]
    fn test_lit_from_left_by_half_cycle() {
        for l in samples() {
            let t = compute_terminator(l, 20.0).unwrap();
            assert_eq!(t.lit_from_left, l > 0.5, "l={l}");
        }
    }

    #[test]
    fn test_right_of_center_by_quarter() {
        for l in samples() {
            let t = compute_terminator(l, 20.0).unwrap();
            let expected = l <= 0.25 || (l > 0.5 && l <= 0.75);
            assert_eq!(t.right_of_center, expected, "l={l}");
        }
    }

    #[test]
    fn test_quarter_symmetry() {
        for r in [1.0, 20.0, 333.0] {
            let first = compute_terminator(0.25, r).unwrap();
            let last = compute_terminator(0.75, r).unwrap();
            assert!((first.arc_radius - last.arc_radius).abs() <= 1e-9 * first.arc_radius);
        }
    }

    #[test]
    fn test_quarters_are_clamped_straight() {
        let r = 20.0;
        let t = compute_terminator(0.25, r).unwrap();
        assert!(t.is_straight(r));
        assert!(t.arc_radius <= r / MIN_SAGITTA_FRACTION);
        assert!(!compute_terminator(0.2, r).unwrap().is_straight(r));
    }

    #[test]
    fn test_syzygy_arc_matches_disc() {
        // New and full moon: the terminator coincides with the limb
        let r = 20.0;
        assert!((compute_terminator(0.0, r).unwrap().arc_radius - r).abs() < 1e-9);
        assert!((compute_terminator(0.5, r).unwrap().arc_radius - r).abs() < 1e-9);
    }

    #[test]
    fn test_arc_flattens_toward_quarter() {
        let r = 20.0;
        let mut last = 0.0;
        for l in [0.05, 0.1, 0.15, 0.2, 0.24] {
            let radius = compute_terminator(l, r).unwrap().arc_radius;
            assert!(radius > last, "l={l}");
            last = radius;
        }
    }

    #[test]
    fn test_invalid_arguments() {
        for l in [-0.01, 1.0, 1.5, f64::NAN] {
            assert!(matches!(
                compute_terminator(l, 20.0),
                Err(CalendarError::InvalidArgument { name: "lunation", .. })
            ));
        }
        for r in [0.0, -3.0, f64::INFINITY, f64::NAN] {
            assert!(matches!(
                compute_terminator(0.3, r),
                Err(CalendarError::InvalidArgument { name: "disc radius", .. })
            ));
        }
    }
}
