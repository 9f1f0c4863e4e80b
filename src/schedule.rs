//! Threshold-accepting schedule.

use serde::{Deserialize, Serialize};

/// Acceptance tolerance that starts at the cost scale of the initial solution
/// and is halved on every reset, down to a floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSchedule {
    tolerance: f64,
    min_tolerance: f64,
}

impl ThresholdSchedule {
    /// Create a schedule with an explicit tolerance.
    pub fn new(tolerance: f64, min_tolerance: f64) -> Self {
        ThresholdSchedule {
            tolerance: tolerance.max(min_tolerance),
            min_tolerance,
        }
    }

    /// Create a schedule scaled to the initial distance.
    pub fn from_initial_distance(distance: f64, max_exponent: u32, min_tolerance: f64) -> Self {
        Self::new(initial_tolerance(distance, max_exponent), min_tolerance)
    }

    /// Current tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Halve the tolerance, never below the floor.
    pub fn cool(&mut self) -> f64 {
        self.tolerance = (self.tolerance / 2.0).max(self.min_tolerance);
        self.tolerance
    }

    /// Threshold acceptance: the candidate may be worse than the current
    /// distance by less than the tolerance.
    pub fn accepts(&self, candidate: f64, current: f64) -> bool {
        candidate < current + self.tolerance
    }
}

/// Number of digits in the shortest decimal rendering of a distance that
/// round-trips, with the decimal point removed. Whole values keep their
/// trailing `.0`, so `56.0` has three digits.
pub fn significant_digits(distance: f64) -> u32 {
    format!("{:?}", distance)
        .chars()
        .filter(|&c| c != '.')
        .count() as u32
}

/// `10^min(max_exponent, len - 1)` for the rendered length `len` of the
/// distance, decimal point included.
pub fn initial_tolerance(distance: f64, max_exponent: u32) -> f64 {
    let exponent = significant_digits(distance).min(max_exponent);
    10f64.powi(exponent as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_rendered_digits() {
        assert_eq!(significant_digits(0.0), 2);
        assert_eq!(significant_digits(5.0), 2);
        assert_eq!(significant_digits(56.0), 3);
        assert_eq!(significant_digits(56.78), 4);
        assert_eq!(significant_digits(523.45), 5);
    }

    #[test]
    fn initial_tolerance_follows_cost_scale() {
        assert_eq!(initial_tolerance(5.0, 3), 100.0);
        assert_eq!(initial_tolerance(56.78, 3), 1000.0);
        assert_eq!(initial_tolerance(523.45, 3), 1000.0);
        assert_eq!(initial_tolerance(523_000.0, 3), 1000.0);
    }

    #[test]
    fn initial_tolerance_respects_exponent_cap() {
        assert_eq!(initial_tolerance(523.45, 2), 100.0);
        assert_eq!(initial_tolerance(5.0, 1), 10.0);
        assert_eq!(initial_tolerance(5.0, 0), 1.0);
    }

    #[test]
    fn threshold_acceptance() {
        let schedule = ThresholdSchedule::new(5.0, 0.5);
        assert!(schedule.accepts(104.0, 100.0));
        assert!(!schedule.accepts(106.0, 100.0));
        assert!(!schedule.accepts(105.0, 100.0));
    }

    #[test]
    fn cooling_halves_and_floors() {
        let mut schedule = ThresholdSchedule::new(8.0, 0.5);
        assert_eq!(schedule.cool(), 4.0);

        let mut schedule = ThresholdSchedule::new(0.7, 0.5);
        assert_eq!(schedule.cool(), 0.5);
        assert_eq!(schedule.cool(), 0.5);
    }
}
