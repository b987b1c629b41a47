//! Questionnaire scoring.
//!
//! All functions here are pure: the same response set always yields the same
//! result, and nothing is cached between calls.

mod preference;
mod sus;
mod trust;

pub use preference::{PreferenceAnalysis, analyze_preferences};
pub use sus::{SUS_MULTIPLIER, sus_contribution, sus_score};
pub use trust::{TrustAnalysis, analyze_trust, trust_average};

/// Round half away from zero to `decimals` places.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_two_places() {
        assert!((round_to(3.666_666, 2) - 3.67).abs() < f64::EPSILON);
        assert!((round_to(4.0, 2) - 4.0).abs() < f64::EPSILON);
        assert!((round_to(2.125, 1) - 2.1).abs() < 1e-9);
    }
}
