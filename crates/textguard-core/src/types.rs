//! Core types for TextGuard

use serde::{Deserialize, Serialize};

/// Map a raw logit into (0, 1).
pub fn sigmoid(logit: f32) -> f32 {
    1.0 / (1.0 + (-logit).exp())
}

/// Result of classifying one text.
///
/// A plain value object: created fresh per inference call and compared by
/// its fields only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Sigmoid-mapped model output in [0, 1]
    pub probability: f32,

    /// True when `probability` is strictly greater than 0.5
    pub is_suspicious: bool,

    /// `max(probability, 1 - probability)`, in [0.5, 1]
    pub confidence: f32,
}

impl ClassificationResult {
    /// Build a result from a raw model logit.
    pub fn from_logit(logit: f32) -> Self {
        Self::from_probability(sigmoid(logit))
    }

    /// Build a result from an already-mapped probability.
    pub fn from_probability(probability: f32) -> Self {
        Self {
            probability,
            is_suspicious: probability > 0.5,
            confidence: probability.max(1.0 - probability),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sigmoid_midpoint() {
        assert_eq!(sigmoid(0.0), 0.5);
    }

    #[test]
    fn test_scenario_positive_logit() {
        let result = ClassificationResult::from_logit(2.0);
        assert!((result.probability - 0.8808).abs() < 1e-3);
        assert!(result.is_suspicious);
        assert!((result.confidence - 0.8808).abs() < 1e-3);
    }

    #[test]
    fn test_scenario_negative_logit() {
        let result = ClassificationResult::from_logit(-3.0);
        assert!((result.probability - 0.0474).abs() < 1e-3);
        assert!(!result.is_suspicious);
        assert!((result.confidence - 0.9526).abs() < 1e-3);
    }

    #[test]
    fn test_threshold_boundary_is_not_suspicious() {
        // Strict > 0.5: the exact midpoint classifies as normal.
        let result = ClassificationResult::from_probability(0.5);
        assert!(!result.is_suspicious);
        assert_eq!(result.confidence, 0.5);
    }

    #[test]
    fn test_sigmoid_saturates_in_f32_at_extreme_logits() {
        // f32 runs out of resolution next to the asymptotes: beyond
        // roughly |logit| = 17 the result rounds to exactly 1.0 (or 0.0
        // once exp overflows). The property tests below keep their ranges
        // inside the region where f32 still resolves the open interval.
        assert_eq!(sigmoid(18.0), 1.0);
        assert_eq!(sigmoid(40.0), 1.0);
        assert_eq!(sigmoid(-100.0), 0.0);
    }

    #[test]
    fn test_serde_round_trip() {
        let result = ClassificationResult::from_logit(1.25);
        let json = serde_json::to_string(&result).unwrap();
        let back: ClassificationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }

    proptest! {
        // Range bounds chosen for f32: past ~17 the sigmoid rounds to
        // exactly 1.0, and near saturation a 0.01 step no longer moves
        // the rounded value.
        #[test]
        fn sigmoid_stays_in_open_unit_interval(logit in -15.0f32..15.0) {
            let p = sigmoid(logit);
            prop_assert!(p > 0.0 && p < 1.0);
        }

        #[test]
        fn sigmoid_is_strictly_increasing(logit in -8.0f32..8.0) {
            prop_assert!(sigmoid(logit) < sigmoid(logit + 0.01));
        }

        #[test]
        fn confidence_is_at_least_half(p in 0.0f32..=1.0) {
            let result = ClassificationResult::from_probability(p);
            prop_assert!(result.confidence >= 0.5 && result.confidence <= 1.0);
        }

        #[test]
        fn confidence_is_symmetric(p in 0.0f32..=1.0) {
            let a = ClassificationResult::from_probability(p);
            let b = ClassificationResult::from_probability(1.0 - p);
            prop_assert!((a.confidence - b.confidence).abs() < 1e-6);
        }

        #[test]
        fn suspicious_matches_threshold(p in 0.0f32..=1.0) {
            let result = ClassificationResult::from_probability(p);
            prop_assert_eq!(result.is_suspicious, p > 0.5);
        }
    }
}
