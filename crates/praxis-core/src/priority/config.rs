//! Engine configuration: smoothing factors, decay constants and score weights.
//!
//! Every knob has a documented default; `EngineConfig::default()` is the
//! tuning the rest of the crate is tested against.

use chrono::Duration;

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default EMA smoothing factor for rolling-accuracy updates
pub const DEFAULT_EMA_ALPHA: f64 = 0.2;

/// Default forgetting-curve time constant (sigma), in days
pub const DEFAULT_FORGETTING_SIGMA_DAYS: f64 = 8.0;

/// Default assessment-urgency time constant (tau), in days
pub const DEFAULT_URGENCY_TAU_DAYS: f64 = 14.0;

/// Default capacity of the bounded attempt-history ring
pub const DEFAULT_COVERAGE_WINDOW_K: usize = 50;

/// Default struggle window, in days
pub const DEFAULT_STRUGGLE_WINDOW_DAYS: i64 = 7;

/// Default cold-start accuracy for topics with no recorded attempts
pub const DEFAULT_ACCURACY: f64 = 0.6;

/// Default weight for the mastery-gap factor
pub const DEFAULT_WEIGHT_MASTERY_GAP: f64 = 0.35;

/// Default weight for the forgetting-risk factor
pub const DEFAULT_WEIGHT_FORGETTING_RISK: f64 = 0.20;

/// Default weight for the coverage-deficit factor
pub const DEFAULT_WEIGHT_COVERAGE_DEFICIT: f64 = 0.15;

/// Default weight for the assessment-urgency factor
pub const DEFAULT_WEIGHT_ASSESSMENT_URGENCY: f64 = 0.20;

/// Default weight for the struggle-spike factor
pub const DEFAULT_WEIGHT_STRUGGLE_SPIKE: f64 = 0.10;

/// Default weight for the novelty factor
pub const DEFAULT_WEIGHT_NOVELTY: f64 = 0.05;

/// Default weight for the over-practice penalty (subtracted from the score)
pub const DEFAULT_WEIGHT_OVERPRACTICE: f64 = 0.05;

// ============================================================================
// SCORE WEIGHTS
// ============================================================================

/// Per-factor weights for the combined priority score.
///
/// All weights multiply factors bounded in [0, 1]; `overpractice` is the one
/// penalty term and is subtracted, so the final score can go negative.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreWeights {
    /// Weight for `1 - rolling_accuracy`
    pub mastery_gap: f64,
    /// Weight for the forgetting-curve risk
    pub forgetting_risk: f64,
    /// Weight for under-coverage relative to the topic's target share
    pub coverage_deficit: f64,
    /// Weight for upcoming-assessment urgency
    pub assessment_urgency: f64,
    /// Weight for the recent incorrect-answer ratio
    pub struggle_spike: f64,
    /// Weight for topics that still hold unseen material
    pub novelty: f64,
    /// Weight for over-coverage relative to the target share (subtracted)
    pub overpractice: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            mastery_gap: DEFAULT_WEIGHT_MASTERY_GAP,
            forgetting_risk: DEFAULT_WEIGHT_FORGETTING_RISK,
            coverage_deficit: DEFAULT_WEIGHT_COVERAGE_DEFICIT,
            assessment_urgency: DEFAULT_WEIGHT_ASSESSMENT_URGENCY,
            struggle_spike: DEFAULT_WEIGHT_STRUGGLE_SPIKE,
            novelty: DEFAULT_WEIGHT_NOVELTY,
            overpractice: DEFAULT_WEIGHT_OVERPRACTICE,
        }
    }
}

// ============================================================================
// ENGINE CONFIGURATION
// ============================================================================

/// Configuration for a [`PriorityEngine`](super::PriorityEngine).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// EMA smoothing factor applied on every recorded attempt
    pub ema_alpha: f64,
    /// Forgetting-curve time constant (sigma), in days
    pub forgetting_sigma_days: f64,
    /// Assessment-urgency time constant (tau), in days
    pub urgency_tau_days: f64,
    /// Capacity of the attempt-history ring used for coverage statistics.
    /// Oldest events are evicted past this bound, which also caps memory.
    pub coverage_window_k: usize,
    /// Window over which the struggle spike (recent incorrect ratio) is
    /// computed
    pub struggle_window: Duration,
    /// Cold-start accuracy assigned to topics before their first attempt
    pub default_accuracy: f64,
    /// Per-factor score weights
    pub weights: ScoreWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ema_alpha: DEFAULT_EMA_ALPHA,
            forgetting_sigma_days: DEFAULT_FORGETTING_SIGMA_DAYS,
            urgency_tau_days: DEFAULT_URGENCY_TAU_DAYS,
            coverage_window_k: DEFAULT_COVERAGE_WINDOW_K,
            struggle_window: Duration::days(DEFAULT_STRUGGLE_WINDOW_DAYS),
            default_accuracy: DEFAULT_ACCURACY,
            weights: ScoreWeights::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_tuning() {
        let config = EngineConfig::default();
        assert_eq!(config.ema_alpha, 0.2);
        assert_eq!(config.forgetting_sigma_days, 8.0);
        assert_eq!(config.urgency_tau_days, 14.0);
        assert_eq!(config.coverage_window_k, 50);
        assert_eq!(config.struggle_window, Duration::days(7));
        assert_eq!(config.default_accuracy, 0.6);

        let weights = config.weights;
        assert_eq!(weights.mastery_gap, 0.35);
        assert_eq!(weights.forgetting_risk, 0.20);
        assert_eq!(weights.coverage_deficit, 0.15);
        assert_eq!(weights.assessment_urgency, 0.20);
        assert_eq!(weights.struggle_spike, 0.10);
        assert_eq!(weights.novelty, 0.05);
        assert_eq!(weights.overpractice, 0.05);
    }
}
