//! Pure scoring math for the priority engine.
//!
//! Every factor is bounded in [0, 1]. The combined score is unbounded (the
//! over-practice penalty can push it negative) and is only meaningful as a
//! relative ranking, never as a probability.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::config::ScoreWeights;

/// Milliseconds per day, as f64 for fractional-day arithmetic
pub(crate) const DAY_MS: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// How many reason labels a breakdown carries
const REASON_COUNT: usize = 2;

/// Clamp to [0, 1]; NaN collapses to 0 rather than poisoning downstream math.
pub(crate) fn clamp01(x: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    x.clamp(0.0, 1.0)
}

// ============================================================================
// CURVES
// ============================================================================

/// Forgetting risk: `1 - exp(-days / sigma)`.
///
/// `None` means the topic was never seen, which maps to maximum risk.
pub fn forgetting_curve(days_since_last: Option<f64>, sigma_days: f64) -> f64 {
    match days_since_last {
        Some(days) if days.is_finite() => 1.0 - (-days.max(0.0) / sigma_days.max(1e-6)).exp(),
        _ => 1.0,
    }
}

/// Assessment urgency: `exp(-days / tau)`.
///
/// Negative `days_until` (a past-due assessment) is treated as immediate, so
/// the curve never exceeds 1.
pub fn urgency_curve(days_until: f64, tau_days: f64) -> f64 {
    (-days_until.max(0.0) / tau_days.max(1e-6)).exp()
}

// ============================================================================
// REASON TAGS
// ============================================================================

/// Human-readable label for a dominant score contribution.
///
/// A breakdown carries the two largest signed weighted contributions so a
/// host UI can explain *why* a topic ranked where it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonTag {
    /// Rolling accuracy is low
    LowAccuracy,
    /// Long gap since the topic was last practised
    NotReviewedLately,
    /// Topic received less practice than its target share
    UnderCovered,
    /// A graded assessment is approaching
    AssessmentSoon,
    /// High incorrect ratio in the recent window
    RecentMistakes,
    /// Topic still holds unseen material
    NewMaterial,
    /// Topic received more practice than its target share
    OverPractised,
}

impl ReasonTag {
    /// Display label suitable for end users.
    pub fn label(&self) -> &'static str {
        match self {
            ReasonTag::LowAccuracy => "Low accuracy",
            ReasonTag::NotReviewedLately => "Not reviewed lately",
            ReasonTag::UnderCovered => "Under-covered topic",
            ReasonTag::AssessmentSoon => "Assessment soon",
            ReasonTag::RecentMistakes => "Recent mistakes",
            ReasonTag::NewMaterial => "New material",
            ReasonTag::OverPractised => "Over-practised",
        }
    }
}

impl std::fmt::Display for ReasonTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// BREAKDOWN
// ============================================================================

/// Per-topic factor values plus the combined score.
///
/// All factor fields are in [0, 1]; `score` is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityBreakdown {
    /// `1 - rolling_accuracy`
    pub mastery_gap: f64,
    /// Forgetting-curve risk from days since last seen
    pub forgetting_risk: f64,
    /// `max(0, target_share - observed_share)`
    pub coverage_deficit: f64,
    /// Urgency from the next assessment date, 0 when none is set
    pub assessment_urgency: f64,
    /// Incorrect ratio over the recent struggle window
    pub struggle_spike: f64,
    /// 1 while the topic still holds unseen material
    pub novelty: f64,
    /// `max(0, observed_share - target_share)`, penalty term
    pub overpractice: f64,
    /// Weighted sum of the factors minus the over-practice penalty
    pub score: f64,
    /// The two dominant signed contributions, largest first
    pub reasons: Vec<ReasonTag>,
}

/// Raw factor values prior to weighting. Engine-internal.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Factors {
    pub mastery_gap: f64,
    pub forgetting_risk: f64,
    pub coverage_deficit: f64,
    pub assessment_urgency: f64,
    pub struggle_spike: f64,
    pub novelty: f64,
    pub overpractice: f64,
}

impl Factors {
    /// Apply weights, derive the top reason labels and produce the public
    /// breakdown.
    pub(crate) fn into_breakdown(self, weights: &ScoreWeights) -> PriorityBreakdown {
        let mut contributions = [
            (ReasonTag::LowAccuracy, weights.mastery_gap * self.mastery_gap),
            (
                ReasonTag::NotReviewedLately,
                weights.forgetting_risk * self.forgetting_risk,
            ),
            (
                ReasonTag::UnderCovered,
                weights.coverage_deficit * self.coverage_deficit,
            ),
            (
                ReasonTag::AssessmentSoon,
                weights.assessment_urgency * self.assessment_urgency,
            ),
            (
                ReasonTag::RecentMistakes,
                weights.struggle_spike * self.struggle_spike,
            ),
            (ReasonTag::NewMaterial, weights.novelty * self.novelty),
            (
                ReasonTag::OverPractised,
                -(weights.overpractice * self.overpractice),
            ),
        ];

        let score = contributions.iter().map(|(_, c)| *c).sum::<f64>();

        contributions
            .sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        let reasons = contributions
            .iter()
            .take(REASON_COUNT)
            .map(|(tag, _)| *tag)
            .collect();

        PriorityBreakdown {
            mastery_gap: self.mastery_gap,
            forgetting_risk: self.forgetting_risk,
            coverage_deficit: self.coverage_deficit,
            assessment_urgency: self.assessment_urgency,
            struggle_spike: self.struggle_spike,
            novelty: self.novelty,
            overpractice: self.overpractice,
            score,
            reasons,
        }
    }
}
