//! Topic Priority Module
//!
//! Ranks a learner's study topics by how urgently each one needs attention
//! right now. Seven normalized factors feed a weighted sum:
//!
//! - Mastery gap: 1 minus the rolling-accuracy EMA
//! - Forgetting risk: 1 - e^(-t/sigma) over days since last practice
//! - Coverage deficit: target practice share minus observed share
//! - Assessment urgency: e^(-d/tau) over days until the next graded event
//! - Struggle spike: recent incorrect fraction inside a sliding window
//! - Novelty: flat bonus while a topic still holds unseen material
//! - Over-practice penalty: observed share above target, subtracted
//!
//! Every factor lands in [0, 1] before weighting, so the weights alone
//! decide their relative influence. The two largest weighted contributions
//! become human-readable reason labels on each result.

mod config;
mod engine;
mod score;

pub use config::{
    DEFAULT_ACCURACY, DEFAULT_COVERAGE_WINDOW_K, DEFAULT_EMA_ALPHA, DEFAULT_FORGETTING_SIGMA_DAYS,
    DEFAULT_STRUGGLE_WINDOW_DAYS, DEFAULT_URGENCY_TAU_DAYS, DEFAULT_WEIGHT_ASSESSMENT_URGENCY,
    DEFAULT_WEIGHT_COVERAGE_DEFICIT, DEFAULT_WEIGHT_FORGETTING_RISK, DEFAULT_WEIGHT_MASTERY_GAP,
    DEFAULT_WEIGHT_NOVELTY, DEFAULT_WEIGHT_OVERPRACTICE, DEFAULT_WEIGHT_STRUGGLE_SPIKE,
    EngineConfig, ScoreWeights,
};

pub use engine::{
    AttemptEvent, PriorityEngine, PriorityEngineError, PriorityResult, Result, TopicConfig,
    TopicMetrics,
};

pub use score::{PriorityBreakdown, ReasonTag, forgetting_curve, urgency_curve};
