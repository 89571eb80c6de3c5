//! The stateful topic priority engine.
//!
//! One engine per learner (or per session); the host synchronizes access if
//! it shares an instance across threads. All operations are synchronous
//! in-memory computations, O(topics) or O(history window).

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::EngineConfig;
use super::score::{DAY_MS, Factors, PriorityBreakdown, clamp01, forgetting_curve, urgency_curve};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Errors raised by the priority engine's mutators.
#[derive(Debug, Error)]
pub enum PriorityEngineError {
    /// A mutator was invoked with a topic id that was not registered at
    /// construction. Topics are never created implicitly.
    #[error("Unknown topic: {0}")]
    UnknownTopic(String),
}

/// Result type for priority-engine operations
pub type Result<T> = std::result::Result<T, PriorityEngineError>;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Optional per-topic settings, merged into the stored metrics.
///
/// `None` fields leave the current value untouched; clearing an assessment
/// date goes through [`PriorityEngine::set_assessment`].
#[derive(Debug, Clone, Default)]
pub struct TopicConfig {
    /// Desired fraction of recent practice this topic should receive.
    /// Expressed as a fraction of 1 across active topics.
    pub target_share: Option<f64>,
    /// Whether the topic still holds material the learner has never seen
    pub has_unseen: Option<bool>,
    /// Next graded event touching this topic
    pub next_assessment_at: Option<DateTime<Utc>>,
}

/// Live metrics for one registered topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicMetrics {
    /// Opaque topic identifier, unique within the engine
    pub topic: String,
    /// Exponential moving average of correctness, always in [0, 1]
    pub rolling_accuracy: f64,
    /// When the topic was last practised; `None` means never
    pub last_seen_at: Option<DateTime<Utc>>,
    /// True until the first attempt is recorded for the topic
    pub has_unseen: bool,
    /// Desired fraction of recent practice, normalized across topics
    pub target_share: f64,
    /// Next graded event touching this topic, if scheduled
    pub next_assessment_at: Option<DateTime<Utc>>,
}

/// One recorded attempt, held in the bounded history ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptEvent {
    /// Topic the attempt belongs to
    pub topic: String,
    /// Whether the answer was correct
    pub correct: bool,
    /// When the attempt happened
    pub at: DateTime<Utc>,
}

/// One entry of the ranked output of [`PriorityEngine::priority_topics`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityResult {
    /// The ranked topic id
    pub topic: String,
    /// Factor values, combined score and reason labels
    pub breakdown: PriorityBreakdown,
}

// ============================================================================
// PRIORITY ENGINE
// ============================================================================

/// Ranks a learner's topics by how urgently they need review.
///
/// The engine owns one [`TopicMetrics`] per registered topic plus a bounded
/// ring of recent [`AttemptEvent`]s. The ring is the sole source of the
/// windowed statistics (coverage share, struggle spike); `rolling_accuracy`
/// is a long-running EMA that eviction never resets.
///
/// # Example
///
/// ```rust
/// use praxis_core::PriorityEngine;
///
/// let mut engine = PriorityEngine::new(["algebra", "geometry"]);
/// engine.record_attempt("algebra", false)?;
///
/// let ranked = engine.priority_topics(1);
/// assert_eq!(ranked.len(), 1);
/// # Ok::<(), praxis_core::PriorityEngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PriorityEngine {
    topics: HashMap<String, TopicMetrics>,
    history: VecDeque<AttemptEvent>,
    config: EngineConfig,
}

impl PriorityEngine {
    /// Create an engine for the given topic set with the default
    /// configuration.
    ///
    /// Unset target shares default to `1 / topic_count`, so a fresh engine
    /// wants equal coverage across topics.
    pub fn new<I, S>(topic_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(topic_ids, EngineConfig::default())
    }

    /// Create an engine with a custom configuration.
    pub fn with_config<I, S>(topic_ids: I, config: EngineConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = topic_ids.into_iter().map(Into::into).collect();
        let equal_share = 1.0 / ids.len().max(1) as f64;

        let mut topics = HashMap::with_capacity(ids.len());
        for topic in ids {
            topics.insert(
                topic.clone(),
                TopicMetrics {
                    topic,
                    rolling_accuracy: clamp01(config.default_accuracy),
                    last_seen_at: None,
                    has_unseen: true,
                    target_share: equal_share,
                    next_assessment_at: None,
                },
            );
        }

        Self {
            topics,
            history: VecDeque::with_capacity(config.coverage_window_k),
            config,
        }
    }

    /// Number of registered topics.
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    /// Read-only snapshot of a topic's metrics; `None` for unknown topics.
    pub fn get_topic_metrics(&self, topic: &str) -> Option<&TopicMetrics> {
        self.topics.get(topic)
    }

    fn metrics_mut(&mut self, topic: &str) -> Result<&mut TopicMetrics> {
        self.topics
            .get_mut(topic)
            .ok_or_else(|| PriorityEngineError::UnknownTopic(topic.to_string()))
    }

    // ------------------------------------------------------------------
    // Mutators
    // ------------------------------------------------------------------

    /// Record an attempt timestamped now.
    pub fn record_attempt(&mut self, topic: &str, correct: bool) -> Result<()> {
        self.record_attempt_at(topic, correct, Utc::now())
    }

    /// Record an attempt at an explicit time.
    ///
    /// Updates the accuracy EMA, recency, the unseen flag, and appends to
    /// the history ring (evicting the oldest event past capacity).
    pub fn record_attempt_at(
        &mut self,
        topic: &str,
        correct: bool,
        at: DateTime<Utc>,
    ) -> Result<()> {
        let alpha = self.config.ema_alpha;
        let window = self.config.coverage_window_k;

        let metrics = self.metrics_mut(topic)?;
        let target = if correct { 1.0 } else { 0.0 };
        metrics.rolling_accuracy =
            clamp01(alpha * target + (1.0 - alpha) * clamp01(metrics.rolling_accuracy));
        metrics.last_seen_at = Some(at);
        metrics.has_unseen = false;

        self.history.push_back(AttemptEvent {
            topic: topic.to_string(),
            correct,
            at,
        });
        while self.history.len() > window {
            self.history.pop_front();
        }

        tracing::debug!(topic, correct, "attempt recorded");
        Ok(())
    }

    /// Merge non-`None` fields of `cfg` into the stored metrics.
    pub fn configure_topic(&mut self, topic: &str, cfg: TopicConfig) -> Result<()> {
        let metrics = self.metrics_mut(topic)?;
        if let Some(share) = cfg.target_share {
            metrics.target_share = share.max(0.0);
        }
        if let Some(has_unseen) = cfg.has_unseen {
            metrics.has_unseen = has_unseen;
        }
        if let Some(when) = cfg.next_assessment_at {
            metrics.next_assessment_at = Some(when);
        }
        Ok(())
    }

    /// Set or clear the topic's next assessment date.
    pub fn set_assessment(&mut self, topic: &str, when: Option<DateTime<Utc>>) -> Result<()> {
        self.metrics_mut(topic)?.next_assessment_at = when;
        Ok(())
    }

    /// Mark whether the topic still holds unseen material.
    pub fn set_has_unseen(&mut self, topic: &str, has_unseen: bool) -> Result<()> {
        self.metrics_mut(topic)?.has_unseen = has_unseen;
        Ok(())
    }

    /// Administrative accuracy override (e.g. migrating persisted state).
    /// The value is clamped to [0, 1].
    pub fn set_rolling_accuracy(&mut self, topic: &str, accuracy: f64) -> Result<()> {
        self.metrics_mut(topic)?.rolling_accuracy = clamp01(accuracy);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Ranking
    // ------------------------------------------------------------------

    /// Ranked top-N topics as of now.
    pub fn priority_topics(&self, top_n: usize) -> Vec<PriorityResult> {
        self.priority_topics_at(top_n, Utc::now())
    }

    /// Ranked top-N topics at an explicit time.
    ///
    /// Sorted by score descending; exact ties fall back to topic id
    /// ascending so identical inputs always produce identical output.
    pub fn priority_topics_at(&self, top_n: usize, now: DateTime<Utc>) -> Vec<PriorityResult> {
        // Coverage share over the ring
        let mut coverage_counts: HashMap<&str, usize> = HashMap::new();
        for event in &self.history {
            *coverage_counts.entry(event.topic.as_str()).or_insert(0) += 1;
        }
        let total_in_window = self.history.len().max(1) as f64;

        // Struggle counts over the recent window
        let cutoff = now - self.config.struggle_window;
        let mut recent_attempts: HashMap<&str, u32> = HashMap::new();
        let mut recent_incorrect: HashMap<&str, u32> = HashMap::new();
        for event in &self.history {
            if event.at >= cutoff {
                *recent_attempts.entry(event.topic.as_str()).or_insert(0) += 1;
                if !event.correct {
                    *recent_incorrect.entry(event.topic.as_str()).or_insert(0) += 1;
                }
            }
        }

        let mut results: Vec<PriorityResult> = self
            .topics
            .values()
            .map(|metrics| {
                let topic = metrics.topic.as_str();
                let accuracy = clamp01(metrics.rolling_accuracy);

                let days_since_last = metrics
                    .last_seen_at
                    .map(|seen| (now - seen).num_milliseconds() as f64 / DAY_MS);

                let observed_share =
                    coverage_counts.get(topic).copied().unwrap_or(0) as f64 / total_in_window;

                let assessment_urgency = metrics
                    .next_assessment_at
                    .map(|when| {
                        let days_until = (when - now).num_milliseconds() as f64 / DAY_MS;
                        urgency_curve(days_until, self.config.urgency_tau_days)
                    })
                    .unwrap_or(0.0);

                let attempts = recent_attempts.get(topic).copied().unwrap_or(0);
                let incorrect = recent_incorrect.get(topic).copied().unwrap_or(0);
                let struggle_spike = if attempts > 0 {
                    incorrect as f64 / attempts as f64
                } else {
                    0.0
                };

                let factors = Factors {
                    mastery_gap: 1.0 - accuracy,
                    forgetting_risk: forgetting_curve(
                        days_since_last,
                        self.config.forgetting_sigma_days,
                    ),
                    coverage_deficit: clamp01(metrics.target_share - observed_share),
                    assessment_urgency,
                    struggle_spike,
                    novelty: if metrics.has_unseen { 1.0 } else { 0.0 },
                    overpractice: clamp01(observed_share - metrics.target_share),
                };

                PriorityResult {
                    topic: metrics.topic.clone(),
                    breakdown: factors.into_breakdown(&self.config.weights),
                }
            })
            .collect();

        results.sort_by(|a, b| {
            b.breakdown
                .score
                .partial_cmp(&a.breakdown.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.topic.cmp(&b.topic))
        });
        results.truncate(top_n);

        tracing::debug!(returned = results.len(), "priority ranking computed");
        results
    }
}

// ============================================================================
// TESTS
// ============================================================================
