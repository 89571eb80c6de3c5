//! Next-item selection.
//!
//! Candidates are taken from the due pool first, then items due within a
//! short horizon, then the whole set, so a non-empty input always yields a
//! pick. Within the pool each item gets a weighted score over dueness,
//! weakness, staleness and topic coverage, plus a small random perturbation
//! that keeps equal-scoring items rotating.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use thiserror::Error;

use super::item::ReviewItem;
use super::{DAY_MS, Result, clamp01};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Weight of the flat bonus a due item receives
pub const DEFAULT_DUE_WEIGHT: f64 = 3.0;

/// Weight on (1 - accuracy)
pub const DEFAULT_WEAKNESS_WEIGHT: f64 = 1.5;

/// Weight on the staleness boost
pub const DEFAULT_RECENCY_WEIGHT: f64 = 1.0;

/// Weight on the per-topic coverage deficit
pub const DEFAULT_COVERAGE_WEIGHT: f64 = 1.0;

/// Upper bound of the uniform tie-breaking noise
pub const DEFAULT_NOISE_SCALE: f64 = 0.1;

/// Items due within this many hours form the fallback pool when nothing
/// is due yet
const DEFAULT_NEARLY_DUE_HOURS: i64 = 24;

/// Days of idleness at which the staleness boost saturates
const DEFAULT_RECENCY_SATURATION_DAYS: f64 = 7.0;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Errors raised by the item scheduler.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Selection was invoked with no candidate items. The caller has no
    /// reviewable material; not an internal fault.
    #[error("no items to choose from")]
    EmptyInput,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Tuning knobs for [`choose_next_item_with`].
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    /// Flat bonus for items at or past their due date
    pub due_weight: f64,
    /// Multiplier on (1 - accuracy)
    pub weakness_weight: f64,
    /// Multiplier on the staleness boost
    pub recency_weight: f64,
    /// Multiplier on the topic coverage deficit
    pub coverage_weight: f64,
    /// Scale of the uniform noise term; zero disables it entirely,
    /// making selection deterministic
    pub noise_scale: f64,
    /// How far ahead of `now` the nearly-due fallback pool reaches
    pub nearly_due_window: Duration,
    /// Days since last seen at which the staleness boost reaches 1
    pub recency_saturation_days: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            due_weight: DEFAULT_DUE_WEIGHT,
            weakness_weight: DEFAULT_WEAKNESS_WEIGHT,
            recency_weight: DEFAULT_RECENCY_WEIGHT,
            coverage_weight: DEFAULT_COVERAGE_WEIGHT,
            noise_scale: DEFAULT_NOISE_SCALE,
            nearly_due_window: Duration::hours(DEFAULT_NEARLY_DUE_HOURS),
            recency_saturation_days: DEFAULT_RECENCY_SATURATION_DAYS,
        }
    }
}

// ============================================================================
// SELECTION
// ============================================================================

/// Pick the next item to review, as of now, with default tuning and a
/// thread-local random source.
pub fn choose_next_item(items: &[ReviewItem]) -> Result<&ReviewItem> {
    choose_next_item_with(
        items,
        Utc::now(),
        &SelectionConfig::default(),
        &mut rand::thread_rng(),
    )
}

/// Pick the next item with explicit time, tuning and random source.
///
/// Seed the generator (or set `noise_scale` to zero) for deterministic
/// output in tests.
pub fn choose_next_item_with<'a, R: Rng>(
    items: &'a [ReviewItem],
    now: DateTime<Utc>,
    config: &SelectionConfig,
    rng: &mut R,
) -> Result<&'a ReviewItem> {
    if items.is_empty() {
        return Err(SchedulerError::EmptyInput);
    }
    let pool: Vec<&ReviewItem> = items.iter().collect();
    Ok(select_from(&pool, now, config, rng))
}

/// Pick up to `count` distinct items, skipping ids in `exclude_ids`.
///
/// Convenience wrapper over [`choose_next_items_with`] using the default
/// tuning and a thread-local random source. Returns fewer than `count`
/// picks when the pool runs out; an empty result is not an error here.
pub fn choose_next_items<'a>(
    items: &'a [ReviewItem],
    count: usize,
    exclude_ids: &HashSet<String>,
) -> Vec<&'a ReviewItem> {
    choose_next_items_with(
        items,
        count,
        exclude_ids,
        Utc::now(),
        &SelectionConfig::default(),
        &mut rand::thread_rng(),
    )
}

/// Batch selection with explicit time, tuning and random source.
///
/// Each pick is removed from the pool before the next, so no id repeats
/// within one batch.
pub fn choose_next_items_with<'a, R: Rng>(
    items: &'a [ReviewItem],
    count: usize,
    exclude_ids: &HashSet<String>,
    now: DateTime<Utc>,
    config: &SelectionConfig,
    rng: &mut R,
) -> Vec<&'a ReviewItem> {
    let mut pool: Vec<&ReviewItem> = items
        .iter()
        .filter(|item| !exclude_ids.contains(&item.id))
        .collect();

    let mut picks = Vec::with_capacity(count.min(pool.len()));
    while picks.len() < count && !pool.is_empty() {
        let chosen = select_from(&pool, now, config, rng);
        pool.retain(|item| item.id != chosen.id);
        picks.push(chosen);
    }

    tracing::debug!(
        requested = count,
        returned = picks.len(),
        "batch selection complete"
    );
    picks
}

/// Score the best candidate out of a non-empty pool.
fn select_from<'a, R: Rng>(
    pool: &[&'a ReviewItem],
    now: DateTime<Utc>,
    config: &SelectionConfig,
    rng: &mut R,
) -> &'a ReviewItem {
    // Coverage statistics over the whole pool, not just the candidates
    let mut topic_attempts: HashMap<&str, u64> = HashMap::new();
    let mut topics: HashSet<&str> = HashSet::new();
    for item in pool {
        topics.insert(item.topic.as_str());
        *topic_attempts.entry(item.topic.as_str()).or_insert(0) += u64::from(item.attempts);
    }
    let total_attempts: u64 = topic_attempts.values().sum();
    let target_share = 1.0 / topics.len().max(1) as f64;

    // Due pool, then nearly due, then everything
    let due: Vec<&ReviewItem> = pool.iter().copied().filter(|i| i.is_due(now)).collect();
    let candidates: Vec<&ReviewItem> = if !due.is_empty() {
        due
    } else {
        let horizon = now + config.nearly_due_window;
        let nearly: Vec<&ReviewItem> = pool
            .iter()
            .copied()
            .filter(|i| i.is_due(horizon))
            .collect();
        if !nearly.is_empty() {
            nearly
        } else {
            pool.to_vec()
        }
    };

    let mut best = candidates[0];
    let mut best_score = f64::NEG_INFINITY;
    for item in &candidates {
        let due_bonus = if item.is_due(now) { config.due_weight } else { 0.0 };

        let weakness = 1.0 - item.accuracy();

        let recency_boost = item
            .last_seen_at
            .map(|seen| {
                let days = (now - seen).num_milliseconds() as f64 / DAY_MS as f64;
                clamp01(days / config.recency_saturation_days.max(1e-6))
            })
            .unwrap_or(0.0);

        let observed_share = if total_attempts > 0 {
            topic_attempts.get(item.topic.as_str()).copied().unwrap_or(0) as f64
                / total_attempts as f64
        } else {
            0.0
        };
        let coverage_deficit = (target_share - observed_share).max(0.0);

        let noise = if config.noise_scale > 0.0 {
            rng.gen_range(0.0..config.noise_scale)
        } else {
            0.0
        };

        let score = due_bonus
            + config.weakness_weight * weakness
            + config.recency_weight * recency_boost
            + config.coverage_weight * coverage_deficit
            + noise;

        // Strict comparison: the first-seen candidate wins an exact tie
        if score > best_score {
            best_score = score;
            best = item;
        }
    }

    best
}

// ============================================================================
// TESTS
// ============================================================================
