//! Post-answer rescheduling.
//!
//! A deliberately small spaced-repetition rule: double the interval on a
//! correct answer, halve it on an incorrect one, with floors keeping the
//! schedule sane at the short end. Everything runs in whole milliseconds;
//! the functions are pure and return a fresh item snapshot for the caller
//! to persist.

use chrono::{DateTime, Duration, Utc};

use super::item::ReviewItem;
use super::{DAY_MS, HOUR_MS, clamp01};
use crate::priority::DEFAULT_EMA_ALPHA;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Interval multiplier after a correct answer
pub const DEFAULT_GROWTH_FACTOR: f64 = 2.0;

/// Interval multiplier after an incorrect answer
pub const DEFAULT_SHRINK_FACTOR: f64 = 0.5;

/// Floor on the post-correct interval: one day
const MIN_CORRECT_INTERVAL_MS: i64 = DAY_MS;

/// Floor on the post-incorrect interval: six hours
const MIN_INCORRECT_INTERVAL_MS: i64 = 6 * HOUR_MS;

/// Assumed previous interval when the item carries no usable schedule
const DEFAULT_PREV_INTERVAL_MS: i64 = DAY_MS;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Tuning knobs for [`update_after_answer_with`].
#[derive(Debug, Clone)]
pub struct AnswerConfig {
    /// EMA smoothing factor for the item's accuracy
    pub ema_alpha: f64,
    /// Interval multiplier on a correct answer
    pub growth_factor: f64,
    /// Interval multiplier on an incorrect answer
    pub shrink_factor: f64,
    /// Minimum interval after a correct answer
    pub min_correct_interval: Duration,
    /// Minimum interval after an incorrect answer
    pub min_incorrect_interval: Duration,
    /// Interval assumed when the item has no prior schedule
    pub default_prev_interval: Duration,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            ema_alpha: DEFAULT_EMA_ALPHA,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            shrink_factor: DEFAULT_SHRINK_FACTOR,
            min_correct_interval: Duration::milliseconds(MIN_CORRECT_INTERVAL_MS),
            min_incorrect_interval: Duration::milliseconds(MIN_INCORRECT_INTERVAL_MS),
            default_prev_interval: Duration::milliseconds(DEFAULT_PREV_INTERVAL_MS),
        }
    }
}

// ============================================================================
// RESCHEDULING
// ============================================================================

/// Reschedule an item after an answer graded now.
pub fn update_after_answer(item: &ReviewItem, was_correct: bool) -> ReviewItem {
    update_after_answer_at(item, was_correct, Utc::now())
}

/// Reschedule at an explicit time with default tuning.
pub fn update_after_answer_at(
    item: &ReviewItem,
    was_correct: bool,
    now: DateTime<Utc>,
) -> ReviewItem {
    update_after_answer_with(item, was_correct, now, &AnswerConfig::default())
}

/// Reschedule with explicit time and tuning.
///
/// The previous interval is `next_due_at - last_seen_at` when both are set
/// (floored at 1ms so inverted schedules still behave), otherwise the
/// configured default. The new interval is the previous one scaled by the
/// growth or shrink factor, floored per outcome.
pub fn update_after_answer_with(
    item: &ReviewItem,
    was_correct: bool,
    now: DateTime<Utc>,
    config: &AnswerConfig,
) -> ReviewItem {
    let target = if was_correct { 1.0 } else { 0.0 };
    let accuracy =
        clamp01(config.ema_alpha * target + (1.0 - config.ema_alpha) * item.accuracy());

    let prev_ms = match (item.next_due_at, item.last_seen_at) {
        (Some(due), Some(seen)) => (due - seen).num_milliseconds().max(1),
        _ => config.default_prev_interval.num_milliseconds(),
    };

    let next_ms = if was_correct {
        let grown = (prev_ms as f64 * config.growth_factor) as i64;
        grown.max(config.min_correct_interval.num_milliseconds())
    } else {
        let shrunk = (prev_ms as f64 * config.shrink_factor) as i64;
        shrunk.max(config.min_incorrect_interval.num_milliseconds())
    };

    tracing::debug!(
        item = %item.id,
        was_correct,
        interval_ms = next_ms,
        "item rescheduled"
    );

    ReviewItem {
        id: item.id.clone(),
        topic: item.topic.clone(),
        last_seen_at: Some(now),
        next_due_at: Some(now + Duration::milliseconds(next_ms)),
        rolling_accuracy: accuracy,
        attempts: item.attempts.saturating_add(1),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap()
    }

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn interval_of(item: &ReviewItem) -> Duration {
        item.next_due_at.unwrap() - item.last_seen_at.unwrap()
    }

    #[test]
    fn test_input_item_is_left_untouched() {
        let original = ReviewItem::new("card-1", "algebra");
        let updated = update_after_answer_at(&original, true, now());
        assert_eq!(original, ReviewItem::new("card-1", "algebra"));
        assert_ne!(updated, original);
    }

    #[test]
    fn test_first_correct_answer_doubles_the_default_interval() {
        let fresh = ReviewItem::new("card-1", "algebra");
        let updated = update_after_answer_at(&fresh, true, now());

        assert_eq!(interval_of(&updated), Duration::days(2));
        assert_eq!(updated.last_seen_at, Some(now()));
        assert_eq!(updated.attempts, 1);
        // 0.2 * 1.0 + 0.8 * 0.5
        assert!(approx_eq(updated.rolling_accuracy, 0.6, 1e-12));
    }

    #[test]
    fn test_first_incorrect_answer_hits_the_six_hour_floor() {
        let fresh = ReviewItem::new("card-1", "algebra");
        let updated = update_after_answer_at(&fresh, false, now());

        // 1 day halved = 12h, above the floor
        assert_eq!(interval_of(&updated), Duration::hours(12));
        assert!(approx_eq(updated.rolling_accuracy, 0.4, 1e-12));

        let again = update_after_answer_at(&updated, false, now() + Duration::hours(12));
        // 12h halved = 6h, at the floor
        assert_eq!(interval_of(&again), Duration::hours(6));

        let third = update_after_answer_at(&again, false, now() + Duration::hours(18));
        // 6h halved would be 3h; the floor holds
        assert_eq!(interval_of(&third), Duration::hours(6));
    }

    #[test]
    fn test_correct_streak_doubles_without_shrinking() {
        let mut item = ReviewItem::new("card-1", "algebra");
        let mut at = now();
        let mut prev = Duration::zero();

        for _ in 0..8 {
            item = update_after_answer_at(&item, true, at);
            let interval = interval_of(&item);
            assert!(interval >= prev);
            assert!(interval >= Duration::days(1));
            prev = interval;
            at += interval;
        }
        // 1 day doubled 8 times
        assert_eq!(prev, Duration::days(256));
    }

    #[test]
    fn test_correct_after_wrong_respects_the_one_day_floor() {
        let mut item = ReviewItem::new("card-1", "algebra");
        // Drive the interval down to the 6-hour floor
        for i in 0..3 {
            item = update_after_answer_at(&item, false, now() + Duration::hours(i));
        }
        assert_eq!(interval_of(&item), Duration::hours(6));

        // 6h doubled is 12h, below the correct-answer floor of 1 day
        let recovered = update_after_answer_at(&item, true, now() + Duration::days(1));
        assert_eq!(interval_of(&recovered), Duration::days(1));
    }

    #[test]
    fn test_inverted_schedule_falls_back_to_the_floors() {
        let mut item = ReviewItem::new("card-1", "algebra");
        // Due before last seen: prev interval clamps to 1ms
        item.last_seen_at = Some(now());
        item.next_due_at = Some(now() - Duration::days(3));

        let correct = update_after_answer_at(&item, true, now());
        assert_eq!(interval_of(&correct), Duration::days(1));

        let wrong = update_after_answer_at(&item, false, now());
        assert_eq!(interval_of(&wrong), Duration::hours(6));
    }

    #[test]
    fn test_accuracy_stays_bounded_under_any_sequence() {
        let mut item = ReviewItem::new("card-1", "algebra");
        item.rolling_accuracy = 7.3; // hostile input

        for i in 0..50 {
            item = update_after_answer_at(&item, i % 3 == 0, now() + Duration::hours(i));
            assert!((0.0..=1.0).contains(&item.rolling_accuracy));
        }
    }

    #[test]
    fn test_custom_growth_factor_is_honored() {
        let config = AnswerConfig {
            growth_factor: 3.0,
            ..AnswerConfig::default()
        };
        let fresh = ReviewItem::new("card-1", "algebra");
        let updated = update_after_answer_with(&fresh, true, now(), &config);
        assert_eq!(interval_of(&updated), Duration::days(3));
    }
}
