//! Progress & Streak Module
//!
//! Coarse, display-oriented progress tracking alongside the fine-grained
//! scheduling signals: a clamped percent-complete per topic with a derived
//! stage label, and a daily activity streak. Both are plain in-memory
//! values the caller persists however it likes.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Percent gained by a correct attempt
pub const CORRECT_PROGRESS_DELTA: i32 = 20;

/// Percent lost by an incorrect attempt
pub const INCORRECT_PROGRESS_DELTA: i32 = -10;

// ============================================================================
// PROGRESS STAGE
// ============================================================================

/// Coarse mastery stage derived from percent complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStage {
    /// No successful practice yet (0%)
    Unseen,
    /// Partial progress (1..=99%)
    InProgress,
    /// Fully practised (100%)
    Mastered,
}

impl ProgressStage {
    /// Stage for a given percent-complete value.
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            0 => Self::Unseen,
            100.. => Self::Mastered,
            _ => Self::InProgress,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unseen => "unseen",
            Self::InProgress => "in_progress",
            Self::Mastered => "mastered",
        }
    }
}

impl std::fmt::Display for ProgressStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// TOPIC PROGRESS
// ============================================================================

/// Percent-complete tracker for one topic.
///
/// Correct attempts add 20 points, incorrect ones remove 10, clamped to
/// 0..=100. Deliberately blunt: this feeds progress bars, not scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicProgress {
    /// Topic this progress belongs to
    pub topic: String,
    /// Percent complete, always in 0..=100
    pub percent: u8,
    /// When the topic was last practised
    pub last_practised_at: Option<DateTime<Utc>>,
}

impl TopicProgress {
    /// Fresh tracker at 0%.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            percent: 0,
            last_practised_at: None,
        }
    }

    /// Apply one graded attempt at the given time.
    pub fn apply_attempt(&mut self, correct: bool, at: DateTime<Utc>) {
        let delta = if correct {
            CORRECT_PROGRESS_DELTA
        } else {
            INCORRECT_PROGRESS_DELTA
        };
        self.percent = (i32::from(self.percent) + delta).clamp(0, 100) as u8;
        self.last_practised_at = Some(at);
    }

    /// Current coarse stage.
    pub fn stage(&self) -> ProgressStage {
        ProgressStage::from_percent(self.percent)
    }
}

// ============================================================================
// DAILY STREAK
// ============================================================================

/// Consecutive-day activity streak, tracked on UTC calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStreak {
    /// Length of the current run of consecutive active days
    pub current: u32,
    /// Longest run ever observed
    pub longest: u32,
    /// Last day (UTC) with recorded activity
    pub last_active_at: Option<DateTime<Utc>>,
}

impl DailyStreak {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record activity at the given time.
    ///
    /// A second event on the same UTC day is a no-op; the day after the
    /// last active day extends the run; any longer gap resets it to 1.
    /// The longest-streak high-water mark only ever grows.
    pub fn record_activity(&mut self, at: DateTime<Utc>) {
        let today = at.date_naive();
        match self.last_active_at.map(|last| last.date_naive()) {
            Some(last_day) if last_day == today => {
                return;
            }
            Some(last_day) if last_day.num_days_from_ce() + 1 == today.num_days_from_ce() => {
                self.current += 1;
            }
            _ => {
                self.current = 1;
            }
        }
        self.last_active_at = Some(at);
        self.longest = self.longest.max(self.current);
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
    }

    // ==================== Stage Tests ====================

    #[test]
    fn test_stage_boundaries() {
        assert_eq!(ProgressStage::from_percent(0), ProgressStage::Unseen);
        assert_eq!(ProgressStage::from_percent(1), ProgressStage::InProgress);
        assert_eq!(ProgressStage::from_percent(99), ProgressStage::InProgress);
        assert_eq!(ProgressStage::from_percent(100), ProgressStage::Mastered);
    }

    #[test]
    fn test_stage_labels() {
        assert_eq!(ProgressStage::Unseen.to_string(), "unseen");
        assert_eq!(ProgressStage::InProgress.as_str(), "in_progress");
        assert_eq!(ProgressStage::Mastered.as_str(), "mastered");
    }

    // ==================== Topic Progress Tests ====================

    #[test]
    fn test_progress_climbs_and_clamps_at_one_hundred() {
        let mut progress = TopicProgress::new("algebra");
        assert_eq!(progress.stage(), ProgressStage::Unseen);

        for i in 0..5 {
            progress.apply_attempt(true, at(1, i));
        }
        assert_eq!(progress.percent, 100);
        assert_eq!(progress.stage(), ProgressStage::Mastered);

        progress.apply_attempt(true, at(1, 6));
        assert_eq!(progress.percent, 100);
    }

    #[test]
    fn test_progress_drops_and_clamps_at_zero() {
        let mut progress = TopicProgress::new("algebra");
        progress.apply_attempt(true, at(1, 0)); // 20
        progress.apply_attempt(false, at(1, 1)); // 10
        assert_eq!(progress.percent, 10);
        assert_eq!(progress.stage(), ProgressStage::InProgress);

        progress.apply_attempt(false, at(1, 2)); // 0
        progress.apply_attempt(false, at(1, 3)); // clamped
        assert_eq!(progress.percent, 0);
        assert_eq!(progress.stage(), ProgressStage::Unseen);
        assert_eq!(progress.last_practised_at, Some(at(1, 3)));
    }

    // ==================== Streak Tests ====================

    #[test]
    fn test_same_day_activity_is_idempotent() {
        let mut streak = DailyStreak::new();
        streak.record_activity(at(1, 9));
        streak.record_activity(at(1, 21));
        assert_eq!(streak.current, 1);
        assert_eq!(streak.longest, 1);
        // The first event of the day is what sticks
        assert_eq!(streak.last_active_at, Some(at(1, 9)));
    }

    #[test]
    fn test_consecutive_days_extend_the_streak() {
        let mut streak = DailyStreak::new();
        for day in 1..=5 {
            streak.record_activity(at(day, 12));
        }
        assert_eq!(streak.current, 5);
        assert_eq!(streak.longest, 5);
    }

    #[test]
    fn test_a_gap_resets_current_but_keeps_longest() {
        let mut streak = DailyStreak::new();
        for day in 1..=4 {
            streak.record_activity(at(day, 12));
        }
        streak.record_activity(at(10, 12));
        assert_eq!(streak.current, 1);
        assert_eq!(streak.longest, 4);

        streak.record_activity(at(11, 12));
        assert_eq!(streak.current, 2);
        assert_eq!(streak.longest, 4);
    }

    #[test]
    fn test_midnight_boundary_counts_as_consecutive() {
        let mut streak = DailyStreak::new();
        streak.record_activity(at(1, 23));
        streak.record_activity(at(2, 0) + Duration::minutes(5));
        assert_eq!(streak.current, 2);
    }
}
