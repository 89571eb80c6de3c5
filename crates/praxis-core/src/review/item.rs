//! Caller-owned review item state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::clamp01;

/// Neutral accuracy prior for an item with no recorded answers
pub const DEFAULT_ITEM_ACCURACY: f64 = 0.5;

/// One reviewable unit (a flashcard, a practice question) as seen by the
/// scheduler.
///
/// The scheduler reads these by reference and returns fresh snapshots from
/// [`update_after_answer`](super::update_after_answer); it never stores or
/// deletes them. `id` and `topic` are the only fields rescheduling leaves
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    /// Caller-assigned identifier, unique within the item set
    pub id: String,
    /// Topic the item belongs to, used for coverage balancing
    pub topic: String,
    /// When the item was last shown; `None` means never
    pub last_seen_at: Option<DateTime<Utc>>,
    /// When the item next comes due; `None` means immediately due
    pub next_due_at: Option<DateTime<Utc>>,
    /// Per-item accuracy EMA, always in [0, 1]
    pub rolling_accuracy: f64,
    /// Total answers recorded against this item
    pub attempts: u32,
}

impl ReviewItem {
    /// A fresh item with neutral defaults: never seen, immediately due,
    /// accuracy at the cold-start prior.
    pub fn new(id: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            topic: topic.into(),
            last_seen_at: None,
            next_due_at: None,
            rolling_accuracy: DEFAULT_ITEM_ACCURACY,
            attempts: 0,
        }
    }

    /// True when the item is due at `now`. A missing due date counts as
    /// immediately due.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_due_at.is_none_or(|due| due <= now)
    }

    /// Accuracy clamped to its contractual [0, 1] range.
    pub(crate) fn accuracy(&self) -> f64 {
        clamp01(self.rolling_accuracy)
    }
}

// ============================================================================
// TESTS
// ============================================================================
