//! # Praxis Core
//!
//! Adaptive retrieval-practice scheduling for learning applications. Two
//! cooperating layers answer the two questions a study session keeps asking:
//!
//! - **Topic priority**: [`PriorityEngine`] ranks registered topics by a
//!   seven-factor weighted score (mastery gap, forgetting risk, coverage
//!   deficit, assessment urgency, struggle spike, novelty, over-practice
//!   penalty), each factor normalized to [0, 1] and explained by
//!   human-readable reason labels.
//! - **Item scheduling**: pure functions over caller-owned [`ReviewItem`]
//!   records pick the next item to show ([`choose_next_item`]) and
//!   reschedule it after grading ([`update_after_answer`]) with a
//!   double-on-correct, halve-on-incorrect interval rule.
//! - **Progress & streaks**: coarse percent-complete tracking
//!   ([`TopicProgress`]) and consecutive-day activity streaks
//!   ([`DailyStreak`]) for display surfaces.
//!
//! The crate performs no I/O and holds no global state: the engine is an
//! explicit instance the caller owns (one per learner or session), and the
//! item scheduler is stateless. Every public type is serde-serializable so
//! hosts can persist snapshots between sessions.
//!
//! ## Quick Start
//!
//! ```rust
//! use praxis_core::{PriorityEngine, ReviewItem, choose_next_item, update_after_answer};
//!
//! // Rank topics for a learner
//! let mut engine = PriorityEngine::new(["algebra", "geometry", "calculus"]);
//! engine.record_attempt("algebra", true)?;
//! engine.record_attempt("geometry", false)?;
//!
//! for result in engine.priority_topics(3) {
//!     println!("{}: {:.3}", result.topic, result.breakdown.score);
//! }
//!
//! // Pick and reschedule an item
//! let items = vec![
//!     ReviewItem::new("card-1", "algebra"),
//!     ReviewItem::new("card-2", "geometry"),
//! ];
//! let next = choose_next_item(&items)?;
//! let updated = update_after_answer(next, true);
//! assert!(updated.next_due_at.is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod priority;
pub mod progress;
pub mod review;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use priority::{
    AttemptEvent, EngineConfig, PriorityBreakdown, PriorityEngine, PriorityEngineError,
    PriorityResult, ReasonTag, ScoreWeights, TopicConfig, TopicMetrics, forgetting_curve,
    urgency_curve,
};

pub use review::{
    AnswerConfig, ReviewItem, SchedulerError, SelectionConfig, choose_next_item,
    choose_next_item_with, choose_next_items, choose_next_items_with, update_after_answer,
    update_after_answer_at, update_after_answer_with,
};

pub use progress::{DailyStreak, ProgressStage, TopicProgress};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenience re-exports for the common path.
pub mod prelude {
    pub use crate::{
        AnswerConfig, EngineConfig, PriorityEngine, PriorityEngineError, PriorityResult,
        ReviewItem, SchedulerError, SelectionConfig, TopicConfig, TopicMetrics, choose_next_item,
        choose_next_item_with, choose_next_items, choose_next_items_with, update_after_answer,
        update_after_answer_at, update_after_answer_with,
    };

    pub use crate::{DailyStreak, ProgressStage, TopicProgress};
}
