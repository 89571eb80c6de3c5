//! Item Review Module
//!
//! Stateless spaced-repetition scheduling over caller-owned
//! [`ReviewItem`] records. The caller loads its items, asks
//! [`choose_next_item`] (or [`choose_next_items`]) which to present,
//! grades the answer, and persists the snapshot returned by
//! [`update_after_answer`]. Nothing here holds state between calls, so
//! every function is safe to invoke from any thread on its own snapshot.
//!
//! Selection favors due items, then weak, stale and under-covered ones,
//! with a small random perturbation so equal-scoring items rotate instead
//! of starving. Rescheduling doubles the interval on a correct answer and
//! halves it on an incorrect one, floored at one day and six hours
//! respectively.

mod interval;
mod item;
mod select;

pub use interval::{
    AnswerConfig, DEFAULT_GROWTH_FACTOR, DEFAULT_SHRINK_FACTOR, update_after_answer,
    update_after_answer_at, update_after_answer_with,
};
pub use item::{DEFAULT_ITEM_ACCURACY, ReviewItem};
pub use select::{
    DEFAULT_COVERAGE_WEIGHT, DEFAULT_DUE_WEIGHT, DEFAULT_NOISE_SCALE, DEFAULT_RECENCY_WEIGHT,
    DEFAULT_WEAKNESS_WEIGHT, SchedulerError, SelectionConfig, choose_next_item,
    choose_next_item_with, choose_next_items, choose_next_items_with,
};

/// Result type for item-scheduler operations
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Milliseconds per day, the unit all interval arithmetic runs in.
pub(crate) const DAY_MS: i64 = 24 * 60 * 60 * 1000;

pub(crate) const HOUR_MS: i64 = 60 * 60 * 1000;

/// Clamp to [0, 1], mapping NaN to 0. Upstream telemetry is not trusted
/// to stay in range.
pub(crate) fn clamp01(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}
