//! Goal progress transitions.
//!
//! Both functions return the updated goal together with the XP award the
//! transition earned. Sending the award is left to the caller.

use chrono::{DateTime, Utc};

use crate::types::goal::Goal;

/// XP for finishing a goal when no reward is configured.
pub const GOAL_XP_AWARD: u32 = 25;

/// Outcome of a progress change.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    pub goal: Goal,
    /// `Some(xp)` when the change earned an award.
    pub xp_award: Option<u32>,
    /// Whether the goal was already completed before the change.
    pub was_completed: bool,
}

/// Adds `delta` (which may be negative) to the goal's progress.
///
/// Progress never drops below 0, and a completed goal never drops below its
/// target. It also never exceeds `u32::MAX`; callers that need to refuse an
/// out-of-range delta check [`fits_progress`] first. The first time progress reaches the target the goal completes,
/// `completed_at` is stamped and `xp` is awarded.
pub fn apply_increment(goal: &Goal, delta: i64, xp: u32, now: DateTime<Utc>) -> GoalProgress {
    let was_completed = goal.completed;
    let mut updated = goal.clone();

    let floor = if was_completed { i64::from(goal.target) } else { 0 };
    let progress = i64::from(goal.progress)
        .saturating_add(delta)
        .clamp(floor, i64::from(u32::MAX));
    updated.progress = u32::try_from(progress).unwrap_or(u32::MAX);

    let mut xp_award = None;
    if !was_completed && updated.progress >= updated.target {
        updated.completed = true;
        updated.completed_at = Some(now);
        xp_award = Some(xp);
    }

    GoalProgress {
        goal: updated,
        xp_award,
        was_completed,
    }
}

/// Whether adding `delta` keeps the stored progress within `u32`.
pub fn fits_progress(goal: &Goal, delta: i64) -> bool {
    i64::from(goal.progress).saturating_add(delta) <= i64::from(u32::MAX)
}

/// Marks the goal done regardless of its progress.
///
/// Always reports the award; `was_completed` tells the caller whether the
/// goal had already paid out.
pub fn complete(goal: &Goal, xp: u32, now: DateTime<Utc>) -> GoalProgress {
    let mut updated = goal.clone();
    updated.progress = updated.target;
    updated.completed = true;
    updated.completed_at = Some(now);

    GoalProgress {
        goal: updated,
        xp_award: Some(xp),
        was_completed: goal.completed,
    }
}
