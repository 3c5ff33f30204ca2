//! Goal Manager for StudyFlow.
//!
//! Goals live in SQLite. Progress changes go through `services::goal_tracker`;
//! completions award XP through `UPDATE_XP`.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::services::goal_tracker::{self, GoalProgress};
use crate::services::messaging::{Message, MessageSender};
use crate::types::errors::GoalError;
use crate::types::goal::{Goal, NewGoal};

pub trait GoalManagerTrait {
    fn add_goal(&mut self, goal: NewGoal) -> Result<Goal, GoalError>;
    fn get_goal(&self, id: &str) -> Result<Goal, GoalError>;
    fn list_goals(&self) -> Result<Vec<Goal>, GoalError>;
    fn preview_goals(&self, limit: usize) -> Result<Vec<Goal>, GoalError>;
    fn increment_progress(&mut self, id: &str, delta: i64) -> Result<GoalProgress, GoalError>;
    fn complete_goal(&mut self, id: &str) -> Result<GoalProgress, GoalError>;
    fn delete_goal(&mut self, id: &str) -> Result<(), GoalError>;
}

pub struct GoalManager<'a> {
    conn: &'a Connection,
    sender: &'a dyn MessageSender,
    goal_xp: u32,
}

const GOAL_COLUMNS: &str =
    "id, title, description, category, target, progress, completed, created_at, completed_at";

impl<'a> GoalManager<'a> {
    pub fn new(conn: &'a Connection, sender: &'a dyn MessageSender, goal_xp: u32) -> Self {
        Self { conn, sender, goal_xp }
    }

    fn row_to_goal(row: &rusqlite::Row) -> rusqlite::Result<Goal> {
        Ok(Goal {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            category: row.get(3)?,
            target: row.get(4)?,
            progress: row.get(5)?,
            completed: row.get(6)?,
            created_at: row.get(7)?,
            completed_at: row.get(8)?,
        })
    }

    fn store_progress(&self, goal: &Goal) -> Result<(), GoalError> {
        self.conn
            .execute(
                "UPDATE goals SET progress = ?1, completed = ?2, completed_at = ?3 WHERE id = ?4",
                params![goal.progress, goal.completed, goal.completed_at, goal.id],
            )
            .map_err(|e| GoalError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    /// Sends the award for a transition. A completion of an already completed
    /// goal is not paid twice.
    fn pay_out(&self, outcome: &GoalProgress) {
        let amount = match outcome.xp_award {
            Some(amount) => amount,
            None => return,
        };
        if outcome.was_completed {
            tracing::warn!(goal = %outcome.goal.id, "goal already completed, XP not awarded again");
            return;
        }
        tracing::info!(goal = %outcome.goal.id, amount, "goal completed");
        if let Err(e) = self.sender.send(&Message::UpdateXp { amount }) {
            tracing::warn!("failed to award goal XP: {}", e);
        }
    }

    fn apply(&mut self, goal: &Goal, change: impl FnOnce(&Goal, DateTime<Utc>) -> GoalProgress) -> Result<GoalProgress, GoalError> {
        let outcome = change(goal, Utc::now());
        self.store_progress(&outcome.goal)?;
        self.pay_out(&outcome);
        Ok(outcome)
    }
}

impl<'a> GoalManagerTrait for GoalManager<'a> {
    fn add_goal(&mut self, goal: NewGoal) -> Result<Goal, GoalError> {
        let title = goal.title.trim();
        if title.is_empty() {
            return Err(GoalError::InvalidInput("title is required".to_string()));
        }
        let target = u32::try_from(goal.target)
            .ok()
            .filter(|t| *t > 0)
            .ok_or_else(|| GoalError::InvalidInput(format!("target must be a positive number, got {}", goal.target)))?;

        let created = Goal {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: goal.description.trim().to_string(),
            category: goal.category.trim().to_string(),
            target,
            progress: 0,
            completed: false,
            created_at: Utc::now(),
            completed_at: None,
        };

        self.conn
            .execute(
                "INSERT INTO goals (id, title, description, category, target, progress, completed, created_at, completed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    created.id,
                    created.title,
                    created.description,
                    created.category,
                    created.target,
                    created.progress,
                    created.completed,
                    created.created_at,
                    created.completed_at,
                ],
            )
            .map_err(|e| GoalError::DatabaseError(e.to_string()))?;

        tracing::debug!(goal = %created.id, target, "goal added");
        Ok(created)
    }

    fn get_goal(&self, id: &str) -> Result<Goal, GoalError> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM goals WHERE id = ?1", GOAL_COLUMNS),
                params![id],
                Self::row_to_goal,
            )
            .optional()
            .map_err(|e| GoalError::DatabaseError(e.to_string()))?
            .ok_or_else(|| GoalError::NotFound(id.to_string()))
    }

    /// All goals in creation order.
    fn list_goals(&self) -> Result<Vec<Goal>, GoalError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM goals ORDER BY created_at ASC, rowid ASC", GOAL_COLUMNS))
            .map_err(|e| GoalError::DatabaseError(e.to_string()))?;
        let goals = stmt
            .query_map([], Self::row_to_goal)
            .map_err(|e| GoalError::DatabaseError(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| GoalError::DatabaseError(e.to_string()))?;
        Ok(goals)
    }

    /// First `limit` active goals, for the dashboard.
    fn preview_goals(&self, limit: usize) -> Result<Vec<Goal>, GoalError> {
        Ok(self
            .list_goals()?
            .into_iter()
            .filter(|g| !g.completed)
            .take(limit)
            .collect())
    }

    fn increment_progress(&mut self, id: &str, delta: i64) -> Result<GoalProgress, GoalError> {
        let goal = self.get_goal(id)?;
        if !goal_tracker::fits_progress(&goal, delta) {
            return Err(GoalError::InvalidInput(format!(
                "delta {} would push progress past {}",
                delta,
                u32::MAX
            )));
        }
        let xp = self.goal_xp;
        self.apply(&goal, |goal, now| goal_tracker::apply_increment(goal, delta, xp, now))
    }

    fn complete_goal(&mut self, id: &str) -> Result<GoalProgress, GoalError> {
        let goal = self.get_goal(id)?;
        let xp = self.goal_xp;
        self.apply(&goal, |goal, now| goal_tracker::complete(goal, xp, now))
    }

    fn delete_goal(&mut self, id: &str) -> Result<(), GoalError> {
        let affected = self
            .conn
            .execute("DELETE FROM goals WHERE id = ?1", params![id])
            .map_err(|e| GoalError::DatabaseError(e.to_string()))?;
        if affected == 0 {
            tracing::debug!(goal = id, "delete of unknown goal ignored");
        }
        Ok(())
    }
}
