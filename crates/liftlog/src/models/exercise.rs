//! Exercise catalogue and planned exercise models

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{LiftlogError, Result};

/// Exercise names offered as shortcuts when defining a new exercise
pub const COMMON_EXERCISES: [&str; 5] = [
    "Bicep Curl",
    "Bench Press",
    "Squat",
    "Deadlift",
    "Overhead Press",
];

/// A user-defined exercise template with target sets, reps and weight.
/// Reusable across workouts; read-only while a session is running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedExercise {
    pub id: i64,
    pub exercise_name: String,
    pub planned_sets: u32,
    pub planned_reps: u32,
    pub planned_weight: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PlannedExercise {
    /// Notes as text, empty when the server sent none
    pub fn notes_or_empty(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }

    /// One-line target, e.g. `3 x 5 @ 40 kg`
    pub fn target(&self) -> String {
        format!(
            "{} x {} @ {} kg",
            self.planned_sets, self.planned_reps, self.planned_weight
        )
    }
}

/// Request body for creating a planned exercise
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlannedExercise {
    pub exercise_name: String,
    pub planned_sets: u32,
    pub planned_reps: u32,
    pub planned_weight: f64,
    pub notes: String,
}

impl NewPlannedExercise {
    /// Check the fields before sending them to the server
    pub fn validate(&self) -> Result<()> {
        if self.exercise_name.trim().is_empty() {
            return Err(LiftlogError::validation("Please provide an exercise name."));
        }
        if self.planned_sets == 0 {
            return Err(LiftlogError::validation("Planned sets must be at least 1."));
        }
        if self.planned_reps == 0 {
            return Err(LiftlogError::validation("Planned reps must be at least 1."));
        }
        if !self.planned_weight.is_finite() || self.planned_weight < 0.0 {
            return Err(LiftlogError::validation(
                "Planned weight must be zero or more.",
            ));
        }
        Ok(())
    }
}

/// Remove duplicate and blank exercise names, keeping the first occurrence of each.
pub fn dedup_exercise_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .map(Into::into)
        .filter(|name| !name.trim().is_empty())
        .filter(|name| seen.insert(name.trim().to_string()))
        .collect()
}
