//! Workout models

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{LiftlogError, Result};

/// A saved collection of planned exercises meant to be performed together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: i64,
    pub workout_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub workout_notes: String,
    #[serde(default)]
    pub selected_exercise_ids: Vec<i64>,
}

impl Workout {
    pub fn is_selected(&self, exercise_id: i64) -> bool {
        self.selected_exercise_ids.contains(&exercise_id)
    }
}

/// Editable form of a workout, used for both create and update requests
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDraft {
    pub workout_name: String,
    pub workout_notes: String,
    pub selected_exercise_ids: Vec<i64>,
}

impl WorkoutDraft {
    pub fn new(name: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            workout_name: name.into(),
            workout_notes: notes.into(),
            selected_exercise_ids: Vec::new(),
        }
    }

    /// Select an exercise, or deselect it if it is already selected.
    /// Returns whether the exercise is selected afterwards.
    pub fn toggle_exercise(&mut self, exercise_id: i64) -> bool {
        if let Some(pos) = self
            .selected_exercise_ids
            .iter()
            .position(|id| *id == exercise_id)
        {
            self.selected_exercise_ids.remove(pos);
            false
        } else {
            self.selected_exercise_ids.push(exercise_id);
            true
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.workout_name.trim().is_empty() {
            return Err(LiftlogError::validation("Workout must have a name."));
        }
        if self.selected_exercise_ids.is_empty() {
            return Err(LiftlogError::validation("Select at least one exercise."));
        }
        Ok(())
    }
}

impl From<&Workout> for WorkoutDraft {
    fn from(workout: &Workout) -> Self {
        Self {
            workout_name: workout.workout_name.clone(),
            workout_notes: workout.workout_notes.clone(),
            selected_exercise_ids: workout.selected_exercise_ids.clone(),
        }
    }
}

/// Treat a JSON `null` string as empty text
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
