//! Completed workout logs, both as submitted and as returned by the history endpoints

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use super::workout::null_as_empty;

/// One performed set as the server stores it. Carries no completion flag:
/// only completed sets are ever sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLog {
    pub set_number: u32,
    pub reps: u32,
    pub weight: f64,
}

/// Sets performed for one exercise within a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseLog {
    pub exercise_id: i64,
    pub exercise_name: String,
    #[serde(rename = "setLogDtoList")]
    pub sets: Vec<SetLog>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
}

impl ExerciseLog {
    pub fn total_reps(&self) -> u32 {
        self.sets.iter().map(|s| s.reps).sum()
    }

    /// Sum of reps x weight over all sets
    pub fn volume(&self) -> f64 {
        self.sets.iter().map(|s| s.reps as f64 * s.weight).sum()
    }

    pub fn top_weight(&self) -> Option<f64> {
        self.sets.iter().map(|s| s.weight).reduce(f64::max)
    }

    /// Short summary, e.g. `3 sets, 15 reps, top 42.5 kg`
    pub fn summary(&self) -> String {
        let set_word = if self.sets.len() == 1 { "set" } else { "sets" };
        match self.top_weight() {
            Some(top) => format!(
                "{} {}, {} reps, top {} kg",
                self.sets.len(),
                set_word,
                self.total_reps(),
                top
            ),
            None => "no sets".to_string(),
        }
    }
}

/// Body posted to `/workouts/complete/{id}` when a session ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedWorkoutSubmission {
    pub id: i64,
    pub workout_name: String,
    pub workout_notes: String,
    pub exercises: Vec<ExerciseLog>,
}

impl CompletedWorkoutSubmission {
    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }
}

/// A completed workout as returned by `/logs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub id: i64,
    pub workout_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub workout_notes: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub exercises: Vec<ExerciseLog>,
}

impl WorkoutRecord {
    /// Calendar date of the workout. Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
            .or_else(|| {
                chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|dt| dt.date())
            })
    }

    /// Date for display, `-` when missing or unparseable
    pub fn date_label(&self) -> String {
        self.calendar_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    pub fn volume(&self) -> f64 {
        self.exercises.iter().map(ExerciseLog::volume).sum()
    }
}
