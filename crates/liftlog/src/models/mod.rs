//! Data models for the liftlog REST API
//!
//! Field names follow the server's camelCase JSON.

pub mod auth;
pub mod exercise;
pub mod log;
pub mod profile;
pub mod workout;

pub use auth::{LoginRequest, LoginResponse, RegisterRequest};
pub use exercise::{dedup_exercise_names, NewPlannedExercise, PlannedExercise, COMMON_EXERCISES};
pub use log::{CompletedWorkoutSubmission, ExerciseLog, SetLog, WorkoutRecord};
pub use profile::{PasswordChange, UserProfile};
pub use workout::{Workout, WorkoutDraft};
