//! In-memory state of a workout being performed
//!
//! A [`WorkoutSession`] holds one ordered list of [`SetResult`]s per planned
//! exercise. Each set is either pending (reps and weight editable) or done
//! (values frozen until the set is un-marked). When the workout ends the
//! session is turned into a [`CompletedWorkoutSubmission`] holding only the
//! sets that were actually completed.
//!
//! The session is synchronous and owned by a single caller. Loading it and
//! posting the result are the caller's business.

use std::collections::HashMap;

use crate::models::{
    CompletedWorkoutSubmission, ExerciseLog, PlannedExercise, SetLog, Workout,
};

/// Per-exercise set results keyed by planned exercise id
pub type SessionState = HashMap<i64, Vec<SetResult>>;

/// One working set of one exercise during a session
#[derive(Debug, Clone, PartialEq)]
pub struct SetResult {
    /// 1-based position within the exercise
    pub set_number: u32,
    pub reps: u32,
    pub weight: f64,
    pub completed: bool,
}

/// The two states a set can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetState {
    Pending,
    Done,
}

/// Editable value of a set. Completion is changed through
/// [`WorkoutSession::toggle_completed`] only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetField {
    Reps(u32),
    Weight(f64),
}

impl SetResult {
    fn planned(set_number: u32, exercise: &PlannedExercise) -> Self {
        Self {
            set_number,
            reps: exercise.planned_reps,
            weight: exercise.planned_weight,
            completed: false,
        }
    }

    pub fn state(&self) -> SetState {
        if self.completed {
            SetState::Done
        } else {
            SetState::Pending
        }
    }

    /// The set as sent to the server, without the completion flag
    pub fn to_log(&self) -> SetLog {
        SetLog {
            set_number: self.set_number,
            reps: self.reps,
            weight: self.weight,
        }
    }
}

/// Transient state of one workout in progress
#[derive(Debug, Clone)]
pub struct WorkoutSession {
    workout: Workout,
    planned: Vec<PlannedExercise>,
    state: SessionState,
}

impl WorkoutSession {
    /// Start a session, seeding every planned set with the planned reps and weight.
    ///
    /// The resulting state has exactly one entry per exercise id in `planned`.
    pub fn initialize(workout: Workout, planned: Vec<PlannedExercise>) -> Self {
        let state = planned
            .iter()
            .map(|exercise| {
                let sets = (1..=exercise.planned_sets)
                    .map(|n| SetResult::planned(n, exercise))
                    .collect();
                (exercise.id, sets)
            })
            .collect();

        Self {
            workout,
            planned,
            state,
        }
    }

    pub fn workout(&self) -> &Workout {
        &self.workout
    }

    pub fn planned_exercises(&self) -> &[PlannedExercise] {
        &self.planned
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Sets of one exercise, in set-number order
    pub fn sets(&self, exercise_id: i64) -> Option<&[SetResult]> {
        self.state.get(&exercise_id).map(Vec::as_slice)
    }

    pub fn set(&self, exercise_id: i64, set_index: usize) -> Option<&SetResult> {
        self.sets(exercise_id)?.get(set_index)
    }

    /// Whether `exercise_id`/`set_index` addresses a set in this session
    pub fn contains(&self, exercise_id: i64, set_index: usize) -> bool {
        self.set(exercise_id, set_index).is_some()
    }

    /// Change the reps or weight of a pending set.
    ///
    /// A completed set is left untouched and `false` is returned; un-mark it
    /// with [`toggle_completed`](Self::toggle_completed) first. No clamping is
    /// applied, callers enforce their own floors.
    ///
    /// # Panics
    ///
    /// Panics if the exercise id or set index is not part of this session.
    pub fn update_set(&mut self, exercise_id: i64, set_index: usize, field: SetField) -> bool {
        let set = self.set_mut(exercise_id, set_index);
        if set.completed {
            return false;
        }

        match field {
            SetField::Reps(reps) => set.reps = reps,
            SetField::Weight(weight) => set.weight = weight,
        }
        true
    }

    /// Flip the completion flag of a set and return the new value.
    ///
    /// # Panics
    ///
    /// Panics if the exercise id or set index is not part of this session.
    pub fn toggle_completed(&mut self, exercise_id: i64, set_index: usize) -> bool {
        let set = self.set_mut(exercise_id, set_index);
        set.completed = !set.completed;
        set.completed
    }

    /// Completed and total set counts over the whole session
    pub fn progress(&self) -> (usize, usize) {
        self.state.values().flatten().fold((0, 0), |(done, total), set| {
            (done + usize::from(set.completed), total + 1)
        })
    }

    /// Build the submission for the current state. Does not modify the session.
    pub fn submission(&self) -> CompletedWorkoutSubmission {
        build_submission(&self.workout, &self.planned, &self.state)
    }

    fn set_mut(&mut self, exercise_id: i64, set_index: usize) -> &mut SetResult {
        let sets = self
            .state
            .get_mut(&exercise_id)
            .unwrap_or_else(|| panic!("exercise {exercise_id} is not part of this session"));
        let len = sets.len();
        sets.get_mut(set_index).unwrap_or_else(|| {
            panic!("set index {set_index} out of range for exercise {exercise_id} ({len} sets)")
        })
    }
}

/// Turn session state into the completed-workout payload.
///
/// Keeps the order of `planned`, restricted to exercises selected in the
/// workout. Only completed sets are kept, in their original order, and an
/// exercise without any completed set is left out entirely.
pub fn build_submission(
    workout: &Workout,
    planned: &[PlannedExercise],
    state: &SessionState,
) -> CompletedWorkoutSubmission {
    let exercises = planned
        .iter()
        .filter(|exercise| workout.is_selected(exercise.id))
        .filter_map(|exercise| {
            let sets: Vec<SetLog> = state
                .get(&exercise.id)
                .into_iter()
                .flatten()
                .filter(|set| set.completed)
                .map(SetResult::to_log)
                .collect();

            if sets.is_empty() {
                return None;
            }

            Some(ExerciseLog {
                exercise_id: exercise.id,
                exercise_name: exercise.exercise_name.clone(),
                sets,
                notes: exercise.notes_or_empty().to_string(),
            })
        })
        .collect();

    CompletedWorkoutSubmission {
        id: workout.id,
        workout_name: workout.workout_name.clone(),
        workout_notes: workout.workout_notes.clone(),
        exercises,
    }
}
