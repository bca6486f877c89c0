//! Workout planning commands

use tracing::warn;

use crate::cli::{truncate, Context};
use crate::error::{format_user_error, LiftlogError, Result};
use crate::models::WorkoutDraft;

use super::exercises::print_planned_table;

/// List workouts
pub async fn list(ctx: &Context) -> Result<()> {
    let (client, token) = ctx.authenticated()?;
    let workouts = client.workouts(&token).await?;

    if ctx.emit_json(&workouts)? {
        return Ok(());
    }

    if workouts.is_empty() {
        println!("No workouts found. Create one with 'liftlog workouts create'.");
        return Ok(());
    }

    println!("{:<6} {:<24} {:>10}  {}", "ID", "Name", "Exercises", "Notes");
    println!("{}", "-".repeat(70));
    for workout in &workouts {
        println!(
            "{:<6} {:<24} {:>10}  {}",
            workout.id,
            truncate(&workout.workout_name, 24),
            workout.selected_exercise_ids.len(),
            truncate(&workout.workout_notes, 30)
        );
    }

    println!("\nStart a workout with 'liftlog workouts start <ID>'");
    Ok(())
}

/// Show one workout with its planned exercises
pub async fn show(ctx: &Context, id: i64) -> Result<()> {
    let (client, token) = ctx.authenticated()?;
    let workout = client.workout(&token, id).await?;
    let planned = client
        .planned_exercises_by_ids(&token, &workout.selected_exercise_ids)
        .await?;

    if ctx.emit_json(&serde_json::json!({
        "workout": &workout,
        "exercises": &planned,
    }))? {
        return Ok(());
    }

    println!("Workout: {}", workout.workout_name);
    let notes = if workout.workout_notes.is_empty() {
        "None"
    } else {
        workout.workout_notes.as_str()
    };
    println!("Notes:   {}", notes);
    println!();

    if planned.is_empty() {
        println!("No exercises selected.");
    } else {
        print_planned_table(&planned);
    }

    Ok(())
}

/// Create a workout from a name, notes and selected planned exercises
pub async fn create(ctx: &Context, name: String, notes: Option<String>, exercises: Vec<i64>) -> Result<()> {
    let mut draft = WorkoutDraft::new(name, notes.unwrap_or_default());
    for id in exercises {
        if !draft.selected_exercise_ids.contains(&id) {
            draft.toggle_exercise(id);
        }
    }
    draft.validate()?;

    let (client, token) = ctx.authenticated()?;
    client.create_workout(&token, &draft).await?;

    println!(
        "Workout \"{}\" created with {} exercises.",
        draft.workout_name,
        draft.selected_exercise_ids.len()
    );
    Ok(())
}

/// Edit a workout. Each id in `toggle` is selected if absent and deselected if present.
pub async fn edit(
    ctx: &Context,
    id: i64,
    name: Option<String>,
    notes: Option<String>,
    toggle: Vec<i64>,
) -> Result<()> {
    let (client, token) = ctx.authenticated()?;
    let workout = client.workout(&token, id).await?;

    let mut draft = WorkoutDraft::from(&workout);
    if let Some(name) = name {
        draft.workout_name = name;
    }
    if let Some(notes) = notes {
        draft.workout_notes = notes;
    }
    for exercise_id in toggle {
        let selected = draft.toggle_exercise(exercise_id);
        println!(
            "{} exercise {}",
            if selected { "Selected" } else { "Deselected" },
            exercise_id
        );
    }

    if draft == WorkoutDraft::from(&workout) {
        println!("Nothing to change.");
        return Ok(());
    }

    client.update_workout(&token, id, &draft).await?;
    println!("Workout updated successfully.");
    Ok(())
}

/// Delete workouts one by one. A failed id is reported and the rest still run.
pub async fn delete(ctx: &Context, ids: Vec<i64>) -> Result<()> {
    if ids.is_empty() {
        return Err(LiftlogError::invalid_param("no workout ids given"));
    }
    let (client, token) = ctx.authenticated()?;

    let mut failed = Vec::new();
    for id in &ids {
        match client.delete_workout(&token, *id).await {
            Ok(()) => println!("Deleted workout {}", id),
            Err(LiftlogError::NotAuthenticated) => return Err(LiftlogError::NotAuthenticated),
            Err(e) => {
                warn!(workout_id = *id, error = %e, "delete failed");
                eprintln!("Failed to delete workout with id {}: {}", id, format_user_error(&e));
                failed.push(*id);
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(LiftlogError::Other(format!(
            "{} of {} workouts could not be deleted",
            failed.len(),
            ids.len()
        )))
    }
}
