//! Completed workout history

use crate::cli::{truncate, Context};
use crate::error::Result;
use crate::models::ExerciseLog;

/// List completed workouts, newest first when the server sends dates
pub async fn list(ctx: &Context) -> Result<()> {
    let (client, token) = ctx.authenticated()?;
    let mut records = client.workout_logs(&token).await?;
    records.sort_by(|a, b| b.calendar_date().cmp(&a.calendar_date()));

    if ctx.emit_json(&records)? {
        return Ok(());
    }

    if records.is_empty() {
        println!("No completed workouts yet.");
        return Ok(());
    }

    println!(
        "{:<6} {:<12} {:<24} {:>6} {:>12}",
        "ID", "Date", "Workout", "Sets", "Volume"
    );
    println!("{}", "-".repeat(64));
    for record in &records {
        println!(
            "{:<6} {:<12} {:<24} {:>6} {:>12}",
            record.id,
            record.date_label(),
            truncate(&record.workout_name, 24),
            record.total_sets(),
            format!("{:.1} kg", record.volume())
        );
    }

    println!("\nShowing {} workouts", records.len());
    Ok(())
}

/// Show every logged set of one completed workout
pub async fn show(ctx: &Context, id: i64) -> Result<()> {
    let (client, token) = ctx.authenticated()?;
    let record = client.workout_log(&token, id).await?;

    if ctx.emit_json(&record)? {
        return Ok(());
    }

    println!("{} ({})", record.workout_name, record.date_label());
    if !record.workout_notes.is_empty() {
        println!("Notes: {}", record.workout_notes);
    }

    for log in &record.exercises {
        println!();
        print_exercise_log(log);
    }

    Ok(())
}

fn print_exercise_log(log: &ExerciseLog) {
    println!("{} - {}", log.exercise_name, log.summary());
    println!("{}", "-".repeat(40));
    for set in &log.sets {
        println!("  Set {}: {} reps, {} kg", set.set_number, set.reps, set.weight);
    }
    if log.notes.is_empty() {
        println!("  No notes provided.");
    } else {
        println!("  Notes: {}", log.notes);
    }
}
