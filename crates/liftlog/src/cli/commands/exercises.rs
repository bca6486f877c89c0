//! Exercise catalogue and planned exercise commands

use serde::Serialize;

use crate::cli::{truncate, Context};
use crate::error::Result;
use crate::models::{dedup_exercise_names, NewPlannedExercise, PlannedExercise, COMMON_EXERCISES};

#[derive(Serialize)]
struct Catalogue<'a> {
    yours: &'a [String],
    common: Vec<&'static str>,
}

/// List the user's exercise names, followed by common names not yet used
pub async fn list(ctx: &Context) -> Result<()> {
    let (client, token) = ctx.authenticated()?;
    let names = dedup_exercise_names(client.exercise_names(&token).await?);
    let common = suggested_common(&names);

    if ctx.emit_json(&Catalogue {
        yours: &names,
        common: common.clone(),
    })? {
        return Ok(());
    }

    if names.is_empty() {
        println!("You have no exercises yet.");
    } else {
        println!("Your exercises");
        println!("{}", "-".repeat(30));
        for name in &names {
            println!("  {}", name);
        }
    }

    if !common.is_empty() {
        println!("\nCommon exercises");
        println!("{}", "-".repeat(30));
        for name in common {
            println!("  {}", name);
        }
    }

    Ok(())
}

/// Common exercise names the user has not defined yet, compared case-insensitively
fn suggested_common(names: &[String]) -> Vec<&'static str> {
    COMMON_EXERCISES
        .iter()
        .copied()
        .filter(|common| !names.iter().any(|n| n.trim().eq_ignore_ascii_case(common)))
        .collect()
}

/// List planned exercises
pub async fn list_planned(ctx: &Context) -> Result<()> {
    let (client, token) = ctx.authenticated()?;
    let planned = client.planned_exercises(&token).await?;

    if ctx.emit_json(&planned)? {
        return Ok(());
    }

    if planned.is_empty() {
        println!("No planned exercises found.");
        return Ok(());
    }

    print_planned_table(&planned);
    println!("\nShowing {} planned exercises", planned.len());
    Ok(())
}

pub(crate) fn print_planned_table(planned: &[PlannedExercise]) {
    println!(
        "{:<6} {:<24} {:>5} {:>5} {:>9}  {}",
        "ID", "Exercise", "Sets", "Reps", "Weight", "Notes"
    );
    println!("{}", "-".repeat(70));

    for ex in planned {
        println!(
            "{:<6} {:<24} {:>5} {:>5} {:>9}  {}",
            ex.id,
            truncate(&ex.exercise_name, 24),
            ex.planned_sets,
            ex.planned_reps,
            format!("{} kg", ex.planned_weight),
            truncate(ex.notes_or_empty(), 30)
        );
    }
}

/// Create a planned exercise
pub async fn add_planned(ctx: &Context, exercise: NewPlannedExercise) -> Result<()> {
    exercise.validate()?;
    let (client, token) = ctx.authenticated()?;

    client.create_planned_exercise(&token, &exercise).await?;

    println!(
        "Exercise \"{}\" has been saved ({} x {} @ {} kg).",
        exercise.exercise_name, exercise.planned_sets, exercise.planned_reps, exercise.planned_weight
    );
    Ok(())
}
