//! Interactive workout session
//!
//! `liftlog workouts start <id>` loads the workout, then reads one command per
//! line until the workout is finished or abandoned. The session lives only in
//! memory; a failed submission keeps it so `finish` can be retried. The token
//! is read from the credential store on every `finish`, so logging in again
//! from another shell lets an expired session still be submitted.

use std::io::{self, BufRead, Write};
use tracing::{info, warn};

use crate::cli::Context;
use crate::client::ApiClient;
use crate::config::CredentialStore;
use crate::error::{format_user_error, LiftlogError, Result};
use crate::models::CompletedWorkoutSubmission;
use crate::session::{SetField, SetState, WorkoutSession};

/// Lowest reps value the session commands will set
pub const MIN_REPS: u32 = 1;
/// Lowest weight the session commands will set
pub const MIN_WEIGHT: f64 = 0.0;

const HELP: &str = "\
Commands:
  show                         list all sets
  reps <exercise> <set> <n>    set reps (use +n / -n to adjust)
  weight <exercise> <set> <w>  set weight in kg (use +w / -w to adjust)
  done <exercise> <set>        mark or unmark a set as completed
  preview                      show what would be submitted
  finish                       submit the completed sets
  quit                         abandon the workout
  help                         show this help";

/// A new value, either absolute or relative to the current one
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Change {
    To(f64),
    By(f64),
}

impl Change {
    fn parse(raw: &str) -> Result<Self> {
        let invalid = || LiftlogError::invalid_param(format!("'{}' is not a number", raw));
        let value = |s: &str| -> Result<f64> {
            let v: f64 = s.parse().map_err(|_| invalid())?;
            if v.is_finite() {
                Ok(v)
            } else {
                Err(invalid())
            }
        };

        if let Some(rest) = raw.strip_prefix('+') {
            Ok(Self::By(value(rest)?))
        } else if raw.starts_with('-') {
            Ok(Self::By(value(raw)?))
        } else {
            Ok(Self::To(value(raw)?))
        }
    }

    fn apply(self, current: f64) -> f64 {
        match self {
            Self::To(v) => v,
            Self::By(delta) => current + delta,
        }
    }
}

/// One line of input, parsed. Set numbers are 1-based as typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Show,
    Reps { exercise_id: i64, set_number: usize, change: Change },
    Weight { exercise_id: i64, set_number: usize, change: Change },
    Done { exercise_id: i64, set_number: usize },
    Preview,
    Finish,
    Quit,
    Help,
}

impl SessionCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = parts.split_first() else {
            return Err(LiftlogError::invalid_param("empty command"));
        };

        let expect_args = |n: usize| -> Result<()> {
            if args.len() == n {
                Ok(())
            } else {
                Err(LiftlogError::invalid_param(format!(
                    "'{}' takes {} arguments, type 'help' for usage",
                    name, n
                )))
            }
        };

        match name.to_ascii_lowercase().as_str() {
            "show" | "ls" => Ok(Self::Show),
            "reps" | "r" => {
                expect_args(3)?;
                Ok(Self::Reps {
                    exercise_id: parse_exercise_id(args[0])?,
                    set_number: parse_set_number(args[1])?,
                    change: Change::parse(args[2])?,
                })
            }
            "weight" | "w" => {
                expect_args(3)?;
                Ok(Self::Weight {
                    exercise_id: parse_exercise_id(args[0])?,
                    set_number: parse_set_number(args[1])?,
                    change: Change::parse(args[2])?,
                })
            }
            "done" | "d" => {
                expect_args(2)?;
                Ok(Self::Done {
                    exercise_id: parse_exercise_id(args[0])?,
                    set_number: parse_set_number(args[1])?,
                })
            }
            "preview" | "p" => Ok(Self::Preview),
            "finish" | "f" => Ok(Self::Finish),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            "help" | "h" | "?" => Ok(Self::Help),
            other => Err(LiftlogError::invalid_param(format!(
                "unknown command '{}', type 'help' for usage",
                other
            ))),
        }
    }
}

fn parse_exercise_id(raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| LiftlogError::invalid_param(format!("'{}' is not an exercise id", raw)))
}

fn parse_set_number(raw: &str) -> Result<usize> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(LiftlogError::invalid_param(format!(
            "'{}' is not a set number (sets start at 1)",
            raw
        ))),
    }
}

/// Reps after applying `change`, never below [`MIN_REPS`]
pub fn clamp_reps(current: u32, change: Change) -> u32 {
    let next = change.apply(current as f64).round();
    if next < MIN_REPS as f64 {
        MIN_REPS
    } else if next > u32::MAX as f64 {
        u32::MAX
    } else {
        next as u32
    }
}

/// Weight after applying `change`, never below [`MIN_WEIGHT`].
/// A result too large to represent is rejected.
pub fn clamp_weight(current: f64, change: Change) -> Result<f64> {
    let next = change.apply(current);
    if !next.is_finite() {
        return Err(LiftlogError::invalid_param("weight is too large"));
    }
    Ok(next.max(MIN_WEIGHT))
}

/// What the input loop should do after a command
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Continue(String),
    Submit(CompletedWorkoutSubmission),
    Quit,
}

/// Resolve a user-typed exercise id and 1-based set number to a set index
fn locate(session: &WorkoutSession, exercise_id: i64, set_number: usize) -> Result<usize> {
    let sets = session.sets(exercise_id).ok_or_else(|| {
        LiftlogError::invalid_param(format!("exercise {} is not in this workout", exercise_id))
    })?;
    let index = set_number.checked_sub(1).unwrap_or(usize::MAX);
    if !session.contains(exercise_id, index) {
        return Err(LiftlogError::invalid_param(format!(
            "exercise {} has {} sets, there is no set {}",
            exercise_id,
            sets.len(),
            set_number
        )));
    }
    Ok(index)
}

fn exercise_name(session: &WorkoutSession, exercise_id: i64) -> &str {
    session
        .planned_exercises()
        .iter()
        .find(|e| e.id == exercise_id)
        .map(|e| e.exercise_name.as_str())
        .unwrap_or("exercise")
}

/// Apply one command to the session. Validation failures come back as errors
/// and leave the session unchanged.
pub fn execute(session: &mut WorkoutSession, command: SessionCommand) -> Result<Step> {
    let step = match command {
        SessionCommand::Show => Step::Continue(render_session(session)),
        SessionCommand::Help => Step::Continue(HELP.to_string()),
        SessionCommand::Preview => Step::Continue(render_submission(&session.submission())),
        SessionCommand::Finish => Step::Submit(session.submission()),
        SessionCommand::Quit => Step::Quit,
        SessionCommand::Reps {
            exercise_id,
            set_number,
            change,
        } => {
            let index = locate(session, exercise_id, set_number)?;
            let current = session.set(exercise_id, index).map(|s| s.reps).unwrap_or(MIN_REPS);
            let reps = clamp_reps(current, change);
            edit_outcome(session, exercise_id, set_number, SetField::Reps(reps))
        }
        SessionCommand::Weight {
            exercise_id,
            set_number,
            change,
        } => {
            let index = locate(session, exercise_id, set_number)?;
            let current = session.set(exercise_id, index).map(|s| s.weight).unwrap_or(MIN_WEIGHT);
            let weight = clamp_weight(current, change)?;
            edit_outcome(session, exercise_id, set_number, SetField::Weight(weight))
        }
        SessionCommand::Done {
            exercise_id,
            set_number,
        } => {
            let index = locate(session, exercise_id, set_number)?;
            let completed = session.toggle_completed(exercise_id, index);
            let (done, total) = session.progress();
            Step::Continue(format!(
                "{} set {} {} ({}/{} sets done)",
                exercise_name(session, exercise_id),
                set_number,
                if completed { "completed" } else { "reopened" },
                done,
                total
            ))
        }
    };
    Ok(step)
}

fn edit_outcome(session: &mut WorkoutSession, exercise_id: i64, set_number: usize, field: SetField) -> Step {
    let index = set_number - 1;
    if session.update_set(exercise_id, index, field) {
        let line = session
            .set(exercise_id, index)
            .map(|s| format!("{} reps @ {} kg", s.reps, s.weight))
            .unwrap_or_default();
        Step::Continue(format!(
            "{} set {}: {}",
            exercise_name(session, exercise_id),
            set_number,
            line
        ))
    } else {
        Step::Continue(format!(
            "{} set {} is completed and was not changed. Run 'done {} {}' to reopen it first.",
            exercise_name(session, exercise_id),
            set_number,
            exercise_id,
            set_number
        ))
    }
}

/// All exercises and sets of the session as text
pub fn render_session(session: &WorkoutSession) -> String {
    let mut out = String::new();
    let workout = session.workout();
    out.push_str(&format!("Workout: {}\n", workout.workout_name));
    if !workout.workout_notes.is_empty() {
        out.push_str(&format!("Notes:   {}\n", workout.workout_notes));
    }

    for exercise in session.planned_exercises() {
        out.push_str(&format!(
            "\n[{}] {}  (planned {})\n",
            exercise.id,
            exercise.exercise_name,
            exercise.target()
        ));
        for set in session.sets(exercise.id).unwrap_or_default() {
            let mark = match set.state() {
                SetState::Done => "x",
                SetState::Pending => " ",
            };
            out.push_str(&format!(
                "  [{}] Set {}: {:>3} reps  {:>7} kg\n",
                mark, set.set_number, set.reps, set.weight
            ));
        }
    }

    let (done, total) = session.progress();
    out.push_str(&format!("\n{}/{} sets done", done, total));
    out
}

/// The submission payload as text
pub fn render_submission(submission: &CompletedWorkoutSubmission) -> String {
    if submission.exercises.is_empty() {
        return "No completed sets yet; nothing would be logged.".to_string();
    }

    let mut out = format!("Would log {}:\n", submission.workout_name);
    for log in &submission.exercises {
        out.push_str(&format!("  {} - {}\n", log.exercise_name, log.summary()));
        for set in &log.sets {
            out.push_str(&format!(
                "    Set {}: {} reps, {} kg\n",
                set.set_number, set.reps, set.weight
            ));
        }
    }
    out.trim_end().to_string()
}

/// Start an interactive session for a workout
pub async fn start(ctx: &Context, workout_id: i64) -> Result<()> {
    let store = ctx.store()?;
    let token = store.require()?;
    let client = ctx.client()?;

    let session = client.load_session(&token, workout_id).await?;
    info!(workout_id, "session started");

    let stdin = io::stdin();
    run(&client, &store, session, stdin.lock()).await
}

/// Drive a session from line-based input until it is submitted or abandoned.
/// Only end of input or a read failure ends the loop without a decision.
pub async fn run<R: BufRead>(
    client: &ApiClient,
    store: &CredentialStore,
    mut session: WorkoutSession,
    mut input: R,
) -> Result<()> {
    println!("{}", render_session(&session));
    println!("\nType 'help' for commands.");

    let mut buf = Vec::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            println!();
            return abandon(&session);
        }
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(_) => {
                println!("Input was not valid UTF-8 and was ignored.");
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let step = match SessionCommand::parse(line).and_then(|cmd| execute(&mut session, cmd)) {
            Ok(step) => step,
            Err(e) => {
                println!("{}", format_user_error(&e));
                continue;
            }
        };

        match step {
            Step::Continue(message) => println!("{}", message),
            Step::Quit => return abandon(&session),
            Step::Submit(submission) => {
                if submit(client, store, &submission).await {
                    return Ok(());
                }
            }
        }
    }
}

/// Post the submission with the current stored token. Returns `false` when the
/// session has to stay open for another attempt.
async fn submit(client: &ApiClient, store: &CredentialStore, submission: &CompletedWorkoutSubmission) -> bool {
    let token = match store.require() {
        Ok(token) => token,
        Err(e) => {
            warn!(error = %e, "no usable token for submission");
            println!("Not logged in: {}", format_user_error(&e));
            println!("Run 'liftlog auth login' in another shell, then type 'finish' again.");
            return false;
        }
    };

    if submission.exercises.is_empty() {
        println!("No sets are marked as completed; the workout will be logged without exercises.");
    }

    match client.complete_workout(&token, submission).await {
        Ok(()) => {
            info!(
                workout_id = submission.id,
                sets = submission.total_sets(),
                "workout completed"
            );
            println!("Workout completed! Logged {} sets.", submission.total_sets());
            true
        }
        Err(e) => {
            warn!(error = %e, "submission failed, keeping session");
            println!("Failed to complete workout: {}", format_user_error(&e));
            if matches!(e, LiftlogError::NotAuthenticated) {
                println!("Your sets are kept. Run 'liftlog auth logout' and 'liftlog auth login' in another shell, then type 'finish' again.");
            } else if e.is_remote() {
                println!("Your sets are kept. Type 'finish' to try again once the server is reachable.");
            } else {
                println!("Your sets are kept. Type 'finish' to try again.");
            }
            false
        }
    }
}

fn abandon(session: &WorkoutSession) -> Result<()> {
    let (done, _) = session.progress();
    if done > 0 {
        println!("Workout abandoned; {} completed sets were not logged.", done);
    } else {
        println!("Workout abandoned.");
    }
    Ok(())
}
