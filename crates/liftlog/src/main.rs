use clap::{Parser, Subcommand};
use liftlog::cli::{commands, Context, OutputFormat};
use liftlog::config::Settings;
use liftlog::models::NewPlannedExercise;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(author, version, about = "Plan, perform and log strength workouts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(short, long, global = true, default_value = "table")]
    format: OutputFormat,

    /// Profile to use
    #[arg(short, long, global = true, env = "LIFTLOG_PROFILE")]
    profile: Option<String>,

    /// Base URL of the liftlog API
    #[arg(long, global = true, env = "LIFTLOG_API_URL")]
    api_url: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Authentication commands
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// User profile commands
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Exercise catalogue
    Exercises {
        #[command(subcommand)]
        command: ExerciseCommands,
    },
    /// Planned exercise commands
    Planned {
        #[command(subcommand)]
        command: PlannedCommands,
    },
    /// Workout commands
    Workouts {
        #[command(subcommand)]
        command: WorkoutCommands,
    },
    /// Completed workout history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
}

#[derive(Subcommand)]
enum AuthCommands {
    /// Log in to the liftlog server
    Login {
        /// Username
        #[arg(short, long, env = "LIFTLOG_USERNAME")]
        username: Option<String>,
    },
    /// Create a new account
    Register {
        /// Username
        #[arg(short, long)]
        username: Option<String>,
        /// Email address
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Logout and clear credentials
    Logout,
    /// Show authentication status
    Status,
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show user profile
    Show,
    /// Change password
    Password,
}

#[derive(Subcommand)]
enum ExerciseCommands {
    /// List your exercise names and common suggestions
    List,
}

#[derive(Subcommand)]
enum PlannedCommands {
    /// List planned exercises
    List,
    /// Add a planned exercise
    Add {
        /// Exercise name
        #[arg(short, long)]
        name: String,
        /// Planned sets
        #[arg(short, long, default_value = "3")]
        sets: u32,
        /// Planned reps per set
        #[arg(short, long, default_value = "10")]
        reps: u32,
        /// Planned weight in kg
        #[arg(short, long, default_value = "0")]
        weight: f64,
        /// Free-text notes
        #[arg(long, default_value = "")]
        notes: String,
    },
}

#[derive(Subcommand)]
enum WorkoutCommands {
    /// List workouts
    List,
    /// Show a workout and its exercises
    Show {
        /// Workout ID
        id: i64,
    },
    /// Create a workout
    Create {
        /// Workout name
        #[arg(short, long)]
        name: String,
        /// Workout notes
        #[arg(long)]
        notes: Option<String>,
        /// Planned exercise ID to include (repeatable)
        #[arg(short, long = "exercise", required = true)]
        exercises: Vec<i64>,
    },
    /// Edit a workout
    Edit {
        /// Workout ID
        id: i64,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New notes
        #[arg(long)]
        notes: Option<String>,
        /// Planned exercise ID to select or deselect (repeatable)
        #[arg(short, long)]
        toggle: Vec<i64>,
    },
    /// Delete workouts
    Delete {
        /// Workout IDs
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Perform a workout interactively
    Start {
        /// Workout ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// List completed workouts
    List,
    /// Show the sets logged for a completed workout
    Show {
        /// Log ID
        id: i64,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "liftlog=warn",
        1 => "liftlog=debug",
        _ => "liftlog=trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", liftlog::error::format_user_error(&e));
            std::process::exit(1);
        }
    };
    let ctx = Context::new(
        settings.resolve_profile(cli.profile),
        settings.resolve_api_url(cli.api_url.as_deref()),
        cli.format,
    );

    let result = match cli.command {
        Commands::Auth { command } => match command {
            AuthCommands::Login { username } => commands::login(&ctx, username).await,
            AuthCommands::Register { username, email } => {
                commands::register(&ctx, username, email).await
            }
            AuthCommands::Logout => commands::logout(&ctx).await,
            AuthCommands::Status => commands::status(&ctx).await,
        },
        Commands::Profile { command } => match command {
            ProfileCommands::Show => commands::show_profile(&ctx).await,
            ProfileCommands::Password => commands::change_password(&ctx).await,
        },
        Commands::Exercises { command } => match command {
            ExerciseCommands::List => commands::list_exercises(&ctx).await,
        },
        Commands::Planned { command } => match command {
            PlannedCommands::List => commands::list_planned(&ctx).await,
            PlannedCommands::Add {
                name,
                sets,
                reps,
                weight,
                notes,
            } => {
                let exercise = NewPlannedExercise {
                    exercise_name: name,
                    planned_sets: sets,
                    planned_reps: reps,
                    planned_weight: weight,
                    notes,
                };
                commands::add_planned(&ctx, exercise).await
            }
        },
        Commands::Workouts { command } => match command {
            WorkoutCommands::List => commands::list_workouts(&ctx).await,
            WorkoutCommands::Show { id } => commands::show_workout(&ctx, id).await,
            WorkoutCommands::Create {
                name,
                notes,
                exercises,
            } => commands::create_workout(&ctx, name, notes, exercises).await,
            WorkoutCommands::Edit {
                id,
                name,
                notes,
                toggle,
            } => commands::edit_workout(&ctx, id, name, notes, toggle).await,
            WorkoutCommands::Delete { ids } => commands::delete_workouts(&ctx, ids).await,
            WorkoutCommands::Start { id } => commands::start_workout(&ctx, id).await,
        },
        Commands::History { command } => match command {
            HistoryCommands::List => commands::list_history(&ctx).await,
            HistoryCommands::Show { id } => commands::show_history(&ctx, id).await,
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", liftlog::error::format_user_error(&e));
        std::process::exit(1);
    }
}
