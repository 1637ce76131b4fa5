// ABOUTME: Command-line host for the workout auto-post engine
// ABOUTME: Edits per-user settings, records completed workouts, and creates manual posts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Show effective settings (defaults on first access)
//! autopost-cli settings show --user 6f1c...
//!
//! # Change only the cooldown and calorie minimum
//! autopost-cli settings set --user 6f1c... --cooldown-hours 4 --min-calories 100
//!
//! # Record a finished session and let the engine decide whether to post
//! autopost-cli workout complete --user 6f1c... --name "Leg Day" --duration 45 --calories 320
//!
//! # Post now from manually entered workout details
//! autopost-cli post manual --user 6f1c... --name "Trail Run" --duration 70 --calories 610
//!
//! # Verbose output
//! autopost-cli -v settings show --user 6f1c...
//! ```

use std::env;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use fitsocial_autopost::{
    autopost::{AutoPostEngine, AutoPostOutcome},
    config::AutoPostConfig,
    database::AutoPostStore,
    logging::LoggingConfig,
    models::{AutoPostSettings, PartialAutoPostSettings, WorkoutCompletionEvent},
    services::auto_post::{self, ManualWorkoutPost},
};
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "autopost-cli",
    about = "Workout Auto-Post CLI",
    long_about = "Manage auto-post settings and drive the auto-post engine from the command line."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Per-user auto-post settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
    /// Workout session events
    Workout {
        #[command(subcommand)]
        action: WorkoutCommand,
    },
    /// Post creation
    Post {
        #[command(subcommand)]
        action: PostCommand,
    },
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print the effective settings
    Show {
        /// User id
        #[arg(long)]
        user: Uuid,
    },
    /// Update some settings, keeping the rest
    Set {
        /// User id
        #[arg(long)]
        user: Uuid,
        /// Master switch
        #[arg(long)]
        enabled: Option<bool>,
        /// Post on plain workout completion
        #[arg(long)]
        on_workout_completion: Option<bool>,
        /// Allow milestone posts
        #[arg(long)]
        on_milestones: Option<bool>,
        /// Allow streak posts
        #[arg(long)]
        on_streaks: Option<bool>,
        /// Minimum duration in minutes
        #[arg(long)]
        min_duration_minutes: Option<i64>,
        /// Minimum calories
        #[arg(long)]
        min_calories: Option<i64>,
        /// Hours between automatic posts
        #[arg(long)]
        cooldown_hours: Option<f64>,
    },
}

#[derive(Subcommand)]
enum WorkoutCommand {
    /// Record a completed session and run the engine
    Complete(WorkoutArgs),
}

#[derive(Subcommand)]
enum PostCommand {
    /// Create a post from manually entered workout details
    Manual(WorkoutArgs),
}

#[derive(Args)]
struct WorkoutArgs {
    /// User id
    #[arg(long)]
    user: Uuid,
    /// Workout name
    #[arg(long)]
    name: String,
    /// Workout type
    #[arg(long, default_value = "general")]
    workout_type: String,
    /// Duration in minutes
    #[arg(long)]
    duration: i64,
    /// Calories burned
    #[arg(long)]
    calories: i64,
    /// Existing workout id
    #[arg(long)]
    workout_id: Option<Uuid>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = if cli.verbose {
        LoggingConfig::verbose()
    } else {
        LoggingConfig::from_env()
    };
    logging.init()?;

    let database_url = cli
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:./data/autopost.db".into());

    info!("Connecting to database: {}", database_url);
    let store = Arc::new(AutoPostStore::connect(&database_url).await?);
    let engine = AutoPostEngine::from_store(AutoPostConfig::global(), Arc::clone(&store));

    match cli.command {
        Command::Settings { action } => run_settings(&engine, action).await,
        Command::Workout {
            action: WorkoutCommand::Complete(args),
        } => run_workout_complete(&store, &engine, args).await,
        Command::Post {
            action: PostCommand::Manual(args),
        } => {
            let manual = ManualWorkoutPost {
                workout_name: args.name,
                workout_type: args.workout_type,
                duration_minutes: args.duration,
                calories_burned: args.calories,
                workout_id: args.workout_id,
                completed_at: None,
            };
            let outcome = auto_post::create_manual_post(&engine, args.user, manual).await;
            report(&outcome)
        }
    }
}

async fn run_settings(engine: &AutoPostEngine, action: SettingsCommand) -> Result<()> {
    let repo = engine.settings_repository().as_ref();
    let settings = match action {
        SettingsCommand::Show { user } => {
            auto_post::get_settings(repo, engine.resolver(), user).await?
        }
        SettingsCommand::Set {
            user,
            enabled,
            on_workout_completion,
            on_milestones,
            on_streaks,
            min_duration_minutes,
            min_calories,
            cooldown_hours,
        } => {
            let update = PartialAutoPostSettings {
                enabled,
                on_workout_completion,
                on_milestones,
                on_streaks,
                min_duration_minutes,
                min_calories,
                cooldown_hours,
            };
            auto_post::update_settings(repo, engine.resolver(), user, &update).await?
        }
    };
    print_settings(&settings)
}

async fn run_workout_complete(
    store: &AutoPostStore,
    engine: &AutoPostEngine,
    args: WorkoutArgs,
) -> Result<()> {
    let now = Utc::now();
    let workout_id = args.workout_id.unwrap_or_else(Uuid::new_v4);
    store
        .record_completed_workout(args.user, workout_id, now)
        .await?;

    let event = WorkoutCompletionEvent::new(
        args.user,
        workout_id,
        args.name,
        args.workout_type,
        args.duration,
        args.calories,
        now,
    );
    let outcome = engine.handle_workout_completion_at(&event, now).await;
    report(&outcome)
}

fn print_settings(settings: &AutoPostSettings) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}

fn report(outcome: &AutoPostOutcome) -> Result<()> {
    match outcome {
        AutoPostOutcome::Created(post) => {
            println!("Created {} post {}", post.category, post.post_id);
            println!("{}", post.content);
            Ok(())
        }
        AutoPostOutcome::Skipped(reason) => {
            println!("Skipped: {reason}");
            Ok(())
        }
        AutoPostOutcome::Failed(e) => Err(anyhow::anyhow!("Auto-post failed: {e}")),
    }
}
