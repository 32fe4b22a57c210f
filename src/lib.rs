pub mod core;
pub mod logging;
pub mod models;
pub mod platform;

use anyhow::Context;
use clap::Parser;
use crate::core::config::Config;
use crate::core::frame_driver::FrameDriver;
use crate::core::session_manager::WorkoutSession;
use crate::models::exercise::ExerciseKind;
use crate::models::session::{MilestonePolicy, SessionSummary};
use crate::platform::capture::ReplayCapture;
use crate::platform::display::ConsoleOverlay;
use crate::platform::input::spawn_stdin_keys;
use crate::platform::pose::{DefaultMediaPipe, MediaPipeBridge};
use std::path::PathBuf;

/// Count exercise repetitions from a stream of body pose landmarks
#[derive(Debug, Parser)]
#[command(name = "repcount", version, about)]
pub struct Cli {
    /// Pose stream to read, one JSON frame per line (a file or a FIFO)
    pub stream: PathBuf,

    /// Exercise to track: pushup, squat, situp or bicepcurl
    #[arg(short, long)]
    pub exercise: Option<ExerciseKind>,

    /// Milestone prompt policy: fixed or growing
    #[arg(long)]
    pub milestone_policy: Option<MilestonePolicy>,

    /// Settings file, defaults to ~/.repcount/settings.json
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the session summary as JSON after the final count
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Resolve the settings file and apply command line overrides
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Config::load().context("loading settings")?,
        };

        if let Some(exercise) = self.exercise {
            config.exercise = exercise;
        }
        if let Some(policy) = self.milestone_policy {
            config.milestone_policy = policy;
        }
        config.validate()?;

        Ok(config)
    }
}

/// Print the end-of-session report to stdout
pub fn report(summary: &SessionSummary, json: bool) -> anyhow::Result<()> {
    println!("Total reps: {}", summary.reps);
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    }
    Ok(())
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    logging::init_tracing(&config.log_level);
    tracing::info!(exercise = %config.exercise, policy = ?config.milestone_policy, "starting repcount");

    let source = ReplayCapture::open(&cli.stream)
        .await
        .context("opening pose stream")?;
    let pose = DefaultMediaPipe::new(&config.pose_config()).context("initializing pose backend")?;
    let keys = spawn_stdin_keys();

    let summary = FrameDriver::new(
        source,
        pose,
        ConsoleOverlay::new(),
        keys,
        WorkoutSession::from_config(&config),
        config.prompt_timeout(),
    )
    .run()
    .await;

    report(&summary, cli.json)
}
