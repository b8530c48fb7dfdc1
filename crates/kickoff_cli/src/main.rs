//! kickoff CLI
//!
//! Headless host for the simulation core:
//! - `simulate`: full match with seeded synthetic input + determinism digest
//! - `shot`: evaluate one shot, print JSON
//! - `config`: print a preset as YAML or the config JSON Schema

mod sim;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use kickoff_core::{
    BallPhysicsEngine, ContactSurface, ShotInput, SimConfig, SimulationQuality, VERSION,
};
use nalgebra::Vector3;
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::sim::{run_match, SimOptions};

#[derive(Parser, Debug)]
#[command(name = "kickoff")]
#[command(author, version, about = "Headless host for the kickoff simulation core", long_about = None)]
struct Cli {
    /// Logging verbosity level
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a full match at a fixed tick with seeded synthetic input
    Simulate {
        /// RNG seed for player input
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Config file (.yaml / .yml / .json); overrides --preset
        #[arg(long)]
        config: Option<PathBuf>,

        /// Config preset: arcade, realistic, low_end
        #[arg(long, default_value = "arcade")]
        preset: String,

        /// Host frame length in milliseconds
        #[arg(long, default_value_t = 1000.0 / 60.0)]
        frame_ms: f32,

        /// Play extra time if level at full time
        #[arg(long)]
        extra_time: bool,

        /// Go to penalties if still level
        #[arg(long)]
        penalties: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a single shot and print the result as JSON
    Shot {
        /// Charged power (0..1)
        #[arg(long, default_value_t = 1.0)]
        power: f32,

        /// Distance to goal
        #[arg(long, default_value_t = 16.0)]
        distance: f32,

        /// Lateral aim offset from the goal line (x)
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        aim_x: f32,

        #[arg(long, default_value_t = 70.0)]
        shot_stat: f32,

        #[arg(long, default_value_t = 70.0)]
        accuracy_stat: f32,

        #[arg(long, default_value_t = 50.0)]
        spin_stat: f32,

        /// Stamina (0..1)
        #[arg(long, default_value_t = 1.0)]
        stamina: f32,

        /// Base balance (0..1)
        #[arg(long, default_value_t = 1.0)]
        balance: f32,

        /// Swipe angle in radians
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        swipe_angle: f32,

        /// Foot contact offset (-1..1)
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        foot_offset: f32,

        #[arg(long)]
        sprinting: bool,

        #[arg(long)]
        pressure: bool,

        #[arg(long, value_enum, default_value_t = SurfaceArg::Laces)]
        surface: SurfaceArg,

        #[arg(long, value_enum, default_value_t = QualityArg::High)]
        quality: QualityArg,
    },

    /// Print a config preset as YAML, or the config JSON Schema
    Config {
        /// Preset to print: arcade, realistic, low_end
        #[arg(long, default_value = "arcade")]
        preset: String,

        /// Validate and print this file instead of a preset
        #[arg(long)]
        file: Option<PathBuf>,

        /// Print the JSON Schema of the config instead
        #[arg(long)]
        schema: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SurfaceArg {
    Inside,
    Outside,
    Laces,
    Header,
}

impl From<SurfaceArg> for ContactSurface {
    fn from(arg: SurfaceArg) -> Self {
        match arg {
            SurfaceArg::Inside => ContactSurface::InsideFoot,
            SurfaceArg::Outside => ContactSurface::OutsideFoot,
            SurfaceArg::Laces => ContactSurface::Laces,
            SurfaceArg::Header => ContactSurface::Header,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum QualityArg {
    High,
    Low,
}

impl From<QualityArg> for SimulationQuality {
    fn from(arg: QualityArg) -> Self {
        match arg {
            QualityArg::High => SimulationQuality::High,
            QualityArg::Low => SimulationQuality::Low,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries command output; logs go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("kickoff v{}", VERSION);

    match cli.command {
        Commands::Simulate { seed, config, preset, frame_ms, extra_time, penalties, json } => {
            let config = load_config(config.as_deref(), &preset)?;
            let options = SimOptions { seed, frame_dt: frame_ms / 1000.0, extra_time, penalties };
            let summary = run_match(&config, &options)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Match finished (seed {})", summary.seed);
                println!("   Score:    {} - {}", summary.score[0], summary.score[1]);
                println!("   Phases:   {}", summary.phases.join(" → "));
                println!("   Minute:   {:.1}", summary.final_minute);
                println!("   Stoppage: {:.0}s", summary.final_state.stoppage);
                println!(
                    "   Events:   {} shots, {} passes, {} fouls, {} injuries",
                    summary.shots, summary.passes, summary.fouls, summary.injuries
                );
                println!("   Ticks:    {}", summary.ticks);
                println!("   Digest:   {}", summary.digest);
            }
        }

        Commands::Shot {
            power,
            distance,
            aim_x,
            shot_stat,
            accuracy_stat,
            spin_stat,
            stamina,
            balance,
            swipe_angle,
            foot_offset,
            sprinting,
            pressure,
            surface,
            quality,
        } => {
            let goal_direction = Vector3::new(0.0, 0.0, distance.max(0.0));
            let input = ShotInput {
                power,
                direction: goal_direction + Vector3::new(aim_x, 0.0, 0.0),
                goal_direction,
                distance_from_goal: distance,
                shot_stat,
                accuracy_stat,
                spin_stat,
                stamina,
                base_balance: balance,
                is_sprinting: sprinting,
                under_pressure: pressure,
                turn_sharpness: 0.0,
                swipe_angle,
                foot_offset,
                contact_surface: surface.into(),
            };
            let result = BallPhysicsEngine::new(quality.into()).compute_shot(&input);

            #[derive(Serialize)]
            struct ShotReport<'a> {
                input: &'a ShotInput,
                result: kickoff_core::ShotResult,
            }
            println!("{}", serde_json::to_string_pretty(&ShotReport { input: &input, result })?);
        }

        Commands::Config { preset, file, schema } => {
            if schema {
                println!("{}", serde_json::to_string_pretty(&SimConfig::json_schema())?);
            } else {
                let config = load_config(file.as_deref(), &preset)?;
                print!("{}", config.to_yaml_string()?);
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>, preset: &str) -> Result<SimConfig> {
    let config = match path {
        Some(path) => SimConfig::from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SimConfig::preset(preset).ok_or_else(|| anyhow!("unknown preset: {preset}"))?,
    };
    config.validate()?;
    Ok(config)
}
