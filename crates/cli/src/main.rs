#![deny(unsafe_code)]
//! CLI binary for the ocquarium octopus rig.
//!
//! Subcommands:
//! - `render`: replay a drift session headlessly and write the last frame as PNG
//! - `config`: print the resolved rendering flags and their schema

mod error;
mod logger;
mod session;

use clap::{Parser, Subcommand};
use error::CliError;
use ocquarium_core::{OctopusConfig, Scene, Srgb};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "ocquarium", about = "Spring-rigged octopus renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log rig events to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate a drift session and write the final frame as PNG.
    Render {
        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 512)]
        width: usize,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 512)]
        height: usize,

        /// Nominal creature size in pixels.
        #[arg(short, long, default_value_t = 200.0)]
        size: f64,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Simulated drift time in milliseconds.
        #[arg(short, long, default_value_t = 0)]
        duration: u64,

        /// Frame interval in milliseconds.
        #[arg(long, default_value_t = 16)]
        frame_ms: u64,

        /// Background color as `#rrggbb`.
        #[arg(short, long, default_value = "#ffffff")]
        background: String,

        /// Rendering flags as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Scene JSON file; replaces the geometry, timing and flag options.
        #[arg(long)]
        scene: Option<PathBuf>,

        /// Output file path.
        #[arg(short, long, default_value = "octopus.png")]
        output: PathBuf,
    },
    /// Print the resolved rendering flags and their schema.
    Config {
        /// Rendering flags as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
}

fn parse_params(params: &str) -> Result<OctopusConfig, CliError> {
    let value: serde_json::Value = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    Ok(OctopusConfig::from_json(&value))
}

fn load_scene(path: &Path) -> Result<Scene, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::File(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid scene {}: {e}", path.display())))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Config { params } => {
            let config = parse_params(&params)?;
            if cli.json {
                let info = serde_json::json!({
                    "params": config.params(),
                    "schema": OctopusConfig::schema(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&config.params())?);
            }
        }
        Command::Render {
            width,
            height,
            size,
            seed,
            duration,
            frame_ms,
            background,
            params,
            scene,
            output,
        } => {
            let background = Srgb::from_hex(&background)?;
            let scene = match scene {
                Some(path) => load_scene(&path)?,
                None => Scene {
                    duration_ms: duration,
                    frame_ms,
                    config: parse_params(&params)?,
                    ..Scene::new(width, height, size, seed)
                },
            };

            let (pixmap, summary) = session::render(&scene, background)?;
            ocquarium_raster::snapshot::write_png(&pixmap, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "scene": scene,
                    "summary": summary.to_json(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {}x{} (size {}, {} frames, {} jumps, seed {}) -> {}",
                    scene.width,
                    scene.height,
                    scene.size,
                    summary.frames,
                    summary.jumps,
                    scene.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            eprintln!("{}", serde_json::to_string_pretty(&e.to_json()).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
