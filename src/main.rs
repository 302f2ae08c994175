//! Headless simulation driver.
//!
//! Builds a scene (the built-in demo layout or a JSON description), runs the
//! simulation for a fixed number of ticks and reports ball positions, either
//! as log lines or as JSON lines on stdout.
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults if missing), apply CLI overrides
//! 2. Build the scene and initialize the simulation
//! 3. Tick at a fixed cadence; after each tick read the scene like a renderer would
//! 4. Destroy the simulation
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --ticks 120 --json
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use ballsim::config::{DEFAULT_CONFIG_PATH, SimConfig};
use ballsim::error::SimError;
use ballsim::scene::{Scene, SceneDescription};
use ballsim::simulation::{SimSnapshot, Simulation};
use clap::Parser;
use log::{debug, error, info, warn};

/// Ball and wall simulation
#[derive(Parser)]
#[command(version, about = "Runs the ball-and-wall simulation without a window.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// JSON scene description (overrides the config file).
    #[arg(long, value_name = "PATH")]
    scene: Option<PathBuf>,

    /// Number of ticks to run (overrides the config file).
    #[arg(long)]
    ticks: Option<u64>,

    /// Sleep between ticks to match the configured tick interval.
    #[arg(long)]
    realtime: bool,

    /// Print a JSON snapshot line after every reported tick.
    #[arg(long)]
    json: bool,

    /// Write the effective configuration and exit.
    /// Optionally provide a path (default: the --config path).
    #[arg(long, value_name = "PATH")]
    write_config: Option<Option<PathBuf>>,

    /// Write the demo scene as JSON and exit.
    #[arg(long, value_name = "PATH")]
    write_scene: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), SimError> {
    let mut config = SimConfig::with_path(&cli.config);
    match config.load_if_present() {
        Ok(true) => {}
        Ok(false) => debug!(
            "No config at {}, using defaults",
            config.config_path.display()
        ),
        Err(e) => warn!(
            "Ignoring invalid config {}: {e}",
            config.config_path.display()
        ),
    }
    if let Some(scene) = cli.scene {
        config.scene_path = Some(scene);
    }
    if let Some(ticks) = cli.ticks {
        config.ticks = ticks;
    }

    // Early-exit: write config and quit
    if let Some(maybe_path) = cli.write_config {
        if let Some(path) = maybe_path {
            config.config_path = path;
        }
        config.save_to_file()?;
        println!("Config written to {}", config.config_path.display());
        return Ok(());
    }

    // Early-exit: write the demo scene and quit
    if let Some(path) = cli.write_scene {
        let json = SceneDescription::from_scene(&Scene::demo()?).to_json()?;
        std::fs::write(&path, json).map_err(|source| SimError::SceneIo {
            path: path.clone(),
            source,
        })?;
        println!("Scene written to {}", path.display());
        return Ok(());
    }

    let scene = match &config.scene_path {
        Some(path) => {
            info!("Loading scene from {}", path.display());
            SceneDescription::load_from_file(path)?.into_scene()?
        }
        None => Scene::demo()?,
    };
    info!("Scene initialized with {} objects", scene.len());

    let mut sim = Simulation::new(config.delta);
    sim.initialize(scene)?;

    let interval = Duration::from_millis(config.tick_interval_ms);
    let mut next_tick = Instant::now();
    for _ in 0..config.ticks {
        if cli.realtime {
            next_tick += interval;
            let now = Instant::now();
            if next_tick > now {
                std::thread::sleep(next_tick - now);
            }
        }

        sim.tick()?;

        let Some(snapshot) = sim.snapshot() else {
            break;
        };
        if config.report_every > 0 && snapshot.tick % config.report_every == 0 {
            report(&snapshot, cli.json)?;
        }
    }

    if let Some(snapshot) = sim.snapshot() {
        info!(
            "Finished after {} ticks ({:.3}s simulated)",
            snapshot.tick, snapshot.elapsed
        );
    }
    sim.destroy();
    Ok(())
}

fn report(snapshot: &SimSnapshot, json: bool) -> Result<(), SimError> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
        return Ok(());
    }
    info!(
        "tick {} | walls: {} | balls: {}",
        snapshot.tick, snapshot.wall_count, snapshot.ball_count
    );
    for ball in &snapshot.balls {
        match ball.direction {
            Some(dir) => info!(
                "  {} at ({:.3}, {:.3}) heading [{:.3}, {:.3}]",
                ball.name, ball.center.x, ball.center.y, dir.x, dir.y
            ),
            None => info!(
                "  {} at ({:.3}, {:.3}) (not simulated)",
                ball.name, ball.center.x, ball.center.y
            ),
        }
    }
    Ok(())
}
