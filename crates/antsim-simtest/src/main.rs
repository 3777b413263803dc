//! Antsim Headless Simulation Harness
//!
//! Stands in for the rendering/input layer: drives the colony at a fixed
//! frame rate and checks its invariants every frame. No window, no assets.
//!
//! Usage:
//!   cargo run -p antsim-simtest
//!   cargo run -p antsim-simtest -- --verbose --frames 36000 --seed 7
//!   cargo run -p antsim-simtest -- --config colony.json --json

use std::path::PathBuf;

use antsim_core::prelude::*;
use clap::Parser;
use thiserror::Error;

const FRAME_DELTA: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u64 = 60 * 60 * 5;

// ── Command line ───────────────────────────────────────────────────────

#[derive(Debug, Error)]
enum HarnessError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Parser, Debug)]
#[command(
    name = "antsim-simtest",
    about = "Run the colony headless and check its invariants"
)]
struct Cli {
    /// Print every passing check, not only failures.
    #[arg(long)]
    verbose: bool,
    /// Dump the final frame snapshot as JSON.
    #[arg(long)]
    json: bool,
    /// Frames to simulate at 60 fps.
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: u64,
    /// Override the config's RNG seed.
    #[arg(long)]
    seed: Option<u64>,
    /// JSON config file; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> Result<SimConfig, HarnessError> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| HarnessError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&text).map_err(|source| HarnessError::Json {
                path: path.clone(),
                source,
            })?
        }
        None => SimConfig::default(),
    };

    if cli.seed.is_some() {
        config.rng_seed = cli.seed;
    }
    if let Some(err) = validate_config(&config).into_iter().next() {
        return Err(err.into());
    }
    Ok(config)
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let cli = Cli::parse();
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(2);
        }
    };

    println!("=== Antsim Colony Harness ===\n");

    let mut results = Vec::new();

    // 1. Frame loop invariants
    let final_frame = run_frame_loop(&config, cli.frames, cli.verbose, &mut results);

    // 2. Foraging scenarios
    results.extend(validate_pickup_scenario(&config));
    results.extend(validate_drop_scenario(&config));

    // 3. Timers
    results.extend(validate_food_timer(&config));

    // 4. Exit handling
    results.extend(validate_exit(&config));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || cli.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if cli.json {
        match serde_json::to_string_pretty(&final_frame) {
            Ok(json) => println!("{}", json),
            Err(err) => eprintln!("error: failed to encode snapshot: {}", err),
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

/// Config for the scripted scenarios: nothing moves or spawns on its own
fn scripted(config: &SimConfig) -> SimConfig {
    SimConfig {
        initial_workers: 0,
        direction_change_chance: 0.0,
        worker_spawn_interval: 1.0e6,
        food_spawn_interval: 1.0e6,
        ..config.clone()
    }
}

// ── 1. Frame loop ───────────────────────────────────────────────────────

fn run_frame_loop(
    config: &SimConfig,
    frames: u64,
    verbose: bool,
    results: &mut Vec<TestResult>,
) -> FrameSnapshot {
    println!("--- Frame Loop ({} frames) ---", frames);

    let mut engine = match SimulationEngine::with_config(config.clone()) {
        Ok(engine) => engine,
        Err(err) => {
            results.push(TestResult {
                name: "engine_create".into(),
                passed: false,
                detail: err.to_string(),
            });
            return FrameSnapshot::default();
        }
    };

    let bounds = config.bounds();
    let cap = config.max_population + 1;
    let mut out_of_bounds = 0usize;
    let mut over_cap = 0usize;
    let mut unclaimed = 0usize;
    let mut queen_drift = 0.0f64;
    let mut previous = engine.snapshot();

    for frame in 0..frames {
        engine.step(FrameInput::tick(FRAME_DELTA));
        let current = engine.snapshot();

        if current.agent_count > cap {
            over_cap += 1;
        }

        for agent in &current.agents {
            if agent.is_queen {
                let t = current.elapsed_seconds;
                let angle = t * config.queen_angular_speed as f64;
                let radius = config.queen_orbit_radius as f64;
                let ex = (config.screen_width / 2) as f64 + radius * angle.cos();
                let ey = (config.screen_height / 2) as f64 + radius * angle.sin();
                let drift = (agent.position.x as f64 - ex).hypot(agent.position.y as f64 - ey);
                queen_drift = queen_drift.max(drift);
            } else if !bounds.contains(&agent.position, config.worker_size) {
                out_of_bounds += 1;
            }
        }

        // Compaction shifts indices; only compare frames where the list kept its layout
        let stable = current.foods.len() >= previous.foods.len()
            && previous
                .foods
                .iter()
                .zip(&current.foods)
                .all(|(before, after)| before.position == after.position);
        if stable {
            unclaimed += previous
                .foods
                .iter()
                .zip(&current.foods)
                .filter(|(before, after)| before.picked_up && !after.picked_up)
                .count();
        }

        if verbose && frame > 0 && frame % (60 * 60) == 0 {
            println!(
                "  t={:>6.0}s ants={:>4} food={:>4} (available {:>4}) pickups={} deliveries={}",
                current.elapsed_seconds,
                current.agent_count,
                engine.food_count(),
                engine.available_food_count(),
                engine.total_pickups(),
                engine.total_deliveries()
            );
        }

        previous = current;
    }

    results.push(TestResult {
        name: "workers_on_screen".into(),
        passed: out_of_bounds == 0,
        detail: format!("{} out-of-bounds worker positions", out_of_bounds),
    });
    results.push(TestResult {
        name: "population_cap".into(),
        passed: over_cap == 0,
        detail: format!(
            "{} ants at end, cap {} (+ queen), {} frames over",
            engine.agent_count(),
            config.max_population,
            over_cap
        ),
    });
    results.push(TestResult {
        name: "food_claimed_once".into(),
        passed: unclaimed == 0,
        detail: format!(
            "{} pickups, {} reverted claims",
            engine.total_pickups(),
            unclaimed
        ),
    });
    results.push(TestResult {
        name: "queen_orbit".into(),
        passed: queen_drift < 1e-2,
        detail: format!("max drift from orbit {:.2e}", queen_drift),
    });
    results.push(TestResult {
        name: "deliveries_follow_pickups".into(),
        passed: engine.total_deliveries() <= engine.total_pickups(),
        detail: format!(
            "{} deliveries for {} pickups",
            engine.total_deliveries(),
            engine.total_pickups()
        ),
    });

    log::info!(
        "Frame loop done: {:.0}s simulated, {} ants, {} food in registry",
        engine.sim_time(),
        engine.agent_count(),
        engine.food_count()
    );

    previous
}

// ── 2. Foraging scenarios ───────────────────────────────────────────────

fn validate_pickup_scenario(config: &SimConfig) -> Vec<TestResult> {
    println!("--- Pickup Scenario ---");
    let mut engine = match SimulationEngine::empty(SimConfig {
        worker_speed: 2.0,
        ..scripted(config)
    }) {
        Ok(engine) => engine,
        Err(err) => return vec![failure("pickup_setup", err)],
    };

    let worker = engine.spawn_worker_at(Vec2::new(0.0, 0.0));
    engine.spawn_food_at(Vec2::new(10.0, 0.0));

    let mut ticks = 0;
    while engine.total_pickups() == 0 && ticks < 120 {
        engine.update(FRAME_DELTA);
        ticks += 1;
    }

    let forager = engine.world.get::<&Forager>(worker).map(|f| *f).ok();
    let claimed = engine.foods.get(0).map(|f| f.is_picked_up()).unwrap_or(false);
    let passed = claimed
        && forager
            .map(|f| f.carrying_food && f.home == Vec2::new(10.0, 0.0))
            .unwrap_or(false);

    vec![TestResult {
        name: "pickup_within_range".into(),
        passed,
        detail: format!("picked up after {} ticks", ticks),
    }]
}

fn validate_drop_scenario(config: &SimConfig) -> Vec<TestResult> {
    println!("--- Drop Scenario ---");
    let mut engine = match SimulationEngine::empty(scripted(config)) {
        Ok(engine) => engine,
        Err(err) => return vec![failure("drop_setup", err)],
    };

    let worker = engine.spawn_worker_at(Vec2::new(1.0, 1.0));
    if let Ok(mut forager) = engine.world.get::<&mut Forager>(worker) {
        forager.pick_up(Vec2::ZERO);
    }
    engine.update(FRAME_DELTA);

    let forager = engine.world.get::<&Forager>(worker).map(|f| *f).ok();
    let passed = forager
        .map(|f| !f.carrying_food && f.home == Vec2::new(1.0, 1.0))
        .unwrap_or(false);

    vec![TestResult {
        name: "drop_near_home".into(),
        passed,
        detail: format!("forager after first tick: {:?}", forager),
    }]
}

// ── 3. Timers ───────────────────────────────────────────────────────────

fn validate_food_timer(config: &SimConfig) -> Vec<TestResult> {
    println!("--- Food Timer ---");
    let interval = config.food_spawn_interval;
    let mut engine = match SimulationEngine::empty(SimConfig {
        food_spawn_interval: interval,
        ..scripted(config)
    }) {
        Ok(engine) => engine,
        Err(err) => return vec![failure("food_timer_setup", err)],
    };

    let frames = (interval / FRAME_DELTA).ceil() as u64;
    for _ in 0..frames {
        engine.update(FRAME_DELTA);
    }

    vec![TestResult {
        name: "food_timer_single_spawn".into(),
        passed: engine.food_count() == 1,
        detail: format!(
            "{} food after {} frames ({}s interval)",
            engine.food_count(),
            frames,
            interval
        ),
    }]
}

// ── 4. Exit ─────────────────────────────────────────────────────────────

fn validate_exit(config: &SimConfig) -> Vec<TestResult> {
    println!("--- Exit ---");
    let mut engine = match SimulationEngine::with_config(config.clone()) {
        Ok(engine) => engine,
        Err(err) => return vec![failure("exit_setup", err)],
    };

    let first = engine.step(FrameInput::tick(FRAME_DELTA));
    let exit = engine.step(FrameInput::exit());
    let after = engine.step(FrameInput::tick(FRAME_DELTA));

    vec![TestResult {
        name: "exit_request".into(),
        passed: first == FrameStatus::Continue
            && exit == FrameStatus::Exit
            && after == FrameStatus::Exit
            && engine.ticks() == 1,
        detail: format!("{:?} -> {:?} -> {:?}", first, exit, after),
    }]
}

fn failure(name: &str, err: impl std::fmt::Display) -> TestResult {
    TestResult {
        name: name.into(),
        passed: false,
        detail: err.to_string(),
    }
}
