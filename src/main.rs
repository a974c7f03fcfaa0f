//! Expense Runner headless entry point
//!
//! Plays runs with a simple autopilot and logs the results. Useful for
//! checking spawn balance after editing a tuning file:
//!
//! ```text
//! RUST_LOG=info expense-runner [tuning.json] --seed 42
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;
use expense_runner::sim::{EnemyKind, GamePhase, GameState};
use expense_runner::{Session, Tuning};

/// Headless Expense Runner - autopilot runs for spawn balancing
#[derive(Parser, Debug)]
#[command(name = "expense-runner")]
#[command(about = "Play autopilot runs and print the leaderboard as JSON")]
struct Args {
    /// Tuning file (JSON); defaults are used when omitted
    tuning: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long, default_value_t = 0x5EED)]
    seed: u64,

    /// Number of runs to play
    #[arg(long, default_value_t = 3)]
    runs: u32,
}

/// Frames per run before the demo gives up (10 minutes at 60 Hz)
const MAX_FRAMES: u32 = 36_000;

/// Jump at whatever is about to hit us, shoot what flies
fn autopilot(session: &mut Session) {
    let state: &GameState = session.state();
    let player = &state.player.body;
    let lookahead = state.speed * 8.0;

    let pit_ahead = state
        .pits
        .iter()
        .any(|p| p.body.left() > player.left() && p.body.left() - player.right() < lookahead);

    let ground_enemy_ahead = state.enemies.iter().any(|e| {
        e.kind == EnemyKind::Ground
            && e.body.left() > player.right()
            && e.body.left() - player.right() < lookahead + 20.0
    });

    let flyer_in_range = state.enemies.iter().any(|e| {
        e.kind == EnemyKind::Flying && e.body.left() > player.right() && e.body.left() < 500.0
    });

    let grounded = state.player.is_grounded();
    let trigger_ready = state.time_ticks % 20 == 0;

    if grounded && (pit_ahead || ground_enemy_ahead) {
        session.jump();
    }
    if flyer_in_range && trigger_ready {
        session.fire();
    }
}

fn load_tuning(path: Option<&Path>) -> Tuning {
    let Some(path) = path else {
        return Tuning::default();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Bad tuning file {}: {} - using defaults", path.display(), e);
                Tuning::default()
            }
        },
        Err(e) => {
            log::warn!("Cannot read {}: {} - using defaults", path.display(), e);
            Tuning::default()
        }
    }
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let tuning = load_tuning(args.tuning.as_deref());
    let seed = args.seed;

    log::info!("Expense Runner (headless) starting, seed {}", seed);
    let mut session = Session::with_tuning(seed, tuning);

    for _ in 0..args.runs {
        session.start();
        let mut frames = 0;
        while frames < MAX_FRAMES {
            autopilot(&mut session);
            if session.frame().is_none() {
                break;
            }
            frames += 1;
        }
        let hud = session.hud();
        if session.phase() == GamePhase::Playing {
            log::info!("Run survived {} frames", frames);
        }
        println!(
            "run: score {} distance {} lives {} after {} frames",
            hud.score, hud.distance, hud.lives, frames
        );
    }

    match serde_json::to_string_pretty(session.high_scores()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::warn!("Could not serialize high scores: {}", e),
    }
}
