//! Shape Eater headless driver
//!
//! Runs the simulation without a window: a fixed 60 Hz frame clock, physics
//! substeps from an accumulator, AABB overlap detection, and a simple
//! autopilot standing in for the keyboard.
//!
//! Usage: `shape-eater [--seed N] [--frames N] [--tuning FILE] [--dump]`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use shape_eater::Tuning;
use shape_eater::consts::*;
use shape_eater::sim::{
    GameEvent, GameState, MoveInput, OrthoCamera, RoundPhase, TickInput, Viewport,
    detect_overlaps, fixed_tick, frame,
};

/// Frame time of the simulated display
const FRAME_DT: f32 = 1.0 / 60.0;
/// Distance at which the autopilot starts fleeing bigger enemies
const DANGER_RADIUS: f32 = 2.5;

#[derive(Parser, Debug)]
#[command(name = "shape-eater")]
#[command(about = "Headless Shape Eater simulation driven by an autopilot")]
struct Options {
    /// RNG seed for the run
    #[arg(long, default_value_t = 12345)]
    seed: u64,
    /// Number of 60 Hz frames to simulate
    #[arg(long, default_value_t = 60 * 60)]
    frames: u64,
    /// JSON tuning file (defaults are used when omitted)
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Print the final state as JSON
    #[arg(long)]
    dump: bool,
}

/// Head for the closest edible enemy, unless something bigger is close
fn autopilot(state: &GameState) -> MoveInput {
    let player = &state.player;

    let threat = state
        .enemies
        .iter()
        .filter(|e| e.size > player.size)
        .map(|e| (e.pos - player.pos, e.pos.distance(player.pos)))
        .filter(|(_, dist)| *dist < DANGER_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1));

    let desired = if let Some((offset, _)) = threat {
        -offset
    } else {
        state
            .enemies
            .iter()
            .filter(|e| e.size <= player.size)
            .map(|e| e.pos - player.pos)
            .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()))
            .unwrap_or(-player.pos)
    };

    let threshold = 0.1;
    MoveInput {
        up: desired.y > threshold,
        down: desired.y < -threshold,
        left: desired.x < -threshold,
        right: desired.x > threshold,
    }
}

#[derive(Debug, Default)]
struct RunStats {
    wins: u32,
    losses: u32,
    eaten: u32,
    spawned: u32,
    best_score: u32,
}

impl RunStats {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::ScoreChanged(score) if score > 0 => {
                    self.eaten += 1;
                    self.best_score = self.best_score.max(score);
                }
                GameEvent::Win => self.wins += 1,
                GameEvent::EnemySpawned { .. } => self.spawned += 1,
                _ => {}
            }
        }
    }
}

fn run(options: &Options, tuning: Tuning) -> GameState {
    let camera = OrthoCamera::default();
    let mut state = GameState::new(options.seed, tuning, camera.world_rect());
    let mut stats = RunStats::default();
    let mut accumulator = 0.0f32;
    let mut last_phase = state.phase();

    for _ in 0..options.frames {
        accumulator += FRAME_DT;

        let mut substeps = 0;
        while accumulator >= PHYSICS_DT && substeps < MAX_SUBSTEPS {
            let input = TickInput {
                movement: autopilot(&state),
                restart: state.phase() != RoundPhase::Playing,
            };
            fixed_tick(&mut state, &input, PHYSICS_DT);

            for id in detect_overlaps(&state.player, &state.enemies, state.tuning.collider_size) {
                state.push_overlap(id);
            }

            accumulator -= PHYSICS_DT;
            substeps += 1;
        }

        frame(&mut state, &camera, FRAME_DT);
        stats.record(&state.drain_events());

        let phase = state.phase();
        if phase != last_phase {
            if phase == RoundPhase::GameOver {
                stats.losses += 1;
            }
            log::info!("Frame {}: {:?} -> {:?}", state.frames, last_phase, phase);
            last_phase = phase;
        }
    }

    log::info!(
        "{} frames: {} wins, {} losses, {} eaten, {} spawned, best score {}",
        state.frames,
        stats.wins,
        stats.losses,
        stats.eaten,
        stats.spawned,
        stats.best_score
    );
    println!(
        "wins={} losses={} eaten={} best={} player_size={:.2} player_pos={}",
        stats.wins,
        stats.losses,
        stats.eaten,
        stats.best_score,
        state.player.size,
        state.player.pos
    );

    state
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Options::parse();

    let tuning = match &options.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    log::info!("Shape Eater starting with seed {}", options.seed);
    let state = run(&options, tuning);

    if options.dump {
        match serde_json::to_string_pretty(&state) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                log::error!("Failed to serialize state: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
