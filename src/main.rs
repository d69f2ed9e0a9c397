//! Headless session driver
//!
//! Plays scripted sessions against the simulation core and prints the
//! resulting leaderboard - an end-to-end exercise of the library without a
//! renderer, and a quick balance check for tuning changes.
//!
//! Usage:
//!   flappy-penguin [--seed N] [--sessions N] [--name NAME] [--scores PATH]

use std::path::PathBuf;

use flappy_penguin::highscores::{Leaderboard, TOP_SCORES_SHOWN};
use flappy_penguin::sim::{Action, GamePhase, GameState, apply_action, tick};
use flappy_penguin::tuning::{TICK_HZ, Tuning};

/// Bail-out for a bot that learned to fly forever.
const MAX_TICKS_PER_SESSION: u64 = 200_000;

struct DriverConfig {
    seed: u64,
    sessions: u32,
    name: String,
    scores_path: PathBuf,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            sessions: 3,
            name: "Autopilot".to_string(),
            scores_path: Leaderboard::default_path(),
        }
    }
}

fn parse_args(args: &[String]) -> DriverConfig {
    let mut config = DriverConfig::default();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                if let Some(v) = iter.next().and_then(|s| s.parse().ok()) {
                    config.seed = v;
                }
            }
            "--sessions" => {
                if let Some(v) = iter.next().and_then(|s| s.parse().ok()) {
                    config.sessions = v;
                }
            }
            "--name" => {
                if let Some(v) = iter.next() {
                    config.name = v.clone();
                }
            }
            "--scores" => {
                if let Some(v) = iter.next() {
                    config.scores_path = PathBuf::from(v);
                }
            }
            other => {
                eprintln!("ignoring unknown argument: {other}");
            }
        }
    }
    config
}

/// Flap whenever the bird sinks below its aim point: the lower third of the
/// next gap (aiming low keeps the flap rise inside the gap).
fn autopilot(state: &mut GameState) {
    if state.phase != GamePhase::Playing || !state.started {
        return;
    }

    let bird_bottom = state.bird.pos.y + state.bird.size.y;
    let target = state
        .pipes
        .iter()
        .find(|p| p.x + p.width >= state.bird.pos.x)
        .map(|p| p.gap_center_y() + p.gap / 4.0)
        .unwrap_or(state.tuning.ground_y() / 2.0);

    if bird_bottom > target && state.bird.vel > 0.0 {
        apply_action(state, Action::Flap);
    }
}

fn run_session(seed: u64, name: &str, scores: &mut Leaderboard) -> GameState {
    let mut state = GameState::new(seed, Tuning::default()).expect("default tuning is valid");

    for c in name.chars() {
        apply_action(&mut state, Action::TextChar(c));
    }
    apply_action(&mut state, Action::Confirm); // -> Menu
    apply_action(&mut state, Action::Confirm); // -> Playing
    apply_action(&mut state, Action::Flap); // arm the round

    while state.phase != GamePhase::SessionOver {
        autopilot(&mut state);
        tick(&mut state, scores);
        state.take_events();

        if state.phase == GamePhase::RoundOver {
            apply_action(&mut state, Action::Confirm);
            apply_action(&mut state, Action::Flap);
        }
        if state.time_ticks >= MAX_TICKS_PER_SESSION {
            log::warn!("session hit the tick cap at score {}, stopping", state.score);
            break;
        }
    }
    state
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let config = parse_args(&args);

    let mut scores = Leaderboard::load(&config.scores_path);

    println!(
        "driving {} session(s) as '{}' from seed {}",
        config.sessions, config.name, config.seed
    );

    for run in 0..config.sessions {
        let state = run_session(config.seed + run as u64, &config.name, &mut scores);
        println!(
            "  session {}: score {} over {} ticks (~{}s at {} Hz)",
            run + 1,
            state.score,
            state.time_ticks,
            state.time_ticks / TICK_HZ as u64,
            TICK_HZ
        );
    }

    println!("top {} scores:", TOP_SCORES_SHOWN);
    for (rank, (name, score)) in scores.top_n(TOP_SCORES_SHOWN).iter().enumerate() {
        println!("  {}. {} - {}", rank + 1, name, score);
    }
}
