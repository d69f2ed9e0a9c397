//! Fixed timestep session update and action handling
//!
//! `apply_action` consumes abstract input events from the host and drives
//! the phase machine; `tick` advances one fixed timestep of gameplay. They
//! are the only entry points that mutate a session, and neither blocks -
//! the single write to disk happens once per session, inside the
//! `SessionOver` transition.

use super::collision;
use super::difficulty;
use super::state::{GameEvent, GamePhase, GameState, Pipe};
use crate::highscores::Leaderboard;

/// Abstract input events, already translated from raw device input by the
/// host. Unsupported action/phase combinations are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Flap upward; the first one of a round arms physics instead.
    Flap,
    /// Confirm / start / continue, depending on phase.
    Confirm,
    /// Back out to the menu (from the menu itself: request quit).
    Cancel,
    /// Start a fresh session after all lives are spent.
    Restart,
    /// Re-enter name entry from the menu.
    Rename,
    /// Name-entry character.
    TextChar(char),
    /// Name-entry backspace.
    Backspace,
    /// Ask the host to shut down.
    Quit,
}

/// Apply one action to the session.
pub fn apply_action(state: &mut GameState, action: Action) {
    if action == Action::Quit {
        state.quit = true;
        return;
    }

    match state.phase {
        GamePhase::NameEntry => match action {
            Action::TextChar(c) => {
                if c.is_alphanumeric()
                    && state.name_input.chars().count() < state.tuning.name_limit
                {
                    state.name_input.push(c);
                }
            }
            Action::Backspace => {
                state.name_input.pop();
            }
            Action::Confirm => {
                let name = state.name_input.trim();
                if !name.is_empty() {
                    state.player_name = name.to_string();
                    state.name_input.clear();
                    state.phase = GamePhase::Menu;
                    log::info!("player '{}' entering menu", state.player_name);
                }
            }
            _ => {}
        },

        GamePhase::Menu => match action {
            Action::Confirm => {
                if state.ended {
                    // Coming back from a finished session: full reset so a
                    // fresh session always starts with all its lives.
                    state.reset_session();
                } else {
                    state.reset_progress();
                    state.reset_field();
                }
                state.phase = GamePhase::Playing;
            }
            Action::Rename => {
                state.name_input.clear();
                state.phase = GamePhase::NameEntry;
            }
            Action::Cancel => state.quit = true,
            _ => {}
        },

        GamePhase::Playing => {
            if action == Action::Flap {
                if state.started {
                    state.bird.flap(state.tuning.flap_impulse);
                } else {
                    state.started = true;
                }
            }
        }

        GamePhase::RoundOver => match action {
            Action::Confirm => {
                // Spend the next life: fresh bird and field, progress kept.
                if state.lives > 0 {
                    state.reset_field();
                    state.phase = GamePhase::Playing;
                }
            }
            Action::Cancel => state.phase = GamePhase::Menu,
            _ => {}
        },

        GamePhase::SessionOver => match action {
            Action::Restart => {
                state.reset_session();
                state.phase = GamePhase::Menu;
            }
            Action::Cancel => state.phase = GamePhase::Menu,
            _ => {}
        },
    }
}

/// Advance the session by one fixed tick.
///
/// Only an armed `Playing` phase simulates; every other phase is inert
/// between inputs, so the host can keep calling this at full rate.
pub fn tick(state: &mut GameState, scores: &mut Leaderboard) {
    if state.phase != GamePhase::Playing || !state.started {
        return;
    }

    state.time_ticks += 1;

    // Bird physics, then the floor/ceiling verdict.
    state.bird.integrate(state.tuning.gravity, state.tuning.ground_y());

    if state.bird.alive {
        // Spawn cadence.
        state.spawn_timer += 1;
        if state.spawn_timer >= state.spawn_interval {
            spawn_pipe(state);
            state.spawn_timer = 0;
        }

        // Advance the field; any overlap kills the bird.
        for pipe in &mut state.pipes {
            pipe.advance();
            if collision::collides(&state.bird, pipe, &state.tuning) {
                state.bird.kill();
            }
        }

        // Score pipes whose trailing edge has fully passed the bird. The
        // scored flag makes each pipe worth exactly one point.
        let bird_x = state.bird.pos.x;
        let mut newly_scored = 0;
        for pipe in &mut state.pipes {
            if !pipe.scored && pipe.x + pipe.width < bird_x {
                pipe.scored = true;
                newly_scored += 1;
            }
        }
        for _ in 0..newly_scored {
            difficulty::on_score(state);
        }

        // Drop pipes that have left the playfield.
        state.pipes.retain(|p| !p.is_offscreen());
    }

    if !state.bird.alive {
        lose_life(state, scores);
    }
}

fn spawn_pipe(state: &mut GameState) {
    let orientation = difficulty::roll_orientation(state);
    let pipe = Pipe::new(
        state.tuning.playfield_width,
        state.pipe_velocity,
        orientation,
        &state.tuning,
        &mut state.rng,
    );
    state.pipes.push(pipe);
}

/// One life gone; decrement exactly once and route to the right phase.
fn lose_life(state: &mut GameState, scores: &mut Leaderboard) {
    state.lives = state.lives.saturating_sub(1);
    state.push_event(GameEvent::LifeLost {
        remaining: state.lives,
    });

    if state.lives == 0 {
        finalize_session(state, scores);
    } else {
        state.phase = GamePhase::RoundOver;
        state.push_event(GameEvent::RoundOver);
        log::info!(
            "round over at score {}, {} lives left",
            state.score,
            state.lives
        );
    }
}

/// One-shot session finalization. The `ended` latch guarantees the
/// leaderboard is written once per session no matter how often the
/// game-over view is redrawn or ticked.
fn finalize_session(state: &mut GameState, scores: &mut Leaderboard) {
    if state.ended {
        return;
    }
    state.ended = true;
    state.phase = GamePhase::SessionOver;

    let improved = scores.record_attempt(&state.player_name, state.score);
    state.best_improved = Some(improved);
    state.push_event(GameEvent::SessionOver);
    if improved {
        state.push_event(GameEvent::NewHighScore);
    }
    log::info!(
        "session over: {} scored {} (new best: {})",
        state.player_name,
        state.score,
        improved
    );
}
