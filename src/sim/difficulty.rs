//! Score-driven difficulty progression
//!
//! Every scored pipe nudges the shared session parameters: the field speeds
//! up point by point, and past the hard threshold the spawn cadence
//! tightens and reversed pipes enter the rotation.

use rand::Rng;

use super::state::{GameEvent, GameState, Orientation};

/// Apply one scored pipe: bump the score and ramp the session parameters.
///
/// Called exactly once per pipe, at its `scored` false -> true transition.
/// The velocity becomes more negative (faster leftward) and never backs
/// off; the spawn interval only shrinks and is floored by the tuning.
pub fn on_score(state: &mut GameState) {
    state.score += 1;
    state.push_event(GameEvent::Scored);

    if state.score < state.tuning.hard_score {
        state.pipe_velocity -= state.tuning.velocity_step_easy;
    } else {
        state.pipe_velocity -= state.tuning.velocity_step_hard;
        state.spawn_interval = state
            .spawn_interval
            .saturating_sub(state.tuning.spawn_interval_step)
            .max(state.tuning.spawn_interval_min);
    }
}

/// Orientation for the next spawn. Reversed pipes only appear once the
/// score reaches the hard threshold, with the tuned probability; below it
/// the roll is skipped entirely.
pub fn roll_orientation(state: &mut GameState) -> Orientation {
    if state.score >= state.tuning.hard_score
        && state.rng.random_bool(state.tuning.reversed_chance)
    {
        Orientation::Reversed
    } else {
        Orientation::Normal
    }
}
