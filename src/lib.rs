//! Flappy Penguin - deterministic core of a side-scrolling gap-runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, session state machine)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Persistent name -> best-score leaderboard
//! - `persistence`: JSON save/load helpers
//!
//! Rendering, raw input translation and frame pacing are the host's job:
//! the host drains input into [`sim::Action`] values, calls [`sim::tick`] at
//! a fixed rate, and draws from the read-only state snapshot.

pub mod highscores;
pub mod persistence;
pub mod sim;
pub mod tuning;

pub use highscores::Leaderboard;
pub use tuning::{Tuning, TuningError};
