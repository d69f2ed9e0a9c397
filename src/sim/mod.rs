//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! The host owns pacing: it calls [`tick`] at a fixed rate (60 Hz at the
//! reference tuning) and feeds [`Action`] values in between. Everything the
//! renderer needs is a read-only view of [`GameState`].

pub mod collision;
pub mod difficulty;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{collides, hitbox};
pub use rect::Rect;
pub use state::{Bird, GameEvent, GamePhase, GameState, Orientation, Pipe};
pub use tick::{Action, apply_action, tick};
