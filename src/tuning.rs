//! Data-driven game balance
//!
//! Every gameplay constant lives here as plain data so tests and balance
//! experiments can run sessions against alternate parameter sets. Values are
//! in playfield units (pixels at the reference resolution) per tick.

use std::ops::RangeInclusive;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tick rate the balance values are tuned against. Pacing itself belongs to
/// the host loop; the simulation only counts ticks.
pub const TICK_HZ: u32 = 60;

/// A parameter set the simulation cannot run against.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    #[error(
        "pipe gap {gap} plus twice the margin {margin} does not fit above the ground line at {ground_y}"
    )]
    GapDoesNotFit { gap: f32, margin: f32, ground_y: f32 },
}

/// Complete balance parameter set for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Playfield width; pipes spawn at this x and drift left.
    pub playfield_width: f32,
    /// Playfield height including the ground band.
    pub playfield_height: f32,
    /// Height of the solid ground band at the bottom.
    pub ground_height: f32,

    /// Added to the bird's vertical velocity every tick.
    pub gravity: f32,
    /// Velocity a flap overwrites the bird with (negative = upward).
    pub flap_impulse: f32,
    /// Bird sprite dimensions.
    pub bird_size: Vec2,
    /// Where a fresh bird appears; x never changes afterwards.
    pub bird_spawn: Vec2,
    /// Hit box offset from the sprite's top-left corner.
    pub hitbox_offset: Vec2,
    /// Hit box dimensions, tighter than the sprite so collisions read fair.
    pub hitbox_size: Vec2,

    /// Vertical size of the open gap between pipe segments.
    pub pipe_gap: f32,
    pub pipe_width: f32,
    /// Horizontal pipe velocity at session start (negative = leftward).
    pub pipe_start_velocity: f32,
    /// Clearance kept between the gap and both the ceiling and the ground line.
    pub gap_margin: f32,

    /// Ticks between pipe spawns at session start.
    pub spawn_interval_start: u32,
    /// Hard floor for the spawn interval.
    pub spawn_interval_min: u32,
    /// Interval shrink per point once past the hard threshold.
    pub spawn_interval_step: u32,
    /// Score at which the steep difficulty ramp kicks in.
    pub hard_score: u32,
    /// Velocity magnitude gained per point below the threshold.
    pub velocity_step_easy: f32,
    /// Velocity magnitude gained per point at or past the threshold.
    pub velocity_step_hard: f32,
    /// Chance of a reversed pipe once past the threshold.
    pub reversed_chance: f64,

    pub total_lives: u8,
    /// Longest accepted player name.
    pub name_limit: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: 500.0,
            playfield_height: 600.0,
            ground_height: 50.0,

            gravity: 0.1,
            flap_impulse: -4.0,
            bird_size: Vec2::new(24.0, 20.0),
            bird_spawn: Vec2::new(125.0, 300.0),
            hitbox_offset: Vec2::new(5.0, 2.0),
            hitbox_size: Vec2::new(20.0, 20.0),

            pipe_gap: 160.0,
            pipe_width: 52.0,
            pipe_start_velocity: -2.5,
            gap_margin: 50.0,

            spawn_interval_start: 100,
            spawn_interval_min: 60,
            spawn_interval_step: 2,
            hard_score: 15,
            velocity_step_easy: 0.08,
            velocity_step_hard: 0.25,
            reversed_chance: 0.6,

            total_lives: 3,
            name_limit: 15,
        }
    }
}

impl Tuning {
    /// Y coordinate of the ground line (top edge of the ground band).
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.playfield_height - self.ground_height
    }

    /// Range gap offsets are sampled from. Non-empty for any validated
    /// tuning, which is what keeps the gap fully inside the playfield with
    /// clearance on both sides.
    pub fn gap_range(&self) -> RangeInclusive<f32> {
        self.gap_margin..=(self.ground_y() - self.gap_margin - self.pipe_gap)
    }

    /// Reject parameter sets whose gap cannot be placed at all.
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.gap_range().is_empty() {
            return Err(TuningError::GapDoesNotFit {
                gap: self.pipe_gap,
                margin: self.gap_margin,
                ground_y: self.ground_y(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        Tuning::default().validate().expect("reference balance must validate");
    }

    #[test]
    fn test_gap_range_matches_reference_bounds() {
        let t = Tuning::default();
        assert_eq!(t.ground_y(), 550.0);
        assert_eq!(*t.gap_range().start(), 50.0);
        assert_eq!(*t.gap_range().end(), 340.0);
    }

    #[test]
    fn test_oversized_gap_fails_validation() {
        let t = Tuning {
            pipe_gap: 600.0,
            ..Tuning::default()
        };
        assert!(matches!(t.validate(), Err(TuningError::GapDoesNotFit { .. })));
    }

    #[test]
    fn test_margin_squeeze_fails_validation() {
        let t = Tuning {
            gap_margin: 250.0,
            ..Tuning::default()
        };
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_exact_fit_is_still_valid() {
        // margin + gap + margin == ground_y leaves exactly one legal offset
        let t = Tuning {
            pipe_gap: 450.0,
            ..Tuning::default()
        };
        assert!(t.validate().is_ok());
        assert_eq!(t.gap_range(), 50.0..=50.0);
    }
}
