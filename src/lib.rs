//! Cube Hop - simulation core for an arcade pyramid-climbing game
//!
//! One player orb and a handful of autonomous adversaries hop across a
//! triangular grid of cubes. Landing on a cube advances its color; the
//! level is won when every cube reaches the terminal color.
//!
//! This crate is the `sim` layer only: entity phase machines, jump-arc
//! and gravity math, collision sequencing, adversary direction, scoring,
//! and the top-level session state machine. Rendering, audio playback,
//! and input capture are host concerns; they consume the per-tick
//! [`sim::Snapshot`] and [`sim::Cue`] stream and never mutate sim state.

pub mod sim;

use glam::Vec2;

/// Game configuration constants (reference geometry in pixels)
pub mod consts {
    /// Number of pyramid rows; row `r` has `r + 1` cubes
    pub const GRID_ROWS: i32 = 7;
    /// Width of one cube
    pub const BLOCK_SIZE: f32 = 100.0;
    /// Height of one cube
    pub const BLOCK_HEIGHT: f32 = 75.0;

    /// Logical playfield dimensions
    pub const BASE_WIDTH: f32 = 896.0;
    pub const BASE_HEIGHT: f32 = 1024.0;

    /// Peak height added to the jump arc
    pub const ARC_HEIGHT: f32 = BLOCK_HEIGHT * 1.2;
    /// Downward acceleration while falling, px/s²
    pub const GRAVITY: f32 = 1800.0;
    /// Vertical start of the drop-in animation (above the playfield)
    pub const DROP_START_Y: f32 = -100.0;
    /// Falling entities past this y are off-screen and resolve
    pub const OFFSCREEN_Y: f32 = BASE_HEIGHT + 200.0;

    /// Phase durations, seconds
    pub const PLAYER_JUMP_DURATION: f32 = 0.3;
    pub const ADVERSARY_JUMP_DURATION: f32 = 0.35;
    pub const PLAYER_DROP_DURATION: f32 = 0.5;
    pub const ADVERSARY_DROP_DURATION: f32 = 0.8;
    pub const DESTRUCTION_DURATION: f32 = 0.5;
    pub const RESPAWN_DELAY: f32 = 0.7;

    /// Input lockout after the player's drop-in lands, seconds
    pub const POST_LAND_LOCKOUT: f64 = 0.1;

    /// Adversary decision delays after landing, seconds
    pub const MOVE_DELAY_AFTER_JUMP: f64 = 0.8;
    pub const MOVE_DELAY_AFTER_DROP: f64 = 0.5;
    /// Drop-in delay for the first adversary of a level, seconds
    pub const FIRST_SPAWN_DELAY: f64 = 2.0;

    /// Entities closer than this (px) while airborne collide
    pub const COLLISION_DISTANCE: f32 = 30.0;

    pub const STARTING_LIVES: u8 = 4;
    /// Completing this level completes the game
    pub const FINAL_LEVEL: u32 = 28;

    /// Per-tick dt cap to bound integration error during stalls, seconds
    pub const MAX_TICK_DT: f32 = 0.1;
}

/// Linear interpolation between two points
#[inline]
pub fn lerp_vec(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}
