//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Capped timestep, injected clock only
//! - Seeded RNG only
//! - Stable iteration order (adversary list order)
//! - No rendering or platform dependencies

pub mod arc;
pub mod collision;
pub mod color;
pub mod director;
pub mod entity;
pub mod grid;
pub mod level;
pub mod score;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use arc::{JumpArc, drop_position};
pub use collision::{Collision, begin_destruction, detect};
pub use color::{Board, ColorBehavior, ColorRules, CubeColor, LandResult};
pub use entity::{Adversary, LandKind, MotionEvent, Mover, Phase, Player, Variant};
pub use grid::{Coord, Direction, Grid};
pub use level::{SpawnConfig, color_rules, spawn_config};
pub use score::{ScoreBreakdown, ScoreState};
pub use snapshot::{AdversaryView, EntityView, Snapshot};
pub use state::{Cue, Mode, Session};
pub use tick::{TickInput, tick};
