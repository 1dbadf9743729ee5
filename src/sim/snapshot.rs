//! Immutable per-tick render snapshot
//!
//! Captured after [`super::tick::tick`] returns, the snapshot carries
//! everything a renderer or HUD needs as plain derived data. Nothing in
//! it is ever written back into the session.

use glam::Vec2;
use serde::Serialize;

use super::entity::{Mover, Phase, Variant};
use super::grid::Grid;
use super::score::ScoreBreakdown;
use super::state::{Cue, Mode, Session};

/// Derived render state for one entity
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EntityView {
    pub pos: Vec2,
    /// 1.0 normally, shrinking to 0.0 during destruction
    pub scale: f32,
    /// False while waiting out a respawn
    pub visible: bool,
    /// In a drop-in, hop, or fall (drawn over the cubes)
    pub airborne: bool,
    /// Row used for painter's-order sorting
    pub z_row: f32,
    /// Falling behind the pyramid silhouette
    pub fall_behind: bool,
    /// Falling in front of the bottom row
    pub fall_in_front: bool,
}

impl EntityView {
    fn capture(mover: &Mover, grid: &Grid, now: f64) -> Self {
        let pos = mover.position(grid, now);
        let falling = matches!(mover.phase, Phase::Falling { .. });
        EntityView {
            pos: pos.unwrap_or(Vec2::ZERO),
            scale: mover.scale(now),
            visible: pos.is_some(),
            airborne: matches!(
                mover.phase,
                Phase::DroppingIn { .. } | Phase::Jumping { .. } | Phase::Falling { .. }
            ),
            z_row: match mover.phase {
                Phase::Jumping { from, to, .. } => from.row.max(to.row) as f32,
                _ => mover.coord.row as f32,
            },
            fall_behind: falling && grid.fall_behind(mover.coord),
            fall_in_front: falling && grid.fall_in_front(mover.coord),
        }
    }
}

/// An adversary's render state
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AdversaryView {
    #[serde(flatten)]
    pub entity: EntityView,
    pub variant: Variant,
    /// Drop-in progress for the drop shadow, when dropping
    pub drop_progress: Option<f32>,
}

/// Full frame snapshot
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub mode: Mode,
    pub level: u32,
    pub lives: u8,
    pub score: u64,
    pub streak_multiplier: f32,
    /// Present after the first level completion of the game
    pub breakdown: Option<ScoreBreakdown>,
    /// Cube face colors as hex strings, row by row
    pub cells: Vec<Vec<&'static str>>,
    pub player: EntityView,
    pub adversaries: Vec<AdversaryView>,
    /// Audio cues emitted by the tick that produced this frame
    pub cues: Vec<Cue>,
}

impl Snapshot {
    pub fn capture(session: &Session) -> Self {
        let now = session.time;
        let rules = session.color_rules();
        Snapshot {
            mode: session.mode,
            level: session.level,
            lives: session.lives,
            score: session.score.total,
            streak_multiplier: session.score.streak_multiplier,
            breakdown: session.score.breakdown,
            cells: session.board.hex_rows(&rules),
            player: EntityView::capture(&session.player.mover, &session.grid, now),
            adversaries: session
                .adversaries
                .iter()
                .map(|a| AdversaryView {
                    entity: EntityView::capture(&a.mover, &session.grid, now),
                    variant: a.variant,
                    drop_progress: a.mover.drop_progress(now),
                })
                .collect(),
            cues: session.cues().to_vec(),
        }
    }
}
