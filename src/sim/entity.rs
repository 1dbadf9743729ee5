//! Entity motion state machine
//!
//! Every entity - the player and each adversary - cycles through the
//! same phases: drop in from above the pyramid, sit on a cube, hop to a
//! neighbor, fall off the edge, get destroyed in a collision, respawn.
//! Each phase is a variant carrying exactly the fields that phase needs;
//! `row, col` are authoritative only while `Seated`. Rendered positions
//! during the animated phases are derived from phase-relative
//! interpolation and never written back until the phase resolves.
//!
//! The integrator reports what happened as a [`MotionEvent`] and leaves
//! the consequences (color changes, life loss, scoring, respawn policy)
//! to the tick driver, which keeps this machine identical for player and
//! adversary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arc::{JumpArc, drop_position};
use super::grid::{Coord, Direction, Grid};
use crate::consts::*;

/// Animation phase of an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Vertical drop from above the pyramid onto `coord`; `start` may be
    /// in the future for delayed adversary spawns
    DroppingIn { start: f64, duration: f32 },
    /// At rest on `coord`, able to accept movement intents
    Seated,
    /// Mid-hop along a jump arc
    Jumping {
        from: Coord,
        to: Coord,
        start: f64,
        duration: f32,
    },
    /// Off the pyramid, integrating under gravity
    Falling { pos: Vec2, vel: Vec2 },
    /// Converging on the shared collision midpoint while shrinking
    Destroying {
        from: Vec2,
        midpoint: Vec2,
        start: f64,
    },
    /// Waiting out the respawn delay; no position
    Respawning { start: f64 },
}

/// What an integration step resolved, for the tick driver to act on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionEvent {
    None,
    /// A drop-in or jump resolved onto an on-grid cell
    Landed { coord: Coord, via: LandKind },
    /// A jump's target was off-grid; the entity is now falling
    BeganFalling,
    /// A falling entity crossed the off-screen threshold
    WentOffscreen,
    /// The destruction animation finished
    Destroyed,
}

/// How a land event came about; adversaries schedule their next move
/// differently after a drop-in than after a hop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandKind {
    DropIn,
    Jump,
}

/// Shared motion state for any entity
#[derive(Debug, Clone)]
pub struct Mover {
    /// Authoritative only while `phase` is `Seated`
    pub coord: Coord,
    pub phase: Phase,
}

impl Mover {
    /// New entity dropping in onto `coord`, starting at `drop_start`
    pub fn dropping_in(coord: Coord, drop_start: f64, duration: f32) -> Self {
        Self {
            coord,
            phase: Phase::DroppingIn {
                start: drop_start,
                duration,
            },
        }
    }

    pub fn is_seated(&self) -> bool {
        matches!(self.phase, Phase::Seated)
    }

    /// Phases during which collision checks are skipped entirely
    pub fn collision_exempt(&self) -> bool {
        matches!(
            self.phase,
            Phase::DroppingIn { .. }
                | Phase::Falling { .. }
                | Phase::Destroying { .. }
                | Phase::Respawning { .. }
        )
    }

    /// Begin a hop toward `to` (on- or off-grid). Caller must check the
    /// entity is allowed to move; this just flips the phase.
    pub fn begin_jump(&mut self, to: Coord, now: f64, duration: f32) {
        self.phase = Phase::Jumping {
            from: self.coord,
            to,
            start: now,
            duration,
        };
    }

    /// The jump arc for the current `Jumping` phase
    pub fn jump_arc(&self, grid: &Grid) -> Option<JumpArc> {
        match self.phase {
            Phase::Jumping {
                from, to, duration, ..
            } => Some(JumpArc::new(
                grid.cell_center(from),
                grid.cell_center(to),
                duration,
            )),
            _ => None,
        }
    }

    /// Current screen position, derived from the phase; `None` while
    /// respawning (the entity is nowhere)
    pub fn position(&self, grid: &Grid, now: f64) -> Option<Vec2> {
        match self.phase {
            Phase::Seated => Some(grid.cell_center(self.coord)),
            Phase::DroppingIn { start, duration } => {
                let t = phase_progress(now, start, duration);
                Some(drop_position(
                    grid.cell_center(self.coord),
                    DROP_START_Y,
                    t,
                ))
            }
            Phase::Jumping { start, duration, .. } => {
                let t = phase_progress(now, start, duration);
                self.jump_arc(grid).map(|arc| arc.position(t))
            }
            Phase::Falling { pos, .. } => Some(pos),
            Phase::Destroying {
                from,
                midpoint,
                start,
            } => {
                let t = phase_progress(now, start, DESTRUCTION_DURATION);
                Some(crate::lerp_vec(from, midpoint, t))
            }
            Phase::Respawning { .. } => None,
        }
    }

    /// Drop-in progress in [0, 1], for drop-shadow rendering
    pub fn drop_progress(&self, now: f64) -> Option<f32> {
        match self.phase {
            Phase::DroppingIn { start, duration } => Some(phase_progress(now, start, duration)),
            _ => None,
        }
    }

    /// Render scale: shrinks to zero during destruction
    pub fn scale(&self, now: f64) -> f32 {
        match self.phase {
            Phase::Destroying { start, .. } => {
                1.0 - phase_progress(now, start, DESTRUCTION_DURATION)
            }
            _ => 1.0,
        }
    }

    /// Advance the phase machine by one tick.
    ///
    /// `inert` integration (overlay modes) keeps in-flight animations
    /// moving but holds drop-ins and respawns in place, so that nothing
    /// re-enters active play while a level-complete or game-over overlay
    /// is up.
    pub fn integrate(&mut self, grid: &Grid, now: f64, dt: f32, inert: bool) -> MotionEvent {
        match self.phase {
            Phase::Seated => MotionEvent::None,

            Phase::DroppingIn { start, duration } => {
                if inert {
                    return MotionEvent::None;
                }
                if phase_progress(now, start, duration) >= 1.0 {
                    self.phase = Phase::Seated;
                    MotionEvent::Landed {
                        coord: self.coord,
                        via: LandKind::DropIn,
                    }
                } else {
                    MotionEvent::None
                }
            }

            Phase::Jumping {
                from,
                to,
                start,
                duration,
            } => {
                if phase_progress(now, start, duration) < 1.0 {
                    return MotionEvent::None;
                }
                self.coord = to;
                if grid.contains(to) {
                    self.phase = Phase::Seated;
                    MotionEvent::Landed {
                        coord: to,
                        via: LandKind::Jump,
                    }
                } else {
                    // Seamless handoff: the fall starts with the arc's
                    // exit velocity
                    let arc =
                        JumpArc::new(grid.cell_center(from), grid.cell_center(to), duration);
                    self.phase = Phase::Falling {
                        pos: grid.cell_center(to),
                        vel: arc.exit_velocity(),
                    };
                    MotionEvent::BeganFalling
                }
            }

            Phase::Falling { pos, vel } => {
                let vel = vel + Vec2::new(0.0, GRAVITY * dt);
                let pos = pos + vel * dt;
                if pos.y > OFFSCREEN_Y {
                    MotionEvent::WentOffscreen
                } else {
                    self.phase = Phase::Falling { pos, vel };
                    MotionEvent::None
                }
            }

            Phase::Destroying { start, .. } => {
                if phase_progress(now, start, DESTRUCTION_DURATION) >= 1.0 {
                    MotionEvent::Destroyed
                } else {
                    MotionEvent::None
                }
            }

            Phase::Respawning { start } => {
                if !inert && now - start >= RESPAWN_DELAY as f64 {
                    self.coord = Coord::APEX;
                    self.phase = Phase::DroppingIn {
                        start: now,
                        duration: PLAYER_DROP_DURATION,
                    };
                }
                MotionEvent::None
            }
        }
    }
}

/// Normalized phase progress, clamped to [0, 1]; negative elapsed time
/// (a scheduled-but-not-started drop-in) clamps to 0
fn phase_progress(now: f64, start: f64, duration: f32) -> f32 {
    (((now - start) as f32) / duration).clamp(0.0, 1.0)
}

/// The controllable entity
#[derive(Debug, Clone)]
pub struct Player {
    pub mover: Mover,
    /// Movement intents are rejected until this time (post-drop-in)
    pub lockout_until: f64,
}

impl Player {
    /// Fresh player dropping in at the apex
    pub fn new(now: f64) -> Self {
        Self {
            mover: Mover::dropping_in(Coord::APEX, now, PLAYER_DROP_DURATION),
            lockout_until: 0.0,
        }
    }

    /// Whether a movement intent can be accepted right now
    pub fn can_move(&self, now: f64) -> bool {
        self.mover.is_seated() && now >= self.lockout_until
    }
}

/// Adversary flavor: A keeps its spawn facing forever, B re-rolls a
/// facing before every hop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    A,
    B,
}

/// An autonomous adversary
#[derive(Debug, Clone)]
pub struct Adversary {
    pub mover: Mover,
    pub variant: Variant,
    pub facing: Direction,
    /// Earliest time the director will move this adversary again
    pub next_decision: f64,
    /// Set on collision with the player; a collided adversary never
    /// counts as "avoided" for scoring
    pub collided: bool,
}

impl Adversary {
    pub fn new(coord: Coord, variant: Variant, facing: Direction, drop_start: f64) -> Self {
        Self {
            mover: Mover::dropping_in(coord, drop_start, ADVERSARY_DROP_DURATION),
            variant,
            facing,
            next_decision: 0.0,
            collided: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seated_at(row: i32, col: i32) -> Mover {
        Mover {
            coord: Coord::new(row, col),
            phase: Phase::Seated,
        }
    }

    #[test]
    fn test_drop_in_lands_after_duration() {
        let grid = Grid;
        let mut m = Mover::dropping_in(Coord::APEX, 0.0, PLAYER_DROP_DURATION);
        assert_eq!(m.integrate(&grid, 0.25, 0.016, false), MotionEvent::None);
        assert_eq!(
            m.integrate(&grid, 0.5, 0.016, false),
            MotionEvent::Landed {
                coord: Coord::APEX,
                via: LandKind::DropIn
            }
        );
        assert!(m.is_seated());
    }

    #[test]
    fn test_delayed_drop_in_waits() {
        let grid = Grid;
        // Drop scheduled 3 seconds out: holds above the pyramid until then
        let mut m = Mover::dropping_in(Coord::new(2, 1), 3.0, ADVERSARY_DROP_DURATION);
        assert_eq!(m.integrate(&grid, 1.0, 0.016, false), MotionEvent::None);
        let pos = m.position(&grid, 1.0).unwrap();
        assert_eq!(pos.y, DROP_START_Y);
        assert!(matches!(
            m.integrate(&grid, 3.8, 0.016, false),
            MotionEvent::Landed { .. }
        ));
    }

    #[test]
    fn test_jump_on_grid_lands() {
        let grid = Grid;
        let mut m = seated_at(0, 0);
        m.begin_jump(Coord::new(1, 0), 10.0, PLAYER_JUMP_DURATION);
        assert_eq!(m.integrate(&grid, 10.1, 0.016, false), MotionEvent::None);
        assert_eq!(
            m.integrate(&grid, 10.3, 0.016, false),
            MotionEvent::Landed {
                coord: Coord::new(1, 0),
                via: LandKind::Jump
            }
        );
        assert_eq!(m.coord, Coord::new(1, 0));
    }

    #[test]
    fn test_jump_off_grid_begins_falling_with_exit_velocity() {
        let grid = Grid;
        let mut m = seated_at(0, 0);
        let target = grid.neighbor(Coord::APEX, Direction::UpRight);
        m.begin_jump(target, 10.0, PLAYER_JUMP_DURATION);
        let arc = m.jump_arc(&grid).unwrap();
        assert_eq!(m.integrate(&grid, 10.3, 0.016, false), MotionEvent::BeganFalling);
        match m.phase {
            Phase::Falling { pos, vel } => {
                assert!((pos - grid.cell_center(target)).length() < 1e-3);
                assert!((vel - arc.exit_velocity()).length() < 1e-3);
            }
            other => panic!("expected falling, got {other:?}"),
        }
    }

    #[test]
    fn test_seated_never_skips_to_falling() {
        // A seated entity only ever leaves via Jumping (movement) or
        // Destroying (collision); integration alone never moves it
        let grid = Grid;
        let mut m = seated_at(3, 1);
        for i in 0..1000 {
            assert_eq!(
                m.integrate(&grid, i as f64 * 0.016, 0.016, false),
                MotionEvent::None
            );
            assert!(m.is_seated());
        }
    }

    #[test]
    fn test_falling_crosses_offscreen_threshold() {
        let grid = Grid;
        let mut m = seated_at(6, 6);
        m.phase = Phase::Falling {
            pos: Vec2::new(800.0, BASE_HEIGHT),
            vel: Vec2::new(100.0, 300.0),
        };
        let mut went_off = false;
        for i in 0..300 {
            if m.integrate(&grid, i as f64 * 0.016, 0.016, false) == MotionEvent::WentOffscreen {
                went_off = true;
                break;
            }
        }
        assert!(went_off);
    }

    #[test]
    fn test_destroying_shrinks_then_resolves() {
        let grid = Grid;
        let mut m = seated_at(2, 1);
        let from = grid.cell_center(m.coord);
        let midpoint = from + Vec2::new(15.0, 0.0);
        m.phase = Phase::Destroying {
            from,
            midpoint,
            start: 5.0,
        };
        assert_eq!(m.integrate(&grid, 5.25, 0.016, false), MotionEvent::None);
        assert!((m.scale(5.25) - 0.5).abs() < 1e-3);
        let halfway = m.position(&grid, 5.25).unwrap();
        assert!((halfway - (from + Vec2::new(7.5, 0.0))).length() < 1e-3);
        assert_eq!(m.integrate(&grid, 5.5, 0.016, false), MotionEvent::Destroyed);
    }

    #[test]
    fn test_respawn_reenters_drop_in_at_apex() {
        let grid = Grid;
        let mut m = seated_at(4, 2);
        m.phase = Phase::Respawning { start: 1.0 };
        assert!(m.position(&grid, 1.2).is_none());
        m.integrate(&grid, 1.5, 0.016, false);
        assert!(matches!(m.phase, Phase::Respawning { .. }));
        m.integrate(&grid, 1.8, 0.016, false);
        assert!(matches!(m.phase, Phase::DroppingIn { .. }));
        assert_eq!(m.coord, Coord::APEX);
    }

    #[test]
    fn test_inert_integration_holds_drop_in_and_respawn() {
        let grid = Grid;
        let mut m = Mover::dropping_in(Coord::APEX, 0.0, PLAYER_DROP_DURATION);
        assert_eq!(m.integrate(&grid, 100.0, 0.016, true), MotionEvent::None);
        assert!(matches!(m.phase, Phase::DroppingIn { .. }));

        m.phase = Phase::Respawning { start: 0.0 };
        m.integrate(&grid, 100.0, 0.016, true);
        assert!(matches!(m.phase, Phase::Respawning { .. }));
    }

    #[test]
    fn test_inert_integration_still_runs_falls() {
        let grid = Grid;
        let mut m = seated_at(0, 0);
        m.phase = Phase::Falling {
            pos: Vec2::new(400.0, OFFSCREEN_Y - 1.0),
            vel: Vec2::new(0.0, 400.0),
        };
        assert_eq!(m.integrate(&grid, 0.0, 0.016, true), MotionEvent::WentOffscreen);
    }

    #[test]
    fn test_player_lockout_rejects_moves() {
        let mut p = Player::new(0.0);
        p.mover.phase = Phase::Seated;
        p.lockout_until = 1.0;
        assert!(!p.can_move(0.9));
        assert!(p.can_move(1.0));
    }
}
