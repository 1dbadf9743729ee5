//! Collision and destruction sequencing
//!
//! Runs once per tick in playing mode. Seated-vs-seated overlap is an
//! exact cube-coordinate match; once either entity is mid-hop the check
//! switches to Euclidean distance between the continuous arc positions.
//! Entities dropping in, falling, being destroyed, or waiting to respawn
//! are exempt. At most one collision resolves per tick: first match in
//! adversary-list order wins.

use glam::Vec2;

use super::entity::{Adversary, Phase, Player};
use super::grid::Grid;
use crate::consts::COLLISION_DISTANCE;

/// A resolved collision, ready to sequence destruction
#[derive(Debug, Clone, Copy)]
pub struct Collision {
    /// Index into the adversary list
    pub adversary: usize,
    pub player_pos: Vec2,
    pub adversary_pos: Vec2,
    /// Shared convergence target for both destruction animations
    pub midpoint: Vec2,
}

/// Find the first colliding adversary this tick, if any
pub fn detect(
    grid: &Grid,
    now: f64,
    player: &Player,
    adversaries: &[Adversary],
) -> Option<Collision> {
    if player.mover.collision_exempt() {
        return None;
    }

    for (i, adversary) in adversaries.iter().enumerate() {
        if adversary.collided || adversary.mover.collision_exempt() {
            continue;
        }

        let both_seated = player.mover.is_seated() && adversary.mover.is_seated();
        let hit = if both_seated {
            player.mover.coord == adversary.mover.coord
        } else {
            // At least one is jumping: compare interpolated positions
            let (Some(p), Some(a)) = (
                player.mover.position(grid, now),
                adversary.mover.position(grid, now),
            ) else {
                continue;
            };
            p.distance(a) <= COLLISION_DISTANCE
        };

        if hit {
            // Positions exist for both in every non-exempt phase
            let player_pos = player.mover.position(grid, now)?;
            let adversary_pos = adversary.mover.position(grid, now)?;
            return Some(Collision {
                adversary: i,
                player_pos,
                adversary_pos,
                midpoint: (player_pos + adversary_pos) / 2.0,
            });
        }
    }
    None
}

/// Put both entities into the destruction phase, converging on the
/// shared midpoint
pub fn begin_destruction(collision: &Collision, player: &mut Player, adversary: &mut Adversary, now: f64) {
    adversary.collided = true;
    player.mover.phase = Phase::Destroying {
        from: collision.player_pos,
        midpoint: collision.midpoint,
        start: now,
    };
    adversary.mover.phase = Phase::Destroying {
        from: collision.adversary_pos,
        midpoint: collision.midpoint,
        start: now,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_JUMP_DURATION;
    use crate::sim::entity::Variant;
    use crate::sim::grid::{Coord, Direction};

    fn seated_player(row: i32, col: i32) -> Player {
        let mut p = Player::new(0.0);
        p.mover.coord = Coord::new(row, col);
        p.mover.phase = Phase::Seated;
        p
    }

    fn seated_adversary(row: i32, col: i32) -> Adversary {
        let mut a = Adversary::new(Coord::new(row, col), Variant::A, Direction::DownLeft, 0.0);
        a.mover.phase = Phase::Seated;
        a
    }

    #[test]
    fn test_seated_overlap_collides() {
        let grid = Grid;
        let player = seated_player(3, 1);
        let adversaries = vec![seated_adversary(3, 1)];
        let c = detect(&grid, 10.0, &player, &adversaries).expect("collision");
        assert_eq!(c.adversary, 0);
        assert_eq!(c.midpoint, grid.cell_center(Coord::new(3, 1)));
    }

    #[test]
    fn test_adjacent_seated_do_not_collide() {
        let grid = Grid;
        let player = seated_player(3, 1);
        let adversaries = vec![seated_adversary(3, 2)];
        assert!(detect(&grid, 10.0, &player, &adversaries).is_none());
    }

    #[test]
    fn test_airborne_proximity_collides() {
        let grid = Grid;
        // Player hops from (2,1) toward (3,1); adversary sits on (3,1).
        // Near the end of the arc the two are within the threshold.
        let mut player = seated_player(2, 1);
        player
            .mover
            .begin_jump(Coord::new(3, 1), 10.0, PLAYER_JUMP_DURATION);
        let adversaries = vec![seated_adversary(3, 1)];
        let late = 10.0 + PLAYER_JUMP_DURATION as f64 * 0.98;
        let c = detect(&grid, late, &player, &adversaries).expect("mid-air collision");
        // Midpoint sits between the two current positions
        let p = player.mover.position(&grid, late).unwrap();
        let a = adversaries[0].mover.position(&grid, late).unwrap();
        assert!((c.midpoint - (p + a) / 2.0).length() < 1e-3);
    }

    #[test]
    fn test_airborne_far_apart_does_not_collide() {
        let grid = Grid;
        let mut player = seated_player(2, 1);
        player
            .mover
            .begin_jump(Coord::new(3, 1), 10.0, PLAYER_JUMP_DURATION);
        let adversaries = vec![seated_adversary(5, 1)];
        // Early in the arc the player is far from (5,1)
        assert!(detect(&grid, 10.05, &player, &adversaries).is_none());
    }

    #[test]
    fn test_exempt_phases_skip_detection() {
        let grid = Grid;
        let player = seated_player(3, 1);
        let mut dropping = seated_adversary(3, 1);
        dropping.mover.phase = Phase::DroppingIn {
            start: 9.0,
            duration: 0.8,
        };
        let mut destroying = seated_adversary(3, 1);
        destroying.mover.phase = Phase::Destroying {
            from: grid.cell_center(Coord::new(3, 1)),
            midpoint: grid.cell_center(Coord::new(3, 1)),
            start: 9.0,
        };
        assert!(detect(&grid, 10.0, &player, &[dropping]).is_none());
        assert!(detect(&grid, 10.0, &player, &[destroying]).is_none());
    }

    #[test]
    fn test_first_match_in_list_order_wins() {
        let grid = Grid;
        let player = seated_player(3, 1);
        let adversaries = vec![seated_adversary(3, 1), seated_adversary(3, 1)];
        let c = detect(&grid, 10.0, &player, &adversaries).unwrap();
        assert_eq!(c.adversary, 0);
    }

    #[test]
    fn test_begin_destruction_flags_and_phases() {
        let grid = Grid;
        let mut player = seated_player(3, 1);
        let mut adversary = seated_adversary(3, 1);
        let c = detect(&grid, 10.0, &player, &[adversary.clone()]).unwrap();
        begin_destruction(&c, &mut player, &mut adversary, 10.0);
        assert!(adversary.collided);
        assert!(matches!(player.mover.phase, Phase::Destroying { .. }));
        assert!(matches!(adversary.mover.phase, Phase::Destroying { .. }));
    }
}
