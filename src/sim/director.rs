//! Adversary director
//!
//! Decides when adversaries enter play and where they go. Spawn cadence
//! comes from the per-level [`SpawnConfig`]; the population is topped up
//! every tick. Movement policy is per variant: A commits to its spawn
//! facing forever, B re-rolls a facing before every hop. Neither checks
//! whether the facing neighbor is on the pyramid - walking off the edge
//! is how adversaries leave play.

use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::{Adversary, Variant};
use super::grid::{Direction, Grid};
use super::level::SpawnConfig;
use crate::consts::ADVERSARY_JUMP_DURATION;

/// Uniform-random hop direction
pub fn random_direction(rng: &mut Pcg32) -> Direction {
    Direction::ALL[rng.random_range(0..Direction::ALL.len())]
}

/// Create a fresh adversary: random variant, random interior spawn
/// cell, random facing, drop-in delayed by `delay` seconds
pub fn spawn(rng: &mut Pcg32, grid: &Grid, now: f64, delay: f64) -> Adversary {
    let cells = grid.interior_cells();
    let coord = cells[rng.random_range(0..cells.len())];
    let variant = if rng.random_bool(0.5) {
        Variant::A
    } else {
        Variant::B
    };
    let facing = random_direction(rng);
    log::debug!("adversary spawn: {variant:?} at {coord:?}, drop in {delay:.1}s");
    Adversary::new(coord, variant, facing, now + delay)
}

/// Spawn with a delay drawn uniformly from the level's configured range
pub fn spawn_with_config(
    rng: &mut Pcg32,
    grid: &Grid,
    now: f64,
    config: &SpawnConfig,
) -> Adversary {
    let delay = rng.random_range(config.min_delay..=config.max_delay);
    spawn(rng, grid, now, delay)
}

/// Top the population up to the level cap. Adversaries mid-destruction
/// still count; they are replaced in place when their animation ends.
pub fn maintain_population(
    adversaries: &mut Vec<Adversary>,
    rng: &mut Pcg32,
    grid: &Grid,
    now: f64,
    config: &SpawnConfig,
) {
    while (adversaries.len() as u32) < config.max_population {
        adversaries.push(spawn_with_config(rng, grid, now, config));
    }
}

/// Issue a movement decision if the adversary is seated and due one
pub fn decide(adversary: &mut Adversary, rng: &mut Pcg32, grid: &Grid, now: f64) {
    if !adversary.mover.is_seated() || now < adversary.next_decision {
        return;
    }
    if adversary.variant == Variant::B {
        adversary.facing = random_direction(rng);
    }
    let target = grid.neighbor(adversary.mover.coord, adversary.facing);
    adversary
        .mover
        .begin_jump(target, now, ADVERSARY_JUMP_DURATION);
}
