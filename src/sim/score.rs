//! Scoring and streak engine
//!
//! Points accrue through a streak multiplier that climbs with
//! consecutive "perfect" moves (no adversary near the move target) and
//! resets on any unsafe move or collision. Completing a level pays out a
//! bonus broken down by category; the breakdown is retained for display.

use serde::{Deserialize, Serialize};

/// Base points for a movement intent
pub const MOVE_POINTS: u32 = 25;
/// Base points for an adversary that fell off rather than colliding
pub const AVOID_POINTS: u32 = 50;
/// Streak multiplier ceiling
const MAX_MULTIPLIER: f32 = 5.0;

/// Level-completion bonus breakdown, retained for the score screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub level_completion: u64,
    pub lives: u64,
    pub time: u64,
    pub movement: u64,
    pub avoidance: u64,
    pub total: u64,
}

/// Mutable scoring state; fully reset on new game, partially on new level
#[derive(Debug, Clone)]
pub struct ScoreState {
    pub total: u64,
    pub streak_multiplier: f32,
    pub consecutive_perfect: u32,
    pub moves_this_level: u32,
    pub adversaries_avoided: u32,
    /// Sim time the level started, for the time bonus
    pub level_start: f64,
    pub breakdown: Option<ScoreBreakdown>,
}

impl ScoreState {
    pub fn new(now: f64) -> Self {
        Self {
            total: 0,
            streak_multiplier: 1.0,
            consecutive_perfect: 0,
            moves_this_level: 0,
            adversaries_avoided: 0,
            level_start: now,
            breakdown: None,
        }
    }

    /// Partial reset when a new level starts: streak and level counters
    /// go back, total and breakdown survive
    pub fn reset_level(&mut self, now: f64) {
        self.streak_multiplier = 1.0;
        self.consecutive_perfect = 0;
        self.moves_this_level = 0;
        self.adversaries_avoided = 0;
        self.level_start = now;
    }

    /// Award `base` points through the streak multiplier
    pub fn add_points(&mut self, base: u32) -> u64 {
        let awarded = (base as f32 * self.streak_multiplier).floor() as u64;
        self.total += awarded;
        awarded
    }

    /// Feed the streak with the outcome of a move. Perfect moves step
    /// the multiplier up every third move; anything else resets it.
    pub fn update_streak(&mut self, perfect: bool) {
        if perfect {
            self.consecutive_perfect += 1;
            self.streak_multiplier =
                (1.0 + (self.consecutive_perfect / 3) as f32 * 0.5).min(MAX_MULTIPLIER);
        } else {
            self.consecutive_perfect = 0;
            self.streak_multiplier = 1.0;
        }
    }

    /// Compute and apply the level-completion bonus; called exactly once
    /// at the moment of completion
    pub fn apply_level_bonus(&mut self, level: u32, lives: u8, now: f64) -> ScoreBreakdown {
        let elapsed = now - self.level_start;
        let target_time = 30.0 + 5.0 * level as f64;

        let level_completion = 1000 * level as u64;
        let lives_bonus = (lives.saturating_sub(1)) as u64 * 500;
        let time = ((target_time - elapsed) * 10.0).floor().max(0.0) as u64;
        let movement = self.moves_this_level as u64 * 25;
        let avoidance = self.adversaries_avoided as u64 * 50;

        let breakdown = ScoreBreakdown {
            level_completion,
            lives: lives_bonus,
            time,
            movement,
            avoidance,
            total: level_completion + lives_bonus + time + movement + avoidance,
        };
        self.total += breakdown.total;
        self.breakdown = Some(breakdown);
        breakdown
    }
}
