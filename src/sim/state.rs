//! Session state: the single mutable root of the simulation
//!
//! The `Session` is an explicit value owned by the caller - no globals.
//! It owns the player, the adversary list, the color board, scoring, the
//! seeded RNG, and the sim clock. All mutation happens inside
//! [`super::tick::tick`]; renderers and audio consume the snapshot and
//! cue stream afterwards.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::color::{Board, ColorRules};
use super::director;
use super::entity::{Adversary, Player};
use super::grid::Grid;
use super::level;
use super::score::ScoreState;
use crate::consts::*;

/// Top-level session mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Title,
    Playing,
    LevelComplete,
    GameOver,
}

/// Named audio cue, fired at most once per triggering event. Cues are
/// fire-and-forget; the audio layer failing to play one never feeds back
/// into the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cue {
    LandOnTerminalColor,
    LandOnNonTerminalColor,
    CollisionSmash,
    FallBegin,
    LevelComplete,
    GameOver,
}

/// The complete game session
#[derive(Debug, Clone)]
pub struct Session {
    pub mode: Mode,
    pub level: u32,
    pub lives: u8,
    /// Captured when a level completes, for the final-level check
    pub completed_level: u32,
    /// Sim clock in seconds, advanced by capped tick dt
    pub time: f64,
    pub grid: Grid,
    pub board: Board,
    pub player: Player,
    pub adversaries: Vec<Adversary>,
    pub score: ScoreState,
    pub(crate) rng: Pcg32,
    /// Cues emitted by the most recent tick, in trigger order
    pub(crate) cues: Vec<Cue>,
}

impl Session {
    /// New session at the title screen, with all randomness seeded
    pub fn new(seed: u64) -> Self {
        Self {
            mode: Mode::Title,
            level: 1,
            lives: STARTING_LIVES,
            completed_level: 0,
            time: 0.0,
            grid: Grid,
            board: Board::new(),
            player: Player::new(0.0),
            adversaries: Vec::new(),
            score: ScoreState::new(0.0),
            rng: Pcg32::seed_from_u64(seed),
            cues: Vec::new(),
        }
    }

    /// Color palette and behavior for the current level
    pub fn color_rules(&self) -> ColorRules {
        level::color_rules(self.level)
    }

    /// Cues emitted by the most recent tick
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub(crate) fn push_cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    /// Title → Playing: full reset of lives, level, scoring, and world
    pub(crate) fn start_game(&mut self) {
        log::debug!("new game at t={:.1}", self.time);
        self.lives = STARTING_LIVES;
        self.level = 1;
        self.completed_level = 0;
        self.score = ScoreState::new(self.time);
        self.reset_world();
        self.mode = Mode::Playing;
    }

    /// LevelComplete → Playing on the next level
    pub(crate) fn advance_level(&mut self) {
        self.level += 1;
        log::debug!("advancing to level {}", self.level);
        self.score.reset_level(self.time);
        self.reset_world();
        self.mode = Mode::Playing;
    }

    /// Any mode → Title, discarding the world
    pub(crate) fn reset_to_title(&mut self) {
        log::debug!("returning to title");
        self.board = Board::new();
        self.adversaries.clear();
        self.mode = Mode::Title;
    }

    /// Fresh board, player dropping in at the apex, one adversary
    /// seeded with the fixed first-spawn delay
    fn reset_world(&mut self) {
        self.board = Board::new();
        self.player = Player::new(self.time);
        self.adversaries.clear();
        let config = level::spawn_config(self.level);
        if config.max_population > 0 {
            self.adversaries.push(director::spawn(
                &mut self.rng,
                &self.grid,
                self.time,
                FIRST_SPAWN_DELAY,
            ));
        }
    }
}
