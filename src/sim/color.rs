//! Cell color progression engine
//!
//! Each cube carries an index into the level's ordered palette. A player
//! land advances the index, an adversary land retreats it; the level is
//! complete when every cube sits at the palette's last entry. Whether
//! indices clamp at the ends or wrap around is a per-level rule.

use serde::{Deserialize, Serialize};

use super::grid::Coord;
use crate::consts::GRID_ROWS;

/// A named cube color with its display value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CubeColor {
    Yellow,
    Green,
    Blue,
    Red,
}

impl CubeColor {
    /// Hex string for the renderer
    pub fn hex(&self) -> &'static str {
        match self {
            CubeColor::Yellow => "#fdcb36",
            CubeColor::Green => "#00b894",
            CubeColor::Blue => "#0984e3",
            CubeColor::Red => "#d63031",
        }
    }
}

/// How the color index behaves at the palette ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorBehavior {
    /// Advance stops at the last entry, retreat stops at the first
    ClampAtLast,
    /// Advance and retreat wrap around
    Cyclic,
}

/// The color rules for one level: an ordered palette plus end behavior
#[derive(Debug, Clone, Copy)]
pub struct ColorRules {
    pub palette: &'static [CubeColor],
    pub behavior: ColorBehavior,
}

/// What a land event did to a cube's color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandResult {
    /// Color did not change (clamped at an end)
    Unchanged,
    /// Color changed to a non-terminal palette entry
    Advanced,
    /// Color changed to the palette's last entry
    ReachedTerminal,
}

/// Per-level mutable board of cube color indices
#[derive(Debug, Clone)]
pub struct Board {
    /// Row `r` holds `r + 1` indices into the level palette
    cells: Vec<Vec<usize>>,
}

impl Board {
    /// Fresh board with every cube at the palette's first color
    pub fn new() -> Self {
        let cells = (0..GRID_ROWS).map(|r| vec![0; r as usize + 1]).collect();
        Self { cells }
    }

    pub fn color_index(&self, c: Coord) -> usize {
        self.cells[c.row as usize][c.col as usize]
    }

    pub fn color(&self, c: Coord, rules: &ColorRules) -> CubeColor {
        rules.palette[self.color_index(c)]
    }

    /// Player land: step the cube toward the terminal color
    pub fn advance(&mut self, c: Coord, rules: &ColorRules) -> LandResult {
        let len = rules.palette.len();
        let idx = self.color_index(c);
        let next = match rules.behavior {
            ColorBehavior::ClampAtLast => (idx + 1).min(len - 1),
            ColorBehavior::Cyclic => (idx + 1) % len,
        };
        self.apply(c, idx, next, len)
    }

    /// Adversary land: reverse the player's progress
    pub fn retreat(&mut self, c: Coord, rules: &ColorRules) -> LandResult {
        let len = rules.palette.len();
        let idx = self.color_index(c);
        let next = match rules.behavior {
            ColorBehavior::ClampAtLast => idx.saturating_sub(1),
            ColorBehavior::Cyclic => (idx + len - 1) % len,
        };
        self.apply(c, idx, next, len)
    }

    fn apply(&mut self, c: Coord, old: usize, new: usize, len: usize) -> LandResult {
        self.cells[c.row as usize][c.col as usize] = new;
        if new == old {
            LandResult::Unchanged
        } else if new == len - 1 {
            LandResult::ReachedTerminal
        } else {
            LandResult::Advanced
        }
    }

    /// True when every cube is at the palette's last entry
    pub fn is_complete(&self, rules: &ColorRules) -> bool {
        let terminal = rules.palette.len() - 1;
        self.cells
            .iter()
            .all(|row| row.iter().all(|&idx| idx == terminal))
    }

    /// Rows of display hex strings for the snapshot
    pub fn hex_rows(&self, rules: &ColorRules) -> Vec<Vec<&'static str>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|&idx| rules.palette[idx].hex()).collect())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
