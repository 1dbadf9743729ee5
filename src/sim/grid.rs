//! Triangular-grid topology
//!
//! The pyramid has [`crate::consts::GRID_ROWS`] rows; row `r` holds
//! `r + 1` cubes at columns `0..=r`. Coordinates are signed so that
//! off-grid neighbors (the fall targets) stay representable. Topology is
//! immutable for the whole session; this module is pure lookups.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A grid coordinate, possibly off the pyramid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const APEX: Coord = Coord { row: 0, col: 0 };

    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another coordinate
    pub fn manhattan(&self, other: Coord) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }
}

/// One of the four diagonal hop directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];
}

/// The immutable pyramid lattice
#[derive(Debug, Clone, Copy, Default)]
pub struct Grid;

impl Grid {
    /// Whether a coordinate is on the pyramid
    pub fn contains(&self, c: Coord) -> bool {
        c.row >= 0 && c.row < GRID_ROWS && c.col >= 0 && c.col <= c.row
    }

    /// Neighbor in the given direction; the result may be off-grid
    pub fn neighbor(&self, c: Coord, dir: Direction) -> Coord {
        match dir {
            Direction::UpLeft => Coord::new(c.row - 1, c.col - 1),
            Direction::UpRight => Coord::new(c.row - 1, c.col),
            Direction::DownLeft => Coord::new(c.row + 1, c.col),
            Direction::DownRight => Coord::new(c.row + 1, c.col + 1),
        }
    }

    /// Screen-space center of a cube (valid for off-grid coords too,
    /// which is what jump arcs off the pyramid need)
    pub fn cell_center(&self, c: Coord) -> Vec2 {
        let x_start = BASE_WIDTH / 2.0;
        let y_start =
            (BASE_HEIGHT - GRID_ROWS as f32 * BLOCK_HEIGHT) / 2.0 + BLOCK_HEIGHT / 2.0;
        Vec2::new(
            x_start + (c.col as f32 - c.row as f32 / 2.0) * BLOCK_SIZE,
            y_start + c.row as f32 * BLOCK_HEIGHT,
        )
    }

    /// Cells eligible as adversary spawn points: interior cells only,
    /// skipping the apex, the bottom row, and both slanted edges
    pub fn interior_cells(&self) -> Vec<Coord> {
        let mut cells = Vec::new();
        for row in 1..GRID_ROWS - 1 {
            for col in 1..row {
                cells.push(Coord::new(row, col));
            }
        }
        cells
    }

    /// Z-order hint: an entity leaving over the top or a slanted edge
    /// falls behind the pyramid
    pub fn fall_behind(&self, c: Coord) -> bool {
        c.row < 0 || c.col < 0 || c.col > c.row
    }

    /// Z-order hint: a down-jump off the bottom row falls in front
    pub fn fall_in_front(&self, c: Coord) -> bool {
        c.row >= GRID_ROWS
    }
}
