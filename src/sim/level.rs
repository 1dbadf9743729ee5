//! Per-level configuration
//!
//! Everything here is a pure function of the level number: the color
//! palette and its end behavior, and the adversary spawn cadence. Low
//! levels use hand-tuned tables; anything past the tables falls back to
//! an asymptotic formula so arbitrarily high levels never fail.

use super::color::{ColorBehavior, ColorRules, CubeColor};

use CubeColor::*;

const PALETTE_TWO: &[CubeColor] = &[Yellow, Red];
const PALETTE_THREE: &[CubeColor] = &[Yellow, Green, Red];
const PALETTE_FOUR: &[CubeColor] = &[Yellow, Green, Blue, Red];

/// Color palette and progression behavior for a level
pub fn color_rules(level: u32) -> ColorRules {
    let palette = match level {
        1 | 2 => PALETTE_TWO,
        3 => PALETTE_THREE,
        _ => PALETTE_FOUR,
    };
    let behavior = match level {
        2 => ColorBehavior::Cyclic,
        _ => ColorBehavior::ClampAtLast,
    };
    ColorRules { palette, behavior }
}

/// Adversary spawn cadence for a level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnConfig {
    /// Population cap, including adversaries mid-destruction
    pub max_population: u32,
    /// Spawn delay range in seconds, drawn uniformly
    pub min_delay: f64,
    pub max_delay: f64,
}

impl SpawnConfig {
    const fn new(max_population: u32, min_delay: f64, max_delay: f64) -> Self {
        Self {
            max_population,
            min_delay,
            max_delay,
        }
    }
}

/// Spawn configuration: tuned table for levels 1-8, asymptotic formula
/// beyond it (cap grows by one every 3 levels up to 6; delays shrink to
/// a 1 s floor with max ≥ min + 1)
pub fn spawn_config(level: u32) -> SpawnConfig {
    match level {
        0 | 1 => SpawnConfig::new(1, 3.0, 6.0),
        2 => SpawnConfig::new(1, 4.0, 10.0),
        3 => SpawnConfig::new(2, 3.0, 7.0),
        4 => SpawnConfig::new(3, 5.0, 10.0),
        5 => SpawnConfig::new(2, 1.0, 4.0),
        6 => SpawnConfig::new(3, 2.0, 6.0),
        7 => SpawnConfig::new(4, 3.0, 8.0),
        8 => SpawnConfig::new(3, 1.0, 3.0),
        _ => {
            let past = (level - 9) as f64;
            let max_population = (3 + (level - 9) / 3).min(6);
            let min_delay = (4.0 - (past / 2.0).floor()).max(1.0);
            let max_delay = (7.0 - (past / 2.0).floor()).max(min_delay + 1.0);
            SpawnConfig::new(max_population, min_delay, max_delay)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_growth() {
        assert_eq!(color_rules(1).palette.len(), 2);
        assert_eq!(color_rules(3).palette.len(), 3);
        assert_eq!(color_rules(4).palette.len(), 4);
        assert_eq!(color_rules(28).palette.len(), 4);
    }

    #[test]
    fn test_only_level_two_cycles() {
        assert_eq!(color_rules(1).behavior, ColorBehavior::ClampAtLast);
        assert_eq!(color_rules(2).behavior, ColorBehavior::Cyclic);
        assert_eq!(color_rules(3).behavior, ColorBehavior::ClampAtLast);
    }

    #[test]
    fn test_terminal_color_is_always_red() {
        for level in 1..=40 {
            let rules = color_rules(level);
            assert_eq!(*rules.palette.last().unwrap(), Red);
        }
    }

    #[test]
    fn test_spawn_table_levels() {
        assert_eq!(spawn_config(1), SpawnConfig::new(1, 3.0, 6.0));
        assert_eq!(spawn_config(8), SpawnConfig::new(3, 1.0, 3.0));
    }

    #[test]
    fn test_spawn_formula_beyond_table() {
        // Level 9 starts the formula at the table's neighborhood
        assert_eq!(spawn_config(9), SpawnConfig::new(3, 4.0, 7.0));
        assert_eq!(spawn_config(12), SpawnConfig::new(4, 3.0, 6.0));
        // Population caps at 6, delays floor out, for any level
        for level in 9..200 {
            let cfg = spawn_config(level);
            assert!(cfg.max_population <= 6);
            assert!(cfg.min_delay >= 1.0);
            assert!(cfg.max_delay >= cfg.min_delay + 1.0);
        }
        assert_eq!(spawn_config(100).max_population, 6);
        assert_eq!(spawn_config(100).min_delay, 1.0);
    }
}
