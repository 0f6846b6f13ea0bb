//! Tunable parameters consumed when a new game is generated.

use serde::{Deserialize, Serialize};

/// Parameters describing a freshly generated game.
///
/// The defaults reproduce the classic board: a 12×18 grid with five short
/// obstacle runs and four tanks per side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of grid rows.
    pub rows: u32,
    /// Number of grid columns.
    pub columns: u32,
    /// Obstacle run placement parameters.
    pub obstacles: ObstacleConfig,
    /// Tanks fielded by each side.
    pub tanks_per_side: u32,
    /// Width of the starting column band on each edge of the map.
    pub band_width: u32,
    /// Hit points each tank starts with.
    pub max_health: u32,
    /// Damage value carried by each tank.
    pub damage: u32,
    /// Treat cells occupied by other tanks as impassable while planning.
    pub occupancy_blocks_paths: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 12,
            columns: 18,
            obstacles: ObstacleConfig::default(),
            tanks_per_side: 4,
            band_width: 2,
            max_health: 100,
            damage: 10,
            occupancy_blocks_paths: false,
        }
    }
}

/// Obstacle run placement parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    /// Number of obstacle runs to place.
    pub count: u32,
    /// Shortest run length, inclusive.
    pub min_length: u32,
    /// Longest run length, inclusive.
    pub max_length: u32,
    /// Placement samples tried before generation gives up.
    pub max_attempts: u32,
}

impl ObstacleConfig {
    /// Creates an obstacle configuration with the default retry budget.
    #[must_use]
    pub const fn new(count: u32, min_length: u32, max_length: u32) -> Self {
        Self {
            count,
            min_length,
            max_length,
            max_attempts: 10_000,
        }
    }
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self::new(5, 2, 3)
    }
}
