//! Error types surfaced by game setup and move requests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Position, Side, TankId};

/// Reasons a game could not be created.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    /// The grid has no cells, or more than fit in a `u32` index.
    #[error("grid dimensions {rows}x{columns} are empty or too large")]
    InvalidDimensions {
        /// Requested row count.
        rows: u32,
        /// Requested column count.
        columns: u32,
    },

    /// The obstacle length range is empty or admits zero-length runs.
    #[error("obstacle lengths must satisfy 1 <= min <= max, got min {min} max {max}")]
    InvalidObstacleLength {
        /// Requested minimum length.
        min: u32,
        /// Requested maximum length.
        max: u32,
    },

    /// The two starting bands would overlap.
    #[error("starting bands of width {band_width} do not fit in {columns} columns")]
    BandTooWide {
        /// Requested band width.
        band_width: u32,
        /// Grid column count.
        columns: u32,
    },

    /// Obstacle placement ran out of attempts; the grid is too small for the request.
    #[error("placed {placed} of {requested} obstacle runs after {attempts} attempts")]
    ObstacleGenerationExhausted {
        /// Runs placed before giving up.
        placed: u32,
        /// Runs requested.
        requested: u32,
        /// Samples tried.
        attempts: u32,
    },

    /// An explicit obstacle run does not fit inside the grid.
    #[error("obstacle run starting at {origin:?} extends outside the grid")]
    ObstacleOutOfBounds {
        /// Origin of the offending run.
        origin: Position,
    },

    /// An explicit obstacle run covers a cell that is already an obstacle.
    #[error("obstacle run starting at {origin:?} overlaps another obstacle")]
    ObstacleOverlap {
        /// Origin of the offending run.
        origin: Position,
    },

    /// A starting band does not hold enough free cells for its side's tanks.
    #[error("side {side:?} needs {requested} starting cells but only {available} are free")]
    TankPlacementExhausted {
        /// Side being placed.
        side: Side,
        /// Tanks requested for the side.
        requested: u32,
        /// Free cells found in the band.
        available: u32,
    },

    /// An explicit tank seed sits on an obstacle.
    #[error("tank cannot start on obstacle at {position:?}")]
    TankOnObstacle {
        /// Requested starting cell.
        position: Position,
    },

    /// An explicit tank seed sits on a cell another tank already holds.
    #[error("tank cannot start on occupied cell {position:?}")]
    TankOnOccupiedCell {
        /// Requested starting cell.
        position: Position,
    },

    /// An explicit tank seed lies outside the grid.
    #[error("tank cannot start outside the grid at {position:?}")]
    TankOutOfBounds {
        /// Requested starting cell.
        position: Position,
    },
}

/// Reasons a move request was refused before any planning happened.
///
/// A refused request leaves the turn with the active side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum MoveError {
    /// The requested target lies outside the grid.
    #[error("target {position:?} lies outside the grid")]
    InvalidPosition {
        /// Requested target cell.
        position: Position,
    },

    /// The tank belongs to the side that is waiting for its turn.
    #[error("tank {tank} does not belong to the active side {active:?}")]
    InactiveActor {
        /// Tank named by the request.
        tank: TankId,
        /// Side currently holding the turn.
        active: Side,
    },

    /// No tank carries the requested identifier.
    #[error("tank {tank} does not exist")]
    UnknownTank {
        /// Identifier named by the request.
        tank: TankId,
    },
}
