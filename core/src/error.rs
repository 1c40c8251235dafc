use thiserror::Error;

use crate::{CellCoord, Direction, PickupItem, PlayerStatus, MIN_DESTINATION_DISTANCE};

/// Reasons a dungeon cannot be constructed from a configuration.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// One of the grid dimensions is zero.
    #[error("rows and columns must both be at least 1 (got {rows}x{columns})")]
    EmptyGrid {
        /// Requested rows.
        rows: u32,
        /// Requested columns.
        columns: u32,
    },
    /// The grid cannot hold two caves far enough apart.
    #[error(
        "a {rows}x{columns} grid cannot place the destination {} cells from the start",
        MIN_DESTINATION_DISTANCE
    )]
    GridTooSmall {
        /// Requested rows.
        rows: u32,
        /// Requested columns.
        columns: u32,
    },
    /// More extra passages were requested than the grid can provide.
    #[error("interconnectivity {requested} exceeds the {maximum} extra passages available")]
    InterconnectivityTooHigh {
        /// Requested interconnectivity.
        requested: u32,
        /// Largest interconnectivity the grid supports.
        maximum: u32,
    },
    /// A percentage knob lies outside `0..=100`.
    #[error("{field} must lie within 0..=100 (got {value})")]
    PercentOutOfRange {
        /// Name of the offending configuration field.
        field: &'static str,
        /// Rejected value.
        value: u32,
    },
    /// No destination far enough from the start was found within the retry budget.
    #[error(
        "no destination at least {} cells from the start was found after {rounds} rounds",
        MIN_DESTINATION_DISTANCE
    )]
    DestinationNotFound {
        /// Start/destination selection rounds attempted.
        rounds: u32,
    },
    /// A placement plan names a cell outside the grid it is applied to.
    #[error("placement {cell} lies outside the dungeon")]
    PlacementOutOfBounds {
        /// Offending cell.
        cell: CellCoord,
    },
}

/// Recoverable failures reported for a single command; world state is left unchanged.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The player's cell has no entrance in the requested direction.
    #[error("illegal move: there is no entrance to the {direction}")]
    IllegalMove {
        /// Requested direction.
        direction: Direction,
    },
    /// The target cell is not connected to the player's cell.
    #[error("illegal move: {cell} is not connected to the current cell")]
    NotAdjacent {
        /// Requested cell.
        cell: CellCoord,
    },
    /// The target coordinate lies outside the grid.
    #[error("{cell} lies outside the dungeon")]
    OutOfBounds {
        /// Requested cell.
        cell: CellCoord,
    },
    /// Arrows must travel at least one cave.
    #[error("an arrow must travel at least one cave")]
    InvalidDistance,
    /// The player's quiver is empty.
    #[error("the player has no arrows left")]
    NoArrows,
    /// The player's cell holds none of the requested resource.
    #[error("there are no {item} here")]
    NothingToPick {
        /// Requested resource.
        item: PickupItem,
    },
    /// The command requires a living player.
    #[error("the player is {status}")]
    PlayerNotAlive {
        /// Current player status.
        status: PlayerStatus,
    },
    /// The session has not been configured with a dungeon yet.
    #[error("no dungeon has been configured")]
    NotConfigured,
}
