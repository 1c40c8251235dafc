use serde::{Deserialize, Serialize};

use crate::{
    CellCoord, CellId, CellKind, Direction, MonsterId, MonsterStatus, Smell, ThiefId,
    TreasureHoard,
};

/// Read-only copy of a single cell.
///
/// Snapshots are detached from the world: mutating one never affects live state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    /// Dense identifier of the cell.
    pub id: CellId,
    /// Grid coordinate of the cell.
    pub coord: CellCoord,
    /// Current classification of the cell.
    pub kind: CellKind,
    /// Connected neighbours keyed by the entrance leading to them, in canonical direction order.
    pub neighbors: Vec<(Direction, CellCoord)>,
    /// Treasure lying in the cell.
    pub treasure: TreasureHoard,
    /// Arrows lying in the cell.
    pub arrows: u32,
    /// Monster occupying the cell, if any.
    pub monster: Option<MonsterSnapshot>,
    /// Thief occupying the cell, if any.
    pub thief: Option<ThiefSnapshot>,
    /// Whether the player has entered the cell.
    pub visited: bool,
    /// Whether the player currently stands in the cell.
    pub occupied: bool,
    /// Odor level of the cell.
    pub smell: Smell,
    /// Accumulated odor units.
    pub smell_units: i32,
    /// Whether a pit lies next to the cell.
    pub near_pit: bool,
}

impl CellSnapshot {
    /// Open entrances of the cell in canonical direction order.
    pub fn exits(&self) -> impl Iterator<Item = Direction> + '_ {
        self.neighbors.iter().map(|(direction, _)| *direction)
    }

    /// Reports whether the cell has an entrance in the provided direction.
    #[must_use]
    pub fn has_exit(&self, direction: Direction) -> bool {
        self.neighbor(direction).is_some()
    }

    /// Neighbour reached through the entrance in the provided direction.
    #[must_use]
    pub fn neighbor(&self, direction: Direction) -> Option<CellCoord> {
        self.neighbors
            .iter()
            .find(|(candidate, _)| *candidate == direction)
            .map(|(_, coord)| *coord)
    }

    /// Number of open entrances.
    #[must_use]
    pub fn entrance_count(&self) -> usize {
        self.neighbors.len()
    }
}

/// Read-only copy of a monster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterSnapshot {
    /// Identifier of the monster.
    pub id: MonsterId,
    /// Display name of the monster.
    pub name: String,
    /// Cell the monster occupies.
    pub cell: CellCoord,
    /// Arrow hits taken so far.
    pub hits: u32,
    /// Status derived from the hit count.
    pub status: MonsterStatus,
}

/// Read-only copy of a thief.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThiefSnapshot {
    /// Identifier of the thief.
    pub id: ThiefId,
    /// Display name of the thief.
    pub name: String,
    /// Cell the thief occupies.
    pub cell: CellCoord,
    /// Treasure taken from the player so far.
    pub stolen: TreasureHoard,
}

/// Deep copy of the whole grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Number of grid rows.
    pub rows: u32,
    /// Number of grid columns.
    pub columns: u32,
    /// Whether opposite boundaries are adjacent.
    pub wrapping: bool,
    /// Every cell in row-major order.
    pub cells: Vec<CellSnapshot>,
}

impl GridSnapshot {
    /// Cell stored at the provided coordinate.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<&CellSnapshot> {
        if coord.column() >= self.columns || coord.row() >= self.rows {
            return None;
        }
        let index = coord.row() as usize * self.columns as usize + coord.column() as usize;
        self.cells.get(index)
    }

    /// Iterates over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &CellSnapshot> {
        self.cells.iter()
    }

    /// Iterates over the rows of the grid, each in column order.
    pub fn rows(&self) -> impl Iterator<Item = &[CellSnapshot]> {
        self.cells.chunks(self.columns.max(1) as usize)
    }
}

/// Structured description of the player's current cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationDescription {
    /// Coordinate of the cell.
    pub coord: CellCoord,
    /// Classification of the cell.
    pub kind: CellKind,
    /// Open entrances in canonical direction order.
    pub exits: Vec<Direction>,
    /// Treasure lying in the cell; tunnels never report treasure.
    pub treasure: Option<TreasureHoard>,
    /// Arrows lying in the cell.
    pub arrows: u32,
    /// Accumulated odor units.
    pub smell_units: i32,
    /// Whether a pit lies next to the cell.
    pub near_pit: bool,
}

impl LocationDescription {
    /// Builds the description of the provided cell snapshot.
    #[must_use]
    pub fn of(cell: &CellSnapshot) -> Self {
        let treasure = match cell.kind {
            CellKind::Tunnel => None,
            CellKind::Cave | CellKind::Pit => Some(cell.treasure),
        };
        Self {
            coord: cell.coord,
            kind: cell.kind,
            exits: cell.exits().collect(),
            treasure,
            arrows: cell.arrows,
            smell_units: cell.smell_units,
            near_pit: cell.near_pit,
        }
    }

    /// Odor level of the cell.
    #[must_use]
    pub const fn smell(&self) -> Smell {
        Smell::from_units(self.smell_units)
    }
}
