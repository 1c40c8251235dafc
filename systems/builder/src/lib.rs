#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure topology system that turns a [`DungeonConfig`] into a connected passage layout.
//!
//! The builder enumerates every candidate passage between grid-adjacent cells,
//! keeps a random spanning tree of them using a merge-find partition, and then
//! reintroduces `interconnectivity` of the discarded passages to form cycles.

mod partition;

use otyugh_core::{
    CellCoord, CellId, ConfigError, Direction, DungeonConfig, RandomSource,
    MIN_DESTINATION_DISTANCE,
};

use crate::partition::Partition;

/// Passage between two grid-adjacent cells.
///
/// `direction` is the entrance on `from` that leads to `to`; `to` owns the
/// reverse entrance. Wrap-around passages point across the grid boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    from: CellId,
    direction: Direction,
    to: CellId,
}

impl Edge {
    /// Creates a passage leaving `from` through `direction` into `to`.
    #[must_use]
    pub const fn new(from: CellId, direction: Direction, to: CellId) -> Self {
        Self {
            from,
            direction,
            to,
        }
    }

    /// Cell the passage starts from.
    #[must_use]
    pub const fn from(&self) -> CellId {
        self.from
    }

    /// Entrance on [`Edge::from`] that the passage uses.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Cell the passage leads into.
    #[must_use]
    pub const fn to(&self) -> CellId {
        self.to
    }
}

/// Result of a topology build: grid dimensions plus the realised passages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    rows: u32,
    columns: u32,
    wrapping: bool,
    interconnectivity: u32,
    final_edges: Vec<Edge>,
    discarded_edges: Vec<Edge>,
}

impl Layout {
    /// Creates a layout from an explicit passage list.
    ///
    /// Interconnectivity is derived from how many passages exceed a spanning tree.
    #[must_use]
    pub fn from_edges(rows: u32, columns: u32, wrapping: bool, edges: Vec<Edge>) -> Self {
        let tree_edges = (rows as usize * columns as usize).saturating_sub(1);
        let extra = edges.len().saturating_sub(tree_edges);
        Self {
            rows,
            columns,
            wrapping,
            interconnectivity: u32::try_from(extra).unwrap_or(u32::MAX),
            final_edges: edges,
            discarded_edges: Vec::new(),
        }
    }

    /// Number of grid rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of grid columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Whether opposite boundaries are adjacent.
    #[must_use]
    pub const fn wrapping(&self) -> bool {
        self.wrapping
    }

    /// Extra passages beyond the spanning tree.
    #[must_use]
    pub const fn interconnectivity(&self) -> u32 {
        self.interconnectivity
    }

    /// Passages opened in the dungeon.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.final_edges
    }

    /// Candidate passages left closed after the build.
    #[must_use]
    pub fn discarded_edges(&self) -> &[Edge] {
        &self.discarded_edges
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Grid coordinate of the provided cell identifier.
    #[must_use]
    pub const fn coord_of(&self, cell: CellId) -> CellCoord {
        coord_of(cell, self.columns)
    }

    /// Identifier of the cell at the provided coordinate, if it lies within the grid.
    #[must_use]
    pub const fn id_of(&self, coord: CellCoord) -> Option<CellId> {
        if coord.column() >= self.columns || coord.row() >= self.rows {
            return None;
        }
        Some(id_of(coord, self.columns))
    }
}

/// Randomised spanning-structure builder for a validated configuration.
#[derive(Clone, Debug)]
pub struct TopologyBuilder {
    config: DungeonConfig,
    candidates: Vec<Edge>,
}

impl TopologyBuilder {
    /// Validates the configuration and enumerates its candidate passages.
    pub fn new(config: DungeonConfig) -> Result<Self, ConfigError> {
        validate(&config)?;
        Ok(Self {
            candidates: candidate_edges(config.rows, config.columns, config.wrapping),
            config,
        })
    }

    /// Configuration the builder was created with.
    #[must_use]
    pub const fn config(&self) -> &DungeonConfig {
        &self.config
    }

    /// Every candidate passage of the grid before selection.
    #[must_use]
    pub fn candidate_edges(&self) -> &[Edge] {
        &self.candidates
    }

    /// Selects a random spanning tree and reopens `interconnectivity` discarded passages.
    #[must_use]
    pub fn build(&self, rng: &mut dyn RandomSource) -> Layout {
        let mut partition = Partition::new(cell_count(self.config.rows, self.config.columns));
        let mut remaining = self.candidates.clone();
        let mut final_edges = Vec::with_capacity(remaining.len());
        let mut discarded_edges = Vec::new();

        while !remaining.is_empty() {
            let edge = remaining.swap_remove(rng.pick_index(remaining.len()));
            if partition.union(edge.from().get() as usize, edge.to().get() as usize) {
                final_edges.push(edge);
            } else {
                discarded_edges.push(edge);
            }
        }

        for _ in 0..self.config.interconnectivity {
            if discarded_edges.is_empty() {
                break;
            }
            let edge = discarded_edges.swap_remove(rng.pick_index(discarded_edges.len()));
            final_edges.push(edge);
        }

        Layout {
            rows: self.config.rows,
            columns: self.config.columns,
            wrapping: self.config.wrapping,
            interconnectivity: self.config.interconnectivity,
            final_edges,
            discarded_edges,
        }
    }
}

/// Checks a configuration without building anything.
pub fn validate(config: &DungeonConfig) -> Result<(), ConfigError> {
    let DungeonConfig { rows, columns, .. } = *config;
    if rows < 1 || columns < 1 {
        return Err(ConfigError::EmptyGrid { rows, columns });
    }

    let degenerate_strip =
        (rows == 1 && columns < 6) || (columns == 1 && rows < 6) || (rows == 2 && columns < 3);
    if degenerate_strip || farthest_separation(rows, columns, config.wrapping) < MIN_DESTINATION_DISTANCE
    {
        return Err(ConfigError::GridTooSmall { rows, columns });
    }

    let maximum = max_interconnectivity(rows, columns, config.wrapping);
    if config.interconnectivity > maximum {
        return Err(ConfigError::InterconnectivityTooHigh {
            requested: config.interconnectivity,
            maximum,
        });
    }

    for (field, value) in [
        ("percent_treasure", config.percent_treasure),
        ("percent_monsters", config.percent_monsters),
    ] {
        if value > 100 {
            return Err(ConfigError::PercentOutOfRange { field, value });
        }
    }

    Ok(())
}

/// Largest interconnectivity a grid supports: candidate passages minus spanning-tree passages.
#[must_use]
pub fn max_interconnectivity(rows: u32, columns: u32, wrapping: bool) -> u32 {
    let candidates = candidate_count(rows, columns, wrapping);
    let tree_edges = cell_count(rows, columns).saturating_sub(1);
    u32::try_from(candidates.saturating_sub(tree_edges)).unwrap_or(u32::MAX)
}

/// Number of passages [`candidate_edges`] enumerates, without building them.
fn candidate_count(rows: u32, columns: u32, wrapping: bool) -> usize {
    let per_line = |extent: u32| -> usize {
        match (wrapping, extent) {
            (true, 0 | 1) => 0,
            (true, extent) => extent as usize,
            (false, extent) => extent.saturating_sub(1) as usize,
        }
    };
    rows as usize * per_line(columns) + columns as usize * per_line(rows)
}

/// Enumerates the south and east passages of every cell, wrapping at the boundaries if requested.
///
/// Wrap passages that would join a cell to itself are skipped.
#[must_use]
pub fn candidate_edges(rows: u32, columns: u32, wrapping: bool) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(cell_count(rows, columns) * 2);
    for row in 0..rows {
        for column in 0..columns {
            let here = id_of(CellCoord::new(column, row), columns);

            let south = if row + 1 < rows {
                Some(row + 1)
            } else if wrapping && rows > 1 {
                Some(0)
            } else {
                None
            };
            if let Some(next_row) = south {
                let there = id_of(CellCoord::new(column, next_row), columns);
                edges.push(Edge::new(here, Direction::South, there));
            }

            let east = if column + 1 < columns {
                Some(column + 1)
            } else if wrapping && columns > 1 {
                Some(0)
            } else {
                None
            };
            if let Some(next_column) = east {
                let there = id_of(CellCoord::new(next_column, row), columns);
                edges.push(Edge::new(here, Direction::East, there));
            }
        }
    }
    edges
}

fn farthest_separation(rows: u32, columns: u32, wrapping: bool) -> u32 {
    let origin = CellCoord::new(0, 0);
    let corner = if wrapping {
        CellCoord::new(columns / 2, rows / 2)
    } else {
        CellCoord::new(columns - 1, rows - 1)
    };
    origin.separation(corner, columns, rows, wrapping)
}

const fn cell_count(rows: u32, columns: u32) -> usize {
    rows as usize * columns as usize
}

const fn id_of(coord: CellCoord, columns: u32) -> CellId {
    CellId::new(coord.row() * columns + coord.column())
}

const fn coord_of(cell: CellId, columns: u32) -> CellCoord {
    CellCoord::new(cell.get() % columns, cell.get() / columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_wrapping_candidates_skip_boundaries() {
        let edges = candidate_edges(3, 4, false);
        // 2rc - r - c
        assert_eq!(edges.len(), 2 * 3 * 4 - 3 - 4);
    }

    #[test]
    fn wrapping_candidates_double_the_cells() {
        let edges = candidate_edges(3, 4, true);
        assert_eq!(edges.len(), 2 * 3 * 4);
        assert!(edges
            .iter()
            .any(|edge| edge.direction() == Direction::East
                && edge.from() == CellId::new(3)
                && edge.to() == CellId::new(0)));
    }

    #[test]
    fn single_row_wrap_has_no_self_loops() {
        let edges = candidate_edges(1, 8, true);
        assert_eq!(edges.len(), 8);
        assert!(edges.iter().all(|edge| edge.from() != edge.to()));
    }

    #[test]
    fn candidate_count_matches_enumeration() {
        for rows in 1..7 {
            for columns in 1..7 {
                for wrapping in [false, true] {
                    assert_eq!(
                        candidate_count(rows, columns, wrapping),
                        candidate_edges(rows, columns, wrapping).len(),
                        "{rows}x{columns} wrapping={wrapping}",
                    );
                }
            }
        }
    }

    #[test]
    fn maximum_interconnectivity_accounts_for_spanning_tree() {
        assert_eq!(max_interconnectivity(6, 6, false), 60 - 35);
        assert_eq!(max_interconnectivity(6, 6, true), 72 - 35);
        assert_eq!(max_interconnectivity(1, 8, false), 0);
    }

    #[test]
    fn layout_round_trips_coordinates() {
        let layout = Layout::from_edges(3, 5, false, Vec::new());
        let coord = CellCoord::new(4, 2);
        let id = layout.id_of(coord).expect("inside grid");
        assert_eq!(id, CellId::new(14));
        assert_eq!(layout.coord_of(id), coord);
        assert_eq!(layout.id_of(CellCoord::new(5, 0)), None);
    }
}
