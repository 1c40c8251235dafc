//! Arena of dungeon cells addressed by dense identifiers.

use std::collections::VecDeque;

use otyugh_core::{
    CellCoord, CellId, CellKind, Direction, MonsterId, Smell, ThiefId, TreasureHoard,
};
use otyugh_system_builder::Layout;

/// Mutable state of a single cell.
///
/// Neighbours are stored as identifiers per entrance; an open entrance is
/// exactly a `Some` neighbour, which keeps entrance flags symmetric by construction.
#[derive(Clone, Debug)]
pub(crate) struct Cell {
    pub(crate) id: CellId,
    pub(crate) coord: CellCoord,
    neighbors: [Option<CellId>; 4],
    pub(crate) pit: bool,
    pub(crate) treasure: TreasureHoard,
    pub(crate) arrows: u32,
    pub(crate) monster: Option<MonsterId>,
    pub(crate) thief: Option<ThiefId>,
    pub(crate) visited: bool,
    pub(crate) occupied: bool,
    pub(crate) smell_units: i32,
    pub(crate) near_pit: bool,
}

impl Cell {
    fn new(id: CellId, coord: CellCoord) -> Self {
        Self {
            id,
            coord,
            neighbors: [None; 4],
            pit: false,
            treasure: TreasureHoard::default(),
            arrows: 0,
            monster: None,
            thief: None,
            visited: false,
            occupied: false,
            smell_units: 0,
            near_pit: false,
        }
    }

    /// Kind derived from the entrance count, overridden once the cave becomes a pit.
    pub(crate) fn kind(&self) -> CellKind {
        if self.pit {
            CellKind::Pit
        } else {
            CellKind::from_entrance_count(self.entrance_count())
        }
    }

    pub(crate) fn neighbor(&self, direction: Direction) -> Option<CellId> {
        self.neighbors[direction.index()]
    }

    /// Open entrances paired with the neighbour behind each, in canonical order.
    pub(crate) fn passages(&self) -> impl Iterator<Item = (Direction, CellId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| self.neighbor(direction).map(|cell| (direction, cell)))
    }

    pub(crate) fn entrance_count(&self) -> usize {
        self.neighbors.iter().flatten().count()
    }

    pub(crate) fn smell(&self) -> Smell {
        Smell::from_units(self.smell_units)
    }
}

/// Row-major grid of cells built from a passage layout.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    rows: u32,
    columns: u32,
    wrapping: bool,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocates every cell and opens the entrances of each realised passage.
    pub(crate) fn from_layout(layout: &Layout) -> Self {
        let cells = (0..layout.cell_count())
            .map(|index| {
                let id = CellId::new(u32::try_from(index).unwrap_or(u32::MAX));
                Cell::new(id, layout.coord_of(id))
            })
            .collect();
        let mut grid = Self {
            rows: layout.rows(),
            columns: layout.columns(),
            wrapping: layout.wrapping(),
            cells,
        };

        for edge in layout.edges() {
            grid.open(edge.from(), edge.direction(), edge.to());
        }
        grid
    }

    fn open(&mut self, from: CellId, direction: Direction, to: CellId) {
        if let Some(cell) = self.cells.get_mut(from.get() as usize) {
            cell.neighbors[direction.index()] = Some(to);
        }
        if let Some(cell) = self.cells.get_mut(to.get() as usize) {
            cell.neighbors[direction.reverse().index()] = Some(from);
        }
    }

    pub(crate) const fn rows(&self) -> u32 {
        self.rows
    }

    pub(crate) const fn columns(&self) -> u32 {
        self.columns
    }

    pub(crate) const fn wrapping(&self) -> bool {
        self.wrapping
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    /// Identifier of the cell at the provided coordinate, if it lies within the grid.
    pub(crate) fn id_at(&self, coord: CellCoord) -> Option<CellId> {
        if coord.column() >= self.columns || coord.row() >= self.rows {
            return None;
        }
        Some(self.id_of(coord))
    }

    /// Identifier of a coordinate already known to lie within the grid.
    pub(crate) fn id_of(&self, coord: CellCoord) -> CellId {
        CellId::new(coord.row() * self.columns + coord.column())
    }

    pub(crate) fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.get() as usize]
    }

    pub(crate) fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.get() as usize]
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Identifiers of every cell whose current kind is [`CellKind::Cave`].
    pub(crate) fn caves(&self) -> Vec<CellId> {
        self.cells
            .iter()
            .filter(|cell| cell.kind() == CellKind::Cave)
            .map(|cell| cell.id)
            .collect()
    }

    /// Breadth-first passage distances from `origin`; `None` marks unreachable cells.
    pub(crate) fn passage_distances(&self, origin: CellId) -> Vec<Option<u32>> {
        let mut distances = vec![None; self.cells.len()];
        let Some(slot) = distances.get_mut(origin.get() as usize) else {
            return distances;
        };
        *slot = Some(0);

        let mut queue = VecDeque::new();
        queue.push_back(origin);
        while let Some(current) = queue.pop_front() {
            let next_distance = distances[current.get() as usize].unwrap_or(0) + 1;
            for (_, neighbor) in self.cell(current).passages() {
                let entry = &mut distances[neighbor.get() as usize];
                if entry.is_none() {
                    *entry = Some(next_distance);
                    queue.push_back(neighbor);
                }
            }
        }
        distances
    }
}
