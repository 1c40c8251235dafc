//! Monster odor propagation over open passages.

use otyugh_core::CellId;

use crate::grid::Grid;

const DIRECT_UNITS: i32 = 2;
const INDIRECT_UNITS: i32 = 1;

/// Adds `multiplier` times the monster odor around `source`.
///
/// Direct neighbours gain two units per passage and neighbours of those gain
/// one unit per passage. The monster's own cell never smells. A multiplier of
/// `-1` retracts exactly what a multiplier of `1` added.
pub(crate) fn propagate(grid: &mut Grid, source: CellId, multiplier: i32) {
    let direct: Vec<CellId> = grid
        .cell(source)
        .passages()
        .map(|(_, neighbor)| neighbor)
        .collect();

    for neighbor in direct {
        grid.cell_mut(neighbor).smell_units += DIRECT_UNITS * multiplier;

        let indirect: Vec<CellId> = grid
            .cell(neighbor)
            .passages()
            .map(|(_, cell)| cell)
            .filter(|cell| *cell != source)
            .collect();
        for cell in indirect {
            grid.cell_mut(cell).smell_units += INDIRECT_UNITS * multiplier;
        }
    }
}

#[cfg(test)]
mod tests {
    use otyugh_core::{Direction, Smell};
    use otyugh_system_builder::{Edge, Layout};

    use super::*;

    fn corridor(length: u32) -> Grid {
        let edges = (0..length - 1)
            .map(|index| Edge::new(CellId::new(index), Direction::East, CellId::new(index + 1)))
            .collect();
        Grid::from_layout(&Layout::from_edges(1, length, false, edges))
    }

    fn units(grid: &Grid) -> Vec<i32> {
        grid.iter().map(|cell| cell.smell_units).collect()
    }

    #[test]
    fn odor_fades_with_distance() {
        let mut grid = corridor(7);
        propagate(&mut grid, CellId::new(3), 1);
        assert_eq!(units(&grid), vec![0, 1, 2, 0, 2, 1, 0]);
        assert_eq!(grid.cell(CellId::new(1)).smell(), Smell::Pungent);
        assert_eq!(grid.cell(CellId::new(3)).smell(), Smell::None);
    }

    #[test]
    fn odors_from_several_monsters_accumulate() {
        let mut grid = corridor(7);
        propagate(&mut grid, CellId::new(2), 1);
        propagate(&mut grid, CellId::new(4), 1);
        assert_eq!(units(&grid), vec![1, 2, 1, 4, 1, 2, 1]);
    }

    #[test]
    fn retraction_restores_previous_odor() {
        let mut grid = corridor(7);
        propagate(&mut grid, CellId::new(2), 1);
        let before = units(&grid);
        propagate(&mut grid, CellId::new(4), 1);
        propagate(&mut grid, CellId::new(4), -1);
        assert_eq!(units(&grid), before);
    }
}
