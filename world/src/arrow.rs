//! Crooked-arrow flight through caves and tunnels.

use otyugh_core::{CellId, CellKind, Direction};

use crate::grid::Grid;

/// Follows an arrow from `origin` and returns the cell where it lands.
///
/// Caves (and pits) count one unit of distance each and keep the heading;
/// tunnels do not count and turn the arrow toward their other entrance. The
/// arrow lands in the cave reached after exactly `distance` units, or falls
/// short (returning `None`) when its path meets a wall first.
///
/// Flight is deterministic per `(cell, heading)`, so once a state repeats the
/// arrow is circling: whole laps are skipped and the walk never exceeds one
/// visit per state plus a single lap.
pub(crate) fn flight(
    grid: &Grid,
    origin: CellId,
    direction: Direction,
    distance: u32,
) -> Option<CellId> {
    if distance == 0 {
        return None;
    }

    let mut seen: Vec<Option<u32>> = vec![None; grid.len() * Direction::ALL.len()];
    let mut lapped = false;
    let mut heading = direction;
    let mut current = origin;
    let mut travelled = 0;

    loop {
        if !lapped {
            let state = current.get() as usize * Direction::ALL.len() + heading.index();
            match seen[state] {
                Some(earlier) => {
                    let lap = travelled - earlier;
                    // A ring made only of tunnels never lands anywhere.
                    if lap == 0 {
                        return None;
                    }
                    travelled += (distance - travelled - 1) / lap * lap;
                    lapped = true;
                }
                None => seen[state] = Some(travelled),
            }
        }

        let next = grid.cell(current).neighbor(heading)?;
        let cell = grid.cell(next);
        match cell.kind() {
            CellKind::Tunnel => {
                let (exit, _) = cell
                    .passages()
                    .find(|(exit, _)| *exit != heading.reverse())?;
                heading = exit;
            }
            CellKind::Cave | CellKind::Pit => {
                travelled += 1;
                if travelled == distance {
                    return Some(next);
                }
            }
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use otyugh_system_builder::{Edge, Layout};

    use super::*;

    fn id(column: u32, row: u32, columns: u32) -> CellId {
        CellId::new(row * columns + column)
    }

    /// (1,0) joins west and south, (1,1) joins north and east, so an arrow shot
    /// east from (0,0) bends twice before reaching the caves at (2,1) and (3,1).
    /// (4,1) is another tunnel turning north into the dead-end cave (4,0).
    fn bent_layout() -> Grid {
        let columns = 5;
        let mut edges = vec![
            Edge::new(id(0, 0, columns), Direction::East, id(1, 0, columns)),
            Edge::new(id(1, 0, columns), Direction::South, id(1, 1, columns)),
            Edge::new(id(1, 1, columns), Direction::East, id(2, 1, columns)),
            Edge::new(id(2, 1, columns), Direction::East, id(3, 1, columns)),
            Edge::new(id(3, 1, columns), Direction::East, id(4, 1, columns)),
        ];
        // Hang the remaining cells off row 1 so the grid stays connected.
        for column in [2, 3, 4] {
            edges.push(Edge::new(
                id(column, 0, columns),
                Direction::South,
                id(column, 1, columns),
            ));
        }
        edges.push(Edge::new(id(0, 0, columns), Direction::South, id(0, 1, columns)));
        Grid::from_layout(&Layout::from_edges(2, columns, false, edges))
    }

    #[test]
    fn tunnels_bend_the_arrow_without_counting() {
        let grid = bent_layout();
        assert_eq!(grid.cell(id(1, 0, 5)).kind(), CellKind::Tunnel);
        assert_eq!(grid.cell(id(1, 1, 5)).kind(), CellKind::Tunnel);

        // East into the tunnel, down, east again along row 1.
        assert_eq!(flight(&grid, id(0, 0, 5), Direction::East, 1), Some(id(2, 1, 5)));
        assert_eq!(flight(&grid, id(0, 0, 5), Direction::East, 2), Some(id(3, 1, 5)));
    }

    #[test]
    fn arrows_fall_short_at_walls() {
        let grid = bent_layout();
        assert_eq!(flight(&grid, id(0, 0, 5), Direction::East, 4), None);
        assert_eq!(flight(&grid, id(0, 0, 5), Direction::North, 1), None);
    }

    #[test]
    fn straight_caves_keep_the_heading() {
        let grid = bent_layout();
        assert_eq!(flight(&grid, id(2, 1, 5), Direction::East, 1), Some(id(3, 1, 5)));
        assert_eq!(flight(&grid, id(3, 1, 5), Direction::West, 1), Some(id(2, 1, 5)));
        assert_eq!(flight(&grid, id(2, 1, 5), Direction::East, 2), Some(id(4, 0, 5)));
    }

    #[test]
    fn tunnel_rings_terminate() {
        let columns = 3;
        // Single wrapped row where every cell is a tunnel.
        let edges = vec![
            Edge::new(id(0, 0, columns), Direction::East, id(1, 0, columns)),
            Edge::new(id(1, 0, columns), Direction::East, id(2, 0, columns)),
            Edge::new(id(2, 0, columns), Direction::East, id(0, 0, columns)),
        ];
        let grid = Grid::from_layout(&Layout::from_edges(1, columns, true, edges));
        assert_eq!(flight(&grid, id(0, 0, columns), Direction::East, 1), None);
        assert_eq!(flight(&grid, id(0, 0, columns), Direction::East, u32::MAX), None);
    }

    /// Row 0 is a wrapped ring of six caves, each with a dead-end cave below it.
    fn cave_ring() -> Grid {
        let columns = 6;
        let mut edges = Vec::new();
        for column in 0..columns {
            edges.push(Edge::new(
                id(column, 0, columns),
                Direction::East,
                id((column + 1) % columns, 0, columns),
            ));
            edges.push(Edge::new(
                id(column, 0, columns),
                Direction::South,
                id(column, 1, columns),
            ));
        }
        Grid::from_layout(&Layout::from_edges(2, columns, true, edges))
    }

    #[test]
    fn arrows_circle_a_ring_of_caves() {
        let grid = cave_ring();
        assert_eq!(grid.cell(id(0, 0, 6)).kind(), CellKind::Cave);
        assert_eq!(flight(&grid, id(0, 0, 6), Direction::East, 6), Some(id(0, 0, 6)));
        assert_eq!(flight(&grid, id(0, 0, 6), Direction::East, 7), Some(id(1, 0, 6)));
        assert_eq!(flight(&grid, id(2, 0, 6), Direction::West, 13), Some(id(1, 0, 6)));
    }

    #[test]
    fn huge_distances_resolve_by_skipping_laps() {
        let grid = cave_ring();
        // u32::MAX is 3 more than a multiple of the six-cave lap.
        assert_eq!(
            flight(&grid, id(0, 0, 6), Direction::East, u32::MAX),
            Some(id(3, 0, 6))
        );
        assert_eq!(
            flight(&grid, id(0, 0, 6), Direction::East, u32::MAX - 3),
            Some(id(0, 0, 6))
        );
    }
}
