#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure placement system deciding where the player, monsters, pits and thieves start.
//!
//! The planner only sees cave coordinates and grid dimensions; the world applies
//! the resulting [`PopulationPlan`] to its cells.

use otyugh_core::{CellCoord, ConfigError, RandomSource, MIN_DESTINATION_DISTANCE};

/// Full start/destination selection rounds attempted before giving up.
pub const DESTINATION_ROUNDS: u32 = 5;

/// Grid parameters the planner needs to measure distances and size populations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PopulationConfig {
    columns: u32,
    rows: u32,
    wrapping: bool,
    percent_monsters: u32,
}

impl PopulationConfig {
    /// Creates a planner configuration.
    #[must_use]
    pub const fn new(columns: u32, rows: u32, wrapping: bool, percent_monsters: u32) -> Self {
        Self {
            columns,
            rows,
            wrapping,
            percent_monsters,
        }
    }

    /// Distance between two cells under the grid's metric.
    #[must_use]
    pub fn separation(&self, from: CellCoord, to: CellCoord) -> u32 {
        from.separation(to, self.columns, self.rows, self.wrapping)
    }
}

/// Occupant placement decided for a freshly built dungeon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopulationPlan {
    /// Cave the player enters first.
    pub start: CellCoord,
    /// Cave the player must reach.
    pub destination: CellCoord,
    /// Monster caves; the destination is always first.
    pub monsters: Vec<CellCoord>,
    /// Caves converted into pits.
    pub pits: Vec<CellCoord>,
    /// Caves holding a thief.
    pub thieves: Vec<CellCoord>,
}

/// Chooses start, destination and hazard caves.
///
/// Each round picks a random start and then up to `caves.len()` random
/// destination candidates; after [`DESTINATION_ROUNDS`] fruitless rounds the
/// plan fails with [`ConfigError::DestinationNotFound`].
pub fn plan(
    config: &PopulationConfig,
    caves: &[CellCoord],
    rng: &mut dyn RandomSource,
) -> Result<PopulationPlan, ConfigError> {
    let (start, destination) = select_endpoints(config, caves, rng)?;

    let mut open: Vec<CellCoord> = caves
        .iter()
        .copied()
        .filter(|cave| *cave != start && *cave != destination)
        .collect();

    let mut monsters = vec![destination];
    if config.percent_monsters != 0 {
        let wanted = share(open.len(), config.percent_monsters).saturating_sub(1);
        monsters.extend(draw(&mut open, wanted, rng));
    }

    // Pits and thieves are sized from every cave, monsters from the open ones.
    let hazard_count = share(caves.len(), config.percent_monsters);
    let pits = draw(&mut open, hazard_count, rng);

    let mut thief_caves: Vec<CellCoord> = caves
        .iter()
        .copied()
        .filter(|cave| *cave != start && *cave != destination && !pits.contains(cave))
        .collect();
    let thieves = draw(&mut thief_caves, hazard_count, rng);

    Ok(PopulationPlan {
        start,
        destination,
        monsters,
        pits,
        thieves,
    })
}

fn select_endpoints(
    config: &PopulationConfig,
    caves: &[CellCoord],
    rng: &mut dyn RandomSource,
) -> Result<(CellCoord, CellCoord), ConfigError> {
    if caves.is_empty() {
        return Err(ConfigError::DestinationNotFound { rounds: 0 });
    }

    for _ in 0..DESTINATION_ROUNDS {
        let start = caves[rng.pick_index(caves.len())];
        for _ in 0..caves.len() {
            let candidate = caves[rng.pick_index(caves.len())];
            if config.separation(start, candidate) >= MIN_DESTINATION_DISTANCE {
                return Ok((start, candidate));
            }
        }
    }

    Err(ConfigError::DestinationNotFound {
        rounds: DESTINATION_ROUNDS,
    })
}

fn share(total: usize, percent: u32) -> usize {
    total * percent as usize / 100
}

/// Removes up to `count` random entries from `pool`, never picking one twice.
fn draw(pool: &mut Vec<CellCoord>, count: usize, rng: &mut dyn RandomSource) -> Vec<CellCoord> {
    let mut picked = Vec::with_capacity(count.min(pool.len()));
    for _ in 0..count {
        if pool.is_empty() {
            break;
        }
        picked.push(pool.remove(rng.pick_index(pool.len())));
    }
    picked
}
