//! Generated cave system before any actor is placed.

use otyugh_core::{
    CellId, ConfigError, DungeonConfig, RandomSource, TreasureHoard, TreasureKind,
    MAX_STOCK_PER_PLACEMENT,
};
use otyugh_system_builder::{Layout, TopologyBuilder};

use crate::grid::Grid;

/// Cell grid plus the parameters it was generated from.
#[derive(Clone, Debug)]
pub(crate) struct Dungeon {
    pub(crate) config: DungeonConfig,
    pub(crate) grid: Grid,
}

impl Dungeon {
    /// Builds the passages and stocks treasure and arrows.
    pub(crate) fn generate(
        config: DungeonConfig,
        rng: &mut dyn RandomSource,
    ) -> Result<Self, ConfigError> {
        let builder = TopologyBuilder::new(config)?;
        let layout = builder.build(rng);
        let mut dungeon = Self::from_layout(config, &layout);
        dungeon.stock_treasure(rng);
        dungeon.stock_arrows(rng);
        Ok(dungeon)
    }

    /// Wraps an existing layout without stocking anything.
    pub(crate) fn from_layout(config: DungeonConfig, layout: &Layout) -> Self {
        Self {
            config: DungeonConfig {
                rows: layout.rows(),
                columns: layout.columns(),
                wrapping: layout.wrapping(),
                interconnectivity: layout.interconnectivity(),
                ..config
            },
            grid: Grid::from_layout(layout),
        }
    }

    /// Gives a share of the caves between one and five units of every treasure kind.
    fn stock_treasure(&mut self, rng: &mut dyn RandomSource) {
        let mut caves = self.grid.caves();
        let count = caves.len() * self.config.percent_treasure as usize / 100;
        for cell in pick_distinct(&mut caves, count, rng) {
            let mut hoard = TreasureHoard::default();
            for kind in TreasureKind::ALL {
                hoard.add(kind, rng.int_in_range(1, MAX_STOCK_PER_PLACEMENT));
            }
            self.grid.cell_mut(cell).treasure = hoard;
        }
    }

    /// Gives a share of all cells, tunnels included, between one and five arrows.
    fn stock_arrows(&mut self, rng: &mut dyn RandomSource) {
        let mut cells: Vec<CellId> = self.grid.iter().map(|cell| cell.id).collect();
        let count = cells.len() * self.config.percent_arrows() as usize / 100;
        for cell in pick_distinct(&mut cells, count, rng) {
            self.grid.cell_mut(cell).arrows = rng.int_in_range(1, MAX_STOCK_PER_PLACEMENT);
        }
    }
}

fn pick_distinct(pool: &mut Vec<CellId>, count: usize, rng: &mut dyn RandomSource) -> Vec<CellId> {
    let mut picked = Vec::with_capacity(count.min(pool.len()));
    while picked.len() < count && !pool.is_empty() {
        picked.push(pool.remove(rng.pick_index(pool.len())));
    }
    picked
}
