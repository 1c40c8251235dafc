use serde::{Deserialize, Serialize};

/// Parameters describing a dungeon before it is generated.
///
/// Validation happens when the topology builder is constructed; an invalid
/// configuration never produces a partially built world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    /// Number of grid rows.
    pub rows: u32,
    /// Number of grid columns.
    pub columns: u32,
    /// Extra passages reintroduced after the spanning tree is complete.
    pub interconnectivity: u32,
    /// Whether opposite grid boundaries are adjacent.
    pub wrapping: bool,
    /// Percentage of caves stocked with treasure, and of cells stocked with arrows.
    pub percent_treasure: u32,
    /// Percentage of caves that receive monsters, pits and thieves.
    pub percent_monsters: u32,
}

impl DungeonConfig {
    /// Percentage of cells stocked with arrows; always equal to the treasure percentage.
    #[must_use]
    pub const fn percent_arrows(&self) -> u32 {
        self.percent_treasure
    }
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            columns: 6,
            interconnectivity: 2,
            wrapping: false,
            percent_treasure: 20,
            percent_monsters: 20,
        }
    }
}
