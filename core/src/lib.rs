#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Otyugh dungeon engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired player actions, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values describing
//! every state transition that followed. Read-only snapshots such as
//! [`CellSnapshot`] and [`LocationDescription`] are the only way state leaves
//! the world.

mod config;
mod error;
mod random;
mod snapshot;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use config::DungeonConfig;
pub use error::{CommandError, ConfigError};
pub use random::{EntropyRandom, RandomSource, SeededRandom};
pub use snapshot::{
    CellSnapshot, GridSnapshot, LocationDescription, MonsterSnapshot, ThiefSnapshot,
};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to the caves of the Otyugh.";

/// Minimum separation between the start cave and the destination cave.
pub const MIN_DESTINATION_DISTANCE: u32 = 5;

/// Number of arrows the player carries into the dungeon.
pub const STARTING_ARROWS: u32 = 3;

/// Largest quantity of a single resource stocked into a cell by one placement.
pub const MAX_STOCK_PER_PLACEMENT: u32 = 5;

/// Cardinal directions used for entrances, movement and arrow flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing row indices.
    North,
    /// Toward increasing row indices.
    South,
    /// Toward increasing column indices.
    East,
    /// Toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in the canonical north, south, east, west order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Stable index of the direction inside [`Direction::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
        }
    }

    /// Lowercase name used by text front-ends.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dense identifier of a cell, assigned in row-major order during generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(u32);

impl CellId {
    /// Creates a new cell identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Front-ends address cells as `(x, y)` where `x` is the column and `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Computes the distance on a torus of the given size.
    ///
    /// Each axis takes the shorter of the direct and the wrap-around offset,
    /// and the two offsets are combined as the ceiling of their Euclidean norm.
    #[must_use]
    pub fn wrapped_distance(self, other: CellCoord, columns: u32, rows: u32) -> u32 {
        let column_offset = shortest_offset(self.column(), other.column(), columns);
        let row_offset = shortest_offset(self.row(), other.row(), rows);
        let squared = u64::from(column_offset).pow(2) + u64::from(row_offset).pow(2);
        ceil_sqrt(squared)
    }

    /// Distance metric used for destination selection.
    ///
    /// Non-wrapping grids use the Manhattan distance; wrapping grids use
    /// [`CellCoord::wrapped_distance`].
    #[must_use]
    pub fn separation(self, other: CellCoord, columns: u32, rows: u32, wrapping: bool) -> u32 {
        if wrapping {
            self.wrapped_distance(other, columns, rows)
        } else {
            self.manhattan_distance(other)
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.column, self.row)
    }
}

fn shortest_offset(first: u32, second: u32, extent: u32) -> u32 {
    let direct = first.abs_diff(second);
    direct.min(extent.saturating_sub(direct))
}

fn ceil_sqrt(value: u64) -> u32 {
    let mut root = (value as f64).sqrt() as u64;
    while root * root < value {
        root += 1;
    }
    while root > 0 && (root - 1) * (root - 1) >= value {
        root -= 1;
    }
    u32::try_from(root).unwrap_or(u32::MAX)
}

/// Classification of a cell derived from its entrances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Cell with one, three or four entrances.
    Cave,
    /// Cell with exactly two entrances; a passage that redirects arrows.
    Tunnel,
    /// Cave converted into a bottomless pit after generation.
    Pit,
}

impl CellKind {
    /// Derives the generated kind of a cell from its open entrance count.
    #[must_use]
    pub const fn from_entrance_count(count: usize) -> Self {
        if count == 2 {
            Self::Tunnel
        } else {
            Self::Cave
        }
    }

    /// Lowercase name used by text front-ends.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cave => "cave",
            Self::Tunnel => "tunnel",
            Self::Pit => "pit",
        }
    }
}

/// Odor level carried by cells near living monsters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Smell {
    /// No monster within two cells.
    None,
    /// At least one unit of monster odor has accumulated.
    Pungent,
}

impl Smell {
    /// Derives the level from accumulated smell units.
    #[must_use]
    pub const fn from_units(units: i32) -> Self {
        if units >= 1 {
            Self::Pungent
        } else {
            Self::None
        }
    }
}

/// Kinds of treasure stocked into caves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TreasureKind {
    /// Diamonds.
    Diamonds,
    /// Rubies.
    Rubies,
    /// Sapphires.
    Sapphires,
}

impl TreasureKind {
    /// Every treasure kind in canonical order.
    pub const ALL: [TreasureKind; 3] = [
        TreasureKind::Diamonds,
        TreasureKind::Rubies,
        TreasureKind::Sapphires,
    ];

    /// Lowercase plural name used by text front-ends.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Diamonds => "diamonds",
            Self::Rubies => "rubies",
            Self::Sapphires => "sapphires",
        }
    }
}

impl fmt::Display for TreasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-kind treasure counters held by cells, the player and thieves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreasureHoard {
    diamonds: u32,
    rubies: u32,
    sapphires: u32,
}

impl TreasureHoard {
    /// Creates a hoard with explicit quantities.
    #[must_use]
    pub const fn new(diamonds: u32, rubies: u32, sapphires: u32) -> Self {
        Self {
            diamonds,
            rubies,
            sapphires,
        }
    }

    /// Quantity of the provided kind.
    #[must_use]
    pub const fn get(&self, kind: TreasureKind) -> u32 {
        match kind {
            TreasureKind::Diamonds => self.diamonds,
            TreasureKind::Rubies => self.rubies,
            TreasureKind::Sapphires => self.sapphires,
        }
    }

    /// Adds the quantity to the provided kind, saturating at `u32::MAX`.
    pub fn add(&mut self, kind: TreasureKind, amount: u32) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(amount);
    }

    /// Removes and returns the whole quantity of the provided kind.
    pub fn take(&mut self, kind: TreasureKind) -> u32 {
        std::mem::take(self.slot_mut(kind))
    }

    /// Removes and returns every counter, leaving the hoard empty.
    pub fn take_all(&mut self) -> TreasureHoard {
        std::mem::take(self)
    }

    /// Adds every counter of `other` into this hoard.
    pub fn absorb(&mut self, other: TreasureHoard) {
        for kind in TreasureKind::ALL {
            self.add(kind, other.get(kind));
        }
    }

    /// Reports whether every counter is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.diamonds == 0 && self.rubies == 0 && self.sapphires == 0
    }

    /// Sum of all counters.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.diamonds
            .saturating_add(self.rubies)
            .saturating_add(self.sapphires)
    }

    fn slot_mut(&mut self, kind: TreasureKind) -> &mut u32 {
        match kind {
            TreasureKind::Diamonds => &mut self.diamonds,
            TreasureKind::Rubies => &mut self.rubies,
            TreasureKind::Sapphires => &mut self.sapphires,
        }
    }
}

/// Lifecycle of the player. `Dead` and `Won` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// Exploring the dungeon.
    Alive,
    /// Eaten by a monster or fallen into a pit.
    Dead,
    /// Reached the destination alive.
    Won,
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Alive => "alive",
            Self::Dead => "dead",
            Self::Won => "victorious",
        };
        f.write_str(label)
    }
}

/// Lifecycle of a monster, strictly monotonic in the number of arrow hits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterStatus {
    /// Untouched.
    Alive,
    /// Hit once; eats the player only half of the time.
    Wounded,
    /// Hit twice or more.
    Dead,
}

impl MonsterStatus {
    /// Derives the status from the number of hits taken.
    #[must_use]
    pub const fn from_hits(hits: u32) -> Self {
        match hits {
            0 => Self::Alive,
            1 => Self::Wounded,
            _ => Self::Dead,
        }
    }

    /// Reports whether the monster can still be hit or eat the player.
    #[must_use]
    pub const fn is_living(self) -> bool {
        !matches!(self, Self::Dead)
    }
}

/// Unique identifier assigned to a monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterId(u32);

impl MonsterId {
    /// Creates a new monster identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a thief.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ThiefId(u32);

impl ThiefId {
    /// Creates a new thief identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// What killed the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    /// Eaten by a living or wounded monster.
    Monster,
    /// Fell into a pit.
    Pit,
}

/// Resource the player may try to pick up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupItem {
    /// A treasure kind.
    Treasure(TreasureKind),
    /// The arrows lying in the cell.
    Arrows,
}

impl fmt::Display for PickupItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Treasure(kind) => kind.fmt(f),
            Self::Arrows => f.write_str("arrows"),
        }
    }
}

/// Commands that express all permissible player actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Moves the player through the entrance facing the provided direction.
    MovePlayer {
        /// Entrance the player walks through.
        direction: Direction,
    },
    /// Moves the player into an adjacent, connected cell.
    MovePlayerTo {
        /// Cell the player walks into.
        cell: CellCoord,
    },
    /// Shoots a single arrow.
    ShootArrow {
        /// Entrance the arrow leaves through.
        direction: Direction,
        /// Number of caves the arrow travels before landing.
        distance: u32,
    },
    /// Picks up every unit of a treasure kind lying in the player's cell.
    PickTreasure {
        /// Treasure kind to collect.
        kind: TreasureKind,
    },
    /// Picks up every arrow lying in the player's cell.
    PickArrows,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// The player was placed into the start cave.
    PlayerEntered {
        /// Start cave.
        cell: CellCoord,
    },
    /// The player walked between two connected cells.
    PlayerMoved {
        /// Cell the player left.
        from: CellCoord,
        /// Cell the player entered.
        to: CellCoord,
    },
    /// A wounded monster let the player pass.
    WoundedMonsterEvaded {
        /// Monster sharing the cell with the player.
        monster: MonsterId,
        /// Cell holding the monster.
        cell: CellCoord,
    },
    /// The player died.
    PlayerKilled {
        /// Cell where the player died.
        cell: CellCoord,
        /// What killed the player.
        cause: DeathCause,
    },
    /// A thief took every treasure the player carried.
    TreasureStolen {
        /// Thief that took the treasure.
        thief: ThiefId,
        /// Cell holding the thief.
        cell: CellCoord,
        /// Treasure transferred to the thief.
        hoard: TreasureHoard,
    },
    /// The player reached the destination alive.
    PlayerWon {
        /// Destination cave.
        cell: CellCoord,
    },
    /// Treasure moved from the player's cell into the player's inventory.
    TreasurePicked {
        /// Treasure kind collected.
        kind: TreasureKind,
        /// Quantity collected.
        amount: u32,
    },
    /// Arrows moved from the player's cell into the player's quiver.
    ArrowsPicked {
        /// Quantity collected.
        amount: u32,
    },
    /// An arrow left the player's bow.
    ArrowLoosed {
        /// Entrance the arrow left through.
        direction: Direction,
        /// Requested travel distance in caves.
        distance: u32,
        /// Result of the shot.
        outcome: ShotOutcome,
    },
    /// An arrow wounded a monster.
    MonsterWounded {
        /// Monster that was hit.
        monster: MonsterId,
        /// Cell holding the monster.
        cell: CellCoord,
    },
    /// An arrow killed a monster.
    MonsterKilled {
        /// Monster that died.
        monster: MonsterId,
        /// Cell holding the carcass.
        cell: CellCoord,
    },
}

/// Result of a single shot; its [`fmt::Display`] form is the text report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotOutcome {
    /// The player was no longer alive; nothing is reported.
    Silent {
        /// Arrows left after the shot.
        arrows_remaining: u32,
    },
    /// The arrow landed without hitting a living monster.
    Missed {
        /// Arrows left after the shot.
        arrows_remaining: u32,
    },
    /// The arrow hit a living monster.
    Struck {
        /// Status of the monster after the hit.
        status: MonsterStatus,
        /// Arrows left after the shot.
        arrows_remaining: u32,
    },
}

impl ShotOutcome {
    /// Arrows left in the player's quiver after the shot.
    #[must_use]
    pub const fn arrows_remaining(&self) -> u32 {
        match self {
            Self::Silent { arrows_remaining }
            | Self::Missed { arrows_remaining }
            | Self::Struck {
                arrows_remaining, ..
            } => *arrows_remaining,
        }
    }

    /// Reports whether the shot hit a monster.
    #[must_use]
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Struck { .. })
    }
}

impl fmt::Display for ShotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Self::Silent { .. } = self {
            return Ok(());
        }

        f.write_str("You shoot an arrow into the darkness")?;
        if let Self::Struck { status, .. } = self {
            f.write_str("\nYou hear a great howl in the distance.")?;
            if *status == MonsterStatus::Dead {
                f.write_str("\nYou killed a monster nearby.")?;
            }
        }
        if self.arrows_remaining() == 0 {
            f.write_str("\nYou are out of arrows, explore more to find more")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn wrapped_distance_takes_shorter_way_around() {
        let origin = CellCoord::new(0, 0);
        let far_corner = CellCoord::new(7, 5);
        // Offsets wrap to 1 column and 1 row on an 8x6 torus.
        assert_eq!(origin.wrapped_distance(far_corner, 8, 6), 2);
    }

    #[test]
    fn wrapped_distance_rounds_up() {
        let origin = CellCoord::new(0, 0);
        let target = CellCoord::new(4, 3);
        assert_eq!(origin.wrapped_distance(target, 10, 10), 5);
        let target = CellCoord::new(4, 2);
        // sqrt(20) is roughly 4.47.
        assert_eq!(origin.wrapped_distance(target, 10, 10), 5);
        let target = CellCoord::new(3, 3);
        // sqrt(18) is roughly 4.24.
        assert_eq!(origin.wrapped_distance(target, 10, 10), 5);
        let target = CellCoord::new(4, 0);
        assert_eq!(origin.wrapped_distance(target, 10, 10), 4);
    }

    #[test]
    fn separation_switches_metric_with_wrapping() {
        let origin = CellCoord::new(0, 0);
        let target = CellCoord::new(5, 0);
        assert_eq!(origin.separation(target, 6, 6, false), 5);
        assert_eq!(origin.separation(target, 6, 6, true), 1);
    }

    #[test]
    fn directions_reverse_pairwise() {
        for direction in Direction::ALL {
            assert_eq!(direction.reverse().reverse(), direction);
            assert_ne!(direction.reverse(), direction);
            assert_eq!(Direction::ALL[direction.index()], direction);
        }
    }

    #[test]
    fn cell_kind_follows_entrance_count() {
        assert_eq!(CellKind::from_entrance_count(1), CellKind::Cave);
        assert_eq!(CellKind::from_entrance_count(2), CellKind::Tunnel);
        assert_eq!(CellKind::from_entrance_count(3), CellKind::Cave);
        assert_eq!(CellKind::from_entrance_count(4), CellKind::Cave);
    }

    #[test]
    fn monster_status_is_derived_from_hits() {
        assert_eq!(MonsterStatus::from_hits(0), MonsterStatus::Alive);
        assert_eq!(MonsterStatus::from_hits(1), MonsterStatus::Wounded);
        assert_eq!(MonsterStatus::from_hits(2), MonsterStatus::Dead);
        assert_eq!(MonsterStatus::from_hits(9), MonsterStatus::Dead);
        assert!(MonsterStatus::Wounded.is_living());
        assert!(!MonsterStatus::Dead.is_living());
    }

    #[test]
    fn smell_turns_pungent_from_one_unit() {
        assert_eq!(Smell::from_units(0), Smell::None);
        assert_eq!(Smell::from_units(-1), Smell::None);
        assert_eq!(Smell::from_units(1), Smell::Pungent);
        assert_eq!(Smell::from_units(4), Smell::Pungent);
    }

    #[test]
    fn hoard_take_empties_only_requested_kind() {
        let mut hoard = TreasureHoard::new(2, 3, 4);
        assert_eq!(hoard.take(TreasureKind::Rubies), 3);
        assert_eq!(hoard.get(TreasureKind::Rubies), 0);
        assert_eq!(hoard.get(TreasureKind::Diamonds), 2);
        assert_eq!(hoard.total(), 6);

        let drained = hoard.take_all();
        assert!(hoard.is_empty());
        assert_eq!(drained, TreasureHoard::new(2, 0, 4));
    }

    #[test]
    fn hoard_absorb_adds_each_kind() {
        let mut hoard = TreasureHoard::new(1, 1, 1);
        hoard.absorb(TreasureHoard::new(2, 0, 5));
        assert_eq!(hoard, TreasureHoard::new(3, 1, 6));
    }

    #[test]
    fn shot_report_mentions_howl_kill_and_empty_quiver() {
        let outcome = ShotOutcome::Struck {
            status: MonsterStatus::Dead,
            arrows_remaining: 0,
        };
        assert_eq!(
            outcome.to_string(),
            "You shoot an arrow into the darkness\n\
             You hear a great howl in the distance.\n\
             You killed a monster nearby.\n\
             You are out of arrows, explore more to find more"
        );
    }

    #[test]
    fn shot_report_for_wound_has_no_kill_line() {
        let outcome = ShotOutcome::Struck {
            status: MonsterStatus::Wounded,
            arrows_remaining: 2,
        };
        let report = outcome.to_string();
        assert!(report.contains("howl"));
        assert!(!report.contains("killed"));
        assert!(!report.contains("out of arrows"));
    }

    #[test]
    fn silent_shot_reports_nothing() {
        let outcome = ShotOutcome::Silent {
            arrows_remaining: 1,
        };
        assert!(outcome.to_string().is_empty());
        assert_eq!(outcome.arrows_remaining(), 1);
    }

    #[test]
    fn command_round_trips_through_bincode() {
        let command = Command::ShootArrow {
            direction: Direction::West,
            distance: 3,
        };
        let bytes = bincode::serialize(&command).expect("serialize");
        let restored: Command = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, command);
    }
}
