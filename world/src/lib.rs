#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative dungeon state for the caves of the Otyugh.
//!
//! [`World`] owns the generated grid, the player, every monster and thief, and
//! the single random source of the game. Adapters mutate it exclusively via
//! [`apply`] and read it exclusively via the [`query`] module.

mod actors;
mod arrow;
mod dungeon;
mod grid;
mod session;
mod smell;

use otyugh_core::{
    CellCoord, CellId, Command, CommandError, ConfigError, DeathCause, Direction, DungeonConfig,
    Event, MonsterId, MonsterStatus, PickupItem, RandomSource, ShotOutcome, ThiefId,
    WELCOME_BANNER,
};
use otyugh_system_population::{PopulationConfig, PopulationPlan};

use crate::{
    actors::{Actor, Monster, Player, Thief},
    dungeon::Dungeon,
};

pub use session::Session;

/// Roll (out of 100) at or below which a wounded monster lets the player pass.
const WOUNDED_MONSTER_MERCY: u32 = 50;

/// Represents the authoritative state of one game.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    dungeon: Dungeon,
    player: Player,
    monsters: Vec<Monster>,
    thieves: Vec<Thief>,
    start: CellId,
    destination: CellId,
    rng: Box<dyn RandomSource>,
}

impl World {
    /// Generates a dungeon, places every actor and moves the player into the start cave.
    ///
    /// Setup events are appended to `out_events`. Any configuration problem is
    /// reported before a world exists.
    pub fn new(
        config: DungeonConfig,
        mut rng: Box<dyn RandomSource>,
        out_events: &mut Vec<Event>,
    ) -> Result<Self, ConfigError> {
        let dungeon = Dungeon::generate(config, rng.as_mut())?;
        let caves: Vec<CellCoord> = dungeon
            .grid
            .caves()
            .into_iter()
            .map(|id| dungeon.grid.cell(id).coord)
            .collect();
        let planner = PopulationConfig::new(
            dungeon.config.columns,
            dungeon.config.rows,
            dungeon.config.wrapping,
            dungeon.config.percent_monsters,
        );
        let plan = otyugh_system_population::plan(&planner, &caves, rng.as_mut())?;
        Ok(Self::populate(dungeon, &plan, rng, out_events))
    }

    fn populate(
        dungeon: Dungeon,
        plan: &PopulationPlan,
        rng: Box<dyn RandomSource>,
        out_events: &mut Vec<Event>,
    ) -> Self {
        let mut dungeon = dungeon;
        let grid = &mut dungeon.grid;
        let start = grid.id_of(plan.start);
        let destination = grid.id_of(plan.destination);

        let monsters: Vec<Monster> = plan
            .monsters
            .iter()
            .zip(1..)
            .map(|(coord, id)| Monster::new(MonsterId::new(id), grid.id_of(*coord)))
            .collect();
        for monster in &monsters {
            grid.cell_mut(monster.cell()).monster = Some(monster.id);
        }

        for coord in &plan.pits {
            let pit = grid.id_of(*coord);
            grid.cell_mut(pit).pit = true;
            let neighbors: Vec<CellId> = grid.cell(pit).passages().map(|(_, cell)| cell).collect();
            for neighbor in neighbors {
                grid.cell_mut(neighbor).near_pit = true;
            }
        }

        let thieves: Vec<Thief> = plan
            .thieves
            .iter()
            .zip(0..)
            .map(|(coord, id)| Thief::new(ThiefId::new(id), grid.id_of(*coord)))
            .collect();
        for thief in &thieves {
            grid.cell_mut(thief.cell()).thief = Some(thief.id);
        }

        {
            let entrance = grid.cell_mut(start);
            entrance.visited = true;
            entrance.occupied = true;
        }
        out_events.push(Event::PlayerEntered { cell: plan.start });

        for monster in &monsters {
            smell::propagate(grid, monster.cell(), 1);
        }

        Self {
            banner: WELCOME_BANNER,
            player: Player::new(start),
            monsters,
            thieves,
            start,
            destination,
            rng,
            dungeon,
        }
    }

    fn coord(&self, cell: CellId) -> CellCoord {
        self.dungeon.grid.cell(cell).coord
    }

    fn monster_index(&self, monster: MonsterId) -> Option<usize> {
        self.monsters.iter().position(|candidate| candidate.id == monster)
    }

    fn thief_index(&self, thief: ThiefId) -> Option<usize> {
        self.thieves.iter().position(|candidate| candidate.id == thief)
    }

    fn ensure_alive(&self) -> Result<(), CommandError> {
        if self.player.is_alive() {
            Ok(())
        } else {
            Err(CommandError::PlayerNotAlive {
                status: self.player.status(),
            })
        }
    }

    fn move_player(&mut self, target: CellId, out_events: &mut Vec<Event>) {
        let from = self.player.cell();
        self.dungeon.grid.cell_mut(from).occupied = false;
        self.player.relocate(target);
        {
            let cell = self.dungeon.grid.cell_mut(target);
            cell.visited = true;
            cell.occupied = true;
        }
        out_events.push(Event::PlayerMoved {
            from: self.coord(from),
            to: self.coord(target),
        });
        self.resolve_arrival(target, out_events);
    }

    /// Applies the hazards of `cell` in order: monster, pit, thief, destination.
    fn resolve_arrival(&mut self, cell_id: CellId, out_events: &mut Vec<Event>) {
        let coord = self.coord(cell_id);
        let (monster, pit, thief) = {
            let cell = self.dungeon.grid.cell(cell_id);
            (cell.monster, cell.pit, cell.thief)
        };

        if let Some(index) = monster.and_then(|id| self.monster_index(id)) {
            let monster = self.monsters[index].id;
            match self.monsters[index].status() {
                MonsterStatus::Alive => self.kill_player(coord, DeathCause::Monster, out_events),
                MonsterStatus::Wounded => {
                    if self.rng.int_in_range(1, 100) <= WOUNDED_MONSTER_MERCY {
                        out_events.push(Event::WoundedMonsterEvaded {
                            monster,
                            cell: coord,
                        });
                    } else {
                        self.kill_player(coord, DeathCause::Monster, out_events);
                    }
                }
                MonsterStatus::Dead => {}
            }
        }

        if pit {
            self.kill_player(coord, DeathCause::Pit, out_events);
        }

        if let Some(index) = thief.and_then(|id| self.thief_index(id)) {
            let hoard = self.player.surrender_treasure();
            let thief = &mut self.thieves[index];
            thief.steal(hoard);
            out_events.push(Event::TreasureStolen {
                thief: thief.id,
                cell: coord,
                hoard,
            });
        }

        if cell_id == self.destination && self.player.is_alive() {
            self.player.win();
            out_events.push(Event::PlayerWon { cell: coord });
        }
    }

    fn kill_player(&mut self, cell: CellCoord, cause: DeathCause, out_events: &mut Vec<Event>) {
        if self.player.is_alive() {
            self.player.die();
            out_events.push(Event::PlayerKilled { cell, cause });
        }
    }

    fn shoot(&mut self, direction: Direction, distance: u32, out_events: &mut Vec<Event>) {
        self.player.spend_arrow();
        let arrows_remaining = self.player.arrows();
        if !self.player.is_alive() {
            out_events.push(Event::ArrowLoosed {
                direction,
                distance,
                outcome: ShotOutcome::Silent { arrows_remaining },
            });
            return;
        }

        let target = arrow::flight(&self.dungeon.grid, self.player.cell(), direction, distance)
            .and_then(|cell| self.dungeon.grid.cell(cell).monster)
            .and_then(|monster| self.monster_index(monster))
            .filter(|index| self.monsters[*index].status().is_living());

        let Some(index) = target else {
            out_events.push(Event::ArrowLoosed {
                direction,
                distance,
                outcome: ShotOutcome::Missed { arrows_remaining },
            });
            return;
        };

        let monster = &mut self.monsters[index];
        let status = monster.take_hit();
        let (monster_id, monster_cell) = (monster.id, monster.cell());
        out_events.push(Event::ArrowLoosed {
            direction,
            distance,
            outcome: ShotOutcome::Struck {
                status,
                arrows_remaining,
            },
        });

        let cell = self.coord(monster_cell);
        if status == MonsterStatus::Dead {
            smell::propagate(&mut self.dungeon.grid, monster_cell, -1);
            out_events.push(Event::MonsterKilled {
                monster: monster_id,
                cell,
            });
        } else {
            out_events.push(Event::MonsterWounded {
                monster: monster_id,
                cell,
            });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Movement while the game is over is a silent no-op. Every rejected command
/// leaves the world untouched.
pub fn apply(
    world: &mut World,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), CommandError> {
    match command {
        Command::MovePlayer { direction } => {
            if !world.player.is_alive() {
                return Ok(());
            }
            let target = world
                .dungeon
                .grid
                .cell(world.player.cell())
                .neighbor(direction)
                .ok_or(CommandError::IllegalMove { direction })?;
            world.move_player(target, out_events);
        }
        Command::MovePlayerTo { cell } => {
            let target = world
                .dungeon
                .grid
                .id_at(cell)
                .ok_or(CommandError::OutOfBounds { cell })?;
            if !world.player.is_alive() {
                return Ok(());
            }
            let connected = world
                .dungeon
                .grid
                .cell(world.player.cell())
                .passages()
                .any(|(_, neighbor)| neighbor == target);
            if !connected {
                return Err(CommandError::NotAdjacent { cell });
            }
            world.move_player(target, out_events);
        }
        Command::ShootArrow {
            direction,
            distance,
        } => {
            if distance == 0 {
                return Err(CommandError::InvalidDistance);
            }
            if world.player.arrows() == 0 {
                return Err(CommandError::NoArrows);
            }
            world.shoot(direction, distance, out_events);
        }
        Command::PickTreasure { kind } => {
            world.ensure_alive()?;
            let cell = world.dungeon.grid.cell_mut(world.player.cell());
            let amount = cell.treasure.take(kind);
            if amount == 0 {
                return Err(CommandError::NothingToPick {
                    item: PickupItem::Treasure(kind),
                });
            }
            world.player.collect_treasure(kind, amount);
            out_events.push(Event::TreasurePicked { kind, amount });
        }
        Command::PickArrows => {
            world.ensure_alive()?;
            let cell = world.dungeon.grid.cell_mut(world.player.cell());
            let amount = std::mem::take(&mut cell.arrows);
            if amount == 0 {
                return Err(CommandError::NothingToPick {
                    item: PickupItem::Arrows,
                });
            }
            world.player.collect_arrows(amount);
            out_events.push(Event::ArrowsPicked { amount });
        }
    }
    Ok(())
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use otyugh_core::{
        CellCoord, CellId, CellSnapshot, DungeonConfig, GridSnapshot, LocationDescription,
        MonsterSnapshot, PlayerStatus, ThiefSnapshot, TreasureHoard,
    };

    use super::{Actor, Monster, Thief, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Parameters the dungeon was generated from.
    #[must_use]
    pub fn config(world: &World) -> DungeonConfig {
        world.dungeon.config
    }

    /// Number of grid rows.
    #[must_use]
    pub fn rows(world: &World) -> u32 {
        world.dungeon.grid.rows()
    }

    /// Number of grid columns.
    #[must_use]
    pub fn columns(world: &World) -> u32 {
        world.dungeon.grid.columns()
    }

    /// Whether opposite grid boundaries are adjacent.
    #[must_use]
    pub fn wrapping(world: &World) -> bool {
        world.dungeon.grid.wrapping()
    }

    /// Extra passages beyond the spanning tree.
    #[must_use]
    pub fn interconnectivity(world: &World) -> u32 {
        world.dungeon.config.interconnectivity
    }

    /// Percentage of caves stocked with treasure.
    #[must_use]
    pub fn percent_treasure(world: &World) -> u32 {
        world.dungeon.config.percent_treasure
    }

    /// Percentage of caves receiving monsters, pits and thieves.
    #[must_use]
    pub fn percent_monsters(world: &World) -> u32 {
        world.dungeon.config.percent_monsters
    }

    /// Deep copy of every cell; mutating it never affects the world.
    #[must_use]
    pub fn grid(world: &World) -> GridSnapshot {
        GridSnapshot {
            rows: rows(world),
            columns: columns(world),
            wrapping: wrapping(world),
            cells: world
                .dungeon
                .grid
                .iter()
                .map(|cell| snapshot(world, cell.id))
                .collect(),
        }
    }

    /// Copy of the cell at `coord`, if it lies within the grid.
    #[must_use]
    pub fn cell(world: &World, coord: CellCoord) -> Option<CellSnapshot> {
        world
            .dungeon
            .grid
            .id_at(coord)
            .map(|id| snapshot(world, id))
    }

    /// Copy of the cell the player stands in.
    #[must_use]
    pub fn player_cell(world: &World) -> CellSnapshot {
        snapshot(world, world.player.cell())
    }

    /// Coordinate of the player.
    #[must_use]
    pub fn player_position(world: &World) -> CellCoord {
        world.coord(world.player.cell())
    }

    /// Display name of the player.
    #[must_use]
    pub fn player_name(world: &World) -> &str {
        world.player.name()
    }

    /// Lifecycle state of the player.
    #[must_use]
    pub fn player_status(world: &World) -> PlayerStatus {
        world.player.status()
    }

    /// Treasure the player carries.
    #[must_use]
    pub fn treasure_collected(world: &World) -> TreasureHoard {
        world.player.treasure()
    }

    /// Treasure taken by every thief combined.
    #[must_use]
    pub fn treasure_stolen(world: &World) -> TreasureHoard {
        world
            .thieves
            .iter()
            .fold(TreasureHoard::default(), |mut total, thief| {
                total.absorb(thief.stolen());
                total
            })
    }

    /// Arrows in the player's quiver.
    #[must_use]
    pub fn arrows(world: &World) -> u32 {
        world.player.arrows()
    }

    /// Whether the player has died or won.
    #[must_use]
    pub fn is_game_over(world: &World) -> bool {
        world.player.status() != PlayerStatus::Alive
    }

    /// Cave the player started in.
    #[must_use]
    pub fn start(world: &World) -> CellCoord {
        world.coord(world.start)
    }

    /// Cave the player must reach.
    #[must_use]
    pub fn destination(world: &World) -> CellCoord {
        world.coord(world.destination)
    }

    /// Structured description of the player's current cell.
    #[must_use]
    pub fn describe_location(world: &World) -> LocationDescription {
        LocationDescription::of(&player_cell(world))
    }

    /// Every monster in identifier order, dead ones included.
    #[must_use]
    pub fn monsters(world: &World) -> Vec<MonsterSnapshot> {
        world
            .monsters
            .iter()
            .map(|monster| monster_snapshot(world, monster))
            .collect()
    }

    /// Every thief in identifier order.
    #[must_use]
    pub fn thieves(world: &World) -> Vec<ThiefSnapshot> {
        world
            .thieves
            .iter()
            .map(|thief| thief_snapshot(world, thief))
            .collect()
    }

    /// Number of passages on the shortest walk between two cells.
    #[must_use]
    pub fn passage_distance(world: &World, from: CellCoord, to: CellCoord) -> Option<u32> {
        let grid = &world.dungeon.grid;
        let origin = grid.id_at(from)?;
        let target = grid.id_at(to)?;
        grid.passage_distances(origin)
            .get(target.get() as usize)
            .copied()
            .flatten()
    }

    fn snapshot(world: &World, id: CellId) -> CellSnapshot {
        let grid = &world.dungeon.grid;
        let cell = grid.cell(id);
        CellSnapshot {
            id,
            coord: cell.coord,
            kind: cell.kind(),
            neighbors: cell
                .passages()
                .map(|(direction, neighbor)| (direction, grid.cell(neighbor).coord))
                .collect(),
            treasure: cell.treasure,
            arrows: cell.arrows,
            monster: cell
                .monster
                .and_then(|monster| world.monster_index(monster))
                .map(|index| monster_snapshot(world, &world.monsters[index])),
            thief: cell
                .thief
                .and_then(|thief| world.thief_index(thief))
                .map(|index| thief_snapshot(world, &world.thieves[index])),
            visited: cell.visited,
            occupied: cell.occupied,
            smell: cell.smell(),
            smell_units: cell.smell_units,
            near_pit: cell.near_pit,
        }
    }

    fn monster_snapshot(world: &World, monster: &Monster) -> MonsterSnapshot {
        MonsterSnapshot {
            id: monster.id,
            name: monster.name().to_owned(),
            cell: world.coord(monster.cell()),
            hits: monster.hits(),
            status: monster.status(),
        }
    }

    fn thief_snapshot(world: &World, thief: &Thief) -> ThiefSnapshot {
        ThiefSnapshot {
            id: thief.id,
            name: thief.name().to_owned(),
            cell: world.coord(thief.cell()),
            stolen: thief.stolen(),
        }
    }
}

/// Helpers that assemble hand-made worlds for tests and tooling.
#[cfg(any(test, feature = "scaffolding"))]
pub mod scaffolding {
    use otyugh_core::{
        CellCoord, CommandError, ConfigError, DungeonConfig, Event, RandomSource, TreasureHoard,
    };
    use otyugh_system_builder::Layout;
    use otyugh_system_population::PopulationPlan;

    use super::{Dungeon, World};

    /// Builds a world from an explicit layout and placement plan, stocking nothing.
    ///
    /// Percentages are taken from `config`; dimensions come from `layout`.
    pub fn assemble(
        config: DungeonConfig,
        layout: &Layout,
        plan: &PopulationPlan,
        rng: Box<dyn RandomSource>,
        out_events: &mut Vec<Event>,
    ) -> Result<World, ConfigError> {
        let placements = [plan.start, plan.destination]
            .into_iter()
            .chain(plan.monsters.iter().copied())
            .chain(plan.pits.iter().copied())
            .chain(plan.thieves.iter().copied());
        for cell in placements {
            if layout.id_of(cell).is_none() {
                return Err(ConfigError::PlacementOutOfBounds { cell });
            }
        }

        let dungeon = Dungeon::from_layout(config, layout);
        Ok(World::populate(dungeon, plan, rng, out_events))
    }

    /// Places treasure and arrows into a cell, replacing what it held.
    pub fn stock(
        world: &mut World,
        cell: CellCoord,
        treasure: TreasureHoard,
        arrows: u32,
    ) -> Result<(), CommandError> {
        let id = world
            .dungeon
            .grid
            .id_at(cell)
            .ok_or(CommandError::OutOfBounds { cell })?;
        let target = world.dungeon.grid.cell_mut(id);
        target.treasure = treasure;
        target.arrows = arrows;
        Ok(())
    }
}
