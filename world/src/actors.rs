//! Player, monster and thief records tracked by the world.

use otyugh_core::{
    CellId, MonsterId, MonsterStatus, PlayerStatus, ThiefId, TreasureHoard, TreasureKind,
    STARTING_ARROWS,
};

pub(crate) const PLAYER_NAME: &str = "Player";
pub(crate) const MONSTER_NAME: &str = "Otyugh";
pub(crate) const THIEF_NAME: &str = "Thief";

/// Capabilities shared by every positioned actor.
pub(crate) trait Actor {
    /// Lifecycle type reported by the actor.
    type Status;

    fn name(&self) -> &str;

    fn cell(&self) -> CellId;

    fn relocate(&mut self, cell: CellId);

    fn status(&self) -> Self::Status;
}

#[derive(Clone, Debug)]
pub(crate) struct Player {
    cell: CellId,
    status: PlayerStatus,
    treasure: TreasureHoard,
    arrows: u32,
}

impl Player {
    pub(crate) fn new(cell: CellId) -> Self {
        Self {
            cell,
            status: PlayerStatus::Alive,
            treasure: TreasureHoard::default(),
            arrows: STARTING_ARROWS,
        }
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.status == PlayerStatus::Alive
    }

    pub(crate) fn die(&mut self) {
        if self.is_alive() {
            self.status = PlayerStatus::Dead;
        }
    }

    pub(crate) fn win(&mut self) {
        if self.is_alive() {
            self.status = PlayerStatus::Won;
        }
    }

    pub(crate) const fn treasure(&self) -> TreasureHoard {
        self.treasure
    }

    pub(crate) fn collect_treasure(&mut self, kind: TreasureKind, amount: u32) {
        self.treasure.add(kind, amount);
    }

    /// Hands over the whole inventory, leaving the player empty-handed.
    pub(crate) fn surrender_treasure(&mut self) -> TreasureHoard {
        self.treasure.take_all()
    }

    pub(crate) const fn arrows(&self) -> u32 {
        self.arrows
    }

    pub(crate) fn collect_arrows(&mut self, amount: u32) {
        self.arrows = self.arrows.saturating_add(amount);
    }

    pub(crate) fn spend_arrow(&mut self) {
        self.arrows = self.arrows.saturating_sub(1);
    }
}

impl Actor for Player {
    type Status = PlayerStatus;

    fn name(&self) -> &str {
        PLAYER_NAME
    }

    fn cell(&self) -> CellId {
        self.cell
    }

    fn relocate(&mut self, cell: CellId) {
        self.cell = cell;
    }

    fn status(&self) -> PlayerStatus {
        self.status
    }
}

/// Monster whose status is a pure function of the hits it has taken.
#[derive(Clone, Debug)]
pub(crate) struct Monster {
    pub(crate) id: MonsterId,
    cell: CellId,
    hits: u32,
}

impl Monster {
    pub(crate) const fn new(id: MonsterId, cell: CellId) -> Self {
        Self { id, cell, hits: 0 }
    }

    pub(crate) const fn hits(&self) -> u32 {
        self.hits
    }

    /// Registers an arrow hit and reports the resulting status.
    pub(crate) fn take_hit(&mut self) -> MonsterStatus {
        self.hits = self.hits.saturating_add(1);
        self.status()
    }
}

impl Actor for Monster {
    type Status = MonsterStatus;

    fn name(&self) -> &str {
        MONSTER_NAME
    }

    fn cell(&self) -> CellId {
        self.cell
    }

    fn relocate(&mut self, cell: CellId) {
        self.cell = cell;
    }

    fn status(&self) -> MonsterStatus {
        MonsterStatus::from_hits(self.hits)
    }
}

/// Stationary thief that keeps everything it takes.
#[derive(Clone, Debug)]
pub(crate) struct Thief {
    pub(crate) id: ThiefId,
    cell: CellId,
    stolen: TreasureHoard,
}

impl Thief {
    pub(crate) const fn new(id: ThiefId, cell: CellId) -> Self {
        Self {
            id,
            cell,
            stolen: TreasureHoard::new(0, 0, 0),
        }
    }

    pub(crate) const fn stolen(&self) -> TreasureHoard {
        self.stolen
    }

    pub(crate) fn steal(&mut self, hoard: TreasureHoard) {
        self.stolen.absorb(hoard);
    }
}

impl Actor for Thief {
    type Status = ();

    fn name(&self) -> &str {
        THIEF_NAME
    }

    fn cell(&self) -> CellId {
        self.cell
    }

    fn relocate(&mut self, cell: CellId) {
        self.cell = cell;
    }

    fn status(&self) {}
}
