#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure narration system that turns world state and events into player-facing text.

use otyugh_core::{DeathCause, Event, LocationDescription, TreasureHoard, TreasureKind};
use otyugh_world::{query, World};

/// Question asked before every player turn.
pub const ACTION_PROMPT: &str = "Move, Pickup, or Shoot (M-P-S)? ";

/// Produces the text an adapter shows to the player.
#[derive(Debug, Default)]
pub struct Narrator;

impl Narrator {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Describes the player's current surroundings, one line per observation.
    #[must_use]
    pub fn describe(&self, location: &LocationDescription) -> Vec<String> {
        let mut lines = Vec::new();

        match location.smell_units {
            1 => lines.push("You smell something slightly pungent nearby".to_owned()),
            units if units > 1 => {
                lines.push("You smell something terribly pungent nearby".to_owned());
            }
            _ => {}
        }
        if location.near_pit {
            lines.push("You feel a cold draft nearby".to_owned());
        }

        lines.push(format!(
            "You are in {} {}",
            location.kind.name(),
            location.coord
        ));
        if location.arrows > 0 {
            lines.push(format!("You find {} arrow(s) here", location.arrows));
        }
        if let Some(treasure) = location.treasure.filter(|hoard| !hoard.is_empty()) {
            lines.push(format!(
                "You find {} rubies, {} sapphires, & {} diamonds here",
                treasure.get(TreasureKind::Rubies),
                treasure.get(TreasureKind::Sapphires),
                treasure.get(TreasureKind::Diamonds),
            ));
        }

        let entrances: Vec<&str> = location
            .exits
            .iter()
            .map(|direction| &direction.name()[..1])
            .collect();
        lines.push(format!(
            "Entrances can be found at {}",
            entrances.join(", ").to_uppercase()
        ));
        lines
    }

    /// Describes a single event, or returns `None` for events with nothing to say.
    #[must_use]
    pub fn narrate(&self, event: &Event) -> Option<String> {
        let line = match event {
            Event::PlayerEntered { .. }
            | Event::PlayerMoved { .. }
            | Event::MonsterWounded { .. }
            | Event::MonsterKilled { .. } => return None,
            Event::PlayerKilled {
                cause: DeathCause::Pit,
                ..
            } => "You fell into a pit! Better luck next time.".to_owned(),
            Event::PlayerKilled {
                cause: DeathCause::Monster,
                ..
            } => "Chomp, chomp, chomp, you are eaten by an Otyugh! Better luck next time.".to_owned(),
            Event::WoundedMonsterEvaded { .. } => {
                "A wounded Otyugh staggers aside and lets you pass.".to_owned()
            }
            Event::PlayerWon { .. } => {
                "You are at the destination and survived the monster. You won!".to_owned()
            }
            Event::TreasureStolen { hoard, .. } => {
                if hoard.is_empty() {
                    "A thief rummages through your empty pockets.".to_owned()
                } else {
                    format!("A thief stole {} from you!", hoard_summary(hoard))
                }
            }
            Event::TreasurePicked { kind, amount } => format!("You pick up {amount} {kind}."),
            Event::ArrowsPicked { amount } => format!("You pick up {amount} arrow(s)."),
            Event::ArrowLoosed { outcome, .. } => {
                let report = outcome.to_string();
                if report.is_empty() {
                    return None;
                }
                report
            }
        };
        Some(line)
    }

    /// Summarises what the player carries.
    #[must_use]
    pub fn inventory(&self, world: &World) -> String {
        format!(
            "You carry {} arrow(s) and {}",
            query::arrows(world),
            hoard_summary(&query::treasure_collected(world))
        )
    }
}

fn hoard_summary(hoard: &TreasureHoard) -> String {
    let parts: Vec<String> = TreasureKind::ALL
        .into_iter()
        .map(|kind| format!("{} {kind}", hoard.get(kind)))
        .collect();
    parts.join(", ")
}
