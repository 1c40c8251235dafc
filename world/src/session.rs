//! Holder for interactive front-ends that configure the dungeon after start-up.

use otyugh_core::{Command, CommandError, ConfigError, DungeonConfig, Event, RandomSource};

use crate::World;

/// Optional world that commands are routed to once configured.
#[derive(Debug, Default)]
pub struct Session {
    world: Option<World>,
}

impl Session {
    /// Creates an unconfigured session.
    #[must_use]
    pub const fn new() -> Self {
        Self { world: None }
    }

    /// Generates a fresh world, replacing any previous one.
    ///
    /// On failure the previous world, if any, is kept.
    pub fn configure(
        &mut self,
        config: DungeonConfig,
        rng: Box<dyn RandomSource>,
        out_events: &mut Vec<Event>,
    ) -> Result<(), ConfigError> {
        let world = World::new(config, rng, out_events)?;
        self.world = Some(world);
        Ok(())
    }

    /// Reports whether a world has been configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.world.is_some()
    }

    /// Read access to the configured world.
    #[must_use]
    pub const fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    /// Routes a command to the configured world.
    pub fn apply(
        &mut self,
        command: Command,
        out_events: &mut Vec<Event>,
    ) -> Result<(), CommandError> {
        let world = self.world.as_mut().ok_or(CommandError::NotConfigured)?;
        crate::apply(world, command, out_events)
    }
}
