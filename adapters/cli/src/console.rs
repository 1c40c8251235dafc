use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use otyugh_core::{CommandError, Event};
use otyugh_system_narration::{Narrator, ACTION_PROMPT};
use otyugh_world::{query, Session};

use crate::input::{Input, InputError};

/// Read-eval loop driving a configured session from line based text input.
pub(crate) struct Console<W> {
    narrator: Narrator,
    output: W,
    verbose: bool,
}

impl<W: Write> Console<W> {
    /// Creates a console writing player-facing text to `output`.
    pub(crate) fn new(output: W, verbose: bool) -> Self {
        Self {
            narrator: Narrator,
            output,
            verbose,
        }
    }

    /// Plays until the player dies, wins, quits or the input ends.
    ///
    /// `setup` holds the events recorded while the world was generated.
    pub(crate) fn run(
        &mut self,
        session: &mut Session,
        input: impl BufRead,
        setup: Vec<Event>,
    ) -> Result<()> {
        let world = session.world().context("no dungeon has been configured")?;
        writeln!(self.output, "{}", self.narrator.welcome_banner(world))?;
        self.report(&setup)?;

        let mut lines = input.lines();
        let mut pending = String::new();
        let mut events = Vec::new();
        loop {
            let world = session.world().context("no dungeon has been configured")?;
            if query::is_game_over(world) {
                break;
            }
            if pending.is_empty() {
                for line in self.narrator.describe(&query::describe_location(world)) {
                    writeln!(self.output, "{line}")?;
                }
                write!(self.output, "{ACTION_PROMPT}")?;
            }
            self.output.flush()?;

            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("failed to read player input")?;
            pending.push(' ');
            pending.push_str(&line);

            let parsed = Input::parse(&pending);
            if let Err(InputError::Incomplete(question)) = parsed {
                write!(self.output, "{question}")?;
                continue;
            }
            pending.clear();

            let command = match parsed {
                Ok(Input::Quit) => {
                    writeln!(self.output, "Quitting the game.")?;
                    break;
                }
                Ok(input) => input.command(),
                Err(error) => {
                    writeln!(self.output, "{error}")?;
                    continue;
                }
            };
            let Some(command) = command else {
                continue;
            };

            match session.apply(command, &mut events) {
                Ok(()) => {}
                Err(CommandError::IllegalMove { .. }) => {
                    writeln!(self.output, "Not a valid move. Please try again.")?;
                }
                Err(error) => writeln!(self.output, "{error}")?,
            }
            self.report(&events)?;
            events.clear();
        }

        let world = session.world().context("no dungeon has been configured")?;
        writeln!(self.output, "{}", self.narrator.inventory(world))?;
        self.output.flush()?;
        Ok(())
    }

    fn report(&mut self, events: &[Event]) -> Result<()> {
        for event in events {
            if self.verbose {
                eprintln!("{event:?}");
            }
            if let Some(line) = self.narrator.narrate(event) {
                writeln!(self.output, "{line}")?;
            }
        }
        Ok(())
    }
}
