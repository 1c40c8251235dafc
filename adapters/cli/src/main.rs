#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Console adapter that plays the caves of the Otyugh on stdin and stdout.

mod console;
mod input;
mod settings;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use otyugh_core::{EntropyRandom, RandomSource, SeededRandom};
use otyugh_world::Session;

use crate::{console::Console, settings::Args};

/// Entry point for the Otyugh command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.dungeon_config()?;
    let rng: Box<dyn RandomSource> = match args.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(EntropyRandom::new()),
    };

    let mut session = Session::new();
    let mut setup = Vec::new();
    session
        .configure(config, rng, &mut setup)
        .context("failed to generate the dungeon")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(stdout.lock(), args.verbose).run(&mut session, stdin.lock(), setup)
}
