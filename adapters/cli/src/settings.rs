use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use otyugh_core::DungeonConfig;

/// Hunt the Otyugh through a generated cave system.
#[derive(Debug, Parser)]
#[command(name = "otyugh", version, about, long_about = None)]
pub(crate) struct Args {
    /// TOML file supplying the base dungeon configuration
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// Number of rows in the cave grid
    #[arg(long)]
    pub(crate) rows: Option<u32>,

    /// Number of columns in the cave grid
    #[arg(long)]
    pub(crate) columns: Option<u32>,

    /// Extra passages opened beyond the spanning tree
    #[arg(long)]
    pub(crate) interconnectivity: Option<u32>,

    /// Connect opposite edges of the grid
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub(crate) wrapping: Option<bool>,

    /// Percentage of caves stocked with treasure (and of cells with arrows)
    #[arg(long)]
    pub(crate) percent_treasure: Option<u32>,

    /// Percentage of caves holding monsters, pits and thieves
    #[arg(long)]
    pub(crate) percent_monsters: Option<u32>,

    /// Seed for a reproducible dungeon
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Echo every world event to stderr
    #[arg(short = 'v', long)]
    pub(crate) verbose: bool,
}

impl Args {
    /// Resolves the dungeon configuration: file first, flags on top.
    pub(crate) fn dungeon_config(&self) -> Result<DungeonConfig> {
        let mut config = match &self.config {
            Some(path) => load(path)?,
            None => DungeonConfig::default(),
        };
        self.override_onto(&mut config);
        Ok(config)
    }

    fn override_onto(&self, config: &mut DungeonConfig) {
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(interconnectivity) = self.interconnectivity {
            config.interconnectivity = interconnectivity;
        }
        if let Some(wrapping) = self.wrapping {
            config.wrapping = wrapping;
        }
        if let Some(percent) = self.percent_treasure {
            config.percent_treasure = percent;
        }
        if let Some(percent) = self.percent_monsters {
            config.percent_monsters = percent;
        }
    }
}

fn load(path: &Path) -> Result<DungeonConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration file {}", path.display()))?;
    toml::from_str(&text)
        .with_context(|| format!("failed to parse configuration file {}", path.display()))
}
