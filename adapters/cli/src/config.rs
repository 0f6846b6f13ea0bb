//! Loading the game configuration from disk and the command line.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use tank_attack_core::GameConfig;

/// Contents of a `--config` file.
///
/// ```toml
/// seed = 7
///
/// [game]
/// rows = 10
/// occupancy_blocks_paths = true
///
/// [game.obstacles]
/// count = 8
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ConfigFile {
    pub(crate) seed: Option<u64>,
    pub(crate) game: GameConfig,
}

impl ConfigFile {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Values given on the command line, which win over the config file.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Overrides {
    pub(crate) rows: Option<u32>,
    pub(crate) columns: Option<u32>,
    pub(crate) obstacles: Option<u32>,
    pub(crate) seed: Option<u64>,
    pub(crate) occupancy_blocks_paths: bool,
}

impl Overrides {
    pub(crate) fn apply(self, file: ConfigFile) -> (GameConfig, Option<u64>) {
        let mut config = file.game;
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(count) = self.obstacles {
            config.obstacles.count = count;
        }
        if self.occupancy_blocks_paths {
            config.occupancy_blocks_paths = true;
        }
        (config, self.seed.or(file.seed))
    }
}
