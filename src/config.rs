// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    APP_ID,
    core::storage::{read_ron, write_ron},
    utils::PokeQuizError,
};

const CONFIG_VERSION: u64 = 1;
const CONFIG_FILE: &str = "config.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub version: u64,
    /// PokéApi language used for species names, genus and flavor text
    pub language: String,
    /// PokéApi language used for the shiritori roster, must be a kana reading
    pub shiritori_language: String,
    /// Probability of rolling a shiny on each fetched Pokémon
    pub shiny_chance: f64,
    /// Highest species id questions are drawn from
    pub max_species_id: i64,
    /// Concurrent requests while bulk-loading the roster
    pub roster_concurrency: usize,
    /// Selectable time attack limits, in seconds
    pub time_limits: Vec<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            language: String::from("ja"),
            shiritori_language: String::from("ja-Hrkt"),
            shiny_chance: 1.0 / 20.0,
            max_species_id: 1025,
            roster_concurrency: 30,
            time_limits: vec![30, 60, 120],
        }
    }
}

impl Config {
    /// Location of the config file, `None` when the platform has no config directory
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_ID).join(CONFIG_FILE))
    }

    /// Loads the config from its default location, writing the defaults on first run.
    /// Any failure falls back to the defaults.
    pub async fn load_or_init() -> Self {
        let Some(path) = Self::path() else {
            tracing::warn!("no config directory available, using defaults");
            return Self::default();
        };

        match Self::load_from(&path).await {
            Ok(Some(config)) => config,
            Ok(None) => {
                let config = Self::default();
                if let Err(e) = config.save_to(&path).await {
                    tracing::warn!("failed to write default config to {path:?}: {e}");
                }
                config
            }
            Err(e) => {
                tracing::warn!("failed to read config from {path:?}: {e}");
                Self::default()
            }
        }
    }

    /// Reads a config file, `Ok(None)` if it does not exist yet
    pub async fn load_from(path: &Path) -> Result<Option<Self>, PokeQuizError> {
        let config: Option<Self> = read_ron(path).await?;

        Ok(config.map(|mut config| {
            config.sanitize();
            config
        }))
    }

    pub async fn save_to(&self, path: &Path) -> Result<(), PokeQuizError> {
        write_ron(path, self).await
    }

    /// Clamps hand-edited values back into a playable range
    fn sanitize(&mut self) {
        let defaults = Self::default();

        if !(0.0..=1.0).contains(&self.shiny_chance) {
            self.shiny_chance = defaults.shiny_chance;
        }
        // 4 distinct species are needed per question
        if self.max_species_id < 4 {
            self.max_species_id = defaults.max_species_id;
        }
        if self.roster_concurrency == 0 {
            self.roster_concurrency = defaults.roster_concurrency;
        }
        self.time_limits.retain(|limit| *limit > 0);
        if self.time_limits.is_empty() {
            self.time_limits = defaults.time_limits;
        }
        self.version = CONFIG_VERSION;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("config.ron")).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.ron");

        let config = Config {
            language: String::from("en"),
            shiny_chance: 0.5,
            time_limits: vec![45],
            ..Default::default()
        };
        config.save_to(&path).await.unwrap();

        let loaded = Config::load_from(&path).await.unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn partial_and_invalid_files_are_repaired() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ron");
        tokio::fs::write(&path, "(language: \"fr\", shiny_chance: 3.0, time_limits: [0])")
            .await
            .unwrap();

        let loaded = Config::load_from(&path).await.unwrap().unwrap();
        assert_eq!(loaded.language, "fr");
        assert_eq!(loaded.shiny_chance, Config::default().shiny_chance);
        assert_eq!(loaded.time_limits, Config::default().time_limits);
        assert_eq!(loaded.max_species_id, 1025);
    }
}
