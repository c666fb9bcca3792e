// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use super::{
    api::PokeApi,
    storage::{data_file, read_ron, write_ron},
};
use crate::{
    shiritori::{Roster, RosterEntry},
    utils::PokeQuizError,
};

/// On-disk copy of the shiritori roster, one file per language
#[derive(Debug, Clone)]
pub struct RosterCache {
    path: PathBuf,
}

impl RosterCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_location(language: &str) -> Result<Self, PokeQuizError> {
        Ok(Self::new(data_file(&format!("roster_{language}.ron"))?))
    }

    /// Loads the cached roster; fetches and saves it when there is none or `refresh` is set
    pub async fn load_or_init(
        &self,
        api: &PokeApi,
        language: &str,
        concurrency: usize,
        refresh: bool,
    ) -> Result<Roster, PokeQuizError> {
        if !refresh {
            match self.load().await {
                Ok(Some(entries)) if !entries.is_empty() => return Ok(Roster::new(entries)),
                Ok(_) => tracing::info!("no roster cache at {:?}", self.path),
                Err(e) => tracing::warn!("failed to load roster cache: {e}"),
            }
        }

        let entries = api.fetch_roster(language, concurrency).await;
        if entries.is_empty() {
            return Err(PokeQuizError::EmptyRoster);
        }

        if let Err(e) = self.save(&entries).await {
            tracing::warn!("failed to save roster cache: {e}");
        }

        Ok(Roster::new(entries))
    }

    pub async fn load(&self) -> Result<Option<Vec<RosterEntry>>, PokeQuizError> {
        read_ron(&self.path).await
    }

    pub async fn save(&self, entries: &[RosterEntry]) -> Result<(), PokeQuizError> {
        write_ron(&self.path, &entries).await
    }
}
