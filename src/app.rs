// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Arc;

use crate::{
    config::Config,
    core::{
        api::PokeApi,
        records::{Records, RecordsStore},
        roster_cache::RosterCache,
    },
    flags::Command,
    shiritori::Roster,
    utils::PokeQuizError,
};

use self::prompt::Prompt;

mod prompt;
mod quiz_page;
mod shiritori_page;
mod stats_page;

/// The terminal front end. Owns the config, the PokéApi client and the records.
pub struct PokeQuiz {
    config: Config,
    api: Arc<PokeApi>,
    /// `None` when the platform has no data directory, records are then kept in memory only
    records_store: Option<RecordsStore>,
    records: Records,
    prompt: Prompt,
}

impl PokeQuiz {
    pub async fn init(config: Config) -> Result<Self, PokeQuizError> {
        let api = Arc::new(PokeApi::new(&config.language)?);

        let records_store = match RecordsStore::default_location() {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::warn!("records will not be saved: {e}");
                None
            }
        };
        let records = match &records_store {
            Some(store) => store.load().await,
            None => Records::default(),
        };

        Ok(Self {
            config,
            api,
            records_store,
            records,
            prompt: Prompt::new(),
        })
    }

    pub async fn run(&mut self, command: Command) -> Result<(), PokeQuizError> {
        tracing::debug!("running {command:?} in {}", self.api.language());

        match command {
            Command::Play(quiz) => self.play(quiz.mode, quiz.presentation).await,
            Command::TimeAttack { quiz, limit } => {
                self.time_attack(quiz.mode, quiz.presentation, limit).await
            }
            Command::Shiritori { refresh } => self.shiritori(refresh).await,
            Command::Stats => {
                self.print_stats();
                Ok(())
            }
            Command::Roster { refresh, starting } => {
                self.print_roster(refresh, starting.as_deref()).await
            }
        }
    }

    async fn load_roster(&self, refresh: bool) -> Result<Roster, PokeQuizError> {
        let language = &self.config.shiritori_language;

        RosterCache::default_location(language)?
            .load_or_init(
                &self.api,
                language,
                self.config.roster_concurrency,
                refresh,
            )
            .await
    }

    async fn save_records(&self) {
        let Some(store) = &self.records_store else {
            return;
        };

        if let Err(e) = store.save(&self.records).await {
            tracing::error!("failed to save records: {e}");
        }
    }
}
