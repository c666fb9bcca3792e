// SPDX-License-Identifier: GPL-3.0-only

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use futures::StreamExt;
use rustemon::client::{
    CacheMode, CacheOptions, MokaManager, RustemonClient, RustemonClientBuilder,
};
use tokio::sync::Semaphore;

use crate::{
    entities::{Pokemon, PokemonType, artwork_url, cry_url, shiny_artwork_url},
    fl,
    shiritori::RosterEntry,
    utils::{PokeQuizError, capitalize_string, clean_flavor_text, id_from_url},
};

/// Fallback for names, genus and flavor text shown in quiz questions
const DISPLAY_FALLBACK_LANGUAGE: &str = "en";
/// Fallback for roster names, which have to stay in kana
const ROSTER_FALLBACK_LANGUAGE: &str = "ja";

/// Where questions get their Pokémon from
#[async_trait]
pub trait PokemonSource: Send + Sync {
    /// Everything a question needs about a species, `is_shiny` left unset
    async fn fetch_pokemon(&self, id: i64) -> Result<Pokemon, PokeQuizError>;

    /// Only the localized name of a species
    async fn fetch_name(&self, id: i64) -> Result<String, PokeQuizError>;
}

#[derive(Debug, Clone)]
pub struct PokeApi {
    client: Arc<RustemonClient>,
    language: String,
}

impl PokeApi {
    pub fn new(language: &str) -> Result<Self, PokeQuizError> {
        let client = RustemonClientBuilder::default()
            .with_manager(MokaManager::default())
            .with_mode(CacheMode::NoStore)
            .with_options(CacheOptions {
                shared: true,
                cache_heuristic: 0.1,
                immutable_min_time_to_live: Duration::from_secs(3600),
                ignore_cargo_cult: true,
            })
            .try_build()
            .map_err(|e| PokeQuizError::Client(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            language: language.to_string(),
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Fetches the name of every species in `language`, `concurrency` requests at a time.
    /// Species that fail to load are logged and left out.
    pub async fn fetch_roster(&self, language: &str, concurrency: usize) -> Vec<RosterEntry> {
        let all_entries =
            match rustemon::pokemon::pokemon_species::get_all_entries(&self.client).await {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("failed to list species: {e}");
                    return Vec::new();
                }
            };

        tracing::info!("loading {} species names", all_entries.len());

        let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

        let roster: Vec<RosterEntry> = futures::stream::iter(all_entries)
            .map(|entry| {
                let client = Arc::clone(&self.client);
                let sem = Arc::clone(&semaphore);
                async move {
                    let _permit = sem.acquire().await.ok()?;
                    let id = id_from_url(&entry.url)?;
                    match Self::fetch_species_name(id, language, ROSTER_FALLBACK_LANGUAGE, &client)
                        .await
                    {
                        Ok(name) => Some(RosterEntry { id, name }),
                        Err(e) => {
                            tracing::warn!("failed to fetch name for {}: {e}", entry.name);
                            None
                        }
                    }
                }
            })
            .buffer_unordered(concurrency.max(1))
            .filter_map(|entry| async move { entry })
            .collect()
            .await;

        tracing::info!("loaded {} species names", roster.len());
        roster
    }

    async fn fetch_species_name(
        id: i64,
        language: &str,
        fallback: &str,
        client: &RustemonClient,
    ) -> Result<String, PokeQuizError> {
        let species = rustemon::pokemon::pokemon_species::get_by_id(id, client).await?;

        pick_localized(&species.names, language, fallback, |n| n.language.name.as_str())
            .map(|n| n.name.clone())
            .ok_or(PokeQuizError::MissingData { what: "name", id })
    }
}

#[async_trait]
impl PokemonSource for PokeApi {
    async fn fetch_pokemon(&self, id: i64) -> Result<Pokemon, PokeQuizError> {
        let (species, pokemon) = tokio::try_join!(
            rustemon::pokemon::pokemon_species::get_by_id(id, &self.client),
            rustemon::pokemon::pokemon::get_by_id(id, &self.client),
        )?;

        let language = self.language.as_str();

        let name = pick_localized(&species.names, language, DISPLAY_FALLBACK_LANGUAGE, |n| {
            n.language.name.as_str()
        })
        .map(|n| n.name.clone())
        .unwrap_or_else(|| capitalize_string(&species.name));

        let genus = pick_localized(&species.genera, language, DISPLAY_FALLBACK_LANGUAGE, |g| {
            g.language.name.as_str()
        })
        .map(|g| g.genus.clone());

        let flavor_text = pick_localized(
            &species.flavor_text_entries,
            language,
            DISPLAY_FALLBACK_LANGUAGE,
            |f| f.language.name.as_str(),
        )
        .map(|f| clean_flavor_text(&f.flavor_text));

        let types = pokemon
            .types
            .iter()
            .filter_map(|t| PokemonType::from_name(&t.type_.name))
            .collect();

        Ok(Pokemon {
            id,
            name,
            image: artwork_url(id),
            shiny_image: Some(shiny_artwork_url(id)),
            is_shiny: false,
            cry: Some(cry_url(id)),
            flavor_text,
            types,
            genus,
        })
    }

    async fn fetch_name(&self, id: i64) -> Result<String, PokeQuizError> {
        match Self::fetch_species_name(id, &self.language, DISPLAY_FALLBACK_LANGUAGE, &self.client)
            .await
        {
            Err(PokeQuizError::MissingData { .. }) => Ok(fl!("unknown-pokemon")),
            other => other,
        }
    }
}

/// Picks the entry in `language`, then the one in `fallback`
fn pick_localized<'a, T>(
    entries: &'a [T],
    language: &str,
    fallback: &str,
    language_of: impl Fn(&T) -> &str,
) -> Option<&'a T> {
    entries
        .iter()
        .find(|entry| language_of(*entry) == language)
        .or_else(|| entries.iter().find(|entry| language_of(*entry) == fallback))
}
