// SPDX-License-Identifier: GPL-3.0-only

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use super::PokemonType;

const ARTWORK_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";
const CRY_BASE: &str = "https://raw.githubusercontent.com/PokeAPI/cries/main/cries/pokemon/latest";

/// A Pokémon as shown in a single question. Created on each fetch and discarded afterwards.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: i64,
    /// Localized species name
    pub name: String,
    pub image: String,
    pub shiny_image: Option<String>,
    pub is_shiny: bool,
    pub cry: Option<String>,
    pub flavor_text: Option<String>,
    pub types: Vec<PokemonType>,
    pub genus: Option<String>,
}

impl Debug for Pokemon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pokemon")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("is_shiny", &self.is_shiny)
            .finish()
    }
}

impl Pokemon {
    /// The artwork the player should see, honoring the shiny roll
    pub fn display_image(&self) -> &str {
        match (&self.shiny_image, self.is_shiny) {
            (Some(shiny), true) => shiny,
            _ => &self.image,
        }
    }

    /// Flavor text with every occurrence of the Pokémon's own name masked out
    pub fn redacted_flavor_text(&self) -> Option<String> {
        let text = self.flavor_text.as_ref()?;
        if self.name.is_empty() {
            return Some(text.clone());
        }

        Some(text.replace(&self.name, "？？？"))
    }
}

/// Official artwork URL for a species id
pub fn artwork_url(id: i64) -> String {
    format!("{ARTWORK_BASE}/{id}.png")
}

/// Shiny official artwork URL for a species id
pub fn shiny_artwork_url(id: i64) -> String {
    format!("{ARTWORK_BASE}/shiny/{id}.png")
}

/// Latest cry URL for a species id
pub fn cry_url(id: i64) -> String {
    format!("{CRY_BASE}/{id}.ogg")
}
