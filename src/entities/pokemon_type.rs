// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

use crate::fl;

/// Possible Pokémon Types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl PokemonType {
    /// List of all Pokémon Types, in PokéApi order
    pub const ALL: &'static [Self] = &[
        Self::Normal,
        Self::Fire,
        Self::Water,
        Self::Electric,
        Self::Grass,
        Self::Ice,
        Self::Fighting,
        Self::Poison,
        Self::Ground,
        Self::Flying,
        Self::Psychic,
        Self::Bug,
        Self::Rock,
        Self::Ghost,
        Self::Dragon,
        Self::Dark,
        Self::Steel,
        Self::Fairy,
    ];

    /// Parses a PokéApi type identifier (`"fire"`, `"steel"`...)
    pub fn from_name(name: &str) -> Option<Self> {
        let pokemon_type = match name.to_lowercase().as_str() {
            "normal" => Self::Normal,
            "fire" => Self::Fire,
            "water" => Self::Water,
            "electric" => Self::Electric,
            "grass" => Self::Grass,
            "ice" => Self::Ice,
            "fighting" => Self::Fighting,
            "poison" => Self::Poison,
            "ground" => Self::Ground,
            "flying" => Self::Flying,
            "psychic" => Self::Psychic,
            "bug" => Self::Bug,
            "rock" => Self::Rock,
            "ghost" => Self::Ghost,
            "dragon" => Self::Dragon,
            "dark" => Self::Dark,
            "steel" => Self::Steel,
            "fairy" => Self::Fairy,
            _ => return None,
        };

        Some(pokemon_type)
    }
}

impl std::fmt::Display for PokemonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PokemonType::Normal => fl!("type-normal"),
            PokemonType::Fire => fl!("type-fire"),
            PokemonType::Water => fl!("type-water"),
            PokemonType::Electric => fl!("type-electric"),
            PokemonType::Grass => fl!("type-grass"),
            PokemonType::Ice => fl!("type-ice"),
            PokemonType::Fighting => fl!("type-fighting"),
            PokemonType::Poison => fl!("type-poison"),
            PokemonType::Ground => fl!("type-ground"),
            PokemonType::Flying => fl!("type-flying"),
            PokemonType::Psychic => fl!("type-psychic"),
            PokemonType::Bug => fl!("type-bug"),
            PokemonType::Rock => fl!("type-rock"),
            PokemonType::Ghost => fl!("type-ghost"),
            PokemonType::Dragon => fl!("type-dragon"),
            PokemonType::Dark => fl!("type-dark"),
            PokemonType::Steel => fl!("type-steel"),
            PokemonType::Fairy => fl!("type-fairy"),
        };

        write!(f, "{name}")
    }
}
