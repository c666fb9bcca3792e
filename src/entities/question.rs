// SPDX-License-Identifier: GPL-3.0-only

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::Pokemon;
use crate::fl;

/// How the player answers a question
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum AnswerMode {
    /// Pick the name out of four choices
    #[default]
    Choice,
    /// Type the name
    Input,
    /// Pick one of the Pokémon's weaknesses out of four types
    Weakness,
}

impl AnswerMode {
    pub fn has_choices(&self) -> bool {
        matches!(self, Self::Choice | Self::Weakness)
    }

    /// The mode the in-game mode switch moves to
    pub fn next(self) -> Self {
        match self {
            AnswerMode::Choice => AnswerMode::Input,
            AnswerMode::Input => AnswerMode::Weakness,
            AnswerMode::Weakness => AnswerMode::Choice,
        }
    }
}

impl std::fmt::Display for AnswerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerMode::Choice => write!(f, "{}", fl!("mode-choice")),
            AnswerMode::Input => write!(f, "{}", fl!("mode-input")),
            AnswerMode::Weakness => write!(f, "{}", fl!("mode-weakness")),
        }
    }
}

/// How the Pokémon is shown to the player
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Presentation {
    #[default]
    Artwork,
    Cry,
    /// Genus, types and redacted flavor text
    Pokedex,
}

impl Presentation {
    /// The presentation the view toggle switches to
    pub fn next(self) -> Self {
        match self {
            Presentation::Artwork => Presentation::Cry,
            Presentation::Cry => Presentation::Pokedex,
            Presentation::Pokedex => Presentation::Artwork,
        }
    }
}

/// A single quiz question. Built fresh per question and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizQuestion {
    pub correct_pokemon: Pokemon,
    /// Empty for [`AnswerMode::Input`]
    pub choices: Vec<String>,
    pub correct_answer: String,
    pub mode: AnswerMode,
}

impl QuizQuestion {
    /// Resolves a 1-based choice index typed by the player
    pub fn choice_by_index(&self, input: &str) -> Option<&str> {
        let index: usize = input.trim().parse().ok()?;
        self.choices
            .get(index.checked_sub(1)?)
            .map(String::as_str)
    }
}
