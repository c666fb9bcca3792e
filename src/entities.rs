// SPDX-License-Identifier: GPL-3.0-only

mod pokemon;
mod pokemon_type;
mod question;

pub use pokemon::{Pokemon, artwork_url, cry_url, shiny_artwork_url};
pub use pokemon_type::PokemonType;
pub use question::{AnswerMode, Presentation, QuizQuestion};
