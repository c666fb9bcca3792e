// SPDX-License-Identifier: GPL-3.0-only

use thiserror::Error;

/// Errors produced while loading data or building questions
#[derive(Debug, Error)]
pub enum PokeQuizError {
    #[error("PokéApi request failed: {0}")]
    Api(#[from] rustemon::error::Error),
    #[error("could not build the PokéApi client: {0}")]
    Client(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("audio playback failed: {0}")]
    Audio(String),
    #[error("RON error: {0}")]
    Ron(String),
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("no {what} available for species #{id}")]
    MissingData { what: &'static str, id: i64 },
    #[error("only {available} distractors available, {needed} needed")]
    NotEnoughDistractors { available: usize, needed: usize },
    #[error("the roster is empty")]
    EmptyRoster,
    #[error("no data directory available on this system")]
    NoDataDir,
}

/// Collapses the control characters and line breaks PokéApi keeps in flavor texts.
pub fn clean_flavor_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Extracts the trailing numeric id of a PokéApi resource URL
pub fn id_from_url(url: &str) -> Option<i64> {
    url.trim_end_matches('/')
        .split('/')
        .next_back()
        .and_then(|s| s.parse().ok())
        .filter(|id| *id > 0)
}

/// Transforms a kebab-case string into a space-separated string where each word starts with an uppercase letter.
pub fn capitalize_string(input: &str) -> String {
    let words: Vec<&str> = input.split('-').collect();

    let capitalized_words: Vec<String> = words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            if let Some(first_char) = chars.next() {
                first_char.to_uppercase().collect::<String>() + chars.as_str()
            } else {
                String::new()
            }
        })
        .collect();

    capitalized_words.join(" ")
}
