// SPDX-License-Identifier: GPL-3.0-only

use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};
use thiserror::Error;

use super::{
    kana::{TERMINAL_MORA, ends_with_terminal, first_mora, fold_word, last_mora},
    roster::{Roster, RosterEntry},
};
use crate::{entities::artwork_url, fl};

/// Who played a word
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    Player,
    Opponent,
}

/// A word in the battle history
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatTurn {
    pub sender: Sender,
    pub word: String,
    pub image: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WinReason {
    /// No unused name starts with the required mora
    OpponentStuck,
    /// The opponent was forced into a name ending in the terminal mora
    OpponentPlayedTerminal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LossReason {
    PlayerPlayedTerminal,
    Resigned,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    PlayerWon(WinReason),
    OpponentWon(LossReason),
}

/// Battle state; the opponent's opening move happens inside [`Battle::start`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    PlayerTurn { required: char },
    OpponentTurn { required: char },
    Finished(Outcome),
}

/// Reasons a move is refused. A refused move never changes the battle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShiritoriError {
    #[error("it is not the player's turn")]
    NotPlayersTurn,
    #[error("it is not the opponent's turn")]
    NotOpponentsTurn,
    #[error("the battle already started")]
    AlreadyStarted,
    #[error("{0} is not a known Pokémon")]
    UnknownWord(String),
    #[error("{0} was already used")]
    AlreadyUsed(String),
    #[error("{word} does not start with {expected}")]
    WrongStart { expected: char, word: String },
    #[error("the roster has no word to open with")]
    NoOpeningWord,
}

impl ShiritoriError {
    /// Banner shown to the player
    pub fn localized(&self) -> String {
        match self {
            ShiritoriError::NotPlayersTurn | ShiritoriError::NotOpponentsTurn => {
                fl!("shiritori-not-your-turn")
            }
            ShiritoriError::AlreadyStarted => fl!("shiritori-already-started"),
            ShiritoriError::UnknownWord(word) => {
                fl!("shiritori-unknown-word", word = word.as_str())
            }
            ShiritoriError::AlreadyUsed(word) => {
                fl!("shiritori-already-used", word = word.as_str())
            }
            ShiritoriError::WrongStart { expected, .. } => {
                fl!("shiritori-wrong-start", expected = expected.to_string())
            }
            ShiritoriError::NoOpeningWord => fl!("shiritori-no-opening"),
        }
    }
}

/// A shiritori battle against the rule-based opponent, valid for one game
#[derive(Debug, Clone)]
pub struct Battle {
    roster: Roster,
    history: Vec<ChatTurn>,
    /// Folded spellings of every word played so far
    used: HashSet<String>,
    phase: Phase,
}

impl Battle {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            history: Vec::new(),
            used: HashSet::new(),
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    pub fn is_used(&self, word: &str) -> bool {
        self.used.contains(&fold_word(word))
    }

    /// The mora the player has to start with, if it is their turn
    pub fn required_mora(&self) -> Option<char> {
        match self.phase {
            Phase::PlayerTurn { required } => Some(required),
            _ => None,
        }
    }

    /// The opponent opens with a random name that does not lose on the spot and
    /// leaves the player at least one safe reply.
    pub fn start(&mut self, rng: &mut impl Rng) -> Result<&ChatTurn, ShiritoriError> {
        if self.phase != Phase::Idle {
            return Err(ShiritoriError::AlreadyStarted);
        }

        let openers: Vec<&RosterEntry> = self
            .roster
            .entries()
            .iter()
            .filter(|entry| !ends_with_terminal(&entry.name))
            .filter(|entry| {
                last_mora(&entry.name).is_some_and(|mora| {
                    self.roster
                        .starting_with(mora)
                        .any(|next| next.id != entry.id && !ends_with_terminal(&next.name))
                })
            })
            .collect();

        let opener = openers
            .choose(rng)
            .map(|entry| (*entry).clone())
            .ok_or(ShiritoriError::NoOpeningWord)?;

        tracing::debug!("opponent opens with {}", opener.name);
        self.play(Sender::Opponent, &opener);

        Ok(self.last_turn())
    }

    /// Validates and plays a player word. Rejected words leave the battle untouched.
    pub fn submit(&mut self, word: &str) -> Result<Phase, ShiritoriError> {
        let Phase::PlayerTurn { required } = self.phase else {
            return Err(ShiritoriError::NotPlayersTurn);
        };

        let entry = self
            .roster
            .find(word)
            .cloned()
            .ok_or_else(|| ShiritoriError::UnknownWord(word.trim().to_string()))?;

        if self.is_used(&entry.name) {
            return Err(ShiritoriError::AlreadyUsed(entry.name));
        }

        if first_mora(&entry.name) != Some(required) {
            return Err(ShiritoriError::WrongStart {
                expected: required,
                word: entry.name,
            });
        }

        self.play(Sender::Player, &entry);

        Ok(self.phase)
    }

    /// Lets the opponent answer. Returns the word it played, or `None` when it
    /// had nothing left and the player won.
    pub fn opponent_move(
        &mut self,
        rng: &mut impl Rng,
    ) -> Result<Option<&ChatTurn>, ShiritoriError> {
        let Phase::OpponentTurn { required } = self.phase else {
            return Err(ShiritoriError::NotOpponentsTurn);
        };

        let candidates: Vec<&RosterEntry> = self
            .roster
            .starting_with(required)
            .filter(|entry| !self.is_used(&entry.name))
            .collect();

        let Some(response) = choose_response(&candidates, rng).cloned() else {
            tracing::debug!("opponent has no word starting with {required}");
            self.phase = Phase::Finished(Outcome::PlayerWon(WinReason::OpponentStuck));
            return Ok(None);
        };

        self.play(Sender::Opponent, &response);

        Ok(Some(self.last_turn()))
    }

    /// The player gives up
    pub fn resign(&mut self) {
        if matches!(self.phase, Phase::PlayerTurn { .. } | Phase::OpponentTurn { .. }) {
            self.phase = Phase::Finished(Outcome::OpponentWon(LossReason::Resigned));
        }
    }

    /// Clears the history and used words, keeping the roster
    pub fn restart(&mut self) {
        self.history.clear();
        self.used.clear();
        self.phase = Phase::Idle;
    }

    fn play(&mut self, sender: Sender, entry: &RosterEntry) {
        self.used.insert(fold_word(&entry.name));
        self.history.push(ChatTurn {
            sender,
            word: entry.name.clone(),
            image: Some(artwork_url(entry.id)),
        });

        // a name without a chainable ending closes the chain like the terminal mora
        let next = last_mora(&entry.name).unwrap_or(TERMINAL_MORA);
        self.phase = match (sender, next) {
            (Sender::Player, TERMINAL_MORA) => {
                Phase::Finished(Outcome::OpponentWon(LossReason::PlayerPlayedTerminal))
            }
            (Sender::Opponent, TERMINAL_MORA) => {
                Phase::Finished(Outcome::PlayerWon(WinReason::OpponentPlayedTerminal))
            }
            (Sender::Player, required) => Phase::OpponentTurn { required },
            (Sender::Opponent, required) => Phase::PlayerTurn { required },
        };
    }

    fn last_turn(&self) -> &ChatTurn {
        &self.history[self.history.len() - 1]
    }
}

/// Picks a reply, avoiding names that end in the terminal mora whenever another option exists
fn choose_response<'a>(
    candidates: &[&'a RosterEntry],
    rng: &mut impl Rng,
) -> Option<&'a RosterEntry> {
    let safe: Vec<&RosterEntry> = candidates
        .iter()
        .copied()
        .filter(|entry| !ends_with_terminal(&entry.name))
        .collect();

    if safe.is_empty() {
        candidates.choose(rng).copied()
    } else {
        safe.choose(rng).copied()
    }
}
