// SPDX-License-Identifier: GPL-3.0-only

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::kana::{first_mora, fold_word, last_mora};

/// A species name allowed in a battle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: i64,
    pub name: String,
}

/// Every species name that counts as a valid word, indexed by folded spelling
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    by_name: HashMap<String, usize>,
}

impl Roster {
    /// Builds the roster, dropping names that cannot be chained and keeping the
    /// lowest id of duplicated spellings
    pub fn new(mut entries: Vec<RosterEntry>) -> Self {
        entries.retain(|entry| {
            first_mora(&entry.name).is_some() && last_mora(&entry.name).is_some()
        });
        entries.sort_by_key(|entry| entry.id);

        let mut by_name = HashMap::with_capacity(entries.len());
        let mut unique = Vec::with_capacity(entries.len());
        for entry in entries {
            let key = fold_word(&entry.name);
            if by_name.contains_key(&key) {
                continue;
            }
            by_name.insert(key, unique.len());
            unique.push(entry);
        }

        Self {
            entries: unique,
            by_name,
        }
    }

    /// Looks a player word up, tolerating hiragana and surrounding whitespace
    pub fn find(&self, word: &str) -> Option<&RosterEntry> {
        self.by_name
            .get(&fold_word(word))
            .and_then(|index| self.entries.get(*index))
    }

    /// Entries whose first mora is `mora`
    pub fn starting_with(&self, mora: char) -> impl Iterator<Item = &RosterEntry> {
        self.entries
            .iter()
            .filter(move |entry| first_mora(&entry.name) == Some(mora))
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
