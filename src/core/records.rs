// SPDX-License-Identifier: GPL-3.0-only

use std::{
    collections::{BTreeMap, BTreeSet},
    path::PathBuf,
};

use serde::{Deserialize, Serialize};

use super::storage::{data_file, read_ron, write_ron};
use crate::utils::PokeQuizError;

const RECORDS_FILE: &str = "records.ron";

/// Persisted counters. Every value only ever grows; nothing in the app resets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Records {
    pub best_score: u32,
    pub max_streak: u32,
    pub total_correct: u64,
    /// Best score per time attack limit, in seconds
    pub time_attack_best: BTreeMap<u64, u32>,
    /// Species ids answered correctly at least once
    pub caught: BTreeSet<i64>,
}

/// Which records a finished game broke
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordBreaks {
    pub best_score: bool,
    pub max_streak: bool,
}

impl Records {
    /// Counts an answer. Returns `true` when a correct answer catches a new species.
    pub fn record_answer(&mut self, correct: bool, species_id: i64) -> bool {
        if !correct {
            return false;
        }

        self.total_correct = self.total_correct.saturating_add(1);
        self.caught.insert(species_id)
    }

    pub fn record_game(&mut self, score: u32, max_streak: u32) -> RecordBreaks {
        let breaks = RecordBreaks {
            best_score: score > self.best_score,
            max_streak: max_streak > self.max_streak,
        };

        self.best_score = self.best_score.max(score);
        self.max_streak = self.max_streak.max(max_streak);

        breaks
    }

    /// Returns `true` when `score` beats the best for `limit_secs`
    pub fn record_time_attack(&mut self, limit_secs: u64, score: u32) -> bool {
        let best = self.time_attack_best.entry(limit_secs).or_insert(0);
        let broken = score > *best;
        *best = (*best).max(score);

        broken
    }
}

/// Loads and saves [`Records`] as a RON file
#[derive(Debug, Clone)]
pub struct RecordsStore {
    path: PathBuf,
}

impl RecordsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store in the user's data directory
    pub fn default_location() -> Result<Self, PokeQuizError> {
        Ok(Self::new(data_file(RECORDS_FILE)?))
    }

    /// Missing or unreadable records start from zero
    pub async fn load(&self) -> Records {
        match read_ron(&self.path).await {
            Ok(records) => records.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("failed to load records from {:?}: {e}", self.path);
                Records::default()
            }
        }
    }

    pub async fn save(&self, records: &Records) -> Result<(), PokeQuizError> {
        write_ron(&self.path, records).await?;
        tracing::debug!("records saved to {:?}", self.path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_never_decrease() {
        let mut records = Records::default();

        let breaks = records.record_game(7, 4);
        assert_eq!(
            breaks,
            RecordBreaks {
                best_score: true,
                max_streak: true
            }
        );

        let breaks = records.record_game(3, 9);
        assert_eq!(
            breaks,
            RecordBreaks {
                best_score: false,
                max_streak: true
            }
        );
        assert_eq!(records.best_score, 7);
        assert_eq!(records.max_streak, 9);

        assert!(records.record_time_attack(60, 12));
        assert!(!records.record_time_attack(60, 5));
        assert!(!records.record_time_attack(60, 12));
        assert_eq!(records.time_attack_best[&60], 12);
        assert!(records.record_time_attack(30, 1));
    }

    #[test]
    fn correct_answers_catch_species() {
        let mut records = Records::default();

        assert!(records.record_answer(true, 25));
        assert!(!records.record_answer(true, 25));
        assert!(!records.record_answer(false, 150));

        assert_eq!(records.total_correct, 2);
        assert_eq!(records.caught.iter().copied().collect::<Vec<_>>(), vec![25]);
    }

    #[tokio::test]
    async fn store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordsStore::new(dir.path().join("records.ron"));

        assert_eq!(store.load().await, Records::default());

        let mut records = Records::default();
        records.record_answer(true, 133);
        records.record_game(1, 1);
        records.record_time_attack(120, 8);
        store.save(&records).await.unwrap();

        assert_eq!(store.load().await, records);
    }

    #[tokio::test]
    async fn corrupt_records_start_from_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.ron");
        tokio::fs::write(&path, "not ron at all").await.unwrap();

        assert_eq!(RecordsStore::new(path).load().await, Records::default());
    }
}
