// SPDX-License-Identifier: GPL-3.0-only

use super::PokeQuiz;
use crate::{
    fl,
    shiritori::kana::{fold_word, normalize_mora},
    utils::PokeQuizError,
};

impl PokeQuiz {
    pub(super) fn print_stats(&self) {
        let records = &self.records;

        println!("{}", fl!("stats-best-score", score = records.best_score));
        println!("{}", fl!("stats-max-streak", streak = records.max_streak));
        println!("{}", fl!("stats-total-correct", count = records.total_correct));
        println!(
            "{}",
            fl!(
                "stats-caught",
                caught = records.caught.len(),
                total = self.config.max_species_id
            )
        );

        if records.time_attack_best.is_empty() {
            return;
        }
        println!("{}", fl!("stats-time-attack"));
        for (seconds, score) in &records.time_attack_best {
            println!(
                "  {}",
                fl!("stats-time-attack-entry", seconds = (*seconds), score = (*score))
            );
        }
    }

    pub(super) async fn print_roster(
        &self,
        refresh: bool,
        starting: Option<&str>,
    ) -> Result<(), PokeQuizError> {
        println!("{}", fl!("roster-loading"));
        let roster = self.load_roster(refresh).await?;
        println!("{}", fl!("roster-loaded", count = roster.len()));

        let Some(mora) = starting.and_then(|s| fold_word(s).chars().next()) else {
            return Ok(());
        };

        for entry in roster.starting_with(normalize_mora(mora)) {
            println!("  #{:<5} {}", entry.id, entry.name);
        }

        Ok(())
    }
}
