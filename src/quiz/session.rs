// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Arc;

use rand::{RngCore, SeedableRng, rngs::StdRng};
use tokio::task::JoinHandle;

use super::builder::build_question;
use crate::{
    config::Config,
    core::api::PokemonSource,
    entities::{AnswerMode, QuizQuestion},
    shiritori::kana::fold_word,
    utils::PokeQuizError,
};

/// Correct answers needed per level
pub const LEVEL_STEP: u32 = 5;

type Prefetch = JoinHandle<Result<QuizQuestion, PokeQuizError>>;

/// What an answer did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerResult {
    pub correct: bool,
    pub streak: u32,
    /// The answer pushed the score into a new level
    pub leveled_up: bool,
}

/// Score keeping plus a one-slot lookahead: while a question is on screen the next
/// one is already being built in the background.
pub struct QuizSession<S: PokemonSource + 'static> {
    source: Arc<S>,
    config: Config,
    mode: AnswerMode,
    rng: StdRng,
    prefetch: Option<Prefetch>,
    score: u32,
    answered: u32,
    streak: u32,
    best_streak: u32,
}

impl<S: PokemonSource + 'static> QuizSession<S> {
    pub fn new(source: Arc<S>, config: Config, mode: AnswerMode, rng: StdRng) -> Self {
        Self {
            source,
            config,
            mode,
            rng,
            prefetch: None,
            score: 0,
            answered: 0,
            streak: 0,
            best_streak: 0,
        }
    }

    /// Returns the prefetched question when there is one, building it now otherwise,
    /// and starts prefetching the one after.
    pub async fn next_question(&mut self) -> Result<QuizQuestion, PokeQuizError> {
        let question = match self.prefetch.take() {
            Some(handle) => match handle.await? {
                Ok(question) => Ok(question),
                Err(e) => {
                    tracing::warn!("prefetched question failed, building a new one: {e}");
                    build_question(&*self.source, self.mode, &self.config, &mut self.rng).await
                }
            },
            None => build_question(&*self.source, self.mode, &self.config, &mut self.rng).await,
        };

        self.start_prefetch();

        question
    }

    /// Switches the answer mode. A prefetch in flight for the old mode is dropped.
    pub fn set_mode(&mut self, mode: AnswerMode) {
        if mode == self.mode {
            return;
        }

        self.mode = mode;
        self.cancel_prefetch();
    }

    pub fn mode(&self) -> AnswerMode {
        self.mode
    }

    /// Scores `input` against `question`
    pub fn answer(&mut self, question: &QuizQuestion, input: &str) -> AnswerResult {
        let correct = is_correct(question, input);
        let level_before = self.level();

        self.answered += 1;
        if correct {
            self.score += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.streak = 0;
        }

        AnswerResult {
            correct,
            streak: self.streak,
            leveled_up: self.level() > level_before,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn answered(&self) -> u32 {
        self.answered
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn level(&self) -> u32 {
        self.score / LEVEL_STEP + 1
    }

    fn start_prefetch(&mut self) {
        self.cancel_prefetch();

        let source = Arc::clone(&self.source);
        let config = self.config.clone();
        let mode = self.mode;
        let mut rng = StdRng::seed_from_u64(self.rng.next_u64());

        self.prefetch = Some(tokio::spawn(async move {
            build_question(&*source, mode, &config, &mut rng).await
        }));
    }

    fn cancel_prefetch(&mut self) {
        if let Some(handle) = self.prefetch.take() {
            handle.abort();
        }
    }
}

impl<S: PokemonSource + 'static> Drop for QuizSession<S> {
    fn drop(&mut self) {
        self.cancel_prefetch();
    }
}

/// Choice questions take the choice itself or its 1-based number. Typed names are
/// compared after folding kana, case and whitespace.
pub fn is_correct(question: &QuizQuestion, input: &str) -> bool {
    let input = input.trim();

    if question.mode.has_choices() {
        let picked = question.choice_by_index(input).unwrap_or(input);
        return picked == question.correct_answer;
    }

    fold_answer(input) == fold_answer(&question.correct_answer)
}

fn fold_answer(text: &str) -> String {
    fold_word(text)
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entities::{Pokemon, artwork_url},
        quiz::builder::tests::{FakeSource, config},
    };

    fn question(mode: AnswerMode, answer: &str, choices: &[&str]) -> QuizQuestion {
        QuizQuestion {
            correct_pokemon: Pokemon {
                id: 122,
                name: answer.to_string(),
                image: artwork_url(122),
                shiny_image: None,
                is_shiny: false,
                cry: None,
                flavor_text: None,
                types: Vec::new(),
                genus: None,
            },
            choices: choices.iter().map(|c| c.to_string()).collect(),
            correct_answer: answer.to_string(),
            mode,
        }
    }

    fn session() -> QuizSession<FakeSource> {
        QuizSession::new(
            Arc::new(FakeSource::new(&["A", "B", "C", "D", "E", "F"])),
            config(6),
            AnswerMode::Choice,
            StdRng::seed_from_u64(42),
        )
    }

    #[test]
    fn choices_match_by_text_or_number() {
        let choice = question(AnswerMode::Choice, "バリヤード", &["A", "バリヤード", "B", "C"]);

        assert!(is_correct(&choice, "バリヤード"));
        assert!(is_correct(&choice, " 2 "));
        assert!(!is_correct(&choice, "1"));
        assert!(!is_correct(&choice, "ばりやーど"));
    }

    #[test]
    fn typed_names_are_folded() {
        let latin = question(AnswerMode::Input, "Mr. Mime", &[]);
        assert!(is_correct(&latin, "mr.mime"));
        assert!(is_correct(&latin, "  MR. MIME "));
        assert!(!is_correct(&latin, "mime"));

        let kana = question(AnswerMode::Input, "バリヤード", &[]);
        assert!(is_correct(&kana, "ばりやーど"));
        assert!(is_correct(&kana, "バリヤード"));
    }

    #[test]
    fn streaks_and_levels_follow_answers() {
        let mut session = session();
        let choice = question(AnswerMode::Choice, "A", &["A", "B", "C", "D"]);

        for _ in 0..4 {
            assert!(!session.answer(&choice, "A").leveled_up);
        }
        let fifth = session.answer(&choice, "A");
        assert!(fifth.correct && fifth.leveled_up);
        assert_eq!(session.level(), 2);
        assert_eq!(session.streak(), 5);

        let wrong = session.answer(&choice, "B");
        assert!(!wrong.correct);
        assert_eq!(wrong.streak, 0);
        assert_eq!(session.best_streak(), 5);
        assert_eq!(session.score(), 5);
        assert_eq!(session.answered(), 6);
    }

    /// One target plus three distractor names when every name is distinct
    const FETCHES_PER_CHOICE_QUESTION: usize = 4;

    #[tokio::test]
    async fn prebuilt_question_is_served_without_fetching() {
        let source = Arc::new(FakeSource::new(&["A", "B", "C", "D", "E", "F"]));
        let mut session = QuizSession::new(
            Arc::clone(&source),
            config(6),
            AnswerMode::Choice,
            StdRng::seed_from_u64(5),
        );
        session.next_question().await.unwrap();

        let prebuilt = session
            .prefetch
            .take()
            .unwrap()
            .await
            .unwrap()
            .unwrap();
        let ready = prebuilt.clone();
        session.prefetch = Some(tokio::spawn(async move {
            Ok::<_, PokeQuizError>(ready)
        }));
        let before = source.fetch_count();

        let served = session.next_question().await.unwrap();
        assert_eq!(served, prebuilt);

        // only the prefetch of the following question touches the source
        session.prefetch.take().unwrap().await.unwrap().unwrap();
        assert_eq!(
            source.fetch_count() - before,
            FETCHES_PER_CHOICE_QUESTION
        );
    }

    #[tokio::test]
    async fn failed_prefetch_falls_back_to_a_direct_build() {
        let source = Arc::new(FakeSource::new(&["A", "B", "C", "D", "E", "F"]));
        let mut session = QuizSession::new(
            Arc::clone(&source),
            config(6),
            AnswerMode::Choice,
            StdRng::seed_from_u64(9),
        );
        session.prefetch = Some(tokio::spawn(async {
            Err::<QuizQuestion, _>(PokeQuizError::EmptyRoster)
        }));

        let question = session.next_question().await.unwrap();
        assert_eq!(question.choices.len(), 4);

        session.prefetch.take().unwrap().await.unwrap().unwrap();
        assert_eq!(source.fetch_count(), 2 * FETCHES_PER_CHOICE_QUESTION);
    }

    #[tokio::test]
    async fn changing_mode_drops_the_prefetch() {
        let mut session = session();
        session.next_question().await.unwrap();

        session.set_mode(AnswerMode::Input);
        assert!(session.prefetch.is_none());
        assert_eq!(session.mode(), AnswerMode::Input);

        let question = session.next_question().await.unwrap();
        assert_eq!(question.mode, AnswerMode::Input);
        assert!(question.choices.is_empty());
    }
}
