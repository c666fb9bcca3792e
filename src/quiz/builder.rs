// SPDX-License-Identifier: GPL-3.0-only

use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};

use crate::{
    config::Config,
    core::api::PokemonSource,
    entities::{AnswerMode, Pokemon, QuizQuestion},
    utils::PokeQuizError,
    weakness::{DISTRACTOR_COUNT, weakness_choices},
};

/// Rounds of distractor fetches before giving up on finding distinct names
const MAX_DISTRACTOR_ROUNDS: usize = 5;

/// Builds a question around a random species.
///
/// The target is fetched once more on a fresh id when the first fetch fails. Any other
/// failure aborts the question.
pub async fn build_question<S: PokemonSource + ?Sized>(
    source: &S,
    mode: AnswerMode,
    config: &Config,
    rng: &mut impl Rng,
) -> Result<QuizQuestion, PokeQuizError> {
    let mut pokemon = fetch_target(source, config.max_species_id, rng).await?;
    pokemon.is_shiny = rng.gen_bool(config.shiny_chance.clamp(0.0, 1.0));

    tracing::debug!(
        "building {:?} question for #{} ({})",
        mode,
        pokemon.id,
        pokemon.name
    );

    let question = match mode {
        AnswerMode::Input => QuizQuestion {
            correct_answer: pokemon.name.clone(),
            choices: Vec::new(),
            correct_pokemon: pokemon,
            mode,
        },
        AnswerMode::Choice => {
            let mut choices =
                distractor_names(source, &pokemon, config.max_species_id, rng).await?;
            choices.push(pokemon.name.clone());
            choices.shuffle(rng);

            QuizQuestion {
                correct_answer: pokemon.name.clone(),
                choices,
                correct_pokemon: pokemon,
                mode,
            }
        }
        AnswerMode::Weakness => {
            let weakness = weakness_choices(&pokemon.types, rng)?;
            let correct_answer = weakness.answer.to_string();

            let mut choices: Vec<String> = weakness
                .distractors
                .iter()
                .map(ToString::to_string)
                .collect();
            choices.push(correct_answer.clone());
            choices.shuffle(rng);

            QuizQuestion {
                correct_pokemon: pokemon,
                choices,
                correct_answer,
                mode,
            }
        }
    };

    Ok(question)
}

async fn fetch_target<S: PokemonSource + ?Sized>(
    source: &S,
    max_id: i64,
    rng: &mut impl Rng,
) -> Result<Pokemon, PokeQuizError> {
    let id = rng.gen_range(1..=max_id);

    match source.fetch_pokemon(id).await {
        Ok(pokemon) => Ok(pokemon),
        Err(e) => {
            tracing::warn!("failed to fetch species #{id}, retrying once: {e}");
            let retry = loop {
                let candidate = rng.gen_range(1..=max_id);
                if candidate != id || max_id == 1 {
                    break candidate;
                }
            };
            source.fetch_pokemon(retry).await
        }
    }
}

/// [`DISTRACTOR_COUNT`] names of other species, distinct from each other and from the answer
async fn distractor_names<S: PokemonSource + ?Sized>(
    source: &S,
    target: &Pokemon,
    max_id: i64,
    rng: &mut impl Rng,
) -> Result<Vec<String>, PokeQuizError> {
    let mut seen_ids = HashSet::from([target.id]);
    let mut names: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT + 1);

    for _ in 0..MAX_DISTRACTOR_ROUNDS {
        let missing = DISTRACTOR_COUNT - names.len();
        let ids = fresh_ids(&mut seen_ids, missing, max_id, rng);
        if ids.is_empty() {
            break;
        }

        let fetched =
            futures::future::try_join_all(ids.iter().map(|id| source.fetch_name(*id))).await?;

        for name in fetched {
            if name != target.name && !names.contains(&name) && names.len() < DISTRACTOR_COUNT {
                names.push(name);
            }
        }

        if names.len() == DISTRACTOR_COUNT {
            return Ok(names);
        }
    }

    Err(PokeQuizError::NotEnoughDistractors {
        available: names.len(),
        needed: DISTRACTOR_COUNT,
    })
}

/// Up to `count` random ids in `1..=max_id` that are not in `seen`, marking them as seen
fn fresh_ids(seen: &mut HashSet<i64>, count: usize, max_id: i64, rng: &mut impl Rng) -> Vec<i64> {
    let unseen: Vec<i64> = (1..=max_id).filter(|id| !seen.contains(id)).collect();
    let ids: Vec<i64> = unseen.choose_multiple(rng, count).copied().collect();
    seen.extend(&ids);

    ids
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{
        collections::{HashMap, HashSet},
        sync::atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::entities::{PokemonType, artwork_url};

    /// In-memory species data; ids in `failing` behave like network errors
    pub(crate) struct FakeSource {
        pub names: HashMap<i64, String>,
        pub failing: HashSet<i64>,
        /// Every lookup, successful or not
        pub fetches: AtomicUsize,
    }

    impl FakeSource {
        pub(crate) fn new(names: &[&str]) -> Self {
            Self {
                names: names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| (i as i64 + 1, name.to_string()))
                    .collect(),
                failing: HashSet::new(),
                fetches: AtomicUsize::new(0),
            }
        }

        pub(crate) fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }

        fn lookup(&self, id: i64) -> Result<String, PokeQuizError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);

            if self.failing.contains(&id) {
                return Err(PokeQuizError::Client(format!("species #{id} unavailable")));
            }

            self.names
                .get(&id)
                .cloned()
                .ok_or(PokeQuizError::MissingData { what: "name", id })
        }
    }

    #[async_trait]
    impl PokemonSource for FakeSource {
        async fn fetch_pokemon(&self, id: i64) -> Result<Pokemon, PokeQuizError> {
            Ok(Pokemon {
                id,
                name: self.lookup(id)?,
                image: artwork_url(id),
                shiny_image: None,
                is_shiny: false,
                cry: None,
                flavor_text: None,
                types: vec![PokemonType::Grass, PokemonType::Poison],
                genus: None,
            })
        }

        async fn fetch_name(&self, id: i64) -> Result<String, PokeQuizError> {
            self.lookup(id)
        }
    }

    pub(crate) fn config(max_species_id: i64) -> Config {
        Config {
            max_species_id,
            shiny_chance: 0.0,
            ..Default::default()
        }
    }

    const NAMES: [&str; 8] = [
        "フシギダネ",
        "フシギソウ",
        "フシギバナ",
        "ヒトカゲ",
        "リザード",
        "リザードン",
        "ゼニガメ",
        "カメール",
    ];

    #[tokio::test]
    async fn choice_questions_have_four_distinct_options() {
        let source = FakeSource::new(&NAMES);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let question = build_question(&source, AnswerMode::Choice, &config(8), &mut rng)
                .await
                .unwrap();

            let distinct: HashSet<&String> = question.choices.iter().collect();
            assert_eq!(question.choices.len(), 4);
            assert_eq!(distinct.len(), 4);
            assert_eq!(
                question
                    .choices
                    .iter()
                    .filter(|c| **c == question.correct_answer)
                    .count(),
                1
            );
            assert_eq!(question.correct_answer, question.correct_pokemon.name);
        }
    }

    #[tokio::test]
    async fn duplicated_names_are_not_offered_twice() {
        // every distractor id but one shares a spelling
        let source = FakeSource::new(&["A", "B", "B", "B", "B", "C", "D"]);

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let question = build_question(&source, AnswerMode::Choice, &config(7), &mut rng)
                .await
                .unwrap();

            let distinct: HashSet<&String> = question.choices.iter().collect();
            assert_eq!(distinct.len(), 4);
        }
    }

    #[tokio::test]
    async fn too_few_species_is_an_error() {
        let source = FakeSource::new(&["A", "A", "A", "B"]);
        let mut rng = StdRng::seed_from_u64(7);

        let result = build_question(&source, AnswerMode::Choice, &config(4), &mut rng).await;
        assert!(matches!(
            result,
            Err(PokeQuizError::NotEnoughDistractors { needed: 3, .. })
        ));
    }

    #[tokio::test]
    async fn input_questions_have_no_choices() {
        let source = FakeSource::new(&NAMES);
        let mut rng = StdRng::seed_from_u64(3);

        let question = build_question(&source, AnswerMode::Input, &config(8), &mut rng)
            .await
            .unwrap();

        assert!(question.choices.is_empty());
        assert_eq!(question.correct_answer, question.correct_pokemon.name);
    }

    #[tokio::test]
    async fn weakness_questions_offer_one_true_weakness() {
        let source = FakeSource::new(&NAMES);
        let weak_to: Vec<String> = crate::weakness::weaknesses(&[
            PokemonType::Grass,
            PokemonType::Poison,
        ])
        .iter()
        .map(ToString::to_string)
        .collect();

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let question = build_question(&source, AnswerMode::Weakness, &config(8), &mut rng)
                .await
                .unwrap();

            assert_eq!(question.choices.len(), 4);
            let right: Vec<&String> = question
                .choices
                .iter()
                .filter(|c| weak_to.contains(c))
                .collect();
            assert_eq!(right, vec![&question.correct_answer]);
        }
    }

    #[tokio::test]
    async fn failed_target_is_retried_once() {
        let mut source = FakeSource::new(&["A", "B"]);
        source.failing.insert(1);

        let mut rng = StdRng::seed_from_u64(11);
        let pokemon = fetch_target(&source, 2, &mut rng).await.unwrap();
        assert_eq!(pokemon.id, 2);

        source.failing.insert(2);
        assert!(fetch_target(&source, 2, &mut rng).await.is_err());
    }

    #[test]
    fn fresh_ids_skip_seen_ones() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = HashSet::from([1, 2]);

        let ids = fresh_ids(&mut seen, 10, 5, &mut rng);
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(sorted, vec![3, 4, 5]);
        assert!(fresh_ids(&mut seen, 1, 5, &mut rng).is_empty());
    }
}
