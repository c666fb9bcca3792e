// SPDX-License-Identifier: GPL-3.0-only

//! Weakness lookup over a simplified, one-directional type chart.
//!
//! Only super-effective relations are modeled. Resistances, immunities and
//! abilities are ignored, so a weakness here is "some attacking type that is
//! strong against at least one of the defending types".

use rand::{Rng, seq::SliceRandom};

use crate::{entities::PokemonType, fl, utils::PokeQuizError};

/// Number of wrong answers offered next to the right one
pub const DISTRACTOR_COUNT: usize = 3;

/// Attacking type and the defending types it is super-effective against
const SUPER_EFFECTIVE: &[(PokemonType, &[PokemonType])] = {
    use PokemonType::*;
    &[
        (Normal, &[]),
        (Fire, &[Grass, Ice, Bug, Steel]),
        (Water, &[Fire, Ground, Rock]),
        (Electric, &[Water, Flying]),
        (Grass, &[Water, Ground, Rock]),
        (Ice, &[Grass, Ground, Flying, Dragon]),
        (Fighting, &[Normal, Ice, Rock, Dark, Steel]),
        (Poison, &[Grass, Fairy]),
        (Ground, &[Fire, Electric, Poison, Rock, Steel]),
        (Flying, &[Grass, Fighting, Bug]),
        (Psychic, &[Fighting, Poison]),
        (Bug, &[Grass, Psychic, Dark]),
        (Rock, &[Fire, Ice, Flying, Bug]),
        (Ghost, &[Psychic, Ghost]),
        (Dragon, &[Dragon]),
        (Dark, &[Psychic, Ghost]),
        (Steel, &[Ice, Rock, Fairy]),
        (Fairy, &[Fighting, Dragon, Dark]),
    ]
};

/// Right answer of a weakness question
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WeaknessAnswer {
    Type(PokemonType),
    /// No attacking type qualifies
    None,
}

impl std::fmt::Display for WeaknessAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeaknessAnswer::Type(pokemon_type) => write!(f, "{pokemon_type}"),
            WeaknessAnswer::None => write!(f, "{}", fl!("weakness-none")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeaknessChoices {
    pub answer: WeaknessAnswer,
    pub distractors: Vec<PokemonType>,
}

/// Attacking types super-effective against any of `defending`, in chart order and without duplicates
pub fn weaknesses(defending: &[PokemonType]) -> Vec<PokemonType> {
    SUPER_EFFECTIVE
        .iter()
        .filter(|(_, strong_against)| defending.iter().any(|t| strong_against.contains(t)))
        .map(|(attacker, _)| *attacker)
        .collect()
}

/// Samples the right answer and [`DISTRACTOR_COUNT`] wrong ones for a weakness question.
///
/// Distractors are drawn without replacement from the types that are not weaknesses,
/// so they are always distinct and never a valid answer.
pub fn weakness_choices(
    defending: &[PokemonType],
    rng: &mut impl Rng,
) -> Result<WeaknessChoices, PokeQuizError> {
    let weak_to = weaknesses(defending);

    let answer = weak_to
        .choose(rng)
        .map_or(WeaknessAnswer::None, |t| WeaknessAnswer::Type(*t));

    let pool: Vec<PokemonType> = PokemonType::ALL
        .iter()
        .copied()
        .filter(|t| !weak_to.contains(t))
        .collect();

    if pool.len() < DISTRACTOR_COUNT {
        return Err(PokeQuizError::NotEnoughDistractors {
            available: pool.len(),
            needed: DISTRACTOR_COUNT,
        });
    }

    let distractors = pool
        .choose_multiple(rng, DISTRACTOR_COUNT)
        .copied()
        .collect();

    Ok(WeaknessChoices {
        answer,
        distractors,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use PokemonType::*;

    #[test]
    fn chart_lists_every_attacker_once() {
        let attackers: HashSet<_> = SUPER_EFFECTIVE.iter().map(|(a, _)| *a).collect();
        assert_eq!(attackers.len(), PokemonType::ALL.len());
    }

    #[test]
    fn single_types_have_known_weaknesses() {
        assert_eq!(weaknesses(&[Normal]), vec![Fighting]);
        assert_eq!(weaknesses(&[Fire]), vec![Water, Ground, Rock]);
        assert_eq!(weaknesses(&[Dragon]), vec![Ice, Dragon, Fairy]);
    }

    #[test]
    fn dual_types_union_without_duplicates() {
        // Fire, Ice, Poison, Flying and Bug hit grass; Ground and Psychic hit poison
        assert_eq!(
            weaknesses(&[Grass, Poison]),
            vec![Fire, Ice, Poison, Ground, Flying, Psychic, Bug]
        );

        let both = weaknesses(&[Rock, Ground]);
        let unique: HashSet<_> = both.iter().collect();
        assert_eq!(both.len(), unique.len());
    }

    #[test]
    fn every_type_combination_has_a_weakness() {
        for a in PokemonType::ALL {
            assert!(!weaknesses(&[*a]).is_empty(), "{a:?} has no weakness");
            for b in PokemonType::ALL {
                assert!(!weaknesses(&[*a, *b]).is_empty());
            }
        }
    }

    #[test]
    fn empty_input_falls_back_to_none() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(weaknesses(&[]).is_empty());

        let choices = weakness_choices(&[], &mut rng).unwrap();
        assert_eq!(choices.answer, WeaknessAnswer::None);
        assert_eq!(choices.distractors.len(), DISTRACTOR_COUNT);
    }

    #[test]
    fn distractors_are_never_weaknesses() {
        let mut rng = StdRng::seed_from_u64(42);

        for a in PokemonType::ALL {
            for b in PokemonType::ALL {
                let defending = [*a, *b];
                let weak_to = weaknesses(&defending);

                for _ in 0..10 {
                    let choices = weakness_choices(&defending, &mut rng).unwrap();
                    let WeaknessAnswer::Type(answer) = choices.answer else {
                        panic!("{defending:?} should have a weakness");
                    };
                    assert!(weak_to.contains(&answer));

                    assert_eq!(choices.distractors.len(), DISTRACTOR_COUNT);
                    let unique: HashSet<_> = choices.distractors.iter().collect();
                    assert_eq!(unique.len(), DISTRACTOR_COUNT);
                    assert!(!choices.distractors.contains(&answer));
                    assert!(choices.distractors.iter().all(|d| !weak_to.contains(d)));
                }
            }
        }
    }

    #[test]
    fn answers_cover_the_whole_weakness_list() {
        let mut rng = StdRng::seed_from_u64(1);
        let seen: HashSet<_> = (0..200)
            .map(|_| weakness_choices(&[Grass], &mut rng).unwrap().answer)
            .collect();

        let expected: HashSet<_> = weaknesses(&[Grass])
            .into_iter()
            .map(WeaknessAnswer::Type)
            .collect();
        assert_eq!(seen, expected);
    }
}
