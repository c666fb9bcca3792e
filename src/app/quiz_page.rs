// SPDX-License-Identifier: GPL-3.0-only

use std::{sync::Arc, time::Duration};

use rand::{SeedableRng, rngs::StdRng};

use super::PokeQuiz;
use crate::{
    core::{api::PokeApi, media},
    entities::{AnswerMode, Presentation, QuizQuestion},
    fl,
    quiz::{QuizSession, TimeAttack, within},
    utils::PokeQuizError,
};

/// Questions in a row that may fail to load before the game ends
const MAX_FAILED_QUESTIONS: u32 = 3;

/// What a line typed while a question is shown means
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Answer(String),
    /// Open the artwork in the system viewer
    Open,
    Cry,
    /// Switch to the next presentation and show the question again
    ToggleView,
    /// Switch to the next answer mode, starting with the next question
    SwitchMode,
    Quit,
}

impl Action {
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let action = match line {
            "" => return None,
            ":o" => Action::Open,
            ":c" => Action::Cry,
            ":v" => Action::ToggleView,
            ":m" => Action::SwitchMode,
            ":q" => Action::Quit,
            answer => Action::Answer(answer.to_string()),
        };

        Some(action)
    }
}

/// How a question ended
enum Resolution {
    Answered,
    Quit,
    /// Input ended or the clock ran out
    Interrupted,
}

impl PokeQuiz {
    pub(super) async fn play(
        &mut self,
        mode: AnswerMode,
        presentation: Presentation,
    ) -> Result<(), PokeQuizError> {
        let mut session = self.new_session(mode);
        self.question_loop(&mut session, presentation, None).await?;

        println!(
            "{}",
            fl!(
                "game-over",
                score = session.score(),
                answered = session.answered(),
                best_streak = session.best_streak()
            )
        );

        let breaks = self
            .records
            .record_game(session.score(), session.best_streak());
        if breaks.best_score {
            println!("{}", fl!("record-best-score"));
        }
        if breaks.max_streak {
            println!("{}", fl!("record-max-streak"));
        }

        self.save_records().await;
        Ok(())
    }

    pub(super) async fn time_attack(
        &mut self,
        mode: AnswerMode,
        presentation: Presentation,
        limit: Option<u64>,
    ) -> Result<(), PokeQuizError> {
        let limits = &self.config.time_limits;
        let limit = match limit {
            Some(limit) if limits.contains(&limit) => limit,
            Some(limit) => {
                let allowed = limits
                    .iter()
                    .map(u64::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("{}", fl!("time-limit-invalid", limit = limit, allowed = allowed));
                return Ok(());
            }
            None => limits.first().copied().unwrap_or(60),
        };

        println!("{}", fl!("time-attack-start", seconds = limit));

        let clock = TimeAttack::start(Duration::from_secs(limit));
        let mut session = self.new_session(mode);
        self.question_loop(&mut session, presentation, Some(&clock))
            .await?;

        println!(
            "{}",
            fl!(
                "time-attack-over",
                score = session.score(),
                seconds = clock.limit_secs()
            )
        );

        if self.records.record_time_attack(clock.limit_secs(), session.score()) {
            println!("{}", fl!("record-time-attack"));
        }
        self.records.record_game(0, session.best_streak());

        self.save_records().await;
        Ok(())
    }

    fn new_session(&self, mode: AnswerMode) -> QuizSession<PokeApi> {
        QuizSession::new(
            Arc::clone(&self.api),
            self.config.clone(),
            mode,
            StdRng::from_entropy(),
        )
    }

    /// Asks questions until the player quits, input ends or `clock` runs out
    async fn question_loop(
        &mut self,
        session: &mut QuizSession<PokeApi>,
        mut presentation: Presentation,
        clock: Option<&TimeAttack>,
    ) -> Result<(), PokeQuizError> {
        println!("{}", fl!("quiz-help"));

        let mut failures = 0;
        loop {
            if clock.is_some_and(TimeAttack::is_over) {
                return Ok(());
            }

            let Some(next) = within(clock, session.next_question()).await else {
                return Ok(());
            };

            let question = match next {
                Ok(question) => {
                    failures = 0;
                    question
                }
                Err(e) => {
                    tracing::error!("failed to load question: {e}");
                    failures += 1;
                    if failures >= MAX_FAILED_QUESTIONS {
                        return Err(e);
                    }
                    println!("{}", fl!("question-failed"));
                    continue;
                }
            };

            let resolution = self
                .ask_question(session, &question, &mut presentation, clock)
                .await?;

            match resolution {
                Resolution::Answered => {}
                Resolution::Quit | Resolution::Interrupted => return Ok(()),
            }
        }
    }

    async fn ask_question(
        &mut self,
        session: &mut QuizSession<PokeApi>,
        question: &QuizQuestion,
        presentation: &mut Presentation,
        clock: Option<&TimeAttack>,
    ) -> Result<Resolution, PokeQuizError> {
        show_question(session, question, *presentation, clock).await;

        loop {
            let label = match clock {
                Some(clock) => fl!("prompt-timed", seconds = clock.remaining().as_secs()),
                None => fl!("prompt"),
            };
            let line = match clock {
                Some(clock) => self.prompt.ask_before(&label, clock).await?,
                None => self.prompt.ask(&label).await?,
            };
            let Some(line) = line else {
                return Ok(Resolution::Interrupted);
            };

            match Action::parse(&line) {
                None => continue,
                Some(Action::Quit) => return Ok(Resolution::Quit),
                Some(Action::Open) => {
                    if let Err(e) = media::open_url(question.correct_pokemon.display_image()) {
                        tracing::warn!("failed to open artwork: {e}");
                    }
                }
                Some(Action::Cry) => play_cry(question, clock).await,
                Some(Action::ToggleView) => {
                    *presentation = presentation.next();
                    show_question(session, question, *presentation, clock).await;
                }
                Some(Action::SwitchMode) => {
                    let mode = session.mode().next();
                    session.set_mode(mode);
                    println!("{}", fl!("mode-switched", mode = mode.to_string()));
                }
                Some(Action::Answer(answer)) => {
                    // answers typed after the deadline do not count
                    if clock.is_some_and(TimeAttack::is_over) {
                        return Ok(Resolution::Interrupted);
                    }

                    self.score_answer(session, question, &answer);
                    return Ok(Resolution::Answered);
                }
            }
        }
    }

    fn score_answer(
        &mut self,
        session: &mut QuizSession<PokeApi>,
        question: &QuizQuestion,
        answer: &str,
    ) {
        let result = session.answer(question, answer);
        let pokemon = &question.correct_pokemon;

        if !result.correct {
            println!(
                "{}",
                fl!(
                    "answer-wrong",
                    answer = question.correct_answer.as_str(),
                    name = pokemon.name.as_str()
                )
            );
            return;
        }

        println!("{}", fl!("answer-correct", streak = result.streak));
        if self.records.record_answer(true, pokemon.id) {
            println!("{}", fl!("caught-new", name = pokemon.name.as_str()));
        }
        if result.leveled_up {
            println!("{}", fl!("level-up", level = session.level()));
        }
    }
}

async fn show_question(
    session: &QuizSession<PokeApi>,
    question: &QuizQuestion,
    presentation: Presentation,
    clock: Option<&TimeAttack>,
) {
    let pokemon = &question.correct_pokemon;

    println!();
    println!(
        "{}",
        fl!(
            "question-header",
            mode = question.mode.to_string(),
            number = (session.answered() + 1),
            level = session.level(),
            score = session.score()
        )
    );

    if question.mode == AnswerMode::Weakness {
        let types = pokemon
            .types
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" / ");
        println!(
            "{}",
            fl!("weakness-question", name = pokemon.name.as_str(), types = types)
        );
    } else {
        match presentation {
            Presentation::Artwork => {
                println!("{}", fl!("show-artwork", url = pokemon.display_image()));
            }
            Presentation::Cry => {
                println!("{}", fl!("show-cry"));
                play_cry(question, clock).await;
            }
            Presentation::Pokedex => print_pokedex_entry(question),
        }
    }

    if pokemon.is_shiny {
        println!("{}", fl!("shiny"));
    }

    for (i, choice) in question.choices.iter().enumerate() {
        println!("  {}. {choice}", i + 1);
    }
}

fn print_pokedex_entry(question: &QuizQuestion) {
    let pokemon = &question.correct_pokemon;

    if let Some(genus) = &pokemon.genus {
        println!("{}", fl!("pokedex-genus", genus = genus.as_str()));
    }

    let types = pokemon
        .types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" / ");
    println!("{}", fl!("pokedex-types", types = types));

    match pokemon.redacted_flavor_text() {
        Some(text) => println!("{text}"),
        None => println!("{}", fl!("pokedex-no-entry")),
    }
}

/// Stops waiting on playback once the time attack clock runs out
async fn play_cry(question: &QuizQuestion, clock: Option<&TimeAttack>) {
    let Some(cry) = &question.correct_pokemon.cry else {
        println!("{}", fl!("no-cry"));
        return;
    };

    match within(clock, media::play_cry(cry)).await {
        Some(Ok(())) => {}
        Some(Err(e)) => tracing::warn!("failed to play cry: {e}"),
        None => tracing::debug!("deadline reached while the cry was playing"),
    }
}
