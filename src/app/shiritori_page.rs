// SPDX-License-Identifier: GPL-3.0-only

use rand::{SeedableRng, rngs::StdRng};

use super::PokeQuiz;
use crate::{
    fl,
    shiritori::{Battle, ChatTurn, LossReason, Outcome, Phase, Sender, WinReason},
    utils::PokeQuizError,
};

impl PokeQuiz {
    pub(super) async fn shiritori(&mut self, refresh: bool) -> Result<(), PokeQuizError> {
        println!("{}", fl!("roster-loading"));
        let roster = self.load_roster(refresh).await?;
        println!("{}", fl!("roster-loaded", count = roster.len()));
        println!("{}", fl!("shiritori-help"));

        let mut battle = Battle::new(roster);
        let mut rng = StdRng::from_entropy();

        loop {
            match battle.start(&mut rng) {
                Ok(turn) => print_turn(turn),
                Err(e) => {
                    println!("{}", e.localized());
                    return Ok(());
                }
            }

            self.battle_loop(&mut battle, &mut rng).await?;

            if !self.prompt.confirm(&fl!("play-again")).await? {
                return Ok(());
            }
            battle.restart();
        }
    }

    /// Alternates turns until the battle is decided
    async fn battle_loop(
        &mut self,
        battle: &mut Battle,
        rng: &mut StdRng,
    ) -> Result<(), PokeQuizError> {
        loop {
            match battle.phase() {
                Phase::PlayerTurn { required } => {
                    let label = fl!("shiritori-prompt", mora = required.to_string());
                    let Some(line) = self.prompt.ask(&label).await? else {
                        battle.resign();
                        continue;
                    };

                    let word = line.trim();
                    if word.is_empty() {
                        continue;
                    }
                    if word == ":q" {
                        battle.resign();
                        continue;
                    }

                    match battle.submit(word) {
                        Ok(_) => {
                            if let Some(turn) = battle.history().last() {
                                print_turn(turn);
                            }
                        }
                        Err(e) => println!("{}", e.localized()),
                    }
                }
                Phase::OpponentTurn { .. } => match battle.opponent_move(rng) {
                    Ok(Some(turn)) => print_turn(turn),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::error!("opponent could not move: {e}");
                        return Ok(());
                    }
                },
                Phase::Finished(outcome) => {
                    println!("{}", outcome_message(outcome));
                    println!("{}", fl!("shiritori-chain-length", count = battle.history().len()));
                    return Ok(());
                }
                Phase::Idle => return Ok(()),
            }
        }
    }
}

fn print_turn(turn: &ChatTurn) {
    let speaker = match turn.sender {
        Sender::Player => fl!("shiritori-you"),
        Sender::Opponent => fl!("shiritori-opponent"),
    };
    println!("{speaker}: {}", turn.word);

    if turn.sender == Sender::Opponent {
        if let Some(image) = &turn.image {
            println!("    {image}");
        }
    }
}

fn outcome_message(outcome: Outcome) -> String {
    match outcome {
        Outcome::PlayerWon(WinReason::OpponentStuck) => fl!("shiritori-win-stuck"),
        Outcome::PlayerWon(WinReason::OpponentPlayedTerminal) => fl!("shiritori-win-terminal"),
        Outcome::OpponentWon(LossReason::PlayerPlayedTerminal) => fl!("shiritori-loss-terminal"),
        Outcome::OpponentWon(LossReason::Resigned) => fl!("shiritori-loss-resigned"),
    }
}
