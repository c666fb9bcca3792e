// SPDX-License-Identifier: GPL-3.0-only

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::{quiz::TimeAttack, utils::PokeQuizError};

/// Line-based input from stdin
pub struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Prints `label` and waits for a line, `None` on end of input
    pub async fn ask(&mut self, label: &str) -> Result<Option<String>, PokeQuizError> {
        print_label(label)?;
        Ok(self.lines.next_line().await?)
    }

    /// Like [`Prompt::ask`], but also gives up with `None` once `clock` runs out
    pub async fn ask_before(
        &mut self,
        label: &str,
        clock: &TimeAttack,
    ) -> Result<Option<String>, PokeQuizError> {
        print_label(label)?;

        match tokio::time::timeout_at(clock.deadline(), self.lines.next_line()).await {
            Ok(line) => Ok(line?),
            Err(_) => {
                println!();
                Ok(None)
            }
        }
    }

    /// Yes/no question, anything but a yes is a no
    pub async fn confirm(&mut self, label: &str) -> Result<bool, PokeQuizError> {
        let answer = self.ask(label).await?.unwrap_or_default();
        Ok(is_yes(&answer))
    }
}

fn print_label(label: &str) -> Result<(), PokeQuizError> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{label} ")?;
    stdout.flush()?;

    Ok(())
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "はい" | "うん"
    )
}
