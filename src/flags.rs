// SPDX-License-Identifier: GPL-3.0-only

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::entities::{AnswerMode, Presentation};

/// Command line flags, parsed once in `main` and handed to the app.
#[derive(Debug, Parser)]
#[command(name = "pokequiz", version, about = "Pokémon trivia and shiritori in the terminal")]
pub struct Flags {
    /// PokéApi language code for names and Pokédex entries, overrides the config file
    #[arg(long, global = true)]
    pub language: Option<String>,

    /// Log more, repeat for even more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Answer questions until you quit
    Play(QuizArgs),
    /// Score as much as possible before the clock runs out
    TimeAttack {
        #[command(flatten)]
        quiz: QuizArgs,
        /// Seconds on the clock, one of the configured time limits
        #[arg(short, long)]
        limit: Option<u64>,
    },
    /// Chain Pokémon names against the computer
    Shiritori {
        /// Download the name roster again instead of using the cached one
        #[arg(long)]
        refresh: bool,
    },
    /// Show best scores, streaks and caught Pokémon
    Stats,
    /// Download or inspect the shiritori name roster
    Roster {
        #[arg(long)]
        refresh: bool,
        /// Only list names starting with this kana
        #[arg(long)]
        starting: Option<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Play(QuizArgs::default())
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct QuizArgs {
    #[arg(short, long, value_enum, default_value_t)]
    pub mode: AnswerMode,

    #[arg(short, long, value_enum, default_value_t)]
    pub presentation: Presentation,
}
