// SPDX-License-Identifier: GPL-3.0-only

//! Word-chaining battle over real species names.

mod battle;
pub mod kana;
mod roster;

pub use battle::{Battle, ChatTurn, LossReason, Outcome, Phase, Sender, ShiritoriError, WinReason};
pub use roster::{Roster, RosterEntry};
