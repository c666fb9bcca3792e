// SPDX-License-Identifier: GPL-3.0-only

//! Question building, scoring and the time attack clock.

mod builder;
mod session;
mod time_attack;

pub use builder::build_question;
pub use session::{AnswerResult, LEVEL_STEP, QuizSession, is_correct};
pub use time_attack::{TimeAttack, within};
