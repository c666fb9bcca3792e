// SPDX-License-Identifier: GPL-3.0-only

use std::{future::Future, time::Duration};

use tokio::time::Instant;

/// Countdown for a time attack round
#[derive(Debug, Clone, Copy)]
pub struct TimeAttack {
    limit: Duration,
    deadline: Instant,
}

impl TimeAttack {
    /// Starts the clock now
    pub fn start(limit: Duration) -> Self {
        Self {
            limit,
            deadline: Instant::now() + limit,
        }
    }

    pub fn limit_secs(&self) -> u64 {
        self.limit.as_secs()
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn is_over(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

/// Runs `future` to completion, or until the deadline when there is a clock.
/// `None` means the clock ran out first.
pub async fn within<F: Future>(clock: Option<&TimeAttack>, future: F) -> Option<F::Output> {
    match clock {
        Some(clock) => tokio::time::timeout_at(clock.deadline(), future).await.ok(),
        None => Some(future.await),
    }
}
