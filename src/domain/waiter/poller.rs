// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Fixed-cadence poll loop shared by every kind of wait

use super::outcome::WaitOutcome;
use super::state::{failure_detail, raw_state, LifecycleState, TerminalTest};
use crate::infrastructure::constants::DEFAULT_POLL_INTERVAL_SECS;
use crate::infrastructure::http::ResourceFetcher;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// One fetch-and-classify cycle. Only logged, never retained.
#[derive(Debug)]
struct PollAttempt<'a> {
    number: u64,
    at: DateTime<Utc>,
    raw_state: Option<&'a str>,
    result: Result<LifecycleState, String>,
}

impl PollAttempt<'_> {
    fn log(&self, url: &str) {
        match &self.result {
            Ok(state) => debug!(
                url,
                attempt = self.number,
                at = %self.at.to_rfc3339(),
                raw_state = self.raw_state.unwrap_or("-"),
                state = %state,
                "poll attempt"
            ),
            Err(error) => debug!(
                url,
                attempt = self.number,
                at = %self.at.to_rfc3339(),
                error = %error,
                "transient poll error, retrying on next tick"
            ),
        }
    }
}

#[derive(Clone)]
pub struct Poller {
    fetcher: Arc<dyn ResourceFetcher>,
    interval: Duration,
}

impl Poller {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>) -> Self {
        Self {
            fetcher,
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Poll `url` until `test` reports a terminal state, the deadline
    /// passes, or `cancel` fires.
    ///
    /// The first fetch happens immediately. Transient fetch errors never end
    /// the loop; only the deadline bounds it. An in-flight fetch is dropped as
    /// soon as the deadline or the token fires.
    pub async fn poll(
        &self,
        url: &str,
        test: TerminalTest,
        deadline: Instant,
        cancel: &CancellationToken,
    ) -> WaitOutcome {
        if url.trim().is_empty() {
            return WaitOutcome::NotApplicable;
        }

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let expired = tokio::time::sleep_until(deadline);
        tokio::pin!(expired);

        let mut number = 0u64;
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return WaitOutcome::TimedOut,
                _ = &mut expired => return WaitOutcome::TimedOut,
                _ = ticker.tick() => {}
            }

            number += 1;
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return WaitOutcome::TimedOut,
                _ = &mut expired => return WaitOutcome::TimedOut,
                result = self.fetcher.fetch(url) => result,
            };

            let verdict = test.evaluate(&result);
            let document = result.as_ref().ok();
            let attempt = PollAttempt {
                number,
                at: Utc::now(),
                raw_state: document.and_then(raw_state),
                result: match (&verdict, &result) {
                    (Some(state), _) => Ok(*state),
                    (None, Err(err)) => Err(err.to_string()),
                    (None, Ok(_)) => Err("unclassifiable response".to_string()),
                },
            };
            attempt.log(url);

            match verdict {
                Some(LifecycleState::Succeeded) => {
                    info!(url, attempts = number, "{} finished", test.describe());
                    return WaitOutcome::Completed;
                }
                Some(LifecycleState::Failed) => {
                    let reason = match document.and_then(failure_detail) {
                        Some(detail) => format!("{} entered state FAILED: {}", url, detail),
                        None => format!("{} entered state FAILED", url),
                    };
                    return WaitOutcome::Failed(reason);
                }
                Some(LifecycleState::Pending) | None => continue,
            }
        }
    }
}
