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

use crate::shared::error::CloudError;
use std::fmt;

/// Terminal result of a wait. Intermediate poll attempts are never
/// surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome {
    Completed,
    Failed(String),
    TimedOut,
    /// Waiting was not requested, or nothing trackable was captured.
    NotApplicable,
}

impl WaitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, WaitOutcome::Completed | WaitOutcome::NotApplicable)
    }

    /// Map the outcome onto the crate error type so the command layer can
    /// turn failures and timeouts into a non-zero exit.
    pub fn into_result(self, timeout_secs: u64) -> Result<(), CloudError> {
        match self {
            WaitOutcome::Completed | WaitOutcome::NotApplicable => Ok(()),
            WaitOutcome::Failed(reason) => Err(CloudError::WaitFailed(reason)),
            WaitOutcome::TimedOut => Err(CloudError::Timeout(format!(
                "resource did not reach a terminal state within {}s; it may still be in progress",
                timeout_secs
            ))),
        }
    }
}

impl fmt::Display for WaitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitOutcome::Completed => f.write_str("completed"),
            WaitOutcome::Failed(reason) => write!(f, "failed: {}", reason),
            WaitOutcome::TimedOut => f.write_str("timed out"),
            WaitOutcome::NotApplicable => f.write_str("not applicable"),
        }
    }
}
