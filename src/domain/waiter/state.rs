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

//! Lifecycle state classification

use crate::infrastructure::constants::{
    FAILURE_DETAIL_FIELDS, FIELD_METADATA, FIELD_STATE, FIELD_STATUS,
};
use crate::infrastructure::http::FetchError;
use serde_json::Value;
use std::fmt;

/// Normalized lifecycle state of a remote resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Pending,
    Succeeded,
    Failed,
}

impl LifecycleState {
    /// Map a provider state string onto the closed set.
    ///
    /// Unrecognized values are treated as still in progress.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "AVAILABLE" | "ACTIVE" | "READY" | "DONE" => LifecycleState::Succeeded,
            "FAILED" => LifecycleState::Failed,
            _ => LifecycleState::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Pending => "PENDING",
            LifecycleState::Succeeded => "SUCCEEDED",
            LifecycleState::Failed => "FAILED",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn metadata(document: &Value) -> Option<&serde_json::Map<String, Value>> {
    document.get(FIELD_METADATA).and_then(Value::as_object)
}

fn non_empty_str<'a>(object: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Raw state string from `metadata.state`, falling back to `metadata.status`.
pub fn raw_state(document: &Value) -> Option<&str> {
    let metadata = metadata(document)?;
    non_empty_str(metadata, FIELD_STATE).or_else(|| non_empty_str(metadata, FIELD_STATUS))
}

/// Classify a single-resource document. Never fails: anything without a
/// recognizable state degrades to `Pending`.
pub fn classify_state(document: &Value) -> LifecycleState {
    raw_state(document)
        .map(LifecycleState::from_raw)
        .unwrap_or(LifecycleState::Pending)
}

/// Human readable failure description carried in the metadata, if any.
pub fn failure_detail(document: &Value) -> Option<String> {
    let metadata = metadata(document)?;
    FAILURE_DETAIL_FIELDS
        .iter()
        .find_map(|key| non_empty_str(metadata, key))
        .map(str::to_string)
}

/// Decides, per fetch result, whether a wait has reached a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalTest {
    /// Read the lifecycle state out of the fetched document.
    State,
    /// The resource is gone once the server answers 404.
    Deletion,
}

impl TerminalTest {
    /// Returns `None` when the result is a transient error that says nothing
    /// about the resource.
    pub fn evaluate(&self, result: &Result<Value, FetchError>) -> Option<LifecycleState> {
        match (self, result) {
            (TerminalTest::State, Ok(document)) => Some(classify_state(document)),
            (TerminalTest::State, Err(_)) => None,
            (TerminalTest::Deletion, Ok(_)) => Some(LifecycleState::Pending),
            (TerminalTest::Deletion, Err(err)) if err.status() == Some(404) => {
                Some(LifecycleState::Succeeded)
            }
            (TerminalTest::Deletion, Err(_)) => None,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            TerminalTest::State => "resource to become available",
            TerminalTest::Deletion => "resource deletion",
        }
    }
}
