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

//! Per-invocation state threaded through command execution

use crate::domain::waiter::{extract_reference, ResourceReference};
use serde_json::Value;
use tracing::debug;

/// Holds the single resource reference captured by the current command.
///
/// The command layer writes it right after a mutation and the wait façade
/// takes it once. A fresh invocation must start from [`reset`](Self::reset).
#[derive(Debug, Default)]
pub struct ExecutionContext {
    captured: Option<ResourceReference>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.captured = None;
    }

    /// Record a reference. Last write wins.
    pub fn capture(&mut self, reference: ResourceReference) {
        debug!(reference = %reference, "captured resource reference");
        self.captured = Some(reference);
    }

    /// Inspect a response and capture its self-reference, if it has one.
    /// A response without one leaves any earlier capture in place.
    pub fn capture_from(&mut self, response: &Value) -> Option<&ResourceReference> {
        if let Some(reference) = extract_reference(response) {
            self.capture(reference);
        }
        self.captured.as_ref()
    }

    pub fn current(&self) -> Option<&ResourceReference> {
        self.captured.as_ref()
    }

    pub fn take(&mut self) -> Option<ResourceReference> {
        self.captured.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_last_write_wins() {
        let mut ctx = ExecutionContext::new();
        ctx.capture_from(&json!({"href": "/volumes/1"}));
        ctx.capture_from(&json!({"href": "/volumes/2"}));
        assert_eq!(ctx.current().map(|r| r.as_str()), Some("/volumes/2"));
    }

    #[test]
    fn test_response_without_reference_keeps_capture() {
        let mut ctx = ExecutionContext::new();
        ctx.capture_from(&json!({"href": "/volumes/1"}));
        ctx.capture_from(&json!({"items": [], "href": "/volumes"}));
        ctx.capture_from(&Value::Null);
        assert_eq!(ctx.current().map(|r| r.as_str()), Some("/volumes/1"));
    }

    #[test]
    fn test_take_reads_once() {
        let mut ctx = ExecutionContext::new();
        ctx.capture_from(&json!({"href": "/volumes/1"}));
        assert!(ctx.take().is_some());
        assert!(ctx.take().is_none());
    }

    #[test]
    fn test_reset_between_invocations() {
        let mut ctx = ExecutionContext::new();
        ctx.capture_from(&json!({"href": "/volumes/1"}));

        ctx.reset();
        ctx.capture_from(&json!({"deleted": true}));
        assert!(ctx.take().is_none());
    }
}
