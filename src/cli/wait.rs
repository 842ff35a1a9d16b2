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

//! Wait façade used by mutating commands

use super::context::ExecutionContext;
use super::display::WaitProgress;
use crate::domain::config::ClientConfig;
use crate::domain::waiter::{
    extract_reference, Poller, ResourceReference, TerminalTest, WaitOutcome,
};
use crate::infrastructure::http::{resolve_url, ResourceFetcher};
use crate::shared::error::{CloudError, Result};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// What kind of mutation the command performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Create,
    Update,
    Delete,
}

impl CommandKind {
    pub fn terminal_test(&self) -> TerminalTest {
        match self {
            CommandKind::Create | CommandKind::Update => TerminalTest::State,
            CommandKind::Delete => TerminalTest::Deletion,
        }
    }
}

pub struct Waiter {
    poller: Poller,
    api_url: String,
    show_progress: bool,
}

impl Waiter {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, config: &ClientConfig) -> Self {
        Self {
            poller: Poller::new(fetcher).with_interval(config.poll_interval),
            api_url: config.api_url.clone(),
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Wait on whatever the command captured into `ctx`, if the user asked
    /// for it. The captured reference is consumed.
    pub async fn wait_if_requested(
        &self,
        kind: CommandKind,
        ctx: &mut ExecutionContext,
        requested: bool,
        timeout: Duration,
    ) -> Result<WaitOutcome> {
        if !requested {
            return Ok(WaitOutcome::NotApplicable);
        }
        match ctx.take() {
            Some(reference) => self.wait_for(kind.terminal_test(), &reference, timeout).await,
            None => {
                debug!("no resource reference captured, nothing to wait for");
                Ok(WaitOutcome::NotApplicable)
            }
        }
    }

    /// Same as [`wait_if_requested`](Self::wait_if_requested), reading the
    /// reference straight from a mutation response.
    pub async fn wait_for_response(
        &self,
        kind: CommandKind,
        response: &Value,
        requested: bool,
        timeout: Duration,
    ) -> Result<WaitOutcome> {
        if !requested {
            return Ok(WaitOutcome::NotApplicable);
        }
        match extract_reference(response) {
            Some(reference) => self.wait_for(kind.terminal_test(), &reference, timeout).await,
            None => Ok(WaitOutcome::NotApplicable),
        }
    }

    /// Resolve `reference`, then run the poll loop on its own task while the
    /// spinner ticks and Ctrl-C is watched.
    pub async fn wait_for(
        &self,
        test: TerminalTest,
        reference: &ResourceReference,
        timeout: Duration,
    ) -> Result<WaitOutcome> {
        let url = resolve_url(&self.api_url, reference)?;
        info!(url = %url, timeout_secs = timeout.as_secs(), "waiting for {}", test.describe());

        let progress = WaitProgress::start(self.show_progress, test.describe());
        let cancel = CancellationToken::new();
        let deadline = Instant::now() + timeout;

        let interrupt = tokio::spawn({
            let cancel = cancel.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    debug!("interrupted, abandoning wait");
                    cancel.cancel();
                }
            }
        });

        let poll = tokio::spawn({
            let poller = self.poller.clone();
            let cancel = cancel.clone();
            async move { poller.poll(&url, test, deadline, &cancel).await }
        });

        let joined = poll.await;
        interrupt.abort();

        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(e) => {
                progress.finish(&WaitOutcome::Failed(String::new()));
                return Err(CloudError::WaitFailed(format!("wait task aborted: {}", e)));
            }
        };

        progress.finish(&outcome);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::FetchError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Always answers with the same document and records requested URLs.
    struct FixedFetcher {
        document: Value,
        calls: AtomicUsize,
        urls: Mutex<Vec<String>>,
    }

    impl FixedFetcher {
        fn new(document: Value) -> Arc<Self> {
            Arc::new(Self {
                document,
                calls: AtomicUsize::new(0),
                urls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl ResourceFetcher for FixedFetcher {
        async fn fetch(&self, url: &str) -> std::result::Result<Value, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.urls.lock().unwrap().push(url.to_string());
            Ok(self.document.clone())
        }
    }

    fn config() -> ClientConfig {
        ClientConfig {
            api_url: "https://api.cloud.example.com/cloudapi/v6".to_string(),
            poll_interval: Duration::from_millis(10),
            ..Default::default()
        }
    }

    fn waiter(fetcher: Arc<FixedFetcher>) -> Waiter {
        Waiter::new(fetcher, &config()).with_progress(false)
    }

    #[test]
    fn test_command_kind_terminal_test() {
        assert_eq!(CommandKind::Create.terminal_test(), TerminalTest::State);
        assert_eq!(CommandKind::Update.terminal_test(), TerminalTest::State);
        assert_eq!(CommandKind::Delete.terminal_test(), TerminalTest::Deletion);
    }

    #[tokio::test]
    async fn test_not_requested_skips_network() {
        let fetcher = FixedFetcher::new(json!({"metadata": {"state": "AVAILABLE"}}));
        let mut ctx = ExecutionContext::new();
        ctx.capture_from(&json!({"href": "/volumes/1"}));

        let outcome = waiter(fetcher.clone())
            .wait_if_requested(CommandKind::Create, &mut ctx, false, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(outcome, WaitOutcome::NotApplicable);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_nothing_captured_is_not_applicable() {
        let fetcher = FixedFetcher::new(json!({"metadata": {"state": "AVAILABLE"}}));
        let mut ctx = ExecutionContext::new();

        let outcome = waiter(fetcher.clone())
            .wait_if_requested(CommandKind::Create, &mut ctx, true, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(outcome, WaitOutcome::NotApplicable);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_relative_reference_is_resolved_against_api_url() {
        let fetcher = FixedFetcher::new(json!({"metadata": {"state": "AVAILABLE"}}));
        let outcome = waiter(fetcher.clone())
            .wait_for_response(
                CommandKind::Update,
                &json!({"href": "/datacenters/1/servers/2"}),
                true,
                Duration::from_secs(5),
            )
            .await
            .unwrap();

        assert_eq!(outcome, WaitOutcome::Completed);
        let urls = fetcher.urls.lock().unwrap();
        assert_eq!(
            urls.as_slice(),
            ["https://api.cloud.example.com/cloudapi/v6/datacenters/1/servers/2"]
        );
    }

    #[tokio::test]
    async fn test_collection_response_is_not_applicable() {
        let fetcher = FixedFetcher::new(json!({"metadata": {"state": "AVAILABLE"}}));
        let outcome = waiter(fetcher.clone())
            .wait_for_response(
                CommandKind::Create,
                &json!({"href": "/volumes", "items": []}),
                true,
                Duration::from_secs(5),
            )
            .await
            .unwrap();
        assert_eq!(outcome, WaitOutcome::NotApplicable);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_pending_resource_times_out() {
        let fetcher = FixedFetcher::new(json!({"metadata": {"state": "BUSY"}}));
        let reference = ResourceReference::new("/volumes/1").unwrap();
        let outcome = waiter(fetcher)
            .wait_for(TerminalTest::State, &reference, Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(outcome, WaitOutcome::TimedOut);
    }
}
