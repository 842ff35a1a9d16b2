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

use clap::Parser;
use cloudctl::cli::display::OutputFormat;
use cloudctl::cli::{CliArgs, ExecutionContext, Session};
use cloudctl::*;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod test_utils {
    use super::*;

    pub fn session_for(server: &MockServer) -> Session {
        let config = ClientConfig {
            api_url: server.uri(),
            credentials: Credentials::token("tok"),
            request_timeout: Duration::from_secs(2),
            poll_interval: Duration::from_millis(20),
            user_agent_product: Some("tests".to_string()),
        };
        Session::new(config, OutputFormat::Json, true).unwrap()
    }

    pub fn parse(args: &[&str]) -> CliArgs {
        let mut argv = vec!["cloudctl"];
        argv.extend_from_slice(args);
        CliArgs::try_parse_from(argv).unwrap()
    }
}

use test_utils::*;

#[tokio::test]
async fn test_create_and_wait_for_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/datacenters"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "id": "dc-1",
            "href": "/datacenters/dc-1",
            "metadata": {"state": "BUSY"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/datacenters/dc-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"metadata": {"state": "AVAILABLE"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let mut ctx = ExecutionContext::new();
    let args = parse(&[
        "create",
        "/datacenters",
        "--data",
        r#"{"properties": {"name": "dc"}}"#,
        "--wait-for-state",
        "--timeout",
        "5",
    ]);

    args.command.execute(&session, &mut ctx).await.unwrap();
}

#[tokio::test]
async fn test_failed_wait_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/servers/7"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"href": "/servers/7"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/servers/7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"metadata": {"state": "FAILED"}})),
        )
        .mount(&server)
        .await;

    let session = session_for(&server);
    let mut ctx = ExecutionContext::new();
    let args = parse(&["update", "/servers/7", "-d", "{}", "--wait-for-state"]);

    let err = args.command.execute(&session, &mut ctx).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CloudError>(),
        Some(CloudError::WaitFailed(_))
    ));
}

#[tokio::test]
async fn test_timed_out_wait_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/volumes"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"href": "/volumes/1"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/volumes/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"metadata": {"state": "BUSY"}})),
        )
        .mount(&server)
        .await;

    let session = session_for(&server);
    let mut ctx = ExecutionContext::new();
    let args = parse(&["create", "/volumes", "-d", "{}", "-w", "-t", "1"]);

    let err = args.command.execute(&session, &mut ctx).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CloudError>(),
        Some(CloudError::Timeout(_))
    ));
}

#[tokio::test]
async fn test_delete_waits_for_disappearance() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/volumes/9"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/volumes/9"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let mut ctx = ExecutionContext::new();
    let args = parse(&["delete", "/volumes/9", "--wait-for-deletion", "-t", "5"]);

    args.command.execute(&session, &mut ctx).await.unwrap();
}

#[tokio::test]
async fn test_stale_reference_does_not_leak_into_next_invocation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/volumes"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"href": "/volumes/1"})))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/volumes/2"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"accepted": true})))
        .mount(&server)
        .await;
    // Nothing may ever poll the first command's resource.
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"metadata": {"state": "AVAILABLE"}})),
        )
        .expect(0)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let mut ctx = ExecutionContext::new();

    let first = parse(&["create", "/volumes", "-d", "{}"]);
    first.command.execute(&session, &mut ctx).await.unwrap();
    assert!(ctx.current().is_some());

    let second = parse(&["update", "/volumes/2", "-d", "{}", "--patch", "-w"]);
    second.command.execute(&session, &mut ctx).await.unwrap();
    assert!(ctx.current().is_none());
}

#[tokio::test]
async fn test_get_requests_depth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/datacenters"))
        .and(wiremock::matchers::query_param("depth", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let mut ctx = ExecutionContext::new();
    let args = parse(&["get", "/datacenters", "--depth", "2"]);

    args.command.execute(&session, &mut ctx).await.unwrap();
}
