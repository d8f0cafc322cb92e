//! Tests for `repofetch contributors`

use super::common::TestContext;
use predicates::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test(flavor = "multi_thread")]
async fn test_contributors_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/NodeSecure/scanner/contributors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "login": "fraxken", "contributions": 10 }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/fraxken/events/public"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "type": "PushEvent", "repo": { "name": "NodeSecure/scanner" }, "created_at": "2024-01-15T08:30:00Z" }
        ])))
        .mount(&server)
        .await;

    let ctx = TestContext::with_server(&server.uri());
    let output = ctx
        .repofetch()
        .args(["contributors", "NodeSecure", "scanner", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        result["fraxken"]["last_repository_activity"],
        "2024-01-15T08:30:00Z"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_contributors_unknown_repository_prints_null() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let ctx = TestContext::with_server(&server.uri());
    ctx.repofetch()
        .args(["contributors", "my-fake-owner", "my-fake-repository", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::diff("null\n"));
}

#[test]
fn test_contributors_empty_owner_fails() {
    let ctx = TestContext::new();
    ctx.repofetch()
        .args(["contributors", "", "scanner"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("owner must be a non-empty string"));
}
