//! Tests for `repofetch download`

use super::common::{targz, TestContext};
use predicates::prelude::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test(flavor = "multi_thread")]
async fn test_download_into_current_directory() {
    let server = MockServer::start().await;
    let body = targz("Config-main", &[("index.js", "module.exports = {};\n")]);
    Mock::given(method("GET"))
        .and(path("/SlimIO/Config/archive/main.tar.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = TestContext::with_server(&server.uri());
    ctx.repofetch()
        .args(["download", "SlimIO.Config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Downloaded SlimIO.Config"));

    let archive = ctx.workdir.join("Config-main.tar.gz");
    assert_eq!(std::fs::read(archive).unwrap(), body);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_with_branch_and_dest() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/SlimIO/is/archive/develop.tar.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(targz("is-develop", &[])))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = TestContext::with_server(&server.uri());
    let dest = ctx.temp.path().join("out");
    ctx.repofetch()
        .arg("download")
        .arg("SlimIO.is")
        .args(["--branch", "develop"])
        .arg("--dest")
        .arg(&dest)
        .assert()
        .success();

    assert!(dest.join("is-develop.tar.gz").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_sends_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/SlimIO/Private/archive/main.tar.gz"))
        .and(header("authorization", "token secret"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"x".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = TestContext::with_server(&server.uri());
    ctx.repofetch()
        .args(["download", "SlimIO.Private", "--token", "secret"])
        .assert()
        .success();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_and_extract() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/SlimIO/Core/archive/main.tar.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(targz(
            "Core-main",
            &[("package.json", "{}"), ("src/index.js", "")],
        )))
        .mount(&server)
        .await;

    let ctx = TestContext::with_server(&server.uri());
    ctx.repofetch()
        .args(["download", "SlimIO.Core", "--extract"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracted SlimIO.Core"));

    let extracted = ctx.workdir.join("Core-main");
    assert!(extracted.join("package.json").exists());
    assert!(extracted.join("src").join("index.js").exists());
    assert!(!ctx.workdir.join("Core-main.tar.gz").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_extract_keep_archive_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/SlimIO/Core/archive/main.tar.gz"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(targz("Core-main", &[("README.md", "# Core\n")])),
        )
        .mount(&server)
        .await;

    let ctx = TestContext::with_server(&server.uri());
    let output = ctx
        .repofetch()
        .args(["download", "SlimIO.Core", "-x", "--keep-archive", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["organization"], "SlimIO");
    assert_eq!(result["branch"], "main");
    assert!(result["archive"].is_string());
    assert!(ctx.workdir.join("Core-main.tar.gz").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_missing_repository_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let ctx = TestContext::with_server(&server.uri());
    ctx.repofetch()
        .args(["download", "SlimIO.DoesNotExist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("404"));

    assert!(!ctx.workdir.join("DoesNotExist-main.tar.gz").exists());
}

#[test]
fn test_download_invalid_identifier() {
    let ctx = TestContext::new();
    ctx.repofetch()
        .args(["download", "not-a-repository"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("organization.repository"));
}

#[test]
fn test_keep_archive_requires_extract() {
    let ctx = TestContext::new();
    ctx.repofetch()
        .args(["download", "SlimIO.Core", "--keep-archive"])
        .assert()
        .failure();
}
