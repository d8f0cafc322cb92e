//! Tests for `repofetch config`

use super::common::TestContext;
use predicates::prelude::*;

#[test]
fn test_config_set_branch_then_show() {
    let ctx = TestContext::new();

    ctx.repofetch()
        .args(["config", "set-branch", "master"])
        .assert()
        .success();

    ctx.repofetch()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_branch: master"));
}

#[test]
fn test_config_set_format() {
    let ctx = TestContext::new();

    ctx.repofetch()
        .args(["config", "set-format", "zip"])
        .assert()
        .success();

    let content = std::fs::read_to_string(ctx.config_path()).unwrap();
    assert!(content.contains("archive_format: zip"));
}

#[test]
fn test_config_set_format_rejects_unknown() {
    let ctx = TestContext::new();
    ctx.repofetch()
        .args(["config", "set-format", "rar"])
        .assert()
        .failure();
}

#[test]
fn test_config_path_uses_home_override() {
    let ctx = TestContext::new();
    ctx.repofetch()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));
}

#[test]
fn test_config_show_hides_token() {
    let ctx = TestContext::new();
    ctx.write_config("token: ghp_secret\n");

    ctx.repofetch()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ghp_secret").not());
}
