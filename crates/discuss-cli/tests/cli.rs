//! End-to-end tests for the discuss binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn discuss(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("discuss").unwrap();
    cmd.arg("--dir").arg(dir.path()).arg("--no-color");
    cmd
}

fn post_root(dir: &TempDir, author: &str, content: &str) -> serde_json::Value {
    let output = discuss(dir)
        .args(["post", "--object", "post-1", "--author", author, "--json", content])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_help() {
    Command::cargo_bin("discuss")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("post"))
        .stdout(predicate::str::contains("react"));
}

#[test]
fn test_post_and_list_roundtrip() {
    let dir = TempDir::new().unwrap();
    let posted = post_root(&dir, "alice", "hello world");
    let id = posted["id"].as_str().unwrap();

    discuss(&dir)
        .args(["list", "--object", "post-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(id))
        .stdout(predicate::str::contains("hello world"));
}

#[test]
fn test_reply_and_show_thread() {
    let dir = TempDir::new().unwrap();
    let root = post_root(&dir, "alice", "root comment");
    let root_id = root["id"].as_str().unwrap();

    discuss(&dir)
        .args(["post", "--parent", root_id, "--author", "bob", "a reply"])
        .assert()
        .success();

    discuss(&dir)
        .args(["show", root_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Replies: 1"))
        .stdout(predicate::str::contains("root comment"));

    discuss(&dir)
        .args(["list", "--children-of", root_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("a reply"));
}

#[test]
fn test_react_and_unreact() {
    let dir = TempDir::new().unwrap();
    let posted = post_root(&dir, "alice", "react to me");
    let id = posted["id"].as_str().unwrap();

    discuss(&dir)
        .args(["react", id, "--user", "bob", "--kind", "like"])
        .assert()
        .success()
        .stdout(predicate::str::contains("like"));

    let output = discuss(&dir)
        .args(["unreact", id, "--user", "bob", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let comment: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(comment["reactions"].as_object().unwrap().is_empty());
}

#[test]
fn test_invalid_reaction_kind_fails() {
    let dir = TempDir::new().unwrap();
    let posted = post_root(&dir, "alice", "react to me");
    let id = posted["id"].as_str().unwrap();

    discuss(&dir)
        .args(["react", id, "--user", "bob", "--kind", "meh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("meh"));
}

#[test]
fn test_rm_cascades() {
    let dir = TempDir::new().unwrap();
    let root = post_root(&dir, "alice", "to be removed");
    let root_id = root["id"].as_str().unwrap();

    discuss(&dir)
        .args(["post", "--parent", root_id, "--author", "bob", "doomed reply"])
        .assert()
        .success();

    discuss(&dir)
        .args(["rm", root_id, "--author", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 replies"));

    discuss(&dir)
        .args(["show", root_id])
        .assert()
        .failure();
}

#[test]
fn test_rm_by_non_author_fails() {
    let dir = TempDir::new().unwrap();
    let posted = post_root(&dir, "alice", "mine");
    let id = posted["id"].as_str().unwrap();

    discuss(&dir)
        .args(["rm", id, "--author", "mallory"])
        .assert()
        .failure();
}

#[test]
fn test_blocked_user_hidden() {
    let dir = TempDir::new().unwrap();
    post_root(&dir, "alice", "kept");
    post_root(&dir, "troll", "hidden");

    discuss(&dir)
        .args(["--blocked", "troll", "list", "--object", "post-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kept"))
        .stdout(predicate::str::contains("hidden").not());

    discuss(&dir)
        .args(["--blocked", "troll", "list", "--object", "post-1", "--include-blocked"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hidden"));
}

#[test]
fn test_state_persists_across_invocations() {
    let dir = TempDir::new().unwrap();
    let posted = post_root(&dir, "alice", "durable");
    let id = posted["id"].as_str().unwrap();

    discuss(&dir)
        .args(["edit", id, "edited content", "--author", "alice"])
        .assert()
        .success();

    let output = discuss(&dir)
        .args(["show", id, "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let comment: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(comment["content"], "edited content");
}
