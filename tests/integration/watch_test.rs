//! End-to-end watch cycle tests
//!
//! Each test runs the binary several times against the same snapshot
//! directory while the served page changes underneath it.

use std::fs;

use predicates::prelude::*;
use tempfile::TempDir;

use super::{PageServer, outbox_count, sitewatch, stands_page, write_config};

/// First run mails everyone, a repeat run is silent, a change mails a diff
#[test]
fn test_watch_cycle() {
    let temp = TempDir::new().unwrap();
    let server = PageServer::start();
    server.set("/stands/", &stands_page("Nissan"));
    write_config(temp.path(), &server.url("/stands/"), "");

    // Step 1: first run reports the full content to both recipients
    sitewatch()
        .arg("run")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("stands: first-seen"))
        .stdout(predicate::str::contains("a@example.com"));
    let snapshot = temp.path().join("snapshots/content_stands.html");
    let first = fs::read_to_string(&snapshot).unwrap();
    assert!(first.contains("Nissan"));
    assert_eq!(outbox_count(temp.path()), 2);

    // Step 2: nothing inside the selection changed
    server.set("/stands/", &stands_page("Nissan").replace("12ms", "40ms"));
    sitewatch()
        .arg("run")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("stands: unchanged"));
    assert_eq!(fs::read_to_string(&snapshot).unwrap(), first);
    assert_eq!(outbox_count(temp.path()), 2);

    // Step 3: the watched element changed
    server.set("/stands/", &stands_page("Toyota"));
    sitewatch()
        .arg("run")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("stands: changed"));
    assert!(fs::read_to_string(&snapshot).unwrap().contains("Toyota"));
    assert_eq!(outbox_count(temp.path()), 4);

    let message = fs::read_dir(temp.path().join("outbox"))
        .unwrap()
        .map(|entry| fs::read_to_string(entry.unwrap().path()).unwrap())
        .find(|m| m.contains("To: a@example.com\r\n"))
        .unwrap();
    assert!(message.contains("From: watch@example.com\r\n"));
    assert!(message.contains("Content-Type: text/html; charset=\"utf-8\"\r\n"));
}

#[test]
fn test_seed_policy_stays_silent_on_first_run() {
    let temp = TempDir::new().unwrap();
    let server = PageServer::start();
    server.set("/stands/", &stands_page("Nissan"));
    write_config(temp.path(), &server.url("/stands/"), "first_run = \"seed\"");

    sitewatch()
        .args(["--json", "run"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"seeded\""));
    assert!(temp.path().join("snapshots/content_stands.html").exists());
    assert_eq!(outbox_count(temp.path()), 0);
}

#[test]
fn test_failed_job_and_strict_mode() {
    let temp = TempDir::new().unwrap();
    let server = PageServer::start();
    write_config(temp.path(), &server.url("/gone/"), "");

    sitewatch()
        .arg("run")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("stands: failed"))
        .stdout(predicate::str::contains("404"));

    sitewatch()
        .args(["run", "--strict"])
        .current_dir(temp.path())
        .assert()
        .failure();

    assert!(!temp.path().join("snapshots/content_stands.html").exists());
}

#[test]
fn test_selector_mismatch_is_reported() {
    let temp = TempDir::new().unwrap();
    let server = PageServer::start();
    server.set("/stands/", "<html><body><div class=\"sidebar\">x</div></body></html>");
    write_config(temp.path(), &server.url("/stands/"), "");

    sitewatch()
        .args(["--json", "run"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"error_kind\": \"selection\""))
        .stdout(predicate::str::contains("matched 0 elements"));
}

#[test]
fn test_debug_artifacts() {
    let temp = TempDir::new().unwrap();
    let server = PageServer::start();
    server.set("/stands/", &stands_page("Nissan"));
    write_config(temp.path(), &server.url("/stands/"), "");

    sitewatch()
        .args(["--debug", "debug", "run"])
        .current_dir(temp.path())
        .assert()
        .success();

    for stage in ["page", "matched", "normalized", "diff"] {
        assert!(temp.path().join(format!("debug/stands.{stage}.html")).exists(), "{stage}");
    }
}

#[test]
fn test_unknown_job_filter_fails() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "https://shop.example.com/stands/", "");

    sitewatch()
        .args(["run", "--job", "missing"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no job named \"missing\""));
}
