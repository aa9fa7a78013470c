//! Integration tests for the sitewatch CLI
//!
//! These tests run the binary against a local HTTP server and a temporary
//! config directory, covering the full cycle of: first run → unchanged →
//! changed → failing jobs.

// Include end-to-end watch cycle tests from the same directory
mod watch_test;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a sitewatch command with plain output
fn sitewatch() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("sitewatch"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Local HTTP server with replaceable pages; unknown paths answer 404
struct PageServer {
    base: String,
    pages: Arc<Mutex<HashMap<String, String>>>,
}

impl PageServer {
    fn start() -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        let pages: Arc<Mutex<HashMap<String, String>>> = Arc::default();
        let shared = Arc::clone(&pages);
        thread::spawn(move || {
            for request in server.incoming_requests() {
                let body = shared.lock().unwrap().get(request.url()).cloned();
                let response = match body {
                    Some(body) => tiny_http::Response::from_string(body),
                    None => tiny_http::Response::from_string("not found")
                        .with_status_code(tiny_http::StatusCode(404)),
                };
                let _ = request.respond(response);
            }
        });
        Self {
            base: format!("http://127.0.0.1:{port}"),
            pages,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    fn set(&self, path: &str, body: &str) {
        self.pages.lock().unwrap().insert(path.to_string(), body.to_string());
    }
}

/// Listing page whose watched column contains `item`
fn stands_page(item: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Stands</title></head>
<body>
 <div id="header"><a href="/">Home</a></div>
 <div class="main-column">
  <h1>Stands</h1>
  <p class="item">{item} <a href="/stands/1">details</a></p>
  <script>track();</script>
 </div>
 <div id="footer">rendered in 12ms</div>
</body>
</html>
"#
    )
}

/// Write a config for one job watching `url` and return its path
fn write_config(dir: &Path, url: &str, extra: &str) -> PathBuf {
    let config = format!(
        r#"sender = "watch@example.com"
snapshot_dir = "snapshots"
{extra}
[mail]
transport = "outbox"
outbox_dir = "outbox"

[defaults]
strip_attributes = ["class", "id", "name", "style", "align"]
drop = [{{ tag = "script" }}, {{ tag = "form" }}]

[[job]]
name = "stands"
title = "Stands were updated"
url = "{url}"
base_url = "https://shop.example.com"
link_to_original = true
selector = {{ tag = "div", attributes = {{ class = "main-column" }} }}
recipients = ["a@example.com", "b@example.com"]
"#
    );
    let path = dir.join("sitewatch.toml");
    fs::write(&path, config).unwrap();
    path
}

fn outbox_count(dir: &Path) -> usize {
    fs::read_dir(dir.join("outbox")).map(Iterator::count).unwrap_or(0)
}

// =============================================================================
// BASIC COMMANDS
// =============================================================================

#[test]
fn test_help() {
    sitewatch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Watch parts of web pages"))
        .stdout(predicate::str::contains("preview"));
}

#[test]
fn test_version() {
    sitewatch()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("sitewatch v{}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn test_version_json() {
    sitewatch()
        .args(["--json", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\""));
}

#[test]
fn test_no_subcommand_prints_hint() {
    sitewatch()
        .assert()
        .success()
        .stdout(predicate::str::contains("sitewatch --help"));
}

#[test]
fn test_missing_config_fails() {
    let temp = TempDir::new().unwrap();
    sitewatch()
        .args(["--config", "absent.toml", "run"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.toml"));
}

#[test]
fn test_invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    let config = "[[job]]\nname = \"a\"\nurl = \"u\"\nwhole_document = true\n";
    fs::write(temp.path().join("sitewatch.toml"), config).unwrap();
    sitewatch()
        .arg("jobs")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("sender"));
}

// =============================================================================
// JOBS / PREVIEW / DIFF
// =============================================================================

#[test]
fn test_jobs_lists_configured_jobs() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "https://shop.example.com/stands/", "");

    sitewatch()
        .arg("jobs")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[stands] Stands were updated"))
        .stdout(predicate::str::contains("Recipients: 2"));

    sitewatch()
        .args(["--json", "jobs"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"stands\""));
}

#[test]
fn test_preview_from_file() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "https://shop.example.com/stands/", "");
    fs::write(temp.path().join("page.html"), stands_page("Nissan")).unwrap();

    sitewatch()
        .arg("--config")
        .arg(&config)
        .args(["preview", "stands", "--input"])
        .arg(temp.path().join("page.html"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<div>\n <h1>\n  Stands\n </h1>\n"))
        .stdout(predicate::str::contains("<a href=\"https://shop.example.com/stands/1\">"))
        .stdout(predicate::str::contains("Link to original website"))
        .stdout(predicate::str::contains("track()").not())
        .stdout(predicate::str::contains("rendered in").not());

    assert!(!temp.path().join("snapshots").exists());
    assert_eq!(outbox_count(temp.path()), 0);
}

#[test]
fn test_preview_unknown_job_fails() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "https://shop.example.com/stands/", "");
    sitewatch()
        .args(["preview", "other"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no job named \"other\""));
}

#[test]
fn test_diff_files() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("old.html"), "<p>\n Nissan\n</p>\n").unwrap();
    fs::write(temp.path().join("new.html"), "<p>\n Toyota\n</p>\n").unwrap();

    sitewatch()
        .args(["diff", "old.html", "new.html"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("<del>Nissan</del>"))
        .stdout(predicate::str::contains("<ins>Toyota</ins>"));
}
