use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const LOCAL_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Local News</title>
    <link>http://127.0.0.1:9/</link>
    <description>Feed used by the CLI tests</description>
    <item>
      <title>First story</title>
      <link>http://127.0.0.1:9/first</link>
      <description>First summary</description>
      <category>politics</category>
    </item>
    <item>
      <title>Second story</title>
      <link>http://127.0.0.1:9/second</link>
      <description>Second summary</description>
    </item>
  </channel>
</rss>"#;

fn feedscrape_cmd() -> Command {
    let mut cmd = Command::cargo_bin("feedscrape").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("FEEDSCRAPE_USER_AGENT")
        .env_remove("FEEDSCRAPE_MAX_RETRIES");
    cmd
}

fn write_feed(dir: &TempDir) -> String {
    let path = dir.path().join("feed.xml");
    std::fs::write(&path, LOCAL_FEED).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_help_lists_subcommands() {
    feedscrape_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("entries"))
        .stdout(predicate::str::contains("extract"));
}

#[test]
fn test_run_help_shows_flags() {
    feedscrape_cmd()
        .arg("run")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--max-articles"))
        .stdout(predicate::str::contains("--delay-ms"))
        .stdout(predicate::str::contains("--user-agent"));
}

#[test]
fn test_invalid_feed_source_fails() {
    feedscrape_cmd()
        .arg("run")
        .arg("definitely-not-a-feed")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid feed source"));
}

#[test]
fn test_invalid_env_config_fails() {
    feedscrape_cmd()
        .arg("entries")
        .arg("definitely-not-a-feed")
        .env("FEEDSCRAPE_MAX_RETRIES", "lots")
        .assert()
        .failure()
        .stderr(predicate::str::contains("FEEDSCRAPE_MAX_RETRIES"));
}

#[test]
fn test_entries_from_local_feed() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(&dir);

    let output = feedscrape_cmd()
        .arg("entries")
        .arg(&feed)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let entries: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["title"], "First story");
    assert_eq!(entries[0]["category"], "politics");
    assert_eq!(entries[1]["category"], "general");
}

#[test]
fn test_malformed_local_feed_prints_empty_list() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.xml");
    std::fs::write(&path, "this is not a feed").unwrap();

    feedscrape_cmd()
        .arg("run")
        .arg(path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[test]
fn test_unreachable_articles_become_degraded_records() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(&dir);

    let output = feedscrape_cmd()
        .arg("run")
        .arg(&feed)
        .arg("--max-retries")
        .arg("0")
        .arg("--delay-ms")
        .arg("0")
        .arg("--timeout-secs")
        .arg("2")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let records: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    for record in records {
        assert_eq!(record["domain"], "127.0.0.1:9");
        assert!(record["error"].is_string());
        assert_eq!(record["main_text"], "");
    }
}

#[test]
fn test_max_articles_limits_run() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(&dir);

    let output = feedscrape_cmd()
        .args(["run", &feed, "-n", "1", "--max-retries", "0", "--delay-ms", "0"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let records: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 1);
    assert_eq!(records[0]["url"], "http://127.0.0.1:9/first");
}
