//! Shared testing utilities for spotlight CLI tests.

use assert_cmd::Command;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Testing harness providing an isolated data/output directory pair and
/// fixture builders for the catalogue files.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    data_dir: PathBuf,
    out_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment with empty data and out dirs.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let data_dir = root.path().join("data");
        let out_dir = root.path().join("out");
        fs::create_dir_all(&data_dir).expect("Failed to create test data directory");

        Self { root, data_dir, out_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// A command for the spotlight binary rooted at the test directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("spotlight").expect("spotlight binary builds");
        cmd.current_dir(self.root.path());
        cmd
    }

    /// Epoch milliseconds for "now", shared by fixture builders.
    pub fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    /// Write the standard venue table fixture.
    pub fn write_venues(&self) {
        let venues = serde_json::json!({
            "rio": {
                "name": "Rio Cinema",
                "socials": { "bluesky": "riocinema.bsky.social" }
            },
            "genesis": { "name": "Genesis" },
            "odeon-camden": { "name": "ODEON Camden", "groupName": "ODEON" },
            "odeon-holloway": { "name": "ODEON Holloway", "groupName": "ODEON" }
        });
        self.write_fixture("venues.json", &venues);
    }

    /// Write a rating table fixture covering the given movie ids.
    pub fn write_ratings(&self, ids: &[&str]) {
        let mut imdb = serde_json::Map::new();
        for id in ids {
            imdb.insert(id.to_string(), serde_json::json!(7.8));
        }
        self.write_fixture("ratings.json", &serde_json::json!({ "imdb": imdb }));
    }

    /// Write a catalogue fixture for `key` where every movie has a final
    /// performance tomorrow and was first seen yesterday, so it matches
    /// both themes.
    pub fn write_catalogue(&self, key: &str, movies: &[(&str, &str, &str)]) {
        let now = self.now_ms();
        let mut table = serde_json::Map::new();
        for (id, title, venue_id) in movies {
            table.insert(
                id.to_string(),
                serde_json::json!({
                    "title": title,
                    "posterPath": format!("/posters/{}.jpg", id),
                    "duration": 6_600_000,
                    "performances": [
                        { "time": now + DAY_MS, "showingId": "s1" }
                    ],
                    "showings": {
                        "s1": { "venueId": venue_id, "seen": now - DAY_MS }
                    }
                }),
            );
        }
        self.write_fixture(
            &format!("catalogue-{}.json", key),
            &serde_json::Value::Object(table),
        );
    }

    fn write_fixture(&self, name: &str, value: &serde_json::Value) {
        let path = self.data_dir.join(name);
        fs::write(&path, serde_json::to_string_pretty(value).unwrap())
            .unwrap_or_else(|e| panic!("Failed to write fixture {}: {}", name, e));
    }

    /// Paths in the out dir whose file name starts with `prefix`.
    pub fn written_files(&self, prefix: &str) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = fs::read_dir(&self.out_dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.path())
                    .filter(|p| {
                        p.file_name()
                            .map(|n| n.to_string_lossy().starts_with(prefix))
                            .unwrap_or(false)
                    })
                    .collect()
            })
            .unwrap_or_default();
        files.sort();
        files
    }

    /// Contents of the single out-dir file matching `prefix`.
    pub fn read_written(&self, prefix: &str) -> String {
        let files = self.written_files(prefix);
        assert_eq!(files.len(), 1, "expected exactly one file for prefix {}", prefix);
        fs::read_to_string(&files[0]).unwrap()
    }
}
