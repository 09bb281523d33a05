//! Golden graph fixtures shared by integration tests across the workspace.
//!
//! Each fixture is a JSON file under `test-fixtures/golden/` holding a graph
//! description together with the entries a calculator must render for it.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;

/// A graph description plus the output expected from it.
///
/// Entry lists hold plain-mode render lines; empty means "not checked".
#[derive(Debug, Clone, Deserialize)]
pub struct GraphFixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub dot: String,
    pub ord_nodes: Vec<String>,
    /// `[row, col]` gain positions forced to zero by a missing arrow.
    #[serde(default)]
    pub zero_gains: Vec<[usize; 2]>,
    #[serde(default)]
    pub gain_entries: Vec<String>,
    #[serde(default)]
    pub cov_entries: Vec<String>,
    #[serde(default)]
    pub jacobian_entries: Vec<String>,
    #[serde(default)]
    pub growth_entries: Vec<String>,
}

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Walk up from whichever crate is running the test.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);
    loop {
        if path.join("golden").is_dir() && path.ends_with("test-fixtures") {
            return path;
        }
        if path.join("test-fixtures").join("golden").is_dir() {
            return path.join("test-fixtures");
        }
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load `golden/graphs/<name>.json`.
pub fn load_graph_fixture(name: &str) -> GraphFixture {
    load_fixture(&format!("golden/graphs/{name}.json"))
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Every graph fixture, sorted by file name.
pub fn all_graph_fixtures() -> Vec<GraphFixture> {
    let dir = fixtures_root().join("golden/graphs");
    let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    paths.sort();
    paths
        .iter()
        .map(|p| {
            let content = std::fs::read_to_string(p)
                .unwrap_or_else(|e| panic!("Failed to read {}: {}", p.display(), e));
            serde_json::from_str(&content)
                .unwrap_or_else(|e| panic!("Failed to parse {}: {}", p.display(), e))
        })
        .collect()
}
