//! Test fixture loader for Saga golden transcripts.
//!
//! Fixtures live under `data/` in this crate and are shared by the tests of
//! every crate in the workspace.

use std::path::PathBuf;

use saga_core::models::{Actor, EligibilityMask, ExcludedRange, TranscriptLine};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the fixture data.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
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

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory, sorted by path.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    paths.sort();
    paths
}

/// A transcript with its roster, exclusions and the expected leaf allocation.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptFixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub roster: Vec<Actor>,
    pub lines: Vec<TranscriptLine>,
    #[serde(default)]
    pub excluded_ranges: Vec<ExcludedRange>,
    pub expected: ExpectedAllocation,
}

impl TranscriptFixture {
    /// Eligibility mask built from the fixture's excluded ranges.
    pub fn mask(&self) -> EligibilityMask {
        EligibilityMask::from_excluded_ranges(&self.lines, self.excluded_ranges.clone())
            .unwrap_or_else(|e| panic!("Invalid excluded ranges in fixture {}: {}", self.name, e))
    }
}

/// Expected round-1 outcome, by absolute transcript index.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpectedAllocation {
    /// `[cause_index, effect_index]` of every link.
    #[serde(default)]
    pub links: Vec<[usize; 2]>,
    #[serde(default)]
    pub singletons: Vec<usize>,
    #[serde(default)]
    pub unclaimed_effects: Vec<usize>,
}

/// Load a transcript fixture from `data/golden/`.
pub fn load_golden(name: &str) -> TranscriptFixture {
    load_fixture(&format!("golden/{name}"))
}

/// Every golden transcript fixture.
pub fn all_golden() -> Vec<TranscriptFixture> {
    list_fixtures("golden")
        .into_iter()
        .map(|path| {
            let content = std::fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
            serde_json::from_str(&content)
                .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
        })
        .collect()
}
