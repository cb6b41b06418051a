//! YAML fixture cases

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

/// One fixture: an INI document and what scanning it must produce.
#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub desc: String,
    pub ini: String,
    /// Named dialect; the library default when absent
    #[serde(default)]
    pub dialect: Option<String>,
    /// Expected entries as [section, name, value]
    #[serde(default)]
    pub events: Vec<(String, String, String)>,
    /// Expected first error line, 0 for a clean scan
    #[serde(default)]
    pub error: usize,
}

fn fixtures_dir() -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "tests", "fixtures"].iter().collect()
}

/// Stems of every `.yaml` file in `tests/fixtures`, sorted
#[allow(dead_code)]
pub fn fixture_names() -> Vec<String> {
    let dir = fixtures_dir();
    let mut names: Vec<String> = fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("cannot list {}: {}", dir.display(), e))
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map_or(false, |ext| ext == "yaml"))
        .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .collect();
    names.sort();
    names
}

/// Cases from `tests/fixtures/<name>.yaml`, or a message naming the file
#[allow(dead_code)]
pub fn try_load_fixtures(name: &str) -> Result<Vec<TestCase>, String> {
    let path = fixtures_dir().join(name).with_extension("yaml");
    let text = fs::read_to_string(&path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    serde_yaml::from_str(&text).map_err(|e| format!("bad fixture {}: {}", path.display(), e))
}

/// Cases from `tests/fixtures/<name>.yaml`
pub fn load_fixtures_by_name(name: &str) -> Vec<TestCase> {
    try_load_fixtures(name).unwrap_or_else(|e| panic!("{}", e))
}
