use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    scenarios: HashMap<String, String>,
    configs: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a>(map: &'a HashMap<String, String>, kind: &str, name: &str) -> Result<&'a String> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

fn sorted_keys(map: &HashMap<String, String>) -> Vec<String> {
    let mut keys: Vec<String> = map.keys().cloned().collect();
    keys.sort();
    keys
}

/// Expected shape of one from/to roll, as recorded in `fixtures/scenarios`.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub from: String,
    pub to: String,
    pub from_padded: String,
    pub to_padded: String,
    pub total_steps: Vec<u32>,
    pub vanishing: Vec<bool>,
    #[serde(rename = "final")]
    pub final_digits: String,
}

pub mod scenarios {
    use super::*;

    pub fn keys() -> Vec<String> {
        sorted_keys(&MANIFEST.scenarios)
    }

    pub fn load(name: &str) -> Result<Scenario> {
        let rel = lookup(&MANIFEST.scenarios, "scenario", name)?;
        load_json(rel)
    }
}

pub mod configs {
    use super::*;

    pub fn keys() -> Vec<String> {
        sorted_keys(&MANIFEST.configs)
    }

    /// Raw JSON text, for feeding config parsers under test.
    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        read_to_string(rel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_manifest_entry_loads() {
        for key in scenarios::keys() {
            let s = scenarios::load(&key).unwrap_or_else(|e| panic!("{key}: {e:#}"));
            assert_eq!(s.total_steps.len(), s.vanishing.len(), "{key}");
        }
        for key in configs::keys() {
            configs::json(&key).unwrap_or_else(|e| panic!("{key}: {e:#}"));
        }
    }

    #[test]
    fn unknown_fixture_is_an_error() {
        assert!(scenarios::load("no-such-scenario").is_err());
    }
}
