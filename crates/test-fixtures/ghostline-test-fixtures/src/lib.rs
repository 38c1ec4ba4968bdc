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
    ghosts: HashMap<String, GhostEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GhostEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        description: Option<String>,
    },
}

impl GhostEntry {
    fn as_path(&self) -> &str {
        match self {
            GhostEntry::Path(path) => path,
            GhostEntry::Detailed { path, .. } => path,
        }
    }
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_bytes(rel: &str) -> Result<Vec<u8>> {
    let path = resolve_path(rel);
    fs::read(&path).with_context(|| format!("failed to read fixture at {}", path.display()))
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

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Recorded delta streams, one actor per file.
pub mod ghosts {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.ghosts.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.ghosts, "ghost", name)?;
        read_to_string(entry.as_path())
    }

    pub fn bytes(name: &str) -> Result<Vec<u8>> {
        let entry = lookup(&MANIFEST.ghosts, "ghost", name)?;
        read_bytes(entry.as_path())
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.ghosts, "ghost", name)?;
        super::load_json(entry.as_path())
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.ghosts, "ghost", name)?;
        Ok(resolve_path(entry.as_path()))
    }

    pub fn description(name: &str) -> Result<Option<String>> {
        match lookup(&MANIFEST.ghosts, "ghost", name)? {
            GhostEntry::Path(_) => Ok(None),
            GhostEntry::Detailed { description, .. } => Ok(description.clone()),
        }
    }
}
