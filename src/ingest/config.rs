// src/ingest/config.rs
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::filter::SortKey;

const ENV_PATH: &str = "NEWSDESK_CONFIG_PATH";

/// Session-level configuration: which providers start enabled and the
/// pagination defaults. Providers listed here must match registry ids;
/// unknown ids are dropped later by the session with a warning.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Provider ids enabled at startup. Empty means "all registered".
    pub providers: Vec<String>,
    pub page_size: usize,
    pub sibling_count: usize,
    pub default_sort: SortKey,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            providers: Vec::new(),
            page_size: 10,
            sibling_count: 2,
            default_sort: SortKey::Relevance,
        }
    }
}

/// Load config from an explicit path. Supports TOML or JSON formats.
pub fn load_config_from(path: &Path) -> Result<SessionConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading session config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_config(&content, ext.as_str())
}

/// Load config using env var + fallbacks:
/// 1) $NEWSDESK_CONFIG_PATH
/// 2) config/providers.toml
/// 3) config/providers.json
/// 4) built-in defaults
pub fn load_config_default() -> Result<SessionConfig> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_config_from(&pb);
        } else {
            return Err(anyhow!("NEWSDESK_CONFIG_PATH points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/providers.toml");
    if toml_p.exists() {
        return load_config_from(&toml_p);
    }
    let json_p = PathBuf::from("config/providers.json");
    if json_p.exists() {
        return load_config_from(&json_p);
    }
    Ok(SessionConfig::default())
}

fn parse_config(s: &str, hint_ext: &str) -> Result<SessionConfig> {
    // Try TOML first if hinted or content looks like toml.
    let try_toml = hint_ext == "toml" || s.contains("providers");
    if try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    if let Ok(v) = parse_json(s) {
        return Ok(v);
    }
    if !try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    Err(anyhow!("unsupported session config format"))
}

fn parse_toml(s: &str) -> Result<SessionConfig> {
    let mut v: SessionConfig = toml::from_str(s)?;
    v.providers = clean_list(v.providers);
    Ok(v)
}

fn parse_json(s: &str) -> Result<SessionConfig> {
    let mut v: SessionConfig = serde_json::from_str(s)?;
    v.providers = clean_list(v.providers);
    Ok(v)
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    use std::collections::BTreeSet;
    let mut set = BTreeSet::new();
    for it in items {
        let t = it.trim();
        if !t.is_empty() {
            set.insert(t.to_string());
        }
    }
    set.into_iter().collect()
}
