//! Configuration: TOML file, environment overrides, CLI precedence.
//!
//! Precedence, lowest to highest: built-in defaults, config file
//! (`--config` path or `OMNIBAR_CONFIG`), `OMNIBAR_*` environment
//! variables, CLI flags (applied by the binary).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{OmnibarError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub fixtures: FixturesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search endpoint queried as `<endpoint>?q=<query>`
    pub endpoint: String,
    /// Debounce window between keystroke and dispatch, in milliseconds
    pub debounce_ms: u64,
    /// Per-request timeout on the HTTP client, in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5173/api/items".to_string(),
            debounce_ms: 300,
            request_timeout_ms: 5_000,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixturesConfig {
    /// JSON file replacing the compiled-in fixture corpus
    pub path: Option<PathBuf>,
}

/// Partial config as read from a file; unset keys fall back to defaults.
#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    search: Option<SearchPatch>,
    fixtures: Option<FixturesConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchPatch {
    endpoint: Option<String>,
    debounce_ms: Option<u64>,
    request_timeout_ms: Option<u64>,
}

impl Config {
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let path = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("OMNIBAR_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = path {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        }

        config.apply_env_overrides()?;
        Ok(config)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| OmnibarError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| OmnibarError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(search) = patch.search {
            if let Some(endpoint) = search.endpoint {
                self.search.endpoint = endpoint;
            }
            if let Some(debounce_ms) = search.debounce_ms {
                self.search.debounce_ms = debounce_ms;
            }
            if let Some(request_timeout_ms) = search.request_timeout_ms {
                self.search.request_timeout_ms = request_timeout_ms;
            }
        }
        if let Some(fixtures) = patch.fixtures {
            if fixtures.path.is_some() {
                self.fixtures = fixtures;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(endpoint) = std::env::var("OMNIBAR_ENDPOINT") {
            self.search.endpoint = endpoint;
        }
        if let Ok(raw) = std::env::var("OMNIBAR_DEBOUNCE_MS") {
            self.search.debounce_ms = raw.parse().map_err(|_| {
                OmnibarError::Config(format!("OMNIBAR_DEBOUNCE_MS: invalid integer {raw:?}"))
            })?;
        }
        if let Ok(raw) = std::env::var("OMNIBAR_REQUEST_TIMEOUT_MS") {
            self.search.request_timeout_ms = raw.parse().map_err(|_| {
                OmnibarError::Config(format!(
                    "OMNIBAR_REQUEST_TIMEOUT_MS: invalid integer {raw:?}"
                ))
            })?;
        }
        if let Ok(path) = std::env::var("OMNIBAR_FIXTURES") {
            self.fixtures.path = Some(PathBuf::from(path));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.search.debounce(), Duration::from_millis(300));
        assert!(config.fixtures.path.is_none());
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(
            tmp,
            "[search]\nendpoint = \"http://example.test/search\"\ndebounce_ms = 150\n"
        )
        .unwrap();

        let config = Config::load(Some(tmp.path())).unwrap();
        assert_eq!(config.search.endpoint, "http://example.test/search");
        assert_eq!(config.search.debounce_ms, 150);
        // Untouched key keeps its default.
        assert_eq!(config.search.request_timeout_ms, 5_000);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/omnibar.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "[search\nbroken").unwrap();
        let err = Config::load(Some(tmp.path())).unwrap_err();
        assert!(matches!(err, OmnibarError::Config(_)));
    }

    #[test]
    fn fixtures_path_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "[fixtures]\npath = \"/tmp/items.json\"\n").unwrap();
        let config = Config::load(Some(tmp.path())).unwrap();
        assert_eq!(config.fixtures.path, Some(PathBuf::from("/tmp/items.json")));
    }
}
