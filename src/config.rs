use std::fs;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::DexError;
use crate::pager::BATCH_SIZE;
use crate::pipeline::FailurePolicy;
use crate::pokeapi::DEFAULT_BASE_URL;

pub const CONFIG_FILE: &str = "pokedex.json";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub filter_range: Option<u32>,
    #[serde(default)]
    pub reset_range: Option<u32>,
    #[serde(default)]
    pub cap: Option<usize>,
    #[serde(default)]
    pub failure_policy: Option<FailurePolicy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub filter_range: u32,
    pub reset_range: u32,
    pub cap: usize,
    pub failure_policy: FailurePolicy,
    pub source: Option<Utf8PathBuf>,
}

impl ResolvedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            filter_range: 200,
            reset_range: 100,
            cap: BATCH_SIZE * 4,
            failure_policy: FailurePolicy::Abort,
            source: None,
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Explicit path, then `./pokedex.json`, then the user config dir, then defaults.
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, DexError> {
        if let Some(path) = path {
            let path = Utf8PathBuf::from(path);
            if !path.as_std_path().exists() {
                return Err(DexError::MissingConfig(path));
            }
            return Self::load(&path);
        }

        let candidates = std::iter::once(Utf8PathBuf::from(CONFIG_FILE)).chain(user_config_path());
        for candidate in candidates {
            if candidate.as_std_path().exists() {
                return Self::load(&candidate);
            }
        }
        Ok(ResolvedConfig::default())
    }

    pub fn load(path: &Utf8Path) -> Result<ResolvedConfig, DexError> {
        let content =
            fs::read_to_string(path).map_err(|_| DexError::ConfigRead(path.to_path_buf()))?;
        let config: Config =
            serde_json::from_str(&content).map_err(|err| DexError::ConfigParse(err.to_string()))?;
        tracing::debug!(path = %path, "loaded config");
        Self::build(config, Some(path.to_path_buf()))
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, DexError> {
        Self::build(config, None)
    }

    fn build(config: Config, source: Option<Utf8PathBuf>) -> Result<ResolvedConfig, DexError> {
        let defaults = ResolvedConfig::default();
        let base_url = config
            .base_url
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(DexError::InvalidConfig(format!("base_url {base_url:?}")));
        }

        let timeout_secs = config.timeout_secs.unwrap_or(defaults.timeout_secs);
        if timeout_secs == 0 {
            return Err(DexError::InvalidConfig("timeout_secs must be > 0".to_string()));
        }

        let cap = config.cap.unwrap_or(defaults.cap);
        if cap == 0 {
            return Err(DexError::InvalidConfig("cap must be > 0".to_string()));
        }

        Ok(ResolvedConfig {
            base_url,
            timeout_secs,
            filter_range: config.filter_range.unwrap_or(defaults.filter_range),
            reset_range: config.reset_range.unwrap_or(defaults.reset_range),
            cap,
            failure_policy: config.failure_policy.unwrap_or(defaults.failure_policy),
            source,
        })
    }
}

fn user_config_path() -> Option<Utf8PathBuf> {
    let dirs = ProjectDirs::from("", "", "pokedex-browser")?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().join(CONFIG_FILE)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let resolved = ConfigLoader::resolve_config(Config::default()).unwrap();
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.filter_range, 200);
        assert_eq!(resolved.reset_range, 100);
        assert_eq!(resolved.cap, 96);
        assert_eq!(resolved.failure_policy, FailurePolicy::Abort);
        assert_eq!(resolved, ResolvedConfig::default());
    }
}
