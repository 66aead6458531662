//! Runtime configuration.
//!
//! Layers, later ones winning: built-in defaults, an optional TOML file
//! (`COCKTAIL_CONFIG`, else `config.toml` in the platform config dir), then
//! environment variables (a `.env` file is honoured).

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_API_BASE_URL: &str = "https://www.thecocktaildb.com/api/json/v1/1/";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://www.thecocktaildb.com/images/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
    #[error("Could not determine a data directory; set COCKTAIL_DATA_DIR")]
    NoDataDir,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub image_base_url: String,
    /// Upper bound on detail lookups issued per filter query.
    pub expansion_cap: usize,
    pub request_timeout_secs: u64,
    /// Full records remembered from earlier queries for cache-first lookups.
    pub recent_capacity: usize,
    /// Search run at session start and when the filter is reset.
    pub default_search: String,
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            expansion_cap: 12,
            request_timeout_secs: 15,
            recent_capacity: 64,
            default_search: "Shake".to_string(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let mut config = match config_file_path() {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "Loading config file");
                Self::from_file(&path)?
            }
            _ => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok())?;
        config.validate()?;
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply `COCKTAIL_*` overrides. `lookup` stands in for the process
    /// environment so callers can feed their own.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("COCKTAIL_API_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = lookup("COCKTAIL_IMAGE_URL") {
            self.image_base_url = v;
        }
        if let Some(v) = lookup("COCKTAIL_EXPANSION_CAP") {
            self.expansion_cap = parse_var("COCKTAIL_EXPANSION_CAP", &v)?;
        }
        if let Some(v) = lookup("COCKTAIL_TIMEOUT_SECS") {
            self.request_timeout_secs = parse_var("COCKTAIL_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = lookup("COCKTAIL_RECENT_CAPACITY") {
            self.recent_capacity = parse_var("COCKTAIL_RECENT_CAPACITY", &v)?;
        }
        if let Some(v) = lookup("COCKTAIL_DEFAULT_SEARCH") {
            self.default_search = v;
        }
        if let Some(v) = lookup("COCKTAIL_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(v));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, url) in [
            ("api_base_url", &self.api_base_url),
            ("image_base_url", &self.image_base_url),
        ] {
            url::Url::parse(url).map_err(|e| invalid(key, e))?;
        }
        if self.expansion_cap == 0 {
            return Err(invalid("expansion_cap", "must be at least 1"));
        }
        if self.recent_capacity == 0 {
            return Err(invalid("recent_capacity", "must be at least 1"));
        }
        if self.request_timeout_secs == 0 {
            return Err(invalid("request_timeout_secs", "must be at least 1"));
        }
        Ok(())
    }

    /// Where favorites and theme are persisted.
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(ConfigError::NoDataDir)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "thecocktaildb", "cocktail-catalog")
}

fn config_file_path() -> Option<PathBuf> {
    env::var_os("COCKTAIL_CONFIG")
        .map(PathBuf::from)
        .or_else(|| project_dirs().map(|dirs| dirs.config_dir().join("config.toml")))
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    raw.trim().parse().map_err(|e| invalid(key, e))
}

fn invalid(key: &str, reason: impl Display) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_public_api() {
        let config = Config::default();
        assert_eq!(config.expansion_cap, 12);
        assert_eq!(config.default_search, "Shake");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_then_env_layering() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "expansion_cap = 20\ndefault_search = \"Sour\"").unwrap();

        let mut config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.expansion_cap, 20);
        assert_eq!(config.default_search, "Sour");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);

        config
            .apply_env(env_of(&[
                ("COCKTAIL_EXPANSION_CAP", " 5 "),
                ("COCKTAIL_DATA_DIR", "/tmp/cocktails"),
            ]))
            .unwrap();
        assert_eq!(config.expansion_cap, 5);
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/cocktails"));
    }

    #[test]
    fn bad_values_are_errors() {
        let mut config = Config::default();
        let err = config
            .apply_env(env_of(&[("COCKTAIL_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "COCKTAIL_TIMEOUT_SECS"));

        config.expansion_cap = 0;
        assert!(config.validate().is_err());

        let config = Config {
            api_base_url: "not a url".into(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_rejected() {
        assert!(matches!(
            Config::from_toml_str("expansion_cap = \"many\""),
            Err(ConfigError::Toml(_))
        ));
    }
}
