//! Configuration: built-in defaults, an optional YAML file, then the environment
//!
//! The bearer token is only ever read from the environment. Its absence is
//! fatal: nothing is sent to the classifier without it.

use crate::entity::Locale;
use crate::graph::{RecordingMode, Strength, DEFAULT_LINK_STRENGTH};
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Hosted zero-shot model used when no endpoint is configured
pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-mnli";
/// Primary environment variable holding the bearer token
pub const TOKEN_ENV: &str = "SARC_API_TOKEN";
/// Checked when [`TOKEN_ENV`] is unset
pub const FALLBACK_TOKEN_ENV: &str = "HF_TOKEN";
/// Overrides the endpoint from the file
pub const ENDPOINT_ENV: &str = "SARC_ENDPOINT";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RETRIES: u32 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing API token: set SARC_API_TOKEN (or HF_TOKEN)")]
    MissingCredential,

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Bearer credential. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

/// On-disk settings; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub retries: Option<u32>,
    pub cache_capacity: Option<usize>,
    pub recording: Option<RecordingMode>,
    pub link_strength: Option<f64>,
    pub locale: Option<Locale>,
}

impl FileConfig {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Self::from_yaml(&text)
    }

    /// Read `path`, or the default location when `None`.
    ///
    /// An explicit `path` must exist; a missing default file is skipped.
    pub fn locate(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::read(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::read(&path),
                _ => Ok(Self::default()),
            },
        }
    }
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub token: ApiToken,
    /// Per-request timeout for the classifier transport
    pub timeout: Duration,
    /// Retries on transient transport failure
    pub retries: u32,
    /// LRU bound for the classification cache; `None` = unbounded
    pub cache_capacity: Option<NonZeroUsize>,
    pub recording: RecordingMode,
    /// Strength used when recording outcomes as links
    pub link_strength: Strength,
    pub locale: Locale,
}

/// `~/.config/sarc/config.yaml` (or the platform equivalent)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sarc").join("config.yaml"))
}

impl Config {
    /// Load from `path` (or the default location) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_sources(FileConfig::locate(path)?, |key| std::env::var(key).ok())
    }

    /// Layer `file` over the defaults, then apply `env`.
    pub fn from_sources<F>(file: FileConfig, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let token = non_blank(TOKEN_ENV)
            .or_else(|| non_blank(FALLBACK_TOKEN_ENV))
            .map(ApiToken::new)
            .ok_or(ConfigError::MissingCredential)?;

        let endpoint = non_blank(ENDPOINT_ENV)
            .or(file.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!("endpoint is not an http(s) URL: {}", endpoint)));
        }

        let timeout_secs = file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be > 0".into()));
        }

        let cache_capacity = match file.cache_capacity {
            None => None,
            Some(n) => Some(
                NonZeroUsize::new(n)
                    .ok_or_else(|| ConfigError::Invalid("cache_capacity must be > 0".into()))?,
            ),
        };

        let link_strength = match file.link_strength {
            Some(raw) => Strength::new(raw).map_err(|e| ConfigError::Invalid(format!("link_strength: {}", e)))?,
            None => DEFAULT_LINK_STRENGTH,
        };

        Ok(Self {
            endpoint,
            token,
            timeout: Duration::from_secs(timeout_secs),
            retries: file.retries.unwrap_or(DEFAULT_RETRIES),
            cache_capacity,
            recording: file.recording.unwrap_or_default(),
            link_strength,
            locale: file.locale.unwrap_or_default(),
        })
    }
}

/// Display locale from the config file alone; no credential is needed.
pub fn display_locale(path: Option<&Path>) -> Result<Locale, ConfigError> {
    Ok(FileConfig::locate(path)?.locale.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_token_is_fatal() {
        let err = Config::from_sources(FileConfig::default(), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential));
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let err = Config::from_sources(FileConfig::default(), env(&[(TOKEN_ENV, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential));
    }

    #[test]
    fn fallback_token_variable_is_used() {
        let config = Config::from_sources(FileConfig::default(), env(&[(FALLBACK_TOKEN_ENV, "hf_x")])).unwrap();
        assert_eq!(config.token.expose(), "hf_x");
    }

    #[test]
    fn defaults_apply_without_file() {
        let config = Config::from_sources(FileConfig::default(), env(&[(TOKEN_ENV, "t")])).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retries, 1);
        assert_eq!(config.cache_capacity, None);
        assert_eq!(config.recording, RecordingMode::Context);
        assert_eq!(config.link_strength.value(), 0.9);
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn file_values_and_env_override_layer() {
        let file = FileConfig::from_yaml(
            "endpoint: http://localhost:9000/classify\n\
             timeout_secs: 5\n\
             cache_capacity: 64\n\
             recording: link\n\
             link_strength: 0.4\n\
             locale: ru\n",
        )
        .unwrap();

        let config = Config::from_sources(
            file.clone(),
            env(&[(TOKEN_ENV, "t")]),
        )
        .unwrap();
        assert_eq!(config.endpoint, "http://localhost:9000/classify");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.cache_capacity.map(NonZeroUsize::get), Some(64));
        assert_eq!(config.recording, RecordingMode::Link);
        assert_eq!(config.link_strength.value(), 0.4);
        assert_eq!(config.locale, Locale::Ru);

        let overridden = Config::from_sources(
            file,
            env(&[(TOKEN_ENV, "t"), (ENDPOINT_ENV, "https://example.test/zs")]),
        )
        .unwrap();
        assert_eq!(overridden.endpoint, "https://example.test/zs");
    }

    #[test]
    fn out_of_range_link_strength_is_rejected() {
        let file = FileConfig::from_yaml("link_strength: 1.5").unwrap();
        let err = Config::from_sources(file, env(&[(TOKEN_ENV, "t")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_capacity_and_timeout_are_rejected() {
        for yaml in ["cache_capacity: 0", "timeout_secs: 0"] {
            let file = FileConfig::from_yaml(yaml).unwrap();
            let err = Config::from_sources(file, env(&[(TOKEN_ENV, "t")])).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{}", yaml);
        }
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        assert!(matches!(
            FileConfig::from_yaml("token: leaked"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn token_is_redacted_in_debug() {
        let config = Config::from_sources(FileConfig::default(), env(&[(TOKEN_ENV, "secret-value")])).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret-value"));
        assert!(printed.contains("ApiToken(***)"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileConfig::read(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn file_is_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "retries: 3\n").unwrap();

        let file = FileConfig::read(&path).unwrap();

        assert_eq!(file.retries, Some(3));
    }

    #[test]
    fn display_locale_needs_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "locale: ru\n").unwrap();

        assert_eq!(display_locale(Some(&path)).unwrap(), Locale::Ru);
    }

    #[test]
    fn display_locale_reports_bad_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml");
        assert!(matches!(display_locale(Some(&missing)), Err(ConfigError::Io { .. })));

        let malformed = dir.path().join("bad.yaml");
        std::fs::write(&malformed, "locale: [not, a, locale\n").unwrap();
        assert!(matches!(display_locale(Some(&malformed)), Err(ConfigError::Parse(_))));
    }
}
