//! Configuration model and helpers used by PassProbe surfaces.

use crate::error::{PassprobeError, PassprobeResult};
use directories_next::ProjectDirs;
use log::{info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default address of the external analysis service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "PASSPROBE_CONFIG";

const BOOTSTRAP_FILE_NAME: &str = "passprobe.toml";
const APP_QUALIFIER: &str = "io";
const APP_ORGANIZATION: &str = "PassProbe";
const APP_NAME: &str = "passprobe";

pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_history_capacity() -> usize {
    50
}

fn default_debounce_ms() -> u64 {
    250
}

/// Lightweight sanity check that a value can serve as the service base URL.
pub fn looks_like_base_url(value: &str) -> bool {
    let trimmed = value.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return false;
    }
    let rest = trimmed
        .trim_start_matches("http://")
        .trim_start_matches("https://");
    !rest.is_empty() && !rest.starts_with('/')
}

/// Where the analysis service lives and how long we wait for it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ServiceCfg {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout; the pipeline must never hang on a slow service.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceCfg {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Bounded history of completed checks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryCfg {
    /// Write-time cap on retained entries; the newest entries survive.
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,

    /// Optional override for the backing file location.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for HistoryCfg {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
            path: None,
        }
    }
}

/// Input coalescing for the analysis pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InputCfg {
    /// Quiescence window before a keystroke starts a pipeline run.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for InputCfg {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Top-level configuration, persisted as TOML.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PassprobeConfig {
    #[serde(default)]
    pub service: ServiceCfg,

    #[serde(default)]
    pub history: HistoryCfg,

    #[serde(default)]
    pub input: InputCfg,

    /// Effective file location; recorded at load time, never serialized.
    #[serde(skip)]
    #[schemars(skip)]
    pub path: PathBuf,
}

impl Default for PassprobeConfig {
    fn default() -> Self {
        Self {
            service: ServiceCfg::default(),
            history: HistoryCfg::default(),
            input: InputCfg::default(),
            path: PathBuf::new(),
        }
    }
}

impl PassprobeConfig {
    /// Default configuration file location for this user, falling back to the
    /// working directory when no home is available.
    pub fn default_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().join(BOOTSTRAP_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(BOOTSTRAP_FILE_NAME))
    }

    /// Load the configuration at `path`, or bootstrap a commented template
    /// there (falling back to the per-user config dir when the requested
    /// location is unwritable) and return defaults.
    pub fn load_or_bootstrap(path: &Path) -> PassprobeResult<Self> {
        if path.exists() {
            let raw = fs::read_to_string(path)?;
            let mut config: PassprobeConfig = toml::from_str(&raw)
                .map_err(|err| PassprobeError::InvalidConfig(err.to_string()))?;
            config.path = path.to_path_buf();
            config.validate()?;
            return Ok(config);
        }

        let mut config = PassprobeConfig::default();
        config.path = match write_bootstrap(path) {
            Ok(()) => path.to_path_buf(),
            Err(err) => {
                let fallback = Self::default_path();
                if fallback != path {
                    warn!(
                        "could not bootstrap configuration at {}: {err}; trying {}",
                        path.display(),
                        fallback.display()
                    );
                    match write_bootstrap(&fallback) {
                        Ok(()) => fallback,
                        Err(err) => {
                            warn!(
                                "could not bootstrap configuration at {}: {err}; continuing with defaults",
                                fallback.display()
                            );
                            fallback
                        }
                    }
                } else {
                    warn!(
                        "could not bootstrap configuration at {}: {err}; continuing with defaults",
                        path.display()
                    );
                    path.to_path_buf()
                }
            }
        };
        info!(
            "configuration bootstrapped with defaults at {}",
            config.path.display()
        );
        Ok(config)
    }

    /// Persist the current values back to the recorded path.
    pub fn save(&self) -> PassprobeResult<()> {
        self.validate()?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let rendered = toml::to_string_pretty(self)
            .map_err(|err| PassprobeError::InvalidConfig(err.to_string()))?;
        fs::write(&self.path, rendered)?;
        Ok(())
    }

    /// Service base URL with any trailing slash removed.
    pub fn base_url(&self) -> String {
        self.service.base_url.trim_end_matches('/').to_string()
    }

    fn validate(&self) -> PassprobeResult<()> {
        if !looks_like_base_url(&self.service.base_url) {
            return Err(PassprobeError::InvalidConfig(format!(
                "service.base_url must be an http(s) URL (got `{}`)",
                self.service.base_url
            )));
        }
        if self.service.timeout_secs == 0 {
            return Err(PassprobeError::InvalidConfig(
                "service.timeout_secs must be at least 1".into(),
            ));
        }
        if self.history.capacity == 0 {
            return Err(PassprobeError::InvalidConfig(
                "history.capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn write_bootstrap(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bootstrap_template())
}

/// Commented template written when no configuration file exists yet.
pub fn bootstrap_template() -> String {
    format!(
        "# Auto-generated PassProbe configuration bootstrap.\n\
         # Point base_url at the password-analysis service before first use.\n\
         \n\
         [service]\n\
         base_url = \"{DEFAULT_BASE_URL}\"\n\
         timeout_secs = 10\n\
         \n\
         [history]\n\
         # Newest entries are kept; older ones are dropped at write time.\n\
         capacity = 50\n\
         # path = \"/path/to/history.json\"\n\
         \n\
         [input]\n\
         # Quiescence window (ms) before a keystroke triggers analysis.\n\
         debounce_ms = 250\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn bootstrap_writes_template_and_returns_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("passprobe.toml");
        let config = PassprobeConfig::load_or_bootstrap(&path).expect("bootstrap");
        assert_eq!(config.path, path);
        assert_eq!(config.service.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.history.capacity, 50);
        assert!(path.exists());

        // The template itself must parse back to the same defaults.
        let reloaded = PassprobeConfig::load_or_bootstrap(&path).expect("reload");
        assert_eq!(reloaded.service.timeout_secs, config.service.timeout_secs);
        assert_eq!(reloaded.input.debounce_ms, config.input.debounce_ms);
    }

    #[test]
    fn save_round_trips_custom_values() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("passprobe.toml");
        let mut config = PassprobeConfig::default();
        config.path = path.clone();
        config.service.base_url = "https://analysis.example:8443/".into();
        config.history.capacity = 7;
        config.save().expect("save");

        let reloaded = PassprobeConfig::load_or_bootstrap(&path).expect("reload");
        assert_eq!(reloaded.service.base_url, "https://analysis.example:8443/");
        assert_eq!(reloaded.base_url(), "https://analysis.example:8443");
        assert_eq!(reloaded.history.capacity, 7);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("passprobe.toml");
        fs::write(&path, "[service]\nbase_url = \"ftp://nope\"\n").expect("write");
        assert!(PassprobeConfig::load_or_bootstrap(&path).is_err());
    }

    #[test]
    fn base_url_shapes() {
        assert!(looks_like_base_url("http://127.0.0.1:5000"));
        assert!(looks_like_base_url("https://svc.internal"));
        assert!(!looks_like_base_url("127.0.0.1:5000"));
        assert!(!looks_like_base_url("http://"));
        assert!(!looks_like_base_url(""));
    }
}
