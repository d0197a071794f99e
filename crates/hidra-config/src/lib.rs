//! Shared configuration for the hidra CLI.
//!
//! TOML profiles layered with `HIDRA_` environment overrides, and
//! translation to `hidra_core::GatewayConfig`. The CLI adds
//! `GlobalOpts`-aware wrappers on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hidra_core::GatewayConfig;
use hidra_core::config::DEFAULT_GATEWAY_URL;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named gateway profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Dashboard poll period (seconds).
    #[serde(default = "default_dashboard_interval")]
    pub dashboard_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            dashboard_interval: default_dashboard_interval(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    10
}
fn default_dashboard_interval() -> u64 {
    300
}

/// A named gateway profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Gateway base URL (e.g., "http://192.168.4.1").
    #[serde(default = "default_gateway")]
    pub gateway: String,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Background refresh period for long-running commands (seconds).
    pub refresh_interval: Option<u64>,

    /// Override dashboard poll period (seconds).
    pub dashboard_interval: Option<u64>,

    /// Delay before the first dashboard poll (seconds).
    pub dashboard_initial_delay: Option<u64>,

    /// How long notifications stay visible (milliseconds).
    pub notification_ttl_ms: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            gateway: default_gateway(),
            timeout: None,
            refresh_interval: None,
            dashboard_interval: None,
            dashboard_initial_delay: None,
            notification_ttl_ms: None,
        }
    }
}

fn default_gateway() -> String {
    DEFAULT_GATEWAY_URL.into()
}

impl Config {
    /// Name of the profile to use when none is given.
    pub fn active_profile_name(&self) -> &str {
        self.default_profile.as_deref().unwrap_or("default")
    }

    /// Look up a profile. The `default` profile always resolves, falling
    /// back to built-in values when it is not in the file.
    pub fn profile(&self, name: &str) -> Result<Profile, ConfigError> {
        match self.profiles.get(name) {
            Some(profile) => Ok(profile.clone()),
            None if name == "default" => Ok(Profile::default()),
            None => Err(ConfigError::UnknownProfile { name: name.into() }),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("eco", "hidra", "hidra").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("hidra");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment.
///
/// Layering: built-in defaults, then the TOML file (if present), then
/// `HIDRA_*` variables (`__` separates nested keys, e.g.
/// `HIDRA_DEFAULTS__TIMEOUT=30`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("HIDRA_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist or is invalid.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `GatewayConfig` from a profile — no CLI flag overrides.
pub fn profile_to_gateway_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<GatewayConfig, ConfigError> {
    let url: url::Url = profile
        .gateway
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "gateway".into(),
            reason: format!("invalid URL: {}", profile.gateway),
        })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "gateway".into(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    let base = GatewayConfig::default();
    Ok(GatewayConfig {
        url,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        refresh_interval_secs: profile.refresh_interval.unwrap_or(base.refresh_interval_secs),
        dashboard_interval_secs: profile
            .dashboard_interval
            .unwrap_or(defaults.dashboard_interval),
        dashboard_initial_delay_secs: profile
            .dashboard_initial_delay
            .unwrap_or(base.dashboard_initial_delay_secs),
        notification_ttl: profile
            .notification_ttl_ms
            .map_or(base.notification_ttl, Duration::from_millis),
        ..base
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.active_profile_name(), "default");
        assert_eq!(cfg.defaults.timeout, 10);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn file_profiles_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "campo"

[defaults]
timeout = 5

[profiles.campo]
gateway = "http://10.0.0.7"
dashboard_interval = 60
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.active_profile_name(), "campo");

        let profile = cfg.profile("campo").unwrap();
        let gateway = profile_to_gateway_config(&profile, &cfg.defaults).unwrap();
        assert_eq!(gateway.url.as_str(), "http://10.0.0.7/");
        assert_eq!(gateway.timeout, Duration::from_secs(5));
        assert_eq!(gateway.dashboard_interval_secs, 60);
    }

    #[test]
    fn save_then_load_preserves_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                gateway: "http://192.168.4.1".into(),
                timeout: Some(20),
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), cfg);
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let cfg = Config::default();
        assert!(cfg.profile("default").is_ok());
        assert!(matches!(
            cfg.profile("lab"),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn invalid_gateway_url_is_rejected() {
        let profile = Profile {
            gateway: "not a url".into(),
            ..Profile::default()
        };
        assert!(matches!(
            profile_to_gateway_config(&profile, &Defaults::default()),
            Err(ConfigError::Validation { .. })
        ));

        let profile = Profile {
            gateway: "ftp://192.168.4.1".into(),
            ..Profile::default()
        };
        assert!(profile_to_gateway_config(&profile, &Defaults::default()).is_err());
    }
}
