//! Profile-based CLI configuration.
//!
//! Profiles live in `~/.config/pmax/config.toml`; secrets may instead
//! come from the environment (`PMAX_PASSWORD`, `PMAX_USER_CODE`) so
//! scripts never write them to disk. Resolution order for every field:
//! CLI flag > environment > profile > default.
//!
//! ```toml
//! default_profile = "home"
//!
//! [profiles.home]
//! email = "user@example.com"
//! password = "..."          # or PMAX_PASSWORD
//! user_code = "1234"        # or PMAX_USER_CODE
//! app_id = "00000000-0000-0000-0000-000000000000"
//! panel_serial = "1B7EEB"
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Format, Toml};
use secrecy::SecretString;
use serde::Deserialize;

use pmax_core::{DEFAULT_BASE_URL, PanelConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── File format ─────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Profile {
    pub base_url: Option<String>,
    pub email: Option<String>,
    pub password: Option<SecretString>,
    pub user_code: Option<SecretString>,
    pub app_id: Option<String>,
    pub panel_serial: Option<String>,
}

/// Path of the config file (`~/.config/pmax/config.toml` on Linux).
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pmax").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load the config file, or an empty config if there is none.
pub fn load_config() -> Result<Config, CliError> {
    let Some(path) = config_path() else {
        return Ok(Config::default());
    };
    if !path.exists() {
        return Ok(Config::default());
    }
    Figment::from(Toml::file(&path))
        .extract()
        .map_err(|e| CliError::Config {
            message: format!("{}: {e}", path.display()),
        })
}

// ── Resolution ──────────────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Translate the loaded profile + global flags into a `PanelConfig`.
///
/// `poll_interval_secs` is 0 for one-shot commands and the watch
/// interval for `pmax watch`.
pub fn resolve_panel_config(
    global: &GlobalOpts,
    poll_interval_secs: u64,
) -> Result<PanelConfig, CliError> {
    let config = load_config()?;
    let name = active_profile_name(global, &config);
    // A missing profile behaves like an empty one -- the environment
    // can still supply everything.
    let profile = config.profiles.get(&name).cloned().unwrap_or_default();

    let url_str = global
        .base_url
        .as_deref()
        .or(profile.base_url.as_deref())
        .unwrap_or(DEFAULT_BASE_URL);
    let base_url = url_str.parse().map_err(|_| CliError::Validation {
        field: "base-url".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    let email = profile
        .email
        .clone()
        .or_else(|| std::env::var("PMAX_EMAIL").ok())
        .ok_or_else(|| missing(&name, "email", "PMAX_EMAIL"))?;

    let password = profile
        .password
        .clone()
        .or_else(|| std::env::var("PMAX_PASSWORD").ok().map(SecretString::from))
        .ok_or_else(|| missing(&name, "password", "PMAX_PASSWORD"))?;

    let user_code = profile
        .user_code
        .clone()
        .or_else(|| std::env::var("PMAX_USER_CODE").ok().map(SecretString::from))
        .ok_or_else(|| missing(&name, "user_code", "PMAX_USER_CODE"))?;

    let app_id = profile
        .app_id
        .clone()
        .or_else(|| std::env::var("PMAX_APP_ID").ok())
        .ok_or_else(|| missing(&name, "app_id", "PMAX_APP_ID"))?;

    let panel_serial = global
        .panel
        .clone()
        .or_else(|| profile.panel_serial.clone())
        .ok_or_else(|| missing(&name, "panel_serial", "PMAX_PANEL"))?;

    Ok(PanelConfig {
        base_url,
        email,
        password,
        user_code,
        app_id,
        panel_serial,
        timeout: Duration::from_secs(global.timeout),
        poll_interval_secs,
        ..PanelConfig::default()
    })
}

fn missing(profile: &str, field: &str, env: &str) -> CliError {
    CliError::Config {
        message: format!("profile '{profile}' has no {field} (set it in the config file or {env})"),
    }
}
