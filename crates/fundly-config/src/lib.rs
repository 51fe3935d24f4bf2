//! Configuration and client-side persistence for the Fundly TUI.
//!
//! TOML config (server URL, timeouts, TLS, log settings) merged with
//! `FUNDLY_`-prefixed environment variables, plus [`FileSession`]: the
//! file-backed rendition of the single persisted `login-state` marker.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use fundly_core::SessionStore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration for the client.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Connection settings for the Fundly server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server base URL (e.g. "https://fundly.example.com").
    #[serde(default = "default_server_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Skip TLS certificate verification (self-hosted instances).
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate (PEM).
    pub ca_cert: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            timeout: default_timeout(),
            insecure: false,
            ca_cert: None,
        }
    }
}

fn default_server_url() -> String {
    "http://localhost:8080".into()
}
fn default_timeout() -> u64 {
    30
}

/// Log file settings for the TUI (which cannot log to the terminal).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Log file path; defaults to `fundly.log` in the platform data dir.
    pub file: Option<PathBuf>,

    /// Default filter when `RUST_LOG` and `-v` flags are absent.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".into()
}

// ── Paths ───────────────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "fundly", "fundly").map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Platform data directory, for the session marker and log files.
pub fn data_dir() -> PathBuf {
    ProjectDirs::from("dev", "fundly", "fundly").map_or_else(
        dirs_fallback,
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("fundly");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + `FUNDLY_`-prefixed environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("FUNDLY_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning the defaults if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Session marker file ─────────────────────────────────────────────

const MARKER_CONTENT: &str = "authenticated";

/// File-backed session marker: present iff a session exists.
///
/// Writes are best-effort — an unwritable data directory is logged and
/// otherwise ignored, so a broken marker never fails a sign-in (the
/// cookie jar still holds the live session; only the remembered start
/// screen degrades).
#[derive(Debug, Clone)]
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    /// Marker at the default platform location (`login-state` in the
    /// data dir).
    pub fn new() -> Self {
        Self::at(data_dir().join("login-state"))
    }

    /// Marker at an explicit path (tests, custom data dirs).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for FileSession {
    fn set_authenticated(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(error) = std::fs::create_dir_all(parent) {
                warn!(%error, "failed to create session marker directory");
                return;
            }
        }
        if let Err(error) = std::fs::write(&self.path, MARKER_CONTENT) {
            warn!(%error, "failed to write session marker");
        }
    }

    fn clear(&self) {
        if let Err(error) = std::fs::remove_file(&self.path) {
            if error.kind() != std::io::ErrorKind::NotFound {
                warn!(%error, "failed to remove session marker");
            }
        }
    }

    fn is_authenticated(&self) -> bool {
        std::fs::read_to_string(&self.path)
            .map(|content| content.trim() == MARKER_CONTENT)
            .unwrap_or(false)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn file_session_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let session = FileSession::at(dir.path().join("login-state"));

        assert!(!session.is_authenticated());
        session.set_authenticated();
        assert!(session.is_authenticated());
        session.clear();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn stale_marker_content_is_not_authenticated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("login-state");
        std::fs::write(&path, "something-else").unwrap();

        assert!(!FileSession::at(path).is_authenticated());
    }

    #[test]
    fn clear_on_missing_marker_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let session = FileSession::at(dir.path().join("login-state"));
        session.clear();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn config_defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.server.url, "http://localhost:8080");
        assert_eq!(config.server.timeout, 30);
        assert!(!config.server.insecure);
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = Config::default();
        config.server.url = "https://funds.example.com".into();
        config.log.file = Some(PathBuf::from("/tmp/fundly.log"));

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.server.url, "https://funds.example.com");
        assert_eq!(parsed.log.file, Some(PathBuf::from("/tmp/fundly.log")));
    }
}
