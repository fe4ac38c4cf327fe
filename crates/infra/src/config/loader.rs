//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `SOCRATES_HOST`: Service address, host with optional port (required)
//! - `SOCRATES_USERNAME`: Login username (required)
//! - `SOCRATES_PASSWORD`: Login password (required)
//! - `SOCRATES_USE_TLS`: Use `https` (true/false, default true)
//! - `SOCRATES_VERIFY`: Verify TLS certificates (true/false, default true)
//! - `SOCRATES_TIMEOUT_SECS`: Per-request timeout in seconds (default 30)
//! - `SOCRATES_LOG_LEVEL`: Structured-log threshold, `0`-`4` or a severity
//!   name (default `ERROR`)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./socrates.json` or `./socrates.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use socrates_domain::constants::DEFAULT_TIMEOUT_SECS;
use socrates_domain::{ClientConfig, Result, Severity, SocratesError};

pub const ENV_HOST: &str = "SOCRATES_HOST";
pub const ENV_USERNAME: &str = "SOCRATES_USERNAME";
pub const ENV_PASSWORD: &str = "SOCRATES_PASSWORD";
pub const ENV_USE_TLS: &str = "SOCRATES_USE_TLS";
pub const ENV_VERIFY: &str = "SOCRATES_VERIFY";
pub const ENV_TIMEOUT_SECS: &str = "SOCRATES_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "SOCRATES_LOG_LEVEL";

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `SocratesError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `SOCRATES_HOST`, `SOCRATES_USERNAME` and `SOCRATES_PASSWORD` must be
/// present; the remaining variables fall back to their defaults.
///
/// # Errors
/// Returns `SocratesError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<ClientConfig> {
    let service_address = env_var(ENV_HOST)?;
    let username = env_var(ENV_USERNAME)?;
    let password = env_var(ENV_PASSWORD)?;

    let timeout_secs = match std::env::var(ENV_TIMEOUT_SECS) {
        Ok(s) => s.trim().parse::<u64>().map_err(|e| {
            SocratesError::Config(format!("Invalid {ENV_TIMEOUT_SECS}: {e}"))
        })?,
        Err(_) => DEFAULT_TIMEOUT_SECS,
    };

    let log_threshold = match std::env::var(ENV_LOG_LEVEL) {
        Ok(s) => s.parse::<Severity>().map_err(|e| {
            SocratesError::Config(format!("Invalid {ENV_LOG_LEVEL}: {e}"))
        })?,
        Err(_) => Severity::Error,
    };

    Ok(ClientConfig {
        service_address,
        use_tls: env_bool(ENV_USE_TLS, true),
        verify_certificate: env_bool(ENV_VERIFY, true),
        timeout_secs,
        username,
        password,
        log_threshold,
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `SocratesError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SocratesError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SocratesError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SocratesError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, format chosen by extension.
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SocratesError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SocratesError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(SocratesError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory (`socrates.*` before `config.*`),
/// up to two parent directories, then the same names relative to the
/// executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("socrates.json"),
        dir.join("socrates.toml"),
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
///
/// # Errors
/// Returns `SocratesError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        SocratesError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
