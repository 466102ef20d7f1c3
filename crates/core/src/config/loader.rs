//! Configuration loader
//!
//! Loads service settings from a credentials file, environment variables or
//! an application config file.
//!
//! ## Loading Strategy
//! 1. A credentials file in dotenv format, located via
//!    `IBM_CREDENTIALS_FILE`, else `./ibm-credentials.env`, else
//!    `$HOME/ibm-credentials.env`
//! 2. Process environment variables
//!
//! The first source that yields any property for the service wins; sources
//! are never merged.
//!
//! ## Property Names
//! Properties are prefixed with the service name upper-cased, with `-`
//! replaced by `_`. For the `db2saas` service:
//! - `DB2SAAS_URL`: service endpoint
//! - `DB2SAAS_AUTH_TYPE`: `iam`, `bearerToken`, `basic` or `noAuth`
//! - `DB2SAAS_APIKEY`: IAM API key
//! - `DB2SAAS_ENABLE_RETRIES` / `DB2SAAS_MAX_RETRIES` /
//!   `DB2SAAS_RETRY_INTERVAL`: retry policy
//! - `DB2SAAS_ENABLE_GZIP`: compress request bodies
//!
//! ## Config Files
//! [`load_from_file`] reads a [`ServiceConfig`] from `.toml` or `.json`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ibmcloud_common::error::{codes, SdkError, SdkResult};
use tracing::debug;

use super::ServiceConfig;
use crate::auth::Authenticator;

/// Environment variable naming an explicit credentials file.
pub const CREDENTIALS_FILE_ENV: &str = "IBM_CREDENTIALS_FILE";

/// Credentials file name looked up in the working and home directories.
pub const DEFAULT_CREDENTIALS_FILE_NAME: &str = "ibm-credentials.env";

/// Load the settings for `service_name`.
///
/// Returns the default (empty) config when no source mentions the service.
///
/// # Errors
/// Returns `config-error` if a source exists but cannot be read, or a value
/// is malformed.
pub fn load(service_name: &str) -> SdkResult<ServiceConfig> {
    let props = load_properties(service_name)?;
    ServiceConfig::from_properties(&props)
}

/// Raw properties for `service_name`, keyed without the service prefix.
///
/// # Errors
/// Returns `config-error` if the credentials file cannot be parsed.
pub fn load_properties(service_name: &str) -> SdkResult<HashMap<String, String>> {
    let prefix = property_prefix(service_name);

    if let Some(path) = credentials_file_path() {
        let props = properties_from_credentials_file(&path, &prefix)?;
        if !props.is_empty() {
            debug!(service = service_name, path = %path.display(), "loaded service properties from credentials file");
            return Ok(props);
        }
    }

    let props = strip_prefix(std::env::vars(), &prefix);
    if !props.is_empty() {
        debug!(service = service_name, "loaded service properties from environment");
    }
    Ok(props)
}

/// Build the authenticator configured for `service_name`.
///
/// # Errors
/// Returns `config-error` when no properties exist for the service, or the
/// configured credentials are incomplete.
pub fn get_authenticator_from_environment(service_name: &str) -> SdkResult<Arc<dyn Authenticator>> {
    let props = load_properties(service_name)?;
    if props.is_empty() {
        return Err(SdkError::configuration(
            codes::CONFIG_ERROR,
            format!("no configuration found for service '{service_name}'"),
        ));
    }
    ServiceConfig::from_properties(&props)?.auth.build_authenticator()
}

/// Load a [`ServiceConfig`] from a file
///
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `config-error` if:
/// - File not found
/// - File format is invalid
pub fn load_from_file(path: &Path) -> SdkResult<ServiceConfig> {
    if !path.exists() {
        return Err(config_error(format!("Config file not found: {}", path.display())));
    }

    tracing::info!(path = %path.display(), "Loading service configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| config_error(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> SdkResult<ServiceConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| config_error(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| config_error(format!("Invalid JSON format: {e}"))),
        _ => Err(config_error(format!("Unsupported config format: {extension}"))),
    }
}

/// Get required environment variable
///
/// # Errors
/// Returns `config-error` if the variable is not set.
pub fn env_var(key: &str) -> SdkResult<String> {
    std::env::var(key)
        .map_err(|_| config_error(format!("Missing required environment variable: {key}")))
}

/// Get boolean environment variable with default
///
/// Accepts: "true", "1", "yes", "on" (case-insensitive) as true.
/// Everything else is false.
pub fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key).map(|v| super::parse_bool(&v)).unwrap_or(default)
}

/// `db2saas` → `DB2SAAS_`, `iam-policy` → `IAM_POLICY_`
fn property_prefix(service_name: &str) -> String {
    format!("{}_", service_name.to_uppercase().replace('-', "_"))
}

fn credentials_file_path() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var(CREDENTIALS_FILE_ENV) {
        let path = PathBuf::from(explicit);
        return path.is_file().then_some(path);
    }

    let mut candidates = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(DEFAULT_CREDENTIALS_FILE_NAME));
    }
    if let Ok(home) = std::env::var("HOME") {
        candidates.push(PathBuf::from(home).join(DEFAULT_CREDENTIALS_FILE_NAME));
    }
    candidates.into_iter().find(|path| path.is_file())
}

fn properties_from_credentials_file(path: &Path, prefix: &str) -> SdkResult<HashMap<String, String>> {
    let entries = dotenvy::from_path_iter(path)
        .map_err(|e| config_error(format!("Failed to read credentials file {}: {e}", path.display())))?;

    let mut pairs = Vec::new();
    for entry in entries {
        let pair = entry.map_err(|e| {
            config_error(format!("Invalid credentials file {}: {e}", path.display()))
        })?;
        pairs.push(pair);
    }
    Ok(strip_prefix(pairs, prefix))
}

fn strip_prefix(
    pairs: impl IntoIterator<Item = (String, String)>,
    prefix: &str,
) -> HashMap<String, String> {
    pairs
        .into_iter()
        .filter_map(|(key, value)| key.strip_prefix(prefix).map(|name| (name.to_string(), value)))
        .collect()
}

fn config_error(message: String) -> SdkError {
    SdkError::configuration(codes::CONFIG_ERROR, message)
}
