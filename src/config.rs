//! Configuration file support for bom-sync.
//!
//! Provides YAML-based configuration through `bom-sync.config.yml` files,
//! including data structures, file loading, validation, and the conversion
//! into the settings the use cases run with.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Duration;

use crate::application::dto::{
    RepositoryTarget, SyncSettings, DEFAULT_MAX_CONCURRENCY, DEFAULT_PROJECT_VERSION,
};
use crate::application::services::{DateCodec, DEFAULT_DATE_TIME_PATTERN};
use crate::inspection::domain::{PackageType, PropertyKeys};
use crate::inspection::services::PatternMatcher;
use crate::shared::error::SyncError;
use crate::shared::security::{read_regular_file, MAX_CONFIG_FILE_SIZE};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "bom-sync.config.yml";

/// Environment variable overriding `bom_service.api_token`
pub const API_TOKEN_ENV: &str = "BOM_SYNC_API_TOKEN";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub bom_service: Option<BomServiceSection>,
    #[serde(default)]
    pub repositories: Vec<RepositorySection>,
    /// Glob patterns per package type name, overriding the defaults
    #[serde(default)]
    pub patterns: HashMap<String, String>,
    pub date_time_pattern: Option<String>,
    pub property_prefix: Option<String>,
    pub default_project_version: Option<String>,
    pub max_concurrency: Option<usize>,
    pub update_failure_ceiling: Option<u32>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Connection settings of the BOM service.
#[derive(Debug, Deserialize)]
pub struct BomServiceSection {
    pub url: String,
    pub api_token: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// A repository to synchronize.
#[derive(Debug, Deserialize)]
pub struct RepositorySection {
    pub key: String,
    pub package_type: PackageType,
}

impl ConfigFile {
    /// Builds the settings shared by every use case of a pass
    pub fn sync_settings(&self) -> Result<SyncSettings> {
        let dates = DateCodec::new(
            self.date_time_pattern
                .as_deref()
                .unwrap_or(DEFAULT_DATE_TIME_PATTERN),
        )?;
        let keys = self
            .property_prefix
            .as_deref()
            .map(PropertyKeys::new)
            .unwrap_or_default();

        let patterns = self
            .patterns
            .iter()
            .map(|(name, globs)| (PackageType::parse(name), globs.clone()))
            .collect();

        Ok(SyncSettings {
            keys,
            dates,
            patterns,
            default_project_version: self
                .default_project_version
                .clone()
                .unwrap_or_else(|| DEFAULT_PROJECT_VERSION.to_string()),
            max_concurrency: self.max_concurrency.unwrap_or(DEFAULT_MAX_CONCURRENCY),
            update_failure_ceiling: self.update_failure_ceiling,
        })
    }

    /// The configured repositories, optionally narrowed to `only`
    ///
    /// # Errors
    /// Returns a validation error when `only` names an unconfigured repository
    pub fn targets(&self, only: &[String]) -> Result<Vec<RepositoryTarget>> {
        for key in only {
            if !self.repositories.iter().any(|r| &r.key == key) {
                return Err(SyncError::Validation {
                    message: format!("Repository '{}' is not configured", key),
                }
                .into());
            }
        }

        Ok(self
            .repositories
            .iter()
            .filter(|r| only.is_empty() || only.contains(&r.key))
            .map(|r| RepositoryTarget::new(&r.key, r.package_type.clone()))
            .collect())
    }

    /// API token from the environment, falling back to the file
    pub fn api_token(&self) -> Option<String> {
        std::env::var(API_TOKEN_ENV)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .or_else(|| self.bom_service.as_ref().and_then(|s| s.api_token.clone()))
    }

    pub fn service_timeout(&self) -> Duration {
        Duration::from_secs(
            self.bom_service
                .as_ref()
                .and_then(|s| s.timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_regular_file(path, "config file", MAX_CONFIG_FILE_SIZE).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref service) = config.bom_service {
        let url = service.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!(
                "Invalid config: bom_service.url must be an http(s) URL, got '{}'.\n\n\
                 💡 Hint: Use the service root, e.g. \"https://bom.example.com\".",
                service.url
            );
        }
        if service.timeout_secs == Some(0) {
            bail!("Invalid config: bom_service.timeout_secs must be greater than 0.");
        }
    }

    let mut seen = HashSet::new();
    for (i, repository) in config.repositories.iter().enumerate() {
        if repository.key.trim().is_empty() {
            bail!(
                "Invalid config: repositories[{}].key must not be empty.\n\n\
                 💡 Hint: Each repository entry must name its repository key (e.g., \"npm-local\").",
                i
            );
        }
        if !seen.insert(repository.key.as_str()) {
            bail!(
                "Invalid config: repository '{}' is listed more than once.",
                repository.key
            );
        }
    }

    for (name, globs) in &config.patterns {
        if !PackageType::parse(name).is_supported() {
            bail!(
                "Invalid config: patterns.{} does not name a supported package type.\n\n\
                 💡 Hint: Supported types are: {}.",
                name,
                PackageType::SUPPORTED
                    .iter()
                    .map(PackageType::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        PatternMatcher::parse(globs)
            .with_context(|| format!("Invalid config: patterns.{} is malformed", name))?;
    }

    if config.max_concurrency == Some(0) {
        bail!("Invalid config: max_concurrency must be greater than 0.");
    }
    if config.update_failure_ceiling == Some(0) {
        bail!(
            "Invalid config: update_failure_ceiling must be greater than 0.\n\n\
             💡 Hint: Remove the field to retry failed replays without limit."
        );
    }
    if let Some(ref pattern) = config.date_time_pattern {
        DateCodec::new(pattern)?;
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!(field = %key, "Unknown config field will be ignored");
    }
}
