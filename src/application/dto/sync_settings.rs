use crate::application::services::DateCodec;
use crate::inspection::domain::{PackageType, PropertyKeys};
use std::collections::HashMap;

/// Default concurrency for repositories and per-artifact work
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Default project version name for repositories that do not name one
pub const DEFAULT_PROJECT_VERSION: &str = "default";

/// SyncSettings - Tunables shared by every use case of a pass
#[derive(Debug, Clone)]
pub struct SyncSettings {
    pub keys: PropertyKeys,
    pub dates: DateCodec,
    /// Configured pattern overrides per package type
    pub patterns: HashMap<PackageType, String>,
    pub default_project_version: String,
    pub max_concurrency: usize,
    /// Consecutive failed replays after which a repository moves to FAILURE
    ///
    /// Only notification replays count; a failed delta population marks the
    /// repository OUT_OF_DATE without touching the counter.
    pub update_failure_ceiling: Option<u32>,
}

impl SyncSettings {
    /// Returns the comma-separated patterns for a package type
    ///
    /// Configured patterns win over the built-in defaults; an unsupported type
    /// has none.
    pub fn patterns_for(&self, package_type: &PackageType) -> String {
        if !package_type.is_supported() {
            return String::new();
        }
        self.patterns
            .get(package_type)
            .cloned()
            .unwrap_or_else(|| package_type.default_patterns().to_string())
    }

    pub fn with_patterns(mut self, package_type: PackageType, patterns: &str) -> Self {
        self.patterns.insert(package_type, patterns.to_string());
        self
    }

    pub fn with_update_failure_ceiling(mut self, ceiling: u32) -> Self {
        self.update_failure_ceiling = Some(ceiling);
        self
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            keys: PropertyKeys::default(),
            dates: DateCodec::default(),
            patterns: HashMap::new(),
            default_project_version: DEFAULT_PROJECT_VERSION.to_string(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            update_failure_ceiling: None,
        }
    }
}
