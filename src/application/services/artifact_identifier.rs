use crate::application::dto::{RepositoryTarget, SyncSettings};
use crate::inspection::domain::{ExternalId, PackageType, PropertyKeys, RepoPath};
use crate::inspection::services::{DeclaredCoordinates, IdentityResolver, PatternMatcher};
use crate::ports::outbound::PropertyStore;
use crate::shared::Result;
use std::collections::BTreeSet;

/// ArtifactIdentifier - Finds candidate artifacts and resolves their identity
///
/// Reads the inputs the pure domain services need (listing, side-channel
/// properties, layout) from the property store.
pub struct ArtifactIdentifier<'a, S> {
    store: &'a S,
    settings: &'a SyncSettings,
}

impl<'a, S: PropertyStore> ArtifactIdentifier<'a, S> {
    pub fn new(store: &'a S, settings: &'a SyncSettings) -> Self {
        Self { store, settings }
    }

    /// Candidate artifact paths of a repository
    ///
    /// A package type without patterns yields an empty set and a warning.
    ///
    /// # Errors
    /// Returns an error for malformed configured patterns or a failed listing
    pub fn find_candidates(&self, target: &RepositoryTarget) -> Result<BTreeSet<RepoPath>> {
        let patterns = self.settings.patterns_for(&target.package_type);
        let matcher = PatternMatcher::parse(&patterns)?;
        if matcher.is_empty() {
            tracing::warn!(
                repository = %target.key,
                package_type = %target.package_type,
                "No supported pattern for package type"
            );
            return Ok(BTreeSet::new());
        }

        let artifacts = self.store.list_artifacts(&target.key)?;
        let candidates = matcher.find_candidates(artifacts);
        tracing::debug!(
            repository = %target.key,
            patterns = matcher.pattern_count(),
            candidates = candidates.len(),
            "Candidate artifacts found"
        );
        Ok(candidates)
    }

    /// Resolves the external id of one artifact
    ///
    /// # Returns
    /// `None` when neither side-channel properties nor layout yield a
    /// non-blank name and version
    ///
    /// # Errors
    /// Only store read failures propagate
    pub fn resolve(&self, path: &RepoPath, package_type: &PackageType) -> Result<Option<ExternalId>> {
        let declared = match package_type.name_version_properties() {
            Some((name_key, version_key)) => {
                let name = self.store.get_property(path, name_key)?;
                let version = self.store.get_property(path, version_key)?;
                DeclaredCoordinates::new(name.as_deref(), version.as_deref())
            }
            None => DeclaredCoordinates::default(),
        };
        let layout = self.store.layout_info(path)?;

        Ok(IdentityResolver::resolve(package_type, &declared, layout.as_ref()))
    }
}

/// The origin properties an identified artifact carries
pub fn origin_properties(keys: &PropertyKeys, external_id: &ExternalId) -> Vec<(String, String)> {
    vec![
        (keys.origin_id(), external_id.origin_id()),
        (keys.forge(), external_id.forge().name().to_string()),
    ]
}
