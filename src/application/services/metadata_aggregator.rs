use crate::application::dto::SyncSettings;
use crate::inspection::domain::{
    ArtifactMetaData, CompositeComponentModel, OriginKey, SeverityCounts,
};
use crate::inspection::services::MetadataFold;
use crate::ports::outbound::{BomService, PropertyStore};
use futures::stream::{self, StreamExt};
use std::collections::BTreeMap;

/// Records produced by one aggregation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationOutcome {
    pub records: BTreeMap<OriginKey, ArtifactMetaData>,
    /// True when at least one component contributed nothing because a fetch failed
    pub incomplete: bool,
}

/// Result of fanning records out onto artifact paths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub paths_written: usize,
    pub failures: usize,
}

/// MetadataAggregator - Computes per-origin metadata and writes it back
///
/// # Type Parameters
/// * `B` - BomService implementation
/// * `S` - PropertyStore implementation
pub struct MetadataAggregator<'a, B, S> {
    bom: &'a B,
    store: &'a S,
    settings: &'a SyncSettings,
}

impl<'a, B: BomService, S: PropertyStore> MetadataAggregator<'a, B, S> {
    pub fn new(bom: &'a B, store: &'a S, settings: &'a SyncSettings) -> Self {
        Self {
            bom,
            store,
            settings,
        }
    }

    /// Folds resolved components into one record per origin key
    ///
    /// Counts come from one fresh listing of each component version's
    /// vulnerabilities. A failed listing drops that component from the pass.
    pub async fn aggregate(&self, repo_key: &str, components: Vec<CompositeComponentModel>) -> AggregationOutcome {
        let tallied: Vec<(CompositeComponentModel, Option<SeverityCounts>)> = stream::iter(components)
            .map(|model| async move {
                let Some(version) = &model.component_version else {
                    return (model, None);
                };
                match self.bom.get_vulnerabilities(version).await {
                    Ok(entries) => {
                        let counts = SeverityCounts::tally(entries.iter().map(|v| v.severity.as_str()));
                        (model, Some(counts))
                    }
                    Err(e) => {
                        tracing::warn!(
                            repository = repo_key,
                            reference = %version.vulnerabilities_url,
                            error = %e,
                            "Failed to list vulnerabilities"
                        );
                        (model, None)
                    }
                }
            })
            .buffered(self.settings.max_concurrency.max(1))
            .collect()
            .await;

        let incomplete = tallied.iter().any(|(_, counts)| counts.is_none());
        let folded: Vec<(CompositeComponentModel, SeverityCounts)> = tallied
            .into_iter()
            .filter_map(|(model, counts)| counts.map(|c| (model, c)))
            .collect();

        let records = MetadataFold::fold(&folded);
        tracing::debug!(
            repository = repo_key,
            origins = records.len(),
            incomplete,
            "Metadata aggregated"
        );
        AggregationOutcome { records, incomplete }
    }

    /// Overwrites the metadata of every path whose origin properties equal a record's key
    ///
    /// Store failures are isolated per path and counted.
    pub fn apply(&self, repo_key: &str, records: &BTreeMap<OriginKey, ArtifactMetaData>) -> ApplyOutcome {
        let keys = &self.settings.keys;
        let mut outcome = ApplyOutcome::default();

        for (origin, record) in records {
            if origin.is_blank() {
                continue;
            }

            let filters = [
                (keys.origin_id(), origin.origin_id().to_string()),
                (keys.forge(), origin.forge().to_string()),
            ];
            let paths = match self.store.find_paths(repo_key, &filters) {
                Ok(paths) => paths,
                Err(e) => {
                    tracing::warn!(repository = repo_key, origin = %origin, error = %e, "Failed to search paths for origin");
                    outcome.failures += 1;
                    continue;
                }
            };

            let properties = record.to_properties(keys);
            for path in paths {
                match self.store.set_properties(&path, &properties) {
                    Ok(()) => outcome.paths_written += 1,
                    Err(e) => {
                        tracing::warn!(
                            repository = repo_key,
                            path = %path,
                            origin = %origin,
                            error = %e,
                            "Failed to write artifact metadata"
                        );
                        outcome.failures += 1;
                    }
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::storage::InMemoryPropertyStore;
    use crate::application::services::test_support::StubBomService;
    use crate::inspection::domain::{
        BomComponent, ComponentOrigin, ComponentVersion, PolicyStatus, RepoPath,
    };

    const LODASH: &str = "https://bom.example/api/components/1/versions/11";

    fn lodash_model() -> CompositeComponentModel {
        CompositeComponentModel::new(
            BomComponent::new("lodash", "4.17.21", LODASH, PolicyStatus::InViolation),
            ComponentVersion::new(LODASH, "4.17.21"),
            vec![ComponentOrigin::new("npmjs", "lodash/4.17.21")],
        )
    }

    fn store_with_lodash(settings: &SyncSettings) -> (InMemoryPropertyStore, Vec<RepoPath>) {
        let store = InMemoryPropertyStore::new();
        let paths = vec![
            RepoPath::new("npm-local", "lodash/-/lodash-4.17.21.tgz"),
            RepoPath::new("npm-local", "mirror/lodash-4.17.21.tgz"),
        ];
        for path in &paths {
            store.add_artifact(path.clone());
            store
                .set_properties(
                    path,
                    &[
                        (settings.keys.origin_id(), "lodash/4.17.21".to_string()),
                        (settings.keys.forge(), "npmjs".to_string()),
                    ],
                )
                .unwrap();
        }
        (store, paths)
    }

    #[tokio::test]
    async fn test_aggregate_counts_current_vulnerabilities() {
        let bom = StubBomService::new()
            .with_component(LODASH, vec![])
            .with_vulnerabilities(LODASH, &["HIGH", "HIGH", "LOW", "CRITICAL"]);
        let store = InMemoryPropertyStore::new();
        let settings = SyncSettings::default();
        let aggregator = MetadataAggregator::new(&bom, &store, &settings);

        let outcome = aggregator.aggregate("npm-local", vec![lodash_model()]).await;
        assert!(!outcome.incomplete);
        let record = outcome
            .records
            .get(&OriginKey::new("npmjs", "lodash/4.17.21"))
            .unwrap();
        assert_eq!(record.counts(), SeverityCounts { high: 2, medium: 0, low: 1 });
        assert_eq!(record.policy_status(), PolicyStatus::InViolation);
    }

    #[tokio::test]
    async fn test_failed_listing_marks_incomplete() {
        let bom = StubBomService::new()
            .with_component(LODASH, vec![])
            .failing_vulnerabilities(LODASH);
        let store = InMemoryPropertyStore::new();
        let settings = SyncSettings::default();
        let aggregator = MetadataAggregator::new(&bom, &store, &settings);

        let outcome = aggregator.aggregate("npm-local", vec![lodash_model()]).await;
        assert!(outcome.incomplete);
        assert!(outcome.records.is_empty());
    }

    #[tokio::test]
    async fn test_apply_overwrites_every_matching_path() {
        let bom = StubBomService::new()
            .with_component(LODASH, vec![])
            .with_vulnerabilities(LODASH, &["MEDIUM"]);
        let settings = SyncSettings::default();
        let (store, paths) = store_with_lodash(&settings);
        store
            .set_property(&paths[0], &settings.keys.high_vulnerabilities(), "7")
            .unwrap();
        let aggregator = MetadataAggregator::new(&bom, &store, &settings);

        let outcome = aggregator.aggregate("npm-local", vec![lodash_model()]).await;
        let applied = aggregator.apply("npm-local", &outcome.records);
        assert_eq!(applied, ApplyOutcome { paths_written: 2, failures: 0 });

        for path in &paths {
            let get = |key: String| store.get_property(path, &key).unwrap();
            assert_eq!(get(settings.keys.high_vulnerabilities()), Some("0".to_string()));
            assert_eq!(get(settings.keys.medium_vulnerabilities()), Some("1".to_string()));
            assert_eq!(get(settings.keys.policy_status()), Some("IN_VIOLATION".to_string()));
            assert_eq!(get(settings.keys.component_version_url()), Some(LODASH.to_string()));
        }
    }

    #[tokio::test]
    async fn test_apply_twice_writes_same_values() {
        let bom = StubBomService::new()
            .with_component(LODASH, vec![])
            .with_vulnerabilities(LODASH, &["HIGH", "LOW"]);
        let settings = SyncSettings::default();
        let (store, paths) = store_with_lodash(&settings);
        let aggregator = MetadataAggregator::new(&bom, &store, &settings);

        let first = aggregator.aggregate("npm-local", vec![lodash_model()]).await;
        aggregator.apply("npm-local", &first.records);
        let after_first = store.properties(&paths[0]);

        let second = aggregator.aggregate("npm-local", vec![lodash_model()]).await;
        aggregator.apply("npm-local", &second.records);
        assert_eq!(store.properties(&paths[0]), after_first);
    }

    #[test]
    fn test_apply_skips_blank_keys() {
        let bom = StubBomService::new();
        let settings = SyncSettings::default();
        let (store, _) = store_with_lodash(&settings);
        let aggregator = MetadataAggregator::new(&bom, &store, &settings);

        let blank = OriginKey::new("npmjs", " ");
        let mut records = BTreeMap::new();
        records.insert(
            blank.clone(),
            ArtifactMetaData::new(blank, PolicyStatus::NotInViolation, LODASH),
        );
        assert_eq!(aggregator.apply("npm-local", &records), ApplyOutcome::default());
    }
}
