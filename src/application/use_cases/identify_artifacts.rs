use crate::application::dto::{RepositoryOutcome, RepositoryTarget, SyncSettings};
use crate::application::services::{
    origin_properties, ArtifactIdentifier, InspectionStatusStore, ProjectNaming,
};
use crate::inspection::domain::{InspectionStatus, OriginKey, RepoPath};
use crate::inspection::services::{DependencyGraphBuilder, IdentifiedArtifact};
use crate::ports::outbound::{BomService, PropertyStore};
use crate::shared::Result;
use futures::stream::{self, StreamExt};
use std::collections::BTreeSet;

/// Result of one artifact in a delta build
#[derive(Debug, Clone, PartialEq, Eq)]
enum DeltaResult {
    Added(OriginKey),
    Failed,
    Unresolved,
}

/// IdentifyArtifactsUseCase - Maps repository artifacts onto a BOM project version
///
/// Two modes:
/// - initial build: one graph holding every resolvable artifact, submitted as a unit
/// - delta build: one component add per artifact not yet SUCCESS
///
/// # Type Parameters
/// * `B` - BomService implementation
/// * `S` - PropertyStore implementation
pub struct IdentifyArtifactsUseCase<'a, B, S> {
    bom: &'a B,
    store: &'a S,
    settings: &'a SyncSettings,
}

impl<'a, B, S> IdentifyArtifactsUseCase<'a, B, S>
where
    B: BomService,
    S: PropertyStore,
{
    pub fn new(bom: &'a B, store: &'a S, settings: &'a SyncSettings) -> Self {
        Self {
            bom,
            store,
            settings,
        }
    }

    fn statuses(&self) -> InspectionStatusStore<'a, S> {
        InspectionStatusStore::new(self.store, &self.settings.keys, &self.settings.dates)
    }

    /// Builds and submits the project graph of a never-inspected repository
    ///
    /// Paths move PENDING then SUCCESS, and the repository moves to PENDING,
    /// only once the graph was accepted. A rejected graph moves the repository
    /// to FAILURE and leaves every path untouched.
    ///
    /// # Errors
    /// Propagates store failures hit before submission (listing, naming)
    pub async fn initial_build(&self, target: &RepositoryTarget) -> Result<RepositoryOutcome> {
        let identifier = ArtifactIdentifier::new(self.store, self.settings);
        let statuses = self.statuses();
        let root = target.root();

        let candidates = identifier.find_candidates(target)?;
        if candidates.is_empty() {
            return Ok(RepositoryOutcome::Skipped {
                reason: "no candidate artifacts".to_string(),
            });
        }

        let mut identified = Vec::new();
        let mut skipped = 0;
        for path in candidates {
            match identifier.resolve(&path, &target.package_type) {
                Ok(Some(external_id)) => identified.push(IdentifiedArtifact::new(path, external_id)),
                Ok(None) => {
                    tracing::info!(repository = %target.key, path = %path, "Artifact identity unresolved, skipping");
                    skipped += 1;
                }
                Err(e) => {
                    tracing::warn!(repository = %target.key, path = %path, error = %e, "Failed to read artifact identity");
                    self.mark_failed(&path);
                    skipped += 1;
                }
            }
        }

        if identified.is_empty() {
            return Ok(RepositoryOutcome::Skipped {
                reason: format!("none of {} candidate artifact(s) resolved", skipped),
            });
        }

        let naming = ProjectNaming::resolve(self.store, &root, self.settings)?;
        let graph = DependencyGraphBuilder::build(naming.project_node(), &identified);

        tracing::info!(
            repository = %target.key,
            project = %naming.project_name,
            version = %naming.version_name,
            components = graph.component_count(),
            "Submitting dependency graph"
        );
        if let Err(e) = self.bom.create_project_version_from_graph(&graph).await {
            tracing::error!(repository = %target.key, error = %e, "Dependency graph rejected");
            self.mark_failed(&root);
            return Ok(RepositoryOutcome::Failed {
                error: e.to_string(),
            });
        }

        for artifact in &identified {
            let written = statuses
                .set_with(
                    &artifact.path,
                    InspectionStatus::Pending,
                    origin_properties(&self.settings.keys, &artifact.external_id),
                )
                .and_then(|_| statuses.set(&artifact.path, InspectionStatus::Success));
            if let Err(e) = written {
                tracing::warn!(repository = %target.key, path = %artifact.path, error = %e, "Failed to record artifact identity");
            }
        }

        self.store
            .set_properties(&root, &naming.to_properties(&self.settings.keys))?;
        statuses.set(&root, InspectionStatus::Pending)?;

        Ok(RepositoryOutcome::GraphSubmitted {
            components: graph.component_count(),
            skipped,
        })
    }

    /// Adds every new artifact of a SUCCESS repository as its own component
    ///
    /// # Returns
    /// The outcome and the origin keys that were added
    pub async fn delta_build(&self, target: &RepositoryTarget) -> Result<(RepositoryOutcome, BTreeSet<OriginKey>)> {
        let identifier = ArtifactIdentifier::new(self.store, self.settings);
        let statuses = self.statuses();

        let mut pending = Vec::new();
        for path in identifier.find_candidates(target)? {
            if statuses.get(&path)? != Some(InspectionStatus::Success) {
                pending.push(path);
            }
        }

        if pending.is_empty() {
            return Ok((
                RepositoryOutcome::Skipped {
                    reason: "no new artifacts".to_string(),
                },
                BTreeSet::new(),
            ));
        }

        let naming = ProjectNaming::resolve(self.store, &target.root(), self.settings)?;
        let results: Vec<DeltaResult> = stream::iter(pending)
            .map(|path| {
                let identifier = &identifier;
                let naming = &naming;
                async move { self.add_artifact(identifier, target, naming, path).await }
            })
            .buffer_unordered(self.settings.max_concurrency.max(1))
            .collect()
            .await;

        let mut added = BTreeSet::new();
        let mut failed = 0;
        for result in results {
            match result {
                DeltaResult::Added(key) => {
                    added.insert(key);
                }
                DeltaResult::Failed => failed += 1,
                DeltaResult::Unresolved => {}
            }
        }

        let outcome = RepositoryOutcome::ComponentsAdded {
            added: added.len(),
            failed,
        };
        Ok((outcome, added))
    }

    async fn add_artifact(
        &self,
        identifier: &ArtifactIdentifier<'a, S>,
        target: &RepositoryTarget,
        naming: &ProjectNaming,
        path: RepoPath,
    ) -> DeltaResult {
        let statuses = self.statuses();

        let external_id = match identifier.resolve(&path, &target.package_type) {
            Ok(Some(id)) => id,
            Ok(None) => {
                tracing::info!(repository = %target.key, path = %path, "Artifact identity unresolved, skipping");
                return DeltaResult::Unresolved;
            }
            Err(e) => {
                tracing::warn!(repository = %target.key, path = %path, error = %e, "Failed to read artifact identity");
                self.mark_failed(&path);
                return DeltaResult::Failed;
            }
        };

        let origin = origin_properties(&self.settings.keys, &external_id);
        let recorded = match statuses.get(&path) {
            Ok(Some(InspectionStatus::Failure)) => self.store.set_properties(&path, &origin),
            Ok(_) => statuses.set_with(&path, InspectionStatus::Pending, origin),
            Err(e) => Err(e),
        };
        if let Err(e) = recorded {
            tracing::warn!(repository = %target.key, path = %path, error = %e, "Failed to record artifact identity");
            self.mark_failed(&path);
            return DeltaResult::Failed;
        }

        match self
            .bom
            .add_component_to_project_version(&external_id, &naming.project_name, &naming.version_name)
            .await
        {
            Ok(()) => match statuses.set(&path, InspectionStatus::Success) {
                Ok(()) => {
                    tracing::debug!(repository = %target.key, path = %path, component = %external_id, "Component added");
                    DeltaResult::Added(external_id.origin_key())
                }
                Err(e) => {
                    tracing::warn!(repository = %target.key, path = %path, error = %e, "Failed to record artifact status");
                    DeltaResult::Failed
                }
            },
            Err(e) => {
                tracing::warn!(
                    repository = %target.key,
                    path = %path,
                    component = %external_id,
                    error = %e,
                    "Failed to add component to project version"
                );
                self.mark_failed(&path);
                DeltaResult::Failed
            }
        }
    }

    /// Best-effort FAILURE write; a failing store is only logged
    fn mark_failed(&self, path: &RepoPath) {
        if let Err(e) = self.statuses().set(path, InspectionStatus::Failure) {
            tracing::warn!(path = %path, error = %e, "Failed to record FAILURE status");
        }
    }
}
