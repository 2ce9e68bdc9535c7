use crate::application::dto::{RepositoryOutcome, RepositoryTarget, SyncSettings};
use crate::application::services::{
    AggregationOutcome, ApplyOutcome, CompositeComponentResolver, InspectionStatusStore,
    MetadataAggregator, ProjectNaming,
};
use crate::inspection::domain::{BomComponent, InspectionStatus, OriginKey, ProjectVersion};
use crate::ports::outbound::{BomService, PropertyStore};
use crate::shared::error::SyncError;
use crate::shared::Result;
use std::collections::BTreeSet;

/// PopulateMetadataUseCase - Writes BOM metadata onto identified artifacts
///
/// # Type Parameters
/// * `B` - BomService implementation
/// * `S` - PropertyStore implementation
pub struct PopulateMetadataUseCase<'a, B, S> {
    bom: &'a B,
    store: &'a S,
    settings: &'a SyncSettings,
}

impl<'a, B, S> PopulateMetadataUseCase<'a, B, S>
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

    /// Populates a PENDING repository from its whole BOM and moves it to SUCCESS
    ///
    /// A project version that is not visible yet leaves the repository PENDING.
    /// So does a pass in which some components could not be fetched. A service
    /// failure moves the repository to FAILURE.
    pub async fn populate_repository(&self, target: &RepositoryTarget) -> Result<RepositoryOutcome> {
        let statuses = InspectionStatusStore::new(self.store, &self.settings.keys, &self.settings.dates);
        let root = target.root();
        let naming = ProjectNaming::resolve(self.store, &root, self.settings)?;

        let result = async {
            let Some(project_version) = self
                .bom
                .get_project_version(&naming.project_name, &naming.version_name)
                .await?
            else {
                return Ok(None);
            };
            let (aggregation, applied) = self.refresh(&target.key, &project_version, |_| true).await?;
            Ok::<_, anyhow::Error>(Some((project_version, aggregation, applied)))
        }
        .await;

        let (project_version, aggregation, applied) = match result {
            Ok(Some(found)) => found,
            Ok(None) => {
                tracing::info!(
                    repository = %target.key,
                    project = %naming.project_name,
                    version = %naming.version_name,
                    "Project version not available yet, staying PENDING"
                );
                return Ok(RepositoryOutcome::Skipped {
                    reason: "project version not available yet".to_string(),
                });
            }
            Err(e) => {
                tracing::error!(repository = %target.key, error = %e, "Metadata population failed");
                statuses.set(&root, InspectionStatus::Failure)?;
                return Ok(RepositoryOutcome::Failed {
                    error: e.to_string(),
                });
            }
        };

        if aggregation.incomplete || applied.failures > 0 {
            tracing::warn!(
                repository = %target.key,
                write_failures = applied.failures,
                "Metadata population incomplete, staying PENDING"
            );
            return Ok(RepositoryOutcome::Skipped {
                reason: "population incomplete, retried on next trigger".to_string(),
            });
        }

        self.write_overall_policy(target, &project_version).await;
        statuses.set(&root, InspectionStatus::Success)?;

        tracing::info!(
            repository = %target.key,
            origins = aggregation.records.len(),
            paths = applied.paths_written,
            "Metadata populated"
        );
        Ok(RepositoryOutcome::Populated {
            origins: aggregation.records.len(),
            paths_written: applied.paths_written,
        })
    }

    /// Populates only the given origin keys, after a delta build
    ///
    /// BOM entries are filtered by their origin summary before resolution;
    /// entries without a summary are resolved and filtered afterwards.
    ///
    /// # Errors
    /// Returns a service error when the project version is missing or when
    /// listing or writing metadata fails
    pub async fn populate_origins(
        &self,
        target: &RepositoryTarget,
        origins: &BTreeSet<OriginKey>,
    ) -> Result<RepositoryOutcome> {
        let naming = ProjectNaming::resolve(self.store, &target.root(), self.settings)?;
        let project_version = self
            .bom
            .get_project_version(&naming.project_name, &naming.version_name)
            .await?
            .ok_or_else(|| {
                SyncError::service(
                    "get_project_version",
                    format!("{} {} not found", naming.project_name, naming.version_name),
                )
            })?;

        let mut aggregation = self
            .aggregate_components(&target.key, &project_version, |c| {
                c.origins.is_empty() || c.origins.iter().any(|o| origins.contains(o))
            })
            .await?;
        aggregation.records.retain(|key, _| origins.contains(key));

        let aggregator = MetadataAggregator::new(self.bom, self.store, self.settings);
        let applied = aggregator.apply(&target.key, &aggregation.records);
        if aggregation.incomplete || applied.failures > 0 {
            return Err(SyncError::service(
                "populate_origins",
                format!("{} write failure(s), incomplete={}", applied.failures, aggregation.incomplete),
            )
            .into());
        }

        Ok(RepositoryOutcome::Populated {
            origins: aggregation.records.len(),
            paths_written: applied.paths_written,
        })
    }

    /// Lists, resolves, aggregates and applies the BOM entries accepted by `keep`
    pub(crate) async fn refresh<F>(
        &self,
        repo_key: &str,
        project_version: &ProjectVersion,
        keep: F,
    ) -> Result<(AggregationOutcome, ApplyOutcome)>
    where
        F: Fn(&BomComponent) -> bool,
    {
        let aggregation = self.aggregate_components(repo_key, project_version, keep).await?;
        let aggregator = MetadataAggregator::new(self.bom, self.store, self.settings);
        let applied = aggregator.apply(repo_key, &aggregation.records);
        Ok((aggregation, applied))
    }

    async fn aggregate_components<F>(
        &self,
        repo_key: &str,
        project_version: &ProjectVersion,
        keep: F,
    ) -> Result<AggregationOutcome>
    where
        F: Fn(&BomComponent) -> bool,
    {
        let components = self.bom.get_project_version_components(project_version).await?;
        let selected: Vec<BomComponent> = components.into_iter().filter(|c| keep(c)).collect();
        tracing::debug!(repository = repo_key, components = selected.len(), "Resolving BOM entries");

        let resolver = CompositeComponentResolver::new(self.bom, self.settings.max_concurrency);
        let models = resolver.resolve_all(selected).await;

        let aggregator = MetadataAggregator::new(self.bom, self.store, self.settings);
        Ok(aggregator.aggregate(repo_key, models).await)
    }

    /// Writes the project-level policy status onto the repository root; failures only warn
    pub(crate) async fn write_overall_policy(&self, target: &RepositoryTarget, project_version: &ProjectVersion) {
        let written = match self.bom.get_policy_status(project_version).await {
            Ok(status) => self.store.set_property(
                &target.root(),
                &self.settings.keys.overall_policy_status(),
                status.as_str(),
            ),
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            tracing::warn!(repository = %target.key, error = %e, "Failed to record overall policy status");
        }
    }
}
