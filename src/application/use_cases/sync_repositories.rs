use crate::application::dto::{
    RepositoryOutcome, RepositoryReport, RepositoryTarget, SyncReport, SyncSettings,
};
use crate::application::services::InspectionStatusStore;
use crate::application::use_cases::{
    IdentifyArtifactsUseCase, PopulateMetadataUseCase, UpdateMetadataUseCase,
};
use crate::inspection::domain::InspectionStatus;
use crate::ports::inbound::RepositorySyncPort;
use crate::ports::outbound::{BomService, ProgressReporter, PropertyStore};
use async_trait::async_trait;
use chrono::Utc;
use futures::stream::{self, StreamExt};

#[derive(Debug, Clone, Copy)]
enum Pass {
    Identify,
    Update,
}

/// SyncRepositoriesUseCase - Drives one pass over a set of repositories
///
/// Repositories are independent and processed concurrently, bounded by
/// `max_concurrency`. The report lists them in input order.
///
/// # Type Parameters
/// * `B` - BomService implementation
/// * `S` - PropertyStore implementation
/// * `PR` - ProgressReporter implementation
pub struct SyncRepositoriesUseCase<B, S, PR> {
    bom_service: B,
    property_store: S,
    progress_reporter: PR,
    settings: SyncSettings,
}

impl<B, S, PR> SyncRepositoriesUseCase<B, S, PR>
where
    B: BomService,
    S: PropertyStore,
    PR: ProgressReporter,
{
    pub fn new(bom_service: B, property_store: S, progress_reporter: PR, settings: SyncSettings) -> Self {
        Self {
            bom_service,
            property_store,
            progress_reporter,
            settings,
        }
    }

    pub fn property_store(&self) -> &S {
        &self.property_store
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Identification followed by replay, merged per repository
    pub async fn run(&self, targets: &[RepositoryTarget]) -> SyncReport {
        let identified = self.identify(targets).await;
        let updated = self.update(targets).await;

        let repositories = identified
            .repositories
            .into_iter()
            .map(|mut report| {
                if let Some(update) = updated.get(&report.repository) {
                    report.outcomes.extend(update.outcomes.iter().cloned());
                }
                report
            })
            .collect();
        SyncReport { repositories }
    }

    async fn for_each(&self, targets: &[RepositoryTarget], pass: Pass) -> SyncReport {
        self.progress_reporter.start(targets.len());

        let mut indexed: Vec<(usize, RepositoryReport)> = stream::iter(targets.iter().cloned().enumerate())
            .map(|(index, target)| async move {
                let report = match pass {
                    Pass::Identify => self.identify_repository(&target).await,
                    Pass::Update => self.update_repository(&target).await,
                };
                let label = report.last().map_or("SKIPPED", RepositoryOutcome::label);
                self.progress_reporter.advance(&target.key, label);
                (index, report)
            })
            .buffer_unordered(self.settings.max_concurrency.max(1))
            .collect()
            .await;
        indexed.sort_by_key(|(index, _)| *index);

        let report = SyncReport {
            repositories: indexed.into_iter().map(|(_, report)| report).collect(),
        };
        self.progress_reporter.finish(&format!(
            "{} repositor(ies) processed, {} with failures",
            report.repositories.len(),
            report.failure_count()
        ));
        report
    }

    async fn identify_repository(&self, target: &RepositoryTarget) -> RepositoryReport {
        let mut report = RepositoryReport::new(&target.key);

        if !target.package_type.is_supported() {
            tracing::warn!(repository = %target.key, package_type = %target.package_type, "No supported pattern for package type");
            report.push(RepositoryOutcome::Skipped {
                reason: format!("unsupported package type '{}'", target.package_type),
            });
            return report;
        }

        let statuses = InspectionStatusStore::new(
            &self.property_store,
            &self.settings.keys,
            &self.settings.dates,
        );
        let identify = IdentifyArtifactsUseCase::new(&self.bom_service, &self.property_store, &self.settings);
        let populate = PopulateMetadataUseCase::new(&self.bom_service, &self.property_store, &self.settings);

        let status = match statuses.get(&target.root()) {
            Ok(status) => status,
            Err(e) => {
                tracing::error!(repository = %target.key, error = %e, "Failed to read repository status");
                report.push(RepositoryOutcome::Failed { error: e.to_string() });
                return report;
            }
        };

        let result = match status {
            None => match identify.initial_build(target).await {
                Ok(outcome @ RepositoryOutcome::GraphSubmitted { .. }) => {
                    report.push(outcome);
                    populate.populate_repository(target).await
                }
                other => other,
            },
            Some(InspectionStatus::Pending) => populate.populate_repository(target).await,
            Some(InspectionStatus::Success) => match identify.delta_build(target).await {
                Ok((outcome, added)) if !added.is_empty() => {
                    report.push(outcome);
                    match populate.populate_origins(target, &added).await {
                        Ok(outcome) => Ok(outcome),
                        Err(e) => {
                            tracing::warn!(repository = %target.key, error = %e, "Delta population failed");
                            self.mark_stale(target);
                            Ok(RepositoryOutcome::OutOfDate { error: e.to_string() })
                        }
                    }
                }
                Ok((outcome, _)) => Ok(outcome),
                Err(e) => Err(e),
            },
            Some(InspectionStatus::Failure) => {
                tracing::warn!(repository = %target.key, "Repository in FAILURE; clear its inspection status to re-identify");
                Ok(RepositoryOutcome::Skipped {
                    reason: "repository in FAILURE".to_string(),
                })
            }
        };

        match result {
            Ok(outcome) => report.push(outcome),
            Err(e) => {
                tracing::error!(repository = %target.key, error = %e, "Identification failed");
                if let Err(write_error) = statuses.set(&target.root(), InspectionStatus::Failure) {
                    tracing::warn!(repository = %target.key, error = %write_error, "Failed to record FAILURE status");
                }
                report.push(RepositoryOutcome::Failed { error: e.to_string() });
            }
        }
        report
    }

    async fn update_repository(&self, target: &RepositoryTarget) -> RepositoryReport {
        let mut report = RepositoryReport::new(&target.key);
        if !target.package_type.is_supported() {
            report.push(RepositoryOutcome::Skipped {
                reason: format!("unsupported package type '{}'", target.package_type),
            });
            return report;
        }

        let statuses = InspectionStatusStore::new(
            &self.property_store,
            &self.settings.keys,
            &self.settings.dates,
        );
        match statuses.get(&target.root()) {
            Ok(Some(InspectionStatus::Success)) => {
                let update = UpdateMetadataUseCase::new(&self.bom_service, &self.property_store, &self.settings);
                report.push(update.replay(target, Utc::now()).await);
            }
            Ok(status) => {
                let status = status.map_or("never inspected", |s| s.as_str());
                tracing::debug!(repository = %target.key, status, "Replay skipped");
                report.push(RepositoryOutcome::Skipped {
                    reason: format!("repository status is {}", status),
                });
            }
            Err(e) => {
                tracing::error!(repository = %target.key, error = %e, "Failed to read repository status");
                report.push(RepositoryOutcome::OutOfDate { error: e.to_string() });
            }
        }
        report
    }

    fn mark_stale(&self, target: &RepositoryTarget) {
        let statuses = InspectionStatusStore::new(
            &self.property_store,
            &self.settings.keys,
            &self.settings.dates,
        );
        if let Err(e) = statuses.mark_stale(&target.root()) {
            tracing::warn!(repository = %target.key, error = %e, "Failed to record OUT_OF_DATE");
        }
    }
}

#[async_trait]
impl<B, S, PR> RepositorySyncPort for SyncRepositoriesUseCase<B, S, PR>
where
    B: BomService,
    S: PropertyStore,
    PR: ProgressReporter,
{
    async fn identify(&self, targets: &[RepositoryTarget]) -> SyncReport {
        self.for_each(targets, Pass::Identify).await
    }

    async fn update(&self, targets: &[RepositoryTarget]) -> SyncReport {
        self.for_each(targets, Pass::Update).await
    }
}
