use crate::application::dto::{RepositoryOutcome, RepositoryTarget, SyncSettings};
use crate::application::services::{InspectionStatusStore, ProjectNaming};
use crate::application::use_cases::PopulateMetadataUseCase;
use crate::inspection::domain::InspectionStatus;
use crate::ports::outbound::{BomService, PropertyStore};
use crate::shared::error::SyncError;
use crate::shared::Result;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// A replay window that completed without any failure
struct ReplayedWindow {
    notifications: usize,
    checkpoint: DateTime<Utc>,
}

/// UpdateMetadataUseCase - Replays BOM change notifications onto a SUCCESS repository
///
/// The window is `[checkpoint, now]`, where the checkpoint is the last update
/// stamp or, before the first replay, the last inspection stamp. The
/// checkpoint only moves after a complete pass and never moves backwards;
/// on any failure the next pass reuses the same window.
///
/// # Type Parameters
/// * `B` - BomService implementation
/// * `S` - PropertyStore implementation
pub struct UpdateMetadataUseCase<'a, B, S> {
    bom: &'a B,
    store: &'a S,
    settings: &'a SyncSettings,
}

impl<'a, B, S> UpdateMetadataUseCase<'a, B, S>
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

    /// Runs one replay pass ending at `now`
    ///
    /// Never fails: every error is recorded on the repository as OUT_OF_DATE
    /// (or FAILURE once the failure ceiling is reached) and reported.
    pub async fn replay(&self, target: &RepositoryTarget, now: DateTime<Utc>) -> RepositoryOutcome {
        let statuses = self.statuses();
        let root = target.root();

        let result = match self.replay_window(target, now).await {
            Ok(window) => statuses
                .mark_up_to_date(&root, window.checkpoint)
                .map(|_| window),
            Err(e) => Err(e),
        };

        match result {
            Ok(window) => {
                tracing::info!(
                    repository = %target.key,
                    notifications = window.notifications,
                    checkpoint = %window.checkpoint,
                    "Repository up to date"
                );
                RepositoryOutcome::Updated {
                    notifications: window.notifications,
                    checkpoint: window.checkpoint,
                }
            }
            Err(e) => self.record_failure(target, e),
        }
    }

    async fn replay_window(&self, target: &RepositoryTarget, now: DateTime<Utc>) -> Result<ReplayedWindow> {
        let statuses = self.statuses();
        let root = target.root();

        let date_to_check = match statuses.last_update(&root)? {
            Some(checkpoint) => checkpoint,
            None => statuses
                .last_inspection(&root)?
                .ok_or_else(|| SyncError::Configuration {
                    repository: target.key.clone(),
                    details: "neither a last update nor a last inspection timestamp is recorded".to_string(),
                })?,
        };

        let naming = ProjectNaming::resolve(self.store, &root, self.settings)?;
        let project_version = self
            .bom
            .get_project_version(&naming.project_name, &naming.version_name)
            .await?
            .ok_or_else(|| SyncError::Configuration {
                repository: target.key.clone(),
                details: format!(
                    "project version {} {} no longer exists",
                    naming.project_name, naming.version_name
                ),
            })?;

        tracing::debug!(repository = %target.key, from = %date_to_check, to = %now, "Querying notifications");
        let batch = self.bom.get_notifications(date_to_check, now).await?;

        let relevant: Vec<_> = batch
            .notifications
            .iter()
            .filter(|n| n.is_relevant_to(&project_version.url))
            .collect();
        let affected: BTreeSet<String> = relevant
            .iter()
            .flat_map(|n| n.component_version_urls.iter())
            .map(|url| url.trim_end_matches('/').to_string())
            .collect();

        if !affected.is_empty() {
            let populate = PopulateMetadataUseCase::new(self.bom, self.store, self.settings);
            let (aggregation, applied) = populate
                .refresh(&target.key, &project_version, |c| {
                    affected.contains(c.component_version_url.trim_end_matches('/'))
                })
                .await?;
            if aggregation.incomplete || applied.failures > 0 {
                return Err(SyncError::service(
                    "replay",
                    format!(
                        "incomplete pass ({} write failure(s)); window kept for the next trigger",
                        applied.failures
                    ),
                )
                .into());
            }
            populate.write_overall_policy(target, &project_version).await;
        }

        let checkpoint = batch
            .latest_created_at
            .map_or(date_to_check, |latest| latest.max(date_to_check));

        Ok(ReplayedWindow {
            notifications: relevant.len(),
            checkpoint,
        })
    }

    fn record_failure(&self, target: &RepositoryTarget, error: anyhow::Error) -> RepositoryOutcome {
        let statuses = self.statuses();
        let root = target.root();

        if SyncError::is_configuration_error(&error) {
            tracing::error!(repository = %target.key, error = %error, "Replay impossible, repository needs re-identification");
        } else {
            tracing::warn!(repository = %target.key, error = %error, "Replay failed, checkpoint kept");
        }

        let failures = match statuses.mark_out_of_date(&root) {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!(repository = %target.key, error = %e, "Failed to record OUT_OF_DATE");
                return RepositoryOutcome::OutOfDate {
                    error: error.to_string(),
                };
            }
        };

        match self.settings.update_failure_ceiling {
            Some(ceiling) if failures >= ceiling => {
                tracing::error!(
                    repository = %target.key,
                    failures,
                    ceiling,
                    "Replay failure ceiling reached, moving repository to FAILURE"
                );
                if let Err(e) = statuses.set(&root, InspectionStatus::Failure) {
                    tracing::warn!(repository = %target.key, error = %e, "Failed to record FAILURE status");
                }
                RepositoryOutcome::Failed {
                    error: format!("{} ({} consecutive failed replays)", error, failures),
                }
            }
            _ => RepositoryOutcome::OutOfDate {
                error: error.to_string(),
            },
        }
    }
}
