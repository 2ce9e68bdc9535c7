use crate::application::services::DateCodec;
use crate::inspection::domain::{InspectionStatus, PropertyKeys, RepoPath, UpdateStatus};
use crate::inspection::policies::TransitionPolicy;
use crate::ports::outbound::PropertyStore;
use crate::shared::error::SyncError;
use crate::shared::Result;
use chrono::{DateTime, Utc};

/// InspectionStatusStore - Status state machine on top of the property store
///
/// Works the same way for artifact paths and for repository roots. Every status
/// write carries the `lastInspection` stamp in the same property unit.
pub struct InspectionStatusStore<'a, S> {
    store: &'a S,
    keys: &'a PropertyKeys,
    dates: &'a DateCodec,
}

impl<'a, S: PropertyStore> InspectionStatusStore<'a, S> {
    pub fn new(store: &'a S, keys: &'a PropertyKeys, dates: &'a DateCodec) -> Self {
        Self { store, keys, dates }
    }

    /// Reads the status of a path; unknown stored values read as absent
    pub fn get(&self, path: &RepoPath) -> Result<Option<InspectionStatus>> {
        let raw = self.store.get_property(path, &self.keys.inspection_status())?;
        Ok(raw.and_then(|value| {
            let status = InspectionStatus::parse(&value);
            if status.is_none() {
                tracing::debug!(path = %path, value = %value, "Unrecognized inspection status, treating as absent");
            }
            status
        }))
    }

    /// Moves a path to `status`, stamping `lastInspection` in the same write
    ///
    /// # Errors
    /// Returns `SyncError::IllegalTransition` when the move is not allowed, and
    /// propagates store failures
    pub fn set(&self, path: &RepoPath, status: InspectionStatus) -> Result<()> {
        self.set_with(path, status, Vec::new())
    }

    /// Same as [`set`](Self::set), writing `extra` properties in the same unit
    pub fn set_with(
        &self,
        path: &RepoPath,
        status: InspectionStatus,
        mut extra: Vec<(String, String)>,
    ) -> Result<()> {
        let current = self.get(path)?;
        if !TransitionPolicy::is_allowed(current, status) {
            return Err(SyncError::IllegalTransition {
                path: path.to_string(),
                from: current.map_or("ABSENT", |s| s.as_str()).to_string(),
                to: status.as_str().to_string(),
            }
            .into());
        }

        extra.push((self.keys.inspection_status(), status.as_str().to_string()));
        extra.push((self.keys.last_inspection(), self.dates.format(Utc::now())));
        self.store.set_properties(path, &extra)?;

        tracing::debug!(path = %path, status = %status, "Inspection status written");
        Ok(())
    }

    pub fn last_inspection(&self, path: &RepoPath) -> Result<Option<DateTime<Utc>>> {
        self.date_property(path, &self.keys.last_inspection())
    }

    /// The replay checkpoint of a repository root
    pub fn last_update(&self, path: &RepoPath) -> Result<Option<DateTime<Utc>>> {
        self.date_property(path, &self.keys.last_update())
    }

    pub fn update_status(&self, path: &RepoPath) -> Result<Option<UpdateStatus>> {
        let raw = self.store.get_property(path, &self.keys.update_status())?;
        Ok(raw.as_deref().and_then(UpdateStatus::parse))
    }

    pub fn update_failure_count(&self, path: &RepoPath) -> Result<u32> {
        let raw = self.store.get_property(path, &self.keys.update_failure_count())?;
        Ok(raw.and_then(|v| v.trim().parse().ok()).unwrap_or(0))
    }

    /// Persists a new checkpoint together with `UP_TO_DATE` and clears the failure count
    pub fn mark_up_to_date(&self, root: &RepoPath, checkpoint: DateTime<Utc>) -> Result<()> {
        self.store.set_properties(
            root,
            &[
                (self.keys.last_update(), self.dates.format(checkpoint)),
                (
                    self.keys.update_status(),
                    UpdateStatus::UpToDate.as_str().to_string(),
                ),
            ],
        )?;
        self.store
            .delete_property(root, &self.keys.update_failure_count())
    }

    /// Marks `OUT_OF_DATE` without touching the checkpoint
    ///
    /// # Returns
    /// The number of consecutive failed replays including this one
    pub fn mark_out_of_date(&self, root: &RepoPath) -> Result<u32> {
        let failures = self.update_failure_count(root)?.saturating_add(1);
        self.store.set_properties(
            root,
            &[
                (
                    self.keys.update_status(),
                    UpdateStatus::OutOfDate.as_str().to_string(),
                ),
                (self.keys.update_failure_count(), failures.to_string()),
            ],
        )?;
        Ok(failures)
    }

    /// Marks `OUT_OF_DATE` without counting a failed replay
    pub fn mark_stale(&self, root: &RepoPath) -> Result<()> {
        self.store.set_property(
            root,
            &self.keys.update_status(),
            UpdateStatus::OutOfDate.as_str(),
        )
    }

    /// Artifact paths of a repository currently in `status`
    pub fn paths_with_status(&self, repo_key: &str, status: InspectionStatus) -> Result<Vec<RepoPath>> {
        self.store.find_paths(
            repo_key,
            &[(self.keys.inspection_status(), status.as_str().to_string())],
        )
    }

    fn date_property(&self, path: &RepoPath, key: &str) -> Result<Option<DateTime<Utc>>> {
        let Some(raw) = self.store.get_property(path, key)? else {
            return Ok(None);
        };
        let parsed = self.dates.parse(&raw);
        if parsed.is_none() {
            tracing::warn!(
                path = %path,
                property = key,
                value = %raw,
                pattern = self.dates.pattern(),
                "Stored date does not match the configured pattern, treating as absent"
            );
        }
        Ok(parsed)
    }
}
