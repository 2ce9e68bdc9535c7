use crate::application::dto::{RepositoryTarget, SyncReport};
use async_trait::async_trait;

/// RepositorySyncPort - Inbound port for the synchronization passes
///
/// This port defines the interface that external adapters (CLI, scheduler
/// hooks) use to trigger one single-shot pass over a set of repositories.
/// Failures are reported per repository in the returned report; a pass never
/// fails as a whole because of one repository.
#[async_trait]
pub trait RepositorySyncPort {
    /// Identifies artifacts and populates metadata
    ///
    /// Per repository: initial graph build when never inspected, metadata
    /// population when PENDING, delta build when SUCCESS.
    async fn identify(&self, targets: &[RepositoryTarget]) -> SyncReport;

    /// Replays BOM change notifications onto SUCCESS repositories
    async fn update(&self, targets: &[RepositoryTarget]) -> SyncReport;
}
