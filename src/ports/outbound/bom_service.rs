use crate::inspection::domain::{
    BomComponent, ComponentOrigin, ComponentVersion, DependencyGraph, ExternalId, NotificationBatch,
    PolicyStatus, ProjectVersion,
};
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A vulnerability listed against a component version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VulnerabilityEntry {
    pub id: String,
    /// Raw severity as reported by the service (e.g. "HIGH")
    pub severity: String,
}

impl VulnerabilityEntry {
    pub fn new(id: &str, severity: &str) -> Self {
        Self {
            id: id.to_string(),
            severity: severity.to_string(),
        }
    }
}

/// BomService port for the external Bill-of-Materials service
///
/// Every method is a network call bounded by the adapter's own timeout. Failures
/// surface as `SyncError::Service` so callers can isolate them per component
/// or per repository.
///
/// # Async Support
/// All methods are async so components can be resolved concurrently.
/// Implementations must be `Send + Sync`.
#[async_trait]
pub trait BomService: Send + Sync {
    /// Looks up a project version by project and version name
    async fn get_project_version(&self, project_name: &str, version_name: &str) -> Result<Option<ProjectVersion>>;

    /// Submits a whole dependency graph, creating or replacing the project version
    async fn create_project_version_from_graph(&self, graph: &DependencyGraph) -> Result<()>;

    /// Adds a single component to an existing project version
    async fn add_component_to_project_version(
        &self,
        external_id: &ExternalId,
        project_name: &str,
        version_name: &str,
    ) -> Result<()>;

    /// Lists the BOM entries of a project version
    async fn get_project_version_components(&self, project_version: &ProjectVersion) -> Result<Vec<BomComponent>>;

    /// Fetches the component version a BOM entry references
    async fn get_component_version(&self, component_version_url: &str) -> Result<ComponentVersion>;

    /// Fetches the declared origins of a component version
    async fn get_origins(&self, component_version: &ComponentVersion) -> Result<Vec<ComponentOrigin>>;

    /// Lists the current vulnerabilities of a component version
    async fn get_vulnerabilities(&self, component_version: &ComponentVersion) -> Result<Vec<VulnerabilityEntry>>;

    /// Retrieves every change notification created within `[start, end]`
    async fn get_notifications(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<NotificationBatch>;

    /// Fetches the overall policy status of a project version
    async fn get_policy_status(&self, project_version: &ProjectVersion) -> Result<PolicyStatus>;
}
