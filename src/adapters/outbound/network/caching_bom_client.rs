use crate::inspection::domain::{
    BomComponent, ComponentOrigin, ComponentVersion, DependencyGraph, ExternalId, NotificationBatch,
    PolicyStatus, ProjectVersion,
};
use crate::ports::outbound::{BomService, VulnerabilityEntry};
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;

/// CachingBomService wraps a BomService and memoizes component lookups.
///
/// Component versions and their origins do not change within one invocation,
/// while the same component version is typically reached from several BOM
/// entries and from the replay pass. Vulnerabilities, notifications and policy
/// status are always fetched fresh. Failures are not cached.
pub struct CachingBomService<B: BomService> {
    inner: B,
    component_versions: Arc<DashMap<String, ComponentVersion>>,
    origins: Arc<DashMap<String, Vec<ComponentOrigin>>>,
}

impl<B: BomService> CachingBomService<B> {
    /// Creates a new caching service wrapping the given inner service
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            component_versions: Arc::new(DashMap::new()),
            origins: Arc::new(DashMap::new()),
        }
    }

    /// Returns the number of cached entries (for testing/monitoring)
    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.component_versions.len() + self.origins.len()
    }
}

#[async_trait]
impl<B: BomService> BomService for CachingBomService<B> {
    async fn get_project_version(&self, project_name: &str, version_name: &str) -> Result<Option<ProjectVersion>> {
        self.inner.get_project_version(project_name, version_name).await
    }

    async fn create_project_version_from_graph(&self, graph: &DependencyGraph) -> Result<()> {
        self.inner.create_project_version_from_graph(graph).await
    }

    async fn add_component_to_project_version(
        &self,
        external_id: &ExternalId,
        project_name: &str,
        version_name: &str,
    ) -> Result<()> {
        self.inner
            .add_component_to_project_version(external_id, project_name, version_name)
            .await
    }

    async fn get_project_version_components(&self, project_version: &ProjectVersion) -> Result<Vec<BomComponent>> {
        self.inner.get_project_version_components(project_version).await
    }

    async fn get_component_version(&self, component_version_url: &str) -> Result<ComponentVersion> {
        if let Some(cached) = self.component_versions.get(component_version_url) {
            return Ok(cached.clone());
        }

        let version = self.inner.get_component_version(component_version_url).await?;
        self.component_versions
            .insert(component_version_url.to_string(), version.clone());
        Ok(version)
    }

    async fn get_origins(&self, component_version: &ComponentVersion) -> Result<Vec<ComponentOrigin>> {
        if let Some(cached) = self.origins.get(&component_version.url) {
            return Ok(cached.clone());
        }

        let origins = self.inner.get_origins(component_version).await?;
        self.origins
            .insert(component_version.url.clone(), origins.clone());
        Ok(origins)
    }

    async fn get_vulnerabilities(&self, component_version: &ComponentVersion) -> Result<Vec<VulnerabilityEntry>> {
        self.inner.get_vulnerabilities(component_version).await
    }

    async fn get_notifications(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<NotificationBatch> {
        self.inner.get_notifications(start, end).await
    }

    async fn get_policy_status(&self, project_version: &ProjectVersion) -> Result<PolicyStatus> {
        self.inner.get_policy_status(project_version).await
    }
}
