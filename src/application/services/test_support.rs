use crate::inspection::domain::{
    BomComponent, ComponentOrigin, ComponentVersion, DependencyGraph, ExternalId, NotificationBatch,
    PolicyStatus, ProjectVersion,
};
use crate::ports::outbound::{BomService, VulnerabilityEntry};
use crate::shared::error::SyncError;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// Component-level BOM stub for unit tests of the application services
#[derive(Default)]
pub struct StubBomService {
    origins: HashMap<String, Vec<ComponentOrigin>>,
    vulnerabilities: HashMap<String, Vec<VulnerabilityEntry>>,
    failing_origins: HashSet<String>,
    failing_vulnerabilities: HashSet<String>,
}

impl StubBomService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_component(mut self, url: &str, origins: Vec<ComponentOrigin>) -> Self {
        self.origins.insert(url.to_string(), origins);
        self
    }

    pub fn with_vulnerabilities(mut self, url: &str, severities: &[&str]) -> Self {
        let entries = severities
            .iter()
            .enumerate()
            .map(|(i, severity)| VulnerabilityEntry::new(&format!("CVE-2024-{:04}", i), severity))
            .collect();
        self.vulnerabilities.insert(url.to_string(), entries);
        self
    }

    pub fn failing_origins(mut self, url: &str) -> Self {
        self.failing_origins.insert(url.to_string());
        self
    }

    pub fn failing_vulnerabilities(mut self, url: &str) -> Self {
        self.failing_vulnerabilities.insert(url.to_string());
        self
    }
}

fn not_stubbed<T>(operation: &str) -> Result<T> {
    Err(SyncError::service(operation, "not stubbed").into())
}

#[async_trait]
impl BomService for StubBomService {
    async fn get_project_version(&self, _: &str, _: &str) -> Result<Option<ProjectVersion>> {
        not_stubbed("get_project_version")
    }

    async fn create_project_version_from_graph(&self, _: &DependencyGraph) -> Result<()> {
        not_stubbed("create_project_version_from_graph")
    }

    async fn add_component_to_project_version(&self, _: &ExternalId, _: &str, _: &str) -> Result<()> {
        not_stubbed("add_component_to_project_version")
    }

    async fn get_project_version_components(&self, _: &ProjectVersion) -> Result<Vec<BomComponent>> {
        not_stubbed("get_project_version_components")
    }

    async fn get_component_version(&self, url: &str) -> Result<ComponentVersion> {
        if self.origins.contains_key(url) {
            Ok(ComponentVersion::new(url, "1.0.0"))
        } else {
            Err(SyncError::service("get_component_version", format!("404 for {}", url)).into())
        }
    }

    async fn get_origins(&self, version: &ComponentVersion) -> Result<Vec<ComponentOrigin>> {
        if self.failing_origins.contains(&version.url) {
            return Err(SyncError::service("get_origins", "503 Service Unavailable").into());
        }
        Ok(self.origins.get(&version.url).cloned().unwrap_or_default())
    }

    async fn get_vulnerabilities(&self, version: &ComponentVersion) -> Result<Vec<VulnerabilityEntry>> {
        if self.failing_vulnerabilities.contains(&version.url) {
            return Err(SyncError::service("get_vulnerabilities", "503 Service Unavailable").into());
        }
        Ok(self.vulnerabilities.get(&version.url).cloned().unwrap_or_default())
    }

    async fn get_notifications(&self, _: DateTime<Utc>, _: DateTime<Utc>) -> Result<NotificationBatch> {
        not_stubbed("get_notifications")
    }

    async fn get_policy_status(&self, _: &ProjectVersion) -> Result<PolicyStatus> {
        not_stubbed("get_policy_status")
    }
}
