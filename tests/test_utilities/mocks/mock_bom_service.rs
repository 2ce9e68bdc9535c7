use async_trait::async_trait;
use bom_artifact_sync::inspection::domain::{
    BomComponent, ComponentOrigin, ComponentVersion, DependencyGraph, ExternalId, Notification,
    NotificationBatch, OriginKey, PolicyStatus, ProjectVersion,
};
use bom_artifact_sync::ports::outbound::{BomService, VulnerabilityEntry};
use bom_artifact_sync::shared::error::SyncError;
use bom_artifact_sync::shared::Result;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

pub const BOM_URL: &str = "https://bom.test/api";

/// A component version known to the mock service
#[derive(Debug, Clone)]
struct CatalogEntry {
    component_name: String,
    version_name: String,
    component_version_url: String,
    policy_status: PolicyStatus,
    origins: Vec<ComponentOrigin>,
}

impl CatalogEntry {
    fn bom_entry(&self) -> BomComponent {
        self.origins.iter().fold(
            BomComponent::new(
                &self.component_name,
                &self.version_name,
                &self.component_version_url,
                self.policy_status,
            ),
            |entry, origin| entry.with_origin(origin.key()),
        )
    }
}

#[derive(Default)]
struct State {
    catalog: HashMap<OriginKey, CatalogEntry>,
    vulnerabilities: HashMap<String, Vec<VulnerabilityEntry>>,
    project_versions: BTreeMap<(String, String), ProjectVersion>,
    boms: HashMap<String, Vec<BomComponent>>,
    notifications: Vec<Notification>,
    overall_policy: Option<PolicyStatus>,

    graphs: Vec<DependencyGraph>,
    added: Vec<ExternalId>,
    notification_windows: Vec<(DateTime<Utc>, DateTime<Utc>)>,

    hide_project_versions: bool,
    reject_graphs: bool,
    fail_notifications: bool,
    fail_listing: bool,
    failing_adds: HashSet<String>,
    failing_component_versions: HashSet<String>,
}

/// Mock BomService for testing
///
/// Clones share state, so a test keeps a handle after moving one clone into
/// the use case. Graph submissions create project versions whose BOM lists
/// every catalogued component of the graph.
#[derive(Clone, Default)]
pub struct MockBomService {
    state: Arc<Mutex<State>>,
}

impl MockBomService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a component version declaring the given `(forge, originId)` origins
    pub fn with_component(self, component_version_url: &str, policy_status: PolicyStatus, origins: &[(&str, &str)]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let origins: Vec<ComponentOrigin> = origins
                .iter()
                .map(|(forge, id)| ComponentOrigin::new(forge, id))
                .collect();
            let (name, version) = origins
                .first()
                .and_then(|o| o.origin_id.rsplit_once(['/', ':', '=']))
                .map(|(name, version)| (name.to_string(), version.to_string()))
                .unwrap_or_default();
            let entry = CatalogEntry {
                component_name: name,
                version_name: version,
                component_version_url: component_version_url.to_string(),
                policy_status,
                origins: origins.clone(),
            };
            for origin in &origins {
                state.catalog.insert(origin.key(), entry.clone());
            }
        }
        self
    }

    pub fn with_vulnerabilities(self, component_version_url: &str, severities: &[&str]) -> Self {
        self.set_vulnerabilities(component_version_url, severities);
        self
    }

    /// Replaces the current vulnerability list of a component version
    pub fn set_vulnerabilities(&self, component_version_url: &str, severities: &[&str]) {
        let entries = severities
            .iter()
            .enumerate()
            .map(|(i, severity)| VulnerabilityEntry::new(&format!("CVE-2024-{:04}", i), severity))
            .collect();
        self.state
            .lock()
            .unwrap()
            .vulnerabilities
            .insert(component_version_url.to_string(), entries);
    }

    pub fn push_notification(&self, notification: Notification) {
        self.state.lock().unwrap().notifications.push(notification);
    }

    pub fn set_overall_policy(&self, status: PolicyStatus) {
        self.state.lock().unwrap().overall_policy = Some(status);
    }

    pub fn hide_project_versions(&self, hide: bool) {
        self.state.lock().unwrap().hide_project_versions = hide;
    }

    pub fn reject_graphs(&self, reject: bool) {
        self.state.lock().unwrap().reject_graphs = reject;
    }

    pub fn fail_notifications(&self, fail: bool) {
        self.state.lock().unwrap().fail_notifications = fail;
    }

    pub fn fail_listing(&self, fail: bool) {
        self.state.lock().unwrap().fail_listing = fail;
    }

    pub fn fail_add(&self, origin_id: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_adds
            .insert(origin_id.to_string());
    }

    pub fn fail_component_version(&self, component_version_url: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_component_versions
            .insert(component_version_url.to_string());
    }

    pub fn graphs(&self) -> Vec<DependencyGraph> {
        self.state.lock().unwrap().graphs.clone()
    }

    pub fn added_components(&self) -> Vec<ExternalId> {
        self.state.lock().unwrap().added.clone()
    }

    pub fn notification_windows(&self) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
        self.state.lock().unwrap().notification_windows.clone()
    }

    pub fn project_version_url(project_name: &str, version_name: &str) -> String {
        format!("{}/projects/{}/versions/{}", BOM_URL, project_name, version_name)
    }
}

fn service_error<T>(operation: &str, details: &str) -> Result<T> {
    Err(SyncError::service(operation, details).into())
}

#[async_trait]
impl BomService for MockBomService {
    async fn get_project_version(&self, project_name: &str, version_name: &str) -> Result<Option<ProjectVersion>> {
        let state = self.state.lock().unwrap();
        if state.hide_project_versions {
            return Ok(None);
        }
        Ok(state
            .project_versions
            .get(&(project_name.to_string(), version_name.to_string()))
            .cloned())
    }

    async fn create_project_version_from_graph(&self, graph: &DependencyGraph) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.graphs.push(graph.clone());
        if state.reject_graphs {
            return service_error("create_project_version_from_graph", "graph rejected");
        }

        let project = graph.project();
        let url = Self::project_version_url(&project.name, &project.version);
        let mut entries: Vec<BomComponent> = Vec::new();
        for id in graph.children() {
            if let Some(entry) = state.catalog.get(&id.origin_key()) {
                if !entries
                    .iter()
                    .any(|c| c.component_version_url == entry.component_version_url)
                {
                    entries.push(entry.bom_entry());
                }
            }
        }
        state.boms.insert(url.clone(), entries);
        state.project_versions.insert(
            (project.name.clone(), project.version.clone()),
            ProjectVersion::new(&project.name, &project.version, &url),
        );
        Ok(())
    }

    async fn add_component_to_project_version(
        &self,
        external_id: &ExternalId,
        project_name: &str,
        version_name: &str,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.failing_adds.contains(&external_id.origin_id()) {
            return service_error("add_component", "component rejected");
        }
        let Some(project_version) = state
            .project_versions
            .get(&(project_name.to_string(), version_name.to_string()))
            .cloned()
        else {
            return service_error("add_component", "project version not found");
        };

        state.added.push(external_id.clone());
        if let Some(entry) = state.catalog.get(&external_id.origin_key()).cloned() {
            let bom = state.boms.entry(project_version.url).or_default();
            if !bom
                .iter()
                .any(|c| c.component_version_url == entry.component_version_url)
            {
                bom.push(entry.bom_entry());
            }
        }
        Ok(())
    }

    async fn get_project_version_components(&self, project_version: &ProjectVersion) -> Result<Vec<BomComponent>> {
        let state = self.state.lock().unwrap();
        if state.fail_listing {
            return service_error("get_project_version_components", "503 Service Unavailable");
        }
        Ok(state.boms.get(&project_version.url).cloned().unwrap_or_default())
    }

    async fn get_component_version(&self, component_version_url: &str) -> Result<ComponentVersion> {
        let state = self.state.lock().unwrap();
        if state.failing_component_versions.contains(component_version_url) {
            return service_error("get_component_version", "timeout");
        }
        state
            .catalog
            .values()
            .find(|entry| entry.component_version_url == component_version_url)
            .map(|entry| ComponentVersion::new(&entry.component_version_url, &entry.version_name))
            .map_or_else(|| service_error("get_component_version", "404 Not Found"), Ok)
    }

    async fn get_origins(&self, component_version: &ComponentVersion) -> Result<Vec<ComponentOrigin>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .catalog
            .values()
            .find(|entry| entry.component_version_url == component_version.url)
            .map(|entry| entry.origins.clone())
            .unwrap_or_default())
    }

    async fn get_vulnerabilities(&self, component_version: &ComponentVersion) -> Result<Vec<VulnerabilityEntry>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .vulnerabilities
            .get(&component_version.url)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_notifications(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<NotificationBatch> {
        let mut state = self.state.lock().unwrap();
        state.notification_windows.push((start, end));
        if state.fail_notifications {
            return service_error("get_notifications", "503 Service Unavailable");
        }
        let notifications = state
            .notifications
            .iter()
            .filter(|n| n.created_at >= start && n.created_at <= end)
            .cloned()
            .collect();
        Ok(NotificationBatch::new(notifications))
    }

    async fn get_policy_status(&self, _project_version: &ProjectVersion) -> Result<PolicyStatus> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .overall_policy
            .unwrap_or(PolicyStatus::NotInViolation))
    }
}
