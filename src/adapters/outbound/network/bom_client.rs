use crate::inspection::domain::{
    BomComponent, ComponentOrigin, ComponentVersion, DependencyGraph, ExternalId, Notification,
    NotificationBatch, NotificationKind, OriginKey, PolicyStatus, ProjectVersion,
};
use crate::ports::outbound::{BomService, VulnerabilityEntry};
use crate::shared::error::SyncError;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Page size used for every list endpoint
const PAGE_SIZE: usize = 100;

/// Media type of the graph upload
const BDIO_CONTENT_TYPE: &str = "application/ld+json";

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(rename = "totalCount", default)]
    total_count: Option<usize>,
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

impl<T> Page<T> {
    /// True when no further page can exist after this one
    ///
    /// A missing `totalCount` proves nothing; only a short page ends the walk.
    fn is_last(&self, fetched: usize) -> bool {
        self.items.len() < PAGE_SIZE || self.total_count.is_some_and(|total| fetched >= total)
    }
}

#[derive(Debug, Deserialize)]
struct Meta {
    href: String,
}

#[derive(Debug, Deserialize)]
struct ProjectItem {
    name: String,
    #[serde(rename = "_meta")]
    meta: Meta,
}

#[derive(Debug, Deserialize)]
struct ProjectVersionItem {
    #[serde(rename = "versionName")]
    version_name: String,
    #[serde(rename = "_meta")]
    meta: Meta,
}

#[derive(Debug, Deserialize)]
struct BomOriginItem {
    #[serde(rename = "externalNamespace", default)]
    external_namespace: String,
    #[serde(rename = "externalId", default)]
    external_id: String,
}

#[derive(Debug, Deserialize)]
struct BomComponentItem {
    #[serde(rename = "componentName")]
    component_name: String,
    #[serde(rename = "componentVersionName", default)]
    component_version_name: String,
    /// Absent for entries matched at component level only
    #[serde(rename = "componentVersion")]
    component_version: Option<String>,
    #[serde(rename = "policyStatus")]
    policy_status: PolicyStatus,
    #[serde(default)]
    origins: Vec<BomOriginItem>,
}

#[derive(Debug, Deserialize)]
struct ComponentVersionItem {
    #[serde(rename = "versionName", default)]
    version_name: String,
}

#[derive(Debug, Deserialize)]
struct OriginItem {
    #[serde(rename = "originName")]
    origin_name: String,
    #[serde(rename = "originId", default)]
    origin_id: String,
}

#[derive(Debug, Deserialize)]
struct VulnerabilityItem {
    #[serde(rename = "vulnerabilityName")]
    name: String,
    #[serde(default)]
    severity: String,
}

#[derive(Debug, Deserialize)]
struct ComponentSearchItem {
    /// Link of the matching component version
    version: String,
}

#[derive(Debug, Deserialize, Default)]
struct NotificationContent {
    #[serde(rename = "projectVersions", default)]
    project_versions: Vec<String>,
    #[serde(rename = "componentVersions", default)]
    component_versions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct NotificationItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,
    #[serde(default)]
    content: NotificationContent,
}

#[derive(Debug, Deserialize)]
struct PolicyStatusItem {
    #[serde(rename = "overallStatus")]
    overall_status: PolicyStatus,
}

impl BomComponentItem {
    fn into_domain(self) -> Option<BomComponent> {
        let url = self.component_version?;
        let origins = self
            .origins
            .into_iter()
            .map(|o| OriginKey::new(&o.external_namespace, &o.external_id))
            .filter(|key| !key.is_blank());

        Some(origins.fold(
            BomComponent::new(
                &self.component_name,
                &self.component_version_name,
                &url,
                self.policy_status,
            ),
            BomComponent::with_origin,
        ))
    }
}

impl From<NotificationItem> for Notification {
    fn from(item: NotificationItem) -> Self {
        Notification {
            kind: NotificationKind::parse(&item.kind),
            created_at: item.created_at,
            project_version_urls: item.content.project_versions,
            component_version_urls: item.content.component_versions,
        }
    }
}

/// BomServiceClient adapter for the BOM service REST API
///
/// This adapter implements the BomService port over async reqwest with
/// bearer-token authentication. Transient failures (transport errors and
/// 5xx responses) are retried with a linear backoff; 4xx responses fail fast.
/// Every failure surfaces as `SyncError::Service`.
pub struct BomServiceClient {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
    max_retries: u32,
}

impl BomServiceClient {
    /// Creates a client for the service at `base_url`
    ///
    /// # Arguments
    /// * `base_url` - Service root, e.g. `https://bom.example.com`
    /// * `api_token` - Bearer token sent with every request, if any
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, api_token: Option<String>, timeout: Duration) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("bom-sync/{}", version);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
            max_retries: 3,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends a request built by `build`, retrying transient failures
    async fn send_with_retry<F>(&self, operation: &str, build: F) -> Result<reqwest::Response>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut last_error = String::new();

        for attempt in 1..=self.max_retries {
            match self.authorized(build()).send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) if response.status().is_client_error() => {
                    return Err(SyncError::service(
                        operation,
                        format!("service returned status code {}", response.status()),
                    )
                    .into());
                }
                Ok(response) => {
                    last_error = format!("service returned status code {}", response.status());
                }
                Err(e) => last_error = e.to_string(),
            }

            if attempt < self.max_retries {
                tracing::debug!(operation, attempt, error = %last_error, "Retrying BOM service call");
                tokio::time::sleep(Duration::from_millis(200 * attempt as u64)).await;
            }
        }

        Err(SyncError::service(operation, last_error).into())
    }

    async fn get_json<T: DeserializeOwned>(&self, operation: &str, url: &str) -> Result<T> {
        let response = self
            .send_with_retry(operation, || self.client.get(url))
            .await?;
        response
            .json::<T>()
            .await
            .map_err(|e| SyncError::service(operation, format!("malformed response: {}", e)).into())
    }

    /// Collects every page of a list endpoint
    async fn get_all<T: DeserializeOwned>(&self, operation: &str, url: &str) -> Result<Vec<T>> {
        let separator = if url.contains('?') { '&' } else { '?' };
        let mut items = Vec::new();
        let mut offset = 0;

        loop {
            let page_url = format!("{}{}offset={}&limit={}", url, separator, offset, PAGE_SIZE);
            let page: Page<T> = self.get_json(operation, &page_url).await?;
            offset += page.items.len();
            let last = page.is_last(offset);
            items.extend(page.items);

            if last {
                return Ok(items);
            }
        }
    }

    /// Looks up the component version matching an external id
    async fn find_component_version(&self, external_id: &ExternalId) -> Result<Option<String>> {
        let query = format!("{}:{}", external_id.forge().name(), external_id.origin_id());
        let url = self.api_url(&format!("components?q={}", urlencoding::encode(&query)));
        let page: Page<ComponentSearchItem> = self.get_json("find_component_version", &url).await?;
        Ok(page.items.into_iter().next().map(|item| item.version))
    }
}

#[async_trait]
impl BomService for BomServiceClient {
    async fn get_project_version(&self, project_name: &str, version_name: &str) -> Result<Option<ProjectVersion>> {
        let query = format!("name:{}", project_name);
        let url = self.api_url(&format!("projects?q={}", urlencoding::encode(&query)));
        let projects: Vec<ProjectItem> = self.get_all("get_project_version", &url).await?;
        let Some(project) = projects.into_iter().find(|p| p.name == project_name) else {
            return Ok(None);
        };

        let query = format!("versionName:{}", version_name);
        let url = format!("{}/versions?q={}", project.meta.href, urlencoding::encode(&query));
        let versions: Vec<ProjectVersionItem> = self.get_all("get_project_version", &url).await?;

        Ok(versions
            .into_iter()
            .find(|v| v.version_name == version_name)
            .map(|v| ProjectVersion::new(project_name, &v.version_name, &v.meta.href)))
    }

    async fn create_project_version_from_graph(&self, graph: &DependencyGraph) -> Result<()> {
        let document = bdio::document(graph);
        let body = serde_json::to_vec(&document)?;
        let url = self.api_url("scan/data/?mode=replace");

        self.send_with_retry("create_project_version_from_graph", || {
            self.client
                .post(&url)
                .header(reqwest::header::CONTENT_TYPE, BDIO_CONTENT_TYPE)
                .body(body.clone())
        })
        .await?;
        Ok(())
    }

    async fn add_component_to_project_version(
        &self,
        external_id: &ExternalId,
        project_name: &str,
        version_name: &str,
    ) -> Result<()> {
        let project_version = self
            .get_project_version(project_name, version_name)
            .await?
            .ok_or_else(|| {
                SyncError::service(
                    "add_component_to_project_version",
                    format!("project version {} {} not found", project_name, version_name),
                )
            })?;
        let component_version = self
            .find_component_version(external_id)
            .await?
            .ok_or_else(|| {
                SyncError::service(
                    "add_component_to_project_version",
                    format!("no component version known for {}", external_id),
                )
            })?;

        let url = format!("{}/components", project_version.url);
        let body = serde_json::json!({ "component": component_version });
        self.send_with_retry("add_component_to_project_version", || {
            self.client.post(&url).json(&body)
        })
        .await?;
        Ok(())
    }

    async fn get_project_version_components(&self, project_version: &ProjectVersion) -> Result<Vec<BomComponent>> {
        let url = format!("{}/components", project_version.url);
        let items: Vec<BomComponentItem> = self.get_all("get_project_version_components", &url).await?;
        Ok(items.into_iter().filter_map(BomComponentItem::into_domain).collect())
    }

    async fn get_component_version(&self, component_version_url: &str) -> Result<ComponentVersion> {
        let item: ComponentVersionItem = self
            .get_json("get_component_version", component_version_url)
            .await?;
        Ok(ComponentVersion::new(component_version_url, &item.version_name))
    }

    async fn get_origins(&self, component_version: &ComponentVersion) -> Result<Vec<ComponentOrigin>> {
        let items: Vec<OriginItem> = self
            .get_all("get_origins", &component_version.origins_url)
            .await?;
        Ok(items
            .into_iter()
            .map(|o| ComponentOrigin::new(&o.origin_name, &o.origin_id))
            .collect())
    }

    async fn get_vulnerabilities(&self, component_version: &ComponentVersion) -> Result<Vec<VulnerabilityEntry>> {
        let items: Vec<VulnerabilityItem> = self
            .get_all("get_vulnerabilities", &component_version.vulnerabilities_url)
            .await?;
        Ok(items
            .into_iter()
            .map(|v| VulnerabilityEntry::new(&v.name, &v.severity))
            .collect())
    }

    async fn get_notifications(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<NotificationBatch> {
        let start = start.to_rfc3339_opts(SecondsFormat::Millis, true);
        let end = end.to_rfc3339_opts(SecondsFormat::Millis, true);
        let url = self.api_url(&format!(
            "notifications?startDate={}&endDate={}",
            urlencoding::encode(&start),
            urlencoding::encode(&end)
        ));
        let items: Vec<NotificationItem> = self.get_all("get_notifications", &url).await?;
        Ok(NotificationBatch::new(items.into_iter().map(Notification::from).collect()))
    }

    async fn get_policy_status(&self, project_version: &ProjectVersion) -> Result<PolicyStatus> {
        let url = format!("{}/policy-status", project_version.url);
        let item: PolicyStatusItem = self.get_json("get_policy_status", &url).await?;
        Ok(item.overall_status)
    }
}

/// BDIO-style JSON-LD rendering of a dependency graph
mod bdio {
    use crate::inspection::domain::{DependencyGraph, ExternalId};
    use serde_json::{json, Value};

    const CONTEXT: &str = "https://blackducksoftware.github.io/bdio#";

    fn node_id(external_id: &ExternalId) -> String {
        let segments: Vec<String> = external_id
            .origin_id()
            .split(external_id.forge().separator())
            .map(|s| urlencoding::encode(s).into_owned())
            .collect();
        format!("http:{}/{}", external_id.forge().name(), segments.join("/"))
    }

    pub fn document(graph: &DependencyGraph) -> Value {
        let project = graph.project();
        let project_id = format!(
            "http:detect/{}/{}",
            urlencoding::encode(&project.name),
            urlencoding::encode(&project.version)
        );

        let relationships: Vec<Value> = graph
            .children()
            .iter()
            .map(|child| json!({ "related": node_id(child), "relationshipType": "DYNAMIC_LINK" }))
            .collect();

        let mut nodes = vec![json!({
            "@id": project_id,
            "@type": "Project",
            "name": project.name,
            "revision": project.version,
            "relationship": relationships,
        })];
        nodes.extend(graph.children().iter().map(|child| {
            json!({
                "@id": node_id(child),
                "@type": "Component",
                "name": child.name(),
                "revision": child.version(),
                "externalIdentifier": {
                    "externalSystemTypeId": child.forge().name(),
                    "externalId": child.origin_id(),
                },
                "relationship": [],
            })
        }));

        json!({
            "@context": CONTEXT,
            "@id": format!("urn:uuid:{}", uuid::Uuid::new_v4()),
            "@type": "BillOfMaterials",
            "specVersion": "1.1.0",
            "name": format!("{}/{} graph", project.name, project.version),
            "@graph": nodes,
        })
    }
}
