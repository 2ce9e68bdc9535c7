/// Default namespace for every property written by the engine
pub const DEFAULT_PROPERTY_PREFIX: &str = "blackduck";

/// The single property vocabulary shared by every reader and writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyKeys {
    prefix: String,
}

impl PropertyKeys {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.trim_end_matches('.').to_string(),
        }
    }

    fn key(&self, name: &str) -> String {
        format!("{}.{}", self.prefix, name)
    }

    pub fn origin_id(&self) -> String {
        self.key("originId")
    }

    pub fn forge(&self) -> String {
        self.key("forge")
    }

    pub fn inspection_status(&self) -> String {
        self.key("inspectionStatus")
    }

    pub fn last_inspection(&self) -> String {
        self.key("lastInspection")
    }

    pub fn last_update(&self) -> String {
        self.key("lastUpdate")
    }

    pub fn update_status(&self) -> String {
        self.key("updateStatus")
    }

    pub fn update_failure_count(&self) -> String {
        self.key("updateFailureCount")
    }

    pub fn high_vulnerabilities(&self) -> String {
        self.key("highVulnerabilities")
    }

    pub fn medium_vulnerabilities(&self) -> String {
        self.key("mediumVulnerabilities")
    }

    pub fn low_vulnerabilities(&self) -> String {
        self.key("lowVulnerabilities")
    }

    pub fn policy_status(&self) -> String {
        self.key("policyStatus")
    }

    pub fn component_version_url(&self) -> String {
        self.key("componentVersionUrl")
    }

    pub fn project_name(&self) -> String {
        self.key("projectName")
    }

    pub fn project_version_name(&self) -> String {
        self.key("projectVersionName")
    }

    pub fn overall_policy_status(&self) -> String {
        self.key("overallPolicyStatus")
    }
}

impl Default for PropertyKeys {
    fn default() -> Self {
        Self::new(DEFAULT_PROPERTY_PREFIX)
    }
}
