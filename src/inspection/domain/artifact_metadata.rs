use super::external_id::OriginKey;
use super::property_keys::PropertyKeys;
use serde::Deserialize;
use std::fmt;

/// Policy evaluation result reported by the BOM service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyStatus {
    InViolation,
    NotInViolation,
    InViolationOverridden,
    #[serde(other)]
    Unknown,
}

impl PolicyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyStatus::InViolation => "IN_VIOLATION",
            PolicyStatus::NotInViolation => "NOT_IN_VIOLATION",
            PolicyStatus::InViolationOverridden => "IN_VIOLATION_OVERRIDDEN",
            PolicyStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three severities that are counted onto artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VulnerabilitySeverity {
    High,
    Medium,
    Low,
}

impl VulnerabilitySeverity {
    /// Parses a severity string. Values outside HIGH/MEDIUM/LOW are not counted.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "HIGH" => Some(VulnerabilitySeverity::High),
            "MEDIUM" => Some(VulnerabilitySeverity::Medium),
            "LOW" => Some(VulnerabilitySeverity::Low),
            _ => None,
        }
    }
}

/// Vulnerability counts per severity for one component version
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl SeverityCounts {
    /// Counts one pass over a vulnerability severity list
    pub fn tally<'a, I>(severities: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = SeverityCounts::default();
        for severity in severities {
            match VulnerabilitySeverity::parse(severity) {
                Some(VulnerabilitySeverity::High) => counts.high += 1,
                Some(VulnerabilitySeverity::Medium) => counts.medium += 1,
                Some(VulnerabilitySeverity::Low) => counts.low += 1,
                None => {}
            }
        }
        counts
    }

    pub fn total(&self) -> u32 {
        self.high + self.medium + self.low
    }
}

/// Metadata written onto every artifact path sharing an origin key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactMetaData {
    origin_key: OriginKey,
    counts: SeverityCounts,
    policy_status: PolicyStatus,
    component_version_link: String,
}

impl ArtifactMetaData {
    /// Seeds a record from a BOM entry; counts start at zero
    pub fn new(origin_key: OriginKey, policy_status: PolicyStatus, component_version_link: &str) -> Self {
        Self {
            origin_key,
            counts: SeverityCounts::default(),
            policy_status,
            component_version_link: component_version_link.to_string(),
        }
    }

    pub fn origin_key(&self) -> &OriginKey {
        &self.origin_key
    }

    pub fn counts(&self) -> SeverityCounts {
        self.counts
    }

    pub fn policy_status(&self) -> PolicyStatus {
        self.policy_status
    }

    pub fn component_version_link(&self) -> &str {
        &self.component_version_link
    }

    /// Replaces the counts wholesale; counts never accumulate across passes
    pub fn set_counts(&mut self, counts: SeverityCounts) {
        self.counts = counts;
    }

    /// The five metadata properties, in write order
    pub fn to_properties(&self, keys: &PropertyKeys) -> Vec<(String, String)> {
        vec![
            (keys.high_vulnerabilities(), self.counts.high.to_string()),
            (keys.medium_vulnerabilities(), self.counts.medium.to_string()),
            (keys.low_vulnerabilities(), self.counts.low.to_string()),
            (keys.policy_status(), self.policy_status.to_string()),
            (keys.component_version_url(), self.component_version_link.clone()),
        ]
    }
}
