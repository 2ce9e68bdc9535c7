use chrono::{DateTime, Utc};

/// Kinds of BOM change notifications that affect artifact metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Vulnerability,
    PolicyViolation,
    PolicyViolationCleared,
    PolicyOverride,
    Other,
}

impl NotificationKind {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "VULNERABILITY" => NotificationKind::Vulnerability,
            "RULE_VIOLATION" | "POLICY_VIOLATION" => NotificationKind::PolicyViolation,
            "RULE_VIOLATION_CLEARED" | "POLICY_VIOLATION_CLEARED" => {
                NotificationKind::PolicyViolationCleared
            }
            "POLICY_OVERRIDE" => NotificationKind::PolicyOverride,
            _ => NotificationKind::Other,
        }
    }

    pub fn affects_metadata(&self) -> bool {
        !matches!(self, NotificationKind::Other)
    }
}

/// A single change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
    /// Links of the project versions the change applies to
    pub project_version_urls: Vec<String>,
    /// Links of the component versions the change applies to
    pub component_version_urls: Vec<String>,
}

impl Notification {
    /// True when the notification changes metadata of the given project version
    pub fn is_relevant_to(&self, project_version_url: &str) -> bool {
        self.kind.affects_metadata()
            && self
                .project_version_urls
                .iter()
                .any(|url| url.trim_end_matches('/') == project_version_url.trim_end_matches('/'))
    }
}

/// Result of one notification window query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationBatch {
    pub notifications: Vec<Notification>,
    /// Latest creation time the service reported for the window, if any
    pub latest_created_at: Option<DateTime<Utc>>,
}

impl NotificationBatch {
    pub fn new(notifications: Vec<Notification>) -> Self {
        let latest_created_at = notifications.iter().map(|n| n.created_at).max();
        Self {
            notifications,
            latest_created_at,
        }
    }
}
