use chrono::{DateTime, Utc};
use std::fmt;

/// What happened to one repository during a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryOutcome {
    /// Initial graph accepted; repository moved to PENDING
    GraphSubmitted { components: usize, skipped: usize },
    /// Delta build against an existing project version
    ComponentsAdded { added: usize, failed: usize },
    /// Metadata population completed; repository moved to SUCCESS
    Populated { origins: usize, paths_written: usize },
    /// Notification replay completed; checkpoint persisted
    Updated {
        notifications: usize,
        checkpoint: DateTime<Utc>,
    },
    /// Nothing to do for this repository in this pass
    Skipped { reason: String },
    /// Replay failed; repository marked OUT_OF_DATE with its checkpoint untouched
    OutOfDate { error: String },
    /// Repository moved to (or stayed in) FAILURE
    Failed { error: String },
}

impl RepositoryOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            RepositoryOutcome::OutOfDate { .. } | RepositoryOutcome::Failed { .. }
        )
    }

    /// Short label used in progress output
    pub fn label(&self) -> &'static str {
        match self {
            RepositoryOutcome::GraphSubmitted { .. } => "GRAPH_SUBMITTED",
            RepositoryOutcome::ComponentsAdded { .. } => "COMPONENTS_ADDED",
            RepositoryOutcome::Populated { .. } => "POPULATED",
            RepositoryOutcome::Updated { .. } => "UP_TO_DATE",
            RepositoryOutcome::Skipped { .. } => "SKIPPED",
            RepositoryOutcome::OutOfDate { .. } => "OUT_OF_DATE",
            RepositoryOutcome::Failed { .. } => "FAILURE",
        }
    }
}

impl fmt::Display for RepositoryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryOutcome::GraphSubmitted { components, skipped } => write!(
                f,
                "graph submitted with {} component(s), {} artifact(s) unresolved",
                components, skipped
            ),
            RepositoryOutcome::ComponentsAdded { added, failed } => {
                write!(f, "{} component(s) added, {} failed", added, failed)
            }
            RepositoryOutcome::Populated {
                origins,
                paths_written,
            } => write!(
                f,
                "metadata for {} origin(s) written to {} path(s)",
                origins, paths_written
            ),
            RepositoryOutcome::Updated {
                notifications,
                checkpoint,
            } => write!(
                f,
                "{} notification(s) replayed, checkpoint {}",
                notifications,
                checkpoint.to_rfc3339()
            ),
            RepositoryOutcome::Skipped { reason } => write!(f, "skipped: {}", reason),
            RepositoryOutcome::OutOfDate { error } => write!(f, "out of date: {}", error),
            RepositoryOutcome::Failed { error } => write!(f, "failed: {}", error),
        }
    }
}

/// Outcomes of one repository, in the order its phases ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryReport {
    pub repository: String,
    pub outcomes: Vec<RepositoryOutcome>,
}

impl RepositoryReport {
    pub fn new(repository: &str) -> Self {
        Self {
            repository: repository.to_string(),
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: RepositoryOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(RepositoryOutcome::is_failure)
    }

    /// The outcome of the last phase that ran
    pub fn last(&self) -> Option<&RepositoryOutcome> {
        self.outcomes.last()
    }
}

/// SyncReport - Result of one pass over a set of repositories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub repositories: Vec<RepositoryReport>,
}

impl SyncReport {
    pub fn has_failures(&self) -> bool {
        self.repositories.iter().any(RepositoryReport::has_failures)
    }

    pub fn failure_count(&self) -> usize {
        self.repositories.iter().filter(|r| r.has_failures()).count()
    }

    pub fn get(&self, repository: &str) -> Option<&RepositoryReport> {
        self.repositories.iter().find(|r| r.repository == repository)
    }
}
