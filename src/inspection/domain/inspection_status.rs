use std::fmt;

/// Inspection state of an artifact path or of a repository
///
/// Absence of the stored property means "never inspected" and is modelled as
/// `Option::None` by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InspectionStatus {
    Pending,
    Success,
    Failure,
}

impl InspectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InspectionStatus::Pending => "PENDING",
            InspectionStatus::Success => "SUCCESS",
            InspectionStatus::Failure => "FAILURE",
        }
    }

    /// Parses a stored value. Unknown values yield `None` so newer vocabularies
    /// read as "never inspected" rather than as an error.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "PENDING" => Some(InspectionStatus::Pending),
            "SUCCESS" => Some(InspectionStatus::Success),
            "FAILURE" => Some(InspectionStatus::Failure),
            _ => None,
        }
    }
}

impl fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the last incremental refresh of a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateStatus {
    UpToDate,
    OutOfDate,
}

impl UpdateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateStatus::UpToDate => "UP_TO_DATE",
            UpdateStatus::OutOfDate => "OUT_OF_DATE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "UP_TO_DATE" => Some(UpdateStatus::UpToDate),
            "OUT_OF_DATE" => Some(UpdateStatus::OutOfDate),
            _ => None,
        }
    }
}

impl fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
