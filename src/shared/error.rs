use std::fmt;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow the scheduler driving the binary to distinguish a clean
/// pass from a pass in which some repositories ended in a failure state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every processed repository committed its transition
    Success = 0,
    /// At least one repository ended FAILURE or OUT_OF_DATE
    Failures = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (configuration, property file I/O, client setup)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::Failures => write!(f, "Failures (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Error kinds raised by the synchronization engine.
///
/// Every variant carries the repository (and where relevant the path or the
/// originating call) so a log line is enough to diagnose the failure.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Missing or contradictory repository state; fatal for one replay pass
    #[error("Configuration error in repository '{repository}': {details}\n\n💡 Hint: The repository metadata is malformed; clear its inspection status to re-identify it")]
    Configuration { repository: String, details: String },

    #[error("Failed to resolve identity of {path}: {details}")]
    IdentityResolution { path: String, details: String },

    #[error("BOM service call '{operation}' failed: {details}")]
    Service { operation: String, details: String },

    #[error("Property store operation '{operation}' failed on {path}: {details}")]
    Store {
        operation: String,
        path: String,
        details: String,
    },

    #[error("Illegal inspection status transition on {path}: {from} -> {to}")]
    IllegalTransition {
        path: String,
        from: String,
        to: String,
    },

    /// Validation error for configuration and value objects
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl SyncError {
    pub fn service(operation: &str, details: impl fmt::Display) -> Self {
        SyncError::Service {
            operation: operation.to_string(),
            details: details.to_string(),
        }
    }

    pub fn store(operation: &str, path: impl fmt::Display, details: impl fmt::Display) -> Self {
        SyncError::Store {
            operation: operation.to_string(),
            path: path.to_string(),
            details: details.to_string(),
        }
    }

    /// Returns true when the error came from the BOM service collaborator
    pub fn is_service_error(error: &anyhow::Error) -> bool {
        matches!(error.downcast_ref::<SyncError>(), Some(SyncError::Service { .. }))
    }

    /// Returns true when the error flags malformed repository state
    pub fn is_configuration_error(error: &anyhow::Error) -> bool {
        matches!(
            error.downcast_ref::<SyncError>(),
            Some(SyncError::Configuration { .. })
        )
    }
}
