/// Mock implementations for testing
mod mock_bom_service;
mod mock_progress_reporter;
mod recording_property_store;

pub use mock_bom_service::{MockBomService, BOM_URL};
pub use mock_progress_reporter::MockProgressReporter;
pub use recording_property_store::RecordingPropertyStore;
