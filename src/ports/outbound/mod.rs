/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (property store, BOM service, console).
pub mod bom_service;
pub mod progress_reporter;
pub mod property_store;

pub use bom_service::{BomService, VulnerabilityEntry};
pub use progress_reporter::ProgressReporter;
pub use property_store::PropertyStore;
