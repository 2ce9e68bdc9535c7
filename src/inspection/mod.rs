/// Inspection domain - artifact identity, inspection state and BOM metadata
///
/// Pure business logic with no I/O. Application use cases drive these types
/// through the outbound ports.
pub mod domain;
pub mod policies;
pub mod services;
