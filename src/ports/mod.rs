/// Ports - the seams between the synchronization core and the outside world
///
/// Inbound ports are what a CLI or scheduler hook calls to trigger a pass;
/// outbound ports are the property store, the BOM service and the console.
pub mod inbound;
pub mod outbound;
