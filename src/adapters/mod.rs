/// Adapters layer - concrete property store, BOM client and console output
///
/// Only driven (outbound) adapters exist; the binary drives the inbound port directly.
pub mod outbound;
