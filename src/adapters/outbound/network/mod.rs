/// Network adapters for the BOM service
mod bom_client;
mod caching_bom_client;

pub use bom_client::BomServiceClient;
pub use caching_bom_client::CachingBomService;
