use crate::inspection::domain::{BomComponent, CompositeComponentModel};
use crate::ports::outbound::BomService;
use futures::stream::{self, StreamExt};

/// CompositeComponentResolver - Joins BOM entries with their component version and origins
///
/// A failed fetch never aborts the batch: the entry resolves to a placeholder
/// model and the failure is logged with the failing reference.
pub struct CompositeComponentResolver<'a, B> {
    bom: &'a B,
    max_concurrency: usize,
}

impl<'a, B: BomService> CompositeComponentResolver<'a, B> {
    pub fn new(bom: &'a B, max_concurrency: usize) -> Self {
        Self {
            bom,
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub async fn resolve(&self, component: BomComponent) -> CompositeComponentModel {
        let component_version = match self
            .bom
            .get_component_version(&component.component_version_url)
            .await
        {
            Ok(version) => version,
            Err(e) => {
                tracing::warn!(
                    component = %component.component_name,
                    reference = %component.component_version_url,
                    error = %e,
                    "Failed to fetch component version"
                );
                return CompositeComponentModel::placeholder(component);
            }
        };

        match self.bom.get_origins(&component_version).await {
            Ok(origins) => CompositeComponentModel::new(component, component_version, origins),
            Err(e) => {
                tracing::warn!(
                    component = %component.component_name,
                    reference = %component_version.origins_url,
                    error = %e,
                    "Failed to fetch component origins"
                );
                CompositeComponentModel::placeholder(component)
            }
        }
    }

    /// Resolves a batch concurrently; results keep the input order
    pub async fn resolve_all(&self, components: Vec<BomComponent>) -> Vec<CompositeComponentModel> {
        stream::iter(components)
            .map(|component| self.resolve(component))
            .buffered(self.max_concurrency)
            .collect()
            .await
    }
}
