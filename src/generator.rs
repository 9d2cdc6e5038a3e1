use crate::{
    catalog::AngleCatalog,
    config::GeneratorConfig,
    endpoint::ImageEndpoint,
    error::Result,
    logger,
    models::{BatchReport, EncodedImage, GenerationOutcome, SourceImage, ViewSpec},
};
use futures::{future, stream, StreamExt};
use uuid::Uuid;

/// Fans one source image out to every view of a catalog.
#[derive(Clone)]
pub struct BatchGenerator<E> {
    endpoint: E,
    config: GeneratorConfig,
}

impl<E: ImageEndpoint> BatchGenerator<E> {
    pub fn new(endpoint: E) -> Self {
        Self::with_config(endpoint, GeneratorConfig::default())
    }

    pub fn with_config(endpoint: E, config: GeneratorConfig) -> Self {
        Self { endpoint, config }
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    /// Generates every view and returns the images that came back.
    ///
    /// Images follow catalog order, whatever order the calls finish in.
    /// Failed views are dropped as long as one view succeeded; otherwise the
    /// first failure in catalog order is returned as
    /// [`crate::ViewGenError::AllViewsFailed`].
    pub async fn generate_views(
        &self,
        source: &SourceImage,
        catalog: &AngleCatalog,
    ) -> Result<Vec<EncodedImage>> {
        self.settle(source, catalog).await.into_result()
    }

    /// Runs one call per view and waits until every call has settled.
    pub async fn settle(&self, source: &SourceImage, catalog: &AngleCatalog) -> BatchReport {
        let batch_id = Uuid::new_v4().to_string();
        let _timer = logger::timer(&format!("batch {}", batch_id));

        log::info!(
            "🎬 Batch {} dispatching {} view(s)",
            batch_id,
            catalog.len()
        );

        let calls = catalog
            .iter()
            .enumerate()
            .map(|(index, spec)| self.run_view(index, spec, source));

        let outcomes = match self.config.concurrency_limit() {
            Some(limit) => stream::iter(calls).buffered(limit).collect::<Vec<_>>().await,
            None => future::join_all(calls).await,
        };

        let report = BatchReport::new(batch_id, outcomes);
        log::info!(
            "📊 Batch {} settled: {} succeeded, {} failed",
            report.batch_id,
            report.successes().count(),
            report.failures().count()
        );
        report
    }

    async fn run_view(&self, index: usize, spec: &ViewSpec, source: &SourceImage) -> GenerationOutcome {
        match self.endpoint.generate(source, &spec.directive).await {
            Ok(image) => {
                log::debug!("✅ View '{}' generated ({})", spec.label, image.media_type);
                GenerationOutcome::success(index, spec.label.clone(), image)
            }
            Err(e) => {
                log::warn!("⚠️  View '{}' failed: {}", spec.label, e);
                GenerationOutcome::failure(index, spec.label.clone(), e.to_string())
            }
        }
    }
}
