//! Seed fact stage.

use factreel_core::Fact;
use factreel_error::{FactreelResult, PipelineError, PipelineErrorKind};
use factreel_interface::FactSource;
use std::sync::Arc;
use tracing::{info, instrument};

/// Fetches the fact that seeds a run.
#[derive(Clone)]
pub struct FactProvider {
    source: Arc<dyn FactSource>,
}

impl FactProvider {
    /// Wrap a fact source.
    pub fn new(source: Arc<dyn FactSource>) -> Self {
        Self { source }
    }

    /// Fetch one fact.
    ///
    /// # Errors
    ///
    /// Source failures propagate unchanged; a blank fact is
    /// `PipelineErrorKind::EmptyFact`.
    #[instrument(skip(self), fields(provider = self.source.provider_name()))]
    pub async fn fetch(&self) -> FactreelResult<Fact> {
        let fact = self.source.fetch_fact().await?;
        if fact.is_blank() {
            return Err(PipelineError::new(PipelineErrorKind::EmptyFact).into());
        }
        info!(fact = %fact, "Fetched fact");
        Ok(fact)
    }
}

impl std::fmt::Debug for FactProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactProvider")
            .field("provider", &self.source.provider_name())
            .finish()
    }
}
