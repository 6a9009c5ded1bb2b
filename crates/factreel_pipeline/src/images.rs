//! Image generation stage.

use factreel_core::{GeneratedImage, ImageAsset, ImageRequest, ImageSize};
use factreel_error::{FactreelError, FactreelResult};
use factreel_interface::ImageService;
use factreel_storage::{MediaMetadata, MediaStorage, MediaType};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// File name of the image generated for prompt `index` (0-based).
pub fn image_file_name(index: usize) -> String {
    format!("image_{}.png", index + 1)
}

/// Generates one image per prompt and stores them in the run directory.
#[derive(Clone)]
pub struct ImageGenerator {
    service: Arc<dyn ImageService>,
    size: ImageSize,
}

impl ImageGenerator {
    /// Create a generator producing images of `size`.
    pub fn new(service: Arc<dyn ImageService>, size: ImageSize) -> Self {
        Self { service, size }
    }

    /// Generate, download and store an image for each prompt, in order.
    ///
    /// A content-policy rejection that carries a revised prompt is retried
    /// exactly once with that prompt. Any other failure, or a failed retry,
    /// aborts the stage without requesting later prompts.
    ///
    /// # Errors
    ///
    /// Provider, transport and storage errors propagate unchanged.
    #[instrument(skip_all, fields(count = prompts.len(), size = %self.size))]
    pub async fn generate(
        &self,
        prompts: &[String],
        storage: &dyn MediaStorage,
    ) -> FactreelResult<Vec<ImageAsset>> {
        let mut assets = Vec::with_capacity(prompts.len());

        for (index, prompt) in prompts.iter().enumerate() {
            info!(
                prompt_number = index + 1,
                total = prompts.len(),
                prompt = %prompt,
                "Generating image"
            );

            let (image, used_prompt, revised) = self.generate_one(prompt).await?;
            let bytes = self.service.download(&image).await?;

            let metadata = MediaMetadata::new(MediaType::Image, image_file_name(index));
            let reference = storage.store(&bytes, &metadata).await?;
            debug!(
                prompt_number = index + 1,
                size = reference.size_bytes,
                revised,
                "Stored image"
            );

            assets.push(ImageAsset {
                path: reference.storage_path,
                index,
                revised,
                prompt: used_prompt,
            });
        }

        info!(count = assets.len(), "Generated images");
        Ok(assets)
    }

    /// One image request with the single revised-prompt fallback.
    async fn generate_one(&self, prompt: &str) -> FactreelResult<(GeneratedImage, String, bool)> {
        let request = ImageRequest::builder()
            .prompt(prompt)
            .size(self.size)
            .build()
            .map_err(|e| {
                FactreelError::from(factreel_error::ConfigError::new(format!(
                    "Invalid image request: {}",
                    e
                )))
            })?;

        match self.service.generate(&request).await {
            Ok(image) => Ok((image, prompt.to_string(), false)),
            Err(err) => {
                let Some(revised_prompt) = err
                    .as_provider()
                    .and_then(|provider| provider.kind.revised_prompt())
                    .map(str::to_string)
                else {
                    return Err(err);
                };

                warn!(
                    original = %prompt,
                    revised = %revised_prompt,
                    "Content policy violation, retrying with revised prompt"
                );
                let image = self
                    .service
                    .generate(&request.with_prompt(revised_prompt.as_str()))
                    .await?;
                Ok((image, revised_prompt, true))
            }
        }
    }
}

impl std::fmt::Debug for ImageGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageGenerator")
            .field("provider", &self.service.provider_name())
            .field("size", &self.size)
            .finish()
    }
}
