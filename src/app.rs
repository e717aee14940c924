//! Photoshoot orchestration: validation, prompt construction and image fan-out.

use crate::ai::{ImageGenerationService, OpenAiImageClient};
use crate::config::Config;
use crate::models::{PhotoshootRequest, PhotoshootResult};
use crate::prompts;
use crate::{Error, Result};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info};

/// Turns photoshoot requests into generated image URLs.
#[derive(Clone)]
pub struct PhotoshootService {
    image_gen: Arc<dyn ImageGenerationService>,
}

impl PhotoshootService {
    /// Build a service around any image generator.
    ///
    /// This is primarily useful for tests and local harnesses that need to
    /// inject mocks.
    pub fn new(image_gen: Arc<dyn ImageGenerationService>) -> Self {
        Self { image_gen }
    }

    /// Construct a service backed by the OpenAI Images API.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = OpenAiImageClient::from_config(config)?;
        info!("Image provider: OpenAI (model: {})", client.model());
        Ok(Self::new(Arc::new(client)))
    }

    /// Validate the request, build its prompt and generate one image per item.
    ///
    /// Every call is spawned as its own task with the same prompt. The join is
    /// all-or-nothing: the first failure is returned and no partial result is
    /// produced. Calls still in flight when a sibling fails run to completion
    /// and their results are discarded.
    pub async fn generate(&self, request: &PhotoshootRequest) -> Result<PhotoshootResult> {
        request.validate()?;

        let prompt = prompts::build_prompt(request);
        let count = request.fan_out()?;

        info!(
            "Generating {} image(s) for {} photoshoot",
            count,
            if request.is_person() { "person" } else { "product" }
        );
        debug!("Prompt: {}", prompt);

        let shared_prompt: Arc<str> = Arc::from(prompt.as_str());
        let handles: Vec<_> = (0..count)
            .map(|index| {
                let image_gen = Arc::clone(&self.image_gen);
                let prompt = Arc::clone(&shared_prompt);
                tokio::spawn(async move {
                    debug!("Dispatching image generation call {}", index + 1);
                    image_gen.generate_image(&prompt).await
                })
            })
            .collect();

        let images = try_join_all(handles.into_iter().map(|handle| async move {
            match handle.await {
                Ok(result) => result,
                Err(e) => Err(Error::from(e)),
            }
        }))
        .await?;

        info!("Generated {} image(s)", images.len());
        Ok(PhotoshootResult { images, prompt })
    }
}
