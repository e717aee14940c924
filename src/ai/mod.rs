//! AI service integration for image generation
//!
//! Provides the image generation seam used by the photoshoot service, with an
//! OpenAI Images implementation and a mock for tests.

pub mod mock;
pub mod openai;

pub use mock::MockImageGenerationClient;
pub use openai::OpenAiImageClient;

use crate::Result;
use async_trait::async_trait;

/// Generates a single image for a prompt and returns its URL.
#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<String>;
}
