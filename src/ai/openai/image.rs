use super::client::OpenAiHttpClient;
use super::types::{ImageGenerationRequest, ImageGenerationResponse};
use crate::ai::ImageGenerationService;
use crate::config::Config;
use crate::{Error, Result};
use async_trait::async_trait;

pub const IMAGE_SIZE: &str = "1024x1024";
pub const IMAGE_QUALITY: &str = "hd";
pub const IMAGES_PER_CALL: u32 = 1;

pub struct OpenAiImageClient {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiImageClient {
    pub fn new(http: OpenAiHttpClient, model: String) -> Self {
        Self { http, model }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let http = OpenAiHttpClient::new(
            config.openai_api_key.clone(),
            config.openai_base_url.clone(),
            config.request_timeout,
        )?;
        Ok(Self::new(http, config.image_model.clone()))
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ImageGenerationService for OpenAiImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let request = ImageGenerationRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            n: IMAGES_PER_CALL,
            size: IMAGE_SIZE.to_string(),
            quality: IMAGE_QUALITY.to_string(),
        };

        tracing::debug!("Sending image generation request to OpenAI");
        let response: ImageGenerationResponse =
            self.http.post("/v1/images/generations", &request).await?;

        let image_data = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| Error::AiProvider("No image data in OpenAI response".to_string()))?;

        if let Some(revised) = &image_data.revised_prompt {
            tracing::debug!("OpenAI revised prompt: {}", revised);
        }

        match image_data.url {
            Some(url) => Ok(url),
            None if image_data.b64_json.is_some() => Err(Error::AiProvider(
                "OpenAI returned base64 image data instead of a URL".to_string(),
            )),
            None => Err(Error::AiProvider(
                "No image URL in OpenAI response".to_string(),
            )),
        }
    }
}
