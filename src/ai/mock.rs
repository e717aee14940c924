use super::ImageGenerationService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory image generator that records every prompt it receives.
pub struct MockImageGenerationClient {
    url_responses: Arc<Mutex<Vec<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
    fail_on_call: Option<usize>,
}

impl MockImageGenerationClient {
    pub fn new() -> Self {
        Self {
            url_responses: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            fail_on_call: None,
        }
    }

    pub fn with_url_response(self, response: String) -> Self {
        self.url_responses.lock().unwrap().push(response);
        self
    }

    /// Fail the `call`-th invocation (1-based) with an upstream error.
    pub fn failing_on_call(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockImageGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageGenerationClient {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let call = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count
        };
        self.prompts.lock().unwrap().push(prompt.to_string());

        if self.fail_on_call == Some(call) {
            return Err(Error::AiProvider(
                "500 mock image generation failure".to_string(),
            ));
        }

        let responses = self.url_responses.lock().unwrap();
        if responses.is_empty() {
            Ok(format!("https://images.example.com/photoshoot-{}.png", call))
        } else {
            let index = (call - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}
