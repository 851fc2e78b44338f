use std::time::Duration;

use async_trait::async_trait;
use ollama_rs::Ollama;
use ollama_rs::generation::completion::request::GenerationRequest;
use ollama_rs::generation::images::Image;
use ollama_rs::models::ModelOptions;

use crate::encoded_image::EncodedImage;
use crate::vision_client::VisionClient;

const DEFAULT_MAX_TOKENS: i32 = 1024;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// [`VisionClient`] backed by an Ollama multimodal model.
///
/// Exactly one generation request is issued per call, with a bounded
/// response length and a wall-clock timeout. Nothing is retried here;
/// failures surface to the caller.
pub struct OllamaVision {
    client: Ollama,
    model: String,
    max_tokens: i32,
    timeout: Duration,
}

impl OllamaVision {
    pub fn new(base_url: &str, model: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            client: Ollama::try_new(base_url)?,
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Override the response length bound and call timeout.
    pub fn with_limits(mut self, max_tokens: i32, timeout: Duration) -> Self {
        self.max_tokens = max_tokens;
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl VisionClient for OllamaVision {
    async fn interpret(
        &self,
        instruction: &str,
        image: &EncodedImage,
    ) -> anyhow::Result<String> {
        let req = GenerationRequest::new(self.model.clone(), instruction.to_string())
            .images(vec![Image::from_base64(image.payload().to_string())])
            .options(ModelOptions::default().num_predict(self.max_tokens));
        let resp = tokio::time::timeout(self.timeout, self.client.generate(req))
            .await
            .map_err(|_| anyhow::anyhow!("model call timed out after {:?}", self.timeout))??;
        tracing::debug!(len = resp.response.len(), "model response received");
        Ok(resp.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoded_image::ImageSubtype;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn sends_image_payload_and_returns_text() {
        let server = MockServer::start_async().await;
        let body =
            "{\"model\":\"llava\",\"created_at\":\"now\",\"response\":\"loops everywhere\",\"done\":true}\n";
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/generate")
                    .body_contains("\"images\"");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(body);
            })
            .await;

        let llm = OllamaVision::new(&server.base_url(), "llava").unwrap();
        let image = EncodedImage::from_bytes(ImageSubtype::Png, b"pixels");
        let out = llm.interpret("describe", &image).await.unwrap();
        assert_eq!(out, "loops everywhere");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn surfaces_backend_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(500);
            })
            .await;

        let llm = OllamaVision::new(&server.base_url(), "llava").unwrap();
        let image = EncodedImage::from_bytes(ImageSubtype::Png, b"pixels");
        assert!(llm.interpret("describe", &image).await.is_err());
    }

    #[tokio::test]
    async fn enforces_the_call_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(200)
                    .delay(std::time::Duration::from_millis(500))
                    .body("{}");
            })
            .await;

        let llm = OllamaVision::new(&server.base_url(), "llava")
            .unwrap()
            .with_limits(16, Duration::from_millis(50));
        let image = EncodedImage::from_bytes(ImageSubtype::Png, b"pixels");
        let err = llm.interpret("describe", &image).await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}
