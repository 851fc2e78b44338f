use async_trait::async_trait;

use crate::encoded_image::EncodedImage;

/// Interface to a multimodal model that can look at one image and answer a
/// text instruction. The analysis pipeline depends on this seam so tests
/// can substitute a scripted model.
#[async_trait]
pub trait VisionClient: Send + Sync {
    /// Returns the model's free-form text answer for `instruction` applied
    /// to `image`. The text is not trusted to follow any format.
    async fn interpret(
        &self,
        instruction: &str,
        image: &EncodedImage,
    ) -> anyhow::Result<String>;
}
