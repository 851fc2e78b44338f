use std::sync::Arc;

use crate::encoded_image::EncodedImage;
use crate::extract::extract;
use crate::report::{AnalysisError, AnalysisReport};
use crate::vision_client::VisionClient;

/// The fixed instruction sent with every handwriting sample. It names the
/// visual features to examine, sets the tone, and pins the exact output
/// shape with example values so the answer can be parsed mechanically.
pub const INSTRUCTION: &str = r#"You are an expert graphologist and behavioral psychologist. Analyze this handwriting image carefully.

Observe: letter size, slant/inclination, pressure (stroke thickness), word spacing, regularity, loops, T-bars, I-dots, ascenders and descenders, baseline consistency, margins.

From these observations, deduce a complete personality profile. Be precise in graphological observations but fun and accessible in interpretation. Use emojis.

Return ONLY valid JSON:
{
  "type": "A creative personality archetype name (e.g. 'The Creative Strategist', 'The Sensitive Explorer')",
  "traits": [
    {"name": "Trait Name", "percentage": 87, "emoji": "relevant emoji"},
    {"name": "Trait Name", "percentage": 72, "emoji": "relevant emoji"},
    {"name": "Trait Name", "percentage": 65, "emoji": "relevant emoji"},
    {"name": "Trait Name", "percentage": 58, "emoji": "relevant emoji"},
    {"name": "Trait Name", "percentage": 45, "emoji": "relevant emoji"}
  ],
  "emotionalStyle": "2-3 sentences about how they handle stress, relationships, and emotions",
  "careers": ["Ideal Career 1 with brief reason", "Ideal Career 2 with brief reason", "Ideal Career 3 with brief reason"],
  "secret": "A surprising hidden trait revealed by the handwriting (1-2 sentences)",
  "characterScore": 82,
  "observations": "Detailed graphological observations about letter size, slant, pressure, spacing, loops etc. (2-3 sentences)"
}"#;

/// Turns one canonical image into one typed report.
///
/// Stateless across calls: no caching, no retry. Input validation runs
/// before anything reaches the model, which is the only guard keeping
/// malformed client data away from the paid backend.
pub struct Analyzer {
    llm: Arc<dyn VisionClient>,
}

impl Analyzer {
    pub fn new(llm: Arc<dyn VisionClient>) -> Self {
        Self { llm }
    }

    /// Single entry point of the pipeline.
    ///
    /// `None` or an empty string fails with [`AnalysisError::MissingImage`];
    /// anything that is not a well-formed data URI with a supported subtype
    /// fails with [`AnalysisError::InvalidImageFormat`]. Only then is the
    /// model called, exactly once.
    pub async fn analyze(&self, image: Option<&str>) -> Result<AnalysisReport, AnalysisError> {
        let uri = image
            .filter(|uri| !uri.is_empty())
            .ok_or(AnalysisError::MissingImage)?;
        let image = EncodedImage::parse(uri)?;
        let raw = self
            .llm
            .interpret(INSTRUCTION, &image)
            .await
            .map_err(|e| AnalysisError::UpstreamCall(e.to_string()))?;
        extract(&raw)
    }
}
