use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One scored personality trait in an [`AnalysisReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitScore {
    pub name: String,
    pub percentage: u8,
    pub emoji: String,
}

/// Structured result of one handwriting analysis.
///
/// Field names on the wire are camelCase to match what the model is asked to
/// produce and what the page consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Short archetype label, e.g. "The Creative Strategist".
    #[serde(rename = "type")]
    pub archetype: String,
    /// Exactly five traits, most salient first.
    pub traits: Vec<TraitScore>,
    pub emotional_style: String,
    pub observations: String,
    pub secret: String,
    pub careers: Vec<String>,
    pub character_score: u8,
}

impl AnalysisReport {
    /// Rejects reports that parsed as JSON but do not have the expected
    /// shape. A report failing this check is never partially rendered.
    pub fn check_shape(&self) -> Result<(), String> {
        if self.traits.len() != 5 {
            return Err(format!("expected 5 traits, got {}", self.traits.len()));
        }
        if let Some(t) = self.traits.iter().find(|t| t.percentage > 100) {
            return Err(format!("trait {:?} percentage {} out of range", t.name, t.percentage));
        }
        if self.character_score > 100 {
            return Err(format!("characterScore {} out of range", self.character_score));
        }
        for (field, value) in [
            ("type", &self.archetype),
            ("emotionalStyle", &self.emotional_style),
            ("observations", &self.observations),
            ("secret", &self.secret),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{field} is empty"));
            }
        }
        if self.careers.is_empty() {
            return Err("careers is empty".into());
        }
        Ok(())
    }
}

/// Failure modes of the analysis pipeline.
///
/// The first two are client-input problems detected before any external
/// call; the upstream pair covers the model boundary. The carried detail is
/// for logging and is never exposed to the client verbatim.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("image is required")]
    MissingImage,
    #[error("invalid image format")]
    InvalidImageFormat,
    #[error("model call failed: {0}")]
    UpstreamCall(String),
    #[error("model response unusable: {0}")]
    UpstreamParse(String),
}
