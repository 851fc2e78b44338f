use crate::report::{AnalysisError, AnalysisReport};

/// Pull an [`AnalysisReport`] out of free-form model text.
///
/// The model is instructed to answer with nothing but JSON, but is not
/// trusted to comply: the span from the first `{` to the last `}` is taken
/// as the candidate object, so leading or trailing commentary is tolerated.
/// Anything short of a structurally valid, correctly shaped report fails
/// with [`AnalysisError::UpstreamParse`] — there is no field-by-field
/// salvage.
pub fn extract(raw: &str) -> Result<AnalysisReport, AnalysisError> {
    let start = raw
        .find('{')
        .ok_or_else(|| AnalysisError::UpstreamParse("no JSON object in response".into()))?;
    let end = raw
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or_else(|| AnalysisError::UpstreamParse("unterminated JSON object".into()))?;
    let report: AnalysisReport = serde_json::from_str(&raw[start..=end])
        .map_err(|e| AnalysisError::UpstreamParse(e.to_string()))?;
    report.check_shape().map_err(AnalysisError::UpstreamParse)?;
    Ok(report)
}
