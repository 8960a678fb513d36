//! Result and error types produced by the analysis pipeline.

use crate::{completion::CompletionError, extraction::ExtractionError, risks::RiskEntry};
use serde::Serialize;
use thiserror::Error;

/// Errors emitted by the analysis pipeline.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Completion provider failed to answer.
    #[error(transparent)]
    Completion(#[from] CompletionError),
    /// Uploaded document could not be converted to text.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Plain-language summary plus the risky terms found in a clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Explanation of the clause aimed at non-lawyers.
    pub simplified_explanation: String,
    /// Risky terms in the order the model listed them.
    pub risky_terms: Vec<RiskEntry>,
}
