//! Analysis service coordinating the completion client, text extractor, and risk formatter.

use crate::{
    analysis::types::{AnalysisError, AnalysisResult},
    completion::CompletionClient,
    extraction::TextExtractor,
    prompts::{
        LEGAL_ASSISTANT_ROLE, LEGAL_EXPERT_ROLE, followup_prompt, risks_prompt, summary_prompt,
    },
    risks::format_risks,
};
use async_trait::async_trait;

/// Runs the three gateway use cases against injected collaborators.
///
/// The service holds no per-request state. Build it once at startup and share it through an
/// `Arc`.
pub struct AnalysisService {
    completion_client: Box<dyn CompletionClient>,
    text_extractor: Box<dyn TextExtractor>,
}

/// Abstraction over the analysis pipeline used by the HTTP surface.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Summarize a clause and list its risky terms.
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError>;

    /// Answer a question about a previously analyzed clause.
    async fn follow_up(&self, question: &str, original_text: &str)
    -> Result<String, AnalysisError>;

    /// Convert an uploaded document into plain text.
    async fn extract_text(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, AnalysisError>;
}

impl AnalysisService {
    /// Build a service from its collaborators.
    pub fn new(
        completion_client: Box<dyn CompletionClient>,
        text_extractor: Box<dyn TextExtractor>,
    ) -> Self {
        Self {
            completion_client,
            text_extractor,
        }
    }
}

#[async_trait]
impl AnalysisApi for AnalysisService {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        let summary_prompt = summary_prompt(text);
        let risks_prompt = risks_prompt(text);
        let (summary, raw_risks) = tokio::try_join!(
            self.completion_client
                .complete(&summary_prompt, LEGAL_EXPERT_ROLE),
            self.completion_client
                .complete(&risks_prompt, LEGAL_EXPERT_ROLE),
        )?;

        let risky_terms = format_risks(&raw_risks);
        tracing::debug!(
            raw_lines = raw_risks.lines().count(),
            risky_terms = risky_terms.len(),
            "Formatted risk listing"
        );

        Ok(AnalysisResult {
            simplified_explanation: summary.trim().to_string(),
            risky_terms,
        })
    }

    async fn follow_up(
        &self,
        question: &str,
        original_text: &str,
    ) -> Result<String, AnalysisError> {
        let prompt = followup_prompt(question, original_text);
        let answer = self
            .completion_client
            .complete(&prompt, LEGAL_ASSISTANT_ROLE)
            .await?;
        Ok(answer)
    }

    async fn extract_text(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, AnalysisError> {
        Ok(self.text_extractor.extract_text(file_name, bytes).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        completion::CompletionError,
        extraction::ExtractionError,
        risks::{RiskEntry, Severity},
    };
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Debug)]
    struct CompletionCall {
        prompt: String,
        system_role: String,
    }

    /// Answers risk prompts and other prompts with fixed replies.
    #[derive(Clone)]
    struct ScriptedCompletionClient {
        summary: Result<String, u16>,
        risks: String,
        calls: Arc<Mutex<Vec<CompletionCall>>>,
    }

    impl ScriptedCompletionClient {
        fn new(summary: &str, risks: &str) -> Self {
            Self {
                summary: Ok(summary.into()),
                risks: risks.into(),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn failing_summary(status: u16) -> Self {
            Self {
                summary: Err(status),
                ..Self::new("", "")
            }
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedCompletionClient {
        async fn complete(
            &self,
            prompt: &str,
            system_role: &str,
        ) -> Result<String, CompletionError> {
            self.calls.lock().await.push(CompletionCall {
                prompt: prompt.into(),
                system_role: system_role.into(),
            });
            if prompt.ends_with("Risks:") {
                return Ok(self.risks.clone());
            }
            self.summary
                .clone()
                .map_err(|status| CompletionError::ProviderError {
                    status,
                    body: "unavailable".into(),
                })
        }
    }

    struct FixedExtractor(Result<&'static str, ()>);

    #[async_trait]
    impl TextExtractor for FixedExtractor {
        async fn extract_text(
            &self,
            _file_name: &str,
            _bytes: Vec<u8>,
        ) -> Result<String, ExtractionError> {
            self.0
                .map(str::to_string)
                .map_err(|()| ExtractionError::EmptyDocument)
        }
    }

    fn service_with(client: ScriptedCompletionClient) -> AnalysisService {
        AnalysisService::new(Box::new(client), Box::new(FixedExtractor(Ok("text"))))
    }

    #[tokio::test]
    async fn analyze_combines_summary_and_formatted_risks() {
        let client = ScriptedCompletionClient::new(
            "  You pay for everything.\n",
            "Indemnify: you cover all costs\nHere are the risks\n\nMinor typo: page 2",
        );
        let service = service_with(client.clone());

        let result = service
            .analyze("Contractor shall indemnify the Company.")
            .await
            .expect("analysis");

        assert_eq!(result.simplified_explanation, "You pay for everything.");
        assert_eq!(
            result.risky_terms,
            vec![
                RiskEntry {
                    term: "Indemnify".into(),
                    severity: Severity::Medium,
                    explanation: "you cover all costs".into(),
                },
                RiskEntry {
                    term: "Minor typo".into(),
                    severity: Severity::Low,
                    explanation: "page 2".into(),
                },
            ]
        );

        let calls = client.calls.lock().await.clone();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|call| call.system_role == LEGAL_EXPERT_ROLE));
        assert!(
            calls
                .iter()
                .all(|call| call.prompt.contains("Contractor shall indemnify the Company."))
        );
    }

    #[tokio::test]
    async fn analyze_propagates_completion_failure() {
        let service = service_with(ScriptedCompletionClient::failing_summary(503));

        let error = service.analyze("clause").await.expect_err("failure");

        assert!(matches!(
            error,
            AnalysisError::Completion(CompletionError::ProviderError { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn follow_up_uses_assistant_role() {
        let client = ScriptedCompletionClient::new("It means you pay.", "");
        let service = service_with(client.clone());

        let answer = service
            .follow_up("What does indemnify mean?", "Contractor shall indemnify.")
            .await
            .expect("answer");

        assert_eq!(answer, "It means you pay.");
        let calls = client.calls.lock().await.clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system_role, LEGAL_ASSISTANT_ROLE);
        assert!(calls[0].prompt.contains("Question: What does indemnify mean?"));
    }

    #[tokio::test]
    async fn extract_text_wraps_extractor_errors() {
        let service = AnalysisService::new(
            Box::new(ScriptedCompletionClient::new("", "")),
            Box::new(FixedExtractor(Err(()))),
        );

        let error = service
            .extract_text("scan.pdf", vec![1, 2, 3])
            .await
            .expect_err("empty");

        assert!(matches!(
            error,
            AnalysisError::Extraction(ExtractionError::EmptyDocument)
        ));
    }
}
