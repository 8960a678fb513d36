//! Prompt templates sent to the completion API.

/// System role used for the summary and risk prompts.
pub const LEGAL_EXPERT_ROLE: &str = "You are a legal expert.";
/// System role used for follow-up questions.
pub const LEGAL_ASSISTANT_ROLE: &str = "You are a legal expert assistant.";

/// Ask for a plain-language explanation of a clause.
pub fn summary_prompt(text: &str) -> String {
    format!(
        "You are a legal expert. Please provide a clear and concise explanation of the following legal clause in simple terms that a non-lawyer can understand:\n\n{text}\n\nExplanation:"
    )
}

/// Ask for one `Term: Explanation` line per risk, the shape [`crate::risks::format_risks`] reads.
pub fn risks_prompt(text: &str) -> String {
    format!(
        "You are a legal expert. Analyze the following legal clause and identify potential risks. For each risk, provide the term and a brief explanation of why it's risky. Format each risk as \"Term: Explanation\".\n\nLegal clause:\n{text}\n\nRisks:"
    )
}

/// Ask a question about a clause, with the clause inlined.
pub fn followup_prompt(question: &str, original_text: &str) -> String {
    format!(
        "You are a legal expert assistant. Answer the following question about this legal clause clearly and concisely.\n\nOriginal text: {original_text}\n\nQuestion: {question}\n\nAnswer:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risks_prompt_requests_colon_format() {
        let prompt = risks_prompt("The tenant pays all repairs.");
        assert!(prompt.contains("\"Term: Explanation\""));
        assert!(prompt.contains("Legal clause:\nThe tenant pays all repairs."));
        assert!(prompt.ends_with("Risks:"));
    }

    #[test]
    fn followup_prompt_embeds_question_and_text() {
        let prompt = followup_prompt("What does indemnify mean?", "Contractor shall indemnify.");
        assert!(prompt.contains("Original text: Contractor shall indemnify."));
        assert!(prompt.contains("Question: What does indemnify mean?"));
        assert!(prompt.ends_with("Answer:"));
    }

    #[test]
    fn summary_prompt_embeds_text() {
        let prompt = summary_prompt("Clause body");
        assert!(prompt.contains("\n\nClause body\n\n"));
        assert!(prompt.ends_with("Explanation:"));
    }
}
