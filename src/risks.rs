//! Turns the model's free-form risk listing into structured entries.
//!
//! The model is asked to answer with one `Term: Explanation` pair per line. Replies are parsed
//! best-effort: blank lines and lines without a colon are dropped, everything else becomes a
//! [`RiskEntry`] whose severity is derived from keywords in the term.

use serde::Serialize;

const HIGH_KEYWORDS: [&str; 3] = ["critical", "severe", "high"];
const LOW_KEYWORDS: [&str; 2] = ["minor", "low"];

/// Coarse severity bucket attached to each risky term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Term mentions a critical, severe, or high risk.
    High,
    /// Default bucket when no keyword matches.
    Medium,
    /// Term mentions a minor or low risk.
    Low,
}

/// One risky term extracted from the model reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskEntry {
    /// Short label for the clause or phrase, text before the first colon.
    pub term: String,
    /// Severity bucket derived from `term`.
    pub severity: Severity,
    /// Why the term is risky, text after the first colon.
    pub explanation: String,
}

/// Parse raw model output into risk entries, preserving line order.
///
/// Never fails: malformed input degrades to fewer (possibly zero) entries.
pub fn format_risks(raw: &str) -> Vec<RiskEntry> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Option<RiskEntry> {
    let (term, explanation) = line.split_once(':')?;
    let term = term.trim();
    Some(RiskEntry {
        term: term.to_string(),
        severity: classify_severity(term),
        explanation: explanation.trim().to_string(),
    })
}

/// Pick a severity from keywords in `term`, case-insensitively. High keywords win over low ones.
pub fn classify_severity(term: &str) -> Severity {
    let lowered = term.to_lowercase();
    if HIGH_KEYWORDS.iter().any(|word| lowered.contains(word)) {
        Severity::High
    } else if LOW_KEYWORDS.iter().any(|word| lowered.contains(word)) {
        Severity::Low
    } else {
        Severity::Medium
    }
}
