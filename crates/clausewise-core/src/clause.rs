//! Keyword-based clause detection and the clause record that flows through
//! the analysis pipeline.

use crate::tone::Tone;

/// Keywords scanned for when analysing a contract tree.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "confidentiality",
    "liability cap",
    "archiving",
    "data retention",
    "governing law",
    "payment terms",
];

/// Keywords used by single-document analysis.
pub const PIPELINE_KEYWORDS: &[&str] = &["governing law", "termination", "liability", "confidentiality"];

/// A line of contract text that mentions a keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseMatch {
    pub keyword: String,
    /// The matching line, trimmed.
    pub snippet: String,
}

/// One row of the clause table.
///
/// Identity is `(company, contract_type, keyword)`; the remaining fields are
/// filled in by later stages (summary and embedding by the scan, tone by
/// validation).
#[derive(Debug, Clone, PartialEq)]
pub struct ClauseRecord {
    pub company: String,
    pub contract_type: String,
    pub keyword: String,
    pub content: String,
    pub summary: Option<String>,
    pub embedding: Option<Vec<f32>>,
    pub tone: Option<Tone>,
}

impl ClauseRecord {
    pub fn new(
        company: impl Into<String>,
        contract_type: impl Into<String>,
        keyword: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            contract_type: contract_type.into(),
            keyword: keyword.into(),
            content: content.into(),
            summary: None,
            embedding: None,
            tone: None,
        }
    }

    /// Shape of the pooled embedding as `[1, dim]`, if one is attached.
    pub fn embedding_shape(&self) -> Option<String> {
        self.embedding.as_ref().map(|e| format!("[1, {}]", e.len()))
    }
}

/// Find every line mentioning each keyword.
///
/// Keyword-major order: all matches for the first keyword, then the second,
/// and so on. A line mentioning two keywords appears once per keyword.
/// Empty keywords match nothing.
pub fn find_clauses(text: &str, keywords: &[&str]) -> Vec<ClauseMatch> {
    let lowered: Vec<(String, &str)> = text
        .split('\n')
        .map(|line| (line.to_lowercase(), line))
        .collect();

    let mut matches = Vec::new();
    for &keyword in keywords {
        let needle = keyword.to_lowercase();
        if needle.is_empty() {
            continue;
        }
        for (lower, line) in &lowered {
            if lower.contains(&needle) {
                matches.push(ClauseMatch {
                    keyword: keyword.to_string(),
                    snippet: line.trim().to_string(),
                });
            }
        }
    }
    matches
}

/// Whole-text mode: which keywords occur anywhere in `text`.
pub fn find_keywords<'k>(text: &str, keywords: &[&'k str]) -> Vec<&'k str> {
    let lower = text.to_lowercase();
    keywords
        .iter()
        .copied()
        .filter(|k| !k.is_empty() && lower.contains(&k.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "MSA - Acme Holdings\n\
        3. Confidentiality\n\
        Both Parties shall maintain the CONFIDENTIALITY of all information.\n\
        5. Liability Cap\n\
        The total liability for claims shall not exceed 5000 EUR.\n\
        7. Dispute Resolution\n\
        Disputes shall be governed by the laws of Sweden.";

    #[test]
    fn matches_contain_keyword_case_insensitively() {
        let found = find_clauses(TEXT, DEFAULT_KEYWORDS);
        assert!(!found.is_empty());
        for m in &found {
            assert!(
                m.snippet.to_lowercase().contains(&m.keyword.to_lowercase()),
                "{m:?}"
            );
        }
    }

    #[test]
    fn keyword_major_order_and_trimmed() {
        let text = "  Confidentiality first  \nthen liability cap\nconfidentiality again";
        let found = find_clauses(text, &["liability cap", "confidentiality"]);
        let pairs: Vec<(&str, &str)> = found
            .iter()
            .map(|m| (m.keyword.as_str(), m.snippet.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("liability cap", "then liability cap"),
                ("confidentiality", "Confidentiality first"),
                ("confidentiality", "confidentiality again"),
            ]
        );
    }

    #[test]
    fn no_dedup_across_keywords() {
        let found = find_clauses("liability cap on liability", &["liability", "liability cap"]);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].snippet, found[1].snippet);
    }

    #[test]
    fn empty_inputs() {
        assert!(find_clauses("", DEFAULT_KEYWORDS).is_empty());
        assert!(find_clauses(TEXT, &[]).is_empty());
        assert!(find_clauses(TEXT, &[""]).is_empty());
    }

    #[test]
    fn heading_lines_match() {
        let found = find_clauses(TEXT, &["liability cap"]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].snippet, "5. Liability Cap");
    }

    #[test]
    fn whole_text_mode() {
        let text = "This agreement is governed by the laws of California. Termination clauses are defined here.";
        let found = find_keywords(text, &["governing law", "termination"]);
        assert_eq!(found, vec!["termination"]);
    }

    #[test]
    fn embedding_shape() {
        let mut record = ClauseRecord::new("Acme", "CDA", "confidentiality", "text");
        assert_eq!(record.embedding_shape(), None);
        record.embedding = Some(vec![0.0; 768]);
        assert_eq!(record.embedding_shape().as_deref(), Some("[1, 768]"));
    }
}
