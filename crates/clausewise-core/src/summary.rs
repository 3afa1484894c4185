//! Extractive clause summaries.
//!
//! Keeps leading sentences of a clause while the running word count stays
//! within [`MAX_WORDS`]. Clauses shorter than [`MIN_WORDS`] are returned as-is.

pub const MAX_WORDS: usize = 50;
pub const MIN_WORDS: usize = 10;

pub fn summarize(text: &str) -> String {
    let text = text.trim();
    if text.split_whitespace().count() < MIN_WORDS {
        return text.to_string();
    }

    let mut summary = String::new();
    let mut words = 0;
    for sentence in sentences(text) {
        let n = sentence.split_whitespace().count();
        if words + n > MAX_WORDS {
            break;
        }
        if !summary.is_empty() {
            summary.push(' ');
        }
        summary.push_str(sentence);
        words += n;
    }

    if summary.is_empty() {
        // First sentence alone is over the limit.
        let head: Vec<&str> = text.split_whitespace().take(MAX_WORDS).collect();
        return format!("{}...", head.join(" "));
    }
    summary
}

/// Split on `.`, `!` or `?` followed by whitespace or end of text.
fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let at_boundary = chars.peek().is_none_or(|&(_, next)| next.is_whitespace());
            if at_boundary {
                let end = i + c.len_utf8();
                let s = text[start..end].trim();
                if !s.is_empty() {
                    out.push(s);
                }
                start = end;
            }
        }
    }
    let rest = text[start..].trim();
    if !rest.is_empty() {
        out.push(rest);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_unchanged() {
        assert_eq!(summarize("  Payment within 30 days.  "), "Payment within 30 days.");
    }

    #[test]
    fn keeps_leading_sentences_within_limit() {
        let first = "The total liability under this Agreement shall not exceed 5000 EUR.";
        let second = "Neither Party shall be liable for consequential damages.";
        let filler = "word ".repeat(45);
        let text = format!("{first} {second} {filler}end.");
        assert_eq!(summarize(&text), format!("{first} {second}"));
    }

    #[test]
    fn decimal_points_do_not_split() {
        let text = "Late payments will incur interest at 1.5% per month on all outstanding invoices issued.";
        assert_eq!(sentences(text).len(), 1);
        assert_eq!(summarize(text), text);
    }

    #[test]
    fn overlong_first_sentence_truncated() {
        let text = format!("{}end.", "word ".repeat(80));
        let summary = summarize(&text);
        assert!(summary.ends_with("..."));
        assert_eq!(summary.trim_end_matches("...").split_whitespace().count(), MAX_WORDS);
    }
}
