//! Phrase-based tone heuristics for clause text.
//!
//! A clause is `customer-friendly` if it contains one of [`CUSTOMER_PHRASES`],
//! otherwise `supplier-friendly` if it contains one of [`SUPPLIER_PHRASES`],
//! otherwise `neutral`. Matching is case-insensitive substring search.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::contract::ParseError;

/// Phrases signalling obligations weighted in the customer's favour.
pub const CUSTOMER_PHRASES: &[&str] = &[
    "highest level of care",
    "rigorous controls",
    "promptly reported",
];

/// Phrases signalling obligations weighted in the supplier's favour.
pub const SUPPLIER_PHRASES: &[&str] = &[
    "reasonable efforts",
    "commercially reasonable",
    "not liable for",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    Neutral,
    CustomerFriendly,
    SupplierFriendly,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Self::Neutral, Self::CustomerFriendly, Self::SupplierFriendly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::CustomerFriendly => "customer-friendly",
            Self::SupplierFriendly => "supplier-friendly",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| ParseError::Tone(s.to_string()))
    }
}

/// Label a clause. Customer phrases win over supplier phrases.
pub fn label_tone(content: &str) -> Tone {
    let lower = content.to_lowercase();
    if CUSTOMER_PHRASES.iter().any(|p| lower.contains(p)) {
        Tone::CustomerFriendly
    } else if SUPPLIER_PHRASES.iter().any(|p| lower.contains(p)) {
        Tone::SupplierFriendly
    } else {
        Tone::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_phrase() {
        let text = "The Receiving Party is obligated to apply rigorous controls to protect all Confidential Information.";
        assert_eq!(label_tone(text), Tone::CustomerFriendly);
    }

    #[test]
    fn supplier_phrase() {
        let text = "The Receiving Party will make commercially reasonable efforts to ensure confidentiality.";
        assert_eq!(label_tone(text), Tone::SupplierFriendly);
    }

    #[test]
    fn customer_wins_when_both_present() {
        let text = "Breaches shall be promptly reported, and the supplier is not liable for delays.";
        assert_eq!(label_tone(text), Tone::CustomerFriendly);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(
            label_tone("WE TAKE THE HIGHEST LEVEL OF CARE"),
            Tone::CustomerFriendly
        );
        assert_eq!(label_tone("Reasonable Efforts apply"), Tone::SupplierFriendly);
    }

    #[test]
    fn default_is_neutral() {
        assert_eq!(label_tone(""), Tone::Neutral);
        assert_eq!(
            label_tone("All invoices shall be paid within 30 days of receipt."),
            Tone::Neutral
        );
    }

    #[test]
    fn deterministic() {
        let text = "The Consultant is not liable for indirect damages.";
        let first = label_tone(text);
        for _ in 0..10 {
            assert_eq!(label_tone(text), first);
        }
    }

    #[test]
    fn string_forms_round_trip() {
        for tone in Tone::ALL {
            assert_eq!(tone.as_str().parse::<Tone>().unwrap(), tone);
        }
        assert_eq!(
            "friendly".parse::<Tone>(),
            Err(ParseError::Tone("friendly".into()))
        );
        assert_eq!(
            serde_json::to_string(&Tone::SupplierFriendly).unwrap(),
            "\"supplier-friendly\""
        );
    }
}
