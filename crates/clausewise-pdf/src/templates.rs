//! Clause wording per section and tone.
//!
//! Placeholders are `{name}` tokens filled by [`fill`]. Text stays ASCII so it
//! survives WinAnsi encoding unchanged.

use clausewise_core::{Section, Tone};

pub const JURISDICTIONS: &[&str] = &["Germany", "USA", "Sweden", "France", "UK", "Canada", "Australia"];
pub const CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "SEK", "CAD"];
pub const DISPUTE_METHODS: &[&str] = &["court", "arbitration", "amicable settlement"];
pub const PAYMENT_DAYS: &[u32] = &[15, 30, 60];
pub const SERVICES: &str = "consulting, advisory, and technical support services";

/// Variants for `section` written in `tone`.
pub fn variants(section: Section, tone: Tone) -> &'static [&'static str] {
    use Section::*;
    use Tone::*;
    match (section, tone) {
        // Opening sections read the same whatever the tone.
        (Introduction, _) => &[
            "This Agreement is entered into on {date} between {company} ('Client') and {counterparty} ('Consultant').",
            "This document, dated {date}, outlines the terms agreed upon by {company} and {counterparty}.",
            "This mutually beneficial Agreement is established on {date} between {company} (Client) and {counterparty} (Consultant).",
            "This Agreement is effective as of {date} between {company} (Client) and {counterparty} (Consultant).",
            "On this day, {date}, {company} (the 'Client') and {counterparty} (the 'Consultant') formalize their Agreement.",
        ],

        (ScopeOfServices, _) => &[
            "The Consultant agrees to provide the following services: {services}.",
            "This Agreement defines the services as {services}, to be delivered by the Consultant.",
            "The Consultant will diligently deliver services, ensuring Client satisfaction, including {services}.",
            "The Consultant will perform the agreed services as outlined, including {services}.",
        ],

        (Confidentiality, Neutral) => &[
            "Both Parties shall maintain the confidentiality of all proprietary information shared during this Agreement.",
            "The Receiving Party shall maintain the confidentiality of all disclosed proprietary information and limit access to authorized personnel.",
        ],
        (Confidentiality, CustomerFriendly) => &[
            "The Receiving Party is obligated to apply rigorous controls to protect all Confidential Information shared under this Agreement.",
            "The Receiving Party shall take the highest level of care to protect all Confidential Information provided by the Disclosing Party.",
            "Any unauthorized disclosure of Confidential Information shall be promptly reported to the Disclosing Party.",
        ],
        (Confidentiality, SupplierFriendly) => &[
            "The Receiving Party shall take reasonable efforts to protect Confidential Information but is not liable for inadvertent disclosures.",
            "The Receiving Party will make commercially reasonable efforts to ensure confidentiality of the shared information.",
        ],

        (PaymentTerms, Neutral) => &[
            "All invoices shall be paid within {days} days of receipt. Late payments will incur interest at 1.5% per month.",
            "Invoices are payable within {days} days. Delayed payments may result in interest penalties as stipulated in this Agreement.",
        ],
        (PaymentTerms, CustomerFriendly) => &[
            "The Client agrees to process invoices within {days} days to avoid delays, ensuring prompt payment.",
            "The Client will prioritize timely payments, ensuring invoices are processed within {days} days of receipt.",
        ],
        (PaymentTerms, SupplierFriendly) => &[
            "The Client shall remit payment within {days} days. Any disputes must be raised within 7 days of invoice receipt.",
            "Payment must be made within {days} days, and undisputed invoices shall be considered accepted if not contested within 7 days.",
        ],

        (LiabilityCap, Neutral) => &[
            "The total liability under this Agreement shall not exceed {amount} {currency}. Neither Party shall be liable for consequential damages.",
            "The liability of each Party is limited to {amount} {currency}, with no responsibility for indirect damages.",
        ],
        (LiabilityCap, CustomerFriendly) => &[
            "The Consultant's liability is unlimited in cases of gross negligence, willful misconduct, or confidentiality breaches.",
            "The Consultant will bear full liability for any instances of gross negligence or breaches of confidentiality.",
        ],
        (LiabilityCap, SupplierFriendly) => &[
            "The Consultant's total liability is capped at {amount} {currency}, irrespective of the nature of the claim.",
            "The Consultant's liability is strictly limited to {amount} {currency}, and the Consultant is not liable for indirect losses.",
        ],

        (ArchiveDuration, Neutral) => &[
            "All records under this Agreement shall be retained for {years} years or as required by law.",
            "The Parties agree to maintain all relevant records for a minimum of {years} years.",
        ],
        (ArchiveDuration, CustomerFriendly) => &[
            "The Client agrees to maintain all records for {years} years to ensure compliance and transparency.",
            "The Client will retain Agreement-related records for {years} years to fulfill audit and compliance obligations.",
        ],
        (ArchiveDuration, SupplierFriendly) => &[
            "The Consultant will preserve relevant documentation for {years} years, unless a longer period is mandated by law.",
            "The Consultant shall archive necessary records for {years} years, in line with legal requirements.",
        ],

        (DisputeResolution, Neutral) => &[
            "Any disputes will be resolved in accordance with the laws of {jurisdiction} in {method}.",
            "This Agreement is governed by {jurisdiction} law. Disputes shall be resolved through {method}.",
        ],
        (DisputeResolution, CustomerFriendly) => &[
            "All disputes shall be resolved in favor of achieving a fair and just outcome under {jurisdiction} law, through {method}.",
        ],
        (DisputeResolution, SupplierFriendly) => &[
            "Any disputes shall be resolved through {method} in {jurisdiction}, at the Consultant's choice of venue.",
        ],
    }
}

/// Replace every `{key}` in `template` with its value.
pub fn fill(template: &str, values: &[(&str, String)]) -> String {
    values.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("{{{key}}}"), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_and_tone_has_text() {
        for section in Section::ALL {
            for tone in Tone::ALL {
                assert!(!variants(section, tone).is_empty(), "{section:?}/{tone}");
            }
        }
    }

    #[test]
    fn templates_are_ascii() {
        for section in Section::ALL {
            for tone in Tone::ALL {
                for t in variants(section, tone) {
                    assert!(t.is_ascii(), "{t}");
                }
            }
        }
    }

    #[test]
    fn opening_sections_do_not_vary_by_tone() {
        for section in [Section::Introduction, Section::ScopeOfServices] {
            for tone in Tone::ALL {
                assert_eq!(variants(section, tone), variants(section, Tone::Neutral), "{section:?}/{tone}");
            }
        }
        assert_ne!(
            variants(Section::Confidentiality, Tone::CustomerFriendly),
            variants(Section::Confidentiality, Tone::SupplierFriendly)
        );
    }

    #[test]
    fn fill_replaces_all_occurrences() {
        let text = fill(
            "{amount} {currency}; again {amount}",
            &[("amount", "5000".into()), ("currency", "EUR".into())],
        );
        assert_eq!(text, "5000 EUR; again 5000");
    }
}
