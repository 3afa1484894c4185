//! Contract types, their section structure, and the generated-contract record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tone::Tone;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown contract type: {0:?}")]
    ContractType(String),
    #[error("unknown section: {0:?}")]
    Section(String),
    #[error("unknown tone: {0:?}")]
    Tone(String),
}

/// The four agreement kinds the generator produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    /// Confidential disclosure agreement.
    #[serde(rename = "CDA")]
    Cda,
    /// Consulting agreement.
    #[serde(rename = "CA")]
    Ca,
    /// Master services agreement.
    #[serde(rename = "MSA")]
    Msa,
    /// Work order.
    #[serde(rename = "WO")]
    Wo,
}

impl ContractType {
    pub const ALL: [ContractType; 4] = [Self::Cda, Self::Ca, Self::Msa, Self::Wo];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cda => "CDA",
            Self::Ca => "CA",
            Self::Msa => "MSA",
            Self::Wo => "WO",
        }
    }

    /// Sections in document order.
    pub fn sections(&self) -> &'static [Section] {
        use Section::*;
        match self {
            Self::Cda => &[Introduction, Confidentiality, LiabilityCap, DisputeResolution],
            Self::Ca | Self::Msa => &[
                Introduction,
                ScopeOfServices,
                Confidentiality,
                PaymentTerms,
                LiabilityCap,
                ArchiveDuration,
                DisputeResolution,
            ],
            Self::Wo => &[
                Introduction,
                ScopeOfServices,
                Confidentiality,
                PaymentTerms,
                LiabilityCap,
                DisputeResolution,
            ],
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::ContractType(s.to_string()))
    }
}

/// A contract section. Serialised as its snake_case key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Introduction,
    ScopeOfServices,
    Confidentiality,
    PaymentTerms,
    LiabilityCap,
    ArchiveDuration,
    DisputeResolution,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Self::Introduction,
        Self::ScopeOfServices,
        Self::Confidentiality,
        Self::PaymentTerms,
        Self::LiabilityCap,
        Self::ArchiveDuration,
        Self::DisputeResolution,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Introduction => "introduction",
            Self::ScopeOfServices => "scope_of_services",
            Self::Confidentiality => "confidentiality",
            Self::PaymentTerms => "payment_terms",
            Self::LiabilityCap => "liability_cap",
            Self::ArchiveDuration => "archive_duration",
            Self::DisputeResolution => "dispute_resolution",
        }
    }

    /// Heading text: "liability_cap" → "Liability Cap".
    pub fn title(&self) -> String {
        self.key()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FromStr for Section {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sec| sec.key() == s.trim())
            .ok_or_else(|| ParseError::Section(s.to_string()))
    }
}

/// Metadata of one generated contract.
///
/// Written once by the generator (and into `manifest.json`), never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub company: String,
    pub contract_type: ContractType,
    pub counterparty: String,
    pub jurisdiction: String,
    pub currency: String,
    /// Effective date as printed on the document, e.g. "March 04, 2025".
    pub effective_date: String,
    pub liability_amount: u32,
    pub archive_years: u32,
    pub payment_days: u32,
    pub dispute_method: String,
    /// Tone drawn for each section, in document order.
    pub tones: Vec<(Section, Tone)>,
    /// Path of the rendered PDF.
    pub path: std::path::PathBuf,
}

impl ContractRecord {
    /// Tone assigned to `section`, if the contract type has that section.
    pub fn tone_of(&self, section: Section) -> Option<Tone> {
        self.tones
            .iter()
            .find(|(s, _)| *s == section)
            .map(|&(_, tone)| tone)
    }
}
