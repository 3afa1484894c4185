//! Column names and Arrow schemas for the clause table.
//!
//! Every column is nullable `Utf8`: the table is persisted as CSV and the
//! embedding vector travels as a JSON array string.

use arrow::datatypes::{DataType, Field, Schema};

pub const COMPANY: &str = "Company";
pub const CONTRACT_TYPE: &str = "Contract Type";
pub const CLAUSE: &str = "Clause";
pub const CONTENT: &str = "Content";
pub const SUMMARY: &str = "Summary";
pub const EMBEDDING_SHAPE: &str = "Embedding Shape";
pub const EMBEDDINGS: &str = "Embeddings";
pub const TONE: &str = "Tone";

/// Columns every clause table carries.
pub const REQUIRED: &[&str] = &[COMPANY, CONTRACT_TYPE, CLAUSE, CONTENT];

/// Which stage produced the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLayout {
    /// Scan output: clause text plus the embedding shape.
    Analysis,
    /// Validation output: clause text, full embedding, tone label.
    Validated,
}

impl TableLayout {
    /// Column names in output order.
    pub fn columns(&self, with_summary: bool) -> Vec<&'static str> {
        let mut cols = REQUIRED.to_vec();
        if with_summary {
            cols.push(SUMMARY);
        }
        match self {
            Self::Analysis => cols.push(EMBEDDING_SHAPE),
            Self::Validated => cols.extend([EMBEDDINGS, TONE]),
        }
        cols
    }

    pub fn schema(&self, with_summary: bool) -> Schema {
        utf8_schema(&self.columns(with_summary))
    }
}

/// All-`Utf8` nullable schema over the given column names.
pub fn utf8_schema(columns: &[&str]) -> Schema {
    Schema::new(
        columns
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    )
}
