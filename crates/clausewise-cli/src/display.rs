//! Terminal output for clause tables.

use std::collections::BTreeMap;
use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use clausewise_core::ClauseRecord;

const MAX_CONTENT_CHARS: usize = 80;

// ── Public API ──

/// Print the single-PDF analysis as a table of clause, keyword and embedding shape.
pub fn print_clause_table(records: &[ClauseRecord]) -> anyhow::Result<()> {
    let batch = analysis_batch(records)?;
    println!("\nExtracted Clauses and Embeddings:");
    println!("{}", pretty_format_batches(&[batch])?);
    Ok(())
}

/// Print per-tone clause counts after validation.
pub fn print_tone_summary(records: &[ClauseRecord]) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in records {
        let tone = r.tone.map_or("unlabelled", |t| t.as_str());
        *counts.entry(tone).or_default() += 1;
    }

    println!("=== Tone distribution ({} clauses) ===", records.len());
    for (tone, count) in counts {
        println!("  {:<26} {}", tone, count);
    }
}

// ── Helpers ──

fn analysis_batch(records: &[ClauseRecord]) -> anyhow::Result<RecordBatch> {
    let schema = Schema::new(vec![
        Field::new("Clause", DataType::Utf8, false),
        Field::new("Keyword", DataType::Utf8, false),
        Field::new("Embeddings Shape", DataType::Utf8, true),
    ]);
    let clauses: ArrayRef = Arc::new(StringArray::from_iter_values(
        records.iter().map(|r| shorten(&r.content)),
    ));
    let keywords: ArrayRef = Arc::new(StringArray::from_iter_values(
        records.iter().map(|r| r.keyword.as_str()),
    ));
    let shapes: ArrayRef = Arc::new(StringArray::from(
        records.iter().map(|r| r.embedding_shape()).collect::<Vec<_>>(),
    ));
    Ok(RecordBatch::try_new(
        Arc::new(schema),
        vec![clauses, keywords, shapes],
    )?)
}

fn shorten(text: &str) -> String {
    if text.chars().count() > MAX_CONTENT_CHARS {
        let cut: String = text.chars().take(MAX_CONTENT_CHARS - 3).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}
