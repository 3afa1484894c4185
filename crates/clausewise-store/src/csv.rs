//! Clause tables on disk.
//!
//! Records are converted to an all-`Utf8` Arrow [`RecordBatch`] and written
//! with Arrow's CSV writer. Embeddings travel as JSON arrays
//! (`[0.12, -0.5, ...]`) and are parsed back with `serde_json`.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray};
use arrow::csv::reader::Format;
use arrow::csv::{ReaderBuilder, WriterBuilder};
use arrow::record_batch::RecordBatch;
use clausewise_core::schema::{self, TableLayout};
use clausewise_core::{ClauseRecord, Tone};
use tracing::{info, warn};

use crate::StoreError;

/// Build the record batch for `layout`.
///
/// The `Summary` column is included only if some record carries a summary.
pub fn clause_batch(records: &[ClauseRecord], layout: TableLayout) -> Result<RecordBatch, StoreError> {
    let with_summary = records.iter().any(|r| r.summary.is_some());
    let columns = layout.columns(with_summary);

    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(columns.len());
    for &col in &columns {
        let values: Vec<Option<String>> = match col {
            schema::COMPANY => records.iter().map(|r| Some(r.company.clone())).collect(),
            schema::CONTRACT_TYPE => records.iter().map(|r| Some(r.contract_type.clone())).collect(),
            schema::CLAUSE => records.iter().map(|r| Some(r.keyword.clone())).collect(),
            schema::CONTENT => records.iter().map(|r| Some(r.content.clone())).collect(),
            schema::SUMMARY => records.iter().map(|r| r.summary.clone()).collect(),
            schema::EMBEDDING_SHAPE => records.iter().map(|r| r.embedding_shape()).collect(),
            schema::EMBEDDINGS => records
                .iter()
                .map(|r| r.embedding.as_ref().map(serde_json::to_string).transpose())
                .collect::<Result<_, _>>()?,
            schema::TONE => records
                .iter()
                .map(|r| r.tone.map(|t| t.as_str().to_string()))
                .collect(),
            other => return Err(StoreError::MissingColumn(other.to_string())),
        };
        arrays.push(Arc::new(StringArray::from(values)));
    }

    Ok(RecordBatch::try_new(
        Arc::new(layout.schema(with_summary)),
        arrays,
    )?)
}

/// Write records as CSV with a header row, creating parent directories.
pub fn write_clause_csv(path: &Path, records: &[ClauseRecord], layout: TableLayout) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let batch = clause_batch(records, layout)?;
    let file = File::create(path).map_err(|e| StoreError::io(path, e))?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(&batch)?;

    info!(rows = records.len(), path = %path.display(), ?layout, "wrote clause table");
    Ok(())
}

/// Read a clause table written by either stage.
///
/// Company, Contract Type, Clause and Content are required; Summary,
/// Embeddings and Tone are picked up when present. Rows whose embedding is an
/// empty list are dropped.
pub fn read_clause_csv(path: &Path) -> Result<Vec<ClauseRecord>, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }

    // Discover the header, then read every column as text.
    let header_file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    let (inferred, _) = Format::default()
        .with_header(true)
        .infer_schema(header_file, Some(0))?;
    let names: Vec<&str> = inferred.fields().iter().map(|f| f.name().as_str()).collect();
    for &required in schema::REQUIRED {
        if !names.contains(&required) {
            return Err(StoreError::MissingColumn(required.to_string()));
        }
    }
    let text_schema = Arc::new(schema::utf8_schema(&names));

    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    let reader = ReaderBuilder::new(text_schema).with_header(true).build(file)?;

    let mut records = Vec::new();
    let mut row = 0usize;
    let mut dropped = 0usize;
    for batch in reader {
        let batch = batch?;
        let company = text_column(&batch, schema::COMPANY)?;
        let contract_type = text_column(&batch, schema::CONTRACT_TYPE)?;
        let clause = text_column(&batch, schema::CLAUSE)?;
        let content = text_column(&batch, schema::CONTENT)?;
        let summary = text_column(&batch, schema::SUMMARY).ok();
        let embeddings = text_column(&batch, schema::EMBEDDINGS).ok();
        let tones = text_column(&batch, schema::TONE).ok();

        for i in 0..batch.num_rows() {
            let embedding = match embeddings.and_then(|c| value(c, i)) {
                Some(cell) => {
                    let v: Vec<f32> = serde_json::from_str(cell)
                        .map_err(|source| StoreError::Embedding { row, source })?;
                    if v.is_empty() {
                        dropped += 1;
                        row += 1;
                        continue;
                    }
                    Some(v)
                }
                None => None,
            };
            let tone = tones
                .and_then(|c| value(c, i))
                .map(|s| s.parse::<Tone>())
                .transpose()
                .map_err(|source| StoreError::Tone { row, source })?;

            records.push(ClauseRecord {
                company: value(company, i).unwrap_or_default().to_string(),
                contract_type: value(contract_type, i).unwrap_or_default().to_string(),
                keyword: value(clause, i).unwrap_or_default().to_string(),
                content: value(content, i).unwrap_or_default().to_string(),
                summary: summary.and_then(|c| value(c, i)).map(str::to_string),
                embedding,
                tone,
            });
            row += 1;
        }
    }

    if dropped > 0 {
        warn!(dropped, "skipped rows with empty embeddings");
    }
    info!(rows = records.len(), path = %path.display(), "loaded clause table");
    Ok(records)
}

fn text_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray, StoreError> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
        .ok_or_else(|| StoreError::MissingColumn(name.to_string()))
}

fn value(col: &StringArray, row: usize) -> Option<&str> {
    if col.is_null(row) {
        None
    } else {
        Some(col.value(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(keyword: &str, content: &str) -> ClauseRecord {
        ClauseRecord::new("Acme Holdings", "MSA", keyword, content)
    }

    #[test]
    fn embedding_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("validated.csv");

        let original = vec![0.123_456_79f32, -1.5e-7, 3.0, -0.000_1, 42.421_875];
        let mut rec = record("liability cap", "The total liability shall not exceed 5000 EUR.");
        rec.embedding = Some(original.clone());
        rec.tone = Some(Tone::Neutral);

        write_clause_csv(&path, &[rec], TableLayout::Validated).unwrap();
        let loaded = read_clause_csv(&path).unwrap();

        assert_eq!(loaded.len(), 1);
        let back = loaded[0].embedding.as_ref().unwrap();
        assert_eq!(back.len(), original.len());
        for (a, b) in original.iter().zip(back) {
            assert!((a - b).abs() <= 1e-6 * a.abs().max(1.0), "{a} vs {b}");
        }
        assert_eq!(loaded[0].tone, Some(Tone::Neutral));
    }

    #[test]
    fn quoting_survives_commas_and_quotes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.csv");
        let content = r#"Both Parties agree, "in good faith", to keep records."#;
        let mut rec = record("archiving", content);
        rec.embedding = Some(vec![0.0; 8]);

        write_clause_csv(&path, &[rec], TableLayout::Analysis).unwrap();
        let loaded = read_clause_csv(&path).unwrap();
        assert_eq!(loaded[0].content, content);
        assert_eq!(loaded[0].company, "Acme Holdings");
        assert_eq!(loaded[0].contract_type, "MSA");
        // The analysis layout stores only the shape.
        assert_eq!(loaded[0].embedding, None);
        assert_eq!(loaded[0].tone, None);
    }

    #[test]
    fn analysis_layout_writes_shape_column() {
        let mut rec = record("confidentiality", "Confidentiality");
        rec.embedding = Some(vec![0.5; 768]);
        let batch = clause_batch(&[rec], TableLayout::Analysis).unwrap();
        let shape = text_column(&batch, schema::EMBEDDING_SHAPE).unwrap();
        assert_eq!(shape.value(0), "[1, 768]");
        assert!(batch.column_by_name(schema::SUMMARY).is_none());
    }

    #[test]
    fn summary_column_only_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");
        let mut with = record("payment terms", "Invoices will be paid within 30 days.");
        with.summary = Some("Invoices paid in 30 days.".into());
        let without = record("payment terms", "Payment is due on receipt.");

        write_clause_csv(&path, &[with, without], TableLayout::Analysis).unwrap();
        let loaded = read_clause_csv(&path).unwrap();
        assert_eq!(loaded[0].summary.as_deref(), Some("Invoices paid in 30 days."));
        assert_eq!(loaded[1].summary, None);
    }

    #[test]
    fn reads_python_style_lists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.csv");
        std::fs::write(
            &path,
            "Company,Contract Type,Clause,Content,Embeddings,Tone\n\
             Acme,CDA,confidentiality,Keep it secret.,\"[0.25, -0.5, 1.0]\",supplier-friendly\n\
             Acme,CDA,confidentiality,Empty row.,[],neutral\n",
        )
        .unwrap();

        let loaded = read_clause_csv(&path).unwrap();
        assert_eq!(loaded.len(), 1, "empty embedding row is dropped");
        assert_eq!(loaded[0].embedding.as_deref(), Some(&[0.25, -0.5, 1.0][..]));
        assert_eq!(loaded[0].tone, Some(Tone::SupplierFriendly));
    }

    #[test]
    fn rejects_code_in_embedding_cell() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hostile.csv");
        std::fs::write(
            &path,
            "Company,Contract Type,Clause,Content,Embeddings,Tone\n\
             Acme,CDA,confidentiality,x,__import__('os'),neutral\n",
        )
        .unwrap();
        assert!(matches!(
            read_clause_csv(&path),
            Err(StoreError::Embedding { row: 0, .. })
        ));
    }

    #[test]
    fn unknown_tone_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.csv");
        std::fs::write(
            &path,
            "Company,Contract Type,Clause,Content,Tone\nAcme,CDA,confidentiality,x,hostile\n",
        )
        .unwrap();
        assert!(matches!(read_clause_csv(&path), Err(StoreError::Tone { row: 0, .. })));
    }

    #[test]
    fn missing_required_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "Company,Clause,Content\nAcme,x,y\n").unwrap();
        assert!(matches!(
            read_clause_csv(&path),
            Err(StoreError::MissingColumn(c)) if c == "Contract Type"
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_clause_csv(Path::new("/nonexistent/table.csv")),
            Err(StoreError::NotFound(_))
        ));
    }
}
