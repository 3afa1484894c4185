//! Batch pipelines: scan a contract tree, validate a clause table, analyse a
//! single PDF.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clausewise_ai::TextEmbedder;
use clausewise_core::clause::{DEFAULT_KEYWORDS, PIPELINE_KEYWORDS};
use clausewise_core::{ClauseRecord, find_clauses, find_keywords, label_tone, summarize};
use clausewise_pdf::extract_text;
use tracing::{info, warn};
use walkdir::WalkDir;

const EMBED_BATCH_SIZE: usize = 32;

pub struct ScanStats {
    pub files: usize,
    pub clauses: usize,
    pub elapsed_secs: f64,
}

/// Every `*.pdf` under `root`, sorted by path. Symlinks are not followed.
pub fn collect_pdfs(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        let is_pdf = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if entry.file_type().is_file() && is_pdf {
            found.push(entry.into_path());
        }
    }
    found.sort();
    Ok(found)
}

/// Company and contract type from a path laid out as
/// `{Company_Name}/{TYPE}_{Company_Name}.pdf`.
pub fn contract_identity(path: &Path) -> (String, String) {
    let company = path
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().replace('_', " "))
        .unwrap_or_default();
    let contract_type = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .and_then(|n| n.split('_').next().map(|s| s.trim_end_matches(".pdf").to_string()))
        .unwrap_or_default();
    (company, contract_type)
}

/// Extract, find clauses and embed every contract under `input`.
pub fn scan_contracts(
    input: &Path,
    embedder: &mut dyn TextEmbedder,
    with_summary: bool,
) -> anyhow::Result<(Vec<ClauseRecord>, ScanStats)> {
    let start = Instant::now();
    let pdfs = collect_pdfs(input)?;
    eprintln!("  Found {} PDFs under {}", pdfs.len(), input.display());

    let mut records = Vec::new();
    for (i, path) in pdfs.iter().enumerate() {
        let (company, contract_type) = contract_identity(path);
        info!(path = %path.display(), %company, %contract_type, "analysing contract");

        let text = match extract_text(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable PDF");
                continue;
            }
        };

        let mut found: Vec<ClauseRecord> = find_clauses(&text, DEFAULT_KEYWORDS)
            .into_iter()
            .map(|m| {
                let mut record = ClauseRecord::new(&company, &contract_type, m.keyword, m.snippet);
                if with_summary {
                    record.summary = Some(summarize(&record.content));
                }
                record
            })
            .collect();
        embed_records(&mut found, embedder)?;
        records.extend(found);

        eprint!(
            "\r  Analysed {}/{} ({:.1}%)",
            i + 1,
            pdfs.len(),
            (i + 1) as f64 / pdfs.len() as f64 * 100.0
        );
    }
    if !pdfs.is_empty() {
        eprintln!();
    }

    let stats = ScanStats {
        files: pdfs.len(),
        clauses: records.len(),
        elapsed_secs: start.elapsed().as_secs_f64(),
    };
    Ok((records, stats))
}

/// Re-embed each clause's content and label its tone.
pub fn validate_clauses(
    mut records: Vec<ClauseRecord>,
    embedder: &mut dyn TextEmbedder,
) -> anyhow::Result<Vec<ClauseRecord>> {
    embed_records(&mut records, embedder)?;
    for record in &mut records {
        record.tone = Some(label_tone(&record.content));
    }
    Ok(records)
}

/// Result of analysing one PDF. Everything but `Clauses` is reported to the
/// user as a message.
#[derive(Debug)]
pub enum Analysis {
    Missing,
    EmptyText,
    NoClauses,
    Clauses(Vec<ClauseRecord>),
}

/// Analyse one PDF. `load_embedder` runs only once there are clauses to
/// embed, so soft failures never touch the model.
pub fn analyze_pdf<F>(path: &Path, load_embedder: F) -> anyhow::Result<Analysis>
where
    F: FnOnce() -> anyhow::Result<Box<dyn TextEmbedder>>,
{
    if !path.is_file() {
        return Ok(Analysis::Missing);
    }
    let text = extract_text(path).with_context(|| format!("extracting {}", path.display()))?;
    if text.trim().is_empty() {
        return Ok(Analysis::EmptyText);
    }
    if find_keywords(&text, PIPELINE_KEYWORDS).is_empty() {
        return Ok(Analysis::NoClauses);
    }

    let (company, contract_type) = contract_identity(path);
    let mut records: Vec<ClauseRecord> = find_clauses(&text, PIPELINE_KEYWORDS)
        .into_iter()
        .map(|m| ClauseRecord::new(&company, &contract_type, m.keyword, m.snippet))
        .collect();
    if records.is_empty() {
        return Ok(Analysis::NoClauses);
    }
    let mut embedder = load_embedder()?;
    embed_records(&mut records, embedder.as_mut())?;
    Ok(Analysis::Clauses(records))
}

fn embed_records(records: &mut [ClauseRecord], embedder: &mut dyn TextEmbedder) -> anyhow::Result<()> {
    for chunk in records.chunks_mut(EMBED_BATCH_SIZE) {
        let texts: Vec<&str> = chunk.iter().map(|r| r.content.as_str()).collect();
        let vectors = embedder.embed_batch(&texts).context("generating embeddings")?;
        anyhow::ensure!(
            vectors.len() == chunk.len(),
            "embedder returned {} vectors for {} texts",
            vectors.len(),
            chunk.len()
        );
        for (record, vector) in chunk.iter_mut().zip(vectors) {
            record.embedding = Some(vector);
        }
    }
    Ok(())
}
