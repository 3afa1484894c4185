//! Visualisation stage: similarity heatmaps, PCA scatter, ROC and
//! precision-recall curves from a validated clause table.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clausewise_ai::{pca_2d, precision_recall_curve, prepare_evaluation, roc_curve, similarity_matrix};
use clausewise_core::{ClauseRecord, Tone};
use rand::Rng;
use tracing::{info, warn};

use crate::plots;

/// Order in which per-tone charts are produced.
pub const TONE_ORDER: [Tone; 3] = [Tone::Neutral, Tone::SupplierFriendly, Tone::CustomerFriendly];

#[derive(Debug, Default)]
pub struct VisualizeReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<String>,
}

/// Clauses that carry both an embedding and a tone.
pub fn labelled(records: &[ClauseRecord]) -> (Vec<Vec<f32>>, Vec<Tone>) {
    records
        .iter()
        .filter_map(|r| Some((r.embedding.clone()?, r.tone?)))
        .unzip()
}

/// Embeddings belonging to `tone`.
pub fn tone_group(embeddings: &[Vec<f32>], tones: &[Tone], tone: Tone) -> Vec<Vec<f32>> {
    embeddings
        .iter()
        .zip(tones)
        .filter(|&(_, t)| *t == tone)
        .map(|(e, _)| e.clone())
        .collect()
}

pub fn run<R: Rng + ?Sized>(records: &[ClauseRecord], out_dir: &Path, rng: &mut R) -> anyhow::Result<VisualizeReport> {
    std::fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    let (embeddings, tones) = labelled(records);
    info!(clauses = embeddings.len(), "loaded labelled embeddings");

    let mut report = VisualizeReport::default();

    // ── Heatmaps ──
    for tone in TONE_ORDER {
        let group = tone_group(&embeddings, &tones, tone);
        if group.is_empty() {
            warn!(%tone, "no clauses for tone, skipping heatmap");
            report.skipped.push(format!("{tone}_heatmap.png"));
            continue;
        }
        let path = out_dir.join(format!("{tone}_heatmap.png"));
        let matrix = similarity_matrix(&group);
        draw(&path, || {
            plots::render_heatmap(&path, &format!("{} Clause Similarity", title_case(tone)), &matrix)
        })?;
        report.written.push(path);
    }

    // ── PCA scatter ──
    match pca_2d(&embeddings) {
        Ok(points) => {
            let path = out_dir.join("embeddings_scatter.png");
            draw(&path, || plots::render_scatter(&path, &points, &tones))?;
            report.written.push(path);
        }
        Err(e) => {
            warn!(error = %e, "skipping PCA scatter");
            report.skipped.push("embeddings_scatter.png".into());
        }
    }

    // ── ROC / precision-recall ──
    let similarity = similarity_matrix(&embeddings);
    for tone in TONE_ORDER {
        let set = prepare_evaluation(&similarity, &tones, tone, rng);
        let roc_path = out_dir.join(format!("roc_auc_{tone}.png"));
        let pr_path = out_dir.join(format!("precision_recall_{tone}.png"));

        match roc_curve(&set.labels, &set.scores) {
            Some(curve) => {
                info!(%tone, auc = curve.auc(), pairs = set.len(), "ROC");
                draw(&roc_path, || plots::render_roc(&roc_path, tone, &curve))?;
                report.written.push(roc_path);
            }
            None => {
                warn!(%tone, pairs = set.len(), "single-class evaluation set, skipping ROC");
                report.skipped.push(format!("roc_auc_{tone}.png"));
            }
        }
        match precision_recall_curve(&set.labels, &set.scores) {
            Some(curve) => {
                info!(%tone, ap = curve.average_precision(), "precision-recall");
                draw(&pr_path, || plots::render_precision_recall(&pr_path, tone, &curve))?;
                report.written.push(pr_path);
            }
            None => report.skipped.push(format!("precision_recall_{tone}.png")),
        }
    }

    Ok(report)
}

fn draw(path: &Path, render: impl FnOnce() -> plots::PlotResult) -> anyhow::Result<()> {
    render().map_err(|e| anyhow::anyhow!("rendering {}: {e}", path.display()))?;
    info!(path = %path.display(), "saved chart");
    Ok(())
}

/// "supplier-friendly" → "Supplier-Friendly".
fn title_case(tone: Tone) -> String {
    tone.as_str()
        .split('-')
        .map(|w| {
            let mut chars = w.chars();
            chars
                .next()
                .map(|c| c.to_uppercase().chain(chars).collect::<String>())
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn record(tone: Option<Tone>, embedding: Option<Vec<f32>>) -> ClauseRecord {
        let mut r = ClauseRecord::new("Acme", "MSA", "confidentiality", "text");
        r.tone = tone;
        r.embedding = embedding;
        r
    }

    #[test]
    fn labelled_drops_incomplete_rows() {
        let records = vec![
            record(Some(Tone::Neutral), Some(vec![1.0, 0.0])),
            record(None, Some(vec![0.0, 1.0])),
            record(Some(Tone::SupplierFriendly), None),
            record(Some(Tone::CustomerFriendly), Some(vec![0.5, 0.5])),
        ];
        let (embeddings, tones) = labelled(&records);
        assert_eq!(embeddings.len(), 2);
        assert_eq!(tones, vec![Tone::Neutral, Tone::CustomerFriendly]);
    }

    #[test]
    fn groups_by_tone() {
        let embeddings = vec![vec![1.0], vec![2.0], vec![3.0]];
        let tones = vec![Tone::Neutral, Tone::SupplierFriendly, Tone::Neutral];
        assert_eq!(tone_group(&embeddings, &tones, Tone::Neutral), vec![vec![1.0], vec![3.0]]);
        assert!(tone_group(&embeddings, &tones, Tone::CustomerFriendly).is_empty());
    }

    #[test]
    fn run_writes_charts_and_skips_empty_tone() {
        let records = vec![
            record(Some(Tone::Neutral), Some(vec![1.0, 0.0, 0.0])),
            record(Some(Tone::Neutral), Some(vec![0.9, 0.1, 0.0])),
            record(Some(Tone::Neutral), Some(vec![0.8, 0.2, 0.1])),
            record(Some(Tone::SupplierFriendly), Some(vec![0.0, 1.0, 0.0])),
            record(Some(Tone::SupplierFriendly), Some(vec![0.1, 0.9, 0.2])),
        ];
        let dir = tempfile::tempdir().unwrap();
        let report = run(&records, dir.path(), &mut StdRng::seed_from_u64(1)).unwrap();

        let written: Vec<String> = report
            .written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            written,
            vec![
                "neutral_heatmap.png",
                "supplier-friendly_heatmap.png",
                "embeddings_scatter.png",
                "roc_auc_neutral.png",
                "precision_recall_neutral.png",
                "roc_auc_supplier-friendly.png",
                "precision_recall_supplier-friendly.png",
            ]
        );
        for path in &report.written {
            assert!(std::fs::metadata(path).unwrap().len() > 0, "{}", path.display());
        }
        assert_eq!(
            report.skipped,
            vec![
                "customer-friendly_heatmap.png",
                "roc_auc_customer-friendly.png",
                "precision_recall_customer-friendly.png",
            ]
        );
    }

    #[test]
    fn titles() {
        assert_eq!(title_case(Tone::SupplierFriendly), "Supplier-Friendly");
        assert_eq!(title_case(Tone::Neutral), "Neutral");
    }
}
