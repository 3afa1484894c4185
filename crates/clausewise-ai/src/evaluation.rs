//! How well does embedding similarity separate clauses of one tone from the
//! rest? Builds labelled score sets from a similarity matrix and computes
//! ROC and precision-recall curves over them.

use clausewise_core::Tone;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

/// Binary labels (`true` = same tone) with their similarity scores.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationSet {
    pub labels: Vec<bool>,
    pub scores: Vec<f32>,
}

impl EvaluationSet {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn positives(&self) -> usize {
        self.labels.iter().filter(|&&l| l).count()
    }

    /// ROC / PR are undefined unless both classes are present.
    pub fn is_single_class(&self) -> bool {
        let p = self.positives();
        p == 0 || p == self.len()
    }
}

/// Build the evaluation set for `target` from a full similarity matrix.
///
/// `tones[i]` labels row `i` of `similarity`. Positives are similarities
/// between distinct clauses that both carry `target`. Negatives pair every
/// target clause with up to as many clauses of other tones as there are
/// target clauses, sampled without replacement.
pub fn prepare_evaluation<R: Rng + ?Sized>(
    similarity: &[Vec<f32>],
    tones: &[Tone],
    target: Tone,
    rng: &mut R,
) -> EvaluationSet {
    let n = similarity.len().min(tones.len());
    let group: Vec<usize> = (0..n).filter(|&i| tones[i] == target).collect();
    let others: Vec<usize> = (0..n).filter(|&i| tones[i] != target).collect();

    let mut set = EvaluationSet::default();
    for &i in &group {
        for &j in &group {
            if i != j {
                set.labels.push(true);
                set.scores.push(similarity[i][j]);
            }
        }
    }

    let k = others.len().min(group.len());
    let sampled: Vec<usize> = others.choose_multiple(rng, k).copied().collect();
    for &i in &group {
        for &j in &sampled {
            set.labels.push(false);
            set.scores.push(similarity[i][j]);
        }
    }

    debug!(
        tone = %target,
        positives = set.positives(),
        negatives = set.len() - set.positives(),
        "prepared evaluation set"
    );
    set
}

/// Receiver operating characteristic, one point per distinct threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct RocCurve {
    pub fpr: Vec<f32>,
    pub tpr: Vec<f32>,
    /// Descending; the first entry is `+∞` for the (0, 0) point.
    pub thresholds: Vec<f32>,
}

impl RocCurve {
    /// Area under the curve by the trapezoidal rule.
    pub fn auc(&self) -> f32 {
        self.fpr
            .windows(2)
            .zip(self.tpr.windows(2))
            .map(|(x, y)| (x[1] - x[0]) * (y[0] + y[1]) / 2.0)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrCurve {
    /// Starts at recall 0, precision 1.
    pub precision: Vec<f32>,
    pub recall: Vec<f32>,
    pub thresholds: Vec<f32>,
}

impl PrCurve {
    /// Step-wise average precision: Σ (Rₙ − Rₙ₋₁) Pₙ.
    pub fn average_precision(&self) -> f32 {
        self.recall
            .windows(2)
            .zip(self.precision.iter().skip(1))
            .map(|(r, &p)| (r[1] - r[0]) * p)
            .sum()
    }
}

/// Cumulative (threshold, tp, fp) at each distinct score, highest first.
fn cumulative_counts(labels: &[bool], scores: &[f32]) -> Vec<(f32, usize, usize)> {
    let mut order: Vec<usize> = (0..labels.len().min(scores.len())).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut points = Vec::new();
    let (mut tp, mut fp) = (0usize, 0usize);
    for (k, &idx) in order.iter().enumerate() {
        if labels[idx] {
            tp += 1;
        } else {
            fp += 1;
        }
        let last_of_run = order
            .get(k + 1)
            .is_none_or(|&next| scores[next] != scores[idx]);
        if last_of_run {
            points.push((scores[idx], tp, fp));
        }
    }
    points
}

/// ROC curve, or `None` if either class is missing.
pub fn roc_curve(labels: &[bool], scores: &[f32]) -> Option<RocCurve> {
    let points = cumulative_counts(labels, scores);
    let &(_, p, n) = points.last()?;
    if p == 0 || n == 0 {
        return None;
    }

    let mut curve = RocCurve {
        fpr: vec![0.0],
        tpr: vec![0.0],
        thresholds: vec![f32::INFINITY],
    };
    for (threshold, tp, fp) in points {
        curve.fpr.push(fp as f32 / n as f32);
        curve.tpr.push(tp as f32 / p as f32);
        curve.thresholds.push(threshold);
    }
    Some(curve)
}

/// Precision-recall curve, or `None` if either class is missing.
pub fn precision_recall_curve(labels: &[bool], scores: &[f32]) -> Option<PrCurve> {
    let points = cumulative_counts(labels, scores);
    let &(_, p, n) = points.last()?;
    if p == 0 || n == 0 {
        return None;
    }

    let mut curve = PrCurve {
        precision: vec![1.0],
        recall: vec![0.0],
        thresholds: vec![f32::INFINITY],
    };
    for (threshold, tp, fp) in points {
        curve.precision.push(tp as f32 / (tp + fp) as f32);
        curve.recall.push(tp as f32 / p as f32);
        curve.thresholds.push(threshold);
    }
    Some(curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn perfect_separation() {
        let labels = [true, true, false, false];
        let scores = [0.9, 0.8, 0.3, 0.1];
        let roc = roc_curve(&labels, &scores).unwrap();
        assert!((roc.auc() - 1.0).abs() < 1e-6);
        assert_eq!(roc.fpr.first(), Some(&0.0));
        assert_eq!(roc.tpr.last(), Some(&1.0));

        let pr = precision_recall_curve(&labels, &scores).unwrap();
        assert!((pr.average_precision() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn inverted_scores() {
        let roc = roc_curve(&[false, false, true], &[0.9, 0.8, 0.1]).unwrap();
        assert!(roc.auc().abs() < 1e-6);
    }

    #[test]
    fn ties_give_chance_level() {
        let labels = [true, false, true, false];
        let scores = [0.5; 4];
        let roc = roc_curve(&labels, &scores).unwrap();
        assert_eq!(roc.fpr, vec![0.0, 1.0]);
        assert_eq!(roc.tpr, vec![0.0, 1.0]);
        assert!((roc.auc() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn thresholds_descend() {
        let roc = roc_curve(&[true, false, true, false, true], &[0.2, 0.4, 0.4, 0.9, 0.7]).unwrap();
        assert!(roc.thresholds.windows(2).all(|w| w[0] > w[1]));
        // Distinct scores: 0.9, 0.7, 0.4, 0.2 plus the +∞ origin.
        assert_eq!(roc.thresholds.len(), 5);
    }

    #[test]
    fn single_class_is_none() {
        assert!(roc_curve(&[true, true], &[0.1, 0.2]).is_none());
        assert!(precision_recall_curve(&[false], &[0.1]).is_none());
        assert!(roc_curve(&[], &[]).is_none());
    }

    fn block_matrix() -> (Vec<Vec<f32>>, Vec<Tone>) {
        // Rows 0-2 neutral (similar to each other), rows 3-4 supplier-friendly.
        let tones = vec![
            Tone::Neutral,
            Tone::Neutral,
            Tone::Neutral,
            Tone::SupplierFriendly,
            Tone::SupplierFriendly,
        ];
        let sim = (0..5)
            .map(|i| {
                (0..5)
                    .map(|j| {
                        if i == j {
                            1.0
                        } else if tones[i] == tones[j] {
                            0.9
                        } else {
                            0.2
                        }
                    })
                    .collect()
            })
            .collect();
        (sim, tones)
    }

    #[test]
    fn evaluation_set_composition() {
        let (sim, tones) = block_matrix();
        let mut rng = StdRng::seed_from_u64(7);
        let set = prepare_evaluation(&sim, &tones, Tone::Neutral, &mut rng);

        // 3·2 ordered off-diagonal positives; 3 targets × min(2, 3) negatives.
        assert_eq!(set.positives(), 6);
        assert_eq!(set.len() - set.positives(), 6);
        assert!(!set.is_single_class());

        let roc = roc_curve(&set.labels, &set.scores).unwrap();
        assert!((roc.auc() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn evaluation_is_reproducible_with_seed() {
        let (sim, tones) = block_matrix();
        let a = prepare_evaluation(&sim, &tones, Tone::SupplierFriendly, &mut StdRng::seed_from_u64(1));
        let b = prepare_evaluation(&sim, &tones, Tone::SupplierFriendly, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
        // 2·1 positives; 2 targets × min(3, 2) negatives.
        assert_eq!(a.positives(), 2);
        assert_eq!(a.len(), 6);
    }

    #[test]
    fn absent_tone_yields_empty_set() {
        let (sim, tones) = block_matrix();
        let set = prepare_evaluation(&sim, &tones, Tone::CustomerFriendly, &mut StdRng::seed_from_u64(3));
        assert!(set.is_empty());
        assert!(set.is_single_class());
    }
}
