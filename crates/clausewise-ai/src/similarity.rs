//! Cosine similarity over clause embeddings.

/// L2-normalize a vector in place.
pub fn normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Cosine similarity. Zero vectors are dissimilar to everything (0.0).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na * nb)
}

/// Pairwise cosine similarity, `n × n`. Empty input gives an empty matrix.
pub fn similarity_matrix(embeddings: &[Vec<f32>]) -> Vec<Vec<f32>> {
    let unit: Vec<Vec<f32>> = embeddings
        .iter()
        .map(|e| {
            let mut v = e.clone();
            normalize(&mut v);
            v
        })
        .collect();

    let n = unit.len();
    let mut matrix = vec![vec![0.0f32; n]; n];
    for i in 0..n {
        for j in i..n {
            let sim: f32 = unit[i].iter().zip(&unit[j]).map(|(x, y)| x * y).sum();
            let sim = sim.clamp(-1.0, 1.0);
            matrix[i][j] = sim;
            matrix[j][i] = sim;
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_ignores_magnitude() {
        let s = cosine_similarity(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
        assert!((s - 1.0).abs() < 1e-6);
        let o = cosine_similarity(&[1.0, 0.0], &[0.0, 5.0]);
        assert!(o.abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let m = similarity_matrix(&[
            vec![1.0, 0.0, 0.0],
            vec![0.5, 0.5, 0.0],
            vec![-1.0, 0.2, 3.0],
        ]);
        assert_eq!(m.len(), 3);
        for i in 0..3 {
            assert!((m[i][i] - 1.0).abs() < 1e-6);
            for j in 0..3 {
                assert_eq!(m[i][j], m[j][i]);
            }
        }
        assert!((m[0][1] - 1.0 / 2.0f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn empty_matrix() {
        assert!(similarity_matrix(&[]).is_empty());
    }
}
