//! Two-component PCA for scatter plots.
//!
//! Principal axes are found by power iteration on the covariance operator
//! `Xᵀ X` (never materialised) with Gram-Schmidt deflation against earlier
//! axes. Computation runs in f64.

use crate::EvalError;

const MAX_ITERATIONS: usize = 500;
const TOLERANCE: f64 = 1e-10;

/// Project rows onto their top two principal components.
///
/// Axis signs are fixed so the largest-magnitude loading is positive, making
/// the output deterministic. If the data has rank below two, the missing
/// component is zero.
pub fn pca_2d(rows: &[Vec<f32>]) -> Result<Vec<[f32; 2]>, EvalError> {
    if rows.len() < 2 {
        return Err(EvalError::TooFewRows {
            needed: 2,
            got: rows.len(),
        });
    }
    let dim = rows[0].len();
    for (row, r) in rows.iter().enumerate() {
        if r.len() != dim {
            return Err(EvalError::Ragged {
                row,
                expected: dim,
                got: r.len(),
            });
        }
    }

    let centered = center(rows, dim);
    let mut axes: Vec<Vec<f64>> = Vec::with_capacity(2);
    for _ in 0..2 {
        let axis = principal_axis(&centered, dim, &axes);
        axes.push(axis);
    }

    Ok(centered
        .iter()
        .map(|r| [dot(r, &axes[0]) as f32, dot(r, &axes[1]) as f32])
        .collect())
}

fn center(rows: &[Vec<f32>], dim: usize) -> Vec<Vec<f64>> {
    let n = rows.len() as f64;
    let mut mean = vec![0.0f64; dim];
    for r in rows {
        for (m, &x) in mean.iter_mut().zip(r) {
            *m += x as f64;
        }
    }
    for m in &mut mean {
        *m /= n;
    }
    rows.iter()
        .map(|r| r.iter().zip(&mean).map(|(&x, m)| x as f64 - m).collect())
        .collect()
}

/// Leading eigenvector of `Xᵀ X` orthogonal to `previous`, or zeros when the
/// remaining variance vanishes.
fn principal_axis(x: &[Vec<f64>], dim: usize, previous: &[Vec<f64>]) -> Vec<f64> {
    // Deterministic, non-degenerate start vector.
    let mut v: Vec<f64> = (0..dim)
        .map(|j| 1.0 + ((j as f64 + 1.0) * 0.618_033_988_75).fract())
        .collect();
    orthogonalize(&mut v, previous);
    if !unit(&mut v) {
        return vec![0.0; dim];
    }

    for _ in 0..MAX_ITERATIONS {
        // w = Xᵀ (X v)
        let xv: Vec<f64> = x.iter().map(|r| dot(r, &v)).collect();
        let mut w = vec![0.0f64; dim];
        for (r, &s) in x.iter().zip(&xv) {
            for (wj, &rj) in w.iter_mut().zip(r) {
                *wj += rj * s;
            }
        }
        orthogonalize(&mut w, previous);
        if !unit(&mut w) {
            return vec![0.0; dim];
        }
        let delta: f64 = w.iter().zip(&v).map(|(a, b)| (a - b) * (a - b)).sum();
        v = w;
        if delta < TOLERANCE {
            break;
        }
    }

    if let Some(&pivot) = v
        .iter()
        .max_by(|a, b| a.abs().partial_cmp(&b.abs()).unwrap_or(std::cmp::Ordering::Equal))
        && pivot < 0.0
    {
        for x in &mut v {
            *x = -*x;
        }
    }
    v
}

fn orthogonalize(v: &mut [f64], basis: &[Vec<f64>]) {
    for b in basis {
        let p = dot(v, b);
        for (x, &bj) in v.iter_mut().zip(b) {
            *x -= p * bj;
        }
    }
}

/// Scale to unit length; false if the vector is (numerically) zero.
fn unit(v: &mut [f64]) -> bool {
    let norm = dot(v, v).sqrt();
    if norm < 1e-12 {
        return false;
    }
    for x in v.iter_mut() {
        *x /= norm;
    }
    true
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
