//! The embedding seam and a model-free fallback backend.

use std::hash::Hasher;

use fnv::FnvHasher;

use crate::similarity::normalize;

/// Anything that turns clause text into fixed-size vectors.
///
/// Backends are constructed once by the caller and passed down to the
/// pipeline; nothing here holds global state.
pub trait TextEmbedder {
    /// Output dimensionality.
    fn dim(&self) -> usize;

    /// Embed a batch of texts, returning one vector per input.
    fn embed_batch(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>>;

    /// Embed a single text.
    fn embed(&mut self, text: &str) -> anyhow::Result<Vec<f32>> {
        self.embed_batch(&[text])?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("embedder returned no vector"))
    }
}

/// Signed feature-hashing bag-of-words embedder.
///
/// Lower-cased alphanumeric tokens are hashed with 64-bit FNV-1a into `dim`
/// buckets; the top hash bit picks the sign. Vectors are L2-normalised, so
/// empty text maps to the zero vector.
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dim];
        for token in tokens(text) {
            let h = fnv1a(token.as_bytes());
            let bucket = (h % self.dim as u64) as usize;
            let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
            v[bucket] += sign;
        }
        normalize(&mut v);
        v
    }
}

impl TextEmbedder for HashingEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed_batch(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hasher = FnvHasher::default();
    hasher.write(bytes);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::cosine_similarity;

    #[test]
    fn fixed_dimension_and_unit_norm() {
        let mut embedder = HashingEmbedder::new(64);
        let v = embedder.embed("The total liability shall not exceed 5000 EUR.").unwrap();
        assert_eq!(v.len(), 64);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
    }

    #[test]
    fn deterministic_and_case_insensitive() {
        let mut embedder = HashingEmbedder::new(128);
        let a = embedder.embed("Governing Law").unwrap();
        let b = embedder.embed("governing law").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_text_is_zero_vector() {
        let mut embedder = HashingEmbedder::new(16);
        let v = embedder.embed("").unwrap();
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn shared_vocabulary_scores_higher() {
        let mut embedder = HashingEmbedder::new(512);
        let vecs = embedder
            .embed_batch(&[
                "records shall be retained for five years",
                "records shall be retained for three years",
                "invoices are payable within thirty days",
            ])
            .unwrap();
        assert_eq!(vecs.len(), 3);
        let close = cosine_similarity(&vecs[0], &vecs[1]);
        let far = cosine_similarity(&vecs[0], &vecs[2]);
        assert!(close > far, "{close} should exceed {far}");
    }

    #[test]
    fn fnv_reference_values() {
        assert_eq!(fnv1a(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
    }
}
