//! Clause embeddings from a BERT-family encoder exported to ONNX
//! (e.g. legal-bert-base-uncased, 768 dimensions).
//!
//! Each clause becomes the attention-masked mean of `last_hidden_state`.
//! The model directory holds `model.onnx` and `tokenizer.json`.

use std::path::Path;

use anyhow::{Context, anyhow};
use ort::session::Session;
use ort::value::{Tensor, ValueType};
use tokenizers::{Encoding, PaddingParams, Tokenizer, TruncationParams};
use tracing::{debug, info};

use crate::embed::TextEmbedder;
use crate::similarity::normalize;

/// BERT's positional limit.
pub const DEFAULT_MAX_LENGTH: usize = 512;

const FALLBACK_DIM: usize = 768;

pub struct OnnxEmbedder {
    session: Session,
    tokenizer: Tokenizer,
    dim: usize,
    normalize: bool,
}

impl OnnxEmbedder {
    /// Load the encoder in `model_dir`.
    ///
    /// Clauses longer than `max_length` tokens are truncated; a batch is
    /// padded to its longest member. With `normalize` set, pooled vectors
    /// are scaled to unit length.
    pub fn load(model_dir: &Path, max_length: usize, normalize: bool) -> anyhow::Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");
        for required in [&model_path, &tokenizer_path] {
            anyhow::ensure!(required.is_file(), "{} not found", required.display());
        }

        let session = Session::builder()?
            .commit_from_file(&model_path)
            .with_context(|| format!("opening {}", model_path.display()))?;
        let dim = session
            .outputs()
            .first()
            .and_then(|output| hidden_size(output.dtype()))
            .unwrap_or(FALLBACK_DIM);

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| anyhow!("reading tokenizer: {e}"))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length,
                ..Default::default()
            }))
            .map_err(|e| anyhow!("configuring truncation: {e}"))?;
        tokenizer.with_padding(Some(PaddingParams::default()));

        info!(model = %model_path.display(), dim, max_length, normalize, "encoder ready");
        Ok(Self {
            session,
            tokenizer,
            dim,
            normalize,
        })
    }
}

impl TextEmbedder for OnnxEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed_batch(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| anyhow!("tokenizing clauses: {e}"))?;
        let batch = EncodedBatch::new(&encodings);
        debug!(rows = batch.rows, seq_len = batch.seq_len, "encoding batch");

        let shape = [batch.rows as i64, batch.seq_len as i64];
        let outputs = self.session.run(ort::inputs![
            "input_ids" => Tensor::from_array((shape, batch.ids.into_boxed_slice()))?,
            "attention_mask" => Tensor::from_array((shape, batch.mask.clone().into_boxed_slice()))?,
            "token_type_ids" => Tensor::from_array((shape, batch.type_ids.into_boxed_slice()))?,
        ])?;

        let (hidden_shape, hidden) = outputs[0].try_extract_tensor::<f32>()?;
        let dims: &[i64] = hidden_shape;
        anyhow::ensure!(
            matches!(dims, [rows, _, dim] if *rows as usize == batch.rows && *dim as usize == self.dim),
            "encoder returned shape {dims:?} for {} clauses of dimension {}",
            batch.rows,
            self.dim
        );

        let mut vectors = masked_mean(
            hidden,
            &batch.mask,
            batch.rows,
            dims[1] as usize,
            batch.seq_len,
            self.dim,
        );
        if self.normalize {
            vectors.iter_mut().for_each(|v| normalize(v));
        }
        Ok(vectors)
    }
}

/// A padded batch of token ids, attention mask and type ids, each laid out
/// row-major as `[rows, seq_len]`.
struct EncodedBatch {
    rows: usize,
    seq_len: usize,
    ids: Vec<i64>,
    mask: Vec<i64>,
    type_ids: Vec<i64>,
}

impl EncodedBatch {
    fn new(encodings: &[Encoding]) -> Self {
        let rows = encodings.len();
        let seq_len = encodings.iter().map(Encoding::len).max().unwrap_or(0);
        let mut batch = Self {
            rows,
            seq_len,
            ids: Vec::with_capacity(rows * seq_len),
            mask: Vec::with_capacity(rows * seq_len),
            type_ids: Vec::with_capacity(rows * seq_len),
        };
        for encoding in encodings {
            batch.ids.extend(padded(encoding.get_ids(), seq_len));
            batch.mask.extend(padded(encoding.get_attention_mask(), seq_len));
            batch.type_ids.extend(padded(encoding.get_type_ids(), seq_len));
        }
        batch
    }
}

fn padded(values: &[u32], len: usize) -> impl Iterator<Item = i64> + '_ {
    values
        .iter()
        .map(|&v| i64::from(v))
        .chain(std::iter::repeat(0))
        .take(len)
}

/// Average the hidden states of unmasked positions, one vector per row.
///
/// `hidden` is `[rows, hidden_len, dim]` and `mask` is `[rows, mask_len]`,
/// both row-major. Positions beyond either length are ignored; a row with no
/// unmasked positions pools to zeros.
fn masked_mean(
    hidden: &[f32],
    mask: &[i64],
    rows: usize,
    hidden_len: usize,
    mask_len: usize,
    dim: usize,
) -> Vec<Vec<f32>> {
    (0..rows)
        .map(|row| {
            let mut sum = vec![0.0f32; dim];
            let mut weight = 0.0f32;
            for pos in 0..hidden_len.min(mask_len) {
                let m = mask[row * mask_len + pos] as f32;
                if m <= 0.0 {
                    continue;
                }
                let start = (row * hidden_len + pos) * dim;
                for (acc, &h) in sum.iter_mut().zip(&hidden[start..start + dim]) {
                    *acc += h * m;
                }
                weight += m;
            }
            if weight > 0.0 {
                sum.iter_mut().for_each(|v| *v /= weight);
            }
            sum
        })
        .collect()
}

/// Last axis of the first output tensor, when the model declares it.
fn hidden_size(output: &ValueType) -> Option<usize> {
    match output {
        ValueType::Tensor { shape, .. } => shape.last().copied().filter(|&d| d > 0).map(|d| d as usize),
        _ => None,
    }
}
