//! Inference and numeric layer: clause embeddings, cosine similarity,
//! PCA projection, and ROC / precision-recall evaluation.

mod embed;
mod error;
pub mod evaluation;
pub mod pca;
pub mod similarity;

#[cfg(feature = "onnx")]
mod embedder;
#[cfg(feature = "onnx")]
pub use embedder::{DEFAULT_MAX_LENGTH, OnnxEmbedder};

pub use embed::{HashingEmbedder, TextEmbedder};
pub use error::EvalError;
pub use evaluation::{EvaluationSet, PrCurve, RocCurve, precision_recall_curve, prepare_evaluation, roc_curve};
pub use pca::pca_2d;
pub use similarity::{cosine_similarity, normalize, similarity_matrix};
