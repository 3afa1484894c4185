//! PDF layer: render synthetic contracts and pull text back out of PDFs.

mod contract;
mod error;
mod extract;
mod names;
mod render;
mod templates;

pub use contract::{ContractGenerator, GenerateOptions, folder_name};
pub use error::{GenerateError, PdfError};
pub use extract::{extract_text, extract_text_from_mem};
pub use render::{Block, DocumentBuilder};
