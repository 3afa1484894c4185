//! Storage layer: clause tables as CSV (through Arrow record batches) and the
//! generated-contract manifest as JSON.

mod csv;
mod error;
mod manifest;

pub use csv::{clause_batch, read_clause_csv, write_clause_csv};
pub use error::StoreError;
pub use manifest::{MANIFEST_FILE, read_manifest, write_manifest};
