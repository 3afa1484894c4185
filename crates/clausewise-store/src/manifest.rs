//! JSON manifest describing every contract the generator wrote.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use clausewise_core::ContractRecord;
use tracing::info;

use crate::StoreError;

/// File name of the manifest inside the generated tree.
pub const MANIFEST_FILE: &str = "manifest.json";

pub fn write_manifest(path: &Path, contracts: &[ContractRecord]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| StoreError::io(path, e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), contracts)?;
    info!(contracts = contracts.len(), path = %path.display(), "wrote manifest");
    Ok(())
}

pub fn read_manifest(path: &Path) -> Result<Vec<ContractRecord>, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
