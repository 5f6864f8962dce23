//! File I/O operations

use crate::{Result, StoreError};
use doc_model::{Document, OrderingStrategy};
use std::path::Path;

/// Save a document to a file
pub fn save_document(
    document: &Document,
    ordering: OrderingStrategy,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let json = crate::serialize(document, ordering)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;
    tracing::info!("Saved '{}' to {}", document.name(), path.display());
    Ok(())
}

/// Load a document from a file
pub fn load_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(StoreError::FileNotFound(path.display().to_string()));
    }

    let json = std::fs::read_to_string(path)?;
    let document = crate::deserialize(&json)?;
    tracing::info!("Loaded '{}' from {}", document.name(), path.display());
    Ok(document)
}
