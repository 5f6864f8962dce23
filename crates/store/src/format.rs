//! Document file format

use chrono::{DateTime, Utc};
use doc_model::{AttributeMap, OrderingStrategy};
use serde::{Deserialize, Serialize};

/// File format version
pub const FORMAT_VERSION: u32 = 1;

/// File extension for saved documents
pub const FILE_EXTENSION: &str = "vdj";

/// File header for format identification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileHeader {
    /// Magic string for format identification
    pub magic: String,
    /// Format version
    pub version: u32,
    /// Name of the saved document
    pub document_name: String,
    /// When the file was written
    pub saved_at: DateTime<Utc>,
}

impl FileHeader {
    pub const MAGIC: &'static str = "VECDRAW-DOC";

    pub fn new(document_name: impl Into<String>) -> Self {
        Self {
            magic: Self::MAGIC.to_string(),
            version: FORMAT_VERSION,
            document_name: document_name.into(),
            saved_at: Utc::now(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.magic == Self::MAGIC && self.version <= FORMAT_VERSION
    }
}

/// Complete file format
///
/// `shapes` holds one attribute map per chain member, innermost first, so
/// a decorator map always follows the map of the shape it wraps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFile {
    pub header: FileHeader,
    /// Ordering the shapes were written in
    pub ordering: OrderingStrategy,
    pub shapes: Vec<AttributeMap>,
}
