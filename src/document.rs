use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DocumentLoadError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Identity of one loaded document. A new id is minted on every load, even
/// when the same file is opened twice, so results tagged with an old id are
/// recognisably stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A file the user picked or dropped, before validation.
#[derive(Debug, Clone)]
pub struct DocumentSource {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl DocumentSource {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Accept only real PDF content. The file name is not trusted.
    pub fn validate(&self) -> Result<(), DocumentLoadError> {
        if self.bytes.is_empty() {
            return Err(DocumentLoadError::Empty {
                name: self.name.clone(),
            });
        }
        if !self.bytes.starts_with(PDF_MAGIC) {
            return Err(DocumentLoadError::NotPdf {
                name: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// The document the engine is currently editing.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
    pub size_bytes: usize,
}

impl Document {
    pub(crate) fn from_source(source: &DocumentSource) -> Self {
        Self {
            id: DocumentId::new(),
            name: source.name.clone(),
            size_bytes: source.bytes.len(),
        }
    }
}
