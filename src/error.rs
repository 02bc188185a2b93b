use thiserror::Error;

/// Reasons a file is refused before it ever reaches the engine.
#[derive(Debug, Error)]
pub enum DocumentLoadError {
    #[error("{name} is not a PDF document")]
    NotPdf { name: String },

    #[error("{name} is empty")]
    Empty { name: String },
}

/// Failures reported by the viewer's extraction capability.
///
/// The engine never hands these to its own callers; they are logged and the
/// affected part of the AI context is left empty.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("viewer is not ready")]
    NotReady,

    #[error("page {page} is out of range (document has {page_count} pages)")]
    PageOutOfRange { page: u32, page_count: u32 },

    #[error("failed to encode page image: {0}")]
    Encode(String),

    #[error("extraction backend failed: {0}")]
    Backend(String),
}

/// Errors that can occur while loading an engine configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
