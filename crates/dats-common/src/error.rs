//! Error types for the conversion layer

use thiserror::Error;

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Failures surfaced by the per-source mapping layer.
///
/// Malformed-input conditions become typed errors that propagate to the
/// top-level run, which logs context and aborts; a partially built
/// catalogue is worse than none. Readers never substitute placeholder
/// sentinels for values they cannot parse.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unrecognized taxonomy id: {0}")]
    UnknownTaxonomy(String),

    #[error("Unrecognized evidence code: {0}")]
    UnknownEvidenceCode(String),

    #[error("Unrecognized sequence ontology term: {0}")]
    UnknownSequenceOntologyTerm(String),

    #[error("Unexpected content at line {line} of dbGaP study table: {content}")]
    StudyTable { line: usize, content: String },

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
