//! Error types for the DATS object model

use thiserror::Error;

/// Result type alias for DATS object model operations
pub type Result<T> = std::result::Result<T, DatsError>;

/// Main error type for the DATS object model
///
/// Every variant is unrecoverable at the point it occurs: a run either
/// produces a complete, internally consistent document or aborts. Callers
/// are expected to add context (source file, entity id) and stop rather
/// than emit partial output.
#[derive(Error, Debug)]
pub enum DatsError {
    #[error("duplicate field {name:?} in {kind} record")]
    InvalidField { kind: String, name: String },

    #[error("cannot reference {kind} record: no identifier field to resolve")]
    UnresolvableReference { kind: String },

    #[error("builder for cache key {key:?} failed")]
    CacheBuild {
        key: String,
        #[source]
        source: Box<DatsError>,
    },

    #[error("serialization failed: {0}")]
    Serialization(String),
}
