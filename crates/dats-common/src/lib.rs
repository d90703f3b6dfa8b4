//! DATS Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling and logging for the DATS conversion workspace.
//!
//! # Overview
//!
//! - **Error Handling**: the [`CatalogError`] taxonomy surfaced by the
//!   per-source conversion layer
//! - **Logging**: centralized `tracing` subscriber initialization

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{CatalogError, Result};
