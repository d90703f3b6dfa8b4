//! DATS Core Library
//!
//! The typed object model behind the DATS conversion tools: a generic,
//! insertion-ordered record type ([`DatsObj`]), compact reference pointers
//! ([`DatsRef`]), a run-scoped deduplicating object cache ([`ObjCache`]) and
//! a JSON serializer ([`serialize`]).
//!
//! A conversion run builds a DAG of records, consulting the cache for any
//! entity that may be shared across parents (taxa, subjects, publications),
//! then serializes the root record to a single JSON document. References
//! exist so a shared entity is embedded once, at its first use, and rendered
//! as a compact pointer everywhere else.
//!
//! # Example
//!
//! ```
//! use dats_core::{DatsObj, ObjCache, SerializeOptions, Value};
//!
//! fn main() -> dats_core::Result<()> {
//!     let mut cache = ObjCache::new();
//!     let taxon = cache.get_or_create("TaxonomicInformation:9606", || {
//!         DatsObj::new(
//!             "TaxonomicInformation",
//!             vec![
//!                 ("name", Value::from("Homo sapiens")),
//!                 (
//!                     "identifier",
//!                     DatsObj::new(
//!                         "Identifier",
//!                         vec![("identifier", Value::from("ncbitax:9606"))],
//!                     )?
//!                     .into(),
//!                 ),
//!             ],
//!         )
//!     })?;
//!
//!     let subject = DatsObj::new(
//!         "Material",
//!         vec![("name", Value::from("GTEX-1117F")), ("taxonomy", Value::List(vec![taxon]))],
//!     )?;
//!
//!     let json = dats_core::serialize(&subject, SerializeOptions::default())?;
//!     assert!(json.contains("Homo sapiens"));
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod error;
pub mod obj;
pub mod reference;
pub mod serialize;

// Re-export commonly used types
pub use cache::ObjCache;
pub use error::{DatsError, Result};
pub use obj::{DatsObj, Value};
pub use reference::DatsRef;
pub use serialize::{serialize, SerializeOptions, ID_KEY, TYPE_KEY};
