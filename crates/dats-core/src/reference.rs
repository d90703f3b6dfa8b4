//! Compact reference pointers
//!
//! A [`DatsRef`] says "this field points at the record identified by this
//! id; do not embed a copy here". It decouples *this entity appears here*
//! from *this entity is defined here*, the same split ID/IDREF pairs make
//! in other document formats. The target is owned by whichever record (or
//! the cache) created it first; a reference never owns anything.

use serde_json::json;

use crate::error::{DatsError, Result};
use crate::obj::DatsObj;
use crate::serialize::{SerializeOptions, ID_KEY, TYPE_KEY};

/// A logical pointer to a previously built [`DatsObj`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatsRef {
    kind: String,
    id: String,
}

impl DatsRef {
    /// Build a reference to an existing record, extracting its identifier
    /// for later resolution.
    ///
    /// Fails with [`DatsError::UnresolvableReference`] if the target record
    /// has no identifier-bearing field (see [`DatsObj::id`]).
    pub fn of(obj: &DatsObj) -> Result<Self> {
        let kind = obj.kind();
        match obj.id() {
            Some(id) => Ok(Self { kind, id }),
            None => Err(DatsError::UnresolvableReference { kind }),
        }
    }

    /// Type tag of the referenced record.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Resolved identifier of the referenced record.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Emit the compact pointer form, never the target's content.
    pub fn to_document(&self, opts: &SerializeOptions) -> serde_json::Value {
        if opts.strip_type_tags {
            json!({ ID_KEY: self.id })
        } else {
            json!({ TYPE_KEY: self.kind, ID_KEY: self.id })
        }
    }
}
