//! JSON serialization of the record graph
//!
//! Walks a root record depth-first in field-declaration order and produces
//! a JSON document. Scalars pass through, nested records recurse,
//! references emit their compact pointer form, sequences recurse
//! element-wise preserving order. The walk mutates nothing, so serializing
//! the same graph twice yields byte-identical output.
//!
//! The record graph is a DAG by construction; references exist precisely
//! to avoid back-edges. An accidental value cycle (one that does not pass
//! through a reference) is a caller bug and is not detected here.

use crate::error::{DatsError, Result};
use crate::obj::{DatsObj, Value};

/// Key under which a record's type tag is emitted, JSON-LD style.
pub const TYPE_KEY: &str = "@type";

/// Key under which a reference pointer's identifier is emitted.
pub const ID_KEY: &str = "@id";

/// Output options for [`serialize`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SerializeOptions {
    /// Omit the `"@type"` discriminator key from records and pointers.
    pub strip_type_tags: bool,
    /// Multi-line, indented JSON instead of compact.
    pub pretty: bool,
}

/// Serialize a record graph to a JSON string.
pub fn serialize(root: &DatsObj, opts: SerializeOptions) -> Result<String> {
    let doc = obj_document(root, &opts)?;
    let out = if opts.pretty {
        serde_json::to_string_pretty(&doc)
    } else {
        serde_json::to_string(&doc)
    };
    out.map_err(|e| DatsError::Serialization(e.to_string()))
}

pub(crate) fn obj_document(obj: &DatsObj, opts: &SerializeOptions) -> Result<serde_json::Value> {
    obj.read(|data| {
        let mut map = serde_json::Map::with_capacity(data.fields.len() + 1);
        if !opts.strip_type_tags {
            map.insert(
                TYPE_KEY.to_string(),
                serde_json::Value::String(data.kind.clone()),
            );
        }
        for (name, value) in &data.fields {
            map.insert(name.clone(), value_document(value, opts)?);
        }
        Ok(serde_json::Value::Object(map))
    })
}

fn value_document(value: &Value, opts: &SerializeOptions) -> Result<serde_json::Value> {
    match value {
        Value::Null => Ok(serde_json::Value::Null),
        Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
        Value::Int(i) => Ok(serde_json::Value::from(*i)),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .ok_or_else(|| {
                DatsError::Serialization(format!("non-finite number {f} cannot be written as JSON"))
            }),
        Value::Str(s) => Ok(serde_json::Value::String(s.clone())),
        Value::List(items) => items
            .iter()
            .map(|item| value_document(item, opts))
            .collect::<Result<Vec<_>>>()
            .map(serde_json::Value::Array),
        Value::Obj(obj) => obj_document(obj, opts),
        Value::Ref(pointer) => Ok(pointer.to_document(opts)),
    }
}
