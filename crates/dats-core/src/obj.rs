//! Typed, insertion-ordered DATS records
//!
//! A [`DatsObj`] is one DATS entity: a type tag ("Dataset", "Material",
//! "Annotation", ...) plus an ordered list of named fields. There is no
//! per-entity struct hierarchy; a flat tag and a generic field list match
//! how the entities are actually used (no behavior beyond field names).
//!
//! `DatsObj` is a cheap cloneable handle over shared state, so the same
//! record can sit in the cache and inside its first parent at once. The
//! graph is built single-threaded; handles are not `Send`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{DatsError, Result};
use crate::reference::DatsRef;
use crate::serialize::{self, SerializeOptions};

/// A field value: a scalar, a nested record (embedded by value in the
/// output), a reference pointer, or an ordered sequence of any of these.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Obj(DatsObj),
    Ref(DatsRef),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<DatsObj> for Value {
    fn from(v: DatsObj) -> Self {
        Value::Obj(v)
    }
}

impl From<DatsRef> for Value {
    fn from(v: DatsRef) -> Self {
        Value::Ref(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Vec<DatsObj>> for Value {
    fn from(v: Vec<DatsObj>) -> Self {
        Value::List(v.into_iter().map(Value::Obj).collect())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

#[derive(Debug)]
pub(crate) struct ObjData {
    pub(crate) kind: String,
    pub(crate) fields: Vec<(String, Value)>,
}

/// One DATS entity with a type tag and insertion-ordered named fields.
///
/// Field names are unique within a record; insertion order is preserved and
/// reproduced in serialized output. Records are created with an initial
/// field list and mutated only through [`DatsObj::set`] (used e.g. to attach
/// the final `hasPart` list to a catalogue record after all children exist).
#[derive(Debug, Clone)]
pub struct DatsObj {
    inner: Rc<RefCell<ObjData>>,
}

impl DatsObj {
    /// Create a record from an ordered list of `(name, value)` pairs.
    ///
    /// Fails with [`DatsError::InvalidField`] if a field name appears twice
    /// in the input list.
    pub fn new<K, S, I>(kind: K, fields: I) -> Result<Self>
    where
        K: Into<String>,
        S: Into<String>,
        I: IntoIterator<Item = (S, Value)>,
    {
        let kind = kind.into();
        let mut out: Vec<(String, Value)> = Vec::new();
        for (name, value) in fields {
            let name = name.into();
            if out.iter().any(|(existing, _)| *existing == name) {
                return Err(DatsError::InvalidField { kind, name });
            }
            out.push((name, value));
        }
        Ok(Self {
            inner: Rc::new(RefCell::new(ObjData { kind, fields: out })),
        })
    }

    /// The record's type tag, e.g. `"Dataset"` or `"Material"`.
    pub fn kind(&self) -> String {
        self.inner.borrow().kind.clone()
    }

    /// Look up a field by name. Returns `None` if absent.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.inner
            .borrow()
            .fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.clone())
    }

    /// Set a field: overwrite in place if present, otherwise append.
    ///
    /// Overall insertion order is determined by first insertion, so
    /// overwriting does not move a field.
    pub fn set<V: Into<Value>>(&self, name: &str, value: V) {
        let mut data = self.inner.borrow_mut();
        let value = value.into();
        if let Some(slot) = data.fields.iter_mut().find(|(field, _)| field == name) {
            slot.1 = value;
        } else {
            data.fields.push((name.to_string(), value));
        }
    }

    /// The identifier under which this record can be referenced.
    ///
    /// Extraction rules, in order:
    /// 1. an `identifier` field holding a string;
    /// 2. an `identifier` field holding a nested record (DATS `Identifier`)
    ///    whose own `identifier` field is a string;
    /// 3. a `valueIRI` field holding a string (ontology annotations are
    ///    identified by their term IRI).
    pub fn id(&self) -> Option<String> {
        match self.get("identifier") {
            Some(Value::Str(id)) => return Some(id),
            Some(Value::Obj(identifier)) => {
                if let Some(Value::Str(id)) = identifier.get("identifier") {
                    return Some(id);
                }
            }
            _ => {}
        }
        match self.get("valueIRI") {
            Some(Value::Str(iri)) => Some(iri),
            _ => None,
        }
    }

    /// Whether two handles point at the same underlying record.
    pub fn is_same(&self, other: &DatsObj) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Produce a plain JSON structure for this record and everything it
    /// embeds. Equivalent to what [`crate::serialize`] writes out.
    pub fn to_document(&self, opts: &SerializeOptions) -> Result<serde_json::Value> {
        serialize::obj_document(self, opts)
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&ObjData) -> R) -> R {
        f(&self.inner.borrow())
    }
}
