//! Deduplicating object cache
//!
//! A run-scoped registry keyed by a caller-chosen logical key (convention:
//! `"<Type>:<natural-id>"`, e.g. `"Material:GTEX-1117F"`). The first request
//! for a key constructs the record and hands it back for embedding; every
//! later request for the same key gets a compact reference to the one
//! canonical instance. First write wins: whether an entity is embedded or
//! referenced at a given site is decided by construction order, and
//! downstream DATS consumers are written against that behavior.
//!
//! The cache is passed explicitly to every builder that may need
//! deduplication. There is no eviction; run-scoped metadata graphs are
//! thousands of entities, not unbounded streams.

use std::collections::HashMap;

use tracing::trace;

use crate::error::{DatsError, Result};
use crate::obj::{DatsObj, Value};
use crate::reference::DatsRef;

/// Run-scoped registry of canonical records.
#[derive(Debug, Default)]
pub struct ObjCache {
    objs: HashMap<String, DatsObj>,
    ref_counts: HashMap<String, u64>,
}

impl ObjCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the canonical record for `key`, constructing it on first use.
    ///
    /// If `key` is unregistered, `build` is invoked exactly once; the
    /// record it returns is registered and handed back as [`Value::Obj`]
    /// for the caller to embed. If `key` is already registered, `build` is
    /// not invoked and a [`Value::Ref`] to the canonical record is returned
    /// instead.
    ///
    /// If `build` fails, the key stays unregistered and the failure is
    /// propagated as [`DatsError::CacheBuild`].
    pub fn get_or_create<F>(&mut self, key: &str, build: F) -> Result<Value>
    where
        F: FnOnce() -> Result<DatsObj>,
    {
        if let Some(obj) = self.objs.get(key) {
            let pointer = DatsRef::of(obj)?;
            *self.ref_counts.entry(key.to_string()).or_insert(0) += 1;
            trace!(key, "cache hit, issuing reference");
            return Ok(Value::Ref(pointer));
        }

        let obj = build().map_err(|source| DatsError::CacheBuild {
            key: key.to_string(),
            source: Box::new(source),
        })?;
        trace!(key, kind = %obj.kind(), "cache miss, registered new record");
        self.objs.insert(key.to_string(), obj.clone());
        Ok(Value::Obj(obj))
    }

    /// The canonical record for `key`, if one has been registered.
    pub fn lookup(&self, key: &str) -> Option<DatsObj> {
        self.objs.get(key).cloned()
    }

    /// How many references have been issued for `key` so far.
    pub fn ref_count(&self, key: &str) -> u64 {
        self.ref_counts.get(key).copied().unwrap_or(0)
    }

    /// Number of registered records.
    pub fn len(&self) -> usize {
        self.objs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxon_human() -> Result<DatsObj> {
        DatsObj::new(
            "TaxonomicInformation",
            vec![
                ("name", Value::from("Homo sapiens")),
                (
                    "identifier",
                    DatsObj::new(
                        "Identifier",
                        vec![(
                            "identifier",
                            Value::from("https://www.ncbi.nlm.nih.gov/taxonomy/9606"),
                        )],
                    )?
                    .into(),
                ),
            ],
        )
    }

    #[test]
    fn test_builder_invoked_exactly_once() {
        let mut cache = ObjCache::new();
        let mut calls = 0;

        for _ in 0..3 {
            let builder = || {
                calls += 1;
                taxon_human()
            };
            // re-borrow calls each round
            let value = cache
                .get_or_create("TaxonomicInformation:9606", builder)
                .unwrap();
            drop(value);
        }

        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.ref_count("TaxonomicInformation:9606"), 2);
    }

    #[test]
    fn test_first_call_embeds_later_calls_reference() {
        let mut cache = ObjCache::new();

        let first = cache
            .get_or_create("TaxonomicInformation:9606", taxon_human)
            .unwrap();
        let canonical = match first {
            Value::Obj(obj) => obj,
            other => panic!("first call should embed, got {other:?}"),
        };

        let second = cache
            .get_or_create("TaxonomicInformation:9606", || {
                panic!("builder must not run on a cache hit")
            })
            .unwrap();
        match second {
            Value::Ref(pointer) => {
                assert_eq!(pointer.id(), canonical.id().unwrap());
                assert_eq!(pointer.kind(), "TaxonomicInformation");
            }
            other => panic!("later calls should reference, got {other:?}"),
        }

        // the registered record is the one handed out on first use
        assert!(cache
            .lookup("TaxonomicInformation:9606")
            .unwrap()
            .is_same(&canonical));
    }

    #[test]
    fn test_failed_builder_leaves_key_unregistered() {
        let mut cache = ObjCache::new();

        let err = cache
            .get_or_create("Material:bad", || {
                DatsObj::new(
                    "Material",
                    vec![("name", Value::from("a")), ("name", Value::from("b"))],
                )
            })
            .unwrap_err();
        assert!(matches!(err, DatsError::CacheBuild { ref key, .. } if key == "Material:bad"));
        assert!(cache.lookup("Material:bad").is_none());
        assert!(cache.is_empty());

        // a later, successful builder registers normally
        let value = cache
            .get_or_create("Material:bad", || {
                DatsObj::new(
                    "Material",
                    vec![("identifier", Value::from("GTEX-1117F"))],
                )
            })
            .unwrap();
        assert!(matches!(value, Value::Obj(_)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_keys_are_independent() {
        let mut cache = ObjCache::new();
        cache
            .get_or_create("TaxonomicInformation:9606", taxon_human)
            .unwrap();
        let mouse = cache
            .get_or_create("TaxonomicInformation:10090", || {
                DatsObj::new(
                    "TaxonomicInformation",
                    vec![
                        ("name", Value::from("Mus musculus")),
                        (
                            "identifier",
                            Value::from("https://www.ncbi.nlm.nih.gov/taxonomy/10090"),
                        ),
                    ],
                )
            })
            .unwrap();
        assert!(matches!(mouse, Value::Obj(_)));
        assert_eq!(cache.len(), 2);
    }
}
