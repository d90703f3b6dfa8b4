//! Shared DATS record builders
//!
//! Small constructors for the entities every converter needs: taxa,
//! annotations, identifiers. Taxa go through the object cache because the
//! same species is attached to many genes and subjects; plain-value
//! annotations carry no identifier and are always built inline.

use anyhow::Result;
use chrono::NaiveDate;
use dats_common::CatalogError;
use dats_core::{DatsObj, ObjCache, Value};

pub const NCBI_TAXON_URL_PREFIX: &str = "https://www.ncbi.nlm.nih.gov/taxonomy/";
pub const OBO_URL_PREFIX: &str = "http://purl.obolibrary.org/obo/";

/// Strip a CURIE prefix from a taxon id ("NCBITaxon:10090" -> "10090").
pub fn numeric_taxon_id(raw: &str) -> &str {
    raw.rsplit(':').next().unwrap_or(raw)
}

fn taxon_name(id: &str) -> Option<&'static str> {
    match id {
        "9606" => Some("Homo sapiens"),
        "10090" => Some("Mus musculus"),
        "10116" => Some("Rattus norvegicus"),
        _ => None,
    }
}

/// The shared `TaxonomicInformation` record for a taxon id, embedded on
/// first use and referenced thereafter.
///
/// Ids outside the supported set (human, mouse, rat) are a fatal
/// conversion error.
pub fn taxon(cache: &mut ObjCache, raw_id: &str) -> Result<Value> {
    let id = numeric_taxon_id(raw_id);
    let name = taxon_name(id)
        .ok_or_else(|| CatalogError::UnknownTaxonomy(raw_id.to_string()))?;

    let key = format!("TaxonomicInformation:{id}");
    let url = format!("{NCBI_TAXON_URL_PREFIX}{id}");
    let value = cache.get_or_create(&key, || {
        DatsObj::new(
            "TaxonomicInformation",
            vec![
                ("name", Value::from(name)),
                ("identifier", identifier_with_source(&url, "NCBI Taxonomy")?.into()),
            ],
        )
    })?;
    Ok(value)
}

/// A plain `Annotation` with a value only.
pub fn annotation(value: &str) -> dats_core::Result<DatsObj> {
    DatsObj::new("Annotation", vec![("value", Value::from(value))])
}

/// An `Annotation` carrying an ontology term IRI.
pub fn annotation_iri(value: &str, iri: &str) -> dats_core::Result<DatsObj> {
    DatsObj::new(
        "Annotation",
        vec![("value", Value::from(value)), ("valueIRI", Value::from(iri))],
    )
}

/// An `Annotation` whose IRI is an OBO term ("SO_0001217" etc.).
pub fn obo_annotation(value: &str, term: &str) -> dats_core::Result<DatsObj> {
    annotation_iri(value, &format!("{OBO_URL_PREFIX}{term}"))
}

/// A DATS `Identifier` record.
pub fn identifier(id: &str) -> dats_core::Result<DatsObj> {
    DatsObj::new("Identifier", vec![("identifier", Value::from(id))])
}

/// A DATS `Identifier` with an `identifierSource`.
pub fn identifier_with_source(id: &str, source: &str) -> dats_core::Result<DatsObj> {
    DatsObj::new(
        "Identifier",
        vec![
            ("identifier", Value::from(id)),
            ("identifierSource", Value::from(source)),
        ],
    )
}

/// An `AlternateIdentifier` record.
pub fn alt_id(id: &str, source: &str) -> dats_core::Result<DatsObj> {
    DatsObj::new(
        "AlternateIdentifier",
        vec![
            ("identifier", Value::from(id)),
            ("identifierSource", Value::from(source)),
        ],
    )
}

/// The role annotations attached to subject/donor materials.
pub fn donor_roles() -> dats_core::Result<Vec<DatsObj>> {
    Ok(vec![annotation("donor")?, annotation("patient")?])
}

/// A DATS `Date` record with a type annotation.
pub fn date_record(date: &str, label: &str) -> dats_core::Result<DatsObj> {
    DatsObj::new(
        "Date",
        vec![
            ("date", Value::from(date)),
            ("type", annotation(label)?.into()),
        ],
    )
}

/// Validate a source date and return it unchanged.
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (AGR
/// `dateAssigned` values are RFC 3339 with a zone offset). Anything else
/// is a fatal parse error rather than a silently propagated sentinel.
pub fn validated_date(raw: &str) -> Result<&str> {
    if chrono::DateTime::parse_from_rfc3339(raw).is_ok() {
        return Ok(raw);
    }
    let day = raw.get(..10).unwrap_or(raw);
    if NaiveDate::parse_from_str(day, "%Y-%m-%d").is_ok() {
        return Ok(raw);
    }
    Err(CatalogError::Parse(format!("unparseable date: {raw}")).into())
}
