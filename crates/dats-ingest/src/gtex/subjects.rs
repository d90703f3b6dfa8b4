//! GTEx subject/donor materials
//!
//! Builds one DATS `Material` per subject from the GTEx portal phenotype
//! table. Subject characteristics are `Dimension`s whose identifiers are
//! `@id` references to the shared study-variable dimensions, so every
//! subject points at the one canonical definition of SEX/AGE/DTHHRDY.
//! Materials are registered in the cache under `Material:<SUBJID>`; any
//! later mention of the same subject resolves to a reference.

use std::path::Path;

use anyhow::{Context, Result};
use dats_common::CatalogError;
use dats_core::{DatsObj, DatsRef, ObjCache, Value};
use serde::Deserialize;
use tracing::info;

use crate::util;

/// One row of the GTEx subject phenotype TSV.
///
/// `DBGAP_URL` is filled in from the GTEx GitHub id dump when available
/// and takes precedence over the bare subject id as the identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectRow {
    #[serde(rename = "SUBJID")]
    pub subjid: String,
    #[serde(rename = "SEX")]
    pub sex: String,
    #[serde(rename = "AGE")]
    pub age: String,
    #[serde(rename = "DTHHRDY")]
    pub hardy_scale: String,
    #[serde(rename = "DBGAP_URL", default)]
    pub dbgap_url: Option<String>,
}

/// Decode the 1/2 sex coding used by the phenotype table.
fn sex_label(code: &str) -> Result<&'static str> {
    match code.trim() {
        "1" => Ok("male"),
        "2" => Ok("female"),
        other => Err(CatalogError::Parse(format!("unrecognized SEX code: {other}")).into()),
    }
}

/// The shared study-variable dimensions subjects point back at.
pub struct StudyVariables {
    pub sex: DatsObj,
    pub age: DatsObj,
    pub hardy_scale: DatsObj,
}

fn variable_dimension(name: &str, description: &str, accession: &str) -> Result<DatsObj> {
    let dim = DatsObj::new(
        "Dimension",
        vec![
            ("name", util::annotation(name)?.into()),
            ("description", Value::from(description)),
            (
                "identifier",
                util::identifier_with_source(accession, "dbGaP")?.into(),
            ),
        ],
    )?;
    Ok(dim)
}

impl StudyVariables {
    /// The "all subjects" consent-group versions of the dbGaP variables.
    pub fn new() -> Result<Self> {
        Ok(Self {
            sex: variable_dimension("Gender", "Gender of the subject", "phv00169062")?,
            age: variable_dimension("Age range", "Age range of the subject", "phv00169063")?,
            hardy_scale: variable_dimension(
                "Hardy scale",
                "Hardy scale death classification for the subject",
                "phv00169064",
            )?,
        })
    }

    /// An `@id` reference to a variable dimension's `Identifier` record.
    fn id_ref(dim: &DatsObj) -> Result<Value> {
        match dim.get("identifier") {
            Some(Value::Obj(identifier)) => Ok(Value::Ref(DatsRef::of(&identifier)?)),
            _ => Err(CatalogError::Parse(
                "study variable dimension has no identifier record".to_string(),
            )
            .into()),
        }
    }
}

/// Read the subject phenotype TSV.
pub fn read_subject_phenotypes(path: &Path) -> Result<Vec<SubjectRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("Failed to open subject phenotype file: {}", path.display()))?;

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        let row: SubjectRow =
            row.with_context(|| format!("Malformed subject phenotype row in {}", path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Produce the DATS `Material` for a single subject/donor.
///
/// The first request for a subject embeds the material; later requests
/// yield a reference to the same record.
pub fn subject_material(
    cache: &mut ObjCache,
    vars: &StudyVariables,
    row: &SubjectRow,
) -> Result<Value> {
    let subj_id = &row.subjid;

    let characteristics = vec![
        DatsObj::new(
            "Dimension",
            vec![
                ("name", util::annotation("Gender")?.into()),
                ("description", Value::from("Gender of the subject")),
                ("identifier", StudyVariables::id_ref(&vars.sex)?),
                (
                    "values",
                    Value::List(vec![Value::from(sex_label(&row.sex)?)]),
                ),
            ],
        )?,
        DatsObj::new(
            "Dimension",
            vec![
                ("name", util::annotation("Age range")?.into()),
                ("description", Value::from("Age range of the subject")),
                ("identifier", StudyVariables::id_ref(&vars.age)?),
                ("values", Value::List(vec![Value::from(row.age.as_str())])),
            ],
        )?,
        DatsObj::new(
            "Dimension",
            vec![
                ("name", util::annotation("Hardy scale")?.into()),
                (
                    "description",
                    Value::from("Hardy scale death classification for the subject"),
                ),
                ("identifier", StudyVariables::id_ref(&vars.hardy_scale)?),
                (
                    "values",
                    Value::List(vec![Value::from(row.hardy_scale.as_str())]),
                ),
            ],
        )?,
    ];

    // use the URI from the GTEx id dump when present
    let identifier = match row.dbgap_url.as_deref() {
        Some(url) if !url.is_empty() => url,
        _ => subj_id.as_str(),
    };

    let material = DatsObj::new(
        "Material",
        vec![
            ("name", Value::from(subj_id.as_str())),
            ("identifier", util::identifier(identifier)?.into()),
            (
                "description",
                Value::from(format!("GTEx subject {subj_id}")),
            ),
            ("characteristics", Value::from(characteristics)),
            ("taxonomy", Value::List(vec![util::taxon(cache, "9606")?])),
            ("roles", Value::from(util::donor_roles()?)),
        ],
    )?;

    let key = format!("Material:{subj_id}");
    let value = cache.get_or_create(&key, move || Ok(material))?;
    Ok(value)
}

/// Build the subject phenotype `Dataset`: the shared variable dimensions
/// plus one `Material` per subject row.
pub fn convert(cache: &mut ObjCache, phenotype_path: &Path) -> Result<DatsObj> {
    let rows = read_subject_phenotypes(phenotype_path)?;
    let vars = StudyVariables::new()?;

    let mut materials = Vec::with_capacity(rows.len());
    for row in &rows {
        materials.push(subject_material(cache, &vars, row)?);
    }
    info!(count = materials.len(), "converted GTEx subjects");

    let dataset = DatsObj::new(
        "Dataset",
        vec![
            (
                "identifier",
                util::identifier("GTEx subject phenotypes")?.into(),
            ),
            ("title", Value::from("GTEx subject phenotypes")),
            (
                "dimensions",
                Value::from(vec![vars.sex, vars.age, vars.hardy_scale]),
            ),
            ("isAbout", Value::List(materials)),
        ],
    )?;
    Ok(dataset)
}
