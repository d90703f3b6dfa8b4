//! Alliance of Genome Resources conversion
//!
//! Converts a model-organism database's AGR exchange files (BGI gene
//! features, disease and phenotype association JSONs, the orthology TSV)
//! into a DATS `Dataset` whose `isAbout` lists one `MolecularEntity` per
//! gene.

pub mod genes;
pub mod models;
pub mod reader;

use std::fmt;
use std::path::Path;

use anyhow::Result;
use clap::ValueEnum;
use dats_core::{DatsObj, ObjCache, Value};
use tracing::info;

use crate::util;

/// The model-organism databases the AGR files are published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModDb {
    /// Mouse Genome Informatics
    Mgi,
    /// Rat Genome Database
    Rgd,
}

impl ModDb {
    /// The file-name prefix the AGR exports use for this database.
    pub fn prefix(&self) -> &'static str {
        match self {
            ModDb::Mgi => "MGI",
            ModDb::Rgd => "RGD",
        }
    }
}

impl fmt::Display for ModDb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

fn agr_organization() -> dats_core::Result<DatsObj> {
    DatsObj::new(
        "Organization",
        vec![
            ("name", Value::from("Alliance of Genome Resources")),
            ("abbreviation", Value::from("AGR")),
        ],
    )
}

fn gene_dataset(mod_db: ModDb, genes: Vec<DatsObj>) -> Result<DatsObj> {
    let prefix = mod_db.prefix();
    let dataset = DatsObj::new(
        "Dataset",
        vec![
            (
                "identifier",
                util::identifier(&format!("AGR {prefix} genes"))?.into(),
            ),
            (
                "title",
                Value::from(format!(
                    "Alliance of Genome Resources {prefix} gene annotations"
                )),
            ),
            ("creators", Value::from(vec![agr_organization()?])),
            (
                "types",
                Value::from(vec![DatsObj::new(
                    "DataType",
                    vec![("information", util::annotation("gene annotation")?.into())],
                )?]),
            ),
            ("isAbout", Value::from(genes)),
        ],
    )?;
    Ok(dataset)
}

/// Convert one MOD's AGR files from `input_dir` (named `<MOD>_BGI.json`,
/// `<MOD>_disease.json`, `<MOD>_phenotype.json`) plus the orthology TSV.
pub fn convert(
    cache: &mut ObjCache,
    input_dir: &Path,
    mod_db: ModDb,
    ortholog_file: &Path,
) -> Result<DatsObj> {
    let prefix = mod_db.prefix();
    let features = reader::read_bgi(&input_dir.join(format!("{prefix}_BGI.json")))?;
    let diseases = reader::read_disease(&input_dir.join(format!("{prefix}_disease.json")))?;
    let phenotypes = reader::read_phenotype(&input_dir.join(format!("{prefix}_phenotype.json")))?;
    let orthologs = reader::read_orthologs(ortholog_file)?;

    let genes = genes::gene_records(cache, &features, &diseases, &phenotypes, &orthologs)?;
    info!(mod_db = %mod_db, count = genes.len(), "converted AGR genes");

    gene_dataset(mod_db, genes)
}
