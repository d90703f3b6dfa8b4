//! GTEx dbGaP study conversion

use anyhow::Result;
use dats_core::{DatsObj, Value};
use regex::Regex;
use tracing::info;

use crate::dbgap::{self, Study};

pub const GTEX_DESCRIPTION: &str = "GTEx provides a resource with which to study human gene \
expression and regulation and its relationship to genetic variation. It is funded by the NIH \
Common Fund. ";

pub const DBGAP_GTEX_QUERY_URL: &str = "https://www.ncbi.nlm.nih.gov/gap/?term=phs000424";

/// All GTEx studies are catalogued under one title in dbGaP.
const GTEX_DATASET_TITLE: &str =
    "Genotype-Tissue Expression Project (GTEx) WGS and RNA-Seq data";

/// List of GTEx studies cut and pasted from
/// https://www.ncbi.nlm.nih.gov/gap/?term=phs000424
const GTEX_STUDIES_STR: &str = "
phs000424.v7.p2
Genotype-Tissue Expression (GTEx)Versions 1-7: passed embargo
VDAS752Tissue Expression, Reference SetLinks
HiSeq X Ten
";

fn title_re() -> Regex {
    Regex::new(r"^Genotype-Tissue Expression(.*)$").expect("static regex")
}

/// NHGRI, the creator organization attached to GTEx datasets.
pub fn nih_nhgri() -> dats_core::Result<DatsObj> {
    DatsObj::new(
        "Organization",
        vec![
            ("name", Value::from("National Human Genome Research Institute")),
            ("abbreviation", Value::from("NHGRI")),
        ],
    )
}

/// Scrape the embedded GTEx study block.
pub fn dbgap_studies() -> Result<Vec<Study>> {
    dbgap::parse_studies(GTEX_STUDIES_STR, &title_re())
}

fn gtex_data_type(method: DatsObj, information: DatsObj) -> dats_core::Result<DatsObj> {
    DatsObj::new(
        "DataType",
        vec![
            ("information", information.into()),
            ("method", method.into()),
            ("platform", dbgap::illumina_type()?.into()),
        ],
    )
}

/// Build the parent GTEx `Dataset` with one child per dbGaP study.
pub fn convert() -> Result<DatsObj> {
    let studies = dbgap_studies()?;
    info!(count = studies.len(), "found GTEx studies in dbGaP");

    let creator = nih_nhgri()?;
    let mut subsets = Vec::with_capacity(studies.len());
    for study in &studies {
        subsets.push(dbgap::study_dataset(
            study,
            &creator,
            Some(GTEX_DATASET_TITLE),
        )?);
    }

    let types = vec![
        gtex_data_type(dbgap::wgs_assay_type()?, dbgap::dna_sequencing_type()?)?,
        gtex_data_type(
            crate::util::annotation("RNA-seq assay")?,
            crate::util::annotation("transcription profiling")?,
        )?,
    ];

    let parent = dbgap::program_dataset(
        "Genotype-Tissue Expression Project (GTEx)",
        "Genotype-Tissue Expression Project (GTEx)",
        GTEX_DESCRIPTION,
        types,
        creator,
        DBGAP_GTEX_QUERY_URL,
    )?;
    parent.set("hasPart", subsets);
    Ok(parent)
}
