//! AGR file models
//!
//! Serde views of the Alliance of Genome Resources exchange files: the
//! BGI (Basic Gene Information) JSON, the disease and phenotype
//! association JSONs, and the tab-separated orthology export. Only the
//! fields the conversion consumes are modelled; everything else in the
//! files is ignored during deserialization.

use serde::Deserialize;

/// Top-level wrapper shared by the AGR JSON files.
#[derive(Debug, Deserialize)]
pub struct BgiFile {
    pub data: Vec<BgiEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BgiEntry {
    pub primary_id: String,
    pub so_term_id: String,
    pub symbol: String,
    pub taxon_id: String,
    #[serde(default)]
    pub cross_reference_ids: Option<Vec<String>>,
    #[serde(default)]
    pub gene_synopsis: Option<String>,
    #[serde(default)]
    pub genome_locations: Option<Vec<GenomeLocation>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenomeLocation {
    pub assembly: String,
    pub chromosome: String,
    #[serde(default)]
    pub start_position: Option<i64>,
    #[serde(default)]
    pub end_position: Option<i64>,
    #[serde(default)]
    pub strand: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DiseaseFile {
    pub data: Vec<DiseaseEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseEntry {
    pub object_id: String,
    #[serde(rename = "DOid")]
    pub do_id: String,
    pub data_provider: String,
    pub date_assigned: String,
    pub object_relation: ObjectRelation,
    pub evidence: DiseaseEvidence,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRelation {
    pub association_type: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseEvidence {
    pub evidence_codes: Vec<String>,
    pub publication: Publication,
}

/// Publication pointers, each optional in the source files.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    #[serde(default)]
    pub pub_med_id: Option<String>,
    #[serde(default)]
    pub mod_publication_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PhenotypeFile {
    pub data: Vec<PhenotypeEntry>,
}

/// One phenotype association. MGI and RGD exports carry exactly one
/// term id per record; only the first is used.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhenotypeEntry {
    pub object_id: String,
    pub date_assigned: String,
    pub phenotype_statement: String,
    pub evidence: Publication,
    #[serde(default)]
    pub phenotype_term_identifiers: Vec<TermId>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermId {
    pub term_id: String,
}

/// One row of the orthology TSV, keyed by the columns the conversion
/// needs (human gene on the Gene1 side, MOD gene on the Gene2 side).
#[derive(Debug, Clone)]
pub struct OrthologRow {
    pub human_gene_id: String,
    pub human_gene_symbol: String,
    pub human_taxon: String,
    pub mod_gene_id: String,
    pub mod_taxon: String,
}
