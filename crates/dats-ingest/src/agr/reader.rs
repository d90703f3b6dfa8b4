//! AGR file readers

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use dats_common::CatalogError;
use tracing::debug;

use super::models::{
    BgiEntry, BgiFile, DiseaseEntry, DiseaseFile, OrthologRow, PhenotypeEntry, PhenotypeFile,
};

/// Number of provenance lines the Alliance prepends to the orthology
/// export before the header row.
const ORTHOLOGY_PREAMBLE_LINES: usize = 14;

pub fn read_bgi(path: &Path) -> Result<Vec<BgiEntry>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open BGI file: {}", path.display()))?;
    let parsed: BgiFile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Malformed BGI file: {}", path.display()))?;
    debug!(count = parsed.data.len(), path = %path.display(), "read gene features");
    Ok(parsed.data)
}

pub fn read_disease(path: &Path) -> Result<Vec<DiseaseEntry>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open disease file: {}", path.display()))?;
    let parsed: DiseaseFile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Malformed disease file: {}", path.display()))?;
    debug!(count = parsed.data.len(), path = %path.display(), "read disease associations");
    Ok(parsed.data)
}

pub fn read_phenotype(path: &Path) -> Result<Vec<PhenotypeEntry>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open phenotype file: {}", path.display()))?;
    let parsed: PhenotypeFile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Malformed phenotype file: {}", path.display()))?;
    debug!(count = parsed.data.len(), path = %path.display(), "read phenotype associations");
    Ok(parsed.data)
}

/// Read the Alliance orthology TSV, skipping the provenance preamble.
pub fn read_orthologs(path: &Path) -> Result<Vec<OrthologRow>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to open orthology file: {}", path.display()))?;
    let body = text
        .lines()
        .skip(ORTHOLOGY_PREAMBLE_LINES)
        .collect::<Vec<_>>()
        .join("\n");

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record
            .with_context(|| format!("Malformed orthology row in {}", path.display()))?;
        let field = |index: usize, name: &str| -> Result<String> {
            record
                .get(index)
                .map(str::to_string)
                .ok_or_else(|| CatalogError::MissingColumn(name.to_string()).into())
        };
        rows.push(OrthologRow {
            human_gene_id: field(0, "Gene1ID")?,
            human_gene_symbol: field(1, "Gene1Symbol")?,
            human_taxon: field(2, "Gene1SpeciesTaxonID")?,
            mod_gene_id: field(4, "Gene2ID")?,
            mod_taxon: field(6, "Gene2SpeciesTaxonID")?,
        });
    }
    debug!(count = rows.len(), path = %path.display(), "read ortholog pairs");
    Ok(rows)
}
