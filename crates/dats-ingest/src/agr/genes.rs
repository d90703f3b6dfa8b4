//! AGR gene conversion
//!
//! Builds one DATS `MolecularEntity` per gene feature, attaching disease,
//! phenotype, and human-ortholog edges as `RelatedEntity` records. Disease
//! and phenotype associations are grouped per ontology term in first-seen
//! order; evidence codes come from the first association of each group
//! while publications accumulate across the whole group.

use anyhow::Result;
use dats_common::CatalogError;
use dats_core::{DatsObj, ObjCache, Value};

use super::models::{BgiEntry, DiseaseEntry, GenomeLocation, OrthologRow, PhenotypeEntry};
use crate::util;

/// Sequence Ontology terms attached to gene features as role annotations.
fn so_term_name(so_id: &str) -> Result<&'static str> {
    let name = match so_id {
        "SO:0000336" => "Pseudogene",
        "SO:0000374" => "Ribozyme",
        "SO:0000704" => "Gene",
        "SO:0001217" => "Protein Coding Gene",
        "SO:0001263" => "Non-coding RNA Gene",
        "SO:0001265" => "miRNA Gene",
        "SO:0001266" => "scRNA Gene",
        "SO:0001267" => "snoRNA Gene",
        "SO:0001268" => "snRNA Gene",
        "SO:0001269" => "SRP RNA Gene",
        "SO:0001272" => "tRNA Gene",
        "SO:0001500" => "Phenotypic Marker",
        "SO:0001637" => "rRNA Gene",
        "SO:0001639" => "RNase P RNA Gene",
        "SO:0001640" => "RNase MRP RNA Gene",
        "SO:0001641" => "lincRNA Gene",
        "SO:0001643" => "Telomerase RNA Gene",
        "SO:0001841" => "Polymorphic Pseudogene",
        "SO:0001877" => "Long Non-coding RNA",
        "SO:0001904" => "Antisense Transcript",
        "SO:0002132" => "Sense Overlap lncRNA",
        "SO:0002184" => "Sense Intronic lncRNA gene",
        "SO:0002185" => "Bidirectional Promoter lncRNA",
        "SO:3000000" => "Gene Segment",
        _ => return Err(CatalogError::UnknownSequenceOntologyTerm(so_id.to_string()).into()),
    };
    Ok(name)
}

/// ECO terms for the evidence codes the disease files use.
fn evidence_code_term(code: &str) -> Result<&'static str> {
    let term = match code {
        "TAS" => "ECO_0000304",
        "DOA" => "ECO_000000",
        "IAGP" => "ECO_0005613",
        "IDA" => "ECO_0000314",
        "IEP" => "ECO_0000270",
        "IGI" => "ECO_0000316",
        "IMP" => "ECO_0000315",
        _ => return Err(CatalogError::UnknownEvidenceCode(code.to_string()).into()),
    };
    Ok(term)
}

fn so_role(so_id: &str) -> Result<DatsObj> {
    let name = so_term_name(so_id)?;
    let number = so_id.strip_prefix("SO:").unwrap_or(so_id);
    Ok(util::obo_annotation(name, &format!("SO_{number}"))?)
}

fn pubmed_publication(id: &str) -> dats_core::Result<DatsObj> {
    DatsObj::new(
        "Publication",
        vec![(
            "identifier",
            util::identifier_with_source(id, "PubMed")?.into(),
        )],
    )
}

/// A MOD publication; its source is the id's registry prefix ("MGI",
/// "RGD").
fn mod_publication(id: &str) -> dats_core::Result<DatsObj> {
    let source = id.get(..3).unwrap_or(id);
    DatsObj::new(
        "Publication",
        vec![(
            "identifier",
            util::identifier_with_source(id, source)?.into(),
        )],
    )
}

fn genome_location_record(loc: &GenomeLocation) -> dats_core::Result<DatsObj> {
    let mut fields = vec![
        ("assembly", Value::from(loc.assembly.as_str())),
        ("chromosome", Value::from(loc.chromosome.as_str())),
    ];
    if let Some(start) = loc.start_position {
        fields.push(("startPosition", Value::from(start)));
    }
    if let Some(end) = loc.end_position {
        fields.push(("endPosition", Value::from(end)));
    }
    if let Some(strand) = loc.strand.as_deref() {
        fields.push(("strand", Value::from(strand)));
    }
    DatsObj::new("GenomeLocation", fields)
}

fn alternate_identifiers(entry: &BgiEntry) -> Result<Vec<DatsObj>> {
    let mut alt_ids = Vec::new();
    if let Some(cross_refs) = &entry.cross_reference_ids {
        for cross_ref in cross_refs {
            let (source, id) = cross_ref.split_once(':').ok_or_else(|| {
                CatalogError::Parse(format!("malformed cross reference id: {cross_ref}"))
            })?;
            alt_ids.push(util::alt_id(id, source)?);
        }
    }
    Ok(alt_ids)
}

/// Collect the distinct values `key` produces, in first-seen order.
fn distinct_in_order<'a, T>(items: &[&'a T], key: impl Fn(&T) -> &str) -> Vec<&'a str>
where
    T: 'a,
{
    let mut seen = Vec::new();
    for item in items {
        let value = key(*item);
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

fn disease_edges(primary_id: &str, diseases: &[DiseaseEntry]) -> Result<Vec<DatsObj>> {
    let gene_diseases: Vec<&DiseaseEntry> = diseases
        .iter()
        .filter(|d| d.object_id == primary_id)
        .collect();

    let mut edges = Vec::new();
    for do_id in distinct_in_order(&gene_diseases, |d| &d.do_id) {
        let group: Vec<&&DiseaseEntry> =
            gene_diseases.iter().filter(|d| d.do_id == do_id).collect();
        let first = group[0];

        let number = do_id.strip_prefix("DOID:").unwrap_or(do_id);
        let disease_term = util::obo_annotation(do_id, &format!("DOID_{number}"))?;

        // evidence codes from the group's first association
        let mut evidence = Vec::new();
        for code in &first.evidence.evidence_codes {
            evidence.push(Value::from(util::obo_annotation(
                code,
                evidence_code_term(code)?,
            )?));
        }

        let mut publications = Vec::new();
        for d in &group {
            if let Some(pubmed_id) = d.evidence.publication.pub_med_id.as_deref() {
                if !pubmed_id.is_empty() {
                    publications.push(Value::from(pubmed_publication(pubmed_id)?));
                }
            }
        }
        for d in &group {
            if let Some(mod_pub_id) = d.evidence.publication.mod_publication_id.as_deref() {
                publications.push(Value::from(mod_publication(mod_pub_id)?));
            }
        }

        let relation_evidence = DatsObj::new(
            "RelationEvidence",
            vec![
                ("evidenceCodes", Value::List(evidence)),
                ("publications", Value::List(publications)),
                (
                    "dateEstablished",
                    util::date_record(util::validated_date(&first.date_assigned)?, "Date Assigned")?
                        .into(),
                ),
            ],
        )?;

        edges.push(DatsObj::new(
            "RelatedEntity",
            vec![
                ("object", disease_term.into()),
                ("relation", util::obo_annotation("Disease", "DOID_4")?.into()),
                (
                    "resultingFrom",
                    DatsObj::new(
                        "Activity",
                        vec![(
                            "name",
                            Value::from(first.object_relation.association_type.as_str()),
                        )],
                    )?
                    .into(),
                ),
                ("relationEvidence", relation_evidence.into()),
            ],
        )?);
    }
    Ok(edges)
}

fn phenotype_edges(primary_id: &str, phenotypes: &[PhenotypeEntry]) -> Result<Vec<DatsObj>> {
    let gene_phenotypes: Vec<&PhenotypeEntry> = phenotypes
        .iter()
        .filter(|p| p.object_id == primary_id && !p.phenotype_term_identifiers.is_empty())
        .collect();

    let mut edges = Vec::new();
    for term_id in distinct_in_order(&gene_phenotypes, |p| {
        &p.phenotype_term_identifiers[0].term_id
    }) {
        let group: Vec<&&PhenotypeEntry> = gene_phenotypes
            .iter()
            .filter(|p| p.phenotype_term_identifiers[0].term_id == term_id)
            .collect();
        let first = group[0];

        let number = term_id.strip_prefix("MP:").unwrap_or(term_id);
        let phenotype_term = util::obo_annotation(term_id, &format!("MP_{number}"))?;

        let mut publications = Vec::new();
        for p in &group {
            if let Some(pubmed_id) = p.evidence.pub_med_id.as_deref() {
                if !pubmed_id.is_empty() {
                    publications.push(Value::from(pubmed_publication(pubmed_id)?));
                }
            }
        }
        for p in &group {
            if let Some(mod_pub_id) = p.evidence.mod_publication_id.as_deref() {
                publications.push(Value::from(mod_publication(mod_pub_id)?));
            }
        }

        let relation_evidence = DatsObj::new(
            "RelationEvidence",
            vec![
                ("publications", Value::List(publications)),
                (
                    "dateEstablished",
                    util::date_record(util::validated_date(&first.date_assigned)?, "Date Assigned")?
                        .into(),
                ),
            ],
        )?;

        edges.push(DatsObj::new(
            "RelatedEntity",
            vec![
                ("object", phenotype_term.into()),
                (
                    "relation",
                    util::obo_annotation("Phenotype", "OGMS_0000023")?.into(),
                ),
                ("relationEvidence", relation_evidence.into()),
            ],
        )?);
    }
    Ok(edges)
}

fn ortholog_edges(
    cache: &mut ObjCache,
    primary_id: &str,
    orthologs: &[OrthologRow],
) -> Result<Vec<DatsObj>> {
    let mut edges = Vec::new();
    for row in orthologs.iter().filter(|o| o.mod_gene_id == primary_id) {
        // the Gene1 side of the export must be the human gene
        if util::numeric_taxon_id(&row.human_taxon) != "9606" {
            return Err(CatalogError::UnknownTaxonomy(row.human_taxon.clone()).into());
        }
        let taxon = util::taxon(cache, &row.human_taxon)?;

        let ortholog = DatsObj::new(
            "MolecularEntity",
            vec![
                (
                    "identifier",
                    util::identifier(&row.human_gene_id)?.into(),
                ),
                ("name", Value::from(row.human_gene_id.as_str())),
                ("taxonomy", Value::List(vec![taxon])),
                (
                    "alternateIdentifiers",
                    Value::from(vec![util::alt_id(&row.human_gene_symbol, "Gene Symbol")?]),
                ),
            ],
        )?;

        edges.push(DatsObj::new(
            "RelatedEntity",
            vec![
                ("object", ortholog.into()),
                (
                    "relation",
                    util::obo_annotation("Orthology", "HOM_0000017")?.into(),
                ),
            ],
        )?);
    }
    Ok(edges)
}

/// Build one `MolecularEntity` per gene feature.
pub fn gene_records(
    cache: &mut ObjCache,
    features: &[BgiEntry],
    diseases: &[DiseaseEntry],
    phenotypes: &[PhenotypeEntry],
    orthologs: &[OrthologRow],
) -> Result<Vec<DatsObj>> {
    let mut genes = Vec::with_capacity(features.len());
    for entry in features {
        // gene features must belong to a model organism (mouse or rat)
        let taxon_number = util::numeric_taxon_id(&entry.taxon_id);
        if taxon_number != "10090" && taxon_number != "10116" {
            return Err(CatalogError::UnknownTaxonomy(entry.taxon_id.clone()).into());
        }
        let taxon = util::taxon(cache, &entry.taxon_id)?;

        let mut related: Vec<DatsObj> = disease_edges(&entry.primary_id, diseases)?;
        related.extend(phenotype_edges(&entry.primary_id, phenotypes)?);
        related.extend(ortholog_edges(cache, &entry.primary_id, orthologs)?);

        let mut fields = vec![
            (
                "identifier",
                Value::from(util::identifier(&entry.primary_id)?),
            ),
            ("name", Value::from(entry.primary_id.as_str())),
        ];
        if let Some(synopsis) = entry.gene_synopsis.as_deref() {
            fields.push(("description", Value::from(synopsis)));
        }
        fields.push((
            "roles",
            Value::from(vec![so_role(&entry.so_term_id)?]),
        ));
        fields.push(("taxonomy", Value::List(vec![taxon])));
        if let Some(locations) = &entry.genome_locations {
            let mut records = Vec::with_capacity(locations.len());
            for loc in locations {
                records.push(genome_location_record(loc)?);
            }
            fields.push(("genomeLocations", Value::from(records)));
        }
        fields.push((
            "alternateIdentifiers",
            Value::from(alternate_identifiers(entry)?),
        ));
        fields.push(("relatedEntities", Value::from(related)));

        genes.push(DatsObj::new("MolecularEntity", fields)?);
    }
    Ok(genes)
}
