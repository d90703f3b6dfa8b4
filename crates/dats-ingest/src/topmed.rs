//! TOPMed dbGaP study conversion
//!
//! Converts the pasted TOPMed dbGaP study listing into a parent program
//! `Dataset` whose `hasPart` holds one `Dataset` per study, optionally
//! filtered to a caller-supplied accession list.

use anyhow::Result;
use dats_core::{DatsObj, Value};
use regex::Regex;
use tracing::info;

use crate::dbgap::{self, Study};

pub const TOPMED_DESCRIPTION: &str = "TOPMed generates scientific resources related to heart, \
lung, blood, and sleep disorders (HLBS). It is sponsored by the NIH NHLBI and is part of a \
broader Precision Medicine Initiative.";

pub const DBGAP_TOPMED_QUERY_URL: &str =
    "https://www.ncbi.nlm.nih.gov/gap/?term=topmed";

/// List of TOPMed studies cut and pasted from
/// https://www.ncbi.nlm.nih.gov/gap/?term=topmed + more
const TOPMED_STUDIES_STR: &str = "
phs000946.v3.p1
NHLBI TOPMed: Boston Early-Onset COPD Study in the TOPMed ProgramVersions 1-2: passed embargo
Version 3: 2018-05-18
VDAS80Pedigree Whole Genome SequencingLinks
HiSeq X Ten
phs001024.v3.p1
NHLBI TOPMed: Partners HealthCare BiobankVersions 1-2: passed embargo
Version 3: 2018-05-18
VDAS128Case SetLinks
HiSeq X Ten
phs000964.v3.p1
NHLBI TOPMed: The Jackson Heart StudyVersions 1-2: passed embargo
Version 3: 2018-05-18
VDAS3596Longitudinal CohortLinks
HiSeq X Ten
phs000956.v3.p1
NHLBI TOPMed: Genetics of Cardiometabolic Health in the AmishVersions 1-2: passed embargo
Version 3: 2018-05-17
VDAS1123FamilyLinks
HiSeq X Ten
phs000954.v2.p1
NHLBI TOPMed: The Cleveland Family Study (WGS)Versions 1-2: passed embargo
VDAS994LongitudinalLinks
HiSeq X Ten
phs000921.v3.p1
NHLBI TOPMed: Study of African Americans, Asthma, Genes and Environment (SAGE) StudyVersions 1-3: passed embargo
VDAS2106Case SetLinks
HiSeq X Ten
phs001040.v3.p1
NHLBI TOPMed: Novel Risk Factors for the Development of Atrial Fibrillation in WomenVersions 1-2: passed embargo
VDAS118Case SetLinks
HiSeq X Ten
phs000993.v2.p2
NHLBI TOPMed: Heart and Vascular Health Study (HVH)Versions 1-2: passed embargo
VDAS709Case SetLinks
HiSeq X Ten
phs000997.v3.p2
NHLBI TOPMed: The Vanderbilt AF Ablation RegistryVersions 1-3: passed embargo
VDAS173Case SetLinks
HiSeq X Ten
phs001032.v3.p2
NHLBI TOPMed: The Vanderbilt Atrial Fibrillation RegistryVersions 1-3: passed embargo
VDAS1134Case SetLinks
HiSeq X Ten
phs001062.v3.p2
NHLBI TOPMed: MGH Atrial Fibrillation StudyVersions 1-2: passed embargo
VDAS999Case SetLinks
HiSeq X Ten
phs000920.v2.p2
NHLBI TOPMed: Genes-environments and Admixture in Latino Asthmatics (GALA II) StudyVersions 1-2: passed embargo
VDAS999Case SetLinks
HiSeq X Ten
phs000974.v3.p2
NHLBI TOPMed: Whole Genome Sequencing and Related Phenotypes in the Framingham Heart StudyVersions 1-3: passed embargo
VDAS4154CohortLinks
HiSeq X Ten
phs000951.v2.p2
NHLBI TOPMed: Genetic Epidemiology of COPD (COPDGene) in the TOPMed ProgramVersions 1-2: passed embargo
VDAS10229Case-ControlLinks
HiSeq X Ten
phs000988.v2.p1
NHLBI TOPMed: The Genetic Epidemiology of Asthma in Costa RicaVersions 1-2: passed embargo
VDAS1533Parent-Offspring TriosLinks
HiSeq X Ten
phs000972.v2.p1
NHLBI TOPMed: Genome-wide Association Study of Adiposity in SamoansVersions 1-2: passed embargo
VDAS1332Cross-Sectional, PopulationLinks
HiSeq X Ten
phs001211.v1.p1
NHLBI TOPMed: Trans-Omics for Precision Medicine Whole Genome Sequencing Project: ARICVersion 1: passed embargo
VDAS4230Case-ControlLinks
HiSeq X Ten
phs001189.v1.p1
NHLBI TOPMed: Cleveland Clinic Atrial Fibrillation StudyVersion 1: passed embargo
VDAS362Case SetLinks
HiSeq X Ten
phs001143.v1.p1
NHLBI TOPMed: The Genetics and Epidemiology of Asthma in BarbadosVersion 1: passed embargo
VDAS1527FamilyLinks
HiSeq 2000
phs001368.v1.p1
NHLBI TOPMed: Cardiovascular Health StudyVersion 1: passed embargo
VDAS3622LongitudinalLinks
HiSeq X Ten
phs000007.v29.p10
NHLBI TOPMed: Framingham CohortVersions 1-29: passed embargo
VDAS15172LongitudinalLinks
HiSeq X Ten
phs000209.v13.p3
NHLBI TOPMed: Multi-Ethnic Study of Atherosclerosis (MESA) CohortVersions 1-13: passed embargo
VDAS8296Longitudinal, FamilyLinks
HiSeq X Ten
phs000284.v1.p1
NHLBI TOPMed: Cleveland Family Study (CFS) Candidate Gene Association Resource (CARe)Version 1: passed embargo
VDAS1473LongitudinalLinks
HiSeq X Ten
phs000285.v3.p2
NHLBI TOPMed: CARDIA CohortVersions 1-3: passed embargo
VDAS3622LongitudinalLinks
HiSeq X Ten
phs000286.v5.p1
NHLBI TOPMed: Jackson Heart Study (JHS) CohortVersions 1-5: passed embargo
VDAS3602CohortLinks
HiSeq X Ten
phs000287.v6.p1
NHLBI TOPMed: Cardiovascular Health Study (CHS) CohortVersions 1-6: passed embargo
VDAS5609LongitudinalLinks
HiSeq X Ten
phs001013.v3.p2
NHLBI TOPMed: Heart and Vascular Health Study (HVH)Versions 1-3: passed embargo
VDAS1204Case-ControlLinks
HiSeq X Ten
phs000200.v11.p3
NHLBI TOPMed: Women's Health InitiativeVersions 1-11: passed embargo
VDAS143213Partial Factorial Randomized, Double-Blind, Placebo-Controlled, Cohort, LongitudinalLinks
HiSeq X Ten
phs000280.v4.p1
NHLBI TOPMed: Atherosclerosis Risk in Communities (ARIC) CohortVersions 1-4: passed embargo
VDAS15676Longitudinal, CohortLinks
HiSeq X Ten
phs000179.v5.p2
NHLBI TOPMed: Genetic Epidemiology of COPD (COPDGene)Versions 1-5: passed embargo
VDAS10371Case-ControlLinks
HiSeq X Ten
";

fn title_re() -> Regex {
    Regex::new(r"^NHLBI TOPMed: (.*)$").expect("static regex")
}

/// NHLBI, the sponsoring organization of TOPMed.
pub fn nih_nhlbi() -> dats_core::Result<DatsObj> {
    DatsObj::new(
        "Organization",
        vec![
            (
                "name",
                Value::from(
                    "The National Institute of Health's National Heart, Lung and Blood Institute",
                ),
            ),
            ("abbreviation", Value::from("NHLBI")),
        ],
    )
}

/// Scrape the embedded study block, keeping `accessions` (all studies when
/// the list is empty) in the order the caller supplied them.
pub fn dbgap_studies(accessions: &[String]) -> Result<Vec<Study>> {
    let studies = dbgap::parse_studies(TOPMED_STUDIES_STR, &title_re())?;
    if accessions.is_empty() {
        return Ok(studies);
    }
    let filtered: Vec<Study> = accessions
        .iter()
        .filter_map(|acc| studies.iter().find(|s| s.accession == *acc).cloned())
        .collect();
    Ok(filtered)
}

/// Build the parent TOPMed `Dataset` with one child per selected study.
pub fn convert(accessions: &[String]) -> Result<DatsObj> {
    let studies = dbgap_studies(accessions)?;
    info!(count = studies.len(), "found TOPMed studies in dbGaP");

    let creator = nih_nhlbi()?;
    let mut subsets = Vec::with_capacity(studies.len());
    for study in &studies {
        subsets.push(dbgap::study_dataset(study, &creator, None)?);
    }

    // WGS sequencing; the per-study platform is HiSeq 2000 or HiSeq X Ten
    let types = vec![DatsObj::new(
        "DataType",
        vec![
            ("information", dbgap::dna_sequencing_type()?.into()),
            ("method", dbgap::wgs_assay_type()?.into()),
            ("platform", dbgap::illumina_type()?.into()),
        ],
    )?];

    let parent = dbgap::program_dataset(
        "TOPMed",
        "Trans-Omics for Precision Medicine (TOPMed)",
        TOPMED_DESCRIPTION,
        types,
        creator,
        DBGAP_TOPMED_QUERY_URL,
    )?;
    parent.set("hasPart", subsets);
    Ok(parent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_block_parses() {
        let studies = dbgap_studies(&[]).unwrap();
        assert_eq!(studies.len(), 30);
    }

    #[test]
    fn test_accession_filter_preserves_caller_order() {
        let accessions = vec![
            "phs000951.v2.p2".to_string(),
            "phs000946.v3.p1".to_string(),
            "phs999999.v1.p1".to_string(), // not in the block, silently dropped
        ];
        let studies = dbgap_studies(&accessions).unwrap();
        assert_eq!(studies.len(), 2);
        assert_eq!(studies[0].accession, "phs000951.v2.p2");
        assert_eq!(studies[1].accession, "phs000946.v3.p1");
    }

    #[test]
    fn test_convert_builds_parent_with_parts() {
        let accessions = vec!["phs000946.v3.p1".to_string(), "phs001024.v3.p1".to_string()];
        let parent = convert(&accessions).unwrap();
        assert_eq!(parent.id().as_deref(), Some("TOPMed"));

        let parts = match parent.get("hasPart") {
            Some(Value::List(parts)) => parts,
            other => panic!("expected hasPart list, got {other:?}"),
        };
        assert_eq!(parts.len(), 2);
        match &parts[0] {
            Value::Obj(obj) => assert_eq!(obj.id().as_deref(), Some("phs000946.v3.p1")),
            other => panic!("expected embedded child, got {other:?}"),
        }
    }
}
