//! dbGaP study-table scraping
//!
//! The GTEx and TOPMed converters both start from a block of text cut and
//! pasted from the dbGaP search results page. Each study spans a fixed
//! sequence of line classes: accession, title, embargo/version lines,
//! a `VDAS<count><study type>Links` summary, and a sequencing platform.
//! The page glues the first version line onto the end of the title, so
//! lines are re-split before classification. Any line that matches no
//! class is a fatal parse error carrying the line number.

use anyhow::Result;
use dats_common::CatalogError;
use dats_core::{DatsObj, Value};
use regex::Regex;
use tracing::debug;

use crate::util;

pub const DBGAP_QUERY_URL_PREFIX: &str = "https://www.ncbi.nlm.nih.gov/gap/?term=";

/// One scraped dbGaP study entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Study {
    /// Versioned accession, e.g. "phs000424.v7.p2"
    pub accession: String,
    /// Study title with the program prefix stripped
    pub title: String,
    /// Embargo/version lines as scraped
    pub versions: Vec<String>,
    /// Actual subject count from the VDAS line
    pub participant_count: i64,
    /// Study type from the VDAS line, e.g. "Case Set"
    pub study_type: String,
    /// Sequencing platform, e.g. "HiSeq X Ten"
    pub platform: String,
}

#[derive(Debug, Default)]
struct PartialStudy {
    accession: String,
    title: Option<String>,
    versions: Vec<String>,
    participant_count: Option<i64>,
    study_type: Option<String>,
    platform: Option<String>,
}

impl PartialStudy {
    fn finish(self) -> Result<Study> {
        let missing = |field: &str, accession: &str| {
            CatalogError::Parse(format!("study {accession} has no {field} line"))
        };
        Ok(Study {
            title: self
                .title
                .ok_or_else(|| missing("title", &self.accession))?,
            participant_count: self
                .participant_count
                .ok_or_else(|| missing("VDAS", &self.accession))?,
            study_type: self
                .study_type
                .ok_or_else(|| missing("VDAS", &self.accession))?,
            platform: self
                .platform
                .ok_or_else(|| missing("platform", &self.accession))?,
            versions: self.versions,
            accession: self.accession,
        })
    }
}

/// Parse a pasted dbGaP study block.
///
/// `title_re` recognizes the program-specific title line and captures the
/// portion kept as the study title (e.g. `^NHLBI TOPMed: (.*)$`).
pub fn parse_studies(block: &str, title_re: &Regex) -> Result<Vec<Study>> {
    let split_re = Regex::new(r"^(\S.*)(Versions?.*)$").expect("static regex");
    let accession_re = Regex::new(r"^(phs\S+)$").expect("static regex");
    let vdas_re = Regex::new(r"^VDAS(\d+)(\D.*)Links$").expect("static regex");
    let platform_re = Regex::new(r"^(HiSeq.*)$").expect("static regex");

    // re-split lines where a version suffix is glued onto the title
    let mut lines: Vec<&str> = Vec::new();
    for line in block.split('\n') {
        match split_re.captures(line) {
            Some(caps) if !line.starts_with("Version") => {
                lines.push(caps.get(1).map_or("", |m| m.as_str()));
                lines.push(caps.get(2).map_or("", |m| m.as_str()));
            }
            _ => lines.push(line),
        }
    }

    let mut studies: Vec<Study> = Vec::new();
    let mut current: Option<PartialStudy> = None;

    let mut flush = |current: &mut Option<PartialStudy>| -> Result<()> {
        if let Some(partial) = current.take() {
            studies.push(partial.finish()?);
        }
        Ok(())
    };

    for (lnum, line) in lines.iter().enumerate() {
        let lnum = lnum + 1;
        let unexpected = || CatalogError::StudyTable {
            line: lnum,
            content: line.to_string(),
        };

        if line.trim().is_empty() {
            continue;
        }
        if let Some(caps) = accession_re.captures(line) {
            flush(&mut current)?;
            current = Some(PartialStudy {
                accession: caps[1].to_string(),
                ..Default::default()
            });
            continue;
        }
        let study = current.as_mut().ok_or_else(unexpected)?;
        if let Some(caps) = title_re.captures(line) {
            study.title = Some(caps[1].trim().to_string());
        } else if line.starts_with("Version") {
            study.versions.push(line.to_string());
        } else if let Some(caps) = vdas_re.captures(line) {
            study.participant_count = Some(
                caps[1]
                    .parse()
                    .map_err(|_| unexpected())?,
            );
            study.study_type = Some(caps[2].to_string());
        } else if platform_re.is_match(line) {
            study.platform = Some(line.to_string());
        } else {
            return Err(unexpected().into());
        }
    }
    flush(&mut current)?;

    debug!(count = studies.len(), "scraped dbGaP studies");
    Ok(studies)
}

/// The `v<n>` component of a versioned accession ("phs000424.v7.p2" -> "v7").
pub fn accession_version(accession: &str) -> Result<String> {
    let version_re = Regex::new(r"^phs\d+\.(v\d+)\.p\d+$").expect("static regex");
    let caps = version_re.captures(accession).ok_or_else(|| {
        CatalogError::Parse(format!(
            "unable to parse dataset/study version from study id {accession}"
        ))
    })?;
    Ok(caps[1].to_string())
}

/// The dbGaP `DataRepository` record.
pub fn db_gap() -> dats_core::Result<DatsObj> {
    DatsObj::new("DataRepository", vec![("name", Value::from("dbGaP"))])
}

/// OBO annotation for "DNA sequencing".
pub fn dna_sequencing_type() -> dats_core::Result<DatsObj> {
    util::obo_annotation("DNA sequencing", "OBI_0000626")
}

/// OBO annotation for "whole genome sequencing assay".
pub fn wgs_assay_type() -> dats_core::Result<DatsObj> {
    util::obo_annotation("whole genome sequencing assay", "OBI_0002117")
}

/// OBO annotation for the Illumina platform family.
pub fn illumina_type() -> dats_core::Result<DatsObj> {
    util::obo_annotation("Illumina", "OBI_0000759")
}

/// OBO annotation for a scraped platform name.
pub fn platform_type(platform: &str) -> Result<DatsObj> {
    let obj = match platform {
        "HiSeq 2000" => util::obo_annotation("Illumina HiSeq 2000", "OBI_0002001")?,
        "HiSeq X Ten" => util::obo_annotation("Illumina HiSeq X Ten", "OBI_0002129")?,
        other => {
            return Err(
                CatalogError::Parse(format!("unrecognized sequencing platform: {other}")).into(),
            )
        }
    };
    Ok(obj)
}

/// Convert one scraped study into a DATS `Dataset`.
///
/// `creator` is the program organization; `title_override` replaces the
/// scraped title when the program catalogues all studies under one name
/// (GTEx does, TOPMed keeps per-study titles).
pub fn study_dataset(
    study: &Study,
    creator: &DatsObj,
    title_override: Option<&str>,
) -> Result<DatsObj> {
    let version = accession_version(&study.accession)?;

    let dimensions = vec![DatsObj::new(
        "Dimension",
        vec![
            ("name", util::annotation("Actual Subject Count")?.into()),
            (
                "description",
                Value::from("The actual number of subjects entered into a clinical trial."),
            ),
            (
                "types",
                Value::List(vec![
                    util::obo_annotation("Actual Subject Number", "NCIT_C98703")?.into(),
                ]),
            ),
            ("values", Value::List(vec![Value::from(study.participant_count)])),
        ],
    )?];

    let types = vec![DatsObj::new(
        "DataType",
        vec![
            ("information", dna_sequencing_type()?.into()),
            ("method", wgs_assay_type()?.into()),
            ("platform", platform_type(&study.platform)?.into()),
        ],
    )?];

    let extra_props = vec![DatsObj::new(
        "CategoryValuesPair",
        vec![
            ("category", Value::from("study_type")),
            (
                "values",
                Value::List(vec![Value::from(study.study_type.as_str())]),
            ),
        ],
    )?];

    let title = title_override.unwrap_or(&study.title);

    let dataset = DatsObj::new(
        "Dataset",
        vec![
            (
                "identifier",
                util::identifier(&study.accession)?.into(),
            ),
            ("version", Value::from(version)),
            ("title", Value::from(title)),
            ("storedIn", db_gap()?.into()),
            ("types", Value::from(types)),
            ("creators", Value::List(vec![creator.clone().into()])),
            ("dimensions", Value::from(dimensions)),
            ("extraProperties", Value::from(extra_props)),
        ],
    )?;
    Ok(dataset)
}

/// Parent program `Dataset` with a dbGaP landing-page distribution.
/// `hasPart` is attached by the caller once all children are built.
pub fn program_dataset(
    identifier: &str,
    title: &str,
    description: &str,
    types: Vec<DatsObj>,
    creator: DatsObj,
    query_url: &str,
) -> Result<DatsObj> {
    let distribution = DatsObj::new(
        "DatasetDistribution",
        vec![(
            "access",
            DatsObj::new("Access", vec![("landingPage", Value::from(query_url))])?.into(),
        )],
    )?;

    let dataset = DatsObj::new(
        "Dataset",
        vec![
            ("identifier", util::identifier(identifier)?.into()),
            ("title", Value::from(title)),
            ("description", Value::from(description)),
            ("storedIn", db_gap()?.into()),
            ("types", Value::from(types)),
            ("creators", Value::List(vec![creator.into()])),
            ("distributions", Value::List(vec![distribution.into()])),
        ],
    )?;
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\n\
phs000946.v3.p1\n\
NHLBI TOPMed: Boston Early-Onset COPD Study in the TOPMed ProgramVersions 1-2: passed embargo\n\
Version 3: 2018-05-18\n\
VDAS80Pedigree Whole Genome SequencingLinks\n\
HiSeq X Ten\n\
phs001024.v3.p1\n\
NHLBI TOPMed: Partners HealthCare BiobankVersions 1-2: passed embargo\n\
VDAS128Case SetLinks\n\
HiSeq 2000\n";

    fn topmed_title_re() -> Regex {
        Regex::new(r"^NHLBI TOPMed: (.*)$").unwrap()
    }

    #[test]
    fn test_parse_studies() {
        let studies = parse_studies(SAMPLE, &topmed_title_re()).unwrap();
        assert_eq!(studies.len(), 2);

        let first = &studies[0];
        assert_eq!(first.accession, "phs000946.v3.p1");
        assert_eq!(
            first.title,
            "Boston Early-Onset COPD Study in the TOPMed Program"
        );
        assert_eq!(
            first.versions,
            vec!["Versions 1-2: passed embargo", "Version 3: 2018-05-18"]
        );
        assert_eq!(first.participant_count, 80);
        assert_eq!(first.study_type, "Pedigree Whole Genome Sequencing");
        assert_eq!(first.platform, "HiSeq X Ten");

        let second = &studies[1];
        assert_eq!(second.participant_count, 128);
        assert_eq!(second.study_type, "Case Set");
        assert_eq!(second.platform, "HiSeq 2000");
    }

    #[test]
    fn test_glued_version_line_is_split() {
        // the version suffix glued to the title must become its own line
        let studies = parse_studies(SAMPLE, &topmed_title_re()).unwrap();
        assert_eq!(studies[1].versions, vec!["Versions 1-2: passed embargo"]);
    }

    #[test]
    fn test_unexpected_line_is_fatal() {
        let block = "phs000946.v3.p1\nNHLBI TOPMed: X\nVDAS80YLinks\nHiSeq X Ten\ngarbage here\n";
        let err = parse_studies(block, &topmed_title_re()).unwrap_err();
        assert!(err.to_string().contains("garbage here"));
    }

    #[test]
    fn test_incomplete_study_is_fatal() {
        let block = "phs000946.v3.p1\nNHLBI TOPMed: X\n";
        let err = parse_studies(block, &topmed_title_re()).unwrap_err();
        assert!(err.to_string().contains("VDAS"));
    }

    #[test]
    fn test_accession_version() {
        assert_eq!(accession_version("phs000424.v7.p2").unwrap(), "v7");
        assert!(accession_version("GTEx_v7").is_err());
    }

    #[test]
    fn test_study_dataset() {
        let studies = parse_studies(SAMPLE, &topmed_title_re()).unwrap();
        let creator =
            DatsObj::new("Organization", vec![("name", Value::from("NHLBI"))]).unwrap();

        let dataset = study_dataset(&studies[0], &creator, None).unwrap();
        assert_eq!(dataset.id().as_deref(), Some("phs000946.v3.p1"));
        assert!(matches!(dataset.get("version"), Some(Value::Str(v)) if v == "v3"));
        assert!(matches!(
            dataset.get("title"),
            Some(Value::Str(t)) if t == "Boston Early-Onset COPD Study in the TOPMed Program"
        ));
    }

    #[test]
    fn test_unknown_platform_is_fatal() {
        assert!(platform_type("NovaSeq 6000").is_err());
    }
}
