//! IMI project catalogue conversion
//!
//! Converts the Innovative Medicines Initiative project spreadsheet (CSV
//! export) into a catalogue `Dataset` with one child `Dataset` per
//! project row.

use std::path::Path;

use anyhow::{Context, Result};
use dats_core::{DatsObj, Value};
use serde::Deserialize;
use tracing::info;

use crate::util;

/// One row of the IMIPROJECTS CSV.
///
/// The contact-email header really does carry two spaces in the source
/// spreadsheet.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRow {
    #[serde(rename = "Project Acronym")]
    pub acronym: String,
    #[serde(rename = "ShortDescription")]
    pub short_description: String,
    #[serde(rename = "Summary")]
    pub summary: String,
    #[serde(rename = "StartDate")]
    pub start_date: String,
    #[serde(rename = "EndDate")]
    pub end_date: String,
    #[serde(rename = "Keywords", default)]
    pub keywords: Option<String>,
    #[serde(rename = "GrantAgreementNo", default)]
    pub grant_agreement_no: Option<String>,
    #[serde(rename = "EFPIAcompanies", default)]
    pub efpia_companies: Option<String>,
    #[serde(rename = "Project Coordinator Name", default)]
    pub coordinator_name: Option<String>,
    #[serde(rename = "Project Contact  email", default)]
    pub contact_email: Option<String>,
}

pub fn read_projects(path: &Path) -> Result<Vec<ProjectRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open IMI project file: {}", path.display()))?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        let row: ProjectRow =
            row.with_context(|| format!("Malformed IMI project row in {}", path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}

/// A project date; the spreadsheet uses "-" for unknown dates, which
/// become `Date` records with the value "None".
fn project_date(raw: &str, label: &str) -> dats_core::Result<DatsObj> {
    let trimmed = raw.trim();
    let date = if trimmed.is_empty() || trimmed == "-" {
        "None"
    } else {
        trimmed
    };
    util::date_record(date, label)
}

fn imi_organization() -> dats_core::Result<DatsObj> {
    DatsObj::new(
        "Organization",
        vec![
            ("name", Value::from("Innovative Medicines Initiative")),
            ("abbreviation", Value::from("IMI")),
        ],
    )
}

/// Split a colon-separated spreadsheet cell into annotations.
fn keyword_annotations(cell: Option<&str>) -> dats_core::Result<Vec<DatsObj>> {
    let mut annotations = Vec::new();
    if let Some(cell) = cell {
        for keyword in cell.split(':') {
            let keyword = keyword.trim();
            if !keyword.is_empty() {
                annotations.push(util::annotation(keyword)?);
            }
        }
    }
    Ok(annotations)
}

/// The project creators: the EFPIA partner companies plus the
/// coordinator, when both a name and a contact email are present. The
/// coordinator cell reads "name, affiliation".
fn creators(row: &ProjectRow) -> dats_core::Result<Vec<Value>> {
    let mut creators = Vec::new();
    if let Some(cell) = row.efpia_companies.as_deref() {
        for company in cell.split(':') {
            let company = company.trim();
            if !company.is_empty() {
                creators.push(Value::from(DatsObj::new(
                    "Organization",
                    vec![("name", Value::from(company))],
                )?));
            }
        }
    }

    if let (Some(name), Some(email)) = (
        row.coordinator_name.as_deref(),
        row.contact_email.as_deref(),
    ) {
        if !name.trim().is_empty() && !email.trim().is_empty() {
            let (full_name, affiliation) = match name.split_once(',') {
                Some((full_name, affiliation)) => (full_name.trim(), Some(affiliation.trim())),
                None => (name.trim(), None),
            };
            let mut fields = vec![
                ("fullName", Value::from(full_name)),
                ("email", Value::from(email.trim())),
            ];
            if let Some(affiliation) = affiliation {
                fields.push(("affiliations", Value::List(vec![Value::from(affiliation)])));
            }
            creators.push(Value::from(DatsObj::new("Person", fields)?));
        }
    }
    Ok(creators)
}

/// Build the `Dataset` for one project row. `index` is the row's
/// position in the spreadsheet and forms the catalogue identifier.
pub fn project_dataset(index: usize, row: &ProjectRow) -> Result<DatsObj> {
    let mut fields = vec![
        (
            "identifier",
            util::identifier(&format!("IMI-Cat#{index}"))?.into(),
        ),
        ("title", Value::from(row.acronym.as_str())),
        (
            "description",
            Value::from(format!(
                "{}. SUMMARY: {}",
                row.short_description, row.summary
            )),
        ),
        ("creators", Value::List(creators(row)?)),
        ("keywords", Value::from(keyword_annotations(row.keywords.as_deref())?)),
        (
            "dates",
            Value::from(vec![
                project_date(&row.start_date, "start date")?,
                project_date(&row.end_date, "end date")?,
            ]),
        ),
    ];

    if let Some(grant_no) = row.grant_agreement_no.as_deref() {
        if !grant_no.trim().is_empty() {
            let grant = DatsObj::new(
                "Grant",
                vec![
                    ("name", Value::from(format!("IMI grant #:{}", grant_no.trim()))),
                    ("funders", Value::from(vec![imi_organization()?])),
                ],
            )?;
            fields.push(("acknowledges", Value::from(vec![grant])));
        }
    }

    Ok(DatsObj::new("Dataset", fields)?)
}

/// Build the parent catalogue `Dataset` from the project CSV.
pub fn convert(path: &Path) -> Result<DatsObj> {
    let rows = read_projects(path)?;

    let mut projects = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        projects.push(project_dataset(index, row)?);
    }
    info!(count = projects.len(), "converted IMI projects");

    let catalogue = DatsObj::new(
        "Dataset",
        vec![
            ("identifier", util::identifier("IMI-Cat")?.into()),
            ("title", Value::from("IMI Project Data Catalogue")),
            ("creators", Value::from(vec![imi_organization()?])),
            ("hasPart", Value::from(projects)),
        ],
    )?;
    Ok(catalogue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Project Acronym,ShortDescription,Summary,StartDate,EndDate,Keywords,GrantAgreementNo,EFPIAcompanies,Project Coordinator Name,Project Contact  email";

    fn sample_row() -> ProjectRow {
        ProjectRow {
            acronym: "ABIRISK".to_string(),
            short_description: "Anti-biopharmaceutical immunization".to_string(),
            summary: "Prediction of immunogenicity risk".to_string(),
            start_date: "01/03/2012".to_string(),
            end_date: "-".to_string(),
            keywords: Some("immunogenicity:biopharmaceuticals".to_string()),
            grant_agreement_no: Some("115303".to_string()),
            efpia_companies: Some("Pfizer:Novartis".to_string()),
            coordinator_name: Some("Marc Pallardy, Universite Paris-Sud".to_string()),
            contact_email: Some("marc.pallardy@u-psud.fr".to_string()),
        }
    }

    #[test]
    fn test_missing_date_becomes_none() {
        let date = project_date("-", "end date").unwrap();
        assert!(matches!(date.get("date"), Some(Value::Str(d)) if d == "None"));
    }

    #[test]
    fn test_project_dataset_shape() {
        let project = project_dataset(0, &sample_row()).unwrap();
        assert_eq!(project.id().as_deref(), Some("IMI-Cat#0"));
        assert!(matches!(
            project.get("title"),
            Some(Value::Str(t)) if t == "ABIRISK"
        ));
        assert!(matches!(
            project.get("description"),
            Some(Value::Str(d)) if d.contains(". SUMMARY: ")
        ));

        // two companies plus the coordinator
        match project.get("creators") {
            Some(Value::List(creators)) => {
                assert_eq!(creators.len(), 3);
                match &creators[2] {
                    Value::Obj(person) => {
                        assert_eq!(person.kind(), "Person");
                        assert!(matches!(
                            person.get("fullName"),
                            Some(Value::Str(n)) if n == "Marc Pallardy"
                        ));
                    }
                    other => panic!("expected coordinator person, got {other:?}"),
                }
            }
            other => panic!("expected creators list, got {other:?}"),
        }

        match project.get("keywords") {
            Some(Value::List(keywords)) => assert_eq!(keywords.len(), 2),
            other => panic!("expected keywords list, got {other:?}"),
        }

        match project.get("acknowledges") {
            Some(Value::List(grants)) => match &grants[0] {
                Value::Obj(grant) => assert!(matches!(
                    grant.get("name"),
                    Some(Value::Str(n)) if n == "IMI grant #:115303"
                )),
                other => panic!("expected grant, got {other:?}"),
            },
            other => panic!("expected acknowledges list, got {other:?}"),
        }
    }

    #[test]
    fn test_convert_from_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(
            file,
            "ABIRISK,Anti-biopharmaceutical immunization,Prediction of risk,01/03/2012,-,a:b,115303,Pfizer,\"Marc Pallardy, Universite Paris-Sud\",marc@example.org"
        )
        .unwrap();
        writeln!(
            file,
            "ADAPTED,Second project,More summary,-,-,,,,,"
        )
        .unwrap();
        file.flush().unwrap();

        let catalogue = convert(file.path()).unwrap();
        let parts = match catalogue.get("hasPart") {
            Some(Value::List(parts)) => parts,
            other => panic!("expected hasPart list, got {other:?}"),
        };
        assert_eq!(parts.len(), 2);
        match &parts[1] {
            Value::Obj(project) => {
                assert_eq!(project.id().as_deref(), Some("IMI-Cat#1"));
                // empty cells drop creators, keywords stay empty
                assert!(matches!(
                    project.get("creators"),
                    Some(Value::List(creators)) if creators.is_empty()
                ));
                assert!(project.get("acknowledges").is_none());
            }
            other => panic!("expected embedded project, got {other:?}"),
        }
    }
}
