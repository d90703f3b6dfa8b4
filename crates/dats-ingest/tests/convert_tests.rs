// End-to-end conversion tests: source files in, DATS JSON document out.

use std::fs;
use std::io::Write;
use std::path::Path;

use dats_core::{serialize, ObjCache, SerializeOptions};
use dats_ingest::agr::{self, ModDb};
use dats_ingest::{gtex, imi, topmed};

fn write_agr_fixtures(dir: &Path) {
    fs::write(
        dir.join("MGI_BGI.json"),
        r#"{"data": [
            {
                "primaryId": "MGI:97490",
                "soTermId": "SO:0001217",
                "symbol": "Pax6",
                "taxonId": "NCBITaxon:10090",
                "geneSynopsis": "paired box 6",
                "crossReferenceIds": ["ENSEMBL:ENSMUSG00000027168"],
                "genomeLocations": [{
                    "assembly": "GRCm38",
                    "chromosome": "2",
                    "startPosition": 105668900,
                    "endPosition": 105697364,
                    "strand": "-"
                }]
            },
            {
                "primaryId": "MGI:88059",
                "soTermId": "SO:0001217",
                "symbol": "Apoe",
                "taxonId": "NCBITaxon:10090",
                "geneSynopsis": "apolipoprotein E"
            }
        ]}"#,
    )
    .expect("Failed to write BGI fixture");

    fs::write(
        dir.join("MGI_disease.json"),
        r#"{"data": [{
            "objectId": "MGI:97490",
            "DOid": "DOID:12271",
            "dataProvider": "MGI",
            "dateAssigned": "2017-06-08T15:26:09-04:00",
            "objectRelation": {"associationType": "is_implicated_in", "objectType": "gene"},
            "evidence": {
                "evidenceCodes": ["TAS"],
                "publication": {"pubMedId": "28059119", "modPublicationId": "MGI:6194308"}
            }
        }]}"#,
    )
    .expect("Failed to write disease fixture");

    fs::write(
        dir.join("MGI_phenotype.json"),
        r#"{"data": [{
            "objectId": "MGI:97490",
            "dateAssigned": "2010-01-12",
            "phenotypeStatement": "small eyes",
            "evidence": {"pubMedId": "2010912", "modPublicationId": "MGI:123456"},
            "phenotypeTermIdentifiers": [{"termId": "MP:0001286"}]
        }]}"#,
    )
    .expect("Failed to write phenotype fixture");

    let mut orthologs = String::new();
    for i in 0..14 {
        orthologs.push_str(&format!("# provenance line {i}\n"));
    }
    orthologs.push_str(
        "Gene1ID\tGene1Symbol\tGene1SpeciesTaxonID\tGene1SpeciesName\tGene2ID\tGene2Symbol\tGene2SpeciesTaxonID\tGene2SpeciesName\n",
    );
    orthologs.push_str(
        "HGNC:8620\tPAX6\tNCBITaxon:9606\tHomo sapiens\tMGI:97490\tPax6\tNCBITaxon:10090\tMus musculus\n",
    );
    fs::write(dir.join("orthologs.tsv"), orthologs).expect("Failed to write ortholog fixture");
}

#[test]
fn test_agr_conversion_end_to_end() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_agr_fixtures(dir.path());

    let mut cache = ObjCache::new();
    let dataset = agr::convert(
        &mut cache,
        dir.path(),
        ModDb::Mgi,
        &dir.path().join("orthologs.tsv"),
    )
    .expect("Conversion failed");

    let json = serialize(
        &dataset,
        SerializeOptions {
            pretty: true,
            ..Default::default()
        },
    )
    .expect("Serialization failed");

    // both genes present, in file order
    let pax6_pos = json.find("MGI:97490").expect("Pax6 missing");
    let apoe_pos = json.find("MGI:88059").expect("Apoe missing");
    assert!(pax6_pos < apoe_pos);

    // the mouse taxon is embedded once and referenced from the second gene
    assert_eq!(json.matches("Mus musculus").count(), 1);
    assert_eq!(
        json.matches("\"@id\": \"https://www.ncbi.nlm.nih.gov/taxonomy/10090\"")
            .count(),
        1
    );

    // disease, phenotype, and ortholog edges all made it through
    assert!(json.contains("DOID_12271"));
    assert!(json.contains("MP_0001286"));
    assert!(json.contains("HGNC:8620"));
    assert!(json.contains("\"@type\": \"RelatedEntity\""));
}

#[test]
fn test_gtex_subjects_share_one_taxon_record() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "SUBJID\tSEX\tAGE\tDTHHRDY").unwrap();
    writeln!(file, "GTEX-1117F\t2\t60-69\t0").unwrap();
    writeln!(file, "GTEX-111CU\t1\t50-59\t0").unwrap();
    writeln!(file, "GTEX-111FC\t1\t60-69\t1").unwrap();
    file.flush().unwrap();

    let mut cache = ObjCache::new();
    let dataset = gtex::subjects::convert(&mut cache, file.path()).expect("Conversion failed");
    let json = serialize(&dataset, SerializeOptions::default()).expect("Serialization failed");

    // the human taxon is embedded in the first subject, referenced twice
    assert_eq!(json.matches("Homo sapiens").count(), 1);
    assert_eq!(
        json.matches("\"@id\":\"https://www.ncbi.nlm.nih.gov/taxonomy/9606\"")
            .count(),
        2
    );

    // subject dimensions point at the shared study-variable identifiers
    assert_eq!(json.matches("\"@id\":\"phv00169062\"").count(), 3);
}

#[test]
fn test_topmed_document_is_deterministic() {
    let accessions = vec!["phs000951.v2.p2".to_string(), "phs000946.v3.p1".to_string()];

    let first = serialize(
        &topmed::convert(&accessions).expect("Conversion failed"),
        SerializeOptions {
            pretty: true,
            ..Default::default()
        },
    )
    .expect("Serialization failed");
    let second = serialize(
        &topmed::convert(&accessions).expect("Conversion failed"),
        SerializeOptions {
            pretty: true,
            ..Default::default()
        },
    )
    .expect("Serialization failed");

    assert_eq!(first, second);
    // caller-supplied accession order is preserved in the document
    let copd_pos = first.find("phs000951.v2.p2").expect("COPDGene missing");
    let eocopd_pos = first.find("phs000946.v3.p1").expect("EOCOPD missing");
    assert!(copd_pos < eocopd_pos);
}

#[test]
fn test_strip_types_removes_every_tag() {
    let dataset = topmed::convert(&[]).expect("Conversion failed");
    let json = serialize(
        &dataset,
        SerializeOptions {
            strip_type_tags: true,
            ..Default::default()
        },
    )
    .expect("Serialization failed");
    assert!(!json.contains("@type"));
}

#[test]
fn test_imi_conversion_end_to_end() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    writeln!(
        file,
        "Project Acronym,ShortDescription,Summary,StartDate,EndDate,Keywords,GrantAgreementNo,EFPIAcompanies,Project Coordinator Name,Project Contact  email"
    )
    .unwrap();
    writeln!(
        file,
        "ABIRISK,Anti-biopharmaceutical immunization,Prediction of risk,01/03/2012,-,immunogenicity:biopharmaceuticals,115303,Pfizer:Novartis,\"Marc Pallardy, Universite Paris-Sud\",marc@example.org"
    )
    .unwrap();
    file.flush().unwrap();

    let catalogue = imi::convert(file.path()).expect("Conversion failed");
    let json = serialize(
        &catalogue,
        SerializeOptions {
            pretty: true,
            ..Default::default()
        },
    )
    .expect("Serialization failed");

    assert!(json.contains("IMI Project Data Catalogue"));
    assert!(json.contains("\"IMI-Cat#0\""));
    assert!(json.contains("ABIRISK"));
    assert!(json.contains("IMI grant #:115303"));
    // unknown end date is written out as the literal string "None"
    assert!(json.contains("\"None\""));
}
