//! DATS Ingest - biomedical metadata catalogue builder

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dats_common::logging::{init_logging, LogConfig, LogLevel};
use dats_core::{serialize, ObjCache, SerializeOptions};
use dats_ingest::agr::{self, ModDb};
use dats_ingest::{gtex, imi, topmed};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "dats-ingest")]
#[command(author, version, about = "DATS metadata catalogue builder")]
struct Cli {
    /// Data source to convert
    #[command(subcommand)]
    source: Source,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Omit "@type" tags from the output document
    #[arg(long)]
    strip_types: bool,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

#[derive(Parser, Debug)]
enum Source {
    /// Convert Alliance of Genome Resources gene files
    Agr {
        /// Directory holding the <MOD>_BGI/_disease/_phenotype JSON files
        #[arg(short, long)]
        input: PathBuf,

        /// Model organism database the files were exported for
        #[arg(short, long, value_enum)]
        mod_db: ModDb,

        /// Alliance orthology TSV
        #[arg(long)]
        orthologs: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert the GTEx dbGaP study listing
    GtexDatasets {
        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert GTEx subject phenotypes
    GtexSubjects {
        /// Subject phenotype TSV
        #[arg(short, long)]
        phenotypes: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert the TOPMed dbGaP study listing
    Topmed {
        /// Study accessions to include (all studies when omitted)
        #[arg(short, long, value_delimiter = ',')]
        accessions: Vec<String>,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert the IMI project spreadsheet
    Imi {
        /// IMIPROJECTS CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbose flag
    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables override individual fields when set
    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("dats-ingest".to_string())
        .build()
        .merge_env()?;

    init_logging(&log_config)?;

    let options = SerializeOptions {
        strip_type_tags: cli.strip_types,
        pretty: !cli.compact,
    };
    let mut cache = ObjCache::new();

    let (root, output) = match cli.source {
        Source::Agr {
            input,
            mod_db,
            orthologs,
            output,
        } => {
            info!(mod_db = %mod_db, "Converting AGR gene files");
            (agr::convert(&mut cache, &input, mod_db, &orthologs)?, output)
        }
        Source::GtexDatasets { output } => {
            info!("Converting GTEx dbGaP studies");
            (gtex::datasets::convert()?, output)
        }
        Source::GtexSubjects { phenotypes, output } => {
            info!("Converting GTEx subject phenotypes");
            (gtex::subjects::convert(&mut cache, &phenotypes)?, output)
        }
        Source::Topmed { accessions, output } => {
            info!("Converting TOPMed dbGaP studies");
            (topmed::convert(&accessions)?, output)
        }
        Source::Imi { input, output } => {
            info!("Converting IMI project spreadsheet");
            (imi::convert(&input)?, output)
        }
    };

    let document = serialize(&root, options)?;
    fs::write(&output, document)
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;

    info!(output = %output.display(), cached = cache.len(), "Conversion complete");
    Ok(())
}
