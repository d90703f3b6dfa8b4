//! DATS Ingest Library
//!
//! Converters that map biomedical study metadata from its native formats
//! into DATS documents built on the `dats-core` object model.
//!
//! # Supported Sources
//!
//! - **AGR**: model-organism gene/disease/phenotype JSON dumps plus an
//!   ortholog TSV (MGI, RGD)
//! - **GTEx**: dbGaP study listings and subject phenotype tables
//! - **TOPMed**: dbGaP study listings filtered by accession
//! - **IMI**: a CSV export of research-project records
//!
//! Converters that attach shared entities (taxa, subjects) take a
//! [`dats_core::ObjCache`] so those records are embedded once and
//! referenced thereafter; the dbGaP study converters build disjoint
//! trees and need none.

pub mod agr;
pub mod dbgap;
pub mod gtex;
pub mod imi;
pub mod topmed;
pub mod util;
