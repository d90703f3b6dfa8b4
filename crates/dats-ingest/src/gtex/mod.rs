//! GTEx conversion
//!
//! Two independent conversion targets share this module: the dbGaP study
//! listing for the GTEx program ([`datasets`]) and the subject/donor
//! materials built from the GTEx portal phenotype table ([`subjects`]).

pub mod datasets;
pub mod subjects;
