//! Result Assembler.

pub mod assembler;
pub mod variant_report;

pub use assembler::{run_all_genes, DiplotypeRecord, GeneResult, RunReport};
pub use variant_report::VariantReport;
