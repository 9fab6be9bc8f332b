//! Variant Reader.

pub mod reader;
pub mod sample_allele;

pub use reader::{read_sample_alleles, RawVariantRecord};
pub use sample_allele::SampleAllele;
