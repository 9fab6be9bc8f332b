//! Combination Synthesizer.

pub mod synthesizer;

pub use synthesizer::synthesize_combinations;
