//! Match Data Builder.

pub mod builder;
pub mod position;

pub use builder::{build_match_data, MatchData};
pub use position::PositionGenotype;
