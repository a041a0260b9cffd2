pub mod curve;
pub mod sessions;
pub mod stats;

pub use curve::{Breakpoint, ScoringCurve};
