mod cell;
mod grid;
mod rules;
mod patterns;
mod algorithm;
pub mod engine;

pub use cell::Cell;
pub use grid::{Grid, DEFAULT_DENSITY};
pub use rules::{RuleSet, NeighborCounts, RuleParseError, all_rules, MAX_NEIGHBORS};
pub use patterns::{Pattern, PatternCategory, presets};
pub use engine::{Engine, SparseEngine, ParallelSparseEngine, count_neighbors};
pub use algorithm::Algorithm;
