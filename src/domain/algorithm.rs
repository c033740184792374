//! Algorithm enum for selecting the evolution engine.
//!
//! Both engines implement the same sparse evaluation and produce identical
//! grids; they only differ in how the candidate set is processed.

use super::engine::{Engine, ParallelSparseEngine, SparseEngine};

/// Available evolution engines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Alive cells and their neighbours, evaluated on one thread
    #[default]
    Sparse,
    /// Same candidate set, evaluated across rayon workers
    SparseParallel,
}

impl Algorithm {
    pub fn all() -> [Algorithm; 2] {
        [Algorithm::Sparse, Algorithm::SparseParallel]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Sparse => "Sparse",
            Algorithm::SparseParallel => "Sparse+Par",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::Sparse => "Alive set + neighbours, serial",
            Algorithm::SparseParallel => "Alive set + neighbours, parallel",
        }
    }

    /// The engine behind this algorithm
    pub fn engine(self) -> &'static dyn Engine {
        match self {
            Algorithm::Sparse => &SparseEngine,
            Algorithm::SparseParallel => &ParallelSparseEngine,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Grid, RuleSet};

    #[test]
    fn test_default_is_serial_sparse() {
        assert_eq!(Algorithm::default(), Algorithm::Sparse);
    }

    #[test]
    fn test_names_are_unique() {
        let names: Vec<_> = Algorithm::all().iter().map(|a| a.name()).collect();
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(names.len(), unique.len());
    }

    #[test]
    fn test_engines_agree() {
        let grid = Grid::randomized(40, 40, 0.3);
        let results: Vec<_> = Algorithm::all()
            .iter()
            .map(|a| a.engine().next_generation(&grid, &RuleSet::CONWAY, true))
            .collect();
        assert_eq!(results[0], results[1]);
    }
}
