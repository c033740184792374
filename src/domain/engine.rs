//! Generation stepping.
//!
//! Engines evaluate only the alive cells and their Moore neighbours rather
//! than the full rectangle. A cell outside that candidate set is dead with
//! zero alive neighbours, so it stays dead. Birth sets containing 0 are only
//! applied inside the candidate set.

use std::collections::HashSet;

use rayon::prelude::*;

use super::{Cell, Grid, RuleSet};

/// The 8 Moore-neighbourhood offsets
#[rustfmt::skip]
const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Neighbours of `cell` under the grid's boundary policy.
///
/// With `wrap_edges` every offset wraps modulo the grid extent (toroidal), so
/// on a size-1 axis a cell is its own neighbour and may be yielded several
/// times. Without it, offsets leaving the rectangle are skipped.
pub fn neighbors(grid: &Grid, cell: Cell, wrap_edges: bool) -> impl Iterator<Item = Cell> + '_ {
    let (rows, cols) = (grid.rows() as i32, grid.cols() as i32);
    let degenerate = rows == 0 || cols == 0;

    MOORE_OFFSETS
        .into_iter()
        .filter(move |_| !degenerate)
        .filter_map(move |(dr, dc)| {
            let moved = cell.offset(dr, dc);
            if wrap_edges {
                Some(Cell::new(moved.row.rem_euclid(rows), moved.col.rem_euclid(cols)))
            } else {
                grid.contains(moved).then_some(moved)
            }
        })
}

/// Count alive neighbours of (row, col) under the grid's boundary policy
pub fn count_neighbors(grid: &Grid, row: i32, col: i32, wrap_edges: bool) -> u8 {
    neighbors(grid, Cell::new(row, col), wrap_edges)
        .filter(|&n| grid.is_alive(n))
        .count() as u8
}

/// Alive cells plus every neighbour, deduplicated
fn candidates(grid: &Grid, wrap_edges: bool) -> HashSet<Cell> {
    let mut set = HashSet::with_capacity(grid.count_alive() * 9);
    for cell in grid.alive_cells() {
        set.insert(cell);
        set.extend(neighbors(grid, cell, wrap_edges));
    }
    set
}

#[inline]
fn survives(grid: &Grid, rules: &RuleSet, cell: Cell, wrap_edges: bool) -> bool {
    let neighbors = count_neighbors(grid, cell.row, cell.col, wrap_edges);
    rules.should_be_alive(grid.is_alive(cell), neighbors)
}

/// Computes the next generation of a grid.
/// Implementations must be pure: same inputs, same output.
pub trait Engine: Send + Sync {
    fn next_generation(&self, grid: &Grid, rules: &RuleSet, wrap_edges: bool) -> Grid;

    fn count_neighbors(&self, grid: &Grid, row: i32, col: i32, wrap_edges: bool) -> u8 {
        count_neighbors(grid, row, col, wrap_edges)
    }
}

/// Serial sparse evaluation, O(population)
#[derive(Clone, Copy, Debug, Default)]
pub struct SparseEngine;

impl Engine for SparseEngine {
    fn next_generation(&self, grid: &Grid, rules: &RuleSet, wrap_edges: bool) -> Grid {
        let alive = candidates(grid, wrap_edges)
            .into_iter()
            .filter(|&cell| survives(grid, rules, cell, wrap_edges))
            .collect();
        grid.with_alive(alive)
    }
}

/// Sparse evaluation with the candidate set split across rayon workers.
/// Produces exactly the same grid as `SparseEngine`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParallelSparseEngine;

impl Engine for ParallelSparseEngine {
    fn next_generation(&self, grid: &Grid, rules: &RuleSet, wrap_edges: bool) -> Grid {
        let alive = candidates(grid, wrap_edges)
            .into_par_iter()
            .filter(|&cell| survives(grid, rules, cell, wrap_edges))
            .collect();
        grid.with_alive(alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::presets;

    fn grid_of(rows: usize, cols: usize, cells: &[(i32, i32)]) -> Grid {
        Grid::from_cells(rows, cols, cells.iter().map(|&(r, c)| Cell::new(r, c)))
    }

    fn step(grid: &Grid, rules: &RuleSet, wrap: bool, generations: usize) -> Grid {
        (0..generations).fold(grid.clone(), |g, _| SparseEngine.next_generation(&g, rules, wrap))
    }

    #[test]
    fn test_block_is_stable_both_modes() {
        let block = grid_of(10, 10, &[(4, 4), (4, 5), (5, 4), (5, 5)]);
        for wrap in [true, false] {
            assert_eq!(SparseEngine.next_generation(&block, &RuleSet::CONWAY, wrap), block);
        }
    }

    #[test]
    fn test_blinker_period_two() {
        let horizontal = grid_of(10, 10, &[(5, 4), (5, 5), (5, 6)]);
        let vertical = grid_of(10, 10, &[(4, 5), (5, 5), (6, 5)]);

        let once = step(&horizontal, &RuleSet::CONWAY, false, 1);
        assert_eq!(once, vertical);

        let twice = step(&horizontal, &RuleSet::CONWAY, false, 2);
        assert_eq!(twice, horizontal);
    }

    #[test]
    fn test_glider_translates_after_four_generations() {
        let start = Grid::empty(20, 20).place_pattern(&presets::glider(), 2, 2);
        let expected = Grid::empty(20, 20).place_pattern(&presets::glider(), 3, 3);

        assert_eq!(step(&start, &RuleSet::CONWAY, false, 4), expected);
    }

    #[test]
    fn test_hand_computed_fixture() {
        // L-tromino fills in to a block
        let grid = grid_of(6, 6, &[(2, 2), (2, 3), (3, 2)]);
        let expected = grid_of(6, 6, &[(2, 2), (2, 3), (3, 2), (3, 3)]);
        assert_eq!(SparseEngine.next_generation(&grid, &RuleSet::CONWAY, false), expected);
    }

    #[test]
    fn test_seeds_fixture() {
        // Two adjacent cells under B2/S: both die, four cells are born
        let grid = grid_of(6, 6, &[(2, 2), (2, 3)]);
        let expected = grid_of(6, 6, &[(1, 2), (1, 3), (3, 2), (3, 3)]);
        assert_eq!(SparseEngine.next_generation(&grid, &RuleSet::SEEDS, false), expected);
    }

    #[test]
    fn test_empty_grid_stays_empty() {
        let grid = Grid::empty(15, 15);
        for wrap in [true, false] {
            let next = SparseEngine.next_generation(&grid, &RuleSet::CONWAY, wrap);
            assert_eq!(next, grid);
            assert_eq!(next.count_alive(), 0);
        }
    }

    #[test]
    fn test_count_neighbors_three_by_three_wrapped() {
        let grid = grid_of(3, 3, &[(1, 1)]);
        for (row, col) in [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)] {
            assert_eq!(count_neighbors(&grid, row, col, true), 1);
        }
    }

    #[test]
    fn test_count_neighbors_three_by_three_bounded() {
        let grid = grid_of(3, 3, &[(1, 1)]);
        for (row, col) in [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)] {
            assert!(count_neighbors(&grid, row, col, false) <= 1);
        }
        assert_eq!(count_neighbors(&grid, 0, 0, false), 1);
        assert_eq!(count_neighbors(&grid, 1, 1, false), 0);
    }

    #[test]
    fn test_bounded_corner_has_three_neighbors_max() {
        let full = Grid::randomized(10, 10, 1.0);
        assert_eq!(count_neighbors(&full, 0, 0, false), 3);
        assert_eq!(count_neighbors(&full, 0, 5, false), 5);
        assert_eq!(count_neighbors(&full, 5, 5, false), 8);
        assert_eq!(count_neighbors(&full, 0, 0, true), 8);
    }

    #[test]
    fn test_wrap_corner_sees_opposite_corner() {
        let grid = grid_of(10, 10, &[(9, 9)]);
        assert_eq!(count_neighbors(&grid, 0, 0, true), 1);
        assert_eq!(count_neighbors(&grid, 0, 0, false), 0);
    }

    #[test]
    fn test_single_cell_grid_is_its_own_neighbor() {
        let grid = grid_of(1, 1, &[(0, 0)]);
        let cell = Cell::new(0, 0);

        let wrapped: Vec<_> = neighbors(&grid, cell, true).collect();
        assert_eq!(wrapped, vec![cell; 8]);
        assert_eq!(count_neighbors(&grid, 0, 0, true), 8);
        assert_eq!(count_neighbors(&grid, 0, 0, false), 0);

        // 8 neighbours under B3/S23: dies
        assert_eq!(SparseEngine.next_generation(&grid, &RuleSet::CONWAY, true).count_alive(), 0);
    }

    #[test]
    fn test_single_row_wraps_horizontally() {
        // On a 1x5 torus each cell sees its left/right neighbours three times
        let grid = grid_of(1, 5, &[(0, 1)]);
        assert_eq!(count_neighbors(&grid, 0, 0, true), 3);
        assert_eq!(count_neighbors(&grid, 0, 2, true), 3);
        assert_eq!(count_neighbors(&grid, 0, 1, true), 2);
        assert_eq!(count_neighbors(&grid, 0, 3, true), 0);
    }

    #[test]
    fn test_glider_wraps_around_torus() {
        let start = Grid::empty(10, 10).place_pattern(&presets::glider(), 7, 7);
        // 40 generations move the glider (+10, +10): back to the start on a 10x10 torus
        assert_eq!(step(&start, &RuleSet::CONWAY, true, 40), start);
    }

    #[test]
    fn test_edge_blinker_depends_on_topology() {
        let vertical = grid_of(10, 10, &[(4, 0), (5, 0), (6, 0)]);

        let bounded = SparseEngine.next_generation(&vertical, &RuleSet::CONWAY, false);
        assert_eq!(bounded, grid_of(10, 10, &[(5, 0), (5, 1)]));

        let wrapped = SparseEngine.next_generation(&vertical, &RuleSet::CONWAY, true);
        assert_eq!(wrapped, grid_of(10, 10, &[(5, 9), (5, 0), (5, 1)]));
    }

    #[test]
    fn test_engine_trait_count_neighbors_delegates() {
        let grid = grid_of(3, 3, &[(1, 1)]);
        let engine: &dyn Engine = &ParallelSparseEngine;
        assert_eq!(engine.count_neighbors(&grid, 0, 0, true), 1);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let grid = Grid::randomized(60, 80, 0.35);
        for rules in [RuleSet::CONWAY, RuleSet::HIGH_LIFE, RuleSet::DAY_AND_NIGHT, RuleSet::SEEDS] {
            for wrap in [true, false] {
                let serial = SparseEngine.next_generation(&grid, &rules, wrap);
                let parallel = ParallelSparseEngine.next_generation(&grid, &rules, wrap);
                assert_eq!(serial, parallel, "{rules} wrap={wrap}");
            }
        }
    }
}
