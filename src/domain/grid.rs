use std::collections::HashSet;

use rand::Rng;

use super::{Cell, Pattern};

/// Default share of cells switched on by `Grid::randomized`
pub const DEFAULT_DENSITY: f32 = 0.3;

/// Grid is a fixed rectangle holding only its alive cells.
/// Every operation returns a new grid; a grid is never edited in place,
/// so older snapshots stay valid for anyone still holding them.
///
/// Coordinates outside the rectangle are ignored: they read as dead and
/// writes to them leave the grid unchanged.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Grid {
    rows: usize,
    cols: usize,
    alive: HashSet<Cell>,
}

impl Grid {
    /// Create a grid with no alive cells
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            alive: HashSet::new(),
        }
    }

    /// Create a grid from alive cells, silently dropping any outside the bounds
    pub fn from_cells(rows: usize, cols: usize, cells: impl IntoIterator<Item = Cell>) -> Self {
        let empty = Self::empty(rows, cols);
        let alive = cells.into_iter().filter(|&c| empty.contains(c)).collect();
        Self { alive, ..empty }
    }

    /// Random grid where each cell is alive with probability `density`
    pub fn randomized(rows: usize, cols: usize, density: f32) -> Self {
        Self::randomized_with(&mut rand::rng(), rows, cols, density)
    }

    /// Same as `randomized` with a caller-supplied generator
    pub fn randomized_with<R: Rng>(rng: &mut R, rows: usize, cols: usize, density: f32) -> Self {
        // NaN means nothing alive
        let p = if density.is_nan() { 0.0 } else { f64::from(density.clamp(0.0, 1.0)) };
        let alive = (0..rows as i32)
            .flat_map(|row| (0..cols as i32).map(move |col| Cell::new(row, col)))
            .filter(|_| rng.random_bool(p))
            .collect();
        Self { rows, cols, alive }
    }

    /// Grid dimensions as (rows, cols)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Whether a coordinate lies inside the rectangle
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.rows as i32).contains(&cell.row) && (0..self.cols as i32).contains(&cell.col)
    }

    #[inline]
    pub fn is_alive(&self, cell: Cell) -> bool {
        self.alive.contains(&cell)
    }

    #[inline]
    pub fn is_alive_at(&self, row: i32, col: i32) -> bool {
        self.is_alive(Cell::new(row, col))
    }

    /// Flip exactly one cell
    pub fn toggle_cell(&self, row: i32, col: i32) -> Self {
        let cell = Cell::new(row, col);
        self.set_cell(row, col, !self.is_alive(cell))
    }

    /// Set one cell explicitly (idempotent)
    pub fn set_cell(&self, row: i32, col: i32, alive: bool) -> Self {
        let cell = Cell::new(row, col);
        let mut next = self.clone();
        if !self.contains(cell) {
            return next;
        }
        if alive {
            next.alive.insert(cell);
        } else {
            next.alive.remove(&cell);
        }
        next
    }

    /// Kill every cell, keeping the dimensions
    pub fn clear(&self) -> Self {
        Self::empty(self.rows, self.cols)
    }

    /// Change dimensions, dropping alive cells that no longer fit
    pub fn resize(&self, rows: usize, cols: usize) -> Self {
        Self::from_cells(rows, cols, self.alive.iter().copied())
    }

    pub fn count_alive(&self) -> usize {
        self.alive.len()
    }

    /// Union in a pattern translated to (at_row, at_col); cells landing
    /// outside the grid are dropped, the rest are still placed.
    pub fn place_pattern(&self, pattern: &Pattern, at_row: i32, at_col: i32) -> Self {
        let mut next = self.clone();
        next.alive.extend(
            pattern
                .cells
                .iter()
                .map(|c| c.offset(at_row, at_col))
                .filter(|&c| self.contains(c)),
        );
        next
    }

    /// Alive cells in no particular order
    pub fn alive_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.alive.iter().copied()
    }

    /// Replace the alive set; used by engines building the next generation
    pub(crate) fn with_alive(&self, alive: HashSet<Cell>) -> Self {
        debug_assert!(alive.iter().all(|&c| self.contains(c)));
        Self {
            rows: self.rows,
            cols: self.cols,
            alive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::presets;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_empty_grid() {
        let grid = Grid::empty(20, 30);
        assert_eq!(grid.dimensions(), (20, 30));
        assert_eq!(grid.count_alive(), 0);
        assert!(!grid.is_alive_at(0, 0));
    }

    #[test]
    fn test_toggle_flips_one_cell_only() {
        let grid = Grid::from_cells(10, 10, [Cell::new(1, 1), Cell::new(2, 2)]);
        let toggled = grid.toggle_cell(1, 1);
        assert!(!toggled.is_alive_at(1, 1));
        assert!(toggled.is_alive_at(2, 2));
        assert_eq!(toggled.count_alive(), 1);

        let back = toggled.toggle_cell(1, 1);
        assert_eq!(back, grid);
    }

    #[test]
    fn test_operations_leave_original_untouched() {
        let grid = Grid::empty(10, 10);
        let _ = grid.set_cell(5, 5, true);
        assert_eq!(grid.count_alive(), 0);
    }

    #[test]
    fn test_set_cell_idempotent() {
        let once = Grid::empty(10, 10).set_cell(3, 4, true);
        let twice = once.set_cell(3, 4, true);
        assert_eq!(once, twice);
        assert_eq!(twice.count_alive(), 1);

        let cleared = twice.set_cell(3, 4, false).set_cell(3, 4, false);
        assert_eq!(cleared.count_alive(), 0);
    }

    #[test]
    fn test_out_of_range_coordinates_ignored() {
        let grid = Grid::empty(10, 10);
        assert_eq!(grid.toggle_cell(-1, 0), grid);
        assert_eq!(grid.set_cell(10, 3, true), grid);
        assert_eq!(grid.toggle_cell(0, 10), grid);
        assert!(!grid.is_alive_at(-1, -1));
    }

    #[test]
    fn test_clear_keeps_dimensions() {
        let grid = Grid::from_cells(12, 15, [Cell::new(0, 0), Cell::new(11, 14)]);
        let cleared = grid.clear();
        assert_eq!(cleared.dimensions(), (12, 15));
        assert_eq!(cleared.count_alive(), 0);
    }

    #[test]
    fn test_resize_drops_cells_outside() {
        let grid = Grid::from_cells(50, 50, [Cell::new(49, 49), Cell::new(3, 3)]);
        assert_eq!(grid.count_alive(), 2);

        let small = grid.resize(10, 10);
        assert_eq!(small.dimensions(), (10, 10));
        assert!(!small.is_alive_at(49, 49));
        assert!(small.is_alive_at(3, 3));
        assert_eq!(small.count_alive(), 1);
    }

    #[test]
    fn test_resize_up_keeps_every_cell() {
        let grid = Grid::from_cells(10, 10, [Cell::new(0, 0), Cell::new(9, 9), Cell::new(4, 7)]);
        let big = grid.resize(100, 120);
        assert_eq!(big.count_alive(), 3);
        assert!(grid.alive_cells().all(|c| big.is_alive(c)));
    }

    #[test]
    fn test_from_cells_filters() {
        let grid = Grid::from_cells(5, 5, [Cell::new(-1, 0), Cell::new(4, 4), Cell::new(5, 0)]);
        assert_eq!(grid.count_alive(), 1);
    }

    #[test]
    fn test_place_pattern_translates() {
        let grid = Grid::empty(20, 20).place_pattern(&presets::glider(), 5, 7);
        let expected = Grid::from_cells(
            20,
            20,
            [(5, 8), (6, 9), (7, 7), (7, 8), (7, 9)].map(|(r, c)| Cell::new(r, c)),
        );
        assert_eq!(grid, expected);
    }

    #[test]
    fn test_place_pattern_partially_outside() {
        // Block at the bottom-right corner: only (9, 9) fits
        let grid = Grid::empty(10, 10).place_pattern(&presets::block(), 9, 9);
        assert_eq!(grid.count_alive(), 1);
        assert!(grid.is_alive_at(9, 9));
    }

    #[test]
    fn test_place_pattern_unions_with_existing() {
        let grid = Grid::from_cells(10, 10, [Cell::new(0, 0), Cell::new(8, 8)]);
        let placed = grid.place_pattern(&presets::block(), 0, 0);
        assert_eq!(placed.count_alive(), 5);
    }

    #[test]
    fn test_randomized_density_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = Grid::randomized_with(&mut rng, 100, 100, DEFAULT_DENSITY);
        let alive = grid.count_alive();
        // 10_000 Bernoulli(0.3) trials: mean 3000, sd ~46
        assert!((2700..=3300).contains(&alive), "alive = {alive}");
    }

    #[test]
    fn test_randomized_extreme_densities() {
        assert_eq!(Grid::randomized(10, 10, 0.0).count_alive(), 0);
        assert_eq!(Grid::randomized(10, 10, 1.0).count_alive(), 100);
        assert_eq!(Grid::randomized(10, 10, 7.5).count_alive(), 100);
        assert_eq!(Grid::randomized(10, 10, -1.0).count_alive(), 0);
    }

    #[test]
    fn test_randomized_non_finite_density() {
        assert_eq!(Grid::randomized(10, 10, f32::NAN).count_alive(), 0);
        assert_eq!(Grid::randomized(10, 10, f32::INFINITY).count_alive(), 100);
        assert_eq!(Grid::randomized(10, 10, f32::NEG_INFINITY).count_alive(), 0);
    }

    #[test]
    fn test_randomized_cells_in_bounds() {
        let grid = Grid::randomized(13, 7, 0.5);
        assert!(grid.alive_cells().all(|c| grid.contains(c)));
    }
}
