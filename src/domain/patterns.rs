use std::collections::BTreeSet;

use super::Cell;

/// Grouping used by the pattern catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatternCategory {
    StillLife,
    Oscillator,
    Spaceship,
    Methuselah,
    Gun,
    Other,
}

impl PatternCategory {
    pub fn all() -> [PatternCategory; 6] {
        [
            PatternCategory::StillLife,
            PatternCategory::Oscillator,
            PatternCategory::Spaceship,
            PatternCategory::Methuselah,
            PatternCategory::Gun,
            PatternCategory::Other,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PatternCategory::StillLife => "Still Lifes",
            PatternCategory::Oscillator => "Oscillators",
            PatternCategory::Spaceship => "Spaceships",
            PatternCategory::Methuselah => "Methuselahs",
            PatternCategory::Gun => "Guns",
            PatternCategory::Other => "Other",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PatternCategory::StillLife => "Patterns that never change",
            PatternCategory::Oscillator => "Patterns that repeat after a fixed number of generations",
            PatternCategory::Spaceship => "Patterns that move across the grid",
            PatternCategory::Methuselah => "Small patterns that take a long time to stabilize",
            PatternCategory::Gun => "Patterns that repeatedly produce spaceships",
            PatternCategory::Other => "Miscellaneous interesting patterns",
        }
    }
}

/// A named set of cell offsets relative to an origin at (0, 0).
/// Placing it translates every offset; the catalog itself is never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub category: PatternCategory,
    pub cells: BTreeSet<Cell>,
    pub description: &'static str,
    pub facts: &'static [&'static str],
}

impl Pattern {
    /// Create a pattern from (row, col) offsets; duplicates collapse
    pub fn new(
        name: &'static str,
        category: PatternCategory,
        offsets: &[(i32, i32)],
        description: &'static str,
        facts: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            category,
            cells: offsets.iter().map(|&(row, col)| Cell::new(row, col)).collect(),
            description,
            facts,
        }
    }

    /// Columns spanned from the origin
    pub fn width(&self) -> i32 {
        self.cells.iter().map(|c| c.col).max().map_or(0, |c| c + 1)
    }

    /// Rows spanned from the origin
    pub fn height(&self) -> i32 {
        self.cells.iter().map(|c| c.row).max().map_or(0, |r| r + 1)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

/// Classic Game of Life patterns library
pub mod presets {
    use super::*;
    use PatternCategory::*;

    // Still lifes

    pub fn block() -> Pattern {
        Pattern::new(
            "Block",
            StillLife,
            &[(0, 0), (0, 1), (1, 0), (1, 1)],
            "The most common still life. A simple 2x2 square that remains stable forever.",
            &[
                "Appears naturally more than any other pattern",
                "Often forms as debris from other patterns",
            ],
        )
    }

    pub fn beehive() -> Pattern {
        Pattern::new(
            "Beehive",
            StillLife,
            &[(0, 1), (0, 2), (1, 0), (1, 3), (2, 1), (2, 2)],
            "A 6-cell still life, the second most common one to occur naturally.",
            &["Named for its hexagonal shape", "Has exactly 2 dead cells inside"],
        )
    }

    pub fn loaf() -> Pattern {
        Pattern::new(
            "Loaf",
            StillLife,
            &[(0, 1), (0, 2), (1, 0), (1, 3), (2, 1), (2, 3), (3, 2)],
            "A 7-cell still life shaped like a loaf of bread.",
            &["Third most common still life", "Often created by colliding gliders"],
        )
    }

    pub fn boat() -> Pattern {
        Pattern::new(
            "Boat",
            StillLife,
            &[(0, 0), (0, 1), (1, 0), (1, 2), (2, 1)],
            "A 5-cell still life, one of the smallest asymmetric ones.",
            &["Can be extended into a 'long boat'"],
        )
    }

    pub fn tub() -> Pattern {
        Pattern::new(
            "Tub",
            StillLife,
            &[(0, 1), (1, 0), (1, 2), (2, 1)],
            "A 4-cell diamond. The smallest still life that isn't a block.",
            &["Has rotational symmetry", "Also called 'diamond'"],
        )
    }

    // Oscillators

    pub fn blinker() -> Pattern {
        Pattern::new(
            "Blinker",
            Oscillator,
            &[(0, 0), (0, 1), (0, 2)],
            "The smallest oscillator. Alternates between horizontal and vertical.",
            &["Period: 2 generations", "First oscillator discovered"],
        )
    }

    pub fn toad() -> Pattern {
        Pattern::new(
            "Toad",
            Oscillator,
            &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
            "A period-2 oscillator that appears to hop back and forth.",
            &["Period: 2 generations", "Discovered by Simon Norton in 1970"],
        )
    }

    pub fn beacon() -> Pattern {
        Pattern::new(
            "Beacon",
            Oscillator,
            &[(0, 0), (0, 1), (1, 0), (2, 3), (3, 2), (3, 3)],
            "Two diagonal blocks whose inner corners flash on and off.",
            &["Period: 2 generations", "Made of two diagonal blocks"],
        )
    }

    pub fn pulsar() -> Pattern {
        Pattern::new(
            "Pulsar",
            Oscillator,
            &[
                (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
                (2, 0), (2, 5), (2, 7), (2, 12),
                (3, 0), (3, 5), (3, 7), (3, 12),
                (4, 0), (4, 5), (4, 7), (4, 12),
                (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
                (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
                (8, 0), (8, 5), (8, 7), (8, 12),
                (9, 0), (9, 5), (9, 7), (9, 12),
                (10, 0), (10, 5), (10, 7), (10, 12),
                (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
            ],
            "A large period-3 oscillator with 4-fold symmetry.",
            &["Period: 3 generations", "48 cells in its largest phase"],
        )
    }

    pub fn pentadecathlon() -> Pattern {
        Pattern::new(
            "Pentadecathlon",
            Oscillator,
            &[
                (0, 1),
                (1, 0), (1, 2),
                (2, 1), (3, 1), (4, 1), (5, 1), (6, 1), (7, 1),
                (8, 0), (8, 2),
                (9, 1),
            ],
            "A period-15 oscillator that looks like a breathing row of cells.",
            &["Period: 15 generations"],
        )
    }

    // Spaceships

    pub fn glider() -> Pattern {
        Pattern::new(
            "Glider",
            Spaceship,
            &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
            "The smallest spaceship. Moves one cell diagonally every 4 generations.",
            &["Speed: c/4 diagonal", "Discovered by Richard Guy in 1970"],
        )
    }

    pub fn lwss() -> Pattern {
        Pattern::new(
            "Lightweight Spaceship",
            Spaceship,
            &[(0, 1), (0, 4), (1, 0), (2, 0), (2, 4), (3, 0), (3, 1), (3, 2), (3, 3)],
            "The smallest orthogonal spaceship, travelling at c/2.",
            &["Speed: c/2 orthogonal", "Also called 'LWSS'"],
        )
    }

    pub fn mwss() -> Pattern {
        Pattern::new(
            "Middleweight Spaceship",
            Spaceship,
            &[
                (0, 2),
                (1, 0), (1, 4),
                (2, 5),
                (3, 0), (3, 5),
                (4, 1), (4, 2), (4, 3), (4, 4), (4, 5),
            ],
            "A medium orthogonal spaceship, same speed as the LWSS.",
            &["Speed: c/2 orthogonal", "Also called 'MWSS'"],
        )
    }

    pub fn hwss() -> Pattern {
        Pattern::new(
            "Heavyweight Spaceship",
            Spaceship,
            &[
                (0, 2), (0, 3),
                (1, 0), (1, 5),
                (2, 6),
                (3, 0), (3, 6),
                (4, 1), (4, 2), (4, 3), (4, 4), (4, 5), (4, 6),
            ],
            "The largest of the basic orthogonal spaceships.",
            &["Speed: c/2 orthogonal", "Also called 'HWSS'"],
        )
    }

    // Methuselahs

    pub fn r_pentomino() -> Pattern {
        Pattern::new(
            "R-pentomino",
            Methuselah,
            &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
            "Five cells that take 1103 generations to stabilize.",
            &["Stabilizes after 1103 generations", "Produces 6 gliders"],
        )
    }

    pub fn diehard() -> Pattern {
        Pattern::new(
            "Diehard",
            Methuselah,
            &[(0, 6), (1, 0), (1, 1), (2, 1), (2, 5), (2, 6), (2, 7)],
            "Seven cells that vanish completely after 130 generations.",
            &["Vanishes after exactly 130 generations"],
        )
    }

    pub fn acorn() -> Pattern {
        Pattern::new(
            "Acorn",
            Methuselah,
            &[(0, 1), (1, 3), (2, 0), (2, 1), (2, 4), (2, 5), (2, 6)],
            "Seven cells that take over 5000 generations to stabilize.",
            &["Stabilizes after 5206 generations", "Produces 13 gliders"],
        )
    }

    pub fn pi_heptomino() -> Pattern {
        Pattern::new(
            "Pi-heptomino",
            Methuselah,
            &[(0, 0), (0, 1), (0, 2), (1, 1), (2, 0), (2, 1), (2, 2)],
            "Seven cells shaped like the letter pi.",
            &["Stabilizes after 173 generations"],
        )
    }

    // Guns

    pub fn gosper_glider_gun() -> Pattern {
        Pattern::new(
            "Gosper Glider Gun",
            Gun,
            &[
                (0, 24),
                (1, 22), (1, 24),
                (2, 12), (2, 13), (2, 20), (2, 21), (2, 34), (2, 35),
                (3, 11), (3, 15), (3, 20), (3, 21), (3, 34), (3, 35),
                (4, 0), (4, 1), (4, 10), (4, 16), (4, 20), (4, 21),
                (5, 0), (5, 1), (5, 10), (5, 14), (5, 16), (5, 17), (5, 22), (5, 24),
                (6, 10), (6, 16), (6, 24),
                (7, 11), (7, 15),
                (8, 12), (8, 13),
            ],
            "The first gun discovered. Emits a glider every 30 generations.",
            &["Period: 30 generations per glider", "Discovered by Bill Gosper in 1970"],
        )
    }

    // Other

    pub fn infinite_growth() -> Pattern {
        let row: Vec<(i32, i32)> = [0..8, 9..14, 17..20, 26..33, 34..39]
            .into_iter()
            .flatten()
            .map(|col| (0, col))
            .collect();
        Pattern::new(
            "Infinite Growth",
            Other,
            &row,
            "A single row of cells that grows without bound.",
            &["Grows without bound", "Creates switch engines"],
        )
    }

    /// Every pattern in catalog order
    pub fn all_patterns() -> Vec<Pattern> {
        vec![
            block(), beehive(), loaf(), boat(), tub(),
            blinker(), toad(), beacon(), pulsar(), pentadecathlon(),
            glider(), lwss(), mwss(), hwss(),
            r_pentomino(), diehard(), acorn(), pi_heptomino(),
            gosper_glider_gun(),
            infinite_growth(),
        ]
    }

    pub fn by_category(category: PatternCategory) -> Vec<Pattern> {
        all_patterns()
            .into_iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Look a pattern up by name, ignoring case
    pub fn find(name: &str) -> Option<Pattern> {
        all_patterns()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Grid, RuleSet, SparseEngine, Engine};

    #[test]
    fn test_catalog_size_and_unique_names() {
        let patterns = presets::all_patterns();
        assert_eq!(patterns.len(), 20);

        let mut names: Vec<_> = patterns.iter().map(|p| p.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 20);
    }

    #[test]
    fn test_offsets_are_non_negative() {
        for pattern in presets::all_patterns() {
            assert!(
                pattern.cells.iter().all(|c| c.row >= 0 && c.col >= 0),
                "{} has negative offsets",
                pattern.name
            );
        }
    }

    #[test]
    fn test_every_category_populated() {
        for category in PatternCategory::all() {
            assert!(!presets::by_category(category).is_empty(), "{category:?}");
        }
    }

    #[test]
    fn test_dimensions() {
        let glider = presets::glider();
        assert_eq!((glider.width(), glider.height()), (3, 3));
        assert_eq!(glider.cell_count(), 5);

        let gun = presets::gosper_glider_gun();
        assert_eq!((gun.width(), gun.height()), (36, 9));
        assert_eq!(gun.cell_count(), 36);

        assert_eq!(presets::pulsar().cell_count(), 48);
        assert_eq!(presets::infinite_growth().cell_count(), 28);
    }

    #[test]
    fn test_find_ignores_case() {
        assert_eq!(presets::find("glider"), Some(presets::glider()));
        assert_eq!(presets::find("GOSPER GLIDER GUN").map(|p| p.name), Some("Gosper Glider Gun"));
        assert!(presets::find("nope").is_none());
    }

    #[test]
    fn test_still_lifes_are_still() {
        for pattern in presets::by_category(PatternCategory::StillLife) {
            let grid = Grid::empty(12, 12).place_pattern(&pattern, 4, 4);
            let next = SparseEngine.next_generation(&grid, &RuleSet::CONWAY, false);
            assert_eq!(next, grid, "{} changed", pattern.name);
        }
    }

    #[test]
    fn test_pulsar_period_three() {
        let grid = Grid::empty(25, 25).place_pattern(&presets::pulsar(), 6, 6);
        let after = (0..3).fold(grid.clone(), |g, _| {
            SparseEngine.next_generation(&g, &RuleSet::CONWAY, false)
        });
        assert_eq!(after, grid);
    }
}
