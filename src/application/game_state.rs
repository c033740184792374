use tracing::debug;

use crate::domain::{Engine, Grid, Pattern, RuleSet};
use super::config::SimulationConfig;

/// SimulationState is one immutable snapshot of the simulation.
/// Every transition consumes the snapshot and returns the next one, so a
/// caller that kept an earlier copy never sees it change.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationState {
    pub grid: Grid,
    pub config: SimulationConfig,
    /// Generations advanced since the last reset
    pub generation: u64,
    pub is_running: bool,
    /// Pattern waiting to be placed (Some = placement mode)
    pub pending_pattern: Option<Pattern>,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::initial(SimulationConfig::default())
    }
}

impl SimulationState {
    /// Empty board sized from the configuration
    pub fn initial(config: SimulationConfig) -> Self {
        Self {
            grid: Grid::empty(config.rows, config.cols),
            config,
            generation: 0,
            is_running: false,
            pending_pattern: None,
        }
    }

    pub fn population(&self) -> usize {
        self.grid.count_alive()
    }

    pub fn is_placing_pattern(&self) -> bool {
        self.pending_pattern.is_some()
    }

    /// Advance exactly one generation with the current rules and topology
    pub fn step(mut self, engine: &dyn Engine) -> Self {
        self.grid = engine.next_generation(&self.grid, &self.config.rules, self.config.wrap_edges);
        self.generation += 1;
        self
    }

    pub fn play(mut self) -> Self {
        self.is_running = true;
        self
    }

    pub fn pause(mut self) -> Self {
        self.is_running = false;
        self
    }

    /// Toggle play/pause state
    pub fn toggle_running(mut self) -> Self {
        self.is_running = !self.is_running;
        self
    }

    /// Clamp, stop, resize (keeping cells that still fit) and reset the counter
    pub fn set_grid_size(mut self, rows: usize, cols: usize) -> Self {
        self.config = self.config.with_size(rows, cols);
        debug!(rows = self.config.rows, cols = self.config.cols, "grid resized");
        self.grid = self.grid.resize(self.config.rows, self.config.cols);
        self.reset()
    }

    /// Stop and replace the board with a random one of the same size
    pub fn randomize(mut self, density: f32) -> Self {
        self.grid = Grid::randomized(self.config.rows, self.config.cols, density);
        debug!(density, population = self.grid.count_alive(), "grid randomized");
        self.reset()
    }

    /// Stop, empty the board and reset the counter
    pub fn clear(mut self) -> Self {
        self.grid = self.grid.clear();
        self.reset()
    }

    fn reset(mut self) -> Self {
        self.is_running = false;
        self.generation = 0;
        self
    }

    /// Clamp and store the step interval; restarting any timer is up to the caller
    pub fn set_speed(mut self, interval_ms: u64) -> Self {
        self.config = self.config.with_step_interval(interval_ms);
        self
    }

    pub fn set_rules(mut self, rules: RuleSet) -> Self {
        self.config = self.config.with_rules(rules);
        self
    }

    pub fn set_wrap_edges(mut self, wrap_edges: bool) -> Self {
        self.config = self.config.with_wrap_edges(wrap_edges);
        self
    }

    pub fn toggle_wrap_edges(self) -> Self {
        let wrap = !self.config.wrap_edges;
        self.set_wrap_edges(wrap)
    }

    pub fn toggle_cell(mut self, row: i32, col: i32) -> Self {
        self.grid = self.grid.toggle_cell(row, col);
        self
    }

    pub fn set_cell(mut self, row: i32, col: i32, alive: bool) -> Self {
        self.grid = self.grid.set_cell(row, col, alive);
        self
    }

    /// Enter placement mode with `pattern`
    pub fn select_pattern(mut self, pattern: Pattern) -> Self {
        self.pending_pattern = Some(pattern);
        self
    }

    pub fn cancel_pattern_placement(mut self) -> Self {
        self.pending_pattern = None;
        self
    }

    /// Stamp the pending pattern at (row, col) and leave placement mode.
    /// Does nothing when no pattern is pending.
    pub fn place_pattern(mut self, row: i32, col: i32) -> Self {
        if let Some(pattern) = self.pending_pattern.take() {
            self.grid = self.grid.place_pattern(&pattern, row, col);
        }
        self
    }
}
