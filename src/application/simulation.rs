use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::domain::{Algorithm, Pattern, RuleSet};
use super::config::SimulationConfig;
use super::game_state::SimulationState;
use super::scheduler::StepTimer;

type Observer = Box<dyn FnMut(&SimulationState) + Send>;

/// Simulation owns the current snapshot and coordinates the engine and the
/// step timer around it. Every command builds a whole new snapshot and swaps
/// it in; readers holding an older `Arc` keep a consistent view.
pub struct Simulation {
    state: Arc<SimulationState>,
    algorithm: Algorithm,
    timer: StepTimer,
    observer: Option<Observer>,
    last_step_duration: Duration,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            state: Arc::new(SimulationState::initial(config)),
            algorithm: Algorithm::default(),
            timer: StepTimer::new(),
            observer: None,
            last_step_duration: Duration::ZERO,
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<SimulationState> {
        Arc::clone(&self.state)
    }

    /// Get notified after every state replacement
    pub fn subscribe(&mut self, observer: impl FnMut(&SimulationState) + Send + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Swap in a new snapshot and notify the observer.
    /// The timer follows the snapshot's running flag and step interval.
    pub fn replace(&mut self, state: SimulationState) {
        let interval = state.config.step_interval();
        match (state.is_running, self.timer.is_active()) {
            (true, false) => self.timer.start(interval),
            (true, true) if self.timer.interval() != interval => self.timer.restart(interval),
            (false, true) => self.timer.stop(),
            _ => {}
        }
        self.state = Arc::new(state);
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.state);
        }
    }

    fn update(&mut self, transition: impl FnOnce(SimulationState) -> SimulationState) {
        let current = SimulationState::clone(&self.state);
        self.replace(transition(current));
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    /// Wall time of the most recent generation
    pub fn last_step_duration(&self) -> Duration {
        self.last_step_duration
    }

    pub fn is_timer_active(&self) -> bool {
        self.timer.is_active()
    }

    pub fn play(&mut self) {
        if self.state.is_running {
            return;
        }
        self.update(SimulationState::play);
    }

    pub fn pause(&mut self) {
        self.update(SimulationState::pause);
    }

    pub fn toggle_play_pause(&mut self) {
        if self.state.is_running {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Manual single step; ignored while the simulation is running
    pub fn step(&mut self) {
        if self.state.is_running {
            return;
        }
        self.advance();
    }

    /// Feed elapsed frame time; advances one generation when the timer is due.
    /// Returns whether a generation was computed.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !self.state.is_running || !self.timer.poll(delta) {
            return false;
        }
        self.advance();
        true
    }

    fn advance(&mut self) {
        let engine = self.algorithm.engine();
        let start = Instant::now();
        self.update(|state| state.step(engine));
        self.last_step_duration = start.elapsed();

        trace!(
            generation = self.state.generation,
            population = self.state.population(),
            elapsed_us = self.last_step_duration.as_micros() as u64,
            algorithm = self.algorithm.name(),
            "generation advanced"
        );
    }

    pub fn clear(&mut self) {
        self.update(SimulationState::clear);
    }

    pub fn randomize(&mut self, density: f32) {
        self.update(|state| state.randomize(density));
    }

    /// Change the step interval; a running timer restarts so the new
    /// interval applies from the next tick.
    pub fn set_speed(&mut self, interval_ms: u64) {
        self.update(|state| state.set_speed(interval_ms));
        let interval = self.state.config.step_interval();
        debug!(interval_ms = interval.as_millis() as u64, "speed changed");
        // Restart even when the interval is unchanged
        if self.state.is_running {
            self.timer.restart(interval);
        }
    }

    pub fn set_grid_size(&mut self, rows: usize, cols: usize) {
        self.update(|state| state.set_grid_size(rows, cols));
    }

    pub fn set_rules(&mut self, rules: RuleSet) {
        debug!(rules = %rules, "rules changed");
        self.update(|state| state.set_rules(rules));
    }

    pub fn toggle_wrap_edges(&mut self) {
        self.update(SimulationState::toggle_wrap_edges);
    }

    pub fn toggle_cell(&mut self, row: i32, col: i32) {
        self.update(|state| state.toggle_cell(row, col));
    }

    pub fn set_cell(&mut self, row: i32, col: i32, alive: bool) {
        // Painting over an unchanged cell would only spam the observer
        if self.state.grid.is_alive_at(row, col) == alive {
            return;
        }
        self.update(|state| state.set_cell(row, col, alive));
    }

    pub fn select_pattern(&mut self, pattern: Pattern) {
        self.update(|state| state.select_pattern(pattern));
    }

    pub fn cancel_pattern_placement(&mut self) {
        self.update(SimulationState::cancel_pattern_placement);
    }

    pub fn place_pattern(&mut self, row: i32, col: i32) {
        if !self.state.is_placing_pattern() {
            return;
        }
        self.update(|state| state.place_pattern(row, col));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use crate::domain::{presets, Cell};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_manual_step_only_while_paused() {
        let mut sim = Simulation::default();
        sim.step();
        assert_eq!(sim.snapshot().generation, 1);

        sim.play();
        sim.step();
        assert_eq!(sim.snapshot().generation, 1);
    }

    #[test]
    fn test_tick_advances_at_interval() {
        let mut sim = Simulation::default();
        sim.set_speed(100);

        // Paused: ticks do nothing
        assert!(!sim.tick(ms(500)));

        sim.play();
        assert!(!sim.tick(ms(60)));
        assert!(sim.tick(ms(60)));
        assert_eq!(sim.snapshot().generation, 1);
    }

    #[test]
    fn test_pause_cancels_next_tick() {
        let mut sim = Simulation::default();
        sim.set_speed(100);
        sim.play();
        assert!(!sim.tick(ms(90)));

        sim.pause();
        assert!(!sim.is_timer_active());
        assert!(!sim.tick(ms(50)));
        assert_eq!(sim.snapshot().generation, 0);
    }

    #[test]
    fn test_speed_change_restarts_running_timer() {
        let mut sim = Simulation::default();
        sim.set_speed(100);
        sim.play();
        assert!(!sim.tick(ms(90)));

        sim.set_speed(50);
        assert!(!sim.tick(ms(40)));
        assert!(sim.tick(ms(10)));
    }

    #[test]
    fn test_replace_with_new_interval_restarts_timer() {
        let mut sim = Simulation::default();
        sim.set_speed(100);
        sim.play();
        assert!(!sim.tick(ms(90)));

        let retimed = SimulationState::clone(&sim.snapshot()).set_speed(500);
        sim.replace(retimed);
        assert!(sim.is_timer_active());
        assert!(!sim.tick(ms(150)));
        assert!(!sim.tick(ms(340)));
        assert!(sim.tick(ms(10)));
    }

    #[test]
    fn test_set_speed_clamps() {
        let mut sim = Simulation::default();
        sim.set_speed(5);
        assert_eq!(sim.snapshot().config.step_interval_ms, 20);
    }

    #[test]
    fn test_resets_stop_the_timer() {
        let mut sim = Simulation::default();
        sim.play();
        sim.clear();
        assert!(!sim.snapshot().is_running);
        assert!(!sim.is_timer_active());

        sim.play();
        sim.set_grid_size(5, 500);
        assert!(!sim.is_timer_active());
        assert_eq!(sim.snapshot().grid.dimensions(), (10, 200));

        sim.play();
        sim.randomize(0.5);
        assert!(!sim.is_timer_active());
    }

    #[test]
    fn test_older_snapshot_unchanged() {
        let mut sim = Simulation::default();
        sim.toggle_cell(3, 3);
        let before = sim.snapshot();
        sim.toggle_cell(3, 3);
        sim.step();

        assert!(before.grid.is_alive(Cell::new(3, 3)));
        assert_eq!(before.generation, 0);
        assert_eq!(sim.snapshot().population(), 0);
    }

    #[test]
    fn test_observer_sees_every_replacement() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut sim = Simulation::default();
        sim.subscribe(move |state| sink.lock().unwrap().push(state.generation));

        sim.select_pattern(presets::blinker());
        sim.place_pattern(10, 10);
        sim.step();
        sim.step();

        assert_eq!(*seen.lock().unwrap(), vec![0, 0, 1, 2]);
    }

    #[test]
    fn test_place_without_selection_does_not_notify() {
        let count = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&count);

        let mut sim = Simulation::default();
        sim.subscribe(move |_| *sink.lock().unwrap() += 1);
        sim.place_pattern(1, 1);
        sim.set_cell(1, 1, false);

        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[test]
    fn test_algorithms_produce_same_generation() {
        let mut serial = Simulation::default();
        let mut parallel = Simulation::default();
        parallel.set_algorithm(Algorithm::SparseParallel);

        for sim in [&mut serial, &mut parallel] {
            sim.select_pattern(presets::r_pentomino());
            sim.place_pattern(20, 20);
            for _ in 0..30 {
                sim.step();
            }
        }
        assert_eq!(serial.snapshot().grid, parallel.snapshot().grid);
    }

    #[test]
    fn test_rules_and_wrap_reach_the_engine() {
        let mut sim = Simulation::default();
        sim.set_rules(RuleSet::SEEDS);
        sim.toggle_wrap_edges();
        sim.set_cell(0, 0, true);
        sim.set_cell(0, 1, true);
        sim.step();

        // Bounded B2/S: only the row below is born
        let state = sim.snapshot();
        assert_eq!(state.population(), 2);
        assert!(state.grid.is_alive_at(1, 0));
        assert!(state.grid.is_alive_at(1, 1));
    }
}
