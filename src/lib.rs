// Domain layer - cells, rules, the generation engine, pattern catalog
pub mod domain;

// Application layer - snapshots, configuration, scheduling
pub mod application;

// Infrastructure layer - UI, rendering, input
pub mod ui;
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{
    Algorithm, Cell, Engine, Grid, ParallelSparseEngine, Pattern, PatternCategory, RuleParseError,
    RuleSet, SparseEngine, presets,
};
pub use application::{
    Camera, ConfigError, Simulation, SimulationConfig, SimulationState, SpeedLevel, StepTimer,
};
