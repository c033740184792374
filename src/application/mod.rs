pub mod config;
mod game_state;
mod scheduler;
mod simulation;
mod camera;

pub use config::{SimulationConfig, SpeedLevel, ConfigError};
pub use game_state::SimulationState;
pub use scheduler::StepTimer;
pub use simulation::Simulation;
pub use camera::Camera;
