#[cfg(feature = "cli")]
pub mod cli;
pub mod planner_config;

#[cfg(feature = "cli")]
pub use cli::{CliArgs, Command};
pub use planner_config::{
    CareerConfig, LoggingConfig, MatcherConfig, PlannerConfig, ReferenceConfig, SimulationConfig,
    StorageConfig,
};
