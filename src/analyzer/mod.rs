// Analyzer module: aggregates submodules for different aspects of analysis.

pub mod comparison;
pub mod competitive;
pub mod descriptive;
pub mod distribution;
pub mod engine;
pub mod quality;
pub mod temporal;

// Re-export the engine for ease of use.
pub use engine::StatsEngine;
