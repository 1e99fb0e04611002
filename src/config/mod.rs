//! Configuration management for the automaton simulator

pub mod settings;

pub use settings::{
    CliOverrides, PatternConfig, ServerConfig, Settings, SimulationConfig, TerminalConfig,
};
