//! Cellular automaton simulator
//!
//! Two fixed-size automaton engines share one design: a 2D Conway (B3/S23)
//! lattice rendered in the terminal and a 3D life variant (survive on 4 to 6
//! neighbors, birth on 5) streamed to clients as JSON frames. The engines
//! are pure grid-to-grid functions; the drivers own cadence, cancellation
//! and transport.

pub mod automaton;
pub mod config;
pub mod driver;
pub mod utils;

pub use automaton::{Dimensions2, Dimensions3, Grid2, Grid3, Pattern, RuleSet};
pub use config::Settings;
