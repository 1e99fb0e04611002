//! Cellular automaton engines: grids, rules, neighborhoods and seed patterns

pub mod grid2d;
pub mod grid3d;
pub mod io;
pub mod neighborhood;
pub mod pattern;
pub mod rules;

pub use grid2d::{Dimensions2, Grid2};
pub use grid3d::{Dimensions3, Grid3};
pub use io::{load_grid_from_file, load_pattern_from_file, save_grid_to_file};
pub use pattern::Pattern;
pub use rules::RuleSet;
