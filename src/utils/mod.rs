//! Shared console-output and randomness utilities

pub mod display;
pub mod rng;

pub use display::{Color, ColorOutput};
