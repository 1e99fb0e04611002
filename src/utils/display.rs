//! Console output formatting utilities

use crate::automaton::Grid2;

/// Format a grid with row and column coordinates for inspection
pub fn format_grid_with_coords(grid: &Grid2) -> String {
    let mut output = String::new();

    // Header with column numbers
    output.push_str("   ");
    for x in 0..grid.width() {
        output.push_str(&format!("{:2}", x % 10));
    }
    output.push('\n');

    for y in 0..grid.height() {
        output.push_str(&format!("{:2} ", y));
        for x in 0..grid.width() {
            output.push_str(if grid.get(x, y) { "██" } else { "··" });
        }
        output.push('\n');
    }

    output
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
