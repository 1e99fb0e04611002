//! Text file I/O for seed grids and stamp templates

use super::grid2d::Grid2;
use super::pattern::Pattern;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a 2D seed grid from a text file
/// Format: one line per row, '1' for alive cells and '0' for dead cells
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid2> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read grid file: {}", path.as_ref().display()))?;

    parse_grid_from_string(&content)
        .with_context(|| format!("Failed to parse grid from file: {}", path.as_ref().display()))
}

/// Load a stamp template from a text file (same format as seed grids)
pub fn load_pattern_from_file<P: AsRef<Path>>(path: P) -> Result<Pattern> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_pattern_from_string(&content)
        .with_context(|| format!("Failed to parse pattern from file: {}", path.as_ref().display()))
}

/// Parse a grid from its string representation
pub fn parse_grid_from_string(content: &str) -> Result<Grid2> {
    Grid2::from_rows(parse_rows(content)?)
}

/// Parse a stamp template from its string representation
pub fn parse_pattern_from_string(content: &str) -> Result<Pattern> {
    Pattern::from_rows(parse_rows(content)?)
}

fn parse_rows(content: &str) -> Result<Vec<Vec<bool>>> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("File is empty or contains no valid rows");
    }

    let width = lines[0].len();
    let mut rows = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        if line.len() != width {
            anyhow::bail!(
                "Row {} has length {}, expected {} (all rows must have the same length)",
                row_idx,
                line.len(),
                width
            );
        }

        let mut row = Vec::with_capacity(width);
        for (col_idx, ch) in line.chars().enumerate() {
            match ch {
                '0' => row.push(false),
                '1' => row.push(true),
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                    ch,
                    row_idx,
                    col_idx
                ),
            }
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Save a grid to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid2, path: P) -> Result<()> {
    let content = grid_to_string(grid);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write grid to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a grid to its string representation
pub fn grid_to_string(grid: &Grid2) -> String {
    let mut result = String::with_capacity(grid.height() * (grid.width() + 1));

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            result.push(if grid.get(x, y) { '1' } else { '0' });
        }
        result.push('\n');
    }

    result
}

/// Create example seed and stamp files for the drivers
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // Glider
    let glider_content = "00100\n10100\n01100\n00000\n00000\n";
    std::fs::write(dir.join("glider.txt"), glider_content)
        .context("Failed to write glider.txt")?;

    // Blinker (oscillator)
    let blinker_content = "000\n111\n000\n";
    std::fs::write(dir.join("blinker.txt"), blinker_content)
        .context("Failed to write blinker.txt")?;

    // Block (still life)
    let block_content = "0000\n0110\n0110\n0000\n";
    std::fs::write(dir.join("block.txt"), block_content)
        .context("Failed to write block.txt")?;

    // Wide stamp template for the 3D driver: a block, a blinker and a
    // glider spaced across a 9x35 rectangle
    let stamp_content = "\
00000000000000000000000000000000000
00000000000000000000000000000000000
00110000000000000000010000000000000
00110000000000000000001000000000000
00000000001110000000111000000000000
00000000000000000000000000000000000
00000000000000000000000000000000000
00000000000000000000000000000000000
00000000000000000000000000000000000
";
    std::fs::write(dir.join("stamp.txt"), stamp_content)
        .context("Failed to write stamp.txt")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_grid_from_string() {
        let content = "010\n101\n010\n";
        let grid = parse_grid_from_string(content).unwrap();

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.alive_count(), 4);
        assert!(grid.get(1, 0));
        assert!(grid.get(0, 1));
        assert!(grid.get(2, 1));
        assert!(grid.get(1, 2));
    }

    #[test]
    fn test_grid_to_string() {
        let grid = Grid2::from_rows(vec![
            vec![false, true, false],
            vec![true, false, true],
            vec![false, true, false],
        ])
        .unwrap();

        assert_eq!(grid_to_string(&grid), "010\n101\n010\n");
    }

    #[test]
    fn test_round_trip() {
        let original = "010\n101\n010\n";
        let grid = parse_grid_from_string(original).unwrap();
        assert_eq!(grid_to_string(&grid), original);
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("test_grid.txt");

        let original = Grid2::from_rows(vec![
            vec![true, false, true],
            vec![false, true, false],
        ])
        .unwrap();

        save_grid_to_file(&original, &file_path).unwrap();
        let loaded = load_grid_from_file(&file_path).unwrap();

        assert_eq!(original, loaded);
    }

    #[test]
    fn test_invalid_input() {
        // Invalid character
        assert!(parse_grid_from_string("010\n1X1\n010\n").is_err());

        // Inconsistent row lengths
        assert!(parse_grid_from_string("010\n11\n010\n").is_err());

        // Empty content
        assert!(parse_grid_from_string("").is_err());
    }

    #[test]
    fn test_pattern_parsing() {
        let pattern = parse_pattern_from_string("01\n10\n").unwrap();
        assert_eq!(pattern.rows(), 2);
        assert_eq!(pattern.cols(), 2);
        assert!(pattern.get(0, 1));
        assert!(pattern.get(1, 0));
    }

    #[test]
    fn test_create_example_patterns() {
        let temp_dir = tempdir().unwrap();
        create_example_patterns(temp_dir.path()).unwrap();

        assert!(temp_dir.path().join("glider.txt").exists());
        assert!(temp_dir.path().join("blinker.txt").exists());
        assert!(temp_dir.path().join("block.txt").exists());
        assert!(temp_dir.path().join("stamp.txt").exists());

        let glider = load_grid_from_file(temp_dir.path().join("glider.txt")).unwrap();
        assert_eq!(glider.width(), 5);
        assert_eq!(glider.height(), 5);
        assert_eq!(glider.alive_count(), 5);

        let stamp = load_pattern_from_file(temp_dir.path().join("stamp.txt")).unwrap();
        assert_eq!(stamp.rows(), 9);
        assert_eq!(stamp.cols(), 35);
        assert!(stamp.alive_count() > 0);
    }
}
