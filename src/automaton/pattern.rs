//! Rectangular boolean templates stamped into grids as seed structures

use anyhow::Result;

/// A fixed rows x cols boolean template
///
/// Any rectangular size is accepted; validation happens once at
/// construction so stamping never has to re-check shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Pattern {
    /// Create a pattern from rows of cells
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        if rows.is_empty() {
            anyhow::bail!("Pattern cannot be empty");
        }

        let height = rows.len();
        let width = rows[0].len();

        if width == 0 {
            anyhow::bail!("Pattern rows cannot be empty");
        }

        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                anyhow::bail!("Row {} has length {}, expected {}", r, row.len(), width);
            }
        }

        Ok(Self {
            rows: height,
            cols: width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Template value at (row, col); out-of-bounds reads as dead
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col]
        } else {
            false
        }
    }

    /// Count living template cells
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_creation() {
        let pattern = Pattern::from_rows(vec![
            vec![true, false, true],
            vec![false, true, false],
        ])
        .unwrap();

        assert_eq!(pattern.rows(), 2);
        assert_eq!(pattern.cols(), 3);
        assert_eq!(pattern.alive_count(), 3);
        assert!(pattern.get(0, 0));
        assert!(!pattern.get(0, 1));
        assert!(pattern.get(1, 1));
    }

    #[test]
    fn test_pattern_rejects_ragged_input() {
        assert!(Pattern::from_rows(vec![]).is_err());
        assert!(Pattern::from_rows(vec![vec![]]).is_err());
        assert!(Pattern::from_rows(vec![vec![true], vec![true, false]]).is_err());
    }

    #[test]
    fn test_out_of_bounds_reads_dead() {
        let pattern = Pattern::from_rows(vec![vec![true]]).unwrap();
        assert!(!pattern.get(1, 0));
        assert!(!pattern.get(0, 1));
    }
}
