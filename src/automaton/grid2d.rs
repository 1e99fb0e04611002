//! Fixed-size 2D boolean lattice and its generation advance

use super::neighborhood;
use super::rules::RuleSet;
use anyhow::Result;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable dimensions of a 2D grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions2 {
    pub width: usize,
    pub height: usize,
}

impl Dimensions2 {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

/// A Width x Height boolean lattice
///
/// Cells live in a flat row-major vector behind `(x, y)` accessors; the
/// dimensions never change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid2 {
    dims: Dimensions2,
    cells: Vec<bool>,
}

impl Grid2 {
    /// Create a new all-dead grid
    pub fn new(dims: Dimensions2) -> Self {
        Self {
            cells: vec![false; dims.cell_count()],
            dims,
        }
    }

    /// Create a grid from rows of cells (row `y`, column `x`)
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        if rows.is_empty() {
            anyhow::bail!("Grid cannot be empty");
        }

        let height = rows.len();
        let width = rows[0].len();

        if width == 0 {
            anyhow::bail!("Grid width cannot be zero");
        }

        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                anyhow::bail!("Row {} has length {}, expected {}", y, row.len(), width);
            }
        }

        Ok(Self {
            dims: Dimensions2::new(width, height),
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn dims(&self) -> Dimensions2 {
        self.dims
    }

    pub fn width(&self) -> usize {
        self.dims.width
    }

    pub fn height(&self) -> usize {
        self.dims.height
    }

    /// Convert `(x, y)` coordinates to the flat index
    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.dims.width + x
    }

    /// Get cell value at coordinates; out-of-bounds reads as dead
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x < self.dims.width && y < self.dims.height {
            self.cells[self.index(x, y)]
        } else {
            false
        }
    }

    /// Set cell value at coordinates
    pub fn set(&mut self, x: usize, y: usize, value: bool) -> Result<()> {
        if x >= self.dims.width || y >= self.dims.height {
            anyhow::bail!(
                "Coordinates ({}, {}) out of bounds for {}x{} grid",
                x,
                y,
                self.dims.width,
                self.dims.height
            );
        }
        let idx = self.index(x, y);
        self.cells[idx] = value;
        Ok(())
    }

    /// Fill every cell independently, alive with probability `density`
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, density: f64) {
        for cell in &mut self.cells {
            *cell = rng.gen_bool(density);
        }
    }

    /// Count living Moore neighbors of a cell, clipped at the grid edges
    pub fn count_neighbors(&self, x: usize, y: usize) -> u8 {
        neighborhood::count_alive(
            [x, y],
            [self.dims.width, self.dims.height],
            |[nx, ny]| self.cells[self.index(nx, ny)],
        )
    }

    /// Advance one generation under `rule`
    ///
    /// Builds a full new grid; every neighbor count reads this grid only, so
    /// the update is strictly synchronous.
    pub fn step(&self, rule: &RuleSet) -> Self {
        let cells: Vec<bool> = (0..self.dims.height)
            .into_par_iter()
            .flat_map_iter(|y| {
                (0..self.dims.width).map(move |x| {
                    let neighbors = self.count_neighbors(x, y);
                    rule.next_state(self.get(x, y), neighbors)
                })
            })
            .collect();

        Self {
            dims: self.dims,
            cells,
        }
    }

    /// Count total living cells
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid has no living cells
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// The grid as plain rows of booleans (row `y`, column `x`)
    pub fn as_rows(&self) -> Vec<Vec<bool>> {
        (0..self.dims.height)
            .map(|y| (0..self.dims.width).map(|x| self.get(x, y)).collect())
            .collect()
    }
}

impl fmt::Display for Grid2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.dims.height {
            for x in 0..self.dims.width {
                write!(f, "{}", if self.get(x, y) { '█' } else { '·' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
