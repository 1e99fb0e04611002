//! Fixed-size 3D boolean lattice, generation advance and pattern stamping

use super::neighborhood;
use super::pattern::Pattern;
use super::rules::RuleSet;
use anyhow::Result;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Immutable dimensions of a 3D grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions3 {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
}

impl Dimensions3 {
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height * self.depth
    }
}

/// A Width x Height x Depth boolean lattice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid3 {
    dims: Dimensions3,
    cells: Vec<bool>,
}

impl Grid3 {
    /// Create a new all-dead grid
    pub fn new(dims: Dimensions3) -> Self {
        Self {
            cells: vec![false; dims.cell_count()],
            dims,
        }
    }

    /// Create a grid from nested cells indexed `[x][y][z]`
    pub fn from_cells(cells: Vec<Vec<Vec<bool>>>) -> Result<Self> {
        if cells.is_empty() {
            anyhow::bail!("Grid cannot be empty");
        }

        let width = cells.len();
        let height = cells[0].len();
        let depth = cells.first().and_then(|col| col.first()).map_or(0, Vec::len);

        if height == 0 || depth == 0 {
            anyhow::bail!("Grid height and depth cannot be zero");
        }

        let dims = Dimensions3::new(width, height, depth);
        let mut grid = Self::new(dims);

        for (x, column) in cells.iter().enumerate() {
            if column.len() != height {
                anyhow::bail!(
                    "Column {} has height {}, expected {}",
                    x,
                    column.len(),
                    height
                );
            }
            for (y, pillar) in column.iter().enumerate() {
                if pillar.len() != depth {
                    anyhow::bail!(
                        "Pillar ({}, {}) has depth {}, expected {}",
                        x,
                        y,
                        pillar.len(),
                        depth
                    );
                }
                for (z, &alive) in pillar.iter().enumerate() {
                    let idx = grid.index(x, y, z);
                    grid.cells[idx] = alive;
                }
            }
        }

        Ok(grid)
    }

    pub fn dims(&self) -> Dimensions3 {
        self.dims
    }

    /// Convert `(x, y, z)` coordinates to the flat index
    #[inline]
    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.dims.height + y) * self.dims.width + x
    }

    /// Get voxel value at coordinates; out-of-bounds reads as dead
    pub fn get(&self, x: usize, y: usize, z: usize) -> bool {
        if x < self.dims.width && y < self.dims.height && z < self.dims.depth {
            self.cells[self.index(x, y, z)]
        } else {
            false
        }
    }

    /// Set voxel value at coordinates
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: bool) -> Result<()> {
        if x >= self.dims.width || y >= self.dims.height || z >= self.dims.depth {
            anyhow::bail!(
                "Coordinates ({}, {}, {}) out of bounds for {}x{}x{} grid",
                x,
                y,
                z,
                self.dims.width,
                self.dims.height,
                self.dims.depth
            );
        }
        let idx = self.index(x, y, z);
        self.cells[idx] = value;
        Ok(())
    }

    /// Fill every voxel independently, alive with probability `density`
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, density: f64) {
        for cell in &mut self.cells {
            *cell = rng.gen_bool(density);
        }
    }

    /// Count living Moore neighbors of a voxel, clipped at the grid bounds
    pub fn count_neighbors(&self, x: usize, y: usize, z: usize) -> u8 {
        neighborhood::count_alive(
            [x, y, z],
            [self.dims.width, self.dims.height, self.dims.depth],
            |[nx, ny, nz]| self.cells[self.index(nx, ny, nz)],
        )
    }

    /// Advance one generation under `rule`
    ///
    /// Builds a full new grid; every neighbor count reads this grid only, so
    /// the update is strictly synchronous.
    pub fn step(&self, rule: &RuleSet) -> Self {
        let cells: Vec<bool> = (0..self.dims.depth)
            .into_par_iter()
            .flat_map_iter(|z| {
                (0..self.dims.height).flat_map(move |y| {
                    (0..self.dims.width).map(move |x| {
                        let neighbors = self.count_neighbors(x, y, z);
                        rule.next_state(self.get(x, y, z), neighbors)
                    })
                })
            })
            .collect();

        Self {
            dims: self.dims,
            cells,
        }
    }

    /// Overlay `pattern` onto the grid at the given offset.
    ///
    /// Template row `r`, column `c` lands on `(x + c, y + r)` in the single
    /// depth plane `z`. Template cells whose translated coordinate falls
    /// outside the grid are skipped; in-bounds cells are overwritten with the
    /// template value, alive or dead.
    pub fn stamp(&mut self, pattern: &Pattern, x: usize, y: usize, z: usize) {
        if z >= self.dims.depth {
            return;
        }
        for row in 0..pattern.rows() {
            for col in 0..pattern.cols() {
                let tx = x + col;
                let ty = y + row;
                if tx < self.dims.width && ty < self.dims.height {
                    let idx = self.index(tx, ty, z);
                    self.cells[idx] = pattern.get(row, col);
                }
            }
        }
    }

    /// Count total living voxels
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid has no living voxels
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// The grid as plain nested booleans indexed `[x][y][z]`, the shape the
    /// transport serializes
    pub fn as_cells(&self) -> Vec<Vec<Vec<bool>>> {
        (0..self.dims.width)
            .map(|x| {
                (0..self.dims.height)
                    .map(|y| (0..self.dims.depth).map(|z| self.get(x, y, z)).collect())
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn lone_voxel(dims: Dimensions3, x: usize, y: usize, z: usize) -> Grid3 {
        let mut grid = Grid3::new(dims);
        grid.set(x, y, z, true).unwrap();
        grid
    }

    #[test]
    fn test_grid_creation() {
        let grid = Grid3::new(Dimensions3::new(2, 3, 4));
        assert_eq!(grid.dims().cell_count(), 24);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_get_set() {
        let mut grid = Grid3::new(Dimensions3::new(3, 3, 3));
        grid.set(2, 1, 0, true).unwrap();
        assert!(grid.get(2, 1, 0));
        assert!(!grid.get(0, 0, 0));
        assert!(grid.set(3, 0, 0, true).is_err());
        assert!(!grid.get(9, 9, 9));
    }

    #[test]
    fn test_from_cells_round_trip() {
        let mut grid = Grid3::new(Dimensions3::new(3, 4, 2));
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        grid.randomize(&mut rng, 0.5);

        let rebuilt = Grid3::from_cells(grid.as_cells()).unwrap();
        assert_eq!(rebuilt, grid);
    }

    #[test]
    fn test_from_cells_rejects_ragged_input() {
        assert!(Grid3::from_cells(vec![]).is_err());
        assert!(Grid3::from_cells(vec![vec![vec![true]], vec![]]).is_err());
        assert!(Grid3::from_cells(vec![vec![vec![true], vec![true, false]]]).is_err());
    }

    #[test]
    fn test_neighbor_count_bounds() {
        let mut grid = Grid3::new(Dimensions3::new(4, 4, 4));
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        grid.randomize(&mut rng, 0.5);

        for z in 0..4 {
            for y in 0..4 {
                for x in 0..4 {
                    assert!(grid.count_neighbors(x, y, z) <= 26);
                }
            }
        }
    }

    #[test]
    fn test_neighbor_counting_clipped_at_corner() {
        // All 27 voxels of the corner cube alive: the corner itself sees 7
        let mut grid = Grid3::new(Dimensions3::new(4, 4, 4));
        for z in 0..2 {
            for y in 0..2 {
                for x in 0..2 {
                    grid.set(x, y, z, true).unwrap();
                }
            }
        }
        assert_eq!(grid.count_neighbors(0, 0, 0), 7);
    }

    #[test]
    fn test_all_dead_stays_dead() {
        let grid = Grid3::new(Dimensions3::new(5, 5, 5));
        let next = grid.step(&RuleSet::life_3d());
        assert!(next.is_empty());
    }

    #[test]
    fn test_birth_on_exactly_five_neighbors() {
        // Five alive voxels ringing the dead center (2, 2, 2)
        let mut grid = Grid3::new(Dimensions3::new(5, 5, 5));
        for (x, y, z) in [(1, 2, 2), (3, 2, 2), (2, 1, 2), (2, 3, 2), (2, 2, 1)] {
            grid.set(x, y, z, true).unwrap();
        }
        assert_eq!(grid.count_neighbors(2, 2, 2), 5);

        let next = grid.step(&RuleSet::life_3d());
        assert!(next.get(2, 2, 2));
    }

    #[test]
    fn test_no_birth_on_four_or_six_neighbors() {
        let rule = RuleSet::life_3d();

        let mut four = Grid3::new(Dimensions3::new(5, 5, 5));
        for (x, y, z) in [(1, 2, 2), (3, 2, 2), (2, 1, 2), (2, 3, 2)] {
            four.set(x, y, z, true).unwrap();
        }
        assert!(!four.step(&rule).get(2, 2, 2));

        let mut six = Grid3::new(Dimensions3::new(5, 5, 5));
        for (x, y, z) in [
            (1, 2, 2),
            (3, 2, 2),
            (2, 1, 2),
            (2, 3, 2),
            (2, 2, 1),
            (2, 2, 3),
        ] {
            six.set(x, y, z, true).unwrap();
        }
        assert!(!six.step(&rule).get(2, 2, 2));
    }

    #[test]
    fn test_survival_band_and_overcrowding() {
        let rule = RuleSet::life_3d();

        // Alive center with 4, 6 and 7 alive neighbors
        let neighbors = [
            (1, 2, 2),
            (3, 2, 2),
            (2, 1, 2),
            (2, 3, 2),
            (2, 2, 1),
            (2, 2, 3),
            (1, 1, 2),
        ];

        for keep in [4, 6] {
            let mut grid = lone_voxel(Dimensions3::new(5, 5, 5), 2, 2, 2);
            for &(x, y, z) in &neighbors[..keep] {
                grid.set(x, y, z, true).unwrap();
            }
            assert!(
                grid.step(&rule).get(2, 2, 2),
                "center should survive with {} neighbors",
                keep
            );
        }

        let mut grid = lone_voxel(Dimensions3::new(5, 5, 5), 2, 2, 2);
        for &(x, y, z) in &neighbors[..7] {
            grid.set(x, y, z, true).unwrap();
        }
        assert!(!grid.step(&rule).get(2, 2, 2));
    }

    #[test]
    fn test_step_is_pure() {
        let mut grid = Grid3::new(Dimensions3::new(6, 6, 6));
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        grid.randomize(&mut rng, 0.5);

        let before = grid.clone();
        let rule = RuleSet::life_3d();
        assert_eq!(grid.step(&rule), grid.step(&rule));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_stamp_single_cell_template() {
        let mut grid = Grid3::new(Dimensions3::new(4, 4, 4));
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        grid.randomize(&mut rng, 0.5);

        let dot = Pattern::from_rows(vec![vec![true]]).unwrap();
        grid.stamp(&dot, 0, 0, 0);
        assert!(grid.get(0, 0, 0));
    }

    #[test]
    fn test_stamp_overwrites_background() {
        // A dead template cell clears whatever randomize put underneath
        let mut grid = Grid3::new(Dimensions3::new(4, 4, 4));
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        grid.randomize(&mut rng, 1.0);

        let template = Pattern::from_rows(vec![vec![false, true]]).unwrap();
        grid.stamp(&template, 1, 1, 2);
        assert!(!grid.get(1, 1, 2));
        assert!(grid.get(2, 1, 2));
    }

    #[test]
    fn test_stamp_writes_single_plane() {
        let mut grid = Grid3::new(Dimensions3::new(4, 4, 4));
        let dot = Pattern::from_rows(vec![vec![true]]).unwrap();
        grid.stamp(&dot, 1, 1, 2);

        assert!(grid.get(1, 1, 2));
        assert_eq!(grid.alive_count(), 1);
    }

    #[test]
    fn test_stamp_truncated_at_bounds() {
        let mut grid = Grid3::new(Dimensions3::new(3, 3, 3));
        let bar = Pattern::from_rows(vec![vec![true, true, true, true]]).unwrap();

        // Two columns hang off the right edge; only the in-bounds pair lands
        grid.stamp(&bar, 1, 1, 1);
        assert_eq!(grid.alive_count(), 2);
        assert!(grid.get(1, 1, 1));
        assert!(grid.get(2, 1, 1));

        // Entirely out of bounds in z is a no-op, not an error
        let mut grid = Grid3::new(Dimensions3::new(3, 3, 3));
        grid.stamp(&bar, 0, 0, 5);
        assert!(grid.is_empty());
    }
}
