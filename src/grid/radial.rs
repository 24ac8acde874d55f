//! Radius-sorted index of grid cells.
//!
//! Every cell appears exactly once with its `(row, col)` identity attached;
//! only that bookkeeping makes it safe to evaluate the exact solution along
//! the 1D radial coordinate and scatter the results back onto the 2D grid.

use super::{CartesianGrid, Field2D};

/// One grid cell tagged with its distance from the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusRecord {
    /// Distance from the origin, `sqrt(x² + y²)`.
    pub r: f64,
    /// Row index (y axis) in the grid.
    pub row: usize,
    /// Column index (x axis) in the grid.
    pub col: usize,
}

/// All grid cells sorted by ascending radius.
///
/// The sort is stable: cells at identical radius (symmetric cells) keep
/// their row-major enumeration order, so the ordering is reproducible
/// across runs for the same grid.
#[derive(Debug, Clone)]
pub struct RadialIndex {
    records: Vec<RadiusRecord>,
}

impl RadialIndex {
    /// Build the index from a grid's meshgrid coordinates.
    pub fn from_grid(grid: &CartesianGrid) -> Self {
        let (xx, yy) = grid.meshgrid();
        Self::from_coordinates(&xx, &yy)
    }

    /// Build the index from explicit 2D coordinate arrays.
    ///
    /// # Panics
    ///
    /// Panics if the two arrays have different shapes.
    pub fn from_coordinates(xx: &Field2D, yy: &Field2D) -> Self {
        assert_eq!(
            xx.shape(),
            yy.shape(),
            "coordinate arrays must have the same shape"
        );

        let (rows, cols) = xx.shape();
        let mut records = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let x = xx.get(row, col);
                let y = yy.get(row, col);
                records.push(RadiusRecord {
                    r: (x * x + y * y).sqrt(),
                    row,
                    col,
                });
            }
        }

        // sort_by is stable, so equal radii keep row-major order
        records.sort_by(|a, b| a.r.total_cmp(&b.r));

        Self { records }
    }

    /// Number of records (one per grid cell).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in ascending radius order. This is the canonical ordering
    /// fed to the exact-solution evaluator.
    pub fn ascending(&self) -> &[RadiusRecord] {
        &self.records
    }

    /// Records in descending radius order, for inspection.
    pub fn descending(&self) -> impl Iterator<Item = &RadiusRecord> {
        self.records.iter().rev()
    }

    /// The ascending radius values, in one-to-one correspondence with
    /// [`ascending`](Self::ascending).
    pub fn radii(&self) -> Vec<f64> {
        self.records.iter().map(|rec| rec.r).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sorted_ascending() {
        let grid = CartesianGrid::new(8, 4.0).unwrap();
        let index = RadialIndex::from_grid(&grid);

        for pair in index.ascending().windows(2) {
            assert!(
                pair[0].r <= pair[1].r,
                "radii out of order: {} > {}",
                pair[0].r,
                pair[1].r
            );
        }
    }

    #[test]
    fn test_bijection_over_cells() {
        let grid = CartesianGrid::new(7, 3.0).unwrap();
        let index = RadialIndex::from_grid(&grid);

        assert_eq!(index.len(), 49);

        let cells: HashSet<(usize, usize)> = index
            .ascending()
            .iter()
            .map(|rec| (rec.row, rec.col))
            .collect();
        assert_eq!(cells.len(), 49, "duplicate (row, col) in index");
        for row in 0..7 {
            for col in 0..7 {
                assert!(cells.contains(&(row, col)), "missing cell ({row}, {col})");
            }
        }
    }

    #[test]
    fn test_ties_keep_row_major_order() {
        // On a symmetric grid many cells share a radius exactly; records at
        // equal radius must appear in row-major enumeration order.
        let grid = CartesianGrid::new(6, 3.0).unwrap();
        let index = RadialIndex::from_grid(&grid);

        let records = index.ascending();
        for pair in records.windows(2) {
            if pair[0].r == pair[1].r {
                assert!(
                    (pair[0].row, pair[0].col) < (pair[1].row, pair[1].col),
                    "tie broken out of enumeration order"
                );
            }
        }
    }

    #[test]
    fn test_origin_first_on_odd_grid() {
        let grid = CartesianGrid::new(5, 2.0).unwrap();
        let index = RadialIndex::from_grid(&grid);

        let first = &index.ascending()[0];
        assert_eq!(first.r, 0.0);
        assert_eq!((first.row, first.col), (2, 2));
    }

    #[test]
    fn test_descending_mirrors_ascending() {
        let grid = CartesianGrid::new(4, 1.0).unwrap();
        let index = RadialIndex::from_grid(&grid);

        let up: Vec<f64> = index.radii();
        let down: Vec<f64> = index.descending().map(|rec| rec.r).collect();
        let mut reversed = up.clone();
        reversed.reverse();
        assert_eq!(down, reversed);
    }

    #[test]
    fn test_radii_match_records() {
        let grid = CartesianGrid::new(4, 2.0).unwrap();
        let index = RadialIndex::from_grid(&grid);

        let radii = index.radii();
        for (value, record) in radii.iter().zip(index.ascending()) {
            assert_eq!(*value, record.r);
        }
    }
}
