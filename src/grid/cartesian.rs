//! Square Cartesian grid over `[-Lx, Lx] × [-Lx, Lx]`.
//!
//! Meshgrid convention (fixed, relied on by the field synthesizer and the
//! bootstrap writer): `xx[row, col] = x[col]` and `yy[row, col] = x[row]`,
//! i.e. the row index walks the y axis and the column index walks the x
//! axis. Gridded variables are therefore dimensioned `("y", "x")` on disk.

use thiserror::Error;

/// Error type for grid construction.
#[derive(Debug, Error)]
pub enum GridError {
    /// Grid parameters that cannot describe a valid grid.
    #[error("invalid grid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Dense 2D field aligned with the grid, row-major flat storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Field2D {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Field2D {
    /// Create a field filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::constant(rows, cols, 0.0)
    }

    /// Create a field filled with a constant value.
    pub fn constant(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// Value at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Set the value at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// Shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Row-major backing slice.
    pub fn values(&self) -> &[f64] {
        &self.data
    }
}

/// Square Cartesian coordinate grid.
///
/// Both axes share the same 1D coordinate array: `Mx` evenly spaced points
/// spanning `[-Lx, Lx]`.
#[derive(Debug, Clone)]
pub struct CartesianGrid {
    x: Vec<f64>,
    mx: usize,
    lx: f64,
}

impl CartesianGrid {
    /// Build a grid with `mx` cells per side over `[-lx, lx]`.
    ///
    /// `mx` must be at least 2 and `lx` strictly positive.
    pub fn new(mx: usize, lx: f64) -> Result<Self, GridError> {
        if mx < 2 {
            return Err(GridError::InvalidConfiguration(format!(
                "Mx must be at least 2, got {mx}"
            )));
        }
        if !(lx > 0.0) || !lx.is_finite() {
            return Err(GridError::InvalidConfiguration(format!(
                "Lx must be a positive length, got {lx}"
            )));
        }

        let dx = 2.0 * lx / (mx - 1) as f64;
        let x: Vec<f64> = (0..mx).map(|i| -lx + i as f64 * dx).collect();

        Ok(Self { x, mx, lx })
    }

    /// Number of cells per side.
    pub fn mx(&self) -> usize {
        self.mx
    }

    /// Half-width of the domain.
    pub fn lx(&self) -> f64 {
        self.lx
    }

    /// Grid spacing (identical in both axes).
    pub fn spacing(&self) -> f64 {
        2.0 * self.lx / (self.mx - 1) as f64
    }

    /// The 1D x coordinates.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// The 1D y coordinates (identical to `x` on a square grid).
    pub fn y(&self) -> &[f64] {
        &self.x
    }

    /// 2D coordinate arrays `(xx, yy)` with `xx[row, col] = x[col]` and
    /// `yy[row, col] = x[row]`.
    pub fn meshgrid(&self) -> (Field2D, Field2D) {
        let mut xx = Field2D::zeros(self.mx, self.mx);
        let mut yy = Field2D::zeros(self.mx, self.mx);
        for row in 0..self.mx {
            for col in 0..self.mx {
                xx.set(row, col, self.x[col]);
                yy.set(row, col, self.x[row]);
            }
        }
        (xx, yy)
    }
}
