//! Scattering per-radius exact solutions back onto the 2D grid.
//!
//! Each paired record carries its originating `(row, col)`, so every grid
//! cell is written exactly once. The sliding-velocity boundary condition is
//! derived from the speed magnitude and the cell's own position: the
//! direction is radially outward from the origin.

use crate::exact::RadialSample;
use crate::grid::{CartesianGrid, Field2D};

/// The gridded variables synthesized from the exact solution.
#[derive(Debug, Clone)]
pub struct SyntheticFields {
    /// Ice thickness `thk` [m].
    pub thickness: Field2D,
    /// Sliding speed magnitude [m s-1].
    pub sliding_speed: Field2D,
    /// Basal water thickness `bwat` [m].
    pub water_thickness: Field2D,
    /// Basal water pressure `bwp` [Pa].
    pub water_pressure: Field2D,
    /// Prescribed sliding velocity, x component `u_ssa_bc` [m s-1].
    pub u_bc: Field2D,
    /// Prescribed sliding velocity, y component `v_ssa_bc` [m s-1].
    pub v_bc: Field2D,
}

/// Components of a vector field that is radially outward from the origin
/// with the given magnitude. The origin itself maps to the zero vector.
pub fn radially_outward(mag: f64, x: f64, y: f64) -> (f64, f64) {
    let r = (x * x + y * y).sqrt();
    if r == 0.0 {
        return (0.0, 0.0);
    }
    (mag * x / r, mag * y / r)
}

/// Scatter paired per-radius samples onto gridded fields.
///
/// Writes `Field[row, col] = sample.solution.<quantity>` for every record,
/// and derives the Dirichlet velocity pair from the sliding speed and the
/// cell coordinates.
pub fn synthesize(samples: &[RadialSample], grid: &CartesianGrid) -> SyntheticFields {
    let mx = grid.mx();
    let x = grid.x();

    let mut thickness = Field2D::zeros(mx, mx);
    let mut sliding_speed = Field2D::zeros(mx, mx);
    let mut water_thickness = Field2D::zeros(mx, mx);
    let mut water_pressure = Field2D::zeros(mx, mx);
    let mut u_bc = Field2D::zeros(mx, mx);
    let mut v_bc = Field2D::zeros(mx, mx);

    for sample in samples {
        let (row, col) = (sample.row, sample.col);

        thickness.set(row, col, sample.solution.h);
        sliding_speed.set(row, col, sample.solution.magvb);
        water_thickness.set(row, col, sample.solution.w);
        water_pressure.set(row, col, sample.solution.p);

        // xx[row, col] = x[col], yy[row, col] = x[row]
        let (u, v) = radially_outward(sample.solution.magvb, x[col], x[row]);
        u_bc.set(row, col, u);
        v_bc.set(row, col, v);
    }

    SyntheticFields {
        thickness,
        sliding_speed,
        water_thickness,
        water_pressure,
        u_bc,
        v_bc,
    }
}
