//! Harness configuration.
//!
//! Every parameter the pipeline stages need is carried in one explicit
//! structure, so the pipeline is re-entrant and testable with varied
//! parameters in the same process.

use std::path::PathBuf;

use crate::grid::{CartesianGrid, GridError};
use crate::io::PismOverrides;

/// Configuration for one Test P verification run.
#[derive(Debug, Clone)]
pub struct TestPConfig {
    /// Horizontal grid size; 51 corresponds to a 1 km grid.
    pub mx: usize,
    /// Domain half-width [m]; the margin of the exact profile sits at
    /// L = 22.5 km, inside the default 25 km.
    pub lx: f64,
    /// Directory containing the `pismr` executable.
    pub pism_path: PathBuf,
    /// Optional MPI launcher prefix, e.g. `"mpiexec -n 4"`.
    pub mpiexec: Option<String>,
    /// Path to the `exactP` evaluator.
    pub exact_path: PathBuf,
    /// Keep the generated files instead of deleting them on success.
    pub keep: bool,
    /// Absolute tolerance for the exact-solution evaluator.
    pub eps_abs: f64,
    /// Relative tolerance for the exact-solution evaluator.
    pub eps_rel: f64,
    /// Ice surface temperature [K].
    pub surface_temp: f64,
    /// Basal melt rate [m year-1].
    pub basal_melt_rate: f64,
    /// Generated configuration-override file.
    pub config_file: PathBuf,
    /// Generated bootstrap input file.
    pub input_file: PathBuf,
    /// Output file written by the solver.
    pub output_file: PathBuf,
    /// Parameter overrides for the solver run.
    pub overrides: PismOverrides,
}

impl Default for TestPConfig {
    fn default() -> Self {
        Self {
            mx: 51,
            lx: 25.0e3,
            pism_path: PathBuf::from("."),
            mpiexec: None,
            exact_path: PathBuf::from("./exactP"),
            keep: false,
            eps_abs: 1.0e-12,
            eps_rel: 1.0e-15,
            surface_temp: 260.0,
            basal_melt_rate: 0.20,
            config_file: PathBuf::from("testPconfig.nc"),
            input_file: PathBuf::from("inputforP.nc"),
            output_file: PathBuf::from("end.nc"),
            overrides: PismOverrides::default(),
        }
    }
}

impl TestPConfig {
    /// Check the grid parameters eagerly, before any file is touched.
    pub fn validate(&self) -> Result<(), GridError> {
        CartesianGrid::new(self.mx, self.lx).map(|_| ())
    }
}
