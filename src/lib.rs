//! # testp-rs
//!
//! Verification harness for PISM's `-hydrology distributed` model (Test P).
//!
//! The harness synthesizes the radially symmetric Test P problem on a
//! Cartesian grid, writes it as a PISM bootstrap dataset, runs `pismr` on
//! it, and reports the drift between the solver output and the exact
//! solution. Building blocks:
//! - Cartesian grid and the radius-sorted cell index
//! - Exact-solution adapter (external `exactP` evaluator)
//! - Gridded field synthesis (scalar scatter + radially outward velocity)
//! - Bootstrap dataset and configuration-override output (NetCDF)
//! - PISM subprocess invocation
//! - Per-variable drift statistics

pub mod analysis;
pub mod config;
pub mod exact;
pub mod fields;
pub mod grid;
pub mod harness;
pub mod io;
pub mod pism;

// Re-export main types for convenience
pub use analysis::{report_drift, DriftError, VariableDrift, DEFAULT_DRIFT_VARIABLES};
pub use config::TestPConfig;
pub use exact::{
    pair_with_index, ExactError, ExactPTool, ExactSample, ExactSolution, RadialSample,
};
pub use fields::{radially_outward, synthesize, SyntheticFields};
pub use grid::{CartesianGrid, Field2D, GridError, RadialIndex, RadiusRecord};
pub use harness::{bootstrap_fields, HarnessError};
pub use io::{
    write_bootstrap, write_config_override, BootstrapField, DatasetError, FieldMetadata,
    FieldValue, PismOverrides,
};
pub use pism::{solver_present, PismRunner, RunOptions, SolverError};
