//! The Test P verification pipeline.
//!
//! Strictly sequential: grid → radial index → exact solution → gridded
//! fields → config override + bootstrap file → solver run → drift report,
//! then cleanup of the generated files unless retention was requested.
//! Each stage consumes only the previous stage's output; a failure at any
//! stage aborts the run.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::{report_drift, DriftError, VariableDrift, DEFAULT_DRIFT_VARIABLES};
use crate::config::TestPConfig;
use crate::exact::{pair_with_index, ExactError, ExactSolution};
use crate::fields::{synthesize, SyntheticFields};
use crate::grid::{CartesianGrid, GridError, RadialIndex};
use crate::io::{
    write_bootstrap, write_config_override, BootstrapField, DatasetError, FieldMetadata,
};
use crate::pism::{PismRunner, RunOptions, SolverError};

/// Error type for a whole harness run.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Exact(#[from] ExactError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Solver(#[from] SolverError),
    #[error(transparent)]
    Drift(#[from] DriftError),
}

/// The bootstrap variable table for a Test P run.
///
/// Gridded truth fields come from the synthesizer; the remaining inputs
/// are constants: flat bed, zero mass balance, fixed surface temperature,
/// uniform basal melt, and Dirichlet velocity flags everywhere.
pub fn bootstrap_fields<'a>(
    fields: &'a SyntheticFields,
    config: &TestPConfig,
) -> Vec<BootstrapField<'a>> {
    vec![
        BootstrapField::grid(
            "thk",
            &fields.thickness,
            FieldMetadata::new("ice thickness")
                .with_units("m")
                .with_valid_min(0.0)
                .with_standard_name("land_ice_thickness"),
        ),
        BootstrapField::constant(
            "topg",
            0.0,
            FieldMetadata::new("bedrock topography")
                .with_units("m")
                .with_standard_name("bedrock_altitude"),
        ),
        BootstrapField::constant(
            "climatic_mass_balance",
            0.0,
            FieldMetadata::new("climatic mass balance for -surface given")
                .with_units("kg m-2 year-1")
                .with_standard_name("land_ice_surface_specific_mass_balance"),
        ),
        BootstrapField::constant(
            "ice_surface_temp",
            config.surface_temp,
            FieldMetadata::new("ice surface temp (K) for -surface given")
                .with_units("Kelvin")
                .with_valid_min(0.0),
        ),
        BootstrapField::constant(
            "bmelt",
            config.basal_melt_rate,
            FieldMetadata::new("basal melt rate")
                .with_units("m year-1")
                .with_standard_name("land_ice_basal_melt_rate"),
        ),
        BootstrapField::grid(
            "bwat",
            &fields.water_thickness,
            FieldMetadata::new("thickness of basal water layer")
                .with_units("m")
                .with_valid_min(0.0),
        ),
        BootstrapField::grid(
            "bwp",
            &fields.water_pressure,
            FieldMetadata::new("water pressure in basal water layer")
                .with_units("Pa")
                .with_valid_min(0.0),
        ),
        BootstrapField::constant(
            "bcflag",
            1.0,
            FieldMetadata::new("if =1, apply u_ssa_bc and v_ssa_bc as sliding velocity"),
        ),
        BootstrapField::grid(
            "u_ssa_bc",
            &fields.u_bc,
            FieldMetadata::new("x-component of prescribed sliding velocity").with_units("m s-1"),
        ),
        BootstrapField::grid(
            "v_ssa_bc",
            &fields.v_bc,
            FieldMetadata::new("y-component of prescribed sliding velocity").with_units("m s-1"),
        ),
    ]
}

/// Run the whole verification pipeline and return the drift report.
///
/// `command_line` is recorded as provenance in the generated input file.
pub fn run(
    config: &TestPConfig,
    exact: &dyn ExactSolution,
    command_line: &str,
) -> Result<Vec<VariableDrift>, HarnessError> {
    let grid = CartesianGrid::new(config.mx, config.lx)?;

    info!("sorting radial variable ...");
    let index = RadialIndex::from_grid(&grid);

    info!("evaluating exact solution at {} radii ...", index.len());
    let samples = exact.evaluate(&index.radii(), config.eps_abs, config.eps_rel)?;
    let paired = pair_with_index(&index, samples)?;

    info!("creating gridded variables ...");
    let fields = synthesize(&paired, &grid);

    info!("generating {} ...", config.config_file.display());
    write_config_override(&config.config_file, &config.overrides)?;

    info!("creating {} ...", config.input_file.display());
    let table = bootstrap_fields(&fields, config);
    write_bootstrap(&config.input_file, &grid, &table, command_line)?;

    info!("running PISM ...");
    let runner = PismRunner::new(&config.pism_path).with_mpiexec(config.mpiexec.clone());
    let opts = RunOptions::new(
        config.mx,
        &config.config_file,
        &config.input_file,
        &config.output_file,
    );
    runner.run(&opts)?;

    let drift = report_drift(
        &config.input_file,
        &config.output_file,
        DEFAULT_DRIFT_VARIABLES,
    )?;

    if config.keep {
        info!("keeping generated files");
    } else {
        cleanup(&[
            config.config_file.as_path(),
            config.input_file.as_path(),
            config.output_file.as_path(),
        ]);
    }

    Ok(drift)
}

/// Best-effort removal of generated files.
fn cleanup(paths: &[&Path]) {
    for path in paths {
        if let Err(err) = fs::remove_file(path) {
            warn!("could not remove {}: {}", path.display(), err);
        }
    }
}
