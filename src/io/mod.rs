//! NetCDF output for the solver: the bootstrap (model input) dataset and
//! the configuration-override file.
//!
//! Both files follow PISM's conventions:
//! - **Bootstrap dataset**: dimensions `x`, `y`, `t` (unlimited), one f64
//!   variable per gridded or constant field, each annotated with
//!   `long_name`/`units`/`standard_name`/`valid_min` metadata, and a
//!   `history` attribute recording the invoking command line
//! - **Config override**: a scalar `pism_overrides` variable whose
//!   attributes carry the parameter values

mod bootstrap;
mod overrides;

pub use bootstrap::{
    write_bootstrap, BootstrapField, DatasetError, FieldMetadata, FieldValue,
};
pub use overrides::{write_config_override, PismOverrides};
