//! Post-run analysis: drift between the synthesized truth fields and the
//! solver output.

mod drift;

pub use drift::{report_drift, DriftError, VariableDrift, DEFAULT_DRIFT_VARIABLES};
