//! Per-variable drift statistics between two datasets.
//!
//! Both datasets are opened read-only. For each requested variable the
//! singleton dimensions are squeezed away, the elementwise absolute
//! difference is taken, and its mean and max are reported together with
//! the variable's recorded units.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Variables compared by default after a Test P run.
pub const DEFAULT_DRIFT_VARIABLES: &[&str] = &["bwat", "bwp"];

/// Error type for drift reporting.
#[derive(Debug, Error)]
pub enum DriftError {
    /// A requested variable is absent from one of the datasets.
    #[error("variable '{name}' not found in {}", .path.display())]
    VariableNotFound { name: String, path: PathBuf },

    /// The two variables disagree in shape after squeezing.
    #[error("variable '{name}': shapes {left:?} and {right:?} do not match after squeezing")]
    ShapeMismatch {
        name: String,
        left: Vec<usize>,
        right: Vec<usize>,
    },

    /// NetCDF library error.
    #[error("NetCDF error: {0}")]
    NetCDF(#[from] netcdf::Error),
}

/// Drift statistics for one variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDrift {
    pub name: String,
    /// Mean of the elementwise absolute difference.
    pub average: f64,
    /// Maximum of the elementwise absolute difference.
    pub max: f64,
    /// Units recorded on the truth variable (empty if unset).
    pub units: String,
}

impl fmt::Display for VariableDrift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "drift in {}: average = {:.6}, max = {:.6} [{}]",
            self.name, self.average, self.max, self.units
        )
    }
}

/// Shape with singleton dimensions removed.
fn squeezed_shape(var: &netcdf::Variable) -> Vec<usize> {
    var.dimensions()
        .iter()
        .map(|d| d.len())
        .filter(|&len| len > 1)
        .collect()
}

/// The `units` attribute of a variable, if any.
fn units_of(var: &netcdf::Variable) -> String {
    var.attribute_value("units")
        .and_then(|r| r.ok())
        .and_then(|v| match v {
            netcdf::AttributeValue::Str(s) => Some(s),
            _ => None,
        })
        .unwrap_or_default()
}

/// Compare the named variables between two datasets.
pub fn report_drift(
    truth_path: &Path,
    model_path: &Path,
    variables: &[&str],
) -> Result<Vec<VariableDrift>, DriftError> {
    let truth = netcdf::open(truth_path)?;
    let model = netcdf::open(model_path)?;

    let mut reports = Vec::with_capacity(variables.len());

    for &name in variables {
        let truth_var = truth
            .variable(name)
            .ok_or_else(|| DriftError::VariableNotFound {
                name: name.to_string(),
                path: truth_path.to_path_buf(),
            })?;
        let model_var = model
            .variable(name)
            .ok_or_else(|| DriftError::VariableNotFound {
                name: name.to_string(),
                path: model_path.to_path_buf(),
            })?;

        let truth_shape = squeezed_shape(&truth_var);
        let model_shape = squeezed_shape(&model_var);
        if truth_shape != model_shape {
            return Err(DriftError::ShapeMismatch {
                name: name.to_string(),
                left: truth_shape,
                right: model_shape,
            });
        }

        let truth_values: Vec<f64> = truth_var.get_values(..)?;
        let model_values: Vec<f64> = model_var.get_values(..)?;

        let diff: Vec<f64> = truth_values
            .iter()
            .zip(&model_values)
            .map(|(a, b)| (a - b).abs())
            .collect();

        let (average, max) = if diff.is_empty() {
            (0.0, 0.0)
        } else {
            let sum: f64 = diff.iter().sum();
            let max = diff.iter().fold(0.0f64, |m, &d| m.max(d));
            (sum / diff.len() as f64, max)
        };

        reports.push(VariableDrift {
            name: name.to_string(),
            average,
            max,
            units: units_of(&truth_var),
        });
    }

    Ok(reports)
}
