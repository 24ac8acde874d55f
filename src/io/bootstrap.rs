//! Bootstrap (model input) dataset assembly.
//!
//! The dataset carries dimensions `x`, `y`, and an unlimited `t` with time
//! bounds, coordinate variables with CF attributes, and one `("y", "x")`
//! f64 variable per field. Field shapes are validated against the grid
//! before the file is created, so a shape mismatch never leaves a partial
//! dataset behind.

use std::path::Path;

use chrono::Utc;
use thiserror::Error;

use crate::grid::{CartesianGrid, Field2D};

/// Error type for dataset assembly.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A field's array shape does not match the grid dimensions.
    #[error("field '{name}' has shape {actual:?}, grid expects {expected:?}")]
    ShapeMismatch {
        name: String,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// NetCDF library error.
    #[error("NetCDF error: {0}")]
    NetCDF(#[from] netcdf::Error),
}

/// Descriptive metadata attached to a field variable.
#[derive(Debug, Clone)]
pub struct FieldMetadata {
    pub long_name: &'static str,
    pub units: Option<&'static str>,
    pub standard_name: Option<&'static str>,
    pub valid_min: Option<f64>,
}

impl FieldMetadata {
    pub fn new(long_name: &'static str) -> Self {
        Self {
            long_name,
            units: None,
            standard_name: None,
            valid_min: None,
        }
    }

    pub fn with_units(mut self, units: &'static str) -> Self {
        self.units = Some(units);
        self
    }

    pub fn with_standard_name(mut self, standard_name: &'static str) -> Self {
        self.standard_name = Some(standard_name);
        self
    }

    pub fn with_valid_min(mut self, valid_min: f64) -> Self {
        self.valid_min = Some(valid_min);
        self
    }
}

/// A field's data: a gridded array or a constant filling the whole grid.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Grid(&'a Field2D),
    Constant(f64),
}

/// A named field with its data and metadata, ready for assembly.
#[derive(Debug, Clone)]
pub struct BootstrapField<'a> {
    pub name: &'static str,
    pub value: FieldValue<'a>,
    pub metadata: FieldMetadata,
}

impl<'a> BootstrapField<'a> {
    pub fn grid(name: &'static str, field: &'a Field2D, metadata: FieldMetadata) -> Self {
        Self {
            name,
            value: FieldValue::Grid(field),
            metadata,
        }
    }

    pub fn constant(name: &'static str, value: f64, metadata: FieldMetadata) -> Self {
        Self {
            name,
            value: FieldValue::Constant(value),
            metadata,
        }
    }
}

/// Write the bootstrap dataset.
///
/// Every field in `fields` is written exactly once. All gridded field
/// shapes are checked against `(mx, mx)` up front; on mismatch no file is
/// created. `command_line` is recorded in the global `history` attribute
/// together with a UTC timestamp.
pub fn write_bootstrap(
    path: &Path,
    grid: &CartesianGrid,
    fields: &[BootstrapField],
    command_line: &str,
) -> Result<(), DatasetError> {
    let mx = grid.mx();
    let expected = (mx, mx);

    for field in fields {
        if let FieldValue::Grid(data) = field.value {
            if data.shape() != expected {
                return Err(DatasetError::ShapeMismatch {
                    name: field.name.to_string(),
                    expected,
                    actual: data.shape(),
                });
            }
        }
    }

    let mut file = netcdf::create(path)?;

    file.add_dimension("x", mx)?;
    file.add_dimension("y", mx)?;
    file.add_unlimited_dimension("t")?;
    file.add_dimension("nv", 2)?;

    {
        let mut x_var = file.add_variable::<f64>("x", &["x"])?;
        x_var.put_attribute("axis", "X")?;
        x_var.put_attribute("long_name", "X-coordinate in Cartesian system")?;
        x_var.put_attribute("standard_name", "projection_x_coordinate")?;
        x_var.put_attribute("units", "m")?;
        x_var.put_values(grid.x(), ..)?;
    }

    {
        let mut y_var = file.add_variable::<f64>("y", &["y"])?;
        y_var.put_attribute("axis", "Y")?;
        y_var.put_attribute("long_name", "Y-coordinate in Cartesian system")?;
        y_var.put_attribute("standard_name", "projection_y_coordinate")?;
        y_var.put_attribute("units", "m")?;
        y_var.put_values(grid.y(), ..)?;
    }

    {
        let mut t_var = file.add_variable::<f64>("t", &["t"])?;
        t_var.put_attribute("axis", "T")?;
        t_var.put_attribute("long_name", "time")?;
        t_var.put_attribute("units", "seconds since 1-1-1")?;
        t_var.put_attribute("calendar", "365_day")?;
        t_var.put_attribute("bounds", "time_bounds")?;
    }

    file.add_variable::<f64>("time_bounds", &["t", "nv"])?;

    for field in fields {
        let mut var = file.add_variable::<f64>(field.name, &["y", "x"])?;
        var.put_attribute("long_name", field.metadata.long_name)?;
        if let Some(units) = field.metadata.units {
            var.put_attribute("units", units)?;
        }
        if let Some(standard_name) = field.metadata.standard_name {
            var.put_attribute("standard_name", standard_name)?;
        }
        if let Some(valid_min) = field.metadata.valid_min {
            var.put_attribute("valid_min", valid_min)?;
        }

        match field.value {
            FieldValue::Grid(data) => var.put_values(data.values(), ..)?,
            FieldValue::Constant(value) => {
                let data = vec![value; mx * mx];
                var.put_values(&data, ..)?;
            }
        }
    }

    let now = Utc::now();
    file.add_attribute(
        "history",
        format!("{}: {}", now.format("%Y-%m-%d %H:%M:%S UTC"), command_line).as_str(),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn small_grid() -> CartesianGrid {
        CartesianGrid::new(3, 1.0).unwrap()
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("boot.nc");
        let grid = small_grid();

        let mut field = Field2D::zeros(3, 3);
        for row in 0..3 {
            for col in 0..3 {
                field.set(row, col, (row * 3 + col) as f64);
            }
        }

        let fields = [
            BootstrapField::grid(
                "thk",
                &field,
                FieldMetadata::new("ice thickness")
                    .with_units("m")
                    .with_standard_name("land_ice_thickness")
                    .with_valid_min(0.0),
            ),
            BootstrapField::constant(
                "bcflag",
                1.0,
                FieldMetadata::new("if =1, apply u_ssa_bc and v_ssa_bc as sliding velocity"),
            ),
        ];

        write_bootstrap(&path, &grid, &fields, "testp --Mx 3").unwrap();

        let file = netcdf::open(&path).unwrap();
        assert_eq!(file.dimension("x").unwrap().len(), 3);
        assert_eq!(file.dimension("y").unwrap().len(), 3);

        let thk = file.variable("thk").unwrap();
        let values: Vec<f64> = thk.get_values(..).unwrap();
        assert_eq!(values, field.values());

        let units = thk
            .attribute_value("units")
            .and_then(|r| r.ok())
            .and_then(|v| match v {
                netcdf::AttributeValue::Str(s) => Some(s),
                _ => None,
            })
            .unwrap();
        assert_eq!(units, "m");

        let flags: Vec<f64> = file.variable("bcflag").unwrap().get_values(..).unwrap();
        assert!(flags.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_history_records_command_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("boot.nc");

        write_bootstrap(&path, &small_grid(), &[], "testp --Mx 3 --keep").unwrap();

        let file = netcdf::open(&path).unwrap();
        let history = file
            .attribute("history")
            .and_then(|a| a.value().ok())
            .and_then(|v| match v {
                netcdf::AttributeValue::Str(s) => Some(s),
                _ => None,
            })
            .unwrap();
        assert!(history.contains("testp --Mx 3 --keep"));
    }

    #[test]
    fn test_shape_mismatch_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("boot.nc");

        let wrong = Field2D::zeros(2, 2);
        let fields = [BootstrapField::grid(
            "thk",
            &wrong,
            FieldMetadata::new("ice thickness"),
        )];

        let err = write_bootstrap(&path, &small_grid(), &fields, "testp").unwrap_err();
        assert!(matches!(err, DatasetError::ShapeMismatch { .. }));
        assert!(!path.exists(), "partial dataset left behind");
    }
}
