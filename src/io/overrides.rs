//! The configuration-override artifact consumed by the solver.
//!
//! All values are fixed by the verification test definition; none are
//! derived at runtime. The file contains a single scalar byte variable
//! `pism_overrides` whose attributes carry the parameters, each with a
//! companion `_doc` string.

use std::path::Path;

use super::DatasetError;

/// Parameter overrides for the Test P run.
#[derive(Debug, Clone)]
pub struct PismOverrides {
    /// Ice softness [Pa-3 s-1].
    pub ice_softness: f64,
    /// Hydraulic conductivity `k`.
    pub hydraulic_conductivity: f64,
    /// Regularizing porosity `phi_0` [pure].
    pub regularizing_porosity: f64,
    /// Maximum till water thickness [m]; zero turns the till water
    /// mechanism off.
    pub tillwat_max: f64,
    /// Water thickness power `alpha` in the flux.
    pub thickness_power_in_flux: f64,
    /// Pressure-gradient power `beta` in the flux.
    pub gradient_power_in_flux: f64,
    /// Roughness scale `W_r` [m].
    pub roughness_scale: f64,
    /// Yield stress model selector.
    pub yield_stress_model: &'static str,
    /// Default yield stress [Pa].
    pub default_tauc: f64,
}

impl Default for PismOverrides {
    fn default() -> Self {
        Self {
            ice_softness: 3.1689e-24,
            hydraulic_conductivity: 1.0e-2 / (1000.0 * 9.81),
            regularizing_porosity: 0.01,
            tillwat_max: 0.0,
            thickness_power_in_flux: 1.0,
            gradient_power_in_flux: 2.0,
            roughness_scale: 1.0,
            yield_stress_model: "constant",
            default_tauc: 1.0e6,
        }
    }
}

/// Write the override file.
pub fn write_config_override(
    path: &Path,
    overrides: &PismOverrides,
) -> Result<(), DatasetError> {
    let mut file = netcdf::create(path)?;

    let mut var = file.add_variable::<i8>("pism_overrides", &[])?;

    var.put_attribute("ice_softness", overrides.ice_softness)?;
    var.put_attribute("ice_softness_doc", "Pa-3 s-1; ice softness; NOT DEFAULT")?;

    var.put_attribute(
        "hydrology_hydraulic_conductivity",
        overrides.hydraulic_conductivity,
    )?;
    var.put_attribute("hydrology_hydraulic_conductivity_doc", "= k; NOT DEFAULT")?;

    var.put_attribute(
        "hydrology_regularizing_porosity",
        overrides.regularizing_porosity,
    )?;
    var.put_attribute("hydrology_regularizing_porosity_doc", "[pure]; phi_0 in notes")?;

    var.put_attribute("hydrology_tillwat_max", overrides.tillwat_max)?;
    var.put_attribute(
        "hydrology_tillwat_max_doc",
        "m; turn off till water mechanism",
    )?;

    var.put_attribute(
        "hydrology_thickness_power_in_flux",
        overrides.thickness_power_in_flux,
    )?;
    var.put_attribute("hydrology_thickness_power_in_flux_doc", "; = alpha in notes")?;

    var.put_attribute(
        "hydrology_gradient_power_in_flux",
        overrides.gradient_power_in_flux,
    )?;
    var.put_attribute("hydrology_gradient_power_in_flux_doc", "; = beta in notes")?;

    var.put_attribute("hydrology_roughness_scale", overrides.roughness_scale)?;
    var.put_attribute(
        "hydrology_roughness_scale_doc",
        "m; W_r in notes; roughness scale",
    )?;

    var.put_attribute("yield_stress_model", overrides.yield_stress_model)?;
    var.put_attribute(
        "yield_stress_model_doc",
        "only the constant yield stress model works without till",
    )?;

    var.put_attribute("default_tauc", overrides.default_tauc)?;
    var.put_attribute("default_tauc_doc", "set default to 'high tauc'")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn attr_f64(var: &netcdf::Variable, name: &str) -> Option<f64> {
        var.attribute_value(name)
            .and_then(|r| r.ok())
            .and_then(|v| match v {
                netcdf::AttributeValue::Double(d) => Some(d),
                netcdf::AttributeValue::Float(f) => Some(f as f64),
                _ => None,
            })
    }

    #[test]
    fn test_write_and_read_back_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.nc");

        write_config_override(&path, &PismOverrides::default()).unwrap();

        let file = netcdf::open(&path).unwrap();
        let var = file.variable("pism_overrides").unwrap();

        assert_eq!(attr_f64(&var, "ice_softness"), Some(3.1689e-24));
        assert_eq!(attr_f64(&var, "hydrology_tillwat_max"), Some(0.0));
        assert_eq!(attr_f64(&var, "hydrology_gradient_power_in_flux"), Some(2.0));

        let model = var
            .attribute_value("yield_stress_model")
            .and_then(|r| r.ok())
            .and_then(|v| match v {
                netcdf::AttributeValue::Str(s) => Some(s),
                _ => None,
            })
            .unwrap();
        assert_eq!(model, "constant");
    }

    #[test]
    fn test_default_conductivity_value() {
        let overrides = PismOverrides::default();
        assert!((overrides.hydraulic_conductivity - 1.0e-2 / 9810.0).abs() < 1e-12);
    }
}
