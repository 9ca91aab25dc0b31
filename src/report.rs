//! Module performance summary at a fixed operating condition.

use std::fmt;

use crate::model::{
    ModelError, ModuleParameters, OperatingPoint, find_max_power_point, open_circuit_voltage,
    solve_current,
};

/// Aggregate figures of merit for one module at one condition.
///
/// Computed in a single pass so the reported numbers are mutually
/// consistent: the fill factor uses exactly the `V_oc`, `I_sc`, and MPP
/// printed alongside it.
#[derive(Debug, Clone)]
pub struct ModuleReport {
    /// Module name as looked up in the catalog.
    pub module_name: String,
    /// Irradiance the report was evaluated at (W/m2).
    pub irradiance_w_m2: f64,
    /// Cell temperature the report was evaluated at (Celsius).
    pub temperature_c: f64,
    /// Open-circuit voltage (V).
    pub open_circuit_voltage_v: f64,
    /// Terminal current at 0 V (A).
    pub short_circuit_current_a: f64,
    /// Maximum-power operating point.
    pub mpp: OperatingPoint,
    /// Fill factor `P_mpp / (V_oc * I_sc)`; 0 when the denominator vanishes.
    pub fill_factor: f64,
}

impl ModuleReport {
    /// Evaluates the module at the given conditions.
    ///
    /// # Errors
    ///
    /// Propagates solver and tracker failures unchanged.
    pub fn from_conditions(
        module_name: &str,
        params: &ModuleParameters,
        irradiance_w_m2: f64,
        temperature_c: f64,
    ) -> Result<Self, ModelError> {
        let open_circuit_voltage_v = open_circuit_voltage(params, irradiance_w_m2, temperature_c)?;
        let short_circuit_current_a = solve_current(params, irradiance_w_m2, temperature_c, 0.0)?;
        let mpp = find_max_power_point(params, irradiance_w_m2, temperature_c)?;

        let denominator = open_circuit_voltage_v * short_circuit_current_a;
        let fill_factor = if denominator > 0.0 {
            mpp.power_w() / denominator
        } else {
            0.0
        };

        Ok(Self {
            module_name: module_name.to_string(),
            irradiance_w_m2,
            temperature_c,
            open_circuit_voltage_v,
            short_circuit_current_a,
            mpp,
            fill_factor,
        })
    }
}

impl fmt::Display for ModuleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Module Report ---")?;
        writeln!(f, "Module:                {}", self.module_name)?;
        writeln!(
            f,
            "Conditions:            {:.0} W/m2, {:.1} C",
            self.irradiance_w_m2, self.temperature_c
        )?;
        writeln!(
            f,
            "Open-circuit voltage:  {:.2} V",
            self.open_circuit_voltage_v
        )?;
        writeln!(
            f,
            "Short-circuit current: {:.3} A",
            self.short_circuit_current_a
        )?;
        writeln!(f, "MPP voltage:           {:.2} V", self.mpp.voltage_v)?;
        writeln!(f, "MPP current:           {:.3} A", self.mpp.current_a)?;
        writeln!(f, "MPP power:             {:.1} W", self.mpp.power_w())?;
        write!(f, "Fill factor:           {:.3}", self.fill_factor)
    }
}
