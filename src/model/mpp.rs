//! Coarse-to-fine hill climb locating the maximum-power point.

use super::diode::solve_current;
use super::types::{ModelError, ModuleParameters, OperatingPoint};

/// Initial trial voltage (V).
const START_VOLTAGE_V: f64 = 1.0;

/// Step size below which the search stops refining (V).
const MIN_STEP_V: f64 = 1e-13;

/// Ceiling on solver trials across all step decades.
const MAX_TRIALS: usize = 10_000;

/// Finds the terminal voltage that maximizes delivered power.
///
/// Walks upward from 1 V in unit steps until power drops, then backs off two
/// steps and refines with a ten-times-smaller step. Each decade sharpens the
/// estimate by one decimal order; the search stops once the step underflows
/// `1e-13` V. Assumes the power curve is unimodal over the explored range,
/// which holds for the single-diode model's normal operating region.
///
/// # Arguments
///
/// * `params` - Module electrical parameters
/// * `irradiance_w_m2` - Incident irradiance (W/m2, reference 1000)
/// * `temperature_c` - Cell temperature (Celsius)
///
/// # Errors
///
/// Solver failures at any trial voltage propagate unchanged; the tracker
/// performs no independent validation of the solver's output. Returns
/// `ModelError::NonConvergence` if the trial budget is exhausted, which
/// indicates a power curve the climb cannot settle on (e.g. a starting
/// voltage already past the peak of a degenerate curve).
pub fn find_max_power_point(
    params: &ModuleParameters,
    irradiance_w_m2: f64,
    temperature_c: f64,
) -> Result<OperatingPoint, ModelError> {
    let mut voltage = START_VOLTAGE_V;
    let mut current = solve_current(params, irradiance_w_m2, temperature_c, voltage)?;
    let mut power = voltage * current;
    let mut step = 1.0;
    let mut trials = 0usize;

    while step > MIN_STEP_V {
        let previous_power = power;
        voltage += step;
        current = solve_current(params, irradiance_w_m2, temperature_c, voltage)?;
        power = voltage * current;
        trials += 1;

        if previous_power > power {
            // Overshot the peak: return to the point before the advance and
            // refine with a smaller step.
            voltage -= step * 2.0;
            step *= 0.1;
            current = solve_current(params, irradiance_w_m2, temperature_c, voltage)?;
            power = voltage * current;
            trials += 1;
        }

        if trials >= MAX_TRIALS {
            return Err(ModelError::NonConvergence {
                voltage_v: voltage,
                iterations: MAX_TRIALS,
            });
        }
    }

    Ok(OperatingPoint {
        voltage_v: voltage,
        current_a: current,
    })
}
