//! Open-circuit voltage and I-V curve sampling built on the diode solver.

use super::diode::{DiodeTerms, check_inputs, solve_current};
use super::types::{ModelError, ModuleParameters};
use super::ZERO_CELSIUS_K;

/// Bracket width at which the bisection stops (V).
const VOC_TOLERANCE_V: f64 = 1e-12;

/// Bisection ceiling; the bracket halves each pass, so this is generous.
const VOC_MAX_BISECTIONS: usize = 200;

/// One sampled point of an I-V curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    /// Terminal voltage (V).
    pub voltage_v: f64,
    /// Terminal current (A).
    pub current_a: f64,
    /// Delivered power (W).
    pub power_w: f64,
}

/// Computes the open-circuit voltage at the given conditions.
///
/// With zero terminal current the series drop vanishes and the diode voltage
/// equals the terminal voltage, so `V_oc` solves the explicit equation
/// `i_sc * (G / 1000) = i0_adj * (exp(c * V) - 1) + V / r_parallel`. The left
/// side is constant and the right side strictly increasing, so a bisection
/// over `[0, upper]` pins the root; dropping the shunt term gives the upper
/// bracket. Zero irradiance yields 0 V.
///
/// # Errors
///
/// Returns `ModelError::DegenerateParameters` for inputs outside the model's
/// domain, as [`solve_current`] does.
pub fn open_circuit_voltage(
    params: &ModuleParameters,
    irradiance_w_m2: f64,
    temperature_c: f64,
) -> Result<f64, ModelError> {
    let temp_k = temperature_c + ZERO_CELSIUS_K;
    check_inputs(params, irradiance_w_m2, temp_k)?;

    let terms = DiodeTerms::new(params, irradiance_w_m2, temp_k);
    if terms.photo_current <= 0.0 {
        return Ok(0.0);
    }

    let mut lo = 0.0;
    let mut hi = (terms.photo_current / terms.i0_adj + 1.0).ln() / terms.thermal_coeff;

    for _ in 0..VOC_MAX_BISECTIONS {
        let mid = 0.5 * (lo + hi);
        if terms.current_at(mid) > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo < VOC_TOLERANCE_V {
            break;
        }
    }

    Ok(0.5 * (lo + hi))
}

/// Samples the I-V curve at evenly spaced voltages from 0 V to `V_oc`.
///
/// # Arguments
///
/// * `params` - Module electrical parameters
/// * `irradiance_w_m2` - Incident irradiance (W/m2, reference 1000)
/// * `temperature_c` - Cell temperature (Celsius)
/// * `points` - Number of samples, endpoints included
///
/// # Panics
///
/// Panics if `points < 2`.
///
/// # Errors
///
/// Propagates solver failures at any sampled voltage.
pub fn sweep_iv(
    params: &ModuleParameters,
    irradiance_w_m2: f64,
    temperature_c: f64,
    points: usize,
) -> Result<Vec<CurvePoint>, ModelError> {
    assert!(points >= 2, "points must be >= 2");

    let voc = open_circuit_voltage(params, irradiance_w_m2, temperature_c)?;
    let mut curve = Vec::with_capacity(points);

    for k in 0..points {
        let voltage_v = voc * k as f64 / (points - 1) as f64;
        let current_a = solve_current(params, irradiance_w_m2, temperature_c, voltage_v)?;
        curve.push(CurvePoint {
            voltage_v,
            current_a,
            power_w: voltage_v * current_a,
        });
    }

    Ok(curve)
}
