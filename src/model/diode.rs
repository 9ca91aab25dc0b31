//! Fixed-point solver for the implicit single-diode equation.
//!
//! The terminal current of a module satisfies
//!
//! `i = i_sc * (G / 1000) - i0_adj * (exp(q * v_d / (k * T * gamma)) - 1) - v_d / r_parallel`
//!
//! where `v_d = v + i * r_series` is the voltage across the intrinsic diode.
//! The current appears on both sides, so the solver iterates on `v_d` until
//! the implied terminal voltage matches the requested one.

use super::types::{ModelError, ModuleParameters};
use super::{BOLTZMANN_J_PER_K, ELEMENTARY_CHARGE_C, ZERO_CELSIUS_K};

/// Reference temperature for the saturation-current adjustment (K).
const I0_REFERENCE_TEMP_K: f64 = 298.0;

/// Iteration ceiling for the fixed-point loop.
const MAX_ITERATIONS: usize = 1000;

/// Condition-dependent terms of the diode equation, evaluated once per solve.
pub(crate) struct DiodeTerms {
    /// Photo-generated current `i_sc * (G / 1000)` (A).
    pub(crate) photo_current: f64,
    /// Temperature-adjusted reverse-saturation current (A).
    pub(crate) i0_adj: f64,
    /// Exponent coefficient `q / (k * T * gamma)` (1/V).
    pub(crate) thermal_coeff: f64,
    r_parallel: f64,
}

impl DiodeTerms {
    pub(crate) fn new(params: &ModuleParameters, irradiance_w_m2: f64, temp_k: f64) -> Self {
        Self {
            photo_current: params.i_sc * irradiance_w_m2 / 1000.0,
            i0_adj: params.i0 * (1.0 + params.temp_i0).powf(temp_k - I0_REFERENCE_TEMP_K),
            thermal_coeff: ELEMENTARY_CHARGE_C / (BOLTZMANN_J_PER_K * temp_k * params.gamma),
            r_parallel: params.r_parallel,
        }
    }

    /// Terminal current for a given intrinsic diode voltage (A).
    pub(crate) fn current_at(&self, diode_v: f64) -> f64 {
        self.photo_current - self.i0_adj * ((self.thermal_coeff * diode_v).exp() - 1.0)
            - diode_v / self.r_parallel
    }
}

/// Solves the single-diode equation for terminal current at `voltage_v`.
///
/// The diode voltage is seeded as if the module delivered its full
/// short-circuit current, then nudged by the terminal-voltage mismatch until
/// the implied and requested voltages agree to 10 decimal digits.
///
/// # Arguments
///
/// * `params` - Module electrical parameters
/// * `irradiance_w_m2` - Incident irradiance (W/m2, reference 1000)
/// * `temperature_c` - Cell temperature (Celsius)
/// * `voltage_v` - Terminal voltage to solve at (V)
///
/// # Errors
///
/// Returns `ModelError::DegenerateParameters` for inputs the model cannot
/// represent (non-positive `gamma`, `i0`, or `r_parallel`, absolute
/// temperature at or below zero, negative irradiance), and
/// `ModelError::NonConvergence` if the loop exhausts its iteration budget.
/// Convergence is not guaranteed for arbitrary inputs; extreme voltages can
/// make the substitution oscillate. No invariant holds on the sign or range
/// of the returned current.
pub fn solve_current(
    params: &ModuleParameters,
    irradiance_w_m2: f64,
    temperature_c: f64,
    voltage_v: f64,
) -> Result<f64, ModelError> {
    let temp_k = temperature_c + ZERO_CELSIUS_K;
    check_inputs(params, irradiance_w_m2, temp_k)?;

    let terms = DiodeTerms::new(params, irradiance_w_m2, temp_k);

    // Seed with current = i_sc.
    let mut diode_v = voltage_v + params.i_sc * params.r_series;
    let mut current = terms.current_at(diode_v);
    let mut voltage_check = diode_v - current * params.r_series;

    let mut iterations = 0;
    while round10(voltage_check) != round10(voltage_v) {
        if iterations >= MAX_ITERATIONS {
            return Err(ModelError::NonConvergence {
                voltage_v,
                iterations: MAX_ITERATIONS,
            });
        }
        diode_v -= voltage_check - voltage_v;
        current = terms.current_at(diode_v);
        voltage_check = diode_v - current * params.r_series;
        iterations += 1;
    }

    Ok(current)
}

/// Rejects inputs outside the model's domain before any arithmetic runs.
pub(crate) fn check_inputs(
    params: &ModuleParameters,
    irradiance_w_m2: f64,
    temp_k: f64,
) -> Result<(), ModelError> {
    let degenerate = |reason: &str| ModelError::DegenerateParameters(reason.to_string());

    if params.gamma <= 0.0 {
        return Err(degenerate("gamma must be > 0"));
    }
    if params.i0 <= 0.0 {
        return Err(degenerate("i0 must be > 0"));
    }
    if params.r_parallel <= 0.0 {
        return Err(degenerate("r_parallel must be > 0"));
    }
    if temp_k <= 0.0 {
        return Err(degenerate("absolute temperature must be > 0 K"));
    }
    if irradiance_w_m2 < 0.0 {
        return Err(degenerate("irradiance must be >= 0"));
    }
    Ok(())
}

/// Rounds to the 10-decimal-digit granularity of the convergence test.
///
/// The loop compares rounded values for exact equality (a window of
/// 0.5e-10) rather than testing `abs(a - b) < eps`; the two disagree right
/// at the window boundary.
fn round10(v: f64) -> f64 {
    (v * 1e10).round() / 1e10
}
