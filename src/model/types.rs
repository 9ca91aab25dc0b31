//! Core model types: module parameters, operating points, and failure kinds.

use thiserror::Error;

/// Electrical parameters of one PV module under the single-diode model.
///
/// Values are read-only inputs to the solver and tracker; they carry no
/// identity beyond the catalog name they were looked up under.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleParameters {
    /// Short-circuit current at the 1000 W/m2 reference irradiance (A).
    pub i_sc: f64,
    /// Diode ideality/thermality factor (dimensionless, > 0). Module-level
    /// values fold the cell count into the factor.
    pub gamma: f64,
    /// Reverse-saturation current at the 298 K reference temperature (A, > 0).
    pub i0: f64,
    /// Series equivalent resistance (ohm, > 0).
    pub r_series: f64,
    /// Parallel (shunt) equivalent resistance (ohm, > 0, large relative to
    /// `r_series`).
    pub r_parallel: f64,
    /// Fractional per-Kelvin temperature coefficient applied to `i0`.
    pub temp_i0: f64,
}

/// A terminal (voltage, current) pair, evaluated at a specific irradiance
/// and temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    /// Terminal voltage (V).
    pub voltage_v: f64,
    /// Terminal current (A).
    pub current_a: f64,
}

impl OperatingPoint {
    /// Delivered power at this point (W).
    pub fn power_w(&self) -> f64 {
        self.voltage_v * self.current_a
    }
}

/// Failure kinds reported by the solver and tracker.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// The iteration budget ran out before the convergence test passed.
    /// Extreme operating voltages or near-degenerate parameters can make
    /// the fixed-point map oscillate instead of settling.
    #[error("solver did not converge within {iterations} iterations at {voltage_v} V")]
    NonConvergence {
        /// Terminal voltage the solve was attempted at (V).
        voltage_v: f64,
        /// Iteration ceiling that was exhausted.
        iterations: usize,
    },
    /// Inputs that cannot produce a physically meaningful solution.
    #[error("degenerate model input: {0}")]
    DegenerateParameters(String),
}
