//! Single-diode equivalent-circuit model of a photovoltaic module.

/// Open-circuit voltage and I-V curve sampling.
pub mod curve;
/// Fixed-point solver for the implicit diode equation.
pub mod diode;
/// Coarse-to-fine maximum-power-point search.
pub mod mpp;
pub mod types;

// Re-export the main entry points for convenience
pub use curve::{CurvePoint, open_circuit_voltage, sweep_iv};
pub use diode::solve_current;
pub use mpp::find_max_power_point;
pub use types::ModelError;
pub use types::ModuleParameters;
pub use types::OperatingPoint;

/// Elementary charge (C).
pub const ELEMENTARY_CHARGE_C: f64 = 1.60217657e-19;

/// Boltzmann constant (J/K).
pub const BOLTZMANN_J_PER_K: f64 = 1.3806488e-23;

/// Zero Celsius in Kelvin. The model works in whole-degree offsets.
pub const ZERO_CELSIUS_K: f64 = 273.0;
