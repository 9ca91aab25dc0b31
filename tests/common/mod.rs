//! Shared test fixtures for integration tests.

use std::path::PathBuf;

use pv_sim::model::ModuleParameters;

/// Parameters of the 245 W reference module used across integration tests.
pub fn tsm_pa05() -> ModuleParameters {
    ModuleParameters {
        i_sc: 8.68,
        gamma: 78.0,
        i0: 7.0e-8,
        r_series: 0.10,
        r_parallel: 300.0,
        temp_i0: 0.08,
    }
}

/// A small two-module catalog in CSV form.
pub fn catalog_csv() -> &'static str {
    "\
manufacturer,name,power,i_sc,gamma,i0,r_series,r_parallel,temp_i0
Trina Solar,TSM PA05,245,8.68,78.0,7.0e-8,0.10,300.0,0.08
SunPower,SPR-X21-345,345,6.39,120.0,1.6e-9,0.12,500.0,0.07
"
}

/// Path to the catalog shipped with the crate.
pub fn shipped_catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/modules.csv")
}
