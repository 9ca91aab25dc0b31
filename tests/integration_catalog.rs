//! Integration tests for the file-backed module catalog.

mod common;

use std::fs;

use pv_sim::catalog::{CatalogError, CsvCatalog, ParameterProvider};
use pv_sim::model::find_max_power_point;

#[test]
fn loads_a_catalog_written_to_disk() {
    let path = std::env::temp_dir().join("pv_sim_it_catalog_roundtrip.csv");
    fs::write(&path, common::catalog_csv()).expect("fixture write should succeed");

    let catalog = CsvCatalog::from_path(&path).expect("catalog should load");
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.module_names(), vec!["TSM PA05", "SPR-X21-345"]);

    fs::remove_file(&path).ok();
}

#[test]
fn shipped_catalog_parses_and_resolves_every_module() {
    let catalog = CsvCatalog::from_path(&common::shipped_catalog_path())
        .expect("shipped catalog should load");

    assert_eq!(catalog.len(), 5);
    for name in catalog.module_names() {
        assert!(catalog.lookup(name).is_ok(), "lookup of \"{name}\" failed");
    }
}

#[test]
fn unknown_module_reports_lookup_failure() {
    let catalog = CsvCatalog::from_reader(common::catalog_csv().as_bytes()).unwrap();
    let err = catalog.lookup("SPR-X99-000").unwrap_err();

    assert!(matches!(err, CatalogError::ModuleNotFound { .. }));
    assert!(err.to_string().contains("SPR-X99-000"));
}

#[test]
fn provider_is_injected_not_baked_in() {
    struct FixedProvider;

    impl ParameterProvider for FixedProvider {
        fn lookup(
            &self,
            name: &str,
        ) -> Result<pv_sim::model::ModuleParameters, CatalogError> {
            if name == "fixture" {
                Ok(common::tsm_pa05())
            } else {
                Err(CatalogError::ModuleNotFound {
                    name: name.to_string(),
                })
            }
        }
    }

    let provider: &dyn ParameterProvider = &FixedProvider;
    let params = provider.lookup("fixture").expect("fixture should resolve");
    let mpp = find_max_power_point(&params, 1000.0, 25.0).unwrap();
    assert!(mpp.power_w() > 0.0);
}

#[test]
fn record_exposes_descriptive_fields_alongside_parameters() {
    let catalog = CsvCatalog::from_path(&common::shipped_catalog_path()).unwrap();
    let record = catalog.record("TSM PA05").expect("record should exist");

    assert_eq!(record.manufacturer, "Trina Solar");
    assert_eq!(record.power, 245.0);

    let params = catalog.lookup("TSM PA05").unwrap();
    assert_eq!(params.i_sc, record.i_sc);
    assert_eq!(params.r_parallel, record.r_parallel);
}
