//! PV module model entry point — CLI wiring and report printing.

use std::process;

use pv_sim::catalog::{CsvCatalog, ParameterProvider};
use pv_sim::cli::{self, CliOptions};
use pv_sim::config::ConditionsConfig;
use pv_sim::io::export::export_csv;
use pv_sim::model::{solve_current, sweep_iv};
use pv_sim::report::ModuleReport;

fn main() {
    let opts = match cli::parse_args() {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            cli::print_usage();
            process::exit(2);
        }
    };

    let config = match resolve_conditions(&opts) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    };

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("error: {e}");
        }
        process::exit(1);
    }

    let catalog = match CsvCatalog::from_path(&opts.catalog) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    };

    let params = match catalog.lookup(&opts.module) {
        Ok(params) => params,
        Err(err) => {
            eprintln!("error: {err}");
            if !catalog.is_empty() {
                eprintln!("available modules: {}", catalog.module_names().join(", "));
            }
            process::exit(1);
        }
    };

    let irradiance = config.conditions.irradiance_w_m2;
    let temperature = config.conditions.temperature_c;

    if let Some(voltage) = opts.voltage {
        match solve_current(&params, irradiance, temperature, voltage) {
            Ok(current) => {
                println!(
                    "{} @ {:.0} W/m2, {:.1} C, {:.3} V -> {:.4} A ({:.2} W)",
                    opts.module,
                    irradiance,
                    temperature,
                    voltage,
                    current,
                    voltage * current
                );
            }
            Err(err) => {
                eprintln!("error: {err}");
                process::exit(1);
            }
        }
    } else {
        match ModuleReport::from_conditions(&opts.module, &params, irradiance, temperature) {
            Ok(report) => println!("{report}"),
            Err(err) => {
                eprintln!("error: {err}");
                process::exit(1);
            }
        }
    }

    if let Some(path) = &opts.curve_out {
        let curve = match sweep_iv(&params, irradiance, temperature, config.sweep.points) {
            Ok(curve) => curve,
            Err(err) => {
                eprintln!("error: {err}");
                process::exit(1);
            }
        };
        if let Err(err) = export_csv(&curve, path) {
            eprintln!("error: cannot write \"{}\": {err}", path.display());
            process::exit(1);
        }
        println!(
            "I-V curve ({} points) written to {}",
            curve.len(),
            path.display()
        );
    }
}

/// Resolves operating conditions from file, preset, or defaults, then layers
/// on any CLI overrides.
fn resolve_conditions(opts: &CliOptions) -> Result<ConditionsConfig, String> {
    let mut config = if let Some(path) = &opts.conditions {
        ConditionsConfig::from_toml_file(path).map_err(|e| e.to_string())?
    } else if let Some(name) = &opts.preset {
        ConditionsConfig::from_preset(name).map_err(|e| e.to_string())?
    } else {
        ConditionsConfig::stc()
    };

    if let Some(irradiance) = opts.irradiance {
        config.conditions.irradiance_w_m2 = irradiance;
    }
    if let Some(temperature) = opts.temperature {
        config.conditions.temperature_c = temperature;
    }

    Ok(config)
}
