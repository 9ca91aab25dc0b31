//! Hand-rolled command-line argument parsing.

use std::env;
use std::path::PathBuf;

/// Parsed command-line options.
#[derive(Debug)]
pub struct CliOptions {
    /// Path to the module catalog CSV.
    pub catalog: PathBuf,
    /// Name of the module to evaluate.
    pub module: String,
    /// Optional TOML conditions file.
    pub conditions: Option<PathBuf>,
    /// Optional built-in conditions preset name.
    pub preset: Option<String>,
    /// Irradiance override (W/m2).
    pub irradiance: Option<f64>,
    /// Temperature override (Celsius).
    pub temperature: Option<f64>,
    /// Solve a single operating point at this voltage instead of tracking
    /// the MPP.
    pub voltage: Option<f64>,
    /// Export the I-V curve as CSV to this path.
    pub curve_out: Option<PathBuf>,
}

/// Default catalog path relative to the working directory.
const DEFAULT_CATALOG: &str = "data/modules.csv";

/// Parses the process arguments.
///
/// # Errors
///
/// Returns a human-readable message for unknown flags, missing or duplicate
/// values, and unparsable numbers.
pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut catalog = None;
    let mut module = None;
    let mut conditions = None;
    let mut preset = None;
    let mut irradiance = None;
    let mut temperature = None;
    let mut voltage = None;
    let mut curve_out = None;

    while i < args.len() {
        match args[i].as_str() {
            "--catalog" => {
                i += 1;
                let path = args.get(i).ok_or_else(|| {
                    "missing value for --catalog (expected a CSV file path)".to_string()
                })?;
                if catalog.replace(PathBuf::from(path)).is_some() {
                    return Err("--catalog provided more than once".to_string());
                }
            }
            "--module" => {
                i += 1;
                let name = args.get(i).ok_or_else(|| {
                    "missing value for --module (expected a module name)".to_string()
                })?;
                if module.replace(name.clone()).is_some() {
                    return Err("--module provided more than once".to_string());
                }
            }
            "--conditions" => {
                i += 1;
                let path = args.get(i).ok_or_else(|| {
                    "missing value for --conditions (expected a TOML file path)".to_string()
                })?;
                if conditions.replace(PathBuf::from(path)).is_some() {
                    return Err("--conditions provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.get(i).ok_or_else(|| {
                    "missing value for --preset (expected a preset name)".to_string()
                })?;
                if preset.replace(name.clone()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--irradiance" => {
                i += 1;
                irradiance = Some(parse_f64_value(args, i, "--irradiance", irradiance)?);
            }
            "--temperature" => {
                i += 1;
                temperature = Some(parse_f64_value(args, i, "--temperature", temperature)?);
            }
            "--voltage" => {
                i += 1;
                voltage = Some(parse_f64_value(args, i, "--voltage", voltage)?);
            }
            "--curve-out" => {
                i += 1;
                let path = args.get(i).ok_or_else(|| {
                    "missing value for --curve-out (expected a file path)".to_string()
                })?;
                if curve_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--curve-out provided more than once".to_string());
                }
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if conditions.is_some() && preset.is_some() {
        return Err(
            "arguments `--conditions` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    let module = module.ok_or_else(|| "missing required --module <name>".to_string())?;

    Ok(CliOptions {
        catalog: catalog.unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG)),
        module,
        conditions,
        preset,
        irradiance,
        temperature,
        voltage,
        curve_out,
    })
}

fn parse_f64_value(
    args: &[String],
    index: usize,
    flag: &str,
    previous: Option<f64>,
) -> Result<f64, String> {
    if previous.is_some() {
        return Err(format!("{flag} provided more than once"));
    }
    let raw = args
        .get(index)
        .ok_or_else(|| format!("missing value for {flag} (expected a number)"))?;
    raw.parse::<f64>()
        .map_err(|_| format!("invalid value for {flag}: \"{raw}\" is not a number"))
}

/// Prints usage to stderr.
pub fn print_usage() {
    eprintln!("pv-sim — single-diode PV module model and MPP tracker");
    eprintln!();
    eprintln!("Usage: pv-sim --module <name> [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --module <name>        Module to look up in the catalog (required)");
    eprintln!("  --catalog <path>       Module catalog CSV (default: data/modules.csv)");
    eprintln!("  --conditions <path>    Load operating conditions from a TOML file");
    eprintln!("  --preset <name>        Built-in conditions preset (stc, noct, low_light)");
    eprintln!("  --irradiance <w_m2>    Override irradiance");
    eprintln!("  --temperature <c>      Override cell temperature");
    eprintln!("  --voltage <v>          Solve one operating point instead of tracking the MPP");
    eprintln!("  --curve-out <path>     Export the I-V curve to a CSV file");
    eprintln!("  --help                 Show this help message");
    eprintln!();
    eprintln!("If no --conditions or --preset is given, standard test conditions are used.");
}

#[cfg(test)]
mod tests {
    use super::parse_options;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn module_and_defaults_parse() {
        let opts = parse_options(&args(&["--module", "TSM PA05"])).expect("parse should succeed");
        assert_eq!(opts.module, "TSM PA05");
        assert_eq!(opts.catalog.to_str(), Some("data/modules.csv"));
        assert!(opts.conditions.is_none());
        assert!(opts.preset.is_none());
        assert!(opts.voltage.is_none());
    }

    #[test]
    fn missing_module_is_an_error() {
        let err = parse_options(&args(&["--preset", "stc"])).unwrap_err();
        assert!(err.contains("--module"));
    }

    #[test]
    fn supports_conditions_file() {
        let opts = parse_options(&args(&["--module", "M", "--conditions", "cond.toml"]))
            .expect("parse should succeed");
        assert_eq!(
            opts.conditions.as_deref().and_then(|p| p.to_str()),
            Some("cond.toml")
        );
    }

    #[test]
    fn conditions_and_preset_are_mutually_exclusive() {
        let err = parse_options(&args(&[
            "--module",
            "M",
            "--conditions",
            "cond.toml",
            "--preset",
            "stc",
        ]))
        .unwrap_err();
        assert!(err.contains("mutually exclusive"));
    }

    #[test]
    fn duplicate_flag_is_an_error() {
        let err =
            parse_options(&args(&["--module", "A", "--module", "B"])).unwrap_err();
        assert!(err.contains("more than once"));
    }

    #[test]
    fn numeric_overrides_parse() {
        let opts = parse_options(&args(&[
            "--module",
            "M",
            "--irradiance",
            "800",
            "--temperature",
            "45.5",
            "--voltage",
            "30.25",
        ]))
        .expect("parse should succeed");
        assert_eq!(opts.irradiance, Some(800.0));
        assert_eq!(opts.temperature, Some(45.5));
        assert_eq!(opts.voltage, Some(30.25));
    }

    #[test]
    fn non_numeric_override_is_an_error() {
        let err = parse_options(&args(&["--module", "M", "--irradiance", "bright"])).unwrap_err();
        assert!(err.contains("not a number"));
    }

    #[test]
    fn missing_value_is_an_error() {
        let err = parse_options(&args(&["--module", "M", "--curve-out"])).unwrap_err();
        assert!(err.contains("--curve-out"));
    }

    #[test]
    fn unknown_argument_is_an_error() {
        let err = parse_options(&args(&["--module", "M", "--frobnicate"])).unwrap_err();
        assert!(err.contains("unknown argument"));
    }
}
