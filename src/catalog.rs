//! Module parameter lookup: provider trait and CSV-backed catalog.
//!
//! The numeric core never parses files; it takes [`ModuleParameters`]
//! resolved by a provider injected at call time.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::model::ModuleParameters;

/// Resolves a module name to its electrical parameters.
pub trait ParameterProvider {
    /// Looks up `name` and returns its parameters.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ModuleNotFound`] if no module carries `name`.
    fn lookup(&self, name: &str) -> Result<ModuleParameters, CatalogError>;
}

/// Failure kinds of the catalog layer.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be opened.
    #[error("cannot read module catalog \"{}\": {source}", .path.display())]
    Io {
        /// Path the open was attempted on.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// A row failed to parse against the expected column layout.
    #[error("malformed module catalog row: {0}")]
    Malformed(#[from] csv::Error),
    /// The requested module name is absent from the catalog.
    #[error("module \"{name}\" not found in catalog")]
    ModuleNotFound {
        /// Name the lookup was attempted with.
        name: String,
    },
}

/// One row of the module catalog.
///
/// Column layout:
/// `manufacturer, name, power, i_sc, gamma, i0, r_series, r_parallel, temp_i0`.
/// The descriptive columns stay text; the rest parse as `f64`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleRecord {
    /// Module manufacturer.
    pub manufacturer: String,
    /// Module name, the lookup key.
    pub name: String,
    /// Nameplate power rating (W). Informational; not a model input.
    pub power: f64,
    /// Short-circuit current reference (A).
    pub i_sc: f64,
    /// Diode ideality/thermality factor.
    pub gamma: f64,
    /// Reverse-saturation current reference (A).
    pub i0: f64,
    /// Series equivalent resistance (ohm).
    pub r_series: f64,
    /// Parallel equivalent resistance (ohm).
    pub r_parallel: f64,
    /// Fractional per-Kelvin temperature coefficient applied to `i0`.
    pub temp_i0: f64,
}

impl From<&ModuleRecord> for ModuleParameters {
    fn from(record: &ModuleRecord) -> Self {
        Self {
            i_sc: record.i_sc,
            gamma: record.gamma,
            i0: record.i0,
            r_series: record.r_series,
            r_parallel: record.r_parallel,
            temp_i0: record.temp_i0,
        }
    }
}

/// In-memory module catalog loaded from a CSV file.
#[derive(Debug, Clone)]
pub struct CsvCatalog {
    records: Vec<ModuleRecord>,
}

impl CsvCatalog {
    /// Loads a catalog from a CSV file with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be opened and
    /// [`CatalogError::Malformed`] if any row fails to parse.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Loads a catalog from any reader producing CSV with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Malformed`] if any row fails to parse.
    pub fn from_reader(reader: impl Read) -> Result<Self, CatalogError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in rdr.deserialize() {
            records.push(row?);
        }
        Ok(Self { records })
    }

    /// Names of all cataloged modules, in file order.
    pub fn module_names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    /// Full record for `name`, if present.
    pub fn record(&self, name: &str) -> Option<&ModuleRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Number of cataloged modules.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no modules.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ParameterProvider for CsvCatalog {
    fn lookup(&self, name: &str) -> Result<ModuleParameters, CatalogError> {
        self.record(name)
            .map(ModuleParameters::from)
            .ok_or_else(|| CatalogError::ModuleNotFound {
                name: name.to_string(),
            })
    }
}
