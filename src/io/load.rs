//! CSV column loader for the wind, irradiance, and demand inputs.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{ConfigError, InputsConfig};
use crate::error::GridError;
use crate::series::{HourlySeries, normalize};

/// The three normalized input series a sizing run needs.
#[derive(Debug, Clone)]
pub struct InputSeries {
    /// Output of a single turbine per hour (kWh).
    pub wind_unit_curve: HourlySeries,
    /// Surface irradiance per hour (Wh/m²).
    pub irradiance: HourlySeries,
    /// Demand per hour (kWh).
    pub demand: HourlySeries,
}

/// Reads the numeric column named `column` from a CSV file with a header row.
///
/// Blank cells are skipped.
///
/// # Errors
///
/// Returns [`GridError::Io`] if the file cannot be opened, and otherwise
/// the errors of [`read_column_from`].
pub fn read_column(path: &Path, column: &str) -> Result<Vec<f64>, GridError> {
    let file = File::open(path)?;
    read_column_from(file, path, column)
}

/// Reads the numeric column named `column` from CSV data in any reader.
///
/// # Arguments
///
/// * `reader` - CSV source with a header row
/// * `path` - Source label used in error messages
/// * `column` - Header of the column to extract
///
/// # Errors
///
/// Returns [`GridError::MissingColumn`] if no header matches `column`,
/// [`GridError::Parse`] if a cell is not a number, and [`GridError::Csv`]
/// for malformed CSV.
pub fn read_column_from(
    reader: impl Read,
    path: &Path,
    column: &str,
) -> Result<Vec<f64>, GridError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let index = rdr
        .headers()?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| GridError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })?;

    let mut values = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        let Some(cell) = record.get(index).filter(|c| !c.is_empty()) else {
            continue;
        };
        let value = cell.parse::<f64>().map_err(|_| GridError::Parse {
            path: path.to_path_buf(),
            row: row + 1,
            value: cell.to_string(),
        })?;
        values.push(value);
    }
    Ok(values)
}

fn load_series(name: &str, path: &Path, column: &str) -> Result<HourlySeries, GridError> {
    let raw = read_column(path, column)?;
    info!(series = name, path = %path.display(), samples = raw.len(), "loaded input column");
    normalize(name, &raw)
}

fn required<'a>(field: &str, path: Option<&'a PathBuf>) -> Result<&'a Path, GridError> {
    path.map(PathBuf::as_path)
        .ok_or_else(|| ConfigError::new(field, "no input file given").into())
}

/// Loads and normalizes all three inputs named in `config`.
///
/// # Errors
///
/// Returns [`GridError::Config`] if a path is not set, and any loader or
/// normalization error for the files themselves.
pub fn load_inputs(config: &InputsConfig) -> Result<InputSeries, GridError> {
    let wind_path = required("inputs.wind_path", config.wind_path.as_ref())?;
    let irradiance_path = required("inputs.irradiance_path", config.irradiance_path.as_ref())?;
    let demand_path = required("inputs.demand_path", config.demand_path.as_ref())?;

    Ok(InputSeries {
        wind_unit_curve: load_series("wind", wind_path, &config.wind_column)?,
        irradiance: load_series("irradiance", irradiance_path, &config.irradiance_column)?,
        demand: load_series("demand", demand_path, &config.demand_column)?,
    })
}
