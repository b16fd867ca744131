use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{LaunchRecord, LaunchTable, Outcome};

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

const REQUIRED_COLUMNS: [&str; 4] = [
    COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
    COL_CLASS,
    COL_BOOSTER_CATEGORY,
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a dataset is rejected. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing column '{0}'")]
    MissingColumn(&'static str),
    #[error("null value in column '{0}'")]
    NullValue(&'static str),
    #[error("payload mass {0} is not a finite non-negative number")]
    InvalidPayload(f64),
    #[error("class value {0} is not 0 or 1")]
    InvalidClass(i64),
    #[error("class value {0} is not an integer")]
    NonIntegerClass(f64),
    #[error("dataset contains no launch records")]
    Empty,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the original column names (extra columns ignored)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – columns with the same names; numeric columns of any width
pub fn load_file(path: &Path) -> Result<LaunchTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => return Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    let table = LaunchTable::from_records(records)
        .with_context(|| format!("loading {}", path.display()))?;
    let bounds = table.payload_bounds();
    log::info!(
        "Loaded {} launch records from {} (payload {}..={} kg)",
        table.len(),
        path.display(),
        bounds.low(),
        bounds.high()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Row conversion shared by the text formats
// ---------------------------------------------------------------------------

/// One row as it appears in CSV / JSON before validation.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "class")]
    class: f64,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
}

impl RawRecord {
    fn into_record(self) -> Result<LaunchRecord, LoadError> {
        Ok(LaunchRecord {
            launch_site: self.launch_site,
            payload_mass_kg: validate_payload(self.payload_mass_kg)?,
            outcome: outcome_from_number(self.class)?,
            booster_version_category: self.booster_version_category,
        })
    }
}

fn validate_payload(mass: f64) -> Result<f64, LoadError> {
    if mass.is_finite() && mass >= 0.0 {
        Ok(mass)
    } else {
        Err(LoadError::InvalidPayload(mass))
    }
}

/// Accepts `1`, `0`, `1.0`, `0.0`.
fn outcome_from_number(value: f64) -> Result<Outcome, LoadError> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(LoadError::NonIntegerClass(value));
    }
    Outcome::from_class(value as i64)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column).into());
        }
    }

    // Errors name the file line the record starts on (header is line 1).
    let mut records = Vec::new();
    let mut row = csv::StringRecord::new();
    while reader.read_record(&mut row).context("reading CSV record")? {
        let line = row.position().map_or(0, |p| p.line());
        let raw: RawRecord = row
            .deserialize(Some(&headers))
            .with_context(|| format!("CSV line {line}"))?;
        let record = raw
            .into_record()
            .with_context(|| format!("CSV line {line}"))?;
        records.push(record);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<RawRecord> = serde_json::from_str(&text).context("parsing JSON")?;

    rows.into_iter()
        .enumerate()
        .map(|(i, raw)| {
            raw.into_record()
                .with_context(|| format!("JSON record {}", i + 1))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, &mut records)?;
    }
    Ok(records)
}

fn read_batch(batch: &RecordBatch, out: &mut Vec<LaunchRecord>) -> Result<()> {
    let sites = column_as(batch, COL_LAUNCH_SITE, &DataType::Utf8)?;
    let masses = column_as(batch, COL_PAYLOAD_MASS, &DataType::Float64)?;
    let classes = column_as(batch, COL_CLASS, &DataType::Float64)?;
    let boosters = column_as(batch, COL_BOOSTER_CATEGORY, &DataType::Utf8)?;

    let sites = sites.as_string::<i32>();
    let masses = masses.as_primitive::<Float64Type>();
    let classes = classes.as_primitive::<Float64Type>();
    let boosters = boosters.as_string::<i32>();

    let first_row = out.len();
    for row in 0..batch.num_rows() {
        let record = (|| -> Result<LaunchRecord, LoadError> {
            not_null(sites, row, COL_LAUNCH_SITE)?;
            not_null(masses, row, COL_PAYLOAD_MASS)?;
            not_null(classes, row, COL_CLASS)?;
            not_null(boosters, row, COL_BOOSTER_CATEGORY)?;
            Ok(LaunchRecord {
                launch_site: sites.value(row).to_string(),
                payload_mass_kg: validate_payload(masses.value(row))?,
                outcome: outcome_from_number(classes.value(row))?,
                booster_version_category: boosters.value(row).to_string(),
            })
        })()
        .with_context(|| format!("parquet row {}", first_row + row + 1))?;
        out.push(record);
    }
    Ok(())
}

/// Look up a column by name and cast it to `target`.
fn column_as(batch: &RecordBatch, name: &'static str, target: &DataType) -> Result<ArrayRef> {
    let Some(col) = batch.column_by_name(name) else {
        return Err(LoadError::MissingColumn(name).into());
    };
    if col.data_type() == target {
        return Ok(col.clone());
    }
    match cast(col, target) {
        Ok(array) => Ok(array),
        Err(e) => bail!("column '{name}' of type {:?}: {e}", col.data_type()),
    }
}

fn not_null(array: &dyn Array, row: usize, name: &'static str) -> Result<(), LoadError> {
    if array.is_null(row) {
        Err(LoadError::NullValue(name))
    } else {
        Ok(())
    }
}
