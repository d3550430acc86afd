use std::fs::File;
use std::path::Path;

use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{ColumnNames, Dataset, Record};
use crate::error::{StatsError, StatsResult};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; year, gender and value columns named by `columns`
/// * `.json`    – `[{ "Time": 2019, "Sex": "Males", "Value": 12.5 }, ...]`
/// * `.parquet` – flat table with the same three columns
///
/// Rows whose year or value cannot be read as a number are skipped, the way a
/// spreadsheet export with footnote rows is usually cleaned.
pub fn load_file(path: &Path, columns: &ColumnNames) -> StatsResult<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let collector = match ext.as_str() {
        "csv" => load_csv(path, columns)?,
        "json" => load_json(path, columns)?,
        "parquet" | "pq" => load_parquet(path, columns)?,
        other => {
            return Err(StatsError::parse(format!(
                "unsupported file extension: .{other}"
            )))
        }
    };

    collector.finish(path)
}

fn open(path: &Path) -> StatsResult<File> {
    File::open(path).map_err(|source| StatsError::FileLoad {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Row collection shared by all formats
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RowCollector {
    records: Vec<Record>,
    dropped: usize,
}

impl RowCollector {
    fn push(&mut self, year: Option<i32>, gender: &str, value: Option<f64>) {
        match (year, value.filter(|v| v.is_finite())) {
            (Some(year), Some(value)) => self.records.push(Record::new(year, gender.trim(), value)),
            _ => self.dropped += 1,
        }
    }

    fn finish(self, path: &Path) -> StatsResult<Dataset> {
        if self.dropped > 0 {
            log::warn!(
                "{}: skipped {} row(s) with a missing or non-numeric year/value",
                path.display(),
                self.dropped
            );
        }
        if self.records.is_empty() {
            return Err(StatsError::parse(format!(
                "{} contains no usable rows",
                path.display()
            )));
        }
        Ok(Dataset::from_records(self.records))
    }
}

/// Read a year from a cell holding a plain integer (`2019`), a whole float
/// (`2019.0`, as written by pandas for columns with gaps) or a date that
/// starts with a four-digit year (`2019-06-30`, `2019/06`).
pub fn parse_year(cell: &str) -> Option<i32> {
    let cell = cell.trim();
    if let Ok(year) = cell.parse::<i32>() {
        return Some(year);
    }
    if let Some(year) = cell.parse::<f64>().ok().and_then(whole_year) {
        return Some(year);
    }
    let prefix = cell.get(..4)?;
    let rest = &cell[4..];
    if prefix.bytes().all(|b| b.is_ascii_digit()) && rest.starts_with(['-', '/']) {
        prefix.parse().ok()
    } else {
        None
    }
}

/// A float year is accepted only when it has no fractional part.
fn whole_year(v: f64) -> Option<i32> {
    let in_range = v >= i32::MIN as f64 && v <= i32::MAX as f64;
    (v.is_finite() && v.fract() == 0.0 && in_range).then_some(v as i32)
}

fn parse_value(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names; any extra columns are ignored.
fn load_csv(path: &Path, columns: &ColumnNames) -> StatsResult<RowCollector> {
    let file = open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader
        .headers()
        .map_err(|e| StatsError::parse(format!("reading CSV headers: {e}")))?
        .clone();

    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| StatsError::parse(format!("CSV missing '{name}' column")))
    };
    let year_idx = position(&columns.year)?;
    let gender_idx = position(&columns.gender)?;
    let value_idx = position(&columns.value)?;

    let mut rows = RowCollector::default();
    for (row_no, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| StatsError::parse(format!("CSV row {}: {e}", row_no + 1)))?;

        rows.push(
            record.get(year_idx).and_then(parse_year),
            record.get(gender_idx).unwrap_or(""),
            record.get(value_idx).and_then(parse_value),
        );
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Time": 2019, "Sex": "Males", "Value": 12.5 },
///   ...
/// ]
/// ```
fn load_json(path: &Path, columns: &ColumnNames) -> StatsResult<RowCollector> {
    let file = open(path)?;
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(file))
        .map_err(|e| StatsError::parse(format!("parsing JSON: {e}")))?;

    let records = root
        .as_array()
        .ok_or_else(|| StatsError::parse("expected top-level JSON array"))?;

    let mut rows = RowCollector::default();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| StatsError::parse(format!("row {i} is not a JSON object")))?;

        let field = |name: &str| {
            obj.get(name)
                .ok_or_else(|| StatsError::parse(format!("row {i}: missing '{name}' field")))
        };

        let year = match field(&columns.year)? {
            JsonValue::Number(n) => n
                .as_i64()
                .and_then(|y| i32::try_from(y).ok())
                .or_else(|| n.as_f64().and_then(whole_year)),
            JsonValue::String(s) => parse_year(s),
            _ => None,
        };
        let gender = match field(&columns.gender)? {
            JsonValue::String(s) => s.clone(),
            JsonValue::Null => String::new(),
            other => other.to_string(),
        };
        let value = match field(&columns.value)? {
            JsonValue::Number(n) => n.as_f64(),
            JsonValue::String(s) => parse_value(s),
            _ => None,
        };

        rows.push(year, &gender, value);
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table. Integer, float and string physical types are
/// all accepted for every column; values are cast through Arrow. Float years
/// must be whole numbers, string years go through [`parse_year`].
fn load_parquet(path: &Path, columns: &ColumnNames) -> StatsResult<RowCollector> {
    let file = open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| StatsError::parse(format!("reading parquet metadata: {e}")))?;
    let reader = builder
        .build()
        .map_err(|e| StatsError::parse(format!("building parquet reader: {e}")))?;

    let mut rows = RowCollector::default();

    for batch_result in reader {
        let batch =
            batch_result.map_err(|e| StatsError::parse(format!("reading parquet batch: {e}")))?;
        let schema = batch.schema();

        let column = |name: &str, to: &DataType| {
            let idx = schema
                .index_of(name)
                .map_err(|_| StatsError::parse(format!("parquet file missing '{name}' column")))?;
            cast(batch.column(idx), to)
                .map_err(|e| StatsError::parse(format!("column '{name}': {e}")))
        };

        let year_is_float = schema
            .field_with_name(&columns.year)
            .map(|f| f.data_type().is_floating())
            .unwrap_or(false);
        let year_type = if year_is_float {
            DataType::Float64
        } else {
            DataType::Utf8
        };
        let years = column(&columns.year, &year_type)?;
        let genders = column(&columns.gender, &DataType::Utf8)?;
        let values = column(&columns.value, &DataType::Float64)?;

        let year_at = |row: usize| -> Option<i32> {
            if years.is_null(row) {
                None
            } else if year_is_float {
                whole_year(years.as_primitive::<Float64Type>().value(row))
            } else {
                parse_year(years.as_string::<i32>().value(row))
            }
        };
        let genders = genders.as_string::<i32>();
        let values = values.as_primitive::<Float64Type>();

        for row in 0..batch.num_rows() {
            let year = year_at(row);
            let gender = if genders.is_null(row) {
                ""
            } else {
                genders.value(row)
            };
            let value = (!values.is_null(row)).then(|| values.value(row));
            rows.push(year, gender, value);
        }
    }

    Ok(rows)
}
