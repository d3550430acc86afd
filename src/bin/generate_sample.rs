use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Deterministic noise source (splitmix64), so the sample file is reproducible.
struct Noise(u64);

impl Noise {
    fn next_unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, std_dev: f64) -> f64 {
        let u1 = self.next_unit().max(1e-15);
        let u2 = self.next_unit();
        std_dev * (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}

/// One output row; field names follow the source table's headers.
#[derive(Serialize)]
struct Row {
    #[serde(rename = "Time")]
    year: i32,
    #[serde(rename = "Sex")]
    sex: &'static str,
    #[serde(rename = "Value")]
    value: f64,
}

/// Two linear trends with noise, plus the combined category the source
/// tables usually carry alongside them.
fn generate_rows(noise: &mut Noise) -> Vec<Row> {
    let mut rows = Vec::new();
    for year in 2000..=2023 {
        let t = (year - 2000) as f64;
        let males = (1200.0 + 35.0 * t + noise.gauss(40.0)).round();
        let females = (1100.0 + 48.0 * t + noise.gauss(40.0)).round();
        rows.push(Row { year, sex: "Males", value: males });
        rows.push(Row { year, sex: "Females", value: females });
        rows.push(Row {
            year,
            sex: "Males and females",
            value: males + females,
        });
    }
    rows
}

fn write_csv(path: &str, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Time", DataType::Int32, false),
        Field::new("Sex", DataType::Utf8, false),
        Field::new("Value", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.sex))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.value))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let rows = generate_rows(&mut Noise(42));

    write_csv("data-table.csv", &rows)?;
    write_parquet("data-table.parquet", &rows)?;

    println!(
        "Wrote {} rows to data-table.csv and data-table.parquet",
        rows.len()
    );
    Ok(())
}
