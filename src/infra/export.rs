//! CSV export of the calculation history.

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use csv::WriterBuilder;
use serde::Serialize;
use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::domain::{CalculationHistory, TradeCalculation};

const EXPORT_DIR: &str = "tradeflow";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no data directory available for exports")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow<'a> {
    id: &'a str,
    timestamp: String,
    product_name: &'a str,
    hs_code: &'a str,
    origin_country: &'a str,
    destination_country: &'a str,
    incoterm: &'static str,
    shipping_method: &'static str,
    quantity: i64,
    unit_price: f64,
    fob_value: f64,
    freight_cost: f64,
    insurance_cost: f64,
    customs_duty: f64,
    import_tax: f64,
    vat_amount: f64,
    handling_charges: f64,
    total_landed_cost: f64,
    cost_per_unit: f64,
}

impl<'a> From<&'a TradeCalculation> for CsvRow<'a> {
    fn from(calc: &'a TradeCalculation) -> Self {
        CsvRow {
            id: &calc.id,
            timestamp: format_timestamp(calc.timestamp),
            product_name: &calc.product_name,
            hs_code: &calc.hs_code,
            origin_country: &calc.origin_country,
            destination_country: &calc.destination_country,
            incoterm: calc.incoterm.code(),
            shipping_method: calc.shipping_method.code(),
            quantity: calc.quantity,
            unit_price: calc.unit_price,
            fob_value: calc.fob_value,
            freight_cost: calc.freight_cost,
            insurance_cost: calc.insurance_cost,
            customs_duty: calc.customs_duty,
            import_tax: calc.import_tax,
            vat_amount: calc.vat_amount,
            handling_charges: calc.handling_charges,
            total_landed_cost: calc.total_landed_cost,
            cost_per_unit: calc.cost_per_unit,
        }
    }
}

/// RFC 3339 rendering of a unix-millisecond timestamp; the raw number if out of range.
pub fn format_timestamp(millis: i64) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000)
        .ok()
        .and_then(|at| at.format(&Rfc3339).ok())
        .unwrap_or_else(|| millis.to_string())
}

/// Writes the history newest first, one header row then one row per calculation.
pub fn write_history_csv<W: Write>(out: W, history: &CalculationHistory) -> Result<(), ExportError> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(out);
    for calc in history.latest_first() {
        writer.serialize(CsvRow::from(calc))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a timestamped CSV under the local data directory and returns its path.
pub fn export_history(history: &CalculationHistory) -> Result<PathBuf, ExportError> {
    let dir = dirs::data_local_dir()
        .ok_or(ExportError::StorageUnavailable)?
        .join(EXPORT_DIR);
    fs::create_dir_all(&dir)?;

    let stamp = OffsetDateTime::now_utc().unix_timestamp();
    let path = dir.join(format!("calculations-{stamp}.csv"));
    let file = fs::File::create(&path)?;
    write_history_csv(file, history)?;

    tracing::info!(path = %path.display(), rows = history.len(), "exported calculation history");
    Ok(path)
}
