//! Delimited-text schedule export
//!
//! Serializes an amortization schedule for spreadsheet import: one header
//! row, one row per month, every field quoted (internal quotes doubled by
//! the writer), monetary fields fixed to 2 decimal places.

use csv::{QuoteStyle, WriterBuilder};
use thiserror::Error;

use crate::loan::ScheduleRow;

/// Why a schedule could not be serialized
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("schedule serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("schedule write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("schedule is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serialize a schedule with one payment column per month.
pub fn schedule_csv(rows: &[ScheduleRow]) -> Result<String, ExportError> {
    write_rows(
        &["Month", "Payment", "Interest", "Principal", "Balance"],
        rows,
        |row| {
            vec![
                row.month.to_string(),
                money(row.total_payment),
                money(row.interest),
                money(row.principal_paid),
                money(row.ending_balance),
            ]
        },
    )
}

/// Serialize a schedule with the payment split into base and extra columns.
pub fn schedule_csv_detailed(rows: &[ScheduleRow]) -> Result<String, ExportError> {
    write_rows(
        &[
            "Month",
            "Base Payment",
            "Extra",
            "Payment",
            "Interest",
            "Principal",
            "Balance",
        ],
        rows,
        |row| {
            vec![
                row.month.to_string(),
                money(row.base_payment),
                money(row.extra),
                money(row.total_payment),
                money(row.interest),
                money(row.principal_paid),
                money(row.ending_balance),
            ]
        },
    )
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

fn write_rows(
    header: &[&str],
    rows: &[ScheduleRow],
    to_fields: impl Fn(&ScheduleRow) -> Vec<String>,
) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for row in rows {
        writer.write_record(to_fields(row))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
