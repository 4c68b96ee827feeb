use std::io::Write;

use crate::core::models::calculation::{CalculationResult, ExportRow, RelaxationStep};

/// Writes both series side by side as CSV, one row per step, with a header.
///
/// Rows are paired by position; a longer series is truncated to the shorter one.
/// Returns the number of data rows written.
pub fn write_series<W: Write>(
    writer: W,
    results: &[CalculationResult],
    relaxation: &[RelaxationStep],
) -> Result<usize, csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    let mut rows = 0;
    for (result, step) in results.iter().zip(relaxation) {
        csv.serialize(ExportRow::new(result, step))?;
        rows += 1;
    }
    csv.flush()?;
    Ok(rows)
}
