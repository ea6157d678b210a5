//! CSV export of a filtered subset.

use polars::prelude::*;

use crate::StoreError;

/// Serialize a frame to CSV bytes, header included.
///
/// The export carries the same columns as the input table with the
/// current filter applied; there is no further schema contract.
///
/// # Errors
/// Returns a polars error if serialization fails.
pub fn export_csv(frame: &DataFrame) -> Result<Vec<u8>, StoreError> {
    let mut buf = Vec::new();
    let mut df = frame.clone();
    CsvWriter::new(&mut buf).include_header(true).finish(&mut df)?;
    Ok(buf)
}
