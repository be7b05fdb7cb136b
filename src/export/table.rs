use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::core::CseError;

/// Writes `rows` as CSV, one row per item, with a header taken from the field names.
///
/// Items must be flat structs; nested fields are rejected by the CSV serializer.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), CseError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes heterogeneous JSON objects as CSV.
///
/// The header is the union of keys in order of first appearance; a row missing a key
/// gets an empty cell. Nested values are written as compact JSON.
pub fn write_table(path: &Path, rows: &[Value]) -> Result<(), CseError> {
    let header = union_keys(rows);
    let mut wtr = csv::Writer::from_path(path)?;
    if header.is_empty() {
        wtr.flush()?;
        return Ok(());
    }

    wtr.write_record(&header)?;
    for row in rows {
        let cells: Vec<String> = header.iter().map(|k| cell(row.get(k))).collect();
        wtr.write_record(&cells)?;
    }
    wtr.flush()?;
    Ok(())
}

pub(crate) fn union_keys(rows: &[Value]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for obj in rows.iter().filter_map(Value::as_object) {
        for k in obj.keys() {
            if !keys.iter().any(|seen| seen == k) {
                keys.push(k.clone());
            }
        }
    }
    keys
}

pub(crate) fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
