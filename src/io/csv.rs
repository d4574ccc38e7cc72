//! CSV record reader/writer.
//!
//! The first row is the header. On read, numeric-looking cells become
//! [`Value::Num`], everything else [`Value::Str`]; an empty cell is treated
//! as an absent field, which feeds straight into the grouper's
//! silent-exclusion rule for records missing key fields.

use std::path::Path;

use crate::record::{Record, Value};

/// CSV read/write error.
#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    /// Underlying CSV parse or write failure.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Read a headered CSV file into records.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<Record>, CsvError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut rec = Record::new();
        for (name, cell) in headers.iter().zip(row.iter()) {
            if cell.is_empty() {
                continue;
            }
            rec.insert(name, Value::parse(cell));
        }
        records.push(rec);
    }
    Ok(records)
}

/// Write records to a headered CSV file.
///
/// The header is the union of field names across all records in first-seen
/// order; a field absent from a record is written as an empty cell.
pub fn write_records(path: impl AsRef<Path>, records: &[Record]) -> Result<(), CsvError> {
    let mut fields: Vec<&str> = Vec::new();
    for rec in records {
        for (name, _) in rec.fields() {
            if !fields.contains(&name) {
                fields.push(name);
            }
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&fields)?;
    for rec in records {
        let row: Vec<String> = fields
            .iter()
            .map(|&field| rec.get(field).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_parses_numbers_and_strings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        std::fs::write(&path, "branch,period,sales\nA,1,2\nB,2,3.5\n").unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("branch"), Some(&Value::Str("A".into())));
        assert_eq!(records[0].get("period"), Some(&Value::Num(1.0)));
        assert_eq!(records[1].get("sales"), Some(&Value::Num(3.5)));
    }

    #[test]
    fn read_treats_empty_cells_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gaps.csv");
        std::fs::write(&path, "branch,period\nA,1\n,2\n").unwrap();

        let records = read_records(&path).unwrap();
        assert!(records[0].contains("branch"));
        assert!(!records[1].contains("branch"));
        assert_eq!(records[1].get("period"), Some(&Value::Num(2.0)));
    }

    #[test]
    fn write_then_read_roundtrip() {
        let records = vec![
            Record::new().with_field("branch", "A").with_field("sales", 2.0),
            Record::new().with_field("branch", "B").with_field("sales", 4.5),
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_records(&path, &records).unwrap();

        let back = read_records(&path).unwrap();
        assert_eq!(back, records);
    }
}
