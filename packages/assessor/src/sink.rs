//! Tabular sink serializing assembled records as CSV.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::record::{OutputRecord, COLUMNS};

/// Write records with a header row to any writer.
pub fn write_csv<W: Write>(writer: W, records: &[OutputRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(COLUMNS)?;
    for record in records {
        csv_writer.write_record(record.to_row())?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write records to a CSV file.
pub fn save_csv(path: &Path, records: &[OutputRecord]) -> Result<()> {
    let file = File::create(path)?;
    write_csv(file, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::CategoricalFields;
    use crate::extract::RawFieldSet;
    use crate::fair::{compute_indicators, IndicatorInputs};

    fn sample_record(title: &str) -> OutputRecord {
        let fields = RawFieldSet::default();
        let indicators = compute_indicators(&IndicatorInputs {
            fields: &fields,
            license: "manuell prüfen",
            resolved_format: None,
            download_url: None,
            access_url: None,
            raw_xml: "<leer/>",
        });

        OutputRecord {
            metadata_record_id: None,
            dataset_id: None,
            title: Some(title.to_string()),
            description: None,
            manual: CategoricalFields::defaults(Some("Berlin")),
            license: "manuell prüfen".to_string(),
            publisher: None,
            contact_email: None,
            download_url: None,
            access_url: None,
            metadata_standard: None,
            metadata_standard_version: None,
            publication_date: None,
            date_stamp: None,
            format: None,
            indicators,
            entry_date: "2026-08-07".to_string(),
        }
    }

    #[test]
    fn test_write_csv_header_and_rows() {
        let records = vec![sample_record("eins"), sample_record("zwei")];

        let mut buffer = Vec::new();
        write_csv(&mut buffer, &records).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Übernommen von Appsmith,Metadatensatz_ID"));
        assert!(lines[1].contains("eins"));
        assert!(lines[2].contains("zwei"));
    }

    #[test]
    fn test_save_csv_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ergebnis.csv");

        save_csv(&path, &[sample_record("eins")]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), COLUMNS.len());
        let rows: Vec<_> = reader.records().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][3], "eins");
    }
}
