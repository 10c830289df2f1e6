//! The flattened output record.
//!
//! Column names follow the DCAT-AP-like target schema of the catalog
//! spreadsheet, hence the German headers. A record is built once per
//! document, cloned per fanned-out download URL, and never mutated after
//! emission.

use crate::collect::CategoricalFields;
use crate::fair::FairIndicators;

/// Column headers in stable output order.
///
/// The first and the last three columns are maintained by hand in the
/// target spreadsheet and stay empty here.
pub const COLUMNS: [&str; 46] = [
    "Übernommen von Appsmith",
    "Metadatensatz_ID",
    "Datensatz_ID",
    "Titel",
    "Beschreibung",
    "Kategorie",
    "enthält synthetische Daten",
    "ist zugänglich ohne Zahlung",
    "ist zugänglich ohne Registrierung",
    "Erstellenart",
    "Geographische Beschreibung",
    "Lizenz",
    "Herausgeber",
    "Kontakt E-Mail",
    "Download-URL",
    "Zugriffs-URL",
    "Metadatenstandard",
    "Metadatenstandardversion",
    "Veröffentlichungsdatum",
    "Letzte Aktualisierung",
    "Erstellungsdatum des Metadatensatzes",
    "Format",
    "RDA-F1-01M",
    "RDA-F1-01D",
    "RDA-F1-02M",
    "RDA-F1-02D",
    "RDA-F2-01M",
    "RDA-F3-01M",
    "RDA-A1-01M",
    "RDA-A1-02M",
    "RDA-A1-02D",
    "RDA-A1-04M",
    "RDA-A1-04D",
    "RDA-A1.1-01M",
    "RDA-A1.1-01D",
    "RDA-I1-01M",
    "RDA-I1-02M",
    "RDA-I2-01M",
    "RDA-R1.1-01M",
    "RDA-R1.3-01M",
    "RDA-R1.3-01D",
    "RDA-R1.3-02M",
    "Eintragsdatum",
    "Keywords",
    "Kommentar",
    "Person",
];

/// One fully assembled output record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    /// Resource-level identifier (Metadatensatz_ID).
    pub metadata_record_id: Option<String>,

    /// File-level identifier (Datensatz_ID).
    pub dataset_id: Option<String>,

    pub title: Option<String>,
    pub description: Option<String>,

    /// Reviewer-supplied categorical fields.
    pub manual: CategoricalFields,

    /// Resolved license URL or the manual-review sentinel.
    pub license: String,

    pub publisher: Option<String>,
    pub contact_email: Option<String>,

    pub download_url: Option<String>,
    pub access_url: Option<String>,

    pub metadata_standard: Option<String>,
    pub metadata_standard_version: Option<String>,
    pub publication_date: Option<String>,

    /// Date stamp of the metadata record; feeds both the last-update and
    /// the metadata-creation-date columns.
    pub date_stamp: Option<String>,

    /// Resolved media type(s), or the original format text when unmatched.
    pub format: Option<String>,

    pub indicators: FairIndicators,

    /// Date this record was assembled (YYYY-MM-DD).
    pub entry_date: String,
}

fn ja_nein(value: bool) -> String {
    if value { "ja" } else { "nein" }.to_string()
}

fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

impl OutputRecord {
    /// Flatten the record into one cell per column, in [`COLUMNS`] order.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        let mut row = vec![
            String::new(),
            cell(&self.metadata_record_id),
            cell(&self.dataset_id),
            cell(&self.title),
            cell(&self.description),
            self.manual.category.clone(),
            ja_nein(self.manual.synthetic_data),
            ja_nein(self.manual.free_of_charge),
            ja_nein(self.manual.no_registration),
            self.manual.creation_type.clone(),
            self.manual.federal_state.clone(),
            self.license.clone(),
            cell(&self.publisher),
            cell(&self.contact_email),
            cell(&self.download_url),
            cell(&self.access_url),
            cell(&self.metadata_standard),
            cell(&self.metadata_standard_version),
            cell(&self.publication_date),
            cell(&self.date_stamp),
            cell(&self.date_stamp),
            cell(&self.format),
        ];
        row.extend(
            self.indicators
                .entries()
                .iter()
                .map(|(_, value)| value.as_str().to_string()),
        );
        row.push(self.entry_date.clone());
        row.extend([String::new(), String::new(), String::new()]);
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::RawFieldSet;
    use crate::fair::{compute_indicators, IndicatorInputs};
    use pretty_assertions::assert_eq;

    fn sample_record() -> OutputRecord {
        let fields = RawFieldSet {
            title: Some("Titel".to_string()),
            ..RawFieldSet::default()
        };
        let indicators = compute_indicators(&IndicatorInputs {
            fields: &fields,
            license: "manuell prüfen",
            resolved_format: None,
            download_url: None,
            access_url: None,
            raw_xml: "<leer/>",
        });

        OutputRecord {
            metadata_record_id: Some("res-1".to_string()),
            dataset_id: None,
            title: Some("Titel".to_string()),
            description: None,
            manual: CategoricalFields {
                category: "Umwelt; Klima".to_string(),
                federal_state: "Bayern".to_string(),
                synthetic_data: false,
                free_of_charge: true,
                no_registration: true,
                creation_type: "amtlich".to_string(),
            },
            license: "manuell prüfen".to_string(),
            publisher: None,
            contact_email: None,
            download_url: None,
            access_url: Some("https://example.org/portal".to_string()),
            metadata_standard: None,
            metadata_standard_version: None,
            publication_date: None,
            date_stamp: Some("2024-05-01".to_string()),
            format: None,
            indicators,
            entry_date: "2026-08-07".to_string(),
        }
    }

    #[test]
    fn test_row_matches_column_count() {
        assert_eq!(sample_record().to_row().len(), COLUMNS.len());
    }

    #[test]
    fn test_row_cell_positions() {
        let row = sample_record().to_row();

        let col = |name: &str| COLUMNS.iter().position(|c| *c == name).unwrap();
        assert_eq!(row[col("Metadatensatz_ID")], "res-1");
        assert_eq!(row[col("Titel")], "Titel");
        assert_eq!(row[col("Kategorie")], "Umwelt; Klima");
        assert_eq!(row[col("enthält synthetische Daten")], "nein");
        assert_eq!(row[col("ist zugänglich ohne Zahlung")], "ja");
        assert_eq!(row[col("Geographische Beschreibung")], "Bayern");
        assert_eq!(row[col("Download-URL")], "");
        assert_eq!(row[col("Zugriffs-URL")], "https://example.org/portal");
        // date stamp feeds both date columns
        assert_eq!(row[col("Letzte Aktualisierung")], "2024-05-01");
        assert_eq!(row[col("Erstellungsdatum des Metadatensatzes")], "2024-05-01");
        assert_eq!(row[col("Eintragsdatum")], "2026-08-07");
        assert_eq!(row[col("Keywords")], "");
    }

    #[test]
    fn test_indicator_cells_align_with_codes() {
        let record = sample_record();
        let row = record.to_row();
        for (code, value) in record.indicators.entries() {
            let idx = COLUMNS.iter().position(|c| *c == code).unwrap();
            assert_eq!(row[idx], value.as_str());
        }
    }
}
