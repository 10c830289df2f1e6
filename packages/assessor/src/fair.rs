//! FAIR maturity indicators.
//!
//! Each indicator is a pure predicate over the extracted fields and the
//! resolved license/URL/format values; no indicator depends on another
//! indicator's value. The two vocabulary indicators additionally re-parse
//! the raw document and scan element namespaces; only they can report
//! `Fehler`.

use std::collections::HashSet;

use crate::extract::RawFieldSet;

/// Ternary indicator value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ternary {
    Ja,
    Nein,
    /// Parse failure during the namespace scan.
    Fehler,
}

impl Ternary {
    /// Get the string value for tabular output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::Nein => "nein",
            Self::Fehler => "Fehler",
        }
    }

    fn from_bool(value: bool) -> Self {
        if value {
            Self::Ja
        } else {
            Self::Nein
        }
    }
}

/// Semantic-web vocabulary namespaces recognized for RDA-I1-02M.
const SEMANTIC_WEB_VOCABULARIES: &[&str] = &[
    "http://www.w3.org/ns/dcat#",
    "http://schema.org/",
    "http://www.w3.org/2004/02/skos/core#",
    "http://purl.org/dc/terms/",
    "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
    "http://www.w3.org/2002/07/owl#",
];

/// INSPIRE/geo vocabulary namespaces recognized for RDA-I2-01M.
const GEO_VOCABULARIES: &[&str] = &[
    "http://www.isotc211.org/2005/gmd",
    "http://www.opengis.net/gml",
    "http://www.isotc211.org/2005/gco",
    "http://www.w3.org/ns/dcat#",
    "http://purl.org/dc/terms/",
];

/// Media type tokens counting as open/standard formats (RDA-R1.3-01D).
/// Matched as substrings of the resolved format value.
const OPEN_FORMAT_TOKENS: &[&str] = &[
    "application/x-esri-shapefile",
    "application/geo+json",
    "application/gml+xml",
    "text/csv",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/xml",
    "RDF",
    "OGC:WFS",
    "OGC:WMS",
    "application/json",
];

/// Tokens marking a metadata standard as community-aligned (RDA-R1.3-02M).
const STANDARD_TOKENS: &[&str] = &["iso", "iso/ts", "rdf", "owl", "xsd", "dcat"];

/// Inputs to the indicator engine.
///
/// `download_url` and `access_url` are the effective values after URL
/// classification, directory-listing expansion, and any reachability
/// annotation; `license` is the resolved value (canonical URL or the
/// manual-review sentinel).
#[derive(Debug, Clone, Copy)]
pub struct IndicatorInputs<'a> {
    pub fields: &'a RawFieldSet,
    pub license: &'a str,
    pub resolved_format: Option<&'a str>,
    pub download_url: Option<&'a str>,
    pub access_url: Option<&'a str>,
    pub raw_xml: &'a str,
}

/// The full set of computed indicators, keyed by RDA code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FairIndicators {
    pub f1_01m: Ternary,
    pub f1_01d: Ternary,
    pub f1_02m: Ternary,
    pub f1_02d: Ternary,
    pub f2_01m: Ternary,
    pub f3_01m: Ternary,
    pub a1_01m: Ternary,
    pub a1_02m: Ternary,
    pub a1_02d: Ternary,
    pub a1_04m: Ternary,
    pub a1_04d: Ternary,
    pub a1_1_01m: Ternary,
    pub a1_1_01d: Ternary,
    pub i1_01m: Ternary,
    pub i1_02m: Ternary,
    pub i2_01m: Ternary,
    pub r1_1_01m: Ternary,
    pub r1_3_01m: Ternary,
    pub r1_3_01d: Ternary,
    pub r1_3_02m: Ternary,
}

impl FairIndicators {
    /// Indicator values paired with their RDA codes, in output column order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, Ternary); 20] {
        [
            ("RDA-F1-01M", self.f1_01m),
            ("RDA-F1-01D", self.f1_01d),
            ("RDA-F1-02M", self.f1_02m),
            ("RDA-F1-02D", self.f1_02d),
            ("RDA-F2-01M", self.f2_01m),
            ("RDA-F3-01M", self.f3_01m),
            ("RDA-A1-01M", self.a1_01m),
            ("RDA-A1-02M", self.a1_02m),
            ("RDA-A1-02D", self.a1_02d),
            ("RDA-A1-04M", self.a1_04m),
            ("RDA-A1-04D", self.a1_04d),
            ("RDA-A1.1-01M", self.a1_1_01m),
            ("RDA-A1.1-01D", self.a1_1_01d),
            ("RDA-I1-01M", self.i1_01m),
            ("RDA-I1-02M", self.i1_02m),
            ("RDA-I2-01M", self.i2_01m),
            ("RDA-R1.1-01M", self.r1_1_01m),
            ("RDA-R1.3-01M", self.r1_3_01m),
            ("RDA-R1.3-01D", self.r1_3_01d),
            ("RDA-R1.3-02M", self.r1_3_02m),
        ]
    }
}

/// Scan element namespaces of a raw XML document.
pub fn scan_namespaces(xml: &str) -> Result<HashSet<String>, roxmltree::Error> {
    let doc = roxmltree::Document::parse(xml)?;
    Ok(doc
        .descendants()
        .filter(|n| n.is_element())
        .filter_map(|n| n.tag_name().namespace().map(str::to_string))
        .collect())
}

/// "ja" iff any element namespace is in the vocabulary list, "Fehler" on
/// parse failure.
fn vocabulary_indicator(xml: &str, vocabularies: &[&str]) -> Ternary {
    match scan_namespaces(xml) {
        Ok(namespaces) => Ternary::from_bool(
            namespaces
                .iter()
                .any(|ns| vocabularies.contains(&ns.as_str())),
        ),
        Err(_) => Ternary::Fehler,
    }
}

fn starts_with_http(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.starts_with("http"))
}

/// Any of the values starts with an http(s) or ftp scheme.
fn any_resolvable_url(values: &[Option<&str>]) -> bool {
    values
        .iter()
        .flatten()
        .any(|u| u.starts_with("http") || u.starts_with("ftp"))
}

/// Compute the full indicator set.
///
/// Pure over its inputs: given the same fields and resolved values the
/// result is identical; only the two vocabulary indicators read the raw
/// document text (and only that text).
#[must_use]
pub fn compute_indicators(inputs: &IndicatorInputs<'_>) -> FairIndicators {
    let fields = inputs.fields;
    let download = inputs.download_url;
    let access = inputs.access_url;

    let has_format = inputs.resolved_format.is_some_and(|f| !f.is_empty());
    let has_contact_or_url =
        fields.contact_email.is_some() || download.is_some() || access.is_some();

    FairIndicators {
        f1_01m: Ternary::from_bool(fields.file_identifier.is_some()),
        f1_01d: Ternary::from_bool(fields.resource_identifier.is_some()),
        f1_02m: Ternary::from_bool(starts_with_http(fields.file_identifier.as_deref())),
        f1_02d: Ternary::from_bool(starts_with_http(fields.resource_identifier.as_deref())),
        // License is always present as URL or sentinel, so this reduces to
        // title+description+format.
        f2_01m: Ternary::from_bool(
            fields.title.is_some()
                && fields.description.is_some()
                && has_format
                && !inputs.license.is_empty(),
        ),
        f3_01m: Ternary::from_bool(fields.file_identifier.is_some() || access.is_some()),
        a1_01m: Ternary::from_bool(download.is_some() || access.is_some()),
        a1_02m: Ternary::from_bool(has_contact_or_url),
        a1_02d: Ternary::from_bool(has_contact_or_url),
        a1_04m: Ternary::from_bool(starts_with_http(download)),
        a1_04d: Ternary::from_bool(any_resolvable_url(&[download, access])),
        a1_1_01m: Ternary::from_bool(starts_with_http(download)),
        a1_1_01d: Ternary::from_bool(any_resolvable_url(&[download, access])),
        i1_01m: Ternary::from_bool(fields.metadata_standard.is_some()),
        i1_02m: vocabulary_indicator(inputs.raw_xml, SEMANTIC_WEB_VOCABULARIES),
        i2_01m: vocabulary_indicator(inputs.raw_xml, GEO_VOCABULARIES),
        r1_1_01m: Ternary::from_bool(!inputs.license.is_empty()),
        r1_3_01m: Ternary::from_bool(fields.metadata_standard.is_some()),
        r1_3_01d: Ternary::from_bool(inputs.resolved_format.is_some_and(|format| {
            OPEN_FORMAT_TOKENS.iter().any(|token| format.contains(token))
        })),
        r1_3_02m: Ternary::from_bool(fields.metadata_standard.as_deref().is_some_and(
            |standard| {
                let standard = standard.to_lowercase();
                STANDARD_TOKENS.iter().any(|token| standard.contains(token))
            },
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ISO_XML: &str = r#"<gmd:MD_Metadata
        xmlns:gmd="http://www.isotc211.org/2005/gmd"
        xmlns:gco="http://www.isotc211.org/2005/gco">
      <gmd:fileIdentifier><gco:CharacterString>id</gco:CharacterString></gmd:fileIdentifier>
    </gmd:MD_Metadata>"#;

    fn base_fields() -> RawFieldSet {
        RawFieldSet {
            metadata_standard: Some("ISO 19115".to_string()),
            title: Some("Titel".to_string()),
            description: Some("Beschreibung".to_string()),
            file_identifier: Some("https://registry.example.org/abc".to_string()),
            resource_identifier: Some("res-1".to_string()),
            contact_email: Some("geodaten@example.org".to_string()),
            ..RawFieldSet::default()
        }
    }

    fn base_inputs<'a>(fields: &'a RawFieldSet, xml: &'a str) -> IndicatorInputs<'a> {
        IndicatorInputs {
            fields,
            license: "https://www.govdata.de/dl-de/by-2-0",
            resolved_format: Some("text/csv"),
            download_url: Some("https://example.org/daten.csv"),
            access_url: Some("https://example.org/portal"),
            raw_xml: xml,
        }
    }

    #[test]
    fn test_identifier_indicators() {
        let fields = base_fields();
        let indicators = compute_indicators(&base_inputs(&fields, ISO_XML));

        assert_eq!(indicators.f1_01m, Ternary::Ja);
        assert_eq!(indicators.f1_01d, Ternary::Ja);
        // file identifier is a URL, resource identifier is not
        assert_eq!(indicators.f1_02m, Ternary::Ja);
        assert_eq!(indicators.f1_02d, Ternary::Nein);
    }

    #[test]
    fn test_missing_identifiers_are_nein() {
        let fields = RawFieldSet::default();
        let inputs = IndicatorInputs {
            fields: &fields,
            license: "manuell prüfen",
            resolved_format: None,
            download_url: None,
            access_url: None,
            raw_xml: ISO_XML,
        };
        let indicators = compute_indicators(&inputs);

        assert_eq!(indicators.f1_01m, Ternary::Nein);
        assert_eq!(indicators.f1_02m, Ternary::Nein);
        assert_eq!(indicators.a1_01m, Ternary::Nein);
        assert_eq!(indicators.a1_04m, Ternary::Nein);
        assert_eq!(indicators.f2_01m, Ternary::Nein);
    }

    #[test]
    fn test_richness_requires_all_fields() {
        let mut fields = base_fields();
        let indicators = compute_indicators(&base_inputs(&fields, ISO_XML));
        assert_eq!(indicators.f2_01m, Ternary::Ja);

        fields.description = None;
        let indicators = compute_indicators(&base_inputs(&fields, ISO_XML));
        assert_eq!(indicators.f2_01m, Ternary::Nein);
    }

    #[test]
    fn test_access_family() {
        let fields = base_fields();
        let mut inputs = base_inputs(&fields, ISO_XML);
        inputs.download_url = None;

        let indicators = compute_indicators(&inputs);
        // Access URL alone satisfies the plain access indicator.
        assert_eq!(indicators.a1_01m, Ternary::Ja);
        // The strict download variants need the download URL.
        assert_eq!(indicators.a1_04m, Ternary::Nein);
        assert_eq!(indicators.a1_1_01m, Ternary::Nein);
        // The either-URL variants accept the access URL.
        assert_eq!(indicators.a1_04d, Ternary::Ja);
        assert_eq!(indicators.a1_1_01d, Ternary::Ja);
    }

    #[test]
    fn test_annotated_download_url_still_counts_as_http() {
        // A download URL flagged for manual confirmation keeps its scheme
        // prefix, so the strict http indicators stay "ja".
        let fields = base_fields();
        let mut inputs = base_inputs(&fields, ISO_XML);
        inputs.download_url =
            Some("https://example.org/daten.zip (Bitte manuell angeben, URL nicht erreichbar)");

        let indicators = compute_indicators(&inputs);
        assert_eq!(indicators.a1_04m, Ternary::Ja);
        assert_eq!(indicators.a1_1_01m, Ternary::Ja);
    }

    #[test]
    fn test_vocabulary_indicators_geo() {
        let fields = base_fields();
        let indicators = compute_indicators(&base_inputs(&fields, ISO_XML));
        // gmd namespace is a geo vocabulary but not a semantic-web one.
        assert_eq!(indicators.i2_01m, Ternary::Ja);
        assert_eq!(indicators.i1_02m, Ternary::Nein);
    }

    #[test]
    fn test_vocabulary_indicators_semantic_web() {
        let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
            <rdf:Description/>
        </rdf:RDF>"#;
        let fields = base_fields();
        let indicators = compute_indicators(&base_inputs(&fields, xml));
        assert_eq!(indicators.i1_02m, Ternary::Ja);
    }

    #[test]
    fn test_vocabulary_indicators_error_on_malformed_xml() {
        let fields = base_fields();
        let indicators = compute_indicators(&base_inputs(&fields, "<kaputt"));
        assert_eq!(indicators.i1_02m, Ternary::Fehler);
        assert_eq!(indicators.i2_01m, Ternary::Fehler);
    }

    #[test]
    fn test_format_openness() {
        let fields = base_fields();

        let mut inputs = base_inputs(&fields, ISO_XML);
        inputs.resolved_format = Some("OGC:WMS | application/xml");
        assert_eq!(compute_indicators(&inputs).r1_3_01d, Ternary::Ja);

        inputs.resolved_format = Some("proprietäres Binärformat");
        assert_eq!(compute_indicators(&inputs).r1_3_01d, Ternary::Nein);

        inputs.resolved_format = None;
        assert_eq!(compute_indicators(&inputs).r1_3_01d, Ternary::Nein);
    }

    #[test]
    fn test_standard_alignment() {
        let mut fields = base_fields();
        let indicators = compute_indicators(&base_inputs(&fields, ISO_XML));
        assert_eq!(indicators.i1_01m, Ternary::Ja);
        assert_eq!(indicators.r1_3_02m, Ternary::Ja);

        fields.metadata_standard = Some("hausintern".to_string());
        let indicators = compute_indicators(&base_inputs(&fields, ISO_XML));
        assert_eq!(indicators.i1_01m, Ternary::Ja);
        assert_eq!(indicators.r1_3_02m, Ternary::Nein);

        fields.metadata_standard = None;
        let indicators = compute_indicators(&base_inputs(&fields, ISO_XML));
        assert_eq!(indicators.i1_01m, Ternary::Nein);
    }

    #[test]
    fn test_determinism() {
        let fields = base_fields();
        let inputs = base_inputs(&fields, ISO_XML);
        assert_eq!(compute_indicators(&inputs), compute_indicators(&inputs));
    }

    #[test]
    fn test_entries_order_and_count() {
        let fields = base_fields();
        let entries = compute_indicators(&base_inputs(&fields, ISO_XML)).entries();
        assert_eq!(entries.len(), 20);
        assert_eq!(entries[0].0, "RDA-F1-01M");
        assert_eq!(entries[19].0, "RDA-R1.3-02M");
    }
}
