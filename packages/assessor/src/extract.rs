//! Field extraction from parsed ISO 19115/19119 documents.
//!
//! All access is optional: a missing element yields `None`, never an empty
//! string, because downstream predicates distinguish the two.

use roxmltree::Document;

use crate::config::CONFORMANT_STANDARD_KEYS;
use crate::xml::{find_all, find_first, find_text, node_text};

/// Raw field values pulled from a single metadata document.
///
/// Populated once per document; every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFieldSet {
    /// Declared metadata standard name (Metadatenstandard).
    pub metadata_standard: Option<String>,

    /// Declared metadata standard version.
    pub metadata_standard_version: Option<String>,

    /// Resource title (Titel).
    pub title: Option<String>,

    /// Resource abstract (Beschreibung).
    pub description: Option<String>,

    /// File-level identifier (Datensatz_ID).
    pub file_identifier: Option<String>,

    /// Resource-level identifier from the service block (Metadatensatz_ID).
    pub resource_identifier: Option<String>,

    /// Publication date-time.
    pub publication_date: Option<String>,

    /// Date stamp of the metadata record.
    pub date_stamp: Option<String>,

    /// Publishing organisation (Herausgeber).
    pub organisation: Option<String>,

    /// Contact e-mail address.
    pub contact_email: Option<String>,

    /// Constraint free-texts in declaration order (license candidates).
    pub constraint_texts: Vec<String>,

    /// Distribution format free-text.
    pub format_text: Option<String>,

    /// Geographic extent description after the fallback chain.
    pub extent_description: Option<String>,

    /// Online-resource URLs in document order.
    pub online_resource_urls: Vec<String>,
}

/// Check the conformance gate: the declared metadata standard must name one
/// of the ISO 19115/19119 or INSPIRE variants. Non-conformant documents
/// yield zero output records.
pub fn is_conformant(doc: &Document<'_>) -> bool {
    let Some(standard) = find_text(
        doc.root_element(),
        ".//gmd:metadataStandardName/gco:CharacterString",
    ) else {
        return false;
    };
    let standard = standard.to_lowercase();
    CONFORMANT_STANDARD_KEYS
        .iter()
        .any(|key| standard.contains(key))
}

/// Extract all raw fields from a document.
pub fn extract_fields(doc: &Document<'_>) -> RawFieldSet {
    let root = doc.root_element();

    RawFieldSet {
        metadata_standard: find_text(root, ".//gmd:metadataStandardName/gco:CharacterString"),
        metadata_standard_version: find_text(
            root,
            ".//gmd:metadataStandardVersion/gco:CharacterString",
        ),
        title: find_text(root, ".//gmd:title/gco:CharacterString"),
        description: find_text(root, ".//gmd:abstract/gco:CharacterString"),
        file_identifier: find_text(root, ".//gmd:fileIdentifier/gco:CharacterString"),
        resource_identifier: find_text(root, ".//srv:identifier/gco:CharacterString"),
        publication_date: find_text(root, ".//gmd:date//gco:DateTime"),
        date_stamp: find_text(root, ".//gmd:dateStamp/gco:Date"),
        organisation: find_text(
            root,
            ".//gmd:pointOfContact//gmd:organisationName/gco:CharacterString",
        ),
        contact_email: find_text(root, ".//gmd:electronicMailAddress/gco:CharacterString"),
        constraint_texts: extract_constraint_texts(doc),
        format_text: find_text(
            root,
            ".//gmd:distributionFormat//gmd:name/gco:CharacterString",
        ),
        extent_description: extract_extent_description(doc),
        online_resource_urls: extract_online_resource_urls(doc),
    }
}

/// Paths tried in order for the geographic extent description.
///
/// The order encodes schema-variant priority: strict ISO extent description,
/// then looser extent variants, then a geographic-identifier code, then the
/// country code. First non-empty result wins.
const EXTENT_DESCRIPTION_PATHS: &[&str] = &[
    ".//gmd:extent//gmd:EX_Extent//gmd:description/gco:CharacterString",
    ".//gmd:EX_Extent/gmd:description/gco:CharacterString",
    ".//gmd:extent//gmd:description/gco:CharacterString",
    ".//gmd:EX_GeographicDescription//gmd:MD_Identifier//gmd:code/gco:CharacterString",
    ".//gmd:country/gco:CharacterString",
];

fn extract_extent_description(doc: &Document<'_>) -> Option<String> {
    let root = doc.root_element();
    EXTENT_DESCRIPTION_PATHS
        .iter()
        .find_map(|path| find_text(root, path))
}

/// Collect constraint free-texts in declaration order.
fn extract_constraint_texts(doc: &Document<'_>) -> Vec<String> {
    find_all(
        doc.root_element(),
        ".//gmd:resourceConstraints//gmd:otherConstraints/gco:CharacterString",
    )
    .into_iter()
    .filter_map(node_text)
    .collect()
}

/// Collect one URL per online resource, in document order.
///
/// Each `CI_OnlineResource` contributes the text of its first `gmd:URL`
/// element; resources without a URL are skipped.
fn extract_online_resource_urls(doc: &Document<'_>) -> Vec<String> {
    find_all(
        doc.root_element(),
        ".//gmd:transferOptions//gmd:onLine//gmd:CI_OnlineResource",
    )
    .into_iter()
    .filter_map(|resource| find_first(resource, ".//gmd:URL").and_then(node_text))
    .collect()
}
