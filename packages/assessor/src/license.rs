//! License resolution from free-text constraint statements.
//!
//! Catalog records carry license information as free text in
//! `otherConstraints` elements, sometimes as an embedded JSON object with a
//! `url` field. Known German open-data license phrases map to their
//! canonical URLs; everything else is flagged for manual review.

use std::sync::LazyLock;

use crate::config::MANUAL_REVIEW;

/// Known license phrases and their canonical URLs, in match priority order.
///
/// Keys are normalized at initialization with the same function applied to
/// lookup input, so table maintenance stays consistent with runtime lookup.
const LICENSE_PHRASES: &[(&str, &str)] = &[
    (
        "datenlizenz deutschland – zero – version 2.0",
        "https://www.govdata.de/dl-de/zero-2-0",
    ),
    (
        "datenlizenz deutschland – namensnennung – version 2.0",
        "https://www.govdata.de/dl-de/by-2-0",
    ),
    ("cc-by 4.0", "https://creativecommons.org/licenses/by/4.0/"),
    (
        "es gelten keine bedingungen",
        "https://www.govdata.de/dl-de/zero-2-0",
    ),
];

static LICENSE_TABLE: LazyLock<Vec<(String, &'static str)>> = LazyLock::new(|| {
    LICENSE_PHRASES
        .iter()
        .map(|(phrase, url)| (normalize_license_text(phrase), *url))
        .collect()
});

/// Canonicalize license free-text for lookup: lowercase, strip everything
/// that is not an ASCII letter or digit.
pub fn normalize_license_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Map a single license free-text to a canonical URL.
///
/// A JSON object with a string `url` field short-circuits; otherwise the
/// normalized text is looked up in the phrase table. Unknown text yields
/// the manual-review sentinel.
pub fn map_license_url(freetext: &str) -> String {
    let freetext = freetext.trim();

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(freetext) {
        if let Some(url) = value.as_object().and_then(|o| o.get("url")).and_then(|u| u.as_str()) {
            return url.to_string();
        }
    }

    let normalized = normalize_license_text(freetext);
    LICENSE_TABLE
        .iter()
        .find(|(phrase, _)| *phrase == normalized)
        .map_or_else(|| MANUAL_REVIEW.to_string(), |(_, url)| (*url).to_string())
}

/// Resolve a record's license from its ordered constraint texts.
///
/// Texts are tried in declaration order; the first resolution that is not
/// the manual-review sentinel wins. An empty list or all-unknown texts
/// yield the sentinel.
pub fn resolve_license(constraint_texts: &[String]) -> String {
    for text in constraint_texts {
        if text.trim().is_empty() {
            continue;
        }
        let resolved = map_license_url(text);
        if resolved != MANUAL_REVIEW {
            return resolved;
        }
    }
    MANUAL_REVIEW.to_string()
}
