//! Mapping free-text format and service descriptions to IANA media types.
//!
//! The rule table is ordered: overlapping patterns (`geojson` before `json`,
//! `geopackage` before `sqlite`) rely on first-match-wins precedence, and
//! word boundaries keep the generic patterns from matching inside the more
//! specific tokens.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::MEDIA_TYPE_SEPARATOR;

/// Ordered pattern rules. Input is lowercased before matching, so the
/// patterns are written lowercase.
const MEDIA_TYPE_PATTERNS: &[(&str, &[&str])] = &[
    (r"\bshapefile\b", &["application/x-esri-shapefile"]),
    (
        r"\bgeopackage\b|\bgpkg\b",
        &["application/geopackage+sqlite3", "application/geopackage"],
    ),
    (r"\bgml\b", &["application/gml+xml"]),
    (r"\bgeojson\b", &["application/geo+json"]),
    (r"\bkml\b", &["application/vnd.google-earth.kml+xml"]),
    (r"\bcsv\b", &["text/csv"]),
    (r"\bnetcdf\b", &["application/x-netcdf"]),
    (r"\btiff\b|\bgeotiff\b", &["image/tiff", "image/geotiff"]),
    (r"\bjpeg2000\b|\bjp2\b", &["image/jp2"]),
    (r"\bpdf\b", &["application/pdf"]),
    (r"\bzip\b", &["application/zip"]),
    (r"\bxml\b", &["text/xml", "application/xml"]),
    (r"\bwms\b", &["OGC:WMS", "application/xml"]),
    (r"\bwfs\b", &["OGC:WFS", "application/xml"]),
    (r"\batom\b|inspire download service", &["application/atom+xml"]),
    (
        r"\b(gdb|file geodatabase|geodatabase)\b",
        &["application/x-esri-filegdb"],
    ),
    (r"\bsqlite\b", &["application/vnd.sqlite3"]),
    (r"\bjson\b", &["application/json"]),
    (
        r"\b(xlsx|excel)\b",
        &["application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"],
    ),
];

#[allow(clippy::expect_used)] // Static patterns that are guaranteed to be valid
static MEDIA_TYPE_RULES: LazyLock<Vec<(Regex, &'static [&'static str])>> = LazyLock::new(|| {
    MEDIA_TYPE_PATTERNS
        .iter()
        .map(|(pattern, media)| (Regex::new(pattern).expect("valid regex"), *media))
        .collect()
});

/// Map a format/service description to its recommended DCAT media types.
///
/// The first rule whose pattern matches the lowercased text determines the
/// result; multiple identifiers are joined with `" | "`. Empty input yields
/// empty output, unmatched input is returned unchanged.
pub fn recommended_media_type(format_service: &str) -> String {
    if format_service.is_empty() {
        return String::new();
    }
    let text = format_service.to_lowercase();
    for (pattern, media) in MEDIA_TYPE_RULES.iter() {
        if pattern.is_match(&text) {
            return media.join(MEDIA_TYPE_SEPARATOR);
        }
    }
    format_service.to_string()
}
