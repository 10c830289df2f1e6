//! DCAT-AP distinction between download URLs and access URLs.
//!
//! A download URL points at a direct file, an access URL at a portal or
//! service landing page. Classification is by file-extension heuristic over
//! the online resources in document order; only the first URL of each
//! category is kept.

use crate::config::DIRECT_FILE_EXTENSIONS;

/// Result of partitioning a record's online-resource URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlClassification {
    /// First direct-file URL, if any.
    pub download: Option<String>,

    /// First portal/service URL, if any.
    pub access: Option<String>,
}

/// Check whether a URL points at a direct file.
///
/// True when the URL (case-insensitive) ends with one of the known file
/// extensions or with a literal `?`, which some portals use for
/// parameterized direct downloads.
pub fn is_direct_file(url: &str) -> bool {
    let url = url.to_lowercase();
    url.ends_with('?')
        || DIRECT_FILE_EXTENSIONS
            .iter()
            .any(|ext| url.ends_with(ext))
}

/// Partition URLs into at most one download URL and one access URL.
///
/// URLs are visited in the given order; the first direct-file URL becomes
/// the download URL, the first other URL the access URL. Later matches of
/// an already-filled category are discarded, so classification is
/// idempotent over the same ordered list.
pub fn classify_urls<I, S>(urls: I) -> UrlClassification
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut classification = UrlClassification::default();

    for url in urls {
        let url = url.as_ref().trim();
        if url.is_empty() {
            continue;
        }
        if is_direct_file(url) {
            if classification.download.is_none() {
                classification.download = Some(url.to_string());
            }
        } else if classification.access.is_none() {
            classification.access = Some(url.to_string());
        }
    }

    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_direct_file_extensions() {
        assert!(is_direct_file("https://example.org/daten.zip"));
        assert!(is_direct_file("https://example.org/daten.CSV"));
        assert!(is_direct_file("https://example.org/daten.geojson"));
        assert!(is_direct_file("https://example.org/download?"));
        assert!(!is_direct_file("https://example.org/portal"));
        assert!(!is_direct_file("https://example.org/daten.zip/info"));
    }

    #[test]
    fn test_first_of_each_category_wins() {
        let classification = classify_urls([
            "https://example.org/portal",
            "https://example.org/a.zip",
            "https://example.org/b.zip",
            "https://example.org/other-portal",
        ]);
        assert_eq!(
            classification.download.as_deref(),
            Some("https://example.org/a.zip")
        );
        assert_eq!(
            classification.access.as_deref(),
            Some("https://example.org/portal")
        );
    }

    #[test]
    fn test_only_access() {
        let classification = classify_urls(["https://example.org/portal"]);
        assert_eq!(classification.download, None);
        assert_eq!(
            classification.access.as_deref(),
            Some("https://example.org/portal")
        );
    }

    #[test]
    fn test_empty_list() {
        let classification = classify_urls(Vec::<String>::new());
        assert_eq!(classification, UrlClassification::default());
    }

    #[test]
    fn test_classification_is_idempotent() {
        let urls = vec![
            "https://example.org/daten.gml".to_string(),
            "https://example.org/portal".to_string(),
        ];
        let first = classify_urls(&urls);
        let second = classify_urls(&urls);
        assert_eq!(first, second);
    }
}
