//! Network probes: reachability checks and directory-listing scrapes.
//!
//! Both calls are best-effort collaborators of the pipeline. Failures are
//! never fatal: a timeout or error degrades to "unreachable" and the
//! pipeline continues with a manual-review annotation. No retries.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::Result;

/// User agent string identifying this assessor.
const USER_AGENT: &str = concat!("fairmeta-assessor/", env!("CARGO_PKG_VERSION"));

/// Accept header for directory index pages (XML preferred).
const LISTING_ACCEPT: &str = "application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Result of a directory-listing scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryListing {
    /// File names found in the index, in listing order.
    Files(Vec<String>),

    /// The access URL could not be fetched or did not look like an index.
    Unreachable,
}

/// Network-backed collaborator interface of the pipeline.
///
/// Injectable so the pipeline can run offline and be tested with scripted
/// implementations.
pub trait Probe {
    /// Check whether a URL answers with a final status below 400.
    fn is_reachable(&self, url: &str) -> bool;

    /// Enumerate file names from a directory index page.
    fn list_directory(&self, url: &str) -> DirectoryListing;
}

/// Create a configured blocking HTTP client.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Production probe backed by a blocking HTTP client.
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    /// Create a probe with a freshly configured client.
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: create_client()?,
        })
    }

    /// Create a probe from an existing client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Probe for HttpProbe {
    /// HEAD first, full GET only when the HEAD status is not conclusive.
    /// Any transport error or timeout counts as unreachable.
    fn is_reachable(&self, url: &str) -> bool {
        match self.client.head(url).send() {
            Ok(response) if response.status().as_u16() < 400 => true,
            Ok(_) => match self.client.get(url).send() {
                Ok(response) => response.status().as_u16() < 400,
                Err(_) => false,
            },
            Err(_) => false,
        }
    }

    fn list_directory(&self, url: &str) -> DirectoryListing {
        let response = match self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, LISTING_ACCEPT)
            .send()
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(url, error = %e, "Directory listing request failed");
                return DirectoryListing::Unreachable;
            }
        };

        if response.status().as_u16() != 200 {
            tracing::debug!(url, status = %response.status(), "Directory listing not available");
            return DirectoryListing::Unreachable;
        }

        match response.text() {
            Ok(body) => parse_directory_listing(&body),
            Err(_) => DirectoryListing::Unreachable,
        }
    }
}

/// Probe for offline runs: everything is unreachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineProbe;

impl Probe for OfflineProbe {
    fn is_reachable(&self, _url: &str) -> bool {
        false
    }

    fn list_directory(&self, _url: &str) -> DirectoryListing {
        DirectoryListing::Unreachable
    }
}

/// Parse a directory index page.
///
/// The index format (opengeodata.nrw.de and compatible servers) carries two
/// `<files>` containers; the first lists subdirectories, the second the
/// downloadable files as child elements with a `name` attribute. Anything
/// that does not fit this shape counts as unreachable.
pub fn parse_directory_listing(body: &str) -> DirectoryListing {
    let Ok(doc) = roxmltree::Document::parse(body) else {
        return DirectoryListing::Unreachable;
    };

    let containers: Vec<_> = doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "files")
        .collect();

    let Some(files) = containers.get(1) else {
        return DirectoryListing::Unreachable;
    };

    let names = files
        .children()
        .filter(|c| c.is_element())
        .filter_map(|c| c.attribute("name").map(str::to_string))
        .collect();

    DirectoryListing::Files(names)
}

/// Resolve listed file names against the access URL base.
///
/// Mirrors URL-join semantics: a relative name is resolved against the
/// base, an absolute name replaces it. Names that cannot be resolved are
/// carried verbatim rather than dropped.
pub fn join_file_urls(base: &str, files: &[String]) -> Vec<String> {
    files
        .iter()
        .map(|file| {
            url::Url::parse(base)
                .and_then(|b| b.join(file))
                .map_or_else(|_| file.clone(), |joined| joined.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LISTING: &str = r#"<?xml version="1.0"?>
<index>
  <files>
    <dir name="archiv/"/>
  </files>
  <files>
    <file name="gebaeude_01.zip"/>
    <file name="gebaeude_02.zip"/>
    <file name="uebersicht.csv"/>
  </files>
</index>"#;

    #[test]
    fn test_create_client() {
        assert!(create_client().is_ok());
    }

    #[test]
    fn test_parse_directory_listing() {
        let listing = parse_directory_listing(LISTING);
        assert_eq!(
            listing,
            DirectoryListing::Files(vec![
                "gebaeude_01.zip".to_string(),
                "gebaeude_02.zip".to_string(),
                "uebersicht.csv".to_string(),
            ])
        );
    }

    #[test]
    fn test_parse_directory_listing_single_container() {
        let body = r#"<index><files><file name="a.zip"/></files></index>"#;
        assert_eq!(parse_directory_listing(body), DirectoryListing::Unreachable);
    }

    #[test]
    fn test_parse_directory_listing_not_xml() {
        assert_eq!(
            parse_directory_listing("<html><body>404</body>"),
            DirectoryListing::Unreachable
        );
    }

    #[test]
    fn test_parse_directory_listing_skips_nameless_entries() {
        let body = r#"<index><files/><files><file name="a.zip"/><file/></files></index>"#;
        assert_eq!(
            parse_directory_listing(body),
            DirectoryListing::Files(vec!["a.zip".to_string()])
        );
    }

    #[test]
    fn test_join_file_urls_relative() {
        let urls = join_file_urls(
            "https://www.opengeodata.nrw.de/produkte/gebaeude/",
            &["a.zip".to_string(), "b.zip".to_string()],
        );
        assert_eq!(
            urls,
            vec![
                "https://www.opengeodata.nrw.de/produkte/gebaeude/a.zip",
                "https://www.opengeodata.nrw.de/produkte/gebaeude/b.zip",
            ]
        );
    }

    #[test]
    fn test_join_file_urls_absolute_name_replaces_base() {
        let urls = join_file_urls(
            "https://example.org/daten/",
            &["https://cdn.example.org/a.zip".to_string()],
        );
        assert_eq!(urls, vec!["https://cdn.example.org/a.zip"]);
    }

    #[test]
    fn test_join_file_urls_bad_base_keeps_name() {
        let urls = join_file_urls("not a url", &["a.zip".to_string()]);
        assert_eq!(urls, vec!["a.zip"]);
    }

    #[test]
    fn test_offline_probe() {
        let probe = OfflineProbe;
        assert!(!probe.is_reachable("https://example.org"));
        assert_eq!(
            probe.list_directory("https://example.org"),
            DirectoryListing::Unreachable
        );
    }
}
