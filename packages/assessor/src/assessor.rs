//! Main assessment pipeline tying all components together.
//!
//! One document is processed fully before the next begins; a failing
//! document is logged and skipped, never aborting the batch.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::Document;

use crate::collect::CollectFields;
use crate::config::{DOWNLOAD_URL_SEPARATOR, UNREACHABLE_SUFFIX};
use crate::dcat::classify_urls;
use crate::error::{AssessorError, Result};
use crate::extract::{extract_fields, is_conformant};
use crate::fair::{compute_indicators, IndicatorInputs};
use crate::geo::resolve_geo_label;
use crate::http::{join_file_urls, DirectoryListing, Probe};
use crate::license::resolve_license;
use crate::media::recommended_media_type;
use crate::record::OutputRecord;

/// Outcome of assessing a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assessment {
    /// The document failed the conformance gate and yields zero records.
    NotConformant,

    /// One record, or several after directory-listing fan-out.
    Records(Vec<OutputRecord>),
}

/// Counters reported to the user after a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// XML files visited.
    pub documents: usize,

    /// Records emitted across all documents.
    pub records: usize,

    /// Documents rejected by the conformance gate.
    pub not_conformant: usize,

    /// Documents that failed to parse or process, with the reason.
    pub failures: Vec<(PathBuf, String)>,
}

/// Assess one metadata document.
///
/// Runs the full pipeline: conformance gate, field extraction, license and
/// media-type resolution, URL classification with directory-listing
/// expansion, manual field collection, indicator computation, and fan-out.
pub fn assess_document(
    xml: &str,
    probe: &dyn Probe,
    collector: &dyn CollectFields,
) -> Result<Assessment> {
    let doc = Document::parse(xml)?;

    if !is_conformant(&doc) {
        return Ok(Assessment::NotConformant);
    }

    let fields = extract_fields(&doc);

    let license = resolve_license(&fields.constraint_texts);
    let resolved_format = fields
        .format_text
        .as_deref()
        .map(recommended_media_type);
    let classification = classify_urls(&fields.online_resource_urls);

    // Fan-out pairs (file name, download URL) discovered via the directory
    // listing; stays empty when a direct download URL exists.
    let mut expanded: Vec<(String, String)> = Vec::new();

    let download_url: Option<String> = match classification.download {
        Some(ref url) => {
            if probe.is_reachable(url) {
                Some(url.clone())
            } else {
                // Keep the URL, flag it for manual confirmation.
                Some(format!("{url}{UNREACHABLE_SUFFIX}"))
            }
        }
        None => match classification.access.as_deref() {
            Some(access) => match probe.list_directory(access) {
                DirectoryListing::Files(files) if !files.is_empty() => {
                    let urls = join_file_urls(access, &files);
                    expanded = files.into_iter().zip(urls).collect();
                    Some(
                        expanded
                            .iter()
                            .map(|(_, url)| url.as_str())
                            .collect::<Vec<_>>()
                            .join(DOWNLOAD_URL_SEPARATOR),
                    )
                }
                DirectoryListing::Files(_) | DirectoryListing::Unreachable => None,
            },
            None => None,
        },
    };

    let geo_suggestion = resolve_geo_label(fields.extent_description.as_deref());
    let manual = collector.collect(fields.title.as_deref(), geo_suggestion.as_deref())?;

    let indicators = compute_indicators(&IndicatorInputs {
        fields: &fields,
        license: &license,
        resolved_format: resolved_format.as_deref(),
        download_url: download_url.as_deref(),
        access_url: classification.access.as_deref(),
        raw_xml: xml,
    });

    let base = OutputRecord {
        metadata_record_id: fields.resource_identifier.clone(),
        dataset_id: fields.file_identifier.clone(),
        title: fields.title.clone(),
        description: fields.description.clone(),
        manual,
        license,
        publisher: fields.organisation.clone(),
        contact_email: fields.contact_email.clone(),
        download_url,
        access_url: classification.access,
        metadata_standard: fields.metadata_standard.clone(),
        metadata_standard_version: fields.metadata_standard_version.clone(),
        publication_date: fields.publication_date.clone(),
        date_stamp: fields.date_stamp.clone(),
        format: resolved_format,
        indicators,
        entry_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
    };

    let records = if expanded.is_empty() {
        vec![base]
    } else {
        expanded
            .into_iter()
            .map(|(name, url)| {
                let mut record = base.clone();
                record.title = Some(name);
                record.download_url = Some(url);
                record
            })
            .collect()
    };

    Ok(Assessment::Records(records))
}

/// List the XML files of a directory, sorted for deterministic processing.
pub fn xml_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(AssessorError::InvalidInputDir(dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Assess every XML file in a directory.
///
/// Per-file failures are collected in the summary instead of propagated; a
/// single bad file never aborts the batch.
pub fn assess_directory(
    dir: &Path,
    probe: &dyn Probe,
    collector: &dyn CollectFields,
) -> Result<(Vec<OutputRecord>, BatchSummary)> {
    let files = xml_files_in(dir)?;

    let mut records = Vec::new();
    let mut summary = BatchSummary::default();

    for path in files {
        summary.documents += 1;

        let xml = match fs::read_to_string(&path) {
            Ok(xml) => xml,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read file");
                summary.failures.push((path, e.to_string()));
                continue;
            }
        };

        match assess_document(&xml, probe, collector) {
            Ok(Assessment::NotConformant) => {
                tracing::debug!(path = %path.display(), "Not INSPIRE/ISO-conformant, skipped");
                summary.not_conformant += 1;
            }
            Ok(Assessment::Records(document_records)) => {
                records.extend(document_records);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to process document");
                summary.failures.push((path, e.to_string()));
            }
        }
    }

    summary.records = records.len();
    Ok((records, summary))
}
