//! fairmeta-assessor - FAIR maturity assessment for INSPIRE metadata.
//!
//! This crate extracts structured metadata from ISO 19115/19119
//! (INSPIRE-conformant) XML records, normalizes selected fields into a
//! DCAT-AP-like tabular schema, and computes a fixed set of FAIR maturity
//! indicators per record.
//!
//! # Example
//!
//! ```
//! use fairmeta_assessor::license::resolve_license;
//!
//! let constraints = vec!["CC-BY 4.0".to_string()];
//! assert_eq!(
//!     resolve_license(&constraints),
//!     "https://creativecommons.org/licenses/by/4.0/"
//! );
//! ```
//!
//! # Architecture
//!
//! The assessor is organized into several modules:
//!
//! - [`config`]: Namespace URIs, sentinels, and classification constants
//! - [`error`]: Error types and Result alias
//! - [`xml`]: Namespace-aware path evaluation over parsed documents
//! - [`extract`]: Raw field extraction and the conformance gate
//! - [`license`]: License free-text resolution
//! - [`media`]: Media-type classification of format descriptions
//! - [`dcat`]: Download/access URL distinction
//! - [`geo`]: Geographic extent resolution
//! - [`fair`]: FAIR indicator engine
//! - [`http`]: Reachability and directory-listing probes
//! - [`collect`]: Human-in-the-loop categorical fields
//! - [`record`]: The flattened output record
//! - [`sink`]: CSV serialization
//! - [`assessor`]: Pipeline orchestration and batch processing
//! - [`cli`]: Command-line interface

pub mod assessor;
pub mod cli;
pub mod collect;
pub mod config;
pub mod dcat;
pub mod error;
pub mod extract;
pub mod fair;
pub mod geo;
pub mod http;
pub mod license;
pub mod media;
pub mod record;
pub mod sink;
pub mod xml;

// Re-export main functions
pub use assessor::{assess_directory, assess_document};

// Re-export commonly used items
pub use assessor::{Assessment, BatchSummary};
pub use error::{AssessorError, Result};
pub use extract::RawFieldSet;
pub use fair::{FairIndicators, Ternary};
pub use record::OutputRecord;
