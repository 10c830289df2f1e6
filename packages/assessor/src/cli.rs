//! Command-line interface for the assessor.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::assessor::{assess_document, xml_files_in, Assessment, BatchSummary};
use crate::collect::{CollectFields, DefaultCollector, DialogCollector};
use crate::error::Result;
use crate::http::{HttpProbe, OfflineProbe, Probe};
use crate::sink::save_csv;

/// FAIR maturity assessment for INSPIRE / ISO 19115 metadata records.
#[derive(Parser)]
#[command(name = "fairmeta-assessor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assess a directory of XML metadata records and write a CSV catalog.
    Assess {
        /// Directory containing the XML metadata records
        input_dir: PathBuf,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Skip network probes; download URLs count as unreachable
        #[arg(long)]
        offline: bool,

        /// Accept every manual-input default without prompting
        #[arg(long)]
        assume_defaults: bool,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Assess {
            input_dir,
            output,
            offline,
            assume_defaults,
        } => assess_command(&input_dir, &output, offline, assume_defaults),
    }
}

/// Execute the assess command.
fn assess_command(
    input_dir: &Path,
    output: &Path,
    offline: bool,
    assume_defaults: bool,
) -> Result<()> {
    let files = xml_files_in(input_dir)?;

    let probe: Box<dyn Probe> = if offline {
        Box::new(OfflineProbe)
    } else {
        Box::new(HttpProbe::new()?)
    };
    let collector: Box<dyn CollectFields> = if assume_defaults {
        Box::new(DefaultCollector)
    } else {
        Box::new(DialogCollector)
    };

    println!(
        "{} {} XML-Dateien aus {}",
        style("Verarbeite").bold(),
        style(files.len()).cyan(),
        input_dir.display()
    );
    println!();

    // The progress bar would fight with interactive prompts on the same
    // terminal, so it is only drawn in non-interactive runs.
    let progress = if assume_defaults {
        let pb = ProgressBar::new(files.len() as u64);
        #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.green} {pos}/{len} {msg}")
                .expect("valid template"),
        );
        Some(pb)
    } else {
        None
    };

    let mut records = Vec::new();
    let mut summary = BatchSummary::default();

    for path in &files {
        summary.documents += 1;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match &progress {
            Some(pb) => pb.set_message(name),
            None => println!("{} {}", style("Datei:").bold(), style(&name).cyan()),
        }

        let outcome = std::fs::read_to_string(path)
            .map_err(Into::into)
            .and_then(|xml| assess_document(&xml, probe.as_ref(), collector.as_ref()));

        match outcome {
            Ok(Assessment::NotConformant) => summary.not_conformant += 1,
            Ok(Assessment::Records(document_records)) => records.extend(document_records),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to process document");
                summary.failures.push((path.clone(), e.to_string()));
            }
        }

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    summary.records = records.len();

    println!();
    if records.is_empty() {
        println!("Keine gültigen INSPIRE-/ISO19115/19119-Metadaten gefunden.");
    } else {
        save_csv(output, &records)?;
        println!(
            "{} {} Datensätze gespeichert in: {}",
            style("Fertig:").green().bold(),
            records.len(),
            output.display()
        );
    }
    print_summary(&summary);

    Ok(())
}

/// Print the batch counters, flagging skips and failures.
fn print_summary(summary: &BatchSummary) {
    if summary.not_conformant > 0 {
        println!(
            "  {} {} Dokument(e) nicht INSPIRE-/ISO-konform, übersprungen",
            style("Hinweis:").yellow().bold(),
            summary.not_conformant
        );
    }
    if !summary.failures.is_empty() {
        println!(
            "  {} {} Dokument(e) fehlgeschlagen:",
            style("Warnung:").yellow().bold(),
            summary.failures.len()
        );
        for (path, reason) in &summary.failures {
            println!("    {} ({reason})", path.display());
        }
    }
}
