use std::path::{Path, PathBuf};
use std::process;

use ktreesitter_codegen::{generate, GeneratedArtifact, OutputLayout};

use crate::commands::prepare;
use crate::config::absolutize;
use crate::error::CliError;
use crate::sink::{write_artifacts, WriteOutcome};
use crate::{report_error, OutputFormat};

pub(crate) struct GenerateOptions<'a> {
    pub config: &'a Path,
    pub out: &'a Path,
    pub templates: Option<&'a Path>,
    pub dry_run: bool,
}

struct GenerateReport {
    output_dir: PathBuf,
    artifacts: Vec<GeneratedArtifact>,
    /// `None` for a dry run.
    outcomes: Option<Vec<WriteOutcome>>,
}

pub(crate) fn cmd_generate(options: GenerateOptions<'_>, output: OutputFormat, quiet: bool) {
    match run(&options) {
        Ok(report) => {
            if !quiet {
                print_report(&report, output);
            }
        }
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    }
}

fn run(options: &GenerateOptions<'_>) -> Result<GenerateReport, CliError> {
    let (spec, templates) = prepare(options.config, options.templates)?;
    let output_dir = absolutize(options.out).map_err(CliError::WorkingDir)?;
    let artifacts = generate(&spec, &templates, &OutputLayout::new(&output_dir));

    let outcomes = if options.dry_run {
        tracing::info!(count = artifacts.len(), "dry run, nothing written");
        None
    } else {
        Some(write_artifacts(&output_dir, &artifacts)?)
    };

    Ok(GenerateReport {
        output_dir,
        artifacts,
        outcomes,
    })
}

fn print_report(report: &GenerateReport, output: OutputFormat) {
    match output {
        OutputFormat::Text => match &report.outcomes {
            Some(outcomes) => {
                for outcome in outcomes {
                    println!("{} {}", outcome.status.as_str(), outcome.path.display());
                }
            }
            None => {
                for artifact in &report.artifacts {
                    println!("would write {}", artifact.path.display());
                }
            }
        },
        OutputFormat::Json => {
            let artifacts: Vec<serde_json::Value> = report
                .artifacts
                .iter()
                .enumerate()
                .map(|(i, artifact)| {
                    let status = report
                        .outcomes
                        .as_ref()
                        .and_then(|o| o.get(i))
                        .map_or("planned", |o| o.status.as_str());
                    serde_json::json!({
                        "kind": artifact.kind,
                        "path": artifact.path.display().to_string(),
                        "status": status,
                    })
                })
                .collect();
            let doc = serde_json::json!({
                "output_dir": report.output_dir.display().to_string(),
                "dry_run": report.outcomes.is_none(),
                "artifacts": artifacts,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&doc).unwrap_or_else(|_| doc.to_string())
            );
        }
    }
}
