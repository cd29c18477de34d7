use std::path::Path;
use std::process;

use crate::commands::prepare;
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_validate(
    config: &Path,
    templates: Option<&Path>,
    output: OutputFormat,
    quiet: bool,
) {
    let spec = match prepare(config, templates) {
        Ok((spec, _)) => spec,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => {
            println!(
                "{}: {}.{} ({} language method{})",
                config.display(),
                spec.package_name,
                spec.class_name,
                spec.language_methods.len(),
                if spec.language_methods.len() == 1 { "" } else { "s" }
            );
        }
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "valid": true,
                "grammar": spec.grammar_name,
                "package": spec.package_name,
                "class": spec.class_name,
                "library": spec.library_name,
                "language_methods": spec.language_methods,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&doc).unwrap_or_else(|_| doc.to_string())
            );
        }
    }
}
