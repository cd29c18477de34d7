mod generate;
mod validate;

use std::path::Path;

use ktreesitter_codegen::{Templates, ValidSpec};

use crate::config::{absolutize, load_spec};
use crate::error::CliError;
use crate::resources::load_templates;

pub(crate) use generate::{cmd_generate, GenerateOptions};
pub(crate) use validate::cmd_validate;

/// Load and validate the configuration, then the templates.
///
/// The configuration is checked first so that a bad grammar is reported
/// before anything touches the template directory.
fn prepare(config: &Path, templates: Option<&Path>) -> Result<(ValidSpec, Templates), CliError> {
    let config = absolutize(config).map_err(CliError::WorkingDir)?;
    let spec = load_spec(&config)?.validate()?;
    let templates = load_templates(templates)?;
    Ok((spec, templates))
}
