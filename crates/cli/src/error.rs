use ktreesitter_codegen::CodegenError;

use crate::config::ConfigError;

/// Any failure of a CLI command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error("could not resolve the working directory: {0}")]
    WorkingDir(#[source] std::io::Error),
}
